//! Change notifications published by a channel to its observers.

use crossbeam_channel::{unbounded, Receiver, Sender};
use shared::domain::{MessageId, MessageKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    MessageAdded {
        kind: MessageKind,
        id: MessageId,
    },
    MessageEvicted {
        kind: MessageKind,
        id: MessageId,
    },
    BacklogCleared {
        kind: MessageKind,
        removed: usize,
    },
    CountersChanged {
        unread: usize,
        unread_ads: usize,
        composite_unread: usize,
        needs_attention: bool,
    },
    PropertyChanged(&'static str),
}

/// Fan-out of [`ChannelEvent`]s to any number of subscribers.
///
/// Subscribers whose receiver has been dropped are pruned on the next
/// publish.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<ChannelEvent>>,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self) -> Receiver<ChannelEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: ChannelEvent) {
        if self.subscribers.is_empty() {
            return;
        }

        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
