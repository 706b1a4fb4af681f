use std::collections::VecDeque;

use shared::domain::Message;

/// Result of appending to a [`Backlog`].
#[derive(Debug, Default)]
pub struct PushOutcome {
    /// Entries removed from the front to make room, oldest first.
    pub evicted: Vec<Message>,
    /// Whether the appended entry landed in the unread region.
    pub unread: bool,
}

impl PushOutcome {
    pub fn did_evict(&self) -> bool {
        !self.evicted.is_empty()
    }
}

/// One bounded, ordered message sequence.
///
/// Entries `[0, last_read)` are read, `[last_read, len)` are unread.
/// `last_read <= len` holds after every operation.
#[derive(Debug, Default)]
pub struct Backlog {
    entries: VecDeque<Message>,
    last_read: usize,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last_read(&self) -> usize {
        self.last_read
    }

    pub fn unread(&self) -> usize {
        self.entries.len().saturating_sub(self.last_read)
    }

    /// Unread entries, oldest first.
    pub fn unread_entries(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().skip(self.last_read)
    }

    pub fn mark_read(&mut self) {
        self.last_read = self.entries.len();
    }

    /// Appends `message`, evicting from the front while the sequence is at
    /// `capacity`.
    ///
    /// With `read_through` the new entry is considered read immediately.
    /// Otherwise an eviction shifts the watermark down by the number of
    /// removed entries so the unread region keeps pointing at the same
    /// messages.
    pub fn push(&mut self, message: Message, capacity: usize, read_through: bool) -> PushOutcome {
        let capacity = capacity.max(1);
        let mut evicted = Vec::new();
        while self.entries.len() >= capacity {
            match self.entries.pop_front() {
                Some(oldest) => evicted.push(oldest),
                None => break,
            }
        }

        self.entries.push_back(message);

        let unread = if read_through {
            self.last_read = self.entries.len();
            false
        } else {
            if !evicted.is_empty() {
                self.last_read = self.last_read.saturating_sub(evicted.len());
            }
            true
        };
        self.clamp_watermark();

        PushOutcome { evicted, unread }
    }

    /// Removes every entry. The watermark follows the now empty length.
    pub fn clear(&mut self) -> Vec<Message> {
        let removed = self.entries.drain(..).collect();
        self.last_read = 0;
        removed
    }

    /// Drops the oldest entries until at most `capacity` remain and re-anchors
    /// the watermark to the surviving entries.
    pub fn shrink_to(&mut self, capacity: usize) -> Vec<Message> {
        let capacity = capacity.max(1);
        if self.entries.len() <= capacity {
            return Vec::new();
        }

        let excess = self.entries.len() - capacity;
        let removed: Vec<Message> = self.entries.drain(..excess).collect();
        self.last_read = self.last_read.saturating_sub(removed.len());
        self.clamp_watermark();
        removed
    }

    fn clamp_watermark(&mut self) {
        self.last_read = self.last_read.min(self.entries.len());
    }
}

#[cfg(test)]
#[path = "tests/backlog_tests.rs"]
mod tests;
