use std::sync::Arc;

use shared::{
    domain::{ChannelId, ChannelKind, ChannelMode, Message, MessageKind},
    error::ChannelError,
    settings::{ChannelSettings, NotifyLevel},
};
use tracing::{debug, info};

use crate::{
    backlog::Backlog,
    config::AppSettings,
    events::{ChangeNotifier, ChannelEvent},
    roster::{ChannelCharacterManager, CharacterManager},
};

pub struct ChannelModel {
    id: ChannelId,
    title: String,
    kind: ChannelKind,
    mode: ChannelMode,
    messages: Backlog,
    ads: Backlog,
    backlog_max: usize,
    is_selected: bool,
    needs_attention_override: bool,
    unread_contains_interesting: bool,
    cached_user_count: usize,
    description: String,
    settings: ChannelSettings,
    roster: Arc<dyn CharacterManager>,
    notifier: ChangeNotifier,
}

impl std::fmt::Debug for ChannelModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelModel")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("messages", &self.messages.len())
            .field("ads", &self.ads.len())
            .field("backlog_max", &self.backlog_max)
            .field("is_selected", &self.is_selected)
            .finish_non_exhaustive()
    }
}

impl ChannelModel {
    /// Creates a channel with an empty backlog.
    ///
    /// `users` is the user count announced before the roster is populated;
    /// negative counts are rejected.
    pub fn new(
        id: ChannelId,
        title: impl Into<String>,
        kind: ChannelKind,
        users: i64,
        app: &AppSettings,
    ) -> Result<Self, ChannelError> {
        if id.as_str().is_empty() {
            return Err(ChannelError::EmptyChannelId);
        }
        let cached_user_count =
            usize::try_from(users).map_err(|_| ChannelError::NegativeUserCount { users })?;

        info!(
            channel = %id,
            kind = ?kind,
            users = cached_user_count,
            backlog_max = app.backlog_max,
            "channel created"
        );

        Ok(Self {
            id,
            title: title.into(),
            kind,
            mode: ChannelMode::default(),
            messages: Backlog::new(),
            ads: Backlog::new(),
            backlog_max: app.backlog_max.max(1),
            is_selected: false,
            needs_attention_override: false,
            unread_contains_interesting: false,
            cached_user_count,
            description: String::new(),
            settings: ChannelSettings::default(),
            roster: Arc::new(ChannelCharacterManager::new()),
            notifier: ChangeNotifier::default(),
        })
    }

    pub fn with_mode(mut self, mode: ChannelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_settings(mut self, settings: ChannelSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_roster(mut self, roster: Arc<dyn CharacterManager>) -> Self {
        self.roster = roster;
        self
    }

    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn messages(&self) -> &Backlog {
        &self.messages
    }

    pub fn ads(&self) -> &Backlog {
        &self.ads
    }

    pub fn backlog_max(&self) -> usize {
        self.backlog_max
    }

    pub fn roster(&self) -> &dyn CharacterManager {
        self.roster.as_ref()
    }

    pub fn settings(&self) -> &ChannelSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ChannelSettings) {
        self.settings = settings;
        self.notifier.publish(ChannelEvent::PropertyChanged("settings"));
        self.publish_counters();
    }

    pub fn subscribe(&mut self) -> crossbeam_channel::Receiver<ChannelEvent> {
        self.notifier.subscribe()
    }

    pub fn last_read_count(&self) -> usize {
        self.messages.last_read()
    }

    pub fn last_read_ad_count(&self) -> usize {
        self.ads.last_read()
    }

    pub fn unread(&self) -> usize {
        self.messages.unread()
    }

    pub fn unread_ads(&self) -> usize {
        self.ads.unread()
    }

    pub fn composite_unread_count(&self) -> usize {
        self.unread().saturating_add(self.unread_ads())
    }

    pub fn unread_contains_interesting(&self) -> bool {
        self.unread_contains_interesting
    }

    pub fn needs_attention_override(&self) -> bool {
        self.needs_attention_override
    }

    /// Raised when a ding term matched; cleared by selecting the channel.
    pub fn set_needs_attention_override(&mut self, value: bool) {
        if self.needs_attention_override == value {
            return;
        }
        self.needs_attention_override = value;
        self.publish_counters();
    }

    pub fn needs_attention(&self) -> bool {
        if !self.is_selected && self.needs_attention_override {
            return true;
        }

        if self.settings.message_notify_level == NotifyLevel::NoNotification {
            return false;
        }

        if self.settings.message_notify_only_for_interesting {
            return self.base_needs_attention();
        }

        self.base_needs_attention() || self.unread_ads() >= self.settings.flash_interval
    }

    fn base_needs_attention(&self) -> bool {
        !self.is_selected && self.unread_contains_interesting && self.composite_unread_count() > 0
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Selecting a channel marks everything in it read.
    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
        if selected {
            self.messages.mark_read();
            self.ads.mark_read();
            self.unread_contains_interesting = false;
            self.needs_attention_override = false;
        }

        self.notifier
            .publish(ChannelEvent::PropertyChanged("is_selected"));
        self.publish_counters();
    }

    /// Live roster size, or the announced count while the roster is empty.
    pub fn user_count(&self) -> usize {
        let live = self.roster.character_count();
        if live == 0 {
            self.cached_user_count
        } else {
            live
        }
    }

    pub fn set_user_count(&mut self, users: usize) {
        self.cached_user_count = users;
        self.notifier
            .publish(ChannelEvent::PropertyChanged("user_count"));
    }

    pub fn display_number(&self) -> usize {
        self.user_count()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.notifier
            .publish(ChannelEvent::PropertyChanged("description"));
    }

    pub fn can_close(&self) -> bool {
        !self.id.is_home() && self.is_selected
    }

    /// Appends `message` to the backlog matching its kind.
    ///
    /// A full backlog loses its oldest entry first. The new entry is read
    /// immediately when the channel is selected; otherwise it is unread and,
    /// when no eviction happened, `is_of_interest` feeds attention.
    pub fn add_message(&mut self, message: Message, is_of_interest: bool) {
        let kind = message.kind;
        let id = message.id;
        let backlog_max = self.backlog_max;
        let read_through = self.is_selected;

        let outcome = self
            .backlog_mut(kind)
            .push(message, backlog_max, read_through);
        let evicted = outcome.did_evict();
        self.dispose(kind, outcome.evicted);

        if outcome.unread && !evicted && is_of_interest {
            self.unread_contains_interesting = true;
        }

        self.notifier
            .publish(ChannelEvent::MessageAdded { kind, id });
        self.publish_counters();
    }

    pub fn clear_messages(&mut self) {
        self.clear(MessageKind::Normal);
    }

    pub fn clear_ads(&mut self) {
        self.clear(MessageKind::Ad);
    }

    /// Applies a new capacity, dropping the oldest entries of any backlog
    /// that no longer fits and re-anchoring its read watermark.
    pub fn set_backlog_max(&mut self, backlog_max: usize) {
        let backlog_max = backlog_max.max(1);
        if backlog_max == self.backlog_max {
            return;
        }

        info!(
            channel = %self.id,
            from = self.backlog_max,
            to = backlog_max,
            "renormalizing backlog capacity"
        );
        self.backlog_max = backlog_max;

        for kind in [MessageKind::Normal, MessageKind::Ad] {
            let removed = self.backlog_mut(kind).shrink_to(backlog_max);
            self.dispose(kind, removed);
        }
        self.publish_counters();
    }

    fn clear(&mut self, kind: MessageKind) {
        let removed = self.backlog_mut(kind).clear();
        let count = removed.len();
        drop(removed);

        debug!(channel = %self.id, kind = ?kind, removed = count, "backlog cleared");
        self.notifier
            .publish(ChannelEvent::BacklogCleared { kind, removed: count });
        self.publish_counters();
    }

    fn backlog_mut(&mut self, kind: MessageKind) -> &mut Backlog {
        match kind {
            MessageKind::Normal => &mut self.messages,
            MessageKind::Ad => &mut self.ads,
        }
    }

    fn dispose(&mut self, kind: MessageKind, evicted: Vec<Message>) {
        for message in evicted {
            debug!(
                channel = %self.id,
                kind = ?kind,
                message_id = message.id.0,
                "evicted oldest backlog entry"
            );
            self.notifier.publish(ChannelEvent::MessageEvicted {
                kind,
                id: message.id,
            });
        }
    }

    fn publish_counters(&mut self) {
        let event = ChannelEvent::CountersChanged {
            unread: self.unread(),
            unread_ads: self.unread_ads(),
            composite_unread: self.composite_unread_count(),
            needs_attention: self.needs_attention(),
        };
        self.notifier.publish(event);
    }
}

#[cfg(test)]
#[path = "tests/channel_tests.rs"]
mod tests;
