use chrono::{DateTime, Utc};
use shared::{
    domain::{ChannelId, MessageKind},
    settings::{ChannelSettings, NotifyLevel},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub channel_id: ChannelId,
    pub title: String,
    pub body: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(channel_id: ChannelId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            channel_id,
            title: title.into(),
            body: body.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Presentation side of notifications: history, window flashing, sound and
/// toasts.
pub trait NotificationSink {
    fn add_notification(&mut self, notification: Notification);
    fn flash_window(&mut self);
    fn play_sound(&mut self);
    fn show_toast(&mut self);
}

/// Drives `sink` through the fixed action sequence for `level`.
pub fn notify_with_settings(
    sink: &mut dyn NotificationSink,
    notification: Notification,
    level: NotifyLevel,
) {
    debug!(
        channel = %notification.channel_id,
        level = ?level,
        "dispatching notification"
    );

    match level {
        NotifyLevel::NoNotification => {}
        NotifyLevel::NotificationOnly => {
            sink.add_notification(notification);
        }
        NotifyLevel::NotificationAndToast => {
            sink.add_notification(notification);
            sink.flash_window();
            sink.show_toast();
        }
        NotifyLevel::NotificationAndSound => {
            sink.add_notification(notification);
            sink.flash_window();
            sink.play_sound();
            sink.show_toast();
        }
    }
}

/// Resolves the level a new message should notify at.
///
/// Ads follow `ad_notify_level`, chat follows `message_notify_level`. With
/// notify-only-for-interesting, uninteresting messages stay silent. A ding
/// always produces at least a recorded notification.
pub fn effective_level(
    settings: &ChannelSettings,
    kind: MessageKind,
    is_of_interest: bool,
    is_ding: bool,
) -> NotifyLevel {
    let configured = match kind {
        MessageKind::Normal => settings.message_notify_level,
        MessageKind::Ad => settings.ad_notify_level,
    };

    if is_ding {
        return configured.max(NotifyLevel::NotificationOnly);
    }

    if settings.message_notify_only_for_interesting && !is_of_interest {
        return NotifyLevel::NoNotification;
    }

    configured
}

#[cfg(test)]
#[path = "tests/notify_tests.rs"]
mod tests;
