use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Gender, ListKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    NoNotification,
    #[default]
    NotificationOnly,
    NotificationAndToast,
    NotificationAndSound,
}

/// Per-channel notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub message_notify_level: NotifyLevel,
    pub ad_notify_level: NotifyLevel,
    pub message_notify_only_for_interesting: bool,
    /// Unread ads needed before an idle channel asks for attention.
    pub flash_interval: usize,
    pub notify_includes_character_names: bool,
    pub notify_terms: Vec<String>,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            message_notify_level: NotifyLevel::NotificationOnly,
            ad_notify_level: NotifyLevel::NoNotification,
            message_notify_only_for_interesting: false,
            flash_interval: 1,
            notify_includes_character_names: false,
            notify_terms: Vec::new(),
        }
    }
}

impl ChannelSettings {
    /// Channel-local ding terms followed by `global`, blanks removed.
    pub fn ding_terms<'a>(&'a self, global: &'a [String]) -> Vec<&'a str> {
        self.notify_terms
            .iter()
            .chain(global.iter())
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderSettings {
    pub allowed: HashSet<Gender>,
}

impl Default for GenderSettings {
    fn default() -> Self {
        Self {
            allowed: Gender::ALL.into_iter().collect(),
        }
    }
}

impl GenderSettings {
    pub fn is_filtering(&self) -> bool {
        Gender::ALL.iter().any(|gender| !self.allowed.contains(gender))
    }

    pub fn set_allowed(&mut self, gender: Gender, allowed: bool) {
        if allowed {
            self.allowed.insert(gender);
        } else {
            self.allowed.remove(&gender);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub search_string: String,
    pub show_ignored: bool,
    pub show_not_interested: bool,
    /// Restrict results to senders on one of the enabled positive lists.
    pub show_only_listed: bool,
    pub show_friends: bool,
    pub show_bookmarks: bool,
    pub show_interested: bool,
    pub show_moderators: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            search_string: String::new(),
            show_ignored: false,
            show_not_interested: false,
            show_only_listed: false,
            show_friends: true,
            show_bookmarks: true,
            show_interested: true,
            show_moderators: true,
        }
    }
}

impl SearchSettings {
    pub fn with_search(search_string: impl Into<String>) -> Self {
        Self {
            search_string: search_string.into(),
            ..Self::default()
        }
    }

    pub fn shows_list(&self, list: ListKind) -> bool {
        match list {
            ListKind::Friend => self.show_friends,
            ListKind::Bookmark => self.show_bookmarks,
            ListKind::Interested => self.show_interested,
            ListKind::Moderator => self.show_moderators,
            ListKind::Ignored => self.show_ignored,
            ListKind::NotInterested => self.show_not_interested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ding_terms_merge_channel_and_global_without_blanks() {
        let settings = ChannelSettings {
            notify_terms: vec!["alice".into(), "  ".into()],
            ..ChannelSettings::default()
        };
        let global = vec![" bob ".to_string()];
        assert_eq!(settings.ding_terms(&global), vec!["alice", "bob"]);
    }

    #[test]
    fn default_gender_settings_do_not_filter() {
        let mut genders = GenderSettings::default();
        assert!(!genders.is_filtering());
        genders.set_allowed(Gender::Male, false);
        assert!(genders.is_filtering());
    }

    #[test]
    fn settings_deserialize_with_missing_fields() {
        let settings: ChannelSettings =
            serde_json::from_str(r#"{"message_notify_level":"notification_and_sound"}"#)
                .expect("settings");
        assert_eq!(
            settings.message_notify_level,
            NotifyLevel::NotificationAndSound
        );
        assert_eq!(settings.flash_interval, 1);
    }
}
