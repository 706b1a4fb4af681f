pub mod backlog;
pub mod channel;
pub mod config;
pub mod events;
pub mod filters;
pub mod notify;
pub mod roster;
pub mod sort;

pub use backlog::Backlog;
pub use channel::ChannelModel;
pub use config::{load_settings, AppSettings};
pub use events::ChannelEvent;
pub use filters::{is_ding_message, meets_filters, TermMatcher};
pub use notify::{notify_with_settings, Notification, NotificationSink};
pub use roster::{ChannelCharacterManager, CharacterManager};
pub use sort::SortScheme;
