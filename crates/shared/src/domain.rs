use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(MessageId);

/// Identifier of the always-open console channel.
pub const HOME_CHANNEL_ID: &str = "Home";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == HOME_CHANNEL_ID
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Public,
    Private,
    PrivateMessage,
    Utility,
}

/// Which message kinds a channel accepts from posters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMode {
    Ads,
    Chat,
    #[default]
    Both,
}

impl ChannelMode {
    pub fn accepts(self, kind: MessageKind) -> bool {
        match self {
            ChannelMode::Both => true,
            ChannelMode::Ads => kind == MessageKind::Ad,
            ChannelMode::Chat => kind == MessageKind::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Normal,
    Ad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    Looking,
    #[default]
    Online,
    Busy,
    Idle,
    Away,
    Dnd,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Friend,
    Bookmark,
    Interested,
    Moderator,
    Ignored,
    NotInterested,
}

impl ListKind {
    /// Lists that hide a character rather than promote it.
    pub const NEGATIVE: [ListKind; 2] = [ListKind::Ignored, ListKind::NotInterested];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    None,
    Male,
    Female,
    Herm,
    MaleHerm,
    Cuntboy,
    Shemale,
    Transgender,
}

impl Gender {
    pub const ALL: [Gender; 8] = [
        Gender::None,
        Gender::Male,
        Gender::Female,
        Gender::Herm,
        Gender::MaleHerm,
        Gender::Cuntboy,
        Gender::Shemale,
        Gender::Transgender,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub status: StatusType,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender: Gender::default(),
            status: StatusType::default(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_status(mut self, status: StatusType) -> Self {
        self.status = status;
        self
    }
}

/// A chat line or ad as retained by a channel backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    pub poster: Character,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        id: MessageId,
        kind: MessageKind,
        poster: Character,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            poster,
            text: text.into(),
            posted_at: Utc::now(),
        }
    }

    pub fn normal(id: u64, poster: Character, text: impl Into<String>) -> Self {
        Self::new(MessageId(id), MessageKind::Normal, poster, text)
    }

    pub fn ad(id: u64, poster: Character, text: impl Into<String>) -> Self {
        Self::new(MessageId(id), MessageKind::Ad, poster, text)
    }
}
