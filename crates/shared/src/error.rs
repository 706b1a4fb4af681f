use thiserror::Error;

/// Rejections raised while constructing a channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("users cannot be a negative number (got {users})")]
    NegativeUserCount { users: i64 },
    #[error("channel id must not be empty")]
    EmptyChannelId,
}
