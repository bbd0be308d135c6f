//! Topic error types

use thiserror::Error;
use tokio::sync::broadcast;

/// Error type for topic operations
#[derive(Error, Debug)]
pub enum TopicError {
    /// Channel closed, or nobody is subscribed to receive the message
    #[error("channel closed")]
    ChannelClosed,

    /// Receiver fell behind and missed messages
    #[error("receiver lagged by {0} messages")]
    Lagged(u64),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<broadcast::error::RecvError> for TopicError {
    fn from(err: broadcast::error::RecvError) -> Self {
        match err {
            broadcast::error::RecvError::Closed => TopicError::ChannelClosed,
            broadcast::error::RecvError::Lagged(n) => TopicError::Lagged(n),
        }
    }
}
