//! In-process snapshot topic
//!
//! A lightweight fan-out channel between the subscription collaborator
//! (which produces snapshot deliveries) and the adapter pipeline.
//! Fire-and-forget: every active subscriber receives every message,
//! slow subscribers lag rather than block producers.

mod error;

use tokio::sync::broadcast;

pub use error::TopicError;

use crate::core::config::TopicConfig;

/// Trait for messages that can be published to topics
pub trait TopicMessage: Clone + Send + Sync + 'static {
    /// Estimate message size in bytes, for capacity planning and logging
    fn size_bytes(&self) -> usize;
}

/// A single topic instance - clone and share across producers
#[derive(Clone)]
pub struct Topic<T: TopicMessage> {
    tx: broadcast::Sender<T>,
}

impl<T: TopicMessage> Topic<T> {
    /// Create a topic with the given configuration
    pub fn new(config: TopicConfig) -> Result<Self, TopicError> {
        config
            .validate()
            .map_err(|e| TopicError::Config(e.to_string()))?;
        let (tx, _rx) = broadcast::channel(config.channel_capacity);
        Ok(Self { tx })
    }

    /// Publish a message to all current subscribers.
    ///
    /// Returns the number of subscribers that received it. Publishing
    /// with no active subscribers is reported as `ChannelClosed`.
    pub fn publish(&self, msg: T) -> Result<usize, TopicError> {
        self.tx.send(msg).map_err(|_| TopicError::ChannelClosed)
    }

    /// Create a new subscriber starting from the next published message
    pub fn subscribe(&self) -> Subscriber<T> {
        Subscriber {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Subscriber handle for a topic
pub struct Subscriber<T: TopicMessage> {
    rx: broadcast::Receiver<T>,
}

impl<T: TopicMessage> Subscriber<T> {
    pub async fn recv(&mut self) -> Result<T, TopicError> {
        self.rx.recv().await.map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl TopicMessage for String {
        fn size_bytes(&self) -> usize {
            self.len()
        }
    }

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let topic: Topic<String> = Topic::new(TopicConfig::with_capacity(8)).unwrap();
        let mut sub = topic.subscribe();

        topic.publish("hello".to_string()).unwrap();
        assert_eq!(sub.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_closed() {
        let topic: Topic<String> = Topic::new(TopicConfig::with_capacity(8)).unwrap();
        assert!(matches!(
            topic.publish("dropped".to_string()),
            Err(TopicError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags() {
        let topic: Topic<String> = Topic::new(TopicConfig::with_capacity(1)).unwrap();
        let mut sub = topic.subscribe();

        topic.publish("a".to_string()).unwrap();
        topic.publish("b".to_string()).unwrap();
        topic.publish("c".to_string()).unwrap();

        // Capacity 1: the first recv reports how far behind we fell.
        assert!(matches!(sub.recv().await, Err(TopicError::Lagged(2))));
        assert_eq!(sub.recv().await.unwrap(), "c");
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let topic: Topic<String> = Topic::new(TopicConfig::with_capacity(8)).unwrap();
        let mut first = topic.subscribe();
        let mut second = topic.subscribe();
        assert_eq!(topic.subscriber_count(), 2);

        topic.publish("fanout".to_string()).unwrap();
        assert_eq!(first.recv().await.unwrap(), "fanout");
        assert_eq!(second.recv().await.unwrap(), "fanout");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<Topic<String>, _> = Topic::new(TopicConfig::with_capacity(0));
        assert!(matches!(result, Err(TopicError::Config(_))));
    }
}
