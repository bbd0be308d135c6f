//! Snapshot consumption pipeline
//!
//! Subscribes to the snapshot topic and drives every delivery through
//! the adapter. On shutdown the pipeline drains messages already in the
//! channel, so deliveries past the filter decision still publish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::CounterSnapshotAdapter;
use crate::core::constants::DRAIN_RECV_TIMEOUT_MS;
use crate::snapshot::SnapshotDelivery;
use crate::topics::{Topic, TopicError};

pub struct SnapshotPipeline {
    adapter: Arc<CounterSnapshotAdapter>,
}

impl SnapshotPipeline {
    pub fn new(adapter: Arc<CounterSnapshotAdapter>) -> Self {
        Self { adapter }
    }

    pub fn start(
        self,
        topic: Topic<SnapshotDelivery>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let mut subscriber = topic.subscribe();

        tokio::spawn(async move {
            let mut shutdown_requested = false;

            loop {
                if shutdown_requested {
                    // Drain remaining messages before stopping
                    match tokio::time::timeout(
                        Duration::from_millis(DRAIN_RECV_TIMEOUT_MS),
                        subscriber.recv(),
                    )
                    .await
                    {
                        Ok(Ok(delivery)) => {
                            self.run(&delivery);
                            continue;
                        }
                        Ok(Err(TopicError::Lagged(n))) => {
                            tracing::warn!(lagged = n, "SnapshotPipeline lagged during drain");
                            continue;
                        }
                        _ => break,
                    }
                }

                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        // A dropped sender stops the pipeline the same
                        // way an explicit trigger does.
                        if changed.is_err() || *shutdown_rx.borrow() {
                            tracing::debug!("SnapshotPipeline received shutdown, draining...");
                            shutdown_requested = true;
                        }
                    }
                    result = subscriber.recv() => {
                        match result {
                            Ok(delivery) => self.run(&delivery),
                            Err(TopicError::Lagged(n)) => {
                                tracing::warn!(lagged = n, "SnapshotPipeline lagged");
                            }
                            Err(_) => break,
                        }
                    }
                }
            }
            tracing::debug!("SnapshotPipeline shutdown complete");
        })
    }

    fn run(&self, delivery: &SnapshotDelivery) {
        if !self.adapter.source_allowed(&delivery.source) {
            tracing::trace!(source = %delivery.source, "source filtered out");
            return;
        }
        self.adapter.on_delivery(delivery);
    }
}
