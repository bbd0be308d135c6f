//! Early source-announcement buffering
//!
//! The event source side starts announcing already-existing sources
//! before a subscriber has had a chance to wire up its callback. The
//! bridge queues those early announcements and replays them on attach,
//! so no source is missed and none is observed twice.

use parking_lot::Mutex;

/// Callback invoked once per announced source name.
///
/// Must not call back into the bridge; the bridge holds its lock while
/// delivering, including during replay.
pub type SourceCallback = Box<dyn Fn(&str) + Send + Sync>;

enum BridgeState {
    /// No subscriber yet; announcements queue up in arrival order
    Buffering(Vec<String>),
    /// Live: announcements go straight to the callback
    Attached(SourceCallback),
}

/// Buffers source announcements until a subscriber attaches
pub struct SubscriptionBridge {
    state: Mutex<BridgeState>,
}

impl SubscriptionBridge {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BridgeState::Buffering(Vec::new())),
        }
    }

    /// Announce a source. Queued before `attach`, delivered after.
    pub fn announce(&self, source: &str) {
        let mut state = self.state.lock();
        match &mut *state {
            BridgeState::Buffering(pending) => pending.push(source.to_string()),
            BridgeState::Attached(callback) => callback(source),
        }
    }

    /// Wire the subscriber callback, replaying queued announcements in
    /// arrival order before any live announcement can be delivered.
    ///
    /// A second attach replaces the callback; the buffer was already
    /// drained, so nothing is replayed again.
    pub fn attach(&self, callback: SourceCallback) {
        let mut state = self.state.lock();
        if let BridgeState::Buffering(pending) = &mut *state {
            for source in pending.drain(..) {
                callback(&source);
            }
        }
        *state = BridgeState::Attached(callback);
    }

    /// Whether a subscriber is attached
    pub fn is_attached(&self) -> bool {
        matches!(&*self.state.lock(), BridgeState::Attached(_))
    }

    /// Number of announcements still queued
    pub fn pending(&self) -> usize {
        match &*self.state.lock() {
            BridgeState::Buffering(pending) => pending.len(),
            BridgeState::Attached(_) => 0,
        }
    }
}

impl Default for SubscriptionBridge {
    fn default() -> Self {
        Self::new()
    }
}
