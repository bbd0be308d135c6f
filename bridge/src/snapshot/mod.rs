//! Snapshot decoding and classification
//!
//! One raw snapshot flows parse → classify → registry dispatch. Both
//! steps are stateless; all failure is absorption.

pub mod classify;
pub mod parse;
pub mod types;

pub use classify::classify;
pub use parse::parse;
pub use types::{ParsedUpdate, SnapshotDelivery, SnapshotPayload, UpdateKind};
