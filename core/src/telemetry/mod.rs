//! telemetry/mod.rs
//! Per-call telemetry: counters, stage timers, immutable snapshots.
//!
//! Every encode and decode returns a snapshot; nothing is global.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
