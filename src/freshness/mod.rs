//! Freshness detection: output mtime vs source mtime.
//!
//! The filesystem is the only cache. An output is current when it is at
//! least as new as its source; nothing is persisted between runs.

pub mod mtime;

pub use mtime::{GatePolicy, should_skip};
