// src/watch/mod.rs

//! Polling-based change detection and the build+run cycle.
//!
//! There is no OS-level filesystem subscription: the watcher walks the
//! project tree at a fixed interval and compares modification times against
//! the builder's last-build timestamp.
//!
//! - [`filter`] decides per entry whether to skip, descend or check it.
//! - [`watcher`] drives the polling loop and the cycles.

pub mod filter;
pub mod path_utils;
pub mod watcher;

pub use filter::{classify_entry, EntryDecision};
pub use watcher::{CycleOutcome, WatchHandle, WatchTarget, Watcher};
