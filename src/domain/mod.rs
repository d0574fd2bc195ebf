//! Domain types for the mindlog journal.
//!
//! - Entry: one immutable journal record
//! - Mood: closed set of mood labels

pub mod entry;

pub use entry::{Entry, Mood};
