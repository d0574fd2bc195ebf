//! Core journaling logic.
//!
//! This module contains:
//! - Moderation: banned-term screening
//! - Analyzer: moderation → sentiment → mood
//! - JournalStore: durable append-only journal
//! - Stats: mood distribution over the journal
//! - Retry: bounded retry combinator
//! - Session: the interactive loop tying it together

pub mod analyzer;
pub mod journal_store;
pub mod moderation;
pub mod retry;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use analyzer::{Analysis, Analyzer};
pub use journal_store::{JournalError, JournalStore};
pub use moderation::{Moderator, BANNED_TERMS};
pub use retry::{retry, RetryOutcome, RetryPolicy};
pub use session::{Session, SessionEvent, SessionReport, StopReason};
pub use stats::{summarize, Summary};
