//! mindlog - voice-driven thought journal
//!
//! Records spoken thoughts, screens them for disallowed content, classifies
//! their mood with a sentiment lexicon and keeps them in a local,
//! append-only journal with running mood statistics.
//!
//! # Modules
//!
//! - `adapters`: Transcription collaborators (external command, typed input)
//! - `core`: Moderation, journal store, statistics, retry, session loop
//! - `sentiment`: Lexicon, scorer and mood classifier
//! - `domain`: Data structures (Entry, Mood)
//! - `cli`: Command-line interface and console rendering
//!
//! # Usage
//!
//! ```bash
//! # Start journaling (Ctrl+C to stop)
//! mindlog
//!
//! # Show mood statistics
//! mindlog stats
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod sentiment;

// Re-export main types at crate root for convenience
pub use adapters::{ListenLimits, Transcriber, TranscriptionError};
pub use core::{Analysis, Analyzer, JournalError, JournalStore, Moderator, Session, SessionEvent, Summary};
pub use domain::{Entry, Mood};
pub use sentiment::{Lexicon, MoodThresholds, Scorer};
