//! Transcription collaborators.
//!
//! Speech capture and speech-to-text live outside this crate. Adapters wrap
//! whatever provides recognized text behind the `Transcriber` trait so the
//! session loop only sees text or a classified failure.

pub mod command;
pub mod console;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandTranscriber;
pub use console::ConsoleTranscriber;

/// Bounds on a single listening attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenLimits {
    /// How long to wait for speech to start
    pub timeout: Duration,

    /// Maximum length of one phrase
    pub phrase_limit: Duration,
}

impl Default for ListenLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            phrase_limit: Duration::from_secs(15),
        }
    }
}

impl ListenLimits {
    /// Upper bound for one whole attempt
    pub fn total(&self) -> Duration {
        self.timeout + self.phrase_limit
    }
}

/// Why an attempt produced no text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptionError {
    #[error("No speech within {0:?}")]
    Timeout(Duration),

    #[error("Speech was not recognized")]
    Unintelligible,

    #[error("Transcription failed: {0}")]
    Transport(String),

    #[error("Input source closed")]
    InputClosed,
}

impl TranscriptionError {
    /// Worth another attempt within the same loop iteration
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TranscriptionError::InputClosed)
    }
}

/// Source of transcribed utterances
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Human-readable transcriber name
    fn name(&self) -> &str;

    /// Wait for one utterance and return its text (trimmed, non-empty)
    async fn transcribe(&self, limits: ListenLimits) -> Result<String, TranscriptionError>;
}

/// Trim recognized text; blank output counts as unintelligible
pub(crate) fn clean_transcript(raw: &str) -> Result<String, TranscriptionError> {
    let text = raw.trim();
    if text.is_empty() {
        Err(TranscriptionError::Unintelligible)
    } else {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TranscriptionError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(TranscriptionError::Unintelligible.is_retryable());
        assert!(TranscriptionError::Transport("offline".into()).is_retryable());
        assert!(!TranscriptionError::InputClosed.is_retryable());
    }

    #[test]
    fn test_clean_transcript() {
        assert_eq!(clean_transcript("  привет \n").unwrap(), "привет");
        assert_eq!(clean_transcript(" \n"), Err(TranscriptionError::Unintelligible));
    }

    #[test]
    fn test_default_limits() {
        let limits = ListenLimits::default();
        assert_eq!(limits.total(), Duration::from_secs(20));
    }
}
