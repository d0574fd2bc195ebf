//! Moderation → scoring → classification for a single utterance.

use std::sync::Arc;

use crate::domain::Mood;
use crate::sentiment::{Lexicon, MoodThresholds, Scorer};

use super::moderation::Moderator;

/// Outcome of analyzing one utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Analysis {
    /// Matched a banned term; sentiment was not computed
    Blocked,

    /// Passed moderation and was scored
    Scored { score: f64, mood: Mood },
}

impl Analysis {
    pub fn mood(&self) -> Mood {
        match self {
            Analysis::Blocked => Mood::Blocked,
            Analysis::Scored { mood, .. } => *mood,
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Analysis::Blocked => None,
            Analysis::Scored { score, .. } => Some(*score),
        }
    }
}

/// The journal's rule engine
#[derive(Debug, Clone)]
pub struct Analyzer {
    moderator: Moderator,
    scorer: Scorer,
    thresholds: MoodThresholds,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(
            Moderator::new(),
            Arc::new(Lexicon::standard()),
            MoodThresholds::default(),
        )
    }
}

impl Analyzer {
    pub fn new(moderator: Moderator, lexicon: Arc<Lexicon>, thresholds: MoodThresholds) -> Self {
        Self {
            moderator,
            scorer: Scorer::new(lexicon),
            thresholds,
        }
    }

    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }

    /// Analyze an utterance; moderation short-circuits scoring
    pub fn analyze(&self, text: &str) -> Analysis {
        if self.moderator.is_blocked(text) {
            return Analysis::Blocked;
        }

        let score = self.scorer.score(text);
        Analysis::Scored {
            score,
            mood: self.thresholds.classify(score),
        }
    }
}
