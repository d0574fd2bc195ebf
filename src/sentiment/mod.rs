//! Sentiment analysis.
//!
//! - Lexicon: token weights (base data + domain overrides)
//! - Scorer: compound score over matched tokens
//! - Classifier: score thresholds into moods

pub mod classifier;
pub mod lexicon;
pub mod scorer;

pub use classifier::MoodThresholds;
pub use lexicon::{Lexicon, DOMAIN_OVERRIDES};
pub use scorer::{tokenize, Scorer};
