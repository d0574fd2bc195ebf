//! Lexicon-based sentiment scoring.
//!
//! Matched token weights are summed and squashed into `(-1, 1)` with the
//! VADER compound normalization `s / sqrt(s² + α)`. The normalization is
//! strictly increasing in the sum, so a more positive token can never lower
//! the score. Negation and intensifier heuristics are intentionally absent
//! because they would break that guarantee.

use std::sync::Arc;

use super::lexicon::Lexicon;

/// VADER normalization constant
pub const NORMALIZATION_ALPHA: f64 = 15.0;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters allowed inside a token ("кое-что", "don't")
fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '’' | '-')
}

/// Split text into word tokens (Unicode-aware)
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c) && !is_joiner(c))
        .map(|piece| piece.trim_matches(is_joiner))
        .filter(|token| !token.is_empty())
}

/// Squash a raw weight sum into `(-1, 1)`
pub fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()
}

/// Scores text against an injected, shared lexicon
#[derive(Debug, Clone)]
pub struct Scorer {
    lexicon: Arc<Lexicon>,
}

impl Scorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Sum of matched token weights
    pub fn raw_sum(&self, text: &str) -> f64 {
        tokenize(text)
            .filter_map(|token| self.lexicon.weight(token))
            .sum()
    }

    /// Compound score in `(-1, 1)`; 0 when nothing matches
    pub fn score(&self, text: &str) -> f64 {
        normalize(self.raw_sum(text))
    }
}
