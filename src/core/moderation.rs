//! Content moderation for journal entries.
//!
//! Flags utterances containing a banned term as a whole word. Matching is
//! case-insensitive and uses Unicode word boundaries, so Cyrillic terms next
//! to punctuation are bounded correctly while the same letters inside a
//! longer word are not a match.

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Terms that always block an entry
pub const BANNED_TERMS: &[&str] = &["ненависть", "презираю", "убей", "суицид", "насилие", "терроризм"];

/// Whole-word banned-term matcher
#[derive(Debug, Clone)]
pub struct Moderator {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl Default for Moderator {
    fn default() -> Self {
        Self::new()
    }
}

impl Moderator {
    /// Moderator with the built-in banned terms only
    pub fn new() -> Self {
        Self::with_terms(std::iter::empty::<String>())
    }

    /// Moderator with the built-in terms plus `extra` terms
    pub fn with_terms<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = BANNED_TERMS.iter().map(|t| t.to_string()).collect();
        for term in extra {
            let term = term.into().trim().to_lowercase();
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        // Escaped literals always form a valid pattern; only the size limit can
        // reject it, and then moderation degrades to the lowercase word scan.
        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
            .case_insensitive(true)
            .build()
            .ok();

        Self { terms, pattern }
    }

    /// Active banned terms
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True iff `text` contains a banned term as a whole word
    pub fn is_blocked(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let blocked = match &self.pattern {
            Some(pattern) => pattern.is_match(text),
            None => {
                let haystack = words(text);
                self.terms.iter().any(|term| {
                    let needle = words(term);
                    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle.as_slice())
                })
            }
        };

        if blocked {
            debug!("Utterance matched a banned term");
        }
        blocked
    }
}

/// Lowercased word sequence. Multi-word terms match as consecutive words,
/// so the scan is looser than the pattern about what separates them.
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
