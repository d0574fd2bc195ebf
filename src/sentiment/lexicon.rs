//! Sentiment lexicon: normalized token to signed weight.
//!
//! The combined lexicon is built once (base data file, then the journal's
//! domain overrides, then any configured overrides) and is read-only
//! afterwards. Share it behind an `Arc`.

use std::collections::HashMap;

/// Base lexicon shipped with the crate (`token<TAB>weight`)
const BASE_LEXICON: &str = include_str!("../../data/base_lexicon.tsv");

/// Journal-specific weights; these win over the base lexicon
pub const DOMAIN_OVERRIDES: &[(&str, f64)] = &[
    ("хороший", 2.0),
    ("отлично", 3.0),
    ("прекрасно", 3.0),
    ("люблю", 3.0),
    ("рад", 2.5),
    ("счастлив", 3.0),
    ("восторг", 3.5),
    ("восхитительно", 3.0),
    ("плохой", -2.0),
    ("ужасно", -3.0),
    ("ненавижу", -3.0),
    ("грустно", -2.0),
    ("разочарован", -2.5),
    ("злой", -2.0),
    ("устал", -1.5),
];

/// Immutable token → weight mapping
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
}

impl Lexicon {
    /// Empty lexicon
    pub fn empty() -> Self {
        Self::default()
    }

    /// Base lexicon only
    pub fn base() -> Self {
        Self::parse(BASE_LEXICON)
    }

    /// Base lexicon overlaid with the domain overrides
    pub fn standard() -> Self {
        Self::base().with_overrides(DOMAIN_OVERRIDES.iter().map(|&(w, s)| (w, s)))
    }

    /// Parse `token<TAB>weight` lines; blank lines and `#` comments are skipped,
    /// as are lines whose weight does not parse.
    pub fn parse(content: &str) -> Self {
        let mut weights = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((token, weight)) = line.split_once('\t') {
                if let Ok(weight) = weight.trim().parse::<f64>() {
                    weights.insert(normalize_token(token.trim()), weight);
                }
            }
        }
        Self { weights }
    }

    /// Overlay `overrides`; on key collision the override wins
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (token, weight) in overrides {
            self.weights.insert(normalize_token(token.as_ref()), weight);
        }
        self
    }

    /// Weight for a token (normalized before lookup)
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(&normalize_token(token)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Lowercase and fold `ё` to `е`
pub fn normalize_token(token: &str) -> String {
    token.to_lowercase().replace('ё', "е")
}
