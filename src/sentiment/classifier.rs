//! Threshold classification of sentiment scores into moods.

use crate::domain::Mood;

/// Score thresholds for mood classification.
///
/// Boundary values belong to the outer zones: a score equal to
/// `positive` is positive, equal to `negative` is negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            positive: 0.1,
            negative: -0.1,
        }
    }
}

impl MoodThresholds {
    /// Thresholds must leave a (possibly empty) neutral zone between them
    pub fn is_valid(&self) -> bool {
        self.negative.is_finite() && self.positive.is_finite() && self.negative < self.positive
    }

    /// Map a score onto `Positive`, `Neutral` or `Negative`
    pub fn classify(&self, score: f64) -> Mood {
        if score >= self.positive {
            Mood::Positive
        } else if score <= self.negative {
            Mood::Negative
        } else {
            Mood::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = MoodThresholds::default();
        assert_eq!(t.classify(0.5), Mood::Positive);
        assert_eq!(t.classify(-0.5), Mood::Negative);
        assert_eq!(t.classify(0.0), Mood::Neutral);
        assert_eq!(t.classify(0.099), Mood::Neutral);
        assert_eq!(t.classify(-0.099), Mood::Neutral);
    }

    #[test]
    fn test_boundaries_go_outward() {
        let t = MoodThresholds::default();
        assert_eq!(t.classify(0.1), Mood::Positive);
        assert_eq!(t.classify(-0.1), Mood::Negative);
    }

    #[test]
    fn test_validation() {
        assert!(MoodThresholds::default().is_valid());
        assert!(!MoodThresholds { positive: -0.2, negative: 0.2 }.is_valid());
        assert!(!MoodThresholds { positive: f64::NAN, negative: -0.1 }.is_valid());
    }
}
