//! Mood statistics derived from the journal.
//!
//! `total` counts every record. Percentages use the sentiment base
//! (positive + neutral + negative): blocked entries were never scored, so
//! they have no share of the mood distribution.

use crate::domain::{Entry, Mood};

/// Aggregate view over a journal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub blocked: usize,
}

impl Summary {
    /// Count of entries with `mood`
    pub fn count(&self, mood: Mood) -> usize {
        match mood {
            Mood::Positive => self.positive,
            Mood::Neutral => self.neutral,
            Mood::Negative => self.negative,
            Mood::Blocked => self.blocked,
        }
    }

    /// Number of scored entries (the percentage base)
    pub fn scored(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Share of scored entries with `mood`, in percent.
    ///
    /// `None` for `Blocked` and when nothing has been scored yet.
    pub fn percentage(&self, mood: Mood) -> Option<f64> {
        let base = self.scored();
        if base == 0 || !mood.is_scored() {
            return None;
        }
        Some(self.count(mood) as f64 / base as f64 * 100.0)
    }

    /// Negative entries strictly outnumber positive ones
    pub fn elevated_concern(&self) -> bool {
        self.negative > self.positive
    }
}

/// Summarize a journal in one pass
pub fn summarize(entries: &[Entry]) -> Summary {
    entries.iter().fold(Summary::default(), |mut summary, entry| {
        summary.total += 1;
        match entry.mood {
            Mood::Positive => summary.positive += 1,
            Mood::Neutral => summary.neutral += 1,
            Mood::Negative => summary.negative += 1,
            Mood::Blocked => summary.blocked += 1,
        }
        summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(moods: &[Mood]) -> Vec<Entry> {
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| Entry::now(format!("entry {}", i), *mood))
            .collect()
    }

    #[test]
    fn test_empty_journal() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        for mood in Mood::ALL {
            assert_eq!(summary.count(mood), 0);
            assert_eq!(summary.percentage(mood), None);
        }
        assert!(!summary.elevated_concern());
    }

    #[test]
    fn test_elevated_concern() {
        let summary = summarize(&entries(&[
            Mood::Negative,
            Mood::Negative,
            Mood::Positive,
            Mood::Negative,
        ]));
        assert_eq!(summary.negative, 3);
        assert_eq!(summary.positive, 1);
        assert!(summary.elevated_concern());
    }

    #[test]
    fn test_tie_is_not_concerning() {
        let summary = summarize(&entries(&[Mood::Negative, Mood::Positive]));
        assert!(!summary.elevated_concern());
    }

    #[test]
    fn test_blocked_excluded_from_percentages() {
        let summary = summarize(&entries(&[
            Mood::Positive,
            Mood::Neutral,
            Mood::Neutral,
            Mood::Negative,
            Mood::Blocked,
        ]));

        assert_eq!(summary.total, 5);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.percentage(Mood::Positive), Some(25.0));
        assert_eq!(summary.percentage(Mood::Neutral), Some(50.0));
        assert_eq!(summary.percentage(Mood::Negative), Some(25.0));
        assert_eq!(summary.percentage(Mood::Blocked), None);
    }

    #[test]
    fn test_only_blocked_entries() {
        let summary = summarize(&entries(&[Mood::Blocked, Mood::Blocked]));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.percentage(Mood::Positive), None);
    }
}
