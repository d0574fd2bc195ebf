//! Statistics Integration Tests

use mindlog::core::{summarize, Summary};
use mindlog::domain::{Entry, Mood};

fn journal(moods: &[Mood]) -> Vec<Entry> {
    moods
        .iter()
        .map(|mood| Entry::now("запись", *mood))
        .collect()
}

#[test]
fn test_empty_journal() {
    let summary = summarize(&[]);

    assert_eq!(summary, Summary::default());
    assert_eq!(summary.total, 0);
    for mood in Mood::ALL {
        assert_eq!(summary.percentage(mood), None);
    }
    assert!(!summary.elevated_concern());
}

#[test]
fn test_more_negative_than_positive_raises_concern() {
    let summary = summarize(&journal(&[
        Mood::Negative,
        Mood::Negative,
        Mood::Negative,
        Mood::Positive,
    ]));

    assert_eq!(summary.total, 4);
    assert_eq!(summary.percentage(Mood::Negative), Some(75.0));
    assert_eq!(summary.percentage(Mood::Positive), Some(25.0));
    assert!(summary.elevated_concern());
}

#[test]
fn test_equal_counts_do_not_raise_concern() {
    let summary = summarize(&journal(&[Mood::Negative, Mood::Positive, Mood::Neutral]));
    assert!(!summary.elevated_concern());
}

#[test]
fn test_blocked_only_journal() {
    let summary = summarize(&journal(&[Mood::Blocked, Mood::Blocked]));

    assert_eq!(summary.total, 2);
    assert_eq!(summary.blocked, 2);
    assert_eq!(summary.scored(), 0);
    assert_eq!(summary.percentage(Mood::Neutral), None);
    assert_eq!(summary.percentage(Mood::Blocked), None);
}

#[test]
fn test_scored_percentages_sum_to_hundred() {
    let summary = summarize(&journal(&[
        Mood::Positive,
        Mood::Neutral,
        Mood::Neutral,
        Mood::Negative,
        Mood::Blocked,
        Mood::Positive,
        Mood::Neutral,
    ]));

    let total: f64 = [Mood::Positive, Mood::Neutral, Mood::Negative]
        .into_iter()
        .filter_map(|mood| summary.percentage(mood))
        .sum();
    assert!((total - 100.0).abs() < 1e-9);
}
