//! Journal Store Integration Tests
//!
//! Tests for the persisted document layout, append ordering, corruption
//! handling and concurrent writers.

use chrono::NaiveDate;
use mindlog::core::{summarize, JournalError, JournalStore};
use mindlog::domain::{Entry, Mood};
use tempfile::TempDir;

fn at(hour: u32, minute: u32, text: &str, mood: Mood) -> Entry {
    let timestamp = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap();
    Entry::at(timestamp, text, mood)
}

#[tokio::test]
async fn test_document_layout() {
    let temp = TempDir::new().unwrap();
    let store = JournalStore::new(temp.path().join("thoughts_log.json"));

    store
        .append(&at(9, 30, "Я сегодня счастлив и рад", Mood::Positive))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    // One JSON array of flat records
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["timestamp"], "2024-03-01 09:30:00");
    assert_eq!(records[0]["text"], "Я сегодня счастлив и рад");
    assert_eq!(records[0]["mood"], "positive");

    // Pretty-printed and not ASCII-escaped
    assert!(raw.contains('\n'));
    assert!(raw.contains("счастлив"));
}

#[tokio::test]
async fn test_append_preserves_order_and_prior_entries() {
    let temp = TempDir::new().unwrap();
    let store = JournalStore::new(temp.path().join("log.json"));

    let entries = vec![
        at(8, 0, "Устал", Mood::Negative),
        at(9, 0, "Сегодня вторник", Mood::Neutral),
        at(10, 0, "Восторг", Mood::Positive),
    ];

    let mut snapshots = Vec::new();
    for entry in &entries {
        store.append(entry).await.unwrap();
        snapshots.push(store.read_all().await.unwrap());
    }

    assert_eq!(store.read_all().await.unwrap(), entries);

    // Each snapshot is a prefix of the next one
    for pair in snapshots.windows(2) {
        assert_eq!(&pair[1][..pair[0].len()], &pair[0][..]);
    }
}

#[tokio::test]
async fn test_legacy_document_is_readable() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("thoughts_log.json");
    std::fs::write(
        &path,
        r#"[
  {"timestamp": "2023-11-05 21:14:03", "text": "Мне очень плохо и грустно", "mood": "негатив"},
  {"timestamp": "2023-11-06 08:01:44", "text": "Всё отлично", "mood": "позитив"},
  {"timestamp": "2023-11-06 08:02:10", "text": "...", "mood": "заблокировано"}
]"#,
    )
    .unwrap();

    let store = JournalStore::new(&path);
    let entries = store.read_all().await.unwrap();
    let moods: Vec<Mood> = entries.iter().map(|e| e.mood).collect();
    assert_eq!(moods, vec![Mood::Negative, Mood::Positive, Mood::Blocked]);

    // Appending rewrites the document with canonical labels
    store.append(&at(12, 0, "рад", Mood::Positive)).await.unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"negative\""));
    assert!(!raw.contains("негатив"));
    assert_eq!(store.read_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_corrupt_document_is_never_overwritten() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("log.json");
    std::fs::write(&path, "[{\"timestamp\": \"2024-").unwrap();

    let store = JournalStore::new(&path);

    let read = store.read_all().await;
    assert!(matches!(read, Err(JournalError::Corrupt { .. })));

    let append = store.append(&at(9, 0, "рад", Mood::Positive)).await;
    assert!(matches!(append, Err(JournalError::Corrupt { .. })));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"timestamp\": \"2024-");
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let temp = TempDir::new().unwrap();
    let store = JournalStore::new(temp.path().join("log.json"));

    for minute in 0..5 {
        store
            .append(&at(9, minute, "Сегодня вторник", Mood::Neutral))
            .await
            .unwrap();
    }

    let mut names: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["log.json", "log.json.lock"]);
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    let temp = TempDir::new().unwrap();
    let store = JournalStore::new(temp.path().join("log.json"));

    let mut handles = Vec::new();
    for i in 0..16u32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let mood = if i % 2 == 0 { Mood::Positive } else { Mood::Negative };
            store.append(&at(10, i, &format!("запись {}", i), mood)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let entries = store.read_all().await.unwrap();
    assert_eq!(entries.len(), 16);

    let summary = summarize(&entries);
    assert_eq!(summary.positive, 8);
    assert_eq!(summary.negative, 8);
    assert!(!summary.elevated_concern());
}

#[tokio::test]
async fn test_unwritable_location_reports_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    // Parent "directory" is a regular file
    let store = JournalStore::new(blocker.join("log.json"));
    let result = store.append(&at(9, 0, "рад", Mood::Positive)).await;

    assert!(matches!(result, Err(JournalError::Io { .. })));
}
