//! Console rendering for the interactive session.

use std::io::{self, Write};
use std::path::Path;

use crate::adapters::TranscriptionError;
use crate::core::{SessionEvent, StopReason, Summary};
use crate::domain::{Entry, Mood};

const RULE: &str = "══════════════════════════════════════════════════";

const POSITIVE_QUOTES: [&str; 3] = [
    "The only way to do great work is to love what you do. – Steve Jobs",
    "Believe you can and you're halfway there. – Theodore Roosevelt",
    "Success is the ability to go from failure to failure without losing your enthusiasm. – Winston Churchill",
];

const NEUTRAL_QUOTES: [&str; 3] = [
    "Calmness is the cradle of power. – Unknown",
    "Life is what happens while you are busy making other plans. – John Lennon",
    "Don't worry about what goes wrong. Focus on what you can do right. – Unknown",
];

const NEGATIVE_QUOTES: [&str; 3] = [
    "Hardships often prepare ordinary people for an extraordinary destiny. – C.S. Lewis",
    "The darkest hour is just before the dawn. – Thomas Fuller",
    "Sometimes you have to go through the bad to get to the good. – Unknown",
];

/// Quotes shown for a scored mood
pub fn quotes_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Positive => &POSITIVE_QUOTES,
        Mood::Neutral => &NEUTRAL_QUOTES,
        Mood::Negative => &NEGATIVE_QUOTES,
        Mood::Blocked => &[],
    }
}

/// Stdout renderer for session events
pub struct Console {
    /// Rotates through the quote lists
    quote_cursor: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            quote_cursor: chrono::Local::now().timestamp().unsigned_abs() as usize,
        }
    }

    pub fn welcome(&self, journal: &Path, input: &str) {
        println!();
        println!("{}", RULE);
        println!("🌟 THOUGHT JOURNAL");
        println!("{}", RULE);
        println!("📝 Record your thoughts and track their mood");
        println!("🎙️  Input: {}", input);
        println!("💾 Journal: {}", journal.display());
        println!();
        println!("🛑 Press Ctrl+C at any time to exit");
    }

    pub fn render(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Listening {
                attempt,
                max_attempts,
            } => {
                println!();
                println!("{}", RULE);
                println!(
                    "🎤 ATTEMPT {}/{}: speak after the signal...",
                    attempt, max_attempts
                );
            }
            SessionEvent::TranscriptionFailed { error, .. } => {
                println!("{}", failure_hint(error));
            }
            SessionEvent::GaveUp { .. } => {
                println!();
                println!("⚠️  Could not recognize speech after several attempts");
            }
            SessionEvent::Blocked => {
                println!();
                println!("🚫 WARNING: undesirable expressions detected");
            }
            SessionEvent::Classified { text, mood, .. } => {
                let quote = self.next_quote(*mood);
                println!();
                println!("✅ Recognized: {}", text);
                println!("📊 MOOD: {}", mood.as_str().to_uppercase());
                if let Some(quote) = quote {
                    println!("💬 {}", quote);
                }
            }
            SessionEvent::Saved { mood } => match mood {
                Mood::Blocked => println!("The entry was saved and marked as blocked"),
                Mood::Negative => {
                    println!("💾 Entry saved to the journal");
                    println!();
                    println!("💙 Support:");
                    println!("- Remember that hard times pass");
                    println!("- Talk to someone close to you");
                    println!("- Reach out to a specialist if you need to");
                }
                _ => println!("💾 Entry saved to the journal"),
            },
            SessionEvent::SaveFailed { error, .. } => {
                println!("🚨 Failed to save the entry: {}", error);
            }
            SessionEvent::Stats(summary) => print_summary(summary),
            SessionEvent::StatsUnavailable { .. } => {
                println!();
                println!("⚠️  Statistics are unavailable");
            }
            SessionEvent::Stopped { reason } => {
                println!();
                if *reason == StopReason::InputClosed {
                    println!("📭 No more input.");
                }
                println!("🛑 Journal closed. All entries are saved.");
                println!("See you next time! 👋");
            }
        }
        let _ = io::stdout().flush();
    }

    fn next_quote(&mut self, mood: Mood) -> Option<&'static str> {
        let quotes = quotes_for(mood);
        if quotes.is_empty() {
            return None;
        }
        let quote = quotes[self.quote_cursor % quotes.len()];
        self.quote_cursor = self.quote_cursor.wrapping_add(1);
        Some(quote)
    }
}

fn failure_hint(error: &TranscriptionError) -> String {
    match error {
        TranscriptionError::Timeout(_) => {
            "⏳ Timed out waiting. Please speak when you see the signal.".to_string()
        }
        TranscriptionError::Unintelligible => {
            "🔇 Speech not recognized. Please speak more clearly and louder.".to_string()
        }
        TranscriptionError::Transport(message) => format!("❌ Error: {}", message),
        TranscriptionError::InputClosed => "📭 Input closed.".to_string(),
    }
}

/// Format a count with its share of scored entries
fn share(summary: &Summary, mood: Mood) -> String {
    match summary.percentage(mood) {
        Some(pct) => format!("{} ({:.1}%)", summary.count(mood), pct),
        None => summary.count(mood).to_string(),
    }
}

/// Print the journal statistics block
pub fn print_summary(summary: &Summary) {
    println!();
    println!("📊 JOURNAL STATISTICS:");
    println!("• Total entries: {}", summary.total);
    println!("• Positive: {}", share(summary, Mood::Positive));
    println!("• Neutral:  {}", share(summary, Mood::Neutral));
    println!("• Negative: {}", share(summary, Mood::Negative));
    if summary.blocked > 0 {
        println!("• Blocked:  {}", summary.blocked);
    }

    if summary.elevated_concern() {
        println!();
        println!("💙 You have had more difficult thoughts than good ones lately.");
        println!("Remember that asking for help is a sign of strength.");
    }
}

/// Print one journal entry (blocked text is masked)
pub fn print_entry(entry: &Entry) {
    println!(
        "{}  [{:<8}]  {}",
        entry.timestamp.format(crate::domain::entry::timestamp_format::FORMAT),
        entry.mood.as_str(),
        entry.display_text()
    );
}
