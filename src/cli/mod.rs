//! Command-line interface for mindlog.
//!
//! With no subcommand the interactive journaling session starts. The
//! remaining commands inspect the journal without recording anything.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::adapters::{CommandTranscriber, ConsoleTranscriber, Transcriber};
use crate::config::{self, ResolvedConfig};
use crate::core::{summarize, Analysis, JournalStore, Session};

pub mod console;

use console::Console;

/// mindlog - voice-driven thought journal
#[derive(Parser, Debug)]
#[command(name = "mindlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show mood statistics for the whole journal
    Stats,

    /// Show recent journal entries
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Analyze text without saving it
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            None => run_session().await,
            Some(Commands::Stats) => show_stats().await,
            Some(Commands::History { limit }) => show_history(limit).await,
            Some(Commands::Analyze { text }) => analyze_text(&text),
            Some(Commands::Config) => show_config(),
        }
    }
}

fn build_transcriber(cfg: &ResolvedConfig) -> Box<dyn Transcriber> {
    match cfg
        .transcriber_command
        .as_deref()
        .and_then(CommandTranscriber::from_argv)
    {
        Some(command) => Box::new(command),
        None => Box::new(ConsoleTranscriber::stdin()),
    }
}

/// Run the interactive loop until Ctrl+C or end of input
async fn run_session() -> Result<()> {
    let cfg = config::config()?;
    let transcriber = build_transcriber(cfg);
    let store = JournalStore::new(cfg.journal.clone());

    let input = match &cfg.transcriber_command {
        Some(argv) => argv.join(" "),
        None => "typed lines (one per thought)".to_string(),
    };

    let mut console = Console::new();
    console.welcome(store.path(), &input);

    let (session, mut events) = Session::new(transcriber, cfg.analyzer(), store, cfg.session);

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received");
            let _ = stop_tx.send(true);
        }
    });

    let handle = tokio::spawn(session.run(stop_rx));

    while let Some(event) = events.recv().await {
        console.render(&event);
    }

    let report = handle.await.context("Session task failed")?;
    info!(
        utterances = report.utterances,
        saved = report.saved,
        failed_saves = report.failed_saves,
        given_up = report.given_up,
        "Session finished"
    );

    Ok(())
}

async fn show_stats() -> Result<()> {
    let store = JournalStore::open_default()?;
    let entries = store
        .read_all()
        .await
        .with_context(|| format!("Failed to read journal: {}", store.path().display()))?;

    if entries.is_empty() {
        println!("No entries yet. Run `mindlog` to record your first thought.");
        return Ok(());
    }

    console::print_summary(&summarize(&entries));
    Ok(())
}

async fn show_history(limit: usize) -> Result<()> {
    let store = JournalStore::open_default()?;
    let entries = store
        .recent(limit)
        .await
        .with_context(|| format!("Failed to read journal: {}", store.path().display()))?;

    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    println!("Last {} entries:", entries.len());
    println!();
    for entry in &entries {
        console::print_entry(entry);
    }

    Ok(())
}

fn analyze_text(text: &str) -> Result<()> {
    let cfg = config::config()?;

    match cfg.analyzer().analyze(text) {
        Analysis::Blocked => {
            println!("Mood:  {}", Analysis::Blocked.mood());
            println!("Text contains a banned term and would be stored as blocked.");
        }
        Analysis::Scored { score, mood } => {
            println!("Score: {:+.4}", score);
            println!("Mood:  {}", mood);
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("mindlog configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!("  Journal: {}", cfg.journal.display());
    println!();
    println!("Session:");
    println!("  Max attempts:   {}", cfg.session.retry.max_attempts);
    println!("  Retry delay:    {}ms", cfg.session.retry.delay_ms);
    println!("  Listen timeout: {}s", cfg.session.listen.timeout.as_secs());
    println!("  Phrase limit:   {}s", cfg.session.listen.phrase_limit.as_secs());
    println!(
        "  Transcriber:    {}",
        cfg.transcriber_command
            .as_ref()
            .map(|argv| argv.join(" "))
            .unwrap_or_else(|| "(typed input)".to_string())
    );
    println!();
    println!("Mood thresholds:");
    println!("  Positive: >= {}", cfg.thresholds.positive);
    println!("  Negative: <= {}", cfg.thresholds.negative);
    println!();
    println!("Moderation:");
    if cfg.extra_banned_terms.is_empty() {
        println!("  Extra terms: (none)");
    } else {
        println!("  Extra terms: {}", cfg.extra_banned_terms.join(", "));
    }
    println!();
    println!("Lexicon overrides:");
    if cfg.lexicon_overrides.is_empty() {
        println!("  (built-in only)");
    } else {
        for (token, weight) in &cfg.lexicon_overrides {
            println!("  {}: {}", token, weight);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["mindlog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_history_limit() {
        let cli = Cli::try_parse_from(["mindlog", "history", "--limit", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::History { limit: 3 })));

        let cli = Cli::try_parse_from(["mindlog", "history"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::History { limit: 10 })));
    }

    #[test]
    fn test_transcriber_falls_back_to_console() {
        let cfg = ResolvedConfig::with_home("/tmp/mindlog-test".into());
        assert_eq!(build_transcriber(&cfg).name(), "console");

        let mut cfg = cfg;
        cfg.transcriber_command = Some(vec!["whisper-listen".to_string()]);
        assert_eq!(build_transcriber(&cfg).name(), "command");
    }
}
