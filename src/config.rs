//! Configuration for mindlog.
//!
//! Configuration sources (highest priority first):
//! 1. Config file (.mindlog/config.yaml)
//! 2. Defaults (~/.mindlog)
//!
//! Config file discovery:
//! - Searches current directory and parents for .mindlog/config.yaml
//! - `paths.home` is relative to the .mindlog directory
//! - `paths.journal` is relative to the resolved home

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::ListenLimits;
use crate::core::{Analyzer, Moderator, RetryPolicy};
use crate::sentiment::{Lexicon, MoodThresholds};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Journal file name inside the home directory
pub const DEFAULT_JOURNAL_FILE: &str = "thoughts_log.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
    #[serde(default)]
    pub mood: Option<MoodConfig>,
    #[serde(default)]
    pub moderation: Option<ModerationConfig>,
    #[serde(default)]
    pub lexicon: Option<LexiconConfig>,
    #[serde(default)]
    pub transcriber: Option<TranscriberConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to the .mindlog directory)
    pub home: Option<String>,
    /// Journal file (relative to home)
    pub journal: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub listen_timeout_seconds: Option<u64>,
    pub phrase_limit_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoodConfig {
    pub positive_threshold: Option<f64>,
    pub negative_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationConfig {
    #[serde(default)]
    pub extra_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub overrides: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriberConfig {
    /// argv of the speech-to-text command; empty means typed input
    #[serde(default)]
    pub command: Vec<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to mindlog home
    pub home: PathBuf,
    /// Journal document path
    pub journal: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Session loop settings
    pub session: SessionSettings,
    /// Mood classification thresholds
    pub thresholds: MoodThresholds,
    /// Banned terms added on top of the built-in set
    pub extra_banned_terms: Vec<String>,
    /// Lexicon overrides applied after the built-in domain overrides
    pub lexicon_overrides: Vec<(String, f64)>,
    /// Speech-to-text command (argv); `None` reads typed input
    pub transcriber_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub retry: RetryPolicy,
    pub listen: ListenLimits,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            listen: ListenLimits::default(),
        }
    }
}

impl ResolvedConfig {
    /// Defaults rooted at `home`
    pub fn with_home(home: PathBuf) -> Self {
        Self {
            journal: home.join(DEFAULT_JOURNAL_FILE),
            home,
            config_file: None,
            session: SessionSettings::default(),
            thresholds: MoodThresholds::default(),
            extra_banned_terms: Vec::new(),
            lexicon_overrides: Vec::new(),
            transcriber_command: None,
        }
    }

    /// Build the rule engine described by this configuration
    pub fn analyzer(&self) -> Analyzer {
        let lexicon = Lexicon::standard().with_overrides(
            self.lexicon_overrides
                .iter()
                .map(|(token, weight)| (token.as_str(), *weight)),
        );

        Analyzer::new(
            Moderator::with_terms(self.extra_banned_terms.iter().cloned()),
            Arc::new(lexicon),
            self.thresholds,
        )
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".mindlog").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Apply a parsed config file on top of the defaults
fn resolve(config: ConfigFile, config_path: &Path, default_home: PathBuf) -> Result<ResolvedConfig> {
    let mindlog_dir = config_path.parent().unwrap_or(Path::new("."));

    let home = match config.paths.home {
        Some(ref home_path) => resolve_path(mindlog_dir, home_path),
        None => default_home,
    };

    let mut resolved = ResolvedConfig::with_home(home);
    resolved.config_file = Some(config_path.to_path_buf());

    if let Some(ref journal) = config.paths.journal {
        resolved.journal = resolve_path(&resolved.home, journal);
    }

    if let Some(session) = config.session {
        let defaults = SessionSettings::default();
        resolved.session = SessionSettings {
            retry: RetryPolicy {
                max_attempts: session.max_attempts.unwrap_or(defaults.retry.max_attempts),
                delay_ms: session.retry_delay_ms.unwrap_or(defaults.retry.delay_ms),
            },
            listen: ListenLimits {
                timeout: session
                    .listen_timeout_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.listen.timeout),
                phrase_limit: session
                    .phrase_limit_seconds
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.listen.phrase_limit),
            },
        };

        if resolved.session.retry.max_attempts == 0 {
            anyhow::bail!("session.max_attempts must be at least 1");
        }
    }

    if let Some(mood) = config.mood {
        let defaults = MoodThresholds::default();
        resolved.thresholds = MoodThresholds {
            positive: mood.positive_threshold.unwrap_or(defaults.positive),
            negative: mood.negative_threshold.unwrap_or(defaults.negative),
        };

        if !resolved.thresholds.is_valid() {
            anyhow::bail!(
                "Invalid mood thresholds: negative ({}) must be below positive ({})",
                resolved.thresholds.negative,
                resolved.thresholds.positive
            );
        }
    }

    if let Some(moderation) = config.moderation {
        resolved.extra_banned_terms = moderation.extra_terms;
    }

    if let Some(lexicon) = config.lexicon {
        if let Some((token, weight)) = lexicon.overrides.iter().find(|(_, w)| !w.is_finite()) {
            anyhow::bail!("Invalid lexicon override for '{}': weight {} is not finite", token, weight);
        }

        let mut overrides: Vec<(String, f64)> = lexicon.overrides.into_iter().collect();
        overrides.sort_by(|a, b| a.0.cmp(&b.0));
        resolved.lexicon_overrides = overrides;
    }

    if let Some(transcriber) = config.transcriber {
        if !transcriber.command.is_empty() {
            resolved.transcriber_command = Some(transcriber.command);
        }
    }

    Ok(resolved)
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".mindlog");

    match find_config_file() {
        Some(config_path) => {
            let config = load_config_file(&config_path)?;
            resolve(config, &config_path, default_home)
        }
        None => Ok(ResolvedConfig::with_home(default_home)),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the journal document path
pub fn journal_path() -> Result<PathBuf> {
    Ok(config()?.journal.clone())
}
