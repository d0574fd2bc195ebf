//! Transcriber backed by an external program.
//!
//! The program is expected to listen on the microphone, run speech-to-text
//! and print the recognized phrase on stdout. The listening window is
//! exported to it as `MINDLOG_LISTEN_TIMEOUT` / `MINDLOG_PHRASE_LIMIT`
//! (whole seconds); the whole attempt is also capped on our side.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{clean_transcript, ListenLimits, Transcriber, TranscriptionError};

/// Transcriber that spawns a command per attempt
#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv-style list (`["program", "arg", ...]`)
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, limits: ListenLimits) -> Result<String, TranscriptionError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .env("MINDLOG_LISTEN_TIMEOUT", limits.timeout.as_secs().to_string())
            .env("MINDLOG_PHRASE_LIMIT", limits.phrase_limit.as_secs().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TranscriptionError::Transport(format!("failed to spawn '{}': {}", self.program, e))
            })?;

        // Dropping the child on timeout kills it (kill_on_drop)
        let output = timeout(limits.total(), child.wait_with_output())
            .await
            .map_err(|_| TranscriptionError::Timeout(limits.total()))?
            .map_err(|e| {
                TranscriptionError::Transport(format!("failed to wait for '{}': {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(program = %self.program, exit_code, "Transcription command failed");
            return Err(TranscriptionError::Transport(format!(
                "'{}' exited with code {}: {}",
                self.program,
                exit_code,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            TranscriptionError::Transport(format!("'{}' produced non-UTF-8 output", self.program))
        })?;

        debug!(bytes = stdout.len(), "Transcription command finished");
        clean_transcript(&stdout)
    }
}

#[async_trait]
impl Transcriber for CommandTranscriber {
    fn name(&self) -> &str {
        "command"
    }

    async fn transcribe(&self, limits: ListenLimits) -> Result<String, TranscriptionError> {
        self.run(limits).await
    }
}
