//! Typed-input transcriber.
//!
//! Used when no speech command is configured: each line typed on stdin is
//! one utterance. Typing has no listening window, so the listen limits are
//! not applied here.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

use super::{clean_transcript, ListenLimits, Transcriber, TranscriptionError};

type LineSource = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;

/// Reads utterances line by line
pub struct ConsoleTranscriber {
    lines: Mutex<LineSource>,
}

impl ConsoleTranscriber {
    /// Read from the process's stdin
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// Read from any buffered reader
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let boxed: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: Mutex::new(boxed.lines()),
        }
    }
}

#[async_trait]
impl Transcriber for ConsoleTranscriber {
    fn name(&self) -> &str {
        "console"
    }

    async fn transcribe(&self, _limits: ListenLimits) -> Result<String, TranscriptionError> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await {
            Ok(Some(line)) => clean_transcript(&line),
            Ok(None) => Err(TranscriptionError::InputClosed),
            Err(e) => Err(TranscriptionError::Transport(e.to_string())),
        }
    }
}
