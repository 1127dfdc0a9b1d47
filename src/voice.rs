//! Optional speech capture.
//!
//! The host capability is an external transcriber command configured as
//! `speech_command`; its stdout becomes the submitted query. When no command
//! is configured the feature degrades to a fixed unsupported message in the
//! transcript. The transcript is passed through untouched apart from one
//! trailing newline, so the voice path performs no trimming.

use crate::errors::{ParleyError, ParleyResult};
use std::process::Command;

/// Environment variable carrying the capture language to the transcriber.
pub const VOICE_LANG_ENV: &str = "PARLEY_VOICE_LANG";

#[derive(Debug, Clone)]
pub struct VoiceInput {
    command: Option<String>,
    language: String,
}

impl VoiceInput {
    pub fn new(command: Option<String>, language: String) -> Self {
        Self { command, language }
    }

    /// Whether a transcriber is configured in this environment.
    pub fn is_available(&self) -> bool {
        self.command
            .as_deref()
            .is_some_and(|cmd| !cmd.trim().is_empty())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Runs the transcriber once and returns its stdout as the transcript.
    pub fn capture(&self) -> ParleyResult<String> {
        let cmd = self
            .command
            .as_deref()
            .filter(|cmd| !cmd.trim().is_empty())
            .ok_or_else(|| ParleyError::voice_error("no transcriber configured"))?;

        let output = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .env(VOICE_LANG_ENV, &self.language)
            .output()
            .map_err(|e| ParleyError::voice_error(format!("failed to run transcriber: {}", e)))?;

        if !output.status.success() {
            return Err(ParleyError::voice_error(format!(
                "transcriber exited with {}",
                output.status
            )));
        }

        let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        if transcript.ends_with('\n') {
            transcript.pop();
            if transcript.ends_with('\r') {
                transcript.pop();
            }
        }
        Ok(transcript)
    }
}
