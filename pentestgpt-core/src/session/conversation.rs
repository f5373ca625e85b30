//! Conversation persistence under the log directory
//!
//! Two artifacts live here. The live transcript is an append-only text file
//! written per message, created only when transcript recording is enabled.
//! The JSON history file is written by explicit saves and at session end,
//! regardless of the transcript setting.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::providers::Message;
use crate::Result;

/// Conversation history as written by save and quit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConversation {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl SavedConversation {
    /// Load a previously saved conversation
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Writes session activity under the log directory
pub struct ConversationLog {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    log_dir: PathBuf,
    transcript: Option<File>,
}

impl ConversationLog {
    /// Create the log directory and, when recording, the transcript file
    pub fn new(log_dir: impl AsRef<Path>, record_transcript: bool) -> Result<Self> {
        let log_dir = log_dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir)?;

        let session_id = Uuid::new_v4();
        let started_at = Utc::now();

        let transcript = if record_transcript {
            let name = format!("pentestgpt_{}.log", started_at.format("%Y%m%d_%H%M%S"));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(name))?;
            Some(file)
        } else {
            None
        };

        Ok(Self {
            session_id,
            started_at,
            log_dir,
            transcript,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_recording(&self) -> bool {
        self.transcript.is_some()
    }

    /// Append one message to the transcript, if recording
    pub fn log_message(&mut self, message: &Message) -> Result<()> {
        if let Some(ref mut file) = self.transcript {
            let line = format!(
                "[{}] {}: {}\n",
                Local::now().format("%H:%M:%S"),
                message.role.as_str(),
                message.content
            );
            file.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Write the full history as JSON, returning the file path
    pub fn save_history(&self, messages: &[Message]) -> Result<PathBuf> {
        let saved = SavedConversation {
            session_id: self.session_id,
            started_at: self.started_at,
            saved_at: Utc::now(),
            messages: messages.to_vec(),
        };

        let name = format!(
            "pentestgpt_history_{}.json",
            self.started_at.format("%Y%m%d_%H%M%S")
        );
        let path = self.log_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(&saved)?)?;

        Ok(path)
    }
}
