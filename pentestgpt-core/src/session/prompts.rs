//! Stage prompts for the session pipeline

use serde::Deserialize;
use std::path::Path;

use crate::{Error, Result};

/// One stage prompt
#[derive(Debug, Clone, Deserialize)]
pub struct StagePrompt {
    pub prompt: String,
}

/// All session stage prompts
#[derive(Debug, Clone, Deserialize)]
pub struct Prompts {
    pub task_init: StagePrompt,
    pub parsing: StagePrompt,
    pub reasoning: StagePrompt,
    pub todo: StagePrompt,
    pub discussion: StagePrompt,
}

impl Prompts {
    /// Load prompts from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse prompts from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse prompts: {}", e)))
    }

    /// Load from default location (embedded)
    #[allow(clippy::expect_used)]
    pub fn default_prompts() -> Self {
        let content = include_str!("../../prompts.toml");
        Self::parse(content).expect("Embedded prompts.toml should be valid")
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::default_prompts()
    }
}
