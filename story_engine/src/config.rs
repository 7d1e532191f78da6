//! Play configuration, read from TOML.
//!
//! ```toml
//! [clock]
//! start_hour = 22
//! start_minute = 0
//!
//! [content]
//! death_marker = "你死了"
//! infer_end_nodes = true
//! default_label = "默认"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use story_graph::formats::{MarkupOptions, TerminalRules};
use story_graph::NodeId;
use thiserror::Error;

use crate::StoryClock;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How content without explicit flags is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub death_marker: String,
    pub infer_end_nodes: bool,
    pub default_label: String,
    /// Entry point for markup content. Other formats carry their own start node.
    pub start_node: Option<NodeId>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        let markup = MarkupOptions::default();
        Self {
            death_marker: markup.terminals.death_marker,
            infer_end_nodes: markup.terminals.infer_end_nodes,
            default_label: markup.default_label,
            start_node: markup.start_node,
        }
    }
}

impl ContentConfig {
    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions {
            terminals: TerminalRules {
                death_marker: self.death_marker.clone(),
                infer_end_nodes: self.infer_end_nodes,
            },
            default_label: self.default_label.clone(),
            start_node: self.start_node.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlayConfig {
    pub clock: StoryClock,
    pub content: ContentConfig,
}

impl PlayConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: PlayConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&input)?;
        tracing::debug!(path = %path.display(), "play config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.start_hour >= 24 {
            return Err(ConfigError::Invalid(format!(
                "clock.start_hour must be below 24, got {}",
                self.clock.start_hour
            )));
        }
        if self.clock.start_minute >= 60 {
            return Err(ConfigError::Invalid(format!(
                "clock.start_minute must be below 60, got {}",
                self.clock.start_minute
            )));
        }
        if self.content.default_label.is_empty() {
            return Err(ConfigError::Invalid("content.default_label must not be empty".to_string()));
        }
        Ok(())
    }
}
