//! Cluster configuration persistence
//!
//! Stores the widget cluster and initial content in
//! `~/.config/sidestep/config.yaml`

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Node;

/// Markup loaded when no content is configured
pub const DEFAULT_CONTENT: &str = "<p><example>An ex</example>ample document</p>";

/// Widget cluster configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Number of widgets sharing the anchor
    #[serde(default = "default_widget_count")]
    pub widget_count: NonZeroUsize,

    /// Document position all widgets are anchored at
    #[serde(default = "default_anchor_pos")]
    pub anchor_pos: usize,

    /// Initial document markup
    #[serde(default = "default_content")]
    pub content: String,
}

fn default_widget_count() -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(2)
}

fn default_anchor_pos() -> usize {
    6
}

fn default_content() -> String {
    DEFAULT_CONTENT.to_string()
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            widget_count: default_widget_count(),
            anchor_pos: default_anchor_pos(),
            content: default_content(),
        }
    }
}

impl ClusterConfig {
    /// Load config from disk, or return defaults if not found or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Check that the anchor is a valid cursor position in `doc`
    pub fn validate(&self, doc: &Node) -> Result<()> {
        if !doc.is_valid_cursor(self.anchor_pos) {
            bail!(
                "anchor_pos {} is not a cursor position (document size {})",
                self.anchor_pos,
                doc.content_size()
            );
        }
        Ok(())
    }
}
