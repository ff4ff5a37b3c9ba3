//! Presence options the bot rotates through on startup
//!
//! Loaded from a YAML file of the form:
//!
//! ```yaml
//! presences:
//!   - text: with Slash Commands
//!     kind: playing
//!   - text: /help
//!     kind: watching
//!     status: idle
//! ```

use anyhow::{Context as _, Result};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serenity::model::gateway::Activity;
use serenity::model::user::OnlineStatus;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceKind {
    Playing,
    Watching,
    Listening,
    Competing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    #[default]
    Online,
    Idle,
    Dnd,
    Invisible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceOption {
    pub text: String,
    pub kind: PresenceKind,
    #[serde(default)]
    pub status: PresenceStatus,
}

impl PresenceOption {
    pub fn new(text: impl Into<String>, kind: PresenceKind) -> Self {
        Self {
            text: text.into(),
            kind,
            status: PresenceStatus::Online,
        }
    }

    pub fn activity(&self) -> Activity {
        match self.kind {
            PresenceKind::Playing => Activity::playing(&self.text),
            PresenceKind::Watching => Activity::watching(&self.text),
            PresenceKind::Listening => Activity::listening(&self.text),
            PresenceKind::Competing => Activity::competing(&self.text),
        }
    }

    pub fn online_status(&self) -> OnlineStatus {
        match self.status {
            PresenceStatus::Online => OnlineStatus::Online,
            PresenceStatus::Idle => OnlineStatus::Idle,
            PresenceStatus::Dnd => OnlineStatus::DoNotDisturb,
            PresenceStatus::Invisible => OnlineStatus::Invisible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceConfig {
    #[serde(default)]
    pub presences: Vec<PresenceOption>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            presences: vec![
                PresenceOption::new("with Slash Commands", PresenceKind::Playing),
                PresenceOption::new("/help", PresenceKind::Watching),
            ],
        }
    }
}

impl PresenceConfig {
    /// Load presence options from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presence config {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse presence config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from `path`, falling back to the built-in options when the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Pick one option uniformly at random
    pub fn pick(&self) -> Option<&PresenceOption> {
        self.presences.choose(&mut rand::rng())
    }
}
