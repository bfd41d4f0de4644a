use crate::errors::{EditorError, EditorResult};
use crate::notifications::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "scrivener.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum entries kept on each of the undo and redo stacks
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Idle time after which pending edits become one undo step
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    /// Upper bound on how long edits may keep coalescing into one step
    #[serde(default = "default_force_save_ms")]
    pub force_save_ms: u64,

    /// What a failed flush does once it has been notified
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

fn default_undo_limit() -> usize {
    100
}

fn default_quiet_period_ms() -> u64 {
    500
}

fn default_force_save_ms() -> u64 {
    2000
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when the file is absent
    pub fn load(dir: &Path) -> EditorResult<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn force_save(&self) -> Duration {
        Duration::from_millis(self.force_save_ms)
    }

    fn validated(self) -> EditorResult<Self> {
        if self.force_save_ms < self.quiet_period_ms {
            return Err(EditorError::Config(format!(
                "forceSaveMs ({}) must not be shorter than quietPeriodMs ({})",
                self.force_save_ms, self.quiet_period_ms
            )));
        }
        Ok(self)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            quiet_period_ms: default_quiet_period_ms(),
            force_save_ms: default_force_save_ms(),
            error_policy: ErrorPolicy::default(),
        }
    }
}
