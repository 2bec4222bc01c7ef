//! Editor session configuration.

use serde::{Deserialize, Deserializer, Serialize};

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Tunables for an [`crate::EditorSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo (and redo) levels kept. Values below 1 are raised to 1.
    #[serde(deserialize_with = "at_least_one")]
    pub history_limit: usize,

    /// Reject documents that fail validation when loading from a store.
    pub validate_on_load: bool,
}

impl EditorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set history limit (at least 1).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Builder: Toggle validation on load.
    pub fn with_validate_on_load(mut self, validate: bool) -> Self {
        self.validate_on_load = validate;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            validate_on_load: true,
        }
    }
}

fn at_least_one<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(usize::deserialize(deserializer)?.max(1))
}
