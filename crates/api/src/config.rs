// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use time::Duration;
use war_roster::DEFAULT_UNDO_WINDOW;

/// The longest accepted undo window: one hour.
pub const MAX_UNDO_WINDOW_MS: u64 = 3_600_000;

const fn default_undo_window_ms() -> u64 {
    5000
}

/// Per-operator session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The operator editing the roster. The service attributes revisions
    /// to this identifier when deciding whether a write conflicts.
    pub operator_id: String,
    /// How long a move stays undoable, in milliseconds.
    #[serde(default = "default_undo_window_ms")]
    pub undo_window_ms: u64,
}

impl SessionConfig {
    /// Creates a config with the default undo window.
    #[must_use]
    pub fn new(operator_id: &str) -> Self {
        Self {
            operator_id: operator_id.to_string(),
            undo_window_ms: default_undo_window_ms(),
        }
    }

    /// Replaces the undo window.
    #[must_use]
    pub fn with_undo_window_ms(mut self, undo_window_ms: u64) -> Self {
        self.undo_window_ms = undo_window_ms;
        self
    }

    /// Returns the undo window.
    #[must_use]
    pub fn undo_window(&self) -> Duration {
        i64::try_from(self.undo_window_ms).map_or(DEFAULT_UNDO_WINDOW, Duration::milliseconds)
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the operator is empty or
    /// the undo window is zero or longer than [`MAX_UNDO_WINDOW_MS`].
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the config's field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator is empty or the undo window is zero
    /// or longer than [`MAX_UNDO_WINDOW_MS`].
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.operator_id.trim().is_empty() {
            return Err(ApiError::InvalidConfig(String::from(
                "operator_id cannot be empty",
            )));
        }
        if self.undo_window_ms == 0 {
            return Err(ApiError::InvalidConfig(String::from(
                "undo_window_ms must be positive",
            )));
        }
        if self.undo_window_ms > MAX_UNDO_WINDOW_MS {
            return Err(ApiError::InvalidConfig(format!(
                "undo_window_ms must be at most {MAX_UNDO_WINDOW_MS}"
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("operator")
    }
}
