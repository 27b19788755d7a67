//! Editor preferences, injected into the session at construction.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Default for `Preferences.tab_width`.
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tab width must be at least 1")]
    InvalidTabWidth,
}

/// Language of the open document. Popup completion only runs for Spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Spin,
    Plain,
}

impl Language {
    /// Guesses the language from a file name.
    pub fn from_file_name(name: &str) -> Self {
        let is_spin = name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("spin"));
        if is_spin { Language::Spin } else { Language::Plain }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Spaces per tab stop.
    pub tab_width: usize,
    /// Inline suggestions while typing identifiers.
    pub inline_suggest: bool,
    /// Popup completion on `.`.
    pub dot_complete: bool,
    /// Popup completion on `#`. When on, constants and enums are left out of
    /// the unscoped `.` popup since `#` reaches them.
    pub constant_complete: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            inline_suggest: true,
            dot_complete: true,
            constant_complete: true,
        }
    }
}

impl Preferences {
    /// Parses a settings document. Keys may sit under a `spinEditor` section.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw)?;
        let section = editor_section(&value).cloned().unwrap_or(value);
        let prefs: Preferences = serde_json::from_value(section)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Merges a partial settings object; unknown or mistyped keys are ignored.
    pub fn apply_settings(&mut self, value: &Value) {
        let section = editor_section(value).unwrap_or(value);
        let Some(obj) = section.as_object() else {
            return;
        };
        if let Some(width) = obj.get("tabWidth").and_then(Value::as_u64)
            && width > 0
        {
            self.tab_width = width as usize;
        }
        if let Some(enabled) = obj.get("inlineSuggest").and_then(Value::as_bool) {
            self.inline_suggest = enabled;
        }
        if let Some(enabled) = obj.get("dotComplete").and_then(Value::as_bool) {
            self.dot_complete = enabled;
        }
        if let Some(enabled) = obj.get("constantComplete").and_then(Value::as_bool) {
            self.constant_complete = enabled;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::InvalidTabWidth);
        }
        Ok(())
    }

    /// One tab stop as spaces.
    pub fn tab(&self) -> String {
        " ".repeat(self.tab_width)
    }
}

fn editor_section(value: &Value) -> Option<&Value> {
    value.as_object()?.get("spinEditor")
}
