use serde::Deserialize;
use std::path::PathBuf;

/// How the end position of a character-wise selection is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Inclusive,
    Exclusive,
}

/// Configuration injected into the command core and the selection bridge.
/// Passed explicitly so tests can construct any combination of toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VimshimConfig {
    /// Global emulation toggle; when off the bridge ignores all events.
    pub enabled: bool,
    /// Allow mouse drags to enter the visual modes.
    pub visual_mouse: bool,
    pub selection: SelectionKind,
    /// Line terminator used to split and join buffer text.
    pub newline: char,
}

impl Default for VimshimConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visual_mouse: true,
            selection: SelectionKind::Inclusive,
            newline: '\n',
        }
    }
}

impl VimshimConfig {
    pub fn selection_inclusive(&self) -> bool {
        self.selection == SelectionKind::Inclusive
    }

    pub fn from_file(path: &PathBuf) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: VimshimConfig =
            toml::from_str(&content).map_err(|e| format!("Invalid config format: {}", e))?;

        Ok(config)
    }
}
