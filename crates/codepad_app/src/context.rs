use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use codepad_sandbox::write_atomic;
use pad_logging::{pad_error, pad_warn};

const CONTEXT_FILENAME: &str = ".codepad_ui.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub is_dark: bool,
    pub editor_theme: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            is_dark: false,
            editor_theme: "vs-dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    pub font_size: u32,
    pub tab_size: u32,
    pub word_wrap: bool,
    pub minimap: bool,
    pub line_numbers: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            tab_size: 2,
            word_wrap: true,
            minimap: false,
            line_numbers: true,
        }
    }
}

/// UI state handed to the shell at construction and flushed on shutdown.
/// An explicit value passed around, not an ambient global.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiContext {
    pub theme: ThemeSettings,
    pub editor: EditorSettings,
}

impl UiContext {
    /// Initialize from the persisted file in `dir`; a missing or malformed
    /// file falls back to defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONTEXT_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                pad_warn!("Failed to read UI context from {:?}: {}", path, err);
                return Self::default();
            }
        };
        match ron::from_str(&content) {
            Ok(context) => context,
            Err(err) => {
                pad_warn!("Failed to parse UI context from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    /// Persist the current state back to `dir`.
    pub fn flush(&self, dir: &Path) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(self, pretty) {
            Ok(text) => text,
            Err(err) => {
                pad_error!("Failed to serialize UI context: {}", err);
                return;
            }
        };
        if let Err(err) = write_atomic(dir, CONTEXT_FILENAME, &content) {
            pad_error!("Failed to write UI context to {:?}: {}", dir, err);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.is_dark = !self.theme.is_dark;
    }
}
