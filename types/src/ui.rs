//! Presentation options shared by config and the terminal UI.

use serde::{Deserialize, Serialize};

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for markers and separators.
    pub ascii_only: bool,
    /// Use a high-contrast color palette.
    pub high_contrast: bool,
}
