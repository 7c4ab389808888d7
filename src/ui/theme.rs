//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are the four Catppuccin flavours; custom themes are TOML
//! files with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! title_fg = "#89b4fa"
//! border = "#45475a"
//! field_border = "#585b70"
//! field_focus = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! chip_fg = "#a6adc8"
//! chip_selected_fg = "#1e1e2e"
//! chip_selected_bg = "#a6e3a1"
//! status_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! ```

use crate::domain::error::{PaperLensError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground.
    pub selection_fg: String,
    /// Selected card background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: metadata lines, footer, unfocused labels.
    pub text_dim: String,
    /// Card titles.
    pub title_fg: String,

    pub border: String,

    /// Filter field frame when unfocused.
    pub field_border: String,
    /// Filter field frame and label when focused.
    pub field_focus: String,

    /// Search match highlight in titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Unselected category chips and keyword chips.
    pub chip_fg: String,
    pub chip_selected_fg: String,
    pub chip_selected_bg: String,

    /// Loading, empty and informational messages.
    pub status_fg: String,
    /// Request failures and invalid input.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// ```rust
    /// use paperlens::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`PaperLensError::Io`] if the file cannot be read,
    /// [`PaperLensError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| PaperLensError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// `#rrggbb` as an RGB triple; malformed input renders as white.
    fn rgb(hex: &str) -> (u8, u8, u8) {
        let digits = hex.trim().trim_start_matches('#');
        let packed = if digits.len() == 6 {
            u32::from_str_radix(digits, 16).unwrap_or(0x00ff_ffff)
        } else {
            0x00ff_ffff
        };
        let [_, r, g, b] = packed.to_be_bytes();
        (r, g, b)
    }

    /// SGR truecolor escape; `layer` is 38 for foreground, 48 for background.
    fn truecolor(layer: u8, hex: &str) -> String {
        let (r, g, b) = Self::rgb(hex);
        format!("\u{001b}[{layer};2;{r};{g};{b}m")
    }

    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::truecolor(38, hex)
    }

    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
