//! Color theme and glyphs for the Stepwise TUI.
//!
//! Uses the Kanagawa Wave palette by default with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};

use stepwise_types::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BG_BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            accent: colors::CYAN,
            success: colors::GREEN,
            error: colors::RED,
            peach: colors::ORANGE,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            primary: Color::White,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            peach: Color::Yellow,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for the step indicator and field markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub step_done: &'static str,
    pub step_current: &'static str,
    pub step_todo: &'static str,
    pub step_separator: &'static str,
    pub selected: &'static str,
    pub mask: char,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            step_done: "*",
            step_current: ">",
            step_todo: "o",
            step_separator: " - ",
            selected: ">",
            mask: '*',
        }
    } else {
        Glyphs {
            step_done: "●",
            step_current: "◆",
            step_todo: "○",
            step_separator: " ─ ",
            selected: "▸",
            mask: '•',
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused_field(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }
}
