//! TUI color theme
//!
//! Palette lifted from the web dashboard this tool replaces: warm rank
//! colors for the top three positions, blue for the just-searched highlight.

use ratatui::style::Color;

use crate::domain::Severity;

pub const RANK_FIRST: Color = Color::Rgb(231, 76, 60);
pub const RANK_SECOND: Color = Color::Rgb(243, 156, 18);
pub const RANK_THIRD: Color = Color::Rgb(241, 196, 15);

/// "Just searched" highlight for entries the user submitted this session.
pub const HIGHLIGHT: Color = Color::Rgb(0, 123, 255);

pub const ACCENT: Color = Color::Rgb(0, 123, 255);
pub const SUCCESS_GREEN: Color = Color::Rgb(40, 167, 69);
pub const ERROR_RED: Color = Color::Rgb(220, 53, 69);
pub const DIM: Color = Color::DarkGray;
pub const TEXT: Color = Color::White;

/// Rank marker color for a 0-based list position; only the top three
/// positions are marked.
#[must_use]
pub const fn rank_color(index: usize) -> Option<Color> {
    match index {
        0 => Some(RANK_FIRST),
        1 => Some(RANK_SECOND),
        2 => Some(RANK_THIRD),
        _ => None,
    }
}

/// Toast style color for a severity.
#[must_use]
pub const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => ACCENT,
        Severity::Success => SUCCESS_GREEN,
        Severity::Error => ERROR_RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_top_three_positions_get_rank_colors() {
        assert!(rank_color(0).is_some());
        assert!(rank_color(2).is_some());
        assert!(rank_color(3).is_none());
        assert!(rank_color(14).is_none());
    }
}
