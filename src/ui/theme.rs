//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::StatusColor;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Operational components and the all-clear header.
    pub green: Color,
    /// Degraded performance, re-routed traffic, minor incidents.
    pub yellow: Color,
    /// Major incident impact.
    pub orange: Color,
    /// Outages and critical incidents.
    pub red: Color,
    /// Maintenance in progress.
    pub blue: Color,
    /// Unknown statuses and secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headings.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            green: Color::Green,
            yellow: Color::Yellow,
            orange: Color::Rgb(255, 140, 0),
            red: Color::Red,
            blue: Color::LightBlue,
            muted: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            green: Color::Green,
            yellow: Color::Rgb(181, 137, 0),
            orange: Color::Rgb(203, 75, 22),
            red: Color::Red,
            blue: Color::Blue,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Terminal color for a classified status.
    pub fn color(&self, color: StatusColor) -> Color {
        match color {
            StatusColor::Green => self.green,
            StatusColor::Yellow => self.yellow,
            StatusColor::Orange => self.orange,
            StatusColor::Red => self.red,
            StatusColor::Blue => self.blue,
            StatusColor::Gray => self.muted,
        }
    }

    /// Foreground style for a classified status; outages are bold.
    pub fn status_style(&self, color: StatusColor) -> Style {
        let style = Style::default().fg(self.color(color));
        match color {
            StatusColor::Red => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_are_distinct() {
        for theme in [Theme::dark(), Theme::light()] {
            let colors = [
                StatusColor::Green,
                StatusColor::Yellow,
                StatusColor::Orange,
                StatusColor::Red,
                StatusColor::Blue,
                StatusColor::Gray,
            ]
            .map(|c| theme.color(c));
            for (i, a) in colors.iter().enumerate() {
                for b in &colors[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_red_is_bold() {
        let theme = Theme::dark();
        assert!(theme.status_style(StatusColor::Red).add_modifier.contains(Modifier::BOLD));
        assert!(!theme.status_style(StatusColor::Green).add_modifier.contains(Modifier::BOLD));
    }
}
