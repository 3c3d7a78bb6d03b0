//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::display::MoodIcon;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for the header and selection.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success/online indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Destructive action color (report).
pub const DESTRUCTIVE: Color = Color::Red;

/// Background for the local participant's messages.
pub const OWN_MESSAGE_BG: Color = Color::Rgb(40, 70, 120);

/// Color for sender names in chat.
pub const SENDER_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::LightBlue,
    Color::LightGreen,
    Color::Rgb(255, 165, 0),
    Color::Rgb(180, 120, 255),
];

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (header, notice borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected message style.
#[must_use]
pub fn selected() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Style for the local participant's message bodies.
#[must_use]
pub fn own_message() -> Style {
    Style::default().fg(FG_PRIMARY).bg(OWN_MESSAGE_BG)
}

/// Italic dimmed style (typing indicator, policy copy).
#[must_use]
pub fn italic_dimmed() -> Style {
    dimmed().add_modifier(Modifier::ITALIC)
}

/// Get a color for a sender based on their name.
#[must_use]
pub fn sender_color(name: &str) -> Color {
    let hash = name.bytes().fold(0u32, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u32::from(b))
    });
    SENDER_COLORS[(hash as usize) % SENDER_COLORS.len()]
}

/// Color for a mood icon.
#[must_use]
pub const fn mood_color(icon: MoodIcon) -> Color {
    match icon {
        MoodIcon::Heart => SUCCESS,
        MoodIcon::Alert => WARNING,
        MoodIcon::Smile => FG_SECONDARY,
    }
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}
