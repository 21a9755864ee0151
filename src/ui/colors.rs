//! Color palette for the chat screen

use ratatui::style::Color;

use crate::ui::state::{Speaker, Status};

pub const HEADER_ACCENT: Color = Color::Rgb(0x89, 0xb4, 0xfa); // Blue
pub const TEXT: Color = Color::Rgb(0xcd, 0xd6, 0xf4); // Pale lavender
pub const MUTED: Color = Color::Rgb(0x6c, 0x70, 0x86); // Overlay grey
pub const QUICK_FG: Color = Color::Rgb(0xa6, 0xad, 0xc8); // Subtext
pub const INPUT_BORDER: Color = Color::Rgb(0x31, 0x32, 0x44); // Surface

/// Name color for each speaker in the log
pub fn speaker_color(speaker: Speaker) -> Color {
    match speaker {
        Speaker::User => Color::Rgb(0x89, 0xb4, 0xfa),      // Blue
        Speaker::Assistant => Color::Rgb(0xcb, 0xa6, 0xf7), // Mauve
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Online => Color::Rgb(0xa6, 0xe3, 0xa1),   // Green
        Status::Thinking => Color::Rgb(0xf3, 0x8b, 0xa8), // Red
    }
}
