use ratatui::style::{Color, Modifier, Style};

// Night palette: deep indigo background with violet and sky accents
pub const BG: Color = Color::Rgb(26, 31, 44);
pub const SURFACE: Color = Color::Rgb(36, 40, 58);
pub const BORDER: Color = Color::Rgb(64, 60, 96);
pub const TEXT: Color = Color::Rgb(232, 230, 244);
pub const TEXT_DIM: Color = Color::Rgb(140, 138, 168);
pub const VIOLET: Color = Color::Rgb(139, 92, 246);
pub const SKY: Color = Color::Rgb(14, 165, 233);
pub const GREEN: Color = Color::Rgb(110, 190, 120);
pub const AMBER: Color = Color::Rgb(232, 170, 70);
pub const RED: Color = Color::Rgb(220, 90, 80);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Accent used for titles and the next prayer.
pub fn accent() -> Style {
    Style::default().fg(VIOLET)
}

pub fn sky() -> Style {
    Style::default().fg(SKY)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}
