use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;
use crate::utils::format::format_degrees;
use crate::utils::qibla::compass_point;

fn arrow(bearing: f64) -> &'static str {
    const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let idx = ((bearing.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[idx]
}

pub fn render(frame: &mut Frame, area: Rect, bearing: f64, title: &str) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(arrow(bearing), theme::sky().add_modifier(Modifier::BOLD)),
            Span::styled("  ", theme::dim()),
            Span::styled(format_degrees(bearing), theme::bold()),
            Span::styled(format!("  {}", compass_point(bearing)), theme::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
