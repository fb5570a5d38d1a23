use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::i18n::Labels;
use crate::schedule::TickDisplay;
use crate::tui::theme;
use crate::utils::format::COUNTDOWN_PLACEHOLDER;

pub fn render(frame: &mut Frame, area: Rect, display: Option<&TickDisplay>, labels: &Labels) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", labels.next_prayer), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let (name, countdown) = match display {
        Some(d) => (d.next.display_name().to_uppercase(), d.countdown.as_str()),
        None => ("—".to_string(), COUNTDOWN_PLACEHOLDER),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(name, theme::accent().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(labels.next_prayer_label, theme::dim())),
        Line::from(Span::styled(
            countdown,
            theme::amber().add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
