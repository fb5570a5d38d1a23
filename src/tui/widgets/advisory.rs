use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::i18n::Language;
use crate::schedule::Notice;
use crate::tui::theme;
use crate::utils::format::format_countdown;

/// Toast-style popup anchored to the top of `area`.
pub fn render(frame: &mut Frame, area: Rect, notice: &Notice, lang: Language, now: NaiveDateTime) {
    let width = area.width.saturating_sub(4).min(64);
    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + 1,
        width,
        height: 7.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let left = format_countdown(notice.expires_at - now);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", notice.advisory.message(lang)),
            theme::bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", left), theme::amber()),
            Span::styled("  ·  [x] dismiss", theme::dim()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(
            format!(" 🔔 {} ", notice.advisory.title(lang)),
            theme::accent().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::amber())
        .style(theme::surface());

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
