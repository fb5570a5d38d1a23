use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem},
    Frame,
};

use crate::i18n::Labels;
use crate::models::SavedLocation;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    saved: &[SavedLocation],
    selected: usize,
    labels: &Labels,
) {
    let popup_area = Rect {
        x: area.width / 4,
        y: area.height / 4,
        width: area.width / 2,
        height: (area.height / 2).min(saved.len() as u16 + 6).max(7).min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(""))];
    if saved.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", labels.no_saved_locations),
            theme::dim(),
        ))));
        items.push(ListItem::new(Line::from(Span::styled(
            "  Add one with `vakit locations add <name> --lat .. --lng ..`",
            theme::dim(),
        ))));
    } else {
        for (i, loc) in saved.iter().enumerate() {
            let style = if i == selected {
                theme::accent().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let marker = if i == selected { "▸" } else { " " };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {} ", marker), style),
                Span::styled(loc.city.label(), style),
            ])));
        }
    }
    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        "  [Enter] use  ·  [d] delete  ·  [Esc] close",
        theme::dim(),
    ))));

    let block = Block::default()
        .title(Span::styled(format!(" {} ", labels.saved_locations), theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::amber())
        .style(theme::surface());

    frame.render_widget(List::new(items).block(block), popup_area);
}
