use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::PrayerSlot;
use crate::schedule::TickDisplay;
use crate::tui::theme;
use crate::utils::format::{format_time, pad_display};

pub fn render(frame: &mut Frame, area: Rect, slots: &[PrayerSlot], display: Option<&TickDisplay>) {
    let block = Block::default()
        .title(Span::styled(" Today ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ratatui::style::Style::default().fg(theme::BORDER))
        .style(theme::surface());

    if slots.is_empty() {
        let items = vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(Span::styled("  No prayer times", theme::dim()))),
        ];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = slots
        .iter()
        .map(|slot| {
            let idx = slot.name.index();
            let is_current = display.is_some_and(|d| d.current_index == idx);
            let is_next = display.is_some_and(|d| d.next_index == idx);

            let (icon, name_style) = if is_current {
                ("●", theme::green().add_modifier(Modifier::BOLD))
            } else if is_next {
                ("▸", theme::accent().add_modifier(Modifier::BOLD))
            } else {
                (" ", theme::bold())
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", icon), name_style),
                Span::styled(pad_display(slot.name.display_name(), 9), name_style),
                Span::styled(pad_display(slot.name.arabic_name(), 8), theme::dim()),
                Span::styled(format_time(slot.time), theme::bold()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
