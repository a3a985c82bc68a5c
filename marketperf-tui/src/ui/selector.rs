//! Multi-select lists and the inflation toggle.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::SelectList;
use crate::theme;
use crate::ui::panel_block;

pub fn render_list(f: &mut Frame, area: Rect, title: &str, list: &SelectList, active: bool) {
    let title = format!("{title} ({}/{})", list.picked_count(), list.len());
    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = if list.is_picked(i) { "[x] " } else { "[ ] " };
            let mark_style = if list.is_picked(i) {
                theme::accent()
            } else {
                theme::muted()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, mark_style),
                Span::styled(item.label.as_str(), theme::text()),
                Span::raw("  "),
                Span::styled(item.detail.as_str(), theme::muted()),
            ]))
        })
        .collect();

    let widget = List::new(items)
        .block(panel_block(&title, active))
        .highlight_style(theme::highlight(active));
    let mut state = ListState::default().with_selected(Some(list.cursor));
    f.render_stateful_widget(widget, area, &mut state);
}

pub fn render_toggle(f: &mut Frame, area: Rect, inflation_adjusted: bool) {
    let (mark, style) = if inflation_adjusted {
        ("[x]", theme::accent())
    } else {
        ("[ ]", theme::muted())
    };
    let line = Line::from(vec![
        Span::styled(mark, style),
        Span::styled(" Adjust for inflation", theme::text()),
        Span::styled("  (i)", theme::muted()),
    ]);
    f.render_widget(
        Paragraph::new(line).block(panel_block("Mode", false)),
        area,
    );
}
