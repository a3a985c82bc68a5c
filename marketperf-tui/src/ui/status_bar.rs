//! Bottom status bar: focus, key hints, last status/warning/error.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::input::key_bindings_help;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" [{}]", app.focus.label()), theme::accent()));

    spans.push(Span::raw(" "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
        spans.push(Span::raw(" | "));
    }

    let hints: Vec<String> = key_bindings_help()
        .iter()
        .map(|(key, action)| format!("{key}:{action}"))
        .collect();
    spans.push(Span::styled(hints.join(" "), theme::muted()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
