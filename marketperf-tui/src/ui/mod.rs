//! Top-level UI layout: selectors on the left, chart on the right,
//! status bar at the bottom.

pub mod chart_panel;
pub mod selector;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

/// Width of the selector column.
const LEFT_WIDTH: u16 = 44;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LEFT_WIDTH), Constraint::Min(20)])
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(columns[0]);

    selector::render_list(f, left[0], "Periods", &app.periods, app.focus == Focus::Periods);
    selector::render_list(
        f,
        left[1],
        "Instruments",
        &app.instruments,
        app.focus == Focus::Instruments,
    );
    selector::render_toggle(f, left[2], app.inflation_adjusted);

    chart_panel::render(f, columns[1], app);
    status_bar::render(f, chunks[1], app);
}

/// Bordered block whose border and title follow focus.
pub fn panel_block(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(format!(" {title} "))
        .title_style(theme::panel_title(active))
}
