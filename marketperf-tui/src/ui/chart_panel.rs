//! Chart pane: one line per (period, instrument), a day cursor, and the
//! unified hover readout for the cursor's day.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use marketperf_core::chart::ChartModel;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme::{self, Theme};
use crate::ui::panel_block;

/// Most readout rows shown before the list is cut off.
const MAX_READOUT_ROWS: u16 = 8;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Chart;
    match &app.chart {
        Some(chart) if !chart.is_empty() => {
            let rows = (chart.traces.len() as u16).clamp(1, MAX_READOUT_ROWS);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(8), Constraint::Length(rows + 2)])
                .split(area);
            render_chart(f, chunks[0], chart, app.cursor_day, active);
            render_readout(f, chunks[1], chart, app.cursor_day);
        }
        _ => render_empty(f, area, app, active),
    }
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState, active: bool) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("No chart to show.", theme::muted())),
        Line::from(""),
    ];
    match &app.status_message {
        Some((msg, StatusLevel::Error)) => {
            lines.push(Line::from(Span::styled(msg.as_str(), theme::negative())));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Pick periods and instruments with Space; press i to adjust for inflation.",
                theme::muted(),
            )));
        }
    }
    f.render_widget(
        Paragraph::new(lines).block(panel_block("Chart", active)),
        area,
    );
}

fn render_chart(f: &mut Frame, area: Rect, chart: &ChartModel, cursor_day: usize, active: bool) {
    let [x_lo, x_hi] = chart.x_bounds();
    let [y_lo, y_hi] = chart.y_bounds();
    let cursor_x = cursor_day as f64;
    let cursor_line = [(cursor_x, y_lo), (cursor_x, y_hi)];

    let mut datasets: Vec<Dataset> = chart
        .traces
        .iter()
        .enumerate()
        .map(|(i, trace)| {
            Dataset::default()
                .name(trace.name.as_str())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(&trace.points)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(theme::muted())
            .graph_type(GraphType::Line)
            .data(&cursor_line),
    );

    let x_mid = (x_lo + x_hi) / 2.0;
    let y_mid = (y_lo + y_hi) / 2.0;
    let widget = Chart::new(datasets)
        .block(panel_block(&chart.title, active))
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_title, theme::muted()))
                .style(theme::muted())
                .bounds([x_lo, x_hi])
                .labels(vec![
                    Span::styled(format!("{x_lo:.0}"), theme::muted()),
                    Span::styled(format!("{x_mid:.0}"), theme::muted()),
                    Span::styled(format!("{x_hi:.0}"), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_title, theme::muted()))
                .style(theme::muted())
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::styled(format!("{y_lo:.1}%"), theme::muted()),
                    Span::styled(format!("{y_mid:.1}%"), theme::muted()),
                    Span::styled(format!("{y_hi:.1}%"), theme::muted()),
                ]),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(2, 3), Constraint::Ratio(2, 3)));

    f.render_widget(widget, area);
}

/// Readout lines for `cursor_day`: a marker in the line's color, then the
/// hover text colored by the sign of the change.
pub fn readout_lines(chart: &ChartModel, cursor_day: usize) -> Vec<Line<'_>> {
    let palette = Theme::default();
    chart
        .traces
        .iter()
        .enumerate()
        .filter_map(|(i, trace)| {
            let text = trace.hover_at(cursor_day)?;
            let (_, pct) = trace.points.get(cursor_day)?;
            Some(Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme::series_color(i))),
                Span::styled(text, Style::default().fg(palette.pct_color(*pct))),
            ]))
        })
        .collect()
}

fn render_readout(f: &mut Frame, area: Rect, chart: &ChartModel, cursor_day: usize) {
    let lines = readout_lines(chart, cursor_day);

    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            format!("No series reaches day {cursor_day}"),
            theme::muted(),
        ))]
    } else {
        lines
    };

    let title = format!("{} · Day {cursor_day}", chart.legend_title);
    f.render_widget(Paragraph::new(lines).block(panel_block(&title, false)), area);
}
