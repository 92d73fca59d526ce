//! Header bar: endpoint, refresh status, filter buttons, input line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::StatusFilter;
use crate::tui::dashboard::{Dashboard, InputMode};
use crate::tui::style::Styles;

/// Renders the one-line header bar.
pub fn render_header(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let chunks = Layout::horizontal([
        Constraint::Length(22), // Last refresh time
        Constraint::Length(10), // Mode
        Constraint::Min(30),    // Status filter buttons
        Constraint::Length(42), // Input line / status / endpoint
    ])
    .split(area);

    // Last refresh time
    let time_str = dash
        .last_refresh
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "----".to_string());
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    // Mode
    let mode_str = if dash.last_error.is_some() {
        " STALE "
    } else if dash.paused {
        " PAUSED "
    } else {
        " LIVE "
    };
    let mode_style = if dash.last_error.is_some() {
        Styles::critical()
    } else {
        Styles::header()
    };
    frame.render_widget(Paragraph::new(mode_str).style(mode_style), chunks[1]);

    // Status filter buttons, numbered like their keybindings
    let active = dash.view_state.active_filter();
    let buttons: Vec<Span> = StatusFilter::all()
        .iter()
        .enumerate()
        .flat_map(|(i, status)| {
            let style = if *status == active {
                Styles::filter_active()
            } else {
                Styles::filter_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", status.label());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(buttons)).style(Styles::header()),
        chunks[2],
    );

    // Input line, error, or endpoint
    let (right_content, right_style) = match dash.input_mode {
        InputMode::Namespace => (
            format!("Namespace: {}█", dash.namespace_input),
            Styles::filter_input(),
        ),
        InputMode::Workload => (
            format!("Workload: {}█", dash.workload_input),
            Styles::filter_input(),
        ),
        _ => {
            if let Some(msg) = &dash.status_message {
                (msg.clone(), Styles::warning())
            } else if let Some(err) = &dash.last_error {
                (format!("fetch failed: {}", err), Styles::critical())
            } else {
                (dash.endpoint.clone(), Styles::header())
            }
        }
    };
    frame.render_widget(
        Paragraph::new(right_content).style(right_style),
        chunks[3],
    );
}
