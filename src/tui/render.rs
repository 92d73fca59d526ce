//! Main rendering logic for the TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::dashboard::Dashboard;
use super::style::Styles;
use super::widgets::{
    render_details, render_header, render_help, render_quit_confirm, render_settings,
    render_workloads,
};

/// Main render function.
pub fn render(frame: &mut Frame, dash: &mut Dashboard) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Active text filters
        Constraint::Min(5),    // Workload table
    ])
    .split(area);

    render_header(frame, chunks[0], dash);
    render_filter_line(frame, chunks[1], dash);
    render_workloads(frame, chunks[2], dash);

    // Popups overlay the table; last rendered wins.
    if dash.show_help {
        render_help(frame, area, &mut dash.help_scroll);
    }
    if dash.details.visible {
        render_details(frame, area, &mut dash.details);
    }
    if dash.settings.visible {
        render_settings(frame, area, &dash.settings);
    }
    if dash.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}

/// One line showing the live text filters so their effect is visible even
/// outside edit mode.
fn render_filter_line(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let mut spans: Vec<Span> = Vec::new();
    let mut push = |label: &'static str, value: &str| {
        if !value.is_empty() {
            spans.push(Span::styled(format!(" {}:", label), Styles::dim()));
            spans.push(Span::styled(value.to_string(), Styles::filter_input()));
        }
    };
    push("namespace", &dash.namespace_input);
    push("type", &dash.kind_filter);
    push("workload", &dash.workload_input);

    if spans.is_empty() {
        spans.push(Span::styled(
            " ?:help  /:namespace  w:workload  t:type  s:sort  Enter:details",
            Styles::help(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
