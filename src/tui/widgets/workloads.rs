//! Workload table widget: the main dashboard view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::WorkloadRow;
use crate::tui::dashboard::Dashboard;
use crate::tui::style::Styles;

/// Renders the workload table with sort indicator and active filters in the
/// title.
pub fn render_workloads(frame: &mut Frame, area: Rect, dash: &mut Dashboard) {
    if dash.table.is_empty() {
        let block = Block::default()
            .title(" Workloads ")
            .borders(Borders::ALL)
            .style(Styles::default());
        let message = if dash.last_refresh.is_none() {
            "Waiting for first refresh..."
        } else {
            "No disruptions recorded"
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let sort = dash.view_state.sort();

    // Header with sort indicator
    let headers: Vec<Span> = WorkloadRow::headers()
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = match sort {
                Some(s) if s.column == i => {
                    if s.ascending {
                        "▲"
                    } else {
                        "▼"
                    }
                }
                _ => "",
            };
            Span::styled(format!("{}{}", h, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let visible = dash.table.visible_rows();
    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(idx, wr)| {
            let style = if idx == dash.table.selected {
                Styles::selected()
            } else if wr.oom_kills > 0 {
                Styles::warning()
            } else if wr.total() == 0 {
                Styles::dim()
            } else {
                Styles::default()
            };
            Row::new(wr.cells()).style(style).height(1)
        })
        .collect();

    let visible_count = visible.len();
    let total = dash.table.len();
    let title = if visible_count == total {
        format!(" Workloads ({}) ", total)
    } else {
        format!(" Workloads ({}/{}) ", visible_count, total)
    };

    let mut constraints: Vec<Constraint> = WorkloadRow::widths()
        .iter()
        .map(|&w| Constraint::Length(w))
        .collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    dash.table.ratatui_state.select(Some(dash.table.selected));
    frame.render_stateful_widget(table, area, &mut dash.table.ratatui_state);
}
