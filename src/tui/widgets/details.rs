//! Disruption details popup for one workload.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::tui::dashboard::DetailsPanel;
use crate::tui::style::Styles;
use crate::view::details;

/// Returns a centered rect of given percentage within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Renders the details popup centered over the dashboard.
pub fn render_details(frame: &mut Frame, area: Rect, panel: &mut DetailsPanel) {
    let popup_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup_area);

    let title = panel.title().unwrap_or_else(|| "Details".to_string());
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    if panel.rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No disruption events in the retention window").style(Styles::dim()),
            chunks[0],
        );
    } else {
        // Clamp scroll so the last page stays full.
        let visible_height = chunks[0].height.saturating_sub(1) as usize; // minus header
        let max_scroll = panel.rows.len().saturating_sub(visible_height);
        if panel.scroll > max_scroll {
            panel.scroll = max_scroll;
        }

        let header = Row::new(
            details::headers()
                .iter()
                .map(|h| Span::styled(*h, Styles::table_header())),
        )
        .style(Styles::table_header())
        .height(1);

        let rows: Vec<Row> = panel
            .rows
            .iter()
            .skip(panel.scroll)
            .map(|vr| {
                Row::new(vr.cells.iter().cloned())
                    .style(Styles::from_class(vr.style))
                    .height(1)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(20),
                Constraint::Length(28),
                Constraint::Length(20),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .column_spacing(1);
        frame.render_widget(table, chunks[0]);
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" close  ", Styles::help()),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::styled(" scroll", Styles::help()),
    ]));
    frame.render_widget(footer, chunks[1]);
}
