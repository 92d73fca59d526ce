//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 72);
    let popup_height = (area.height * 80 / 100).clamp(10, 28);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_content();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn help_content() -> Vec<Line<'static>> {
    let key = |k: &'static str| Span::styled(format!("  {:<10}", k), Style::default().fg(Color::Yellow));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(Color::White));
    let section = |s: &'static str| {
        Line::from(Span::styled(
            s,
            Style::default().fg(Color::Cyan),
        ))
    };

    vec![
        section("Filters"),
        Line::from(vec![key("1-4"), desc("status filter: All / Disrupted / OOM / Term")]),
        Line::from(vec![key("/ or n"), desc("edit namespace filter (live)")]),
        Line::from(vec![key("w"), desc("edit workload name filter (live)")]),
        Line::from(vec![key("t"), desc("cycle type filter through present kinds")]),
        Line::from(""),
        section("Sorting"),
        Line::from(vec![key("s"), desc("sort by next column (ascending)")]),
        Line::from(vec![key("r"), desc("reverse sort direction")]),
        Line::from(""),
        section("Navigation"),
        Line::from(vec![key("↑/↓ j/k"), desc("move selection / scroll popup")]),
        Line::from(vec![key("PgUp/PgDn"), desc("page selection")]),
        Line::from(vec![key("Home/End"), desc("jump to first / last row")]),
        Line::from(vec![key("Enter"), desc("open disruption details for selected row")]),
        Line::from(""),
        section("Refresh"),
        Line::from(vec![key("Space"), desc("pause / resume the refresh timer")]),
        Line::from(vec![key("u / F5"), desc("refresh now")]),
        Line::from(""),
        section("Other"),
        Line::from(vec![key("o"), desc("retention settings")]),
        Line::from(vec![key("?"), desc("this help")]),
        Line::from(vec![key("q"), desc("quit (with confirmation)")]),
    ]
}
