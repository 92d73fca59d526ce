//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

const POPUP_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 5;

/// Renders the quit confirmation over the dashboard.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let width = POPUP_WIDTH.min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    let popup_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Exit wdmon ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Styles::default());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from("Quit the dashboard?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("q", Styles::help_key()),
            Span::styled(" quit  ", Styles::help()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("n", Styles::help_key()),
            Span::styled(" cancel", Styles::help()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
