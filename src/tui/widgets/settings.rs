//! Settings modal with the retention-hours field.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::dashboard::SettingsModal;
use crate::tui::style::Styles;

/// Renders the settings modal centered on screen.
pub fn render_settings(frame: &mut Frame, area: Rect, modal: &SettingsModal) {
    let popup_width = (area.width * 50 / 100).clamp(40, 60);
    let popup_height = 8;

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut content = vec![
        Line::from(vec![
            Span::styled("Retention (hours): ", Styles::help()),
            Span::styled(format!("{}█", modal.input), Styles::filter_input()),
        ]),
        Line::from(""),
    ];
    if let Some(error) = &modal.error {
        content.push(Line::from(Span::styled(error.clone(), Styles::critical())));
    } else {
        content.push(Line::from(Span::styled(
            "Events older than this are pruned by the server",
            Styles::help(),
        )));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" save  ", Styles::help()),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" cancel", Styles::help()),
    ]));

    let chunks = Layout::vertical([Constraint::Min(1)]).split(inner);
    frame.render_widget(Paragraph::new(content), chunks[0]);
}
