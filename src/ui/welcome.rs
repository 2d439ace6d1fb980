use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

use super::{centered, TITLE};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = centered(area, 11);
    let total = app.session().all_questions().len();

    let action_style = if total > 0 {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Test your knowledge with {} questions.", total),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("ENTER", action_style),
            Span::styled(" start quiz   ", Style::default().fg(Color::DarkGray)),
            Span::styled("C", action_style),
            Span::styled(" view by category", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from("q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
