use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

pub fn render(frame: &mut Frame, area: Rect, app: &App, category: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let questions = app.session().category_questions();

    let header = Paragraph::new(format!(
        "Category: {}  ·  {} questions",
        category,
        questions.len()
    ))
    .fg(Color::Cyan)
    .bold()
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(header, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for (index, question) in questions.iter().copied().enumerate().skip(app.category_scroll()) {
        push_question_card(&mut lines, index, question);
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(body, chunks[1]);

    super::render_status(frame, chunks[2], app, "j/k scroll  ·  esc back to categories");
}

/// One question with its correct answer highlighted.
fn push_question_card<'a>(lines: &mut Vec<Line<'a>>, index: usize, question: &'a Question) {
    lines.push(Line::from(vec![
        Span::styled(
            format!("Question {}", index + 1),
            Style::default().fg(Color::Gray).bold(),
        ),
        Span::styled(
            format!("   Frage {} ({})", question.id, question.code),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        question.text.as_str(),
        Style::default().fg(Color::White).bold(),
    )));

    for option in &question.options {
        let style = if question.is_correct(&option.letter) {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", option.letter), style),
            Span::styled(option.text.as_str(), style),
        ]));
    }
    lines.push(Line::from(""));
}
