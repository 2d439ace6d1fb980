use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::{EditDraft, EditField};

pub fn render(frame: &mut Frame, area: Rect, app: &App, draft: &EditDraft) {
    let question = draft.question();
    let focus = draft.focus();

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: false })
        .fg(Color::White)
        .block(field_block(
            &format!(" Edit Question {} · Question Text ", question.id),
            focus == EditField::Text,
        ));
    frame.render_widget(text, chunks[0]);

    let option_lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let focused = focus == EditField::Option(index);
            let style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!(" {}  ", option.letter), Style::default().bold()),
                Span::styled(format!("{}{}", option.text, cursor), style),
            ])
        })
        .collect();
    let options = Paragraph::new(option_lines)
        .wrap(Wrap { trim: false })
        .block(field_block(" Options ", matches!(focus, EditField::Option(_))));
    frame.render_widget(options, chunks[1]);

    let correct = Paragraph::new(format!("◀ {} ▶", question.correct_answer))
        .alignment(Alignment::Center)
        .fg(Color::Green)
        .bold()
        .block(field_block(" Correct Answer ", focus == EditField::CorrectAnswer));
    frame.render_widget(correct, chunks[2]);

    let note = Paragraph::new("Changes are saved locally and persist on this device.")
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(note, chunks[3]);

    super::render_status(
        frame,
        chunks[4],
        app,
        "tab next field  ·  ←/→ correct answer  ·  enter save  ·  esc cancel",
    );
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string())
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}
