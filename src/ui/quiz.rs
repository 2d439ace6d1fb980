use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{AnswerOption, Question};
use crate::session::AnswerState;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(question) = session.current_question() else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(columns[0]);

    let number = session.current_index() + 1;
    let total = session.active_questions().len();
    let answer = session.current_answer();

    render_header(frame, chunks[0], question, number, total);
    render_progress(frame, chunks[1], number, total);
    render_question_text(frame, chunks[3], &question.text);
    render_options(frame, chunks[4], question, answer, app.option_cursor());
    render_next_hint(frame, chunks[5], answer.is_answered, session.is_last_question());
    super::render_status(
        frame,
        chunks[6],
        app,
        "j/k navigate  ·  enter answer  ·  h/l switch question  ·  e/F2 edit  ·  q/esc quit",
    );

    render_question_list(frame, columns[1], app);
}

fn render_header(frame: &mut Frame, area: Rect, question: &Question, number: usize, total: usize) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let position = Paragraph::new(format!("Question {} / {}", number, total))
        .fg(Color::Gray)
        .bold();
    let reference = Paragraph::new(format!("Frage {} ({})", question.id, question.code))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);

    frame.render_widget(position, halves[0]);
    frame.render_widget(reference, halves[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, number: usize, total: usize) {
    let ratio = if total > 0 {
        number as f64 / total as f64
    } else {
        0.0
    };
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answer: AnswerState<'_>,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let (style, mark) = option_style(question, option, answer, index == cursor);
        let marker = if index == cursor && !answer.is_answered {
            ">"
        } else {
            " "
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.letter), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(mark, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Once answered, the correct option turns green and a wrong pick red.
fn option_style(
    question: &Question,
    option: &AnswerOption,
    answer: AnswerState<'_>,
    under_cursor: bool,
) -> (Style, &'static str) {
    if !answer.is_answered {
        return if under_cursor {
            (Style::default().fg(Color::Cyan).bold(), "")
        } else {
            (Style::default().fg(Color::Gray), "")
        };
    }

    if question.is_correct(&option.letter) {
        (Style::default().fg(Color::Green).bold(), "  ✓")
    } else if answer.selected == Some(option.letter.as_str()) {
        (Style::default().fg(Color::Red).bold(), "  ✗")
    } else {
        (Style::default().fg(Color::DarkGray), "")
    }
}

fn render_next_hint(frame: &mut Frame, area: Rect, is_answered: bool, is_last: bool) {
    if !is_answered {
        return;
    }
    let label = if is_last {
        "enter  Finish Quiz"
    } else {
        "enter  Next Question"
    };
    let widget = Paragraph::new(label)
        .alignment(Alignment::Right)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(widget, area);
}

fn render_question_list(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let current = session.current_index();

    let items: Vec<ListItem> = session
        .active_questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = session.answer_for(question.id);
            let (symbol, style) = match answer {
                _ if index == current => (">", Style::default().fg(Color::Cyan).bold()),
                Some(a) if a.is_correct => ("+", Style::default().fg(Color::Green)),
                Some(_) => ("-", Style::default().fg(Color::Red)),
                None => (" ", Style::default().fg(Color::Gray)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", symbol), style),
                Span::styled(format!("Question {}", index + 1), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Questions ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    let mut state = ListState::default().with_selected(Some(current));
    frame.render_stateful_widget(list, area, &mut state);
}
