mod categories;
mod category_view;
mod editor;
mod quiz;
mod result;
mod welcome;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, LoadState};
use crate::session::Screen;

pub(crate) const TITLE: &str = "GERMAN AVIATION QUIZ";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.load_state() {
        LoadState::Loading => render_loading(frame, area),
        LoadState::Failed(message) => render_error(frame, area, message),
        LoadState::Ready => match app.session().screen() {
            Screen::Landing => welcome::render(frame, area, app),
            Screen::CategorySelect => categories::render(frame, area, app),
            Screen::CategoryView { category } => category_view::render(frame, area, app, category),
            Screen::Active { editing: Some(draft) } => editor::render(frame, area, app, draft),
            Screen::Active { editing: None } => quiz::render(frame, area, app),
            Screen::Finished => result::render(frame, area, app),
        },
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let chunks = centered(area, 3);
    let widget = Paragraph::new("Loading questions...")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, chunks[1]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = centered(area, 8);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(message.fg(Color::Gray)),
        Line::from(""),
        Line::from("q to quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);
}

/// Split `area` into filler / a band of `height` rows / filler.
pub(crate) fn centered(area: Rect, height: u16) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area)
}

pub(crate) fn render_status(frame: &mut Frame, area: Rect, app: &App, controls: &str) {
    let line = match app.status() {
        Some(status) => Line::from(status.fg(Color::Yellow)),
        None => Line::from(controls.fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
