use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Padding},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    let cursor = app.category_cursor();
    let items: Vec<ListItem> = app
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let count = app
                .session()
                .all_questions()
                .iter()
                .filter(|q| q.category() == category.as_str())
                .count();
            let style = if index == cursor {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if index == cursor { ">" } else { " " };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(format!("{:<8}", category), style),
                Span::styled(format!("{} questions", count), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Select a Category ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .padding(Padding::uniform(1)),
    );

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    super::render_status(frame, chunks[1], app, "j/k navigate  ·  enter open  ·  esc back to home");
}
