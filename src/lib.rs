//! # aviation-quiz
//!
//! A terminal multiple-choice quiz over a locally persisted question bank.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aviation_quiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Seed from data/quiz.json, persist edits to quiz-storage.json
//!     let store = Config::default().question_store()?;
//!
//!     // Load the bank and run the quiz in the terminal
//!     Quiz::new(store).run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::{App, LoadState, LOAD_ERROR_MESSAGE};
pub use config::{Config, SourceLocation};
pub use data::{LoadError, QuestionStore, StorageError};
pub use models::{AnswerOption, Question, UserAnswer};
pub use session::{Screen, Session};

use session::EditField;
use terminal::{AppTerminal, TerminalGuard};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error setting up the question source.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error while driving the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(store: QuestionStore) -> Self {
        Self {
            app: App::new(store),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Shows a loading screen while the question bank loads, then hands
    /// control to the user until they quit. A failed load is shown on screen
    /// rather than returned.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = TerminalGuard::enter()?;
        guard.terminal().draw(|frame| ui::render(frame, &self.app))?;

        self.app.load().await;
        run_event_loop(guard.terminal(), &mut self.app)?;

        info!("quiz closed");
        Ok(())
    }
}

fn run_event_loop(terminal: &mut AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.load_state() {
        LoadState::Loading => return false,
        LoadState::Failed(_) => return is_quit(key) || key == KeyCode::Esc,
        LoadState::Ready => {}
    }

    match app.session().screen() {
        Screen::Landing => handle_landing_input(app, key),
        Screen::CategorySelect => handle_category_select_input(app, key),
        Screen::CategoryView { .. } => handle_category_view_input(app, key),
        Screen::Active { editing: Some(_) } => handle_editor_input(app, key),
        Screen::Active { editing: None } => handle_quiz_input(app, key),
        Screen::Finished => handle_result_input(app, key),
    }
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_landing_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.view_by_category();
            false
        }
        _ => is_quit(key),
    }
}

fn handle_category_select_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_category(),
        KeyCode::Enter => app.open_category(),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        _ => return is_quit(key),
    }
    false
}

fn handle_category_view_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.scroll_category_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_category_down(),
        KeyCode::Esc | KeyCode::Backspace => app.back(),
        _ => return is_quit(key),
    }
    false
}

/// Option letters win over the command keys until the question is answered;
/// arrows, `F2` and `Esc` stay available for navigation, editing and quitting.
fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    app.clear_status();

    if let KeyCode::Char(c) = key {
        if app.offers_letter(c) {
            app.answer_with_key(c);
            return false;
        }
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Left | KeyCode::Char('h') => app.select_previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next_question(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.session().current_answer().is_answered {
                app.next_question();
            } else {
                app.submit_answer();
            }
        }
        KeyCode::Char('n') => app.next_question(),
        KeyCode::Char('e') | KeyCode::F(2) => app.begin_edit(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char(c) => app.answer_with_key(c),
        _ => {}
    }
    false
}

fn handle_editor_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => app.save_edit(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {
            let Some(draft) = app.draft_mut() else {
                return false;
            };
            match key {
                KeyCode::Tab | KeyCode::Down => draft.focus_next(),
                KeyCode::BackTab | KeyCode::Up => draft.focus_previous(),
                KeyCode::Left if draft.focus() == EditField::CorrectAnswer => {
                    draft.cycle_correct_answer(false)
                }
                KeyCode::Right if draft.focus() == EditField::CorrectAnswer => {
                    draft.cycle_correct_answer(true)
                }
                KeyCode::Char(c) => draft.push_char(c),
                KeyCode::Backspace => draft.pop_char(),
                _ => {}
            }
        }
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            app.start_quiz();
            false
        }
        _ => is_quit(key),
    }
}
