//! Quiz session state machine.
//!
//! All state changes go through [`Session::dispatch`]. Events that make no
//! sense for the current screen are ignored, so every transition can be
//! driven and checked without a terminal.

mod editor;

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Question, UserAnswer};

pub use editor::{EditDraft, EditField};

/// Which screen the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Landing,
    CategorySelect,
    /// Read-only list of one category's questions.
    CategoryView { category: String },
    /// Taking the quiz; `editing` overlays the current question with a form.
    Active { editing: Option<EditDraft> },
    Finished,
}

impl Screen {
    fn active() -> Self {
        Self::Active { editing: None }
    }
}

/// A user action fed to [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    ViewByCategory,
    SelectCategory(String),
    BackToLanding,
    BackToCategories,
    Answer(String),
    SelectQuestion(usize),
    Next,
    Edit(u32),
    Save(Question),
    CancelEdit,
}

/// Selection state of the question currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerState<'a> {
    pub selected: Option<&'a str>,
    pub is_answered: bool,
}

/// Final score of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

impl QuizResult {
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            (score as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            score,
            total,
            percentage,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.percentage {
            80.. => "Excellent!",
            60..=79 => "Good Job!",
            _ => "Keep Practicing!",
        }
    }
}

pub struct Session {
    screen: Screen,
    all_questions: Vec<Question>,
    active_questions: Vec<Question>,
    current_index: usize,
    score: usize,
    answers: HashMap<u32, UserAnswer>,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            screen: Screen::Landing,
            all_questions: questions,
            active_questions: Vec::new(),
            current_index: 0,
            score: 0,
            answers: HashMap::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn all_questions(&self) -> &[Question] {
        &self.all_questions
    }

    pub fn active_questions(&self) -> &[Question] {
        &self.active_questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &HashMap<u32, UserAnswer> {
        &self.answers
    }

    pub fn answer_for(&self, id: u32) -> Option<&UserAnswer> {
        self.answers.get(&id)
    }

    pub fn selected_category(&self) -> Option<&str> {
        match &self.screen {
            Screen::CategoryView { category } => Some(category),
            _ => None,
        }
    }

    /// Questions of the selected category, in bank order.
    pub fn category_questions(&self) -> Vec<&Question> {
        let Some(category) = self.selected_category() else {
            return Vec::new();
        };
        self.all_questions
            .iter()
            .filter(|question| question.category() == category)
            .collect()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.active_questions.get(self.current_index)
    }

    pub fn current_answer(&self) -> AnswerState<'_> {
        let answer = self
            .current_question()
            .and_then(|question| self.answers.get(&question.id));
        AnswerState {
            selected: answer.map(|a| a.selected.as_str()),
            is_answered: answer.is_some(),
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.active_questions.len()
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        match &self.screen {
            Screen::Active { editing } => editing.as_ref(),
            _ => None,
        }
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        match &mut self.screen {
            Screen::Active { editing } => editing.as_mut(),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    pub fn result(&self) -> QuizResult {
        QuizResult::new(self.score, self.active_questions.len())
    }

    /// Apply one event to the session.
    pub fn dispatch(&mut self, event: Event) {
        debug!(?event, screen = ?self.screen, "dispatch");

        match event {
            Event::Start => self.start(),
            Event::ViewByCategory => {
                if self.screen == Screen::Landing && !self.all_questions.is_empty() {
                    self.screen = Screen::CategorySelect;
                }
            }
            Event::SelectCategory(category) => {
                if self.screen == Screen::CategorySelect {
                    self.screen = Screen::CategoryView { category };
                }
            }
            Event::BackToLanding => {
                if self.screen == Screen::CategorySelect {
                    self.screen = Screen::Landing;
                }
            }
            Event::BackToCategories => {
                if matches!(self.screen, Screen::CategoryView { .. }) {
                    self.screen = Screen::CategorySelect;
                }
            }
            Event::Answer(letter) => self.answer(letter),
            Event::SelectQuestion(index) => {
                if matches!(self.screen, Screen::Active { .. })
                    && index < self.active_questions.len()
                {
                    self.current_index = index;
                }
            }
            Event::Next => self.next(),
            Event::Edit(id) => self.edit(id),
            Event::Save(question) => self.save(question),
            Event::CancelEdit => {
                if let Screen::Active { editing } = &mut self.screen {
                    *editing = None;
                }
            }
        }
    }

    fn start(&mut self) {
        if !matches!(self.screen, Screen::Landing | Screen::Finished)
            || self.all_questions.is_empty()
        {
            return;
        }

        self.active_questions = self.all_questions.clone();
        self.current_index = 0;
        self.score = 0;
        self.answers.clear();
        self.screen = Screen::active();
    }

    fn answer(&mut self, letter: String) {
        if self.screen != Screen::active() {
            return;
        }
        let Some(question) = self.active_questions.get(self.current_index) else {
            return;
        };
        if self.answers.contains_key(&question.id) || !question.has_option(&letter) {
            return;
        }

        let is_correct = question.is_correct(&letter);
        self.answers.insert(
            question.id,
            UserAnswer {
                selected: letter,
                is_correct,
            },
        );
        if is_correct {
            self.score += 1;
        }
    }

    fn next(&mut self) {
        if self.screen != Screen::active() {
            return;
        }

        if self.current_index + 1 < self.active_questions.len() {
            self.current_index += 1;
        } else {
            self.screen = Screen::Finished;
        }
    }

    fn edit(&mut self, id: u32) {
        let Screen::Active { editing } = &mut self.screen else {
            return;
        };
        if let Some(question) = self.all_questions.iter().find(|q| q.id == id) {
            *editing = Some(EditDraft::new(question.clone()));
        }
    }

    fn save(&mut self, question: Question) {
        let Screen::Active { editing } = &mut self.screen else {
            return;
        };
        if editing.is_none() {
            return;
        }

        for list in [&mut self.all_questions, &mut self.active_questions] {
            if let Some(slot) = list.iter_mut().find(|q| q.id == question.id) {
                *slot = question.clone();
            }
        }
        *editing = None;
    }
}
