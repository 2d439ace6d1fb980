use tracing::{error, info};

use crate::data::QuestionStore;
use crate::models::Question;
use crate::session::{EditDraft, Event, Screen, Session};

/// Shown instead of the quiz when the question bank cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load quiz questions. Please try again later.";

/// Whether the question bank is available yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// The running application: quiz session, question bank and cursor state
/// of the terminal views.
pub struct App {
    session: Session,
    store: QuestionStore,
    load_state: LoadState,
    option_cursor: usize,
    category_cursor: usize,
    category_scroll: usize,
    status: Option<String>,
}

impl App {
    pub fn new(store: QuestionStore) -> Self {
        Self {
            session: Session::new(Vec::new()),
            store,
            load_state: LoadState::Loading,
            option_cursor: 0,
            category_cursor: 0,
            category_scroll: 0,
            status: None,
        }
    }

    /// Load the question bank and open the landing screen.
    pub async fn load(&mut self) {
        match self.store.load().await {
            Ok(questions) => {
                info!(count = questions.len(), "question bank ready");
                self.session = Session::new(questions.to_vec());
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                error!(error = %e, "failed to load question bank");
                self.load_state = LoadState::Failed(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn categories(&self) -> &[String] {
        self.store.categories()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn category_scroll(&self) -> usize {
        self.category_scroll
    }

    pub fn start_quiz(&mut self) {
        self.status = None;
        self.session.dispatch(Event::Start);
        self.sync_cursors();
    }

    pub fn view_by_category(&mut self) {
        self.session.dispatch(Event::ViewByCategory);
        self.category_cursor = 0;
    }

    pub fn select_next_category(&mut self) {
        let count = self.categories().len();
        if count > 0 {
            self.category_cursor = (self.category_cursor + 1) % count;
        }
    }

    pub fn select_previous_category(&mut self) {
        let count = self.categories().len();
        if count > 0 {
            self.category_cursor = (self.category_cursor + count - 1) % count;
        }
    }

    pub fn open_category(&mut self) {
        if let Some(category) = self.categories().get(self.category_cursor).cloned() {
            self.session.dispatch(Event::SelectCategory(category));
            self.category_scroll = 0;
        }
    }

    pub fn back(&mut self) {
        match self.session.screen() {
            Screen::CategorySelect => self.session.dispatch(Event::BackToLanding),
            Screen::CategoryView { .. } => self.session.dispatch(Event::BackToCategories),
            _ => {}
        }
    }

    pub fn scroll_category_down(&mut self) {
        let max_scroll = self.session.category_questions().len().saturating_sub(1);
        self.category_scroll = (self.category_scroll + 1).min(max_scroll);
    }

    pub fn scroll_category_up(&mut self) {
        self.category_scroll = self.category_scroll.saturating_sub(1);
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    /// Answer with the option under the cursor.
    pub fn submit_answer(&mut self) {
        let letter = self
            .session
            .current_question()
            .and_then(|q| q.options.get(self.option_cursor))
            .map(|option| option.letter.clone());

        if let Some(letter) = letter {
            self.session.dispatch(Event::Answer(letter));
        }
    }

    /// Whether `key` would answer the current, still unanswered question.
    pub fn offers_letter(&self, key: char) -> bool {
        if self.session.current_answer().is_answered {
            return false;
        }
        self.session.current_question().is_some_and(|question| {
            question
                .options
                .iter()
                .any(|option| option.letter.eq_ignore_ascii_case(&key.to_string()))
        })
    }

    /// Answer with the option whose letter matches the typed key.
    pub fn answer_with_key(&mut self, key: char) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let found = question
            .options
            .iter()
            .position(|option| option.letter.eq_ignore_ascii_case(&key.to_string()));

        if let Some(index) = found {
            self.option_cursor = index;
            let letter = question.options[index].letter.clone();
            self.session.dispatch(Event::Answer(letter));
        }
    }

    /// Advance once the current question has been answered.
    pub fn next_question(&mut self) {
        if self.session.current_answer().is_answered {
            self.session.dispatch(Event::Next);
            self.sync_cursors();
        }
    }

    pub fn select_question(&mut self, index: usize) {
        self.session.dispatch(Event::SelectQuestion(index));
        self.sync_cursors();
    }

    /// Step through the question list without answering.
    pub fn select_next_question(&mut self) {
        self.select_question(self.session.current_index() + 1);
    }

    pub fn select_previous_question(&mut self) {
        if let Some(index) = self.session.current_index().checked_sub(1) {
            self.select_question(index);
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(id) = self.session.current_question().map(|q| q.id) {
            self.status = None;
            self.session.dispatch(Event::Edit(id));
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.session.editing_mut()
    }

    /// Persist the draft, then apply it to the session.
    ///
    /// When the write fails the form stays open so nothing typed is lost.
    pub fn save_edit(&mut self) {
        let Some(question) = self.session.editing().map(|d| d.question().clone()) else {
            return;
        };

        match self.store.update(question.clone()) {
            Ok(_) => {
                self.apply_saved(question);
                self.status = Some("Changes saved.".to_string());
            }
            Err(e) => {
                error!(error = %e, "failed to persist question edit");
                self.status = Some(format!("Could not save changes: {}", e));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.dispatch(Event::CancelEdit);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    fn apply_saved(&mut self, question: Question) {
        self.session.dispatch(Event::Save(question));
        self.sync_cursors();
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.options.len())
    }

    /// Put the option cursor on the recorded answer, or the first option.
    fn sync_cursors(&mut self) {
        let answer = self.session.current_answer();
        self.option_cursor = match (self.session.current_question(), answer.selected) {
            (Some(question), Some(selected)) => question
                .options
                .iter()
                .position(|option| option.letter == selected)
                .unwrap_or(0),
            _ => 0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::question;
    use crate::data::{KeyValueStore, LoadError, MemoryStore, QuestionSource, StorageError};

    use async_trait::async_trait;

    struct BankSource(Vec<Question>);

    #[async_trait]
    impl QuestionSource for BankSource {
        async fn fetch(&self) -> Result<String, LoadError> {
            Ok(serde_json::to_string(&self.0).unwrap())
        }

        fn describe(&self) -> String {
            "bank".to_string()
        }
    }

    struct Unreachable;

    #[async_trait]
    impl QuestionSource for Unreachable {
        async fn fetch(&self) -> Result<String, LoadError> {
            Err(LoadError::Fetch("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "unreachable".to_string()
        }
    }

    /// Accepts the initial seed, then refuses every write.
    #[derive(Default)]
    struct ReadOnlyAfterSeed {
        inner: MemoryStore,
        seeded: bool,
    }

    impl KeyValueStore for ReadOnlyAfterSeed {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
            if self.seeded {
                return Err(std::io::Error::other("disk full").into());
            }
            self.seeded = true;
            self.inner.set(key, value)
        }
    }

    async fn loaded_app() -> App {
        let bank = vec![question(1, "A-1", "b"), question(2, "B-1", "a")];
        let mut app = App::new(QuestionStore::new(MemoryStore::new(), BankSource(bank)));
        app.load().await;
        app
    }

    #[tokio::test]
    async fn test_load_failure_shows_static_message() {
        let mut app = App::new(QuestionStore::new(MemoryStore::new(), Unreachable));
        app.load().await;

        assert_eq!(
            app.load_state(),
            &LoadState::Failed(LOAD_ERROR_MESSAGE.to_string())
        );
        assert!(app.session().all_questions().is_empty());
    }

    #[tokio::test]
    async fn test_cursor_answers_and_restores_on_revisit() {
        let mut app = loaded_app().await;
        assert_eq!(app.load_state(), &LoadState::Ready);
        app.start_quiz();

        app.select_next_option();
        app.select_next_option();
        app.submit_answer();
        assert_eq!(app.session().answer_for(1).unwrap().selected, "c");

        app.next_question();
        assert_eq!(app.option_cursor(), 0);
        assert_eq!(app.session().current_index(), 1);

        app.select_previous_question();
        assert_eq!(app.option_cursor(), 2);
        assert!(app.session().current_answer().is_answered);
    }

    #[tokio::test]
    async fn test_next_requires_an_answer() {
        let mut app = loaded_app().await;
        app.start_quiz();

        app.next_question();
        assert_eq!(app.session().current_index(), 0);

        app.answer_with_key('B');
        assert_eq!(app.session().score(), 1);
        app.next_question();
        assert_eq!(app.session().current_index(), 1);
    }

    #[tokio::test]
    async fn test_save_edit_persists_and_updates_session() {
        let mut app = loaded_app().await;
        app.start_quiz();
        app.begin_edit();
        app.draft_mut().unwrap().push_char('?');
        app.save_edit();

        assert!(!app.session().is_editing());
        assert_eq!(app.session().active_questions()[0].text, "Question 1?");
        assert_eq!(app.status(), Some("Changes saved."));
        assert_eq!(app.store.questions()[0].text, "Question 1?");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_open() {
        let bank = vec![question(1, "A-1", "b")];
        let mut app = App::new(QuestionStore::new(
            ReadOnlyAfterSeed::default(),
            BankSource(bank),
        ));
        app.load().await;
        app.start_quiz();
        app.begin_edit();
        app.draft_mut().unwrap().push_char('?');
        app.save_edit();

        assert!(app.session().is_editing());
        assert_eq!(app.session().all_questions()[0].text, "Question 1");
        assert!(app.status().unwrap().starts_with("Could not save changes"));
        assert_eq!(app.store.questions()[0].text, "Question 1");
    }

    #[tokio::test]
    async fn test_category_browsing() {
        let mut app = loaded_app().await;
        app.view_by_category();
        app.select_next_category();
        app.open_category();
        assert_eq!(app.session().selected_category(), Some("B"));

        app.back();
        assert_eq!(app.session().screen(), &Screen::CategorySelect);
        app.back();
        assert_eq!(app.session().screen(), &Screen::Landing);
    }
}
