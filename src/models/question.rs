use serde::{Deserialize, Serialize};

/// Separator between a question's category and its running number in `code`.
pub const CATEGORY_SEPARATOR: char = '-';

/// A single lettered answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new(letter: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            text: text.into(),
        }
    }
}

/// A multiple-choice question as stored in the question bank.
///
/// The serialized field names match the JSON document the bank is shipped
/// as, so the same shape is used for the remote source and local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub code: String,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_answer: String,
}

impl Question {
    /// The part of `code` before the first separator, e.g. `"BR"` for `"BR-12"`.
    pub fn category(&self) -> &str {
        category_of(&self.code)
    }

    pub fn option(&self, letter: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.letter == letter)
    }

    pub fn has_option(&self, letter: &str) -> bool {
        self.option(letter).is_some()
    }

    pub fn is_correct(&self, letter: &str) -> bool {
        self.correct_answer == letter
    }
}

pub fn category_of(code: &str) -> &str {
    code.split(CATEGORY_SEPARATOR).next().unwrap_or(code)
}

/// The answer a user gave to one question during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAnswer {
    pub selected: String,
    pub is_correct: bool,
}
