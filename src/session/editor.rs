//! Working copy of a question while it is being edited.

use crate::models::Question;

/// The form field that receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Text,
    Option(usize),
    CorrectAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    question: Question,
    focus: EditField,
}

impl EditDraft {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            focus: EditField::Text,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn id(&self) -> u32 {
        self.question.id
    }

    pub fn focus(&self) -> EditField {
        self.focus
    }

    /// Move focus down the form, wrapping after the correct-answer field.
    pub fn focus_next(&mut self) {
        let count = self.question.options.len();
        self.focus = match self.focus {
            EditField::Text if count > 0 => EditField::Option(0),
            EditField::Text => EditField::CorrectAnswer,
            EditField::Option(i) if i + 1 < count => EditField::Option(i + 1),
            EditField::Option(_) => EditField::CorrectAnswer,
            EditField::CorrectAnswer => EditField::Text,
        };
    }

    pub fn focus_previous(&mut self) {
        let count = self.question.options.len();
        self.focus = match self.focus {
            EditField::Text => EditField::CorrectAnswer,
            EditField::Option(0) => EditField::Text,
            EditField::Option(i) => EditField::Option(i - 1),
            EditField::CorrectAnswer if count > 0 => EditField::Option(count - 1),
            EditField::CorrectAnswer => EditField::Text,
        };
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Step the correct answer through the option letters.
    pub fn cycle_correct_answer(&mut self, forward: bool) {
        let letters: Vec<&str> = self
            .question
            .options
            .iter()
            .map(|option| option.letter.as_str())
            .collect();
        if letters.is_empty() {
            return;
        }

        let current = letters
            .iter()
            .position(|letter| *letter == self.question.correct_answer)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % letters.len()
        } else {
            (current + letters.len() - 1) % letters.len()
        };
        self.question.correct_answer = letters[next].to_string();
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EditField::Text => Some(&mut self.question.text),
            EditField::Option(i) => self.question.options.get_mut(i).map(|o| &mut o.text),
            EditField::CorrectAnswer => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::question;

    #[test]
    fn test_focus_cycles_through_form() {
        let mut draft = EditDraft::new(question(1, "A-1", "a"));
        let mut seen = vec![draft.focus()];
        for _ in 0..5 {
            draft.focus_next();
            seen.push(draft.focus());
        }

        assert_eq!(
            seen,
            vec![
                EditField::Text,
                EditField::Option(0),
                EditField::Option(1),
                EditField::Option(2),
                EditField::CorrectAnswer,
                EditField::Text,
            ]
        );

        draft.focus_previous();
        assert_eq!(draft.focus(), EditField::CorrectAnswer);
        draft.focus_previous();
        assert_eq!(draft.focus(), EditField::Option(2));
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut draft = EditDraft::new(question(1, "A-1", "a"));
        draft.pop_char();
        draft.push_char('!');
        assert_eq!(draft.question().text, "Question !");

        draft.focus_next();
        draft.focus_next();
        draft.push_char('?');
        assert_eq!(draft.question().options[1].text, "second?");
        assert_eq!(draft.question().options[1].letter, "b");
    }

    #[test]
    fn test_correct_answer_cycles_letters() {
        let mut draft = EditDraft::new(question(1, "A-1", "c"));
        draft.cycle_correct_answer(true);
        assert_eq!(draft.question().correct_answer, "a");
        draft.cycle_correct_answer(false);
        draft.cycle_correct_answer(false);
        assert_eq!(draft.question().correct_answer, "b");
    }

    #[test]
    fn test_typing_ignored_on_correct_answer_field() {
        let mut draft = EditDraft::new(question(1, "A-1", "a"));
        draft.focus_previous();
        draft.push_char('x');
        assert_eq!(draft.question(), &question(1, "A-1", "a"));
    }
}
