use std::collections::{BTreeSet, HashSet};

use crate::models::Question;

use super::LoadError;

/// Parse a question list from JSON and check it against the bank rules.
///
/// The returned list is sorted by id.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let mut questions: Vec<Question> = serde_json::from_str(json)?;
    validate_questions(&questions)?;
    sort_by_id(&mut questions);
    Ok(questions)
}

/// Reject banks with duplicate ids or options that cannot be answered.
pub fn validate_questions(questions: &[Question]) -> Result<(), LoadError> {
    let mut ids = HashSet::with_capacity(questions.len());

    for question in questions {
        if !ids.insert(question.id) {
            return Err(LoadError::Invalid(format!(
                "duplicate question id {}",
                question.id
            )));
        }

        if question.options.is_empty() {
            return Err(LoadError::Invalid(format!(
                "question {} has no options",
                question.id
            )));
        }

        let mut letters = HashSet::with_capacity(question.options.len());
        for option in &question.options {
            if !letters.insert(option.letter.as_str()) {
                return Err(LoadError::Invalid(format!(
                    "question {} repeats option letter {:?}",
                    question.id, option.letter
                )));
            }
        }

        if !letters.contains(question.correct_answer.as_str()) {
            return Err(LoadError::Invalid(format!(
                "question {} has correct answer {:?} which is not an option",
                question.id, question.correct_answer
            )));
        }
    }

    Ok(())
}

pub fn sort_by_id(questions: &mut [Question]) {
    questions.sort_by_key(|question| question.id);
}

/// Sorted, deduplicated category prefixes of the given questions.
pub fn derive_categories(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .map(|question| question.category())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{AnswerOption, Question};

    /// A question with options `a`, `b`, `c`.
    pub fn question(id: u32, code: &str, correct: &str) -> Question {
        Question {
            id,
            code: code.to_string(),
            text: format!("Question {}", id),
            options: vec![
                AnswerOption::new("a", "first"),
                AnswerOption::new("b", "second"),
                AnswerOption::new("c", "third"),
            ],
            correct_answer: correct.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::question;
    use super::*;

    #[test]
    fn test_derive_categories() {
        let questions = vec![
            question(1, "A-1", "a"),
            question(2, "A-2", "a"),
            question(3, "B-1", "a"),
        ];
        assert_eq!(derive_categories(&questions), vec!["A", "B"]);
    }

    #[test]
    fn test_derive_categories_sorts_prefixes() {
        let questions = vec![
            question(1, "MET-1", "a"),
            question(2, "LAW-4", "a"),
            question(3, "MET-2", "a"),
            question(4, "AGK-9", "a"),
        ];
        assert_eq!(derive_categories(&questions), vec!["AGK", "LAW", "MET"]);
    }

    #[test]
    fn test_parse_sorts_by_id() {
        let questions = vec![question(3, "A-3", "a"), question(1, "A-1", "b")];
        let json = serde_json::to_string(&questions).unwrap();

        let parsed = parse_questions(&json).unwrap();
        let ids: Vec<u32> = parsed.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_questions("{\"id\": 1}"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let questions = vec![question(1, "A-1", "a"), question(1, "A-2", "a")];
        let err = validate_questions(&questions).unwrap_err();
        assert!(err.to_string().contains("duplicate question id 1"));
    }

    #[test]
    fn test_rejects_unanswerable_questions() {
        let mut no_options = question(1, "A-1", "a");
        no_options.options.clear();
        assert!(validate_questions(&[no_options]).is_err());

        let mut repeated = question(2, "A-2", "a");
        repeated.options[1].letter = "a".to_string();
        assert!(validate_questions(&[repeated]).is_err());

        let wrong_key = question(3, "A-3", "z");
        assert!(validate_questions(&[wrong_key]).is_err());
    }

    #[test]
    fn test_empty_bank_is_valid() {
        assert!(parse_questions("[]").unwrap().is_empty());
    }
}
