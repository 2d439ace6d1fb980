mod question;

pub use question::{category_of, AnswerOption, Question, UserAnswer, CATEGORY_SEPARATOR};
