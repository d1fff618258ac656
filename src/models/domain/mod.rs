pub mod attempt;
pub mod exercise;
pub mod question;

pub use attempt::GradedAttempt;
pub use exercise::{Exercise, ExerciseType};
pub use question::{AnswerOption, Question, QuestionType};
