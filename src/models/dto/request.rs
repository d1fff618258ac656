use serde::Serialize;
use validator::Validate;

use crate::models::domain::ExerciseType;

/// Body of POST start-attempt.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct StartAttemptRequest {
    #[validate(length(min = 1))]
    pub knowledge_lab: String,

    #[validate(length(min = 1))]
    pub attempt_type: String,

    #[validate(length(min = 1))]
    pub exercise_type: String,

    #[validate(length(min = 1))]
    pub exercise_id: String,
}

impl StartAttemptRequest {
    pub fn new(knowledge_lab: &str, exercise_type: ExerciseType, exercise_id: &str) -> Self {
        StartAttemptRequest {
            knowledge_lab: knowledge_lab.to_string(),
            attempt_type: exercise_type.attempt_type().to_string(),
            exercise_type: exercise_type.attempt_type().to_string(),
            exercise_id: exercise_id.to_string(),
        }
    }
}

/// One answered question in the submit body. `selected_answer` is a list on
/// the wire even though selection is single-answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct QuestionAnswerInput {
    #[validate(length(min = 1))]
    pub question_id: String,

    #[validate(length(min = 1))]
    pub selected_answer: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(nested)]
    pub answers: Vec<QuestionAnswerInput>,
}
