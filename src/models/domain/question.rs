use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub options: Vec<AnswerOption>,
    /// Canonical correct option ids. Empty when the backend omitted the
    /// correct answer, which it does for unsubmitted attempts and sometimes
    /// for graded ones as well.
    pub correct: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn has_correct_answer(&self) -> bool {
        !self.correct.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

/// One selectable option. For true/false questions the two options are
/// synthesized client-side with ids "true" and "false"; the backend does not
/// send options for those.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    pub text: String,
    pub value: String,
}
