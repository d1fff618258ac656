use crate::errors::{LabError, LabResult};
use crate::models::domain::Question;
use crate::services::answer_normalizer::{find_option, is_answer_correct};
use crate::services::attempt_machine::{AttemptMachine, AttemptPhase};

/// Shown when the backend never supplied a correct answer for a question.
/// A recognized failure mode of the upstream data, not an error here.
pub const UNSPECIFIED_ANSWER: &str = "unspecified";

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionReview {
    pub question_id: String,
    pub prompt: String,
    pub chosen_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points: i32,
    pub points_earned: i32,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttemptReview {
    pub rows: Vec<QuestionReview>,
    pub score: f64,
    pub points_earned: i32,
    pub total_points: i32,
    pub time_taken_seconds: Option<i64>,
}

/// Builds the post-submission review: per-question correctness from the
/// graded exercise cross-referenced with the locally recorded answers, and
/// the aggregate figures the backend returned.
pub struct ReviewService;

impl ReviewService {
    pub fn build(machine: &AttemptMachine) -> LabResult<AttemptReview> {
        if machine.phase() != AttemptPhase::Completed {
            return Err(LabError::InvalidState(
                "results are only available for a completed attempt".to_string(),
            ));
        }
        let graded = machine.graded().ok_or_else(|| {
            LabError::InvalidState("completed attempt is missing grading data".to_string())
        })?;

        // Prefer the graded copy of the exercise: it is the one that carries
        // correct answers. Fall back to the pre-submission copy, whose
        // reviews will show unspecified correct answers.
        let exercise = graded.exercise.as_ref().unwrap_or_else(|| machine.exercise());

        let rows = exercise
            .questions
            .iter()
            .map(|question| Self::review_question(question, machine.answer_for(&question.id)))
            .collect();

        Ok(AttemptReview {
            rows,
            score: graded.score,
            points_earned: graded.points_earned,
            total_points: graded.total_points,
            time_taken_seconds: graded.time_taken_seconds,
        })
    }

    fn review_question(question: &Question, chosen_id: Option<&str>) -> QuestionReview {
        let chosen_answer = chosen_id.map(|id| {
            find_option(question, id)
                .map(|option| option.text.clone())
                .unwrap_or_else(|| id.to_string())
        });

        let correct_answer = if question.correct.is_empty() {
            UNSPECIFIED_ANSWER.to_string()
        } else {
            question
                .correct
                .iter()
                .map(|id| {
                    find_option(question, id)
                        .map(|option| option.text.clone())
                        .unwrap_or_else(|| id.clone())
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        let is_correct = chosen_id.is_some_and(|id| is_answer_correct(question, id));

        QuestionReview {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            chosen_answer,
            correct_answer,
            is_correct,
            points: question.points,
            points_earned: if is_correct { question.points } else { 0 },
            explanation: question.explanation.clone(),
        }
    }
}
