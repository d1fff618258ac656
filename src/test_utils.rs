#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::models::domain::{
        AnswerOption, Exercise, ExerciseType, GradedAttempt, Question, QuestionType,
    };

    fn option(id: &str, label: &str, text: &str) -> AnswerOption {
        AnswerOption {
            id: id.to_string(),
            label: label.to_string(),
            text: text.to_string(),
            value: id.to_string(),
        }
    }

    /// A freshly loaded exercise: one multiple-choice and one true/false
    /// question, correct answers not yet revealed by the backend.
    pub fn two_question_exercise() -> Exercise {
        Exercise {
            id: "ex-1".to_string(),
            title: "Capital cities".to_string(),
            exercise_type: ExerciseType::LessonExercise,
            time_limit_seconds: None,
            questions: vec![
                Question {
                    id: "q-1".to_string(),
                    prompt: "Capital of the UK?".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    points: 2,
                    options: vec![
                        option("a", "A", "Paris"),
                        option("b", "B", "London"),
                        option("c", "C", "Rome"),
                    ],
                    correct: vec![],
                    explanation: None,
                },
                Question {
                    id: "q-2".to_string(),
                    prompt: "London is in the UK.".to_string(),
                    question_type: QuestionType::TrueFalse,
                    points: 1,
                    options: vec![option("true", "A", "True"), option("false", "B", "False")],
                    correct: vec![],
                    explanation: Some("It is the capital.".to_string()),
                },
            ],
        }
    }

    /// The same exercise as the grading endpoint returns it, with correct
    /// answers populated.
    pub fn graded_exercise() -> Exercise {
        let mut exercise = two_question_exercise();
        exercise.questions[0].correct = vec!["b".to_string()];
        exercise.questions[1].correct = vec!["true".to_string()];
        exercise
    }

    pub fn graded_attempt(id: &str) -> GradedAttempt {
        GradedAttempt {
            id: id.to_string(),
            score: 100.0,
            points_earned: 3,
            total_points: 3,
            time_taken_seconds: Some(42),
            exercise: Some(graded_exercise()),
            submitted_at: Some(Utc::now()),
        }
    }

    /// Wire-shaped graded exercise, for mocked repository responses.
    pub fn graded_exercise_payload() -> Value {
        json!({
            "id": "ex-1",
            "title": "Capital cities",
            "questions": [
                {
                    "id": "q-1",
                    "prompt": "Capital of the UK?",
                    "question_type": "multiple_choice",
                    "points": 2,
                    "options": [
                        {"id": "a", "label": "A", "text": "Paris"},
                        {"id": "b", "label": "B", "text": "London"},
                        {"id": "c", "label": "C", "text": "Rome"},
                    ],
                    "correct_answer": ["b"],
                },
                {
                    "id": "q-2",
                    "prompt": "London is in the UK.",
                    "question_type": "true_false",
                    "points": 1,
                    "correct_answer": true,
                    "explanation": "It is the capital.",
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_exercise_shape() {
        let exercise = two_question_exercise();
        assert_eq!(exercise.questions.len(), 2);
        assert_eq!(exercise.total_points(), 3);
        assert!(exercise.questions.iter().all(|q| q.correct.is_empty()));
    }

    #[test]
    fn test_graded_fixture_reveals_correct_answers() {
        let exercise = graded_exercise();
        assert_eq!(exercise.questions[0].correct, vec!["b".to_string()]);
        assert_eq!(exercise.questions[1].correct, vec!["true".to_string()]);
    }
}
