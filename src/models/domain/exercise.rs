use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

/// One loaded exercise or exam definition. Immutable for the lifetime of an
/// attempt; the grading pass produces a fresh copy with correct answers
/// populated rather than mutating this one.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub exercise_type: ExerciseType,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_seconds: Option<u32>,
}

impl Exercise {
    pub fn total_points(&self) -> i32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// The six assessment kinds the backend exposes, each behind its own
/// endpoint and carrying its own attempt-type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    LessonExercise,
    LessonExam,
    UnitExercise,
    UnitExam,
    CourseExam,
    CourseReviewExercise,
}

impl ExerciseType {
    /// URL path segment for the GET-by-id endpoint of this kind.
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            ExerciseType::LessonExercise => "lesson-exercises",
            ExerciseType::LessonExam => "lesson-exams",
            ExerciseType::UnitExercise => "unit-exercises",
            ExerciseType::UnitExam => "unit-exams",
            ExerciseType::CourseExam => "course-exams",
            ExerciseType::CourseReviewExercise => "course-review-exercises",
        }
    }

    /// Tag sent in the start-attempt body.
    pub fn attempt_type(&self) -> &'static str {
        match self {
            ExerciseType::LessonExercise => "lesson_exercise",
            ExerciseType::LessonExam => "lesson_exam",
            ExerciseType::UnitExercise => "unit_exercise",
            ExerciseType::UnitExam => "unit_exam",
            ExerciseType::CourseExam => "course_exam",
            ExerciseType::CourseReviewExercise => "course_review_exercise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().replace('-', "_").to_lowercase().as_str() {
            "lesson_exercise" => Some(ExerciseType::LessonExercise),
            "lesson_exam" => Some(ExerciseType::LessonExam),
            "unit_exercise" => Some(ExerciseType::UnitExercise),
            "unit_exam" => Some(ExerciseType::UnitExam),
            "course_exam" => Some(ExerciseType::CourseExam),
            "course_review_exercise" => Some(ExerciseType::CourseReviewExercise),
            _ => None,
        }
    }

    pub const ALL: [ExerciseType; 6] = [
        ExerciseType::LessonExercise,
        ExerciseType::LessonExam,
        ExerciseType::UnitExercise,
        ExerciseType::UnitExam,
        ExerciseType::CourseExam,
        ExerciseType::CourseReviewExercise,
    ];
}
