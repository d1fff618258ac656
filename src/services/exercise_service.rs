use std::sync::Arc;

use crate::errors::{LabError, LabResult};
use crate::models::domain::{Exercise, ExerciseType};
use crate::repositories::ExerciseRepository;
use crate::services::answer_normalizer::normalize_exercise;

/// Loads one exercise definition and normalizes it into the domain form.
/// Any failure surfaces as a load error ("exercise not found" class); there
/// is no retry.
pub struct ExerciseService {
    repository: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    pub fn new(repository: Arc<dyn ExerciseRepository>) -> Self {
        Self { repository }
    }

    pub async fn load(
        &self,
        exercise_type: ExerciseType,
        lab_id: &str,
        exercise_id: &str,
    ) -> LabResult<Exercise> {
        let dto = self
            .repository
            .fetch(exercise_type, lab_id, exercise_id)
            .await
            .map_err(|err| match err {
                LabError::Load(message) => LabError::Load(message),
                other => LabError::Load(other.to_string()),
            })?;

        let exercise = normalize_exercise(&dto, exercise_type, exercise_id);
        log::info!(
            "loaded {} '{}' with {} questions",
            exercise_type.attempt_type(),
            exercise.id,
            exercise.questions.len()
        );
        Ok(exercise)
    }
}
