use std::sync::Arc;

use crate::{
    config::Config,
    errors::LabResult,
    models::domain::{Exercise, ExerciseType},
    repositories::{AttemptRepository, HttpAttemptRepository, HttpExerciseRepository},
    services::{AttemptController, ExerciseService},
};

/// Wires config and HTTP repositories into the services one attempt needs.
#[derive(Clone)]
pub struct LabClient {
    exercise_service: Arc<ExerciseService>,
    attempts: Arc<dyn AttemptRepository>,
    config: Arc<Config>,
}

impl LabClient {
    pub fn new(config: Config) -> LabResult<Self> {
        let exercises = Arc::new(HttpExerciseRepository::new(&config)?);
        let attempts: Arc<dyn AttemptRepository> = Arc::new(HttpAttemptRepository::new(&config)?);

        Ok(Self {
            exercise_service: Arc::new(ExerciseService::new(exercises)),
            attempts,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn load_exercise(
        &self,
        exercise_type: ExerciseType,
        exercise_id: &str,
    ) -> LabResult<Exercise> {
        self.exercise_service
            .load(exercise_type, &self.config.knowledge_lab_id, exercise_id)
            .await
    }

    /// A controller for one attempt at the given exercise.
    pub fn attempt(&self, exercise: Exercise) -> AttemptController {
        AttemptController::new(
            self.attempts.clone(),
            exercise,
            &self.config.knowledge_lab_id,
        )
    }
}
