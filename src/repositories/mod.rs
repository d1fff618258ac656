pub mod attempt_repository;
pub mod exercise_repository;

pub use attempt_repository::{AttemptRepository, HttpAttemptRepository};
pub use exercise_repository::{ExerciseRepository, HttpExerciseRepository};

use std::time::Duration;

use crate::config::Config;
use crate::errors::LabResult;

/// One shared client configuration for both repositories. No retry layer by
/// design: recovery is user-initiated everywhere in this workflow.
pub(crate) fn build_http_client(config: &Config) -> LabResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()?;
    Ok(client)
}

/// Correlation id attached to every outgoing request and its log line.
pub(crate) fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
