use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::errors::LabResult;
use crate::models::domain::ExerciseType;
use crate::models::dto::{ApiEnvelope, ExerciseDto};
use crate::repositories::{build_http_client, request_id};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Fetch one exercise definition. The exercise type selects which of the
    /// six endpoints is hit.
    async fn fetch(
        &self,
        exercise_type: ExerciseType,
        lab_id: &str,
        exercise_id: &str,
    ) -> LabResult<ExerciseDto>;
}

pub struct HttpExerciseRepository {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpExerciseRepository {
    pub fn new(config: &Config) -> LabResult<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }
}

pub fn exercise_url(
    base_url: &str,
    exercise_type: ExerciseType,
    lab_id: &str,
    exercise_id: &str,
) -> String {
    format!(
        "{}/knowledge-labs/{}/{}/{}",
        base_url,
        lab_id,
        exercise_type.endpoint_segment(),
        exercise_id
    )
}

#[async_trait]
impl ExerciseRepository for HttpExerciseRepository {
    async fn fetch(
        &self,
        exercise_type: ExerciseType,
        lab_id: &str,
        exercise_id: &str,
    ) -> LabResult<ExerciseDto> {
        let url = exercise_url(&self.base_url, exercise_type, lab_id, exercise_id);
        let request_id = request_id();
        log::info!("[{}] GET {}", request_id, url);

        let envelope: ApiEnvelope<ExerciseDto> = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .header("X-Request-Id", &request_id)
            .send()
            .await?
            .json()
            .await?;

        envelope
            .into_data()
            .map_err(crate::errors::LabError::Load)
    }
}
