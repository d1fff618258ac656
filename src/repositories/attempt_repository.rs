use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::Config;
use crate::errors::{LabError, LabResult};
use crate::models::dto::{ApiEnvelope, AttemptDto, StartAttemptRequest, SubmitAttemptRequest};
use crate::repositories::{build_http_client, request_id};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Create the server-side attempt record. The payload is returned raw
    /// because the id field name is not guaranteed; callers probe it.
    async fn start(&self, request: &StartAttemptRequest) -> LabResult<Value>;

    /// Post the answer set for grading.
    async fn submit(
        &self,
        attempt_id: &str,
        request: &SubmitAttemptRequest,
    ) -> LabResult<AttemptDto>;

    /// Re-fetch one attempt; used when the submit response omits the nested
    /// exercise data.
    async fn fetch(&self, attempt_id: &str) -> LabResult<AttemptDto>;
}

pub struct HttpAttemptRepository {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpAttemptRepository {
    pub fn new(config: &Config) -> LabResult<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn start_url(&self) -> String {
        format!("{}/attempts/start", self.base_url)
    }

    fn submit_url(&self, attempt_id: &str) -> String {
        format!("{}/attempts/{}/submit", self.base_url, attempt_id)
    }

    fn attempt_url(&self, attempt_id: &str) -> String {
        format!("{}/attempts/{}", self.base_url, attempt_id)
    }
}

#[async_trait]
impl AttemptRepository for HttpAttemptRepository {
    async fn start(&self, request: &StartAttemptRequest) -> LabResult<Value> {
        let url = self.start_url();
        let request_id = request_id();
        log::info!(
            "[{}] POST {} ({} {})",
            request_id,
            url,
            request.attempt_type,
            request.exercise_id
        );

        let envelope: ApiEnvelope<Value> = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .header("X-Request-Id", &request_id)
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        envelope.into_data().map_err(LabError::Submit)
    }

    async fn submit(
        &self,
        attempt_id: &str,
        request: &SubmitAttemptRequest,
    ) -> LabResult<AttemptDto> {
        let url = self.submit_url(attempt_id);
        let request_id = request_id();
        log::info!(
            "[{}] POST {} ({} answers)",
            request_id,
            url,
            request.answers.len()
        );

        let envelope: ApiEnvelope<AttemptDto> = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .header("X-Request-Id", &request_id)
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        envelope.into_data().map_err(LabError::Submit)
    }

    async fn fetch(&self, attempt_id: &str) -> LabResult<AttemptDto> {
        let url = self.attempt_url(attempt_id);
        let request_id = request_id();
        log::info!("[{}] GET {}", request_id, url);

        let envelope: ApiEnvelope<AttemptDto> = self
            .http
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .header("X-Request-Id", &request_id)
            .send()
            .await?
            .json()
            .await?;

        envelope.into_data().map_err(LabError::Submit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_urls() {
        let repository = HttpAttemptRepository::new(&Config::test_config()).unwrap();

        assert_eq!(
            repository.start_url(),
            "http://127.0.0.1:8000/api/attempts/start"
        );
        assert_eq!(
            repository.submit_url("a-1"),
            "http://127.0.0.1:8000/api/attempts/a-1/submit"
        );
        assert_eq!(
            repository.attempt_url("a-1"),
            "http://127.0.0.1:8000/api/attempts/a-1"
        );
    }
}
