use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: SecretString,
    pub knowledge_lab_id: String,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("LAB_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            api_token: SecretString::from(
                env::var("LAB_API_TOKEN").unwrap_or_else(|_| "dev_token".to_string()),
            ),
            knowledge_lab_id: env::var("KNOWLEDGE_LAB_ID").unwrap_or_else(|_| "1".to_string()),
            request_timeout_seconds: env::var("LAB_REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Validate that production-critical configuration is set.
    /// Panics if the token is still the development default.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.api_token.expose_secret() == "dev_token" {
            panic!("FATAL: LAB_API_TOKEN is using default value! Set LAB_API_TOKEN environment variable.");
        }

        if self.api_base_url.starts_with("http://localhost") {
            panic!("FATAL: LAB_API_BASE_URL is pointing at localhost! Set LAB_API_BASE_URL environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            api_token: SecretString::from("test_token".to_string()),
            knowledge_lab_id: "lab-1".to_string(),
            request_timeout_seconds: 5,
        }
    }
}
