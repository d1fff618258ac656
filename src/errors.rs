use thiserror::Error;

/// Failure taxonomy for the exercise attempt workflow.
///
/// Every variant is recoverable at the process level: loads surface as a
/// "not found" screen, attempt errors surface as user-facing messages with
/// the attempt state preserved. Nothing here triggers an automatic retry.
#[derive(Debug, Clone, Error)]
pub enum LabError {
    #[error("Failed to load exercise: {0}")]
    Load(String),

    #[error("Attempt could not be started: response contained no attempt id")]
    MissingAttemptId,

    #[error("Submission failed: {0}")]
    Submit(String),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl LabError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LabError::Load(_) => "LOAD_ERROR",
            LabError::MissingAttemptId => "MISSING_ATTEMPT_ID",
            LabError::Submit(_) => "SUBMIT_ERROR",
            LabError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            LabError::InvalidState(_) => "INVALID_STATE",
            LabError::Network(_) => "NETWORK_ERROR",
        }
    }

    /// Whether the attempt survives this error in a resubmittable state.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LabError::Load(_))
    }
}

impl From<reqwest::Error> for LabError {
    fn from(err: reqwest::Error) -> Self {
        LabError::Network(err.to_string())
    }
}

impl From<validator::ValidationErrors> for LabError {
    fn from(err: validator::ValidationErrors) -> Self {
        LabError::InvalidState(err.to_string())
    }
}

pub type LabResult<T> = Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LabError::MissingAttemptId.error_code(), "MISSING_ATTEMPT_ID");
        assert_eq!(LabError::Load("x".into()).error_code(), "LOAD_ERROR");
        assert_eq!(
            LabError::SubmissionInFlight.error_code(),
            "SUBMISSION_IN_FLIGHT"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = LabError::Submit("server rejected answers".into());
        assert_eq!(err.to_string(), "Submission failed: server rejected answers");
    }

    #[test]
    fn test_load_errors_are_not_recoverable() {
        assert!(!LabError::Load("missing".into()).is_recoverable());
        assert!(LabError::Submit("timeout".into()).is_recoverable());
        assert!(LabError::MissingAttemptId.is_recoverable());
    }
}
