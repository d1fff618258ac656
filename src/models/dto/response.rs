use serde::Deserialize;
use serde_json::Value;

/// The backend wraps every payload in `{success, data?, error?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope, yielding the payload or the backend's error
    /// message. Callers map the message into the right `LabError` variant.
    pub fn into_data(self) -> Result<T, String> {
        if !self.success {
            return Err(self
                .error
                .unwrap_or_else(|| "backend reported failure".to_string()));
        }
        self.data
            .ok_or_else(|| "backend returned success without data".to_string())
    }
}

/// Raw exercise payload. Field shapes observed to vary, hence the aliases
/// and `Value`-typed members; normalization happens in the answer normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseDto {
    #[serde(default, alias = "pk", alias = "uuid")]
    pub id: Option<Value>,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
    #[serde(default, alias = "time_limit_seconds")]
    pub time_limit: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDto {
    #[serde(default, alias = "pk", alias = "question_id")]
    pub id: Option<Value>,
    #[serde(default, alias = "title", alias = "question_text", alias = "text")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub question_type: Option<String>,
    /// Array of option objects, a JSON-encoded string of one, or a
    /// comma-separated string. Absent for true/false questions.
    #[serde(default)]
    pub options: Option<Value>,
    /// Array, JSON-encoded string, bare string, or boolean. Only present
    /// once the attempt has been graded.
    #[serde(default)]
    pub correct_answer: Option<Value>,
    #[serde(default, alias = "point_value")]
    pub points: Option<Value>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Raw attempt payload from submit/fetch. The id field name is not
/// guaranteed, so all observed spellings are kept and probed in order.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptDto {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub pk: Option<Value>,
    #[serde(default)]
    pub uuid: Option<Value>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default, alias = "earned_points")]
    pub points_earned: Option<Value>,
    #[serde(default, alias = "total_possible")]
    pub total_points: Option<Value>,
    #[serde(default, alias = "time_taken_seconds")]
    pub time_taken: Option<Value>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub exercise: Option<ExerciseDto>,
}

impl AttemptDto {
    pub fn attempt_id(&self) -> Option<String> {
        [&self.id, &self.pk, &self.uuid]
            .into_iter()
            .flatten()
            .find_map(value_to_string)
    }
}

/// Probe a start-attempt payload for the server-assigned id: `id`, `pk`,
/// `uuid`, then the bare payload itself (string or number). Empty strings
/// count as absent.
pub fn extract_attempt_id(payload: &Value) -> Option<String> {
    if let Some(object) = payload.as_object() {
        for key in ["id", "pk", "uuid"] {
            if let Some(id) = object.get(key).and_then(value_to_string) {
                return Some(id);
            }
        }
        return None;
    }
    value_to_string(payload)
}

/// Scalar leniency shared across the DTO layer: strings and numbers both
/// read as strings, empty/blank strings read as absent.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn value_to_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().map(|n| n as i32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
