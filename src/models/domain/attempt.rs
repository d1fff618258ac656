use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::exercise::Exercise;

/// A finalized attempt as returned by the grading endpoint. The nested
/// exercise carries the correct answers the pre-submission copy lacked.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GradedAttempt {
    pub id: String,
    pub score: f64,
    pub points_earned: i32,
    pub total_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graded_attempt_round_trip_preserves_grading_fields() {
        let attempt = GradedAttempt {
            id: "attempt-1".to_string(),
            score: 50.0,
            points_earned: 2,
            total_points: 4,
            time_taken_seconds: Some(93),
            exercise: None,
            submitted_at: Some(Utc::now()),
        };

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: GradedAttempt =
            serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.points_earned, 2);
        assert_eq!(parsed.total_points, 4);
        assert_eq!(parsed.time_taken_seconds, Some(93));
    }

    #[test]
    fn graded_attempt_tolerates_missing_exercise() {
        let json = r#"{"id":"a-1","score":0.0,"points_earned":0,"total_points":3}"#;
        let parsed: GradedAttempt = serde_json::from_str(json).expect("should deserialize");

        assert!(parsed.exercise.is_none());
        assert!(parsed.time_taken_seconds.is_none());
    }
}
