use chrono::{DateTime, Duration, Utc};

use crate::models::domain::Exercise;

/// Countdown for a timed exercise. The caller polls it from whatever clock
/// tick it has and feeds expiry into `AttemptController::on_time_expired`,
/// so timed and manual submission share one code path.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    deadline: Option<DateTime<Utc>>,
}

impl Countdown {
    pub fn for_exercise(exercise: &Exercise, started_at: DateTime<Utc>) -> Self {
        Countdown {
            deadline: exercise
                .time_limit_seconds
                .map(|limit| started_at + Duration::seconds(i64::from(limit))),
        }
    }

    /// None for untimed exercises; otherwise clamped at zero.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.deadline
            .map(|deadline| (deadline - now).num_seconds().max(0))
    }

    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn untimed_exercises_never_expire() {
        let countdown = Countdown::for_exercise(&fixtures::two_question_exercise(), Utc::now());

        assert_eq!(countdown.remaining_seconds(Utc::now()), None);
        assert!(!countdown.expired(Utc::now() + Duration::days(1)));
    }

    #[test]
    fn timed_exercises_count_down_and_expire() {
        let mut exercise = fixtures::two_question_exercise();
        exercise.time_limit_seconds = Some(60);

        let start = Utc::now();
        let countdown = Countdown::for_exercise(&exercise, start);

        assert_eq!(
            countdown.remaining_seconds(start + Duration::seconds(20)),
            Some(40)
        );
        assert!(!countdown.expired(start + Duration::seconds(59)));
        assert!(countdown.expired(start + Duration::seconds(60)));
        assert_eq!(
            countdown.remaining_seconds(start + Duration::seconds(90)),
            Some(0)
        );
    }
}
