use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::errors::{LabError, LabResult};
use crate::models::domain::{Exercise, GradedAttempt};
use crate::models::dto::response::{extract_attempt_id, value_to_f64, value_to_i32};
use crate::models::dto::{AttemptDto, StartAttemptRequest, SubmitAttemptRequest};
use crate::repositories::AttemptRepository;
use crate::services::answer_normalizer::normalize_exercise;
use crate::services::attempt_machine::{
    AttemptMachine, AttemptPhase, Direction, SubmitTicket, TransitionOutcome,
};

/// Drives one attempt against the backend. All state lives in the pure
/// machine; this layer only runs the network effects between the machine's
/// `begin_*`/`complete_*` transitions, so responses that outlive a reset are
/// discarded by the generation check rather than applied.
pub struct AttemptController {
    attempts: Arc<dyn AttemptRepository>,
    machine: AttemptMachine,
    knowledge_lab_id: String,
}

impl AttemptController {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        exercise: Exercise,
        knowledge_lab_id: &str,
    ) -> Self {
        Self {
            attempts,
            machine: AttemptMachine::new(exercise),
            knowledge_lab_id: knowledge_lab_id.to_string(),
        }
    }

    pub fn machine(&self) -> &AttemptMachine {
        &self.machine
    }

    pub fn phase(&self) -> AttemptPhase {
        self.machine.phase()
    }

    /// Create the server-side attempt record. The machine only advances to
    /// `InProgress` once a usable attempt id has been probed out of the
    /// response; a malformed response leaves it in `NotStarted`.
    pub async fn start(&mut self) -> LabResult<()> {
        let generation = self.machine.begin_start()?;

        let exercise = self.machine.exercise();
        let request = StartAttemptRequest::new(
            &self.knowledge_lab_id,
            exercise.exercise_type,
            &exercise.id,
        );
        request.validate()?;

        let payload = self.attempts.start(&request).await?;
        let attempt_id = extract_attempt_id(&payload).ok_or(LabError::MissingAttemptId)?;

        if self.machine.complete_start(generation, attempt_id) == TransitionOutcome::Stale {
            log::warn!("discarding start response for a superseded attempt");
        }
        Ok(())
    }

    pub fn record_answer(&mut self, question_id: &str, option_id: &str) -> LabResult<()> {
        self.machine.record_answer(question_id, option_id)
    }

    pub fn navigate(&mut self, direction: Direction) -> usize {
        self.machine.navigate(direction)
    }

    /// Single submission entry point, used by the manual action and by the
    /// countdown expiry alike.
    pub async fn submit(&mut self) -> LabResult<()> {
        let ticket = self.machine.begin_submit()?;
        let request = SubmitAttemptRequest {
            answers: ticket.answers.clone(),
        };

        let result = self.grade(&ticket, &request).await;
        match self.machine.complete_submit(ticket.generation, result)? {
            TransitionOutcome::Applied => Ok(()),
            TransitionOutcome::Stale => {
                log::warn!("discarding submit response for a superseded attempt");
                Ok(())
            }
        }
    }

    /// Forced submission on countdown expiry; whatever partial answer map
    /// exists at this instant is what gets graded.
    pub async fn on_time_expired(&mut self) -> LabResult<()> {
        log::info!(
            "time limit reached with {}/{} questions answered, submitting",
            self.machine.answered_count(),
            self.machine.exercise().questions.len()
        );
        self.submit().await
    }

    pub fn retry(&mut self) {
        self.machine.retry();
    }

    async fn grade(
        &self,
        ticket: &SubmitTicket,
        request: &SubmitAttemptRequest,
    ) -> LabResult<GradedAttempt> {
        let mut dto = self.attempts.submit(&ticket.attempt_id, request).await?;

        // Some submit responses omit the nested exercise (and with it the
        // correct answers); re-fetch the attempt before giving up on them.
        // Only the fields the submit response lacked are taken from the
        // re-fetch.
        if dto.exercise.is_none() {
            match self.attempts.fetch(&ticket.attempt_id).await {
                Ok(full) => {
                    dto.exercise = full.exercise;
                    dto.score = dto.score.or(full.score);
                    dto.points_earned = dto.points_earned.or(full.points_earned);
                    dto.total_points = dto.total_points.or(full.total_points);
                    dto.time_taken = dto.time_taken.or(full.time_taken);
                }
                Err(err) => {
                    log::warn!("attempt re-fetch after submit failed: {}", err);
                }
            }
        }

        Ok(self.graded_from_dto(&ticket.attempt_id, dto))
    }

    fn graded_from_dto(&self, attempt_id: &str, dto: AttemptDto) -> GradedAttempt {
        let exercise = dto.exercise.as_ref().map(|raw| {
            normalize_exercise(
                raw,
                self.machine.exercise().exercise_type,
                &self.machine.exercise().id,
            )
        });

        GradedAttempt {
            id: dto
                .attempt_id()
                .unwrap_or_else(|| attempt_id.to_string()),
            score: dto.score.as_ref().and_then(value_to_f64).unwrap_or(0.0),
            points_earned: dto
                .points_earned
                .as_ref()
                .and_then(value_to_i32)
                .unwrap_or(0),
            total_points: dto
                .total_points
                .as_ref()
                .and_then(value_to_i32)
                .unwrap_or_else(|| self.machine.exercise().total_points()),
            time_taken_seconds: dto
                .time_taken
                .as_ref()
                .and_then(value_to_i32)
                .map(i64::from)
                .or_else(|| elapsed_seconds(self.machine.started_at(), Utc::now())),
            exercise,
            submitted_at: dto
                .submitted_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

fn elapsed_seconds(started_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    started_at.map(|start| (now - start).num_seconds().max(0))
}
