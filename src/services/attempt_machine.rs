//! Pure state machine for one exercise attempt. No I/O, no UI framework:
//! network effects are split into `begin_*`/`complete_*` pairs so the
//! controller can run the call between them and the machine can discard
//! results that arrive for a superseded attempt.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::{LabError, LabResult};
use crate::models::domain::{Exercise, GradedAttempt, Question};
use crate::models::dto::QuestionAnswerInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptPhase {
    NotStarted,
    InProgress,
    Submitting,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Handed out by `begin_*` and checked by `complete_*`. A response carrying
/// a generation other than the machine's current one belongs to an attempt
/// that was since reset, and is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    Stale,
}

/// Everything `submit` needs, captured at the moment submission begins.
#[derive(Clone, Debug)]
pub struct SubmitTicket {
    pub generation: Generation,
    pub attempt_id: String,
    pub answers: Vec<QuestionAnswerInput>,
}

pub struct AttemptMachine {
    exercise: Exercise,
    phase: AttemptPhase,
    attempt_id: Option<String>,
    answers: HashMap<String, String>,
    cursor: usize,
    generation: u64,
    started_at: Option<DateTime<Utc>>,
    graded: Option<GradedAttempt>,
}

impl AttemptMachine {
    pub fn new(exercise: Exercise) -> Self {
        AttemptMachine {
            exercise,
            phase: AttemptPhase::NotStarted,
            attempt_id: None,
            answers: HashMap::new(),
            cursor: 0,
            generation: 0,
            started_at: None,
            graded: None,
        }
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn attempt_id(&self) -> Option<&str> {
        self.attempt_id.as_deref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn graded(&self) -> Option<&GradedAttempt> {
        self.graded.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.exercise.questions.get(self.cursor)
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn begin_start(&self) -> LabResult<Generation> {
        match self.phase {
            AttemptPhase::NotStarted => Ok(Generation(self.generation)),
            _ => Err(LabError::InvalidState(
                "attempt has already been started".to_string(),
            )),
        }
    }

    pub fn complete_start(
        &mut self,
        generation: Generation,
        attempt_id: String,
    ) -> TransitionOutcome {
        if generation.0 != self.generation {
            return TransitionOutcome::Stale;
        }
        self.attempt_id = Some(attempt_id);
        self.started_at = Some(Utc::now());
        self.phase = AttemptPhase::InProgress;
        TransitionOutcome::Applied
    }

    /// Single-answer overwrite semantics: a second selection for the same
    /// question replaces the first, and repeating a selection is a no-op.
    pub fn record_answer(&mut self, question_id: &str, option_id: &str) -> LabResult<()> {
        if self.phase != AttemptPhase::InProgress {
            return Err(LabError::InvalidState(
                "answers can only be recorded while the attempt is in progress".to_string(),
            ));
        }
        self.answers
            .insert(question_id.to_string(), option_id.to_string());
        Ok(())
    }

    /// Moves the question cursor one step, clamped to the question range.
    /// Never changes the attempt phase.
    pub fn navigate(&mut self, direction: Direction) -> usize {
        let last = self.exercise.questions.len().saturating_sub(1);
        self.cursor = match direction {
            Direction::Previous => self.cursor.saturating_sub(1),
            Direction::Next => (self.cursor + 1).min(last),
        };
        self.cursor
    }

    /// Guards submission and freezes the answer set. Answers are emitted in
    /// question order regardless of the order they were recorded in.
    pub fn begin_submit(&mut self) -> LabResult<SubmitTicket> {
        if self.phase == AttemptPhase::Submitting {
            return Err(LabError::SubmissionInFlight);
        }
        if self.phase == AttemptPhase::Completed {
            return Err(LabError::InvalidState(
                "attempt is already completed".to_string(),
            ));
        }
        let attempt_id = self
            .attempt_id
            .clone()
            .ok_or(LabError::MissingAttemptId)?;

        let answers = self
            .exercise
            .questions
            .iter()
            .filter_map(|question| {
                self.answers.get(&question.id).map(|option_id| QuestionAnswerInput {
                    question_id: question.id.clone(),
                    selected_answer: vec![option_id.clone()],
                })
            })
            .collect();

        self.phase = AttemptPhase::Submitting;
        Ok(SubmitTicket {
            generation: Generation(self.generation),
            attempt_id,
            answers,
        })
    }

    /// Applies the submit result. Failure returns to `InProgress` with the
    /// local answers intact so the user can resubmit.
    pub fn complete_submit(
        &mut self,
        generation: Generation,
        result: Result<GradedAttempt, LabError>,
    ) -> LabResult<TransitionOutcome> {
        if generation.0 != self.generation {
            return Ok(TransitionOutcome::Stale);
        }
        match result {
            Ok(graded) => {
                self.graded = Some(graded);
                self.phase = AttemptPhase::Completed;
                Ok(TransitionOutcome::Applied)
            }
            Err(err) => {
                self.phase = AttemptPhase::InProgress;
                Err(err)
            }
        }
    }

    /// Explicit retry: back to `NotStarted` with answers cleared. Bumping
    /// the generation orphans any response still in flight.
    pub fn retry(&mut self) {
        self.phase = AttemptPhase::NotStarted;
        self.attempt_id = None;
        self.answers.clear();
        self.cursor = 0;
        self.started_at = None;
        self.graded = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn in_progress_machine() -> AttemptMachine {
        let mut machine = AttemptMachine::new(fixtures::two_question_exercise());
        let generation = machine.begin_start().unwrap();
        machine.complete_start(generation, "attempt-1".to_string());
        machine
    }

    #[test]
    fn start_transitions_to_in_progress() {
        let machine = in_progress_machine();
        assert_eq!(machine.phase(), AttemptPhase::InProgress);
        assert_eq!(machine.attempt_id(), Some("attempt-1"));
        assert!(machine.started_at().is_some());
    }

    #[test]
    fn start_twice_is_rejected() {
        let machine = in_progress_machine();
        assert!(matches!(
            machine.begin_start(),
            Err(LabError::InvalidState(_))
        ));
    }

    #[test]
    fn record_answer_is_idempotent_and_overwrites() {
        let mut machine = in_progress_machine();

        machine.record_answer("q-1", "b").unwrap();
        machine.record_answer("q-1", "b").unwrap();
        assert_eq!(machine.answered_count(), 1);
        assert_eq!(machine.answer_for("q-1"), Some("b"));

        machine.record_answer("q-1", "a").unwrap();
        assert_eq!(machine.answered_count(), 1);
        assert_eq!(machine.answer_for("q-1"), Some("a"));
    }

    #[test]
    fn record_answer_requires_in_progress() {
        let mut machine = AttemptMachine::new(fixtures::two_question_exercise());
        assert!(matches!(
            machine.record_answer("q-1", "b"),
            Err(LabError::InvalidState(_))
        ));
    }

    #[test]
    fn navigate_clamps_to_question_range() {
        let mut machine = in_progress_machine();

        assert_eq!(machine.navigate(Direction::Previous), 0);
        assert_eq!(machine.navigate(Direction::Next), 1);
        assert_eq!(machine.navigate(Direction::Next), 1);
        assert_eq!(machine.navigate(Direction::Previous), 0);
        assert_eq!(machine.phase(), AttemptPhase::InProgress);
    }

    #[test]
    fn submit_without_attempt_id_surfaces_missing_id() {
        let mut machine = AttemptMachine::new(fixtures::two_question_exercise());
        assert!(matches!(
            machine.begin_submit(),
            Err(LabError::MissingAttemptId)
        ));
        assert_eq!(machine.phase(), AttemptPhase::NotStarted);
    }

    #[test]
    fn submit_while_submitting_is_rejected() {
        let mut machine = in_progress_machine();
        machine.begin_submit().unwrap();
        assert!(matches!(
            machine.begin_submit(),
            Err(LabError::SubmissionInFlight)
        ));
    }

    #[test]
    fn submit_ticket_orders_answers_by_question() {
        let mut machine = in_progress_machine();
        machine.record_answer("q-2", "true").unwrap();
        machine.record_answer("q-1", "b").unwrap();

        let ticket = machine.begin_submit().unwrap();

        assert_eq!(ticket.attempt_id, "attempt-1");
        assert_eq!(ticket.answers.len(), 2);
        assert_eq!(ticket.answers[0].question_id, "q-1");
        assert_eq!(ticket.answers[0].selected_answer, vec!["b".to_string()]);
        assert_eq!(ticket.answers[1].question_id, "q-2");
    }

    #[test]
    fn submit_ticket_allows_partial_answer_maps() {
        let mut machine = in_progress_machine();
        machine.record_answer("q-1", "b").unwrap();

        let ticket = machine.begin_submit().unwrap();
        assert_eq!(ticket.answers.len(), 1);
    }

    #[test]
    fn failed_submit_returns_to_in_progress_with_answers_preserved() {
        let mut machine = in_progress_machine();
        machine.record_answer("q-1", "b").unwrap();
        let ticket = machine.begin_submit().unwrap();

        let result = machine.complete_submit(
            ticket.generation,
            Err(LabError::Submit("timeout".to_string())),
        );

        assert!(matches!(result, Err(LabError::Submit(_))));
        assert_eq!(machine.phase(), AttemptPhase::InProgress);
        assert_eq!(machine.answer_for("q-1"), Some("b"));
    }

    #[test]
    fn successful_submit_completes_the_attempt() {
        let mut machine = in_progress_machine();
        machine.record_answer("q-1", "b").unwrap();
        let ticket = machine.begin_submit().unwrap();

        let outcome = machine
            .complete_submit(ticket.generation, Ok(fixtures::graded_attempt("attempt-1")))
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied);
        assert_eq!(machine.phase(), AttemptPhase::Completed);
        assert!(machine.graded().is_some());
    }

    #[test]
    fn retry_resets_and_orphans_in_flight_responses() {
        let mut machine = in_progress_machine();
        machine.record_answer("q-1", "b").unwrap();
        let ticket = machine.begin_submit().unwrap();

        machine.retry();

        assert_eq!(machine.phase(), AttemptPhase::NotStarted);
        assert_eq!(machine.answered_count(), 0);
        assert_eq!(machine.attempt_id(), None);

        // The old submission resolves after the reset and must be dropped.
        let outcome = machine
            .complete_submit(ticket.generation, Ok(fixtures::graded_attempt("attempt-1")))
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Stale);
        assert_eq!(machine.phase(), AttemptPhase::NotStarted);
        assert!(machine.graded().is_none());
    }

    #[test]
    fn stale_start_response_is_dropped() {
        let mut machine = AttemptMachine::new(fixtures::two_question_exercise());
        let generation = machine.begin_start().unwrap();
        machine.retry();

        let outcome = machine.complete_start(generation, "attempt-1".to_string());
        assert_eq!(outcome, TransitionOutcome::Stale);
        assert_eq!(machine.phase(), AttemptPhase::NotStarted);
    }
}
