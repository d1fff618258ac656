pub mod answer_normalizer;
pub mod attempt_controller;
pub mod attempt_machine;
pub mod countdown;
pub mod exercise_service;
pub mod review_service;

pub use attempt_controller::AttemptController;
pub use attempt_machine::{AttemptMachine, AttemptPhase, Direction};
pub use countdown::Countdown;
pub use exercise_service::ExerciseService;
pub use review_service::{AttemptReview, QuestionReview, ReviewService};
