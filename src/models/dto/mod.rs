pub mod request;
pub mod response;

pub use request::{QuestionAnswerInput, StartAttemptRequest, SubmitAttemptRequest};
pub use response::{ApiEnvelope, AttemptDto, ExerciseDto, QuestionDto};
