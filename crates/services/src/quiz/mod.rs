mod persistence;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use session::{Direction, QuizProgress, QuizSession, SubmitOutcome};
pub use workflow::QuizLoopService;
