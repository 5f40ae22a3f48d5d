#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_source;
pub mod quiz;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionSourceError, QuizError};
pub use question_source::{
    DEFAULT_QUESTIONS_URL, HttpQuestionSource, QuestionSource, QuestionSourceConfig,
    StaticQuestionSource, decode_questions,
};
pub use quiz::{Direction, QuizLoopService, QuizProgress, QuizSession, SubmitOutcome};
