use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::question_source::{HttpQuestionSource, QuestionSource, QuestionSourceConfig};
use crate::quiz::QuizLoopService;

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP question source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions: QuestionSourceConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> = Arc::new(HttpQuestionSource::new(questions));
        Ok(Self::from_parts(source, &storage))
    }

    /// Build services over in-memory storage with the given question source.
    #[must_use]
    pub fn in_memory(source: Arc<dyn QuestionSource>) -> Self {
        Self::from_parts(source, &Storage::in_memory())
    }

    fn from_parts(source: Arc<dyn QuestionSource>, storage: &Storage) -> Self {
        let quiz_loop = Arc::new(QuizLoopService::new(source, Arc::clone(&storage.session)));
        Self { quiz_loop }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
