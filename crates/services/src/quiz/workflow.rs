use std::sync::Arc;

use quiz_core::model::{Question, Selection, SessionSnapshot};
use storage::repository::{SessionEntries, SessionStateRepository};

use super::persistence::snapshot_from_entries;
use super::session::{Direction, QuizSession, SubmitOutcome};
use crate::error::QuizError;
use crate::question_source::QuestionSource;

/// Quiz state controller.
///
/// Loads questions and the persisted session at startup and writes the session
/// back to storage after every mutation of score, position or answers.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    store: Arc<dyn SessionStateRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, store: Arc<dyn SessionStateRepository>) -> Self {
        Self { source, store }
    }

    /// Fetch the questions once. A failure is logged and yields an empty list.
    pub async fn load_questions(&self) -> Vec<Question> {
        match self.source.fetch_questions().await {
            Ok(questions) => {
                tracing::info!(
                    count = questions.len(),
                    source = %self.source.describe(),
                    "questions loaded"
                );
                questions
            }
            Err(err) => {
                tracing::error!(
                    source = %self.source.describe(),
                    error = %err,
                    "error fetching questions"
                );
                Vec::new()
            }
        }
    }

    /// Read the persisted session. Missing or unreadable state yields a fresh one.
    pub async fn restore_session(&self) -> SessionSnapshot {
        match self.store.load_entries().await {
            Ok(entries) => snapshot_from_entries(&entries),
            Err(err) => {
                tracing::error!(error = %err, "error reading saved session");
                SessionSnapshot::default()
            }
        }
    }

    /// Load questions, then restore the saved session on top of them.
    ///
    /// Resolves only after both steps, so callers can gate rendering on it.
    /// Nothing is written to storage here.
    pub async fn start_quiz(&self) -> QuizSession {
        let questions = self.load_questions().await;
        let snapshot = self.restore_session().await;
        QuizSession::from_snapshot(questions, snapshot)
    }

    /// Record the selection for question `index` and persist.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the session cannot be saved.
    pub async fn record_answer(
        &self,
        session: &mut QuizSession,
        index: usize,
        selection: Selection,
    ) -> Result<(), QuizError> {
        session.record_answer(index, selection);
        self.persist(session).await
    }

    /// Submit the current answer. Persists unless nothing was selected.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the session cannot be saved.
    pub async fn submit_current(
        &self,
        session: &mut QuizSession,
    ) -> Result<SubmitOutcome, QuizError> {
        let index = session.current_index();
        let outcome = session.submit_current();
        if let SubmitOutcome::Graded { correct, credited, completed } = outcome {
            tracing::debug!(
                index,
                correct,
                credited,
                completed,
                "answer submitted"
            );
            self.persist(session).await?;
        }
        Ok(outcome)
    }

    /// Step one question back or forward. Persists only if the position changed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the session cannot be saved.
    pub async fn navigate(
        &self,
        session: &mut QuizSession,
        direction: Direction,
    ) -> Result<bool, QuizError> {
        let moved = session.navigate(direction);
        if moved {
            self.persist(session).await?;
        }
        Ok(moved)
    }

    /// Clear the session and every persisted entry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the entries cannot be removed.
    pub async fn reset(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        session.reset();
        self.clear_saved().await
    }

    /// Write a snapshot taken from a session that was changed in place.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the entries cannot be written.
    pub async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), QuizError> {
        let entries = SessionEntries::from_snapshot(snapshot)?;
        self.store.save_entries(&entries).await?;
        Ok(())
    }

    /// Remove every saved entry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if the entries cannot be removed.
    pub async fn clear_saved(&self) -> Result<(), QuizError> {
        self.store.clear_entries().await?;
        tracing::info!("quiz reset");
        Ok(())
    }

    async fn persist(&self, session: &QuizSession) -> Result<(), QuizError> {
        self.save(&session.snapshot()).await
    }
}
