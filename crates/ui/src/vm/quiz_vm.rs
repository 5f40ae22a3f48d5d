use quiz_core::model::{OptionId, SessionSnapshot};
use services::{Direction, QuizLoopService, QuizProgress, QuizSession, SubmitOutcome};

use crate::views::ViewError;

use super::question_vm::{QuestionVm, map_current_question};
use super::results_vm::{ResultsVm, map_results};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionId),
    CheckAnswer,
    Submit,
    Navigate(Direction),
    ViewResults,
    CloseResults,
    Restart,
}

/// Storage work left over after an intent was applied in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingWrite {
    Save(SessionSnapshot),
    Clear,
}

impl PendingWrite {
    /// # Errors
    ///
    /// Returns `ViewError::SaveFailed` when storage rejects the write.
    pub async fn run(self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        let result = match self {
            Self::Save(snapshot) => quiz_loop.save(&snapshot).await,
            Self::Clear => quiz_loop.clear_saved().await,
        };
        result.map_err(|err| {
            tracing::warn!(error = %err, "quiz change was not saved");
            ViewError::SaveFailed
        })
    }
}

/// Session plus presenter-local state.
pub struct QuizVm {
    session: QuizSession,
    show_feedback: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            show_feedback: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn show_feedback(&self) -> bool {
        self.show_feedback
    }

    #[must_use]
    pub fn show_results(&self) -> bool {
        self.session.show_results()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        map_current_question(&self.session, self.show_feedback)
    }

    #[must_use]
    pub fn results(&self) -> ResultsVm {
        map_results(&self.session.score_report())
    }

    /// Apply an intent to the in-memory session right away.
    ///
    /// Returns the storage write the change needs, if any.
    pub fn apply_now(&mut self, intent: QuizIntent) -> Option<PendingWrite> {
        match intent {
            QuizIntent::Select(option) => self.select(&option).then(|| self.save()),
            QuizIntent::CheckAnswer => {
                self.show_feedback = !self.show_feedback;
                None
            }
            QuizIntent::Submit => {
                self.show_feedback = false;
                let index = self.session.current_index();
                match self.session.submit_current() {
                    SubmitOutcome::NoSelection => None,
                    SubmitOutcome::Graded { correct, credited, completed } => {
                        tracing::debug!(index, correct, credited, completed, "answer submitted");
                        Some(self.save())
                    }
                }
            }
            QuizIntent::Navigate(direction) => {
                let moved = self.session.navigate(direction);
                if moved {
                    self.show_feedback = false;
                }
                moved.then(|| self.save())
            }
            QuizIntent::ViewResults => {
                self.session.view_results();
                None
            }
            QuizIntent::CloseResults => {
                self.session.close_results();
                None
            }
            QuizIntent::Restart => {
                self.show_feedback = false;
                self.session.reset();
                Some(PendingWrite::Clear)
            }
        }
    }

    /// Apply an intent and wait for its storage write.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::SaveFailed` when the change could not be saved.
    /// The change itself is kept.
    pub async fn apply(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Result<(), ViewError> {
        match self.apply_now(intent) {
            Some(pending) => pending.run(quiz_loop).await,
            None => Ok(()),
        }
    }

    fn save(&self) -> PendingWrite {
        PendingWrite::Save(self.session.snapshot())
    }

    fn select(&mut self, option: &OptionId) -> bool {
        let Some(question) = self.session.current_question() else {
            return false;
        };
        let Some(answer) = question.answer(option).cloned() else {
            return false;
        };
        let multiple = question.is_multiple_answers();

        let mut selection = self.session.current_answer().cloned().unwrap_or_default();
        selection.choose(answer, multiple);

        let index = self.session.current_index();
        self.session.record_answer(index, selection);
        true
    }
}

/// Load questions and the saved session behind one readiness step.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> QuizVm {
    QuizVm::new(quiz_loop.start_quiz().await)
}
