use quiz_core::model::{AnswerBook, Question, ScoreReport, Selection, SessionSnapshot};

/// Direction of a single navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What a submit did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing selected for the current question; the session is unchanged.
    NoSelection,
    /// The current answer was graded and the session moved on.
    Graded {
        correct: bool,
        /// Whether this submit raised the score. A question is credited once.
        credited: bool,
        /// Whether the results are now shown.
        completed: bool,
    },
}

/// Progress shown by the navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz state: questions, position and recorded answers.
///
/// The score is the number of credited questions in the answer book.
/// Holds no storage handles; `QuizLoopService` persists it after mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    book: AnswerBook,
    show_results: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// Rebuild a session from persisted state, clamped to the loaded questions.
    #[must_use]
    pub fn from_snapshot(questions: Vec<Question>, mut snapshot: SessionSnapshot) -> Self {
        let stored_score = snapshot.score;
        snapshot.fit_to(&questions);
        if stored_score != snapshot.score {
            tracing::warn!(
                stored = stored_score,
                credited = snapshot.score,
                "saved score disagrees with credited questions, using credited questions"
            );
        }
        Self {
            questions,
            current: snapshot.current_index,
            book: snapshot.book,
            show_results: false,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score(),
            current_index: self.current,
            book: self.book.clone(),
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&Selection> {
        self.book.answers.get(&index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&Selection> {
        self.answer_for(self.current)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.book.scored.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn show_results(&self) -> bool {
        self.show_results
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: self.current + 1,
            total: self.questions.len(),
        }
    }

    #[must_use]
    pub fn score_report(&self) -> ScoreReport {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        ScoreReport::new(self.score(), total)
    }

    /// Whether the recorded answer for the current question is correct.
    ///
    /// Read-only; used for feedback and never touches the score.
    #[must_use]
    pub fn is_current_answer_correct(&self) -> bool {
        match (self.current_question(), self.current_answer()) {
            (Some(question), Some(selection)) => question.is_answered_by(selection),
            _ => false,
        }
    }

    /// Overwrite the answer recorded for `index`. An empty selection clears it.
    pub fn record_answer(&mut self, index: usize, selection: Selection) {
        if selection.is_empty() {
            self.book.answers.remove(&index);
        } else {
            self.book.answers.insert(index, selection);
        }
    }

    /// Grade the current answer and advance, or flip to results on the last question.
    pub fn submit_current(&mut self) -> SubmitOutcome {
        let Some(question) = self.questions.get(self.current) else {
            return SubmitOutcome::NoSelection;
        };
        let Some(selection) = self.book.answers.get(&self.current) else {
            return SubmitOutcome::NoSelection;
        };

        let correct = question.is_answered_by(selection);
        let credited = correct && self.book.scored.insert(self.current);

        let completed = self.is_last();
        if completed {
            self.show_results = true;
        } else {
            self.current += 1;
        }

        SubmitOutcome::Graded {
            correct,
            credited,
            completed,
        }
    }

    /// Move one question back or forward. Returns `false` at the boundaries.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Previous if self.current > 0 => {
                self.current -= 1;
                true
            }
            Direction::Next if !self.is_last() => {
                self.current += 1;
                true
            }
            _ => false,
        }
    }

    pub fn view_results(&mut self) {
        self.show_results = true;
    }

    pub fn close_results(&mut self) {
        self.show_results = false;
    }

    /// Back to the first question with no answers and no score. Questions are kept.
    pub fn reset(&mut self) {
        self.current = 0;
        self.book = AnswerBook::default();
        self.show_results = false;
    }
}
