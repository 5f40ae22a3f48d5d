use std::collections::HashSet;

use thiserror::Error;

use crate::model::answer::Answer;
use crate::model::ids::OptionId;
use crate::model::matching::MatchRule;
use crate::model::selection::Selection;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question has no correct answer")]
    NoCorrectAnswer,

    #[error("option {0} appears more than once")]
    DuplicateOption(OptionId),

    #[error("correct option {0} is not one of the answers")]
    UnknownCorrectOption(OptionId),
}

/// A quiz question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<Answer>,
    correct_answers: Vec<Answer>,
    skill_tested: String,
    is_multiple_answers: bool,
}

impl Question {
    /// Build a question, checking that the correct answers are drawn from `answers`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoCorrectAnswer` if `correct_answers` is empty,
    /// `QuestionError::DuplicateOption` if an option id repeats in `answers`,
    /// and `QuestionError::UnknownCorrectOption` if a correct option is not offered.
    pub fn new(
        text: impl Into<String>,
        answers: Vec<Answer>,
        correct_answers: Vec<Answer>,
        skill_tested: impl Into<String>,
        is_multiple_answers: bool,
    ) -> Result<Self, QuestionError> {
        if correct_answers.is_empty() {
            return Err(QuestionError::NoCorrectAnswer);
        }

        let mut seen = HashSet::with_capacity(answers.len());
        for answer in &answers {
            if !seen.insert(answer.option()) {
                return Err(QuestionError::DuplicateOption(answer.option().clone()));
            }
        }
        if let Some(unknown) = correct_answers
            .iter()
            .find(|answer| !seen.contains(answer.option()))
        {
            return Err(QuestionError::UnknownCorrectOption(unknown.option().clone()));
        }

        Ok(Self {
            text: text.into(),
            answers,
            correct_answers,
            skill_tested: skill_tested.into(),
            is_multiple_answers,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answers(&self) -> &[Answer] {
        &self.correct_answers
    }

    #[must_use]
    pub fn skill_tested(&self) -> &str {
        &self.skill_tested
    }

    #[must_use]
    pub fn is_multiple_answers(&self) -> bool {
        self.is_multiple_answers
    }

    #[must_use]
    pub fn match_rule(&self) -> MatchRule {
        MatchRule::for_multiple_answers(self.is_multiple_answers)
    }

    #[must_use]
    pub fn answer(&self, option: &OptionId) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.option() == option)
    }

    #[must_use]
    pub fn is_correct_option(&self, option: &OptionId) -> bool {
        self.correct_answers
            .iter()
            .any(|answer| answer.option() == option)
    }

    /// Whether `submitted` answers this question correctly.
    #[must_use]
    pub fn is_answered_by(&self, submitted: &Selection) -> bool {
        self.match_rule().evaluate(&self.correct_answers, submitted)
    }

    /// Correct answer texts joined for display.
    #[must_use]
    pub fn correct_answer_text(&self) -> String {
        self.correct_answers
            .iter()
            .map(Answer::text)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
