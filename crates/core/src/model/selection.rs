use serde::{Deserialize, Serialize};

use crate::model::answer::Answer;
use crate::model::ids::OptionId;

/// The answers a user picked for one question.
///
/// Keeps insertion order and never holds two answers with the same option id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Answer>", into = "Vec<Answer>")]
pub struct Selection(Vec<Answer>);

impl From<Vec<Answer>> for Selection {
    fn from(answers: Vec<Answer>) -> Self {
        Self::from_answers(answers)
    }
}

impl From<Selection> for Vec<Answer> {
    fn from(selection: Selection) -> Self {
        selection.0
    }
}

impl Selection {
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn single(answer: Answer) -> Self {
        Self(vec![answer])
    }

    /// Build a selection from a list, dropping repeated option ids.
    #[must_use]
    pub fn from_answers(answers: impl IntoIterator<Item = Answer>) -> Self {
        let mut selection = Self::empty();
        for answer in answers {
            if !selection.contains(answer.option()) {
                selection.0.push(answer);
            }
        }
        selection
    }

    /// Apply a click on `answer`.
    ///
    /// With `multiple` set, an already selected option is removed and a new one
    /// is appended. Otherwise the selection becomes exactly `answer`.
    pub fn choose(&mut self, answer: Answer, multiple: bool) {
        if multiple {
            self.toggle(answer);
        } else {
            self.0 = vec![answer];
        }
    }

    pub fn toggle(&mut self, answer: Answer) {
        let before = self.0.len();
        self.0.retain(|picked| picked.option() != answer.option());
        if self.0.len() == before {
            self.0.push(answer);
        }
    }

    #[must_use]
    pub fn contains(&self, option: &OptionId) -> bool {
        self.0.iter().any(|picked| picked.option() == option)
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.0
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionId> {
        self.0.iter().map(Answer::option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
