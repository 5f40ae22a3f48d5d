use crate::model::answer::Answer;
use crate::model::selection::Selection;

/// Correctness predicate shared by scoring and feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Correct when any submitted option is one of the correct options.
    Single,
    /// Correct when the submitted options are exactly the correct options.
    Multiple,
}

impl MatchRule {
    #[must_use]
    pub fn for_multiple_answers(is_multiple: bool) -> Self {
        if is_multiple {
            Self::Multiple
        } else {
            Self::Single
        }
    }

    #[must_use]
    pub fn evaluate(self, correct: &[Answer], submitted: &Selection) -> bool {
        match self {
            Self::Single => correct
                .iter()
                .any(|answer| submitted.contains(answer.option())),
            Self::Multiple => {
                correct.len() == submitted.len()
                    && correct
                        .iter()
                        .all(|answer| submitted.contains(answer.option()))
            }
        }
    }
}
