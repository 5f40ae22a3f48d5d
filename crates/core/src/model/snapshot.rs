use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::Answer;
use crate::model::question::Question;
use crate::model::selection::Selection;

/// Current layout version of the persisted answers entry.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("invalid {field} value: {raw:?}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid answers payload: {0}")]
    InvalidAnswers(String),
}

/// Answers recorded so far plus the questions already credited to the score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBook {
    pub answers: BTreeMap<usize, Selection>,
    pub scored: BTreeSet<usize>,
    /// Set when read from the legacy layout, which records no credits.
    /// [`SessionSnapshot::fit_to`] rebuilds `scored` by grading `answers`.
    pub credits_unknown: bool,
}

/// Persisted shape of a quiz session.
///
/// `show_results` is view state and is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub score: u32,
    pub current_index: usize,
    pub book: AnswerBook,
}

impl SessionSnapshot {
    #[must_use]
    pub fn encode_score(&self) -> String {
        self.score.to_string()
    }

    #[must_use]
    pub fn encode_current_index(&self) -> String {
        self.current_index.to_string()
    }

    /// Serialize recorded answers as a versioned JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidAnswers` if JSON encoding fails.
    pub fn encode_answers(&self) -> Result<String, SnapshotError> {
        let payload = AnswersPayloadRef {
            version: SNAPSHOT_VERSION,
            answers: &self.book.answers,
            scored: &self.book.scored,
        };
        serde_json::to_string(&payload).map_err(|err| SnapshotError::InvalidAnswers(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidNumber` if `raw` is not a non-negative integer.
    pub fn decode_score(raw: &str) -> Result<u32, SnapshotError> {
        raw.trim().parse().map_err(|_| SnapshotError::InvalidNumber {
            field: "score",
            raw: raw.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidNumber` if `raw` is not a non-negative integer.
    pub fn decode_current_index(raw: &str) -> Result<usize, SnapshotError> {
        raw.trim().parse().map_err(|_| SnapshotError::InvalidNumber {
            field: "current index",
            raw: raw.to_string(),
        })
    }

    /// Parse the answers entry, accepting both the versioned document and the
    /// older bare array indexed by question.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidAnswers` for undecodable JSON and
    /// `SnapshotError::UnsupportedVersion` for documents newer than this build.
    pub fn decode_answers(raw: &str) -> Result<AnswerBook, SnapshotError> {
        let stored: StoredAnswers = serde_json::from_str(raw)
            .map_err(|err| SnapshotError::InvalidAnswers(err.to_string()))?;

        let mut book = match stored {
            StoredAnswers::Versioned(payload) => {
                if payload.version == 0 || payload.version > SNAPSHOT_VERSION {
                    return Err(SnapshotError::UnsupportedVersion(payload.version));
                }
                AnswerBook {
                    answers: payload.answers,
                    scored: payload.scored,
                    credits_unknown: false,
                }
            }
            StoredAnswers::Legacy(slots) => AnswerBook {
                answers: slots
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, slot)| slot.map(|answers| (index, Selection::from_answers(answers))))
                    .collect(),
                scored: BTreeSet::new(),
                credits_unknown: true,
            },
        };
        book.answers.retain(|_, selection| !selection.is_empty());
        Ok(book)
    }

    /// Fit the snapshot to a question list of `len` questions.
    ///
    /// The index lands in `[0, max(1, len) - 1]`; answers, credits and the score
    /// never refer to more questions than exist.
    pub fn clamp_to(&mut self, len: usize) {
        self.current_index = self.current_index.min(len.saturating_sub(1));
        self.book.answers.retain(|index, _| *index < len);
        self.book.scored.retain(|index| *index < len);
        let cap = u32::try_from(len).unwrap_or(u32::MAX);
        self.score = self.score.min(cap);
    }

    /// Fit the snapshot to the loaded questions and derive the score from the
    /// credited questions.
    ///
    /// Credits missing from a legacy answers entry are rebuilt by grading the
    /// recorded answers. The stored score counter is never trusted over the
    /// credit set.
    pub fn fit_to(&mut self, questions: &[Question]) {
        self.clamp_to(questions.len());
        if self.book.credits_unknown {
            self.book.scored = self
                .book
                .answers
                .iter()
                .filter(|(index, selection)| {
                    questions
                        .get(**index)
                        .is_some_and(|question| question.is_answered_by(selection))
                })
                .map(|(index, _)| *index)
                .collect();
            self.book.credits_unknown = false;
        }
        self.score = u32::try_from(self.book.scored.len()).unwrap_or(u32::MAX);
    }
}

#[derive(Serialize)]
struct AnswersPayloadRef<'a> {
    version: u32,
    answers: &'a BTreeMap<usize, Selection>,
    scored: &'a BTreeSet<usize>,
}

#[derive(Deserialize)]
struct AnswersPayload {
    version: u32,
    answers: BTreeMap<usize, Selection>,
    #[serde(default)]
    scored: BTreeSet<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswers {
    Versioned(AnswersPayload),
    Legacy(Vec<Option<Vec<Answer>>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SessionSnapshot {
        let mut book = AnswerBook::default();
        book.answers
            .insert(0, Selection::single(Answer::new("opt1", "One")));
        book.answers.insert(
            2,
            Selection::from_answers([Answer::new("opt1", "One"), Answer::new("opt2", "Two")]),
        );
        book.scored.insert(0);
        SessionSnapshot {
            score: 1,
            current_index: 2,
            book,
        }
    }

    #[test]
    fn answers_document_is_versioned() {
        let encoded = snapshot().encode_answers().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["answers"]["2"][1]["option"], "opt2");
        assert_eq!(value["scored"], serde_json::json!([0]));

        let decoded = SessionSnapshot::decode_answers(&encoded).unwrap();
        assert_eq!(decoded, snapshot().book);
    }

    #[test]
    fn decodes_legacy_array_layout() {
        let raw = r#"[[{"option":"a","text":"A"}],null,[],[{"option":"b","text":"B"},{"option":"c","text":"C"}]]"#;
        let book = SessionSnapshot::decode_answers(raw).unwrap();

        assert_eq!(book.answers.len(), 2);
        assert_eq!(book.answers[&0].len(), 1);
        assert_eq!(book.answers[&3].len(), 2);
        assert!(!book.answers.contains_key(&2));
        assert!(book.scored.is_empty());
        assert!(book.credits_unknown);
    }

    #[test]
    fn rejects_newer_versions() {
        let raw = r#"{"version":9,"answers":{}}"#;
        assert_eq!(
            SessionSnapshot::decode_answers(raw),
            Err(SnapshotError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn rejects_garbage_answers() {
        assert!(matches!(
            SessionSnapshot::decode_answers("not json"),
            Err(SnapshotError::InvalidAnswers(_))
        ));
    }

    #[test]
    fn numeric_entries_reject_non_numbers() {
        assert_eq!(SessionSnapshot::decode_score(" 3 "), Ok(3));
        assert!(matches!(
            SessionSnapshot::decode_score("NaN"),
            Err(SnapshotError::InvalidNumber { field: "score", .. })
        ));
        assert!(SessionSnapshot::decode_current_index("-1").is_err());
    }

    #[test]
    fn clamp_fits_snapshot_to_question_count() {
        let mut snap = snapshot();
        snap.score = 5;
        snap.clamp_to(2);

        assert_eq!(snap.current_index, 1);
        assert_eq!(snap.score, 2);
        assert!(snap.book.answers.contains_key(&0));
        assert!(!snap.book.answers.contains_key(&2));

        snap.clamp_to(0);
        assert_eq!(snap.current_index, 0);
        assert!(snap.book.answers.is_empty());
    }

    fn questions() -> Vec<Question> {
        let options = vec![Answer::new("opt1", "One"), Answer::new("opt2", "Two")];
        vec![
            Question::new("Q1", options.clone(), vec![options[0].clone()], "", false).unwrap(),
            Question::new("Q2", options.clone(), options, "", true).unwrap(),
        ]
    }

    #[test]
    fn legacy_credits_are_rebuilt_by_grading() {
        let raw = r#"[[{"option":"opt1","text":"One"}],[{"option":"opt1","text":"One"}]]"#;
        let mut snap = SessionSnapshot {
            score: 2,
            current_index: 1,
            book: SessionSnapshot::decode_answers(raw).unwrap(),
        };

        snap.fit_to(&questions());

        assert_eq!(snap.book.scored, BTreeSet::from([0]));
        assert!(!snap.book.credits_unknown);
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn score_follows_credited_questions() {
        let mut snap = snapshot();
        snap.score = 0;
        snap.book.scored.insert(1);

        snap.fit_to(&questions());

        assert_eq!(snap.score, 2);
        assert_eq!(snap.book.scored, BTreeSet::from([0, 1]));
    }

    #[test]
    fn versioned_answers_with_repeats_still_grade_correct() {
        let raw = r#"{"version":1,"answers":{"1":[{"option":"opt1","text":"One"},{"option":"opt1","text":"One"},{"option":"opt2","text":"Two"}]}}"#;
        let book = SessionSnapshot::decode_answers(raw).unwrap();

        let selection = &book.answers[&1];
        assert_eq!(selection.len(), 2);
        assert!(questions()[1].is_answered_by(selection));
    }
}
