mod answer;
mod ids;
mod matching;
mod question;
mod score;
mod selection;
mod snapshot;

pub use answer::Answer;
pub use ids::OptionId;
pub use matching::MatchRule;
pub use question::{Question, QuestionError};
pub use score::{PASSING_PERCENTAGE, ScoreReport};
pub use selection::Selection;
pub use snapshot::{AnswerBook, SNAPSHOT_VERSION, SessionSnapshot, SnapshotError};
