use quiz_core::model::{AnswerBook, SessionSnapshot, SnapshotError};
use storage::repository::SessionEntries;

/// Decode stored entries into a snapshot.
///
/// Each entry is decoded on its own: a malformed value is logged and replaced
/// by its default, the others are still used.
pub(crate) fn snapshot_from_entries(entries: &SessionEntries) -> SessionSnapshot {
    let score = decode_or_default(entries.score.as_deref(), "score", SessionSnapshot::decode_score);
    let current_index = decode_or_default(
        entries.current_index.as_deref(),
        "current index",
        SessionSnapshot::decode_current_index,
    );
    let book = decode_or_default::<AnswerBook>(
        entries.answers.as_deref(),
        "answers",
        SessionSnapshot::decode_answers,
    );

    SessionSnapshot {
        score,
        current_index,
        book,
    }
}

fn decode_or_default<T: Default>(
    raw: Option<&str>,
    entry: &'static str,
    decode: impl Fn(&str) -> Result<T, SnapshotError>,
) -> T {
    let Some(raw) = raw else {
        return T::default();
    };
    decode(raw).unwrap_or_else(|err| {
        tracing::warn!(entry, error = %err, "ignoring malformed persisted entry");
        T::default()
    })
}
