use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{
    ANSWERS_KEY, CURRENT_INDEX_KEY, SCORE_KEY, SESSION_KEYS, SessionEntries,
    SessionStateRepository, StorageError,
};

use super::SqliteRepository;

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

const UPSERT_ENTRY: &str = r"
    INSERT INTO session_entries (key, value, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
";

#[async_trait]
impl SessionStateRepository for SqliteRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM session_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|err| StorageError::Serialization(err.to_string()))
        })
        .transpose()
    }

    async fn set_entry(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(UPSERT_ENTRY)
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    // One transaction for all entries of a snapshot.
    async fn save_entries(&self, entries: &SessionEntries) -> Result<(), StorageError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for (key, value) in [
            (SCORE_KEY, entries.score.as_deref()),
            (CURRENT_INDEX_KEY, entries.current_index.as_deref()),
            (ANSWERS_KEY, entries.answers.as_deref()),
        ] {
            let Some(value) = value else {
                continue;
            };
            sqlx::query(UPSERT_ENTRY)
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn clear_entries(&self) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for key in SESSION_KEYS {
            sqlx::query("DELETE FROM session_entries WHERE key = ?1")
                .bind(key)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
