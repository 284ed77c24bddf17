use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::reading::{ReadingRecord, ReadingType};

/// Read access to a user's reading collection. The pipeline only ever
/// counts, fetches recent rows, and scans questions — it never writes.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Exact number of readings the user has.
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64>;

    /// Up to `limit` most recent readings, newest first.
    async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ReadingRecord>>;

    /// All non-empty questions the user has asked, with their timestamps,
    /// newest first.
    async fn questions_for_user(&self, user_id: Uuid) -> Result<Vec<(String, DateTime<Utc>)>>;
}

#[derive(Debug, FromRow)]
struct ReadingRow {
    id: Uuid,
    user_id: Uuid,
    question: Option<String>,
    cards_drawn: serde_json::Value,
    interpretations: serde_json::Value,
    conversation: serde_json::Value,
    reflection: Option<String>,
    created_at: DateTime<Utc>,
    reading_type: String,
}

impl From<ReadingRow> for ReadingRecord {
    fn from(row: ReadingRow) -> Self {
        // JSONB columns are decoded tolerantly: a malformed blob degrades
        // to an empty list rather than failing the whole history fetch.
        ReadingRecord {
            id: row.id,
            user_id: row.user_id,
            question: row.question,
            cards_drawn: serde_json::from_value(row.cards_drawn).unwrap_or_default(),
            interpretations: serde_json::from_value(row.interpretations).unwrap_or_default(),
            conversation: serde_json::from_value(row.conversation).unwrap_or_default(),
            reflection: row.reflection,
            created_at: row.created_at,
            reading_type: if row.reading_type == "daily_card" {
                ReadingType::DailyCard
            } else {
                ReadingType::Spread
            },
        }
    }
}

/// Postgres-backed reading store.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM readings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<ReadingRecord>> {
        let rows: Vec<ReadingRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, question, cards_drawn, interpretations,
                   conversation, reflection, created_at, reading_type
            FROM readings
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReadingRecord::from).collect())
    }

    async fn questions_for_user(&self, user_id: Uuid) -> Result<Vec<(String, DateTime<Utc>)>> {
        let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT question, created_at
            FROM readings
            WHERE user_id = $1 AND question IS NOT NULL AND question <> ''
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
