use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::models::theme::{ThemeInterpretationRecord, ThemeType};

/// Keyed cache of theme interpretations: point lookup and upsert on
/// (user_id, theme_key). Rows are never deleted here; expiry is handled by
/// the service comparing timestamps.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    async fn find(
        &self,
        user_id: Uuid,
        theme_key: &str,
    ) -> Result<Option<ThemeInterpretationRecord>>;

    async fn upsert(&self, record: &ThemeInterpretationRecord) -> Result<()>;
}

#[derive(Debug, FromRow)]
struct ThemeRow {
    id: Uuid,
    user_id: Uuid,
    theme_type: String,
    theme_key: String,
    cards: Option<Vec<String>>,
    interpretation_en: String,
    interpretation_zh: Option<String>,
    interpretation_ja: Option<String>,
    theme_names: Option<String>,
    generated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    metadata: serde_json::Value,
}

fn theme_type_from_str(s: &str) -> ThemeType {
    match s {
        "anomaly" => ThemeType::Anomaly,
        "trend" => ThemeType::Trend,
        _ => ThemeType::RecurringTheme,
    }
}

fn theme_type_to_str(t: ThemeType) -> &'static str {
    match t {
        ThemeType::RecurringTheme => "recurring_theme",
        ThemeType::Anomaly => "anomaly",
        ThemeType::Trend => "trend",
    }
}

impl From<ThemeRow> for ThemeInterpretationRecord {
    fn from(row: ThemeRow) -> Self {
        ThemeInterpretationRecord {
            id: row.id,
            user_id: row.user_id,
            theme_type: theme_type_from_str(&row.theme_type),
            theme_key: row.theme_key,
            cards: row.cards,
            interpretation_en: row.interpretation_en,
            interpretation_zh: row.interpretation_zh,
            interpretation_ja: row.interpretation_ja,
            theme_names: row.theme_names,
            generated_at: row.generated_at,
            expires_at: row.expires_at,
            metadata: row.metadata,
        }
    }
}

/// Postgres-backed theme store.
///
/// The table may not exist yet on older deployments (the migration ships
/// separately from the app). Postgres reports that as undefined_table
/// (42P01); both operations tolerate it, so callers compute without
/// persisting instead of failing the request.
#[derive(Clone)]
pub struct PgThemeStore {
    pool: PgPool,
}

impl PgThemeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_undefined_table(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01")
    )
}

#[async_trait]
impl ThemeStore for PgThemeStore {
    async fn find(
        &self,
        user_id: Uuid,
        theme_key: &str,
    ) -> Result<Option<ThemeInterpretationRecord>> {
        let result: Result<Option<ThemeRow>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT id, user_id, theme_type, theme_key, cards,
                   interpretation_en, interpretation_zh, interpretation_ja,
                   theme_names, generated_at, expires_at, metadata
            FROM theme_interpretations
            WHERE user_id = $1 AND theme_key = $2
            "#,
        )
        .bind(user_id)
        .bind(theme_key)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.map(ThemeInterpretationRecord::from)),
            Err(e) if is_undefined_table(&e) => {
                warn!("theme_interpretations table missing; treating cache as empty");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, record: &ThemeInterpretationRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO theme_interpretations
                (id, user_id, theme_type, theme_key, cards,
                 interpretation_en, interpretation_zh, interpretation_ja,
                 theme_names, generated_at, expires_at, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id, theme_key) DO UPDATE SET
                theme_type = EXCLUDED.theme_type,
                cards = EXCLUDED.cards,
                interpretation_en = EXCLUDED.interpretation_en,
                interpretation_zh = EXCLUDED.interpretation_zh,
                interpretation_ja = EXCLUDED.interpretation_ja,
                theme_names = EXCLUDED.theme_names,
                generated_at = EXCLUDED.generated_at,
                expires_at = EXCLUDED.expires_at,
                metadata = EXCLUDED.metadata
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(theme_type_to_str(record.theme_type))
        .bind(&record.theme_key)
        .bind(&record.cards)
        .bind(&record.interpretation_en)
        .bind(&record.interpretation_zh)
        .bind(&record.interpretation_ja)
        .bind(&record.theme_names)
        .bind(record.generated_at)
        .bind(record.expires_at)
        .bind(&record.metadata)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_undefined_table(&e) => {
                warn!("theme_interpretations table missing; skipping persist");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_round_trip() {
        for t in [ThemeType::RecurringTheme, ThemeType::Anomaly, ThemeType::Trend] {
            assert_eq!(theme_type_from_str(theme_type_to_str(t)), t);
        }
    }

    #[test]
    fn test_unknown_theme_type_defaults_to_recurring() {
        assert_eq!(theme_type_from_str("mystery"), ThemeType::RecurringTheme);
    }
}
