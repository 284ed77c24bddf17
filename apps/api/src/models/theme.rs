use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeType {
    RecurringTheme,
    Anomaly,
    Trend,
}

/// One cached theme interpretation, keyed by (user_id, theme_key).
/// Regenerated when expired or when fields introduced after the row was
/// written are missing; never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeInterpretationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub theme_type: ThemeType,
    pub theme_key: String,
    pub cards: Option<Vec<String>>,
    pub interpretation_en: String,
    pub interpretation_zh: Option<String>,
    pub interpretation_ja: Option<String>,
    pub theme_names: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub metadata: Value,
}

impl ThemeInterpretationRecord {
    /// Whether the stored metadata carries structural stats. Rows written
    /// before that field existed must be regenerated when a caller now
    /// supplies stats.
    pub fn has_structural_stats(&self) -> bool {
        self.metadata.get("structural_stats_over_time").is_some()
    }
}

/// Proportions (percentages, 0–100) of card categories within one
/// time-windowed slice of a user's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralPeriodStats {
    pub major_pct: f64,
    pub minor_pct: f64,
    pub court_pct: f64,
    pub wands_pct: f64,
    pub cups_pct: f64,
    pub swords_pct: f64,
    pub pentacles_pct: f64,
}

/// Early/middle/late structural slices used to narrate drift over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralStatsOverTime {
    pub early: StructuralPeriodStats,
    pub middle: StructuralPeriodStats,
    pub late: StructuralPeriodStats,
}

/// What the theme service hands back to the UI layer.
/// `summary` is reserved and currently always empty.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeResult {
    pub summary: String,
    pub interpretation: String,
    pub theme_names: Option<String>,
}
