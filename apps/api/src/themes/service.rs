//! Theme Interpretation Service — decides whether a cached interpretation
//! is still usable, regenerates it when stale, and parses the model's
//! semi-structured response.
//!
//! Everything here degrades: a dead cache, a failed generation, or an
//! unparseable response produces a missing theme, never a user-facing
//! error.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Locale;
use crate::history::store::ReadingStore;
use crate::history::{load_recent_reading_history, HistoryParams};
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::models::theme::{
    StructuralStatsOverTime, ThemeInterpretationRecord, ThemeResult, ThemeType,
};
use crate::models::user::SubscriptionTier;
use crate::themes::parser::{parse_theme_response, ParsedTheme};
use crate::themes::prompts::{
    language_instruction, GENERIC_THEME_TEMPLATE, MULTI_CARD_TEMPLATE, SINGLE_CARD_TEMPLATE,
    THEME_SYSTEM,
};
use crate::themes::store::ThemeStore;
use crate::themes::structural::describe_structural_shifts;

/// Cached interpretations live this long before regeneration.
const THEME_TTL_DAYS: i64 = 8;
const THEME_MAX_TOKENS: u32 = 1200;
const THEME_TEMPERATURE: f32 = 0.7;
/// In-flight generation calls per batch chunk.
const BATCH_CONCURRENCY: usize = 3;
/// Trend title that routes into the multi-card prompt family.
const MULTI_THEME_TITLE: &str = "Multiple Recurring Themes";
/// History depth for the analytical load. The load runs with the apex tier
/// regardless of the caller's subscription so the analysis sees an
/// unrestricted window.
const ANALYSIS_HISTORY_DEPTH: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeRequest {
    pub user_id: Uuid,
    pub theme_type: ThemeType,
    pub theme_key: String,
    #[serde(default)]
    pub cards: Option<Vec<String>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub structural_stats_over_time: Option<StructuralStatsOverTime>,
    pub locale: Locale,
    #[serde(default)]
    pub force_regenerate: bool,
}

pub struct ThemeService {
    llm: Arc<dyn TextGenerator>,
}

impl ThemeService {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Returns the interpretation for one theme, from cache when fresh,
    /// regenerating otherwise. `None` means the theme is unavailable right
    /// now; callers render nothing.
    pub async fn get_theme_interpretation(
        &self,
        readings: &dyn ReadingStore,
        themes: &dyn ThemeStore,
        req: &ThemeRequest,
        now: DateTime<Utc>,
    ) -> Option<ThemeResult> {
        if !req.force_regenerate {
            match themes.find(req.user_id, &req.theme_key).await {
                Ok(Some(row)) if is_fresh(&row, req, now) => {
                    return Some(cached_result(&row, req.locale));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Theme cache lookup failed, regenerating: {e}");
                }
            }
        }

        let parsed = self.generate(readings, req, now).await?;

        let record = build_record(req, &parsed, now);
        if let Err(e) = themes.upsert(&record).await {
            warn!("Theme cache write failed, serving unpersisted result: {e}");
        }

        let theme_names = record.theme_names.clone();
        Some(ThemeResult {
            summary: String::new(),
            interpretation: parsed.interpretation,
            theme_names,
        })
    }

    /// Batch generation with a hard cap of 3 in-flight calls: each chunk is
    /// awaited fully before the next starts, bounding load on the model and
    /// the store. Result order matches request order.
    pub async fn generate_theme_interpretations(
        &self,
        readings: &dyn ReadingStore,
        themes: &dyn ThemeStore,
        requests: &[ThemeRequest],
        now: DateTime<Utc>,
    ) -> Vec<Option<ThemeResult>> {
        let mut results = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(BATCH_CONCURRENCY) {
            let batch = futures::future::join_all(
                chunk
                    .iter()
                    .map(|req| self.get_theme_interpretation(readings, themes, req, now)),
            )
            .await;
            results.extend(batch);
        }
        results
    }

    async fn generate(
        &self,
        readings: &dyn ReadingStore,
        req: &ThemeRequest,
        now: DateTime<Utc>,
    ) -> Option<ParsedTheme> {
        let prompt = self.build_prompt(readings, req, now).await;

        let result = self
            .llm
            .generate(GenerationRequest {
                prompt,
                system_prompt: Some(THEME_SYSTEM.to_string()),
                max_tokens: Some(THEME_MAX_TOKENS),
                temperature: Some(THEME_TEMPERATURE),
                language: Some(req.locale),
            })
            .await;

        let text = match result {
            Ok(r) => r.text,
            Err(e) => {
                warn!("Theme generation failed for {}: {e}", req.theme_key);
                return None;
            }
        };
        if text.trim().is_empty() {
            warn!("Theme generation returned blank text for {}", req.theme_key);
            return None;
        }

        info!("Generated theme interpretation for {}", req.theme_key);
        Some(parse_theme_response(&text))
    }

    async fn build_prompt(
        &self,
        readings: &dyn ReadingStore,
        req: &ThemeRequest,
        now: DateTime<Utc>,
    ) -> String {
        let instruction = language_instruction(req.locale);
        let cards = req.cards.as_deref().unwrap_or(&[]);

        if cards.len() == 1 {
            return SINGLE_CARD_TEMPLATE
                .replace("{card}", &cards[0])
                .replace("{language_instruction}", &instruction);
        }

        if cards.len() > 1 || req.title.as_deref() == Some(MULTI_THEME_TITLE) {
            // The analytical branch reads the history with apex-level access
            // and conversations included, whatever the caller's actual tier.
            let history = load_recent_reading_history(
                readings,
                &HistoryParams {
                    user_id: req.user_id,
                    locale: req.locale,
                    count: ANALYSIS_HISTORY_DEPTH,
                    include_conversations: true,
                    exclude_daily_cards: false,
                    tier: SubscriptionTier::Apex,
                    is_beta_tester: false,
                    now,
                },
            )
            .await;

            let shifts = req
                .structural_stats_over_time
                .as_ref()
                .map(describe_structural_shifts)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No notable structural shifts.".to_string());

            return MULTI_CARD_TEMPLATE
                .replace("{cards}", &cards.join(", "))
                .replace("{history}", &history)
                .replace("{structural_shifts}", &shifts)
                .replace("{language_instruction}", &instruction);
        }

        GENERIC_THEME_TEMPLATE
            .replace("{title}", req.title.as_deref().unwrap_or(&req.theme_key))
            .replace("{description}", req.description.as_deref().unwrap_or(""))
            .replace("{language_instruction}", &instruction)
    }
}

/// A cached row is usable when it has not expired, carries theme names,
/// and carries structural stats whenever the caller now supplies them
/// (older rows predate that field and must be refreshed).
fn is_fresh(row: &ThemeInterpretationRecord, req: &ThemeRequest, now: DateTime<Utc>) -> bool {
    now <= row.expires_at
        && row.theme_names.is_some()
        && (req.structural_stats_over_time.is_none() || row.has_structural_stats())
}

fn cached_result(row: &ThemeInterpretationRecord, locale: Locale) -> ThemeResult {
    let interpretation = match locale {
        Locale::ZhTw => row.interpretation_zh.as_deref(),
        Locale::Ja => row.interpretation_ja.as_deref(),
        _ => None,
    }
    .unwrap_or(&row.interpretation_en)
    .to_string();

    ThemeResult {
        summary: String::new(),
        interpretation,
        theme_names: row.theme_names.clone(),
    }
}

fn build_record(
    req: &ThemeRequest,
    parsed: &ParsedTheme,
    now: DateTime<Utc>,
) -> ThemeInterpretationRecord {
    let mut metadata = serde_json::json!({});
    if let Some(title) = &req.title {
        metadata["title"] = serde_json::json!(title);
    }
    if let Some(description) = &req.description {
        metadata["description"] = serde_json::json!(description);
    }
    if let Some(stats) = &req.structural_stats_over_time {
        metadata["structural_stats_over_time"] = serde_json::json!(stats);
    }

    let (zh, ja) = match req.locale {
        Locale::ZhTw => (Some(parsed.interpretation.clone()), None),
        Locale::Ja => (None, Some(parsed.interpretation.clone())),
        _ => (None, None),
    };

    ThemeInterpretationRecord {
        id: Uuid::new_v4(),
        user_id: req.user_id,
        theme_type: req.theme_type,
        theme_key: req.theme_key.clone(),
        cards: req.cards.clone(),
        interpretation_en: parsed.interpretation.clone(),
        interpretation_zh: zh,
        interpretation_ja: ja,
        theme_names: Some(parsed.keywords.clone()).filter(|k| !k.is_empty()),
        generated_at: now,
        expires_at: now + Duration::days(THEME_TTL_DAYS),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{GenerationResult, LlmError, TokenUsage};
    use crate::models::reading::{Interpretation, Interpretations, ReadingRecord, ReadingType};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubGenerator {
        response: Option<String>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubGenerator {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Some(text.to_string()),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<GenerationResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.prompt);

            match &self.response {
                Some(text) => Ok(GenerationResult {
                    text: text.clone(),
                    tokens_used: TokenUsage {
                        input: 10,
                        output: 10,
                    },
                    provider: "stub".to_string(),
                    model: "stub".to_string(),
                }),
                None => Err(LlmError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct StubThemeStore {
        row: Mutex<Option<ThemeInterpretationRecord>>,
        upserts: AtomicUsize,
        fail_upsert: bool,
    }

    #[async_trait]
    impl ThemeStore for StubThemeStore {
        async fn find(
            &self,
            _user_id: Uuid,
            _theme_key: &str,
        ) -> Result<Option<ThemeInterpretationRecord>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn upsert(&self, record: &ThemeInterpretationRecord) -> Result<()> {
            self.upserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_upsert {
                anyhow::bail!("no table");
            }
            *self.row.lock().unwrap() = Some(record.clone());
            Ok(())
        }
    }

    struct StubReadingStore {
        readings: Vec<ReadingRecord>,
    }

    #[async_trait]
    impl ReadingStore for StubReadingStore {
        async fn count_for_user(&self, _user_id: Uuid) -> Result<i64> {
            Ok(self.readings.len() as i64)
        }
        async fn recent_for_user(&self, _user_id: Uuid, limit: i64) -> Result<Vec<ReadingRecord>> {
            Ok(self.readings.iter().take(limit as usize).cloned().collect())
        }
        async fn questions_for_user(
            &self,
            _user_id: Uuid,
        ) -> Result<Vec<(String, DateTime<Utc>)>> {
            Ok(vec![])
        }
    }

    fn empty_readings() -> StubReadingStore {
        StubReadingStore { readings: vec![] }
    }

    fn request(cards: Option<Vec<&str>>) -> ThemeRequest {
        ThemeRequest {
            user_id: Uuid::new_v4(),
            theme_type: ThemeType::RecurringTheme,
            theme_key: "card:the-tower".to_string(),
            cards: cards.map(|c| c.into_iter().map(str::to_string).collect()),
            title: None,
            description: None,
            structural_stats_over_time: None,
            locale: Locale::En,
            force_regenerate: false,
        }
    }

    fn fresh_row(now: DateTime<Utc>) -> ThemeInterpretationRecord {
        ThemeInterpretationRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            theme_type: ThemeType::RecurringTheme,
            theme_key: "card:the-tower".to_string(),
            cards: Some(vec!["The Tower".to_string()]),
            interpretation_en: "cached interpretation".to_string(),
            interpretation_zh: Some("快取的解讀".to_string()),
            interpretation_ja: None,
            theme_names: Some("Upheaval vs Renewal".to_string()),
            generated_at: now - Duration::days(1),
            expires_at: now + Duration::days(1),
            metadata: serde_json::json!({}),
        }
    }

    const WELL_FORMED: &str =
        "Keywords: Upheaval vs Renewal\nInterpretation: The Tower keeps arriving because \
         the old structure is done holding.";

    #[tokio::test]
    async fn test_fresh_row_served_from_cache() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore {
            row: Mutex::new(Some(fresh_row(now))),
            ..Default::default()
        };

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await
            .unwrap();

        assert_eq!(result.interpretation, "cached interpretation");
        assert_eq!(result.theme_names.as_deref(), Some("Upheaval vs Renewal"));
        assert_eq!(result.summary, "");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0, "no generation call");
    }

    #[tokio::test]
    async fn test_cached_locale_variant_selected() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm);
        let themes = StubThemeStore {
            row: Mutex::new(Some(fresh_row(now))),
            ..Default::default()
        };
        let mut req = request(Some(vec!["The Tower"]));
        req.locale = Locale::ZhTw;

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &req, now)
            .await
            .unwrap();
        assert_eq!(result.interpretation, "快取的解讀");
    }

    #[tokio::test]
    async fn test_expired_row_triggers_regeneration() {
        let now = Utc::now();
        let mut row = fresh_row(now);
        row.expires_at = now - Duration::seconds(1);
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore {
            row: Mutex::new(Some(row)),
            ..Default::default()
        };

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await
            .unwrap();

        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
        assert!(result.interpretation.contains("old structure"));
        assert_eq!(themes.upserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_theme_names_triggers_regeneration() {
        let now = Utc::now();
        let mut row = fresh_row(now);
        row.theme_names = None;
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore {
            row: Mutex::new(Some(row)),
            ..Default::default()
        };

        service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await
            .unwrap();
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_supplied_stats_invalidate_row_without_them() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore {
            row: Mutex::new(Some(fresh_row(now))),
            ..Default::default()
        };
        let mut req = request(Some(vec!["The Tower", "The Moon"]));
        req.structural_stats_over_time = Some(StructuralStatsOverTime::default());

        service
            .get_theme_interpretation(&empty_readings(), &themes, &req, now)
            .await
            .unwrap();
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1, "row lacks stats metadata");

        // The regenerated row carries the stats, so a second call is cached.
        service
            .get_theme_interpretation(&empty_readings(), &themes, &req, now)
            .await
            .unwrap();
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_regenerate_bypasses_cache() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore {
            row: Mutex::new(Some(fresh_row(now))),
            ..Default::default()
        };
        let mut req = request(Some(vec!["The Tower"]));
        req.force_regenerate = true;

        service
            .get_theme_interpretation(&empty_readings(), &themes, &req, now)
            .await
            .unwrap();
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_yields_none() {
        let now = Utc::now();
        let service = ThemeService::new(StubGenerator::failing());
        let themes = StubThemeStore::default();

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await;
        assert!(result.is_none());
        assert_eq!(themes.upserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_generation_yields_none() {
        let now = Utc::now();
        let service = ThemeService::new(StubGenerator::answering("   \n  "));
        let themes = StubThemeStore::default();

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_upsert_failure_still_serves_result() {
        let now = Utc::now();
        let service = ThemeService::new(StubGenerator::answering(WELL_FORMED));
        let themes = StubThemeStore {
            fail_upsert: true,
            ..Default::default()
        };

        let result = service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await;
        assert!(result.is_some(), "compute-without-persist degradation");
    }

    #[tokio::test]
    async fn test_record_written_with_eight_day_ttl() {
        let now = Utc::now();
        let service = ThemeService::new(StubGenerator::answering(WELL_FORMED));
        let themes = StubThemeStore::default();

        service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await
            .unwrap();

        let row = themes.row.lock().unwrap().clone().unwrap();
        assert_eq!(row.expires_at, now + Duration::days(8));
        assert_eq!(row.theme_names.as_deref(), Some("Upheaval vs Renewal"));
    }

    #[tokio::test]
    async fn test_multi_card_prompt_gets_unrestricted_history() {
        let now = Utc::now();
        let long_question = "a question far longer than any free-tier block would ever keep \
                             around after truncation kicks in at eighty characters total"
            .to_string();
        let readings = StubReadingStore {
            readings: (0..3)
                .map(|i| ReadingRecord {
                    id: Uuid::new_v4(),
                    user_id: Uuid::new_v4(),
                    question: Some(long_question.clone()),
                    cards_drawn: vec![],
                    interpretations: Interpretations {
                        traditional: Some(Interpretation {
                            content: "steady".to_string(),
                        }),
                        ..Default::default()
                    },
                    conversation: vec![],
                    reflection: None,
                    created_at: now - Duration::days(i + 1),
                    reading_type: ReadingType::Spread,
                })
                .collect(),
        };

        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore::default();
        let mut req = request(Some(vec!["The Tower", "The Moon"]));
        req.structural_stats_over_time = Some(StructuralStatsOverTime {
            early: crate::models::theme::StructuralPeriodStats {
                major_pct: 10.0,
                ..Default::default()
            },
            middle: Default::default(),
            late: crate::models::theme::StructuralPeriodStats {
                major_pct: 30.0,
                ..Default::default()
            },
        });

        service
            .get_theme_interpretation(&readings, &themes, &req, now)
            .await
            .unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(
            prompt.contains(&long_question),
            "apex-forced load keeps questions untruncated"
        );
        assert!(prompt.contains("significantly more"));
        assert!(prompt.contains("**LESSONS:**"));
    }

    #[tokio::test]
    async fn test_single_card_prompt_family() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore::default();

        service
            .get_theme_interpretation(&empty_readings(), &themes, &request(Some(vec!["The Tower"])), now)
            .await
            .unwrap();

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("The card The Tower keeps returning"));
        assert!(prompt.contains("150-200 word"));
    }

    #[tokio::test]
    async fn test_batch_caps_in_flight_generations() {
        let now = Utc::now();
        let llm = StubGenerator::answering(WELL_FORMED);
        let service = ThemeService::new(llm.clone());
        let themes = StubThemeStore::default();
        let readings = empty_readings();

        let requests: Vec<ThemeRequest> = (0..7)
            .map(|i| {
                let mut r = request(Some(vec!["The Tower"]));
                r.theme_key = format!("card:{i}");
                r.force_regenerate = true;
                r
            })
            .collect();

        let results = service
            .generate_theme_interpretations(&readings, &themes, &requests, now)
            .await;

        assert_eq!(results.len(), 7);
        assert!(results.iter().all(Option::is_some));
        assert!(
            llm.max_in_flight.load(Ordering::SeqCst) <= 3,
            "chunks of 3, awaited fully"
        );
    }
}
