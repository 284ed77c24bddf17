use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{labels, Labels, Locale};
use crate::history::dates::relative_date_label;
use crate::history::highlights::extract_conversation_highlights;
use crate::history::patterns::detect_salient_patterns;
use crate::history::store::ReadingStore;
use crate::models::reading::{ReadingRecord, ReadingType};
use crate::models::user::SubscriptionTier;

const QUESTION_LIMIT: usize = 80;
const REFLECTION_LIMIT: usize = 100;
const CARD_NAME_LIMIT: usize = 3;
const HIGHLIGHT_COUNT: usize = 2;
const FULL_HISTORY_HIGHLIGHT_COUNT: usize = 5;
const EXCERPT_LIMIT: usize = 150;
/// Character budgets for the assembled history text on capped tiers.
const SMALL_WINDOW_BUDGET: usize = 2000;
const LARGE_WINDOW_BUDGET: usize = 3500;

#[derive(Debug, Clone)]
pub struct HistoryParams {
    pub user_id: Uuid,
    pub locale: Locale,
    pub count: usize,
    pub include_conversations: bool,
    pub exclude_daily_cards: bool,
    pub tier: SubscriptionTier,
    pub is_beta_tester: bool,
    pub now: DateTime<Utc>,
}

impl HistoryParams {
    pub fn has_full_history(&self) -> bool {
        self.tier == SubscriptionTier::Apex || self.is_beta_tester
    }
}

/// Loads a user's recent readings and renders them into the compact text
/// block the prompt assembler embeds. Returns an empty string whenever the
/// store fails or there is nothing to compare against (≤1 reading): history
/// is an enrichment, and its absence must never abort a prompt build.
pub async fn load_recent_reading_history(
    store: &dyn ReadingStore,
    params: &HistoryParams,
) -> String {
    let total = match store.count_for_user(params.user_id).await {
        Ok(t) => t,
        Err(e) => {
            warn!("History count failed, omitting history: {e}");
            return String::new();
        }
    };
    if total <= 1 {
        return String::new();
    }

    // Never describe more readings than the user has beyond the current one.
    let count = params.count.min((total - 1) as usize);
    if count == 0 {
        return String::new();
    }

    // Over-fetch to leave room for daily-card de-duplication.
    let raw = match store
        .recent_for_user(params.user_id, (2 * count) as i64)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("History fetch failed, omitting history: {e}");
            return String::new();
        }
    };

    let mut filtered = filter_readings(raw, params.exclude_daily_cards);
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered.truncate(count);
    if filtered.is_empty() {
        return String::new();
    }

    let l = labels(params.locale);
    let patterns = detect_salient_patterns(&filtered, params.locale);
    let full = params.has_full_history();

    let blocks: Vec<String> = filtered
        .iter()
        .map(|reading| render_reading_block(reading, params, l, full))
        .collect();

    let mut kept = blocks;
    let mut assembled = assemble(l.history_header, &patterns, &kept);

    if !full {
        let budget = if count <= 3 {
            SMALL_WINDOW_BUDGET
        } else {
            LARGE_WINDOW_BUDGET
        };
        // Trim whole reading blocks from the tail until under budget; the
        // header line always survives.
        while assembled.chars().count() > budget && !kept.is_empty() {
            kept.pop();
            assembled = assemble(l.history_header, &patterns, &kept);
        }
    }

    assembled
}

/// Keeps all spread readings; daily cards collapse to at most one per
/// calendar day (the rows arrive newest first, so the first seen wins),
/// or disappear entirely when excluded.
fn filter_readings(raw: Vec<ReadingRecord>, exclude_daily_cards: bool) -> Vec<ReadingRecord> {
    let mut seen_days: HashSet<chrono::NaiveDate> = HashSet::new();
    raw.into_iter()
        .filter(|reading| match reading.reading_type {
            ReadingType::Spread => true,
            ReadingType::DailyCard => {
                !exclude_daily_cards && seen_days.insert(reading.created_at.date_naive())
            }
        })
        .collect()
}

fn assemble(header: &str, patterns: &str, blocks: &[String]) -> String {
    let mut sections: Vec<&str> = vec![header];
    if !patterns.is_empty() {
        sections.push(patterns);
    }
    let joined = blocks.join("\n\n");
    if !joined.is_empty() {
        sections.push(&joined);
    }
    sections.join("\n\n")
}

fn render_reading_block(
    reading: &ReadingRecord,
    params: &HistoryParams,
    l: &Labels,
    full: bool,
) -> String {
    let date = relative_date_label(reading.created_at, params.now, params.locale);
    let kind = match reading.reading_type {
        ReadingType::Spread => l.spread_reading,
        ReadingType::DailyCard => l.daily_card,
    };

    let mut lines = vec![format!("- {date} ({kind})")];

    if let Some(question) = reading.question.as_deref().filter(|q| !q.trim().is_empty()) {
        let shown = if full {
            question.to_string()
        } else {
            truncate_with_ellipsis(question, QUESTION_LIMIT)
        };
        lines.push(format!("  {}: \"{shown}\"", l.question));
    }

    if !reading.cards_drawn.is_empty() {
        let names: Vec<&str> = reading
            .cards_drawn
            .iter()
            .map(|c| c.title.resolve(params.locale))
            .collect();
        let shown: Vec<&str> = if full {
            names
        } else {
            names.into_iter().take(CARD_NAME_LIMIT).collect()
        };
        lines.push(format!("  {}: {}", l.cards, shown.join(", ")));
    }

    if let Some(text) = reading.interpretations.any() {
        let excerpt = if full {
            text.to_string()
        } else {
            first_clause(text)
        };
        if !excerpt.is_empty() {
            lines.push(format!("  {}: {excerpt}", l.interpretation));
        }
    }

    if params.include_conversations && !reading.conversation.is_empty() {
        let max = if full {
            FULL_HISTORY_HIGHLIGHT_COUNT
        } else {
            HIGHLIGHT_COUNT
        };
        let highlights = extract_conversation_highlights(&reading.conversation, max, full);
        if !highlights.is_empty() {
            lines.push(format!("  {}: {}", l.insights, highlights.join(" • ")));
        }
    }

    if let Some(reflection) = reading
        .reflection
        .as_deref()
        .filter(|r| !r.trim().is_empty())
    {
        let shown = if full {
            reflection.to_string()
        } else {
            truncate_with_ellipsis(reflection, REFLECTION_LIMIT)
        };
        lines.push(format!("  {}: {shown}", l.reflection));
    }

    lines.join("\n")
}

/// Truncates to `max` characters total, spending the last three on "...".
fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", head.trim_end())
}

/// First clause of an interpretation, capped. Coarse: cuts at the first
/// sentence-ish delimiter, not grammar.
fn first_clause(text: &str) -> String {
    let trimmed = text.trim();
    let clause = match trimmed.find(['.', '?', '!', ';']) {
        Some(pos) => &trimmed[..=pos],
        None => trimmed,
    };
    truncate_with_ellipsis(clause, EXCERPT_LIMIT)
}
