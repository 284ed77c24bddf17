//! Prompt Assembler — composes the full prompt bundle for an initial
//! reading or a follow-up from question, history, patterns, card data, and
//! optional birth-chart context.
//!
//! Every input, including "now", arrives as a parameter: the same config
//! always yields the same bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{labels, system_prompt, Locale};
use crate::history::patterns::detect_recurring_themes;
use crate::history::store::ReadingStore;
use crate::history::{load_recent_reading_history, HistoryParams};
use crate::models::card::DrawnCard;
use crate::models::reading::{Message, MessageRole};
use crate::models::user::{InterpretationStyle, SubscriptionTier, UserBirthContext};
use crate::readings::card_context::extract_card_context;

const READING_TEMPERATURE: f32 = 0.7;
/// History depth effectively unlimited for apex and beta testers; the
/// loader clamps it to what the user actually has.
const UNLIMITED_HISTORY: usize = 1000;
/// Conversation turns carried into a follow-up prompt bundle.
const FOLLOW_UP_TURNS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Everything the AI-generation collaborator needs for one call.
#[derive(Debug, Clone, Serialize)]
pub struct PromptBundle {
    pub prompt: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub language: Locale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitialPromptConfig {
    pub user_id: Uuid,
    pub question: String,
    pub cards: Vec<DrawnCard>,
    pub style: InterpretationStyle,
    pub tier: SubscriptionTier,
    pub locale: Locale,
    #[serde(default)]
    pub is_beta_tester: bool,
    #[serde(default)]
    pub birth_context: Option<UserBirthContext>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpPromptConfig {
    pub original_question: Option<String>,
    pub cards: Vec<DrawnCard>,
    #[serde(default)]
    pub conversation: Vec<Message>,
    pub new_question: String,
    pub style: InterpretationStyle,
    pub locale: Locale,
}

// ────────────────────────────────────────────────────────────────────────────
// Budgets
// ────────────────────────────────────────────────────────────────────────────

/// Total token budget for an initial reading, by style. Deeper symbolic
/// styles get more room.
pub fn initial_token_budget(style: InterpretationStyle) -> u32 {
    match style {
        InterpretationStyle::Traditional => 2200,
        InterpretationStyle::Esoteric => 2800,
        InterpretationStyle::Jungian => 3200,
    }
}

/// Follow-ups are conversational, not full readings; the budget is tighter.
pub fn follow_up_token_budget(style: InterpretationStyle) -> u32 {
    match style {
        InterpretationStyle::Traditional => 600,
        InterpretationStyle::Esoteric => 800,
        InterpretationStyle::Jungian => 1000,
    }
}

/// How many past readings to describe, by tier, bumped when the seeker is
/// circling a recurring question.
pub fn smart_history_count(
    tier: SubscriptionTier,
    is_recurring: bool,
    is_beta_tester: bool,
) -> usize {
    if is_beta_tester {
        return UNLIMITED_HISTORY;
    }
    match (tier, is_recurring) {
        (SubscriptionTier::Free, false) => 3,
        (SubscriptionTier::Free, true) => 5,
        (SubscriptionTier::Adept, false) => 5,
        (SubscriptionTier::Adept, true) => 8,
        (SubscriptionTier::Apex, _) => UNLIMITED_HISTORY,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Initial reading
// ────────────────────────────────────────────────────────────────────────────

/// Builds the prompt bundle for an initial reading.
///
/// History and recurring-theme lookups are best-effort: a store failure
/// silently shrinks the prompt rather than failing the build.
pub async fn build_initial_tarot_prompt(
    store: &dyn ReadingStore,
    cfg: &InitialPromptConfig,
    now: DateTime<Utc>,
) -> PromptBundle {
    let l = labels(cfg.locale);
    let mut sections: Vec<String> = Vec::new();

    let question = cfg.question.trim();
    if !question.is_empty() {
        sections.push(format!("{} \"{question}\"", l.seeker_asks));
    }

    let recurring =
        detect_recurring_themes(store, cfg.user_id, question, cfg.locale, now).await;

    let count = smart_history_count(cfg.tier, recurring.is_some(), cfg.is_beta_tester);
    let history = load_recent_reading_history(
        store,
        &HistoryParams {
            user_id: cfg.user_id,
            locale: cfg.locale,
            count,
            include_conversations: cfg.tier != SubscriptionTier::Free,
            exclude_daily_cards: false,
            tier: cfg.tier,
            is_beta_tester: cfg.is_beta_tester,
            now,
        },
    )
    .await;
    if !history.is_empty() {
        sections.push(history);
    }

    if let Some(note) = recurring {
        sections.push(note);
    }

    sections.push(render_card_section(&cfg.cards, cfg.style, cfg.locale));

    if let Some(birth) = &cfg.birth_context {
        sections.push(render_birth_line(birth, cfg.locale));
    }

    PromptBundle {
        prompt: sections.join("\n\n"),
        system_prompt: system_prompt(cfg.style, cfg.locale).to_string(),
        temperature: READING_TEMPERATURE,
        max_tokens: initial_token_budget(cfg.style),
        language: cfg.locale,
    }
}

fn render_card_section(cards: &[DrawnCard], style: InterpretationStyle, locale: Locale) -> String {
    let l = labels(locale);
    let mut lines = vec![l.cards_header.to_string()];

    for (i, card) in cards.iter().enumerate() {
        let ctx = extract_card_context(card, style, locale);
        let orientation = if ctx.reversed { l.reversed } else { l.upright };
        lines.push(format!(
            "{}. {} - {} ({orientation})",
            i + 1,
            ctx.title,
            ctx.position
        ));
        if !ctx.keywords.is_empty() {
            lines.push(format!("   {}: {}", l.keywords, ctx.keywords.join(", ")));
        }
        if !ctx.meaning.is_empty() {
            lines.push(format!("   {}", ctx.meaning));
        }
        if style != InterpretationStyle::Traditional {
            let correspondences: Vec<&str> = [ctx.element.as_deref(), ctx.astro.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !correspondences.is_empty() {
                lines.push(format!(
                    "   {}: {}",
                    l.element_astrology,
                    correspondences.join(" / ")
                ));
            }
        }
    }

    lines.join("\n")
}

fn render_birth_line(birth: &UserBirthContext, locale: Locale) -> String {
    let l = labels(locale);
    let mut parts = vec![format!("{} {}", l.sun_sign, birth.sun_sign)];
    if let Some(moon) = &birth.moon_sign {
        parts.push(format!("{} {moon}", l.moon_sign));
    }
    if let Some(rising) = &birth.rising_sign {
        parts.push(format!("{} {rising}", l.rising_sign));
    }
    format!("{} {}", l.birth_context, parts.join(", "))
}

// ────────────────────────────────────────────────────────────────────────────
// Follow-up
// ────────────────────────────────────────────────────────────────────────────

/// Builds the prompt bundle for a conversational follow-up: the original
/// reading's frame plus the last few turns plus the new question.
pub fn build_follow_up_prompt(cfg: &FollowUpPromptConfig) -> PromptBundle {
    let l = labels(cfg.locale);
    let mut sections: Vec<String> = Vec::new();

    if let Some(question) = cfg
        .original_question
        .as_deref()
        .filter(|q| !q.trim().is_empty())
    {
        sections.push(format!("{}: \"{}\"", l.original_question, question.trim()));
    }

    let mut card_lines = vec![l.cards_header.to_string()];
    for (i, card) in cfg.cards.iter().enumerate() {
        let orientation = if card.reversed { l.reversed } else { l.upright };
        card_lines.push(format!(
            "{}. {} - {} ({orientation})",
            i + 1,
            card.title.resolve(cfg.locale),
            card.position
        ));
    }
    sections.push(card_lines.join("\n"));

    let recent = render_conversation(&cfg.conversation, FOLLOW_UP_TURNS);
    if !recent.is_empty() {
        sections.push(format!("{}:\n{recent}", l.conversation_so_far));
    }

    sections.push(format!("{}: \"{}\"", l.new_question, cfg.new_question.trim()));

    PromptBundle {
        prompt: sections.join("\n\n"),
        system_prompt: system_prompt(cfg.style, cfg.locale).to_string(),
        temperature: READING_TEMPERATURE,
        max_tokens: follow_up_token_budget(cfg.style),
        language: cfg.locale,
    }
}

/// Renders the last `turns` messages, system messages as bracketed asides.
pub fn render_conversation(conversation: &[Message], turns: usize) -> String {
    let start = conversation.len().saturating_sub(turns);
    conversation[start..]
        .iter()
        .map(|m| match m.role {
            MessageRole::User => format!("Seeker: {}", m.content),
            MessageRole::Assistant => format!("Reader: {}", m.content),
            MessageRole::System => format!("[{}]", m.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
