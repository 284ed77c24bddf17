//! Follow-Up Service — answers a seeker's question about a reading they
//! are looking at, using the same tier/locale system prompt as the reading
//! so the voice stays consistent.

use std::sync::Arc;

use serde::Deserialize;
use tracing::error;

use crate::catalog::{labels, system_prompt, Locale};
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::models::card::DrawnCard;
use crate::models::reading::Message;
use crate::models::user::InterpretationStyle;
use crate::readings::assembler::{follow_up_token_budget, render_conversation};

/// Messages of conversation context carried into the prompt.
const CONVERSATION_WINDOW: usize = 5;
const CHAT_TEMPERATURE: f32 = 0.7;

/// Everything about the reading the seeker is asking about.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpContext {
    pub original_question: Option<String>,
    pub cards: Vec<DrawnCard>,
    pub style: InterpretationStyle,
    pub locale: Locale,
    /// The interpretation variant currently on screen, when the UI knows it.
    #[serde(default)]
    pub displayed_interpretation: Option<String>,
    /// The interpretation the reading was created with.
    pub base_interpretation: String,
    #[serde(default)]
    pub conversation: Vec<Message>,
}

pub struct FollowUpService {
    llm: Arc<dyn TextGenerator>,
}

impl FollowUpService {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Answers one follow-up question.
    ///
    /// Generation failures are logged with detail but surfaced as a single
    /// generic message; a blank answer is rejected rather than shown.
    pub async fn ask_question(
        &self,
        ctx: &FollowUpContext,
        user_question: &str,
    ) -> Result<String, AppError> {
        let request = GenerationRequest {
            prompt: build_chat_prompt(ctx, user_question),
            system_prompt: Some(system_prompt(ctx.style, ctx.locale).to_string()),
            max_tokens: Some(follow_up_token_budget(ctx.style)),
            temperature: Some(CHAT_TEMPERATURE),
            language: Some(ctx.locale),
        };

        let result = match self.llm.generate(request).await {
            Ok(r) => r,
            Err(e) => {
                error!("Follow-up generation failed: {e}");
                return Err(AppError::Generation(
                    "Failed to get answer. Please try again.".to_string(),
                ));
            }
        };

        let answer = result.text.trim();
        if answer.is_empty() {
            error!("Follow-up generation returned blank text");
            return Err(AppError::EmptyGeneration);
        }

        Ok(answer.to_string())
    }
}

fn build_chat_prompt(ctx: &FollowUpContext, user_question: &str) -> String {
    let l = labels(ctx.locale);
    let mut sections: Vec<String> = Vec::new();

    if let Some(question) = ctx
        .original_question
        .as_deref()
        .filter(|q| !q.trim().is_empty())
    {
        sections.push(format!("{}: \"{}\"", l.original_question, question.trim()));
    }

    let mut card_lines = vec![l.cards_header.to_string()];
    for (i, card) in ctx.cards.iter().enumerate() {
        card_lines.push(format!(
            "{}. {} - {} ({})",
            i + 1,
            card.title.resolve(ctx.locale),
            card.position,
            if card.reversed { l.reversed } else { l.upright }
        ));
    }
    sections.push(card_lines.join("\n"));

    sections.push(
        l.style_note
            .replace("{style}", ctx.style.display_name(ctx.locale)),
    );

    let shown = ctx
        .displayed_interpretation
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(&ctx.base_interpretation);
    sections.push(format!("{}:\n{shown}", l.shown_interpretation));

    let recent = render_conversation(&ctx.conversation, CONVERSATION_WINDOW);
    if !recent.is_empty() {
        sections.push(format!("{}:\n{recent}", l.conversation_so_far));
    }

    sections.push(format!("{}: \"{}\"", l.new_question, user_question.trim()));
    sections.push(l.formatting_instruction.to_string());

    sections.join("\n\n")
}
