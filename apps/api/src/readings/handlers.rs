//! Axum route handlers for prompt assembly.
//!
//! "now" is resolved here, at the edge, so the assembler itself stays a
//! pure function of its inputs.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::AppError;
use crate::readings::assembler::{
    build_follow_up_prompt, build_initial_tarot_prompt, FollowUpPromptConfig,
    InitialPromptConfig, PromptBundle,
};
use crate::state::AppState;

/// POST /api/v1/readings/prompt
///
/// Builds the full prompt bundle for an initial reading: question, history,
/// patterns, card data, optional birth context.
pub async fn handle_initial_prompt(
    State(state): State<AppState>,
    Json(config): Json<InitialPromptConfig>,
) -> Result<Json<PromptBundle>, AppError> {
    if config.cards.is_empty() {
        return Err(AppError::Validation("cards cannot be empty".to_string()));
    }

    let bundle = build_initial_tarot_prompt(&state.readings, &config, Utc::now()).await;
    Ok(Json(bundle))
}

/// POST /api/v1/readings/follow-up-prompt
///
/// Builds the lighter conversational prompt bundle for a follow-up turn.
pub async fn handle_follow_up_prompt(
    Json(config): Json<FollowUpPromptConfig>,
) -> Result<Json<PromptBundle>, AppError> {
    if config.new_question.trim().is_empty() {
        return Err(AppError::Validation(
            "new_question cannot be empty".to_string(),
        ));
    }

    Ok(Json(build_follow_up_prompt(&config)))
}
