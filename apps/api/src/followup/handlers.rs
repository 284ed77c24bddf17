//! Axum route handler for the follow-up chat.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::followup::service::{FollowUpContext, FollowUpService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(flatten)]
    pub context: FollowUpContext,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// POST /api/v1/chat/ask
///
/// Answers one follow-up question about a reading. This is the only
/// endpoint that surfaces generation errors to the user directly.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let service = FollowUpService::new(state.llm.clone());
    let answer = service.ask_question(&request.context, &request.question).await?;

    Ok(Json(AskResponse { answer }))
}
