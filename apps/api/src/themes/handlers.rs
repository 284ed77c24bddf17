//! Axum route handlers for theme interpretations.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::theme::ThemeResult;
use crate::state::AppState;
use crate::themes::service::{ThemeRequest, ThemeService};

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub themes: Vec<ThemeRequest>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<Option<ThemeResult>>,
}

/// POST /api/v1/themes/interpretation
///
/// Returns one theme interpretation, cached or freshly generated. A `null`
/// body member means the theme is unavailable right now; the UI renders
/// nothing for it.
pub async fn handle_theme_interpretation(
    State(state): State<AppState>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<Option<ThemeResult>>, AppError> {
    let service = ThemeService::new(state.llm.clone());
    let result = service
        .get_theme_interpretation(&state.readings, &state.themes, &request, Utc::now())
        .await;
    Ok(Json(result))
}

/// POST /api/v1/themes/interpretations
///
/// Batch variant, capped at 3 in-flight generations. Result order matches
/// request order.
pub async fn handle_theme_interpretations(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if request.themes.is_empty() {
        return Err(AppError::Validation("themes cannot be empty".to_string()));
    }

    let service = ThemeService::new(state.llm.clone());
    let results = service
        .generate_theme_interpretations(&state.readings, &state.themes, &request.themes, Utc::now())
        .await;
    Ok(Json(BatchResponse { results }))
}
