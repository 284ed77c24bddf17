pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::followup;
use crate::readings;
use crate::state::AppState;
use crate::themes;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Prompt assembly
        .route(
            "/api/v1/readings/prompt",
            post(readings::handlers::handle_initial_prompt),
        )
        .route(
            "/api/v1/readings/follow-up-prompt",
            post(readings::handlers::handle_follow_up_prompt),
        )
        // Follow-up chat
        .route("/api/v1/chat/ask", post(followup::handlers::handle_ask))
        // Theme interpretations
        .route(
            "/api/v1/themes/interpretation",
            post(themes::handlers::handle_theme_interpretation),
        )
        .route(
            "/api/v1/themes/interpretations",
            post(themes::handlers::handle_theme_interpretations),
        )
        .with_state(state)
}
