use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::history::PgReadingStore;
use crate::llm_client::TextGenerator;
use crate::themes::store::PgThemeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The generative-text collaborator. Trait object so tests and future
    /// providers swap in without touching handler code.
    pub llm: Arc<dyn TextGenerator>,
    pub readings: PgReadingStore,
    pub themes: PgThemeStore,
    #[allow(dead_code)]
    pub db: PgPool,
    #[allow(dead_code)]
    pub config: Config,
}
