// Theme interpretations: cross-reading patterns (recurring cards,
// anomalies, structural trends) explained by the model and cached with a
// TTL. All LLM calls go through llm_client.

pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod service;
pub mod store;
pub mod structural;

pub use service::{ThemeRequest, ThemeService};
