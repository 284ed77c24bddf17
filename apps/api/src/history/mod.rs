//! Reading-history pipeline: store access, relative-date labels,
//! conversation highlights, cross-reading pattern detection, and the
//! history text loader that feeds prompt assembly.

pub mod dates;
pub mod highlights;
pub mod loader;
pub mod patterns;
pub mod store;

pub use loader::{load_recent_reading_history, HistoryParams};
pub use store::{PgReadingStore, ReadingStore};
