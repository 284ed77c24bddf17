// Follow-up chat: one question about an existing reading, answered in the
// same voice as the reading itself.

pub mod handlers;
pub mod service;

pub use service::{FollowUpContext, FollowUpService};
