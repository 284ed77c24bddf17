#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::card::DrawnCard;
use crate::models::user::InterpretationStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    Spread,
    DailyCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// One turn of the follow-up conversation attached to a reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// One style-tagged interpretation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    pub content: String,
}

/// The set of interpretations generated for a reading, keyed by style.
/// A reading has at least the style it was created with; others are
/// generated on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interpretations {
    #[serde(default)]
    pub traditional: Option<Interpretation>,
    #[serde(default)]
    pub esoteric: Option<Interpretation>,
    #[serde(default)]
    pub jungian: Option<Interpretation>,
}

impl Interpretations {
    pub fn for_style(&self, style: InterpretationStyle) -> Option<&str> {
        let slot = match style {
            InterpretationStyle::Traditional => &self.traditional,
            InterpretationStyle::Esoteric => &self.esoteric,
            InterpretationStyle::Jungian => &self.jungian,
        };
        slot.as_ref().map(|i| i.content.as_str())
    }

    /// First interpretation present, in style order. Used when a specific
    /// style is unavailable and any body text will do.
    pub fn any(&self) -> Option<&str> {
        self.traditional
            .as_ref()
            .or(self.esoteric.as_ref())
            .or(self.jungian.as_ref())
            .map(|i| i.content.as_str())
    }
}

/// One tarot draw event. Read-only to the prompt pipeline: it is fetched,
/// aggregated, and rendered into text, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: Option<String>,
    pub cards_drawn: Vec<DrawnCard>,
    #[serde(default)]
    pub interpretations: Interpretations,
    #[serde(default)]
    pub conversation: Vec<Message>,
    #[serde(default)]
    pub reflection: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reading_type: ReadingType,
}
