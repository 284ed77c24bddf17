#![allow(dead_code)]

//! Locale/Label Catalog — static text the pipeline emits, keyed by locale,
//! plus the (interpretation style, locale) system-prompt table.
//!
//! Pure data with lookup-and-fallback. The only behavior here is the
//! fallback chain: unknown locale tag → English, missing system-prompt
//! combo → English traditional.

pub mod labels;
pub mod system_prompts;

pub use labels::{labels, Labels};
pub use system_prompts::system_prompt;

use serde::{Deserialize, Serialize};

/// Display/output language for prompts and labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "pt")]
    Pt,
}

impl Locale {
    /// Parses a BCP-47-ish tag. Unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "zh-TW" | "zh-Hant" | "zh" => Locale::ZhTw,
            "ja" => Locale::Ja,
            "es" => Locale::Es,
            "ru" => Locale::Ru,
            "pt" | "pt-BR" => Locale::Pt,
            _ => Locale::En,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
            Locale::Ja => "ja",
            Locale::Es => "es",
            Locale::Ru => "ru",
            Locale::Pt => "pt",
        }
    }
}
