use serde::{Deserialize, Serialize};

use crate::catalog::Locale;

/// Major/minor arcana tag carried on a drawn card when the deck provides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major,
    Minor,
}

/// A card title as stored: either a plain string or a per-locale object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardTitle {
    Plain(String),
    Localized { en: String, zh: Option<String> },
}

impl CardTitle {
    /// Resolves the title for a locale. The Chinese variant is used only
    /// for zh-TW; every other locale gets the English title.
    pub fn resolve(&self, locale: Locale) -> &str {
        match self {
            CardTitle::Plain(s) => s,
            CardTitle::Localized { en, zh } => match locale {
                Locale::ZhTw => zh.as_deref().unwrap_or(en),
                _ => en,
            },
        }
    }

    /// Canonical English title, used for frequency tallies across readings.
    pub fn canonical(&self) -> &str {
        match self {
            CardTitle::Plain(s) => s,
            CardTitle::Localized { en, .. } => en,
        }
    }
}

/// Meaning text with an optional Chinese variant. Japanese falls back to
/// English; the remaining locales are prompt-level concerns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub zh: Option<String>,
}

impl LocalizedText {
    pub fn resolve(&self, locale: Locale) -> &str {
        match locale {
            Locale::ZhTw => self.zh.as_deref().unwrap_or(&self.en),
            _ => &self.en,
        }
    }
}

/// One card as drawn in a reading: identity, spread position, orientation,
/// and the static card data needed to describe it in a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawnCard {
    pub title: CardTitle,
    pub position: String,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub arcana: Option<Arcana>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub element: Option<String>,
    #[serde(default)]
    pub astrology: Option<String>,
    #[serde(default)]
    pub upright_meaning: LocalizedText,
    #[serde(default)]
    pub reversed_meaning: LocalizedText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_resolves_as_is() {
        let title = CardTitle::Plain("The Tower".to_string());
        assert_eq!(title.resolve(Locale::ZhTw), "The Tower");
        assert_eq!(title.resolve(Locale::En), "The Tower");
    }

    #[test]
    fn test_localized_title_picks_zh_only_for_zh_tw() {
        let title = CardTitle::Localized {
            en: "The Tower".to_string(),
            zh: Some("高塔".to_string()),
        };
        assert_eq!(title.resolve(Locale::ZhTw), "高塔");
        assert_eq!(title.resolve(Locale::Ja), "The Tower");
        assert_eq!(title.resolve(Locale::Es), "The Tower");
    }

    #[test]
    fn test_untagged_title_deserializes_both_shapes() {
        let plain: CardTitle = serde_json::from_str(r#""The Moon""#).unwrap();
        assert_eq!(plain, CardTitle::Plain("The Moon".to_string()));

        let localized: CardTitle =
            serde_json::from_str(r#"{"en": "The Moon", "zh": "月亮"}"#).unwrap();
        assert_eq!(localized.resolve(Locale::ZhTw), "月亮");
    }

    #[test]
    fn test_meaning_ja_falls_back_to_english() {
        let text = LocalizedText {
            en: "sudden upheaval, revelation".to_string(),
            zh: Some("驟變，啟示".to_string()),
        };
        assert_eq!(text.resolve(Locale::Ja), "sudden upheaval, revelation");
        assert_eq!(text.resolve(Locale::ZhTw), "驟變，啟示");
    }

    #[test]
    fn test_drawn_card_minimal_json() {
        let card: DrawnCard = serde_json::from_str(
            r#"{"title": "The Fool", "position": "present"}"#,
        )
        .unwrap();
        assert!(!card.reversed);
        assert!(card.keywords.is_empty());
        assert!(card.upright_meaning.en.is_empty());
    }
}
