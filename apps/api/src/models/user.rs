use serde::{Deserialize, Serialize};

use crate::catalog::Locale;

/// Subscription level. Gates history depth, truncation aggressiveness, and
/// token budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Adept,
    Apex,
}

/// Narrative voice applied to a reading. Orthogonal to the subscription
/// tier: a free user still picks a style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationStyle {
    #[default]
    Traditional,
    Esoteric,
    Jungian,
}

impl InterpretationStyle {
    /// Human-readable style name for prompt text.
    pub fn display_name(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (InterpretationStyle::Traditional, Locale::ZhTw) => "傳統",
            (InterpretationStyle::Esoteric, Locale::ZhTw) => "神祕學",
            (InterpretationStyle::Jungian, Locale::ZhTw) => "榮格",
            (InterpretationStyle::Traditional, Locale::Ja) => "伝統的",
            (InterpretationStyle::Esoteric, Locale::Ja) => "秘教的",
            (InterpretationStyle::Jungian, Locale::Ja) => "ユング派",
            (InterpretationStyle::Traditional, _) => "traditional",
            (InterpretationStyle::Esoteric, _) => "esoteric",
            (InterpretationStyle::Jungian, _) => "Jungian",
        }
    }
}

/// Optional astrological context. `None` unless the user opted in and has
/// a sun sign on file; moon and rising may still be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBirthContext {
    pub sun_sign: String,
    #[serde(default)]
    pub moon_sign: Option<String>,
    #[serde(default)]
    pub rising_sign: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&SubscriptionTier::Apex).unwrap(),
            r#""apex""#
        );
        let tier: SubscriptionTier = serde_json::from_str(r#""adept""#).unwrap();
        assert_eq!(tier, SubscriptionTier::Adept);
    }

    #[test]
    fn test_style_defaults_to_traditional() {
        assert_eq!(InterpretationStyle::default(), InterpretationStyle::Traditional);
    }

    #[test]
    fn test_display_name_falls_back_to_english() {
        assert_eq!(
            InterpretationStyle::Esoteric.display_name(Locale::Ru),
            "esoteric"
        );
        assert_eq!(
            InterpretationStyle::Jungian.display_name(Locale::ZhTw),
            "榮格"
        );
    }
}
