use crate::catalog::Locale;
use crate::models::card::DrawnCard;
use crate::models::user::InterpretationStyle;

/// Keywords carried into a prompt per card.
const KEYWORD_LIMIT: usize = 3;
/// Clauses of meaning text kept for the traditional style.
const TRADITIONAL_CLAUSE_LIMIT: usize = 2;

/// Bounded textual summary of one drawn card, derived per prompt build and
/// discarded once the prompt string is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct CardContext {
    pub title: String,
    pub position: String,
    pub reversed: bool,
    pub keywords: Vec<String>,
    pub element: Option<String>,
    pub astro: Option<String>,
    pub meaning: String,
}

/// Derives the prompt-facing context for a drawn card. Infallible: missing
/// card data degrades to empty strings, which downstream rendering
/// tolerates.
///
/// The meaning is selected by orientation and locale (zh only for zh-TW,
/// everything else English). The traditional style keeps only the first
/// two comma/semicolon-delimited clauses; the other styles differentiate
/// at the template level, so the full meaning passes through.
pub fn extract_card_context(
    card: &DrawnCard,
    style: InterpretationStyle,
    locale: Locale,
) -> CardContext {
    let meaning_text = if card.reversed {
        card.reversed_meaning.resolve(locale)
    } else {
        card.upright_meaning.resolve(locale)
    };

    let meaning = match style {
        InterpretationStyle::Traditional => first_clauses(meaning_text, TRADITIONAL_CLAUSE_LIMIT),
        InterpretationStyle::Esoteric | InterpretationStyle::Jungian => meaning_text.to_string(),
    };

    CardContext {
        title: card.title.resolve(locale).to_string(),
        position: card.position.clone(),
        reversed: card.reversed,
        keywords: card.keywords.iter().take(KEYWORD_LIMIT).cloned().collect(),
        element: card.element.clone(),
        astro: card.astrology.clone(),
        meaning,
    }
}

/// Keeps the first `limit` clauses, cutting at comma or semicolon
/// (half- or full-width). A coarse short form, not sentence-aware.
fn first_clauses(text: &str, limit: usize) -> String {
    let mut seen = 0usize;
    for (idx, c) in text.char_indices() {
        if matches!(c, ',' | ';' | '，' | '；') {
            seen += 1;
            if seen == limit {
                return text[..idx].trim().to_string();
            }
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::{CardTitle, LocalizedText};

    fn tower() -> DrawnCard {
        DrawnCard {
            title: CardTitle::Localized {
                en: "The Tower".to_string(),
                zh: Some("高塔".to_string()),
            },
            position: "obstacle".to_string(),
            reversed: false,
            arcana: None,
            keywords: vec![
                "upheaval".to_string(),
                "revelation".to_string(),
                "awakening".to_string(),
                "collapse".to_string(),
            ],
            element: Some("Fire".to_string()),
            astrology: Some("Mars".to_string()),
            upright_meaning: LocalizedText {
                en: "sudden upheaval, broken pride, disaster averted through truth; build anew"
                    .to_string(),
                zh: Some("驟變，驕傲崩解；在真相中重建".to_string()),
            },
            reversed_meaning: LocalizedText {
                en: "disaster avoided, fear of change, clinging to a crumbling structure"
                    .to_string(),
                zh: None,
            },
        }
    }

    #[test]
    fn test_traditional_keeps_two_clauses() {
        let ctx = extract_card_context(&tower(), InterpretationStyle::Traditional, Locale::En);
        assert_eq!(ctx.meaning, "sudden upheaval, broken pride");
    }

    #[test]
    fn test_esoteric_keeps_full_meaning() {
        let ctx = extract_card_context(&tower(), InterpretationStyle::Esoteric, Locale::En);
        assert_eq!(
            ctx.meaning,
            "sudden upheaval, broken pride, disaster averted through truth; build anew"
        );
    }

    #[test]
    fn test_reversed_selects_reversed_meaning() {
        let mut card = tower();
        card.reversed = true;
        let ctx = extract_card_context(&card, InterpretationStyle::Jungian, Locale::En);
        assert!(ctx.reversed);
        assert!(ctx.meaning.starts_with("disaster avoided"));
    }

    #[test]
    fn test_zh_tw_resolves_chinese_meaning_and_title() {
        let ctx = extract_card_context(&tower(), InterpretationStyle::Traditional, Locale::ZhTw);
        assert_eq!(ctx.title, "高塔");
        assert_eq!(ctx.meaning, "驟變，驕傲崩解");
    }

    #[test]
    fn test_ja_falls_back_to_english() {
        let ctx = extract_card_context(&tower(), InterpretationStyle::Esoteric, Locale::Ja);
        assert_eq!(ctx.title, "The Tower");
        assert!(ctx.meaning.starts_with("sudden upheaval"));
    }

    #[test]
    fn test_keywords_capped_at_three() {
        let ctx = extract_card_context(&tower(), InterpretationStyle::Traditional, Locale::En);
        assert_eq!(ctx.keywords.len(), 3);
        assert_eq!(ctx.keywords[0], "upheaval");
    }

    #[test]
    fn test_empty_meaning_tolerated() {
        let mut card = tower();
        card.upright_meaning = LocalizedText::default();
        let ctx = extract_card_context(&card, InterpretationStyle::Traditional, Locale::En);
        assert_eq!(ctx.meaning, "");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let card = tower();
        let a = extract_card_context(&card, InterpretationStyle::Esoteric, Locale::ZhTw);
        let b = extract_card_context(&card, InterpretationStyle::Esoteric, Locale::ZhTw);
        assert_eq!(a, b);
    }
}
