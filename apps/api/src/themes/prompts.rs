// All LLM prompt constants for the theme module.
// Templates use {placeholder} slots filled with str::replace before sending.

use crate::catalog::Locale;

/// System prompt for theme analysis. Themes are analytic, not a live
/// reading, so the voice is steadier than the per-style reading prompts.
pub const THEME_SYSTEM: &str = "You are a reflective tarot analyst who studies a seeker's \
    reading history for long-running themes. You write warm, grounded prose addressed \
    directly to the seeker. You never predict death, medical outcomes, or legal results, \
    and you never present a pattern as fate — it is material for reflection.";

/// Single recurring card. Replace: {card}, {language_instruction}.
pub const SINGLE_CARD_TEMPLATE: &str = "\
The card {card} keeps returning across this seeker's readings.

Write a 150-200 word interpretation of why this card may be recurring for this seeker \
right now. Speak directly to the seeker. Ground it in the card's core symbolism and in \
what repetition itself signals.

Begin with a single line in the form \"Keywords: x vs y\" or \"Keywords: x, y, z\", \
then the interpretation.

{language_instruction}";

/// Multiple recurring cards / structural trend.
/// Replace: {cards}, {history}, {structural_shifts}, {language_instruction}.
pub const MULTI_CARD_TEMPLATE: &str = "\
These cards keep returning across the seeker's readings: {cards}.

Reading history for context:
{history}

Structural shifts across the early, middle, and recent portions of the history:
{structural_shifts}

Respond in EXACTLY this format:

Keywords: x vs y
(or, when the cards pull together rather than against each other: Keywords: x, y, z)

Interpretation:
Three to four paragraphs weaving the recurring cards and the structural shifts into one \
account of this period of the seeker's life. The final paragraph MUST begin with \
**LESSONS:** and distill what this period is teaching the seeker.

{language_instruction}";

/// Anomaly or generic trend. Replace: {title}, {description},
/// {language_instruction}.
pub const GENERIC_THEME_TEMPLATE: &str = "\
A pattern has surfaced in the seeker's reading history: {title}.
{description}

Write a 150-200 word interpretation of what this pattern may mean for the seeker right \
now. Speak directly to the seeker.

Begin with a single line in the form \"Keywords: x vs y\" or \"Keywords: x, y, z\", \
then the interpretation.

{language_instruction}";

/// Renders the language instruction appended to every theme prompt.
pub fn language_instruction(locale: Locale) -> String {
    let language = match locale {
        Locale::En => "English",
        Locale::ZhTw => "Traditional Chinese",
        Locale::Ja => "Japanese",
        Locale::Es => "Spanish",
        Locale::Ru => "Russian",
        Locale::Pt => "Portuguese",
    };
    format!("Respond in {language}.")
}
