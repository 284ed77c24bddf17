//! Best-effort parsing of the model's "Keywords: ... / Interpretation: ..."
//! theme response. Models drift from the requested format, so extraction is
//! a prioritized chain of matchers, each returning `Option`, falling
//! through deterministically. The chain may legitimately end with no
//! keywords; interpretation text is always recovered.

use std::sync::OnceLock;

use regex::Regex;

/// Keywords longer than this signal a mis-parse (a sentence swallowed as a
/// tag) and are discarded.
const KEYWORD_LENGTH_LIMIT: usize = 100;
/// Lines inspected by the strict shape matcher.
const STRICT_LINE_WINDOW: usize = 3;
/// Lines inspected by the loose matcher.
const LOOSE_LINE_WINDOW: usize = 5;

/// Tarot-thematic vocabulary used as a last-resort keyword source.
const THEME_VOCABULARY: [&str; 35] = [
    "transformation",
    "liberation",
    "attachment",
    "control",
    "surrender",
    "illusion",
    "truth",
    "intuition",
    "shadow",
    "rebirth",
    "renewal",
    "endings",
    "beginnings",
    "balance",
    "conflict",
    "healing",
    "hope",
    "fear",
    "power",
    "vulnerability",
    "independence",
    "connection",
    "abundance",
    "scarcity",
    "stagnation",
    "movement",
    "clarity",
    "confusion",
    "trust",
    "betrayal",
    "courage",
    "patience",
    "sacrifice",
    "wisdom",
    "innocence",
];

/// Hard-coded fallback tags for cards whose themes recur most often.
const CARD_KEYWORD_TABLE: [(&str, &str); 5] = [
    ("The Tower", "Upheaval vs Renewal"),
    ("The Moon", "Illusion vs Truth"),
    ("The Star", "Hope, Healing, Renewal"),
    ("Death", "Endings vs Beginnings"),
    ("The Fool", "Innocence, Trust, Beginnings"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTheme {
    /// "x vs y" or "x, y, z" tag line; empty when nothing parseable was
    /// found, which callers treat as "no tag available".
    pub keywords: String,
    pub interpretation: String,
}

fn keywords_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*\*{0,2}keywords?\*{0,2}\s*:\s*(.+)$").unwrap())
}

fn interpretation_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*\*{0,2}interpretation\*{0,2}\s*:\s*(.*)$").unwrap())
}

fn opposition_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z][A-Za-z' -]{0,30}\s+(?:vs\.?|versus)\s+[A-Z][A-Za-z' -]{0,30}$")
            .unwrap()
    })
}

fn list_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z' -]*,\s*[A-Za-z][A-Za-z' -]*,\s*[A-Za-z][A-Za-z' -]*$")
            .unwrap()
    })
}

fn capitalized_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:\bbetween\s+)?([A-Z][a-z]+)\s+(?:vs\.?|versus|and)\s+([A-Z][a-z]+)")
            .unwrap()
    })
}

/// Parses a raw theme response into keywords + interpretation.
///
/// Matcher chain, in priority order:
/// 1. A `Keywords:`-labeled line (the requested format).
/// 2. A strict "X vs Y" / "x, y, z" shaped line in the first 3 lines.
/// 3. A looser scan of the first 5 lines (capitalized pairs, comma lists).
/// 4. Thematic vocabulary found in the body, opposition shape preferred.
/// 5. The fixed card→keyword table.
/// Anything over 100 characters is discarded as a mis-parse.
pub fn parse_theme_response(raw: &str) -> ParsedTheme {
    let trimmed = raw.trim();
    let lines: Vec<&str> = trimmed.lines().collect();

    let (keywords, interpretation) = if let Some((idx, kw)) = labeled_keywords(&lines) {
        (kw, body_without_line(&lines, idx))
    } else if let Some((idx, kw)) = shaped_line(&lines, STRICT_LINE_WINDOW) {
        (kw, body_without_line(&lines, idx))
    } else if let Some((idx, kw)) = loose_line(&lines, LOOSE_LINE_WINDOW) {
        (kw, body_without_line(&lines, idx))
    } else if let Some(kw) = vocabulary_keywords(trimmed) {
        (kw, trimmed.to_string())
    } else if let Some(kw) = card_table_keywords(trimmed) {
        (kw, trimmed.to_string())
    } else {
        (String::new(), trimmed.to_string())
    };

    let keywords = if keywords.chars().count() > KEYWORD_LENGTH_LIMIT {
        String::new()
    } else {
        keywords
    };

    ParsedTheme {
        keywords,
        interpretation,
    }
}

/// Strategy 1: the `Keywords:` label, anywhere in the response.
fn labeled_keywords(lines: &[&str]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        keywords_label_re()
            .captures(line)
            .map(|c| (idx, c[1].trim().trim_matches('*').trim().to_string()))
    })
}

/// Strategy 2: an unlabeled line already shaped like a tag.
fn shaped_line(lines: &[&str], window: usize) -> Option<(usize, String)> {
    candidate_lines(lines, window).find_map(|(idx, line)| {
        if opposition_line_re().is_match(line) || list_line_re().is_match(line) {
            Some((idx, line.to_string()))
        } else {
            None
        }
    })
}

/// Strategy 3: looser scan — a capitalized pair joined by vs/versus/and
/// (normalized to "X vs Y"), or any short comma list.
fn loose_line(lines: &[&str], window: usize) -> Option<(usize, String)> {
    candidate_lines(lines, window).find_map(|(idx, line)| {
        if let Some(c) = capitalized_pair_re().captures(line) {
            return Some((idx, format!("{} vs {}", &c[1], &c[2])));
        }
        if line.matches(',').count() >= 2 && line.chars().count() <= 80 {
            return Some((idx, line.to_string()));
        }
        None
    })
}

fn candidate_lines<'a>(
    lines: &'a [&'a str],
    window: usize,
) -> impl Iterator<Item = (usize, &'a str)> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .take(window)
        .map(|(idx, l)| (idx, l.trim().trim_matches('*').trim()))
}

/// Strategy 4: derive keywords from the thematic vocabulary present in the
/// body. An opposition pair of vocabulary words beats a flat list.
fn vocabulary_keywords(body: &str) -> Option<String> {
    let lower = body.to_lowercase();
    let found: Vec<&str> = THEME_VOCABULARY
        .iter()
        .copied()
        .filter(|word| lower.contains(word))
        .collect();
    if found.is_empty() {
        return None;
    }

    // Prefer an explicit opposition between two vocabulary words.
    for caps in capitalized_pair_re().captures_iter(body) {
        let a = caps[1].to_string();
        let b = caps[2].to_string();
        if found.iter().any(|w| a.eq_ignore_ascii_case(w))
            && found.iter().any(|w| b.eq_ignore_ascii_case(w))
        {
            return Some(format!("{a} vs {b}"));
        }
    }

    Some(
        found
            .iter()
            .take(3)
            .map(|w| titlecase(w))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Strategy 5: the fixed card table, keyed on card names in the body.
fn card_table_keywords(body: &str) -> Option<String> {
    CARD_KEYWORD_TABLE
        .iter()
        .find(|(card, _)| body.contains(card))
        .map(|(_, kw)| kw.to_string())
}

/// Interpretation text once a keywords line has been claimed: the labeled
/// `Interpretation:` section when present, otherwise everything except the
/// keywords line.
fn body_without_line(lines: &[&str], skip_idx: usize) -> String {
    if let Some(idx) = lines
        .iter()
        .position(|l| interpretation_label_re().is_match(l))
    {
        let first = interpretation_label_re()
            .captures(lines[idx])
            .map(|c| c[1].trim().trim_matches('*').trim().to_string())
            .unwrap_or_default();
        let mut parts: Vec<&str> = Vec::new();
        if !first.is_empty() {
            parts.push(first.as_str());
        }
        parts.extend(lines[idx + 1..].iter().copied());
        return parts.join("\n").trim().to_string();
    }

    lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != skip_idx)
        .map(|(_, l)| *l)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
