//! Verbalizes structural drift across the early/middle/late slices of a
//! user's history. Only early→late shifts of at least 5 percentage points
//! are worth narrating; smaller movement is noise.

use crate::models::theme::{StructuralPeriodStats, StructuralStatsOverTime};

const SHIFT_THRESHOLD: f64 = 5.0;
const SUBSTANTIAL_THRESHOLD: f64 = 10.0;
const SIGNIFICANT_THRESHOLD: f64 = 15.0;

fn magnitude_word(delta: f64) -> &'static str {
    let abs = delta.abs();
    if abs >= SIGNIFICANT_THRESHOLD {
        "significantly"
    } else if abs >= SUBSTANTIAL_THRESHOLD {
        "substantially"
    } else {
        "noticeably"
    }
}

fn dimensions(stats: &StructuralPeriodStats) -> [(&'static str, f64); 7] {
    [
        ("Major Arcana", stats.major_pct),
        ("Minor Arcana", stats.minor_pct),
        ("court cards", stats.court_pct),
        ("Wands", stats.wands_pct),
        ("Cups", stats.cups_pct),
        ("Swords", stats.swords_pct),
        ("Pentacles", stats.pentacles_pct),
    ]
}

/// Renders the early→late shifts as short factual sentences for the
/// generation prompt. Returns an empty string when nothing crossed the
/// threshold.
pub fn describe_structural_shifts(stats: &StructuralStatsOverTime) -> String {
    let early = dimensions(&stats.early);
    let late = dimensions(&stats.late);

    let mut lines: Vec<String> = Vec::new();
    for ((name, early_pct), (_, late_pct)) in early.into_iter().zip(late) {
        let delta = late_pct - early_pct;
        if delta.abs() < SHIFT_THRESHOLD {
            continue;
        }
        let direction = if delta > 0.0 { "more" } else { "less" };
        lines.push(format!(
            "{name} appear {} {direction} often than before ({:.0}% early, {:.0}% recently).",
            magnitude_word(delta),
            early_pct,
            late_pct
        ));
    }

    lines.join("\n")
}
