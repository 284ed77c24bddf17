use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{labels, Locale};
use crate::history::store::ReadingStore;
use crate::models::reading::ReadingRecord;

/// A card must appear this many times across the window to count as
/// recurring.
const RECURRING_CARD_THRESHOLD: usize = 3;
/// At most this many recurring cards are reported.
const RECURRING_CARD_LIMIT: usize = 3;
/// Questions "evolve" when distinct questions fall below this share of the
/// total — a crude repetition-ratio heuristic, not semantic similarity.
const QUESTION_DISTINCT_RATIO: f64 = 0.7;
/// Prior identical questions needed before the recurring-theme note fires.
const RECURRING_QUESTION_THRESHOLD: usize = 2;

/// Scans a window of readings for statistical patterns worth surfacing to
/// the model: recurring cards, breakthrough moments, question drift.
/// Returns a bulleted block, or an empty string when there is nothing to
/// say (fewer than 2 readings, or no pattern found).
pub fn detect_salient_patterns(readings: &[ReadingRecord], locale: Locale) -> String {
    if readings.len() < 2 {
        return String::new();
    }

    let l = labels(locale);
    let mut bullets: Vec<String> = Vec::new();

    // Card frequency across the window, tallied by canonical title so the
    // same card matches across locales.
    let mut counts: HashMap<&str, (usize, &str)> = HashMap::new();
    for reading in readings {
        for card in &reading.cards_drawn {
            let entry = counts
                .entry(card.title.canonical())
                .or_insert((0, card.title.resolve(locale)));
            entry.0 += 1;
        }
    }
    let mut recurring: Vec<(&str, usize)> = counts
        .values()
        .filter(|(count, _)| *count >= RECURRING_CARD_THRESHOLD)
        .map(|(count, display)| (*display, *count))
        .collect();
    recurring.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    recurring.truncate(RECURRING_CARD_LIMIT);
    if !recurring.is_empty() {
        let listed = recurring
            .iter()
            .map(|(title, count)| format!("{title} ({count}x)"))
            .collect::<Vec<_>>()
            .join(", ");
        bullets.push(format!("• {}: {listed}", l.recurring_cards));
    }

    // Breakthrough moments: a reflection or any conversation at all.
    let breakthroughs = readings
        .iter()
        .filter(|r| {
            r.reflection.as_deref().is_some_and(|s| !s.trim().is_empty())
                || !r.conversation.is_empty()
        })
        .count();
    if breakthroughs > 0 {
        bullets.push(format!(
            "• {}",
            l.breakthroughs.replace("{n}", &breakthroughs.to_string())
        ));
    }

    // Question drift: heavy repetition of normalized question text.
    let questions: Vec<String> = readings
        .iter()
        .filter_map(|r| r.question.as_deref())
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();
    if questions.len() >= 3 {
        let distinct: HashSet<&String> = questions.iter().collect();
        if (distinct.len() as f64) < QUESTION_DISTINCT_RATIO * questions.len() as f64 {
            bullets.push(format!("• {}", l.question_evolution));
        }
    }

    if bullets.is_empty() {
        return String::new();
    }

    format!("{}\n{}", l.patterns_header, bullets.join("\n"))
}

/// Simple wrapping polynomial hash over a normalized question. Stable
/// across runs so the same question always buckets together.
pub fn question_hash(question: &str) -> u64 {
    question
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
}

/// Checks whether the seeker has asked this exact question before (by
/// hash) and renders a localized note with count and a coarse timeframe.
/// Store failures degrade to `None` — the note is an enrichment, never a
/// blocker.
pub async fn detect_recurring_themes(
    store: &dyn ReadingStore,
    user_id: Uuid,
    current_question: &str,
    locale: Locale,
    now: DateTime<Utc>,
) -> Option<String> {
    if current_question.trim().is_empty() {
        return None;
    }
    let target = question_hash(current_question);

    let questions = match store.questions_for_user(user_id).await {
        Ok(qs) => qs,
        Err(e) => {
            warn!("Recurring-theme lookup failed, continuing without: {e}");
            return None;
        }
    };

    let matches: Vec<&DateTime<Utc>> = questions
        .iter()
        .filter(|(q, _)| question_hash(q) == target)
        .map(|(_, at)| at)
        .collect();

    if matches.len() < RECURRING_QUESTION_THRESHOLD {
        return None;
    }

    let oldest = matches.iter().copied().min()?;
    let days = (now - *oldest).num_days().max(0);

    let l = labels(locale);
    let timeframe = if days < 7 {
        l.timeframe_week.to_string()
    } else if days < 30 {
        l.timeframe_month.to_string()
    } else if days < 90 {
        let months = days / 30;
        if months <= 1 {
            l.timeframe_month.to_string()
        } else {
            l.timeframe_months.replace("{n}", &months.to_string())
        }
    } else {
        l.timeframe_recent.to_string()
    };

    Some(
        l.recurring_question
            .replace("{count}", &matches.len().to_string())
            .replace("{timeframe}", &timeframe),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::{CardTitle, DrawnCard};
    use crate::models::reading::{Interpretations, Message, MessageRole, ReadingType};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Duration;

    fn card(title: &str) -> DrawnCard {
        DrawnCard {
            title: CardTitle::Plain(title.to_string()),
            position: "present".to_string(),
            reversed: false,
            arcana: None,
            keywords: vec![],
            element: None,
            astrology: None,
            upright_meaning: Default::default(),
            reversed_meaning: Default::default(),
        }
    }

    fn reading(cards: &[&str], question: Option<&str>) -> ReadingRecord {
        ReadingRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            question: question.map(str::to_string),
            cards_drawn: cards.iter().map(|t| card(t)).collect(),
            interpretations: Interpretations::default(),
            conversation: vec![],
            reflection: None,
            created_at: Utc::now(),
            reading_type: ReadingType::Spread,
        }
    }

    #[test]
    fn test_fewer_than_two_readings_yields_empty() {
        let readings = vec![reading(&["The Tower"], None)];
        assert_eq!(detect_salient_patterns(&readings, Locale::En), "");
    }

    #[test]
    fn test_recurring_card_at_threshold() {
        let readings = vec![
            reading(&["The Tower", "The Moon"], None),
            reading(&["The Tower", "The Sun"], None),
            reading(&["The Tower", "The Moon"], None),
            reading(&["Ace of Cups"], None),
        ];
        let out = detect_salient_patterns(&readings, Locale::En);
        assert!(out.contains("The Tower (3x)"), "got: {out}");
        // The Moon appears twice — below the threshold of 3.
        assert!(!out.contains("The Moon"), "got: {out}");
        assert!(!out.contains("The Sun"), "got: {out}");
    }

    #[test]
    fn test_breakthrough_count_from_reflection_and_conversation() {
        let mut with_reflection = reading(&["The Star"], None);
        with_reflection.reflection = Some("This hit home.".to_string());

        let mut with_conversation = reading(&["The Star"], None);
        with_conversation.conversation = vec![Message {
            role: MessageRole::User,
            content: "tell me more".to_string(),
            timestamp: Utc::now(),
        }];

        let plain = reading(&["The Star"], None);
        let out =
            detect_salient_patterns(&[with_reflection, with_conversation, plain], Locale::En);
        assert!(out.contains("2 breakthrough moments"), "got: {out}");
    }

    #[test]
    fn test_question_evolution_requires_repetition() {
        let repeated = vec![
            reading(&[], Some("Will it work out?")),
            reading(&[], Some("will it work out?")),
            reading(&[], Some("Will it work out? ")),
            reading(&[], Some("Something else entirely")),
        ];
        // 2 distinct of 4 total → 0.5 < 0.7
        let out = detect_salient_patterns(&repeated, Locale::En);
        assert!(out.contains("evolution"), "got: {out}");

        let varied = vec![
            reading(&[], Some("Question one")),
            reading(&[], Some("Question two")),
            reading(&[], Some("Question three")),
        ];
        let out = detect_salient_patterns(&varied, Locale::En);
        assert!(!out.contains("evolution"), "got: {out}");
    }

    #[test]
    fn test_question_hash_normalizes() {
        assert_eq!(
            question_hash("Will it work out?"),
            question_hash("  will it WORK out?  ")
        );
        assert_ne!(question_hash("a"), question_hash("b"));
    }

    struct StubStore {
        questions: Vec<(String, DateTime<Utc>)>,
    }

    #[async_trait]
    impl ReadingStore for StubStore {
        async fn count_for_user(&self, _user_id: Uuid) -> Result<i64> {
            Ok(self.questions.len() as i64)
        }
        async fn recent_for_user(
            &self,
            _user_id: Uuid,
            _limit: i64,
        ) -> Result<Vec<ReadingRecord>> {
            Ok(vec![])
        }
        async fn questions_for_user(
            &self,
            _user_id: Uuid,
        ) -> Result<Vec<(String, DateTime<Utc>)>> {
            Ok(self.questions.clone())
        }
    }

    #[tokio::test]
    async fn test_recurring_theme_note_fires_at_two_matches() {
        let now = Utc::now();
        let store = StubStore {
            questions: vec![
                ("Should I take the job?".to_string(), now - Duration::days(3)),
                ("should i take the job?".to_string(), now - Duration::days(5)),
                ("Unrelated".to_string(), now - Duration::days(1)),
            ],
        };
        let note = detect_recurring_themes(
            &store,
            Uuid::new_v4(),
            "Should I take the job?",
            Locale::En,
            now,
        )
        .await
        .expect("note expected");
        assert!(note.contains("2 times"), "got: {note}");
        assert!(note.contains("past week"), "got: {note}");
    }

    #[tokio::test]
    async fn test_recurring_theme_none_below_threshold() {
        let now = Utc::now();
        let store = StubStore {
            questions: vec![("Should I take the job?".to_string(), now - Duration::days(3))],
        };
        let note = detect_recurring_themes(
            &store,
            Uuid::new_v4(),
            "Should I take the job?",
            Locale::En,
            now,
        )
        .await;
        assert!(note.is_none());
    }

    #[tokio::test]
    async fn test_recurring_theme_timeframe_buckets() {
        let now = Utc::now();
        let store = StubStore {
            questions: vec![
                ("Same question".to_string(), now - Duration::days(50)),
                ("Same question".to_string(), now - Duration::days(70)),
            ],
        };
        let note = detect_recurring_themes(&store, Uuid::new_v4(), "Same question", Locale::En, now)
            .await
            .unwrap();
        assert!(note.contains("past 2 months"), "got: {note}");

        let store = StubStore {
            questions: vec![
                ("Same question".to_string(), now - Duration::days(100)),
                ("Same question".to_string(), now - Duration::days(200)),
            ],
        };
        let note = detect_recurring_themes(&store, Uuid::new_v4(), "Same question", Locale::En, now)
            .await
            .unwrap();
        assert!(note.contains("recent months"), "got: {note}");
    }
}
