use chrono::{DateTime, Utc};

use crate::catalog::{labels, Locale};

/// Renders a reading's age as a coarse relative label.
///
/// `now` is an explicit parameter so prompt building stays a pure function
/// of its inputs. Thresholds: <1 day today, <2 days yesterday, <7 days in
/// days, <30 days in weeks, otherwise months.
pub fn relative_date_label(created_at: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let l = labels(locale);
    let days = (now - created_at).num_days().max(0);

    if days < 1 {
        l.today.to_string()
    } else if days < 2 {
        l.yesterday.to_string()
    } else if days < 7 {
        l.days_ago.replace("{n}", &days.to_string())
    } else if days < 30 {
        let weeks = days / 7;
        if weeks <= 1 {
            l.week_ago.to_string()
        } else {
            l.weeks_ago.replace("{n}", &weeks.to_string())
        }
    } else {
        let months = days / 30;
        if months <= 1 {
            l.month_ago.to_string()
        } else {
            l.months_ago.replace("{n}", &months.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-03-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_same_day_is_today() {
        assert_eq!(relative_date_label(now(), now(), Locale::En), "today");
        assert_eq!(
            relative_date_label(now() - Duration::hours(20), now(), Locale::En),
            "today"
        );
    }

    #[test]
    fn test_one_day_is_yesterday() {
        assert_eq!(
            relative_date_label(now() - Duration::days(1), now(), Locale::En),
            "yesterday"
        );
    }

    #[test]
    fn test_two_days_ago() {
        assert_eq!(
            relative_date_label(now() - Duration::days(2), now(), Locale::En),
            "2 days ago"
        );
    }

    #[test]
    fn test_ten_days_is_one_week() {
        assert_eq!(
            relative_date_label(now() - Duration::days(10), now(), Locale::En),
            "1 week ago"
        );
    }

    #[test]
    fn test_twenty_days_is_two_weeks() {
        assert_eq!(
            relative_date_label(now() - Duration::days(20), now(), Locale::En),
            "2 weeks ago"
        );
    }

    #[test]
    fn test_forty_days_is_one_month() {
        assert_eq!(
            relative_date_label(now() - Duration::days(40), now(), Locale::En),
            "1 month ago"
        );
    }

    #[test]
    fn test_hundred_days_is_three_months() {
        assert_eq!(
            relative_date_label(now() - Duration::days(100), now(), Locale::En),
            "3 months ago"
        );
    }

    #[test]
    fn test_future_timestamp_clamps_to_today() {
        assert_eq!(
            relative_date_label(now() + Duration::days(3), now(), Locale::En),
            "today"
        );
    }

    #[test]
    fn test_localized_labels() {
        assert_eq!(
            relative_date_label(now() - Duration::days(1), now(), Locale::ZhTw),
            "昨天"
        );
        assert_eq!(
            relative_date_label(now() - Duration::days(3), now(), Locale::Ja),
            "3日前"
        );
    }
}
