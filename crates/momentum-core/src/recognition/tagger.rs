//! Pluggable supplementary date tagging.
//!
//! The date recognizer runs an optional [`DateTagger`] after its own
//! strategies. Without one the pass contributes nothing.

use chrono::{Datelike, Duration, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use super::span::Span;

/// A date found by a tagger, before the recognizer stamps its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedDate {
    pub span: Span,
    pub date: NaiveDateTime,
    pub confidence: f64,
}

/// Contextual date tagger supplied by the host.
///
/// Implementations must be pure with respect to `text` and `now`.
pub trait DateTagger: Send + Sync {
    fn tag(&self, text: &str, now: NaiveDateTime) -> Vec<TaggedDate>;
}

static WEEKDAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap()
});

const WEEKDAY_NAME_CONFIDENCE: f64 = 0.7;

/// Tags bare weekday names as their next occurrence, today included.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayNameTagger;

impl DateTagger for WeekdayNameTagger {
    fn tag(&self, text: &str, now: NaiveDateTime) -> Vec<TaggedDate> {
        let current = i64::from(now.weekday().num_days_from_monday());

        WEEKDAY_NAME_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let target = super::date::weekday_index(caps.get(1)?.as_str())?;
                let days_ahead = (target - current + 7) % 7;
                let date = now.checked_add_signed(Duration::days(days_ahead))?;
                Some(TaggedDate {
                    span: Span::of(whole),
                    date,
                    confidence: WEEKDAY_NAME_CONFIDENCE,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn wednesday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn tags_every_bare_weekday() {
        let text = "Gym on Friday, dentist on monday";
        let tags = WeekdayNameTagger.tag(text, wednesday());
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].span.slice(text), Some("Friday"));
        assert_eq!(tags[0].date.weekday(), Weekday::Fri);
        assert_eq!(tags[0].date.date(), NaiveDate::from_ymd_opt(2025, 3, 21).unwrap());
        assert_eq!(tags[1].date.date(), NaiveDate::from_ymd_opt(2025, 3, 24).unwrap());
    }

    #[test]
    fn same_weekday_resolves_to_today() {
        let tags = WeekdayNameTagger.tag("wednesday standup", wednesday());
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].date, wednesday());
    }

    #[test]
    fn ignores_embedded_names() {
        assert!(WeekdayNameTagger.tag("mondays are slow", wednesday()).is_empty());
    }
}
