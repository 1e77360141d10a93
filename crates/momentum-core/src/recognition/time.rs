//! Time-of-day recognition from free-form text.
//!
//! Strategies run in order (12-hour, 24-hour, contextual keywords) and their
//! results are concatenated. A string like "14:30" is seen by both numeric
//! strategies; the 12-hour reading is dropped by validation, the 24-hour one
//! survives.

use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::span::Span;
use crate::clock::{Clock, SystemClock};

/// Notation a time candidate was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    TwelveHour,
    TwentyFourHour,
    Contextual,
}

/// A time of day found in text, anchored to the reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedTime {
    /// Reference day at the recognized hour and minute, seconds zeroed.
    pub time: NaiveDateTime,
    pub span: Span,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub format: TimeFormat,
}

impl RecognizedTime {
    pub fn time_of_day(&self) -> NaiveTime {
        self.time.time()
    }

    pub fn matched<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.span.slice(text)
    }
}

const EXPLICIT_PERIOD_CONFIDENCE: f64 = 0.95;
const INFERRED_PERIOD_CONFIDENCE: f64 = 0.85;
const TWENTY_FOUR_HOUR_CONFIDENCE: f64 = 0.95;
const CONTEXTUAL_CONFIDENCE: f64 = 0.85;

const CONTEXTUAL_TIMES: [(&str, u32, u32); 5] = [
    ("morning", 9, 0),
    ("afternoon", 14, 0),
    ("evening", 18, 0),
    ("noon", 12, 0),
    ("midnight", 0, 0),
];

const AM_HINTS: [&str; 2] = ["morning", "breakfast"];
const PM_HINTS: [&str; 3] = ["evening", "dinner", "night"];

// 2pm, 2:30pm, 2:30 PM, 2 a.m., 2 o'clock, 2p, or a bare 2
static TWELVE_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?(?:\s*(am|pm|a\.m\.|p\.m\.|a|p|o'clock))?").unwrap()
});

// 14:00, 1430
static TWENTY_FOUR_HOUR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}):?(\d{2})").unwrap());

static CONTEXTUAL_RES: LazyLock<Vec<(Regex, u32, u32)>> = LazyLock::new(|| {
    CONTEXTUAL_TIMES
        .iter()
        .map(|(word, hour, minute)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(word))).unwrap();
            (re, *hour, *minute)
        })
        .collect()
});

/// Suffix written after a 12-hour number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    Am,
    Pm,
    /// Explicit but meridiem-free.
    OClock,
}

impl Suffix {
    fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower == "o'clock" {
            Self::OClock
        } else if lower.contains('p') {
            Self::Pm
        } else {
            Self::Am
        }
    }
}

/// Guess whether a bare hour means PM.
///
/// 7-11 read as morning, 12 as noon, anything else defaults to afternoon
/// unless the text mentions a morning or evening cue.
pub fn infer_pm(hour: u32, context_lowercase: &str) -> bool {
    if (7..=11).contains(&hour) {
        return false;
    }
    if hour == 12 {
        return true;
    }
    let morning = AM_HINTS.iter().any(|h| context_lowercase.contains(h));
    let evening = PM_HINTS.iter().any(|h| context_lowercase.contains(h));
    match (morning, evening) {
        (true, _) => false,
        (false, true) => true,
        (false, false) => true,
    }
}

/// Convert a 12-hour clock reading to a 24-hour hour.
fn to_twenty_four_hour(hour: u32, is_pm: bool) -> u32 {
    if is_pm && hour != 12 {
        hour + 12
    } else if !is_pm && hour == 12 {
        0
    } else {
        hour
    }
}

/// Scans text for 12-hour, 24-hour and keyword time expressions.
pub struct TimeRecognizer {
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TimeRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeRecognizer").finish_non_exhaustive()
    }
}

impl Default for TimeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeRecognizer {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn recognize(&self, text: &str) -> Vec<RecognizedTime> {
        self.recognize_at(text, self.clock.now())
    }

    /// Recognize times, anchoring each to the calendar day of `now`.
    pub fn recognize_at(&self, text: &str, now: NaiveDateTime) -> Vec<RecognizedTime> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        results.extend(recognize_twelve_hour(text, now));
        results.extend(recognize_twenty_four_hour(text, now));
        results.extend(recognize_contextual(text, now));

        tracing::debug!(candidates = results.len(), "recognized times");
        results
    }
}

fn anchor(now: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    now.date().and_hms_opt(hour, minute, 0)
}

fn recognize_twelve_hour(text: &str, now: NaiveDateTime) -> Vec<RecognizedTime> {
    let context = text.to_lowercase();
    let mut results = Vec::new();

    for caps in TWELVE_HOUR_RE.captures_iter(text) {
        let (Some(whole), Some(hour)) = (caps.get(0), caps.get(1)) else { continue };
        let Ok(hour) = hour.as_str().parse::<u32>() else {
            tracing::trace!(matched = whole.as_str(), "dropped time with unparsable hour");
            continue;
        };
        let minute = match caps.get(2).map(|m| m.as_str().parse::<u32>()) {
            None => 0,
            Some(Ok(minute)) => minute,
            Some(Err(_)) => {
                tracing::trace!(matched = whole.as_str(), "dropped time with unparsable minute");
                continue;
            }
        };

        let suffix = caps.get(3).map(|m| Suffix::parse(m.as_str()));
        let is_pm = match suffix {
            Some(Suffix::Pm) => true,
            Some(Suffix::Am) => false,
            Some(Suffix::OClock) | None => infer_pm(hour, &context),
        };
        let hour = to_twenty_four_hour(hour, is_pm);

        if hour > 23 || minute > 59 {
            tracing::trace!(matched = whole.as_str(), hour, minute, "dropped out-of-range time");
            continue;
        }
        let Some(time) = anchor(now, hour, minute) else { continue };

        results.push(RecognizedTime {
            time,
            span: Span::of(whole),
            confidence: if suffix.is_some() {
                EXPLICIT_PERIOD_CONFIDENCE
            } else {
                INFERRED_PERIOD_CONFIDENCE
            },
            format: TimeFormat::TwelveHour,
        });
    }
    results
}

fn recognize_twenty_four_hour(text: &str, now: NaiveDateTime) -> Vec<RecognizedTime> {
    let mut results = Vec::new();

    for caps in TWENTY_FOUR_HOUR_RE.captures_iter(text) {
        let (Some(whole), Some(hour), Some(minute)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let (Ok(hour), Ok(minute)) = (hour.as_str().parse::<u32>(), minute.as_str().parse::<u32>())
        else {
            continue;
        };
        if hour > 23 || minute > 59 {
            tracing::trace!(matched = whole.as_str(), "dropped out-of-range 24-hour time");
            continue;
        }
        let Some(time) = anchor(now, hour, minute) else { continue };

        results.push(RecognizedTime {
            time,
            span: Span::of(whole),
            confidence: TWENTY_FOUR_HOUR_CONFIDENCE,
            format: TimeFormat::TwentyFourHour,
        });
    }
    results
}

/// First occurrence of each keyword in the contextual table.
fn recognize_contextual(text: &str, now: NaiveDateTime) -> Vec<RecognizedTime> {
    CONTEXTUAL_RES
        .iter()
        .filter_map(|(re, hour, minute)| {
            let found = re.find(text)?;
            Some(RecognizedTime {
                time: anchor(now, *hour, *minute)?,
                span: Span::of(found),
                confidence: CONTEXTUAL_CONFIDENCE,
                format: TimeFormat::Contextual,
            })
        })
        .collect()
}
