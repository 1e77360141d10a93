//! Date recognition from free-form text.
//!
//! Every strategy runs on every call and results are concatenated in
//! strategy order: numeric, text-month, ISO, named days, weekday
//! references, offsets, ranges, then the optional tagger. Overlapping
//! candidates from different strategies are all kept; `kind` tells the
//! caller which strategy produced each one.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::span::Span;
use super::tagger::DateTagger;
use crate::clock::{Clock, SystemClock};

/// Strategy that produced a date candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Numeric,
    TextMonth,
    Iso,
    Relative,
    /// Reserved for range resolution; ranges are matched but not emitted yet.
    Range,
    NlpDerived,
}

/// A date found in text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedDate {
    pub date: NaiveDateTime,
    pub span: Span,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub kind: DateKind,
}

impl RecognizedDate {
    /// The source text this candidate was derived from.
    pub fn matched<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.span.slice(text)
    }
}

const ABSOLUTE_CONFIDENCE: f64 = 0.95;
const NAMED_DAY_CONFIDENCE: f64 = 1.0;
const WEEKDAY_REFERENCE_CONFIDENCE: f64 = 0.95;
const OFFSET_CONFIDENCE: f64 = 0.9;

const MONTH_ABBREVIATIONS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Monday first; the index is the weekday's offset from Monday.
const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const NAMED_DAYS: [(&str, i64); 3] = [("today", 0), ("tomorrow", 1), ("yesterday", -1)];

// 3/20, 03/20, 3-20-25, 3.20.2025
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[/\-.](\d{1,2})(?:[/\-.](\d{2,4}))?").unwrap()
});

// March 20, Mar 20th, march 20, 2025
static TEXT_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?",
    )
    .unwrap()
});

static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

static NAMED_DAY_RES: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    NAMED_DAYS
        .iter()
        .map(|(word, offset)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(word))).unwrap();
            (re, *offset)
        })
        .collect()
});

static WEEKDAY_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(next|this|last)\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
    )
    .unwrap()
});

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in\s+(\d+)\s+(day|week|month)s?").unwrap());

// March 20-25, 3/20-3/25, 3/20 – 25
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+\s+\d{1,2}|\d{1,2}/\d{1,2})\s*[-–]\s*(\d{1,2}/\d{1,2}|\d{1,2})").unwrap()
});

/// Weekday index (Monday = 0) for a full, case-insensitive weekday name.
pub(crate) fn weekday_index(name: &str) -> Option<i64> {
    WEEKDAYS
        .iter()
        .position(|w| w.eq_ignore_ascii_case(name))
        .map(|i| i as i64)
}

/// Month number for a month name or abbreviation, keyed on its first
/// three letters.
pub fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == prefix)
        .map(|(_, month)| *month)
}

/// Modifier in front of a weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayModifier {
    Next,
    This,
    Last,
}

impl WeekdayModifier {
    const ALL: [WeekdayModifier; 3] = [Self::Next, Self::This, Self::Last];

    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "next" => Some(Self::Next),
            "this" => Some(Self::This),
            "last" => Some(Self::Last),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Next => 0,
            Self::This => 1,
            Self::Last => 2,
        }
    }

    /// Day offset from `current` to `target`, both Monday-based indices.
    ///
    /// `Next` is always 1..=7 days ahead, `This` is 0..=6 days ahead and
    /// `Last` is 0..=6 days back.
    pub fn day_offset(self, target: i64, current: i64) -> i64 {
        match self {
            Self::Next => {
                let days = (target - current + 7) % 7;
                if days == 0 {
                    7
                } else {
                    days
                }
            }
            Self::This => (target - current + 7) % 7,
            // Truncating remainder keeps the dividend's sign: -13..=-1 maps to -6..=0.
            Self::Last => (target - current - 7) % 7,
        }
    }
}

/// Scans text for absolute and relative date expressions.
pub struct DateRecognizer {
    clock: Arc<dyn Clock>,
    tagger: Option<Arc<dyn DateTagger>>,
}

impl fmt::Debug for DateRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRecognizer")
            .field("tagger", &self.tagger.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for DateRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateRecognizer {
    /// Recognizer on the system clock, without a tagger.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tagger: None,
        }
    }

    /// Attach a supplementary tagger whose results are reported as
    /// [`DateKind::NlpDerived`].
    pub fn with_tagger(mut self, tagger: Arc<dyn DateTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Recognize dates relative to the recognizer's clock.
    pub fn recognize(&self, text: &str) -> Vec<RecognizedDate> {
        self.recognize_at(text, self.clock.now())
    }

    /// Recognize dates relative to an explicit reference moment.
    pub fn recognize_at(&self, text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        results.extend(match_absolute(
            &NUMERIC_RE,
            text,
            now,
            DateKind::Numeric,
            parse_numeric,
        ));
        results.extend(match_absolute(
            &TEXT_MONTH_RE,
            text,
            now,
            DateKind::TextMonth,
            parse_text_month,
        ));
        results.extend(match_absolute(&ISO_RE, text, now, DateKind::Iso, parse_iso));
        results.extend(recognize_named_days(text, now));
        results.extend(recognize_weekday_references(text, now));
        results.extend(recognize_offsets(text, now));
        results.extend(recognize_ranges(text));
        if let Some(tagger) = &self.tagger {
            results.extend(apply_tagger(tagger.as_ref(), text, now));
        }

        tracing::debug!(candidates = results.len(), "recognized dates");
        results
    }
}

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

fn match_absolute(
    re: &Regex,
    text: &str,
    now: NaiveDateTime,
    kind: DateKind,
    parse: fn(&Captures<'_>, NaiveDateTime) -> Option<NaiveDateTime>,
) -> Vec<RecognizedDate> {
    let mut results = Vec::new();
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        match parse(&caps, now) {
            Some(date) => results.push(RecognizedDate {
                date,
                span: Span::of(whole),
                confidence: ABSOLUTE_CONFIDENCE,
                kind,
            }),
            None => tracing::trace!(matched = whole.as_str(), ?kind, "dropped invalid date"),
        }
    }
    results
}

fn parse_numeric(caps: &Captures<'_>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(m) => {
            let year: i32 = m.as_str().parse().ok()?;
            if year < 100 {
                year + 2000
            } else {
                year
            }
        }
        None => now.year(),
    };
    midnight(year, month, day)
}

fn parse_text_month(caps: &Captures<'_>, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let month = month_from_name(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => now.year(),
    };
    midnight(year, month, day)
}

fn parse_iso(caps: &Captures<'_>, _now: NaiveDateTime) -> Option<NaiveDateTime> {
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;
    midnight(year, month, day)
}

/// First occurrence of each of "today", "tomorrow" and "yesterday".
fn recognize_named_days(text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
    NAMED_DAY_RES
        .iter()
        .filter_map(|(re, offset)| {
            let found = re.find(text)?;
            let date = now.checked_add_signed(Duration::try_days(*offset)?)?;
            Some(RecognizedDate {
                date,
                span: Span::of(found),
                confidence: NAMED_DAY_CONFIDENCE,
                kind: DateKind::Relative,
            })
        })
        .collect()
}

/// "next friday", "this monday", "last sunday": first occurrence of each
/// modifier/weekday pair, ordered by modifier then weekday.
fn recognize_weekday_references(text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
    let mut first_seen: [[Option<Span>; 7]; 3] = [[None; 7]; 3];

    for caps in WEEKDAY_REFERENCE_RE.captures_iter(text) {
        let (Some(whole), Some(modifier), Some(weekday)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let Some(modifier) = WeekdayModifier::from_word(modifier.as_str()) else { continue };
        let Some(target) = weekday_index(weekday.as_str()) else { continue };
        let slot = &mut first_seen[modifier.index()][target as usize];
        if slot.is_none() {
            *slot = Some(Span::of(whole));
        }
    }

    let current = i64::from(now.weekday().num_days_from_monday());
    let mut results = Vec::new();
    for modifier in WeekdayModifier::ALL {
        for (target, span) in first_seen[modifier.index()].iter().enumerate() {
            let Some(span) = span else { continue };
            let offset = modifier.day_offset(target as i64, current);
            let Some(date) = Duration::try_days(offset).and_then(|d| now.checked_add_signed(d))
            else {
                continue;
            };
            results.push(RecognizedDate {
                date,
                span: *span,
                confidence: WEEKDAY_REFERENCE_CONFIDENCE,
                kind: DateKind::Relative,
            });
        }
    }
    results
}

/// "in 3 days", "in 2 weeks", "in 1 month".
fn recognize_offsets(text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
    let mut results = Vec::new();
    for caps in OFFSET_RE.captures_iter(text) {
        let (Some(whole), Some(amount), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let Ok(amount) = amount.as_str().parse::<u32>() else {
            tracing::trace!(matched = whole.as_str(), "dropped offset with unparsable amount");
            continue;
        };
        let date = match unit.as_str().to_ascii_lowercase().as_str() {
            "day" => Duration::try_days(i64::from(amount)).and_then(|d| now.checked_add_signed(d)),
            "week" => Duration::try_weeks(i64::from(amount)).and_then(|d| now.checked_add_signed(d)),
            "month" => now.checked_add_months(Months::new(amount)),
            _ => None,
        };
        match date {
            Some(date) => results.push(RecognizedDate {
                date,
                span: Span::of(whole),
                confidence: OFFSET_CONFIDENCE,
                kind: DateKind::Relative,
            }),
            None => tracing::trace!(matched = whole.as_str(), "dropped out-of-range offset"),
        }
    }
    results
}

/// Ranges are matched but not resolved, so this never emits a candidate.
// TODO: resolve start and end dates once callers can consume a two-date candidate.
fn recognize_ranges(text: &str) -> Vec<RecognizedDate> {
    for found in DATE_RANGE_RE.find_iter(text) {
        tracing::trace!(matched = found.as_str(), "date range matched, not resolved");
    }
    Vec::new()
}

fn apply_tagger(tagger: &dyn DateTagger, text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
    tagger
        .tag(text, now)
        .into_iter()
        .filter_map(|tag| {
            if !tag.span.is_valid_for(text) || !tag.confidence.is_finite() {
                tracing::trace!(span = ?tag.span, "dropped tagger result with invalid span or confidence");
                return None;
            }
            Some(RecognizedDate {
                date: tag.date,
                span: tag.span,
                confidence: tag.confidence.clamp(0.0, 1.0),
                kind: DateKind::NlpDerived,
            })
        })
        .collect()
}
