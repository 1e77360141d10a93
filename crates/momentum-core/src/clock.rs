//! Reference "now" for relative dates and time anchoring.
//!
//! Recognizers never read the wall clock directly. They hold a [`Clock`]
//! and capture `now()` exactly once per recognition call, so a fixed clock
//! makes every result reproducible.

use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// Source of the current local date-time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// System wall clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// System instant viewed at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: FixedOffset,
}

impl OffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build from an offset in minutes east of UTC.
    pub fn from_minutes(minutes: i32) -> Result<Self, ValidationError> {
        let seconds = minutes
            .checked_mul(60)
            .ok_or(ValidationError::InvalidUtcOffset { minutes })?;
        FixedOffset::east_opt(seconds)
            .map(Self::new)
            .ok_or(ValidationError::InvalidUtcOffset { minutes })
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// A clock frozen at one moment. Used in tests and for replaying input
/// against a known reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parse a reference moment such as `2025-03-19T10:30:00`, `2025-03-19T10:30`
/// or a bare `2025-03-19` (midnight).
pub fn parse_reference_time(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidReferenceTime {
            input: input.to_string(),
        })
}
