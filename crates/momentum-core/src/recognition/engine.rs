//! Facade over the three recognizers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::date::{DateRecognizer, RecognizedDate};
use super::gesture::{GestureRecognizer, RecognizedGesture};
use super::geometry::{Point, Stroke};
use super::tagger::WeekdayNameTagger;
use super::time::{RecognizedTime, TimeRecognizer};
use crate::clock::{Clock, OffsetClock, SystemClock};
use crate::error::Result;
use crate::storage::Config;

/// Dates and times found in one text, computed against a single "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub reference: NaiveDateTime,
    pub dates: Vec<RecognizedDate>,
    pub times: Vec<RecognizedTime>,
}

impl TextAnalysis {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.times.is_empty()
    }
}

/// Date, time and gesture recognition sharing one clock.
///
/// Holds no mutable state; share it freely across threads.
pub struct RecognitionEngine {
    clock: Arc<dyn Clock>,
    dates: DateRecognizer,
    times: TimeRecognizer,
    gestures: GestureRecognizer,
}

impl fmt::Debug for RecognitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognitionEngine")
            .field("dates", &self.dates)
            .finish_non_exhaustive()
    }
}

impl Default for RecognitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionEngine {
    /// Engine on the system clock with no date tagger.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            dates: DateRecognizer::with_clock(clock.clone()),
            times: TimeRecognizer::with_clock(clock.clone()),
            gestures: GestureRecognizer::new(),
            clock,
        }
    }

    /// Build from configuration: calendar offset and optional weekday tagger.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured UTC offset is out of range.
    pub fn from_config(config: &Config) -> Result<Self> {
        let clock: Arc<dyn Clock> = match config.calendar.utc_offset_minutes {
            Some(minutes) => Arc::new(OffsetClock::from_minutes(minutes)?),
            None => Arc::new(SystemClock),
        };
        Ok(Self::from_config_with_clock(config, clock))
    }

    /// Build from configuration, ignoring its calendar section in favor of `clock`.
    pub fn from_config_with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let engine = Self::with_clock(clock);
        if config.dates.weekday_tagger {
            engine.with_weekday_tagger()
        } else {
            engine
        }
    }

    /// Tag bare weekday names as contextual dates.
    pub fn with_weekday_tagger(self) -> Self {
        Self {
            dates: self.dates.with_tagger(Arc::new(WeekdayNameTagger)),
            ..self
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn recognize_dates(&self, text: &str) -> Vec<RecognizedDate> {
        self.dates.recognize(text)
    }

    pub fn recognize_dates_at(&self, text: &str, now: NaiveDateTime) -> Vec<RecognizedDate> {
        self.dates.recognize_at(text, now)
    }

    pub fn recognize_times(&self, text: &str) -> Vec<RecognizedTime> {
        self.times.recognize(text)
    }

    pub fn recognize_times_at(&self, text: &str, now: NaiveDateTime) -> Vec<RecognizedTime> {
        self.times.recognize_at(text, now)
    }

    pub fn classify_gesture(&self, points: &[Point]) -> Option<RecognizedGesture> {
        self.gestures.classify(points)
    }

    pub fn classify_strokes(&self, strokes: &[Stroke]) -> Option<RecognizedGesture> {
        self.gestures.classify_strokes(strokes)
    }

    /// Run date and time recognition against one captured "now".
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        self.analyze_at(text, self.clock.now())
    }

    pub fn analyze_at(&self, text: &str, now: NaiveDateTime) -> TextAnalysis {
        TextAnalysis {
            reference: now,
            dates: self.dates.recognize_at(text, now),
            times: self.times.recognize_at(text, now),
        }
    }
}
