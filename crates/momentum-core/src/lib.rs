//! # Momentum Core Library
//!
//! Recognition engine for the Momentum handwriting planner. It turns committed
//! text and finished ink strokes into typed, confidence-scored candidates that
//! the editing surfaces act on (creating a task, scheduling a reminder,
//! toggling completion). The engine never persists, schedules or renders.
//!
//! ## Architecture
//!
//! - **Date Recognizer**: numeric, month-name, ISO and relative date expressions
//! - **Time Recognizer**: 12-hour, 24-hour and keyword times with AM/PM inference
//! - **Gesture Recognizer**: checkmark, cross-out and chevron classification
//! - **Clock**: injectable "now" so relative results are reproducible
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RecognitionEngine`]: facade over the three recognizers
//! - [`DateRecognizer`], [`TimeRecognizer`], [`GestureRecognizer`]
//! - [`Clock`]: trait for the reference moment
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod recognition;
pub mod storage;

pub use clock::{parse_reference_time, Clock, FixedClock, OffsetClock, SystemClock};
pub use error::{ConfigError, CoreError, ValidationError};
pub use recognition::{
    load_strokes, parse_strokes, Bounds, DateKind, DateRecognizer, DateTagger, GestureKind,
    GestureRecognizer, Point, RecognitionEngine, RecognizedDate, RecognizedGesture,
    RecognizedTime, Span, Stroke, TaggedDate, TextAnalysis, TimeFormat, TimeRecognizer,
    WeekdayNameTagger,
};
pub use storage::Config;
