//! Recognition engine.
//!
//! This module provides:
//! - Date recognition (numeric, month-name, ISO, relative expressions)
//! - Time recognition (12-hour, 24-hour, contextual keywords)
//! - Ink gesture classification (checkmark, cross-out, chevrons)
//!
//! Every recognizer is a pure function of its input plus a captured "now".
//! Candidates are never deduplicated; overlap resolution is left to the caller.

mod date;
mod engine;
mod geometry;
mod gesture;
mod span;
mod tagger;
mod time;

pub use date::{month_from_name, DateKind, DateRecognizer, RecognizedDate, WeekdayModifier};
pub use engine::{RecognitionEngine, TextAnalysis};
pub use geometry::{load_strokes, parse_strokes, Bounds, Delta, Point, Stroke};
pub use gesture::{
    detect_checkmark, detect_chevron, detect_cross_out, GestureKind, GestureRecognizer,
    RecognizedGesture,
};
pub use span::Span;
pub use tagger::{DateTagger, TaggedDate, WeekdayNameTagger};
pub use time::{infer_pm, RecognizedTime, TimeFormat, TimeRecognizer};
