//! Property tests: recognizers never panic, always emit well-formed
//! candidates, and are deterministic under a fixed clock.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use momentum_core::{
    DateRecognizer, FixedClock, GestureRecognizer, Point, TimeRecognizer, WeekdayNameTagger,
};
use proptest::prelude::*;

fn reference() -> impl Strategy<Value = NaiveDateTime> {
    (2000i32..2100, 1u32..=365, 0u32..24, 0u32..60).prop_map(|(year, ordinal, hour, minute)| {
        NaiveDate::from_yo_opt(year, ordinal)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    })
}

fn planner_text() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,80}",
        "[0-9 /:.\\-apmAPM]{0,40}",
        prop::collection::vec(
            prop::sample::select(vec![
                "today", "tomorrow", "next", "last", "this", "friday", "monday", "in", "3",
                "days", "week", "month", "March", "20th", "2025-03-20", "3/20", "12", "pm",
                "a.m.", "o'clock", "noon", "evening", "14:30", "é", "→",
            ]),
            0..12,
        )
        .prop_map(|words| words.join(" ")),
    ]
}

fn stroke() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..40)
        .prop_map(|raw| raw.into_iter().map(Point::from).collect())
}

proptest! {
    #[test]
    fn dates_are_well_formed(text in planner_text(), now in reference()) {
        let recognizer = DateRecognizer::with_clock(Arc::new(FixedClock(now)))
            .with_tagger(Arc::new(WeekdayNameTagger));
        let first = recognizer.recognize(&text);
        for date in &first {
            prop_assert!((0.0..=1.0).contains(&date.confidence));
            prop_assert!(date.span.is_valid_for(&text));
        }
        prop_assert_eq!(&first, &recognizer.recognize(&text));
    }

    #[test]
    fn times_are_well_formed(text in planner_text(), now in reference()) {
        let recognizer = TimeRecognizer::with_clock(Arc::new(FixedClock(now)));
        let first = recognizer.recognize(&text);
        for time in &first {
            prop_assert!((0.0..=1.0).contains(&time.confidence));
            prop_assert!(time.span.is_valid_for(&text));
            prop_assert_eq!(time.time.date(), now.date());
        }
        prop_assert_eq!(&first, &recognizer.recognize(&text));
    }

    #[test]
    fn gestures_are_well_formed(points in stroke()) {
        let recognizer = GestureRecognizer::new();
        let result = recognizer.classify(&points);
        if points.len() < 2 {
            prop_assert!(result.is_none());
        }
        if let Some(gesture) = &result {
            prop_assert!((0.0..=1.0).contains(&gesture.confidence));
            prop_assert!(gesture.bounds.width >= 0.0 && gesture.bounds.height >= 0.0);
        }
        prop_assert_eq!(result, recognizer.classify(&points));
    }

    #[test]
    fn weekday_modifiers_respect_direction(now in reference(), weekday in 0usize..7) {
        let names = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];
        let recognizer = DateRecognizer::new();

        let next = recognizer.recognize_at(&format!("next {}", names[weekday]), now);
        prop_assert_eq!(next.len(), 1);
        let ahead = (next[0].date - now).num_days();
        prop_assert!((1..=7).contains(&ahead));

        let this = recognizer.recognize_at(&format!("this {}", names[weekday]), now);
        let ahead = (this[0].date - now).num_days();
        prop_assert!((0..=6).contains(&ahead));

        let last = recognizer.recognize_at(&format!("last {}", names[weekday]), now);
        prop_assert!(last[0].date <= now);
        let behind = (now - last[0].date).num_days();
        prop_assert!((0..=6).contains(&behind));
    }
}
