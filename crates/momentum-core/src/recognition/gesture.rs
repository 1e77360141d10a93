//! Ink gesture classification.
//!
//! A finished stroke is tested against each shape in a fixed order, first
//! match wins: cross-out, checkmark, chevron. Because cross-out only looks
//! at the start-to-end displacement, a stroke that ends well to the right
//! of where it started reads as a cross-out even if it also has a
//! checkmark's valley.

use serde::{Deserialize, Serialize};

use super::geometry::{Bounds, Delta, Point, Stroke};

/// Command a stroke was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    Checkmark,
    CrossOut,
    ChevronLeft,
    ChevronRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedGesture {
    pub kind: GestureKind,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub bounds: Bounds,
}

// Cross-out
const CROSS_OUT_MIN_WIDTH_RATIO: f64 = 0.3;
const CROSS_OUT_VERTICAL_RATIO_CUTOFF: f64 = 2.0;
const CROSS_OUT_LINE_QUALITY_FLOOR: f64 = 0.5;
const CROSS_OUT_HORIZONTAL_WEIGHT: f64 = 0.7;
const CROSS_OUT_LINE_WEIGHT: f64 = 0.3;
const CROSS_OUT_MIN_CONFIDENCE: f64 = 0.6;

// Two-segment shapes
const MIN_SEGMENT_ANGLE: f64 = 30.0;
const MAX_SEGMENT_ANGLE: f64 = 150.0;

// Checkmark
const CHECKMARK_IDEAL_ANGLE: f64 = 90.0;
const CHECKMARK_ANGLE_WEIGHT: f64 = 0.4;
const CHECKMARK_DIRECTION_WEIGHT: f64 = 0.2;
const CHECKMARK_ACCEPT_THRESHOLD: f64 = 0.5;

// Chevron
const CHEVRON_IDEAL_ANGLE: f64 = 75.0;
const CHEVRON_ANGLE_WEIGHT: f64 = 0.6;
const CHEVRON_SIZE_WEIGHT: f64 = 0.4;
const CHEVRON_FULL_SIZE: f64 = 20.0;
const CHEVRON_MIN_CONFIDENCE: f64 = 0.5;

fn within_segment_band(angle: f64) -> bool {
    angle > MIN_SEGMENT_ANGLE && angle < MAX_SEGMENT_ANGLE
}

/// Stateless stroke classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureRecognizer;

impl GestureRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Classify one finished stroke. Fewer than two points, or any
    /// non-finite coordinate, gives `None`.
    pub fn classify(&self, points: &[Point]) -> Option<RecognizedGesture> {
        if points.len() < 2 {
            return None;
        }
        if points.iter().any(|p| !p.is_finite()) {
            tracing::trace!(points = points.len(), "ignored stroke with non-finite coordinates");
            return None;
        }

        let bounds = Bounds::from_points(points)?;
        let gesture = detect_cross_out(points, &bounds)
            .or_else(|| detect_checkmark(points, &bounds))
            .or_else(|| detect_chevron(points, &bounds));

        match &gesture {
            Some(g) => tracing::debug!(kind = ?g.kind, confidence = g.confidence, "classified gesture"),
            None => tracing::debug!(points = points.len(), "stroke matched no gesture"),
        }
        gesture
    }

    /// Classify a multi-stroke drawing by concatenating its strokes in order.
    pub fn classify_strokes(&self, strokes: &[Stroke]) -> Option<RecognizedGesture> {
        let points: Vec<Point> = strokes
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        self.classify(&points)
    }
}

/// Line drawn through text, horizontal or diagonal.
pub fn detect_cross_out(points: &[Point], bounds: &Bounds) -> Option<RecognizedGesture> {
    let (first, last) = (points.first()?, points.last()?);
    let delta = Delta::between(*first, *last);
    let horizontal = delta.dx.abs();
    let vertical = delta.dy.abs();

    if horizontal <= bounds.width * CROSS_OUT_MIN_WIDTH_RATIO {
        return None;
    }

    let horizontal_confidence = (horizontal / bounds.width).min(1.0);
    let vertical_ratio = if horizontal > 0.0 {
        vertical / horizontal
    } else {
        1.0
    };
    let line_quality = if vertical_ratio < CROSS_OUT_VERTICAL_RATIO_CUTOFF {
        1.0
    } else {
        (1.0 - (vertical_ratio - CROSS_OUT_VERTICAL_RATIO_CUTOFF) / 2.0)
            .max(CROSS_OUT_LINE_QUALITY_FLOOR)
    };

    let confidence = (horizontal_confidence * CROSS_OUT_HORIZONTAL_WEIGHT
        + line_quality * CROSS_OUT_LINE_WEIGHT)
        .clamp(CROSS_OUT_MIN_CONFIDENCE, 1.0);

    Some(RecognizedGesture {
        kind: GestureKind::CrossOut,
        confidence,
        bounds: *bounds,
    })
}

/// Down then up-right "V", split at the lowest point.
pub fn detect_checkmark(points: &[Point], bounds: &Bounds) -> Option<RecognizedGesture> {
    if points.len() < 3 {
        return None;
    }

    let lowest = lowest_point_index(points)?;
    if lowest == 0 || lowest == points.len() - 1 {
        return None;
    }

    let first = Delta::between(points[0], points[lowest]);
    let second = Delta::between(points[lowest], points[points.len() - 1]);

    let first_goes_down = first.dy > 0.0;
    let second_goes_up = second.dy < 0.0;
    let second_goes_right = second.dx > 0.0;
    let angle = first.angle_to(&second);

    if !(first_goes_down && second_goes_up && second_goes_right && within_segment_band(angle)) {
        return None;
    }

    let confidence = checkmark_confidence(&first, &second, angle);
    if confidence <= CHECKMARK_ACCEPT_THRESHOLD {
        return None;
    }

    Some(RecognizedGesture {
        kind: GestureKind::Checkmark,
        confidence,
        bounds: *bounds,
    })
}

fn checkmark_confidence(first: &Delta, second: &Delta, angle: f64) -> f64 {
    let angle_confidence = 1.0 - (angle - CHECKMARK_IDEAL_ANGLE).abs() / CHECKMARK_IDEAL_ANGLE;
    let mut confidence = angle_confidence * CHECKMARK_ANGLE_WEIGHT;

    let direction_checks = [
        first.dy > 0.0,
        second.dy < 0.0,
        // more right than vertical
        second.dx > second.dy.abs(),
    ];
    for passed in direction_checks {
        if passed {
            confidence += CHECKMARK_DIRECTION_WEIGHT;
        }
    }

    confidence.clamp(0.0, 1.0)
}

/// Index of the first point with the greatest y.
fn lowest_point_index(points: &[Point]) -> Option<usize> {
    let mut lowest = 0;
    let mut max_y = points.first()?.y;
    for (i, p) in points.iter().enumerate() {
        if p.y > max_y {
            max_y = p.y;
            lowest = i;
        }
    }
    Some(lowest)
}

/// "<" or ">" with the apex at the interior point farthest from the
/// horizontal middle of the bounds.
pub fn detect_chevron(points: &[Point], bounds: &Bounds) -> Option<RecognizedGesture> {
    if points.len() < 3 {
        return None;
    }

    let center_x = bounds.mid_x();
    let last = points.len() - 1;

    let mut apex = 1;
    let mut farthest = (points[1].x - center_x).abs();
    for (i, p) in points.iter().enumerate().take(last).skip(2) {
        let distance = (p.x - center_x).abs();
        if distance > farthest {
            farthest = distance;
            apex = i;
        }
    }

    let apex_point = points[apex];
    let first = Delta::between(points[0], apex_point);
    let second = Delta::between(apex_point, points[last]);

    let angle = first.angle_to(&second);
    if !within_segment_band(angle) {
        return None;
    }

    let pointing_right = apex_point.x > center_x;
    let pointing_left = apex_point.x < center_x;

    let kind = if pointing_right && first.dx > 0.0 && second.dx < 0.0 {
        GestureKind::ChevronRight
    } else if pointing_left && first.dx < 0.0 && second.dx > 0.0 {
        GestureKind::ChevronLeft
    } else {
        return None;
    };

    Some(RecognizedGesture {
        kind,
        confidence: chevron_confidence(angle, bounds),
        bounds: *bounds,
    })
}

fn chevron_confidence(angle: f64, bounds: &Bounds) -> f64 {
    let angle_confidence = 1.0 - (angle - CHEVRON_IDEAL_ANGLE).abs() / CHEVRON_IDEAL_ANGLE;
    let size_confidence = (bounds.min_dimension() / CHEVRON_FULL_SIZE).min(1.0);
    (angle_confidence * CHEVRON_ANGLE_WEIGHT + size_confidence * CHEVRON_SIZE_WEIGHT)
        .clamp(CHEVRON_MIN_CONFIDENCE, 1.0)
}
