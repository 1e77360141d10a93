//! 2-D primitives for ink strokes.
//!
//! Coordinates follow screen convention: x grows right, y grows down.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl FromStr for Point {
    type Err = ValidationError;

    /// Parse `"x,y"`, whitespace around either number allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPoint {
            input: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(x, y))
    }
}

/// Displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub fn between(from: Point, to: Point) -> Self {
        Self {
            dx: to.x - from.x,
            dy: to.y - from.y,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Angle between two displacement vectors in degrees, 0..=180.
    /// Zero-length vectors give 0.
    pub fn angle_to(&self, other: &Delta) -> f64 {
        let m1 = self.magnitude();
        let m2 = other.magnitude();
        if m1 <= 0.0 || m2 <= 0.0 {
            return 0.0;
        }
        let cos = (self.dx * other.dx + self.dy * other.dy) / (m1 * m2);
        cos.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounding box of all points, `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// One continuous pen-down to pen-up ink sample sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Accepted shapes of serialized ink: one stroke's points, or many strokes.
#[derive(Deserialize)]
#[serde(untagged)]
enum InkInput {
    Points(Vec<Point>),
    Strokes(Vec<Stroke>),
}

/// Parse a JSON array of points (one stroke) or of strokes.
///
/// # Errors
///
/// Returns an error if `json` is neither shape.
pub fn parse_strokes(json: &str) -> Result<Vec<Stroke>> {
    Ok(match serde_json::from_str(json)? {
        InkInput::Points(points) => vec![Stroke::new(points)],
        InkInput::Strokes(strokes) => strokes,
    })
}

/// Read and parse a stroke file, see [`parse_strokes`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_strokes(path: &Path) -> Result<Vec<Stroke>> {
    let content = std::fs::read_to_string(path)?;
    parse_strokes(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn strokes_parse_from_points_or_stroke_lists() {
        let single = parse_strokes(r#"[{"x":0,"y":0},{"x":1,"y":1}]"#).unwrap();
        assert_eq!(single, vec![Stroke::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])]);

        let many = parse_strokes(r#"[[{"x":0,"y":0}],[{"x":1,"y":1},{"x":2,"y":2}]]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].points.len(), 2);
    }

    #[test]
    fn malformed_stroke_json_is_a_json_error() {
        assert!(matches!(parse_strokes("{\"x\": 1}"), Err(CoreError::Json(_))));
        assert!(matches!(parse_strokes("[[1, 2"), Err(CoreError::Json(_))));
    }

    #[test]
    fn stroke_file_io_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_strokes(&dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));

        let path = dir.path().join("strokes.json");
        std::fs::write(&path, r#"[{"x":0,"y":0},{"x":100,"y":0}]"#).unwrap();
        assert_eq!(load_strokes(&path).unwrap()[0].points.len(), 2);
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [Point::new(3.0, 4.0), Point::new(-1.0, 10.0), Point::new(7.0, 2.0)];
        let b = Bounds::from_points(&points).unwrap();
        assert_eq!(b.x, -1.0);
        assert_eq!(b.y, 2.0);
        assert_eq!(b.width, 8.0);
        assert_eq!(b.height, 8.0);
        assert_eq!(b.mid_x(), 3.0);
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn angle_between_vectors() {
        let right = Delta { dx: 1.0, dy: 0.0 };
        let down = Delta { dx: 0.0, dy: 5.0 };
        let left = Delta { dx: -2.0, dy: 0.0 };
        assert!((right.angle_to(&down) - 90.0).abs() < 1e-9);
        assert!((right.angle_to(&left) - 180.0).abs() < 1e-9);
        assert_eq!(right.angle_to(&Delta { dx: 0.0, dy: 0.0 }), 0.0);
    }

    #[test]
    fn parse_point() {
        assert_eq!("1.5, -2".parse::<Point>().unwrap(), Point::new(1.5, -2.0));
        assert!("1.5".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }
}
