use std::{fmt, str::FromStr};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
	Point { x, y }
    }

    ///Reflects `other` through `self`, as the smooth curve commands do
    ///with the previous control point.
    pub fn reflect(self, other: Point) -> Point {
	Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    pub fn rotate(self, angle: f64) -> Point {
	let (sin, cos) = angle.sin_cos();
	Point::new(self.x * cos - self.y * sin, self.y * cos + self.x * sin)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
	Point::new(x, y)
    }
}

///Whether the coordinates of a segment are absolute, or offsets from the
///current point at replay time (lowercase command letters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Absolute,
    Relative,
}

impl Position {
    pub fn resolve(self, current: Point, x: f64, y: f64) -> Point {
	match self {
	    Position::Absolute => Point::new(x, y),
	    Position::Relative => Point::new(current.x + x, current.y + y),
	}
    }

    pub fn resolve_x(self, current: Point, x: f64) -> f64 {
	match self {
	    Position::Absolute => x,
	    Position::Relative => current.x + x,
	}
    }

    pub fn resolve_y(self, current: Point, y: f64) -> f64 {
	match self {
	    Position::Absolute => y,
	    Position::Relative => current.y + y,
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fill rule: {0}")]
pub struct ParseFillRuleError(String);

impl FromStr for FillRule {
    type Err = ParseFillRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	Ok(match s.trim().to_lowercase().as_str() {
	    "nonzero" => FillRule::NonZero,
	    "evenodd" => FillRule::EvenOdd,
	    _ => return Err(ParseFillRuleError(String::from(s))),
	})
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	match self {
	    FillRule::NonZero => write!(f, "nonzero"),
	    FillRule::EvenOdd => write!(f, "evenodd"),
	}
    }
}
