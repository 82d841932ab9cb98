use std::fmt::Write;

use crate::error::PathDataError;
use crate::types::Position;

/// One drawing operation of a [`Path2D`](crate::Path2D).
///
/// The first group mirrors the path mini-language and keeps its
/// absolute/relative distinction; relative coordinates are resolved
/// against the current point when the path is replayed. The native
/// kinds at the end are only produced by the imperative builder methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo { pos: Position, x: f64, y: f64 },
    LineTo { pos: Position, x: f64, y: f64 },
    HLineTo { pos: Position, x: f64 },
    VLineTo { pos: Position, y: f64 },
    CubicCurveTo {
	pos: Position,
	cp1x: f64,
	cp1y: f64,
	cp2x: f64,
	cp2y: f64,
	x: f64,
	y: f64,
    },
    SmoothCubicCurveTo {
	pos: Position,
	cp2x: f64,
	cp2y: f64,
	x: f64,
	y: f64,
    },
    QuadraticCurveTo {
	pos: Position,
	cpx: f64,
	cpy: f64,
	x: f64,
	y: f64,
    },
    SmoothQuadraticCurveTo { pos: Position, x: f64, y: f64 },
    /// Endpoint parameterized arc, `rotation` in degrees.
    EllipticalArc {
	pos: Position,
	rx: f64,
	ry: f64,
	rotation: f64,
	large_arc: bool,
	sweep: bool,
	x: f64,
	y: f64,
    },
    ClosePath,
    Arc {
	cx: f64,
	cy: f64,
	r: f64,
	start_angle: f64,
	end_angle: f64,
	ccw: bool,
    },
    ArcTo {
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	r: f64,
    },
    /// Center parameterized ellipse, `rotation` in radians.
    Ellipse {
	cx: f64,
	cy: f64,
	rx: f64,
	ry: f64,
	rotation: f64,
	start_angle: f64,
	end_angle: f64,
	ccw: bool,
    },
    Rect { x: f64, y: f64, w: f64, h: f64 },
}

impl Segment {
    /// The path data letter of this segment, `None` for the native kinds.
    pub fn command(&self) -> Option<char> {
	use Segment::*;

	let (pos, upper) = match *self {
	    MoveTo { pos, .. } => (pos, 'M'),
	    LineTo { pos, .. } => (pos, 'L'),
	    HLineTo { pos, .. } => (pos, 'H'),
	    VLineTo { pos, .. } => (pos, 'V'),
	    CubicCurveTo { pos, .. } => (pos, 'C'),
	    SmoothCubicCurveTo { pos, .. } => (pos, 'S'),
	    QuadraticCurveTo { pos, .. } => (pos, 'Q'),
	    SmoothQuadraticCurveTo { pos, .. } => (pos, 'T'),
	    EllipticalArc { pos, .. } => (pos, 'A'),
	    ClosePath => (Position::Absolute, 'Z'),
	    Arc { .. } | ArcTo { .. } | Ellipse { .. } | Rect { .. } => return None,
	};

	Some(match pos {
	    Position::Absolute => upper,
	    Position::Relative => upper.to_ascii_lowercase(),
	})
    }

    /// Operands in path data order; arc flags are written as 0 or 1.
    pub fn operands(&self) -> Vec<f64> {
	use Segment::*;

	let flag = |b: bool| if b { 1.0 } else { 0.0 };
	match *self {
	    MoveTo { x, y, .. } | LineTo { x, y, .. } | SmoothQuadraticCurveTo { x, y, .. } => vec![x, y],
	    HLineTo { x, .. } => vec![x],
	    VLineTo { y, .. } => vec![y],
	    CubicCurveTo { cp1x, cp1y, cp2x, cp2y, x, y, .. } => vec![cp1x, cp1y, cp2x, cp2y, x, y],
	    SmoothCubicCurveTo { cp2x, cp2y, x, y, .. } => vec![cp2x, cp2y, x, y],
	    QuadraticCurveTo { cpx, cpy, x, y, .. } => vec![cpx, cpy, x, y],
	    EllipticalArc { rx, ry, rotation, large_arc, sweep, x, y, .. } =>
		vec![rx, ry, rotation, flag(large_arc), flag(sweep), x, y],
	    ClosePath => Vec::new(),
	    Arc { cx, cy, r, start_angle, end_angle, ccw } =>
		vec![cx, cy, r, start_angle, end_angle, flag(ccw)],
	    ArcTo { x1, y1, x2, y2, r } => vec![x1, y1, x2, y2, r],
	    Ellipse { cx, cy, rx, ry, rotation, start_angle, end_angle, ccw } =>
		vec![cx, cy, rx, ry, rotation, start_angle, end_angle, flag(ccw)],
	    Rect { x, y, w, h } => vec![x, y, w, h],
	}
    }

    pub fn is_native(&self) -> bool {
	self.command().is_none()
    }
}

///Writes segments as path data, one explicit command letter per segment.
pub(crate) fn write_path_data<'a, I>(segments: I) -> Result<String, PathDataError>
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut out = String::new();

    for (index, segment) in segments.into_iter().enumerate() {
	let command = segment.command().ok_or(PathDataError::NativeSegment { index })?;
	let operands = segment.operands();
	if operands.iter().any(|v| !v.is_finite()) {
	    return Err(PathDataError::NonFinite { index });
	}

	if !out.is_empty() {
	    out.push(' ');
	}
	out.push(command);

	for (i, v) in operands.iter().enumerate() {
	    if i > 0 {
		out.push(' ');
	    }
	    // f64's Display is the shortest text that parses back to the same value
	    let _ = write!(out, "{}", v);
	}
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_letters_follow_position() {
	let abs = Segment::LineTo { pos: Position::Absolute, x: 1.0, y: 2.0 };
	let rel = Segment::SmoothQuadraticCurveTo { pos: Position::Relative, x: 1.0, y: 2.0 };
	assert_eq!(abs.command(), Some('L'));
	assert_eq!(rel.command(), Some('t'));
	assert_eq!(Segment::ClosePath.command(), Some('Z'));
	assert!(Segment::Rect { x: 0.0, y: 0.0, w: 1.0, h: 1.0 }.is_native());
    }

    #[test]
    fn writes_arc_flags_as_digits() {
	let arc = Segment::EllipticalArc {
	    pos: Position::Relative,
	    rx: 5.0,
	    ry: 2.5,
	    rotation: 30.0,
	    large_arc: true,
	    sweep: false,
	    x: -10.0,
	    y: 0.25,
	};
	assert_eq!(write_path_data(&[arc]).unwrap(), "a5 2.5 30 1 0 -10 0.25");
    }

    #[test]
    fn native_segments_are_rejected() {
	let segments = [
	    Segment::MoveTo { pos: Position::Absolute, x: 0.0, y: 0.0 },
	    Segment::ArcTo { x1: 1.0, y1: 1.0, x2: 2.0, y2: 0.0, r: 1.0 },
	];
	assert_eq!(write_path_data(&segments), Err(PathDataError::NativeSegment { index: 1 }));
    }

    #[test]
    fn non_finite_operands_are_rejected() {
	let segments = [Segment::HLineTo { pos: Position::Absolute, x: f64::NAN }];
	assert_eq!(write_path_data(&segments), Err(PathDataError::NonFinite { index: 0 }));
    }
}
