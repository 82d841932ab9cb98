//! Replaying a [`Path2D`] onto a [`DrawingSurface`].

use crate::arc::{self, EndpointArc};
use crate::config::{ClosePolicy, ReplayConfig};
use crate::error::ReplayError;
use crate::path::Path2D;
use crate::segment::Segment;
use crate::surface::DrawingSurface;
use crate::types::{FillRule, Point};

/// Running state of one replay. Never outlives a single call to
/// [`Replayer::replay`].
#[derive(Debug)]
struct ReplayState {
    /// `None` until the first segment is replayed; relative segments
    /// resolve against the origin until then.
    current: Option<Point>,
    /// Starts at the origin and is cleared by a close.
    subpath_start: Option<Point>,
    /// Second control point of the previous segment, if it was a cubic.
    last_cubic: Option<Point>,
    /// Control point of the previous segment, if it was a quadratic.
    last_quadratic: Option<Point>,
}

impl Default for ReplayState {
    fn default() -> Self {
	ReplayState {
	    current: None,
	    subpath_start: Some(Point::ORIGIN),
	    last_cubic: None,
	    last_quadratic: None,
	}
    }
}

impl ReplayState {
    /// Native primitives begin a subpath at their own start point when
    /// nothing was drawn before them or the last subpath was closed.
    fn open_at(&mut self, start: Point) {
	if self.current.is_none() || self.subpath_start.is_none() {
	    self.subpath_start = Some(start);
	}
    }

    fn step<S>(&mut self, index: usize, segment: &Segment, surface: &mut S, config: &ReplayConfig) -> Result<(), ReplayError>
    where
	S: DrawingSurface + ?Sized,
    {
	let current = self.current.unwrap_or(Point::ORIGIN);
	let mut cubic = None;
	let mut quadratic = None;

	match *segment {
	    Segment::MoveTo { pos, x, y } => {
		let p = pos.resolve(current, x, y);
		surface.move_to(p.x, p.y);
		self.subpath_start = Some(p);
		self.current = Some(p);
	    },
	    Segment::LineTo { pos, x, y } => {
		let p = pos.resolve(current, x, y);
		surface.line_to(p.x, p.y);
		self.current = Some(p);
	    },
	    Segment::HLineTo { pos, x } => {
		let p = Point::new(pos.resolve_x(current, x), current.y);
		surface.line_to(p.x, p.y);
		self.current = Some(p);
	    },
	    Segment::VLineTo { pos, y } => {
		let p = Point::new(current.x, pos.resolve_y(current, y));
		surface.line_to(p.x, p.y);
		self.current = Some(p);
	    },
	    Segment::CubicCurveTo { pos, cp1x, cp1y, cp2x, cp2y, x, y } => {
		let c1 = pos.resolve(current, cp1x, cp1y);
		let c2 = pos.resolve(current, cp2x, cp2y);
		let p = pos.resolve(current, x, y);
		surface.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
		cubic = Some(c2);
		self.current = Some(p);
	    },
	    Segment::SmoothCubicCurveTo { pos, cp2x, cp2y, x, y } => {
		let c1 = current.reflect(self.last_cubic.unwrap_or(current));
		let c2 = pos.resolve(current, cp2x, cp2y);
		let p = pos.resolve(current, x, y);
		surface.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
		cubic = Some(c2);
		self.current = Some(p);
	    },
	    Segment::QuadraticCurveTo { pos, cpx, cpy, x, y } => {
		let c = pos.resolve(current, cpx, cpy);
		let p = pos.resolve(current, x, y);
		surface.quadratic_curve_to(c.x, c.y, p.x, p.y);
		quadratic = Some(c);
		self.current = Some(p);
	    },
	    Segment::SmoothQuadraticCurveTo { pos, x, y } => {
		let c = current.reflect(self.last_quadratic.unwrap_or(current));
		let p = pos.resolve(current, x, y);
		surface.quadratic_curve_to(c.x, c.y, p.x, p.y);
		quadratic = Some(c);
		self.current = Some(p);
	    },
	    Segment::EllipticalArc { pos, rx, ry, rotation, large_arc, sweep, x, y } => {
		let p = pos.resolve(current, x, y);
		match arc::endpoint_to_center(current, p, rx, ry, rotation, large_arc, sweep) {
		    EndpointArc::Skip => (),
		    EndpointArc::Line(to) => surface.line_to(to.x, to.y),
		    EndpointArc::Arc(a) => {
			surface.save();
			surface.translate(a.center.x, a.center.y);
			surface.rotate(a.rotation);
			surface.scale(a.rx, a.ry);
			surface.arc(0.0, 0.0, 1.0, a.start_angle, a.end_angle, a.ccw);
			surface.restore();
		    },
		}
		self.current = Some(p);
	    },
	    Segment::ClosePath => match self.subpath_start.take() {
		Some(start) => {
		    surface.close_path();
		    self.current = Some(start);
		},
		None => match config.close_policy {
		    ClosePolicy::Ignore => tracing::warn!(index, "close path without subpath, skipped"),
		    ClosePolicy::Error => return Err(ReplayError::CloseWithoutSubpath { index }),
		},
	    },
	    Segment::Arc { cx, cy, r, start_angle, end_angle, ccw } => {
		let center = Point::new(cx, cy);
		surface.arc(cx, cy, r, start_angle, end_angle, ccw);
		self.open_at(arc::ellipse_point(center, r, r, 0.0, start_angle));
		self.current = Some(arc::ellipse_point(center, r, r, 0.0, end_angle));
	    },
	    Segment::ArcTo { x1, y1, x2, y2, r } => {
		surface.arc_to(x1, y1, x2, y2, r);
		let p1 = Point::new(x1, y1);
		// with no current point the surface treats this as a move to (x1, y1)
		let from = self.current.unwrap_or(p1);
		self.open_at(from);
		self.current = match arc::arc_to_tangents(from, p1, Point::new(x2, y2), r) {
		    Some(tangent) => Some(tangent.end),
		    None => Some(p1),
		};
	    },
	    Segment::Ellipse { cx, cy, rx, ry, rotation, start_angle, end_angle, ccw } => {
		let center = Point::new(cx, cy);
		surface.save();
		surface.translate(cx, cy);
		surface.rotate(rotation);
		surface.scale(rx, ry);
		surface.arc(0.0, 0.0, 1.0, start_angle, end_angle, ccw);
		surface.restore();
		self.open_at(arc::ellipse_point(center, rx, ry, rotation, start_angle));
		self.current = Some(arc::ellipse_point(center, rx, ry, rotation, end_angle));
	    },
	    Segment::Rect { x, y, w, h } => {
		surface.rect(x, y, w, h);
		let p = Point::new(x, y);
		self.subpath_start = Some(p);
		self.current = Some(p);
	    },
	}

	self.last_cubic = cubic;
	self.last_quadratic = quadratic;
	Ok(())
    }
}

/// Issues the surface calls equivalent to a path's segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replayer {
    config: ReplayConfig,
}

impl Replayer {
    pub fn new(config: ReplayConfig) -> Self {
	Replayer { config }
    }

    pub fn config(&self) -> &ReplayConfig {
	&self.config
    }

    /// Starts a new path on `surface` and replays every segment of `path`.
    ///
    /// Relative segments resolve against the current point of this replay,
    /// which starts at the origin.
    pub fn replay<S>(&self, path: &Path2D, surface: &mut S) -> Result<(), ReplayError>
    where
	S: DrawingSurface + ?Sized,
    {
	surface.begin_path();

	let mut state = ReplayState::default();
	for (index, segment) in path.iter().enumerate() {
	    tracing::trace!(index, ?segment, "replay");
	    state.step(index, segment, surface, &self.config)?;
	}

	tracing::debug!("replayed {} segments", path.len());
	Ok(())
    }

    /// Fills `path`, or the surface's own current path when `None`.
    pub fn fill<S>(&self, surface: &mut S, path: Option<&Path2D>, fill_rule: FillRule) -> Result<(), ReplayError>
    where
	S: DrawingSurface + ?Sized,
    {
	if let Some(path) = path {
	    self.replay(path, surface)?;
	}
	surface.fill(fill_rule);
	Ok(())
    }

    /// Strokes `path`, or the surface's own current path when `None`.
    pub fn stroke<S>(&self, surface: &mut S, path: Option<&Path2D>) -> Result<(), ReplayError>
    where
	S: DrawingSurface + ?Sized,
    {
	if let Some(path) = path {
	    self.replay(path, surface)?;
	}
	surface.stroke();
	Ok(())
    }
}

/// Fills with the default replay configuration.
pub fn draw_path<S>(surface: &mut S, path: Option<&Path2D>, fill_rule: FillRule) -> Result<(), ReplayError>
where
    S: DrawingSurface + ?Sized,
{
    Replayer::default().fill(surface, path, fill_rule)
}

/// Strokes with the default replay configuration.
pub fn stroke_path<S>(surface: &mut S, path: Option<&Path2D>) -> Result<(), ReplayError>
where
    S: DrawingSurface + ?Sized,
{
    Replayer::default().stroke(surface, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, SurfaceCall};

    fn replay(data: &str) -> Vec<SurfaceCall> {
	let path: Path2D = data.parse().unwrap();
	let mut surface = RecordingSurface::new();
	Replayer::default().replay(&path, &mut surface).unwrap();
	surface.take()
    }

    #[test]
    fn relative_commands_follow_current_point() {
	assert_eq!(
	    replay("m10 10 l5 0 h5 v-5 z m1 1"),
	    vec![
		SurfaceCall::BeginPath,
		SurfaceCall::MoveTo(10.0, 10.0),
		SurfaceCall::LineTo(15.0, 10.0),
		SurfaceCall::LineTo(20.0, 10.0),
		SurfaceCall::LineTo(20.0, 5.0),
		SurfaceCall::ClosePath,
		SurfaceCall::MoveTo(11.0, 11.0),
	    ]
	);
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
	let calls = replay("M0 0 C10 0 20 10 30 10 S50 20 60 20");
	assert_eq!(calls[3], SurfaceCall::BezierCurveTo(40.0, 10.0, 50.0, 20.0, 60.0, 20.0));
    }

    #[test]
    fn smooth_cubic_without_previous_cubic_starts_at_current_point() {
	let calls = replay("M5 5 Q0 0 10 10 S20 20 30 30");
	assert_eq!(calls[3], SurfaceCall::BezierCurveTo(10.0, 10.0, 20.0, 20.0, 30.0, 30.0));
    }

    #[test]
    fn smooth_quadratic_chain() {
	let calls = replay("M0 0 Q5 10 10 0 T20 0 t10 0");
	assert_eq!(calls[3], SurfaceCall::QuadraticCurveTo(15.0, -10.0, 20.0, 0.0));
	assert_eq!(calls[4], SurfaceCall::QuadraticCurveTo(25.0, 10.0, 30.0, 0.0));
    }

    #[test]
    fn other_segments_break_the_chain() {
	let calls = replay("M0 0 Q5 10 10 0 L20 0 T30 0");
	assert_eq!(calls[4], SurfaceCall::QuadraticCurveTo(20.0, 0.0, 30.0, 0.0));

	let calls = replay("M0 0 C0 5 5 5 10 0 Q15 0 20 0 S30 0 40 0");
	assert_eq!(calls[4], SurfaceCall::BezierCurveTo(20.0, 0.0, 30.0, 0.0, 40.0, 0.0));
    }

    #[test]
    fn elliptical_arc_uses_unit_circle() {
	let calls = replay("M0 0 A5 5 0 0 1 10 0");
	assert_eq!(calls[2], SurfaceCall::Save);
	assert_eq!(calls[3], SurfaceCall::Translate(5.0, 0.0));
	assert_eq!(calls[4], SurfaceCall::Rotate(0.0));
	assert_eq!(calls[5], SurfaceCall::Scale(5.0, 5.0));
	match calls[6] {
	    SurfaceCall::Arc(cx, cy, r, _, end, ccw) => {
		assert_eq!((cx, cy, r), (0.0, 0.0, 1.0));
		assert!(end.abs() < 1e-12);
		assert!(!ccw);
	    },
	    ref other => panic!("expected arc, got {:?}", other),
	}
	assert_eq!(calls[7], SurfaceCall::Restore);
	assert_eq!(calls.len(), 8);
    }

    #[test]
    fn zero_length_arc_draws_nothing() {
	assert_eq!(replay("M3 3 A5 5 0 0 1 3 3"), vec![SurfaceCall::BeginPath, SurfaceCall::MoveTo(3.0, 3.0)]);
    }

    #[test]
    fn second_close_is_ignored_by_default() {
	let calls = replay("M0 0 L1 0 Z Z");
	assert_eq!(calls.iter().filter(|c| **c == SurfaceCall::ClosePath).count(), 1);
    }

    #[test]
    fn second_close_fails_when_strict() {
	let path: Path2D = "M0 0 L1 0 Z Z".parse().unwrap();
	let mut surface = RecordingSurface::new();
	let err = Replayer::new(ReplayConfig::strict()).replay(&path, &mut surface).unwrap_err();
	assert_eq!(err, ReplayError::CloseWithoutSubpath { index: 3 });
    }

    #[test]
    fn native_segments_move_current_point_to_their_end() {
	let mut path = Path2D::new();
	path.arc(10.0, 10.0, 5.0, 0.0, std::f64::consts::PI / 2.0, false);
	path.add_path_data("l1 0").unwrap();
	path.arc_to(20.0, 15.0, 20.0, 30.0, 5.0);
	path.add_path_data("l0 1").unwrap();

	let mut surface = RecordingSurface::new();
	Replayer::default().replay(&path, &mut surface).unwrap();
	let calls = surface.take();

	match calls[2] {
	    SurfaceCall::LineTo(x, y) => assert!((x - 11.0).abs() < 1e-9 && (y - 15.0).abs() < 1e-9),
	    ref other => panic!("expected line, got {:?}", other),
	}
	// tangent point on the vertical leg of the arcTo corner at (20, 15)
	match calls[4] {
	    SurfaceCall::LineTo(x, y) => assert!((x - 20.0).abs() < 1e-9 && (y - 21.0).abs() < 1e-9),
	    ref other => panic!("expected line, got {:?}", other),
	}
    }

    #[test]
    fn fill_without_path_uses_surface_path() {
	let mut surface = RecordingSurface::new();
	draw_path(&mut surface, None, FillRule::EvenOdd).unwrap();
	assert_eq!(surface.calls(), &[SurfaceCall::Fill(FillRule::EvenOdd)]);
    }
}
