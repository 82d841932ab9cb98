//! The drawing surface a path is replayed onto.

use crate::types::FillRule;

/// A stateful 2D path construction target, in the shape of the canvas
/// 2D context. Angles are in radians and `ccw` selects the direction of
/// circular arcs.
///
/// Rendering is entirely up to the implementor; a replay never reads
/// anything back from the surface.
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, ccw: bool);
    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, r: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn close_path(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    fn fill(&mut self, fill_rule: FillRule);
    fn stroke(&mut self);
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    BezierCurveTo(f64, f64, f64, f64, f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64, bool),
    ArcTo(f64, f64, f64, f64, f64),
    Rect(f64, f64, f64, f64),
    ClosePath,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Fill(FillRule),
    Stroke,
}

impl SurfaceCall {
    pub fn is_arc(&self) -> bool {
	matches!(self, SurfaceCall::Arc(..) | SurfaceCall::ArcTo(..))
    }
}

/// A surface that draws nothing and records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
	RecordingSurface::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
	&self.calls
    }

    pub fn take(&mut self) -> Vec<SurfaceCall> {
	std::mem::take(&mut self.calls)
    }

    fn push(&mut self, call: SurfaceCall) {
	tracing::trace!(?call, "surface call");
	self.calls.push(call);
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
	self.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
	self.push(SurfaceCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.push(SurfaceCall::LineTo(x, y));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
	self.push(SurfaceCall::BezierCurveTo(cp1x, cp1y, cp2x, cp2y, x, y));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
	self.push(SurfaceCall::QuadraticCurveTo(cpx, cpy, x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, ccw: bool) {
	self.push(SurfaceCall::Arc(cx, cy, r, start_angle, end_angle, ccw));
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, r: f64) {
	self.push(SurfaceCall::ArcTo(x1, y1, x2, y2, r));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
	self.push(SurfaceCall::Rect(x, y, w, h));
    }

    fn close_path(&mut self) {
	self.push(SurfaceCall::ClosePath);
    }

    fn save(&mut self) {
	self.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
	self.push(SurfaceCall::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
	self.push(SurfaceCall::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
	self.push(SurfaceCall::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
	self.push(SurfaceCall::Scale(sx, sy));
    }

    fn fill(&mut self, fill_rule: FillRule) {
	self.push(SurfaceCall::Fill(fill_rule));
    }

    fn stroke(&mut self) {
	self.push(SurfaceCall::Stroke);
    }
}
