use path2d::{DrawingSurface, FillRule, Point, arc};

use crate::settings::{Color, Settings};

impl Color {
    /// Returns false for `Color::None`, leaving the source untouched.
    pub fn apply_to_context(self, cr: &cairo::Context) -> bool {
	match self {
	    Color::RGBA(r, g, b, a) => cr.set_source_rgba(r, g, b, a),
	    Color::RGB(r, g, b) => cr.set_source_rgb(r, g, b),
	    Color::None => return false,
	}
	true
    }
}

/// Replays onto a cairo context, painting with the colors from [`Settings`].
pub struct CairoSurface<'a> {
    cr: &'a cairo::Context,
    fill: Color,
    stroke: Color,
    stroke_width: f64,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a cairo::Context, settings: &Settings) -> Self {
	CairoSurface {
	    cr,
	    fill: settings.fill,
	    stroke: settings.stroke,
	    stroke_width: settings.stroke_width,
	}
    }

    fn current_point(&self) -> Option<Point> {
	if self.cr.has_current_point() {
	    Some(self.cr.get_current_point().into())
	} else {
	    None
	}
    }

    fn circle_arc(&self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, ccw: bool) {
	if ccw {
	    self.cr.arc_negative(cx, cy, r, start_angle, end_angle);
	} else {
	    self.cr.arc(cx, cy, r, start_angle, end_angle);
	}
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn begin_path(&mut self) {
	self.cr.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
	self.cr.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.cr.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
	self.cr.curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    // cairo has no quadratic primitive, raise it to a cubic
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
	let p0 = match self.current_point() {
	    Some(p) => p,
	    None => {
		self.cr.move_to(cpx, cpy);
		Point::new(cpx, cpy)
	    },
	};

	let c1x = p0.x + 2.0 / 3.0 * (cpx - p0.x);
	let c1y = p0.y + 2.0 / 3.0 * (cpy - p0.y);
	let c2x = x + 2.0 / 3.0 * (cpx - x);
	let c2y = y + 2.0 / 3.0 * (cpy - y);
	self.cr.curve_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, ccw: bool) {
	self.circle_arc(cx, cy, r, start_angle, end_angle, ccw);
    }

    fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, r: f64) {
	let p0 = match self.current_point() {
	    Some(p) => p,
	    None => {
		self.cr.move_to(x1, y1);
		return;
	    },
	};

	match arc::arc_to_tangents(p0, Point::new(x1, y1), Point::new(x2, y2), r) {
	    Some(t) => {
		self.cr.line_to(t.start.x, t.start.y);
		self.circle_arc(t.center.x, t.center.y, t.radius, t.start_angle, t.end_angle, t.ccw);
	    },
	    None => self.cr.line_to(x1, y1),
	}
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
	self.cr.rectangle(x, y, w, h);
    }

    fn close_path(&mut self) {
	self.cr.close_path();
    }

    fn save(&mut self) {
	self.cr.save();
    }

    fn restore(&mut self) {
	self.cr.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
	self.cr.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
	self.cr.rotate(angle);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
	self.cr.scale(sx, sy);
    }

    fn fill(&mut self, fill_rule: FillRule) {
	if !self.fill.apply_to_context(self.cr) {
	    return;
	}

	self.cr.set_fill_rule(match fill_rule {
	    FillRule::NonZero => cairo::FillRule::Winding,
	    FillRule::EvenOdd => cairo::FillRule::EvenOdd,
	});
	self.cr.fill_preserve();
    }

    fn stroke(&mut self) {
	if !self.stroke.apply_to_context(self.cr) {
	    return;
	}

	self.cr.set_line_width(self.stroke_width);
	self.cr.stroke_preserve();
    }
}
