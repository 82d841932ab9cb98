//! Arc geometry.
//!
//! Endpoint parameterized arcs (the `A` command) are converted to the
//! center form following the SVG implementation notes (F.6.5), so that a
//! surface with only a circular `arc` primitive can draw them through
//! translate, rotate and scale.

use std::f64::consts::PI;

use crate::types::Point;

/// An elliptical arc in center parameterization.
///
/// Drawn as a unit circle arc from `start_angle` to `end_angle` after
/// translating to `center`, rotating by `rotation` (radians) and scaling
/// by `(rx, ry)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub ccw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndpointArc {
    /// End point equals the current point, nothing is drawn.
    Skip,
    /// A zero radius, the arc is a straight line to the end point.
    Line(Point),
    Arc(CenterArc),
}

/// Converts an arc given by its end points to center parameterization.
///
/// `rotation` is in degrees. Negative radii are taken by absolute value
/// and radii too small to reach `to` are scaled up uniformly.
pub fn endpoint_to_center(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> EndpointArc {
    if from == to {
	return EndpointArc::Skip;
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx == 0.0 || ry == 0.0 {
	return EndpointArc::Line(to);
    }

    let phi = rotation * PI / 180.0;

    let mid = Point::new((from.x - to.x) / 2.0, (from.y - to.y) / 2.0).rotate(-phi);

    let lambda = radius_ratio(mid, rx, ry);
    if lambda > 1.0 {
	let scale = lambda.sqrt();
	rx *= scale;
	ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let t1 = rx2 * ry2;
    let t2 = rx2 * mid.y * mid.y + ry2 * mid.x * mid.x;

    // t1 - t2 only goes negative through rounding after the radius scale-up
    let mut coef = ((t1 - t2) / t2).max(0.0).sqrt();
    if large_arc == sweep {
	coef = -coef;
    }

    let center_prime = Point::new(coef * rx * mid.y / ry, -coef * ry * mid.x / rx);

    let start_angle = ((mid.y - center_prime.y) / ry).atan2((mid.x - center_prime.x) / rx);
    let end_angle = (-(mid.y + center_prime.y) / ry).atan2(-(mid.x + center_prime.x) / rx);

    let rotated = center_prime.rotate(phi);
    let center = Point::new(
	rotated.x + (from.x + to.x) / 2.0,
	rotated.y + (from.y + to.y) / 2.0,
    );

    EndpointArc::Arc(CenterArc {
	center,
	rx,
	ry,
	rotation: phi,
	start_angle,
	end_angle,
	ccw: !sweep,
    })
}

///`x'^2 / rx^2 + y'^2 / ry^2`; above 1 the radii cannot span the end points.
pub fn radius_ratio(mid: Point, rx: f64, ry: f64) -> f64 {
    (mid.x * mid.x) / (rx * rx) + (mid.y * mid.y) / (ry * ry)
}

/// Point on a rotated ellipse at parameter `angle`.
pub fn ellipse_point(center: Point, rx: f64, ry: f64, rotation: f64, angle: f64) -> Point {
    let local = Point::new(rx * angle.cos(), ry * angle.sin()).rotate(rotation);
    Point::new(center.x + local.x, center.y + local.y)
}

/// The circle of an `arcTo`, tangent to both `p0 -> p1` and `p1 -> p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentArc {
    /// Tangent point on the first line.
    pub start: Point,
    /// Tangent point on the second line.
    pub end: Point,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub ccw: bool,
}

/// Computes the tangent circle of `arcTo(p1, p2, radius)` from `p0`.
///
/// Returns `None` when the points are coincident or collinear or the
/// radius is zero; the primitive then reduces to a line to `p1`.
pub fn arc_to_tangents(p0: Point, p1: Point, p2: Point, radius: f64) -> Option<TangentArc> {
    if p0 == p1 || p1 == p2 || radius == 0.0 {
	return None;
    }

    let (ux, uy) = (p0.x - p1.x, p0.y - p1.y);
    let (vx, vy) = (p2.x - p1.x, p2.y - p1.y);
    let len_u = ux.hypot(uy);
    let len_v = vx.hypot(vy);

    let cross = ux * vy - uy * vx;
    if cross.abs() <= f64::EPSILON * len_u * len_v {
	return None;
    }

    let cos = ((ux * vx + uy * vy) / (len_u * len_v)).max(-1.0).min(1.0);
    let half = cos.acos() / 2.0;
    let dist = radius / half.tan();

    let (ux, uy) = (ux / len_u, uy / len_u);
    let (vx, vy) = (vx / len_v, vy / len_v);
    let start = Point::new(p1.x + ux * dist, p1.y + uy * dist);
    let end = Point::new(p1.x + vx * dist, p1.y + vy * dist);

    let (bx, by) = (ux + vx, uy + vy);
    let len_b = bx.hypot(by);
    let center_dist = radius / half.sin();
    let center = Point::new(p1.x + bx / len_b * center_dist, p1.y + by / len_b * center_dist);

    Some(TangentArc {
	start,
	end,
	center,
	radius,
	start_angle: (start.y - center.y).atan2(start.x - center.x),
	end_angle: (end.y - center.y).atan2(end.x - center.x),
	// the arc turns the same way as the corner
	ccw: cross > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
	(a - b).abs() < EPS
    }

    fn arc(from: Point, to: Point, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool) -> CenterArc {
	match endpoint_to_center(from, to, rx, ry, rotation, large_arc, sweep) {
	    EndpointArc::Arc(arc) => arc,
	    other => panic!("expected an arc, got {:?}", other),
	}
    }

    #[test]
    fn same_end_point_is_skipped() {
	let p = Point::new(3.0, 4.0);
	assert_eq!(endpoint_to_center(p, p, 5.0, 5.0, 0.0, false, true), EndpointArc::Skip);
    }

    #[test]
    fn zero_radius_is_a_line() {
	let to = Point::new(10.0, 10.0);
	assert_eq!(endpoint_to_center(Point::ORIGIN, to, 0.0, 0.0, 0.0, true, true), EndpointArc::Line(to));
	assert_eq!(endpoint_to_center(Point::ORIGIN, to, 4.0, 0.0, 45.0, false, false), EndpointArc::Line(to));
    }

    #[test]
    fn half_circle_center() {
	let a = arc(Point::ORIGIN, Point::new(10.0, 0.0), 5.0, 5.0, 0.0, false, true);
	assert!(close(a.center.x, 5.0) && close(a.center.y, 0.0));
	assert!(close(a.rx, 5.0) && close(a.ry, 5.0));
	assert!(close(a.start_angle.abs(), PI));
	assert!(close(a.end_angle, 0.0));
	assert!(!a.ccw);
    }

    #[test]
    fn quarter_arc_picks_center_by_flags() {
	let from = Point::new(10.0, 0.0);
	let to = Point::new(0.0, 10.0);

	let small_cw = arc(from, to, 10.0, 10.0, 0.0, false, true);
	assert!(close(small_cw.center.x, 0.0) && close(small_cw.center.y, 0.0));
	assert!(close(small_cw.start_angle, 0.0));
	assert!(close(small_cw.end_angle, PI / 2.0));

	let large_cw = arc(from, to, 10.0, 10.0, 0.0, true, true);
	assert!(close(large_cw.center.x, 10.0) && close(large_cw.center.y, 10.0));
    }

    #[test]
    fn end_points_lie_on_the_ellipse() {
	let from = Point::new(-3.0, 7.0);
	let to = Point::new(12.0, -2.5);
	for &(large_arc, sweep) in &[(false, false), (false, true), (true, false), (true, true)] {
	    let a = arc(from, to, 9.0, 4.0, 30.0, large_arc, sweep);
	    let s = ellipse_point(a.center, a.rx, a.ry, a.rotation, a.start_angle);
	    let e = ellipse_point(a.center, a.rx, a.ry, a.rotation, a.end_angle);
	    assert!(close(s.x, from.x) && close(s.y, from.y), "start {:?}", s);
	    assert!(close(e.x, to.x) && close(e.y, to.y), "end {:?}", e);
	}
    }

    #[test]
    fn undersized_radii_are_scaled_up() {
	let from = Point::ORIGIN;
	let to = Point::new(100.0, 40.0);
	for &(rx, ry, rotation) in &[(1.0, 1.0, 0.0), (3.0, 0.5, 20.0), (10.0, 25.0, -75.0)] {
	    let a = arc(from, to, rx, ry, rotation, false, true);
	    assert!(a.rx >= rx && a.ry >= ry);
	    assert!(close(a.rx / a.ry, rx / ry));

	    let mid = Point::new((from.x - to.x) / 2.0, (from.y - to.y) / 2.0).rotate(-a.rotation);
	    assert!(radius_ratio(mid, a.rx, a.ry) <= 1.0 + EPS);
	}
    }

    #[test]
    fn negative_radii_use_absolute_value() {
	let a = arc(Point::ORIGIN, Point::new(10.0, 0.0), -5.0, -5.0, 0.0, false, true);
	assert!(close(a.rx, 5.0) && close(a.ry, 5.0));
    }

    #[test]
    fn arc_to_right_angle_corner() {
	let t = arc_to_tangents(Point::ORIGIN, Point::new(10.0, 0.0), Point::new(10.0, 10.0), 2.0).unwrap();
	assert!(close(t.start.x, 8.0) && close(t.start.y, 0.0));
	assert!(close(t.end.x, 10.0) && close(t.end.y, 2.0));
	assert!(close(t.center.x, 8.0) && close(t.center.y, 2.0));
	assert!(close(t.start_angle, -PI / 2.0));
	assert!(close(t.end_angle, 0.0));
	assert!(!t.ccw);
    }

    #[test]
    fn arc_to_degenerate_cases() {
	let p0 = Point::ORIGIN;
	let p1 = Point::new(5.0, 0.0);
	assert_eq!(arc_to_tangents(p0, p1, Point::new(10.0, 0.0), 2.0), None);
	assert_eq!(arc_to_tangents(p0, p0, Point::new(10.0, 3.0), 2.0), None);
	assert_eq!(arc_to_tangents(p0, p1, Point::new(5.0, 5.0), 0.0), None);
    }
}
