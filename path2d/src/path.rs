use std::{slice::Iter, str::FromStr};

use crate::error::{MalformedPathError, PathDataError};
use crate::parse::{self, RawCommand};
use crate::segment::{self, Segment};
use crate::types::Position;

/// A reusable, append-only sequence of drawing segments.
///
/// Built from path data, from imperative calls, or both; replayed onto a
/// [`DrawingSurface`](crate::DrawingSurface) with a
/// [`Replayer`](crate::Replayer). Cloning copies the segments, so later
/// changes to either path never show up in the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path2D {
    segments: Vec<Segment>,
}

impl Path2D {
    pub fn new() -> Self {
	Path2D::default()
    }

    pub fn segments(&self) -> &[Segment] {
	&self.segments
    }

    pub fn iter(&self) -> Iter<'_, Segment> {
	self.segments.iter()
    }

    pub fn len(&self) -> usize {
	self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
	self.segments.is_empty()
    }

    pub fn push(&mut self, segment: Segment) {
	self.segments.push(segment);
    }

    /// Appends a copy of all segments of `other`.
    pub fn add_path(&mut self, other: &Path2D) {
	self.segments.extend_from_slice(&other.segments);
    }

    pub fn add_commands(&mut self, commands: &[RawCommand]) {
	self.segments.extend(commands.iter().map(RawCommand::to_segment));
    }

    /// Parses `data` and appends its segments.
    ///
    /// On error nothing is appended.
    pub fn add_path_data(&mut self, data: &str) -> Result<(), MalformedPathError> {
	let commands = parse::parse_commands(data)?;
	tracing::debug!("appending {} segments from path data", commands.len());
	self.add_commands(&commands);
	Ok(())
    }

    /// Path data for this path, one command letter per segment.
    ///
    /// Fails when the path holds segments that only exist in the
    /// imperative form (arc, arcTo, ellipse, rect) or non-finite values.
    pub fn to_path_data(&self) -> Result<String, PathDataError> {
	segment::write_path_data(&self.segments)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
	self.push(Segment::MoveTo { pos: Position::Absolute, x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
	self.push(Segment::LineTo { pos: Position::Absolute, x, y });
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
	self.push(Segment::CubicCurveTo { pos: Position::Absolute, cp1x, cp1y, cp2x, cp2y, x, y });
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
	self.push(Segment::QuadraticCurveTo { pos: Position::Absolute, cpx, cpy, x, y });
    }

    pub fn arc(&mut self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, ccw: bool) {
	self.push(Segment::Arc { cx, cy, r, start_angle, end_angle, ccw });
    }

    pub fn arc_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, r: f64) {
	self.push(Segment::ArcTo { x1, y1, x2, y2, r });
    }

    pub fn ellipse(
	&mut self,
	cx: f64,
	cy: f64,
	rx: f64,
	ry: f64,
	rotation: f64,
	start_angle: f64,
	end_angle: f64,
	ccw: bool,
    ) {
	self.push(Segment::Ellipse { cx, cy, rx, ry, rotation, start_angle, end_angle, ccw });
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
	self.push(Segment::Rect { x, y, w, h });
    }

    pub fn close_path(&mut self) {
	self.push(Segment::ClosePath);
    }
}

impl FromStr for Path2D {
    type Err = MalformedPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	let mut path = Path2D::new();
	path.add_path_data(s)?;
	Ok(path)
    }
}

impl Extend<Segment> for Path2D {
    fn extend<T: IntoIterator<Item = Segment>>(&mut self, iter: T) {
	self.segments.extend(iter);
    }
}

impl std::iter::FromIterator<Segment> for Path2D {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
	Path2D { segments: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Path2D {
    type Item = &'a Segment;
    type IntoIter = Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
	self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_absolute_segments() {
	let mut path = Path2D::new();
	path.move_to(1.0, 2.0);
	path.quadratic_curve_to(3.0, 4.0, 5.0, 6.0);
	path.rect(0.0, 0.0, 10.0, 5.0);
	path.close_path();

	assert_eq!(
	    path.segments(),
	    &[
		Segment::MoveTo { pos: Position::Absolute, x: 1.0, y: 2.0 },
		Segment::QuadraticCurveTo { pos: Position::Absolute, cpx: 3.0, cpy: 4.0, x: 5.0, y: 6.0 },
		Segment::Rect { x: 0.0, y: 0.0, w: 10.0, h: 5.0 },
		Segment::ClosePath,
	    ]
	);
    }

    #[test]
    fn failed_parse_appends_nothing() {
	let mut path: Path2D = "M0 0 L5 5".parse().unwrap();
	assert!(path.add_path_data("L1 1 L2 2 X").is_err());
	assert_eq!(path.len(), 2);
    }

    #[test]
    fn add_path_copies() {
	let mut source: Path2D = "M0 0 L1 1".parse().unwrap();
	let mut dest = Path2D::new();
	dest.add_path(&source);
	source.line_to(2.0, 2.0);

	assert_eq!(dest.len(), 2);
	assert_eq!(source.len(), 3);
    }

    #[test]
    fn path_data_round_trip() {
	let data = "M10 20 l-5.5 0.25 H3 v-4 C1 2 3 4 5 6 s1 1 2 2 Q0 0 1 1 t2 2 A5 3 15 1 0 7 8 z";
	let path: Path2D = data.parse().unwrap();
	let written = path.to_path_data().unwrap();
	assert_eq!(written, data);
	assert_eq!(written.parse::<Path2D>().unwrap(), path);
    }

    #[test]
    fn empty_path() {
	let path: Path2D = "".parse().unwrap();
	assert!(path.is_empty());
	assert_eq!(path.to_path_data().unwrap(), "");
    }
}
