//! Reusable 2D paths that can be replayed onto any drawing surface.
//!
//! A [`Path2D`] is built from SVG path data or from canvas style calls
//! and replayed with a [`Replayer`] onto anything implementing
//! [`DrawingSurface`]:
//!
//! ```
//! use path2d::{Path2D, RecordingSurface, Replayer, SurfaceCall};
//!
//! let path: Path2D = "M0 0 L100 0 L100 100 Z".parse().unwrap();
//! let mut surface = RecordingSurface::new();
//! Replayer::default().replay(&path, &mut surface).unwrap();
//!
//! assert_eq!(surface.calls()[1], SurfaceCall::MoveTo(0.0, 0.0));
//! ```

pub mod arc;
mod config;
pub mod document;
mod error;
pub mod parse;
mod path;
mod replay;
mod segment;
mod surface;
mod types;

pub use config::{ClosePolicy, ReplayConfig};
pub use error::{DocumentError, MalformedKind, MalformedPathError, PathDataError, ReplayError};
pub use parse::RawCommand;
pub use path::Path2D;
pub use replay::{Replayer, draw_path, stroke_path};
pub use segment::Segment;
pub use surface::{DrawingSurface, RecordingSurface, SurfaceCall};
pub use types::{FillRule, ParseFillRuleError, Point, Position};
