//! Error types for parsing, replaying and serializing paths.

use thiserror::Error;

/// What went wrong while reading path data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedKind {
    #[error("unknown command '{0}'")]
    UnknownCommand(char),
    #[error("expected a command letter")]
    ExpectedCommand,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("command '{command}' takes {expected} numbers, found {found}")]
    WrongArity {
	command: char,
	expected: usize,
	found: usize,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("arc flag must be 0 or 1, found '{0}'")]
    InvalidFlag(char),
}

/// Path data that does not follow the path mini-language.
///
/// `position` is the byte offset into the input where reading stopped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed path data at byte {position}: {kind}")]
pub struct MalformedPathError {
    pub position: usize,
    pub kind: MalformedKind,
}

impl MalformedPathError {
    pub fn new(position: usize, kind: MalformedKind) -> Self {
	MalformedPathError { position, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("segment {index}: close path without an open subpath")]
    CloseWithoutSubpath { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathDataError {
    /// arc, arcTo, ellipse and rect segments have no path data form.
    #[error("segment {index} has no path data representation")]
    NativeSegment { index: usize },
    #[error("segment {index} has a non-finite operand")]
    NonFinite { index: usize },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read SVG document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid SVG document: {0}")]
    Svg(String),
    #[error("path element {index}: {source}")]
    Path {
	index: usize,
	#[source]
	source: MalformedPathError,
    },
}
