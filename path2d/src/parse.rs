//! Reader for the path mini-language (the `d` attribute of SVG paths).
//!
//! Parsing happens in two steps: the text is split into [`RawCommand`]s,
//! one per operand group, and each raw command is then mapped to its
//! [`Segment`]. This module is the only place where command letters are
//! interpreted.
//!
//! Repetition rule: after a command letter, further operand groups repeat
//! the same command, except after `M`/`m` where the second and later
//! groups are read as `L`/`l`. `Z`/`z` takes no operands and never repeats.

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, tuple},
};

use crate::error::{MalformedKind, MalformedPathError};
use crate::segment::Segment;
use crate::types::Position;

/// A command letter with exactly one operand group.
///
/// Arc flags are stored as `0.0` or `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    command: char,
    operands: Vec<f64>,
}

impl RawCommand {
    pub fn command(&self) -> char {
	self.command
    }

    pub fn operands(&self) -> &[f64] {
	&self.operands
    }

    pub fn to_segment(&self) -> Segment {
	let pos = if self.command.is_ascii_lowercase() {
	    Position::Relative
	} else {
	    Position::Absolute
	};

	match (self.command.to_ascii_uppercase(), self.operands.as_slice()) {
	    ('M', &[x, y]) => Segment::MoveTo { pos, x, y },
	    ('L', &[x, y]) => Segment::LineTo { pos, x, y },
	    ('H', &[x]) => Segment::HLineTo { pos, x },
	    ('V', &[y]) => Segment::VLineTo { pos, y },
	    ('C', &[cp1x, cp1y, cp2x, cp2y, x, y]) => Segment::CubicCurveTo { pos, cp1x, cp1y, cp2x, cp2y, x, y },
	    ('S', &[cp2x, cp2y, x, y]) => Segment::SmoothCubicCurveTo { pos, cp2x, cp2y, x, y },
	    ('Q', &[cpx, cpy, x, y]) => Segment::QuadraticCurveTo { pos, cpx, cpy, x, y },
	    ('T', &[x, y]) => Segment::SmoothQuadraticCurveTo { pos, x, y },
	    ('A', &[rx, ry, rotation, large_arc, sweep, x, y]) => Segment::EllipticalArc {
		pos,
		rx,
		ry,
		rotation,
		large_arc: large_arc != 0.0,
		sweep: sweep != 0.0,
		x,
		y,
	    },
	    ('Z', &[]) => Segment::ClosePath,
	    (c, o) => unreachable!("raw command '{}' with {} operands", c, o.len()),
	}
    }
}

fn arity(command: char) -> Option<usize> {
    Some(match command.to_ascii_uppercase() {
	'M' | 'L' | 'T' => 2,
	'H' | 'V' => 1,
	'C' => 6,
	'S' | 'Q' => 4,
	'A' => 7,
	'Z' => 0,
	_ => return None,
    })
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '+' || c == '-' || c == '.'
}

///`sign? (digits ('.' digits?)? | '.' digits) (('e'|'E') sign? digits)?`
fn number(input: &str) -> IResult<&str, f64> {
    let mantissa = alt((
	recognize(pair(digit1, opt(pair(char('.'), digit0)))),
	recognize(pair(char('.'), digit1)),
    ));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));

    map_res(
	recognize(tuple((opt(one_of("+-")), mantissa, opt(exponent)))),
	|s: &str| s.parse::<f64>(),
    )(input)
}

fn flag(input: &str) -> IResult<&str, f64> {
    map(one_of("01"), |c| if c == '1' { 1.0 } else { 0.0 })(input)
}

fn wsp(input: &str) -> &str {
    let res: IResult<&str, &str> = multispace0(input);
    res.map(|(rest, _)| rest).unwrap_or(input)
}

fn comma_wsp(input: &str) -> &str {
    let res: IResult<&str, _> = tuple((multispace0, opt(char(',')), multispace0))(input);
    res.map(|(rest, _)| rest).unwrap_or(input)
}

struct Reader<'a> {
    data: &'a str,
    rest: &'a str,
}

impl<'a> Reader<'a> {
    fn position(&self) -> usize {
	self.data.len() - self.rest.len()
    }

    fn error(&self, kind: MalformedKind) -> MalformedPathError {
	MalformedPathError::new(self.position(), kind)
    }

    fn operands(&mut self, command: char, expected: usize) -> Result<Vec<f64>, MalformedPathError> {
	let mut operands = Vec::with_capacity(expected);

	for i in 0..expected {
	    if i > 0 {
		self.rest = comma_wsp(self.rest);
	    }

	    let is_flag = command.to_ascii_uppercase() == 'A' && (i == 3 || i == 4);
	    let parsed = if is_flag { flag(self.rest) } else { number(self.rest) };

	    match parsed {
		Ok((rest, value)) => {
		    operands.push(value);
		    self.rest = rest;
		},
		Err(_) => return Err(self.operand_error(command, expected, operands.len(), is_flag)),
	    }
	}

	Ok(operands)
    }

    fn operand_error(&self, command: char, expected: usize, found: usize, is_flag: bool) -> MalformedPathError {
	let arity_err = MalformedKind::WrongArity { command, expected, found };

	let kind = match self.rest.chars().next() {
	    None => arity_err,
	    Some(c) if c.is_ascii_alphabetic() => arity_err,
	    Some(c) if is_flag && is_number_start(c) => MalformedKind::InvalidFlag(c),
	    Some(c) if is_number_start(c) => {
		let token = self.rest
		    .split(|c: char| c.is_whitespace() || c == ',')
		    .next()
		    .unwrap_or(self.rest);
		MalformedKind::InvalidNumber(String::from(token))
	    },
	    Some(c) => MalformedKind::UnexpectedCharacter(c),
	};

	self.error(kind)
    }
}

/// Splits path data into raw commands, one per operand group.
///
/// Empty or whitespace-only input yields no commands.
pub fn parse_commands(data: &str) -> Result<Vec<RawCommand>, MalformedPathError> {
    let mut reader = Reader { data, rest: wsp(data) };
    let mut commands = Vec::new();
    let mut implicit: Option<char> = None;

    while let Some(c) = reader.rest.chars().next() {
	let command = if c.is_ascii_alphabetic() {
	    if arity(c).is_none() {
		return Err(reader.error(MalformedKind::UnknownCommand(c)));
	    }
	    reader.rest = wsp(&reader.rest[c.len_utf8()..]);
	    c
	} else if is_number_start(c) {
	    implicit.ok_or_else(|| reader.error(MalformedKind::ExpectedCommand))?
	} else {
	    return Err(reader.error(MalformedKind::UnexpectedCharacter(c)));
	};

	let expected = arity(command).unwrap_or(0);
	let operands = reader.operands(command, expected)?;
	commands.push(RawCommand { command, operands });

	implicit = match command {
	    'M' => Some('L'),
	    'm' => Some('l'),
	    'Z' | 'z' => None,
	    other => Some(other),
	};

	reader.rest = if expected == 0 {
	    wsp(reader.rest)
	} else {
	    comma_wsp(reader.rest)
	};
    }

    tracing::trace!("parsed {} path commands", commands.len());
    Ok(commands)
}

/// Parses path data straight into segments.
pub fn parse_segments(data: &str) -> Result<Vec<Segment>, MalformedPathError> {
    Ok(parse_commands(data)?.iter().map(RawCommand::to_segment).collect())
}
