//! One-line text form of expected records.
//!
//! ```text
//! attempt=0 phase=approach direction=forward move=absolute position=72 velocity=10 acceleration=10 origin=48
//! attempt=0 phase=backlash direction=forward move=relative delta=24 velocity=2 acceleration=1.3333333333333333 origin=72
//! ```
//!
//! Absolute records carry the end `position`, relative ones the `delta` from
//! `origin`. Keys may appear in any order; blank lines and lines starting with
//! `#` are skipped when parsing a whole log.

use core::fmt::{self, Write};

use crate::config::units::{Egu, EguPerSec, EguPerSecSquared};
use crate::config::AddressingMode;
use crate::error::{truncated, RecordError};
use crate::motion::{Direction, MovePhase};

use super::record::{ExpectedRecord, ExpectedSequence};

/// Capacity of a formatted record line.
pub const RECORD_LINE_LEN: usize = 256;

/// Record value, written in exponent form outside `[1e-5, 1e16)` so every
/// finite `f64` fits a bounded line.
struct Number(f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for ExpectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt={} phase={} direction={} move={} ",
            self.attempt,
            self.phase.keyword(),
            self.direction.keyword(),
            self.addressing.keyword()
        )?;
        match self.addressing {
            AddressingMode::Absolute => write!(f, "position={}", Number(self.target.0))?,
            AddressingMode::Relative => write!(f, "delta={}", Number(self.delta().0))?,
        }
        write!(
            f,
            " velocity={} acceleration={} origin={}",
            Number(self.velocity.0),
            Number(self.acceleration.0),
            Number(self.origin.0)
        )
    }
}

/// Format a record into a bounded line.
///
/// # Errors
///
/// Returns `RecordError::LineTooLong` if the line exceeds [`RECORD_LINE_LEN`].
pub fn format_record(
    record: &ExpectedRecord,
) -> Result<heapless::String<RECORD_LINE_LEN>, RecordError> {
    let mut line = heapless::String::new();
    write!(line, "{}", record).map_err(|_| RecordError::LineTooLong)?;
    Ok(line)
}

/// Write every record of a sequence, one per line.
pub fn write_sequence<W: Write>(out: &mut W, records: &[ExpectedRecord]) -> fmt::Result {
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

#[derive(Default)]
struct Fields<'a> {
    attempt: Option<&'a str>,
    phase: Option<&'a str>,
    direction: Option<&'a str>,
    addressing: Option<&'a str>,
    position: Option<&'a str>,
    delta: Option<&'a str>,
    velocity: Option<&'a str>,
    acceleration: Option<&'a str>,
    origin: Option<&'a str>,
}

fn invalid(field: &'static str, value: &str) -> RecordError {
    RecordError::InvalidValue {
        field,
        value: truncated(value),
    }
}

fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, RecordError> {
    value.ok_or(RecordError::MissingField(field))
}

fn number(value: Option<&str>, field: &'static str) -> Result<f64, RecordError> {
    let raw = require(value, field)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(field, raw)),
    }
}

fn phase(raw: &str) -> Result<MovePhase, RecordError> {
    match raw {
        "approach" => Ok(MovePhase::Approach),
        "backlash" => Ok(MovePhase::BacklashCorrection),
        _ => Err(invalid("phase", raw)),
    }
}

fn direction(raw: &str) -> Result<Direction, RecordError> {
    match raw {
        "forward" => Ok(Direction::Forward),
        "reverse" => Ok(Direction::Reverse),
        _ => Err(invalid("direction", raw)),
    }
}

fn addressing(raw: &str) -> Result<AddressingMode, RecordError> {
    match raw {
        "absolute" => Ok(AddressingMode::Absolute),
        "relative" => Ok(AddressingMode::Relative),
        _ => Err(invalid("move", raw)),
    }
}

/// Parse one record line.
///
/// # Errors
///
/// Returns a `RecordError` for unknown keys, missing keys or bad values.
pub fn parse_record(line: &str) -> Result<ExpectedRecord, RecordError> {
    let mut fields = Fields::default();

    for token in line.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| RecordError::UnexpectedToken(truncated(token)))?;
        let slot = match key {
            "attempt" => &mut fields.attempt,
            "phase" => &mut fields.phase,
            "direction" => &mut fields.direction,
            "move" => &mut fields.addressing,
            "position" => &mut fields.position,
            "delta" => &mut fields.delta,
            "velocity" => &mut fields.velocity,
            "acceleration" => &mut fields.acceleration,
            "origin" => &mut fields.origin,
            _ => return Err(RecordError::UnexpectedToken(truncated(token))),
        };
        *slot = Some(value);
    }

    let raw_attempt = require(fields.attempt, "attempt")?;
    let attempt = raw_attempt
        .parse::<u8>()
        .map_err(|_| invalid("attempt", raw_attempt))?;
    let addressing = addressing(require(fields.addressing, "move")?)?;
    let origin = Egu(number(fields.origin, "origin")?);
    let target = match addressing {
        AddressingMode::Absolute => Egu(number(fields.position, "position")?),
        AddressingMode::Relative => origin + Egu(number(fields.delta, "delta")?),
    };

    Ok(ExpectedRecord {
        attempt,
        phase: phase(require(fields.phase, "phase")?)?,
        direction: direction(require(fields.direction, "direction")?)?,
        addressing,
        velocity: EguPerSec(number(fields.velocity, "velocity")?),
        acceleration: EguPerSecSquared(number(fields.acceleration, "acceleration")?),
        target,
        origin,
    })
}

/// Parse a whole log, one record per line.
///
/// # Errors
///
/// Returns the first `RecordError` encountered.
pub fn parse_sequence(text: &str) -> Result<ExpectedSequence, RecordError> {
    let mut sequence = ExpectedSequence::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        sequence.push(parse_record(line)?)?;
    }
    Ok(sequence)
}
