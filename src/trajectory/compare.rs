//! Expected versus observed sequence comparison.

use core::fmt;

use libm::fabs;

use crate::config::{AddressingMode, MotionParameters};
use crate::motion::{Direction, MovePhase};

use super::record::ExpectedRecord;

/// Field of a record that diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// A record is missing on one side.
    Record,
    /// Attempt index.
    Attempt,
    /// Approach or backlash correction.
    Phase,
    /// Move direction.
    Direction,
    /// Absolute or relative addressing.
    Addressing,
    /// Commanded velocity.
    Velocity,
    /// Commanded acceleration.
    Acceleration,
    /// End position.
    Target,
    /// Start position.
    Origin,
}

impl Field {
    /// Key of the field in a record line.
    pub const fn keyword(self) -> &'static str {
        match self {
            Field::Record => "record",
            Field::Attempt => "attempt",
            Field::Phase => "phase",
            Field::Direction => "direction",
            Field::Addressing => "move",
            Field::Velocity => "velocity",
            Field::Acceleration => "acceleration",
            Field::Target => "position",
            Field::Origin => "origin",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Value of a diverging field on one side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldValue {
    /// No record at this index.
    Missing,
    /// A record exists at this index.
    Present,
    /// Attempt index.
    Attempt(u8),
    /// Phase.
    Phase(MovePhase),
    /// Direction.
    Direction(Direction),
    /// Addressing.
    Addressing(AddressingMode),
    /// Velocity, acceleration or position.
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => f.write_str("<missing>"),
            FieldValue::Present => f.write_str("<present>"),
            FieldValue::Attempt(a) => write!(f, "{}", a),
            FieldValue::Phase(p) => write!(f, "{}", p),
            FieldValue::Direction(d) => write!(f, "{}", d),
            FieldValue::Addressing(m) => f.write_str(m.keyword()),
            FieldValue::Number(v) => write!(f, "{}", v),
        }
    }
}

/// First divergence between two sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mismatch {
    /// Position in emission order.
    pub index: usize,
    /// Attempt of the record at `index` (expected side when present).
    pub attempt: u8,
    /// Phase of the record at `index` (expected side when present).
    pub phase: MovePhase,
    /// Field that differs.
    pub field: Field,
    /// Expected value.
    pub expected: FieldValue,
    /// Observed value.
    pub observed: FieldValue,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} (attempt {}, {}): {} expected {}, observed {}",
            self.index, self.attempt, self.phase, self.field, self.expected, self.observed
        )
    }
}

/// Result of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Comparison {
    /// Sequences agree record by record.
    Match,
    /// Sequences diverge.
    Mismatch(Mismatch),
}

impl Comparison {
    /// Check whether the sequences agree.
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Comparison::Match)
    }

    /// First divergence, if any.
    #[inline]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Comparison::Match => None,
            Comparison::Mismatch(m) => Some(m),
        }
    }
}

/// Positional comparator with a numeric tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceComparator {
    tolerance: f64,
}

impl Default for SequenceComparator {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

impl SequenceComparator {
    /// Create a comparator; floats within `tolerance` compare equal.
    #[inline]
    pub const fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Comparator using the settle tolerance of an axis.
    #[inline]
    pub fn from_parameters(params: &MotionParameters) -> Self {
        Self::new(params.settle_tolerance)
    }

    /// Numeric tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compare two sequences and report the first divergence.
    pub fn compare(&self, expected: &[ExpectedRecord], observed: &[ExpectedRecord]) -> Comparison {
        for (index, (e, o)) in expected.iter().zip(observed).enumerate() {
            if let Some(mismatch) = self.compare_records(index, e, o) {
                debug!("mismatch at record {}", index);
                return Comparison::Mismatch(mismatch);
            }
        }

        let common = expected.len().min(observed.len());
        match (expected.get(common), observed.get(common)) {
            (Some(e), None) => Comparison::Mismatch(Mismatch {
                index: common,
                attempt: e.attempt,
                phase: e.phase,
                field: Field::Record,
                expected: FieldValue::Present,
                observed: FieldValue::Missing,
            }),
            (None, Some(o)) => Comparison::Mismatch(Mismatch {
                index: common,
                attempt: o.attempt,
                phase: o.phase,
                field: Field::Record,
                expected: FieldValue::Missing,
                observed: FieldValue::Present,
            }),
            _ => Comparison::Match,
        }
    }

    /// Compare one record pair field by field.
    pub fn compare_records(
        &self,
        index: usize,
        expected: &ExpectedRecord,
        observed: &ExpectedRecord,
    ) -> Option<Mismatch> {
        let mismatch = |field, e, o| {
            Some(Mismatch {
                index,
                attempt: expected.attempt,
                phase: expected.phase,
                field,
                expected: e,
                observed: o,
            })
        };

        if expected.attempt != observed.attempt {
            return mismatch(
                Field::Attempt,
                FieldValue::Attempt(expected.attempt),
                FieldValue::Attempt(observed.attempt),
            );
        }
        if expected.phase != observed.phase {
            return mismatch(
                Field::Phase,
                FieldValue::Phase(expected.phase),
                FieldValue::Phase(observed.phase),
            );
        }
        if expected.direction != observed.direction {
            return mismatch(
                Field::Direction,
                FieldValue::Direction(expected.direction),
                FieldValue::Direction(observed.direction),
            );
        }
        if expected.addressing != observed.addressing {
            return mismatch(
                Field::Addressing,
                FieldValue::Addressing(expected.addressing),
                FieldValue::Addressing(observed.addressing),
            );
        }

        let numbers = [
            (Field::Velocity, expected.velocity.0, observed.velocity.0),
            (
                Field::Acceleration,
                expected.acceleration.0,
                observed.acceleration.0,
            ),
            (Field::Target, expected.target.0, observed.target.0),
            (Field::Origin, expected.origin.0, observed.origin.0),
        ];
        for (field, e, o) in numbers {
            if !self.close(e, o) {
                return mismatch(field, FieldValue::Number(e), FieldValue::Number(o));
            }
        }

        None
    }

    fn close(&self, a: f64, b: f64) -> bool {
        fabs(a - b) <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Egu, EguPerSec, EguPerSecSquared};

    fn record(attempt: u8, phase: MovePhase, target: f64) -> ExpectedRecord {
        ExpectedRecord {
            attempt,
            phase,
            direction: Direction::Forward,
            addressing: AddressingMode::Absolute,
            velocity: EguPerSec(10.0),
            acceleration: EguPerSecSquared(10.0),
            target: Egu(target),
            origin: Egu(48.0),
        }
    }

    fn sequence() -> [ExpectedRecord; 2] {
        [
            record(0, MovePhase::Approach, 72.0),
            record(0, MovePhase::BacklashCorrection, 96.0),
        ]
    }

    #[test]
    fn test_identical_match() {
        let comparator = SequenceComparator::default();
        assert!(comparator.compare(&sequence(), &sequence()).is_match());
    }

    #[test]
    fn test_within_tolerance() {
        let mut observed = sequence();
        observed[1].target = Egu(96.0 + 1e-9);
        assert!(SequenceComparator::new(1e-6)
            .compare(&sequence(), &observed)
            .is_match());
    }

    #[test]
    fn test_first_divergence_reported() {
        let mut observed = sequence();
        observed[1].direction = Direction::Reverse;
        observed[1].target = Egu(90.0);

        let comparison = SequenceComparator::default().compare(&sequence(), &observed);
        let mismatch = comparison.mismatch().unwrap();
        assert_eq!(mismatch.index, 1);
        assert_eq!(mismatch.phase, MovePhase::BacklashCorrection);
        assert_eq!(mismatch.field, Field::Direction);
        assert_eq!(mismatch.observed, FieldValue::Direction(Direction::Reverse));
    }

    #[test]
    fn test_numeric_mismatch() {
        let mut observed = sequence();
        observed[0].velocity = EguPerSec(5.0);

        let comparison = SequenceComparator::default().compare(&sequence(), &observed);
        assert_eq!(
            comparison,
            Comparison::Mismatch(Mismatch {
                index: 0,
                attempt: 0,
                phase: MovePhase::Approach,
                field: Field::Velocity,
                expected: FieldValue::Number(10.0),
                observed: FieldValue::Number(5.0),
            })
        );
    }

    #[test]
    fn test_length_mismatch() {
        let expected = sequence();
        let comparison = SequenceComparator::default().compare(&expected, &expected[..1]);
        let mismatch = comparison.mismatch().unwrap();
        assert_eq!(mismatch.index, 1);
        assert_eq!(mismatch.field, Field::Record);
        assert_eq!(mismatch.expected, FieldValue::Present);
        assert_eq!(mismatch.observed, FieldValue::Missing);

        let comparison = SequenceComparator::default().compare(&expected[..1], &expected);
        assert_eq!(comparison.mismatch().unwrap().observed, FieldValue::Present);
    }
}
