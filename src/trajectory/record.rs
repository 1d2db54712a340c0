//! Expected records, sequences and emitted trajectories.

use crate::config::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
use crate::config::{AddressingMode, MAX_RETRY_COUNT};
use crate::error::{MotionError, RecordError, Result};
use crate::motion::{Direction, Kinematics, MoveClass, MoveCommand, MovePhase, MovePlan};

/// Maximum records in a sequence: two per attempt, `RTRY + 1` attempts.
pub const MAX_RECORDS: usize = 2 * (MAX_RETRY_COUNT as usize + 1);

/// One sub-move the controller is expected to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpectedRecord {
    /// Attempt index, 0 for the initial move.
    pub attempt: u8,
    /// Approach or backlash correction.
    pub phase: MovePhase,
    /// Direction of this sub-move.
    pub direction: Direction,
    /// Absolute position or relative displacement.
    pub addressing: AddressingMode,
    /// Commanded velocity.
    pub velocity: EguPerSec,
    /// Commanded acceleration.
    pub acceleration: EguPerSecSquared,
    /// Absolute position the sub-move ends at.
    pub target: Egu,
    /// Absolute position the sub-move starts from.
    pub origin: Egu,
}

impl ExpectedRecord {
    /// Displacement handed to the controller in relative addressing.
    #[inline]
    pub fn delta(&self) -> Egu {
        self.target - self.origin
    }

    /// Velocity and acceleration of the sub-move.
    #[inline]
    pub fn kinematics(&self) -> Kinematics {
        Kinematics::new(self.velocity, self.acceleration)
    }

    /// Estimated duration of the sub-move.
    #[inline]
    pub fn duration(&self) -> Seconds {
        self.kinematics().move_duration(self.delta())
    }
}

/// Ordered expected records, attempt-major and phase-minor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedSequence {
    records: heapless::Vec<ExpectedRecord, MAX_RECORDS>,
}

impl ExpectedSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            records: heapless::Vec::new(),
        }
    }

    /// Build a sequence from records in order.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooManyRecords` past [`MAX_RECORDS`].
    pub fn from_records<I>(records: I) -> core::result::Result<Self, RecordError>
    where
        I: IntoIterator<Item = ExpectedRecord>,
    {
        let mut sequence = Self::new();
        for record in records {
            sequence.push(record)?;
        }
        Ok(sequence)
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooManyRecords` if the sequence is full.
    pub fn push(&mut self, record: ExpectedRecord) -> core::result::Result<(), RecordError> {
        self.records
            .push(record)
            .map_err(|_| RecordError::TooManyRecords)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[ExpectedRecord] {
        &self.records
    }

    /// Iterate records in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &ExpectedRecord> {
        self.records.iter()
    }

    /// Number of attempts covered.
    pub fn attempts(&self) -> usize {
        self.records
            .last()
            .map(|r| usize::from(r.attempt) + 1)
            .unwrap_or(0)
    }

    /// Records of one attempt.
    pub fn attempt(&self, attempt: u8) -> impl Iterator<Item = &ExpectedRecord> {
        self.records.iter().filter(move |r| r.attempt == attempt)
    }
}

impl<'a> IntoIterator for &'a ExpectedSequence {
    type Item = &'a ExpectedRecord;
    type IntoIter = core::slice::Iter<'a, ExpectedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// How the predicted move ended.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settlement {
    /// Axis reached the target within tolerance.
    Settled {
        /// Attempts performed.
        attempts: u8,
    },
    /// Every attempt was used without settling.
    Exhausted {
        /// Attempts performed.
        attempts: u8,
        /// Commanded target minus final position.
        residual: Egu,
    },
}

impl Settlement {
    /// Attempts performed.
    #[inline]
    pub fn attempts(&self) -> u8 {
        match *self {
            Settlement::Settled { attempts } | Settlement::Exhausted { attempts, .. } => attempts,
        }
    }
}

/// Emitted prediction for one move command.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Command the prediction was made for.
    pub command: MoveCommand,
    /// Backlash plan chosen for the move.
    pub plan: MovePlan,
    /// Expected records.
    pub sequence: ExpectedSequence,
    /// Final state of the axis.
    pub settlement: Settlement,
    /// Delay after each attempt (DLY).
    pub settle_delay: Seconds,
}

impl Trajectory {
    /// SingleMove or TwoMove.
    #[inline]
    pub fn class(&self) -> MoveClass {
        self.plan.class()
    }

    /// Expected records in emission order.
    #[inline]
    pub fn records(&self) -> &[ExpectedRecord] {
        self.sequence.as_slice()
    }

    /// Attempts performed.
    #[inline]
    pub fn attempts(&self) -> u8 {
        self.settlement.attempts()
    }

    /// Check whether the axis settled.
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self.settlement, Settlement::Settled { .. })
    }

    /// Return the trajectory if it settled.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::DidNotSettle` if the retries were exhausted.
    pub fn require_settled(&self) -> Result<&Self> {
        match self.settlement {
            Settlement::Settled { .. } => Ok(self),
            Settlement::Exhausted { attempts, residual } => Err(MotionError::DidNotSettle {
                attempts,
                residual: residual.0,
            }
            .into()),
        }
    }

    /// Estimated wall time: every sub-move plus DLY after each attempt.
    pub fn estimated_duration(&self) -> Seconds {
        let moving = self
            .sequence
            .iter()
            .fold(Seconds(0.0), |acc, r| acc + r.duration());
        moving + Seconds(self.settle_delay.0 * f64::from(self.attempts()))
    }
}
