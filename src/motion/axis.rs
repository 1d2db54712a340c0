//! Axis response models.
//!
//! The emitter does not simulate motion; it only needs to know where the axis
//! ends after each attempt to let the retry policy decide what follows.

use crate::config::units::Egu;

/// Where the axis stops after an attempt.
pub trait AxisModel {
    /// Position reached by attempt `attempt`, which started at `origin` and
    /// was commanded to `target`.
    fn settle(&mut self, attempt: u8, origin: Egu, target: Egu) -> Egu;
}

/// Axis that never moves.
///
/// Matches a simulator in manual mode: every commanded move is logged but the
/// position stays put, so all `RTRY + 1` attempts are emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldAxis;

impl AxisModel for HeldAxis {
    fn settle(&mut self, _attempt: u8, origin: Egu, _target: Egu) -> Egu {
        origin
    }
}

/// Axis that reaches every commanded target.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealAxis;

impl AxisModel for IdealAxis {
    fn settle(&mut self, _attempt: u8, _origin: Egu, target: Egu) -> Egu {
        target
    }
}

/// Axis covering a fixed fraction of each commanded displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalAxis {
    gain: f64,
}

impl ProportionalAxis {
    /// Create an axis moving `gain` of every commanded displacement.
    ///
    /// A non-finite gain makes emission fail with `MotionError::PositionLost`.
    pub const fn new(gain: f64) -> Self {
        Self { gain }
    }
}

impl AxisModel for ProportionalAxis {
    fn settle(&mut self, _attempt: u8, origin: Egu, target: Egu) -> Egu {
        origin + (target - origin) * self.gain
    }
}

impl<A: AxisModel + ?Sized> AxisModel for &mut A {
    fn settle(&mut self, attempt: u8, origin: Egu, target: Egu) -> Egu {
        (**self).settle(attempt, origin, target)
    }
}
