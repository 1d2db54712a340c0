//! Backlash planning.
//!
//! Decides whether a move can finish in one backlash-speed move or needs an
//! approach move followed by a backlash correction from the fixed direction.

use crate::config::units::Egu;
use crate::config::MotionParameters;

use super::profile::Direction;

/// Shape of a positioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveClass {
    /// One record per attempt.
    SingleMove,
    /// Approach record followed by a backlash correction record per attempt.
    TwoMove,
}

/// How each attempt of a move is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovePlan {
    /// No backlash distance configured: one move with positioning kinematics.
    Direct,
    /// Whole displacement lies inside the backlash band in the backlash
    /// direction: one move with backlash kinematics.
    WithinBand,
    /// Approach to `target - BDST`, then correct over BDST with backlash
    /// kinematics.
    Compensated,
}

impl MovePlan {
    /// Record layout of the plan.
    #[inline]
    pub fn class(self) -> MoveClass {
        match self {
            MovePlan::Direct | MovePlan::WithinBand => MoveClass::SingleMove,
            MovePlan::Compensated => MoveClass::TwoMove,
        }
    }

    /// Records emitted per attempt.
    #[inline]
    pub fn records_per_attempt(self) -> usize {
        match self.class() {
            MoveClass::SingleMove => 1,
            MoveClass::TwoMove => 2,
        }
    }
}

/// Backlash planner for one signed backlash distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacklashPlanner {
    distance: Egu,
}

impl BacklashPlanner {
    /// Create a planner for a signed backlash distance (BDST).
    #[inline]
    pub const fn new(distance: Egu) -> Self {
        Self { distance }
    }

    /// Create a planner from axis parameters.
    #[inline]
    pub fn from_parameters(params: &MotionParameters) -> Self {
        Self::new(params.backlash_distance)
    }

    /// Signed backlash distance.
    #[inline]
    pub fn distance(&self) -> Egu {
        self.distance
    }

    /// Direction every move finishes in.
    #[inline]
    pub fn backlash_direction(&self) -> Direction {
        Direction::from_delta(self.distance)
    }

    /// Where the approach move stops for a given final target.
    #[inline]
    pub fn approach_target(&self, target: Egu) -> Egu {
        target - self.distance
    }

    /// Plan a move from `start` to `target`.
    pub fn plan(&self, start: Egu, target: Egu) -> MovePlan {
        if self.distance.0 == 0.0 {
            return MovePlan::Direct;
        }

        let delta = target - start;
        let in_backlash_direction = Direction::from_delta(delta) == self.backlash_direction();

        if in_backlash_direction && delta.abs() <= self.distance.abs() {
            MovePlan::WithinBand
        } else {
            MovePlan::Compensated
        }
    }

    /// Classify a move from `start` to `target`.
    #[inline]
    pub fn classify(&self, start: Egu, target: Egu) -> MoveClass {
        self.plan(start, target).class()
    }
}

/// Classify a move against a signed backlash distance.
#[inline]
pub fn classify(start: Egu, target: Egu, backlash_distance: Egu) -> MoveClass {
    BacklashPlanner::new(backlash_distance).classify(start, target)
}
