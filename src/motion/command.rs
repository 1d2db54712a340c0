//! Move request handed to the emitter.

use crate::config::units::Egu;
use crate::config::{AddressingMode, RetryMode};

use super::profile::Direction;

/// A positioning request: where the axis is, where it must go, and how the
/// controller is told to retry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveCommand {
    /// Position of the axis before the move.
    pub start: Egu,
    /// Commanded position.
    pub target: Egu,
    /// Retry mode (RMOD).
    pub retry_mode: RetryMode,
    /// Configured addressing (from UEIP).
    pub addressing: AddressingMode,
}

impl MoveCommand {
    /// Absolute move with the default retry mode.
    pub const fn new(start: Egu, target: Egu) -> Self {
        Self {
            start,
            target,
            retry_mode: RetryMode::Default,
            addressing: AddressingMode::Absolute,
        }
    }

    /// Set the retry mode.
    pub const fn with_retry_mode(mut self, mode: RetryMode) -> Self {
        self.retry_mode = mode;
        self
    }

    /// Set the configured addressing mode.
    pub const fn with_addressing(mut self, addressing: AddressingMode) -> Self {
        self.addressing = addressing;
        self
    }

    /// Signed displacement of the whole move.
    #[inline]
    pub fn displacement(&self) -> Egu {
        self.target - self.start
    }

    /// Direction of the whole move.
    #[inline]
    pub fn direction(&self) -> Direction {
        Direction::from_delta(self.displacement())
    }

    /// Addressing actually used; in-position retries are always absolute.
    #[inline]
    pub fn effective_addressing(&self) -> AddressingMode {
        match self.retry_mode {
            RetryMode::InPosition => AddressingMode::Absolute,
            _ => self.addressing,
        }
    }
}
