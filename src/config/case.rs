//! Test case configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::modes::{AddressingMode, RetryMode};
use super::units::Egu;
use crate::motion::MoveCommand;

/// One positioning scenario of a test suite.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseConfig {
    /// Test case number, used in log file names.
    pub id: u32,

    /// Axis (device id) the case runs on; must match an axis in the suite.
    pub axis: String<32>,

    /// Retry mode (RMOD), as integer or name.
    #[serde(default, alias = "RMOD")]
    pub retry_mode: RetryMode,

    /// Move relative to the encoder position (UEIP).
    #[serde(default, alias = "UEIP")]
    pub use_encoder: bool,

    /// Position the axis is parked at before the move.
    pub start: Egu,

    /// Commanded position (VAL).
    #[serde(alias = "VAL")]
    pub target: Egu,
}

impl CaseConfig {
    /// Move command described by this case.
    pub fn command(&self) -> MoveCommand {
        MoveCommand::new(self.start, self.target)
            .with_retry_mode(self.retry_mode)
            .with_addressing(AddressingMode::from_encoder_flag(self.use_encoder))
    }
}
