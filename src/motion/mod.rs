//! Motion module for backlash-oracle.
//!
//! Provides move commands, backlash planning, retry policies and the axis
//! response models the emitter consults.

pub mod axis;
mod backlash;
mod command;
mod profile;
pub mod retry;

pub use axis::{AxisModel, HeldAxis, IdealAxis, ProportionalAxis};
pub use backlash::{classify, BacklashPlanner, MoveClass, MovePlan};
pub use command::MoveCommand;
pub use profile::{Direction, Kinematics, MovePhase};
pub use retry::{AttemptTarget, RetryDecision, RetryModePolicy, RetryStrategy};
