//! # backlash-oracle
//!
//! Expected-trajectory oracle for motor controller backlash compensation and
//! retry modes.
//!
//! Given the motion parameters of an axis and a move request, the crate
//! predicts the exact sequence of sub-moves the controller must perform:
//! approach and backlash correction moves, their direction, velocity and
//! acceleration, and the retries selected by the retry mode. The prediction
//! is diffed against what the controller actually did.
//!
//! ## Features
//!
//! - **Backlash planning**: single move inside the backlash band, approach
//!   plus correction otherwise
//! - **Retry modes**: Default, Arithmetic, Geometric and In-Position
//! - **Absolute and relative addressing**
//! - **Configuration-driven**: axes and test cases in TOML files
//! - **no_std compatible**: core emission and comparison need no allocator
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backlash_oracle::{emit, LogFiles, MoveCommand, SequenceComparator};
//!
//! let suite = backlash_oracle::load_config("rtry_bdst_rmod.toml")?;
//! let case = suite.case(14201).unwrap();
//! let params = suite.axis(case.axis.as_str()).unwrap();
//!
//! let trajectory = emit(&case.command(), params)?;
//! let files = LogFiles::in_default_dir(case.axis.as_str(), case.id);
//! files.write_expected(&trajectory)?;
//!
//! let observed = files.read_actual()?;
//! let comparison = SequenceComparator::from_parameters(params)
//!     .compare(trajectory.records(), observed.as_slice());
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `log` output
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `log`: Routes internal diagnostics to the `log` facade
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod trajectory;

#[cfg(feature = "std")]
pub mod logfile;

// Re-exports for ergonomic API
pub use config::{
    validate_command, validate_parameters, validate_suite, AddressingMode, CaseConfig,
    MotionParameters, ParametersBuilder, RetryCount, RetryMode, SuiteConfig,
};
pub use error::{Error, Result};
pub use motion::{
    classify, AxisModel, BacklashPlanner, Direction, HeldAxis, IdealAxis, MoveClass, MoveCommand,
    MovePhase, MovePlan, ProportionalAxis, RetryDecision, RetryModePolicy,
};
pub use trajectory::{
    emit, emit_case, CaseMatrix, Comparison, ExpectedRecord, ExpectedSequence, SequenceComparator,
    Settlement, Trajectory, TrajectoryEmitter,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
#[cfg(feature = "std")]
pub use logfile::LogFiles;

// Unit types
pub use config::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
