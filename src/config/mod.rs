//! Configuration module for backlash-oracle.
//!
//! Provides motion parameters, retry/addressing modes and test suites, loaded
//! from TOML files (with `std` feature) or built in code.

mod builder;
mod case;
mod modes;
mod params;
mod suite;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use builder::ParametersBuilder;
pub use case::CaseConfig;
pub use modes::{AddressingMode, RetryCount, RetryMode, MAX_RETRY_COUNT};
pub use params::MotionParameters;
pub use suite::{SuiteConfig, MAX_AXES, MAX_CASES};
pub use validation::{validate_command, validate_parameters, validate_suite};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config, parse_parameters};

// Re-export unit types at config level
pub use units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
