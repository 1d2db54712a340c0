//! Error types for backlash-oracle.
//!
//! Provides unified error handling across configuration, trajectory emission,
//! and record parsing.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all backlash-oracle operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Move did not settle within the retry budget
    Motion(MotionError),
    /// Malformed expected/actual record
    Record(RecordError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A velocity, acceleration, or acceleration time is not strictly positive
    NonPositive {
        /// Parameter name (motor record field)
        field: &'static str,
        /// Offending value
        value: f64,
    },
    /// Required parameter not supplied to a builder
    MissingParameter(&'static str),
    /// Move fraction outside (0, 1]
    InvalidMoveFraction(f64),
    /// Retry count outside 0..=10
    InvalidRetryCount(i64),
    /// Retry mode index outside 0..=3
    InvalidRetryMode(i64),
    /// Settle delay is negative
    NegativeSettleDelay(f64),
    /// Geometric ratio outside (0, 1)
    InvalidGeometricRatio(f64),
    /// Settle tolerance negative or not finite
    InvalidTolerance(f64),
    /// Backlash distance is not a finite number
    InvalidBacklashDistance(f64),
    /// Start or target position is not a finite number
    InvalidPosition(f64),
    /// Axis name not found in configuration
    AxisNotFound(heapless::String<32>),
    /// Two test cases share the same id
    DuplicateCaseId(u32),
    /// No test case with this id
    CaseNotFound(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Outcome errors of a predicted move.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Every attempt was used and the axis is still outside tolerance
    DidNotSettle {
        /// Attempts performed (initial move plus retries)
        attempts: u8,
        /// Remaining distance to the commanded target
        residual: f64,
    },
    /// An axis model reported a position that is not finite
    PositionLost {
        /// Attempt after which the position was reported
        attempt: u8,
        /// Reported position
        position: f64,
    },
}

/// Record line parsing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A required key is absent from the line
    MissingField(&'static str),
    /// A key is present but its value does not parse
    InvalidValue {
        /// Key name
        field: &'static str,
        /// Raw value (truncated)
        value: heapless::String<32>,
    },
    /// Token that is not `key=value` or an unknown key
    UnexpectedToken(heapless::String<32>),
    /// Record buffer is full
    TooManyRecords,
    /// Formatted record does not fit the line buffer
    LineTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Record(e) => write!(f, "Record error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NonPositive { field, value } => {
                write!(f, "Invalid {}: {}. Must be > 0", field, value)
            }
            ConfigError::MissingParameter(field) => write!(f, "Missing parameter {}", field),
            ConfigError::InvalidMoveFraction(v) => {
                write!(f, "Invalid move fraction FRAC: {}. Must be in (0, 1]", v)
            }
            ConfigError::InvalidRetryCount(v) => {
                write!(f, "Invalid retry count RTRY: {}. Must be 0-10", v)
            }
            ConfigError::InvalidRetryMode(v) => {
                write!(f, "Invalid retry mode RMOD: {}. Must be 0-3", v)
            }
            ConfigError::NegativeSettleDelay(v) => {
                write!(f, "Invalid settle delay DLY: {}. Must be >= 0", v)
            }
            ConfigError::InvalidGeometricRatio(v) => {
                write!(f, "Invalid geometric ratio: {}. Must be in (0, 1)", v)
            }
            ConfigError::InvalidTolerance(v) => {
                write!(f, "Invalid settle tolerance: {}. Must be finite and >= 0", v)
            }
            ConfigError::InvalidBacklashDistance(v) => {
                write!(f, "Invalid backlash distance BDST: {}", v)
            }
            ConfigError::InvalidPosition(v) => write!(f, "Invalid position: {}", v),
            ConfigError::AxisNotFound(name) => write!(f, "Axis '{}' not found", name),
            ConfigError::DuplicateCaseId(id) => write!(f, "Duplicate test case id: {}", id),
            ConfigError::CaseNotFound(id) => write!(f, "Test case {} not found", id),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::DidNotSettle { attempts, residual } => write!(
                f,
                "Did not settle after {} attempts, residual {}",
                attempts, residual
            ),
            MotionError::PositionLost { attempt, position } => write!(
                f,
                "Axis reported position {} after attempt {}",
                position, attempt
            ),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField(field) => write!(f, "Missing field '{}'", field),
            RecordError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{}' for field '{}'", value, field)
            }
            RecordError::UnexpectedToken(token) => write!(f, "Unexpected token '{}'", token),
            RecordError::TooManyRecords => write!(f, "Too many records in sequence"),
            RecordError::LineTooLong => write!(f, "Record line too long"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<RecordError> for Error {
    fn from(e: RecordError) -> Self {
        Error::Record(e)
    }
}

/// Copy a `&str` into a bounded string, truncating on a char boundary.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for RecordError {}
