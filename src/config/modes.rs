//! Retry mode, addressing mode and retry count.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// How the controller refines the target of each retry (motor record RMOD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryMode {
    /// Every retry re-issues the original target.
    #[default]
    Default,
    /// Retry displacement shrinks linearly with the retry number.
    Arithmetic,
    /// Retry displacement shrinks by a fixed ratio per retry.
    Geometric,
    /// Controller-side in-position retries, always absolute.
    InPosition,
}

impl RetryMode {
    /// All modes in RMOD order.
    pub const ALL: [RetryMode; 4] = [
        RetryMode::Default,
        RetryMode::Arithmetic,
        RetryMode::Geometric,
        RetryMode::InPosition,
    ];

    /// Mode from the RMOD field value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRetryMode` outside 0..=3.
    pub fn from_rmod(value: i64) -> Result<Self, ConfigError> {
        match value {
            0 => Ok(RetryMode::Default),
            1 => Ok(RetryMode::Arithmetic),
            2 => Ok(RetryMode::Geometric),
            3 => Ok(RetryMode::InPosition),
            other => Err(ConfigError::InvalidRetryMode(other)),
        }
    }

    /// RMOD field value.
    #[inline]
    pub const fn rmod(self) -> u8 {
        match self {
            RetryMode::Default => 0,
            RetryMode::Arithmetic => 1,
            RetryMode::Geometric => 2,
            RetryMode::InPosition => 3,
        }
    }

    /// Display name as used by the motor record menu.
    pub const fn name(self) -> &'static str {
        match self {
            RetryMode::Default => "Default",
            RetryMode::Arithmetic => "Arithmetic",
            RetryMode::Geometric => "Geometric",
            RetryMode::InPosition => "In-Position",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let matches = |candidate: &str| name.eq_ignore_ascii_case(candidate);
        if matches("default") {
            Some(RetryMode::Default)
        } else if matches("arithmetic") {
            Some(RetryMode::Arithmetic)
        } else if matches("geometric") {
            Some(RetryMode::Geometric)
        } else if matches("in_position") || matches("in-position") || matches("inposition") {
            Some(RetryMode::InPosition)
        } else {
            None
        }
    }
}

impl fmt::Display for RetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for RetryMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RetryModeVisitor;

        impl<'de> Visitor<'de> for RetryModeVisitor {
            type Value = RetryMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RMOD value 0-3 or a retry mode name")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RetryMode, E> {
                RetryMode::from_rmod(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RetryMode, E> {
                let signed = i64::try_from(v)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))?;
                self.visit_i64(signed)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RetryMode, E> {
                RetryMode::from_name(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(RetryModeVisitor)
    }
}

/// How a move target is handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    /// Absolute position.
    #[default]
    Absolute,
    /// Relative displacement from the encoder position (UEIP set).
    Relative,
}

impl AddressingMode {
    /// Addressing selected by the "use encoder if present" flag.
    #[inline]
    pub const fn from_encoder_flag(use_encoder: bool) -> Self {
        if use_encoder {
            AddressingMode::Relative
        } else {
            AddressingMode::Absolute
        }
    }

    /// Keyword used in record lines.
    pub const fn keyword(self) -> &'static str {
        match self {
            AddressingMode::Absolute => "absolute",
            AddressingMode::Relative => "relative",
        }
    }
}

/// Maximum retries after the initial move (motor record RTRY range).
pub const MAX_RETRY_COUNT: u8 = 10;

/// Number of retries after the initial move, 0..=10.
///
/// Validated at construction, like the RTRY field of the motor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryCount(u8);

impl RetryCount {
    /// No retries: only the initial move.
    pub const NONE: Self = Self(0);

    /// Motor record default.
    pub const DEFAULT: Self = Self(MAX_RETRY_COUNT);

    /// Create a new RetryCount with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRetryCount` if negative or above 10.
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if (0..=i64::from(MAX_RETRY_COUNT)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ConfigError::InvalidRetryCount(value))
        }
    }

    /// Get the raw count.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Total attempts including the initial move.
    #[inline]
    pub const fn attempts(self) -> u8 {
        self.0 + 1
    }
}

impl Default for RetryCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for RetryCount {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for RetryCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = i64::deserialize(deserializer)?;
        RetryCount::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            de::Error::custom(buf.as_str())
        })
    }
}
