//! Unit types for physical quantities.
//!
//! Provides type-safe representations of positions, velocities, accelerations
//! and times in engineering units (EGU) so an acceleration *time* (ACCL, BACC)
//! can never be confused with an acceleration *rate* (JAR).

use core::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

/// Axis position or displacement in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Egu(pub f64);

impl Egu {
    /// Create a new Egu value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Magnitude of the position or displacement.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabs(self.0))
    }

    /// Check whether two positions agree within `tolerance`.
    #[inline]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        libm::fabs(self.0 - other.0) <= tolerance
    }
}

impl Add for Egu {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Egu {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Egu {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Neg for Egu {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Velocity in engineering units per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct EguPerSec(pub f64);

impl EguPerSec {
    /// Create a new EguPerSec value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Acceleration reached when ramping to this velocity over `ramp`.
    #[inline]
    pub fn over(self, ramp: Seconds) -> EguPerSecSquared {
        EguPerSecSquared(self.0 / ramp.0)
    }
}

impl Mul<f64> for EguPerSec {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Acceleration in engineering units per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct EguPerSecSquared(pub f64);

impl EguPerSecSquared {
    /// Create a new EguPerSecSquared value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Create a new Seconds value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Egu.
    fn egu(self) -> Egu;
    /// Convert to EguPerSec.
    fn egu_per_sec(self) -> EguPerSec;
    /// Convert to EguPerSecSquared.
    fn egu_per_sec_squared(self) -> EguPerSecSquared;
    /// Convert to Seconds.
    fn secs(self) -> Seconds;
}

impl UnitExt for f64 {
    #[inline]
    fn egu(self) -> Egu {
        Egu(self)
    }

    #[inline]
    fn egu_per_sec(self) -> EguPerSec {
        EguPerSec(self)
    }

    #[inline]
    fn egu_per_sec_squared(self) -> EguPerSecSquared {
        EguPerSecSquared(self)
    }

    #[inline]
    fn secs(self) -> Seconds {
        Seconds(self)
    }
}
