//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{truncated, ConfigError, Error, Result};

use super::{MotionParameters, SuiteConfig};

/// Load a test suite from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use backlash_oracle::load_config;
///
/// let suite = load_config("rtry_bdst_rmod.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SuiteConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::Config(ConfigError::IoError(truncated(&e.to_string())))
    })?;

    parse_config(&content)
}

/// Parse a test suite from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SuiteConfig> {
    let config: SuiteConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    // Validate the configuration
    super::validation::validate_suite(&config)?;

    debug!(
        "loaded suite with {} axes and {} cases",
        config.axes.len(),
        config.cases.len()
    );

    Ok(config)
}

/// Parse a single axis parameter table from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or the parameters are invalid.
pub fn parse_parameters(content: &str) -> Result<MotionParameters> {
    let params: MotionParameters = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_parameters(&params)?;

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressingMode, RetryMode};

    const SUITE: &str = r#"
[axes."IOC:m1"]
VELO = 10.0
ACCL = 1.0
JVEL = 5.0
JAR = 6.0
BVEL = 2.0
BACC = 1.5
BDST = 24.0
FRAC = 1.0
RTRY = 3
DLY = 0.0

[[cases]]
id = 14201
axis = "IOC:m1"
retry_mode = 0
start = 48.0
target = 96.0

[[cases]]
id = 14232
axis = "IOC:m1"
retry_mode = "in_position"
use_encoder = true
start = 48.0
target = 96.0
"#;

    #[test]
    fn test_parse_suite() {
        let suite = parse_config(SUITE).unwrap();
        let params = suite.axis("IOC:m1").unwrap();
        assert_eq!(params.retry_count.value(), 3);
        assert_eq!(suite.cases.len(), 2);

        let case = suite.case(14232).unwrap();
        assert_eq!(case.retry_mode, RetryMode::InPosition);
        assert_eq!(case.command().addressing, AddressingMode::Relative);
    }

    #[test]
    fn test_parse_long_names() {
        let toml = r#"
velocity = 10.0
acceleration_time = 1.0
jog_velocity = 5.0
jog_acceleration = 6.0
backlash_velocity = 2.0
backlash_acceleration_time = 1.5
backlash_distance = -24.0
"#;

        let params = parse_parameters(toml).unwrap();
        assert_eq!(params.backlash_distance.0, -24.0);
        // Defaults
        assert_eq!(params.move_fraction, 1.0);
        assert_eq!(params.retry_count.value(), 10);
        assert_eq!(params.geometric_ratio, 0.5);
    }

    #[test]
    fn test_unknown_axis_rejected() {
        let toml = r#"
[axes.m1]
VELO = 10.0
ACCL = 1.0
JVEL = 5.0
JAR = 6.0
BVEL = 2.0
BACC = 1.5
BDST = 24.0

[[cases]]
id = 1
axis = "m2"
start = 0.0
target = 1.0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::AxisNotFound(_)))
        ));
    }
}
