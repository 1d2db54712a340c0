//! Unit tests for TOML configuration parsing.

use backlash_oracle::config::{
    load_config, parse_parameters, MotionParameters, RetryCount, RetryMode, SuiteConfig,
};
use backlash_oracle::error::{ConfigError, Error};

/// Test parsing an axis using motor record field names.
#[test]
fn test_parse_record_field_names() {
    let toml_str = r#"
VELO = 10.0
ACCL = 1.0
JVEL = 5.0
JAR = 6.0
BVEL = 2.0
BACC = 1.5
BDST = 24.0
FRAC = 1.0
RTRY = 3
DLY = 0.5
"#;

    let params = parse_parameters(toml_str).expect("Failed to parse parameters");

    assert_eq!(params.velocity.0, 10.0);
    assert_eq!(params.acceleration_time.0, 1.0);
    assert_eq!(params.jog_acceleration.0, 6.0);
    assert_eq!(params.backlash_distance.0, 24.0);
    assert_eq!(params.retry_count.value(), 3);
    assert_eq!(params.settle_delay.0, 0.5);
    assert_eq!(params.acceleration().0, 10.0);
    assert!((params.backlash_acceleration().0 - 4.0 / 3.0).abs() < 1e-12);
}

/// Test parsing an axis using long field names and defaults.
#[test]
fn test_parse_long_names_with_defaults() {
    let toml_str = r#"
velocity = 10.0
acceleration_time = 1.0
jog_velocity = 5.0
jog_acceleration = 6.0
backlash_velocity = 2.0
backlash_acceleration_time = 1.5
backlash_distance = -24.0
"#;

    let params: MotionParameters = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(params.backlash_distance.0, -24.0);
    assert_eq!(params.move_fraction, 1.0);
    assert_eq!(params.retry_count, RetryCount::DEFAULT);
    assert_eq!(params.settle_delay.0, 0.0);
    assert_eq!(params.geometric_ratio, 0.5);
    assert_eq!(params.settle_tolerance, 1e-6);
}

/// Test retry modes given as RMOD integers and as names.
#[test]
fn test_parse_retry_modes() {
    let toml_str = r#"
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
axis = "m1"
RMOD = 1
start = 0.0
target = 10.0

[[cases]]
id = 2
axis = "m1"
retry_mode = "Geometric"
start = 0.0
VAL = 10.0

[[cases]]
id = 3
axis = "m1"
start = 0.0
target = 10.0
"#;

    let config: SuiteConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.case(1).unwrap().retry_mode, RetryMode::Arithmetic);
    assert_eq!(config.case(2).unwrap().retry_mode, RetryMode::Geometric);
    assert_eq!(config.case(2).unwrap().target.0, 10.0);
    assert_eq!(config.case(3).unwrap().retry_mode, RetryMode::Default);
    assert_eq!(config.scenarios().count(), 3);
}

/// Test that an unknown RMOD value is a parse error.
#[test]
fn test_parse_invalid_retry_mode() {
    let toml_str = r#"
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
axis = "m1"
RMOD = 7
start = 0.0
target = 10.0
"#;

    assert!(toml::from_str::<SuiteConfig>(toml_str).is_err());
}

/// Test that a missing required field fails to parse.
#[test]
fn test_parse_missing_backlash_velocity() {
    let toml_str = r#"
VELO = 10.0
ACCL = 1.0
JVEL = 5.0
JAR = 6.0
BACC = 1.5
BDST = 24.0
"#;

    assert!(matches!(
        parse_parameters(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file that does not exist.
#[test]
fn test_load_missing_file() {
    assert!(matches!(
        load_config("/nonexistent/rtry_bdst_rmod.toml"),
        Err(Error::Config(ConfigError::IoError(_)))
    ));
}
