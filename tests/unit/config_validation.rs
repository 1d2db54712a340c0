//! Unit tests for configuration validation.

use backlash_oracle::config::{
    parse_config, validate_suite, ParametersBuilder, SuiteConfig,
};
use backlash_oracle::config::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
use backlash_oracle::error::{ConfigError, Error};

const AXIS: &str = r#"
[axes."IOC:m1"]
VELO = 10.0
ACCL = 1.0
JVEL = 5.0
JAR = 6.0
BVEL = 2.0
BACC = 1.5
BDST = 24.0
RTRY = 3
"#;

fn builder() -> ParametersBuilder {
    ParametersBuilder::new()
        .positioning(EguPerSec(10.0), Seconds(1.0))
        .jog(EguPerSec(5.0), EguPerSecSquared(6.0))
        .backlash(EguPerSec(2.0), Seconds(1.5))
        .backlash_distance(Egu(24.0))
}

/// Test validation of a valid suite.
#[test]
fn test_valid_suite_passes_validation() {
    let toml_str = format!(
        "{}{}",
        AXIS,
        r#"
[[cases]]
id = 14201
axis = "IOC:m1"
start = 48.0
target = 96.0
"#
    );

    let config: SuiteConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
    assert!(validate_suite(&config).is_ok());
}

/// Test validation fails for a case referencing a non-existent axis.
#[test]
fn test_case_invalid_axis_reference() {
    let toml_str = format!(
        "{}{}",
        AXIS,
        r#"
[[cases]]
id = 1
axis = "IOC:m2"
start = 48.0
target = 96.0
"#
    );

    let result = parse_config(&toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::AxisNotFound(_)))
    ));
}

/// Test validation fails for duplicate case ids.
#[test]
fn test_duplicate_case_id() {
    let toml_str = format!(
        "{}{}",
        AXIS,
        r#"
[[cases]]
id = 7
axis = "IOC:m1"
start = 48.0
target = 96.0

[[cases]]
id = 7
axis = "IOC:m1"
start = 96.0
target = 48.0
"#
    );

    assert!(matches!(
        parse_config(&toml_str),
        Err(Error::Config(ConfigError::DuplicateCaseId(7)))
    ));
}

/// Test validation fails for a non-positive backlash acceleration time.
#[test]
fn test_zero_backlash_ramp() {
    let toml_str = AXIS.replace("BACC = 1.5", "BACC = 0.0");

    assert!(matches!(
        parse_config(&toml_str),
        Err(Error::Config(ConfigError::NonPositive { field: "BACC", .. }))
    ));
}

/// Test validation fails for a move fraction above one.
#[test]
fn test_move_fraction_above_one() {
    let toml_str = format!("{}FRAC = 1.5\n", AXIS);

    assert!(matches!(
        parse_config(&toml_str),
        Err(Error::Config(ConfigError::InvalidMoveFraction(_)))
    ));
}

/// Test the builder reports missing parameters.
#[test]
fn test_builder_missing_velocity() {
    let result = ParametersBuilder::new()
        .backlash(EguPerSec(2.0), Seconds(1.5))
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingParameter("VELO")))
    ));
}

/// Test the builder validates retry count and geometric ratio.
#[test]
fn test_builder_ranges() {
    assert!(builder().retry_count(10).build().is_ok());
    assert!(matches!(
        builder().retry_count(11).build(),
        Err(Error::Config(ConfigError::InvalidRetryCount(11)))
    ));
    assert!(matches!(
        builder().geometric_ratio(0.0).build(),
        Err(Error::Config(ConfigError::InvalidGeometricRatio(_)))
    ));
    assert!(matches!(
        builder().settle_delay(Seconds(-1.0)).build(),
        Err(Error::Config(ConfigError::NegativeSettleDelay(_)))
    ));
}

/// Test a zero backlash distance is accepted.
#[test]
fn test_zero_backlash_distance_is_valid() {
    let params = builder().backlash_distance(Egu(0.0)).build().expect("valid");
    assert_eq!(params.backlash_distance, Egu(0.0));
}
