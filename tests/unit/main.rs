//! Unit test harness for backlash-oracle.
//!
//! This module organizes configuration tests for the public API.

mod config_parsing;
mod config_validation;
