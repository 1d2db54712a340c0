//! Suite configuration - root configuration structure.

use heapless::{FnvIndexMap, String, Vec};
use serde::Deserialize;

use super::case::CaseConfig;
use super::params::MotionParameters;

/// Maximum number of axes in a suite.
pub const MAX_AXES: usize = 8;

/// Maximum number of test cases in a suite.
pub const MAX_CASES: usize = 64;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// Motion parameters keyed by device id.
    pub axes: FnvIndexMap<String<32>, MotionParameters, MAX_AXES>,

    /// Test cases in file order.
    #[serde(default)]
    pub cases: Vec<CaseConfig, MAX_CASES>,
}

impl SuiteConfig {
    /// Get axis parameters by device id.
    pub fn axis(&self, name: &str) -> Option<&MotionParameters> {
        self.axes
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a test case by id.
    pub fn case(&self, id: u32) -> Option<&CaseConfig> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(|s| s.as_str())
    }

    /// Iterate test cases together with the parameters of their axis.
    ///
    /// Cases whose axis is unknown are skipped; `validate_suite` reports them.
    pub fn scenarios(&self) -> impl Iterator<Item = (&CaseConfig, &MotionParameters)> {
        self.cases
            .iter()
            .filter_map(move |case| self.axis(case.axis.as_str()).map(|params| (case, params)))
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            axes: FnvIndexMap::new(),
            cases: Vec::new(),
        }
    }
}
