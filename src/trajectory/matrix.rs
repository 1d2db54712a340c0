//! Retry-mode / backlash case matrix.
//!
//! Every retry mode is exercised with the same eight scenarios: both
//! addressing modes over a long forward move, a long reverse move, a reverse
//! move of one backlash distance and a forward move of one backlash distance.
//! Case ids are `base + 10 * RMOD + n` with `n` in `1..=8`.

use crate::config::units::Egu;
use crate::config::{AddressingMode, RetryMode};
use crate::motion::MoveCommand;

/// Default id base of the matrix.
pub const DEFAULT_BASE_ID: u32 = 14200;

/// Scenarios per retry mode.
pub const SCENARIOS_PER_MODE: usize = 8;

/// Reference position of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Lowest position.
    Low,
    /// One backlash distance above `Low`.
    Mid,
    /// Two backlash distances above `Low`.
    High,
}

const SCENARIOS: [(AddressingMode, Level, Level); SCENARIOS_PER_MODE] = [
    (AddressingMode::Absolute, Level::Low, Level::High),
    (AddressingMode::Relative, Level::Low, Level::High),
    (AddressingMode::Absolute, Level::High, Level::Low),
    (AddressingMode::Relative, Level::High, Level::Low),
    (AddressingMode::Absolute, Level::Mid, Level::Low),
    (AddressingMode::Relative, Level::Mid, Level::Low),
    (AddressingMode::Absolute, Level::Low, Level::Mid),
    (AddressingMode::Relative, Level::Low, Level::Mid),
];

/// One generated case.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestCase {
    /// Case id.
    pub id: u32,
    /// Move to perform.
    pub command: MoveCommand,
}

/// Generator of the mode x scenario case table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseMatrix {
    base: u32,
    low: Egu,
    backlash_distance: Egu,
}

impl CaseMatrix {
    /// Matrix anchored at `low` with steps of `backlash_distance`.
    pub const fn new(low: Egu, backlash_distance: Egu) -> Self {
        Self {
            base: DEFAULT_BASE_ID,
            low,
            backlash_distance,
        }
    }

    /// Use a different id base.
    pub const fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Absolute position of a level.
    pub fn position(&self, level: Level) -> Egu {
        match level {
            Level::Low => self.low,
            Level::Mid => self.low + self.backlash_distance,
            Level::High => self.low + self.backlash_distance * 2.0,
        }
    }

    /// Id of scenario `scenario` (0-based) under `mode`.
    pub fn id(&self, mode: RetryMode, scenario: usize) -> u32 {
        self.base + 10 * u32::from(mode.rmod()) + scenario as u32 + 1
    }

    /// Number of generated cases.
    pub fn len(&self) -> usize {
        RetryMode::ALL.len() * SCENARIOS_PER_MODE
    }

    /// Always false; every mode has scenarios.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All cases, mode-major.
    pub fn cases(&self) -> impl Iterator<Item = TestCase> + '_ {
        RetryMode::ALL.into_iter().flat_map(move |mode| {
            SCENARIOS
                .into_iter()
                .enumerate()
                .map(move |(n, (addressing, from, to))| TestCase {
                    id: self.id(mode, n),
                    command: MoveCommand::new(self.position(from), self.position(to))
                        .with_retry_mode(mode)
                        .with_addressing(addressing),
                })
        })
    }

    /// Look up a case by id.
    pub fn case(&self, id: u32) -> Option<TestCase> {
        self.cases().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_positions() {
        let matrix = CaseMatrix::new(Egu(48.0), Egu(24.0));
        let ids: heapless::Vec<u32, 32> = matrix.cases().map(|c| c.id).collect();

        assert_eq!(ids.len(), matrix.len());
        assert_eq!(ids[0], 14201);
        assert_eq!(ids[7], 14208);
        assert_eq!(ids[8], 14211);
        assert_eq!(ids[31], 14238);

        let case = matrix.case(14225).unwrap();
        assert_eq!(case.command.retry_mode, RetryMode::Geometric);
        assert_eq!(case.command.addressing, AddressingMode::Absolute);
        assert_eq!(case.command.start, Egu(72.0));
        assert_eq!(case.command.target, Egu(48.0));
    }

    #[test]
    fn test_custom_base() {
        let matrix = CaseMatrix::new(Egu(0.0), Egu(-5.0)).with_base(500);
        let case = matrix.case(532).unwrap();
        assert_eq!(case.command.retry_mode, RetryMode::InPosition);
        assert_eq!(case.command.start, Egu(0.0));
        assert_eq!(case.command.target, Egu(-10.0));
        assert!(matrix.case(14201).is_none());
    }
}
