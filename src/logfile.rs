//! Expected, actual and debug log files of a test case (std only).
//!
//! Files are named `<device>-<case>.exp`, `.act` and `.dbg`, with every `:` of
//! the device id replaced by `-`.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MotionParameters;
use crate::error::{truncated, ConfigError, Error, Result};
use crate::trajectory::{parse_sequence, write_sequence, ExpectedSequence, Settlement, Trajectory};

/// Directory the harness writes its logs to.
pub const DEFAULT_LOG_DIR: &str = "/tmp";

fn io_error(e: &std::io::Error) -> Error {
    Error::Config(ConfigError::IoError(truncated(&e.to_string())))
}

/// Log file paths of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    dir: PathBuf,
    stem: String,
}

impl LogFiles {
    /// Paths for `device` and case `tc_no` inside `dir`.
    pub fn new<P: AsRef<Path>>(dir: P, device: &str, tc_no: u32) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            stem: Self::file_stem(device, tc_no),
        }
    }

    /// Paths inside [`DEFAULT_LOG_DIR`].
    pub fn in_default_dir(device: &str, tc_no: u32) -> Self {
        Self::new(DEFAULT_LOG_DIR, device, tc_no)
    }

    /// File name without extension.
    pub fn file_stem(device: &str, tc_no: u32) -> String {
        format!("{}-{}", device.replace(':', "-"), tc_no)
    }

    fn with_extension(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, ext))
    }

    /// Expected log (`.exp`).
    pub fn expected(&self) -> PathBuf {
        self.with_extension("exp")
    }

    /// Actual log (`.act`).
    pub fn actual(&self) -> PathBuf {
        self.with_extension("act")
    }

    /// Debug log (`.dbg`).
    pub fn debug(&self) -> PathBuf {
        self.with_extension("dbg")
    }

    /// Write the expected records of a trajectory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IoError` if the file cannot be written.
    pub fn write_expected(&self, trajectory: &Trajectory) -> Result<()> {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = write_sequence(&mut text, trajectory.records());
        fs::write(self.expected(), text).map_err(|e| io_error(&e))?;

        debug!("wrote {} expected records", trajectory.records().len());
        Ok(())
    }

    /// Write a summary of the prediction and its parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IoError` if the file cannot be written.
    pub fn write_debug(&self, trajectory: &Trajectory, params: &MotionParameters) -> Result<()> {
        let command = &trajectory.command;
        let mut text = String::new();
        let _ = writeln!(
            text,
            "# move {} -> {} rmod={} addressing={}",
            command.start.0,
            command.target.0,
            command.retry_mode.rmod(),
            command.effective_addressing().keyword()
        );
        let _ = writeln!(
            text,
            "# VELO={} ACCL={} BVEL={} BACC={} BDST={} FRAC={} RTRY={} DLY={}",
            params.velocity.0,
            params.acceleration_time.0,
            params.backlash_velocity.0,
            params.backlash_acceleration_time.0,
            params.backlash_distance.0,
            params.move_fraction,
            params.retry_count.value(),
            params.settle_delay.0
        );
        let _ = writeln!(text, "# class={:?} plan={:?}", trajectory.class(), trajectory.plan);
        let _ = match trajectory.settlement {
            Settlement::Settled { attempts } => writeln!(text, "# settled attempts={}", attempts),
            Settlement::Exhausted { attempts, residual } => writeln!(
                text,
                "# exhausted attempts={} residual={}",
                attempts, residual.0
            ),
        };
        let _ = writeln!(
            text,
            "# estimated_duration={}",
            trajectory.estimated_duration().0
        );
        let _ = write_sequence(&mut text, trajectory.records());

        fs::write(self.debug(), text).map_err(|e| io_error(&e))
    }

    /// Read the observed records from the actual log.
    ///
    /// # Errors
    ///
    /// Returns an I/O error or the first malformed record.
    pub fn read_actual(&self) -> Result<ExpectedSequence> {
        read_records(self.actual())
    }

    /// Read the expected records back.
    ///
    /// # Errors
    ///
    /// Returns an I/O error or the first malformed record.
    pub fn read_expected(&self) -> Result<ExpectedSequence> {
        read_records(self.expected())
    }
}

/// Read a record log from any path.
///
/// # Errors
///
/// Returns an I/O error or the first malformed record.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<ExpectedSequence> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| io_error(&e))?;
    Ok(parse_sequence(&content)?)
}
