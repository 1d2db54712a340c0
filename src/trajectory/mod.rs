//! Trajectory module for backlash-oracle.
//!
//! Emits expected sub-move sequences, formats and parses them as log lines,
//! compares expected against observed sequences and enumerates the case
//! matrix.

mod codec;
mod compare;
mod emitter;
mod matrix;
mod record;

pub use codec::{format_record, parse_record, parse_sequence, write_sequence, RECORD_LINE_LEN};
pub use compare::{Comparison, Field, FieldValue, Mismatch, SequenceComparator};
pub use emitter::{emit, emit_case, TrajectoryEmitter};
pub use matrix::{CaseMatrix, Level, TestCase, DEFAULT_BASE_ID, SCENARIOS_PER_MODE};
pub use record::{ExpectedRecord, ExpectedSequence, Settlement, Trajectory, MAX_RECORDS};
