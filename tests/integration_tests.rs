//! Integration tests for backlash-oracle.
//!
//! These tests run the full case table of the retry-mode / backlash suite and
//! the workflow from TOML parsing to comparing logged records.

use backlash_oracle::config::units::{Egu, EguPerSec, Seconds};
use backlash_oracle::trajectory::{
    format_record, parse_sequence, write_sequence, Field, FieldValue, MAX_RECORDS,
};
use backlash_oracle::{
    emit, emit_case, parse_config, AddressingMode, CaseMatrix, Comparison, MoveClass,
    MotionParameters, MovePhase, ParametersBuilder, RetryMode, SequenceComparator, Settlement,
    Trajectory, TrajectoryEmitter,
};

// =============================================================================
// Test configuration data
// =============================================================================

const LOW: f64 = 48.0;
const BDST: f64 = 24.0;
const EPS: f64 = 1e-9;

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
use_encoder = false
start = 48.0
target = 96.0

[[cases]]
id = 14224
axis = "IOC:m1"
RMOD = "geometric"
UEIP = true
start = 96.0
target = 48.0

[[cases]]
id = 14237
axis = "IOC:m1"
retry_mode = "in-position"
start = 48.0
target = 72.0
"#;

fn make_params() -> MotionParameters {
    ParametersBuilder::new()
        .positioning(EguPerSec(10.0), Seconds(1.0))
        .jog(EguPerSec(5.0), backlash_oracle::EguPerSecSquared(6.0))
        .backlash(EguPerSec(2.0), Seconds(1.5))
        .backlash_distance(Egu(BDST))
        .retry_count(3)
        .build()
        .expect("valid parameters")
}

/// Attempt targets of one case against an axis that never moves.
struct Expected {
    id: u32,
    class: MoveClass,
    targets: [f64; 4],
}

const fn row(id: u32, class: MoveClass, targets: [f64; 4]) -> Expected {
    Expected { id, class, targets }
}

use backlash_oracle::MoveClass::{SingleMove as S, TwoMove as T};

#[rustfmt::skip]
const TABLE: [Expected; 32] = [
    // Default: every retry re-issues the target
    row(14201, T, [96.0, 96.0, 96.0, 96.0]),
    row(14202, T, [96.0, 96.0, 96.0, 96.0]),
    row(14203, T, [48.0, 48.0, 48.0, 48.0]),
    row(14204, T, [48.0, 48.0, 48.0, 48.0]),
    row(14205, T, [48.0, 48.0, 48.0, 48.0]),
    row(14206, T, [48.0, 48.0, 48.0, 48.0]),
    row(14207, S, [72.0, 72.0, 72.0, 72.0]),
    row(14208, S, [72.0, 72.0, 72.0, 72.0]),
    // Arithmetic: 3/3, 3/3, 2/3, 1/3 of the error
    row(14211, T, [96.0, 96.0, 80.0, 64.0]),
    row(14212, T, [96.0, 96.0, 80.0, 64.0]),
    row(14213, T, [48.0, 48.0, 64.0, 80.0]),
    row(14214, T, [48.0, 48.0, 64.0, 80.0]),
    row(14215, T, [48.0, 48.0, 56.0, 64.0]),
    row(14216, T, [48.0, 48.0, 56.0, 64.0]),
    row(14217, S, [72.0, 72.0, 64.0, 56.0]),
    row(14218, S, [72.0, 72.0, 64.0, 56.0]),
    // Geometric: 1, 1/2, 1/4, 1/8 of the error
    row(14221, T, [96.0, 72.0, 60.0, 54.0]),
    row(14222, T, [96.0, 72.0, 60.0, 54.0]),
    row(14223, T, [48.0, 72.0, 84.0, 90.0]),
    row(14224, T, [48.0, 72.0, 84.0, 90.0]),
    row(14225, T, [48.0, 60.0, 66.0, 69.0]),
    row(14226, T, [48.0, 60.0, 66.0, 69.0]),
    row(14227, S, [72.0, 60.0, 54.0, 51.0]),
    row(14228, S, [72.0, 60.0, 54.0, 51.0]),
    // In-position: target re-issued, always absolute
    row(14231, T, [96.0, 96.0, 96.0, 96.0]),
    row(14232, T, [96.0, 96.0, 96.0, 96.0]),
    row(14233, T, [48.0, 48.0, 48.0, 48.0]),
    row(14234, T, [48.0, 48.0, 48.0, 48.0]),
    row(14235, T, [48.0, 48.0, 48.0, 48.0]),
    row(14236, T, [48.0, 48.0, 48.0, 48.0]),
    row(14237, S, [72.0, 72.0, 72.0, 72.0]),
    row(14238, S, [72.0, 72.0, 72.0, 72.0]),
];

// =============================================================================
// Case table
// =============================================================================

#[test]
fn case_matrix_matches_table() {
    let params = make_params();
    let matrix = CaseMatrix::new(Egu(LOW), Egu(BDST));
    assert_eq!(matrix.len(), TABLE.len());

    for (case, expected) in matrix.cases().zip(TABLE.iter()) {
        assert_eq!(case.id, expected.id);

        let trajectory = emit(&case.command, &params).expect("emits");
        assert_eq!(trajectory.class(), expected.class, "case {}", case.id);

        let per_attempt = match expected.class {
            S => 1,
            T => 2,
        };
        assert_eq!(trajectory.records().len(), 4 * per_attempt, "case {}", case.id);
        assert_eq!(trajectory.attempts(), 4, "case {}", case.id);

        for (attempt, &target) in expected.targets.iter().enumerate() {
            let records: Vec<_> = trajectory.sequence.attempt(attempt as u8).collect();
            assert_eq!(records.len(), per_attempt, "case {}", case.id);

            let last = records[per_attempt - 1];
            assert_eq!(last.phase, MovePhase::BacklashCorrection, "case {}", case.id);
            assert!(
                (last.target.0 - target).abs() < EPS,
                "case {} attempt {}: {} != {}",
                case.id,
                attempt,
                last.target.0,
                target
            );

            // Held axis: every attempt starts where the move started
            assert_eq!(records[0].origin, case.command.start, "case {}", case.id);

            if per_attempt == 2 {
                assert_eq!(records[0].phase, MovePhase::Approach);
                assert!((records[0].target.0 - (target - BDST)).abs() < EPS);
                assert_eq!(records[1].origin, records[0].target);
            }
        }
    }
}

#[test]
fn case_matrix_addressing() {
    let params = make_params();
    for case in CaseMatrix::new(Egu(LOW), Egu(BDST)).cases() {
        let trajectory = emit(&case.command, &params).expect("emits");
        let expected = match case.command.retry_mode {
            RetryMode::InPosition => AddressingMode::Absolute,
            _ => case.command.addressing,
        };
        assert!(
            trajectory.records().iter().all(|r| r.addressing == expected),
            "case {}",
            case.id
        );
        // Relative cases are the even ids
        assert_eq!(
            case.command.addressing == AddressingMode::Relative,
            case.id % 2 == 0
        );
    }
}

#[test]
fn kinematics_per_phase() {
    let params = make_params();
    for case in CaseMatrix::new(Egu(LOW), Egu(BDST)).cases() {
        let trajectory = emit(&case.command, &params).expect("emits");
        for record in trajectory.records() {
            let expected = match record.phase {
                MovePhase::Approach => params.positioning(),
                MovePhase::BacklashCorrection => params.backlash(),
            };
            assert_eq!(record.kinematics(), expected, "case {}", case.id);
        }
    }
}

#[test]
fn held_axis_never_settles() {
    let params = make_params();
    for case in CaseMatrix::new(Egu(LOW), Egu(BDST)).cases() {
        let trajectory = emit(&case.command, &params).expect("emits");
        match trajectory.settlement {
            Settlement::Exhausted { attempts, residual } => {
                assert_eq!(attempts, 4);
                assert_eq!(residual, case.command.target - case.command.start);
            }
            Settlement::Settled { .. } => panic!("case {} settled", case.id),
        }
        assert!(trajectory.records().len() <= MAX_RECORDS);
    }
}

// =============================================================================
// TOML workflow
// =============================================================================

#[test]
fn suite_from_toml() {
    let suite = parse_config(SUITE).expect("suite parses");
    assert_eq!(suite.axis_names().collect::<Vec<_>>(), vec!["IOC:m1"]);
    assert_eq!(suite.cases.len(), 3);

    let geometric = suite.case(14224).expect("case exists");
    assert_eq!(geometric.retry_mode, RetryMode::Geometric);
    assert_eq!(geometric.command().addressing, AddressingMode::Relative);

    let in_position = suite.case(14237).expect("case exists");
    assert_eq!(in_position.retry_mode, RetryMode::InPosition);
    assert!(!in_position.use_encoder);
}

#[test]
fn suite_case_matches_matrix() {
    let suite = parse_config(SUITE).expect("suite parses");
    let matrix = CaseMatrix::new(Egu(LOW), Egu(BDST));

    for id in [14201, 14224, 14237] {
        let from_suite = emit_case(&suite, id).expect("emits");
        let case = matrix.case(id).expect("in matrix");
        let from_matrix = emit(&case.command, &make_params()).expect("emits");
        assert_eq!(from_suite.sequence, from_matrix.sequence, "case {}", id);
    }

    assert!(emit_case(&suite, 14299).is_err());
}

#[test]
fn suite_rejects_invalid_axis() {
    let bad = SUITE.replace("BVEL = 2.0", "BVEL = 0.0");
    assert!(parse_config(&bad).is_err());

    let bad = SUITE.replace("RTRY = 3", "RTRY = 11");
    assert!(parse_config(&bad).is_err());
}

// =============================================================================
// Record logs and comparison
// =============================================================================

#[test]
fn expected_log_round_trip() {
    let params = make_params();
    let case = CaseMatrix::new(Egu(LOW), Egu(BDST))
        .case(14212)
        .expect("in matrix");
    let trajectory = emit(&case.command, &params).expect("emits");

    let mut log = String::new();
    write_sequence(&mut log, trajectory.records()).expect("writes");
    assert_eq!(log.lines().count(), trajectory.records().len());
    assert!(log.lines().all(|l| l.contains("move=relative delta=")));

    let observed = parse_sequence(&log).expect("parses");
    let comparison =
        SequenceComparator::from_parameters(&params).compare(trajectory.records(), observed.as_slice());
    assert_eq!(comparison, Comparison::Match);
}

#[test]
fn first_divergence_in_actual_log() {
    let params = make_params();
    let case = CaseMatrix::new(Egu(LOW), Egu(BDST))
        .case(14201)
        .expect("in matrix");
    let trajectory = emit(&case.command, &params).expect("emits");

    // Controller skipped the backlash correction of the second attempt
    let mut log = String::new();
    for (i, record) in trajectory.records().iter().enumerate() {
        if i != 3 {
            log.push_str(format_record(record).expect("fits").as_str());
            log.push('\n');
        }
    }

    let observed = parse_sequence(&log).expect("parses");
    let comparison = SequenceComparator::default().compare(trajectory.records(), observed.as_slice());
    let mismatch = comparison.mismatch().expect("diverges");
    assert_eq!(mismatch.index, 3);
    assert_eq!(mismatch.attempt, 1);
    assert_eq!(mismatch.phase, MovePhase::BacklashCorrection);
    assert_eq!(mismatch.field, Field::Attempt);
    assert_eq!(mismatch.observed, FieldValue::Attempt(2));
}

// =============================================================================
// Thread safety
// =============================================================================

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_oracle_types_are_send_sync() {
    assert_send_sync::<MotionParameters>();
    assert_send_sync::<Trajectory>();
    assert_send_sync::<TrajectoryEmitter<'static>>();
    assert_send_sync::<SequenceComparator>();
    assert_send_sync::<CaseMatrix>();
    assert_send_sync::<backlash_oracle::Error>();
}
