//! Retry mode policy.
//!
//! After every attempt the policy looks at where the axis ended and either
//! stops (settled or out of retries) or names the target of the next attempt.
//! Each retry mode is a [`RetryStrategy`]; [`RetryModePolicy`] owns the
//! termination rules shared by all of them.

use libm::pow;

use crate::config::units::Egu;
use crate::config::{AddressingMode, MotionParameters, RetryCount, RetryMode};

use super::command::MoveCommand;

/// Target and addressing of one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttemptTarget {
    /// Position the attempt must end at.
    pub target: Egu,
    /// How the target is handed to the controller.
    pub addressing: AddressingMode,
}

/// Outcome of checking an attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryDecision {
    /// Axis is within tolerance of the commanded target.
    Settled,
    /// Last allowed attempt finished outside tolerance.
    Exhausted {
        /// Commanded target minus observed position.
        residual: Egu,
    },
    /// Run another attempt.
    Retry(AttemptTarget),
}

impl RetryDecision {
    /// Whether no further attempt follows.
    #[inline]
    pub fn is_done(&self) -> bool {
        !matches!(self, RetryDecision::Retry(_))
    }
}

/// Quantities every strategy may depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryContext {
    /// Commanded target of the whole move.
    pub target: Egu,
    /// Retries allowed after the initial move.
    pub retry_count: RetryCount,
    /// Attenuation per retry for the geometric mode.
    pub geometric_ratio: f64,
}

/// Position reached by the previous attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryState {
    /// Retry number, 1 for the first retry.
    pub retry: u8,
    /// Target of the previous attempt.
    ///
    /// The built-in strategies derive the next target from the commanded
    /// target and `observed` alone. This is carried for strategies that
    /// step relative to the last command, and for tracing.
    pub previous_target: Egu,
    /// Where the axis ended.
    pub observed: Egu,
}

impl RetryState {
    /// Remaining error to the commanded target.
    #[inline]
    pub fn error(&self, ctx: &RetryContext) -> Egu {
        ctx.target - self.observed
    }
}

/// Target refinement of one retry mode.
pub trait RetryStrategy {
    /// Target of retry `state.retry`.
    fn retry_target(&self, ctx: &RetryContext, state: &RetryState) -> Egu;

    /// Addressing used for every attempt.
    fn addressing(&self, configured: AddressingMode) -> AddressingMode {
        configured
    }
}

/// Re-issue the commanded target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetry;

impl RetryStrategy for DefaultRetry {
    fn retry_target(&self, ctx: &RetryContext, _state: &RetryState) -> Egu {
        ctx.target
    }
}

/// Move `(R - n + 1) / R` of the remaining error on retry `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticRetry;

impl RetryStrategy for ArithmeticRetry {
    fn retry_target(&self, ctx: &RetryContext, state: &RetryState) -> Egu {
        let retries = f64::from(ctx.retry_count.value());
        if retries == 0.0 {
            return ctx.target;
        }
        let factor = (retries - f64::from(state.retry) + 1.0) / retries;
        state.observed + state.error(ctx) * factor
    }
}

/// Move `r^n` of the remaining error on retry `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricRetry;

impl RetryStrategy for GeometricRetry {
    fn retry_target(&self, ctx: &RetryContext, state: &RetryState) -> Egu {
        let factor = pow(ctx.geometric_ratio, f64::from(state.retry));
        state.observed + state.error(ctx) * factor
    }
}

/// Controller-side in-position retries to the absolute target.
#[derive(Debug, Clone, Copy, Default)]
pub struct InPositionRetry;

impl RetryStrategy for InPositionRetry {
    fn retry_target(&self, ctx: &RetryContext, _state: &RetryState) -> Egu {
        ctx.target
    }

    fn addressing(&self, _configured: AddressingMode) -> AddressingMode {
        AddressingMode::Absolute
    }
}

/// Strategy implementing a retry mode.
pub fn strategy_for(mode: RetryMode) -> &'static dyn RetryStrategy {
    match mode {
        RetryMode::Default => &DefaultRetry,
        RetryMode::Arithmetic => &ArithmeticRetry,
        RetryMode::Geometric => &GeometricRetry,
        RetryMode::InPosition => &InPositionRetry,
    }
}

/// Retry policy for one move command.
#[derive(Debug, Clone, Copy)]
pub struct RetryModePolicy {
    mode: RetryMode,
    addressing: AddressingMode,
    context: RetryContext,
    tolerance: f64,
}

impl RetryModePolicy {
    /// Create the policy for a command under the given parameters.
    pub fn new(command: &MoveCommand, params: &MotionParameters) -> Self {
        let strategy = strategy_for(command.retry_mode);
        Self {
            mode: command.retry_mode,
            addressing: strategy.addressing(command.addressing),
            context: RetryContext {
                target: command.target,
                retry_count: params.retry_count,
                geometric_ratio: params.geometric_ratio,
            },
            tolerance: params.settle_tolerance,
        }
    }

    /// Retry mode of the policy.
    #[inline]
    pub fn mode(&self) -> RetryMode {
        self.mode
    }

    /// Addressing used by every attempt.
    #[inline]
    pub fn addressing(&self) -> AddressingMode {
        self.addressing
    }

    /// Shared strategy inputs.
    #[inline]
    pub fn context(&self) -> &RetryContext {
        &self.context
    }

    /// Target of the initial attempt.
    #[inline]
    pub fn initial(&self) -> AttemptTarget {
        AttemptTarget {
            target: self.context.target,
            addressing: self.addressing,
        }
    }

    /// Whether `observed` is within tolerance of the commanded target.
    #[inline]
    pub fn is_settled(&self, observed: Egu) -> bool {
        observed.approx_eq(self.context.target, self.tolerance)
    }

    /// Decide what follows attempt `attempt` (0 is the initial move).
    ///
    /// `previous_target` is handed to the strategy through `RetryState`;
    /// none of the four retry modes depends on it.
    pub fn refine(&self, attempt: u8, previous_target: Egu, observed: Egu) -> RetryDecision {
        if self.is_settled(observed) {
            return RetryDecision::Settled;
        }

        if attempt >= self.context.retry_count.value() {
            return RetryDecision::Exhausted {
                residual: self.context.target - observed,
            };
        }

        let state = RetryState {
            retry: attempt + 1,
            previous_target,
            observed,
        };
        let target = strategy_for(self.mode).retry_target(&self.context, &state);

        trace!(
            "retry {} after target {} observed {} -> {}",
            state.retry,
            previous_target.0,
            observed.0,
            target.0
        );

        RetryDecision::Retry(AttemptTarget {
            target,
            addressing: self.addressing,
        })
    }
}
