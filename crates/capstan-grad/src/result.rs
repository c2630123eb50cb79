// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Gradient search outcome and termination reporting.
//!
//! The final result of an optimization run bundles the best objective value
//! reached, the reason the run stopped, and the run statistics, so a caller
//! can audit the end state without re-evaluating the objective. Single-step
//! drivers have their own two-state outcome: either the starting point was
//! already a local extremum (in which case the output buffers were not
//! touched), or exactly one gradient build and line search were performed.

use crate::stats::GradientSearchStatistics;

/// Why an optimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientSearchTerminationReason {
    /// A line search failed to change the objective value.
    Converged,

    /// Every coordinate probe failed to improve: no gradient to follow.
    Plateau,

    /// The epoch budget was exhausted before the search settled.
    EpochLimit,
}

impl std::fmt::Display for GradientSearchTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradientSearchTerminationReason::Converged => write!(f, "Converged"),
            GradientSearchTerminationReason::Plateau => write!(f, "Plateau Reached"),
            GradientSearchTerminationReason::EpochLimit => write!(f, "Epoch Limit Exhausted"),
        }
    }
}

/// Result of a full `minimize`/`maximize` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientSearchOutcome {
    termination_reason: GradientSearchTerminationReason,
    objective_value: i64,
    statistics: GradientSearchStatistics,
}

impl GradientSearchOutcome {
    /// Creates a converged outcome.
    #[inline]
    pub fn converged(objective_value: i64, statistics: GradientSearchStatistics) -> Self {
        Self {
            termination_reason: GradientSearchTerminationReason::Converged,
            objective_value,
            statistics,
        }
    }

    /// Creates a plateau outcome.
    #[inline]
    pub fn plateau(objective_value: i64, statistics: GradientSearchStatistics) -> Self {
        Self {
            termination_reason: GradientSearchTerminationReason::Plateau,
            objective_value,
            statistics,
        }
    }

    /// Creates an epoch-limit outcome.
    #[inline]
    pub fn epoch_limit(objective_value: i64, statistics: GradientSearchStatistics) -> Self {
        Self {
            termination_reason: GradientSearchTerminationReason::EpochLimit,
            objective_value,
            statistics,
        }
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> GradientSearchTerminationReason {
        self.termination_reason
    }

    /// Returns the final objective value, signed.
    #[inline]
    pub fn objective_value(&self) -> i64 {
        self.objective_value
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &GradientSearchStatistics {
        &self.statistics
    }
}

/// Result of a single-step driver (`descend_once`/`ascend_once`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// The starting gradient was all-stationary; the output buffers were
    /// left untouched.
    AtLocalExtremum,

    /// One gradient build and line search were performed; the output buffer
    /// holds the stepped assignment.
    Stepped {
        /// Objective value at the stepped assignment, signed.
        objective_value: i64,
    },
}

impl StepOutcome {
    /// Returns `true` if the starting point was already a local extremum.
    #[inline]
    pub fn is_at_local_extremum(&self) -> bool {
        matches!(self, StepOutcome::AtLocalExtremum)
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepOutcome::AtLocalExtremum => write!(f, "At Local Extremum"),
            StepOutcome::Stepped { objective_value } => {
                write!(f, "Stepped (objective {})", objective_value)
            }
        }
    }
}
