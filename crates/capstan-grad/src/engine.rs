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

//! Iterative gradient search driver.
//!
//! The engine orchestrates epochs of gradient estimation and line search
//! over a borrowed assignment vector. Each epoch snapshots the current
//! point, spends two objective evaluations per coordinate on the gradient
//! build, and hands the normalized gradient to the line search. The run
//! stops when a line search leaves the objective unchanged (converged),
//! when every coordinate probe fails to improve (plateau), or when the
//! epoch budget is exhausted.
//!
//! The engine owns two reusable resources across calls: the gradient
//! scratch buffer (grown on demand, never shrunk) and the entropy-reseeded
//! random source behind the plateau-escape path. Neither is shared between
//! engines, so `&mut self` is the whole concurrency story: one engine, one
//! search at a time.
//!
//! Besides the full `minimize`/`maximize` runs, the single-step drivers
//! `descend_once`/`ascend_once` expose exactly one gradient build plus line
//! search, for external meta-optimizers that interleave gradient steps with
//! their own transformations.

use crate::eval::CostEvaluator;
use crate::gradient::{compute_gradient, max_gradient, normalize_gradient, GradientElement};
use crate::line_search::{ascend, descend};
use crate::objective::Objective;
use crate::result::{GradientSearchOutcome, GradientSearchTerminationReason, StepOutcome};
use crate::rng::ReseedingEntropyRng;
use crate::stats::GradientSearchStatistics;
use crate::ScratchVector;
use smallvec::SmallVec;

/// Upper bound on epochs per optimization run.
pub const MAX_EPOCHS: u32 = 1000;

/// Number of random perturbations tried when the gradient is all-stationary
/// before giving up. Zero ships the escape path dormant: a plateau
/// terminates the run immediately.
pub const MAX_PLATEAU_PERTURBATIONS: u32 = 0;

/// Initial number of gradient scratch elements allocated per engine.
const INITIAL_SCRATCH_COORDS: usize = 10;

/// Coordinate-wise gradient search engine for byte-granular assignments.
///
/// The engine keeps a reusable gradient scratch buffer and a random source
/// across runs to avoid per-call setup costs. All entry points borrow the
/// caller's buffers for the duration of the call and leave the source
/// vector bitwise unchanged.
#[derive(Debug, Clone)]
pub struct GradientSearchEngine {
    /// Gradient scratch, one element per coordinate. Grows, never shrinks.
    gradient: Vec<GradientElement>,
    /// Random source for the plateau-escape path.
    rng: ReseedingEntropyRng,
}

impl Default for GradientSearchEngine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl GradientSearchEngine {
    /// Creates a new engine with minimal scratch capacity, keyed from the
    /// OS entropy source.
    ///
    /// # Panics
    ///
    /// Panics if the operating system entropy source is unavailable.
    #[inline]
    pub fn new() -> Self {
        Self {
            gradient: Vec::with_capacity(INITIAL_SCRATCH_COORDS),
            rng: ReseedingEntropyRng::from_os_entropy(),
        }
    }

    /// Creates a new engine with pre-allocated scratch for a specific
    /// assignment size.
    ///
    /// # Panics
    ///
    /// Panics if the operating system entropy source is unavailable.
    #[inline]
    pub fn preallocated(num_coordinates: usize) -> Self {
        Self {
            gradient: vec![GradientElement::default(); num_coordinates],
            rng: ReseedingEntropyRng::from_os_entropy(),
        }
    }

    /// Creates a new engine with a deterministic random source. Only the
    /// dormant escape path consumes randomness, so seeded and entropy-keyed
    /// engines behave identically in the shipped configuration.
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            gradient: Vec::with_capacity(INITIAL_SCRATCH_COORDS),
            rng: ReseedingEntropyRng::from_seed(seed),
        }
    }

    /// Drives the assignment toward a local minimum of the objective.
    ///
    /// `out_x` receives the best assignment found; the outcome carries the
    /// matching signed objective value, the termination reason, and the run
    /// statistics. The source vector is read-only and the upper 56 bits of
    /// every word are preserved in the output.
    ///
    /// # Panics
    ///
    /// Panics if `x0` is empty or `out_x.len() != x0.len()`.
    pub fn minimize<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
    ) -> GradientSearchOutcome
    where
        F: Objective,
    {
        self.run(objective, x0, out_x, true)
    }

    /// Drives the assignment toward a local maximum of the objective.
    ///
    /// Mirror image of [`GradientSearchEngine::minimize`].
    ///
    /// # Panics
    ///
    /// Panics if `x0` is empty or `out_x.len() != x0.len()`.
    pub fn maximize<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
    ) -> GradientSearchOutcome
    where
        F: Objective,
    {
        self.run(objective, x0, out_x, false)
    }

    /// Performs exactly one gradient build and descent line search.
    ///
    /// Returns [`StepOutcome::AtLocalExtremum`] — leaving `out_x` untouched —
    /// when no coordinate probe improves the starting cost.
    ///
    /// # Panics
    ///
    /// Panics if `x0` is empty or `out_x.len() != x0.len()`.
    pub fn descend_once<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
    ) -> StepOutcome
    where
        F: Objective,
    {
        self.step_once(objective, x0, out_x, true)
    }

    /// Performs exactly one gradient build and ascent line search.
    ///
    /// Mirror image of [`GradientSearchEngine::descend_once`].
    ///
    /// # Panics
    ///
    /// Panics if `x0` is empty or `out_x.len() != x0.len()`.
    pub fn ascend_once<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
    ) -> StepOutcome
    where
        F: Objective,
    {
        self.step_once(objective, x0, out_x, false)
    }

    /// Grows the gradient scratch to at least `n` elements.
    #[inline]
    fn ensure_scratch(&mut self, n: usize) {
        if self.gradient.len() < n {
            self.gradient.resize(n, GradientElement::default());
        }
    }

    fn check_buffers(x0: &[u64], out_x: &[u64]) {
        assert!(
            !x0.is_empty(),
            "called a `GradientSearchEngine` search with an empty assignment vector"
        );
        assert_eq!(
            out_x.len(),
            x0.len(),
            "called a `GradientSearchEngine` search with inconsistent buffer lengths: the source has {} coordinates but the output has {}",
            x0.len(),
            out_x.len()
        );
    }

    fn run<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
        descending: bool,
    ) -> GradientSearchOutcome
    where
        F: Objective,
    {
        Self::check_buffers(x0, out_x);
        let n = x0.len();
        self.ensure_scratch(n);

        let mut statistics = GradientSearchStatistics::default();
        let mut eval = CostEvaluator::new(objective);

        out_x.copy_from_slice(x0);
        let mut x_prev: ScratchVector = SmallVec::from_slice(x0);

        let mut f_prev = eval.cost(x0);
        let mut f_next = f_prev;

        let gradient = &mut self.gradient[..n];

        let mut epoch: u32 = 0;
        let termination = loop {
            if epoch >= MAX_EPOCHS {
                break GradientSearchTerminationReason::EpochLimit;
            }
            x_prev.copy_from_slice(out_x);
            f_prev = f_next;
            statistics.on_epoch();

            compute_gradient(&mut eval, f_prev, &mut x_prev, gradient);

            let mut perturbations: u32 = 0;
            let mut max_value = max_gradient(gradient);
            while max_value == 0 && perturbations < MAX_PLATEAU_PERTURBATIONS {
                perturbations += 1;
                let coordinate = self.rng.below(n as u64) as usize;
                x_prev[coordinate] ^= self.rng.below(256);
                // The refreshed cost is probed at the caller's starting
                // point, not at the perturbed snapshot.
                f_prev = eval.cost(x0);
                compute_gradient(&mut eval, f_prev, &mut x_prev, gradient);
                max_value = max_gradient(gradient);
            }
            if max_value == 0 {
                break GradientSearchTerminationReason::Plateau;
            }

            normalize_gradient(gradient);
            statistics.on_line_search();
            f_next = if descending {
                descend(&mut eval, gradient, &x_prev, f_prev, out_x)
            } else {
                ascend(&mut eval, gradient, &x_prev, f_prev, out_x)
            };
            if f_prev == f_next {
                break GradientSearchTerminationReason::Converged;
            }
            epoch += 1;
        };

        statistics.set_evaluations(eval.evaluations());
        match termination {
            GradientSearchTerminationReason::Converged => {
                GradientSearchOutcome::converged(f_next, statistics)
            }
            GradientSearchTerminationReason::Plateau => {
                GradientSearchOutcome::plateau(f_next, statistics)
            }
            GradientSearchTerminationReason::EpochLimit => {
                GradientSearchOutcome::epoch_limit(f_next, statistics)
            }
        }
    }

    fn step_once<F>(
        &mut self,
        objective: &mut F,
        x0: &[u64],
        out_x: &mut [u64],
        descending: bool,
    ) -> StepOutcome
    where
        F: Objective,
    {
        Self::check_buffers(x0, out_x);
        let n = x0.len();
        self.ensure_scratch(n);

        let mut eval = CostEvaluator::new(objective);
        let mut probe: ScratchVector = SmallVec::from_slice(x0);
        let f0 = eval.cost(&probe);

        let gradient = &mut self.gradient[..n];
        compute_gradient(&mut eval, f0, &mut probe, gradient);
        if max_gradient(gradient) == 0 {
            return StepOutcome::AtLocalExtremum;
        }
        normalize_gradient(gradient);

        let objective_value = if descending {
            descend(&mut eval, gradient, &probe, f0, out_x)
        } else {
            ascend(&mut eval, gradient, &probe, f0, out_x)
        };
        StepOutcome::Stepped { objective_value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::GradientSearchTerminationReason;

    fn engine() -> GradientSearchEngine {
        GradientSearchEngine::with_seed(42)
    }

    #[test]
    fn test_minimize_single_byte_objective() {
        // Low byte as the (signed) cost, starting at 0x80.
        let mut f = |x: &[u64]| x[0] & 0xFF;
        let x0 = [0x0000_0000_0000_0080u64];
        let mut out = [0u64];

        let outcome = engine().minimize(&mut f, &x0, &mut out);
        assert_eq!(out[0], 0x0000_0000_0000_0000);
        assert_eq!(outcome.objective_value(), 0);
    }

    #[test]
    fn test_maximize_negated_byte_objective() {
        // f = -(low byte): the maximum of 0 is attained at byte 0, reached
        // by wrapping through the byte domain.
        let mut f = |x: &[u64]| (-((x[0] & 0xFF) as i64)) as u64;
        let x0 = [0x10u64];
        let mut out = [0u64];

        let outcome = engine().maximize(&mut f, &x0, &mut out);
        assert_eq!(out[0], 0x00);
        assert_eq!(outcome.objective_value(), 0);
        assert_eq!(
            outcome.termination_reason(),
            GradientSearchTerminationReason::Converged
        );
    }

    #[test]
    fn test_minimize_two_coordinate_distance_objective() {
        let mut f = |x: &[u64]| {
            let a = ((x[0] & 0xFF) as i64 - 0x40).unsigned_abs();
            let b = ((x[1] & 0xFF) as i64 - 0xC0).unsigned_abs();
            a + b
        };
        let x0 = [0x00u64, 0x00];
        let mut out = [0u64, 0];

        let outcome = engine().minimize(&mut f, &x0, &mut out);
        assert_eq!(out, [0x40, 0xC0]);
        assert_eq!(outcome.objective_value(), 0);
    }

    #[test]
    fn test_constant_objective_returns_immediately() {
        let mut f = |_: &[u64]| 42u64;
        let x0 = [0x55u64];
        let mut out = [0u64];

        let mut eng = engine();
        let outcome = eng.minimize(&mut f, &x0, &mut out);
        assert_eq!(out[0], 0x55);
        assert_eq!(outcome.objective_value(), 42);
        assert_eq!(
            outcome.termination_reason(),
            GradientSearchTerminationReason::Plateau
        );

        let outcome = eng.maximize(&mut f, &x0, &mut out);
        assert_eq!(out[0], 0x55);
        assert_eq!(outcome.objective_value(), 42);

        assert!(eng.descend_once(&mut f, &x0, &mut out).is_at_local_extremum());
        assert!(eng.ascend_once(&mut f, &x0, &mut out).is_at_local_extremum());
    }

    #[test]
    fn test_minimize_weighted_sum_objective() {
        let mut f =
            |x: &[u64]| (x[0] & 0xFF) + 2 * (x[1] & 0xFF) + 4 * (x[2] & 0xFF);
        let x0 = [0xFFu64, 0xFF, 0xFF];
        let mut out = [0u64; 3];

        let outcome = engine().minimize(&mut f, &x0, &mut out);
        assert_eq!(out, [0x00, 0x00, 0x00]);
        assert_eq!(outcome.objective_value(), 0);
    }

    #[test]
    fn test_upper_bits_are_never_touched() {
        let mut f = |x: &[u64]| ((x[0] & 0xFF) as i64 - 0x40).unsigned_abs();
        let x0 = [0xDEAD_BEEF_DEAD_BE80u64];
        let mut out = [0u64];

        engine().minimize(&mut f, &x0, &mut out);
        assert_eq!(out[0] & 0xFFFF_FFFF_FFFF_FF00, 0xDEAD_BEEF_DEAD_BE00);
        assert_eq!(out[0], 0xDEAD_BEEF_DEAD_BE40);
    }

    #[test]
    fn test_minimize_never_worsens_the_objective() {
        let mut f = |x: &[u64]| {
            x.iter()
                .map(|w| ((w & 0xFF) as i64 - 0x77).unsigned_abs())
                .sum()
        };
        let x0 = [0x01u64, 0xFE, 0x33, 0xB2];
        let mut out = [0u64; 4];

        let f0 = f(&x0);
        let outcome = engine().minimize(&mut f, &x0, &mut out);
        assert!(outcome.objective_value() <= f0 as i64);
        assert_eq!(f(&out) as i64, outcome.objective_value());
    }

    #[test]
    fn test_runs_are_deterministic_with_identical_evaluation_counts() {
        let x0 = [0x13u64, 0x9C];

        let run = || {
            let mut calls = 0u64;
            let mut f = |x: &[u64]| {
                calls += 1;
                ((x[0] & 0xFF) as i64 - 0x21).unsigned_abs()
                    + 3 * ((x[1] & 0xFF) as i64 - 0x84).unsigned_abs()
            };
            let mut out = [0u64; 2];
            let outcome = engine().minimize(&mut f, &x0, &mut out);
            drop(f);
            (out, outcome.objective_value(), calls, outcome.statistics().evaluations)
        };

        let (out_a, f_a, calls_a, counted_a) = run();
        let (out_b, f_b, calls_b, counted_b) = run();
        assert_eq!(out_a, out_b);
        assert_eq!(f_a, f_b);
        assert_eq!(calls_a, calls_b);
        assert_eq!(calls_a, counted_a);
        assert_eq!(counted_a, counted_b);
    }

    #[test]
    fn test_descend_once_improves_and_signals_extremum() {
        let mut f = |x: &[u64]| x[0] & 0xFF;
        let mut eng = engine();

        let x0 = [0x80u64];
        let mut out = [0u64];
        match eng.descend_once(&mut f, &x0, &mut out) {
            StepOutcome::Stepped { objective_value } => {
                assert!(objective_value < 0x80);
                assert_eq!(out[0], objective_value as u64);
            }
            StepOutcome::AtLocalExtremum => panic!("a descent step must exist at 0x80"),
        }

        // At the minimum the driver must not touch the output buffer.
        let x_min = [0x00u64];
        let mut untouched = [0xA5A5_A5A5_A5A5_A5A5u64];
        let outcome = eng.descend_once(&mut f, &x_min, &mut untouched);
        assert!(outcome.is_at_local_extremum());
        assert_eq!(untouched[0], 0xA5A5_A5A5_A5A5_A5A5);
    }

    #[test]
    fn test_ascend_once_improves_and_signals_extremum() {
        let mut f = |x: &[u64]| ((x[0] & 0xFF) as i64 - 0x40).unsigned_abs();
        let mut eng = engine();

        // From 0x80 the distance grows fastest upward; one ascent step walks
        // the byte to 0xFF.
        let x0 = [0x80u64];
        let mut out = [0u64];
        match eng.ascend_once(&mut f, &x0, &mut out) {
            StepOutcome::Stepped { objective_value } => {
                assert_eq!(objective_value, 0xBF);
                assert_eq!(out[0], 0xFF);
            }
            StepOutcome::AtLocalExtremum => panic!("an ascent step must exist at 0x80"),
        }

        // The probe-stationary point (no ±1 probe goes below the starting
        // cost) signals "at extremum" for both drivers and leaves the
        // output buffer untouched.
        let stationary = [0x40u64];
        let mut untouched = [0u64];
        let outcome = eng.ascend_once(&mut f, &stationary, &mut untouched);
        assert!(outcome.is_at_local_extremum());
        assert_eq!(untouched[0], 0);
    }

    #[test]
    fn test_gradient_build_cost_matches_the_budget() {
        // A plateau run spends one starting evaluation plus two probes per
        // coordinate, then stops.
        let mut f = |_: &[u64]| 7u64;
        let x0 = [0x11u64, 0x22, 0x33];
        let mut out = [0u64; 3];

        let outcome = engine().minimize(&mut f, &x0, &mut out);
        assert_eq!(outcome.statistics().evaluations, 1 + 2 * 3);
        assert_eq!(outcome.statistics().epochs, 1);
        assert_eq!(outcome.statistics().line_searches, 0);
    }

    #[test]
    fn test_scratch_grows_and_is_reused_across_runs() {
        let mut eng = engine();
        let mut f = |x: &[u64]| x.iter().map(|w| w & 0xFF).sum();

        let small = [0x05u64];
        let mut out_small = [0u64];
        eng.minimize(&mut f, &small, &mut out_small);

        let large = [0x05u64; 24];
        let mut out_large = [0u64; 24];
        let outcome = eng.minimize(&mut f, &large, &mut out_large);
        assert_eq!(out_large, [0u64; 24]);
        assert_eq!(outcome.objective_value(), 0);

        // Back to a small run on the grown scratch.
        let outcome = eng.minimize(&mut f, &small, &mut out_small);
        assert_eq!(out_small[0], 0);
        assert_eq!(outcome.objective_value(), 0);
    }

    #[test]
    #[should_panic(expected = "empty assignment vector")]
    fn test_empty_assignment_panics() {
        let mut f = |_: &[u64]| 0u64;
        engine().minimize(&mut f, &[], &mut []);
    }

    #[test]
    #[should_panic(expected = "inconsistent buffer lengths")]
    fn test_mismatched_buffers_panic() {
        let mut f = |_: &[u64]| 0u64;
        let x0 = [0u64, 0];
        let mut out = [0u64];
        engine().minimize(&mut f, &x0, &mut out);
    }
}
