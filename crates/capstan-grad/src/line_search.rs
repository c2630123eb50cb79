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

//! Geometric line search along a normalized gradient.
//!
//! Two symmetric routines, `descend` and `ascend`, move the assignment along
//! the gradient until the objective stops improving. Each runs in two
//! phases. Phase one doubles a shared step over all coordinates at once
//! (each coordinate scaled by its weight), snapshotting before every probe
//! and restoring the last improving point when a probe fails. Phase two,
//! skipped for one-dimensional assignments, refines one coordinate at a
//! time with the same doubling discipline, walking coordinates in index
//! order and skipping those with negligible weight.
//!
//! Step deltas are computed as `weight × step` in `f64` and truncated to a
//! modular 8-bit quantity, so a weight below `1/step` contributes nothing
//! until the step grows and a delta past 255 folds back into the byte lane.
//! The snapshot buffer lives inline for small assignments and is released
//! before return on every path.

use crate::eval::CostEvaluator;
use crate::gradient::{Direction, GradientElement};
use crate::objective::Objective;
use crate::ScratchVector;
use capstan_core::num::byte_lane::ByteLaneWrapping;
use capstan_core::num::ops::wrapping_arithmetic::WrappingMulVal;
use num_traits::ToPrimitive;
use smallvec::SmallVec;

/// Weight below which a coordinate is not worth refining on its own.
const REFINEMENT_WEIGHT_CUTOFF: f64 = 0.01;

/// Truncates `pct * step` to a modular byte delta.
#[inline]
fn step_movement(pct: f64, step: u64) -> u8 {
    let movement = (pct * step as f64).to_u64().unwrap_or(u64::MAX);
    movement as u8
}

/// Applies one weighted step over every coordinate at once.
///
/// For a descent step, ascending coordinates move down and descending
/// coordinates move up; an ascent step is the mirror image. Stationary
/// coordinates are untouched.
fn apply_step_all(x: &mut [u64], gradient: &[GradientElement], step: u64, descending: bool) {
    debug_assert_eq!(
        x.len(),
        gradient.len(),
        "called `apply_step_all` with inconsistent lengths: the assignment has {} coordinates but the gradient has {}",
        x.len(),
        gradient.len()
    );

    for (word, element) in x.iter_mut().zip(gradient.iter()) {
        let movement = step_movement(element.pct, step);
        match element.direction {
            Direction::Ascending if descending => *word = word.byte_wrapping_sub(movement),
            Direction::Descending if descending => *word = word.byte_wrapping_add(movement),
            Direction::Ascending => *word = word.byte_wrapping_add(movement),
            Direction::Descending => *word = word.byte_wrapping_sub(movement),
            Direction::Stationary => {}
        }
    }
}

/// Line search toward smaller costs. Returns the best cost reached; `out_x`
/// holds the matching assignment.
pub(crate) fn descend<F>(
    eval: &mut CostEvaluator<'_, F>,
    gradient: &[GradientElement],
    x0: &[u64],
    f0: i64,
    out_x: &mut [u64],
) -> i64
where
    F: Objective,
{
    let n = x0.len();
    debug_assert_eq!(
        out_x.len(),
        n,
        "called `descend` with inconsistent buffer lengths: the source has {} coordinates but the output has {}",
        n,
        out_x.len()
    );

    out_x.copy_from_slice(x0);
    let mut x_prev: ScratchVector = SmallVec::from_slice(x0);

    let mut f_prev = f0;
    let mut step: u64 = 1;
    loop {
        x_prev.copy_from_slice(out_x);
        apply_step_all(out_x, gradient, step, true);

        let f_next = eval.cost(out_x);
        if f_next >= f_prev {
            break;
        }
        step = step.wrapping_mul_val(2);
        f_prev = f_next;
    }
    out_x.copy_from_slice(&x_prev);

    if n == 1 {
        return f_prev;
    }

    let mut index = 0;
    while index < n && gradient[index].pct < REFINEMENT_WEIGHT_CUTOFF {
        index += 1;
    }
    if index >= n {
        return f_prev;
    }

    step = 1;
    loop {
        x_prev.copy_from_slice(out_x);

        let movement = step_movement(gradient[index].pct, step);
        match gradient[index].direction {
            Direction::Ascending => out_x[index] = out_x[index].byte_wrapping_sub(movement),
            Direction::Descending => out_x[index] = out_x[index].byte_wrapping_add(movement),
            Direction::Stationary => {
                unreachable!("refinement must not select a stationary coordinate")
            }
        }

        let f_next = eval.cost(out_x);
        if f_next < f_prev {
            step = step.wrapping_mul_val(2);
            f_prev = f_next;
            continue;
        }

        out_x.copy_from_slice(&x_prev);
        index += 1;
        while index < n && gradient[index].pct < REFINEMENT_WEIGHT_CUTOFF {
            index += 1;
        }
        if index >= n {
            return f_prev;
        }
        step = 1;
    }
}

/// Line search toward larger costs. Returns the best cost reached; `out_x`
/// holds the matching assignment.
pub(crate) fn ascend<F>(
    eval: &mut CostEvaluator<'_, F>,
    gradient: &[GradientElement],
    x0: &[u64],
    f0: i64,
    out_x: &mut [u64],
) -> i64
where
    F: Objective,
{
    let n = x0.len();
    debug_assert_eq!(
        out_x.len(),
        n,
        "called `ascend` with inconsistent buffer lengths: the source has {} coordinates but the output has {}",
        n,
        out_x.len()
    );

    out_x.copy_from_slice(x0);
    let mut x_prev: ScratchVector = SmallVec::from_slice(x0);

    let mut f_prev = f0;
    let mut step: u64 = 1;
    loop {
        x_prev.copy_from_slice(out_x);
        apply_step_all(out_x, gradient, step, false);

        let f_next = eval.cost(out_x);
        if f_next <= f_prev {
            break;
        }
        step = step.wrapping_mul_val(2);
        f_prev = f_next;
    }
    out_x.copy_from_slice(&x_prev);

    if n == 1 {
        return f_prev;
    }

    let mut index = 0;
    while index < n && gradient[index].pct < REFINEMENT_WEIGHT_CUTOFF {
        index += 1;
    }
    if index >= n {
        return f_prev;
    }

    step = 1;
    loop {
        x_prev.copy_from_slice(out_x);

        let movement = step_movement(gradient[index].pct, step);
        match gradient[index].direction {
            Direction::Ascending => out_x[index] = out_x[index].byte_wrapping_add(movement),
            Direction::Descending => out_x[index] = out_x[index].byte_wrapping_sub(movement),
            Direction::Stationary => {
                unreachable!("refinement must not select a stationary coordinate")
            }
        }

        let f_next = eval.cost(out_x);
        if f_next > f_prev {
            step = step.wrapping_mul_val(2);
            f_prev = f_next;
            continue;
        }

        out_x.copy_from_slice(&x_prev);
        index += 1;
        // The re-scan admits any coordinate with a nonzero weight, unlike
        // the descent re-scan which keeps the 0.01 cutoff.
        while index < n && gradient[index].pct == 0.0 {
            index += 1;
        }
        if index >= n {
            return f_prev;
        }
        step = 1;
    }
}
