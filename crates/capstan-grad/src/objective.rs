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

//! The objective capability boundary.
//!
//! The engine treats the objective as an opaque mapping from an assignment
//! vector to a raw 64-bit word. A trait rather than a bare function pointer
//! sits at this seam so callers can carry state (evaluation caches, abort
//! flags, instrumentation) inside the objective without the engine knowing.

/// A black-box objective over an assignment vector.
///
/// The returned word is reinterpreted by the engine as a two's-complement
/// signed value for all comparisons. Objectives targeting minimization must
/// therefore encode "smaller is better" in signed order.
///
/// Evaluation may be stateful (`&mut self`); the engine guarantees a
/// deterministic evaluation sequence for a fixed starting point, so
/// side-effecting objectives (e.g. call counters) observe reproducible
/// traces.
pub trait Objective {
    /// Evaluates the objective at `x` and returns the raw objective word.
    fn evaluate(&mut self, x: &[u64]) -> u64;
}

impl<F> Objective for F
where
    F: FnMut(&[u64]) -> u64,
{
    #[inline(always)]
    fn evaluate(&mut self, x: &[u64]) -> u64 {
        self(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_objective() {
        let mut f = |x: &[u64]| x[0] + 1;
        assert_eq!(f.evaluate(&[41]), 42);
    }

    #[test]
    fn test_stateful_closure_is_an_objective() {
        let mut calls = 0u64;
        let mut f = |x: &[u64]| {
            calls += 1;
            x[0]
        };
        f.evaluate(&[7]);
        f.evaluate(&[7]);
        drop(f);
        assert_eq!(calls, 2);
    }
}
