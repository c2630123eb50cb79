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

//! Capstan-Grad: coordinate-wise gradient search over byte variables
//!
//! A local search engine for black-box objectives over vectors of 64-bit
//! words, where each word carries a single 8-bit variable in its low byte.
//! The engine estimates a discrete gradient by ±1 probing, performs a
//! geometric line search along the full gradient followed by per-coordinate
//! refinement, and iterates until the objective converges or every probe
//! fails to improve.
//!
//! Core flow
//! - Provide an [`objective::Objective`] — any `FnMut(&[u64]) -> u64`
//!   qualifies. The returned word is compared in two's-complement signed
//!   order, so "smaller is better" for minimization.
//! - Build a [`engine::GradientSearchEngine`] (seeds its random source from
//!   OS entropy and allocates the reusable gradient scratch).
//! - Call `minimize`/`maximize` for a full run, or `descend_once`/
//!   `ascend_once` to interleave single steps with external transformations.
//!
//! Design highlights
//! - Every mutation flows through byte-lane wrapping arithmetic, so the
//!   upper 56 bits of each word are preserved structurally.
//! - Deterministic given the starting point and a pure objective:
//!   coordinates are visited strictly by index, steps double strictly as
//!   1, 2, 4, …, and the random escape path is dormant in the shipped
//!   configuration.
//! - Objective evaluations are the cost unit: a gradient build spends
//!   exactly two evaluations per coordinate, and outcomes report the exact
//!   evaluation count.
//!
//! Module map
//! - `objective`: the objective capability boundary.
//! - `eval`: signed cost view with evaluation accounting.
//! - `gradient`: direction classification, gradient build, normalization.
//! - `engine`: the outer loop and single-step drivers.
//! - `rng`: entropy-reseeded PRNG for the escape path.
//! - `result`: outcomes with termination reasons.
//! - `stats`: run counters.

pub mod engine;
pub mod eval;
pub mod gradient;
mod line_search;
pub mod objective;
pub mod result;
pub mod rng;
pub mod stats;

/// Inline capacity for assignment-sized scratch buffers. Vectors up to this
/// many coordinates avoid heap traffic in the hot loops.
pub(crate) const INLINE_COORDS: usize = 16;

pub(crate) type ScratchVector = smallvec::SmallVec<[u64; INLINE_COORDS]>;
