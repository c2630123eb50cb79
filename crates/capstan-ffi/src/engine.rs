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

use capstan_grad::engine::GradientSearchEngine;
use capstan_grad::result::{GradientSearchTerminationReason, StepOutcome};

/// Objective callback: receives a pointer to the assignment vector (length
/// fixed by the surrounding call) and returns the raw objective word, which
/// the engine compares in two's-complement signed order.
pub type CapstanObjectiveFn = unsafe extern "C" fn(x: *const u64) -> u64;

/// Why an optimization run stopped, C-compatible.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapstanTerminationReason {
    Converged = 0,
    Plateau = 1,
    EpochLimit = 2,
}

impl From<GradientSearchTerminationReason> for CapstanTerminationReason {
    fn from(value: GradientSearchTerminationReason) -> Self {
        match value {
            GradientSearchTerminationReason::Converged => CapstanTerminationReason::Converged,
            GradientSearchTerminationReason::Plateau => CapstanTerminationReason::Plateau,
            GradientSearchTerminationReason::EpochLimit => CapstanTerminationReason::EpochLimit,
        }
    }
}

/// Creates a new gradient search engine.
///
/// The returned handle is owned by the caller and must be released with
/// [`capstan_engine_free`].
///
/// # Panics
///
/// Panics if the operating system entropy source is unavailable.
#[no_mangle]
pub extern "C" fn capstan_engine_new() -> *mut GradientSearchEngine {
    Box::into_raw(Box::new(GradientSearchEngine::new()))
}

/// Frees an engine previously allocated by [`capstan_engine_new`].
///
/// # Safety
///
/// The caller must ensure that `engine` is either null or a pointer
/// obtained from [`capstan_engine_new`] that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn capstan_engine_free(engine: *mut GradientSearchEngine) {
    if !engine.is_null() {
        drop(unsafe { Box::from_raw(engine) });
    }
}

/// Builds the borrowed views shared by every optimization entry point.
///
/// # Safety
///
/// See the safety contracts on the public entry points.
unsafe fn engine_and_buffers<'a>(
    engine: *mut GradientSearchEngine,
    x0: *const u64,
    out_x: *mut u64,
    n: u32,
    entry_point: &str,
) -> (&'a mut GradientSearchEngine, &'a [u64], &'a mut [u64]) {
    assert!(
        !engine.is_null(),
        "called `{}` with `engine` as null pointer",
        entry_point
    );
    assert!(
        !x0.is_null(),
        "called `{}` with `x0` as null pointer",
        entry_point
    );
    assert!(
        !out_x.is_null(),
        "called `{}` with `out_x` as null pointer",
        entry_point
    );
    assert!(n >= 1, "called `{}` with a zero dimension", entry_point);

    let engine = unsafe { &mut *engine };
    let x0 = unsafe { std::slice::from_raw_parts(x0, n as usize) };
    let out_x = unsafe { std::slice::from_raw_parts_mut(out_x, n as usize) };
    (engine, x0, out_x)
}

/// Drives the assignment toward a local minimum of the objective.
///
/// `out_x` receives the best assignment found and `*out_f` the final
/// objective word (two's-complement encoded). Returns the termination
/// reason.
///
/// # Panics
///
/// Panics if any pointer is null or `n` is zero.
///
/// # Safety
///
/// The caller must ensure that `engine` is a live engine handle, `x0` and
/// `out_x` point to `n` readable/writable `u64` words respectively, `out_f`
/// points to a writable `u64`, and `function` is safe to call with a
/// pointer to `n` words for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn capstan_engine_minimize(
    engine: *mut GradientSearchEngine,
    function: CapstanObjectiveFn,
    x0: *const u64,
    out_x: *mut u64,
    out_f: *mut u64,
    n: u32,
) -> CapstanTerminationReason {
    assert!(
        !out_f.is_null(),
        "called `capstan_engine_minimize` with `out_f` as null pointer"
    );
    let (engine, x0, out_x) =
        unsafe { engine_and_buffers(engine, x0, out_x, n, "capstan_engine_minimize") };

    let mut objective = |x: &[u64]| unsafe { function(x.as_ptr()) };
    let outcome = engine.minimize(&mut objective, x0, out_x);
    unsafe { *out_f = outcome.objective_value() as u64 };
    outcome.termination_reason().into()
}

/// Drives the assignment toward a local maximum of the objective.
///
/// Mirror image of [`capstan_engine_minimize`].
///
/// # Panics
///
/// Panics if any pointer is null or `n` is zero.
///
/// # Safety
///
/// Same contract as [`capstan_engine_minimize`].
#[no_mangle]
pub unsafe extern "C" fn capstan_engine_maximize(
    engine: *mut GradientSearchEngine,
    function: CapstanObjectiveFn,
    x0: *const u64,
    out_x: *mut u64,
    out_f: *mut u64,
    n: u32,
) -> CapstanTerminationReason {
    assert!(
        !out_f.is_null(),
        "called `capstan_engine_maximize` with `out_f` as null pointer"
    );
    let (engine, x0, out_x) =
        unsafe { engine_and_buffers(engine, x0, out_x, n, "capstan_engine_maximize") };

    let mut objective = |x: &[u64]| unsafe { function(x.as_ptr()) };
    let outcome = engine.maximize(&mut objective, x0, out_x);
    unsafe { *out_f = outcome.objective_value() as u64 };
    outcome.termination_reason().into()
}

/// Performs exactly one gradient build and descent line search.
///
/// Returns `1` when the starting point is already a local extremum (the
/// output buffers are left untouched) and `0` when a step was taken, in
/// which case `out_x` and `*out_f` hold the stepped assignment and
/// objective word.
///
/// # Panics
///
/// Panics if any pointer is null or `n` is zero.
///
/// # Safety
///
/// Same contract as [`capstan_engine_minimize`].
#[no_mangle]
pub unsafe extern "C" fn capstan_engine_descend_once(
    engine: *mut GradientSearchEngine,
    function: CapstanObjectiveFn,
    x0: *const u64,
    out_x: *mut u64,
    out_f: *mut u64,
    n: u32,
) -> i32 {
    assert!(
        !out_f.is_null(),
        "called `capstan_engine_descend_once` with `out_f` as null pointer"
    );
    let (engine, x0, out_x) =
        unsafe { engine_and_buffers(engine, x0, out_x, n, "capstan_engine_descend_once") };

    let mut objective = |x: &[u64]| unsafe { function(x.as_ptr()) };
    match engine.descend_once(&mut objective, x0, out_x) {
        StepOutcome::AtLocalExtremum => 1,
        StepOutcome::Stepped { objective_value } => {
            unsafe { *out_f = objective_value as u64 };
            0
        }
    }
}

/// Performs exactly one gradient build and ascent line search.
///
/// Mirror image of [`capstan_engine_descend_once`].
///
/// # Panics
///
/// Panics if any pointer is null or `n` is zero.
///
/// # Safety
///
/// Same contract as [`capstan_engine_minimize`].
#[no_mangle]
pub unsafe extern "C" fn capstan_engine_ascend_once(
    engine: *mut GradientSearchEngine,
    function: CapstanObjectiveFn,
    x0: *const u64,
    out_x: *mut u64,
    out_f: *mut u64,
    n: u32,
) -> i32 {
    assert!(
        !out_f.is_null(),
        "called `capstan_engine_ascend_once` with `out_f` as null pointer"
    );
    let (engine, x0, out_x) =
        unsafe { engine_and_buffers(engine, x0, out_x, n, "capstan_engine_ascend_once") };

    let mut objective = |x: &[u64]| unsafe { function(x.as_ptr()) };
    match engine.ascend_once(&mut objective, x0, out_x) {
        StepOutcome::AtLocalExtremum => 1,
        StepOutcome::Stepped { objective_value } => {
            unsafe { *out_f = objective_value as u64 };
            0
        }
    }
}
