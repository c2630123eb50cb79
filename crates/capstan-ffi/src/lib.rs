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

//! C ABI surface for the Capstan gradient search engine.
//!
//! Solvers written in C (or embedding Capstan through another language's
//! FFI) drive the engine through an opaque handle and plain `u64` buffers.
//! The objective crosses the boundary as a function pointer receiving a
//! pointer to the assignment vector and returning the raw objective word.
//!
//! All functions taking pointers document their safety contracts; null
//! handles and buffers are rejected eagerly with a panic rather than being
//! dereferenced.

pub mod engine;

pub use engine::{
    capstan_engine_ascend_once, capstan_engine_descend_once, capstan_engine_free,
    capstan_engine_maximize, capstan_engine_minimize, capstan_engine_new,
    CapstanObjectiveFn, CapstanTerminationReason,
};
