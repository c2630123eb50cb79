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

//! # Capstan Core
//!
//! Foundational numeric primitives for the Capstan search ecosystem. This
//! crate consolidates the small, reusable building blocks the engine crates
//! depend on: by-value arithmetic traits with explicit overflow semantics,
//! and byte-lane operations for search spaces whose variables live in the
//! low byte of a wider machine word.
//!
//! ## Modules
//!
//! - `num`: Integer-centric utilities — by-value wrapping and saturating
//!   arithmetic traits (`WrappingAddVal`, `WrappingSubVal`,
//!   `WrappingMulVal`, `SaturatingAddVal`) and the byte-lane wrapping ops
//!   (`ByteLaneWrapping`) that confine modular arithmetic to the least
//!   significant byte of a word while leaving all upper bits untouched.
//!
//! ## Purpose
//!
//! Search loops over machine words need their overflow behavior spelled out
//! at every call site. These traits make the intended semantics part of the
//! method name instead of an implicit property of the type, so a reviewer
//! can tell a deliberate modular step from an accidental overflow at a
//! glance.
//!
//! Refer to each module for detailed APIs and examples.

pub mod num;
