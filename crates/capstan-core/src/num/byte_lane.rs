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

//! # Byte-Lane Wrapping Arithmetic
//!
//! Modular arithmetic confined to the least significant byte of a wider
//! unsigned word. A byte-lane operation adds or subtracts an 8-bit delta on
//! the low byte with wrap-around at the byte boundary, while every bit above
//! the low byte passes through untouched.
//!
//! ## Motivation
//!
//! Search engines that treat each word of an assignment vector as a single
//! 8-bit variable need a mutation primitive that cannot leak into the bits
//! the search does not own. Expressing the update as `(word & !0xFF) |
//! low_byte_step(word)` at every call site invites mistakes; the trait makes
//! the lane confinement a property of the operation itself.
//!
//! ## Usage
//!
//! ```rust
//! use capstan_core::num::byte_lane::ByteLaneWrapping;
//!
//! let word: u64 = 0xDEAD_BEEF_0000_00FF;
//! assert_eq!(word.byte_wrapping_add(1), 0xDEAD_BEEF_0000_0000);
//! assert_eq!(word.byte_wrapping_sub(1), 0xDEAD_BEEF_0000_00FE);
//! ```

use crate::num::ops::wrapping_arithmetic::{WrappingAddVal, WrappingSubVal};

/// Wrapping arithmetic on the low byte of an unsigned word.
///
/// Both operations are closed over the low 8 bits: the result's upper bits
/// are bitwise identical to the input's.
pub trait ByteLaneWrapping: Sized {
    /// Adds `delta` to the low byte with 8-bit wrap-around.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_core::num::byte_lane::ByteLaneWrapping;
    ///
    /// let word: u64 = 0x1122_3344_5566_77FE;
    /// assert_eq!(word.byte_wrapping_add(3), 0x1122_3344_5566_7701);
    /// ```
    fn byte_wrapping_add(self, delta: u8) -> Self;

    /// Subtracts `delta` from the low byte with 8-bit wrap-around.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capstan_core::num::byte_lane::ByteLaneWrapping;
    ///
    /// let word: u64 = 0x1122_3344_5566_7701;
    /// assert_eq!(word.byte_wrapping_sub(3), 0x1122_3344_5566_77FE);
    /// ```
    fn byte_wrapping_sub(self, delta: u8) -> Self;
}

macro_rules! byte_lane_impl {
    ($t:ty) => {
        impl ByteLaneWrapping for $t {
            #[inline(always)]
            fn byte_wrapping_add(self, delta: u8) -> Self {
                let low = (self as u8).wrapping_add_val(delta);
                (self & !0xFF) | (low as $t)
            }

            #[inline(always)]
            fn byte_wrapping_sub(self, delta: u8) -> Self {
                let low = (self as u8).wrapping_sub_val(delta);
                (self & !0xFF) | (low as $t)
            }
        }
    };
}

byte_lane_impl!(u16);
byte_lane_impl!(u32);
byte_lane_impl!(u64);
byte_lane_impl!(u128);
byte_lane_impl!(usize);
