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

//! Entropy-reseeded randomness for the plateau-escape path.
//!
//! The escape perturbation wants a long-period generator that cannot drift
//! into a fixed cycle over a long solver session, so the ChaCha8 stream is
//! periodically re-keyed from the operating system's entropy source. The
//! reseed interval itself is jittered with entropy, which keeps independent
//! engines from reseeding in lockstep. In the shipped configuration the
//! escape path is dormant and the generator is constructed but never drawn
//! from; it is kept fully wired for configurations that enable escapes.

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng, TryRngCore};
use rand_chacha::ChaCha8Rng;

/// Number of draws between re-keyings from the OS entropy source.
pub const RESEED_INTERVAL: u32 = 10_000;

/// A ChaCha8 generator re-keyed from OS entropy every [`RESEED_INTERVAL`]
/// draws (with entropy-jittered scheduling).
#[derive(Debug, Clone)]
pub struct ReseedingEntropyRng {
    rng: ChaCha8Rng,
    draws_until_reseed: u32,
}

impl ReseedingEntropyRng {
    /// Creates a generator keyed from the OS entropy source.
    ///
    /// # Panics
    ///
    /// Panics if the operating system entropy source is unavailable.
    pub fn from_os_entropy() -> Self {
        let rng = ChaCha8Rng::try_from_os_rng()
            .expect("failed to key the generator from the operating system entropy source");
        Self {
            rng,
            draws_until_reseed: 1,
        }
    }

    /// Creates a deterministic generator for tests and harnesses. The
    /// reseed schedule still applies, so determinism only holds for the
    /// first [`RESEED_INTERVAL`] draws.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws_until_reseed: RESEED_INTERVAL,
        }
    }

    /// Draws a uniform value in `[0, limit)`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero, or if a scheduled re-keying cannot read
    /// the operating system entropy source.
    pub fn below(&mut self, limit: u64) -> u64 {
        assert!(
            limit > 0,
            "called `ReseedingEntropyRng::below` with a zero limit"
        );

        if self.draws_until_reseed == 0 {
            self.reseed();
        } else {
            self.draws_until_reseed -= 1;
        }
        self.rng.random_range(0..limit)
    }

    fn reseed(&mut self) {
        let key = OsRng
            .try_next_u64()
            .expect("failed to read from the operating system entropy source");
        let jitter = OsRng
            .try_next_u64()
            .expect("failed to read from the operating system entropy source");

        self.rng = ChaCha8Rng::seed_from_u64(key);
        self.draws_until_reseed =
            RESEED_INTERVAL / 2 + (jitter % u64::from(RESEED_INTERVAL)) as u32;
    }
}
