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

//! Statistics reporting for gradient search runs.
//!
//! A lightweight container for the aggregate metrics of one optimization
//! call: epochs started, objective evaluations performed, and line searches
//! run. Updates use saturating arithmetic so a pathological run cannot trap
//! on counter overflow, and the container is cheap enough to carry through
//! the hot loop unconditionally. Because every objective call flows through
//! the evaluator, the evaluation count is exact — which is what makes the
//! engine's determinism contract checkable from the outside.

use capstan_core::num::ops::saturating_arithmetic::SaturatingAddVal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GradientSearchStatistics {
    /// Number of epochs started (gradient build + line search).
    pub epochs: u64,

    /// Number of objective evaluations performed.
    pub evaluations: u64,

    /// Number of line searches run.
    pub line_searches: u64,
}

impl GradientSearchStatistics {
    /// Called at the start of each epoch.
    #[inline]
    pub fn on_epoch(&mut self) {
        self.epochs = self.epochs.saturating_add_val(1);
    }

    /// Called once per line search.
    #[inline]
    pub fn on_line_search(&mut self) {
        self.line_searches = self.line_searches.saturating_add_val(1);
    }

    /// Records the final objective evaluation count for the run.
    #[inline]
    pub fn set_evaluations(&mut self, evaluations: u64) {
        self.evaluations = evaluations;
    }
}

impl std::fmt::Display for GradientSearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Capstan Gradient Search Statistics:")?;
        writeln!(f, "   Epochs:                {}", self.epochs)?;
        writeln!(f, "   Evaluations:           {}", self.evaluations)?;
        writeln!(f, "   Line Searches:         {}", self.line_searches)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = GradientSearchStatistics::default();
        assert_eq!(stats.epochs, 0);
        assert_eq!(stats.evaluations, 0);
        assert_eq!(stats.line_searches, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GradientSearchStatistics::default();
        stats.on_epoch();
        stats.on_epoch();
        stats.on_line_search();
        stats.set_evaluations(12);
        assert_eq!(stats.epochs, 2);
        assert_eq!(stats.line_searches, 1);
        assert_eq!(stats.evaluations, 12);
    }

    #[test]
    fn test_epoch_counter_saturates() {
        let mut stats = GradientSearchStatistics {
            epochs: u64::MAX,
            ..Default::default()
        };
        stats.on_epoch();
        assert_eq!(stats.epochs, u64::MAX);
    }

    #[test]
    fn test_display_lists_all_counters() {
        let mut stats = GradientSearchStatistics::default();
        stats.on_epoch();
        stats.set_evaluations(4);
        let report = format!("{}", stats);
        assert!(report.contains("Epochs"));
        assert!(report.contains("Evaluations"));
        assert!(report.contains("Line Searches"));
    }
}
