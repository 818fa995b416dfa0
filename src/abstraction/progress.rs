// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Progress reporting is an external collaborator: the engine exposes
//! begin/update/end hooks and never prints directly. `TracingProgress` is
//! the concrete realization used by this crate, rendering hooks as
//! `tracing` spans/events; nothing in the engine's control flow depends on
//! whether a subscriber is installed.

/// Per-pass progress hooks, keyed by a phase name chosen by the caller
/// (e.g. `"seed"`, `"chain(3)"`, `"prune(2)"`).
pub trait ProgressSink {
    fn begin(&self, phase: &str, denominator: usize);
    fn update(&self, phase: &str, numerator: usize);
    fn end(&self, phase: &str);
}

/// Discards every hook. Useful for tests that do not want tracing overhead.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoProgress;
impl ProgressSink for NoProgress {
    #[inline(always)]
    fn begin(&self, _phase: &str, _denominator: usize) {}
    #[inline(always)]
    fn update(&self, _phase: &str, _numerator: usize) {}
    #[inline(always)]
    fn end(&self, _phase: &str) {}
}

/// Renders begin/update/end as `tracing` events at debug level.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingProgress;
impl ProgressSink for TracingProgress {
    fn begin(&self, phase: &str, denominator: usize) {
        tracing::debug!(phase, denominator, "pass started");
    }
    fn update(&self, phase: &str, numerator: usize) {
        tracing::trace!(phase, numerator, "pass progress");
    }
    fn end(&self, phase: &str) {
        tracing::debug!(phase, "pass finished");
    }
}
