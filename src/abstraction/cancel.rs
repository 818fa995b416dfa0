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

//! Cooperative cancellation, observed at chain-outer-loop boundaries
//! (between head rows) so that a clean abort always leaves storage
//! consistent: appends are atomic units.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled by the driver between head rows of a `chain` call.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// The default: a run can never be cancelled.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCancellation;
impl Cancellation for NoCancellation {
    #[inline(always)]
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// An `AtomicBool`-backed signal, cloneable so that the trigger can be held
/// by a test or caller while a clone is handed to the driver.
#[derive(Debug, Clone)]
pub struct AtomicCancellation {
    flag: Arc<AtomicBool>,
}
impl AtomicCancellation {
    pub fn new() -> Self {
        AtomicCancellation {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the cancellation flag; observed by every clone of this handle.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
impl Default for AtomicCancellation {
    fn default() -> Self {
        Self::new()
    }
}
impl Cancellation for AtomicCancellation {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
