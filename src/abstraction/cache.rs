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

//! A small fully-associative cache of open width-group handles. Purely a
//! performance optimization over repeatedly opening/closing a group's
//! storage and link index; nothing about correctness depends on its
//! capacity or eviction order.

use crate::common::Width;

/// The default number of width groups kept open at once.
pub const DEFAULT_CAPACITY: usize = 3;

/// Caches up to a fixed number of `H` handles, keyed by width, evicting the
/// least recently touched entry on a miss at capacity.
pub trait WidthGroupCache<H> {
    /// Returns the cached handle for `width` if present, marking it most
    /// recently used.
    fn get_mut(&mut self, width: Width) -> Option<&mut H>;

    /// Inserts `handle` for `width`, evicting and returning the
    /// least-recently-used entry if the cache was already at capacity.
    fn insert(&mut self, width: Width, handle: H) -> Option<(Width, H)>;

    fn capacity(&self) -> usize;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
