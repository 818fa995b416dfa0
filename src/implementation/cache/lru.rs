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

//! A fully-associative LRU over a handful of width groups. Entries are kept
//! in most-recently-used-first order in a plain `Vec`; at this capacity
//! (default 3) a linear scan is cheaper than any hash-indexed structure.

use crate::abstraction::{WidthGroupCache, DEFAULT_CAPACITY};
use crate::common::Width;

pub struct LruWidthCache<H> {
    capacity: usize,
    entries: Vec<(Width, H)>,
}

impl<H> LruWidthCache<H> {
    pub fn new(capacity: usize) -> Self {
        LruWidthCache {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }
}

impl<H> Default for LruWidthCache<H> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<H> WidthGroupCache<H> for LruWidthCache<H> {
    fn get_mut(&mut self, width: Width) -> Option<&mut H> {
        let pos = self.entries.iter().position(|(w, _)| *w == width)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(&mut self.entries[0].1)
    }

    fn insert(&mut self, width: Width, handle: H) -> Option<(Width, H)> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop()
        } else {
            None
        };
        self.entries.insert(0, (width, handle));
        evicted
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
