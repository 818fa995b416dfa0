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

//! A width group: the append-only pool of biclusters sharing one width.

use crate::bitset::BitSet;
use crate::common::{NestedFlag, RowId};
use crate::error::Result;
use crate::ordered_bitset::OrderedBitSet;

/// Storage for one width group. Rows are never deleted or reordered; the
/// only permitted mutation to an existing row is its `NestedFlag`.
pub trait WidthGroupStorage {
    /// Appends a new row with `NestedFlag::Unknown`, returning its stable
    /// `RowId`.
    fn append(&mut self, conditions: OrderedBitSet, genes: BitSet) -> Result<RowId>;

    /// Reads back row `row`. Fails with `NotFound` if `row` was never
    /// appended.
    fn get(&self, row: RowId) -> Result<(&OrderedBitSet, &BitSet, NestedFlag)>;

    /// Count of rows, optionally excluding those flagged `Nested`.
    fn depth(&self, include_nested: bool) -> usize;

    /// Mutates the `NestedFlag` of an already-appended row.
    fn set_nested(&mut self, row: RowId, flag: NestedFlag) -> Result<()>;

    /// Total row count, nested or not.
    #[inline]
    fn len(&self) -> usize {
        self.depth(true)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
