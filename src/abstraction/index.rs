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

//! The link index for one width group: condition -> row-index lists, keyed
//! by the row's last condition (`heads`) or first condition (`tails`).

use crate::common::{ConditionId, RowId};

/// Read access to a width group's link index. Becomes stale as soon as a new
/// row is appended to the group it was built from; callers are responsible
/// for rebuilding before the next chaining pass (see
/// `crate::implementation::index::LinkIndexBuilder::rebuild`).
pub trait LinkIndex {
    /// Rows whose ordered condition sequence ends at `c`.
    fn heads(&self, c: ConditionId) -> &[RowId];

    /// Rows whose ordered condition sequence starts at `c`.
    fn tails(&self, c: ConditionId) -> &[RowId];

    /// Number of rows this index was built over.
    fn indexed_rows(&self) -> usize;
}
