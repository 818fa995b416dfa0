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

//! Decides whether a bicluster is strictly contained in some wider one.

use crate::common::{RowId, Width};
use crate::error::Result;

/// Classifies a row of width `w` against the rows of width `w + 1`.
/// Implementations cache the verdict in the row's `NestedFlag` and must
/// honor the one-way `Unknown -> {Nested, NonNested}` transition.
pub trait NestedPruner {
    /// Returns true iff row `r` of width `w` is properly contained (gene set
    /// subset and ordered-subset condition sequence) in some row of width
    /// `w + 1`. Checking only against `w + 1` is sufficient: transitive
    /// containment through wider widths is covered by a bottom-up sweep over
    /// increasing `w`.
    fn is_nested(&mut self, w: Width, r: RowId) -> Result<bool>;
}
