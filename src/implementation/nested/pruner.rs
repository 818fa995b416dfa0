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

//! Checks containment of a width-w row against the rows of width w+1 only;
//! the bottom-up sweep the driver performs over increasing widths is what
//! makes that sufficient for full transitive containment.

use crate::abstraction::{NestedPruner, WidthGroupStorage};
use crate::common::{NestedFlag, RowId, Width};
use crate::error::Result;

/// Scoped to one width pair `(w, w+1)` for the duration of a single prune
/// pass; the driver constructs a fresh instance per width.
pub struct SimpleNestedPruner<'a, W, O> {
    width: Width,
    inner: &'a mut W,
    outer: Option<&'a O>,
}

impl<'a, W, O> SimpleNestedPruner<'a, W, O>
where
    W: WidthGroupStorage,
    O: WidthGroupStorage,
{
    /// `outer` is `None` when no width-(w+1) group has ever been created:
    /// every row of `inner` is then trivially non-nested.
    pub fn new(width: Width, inner: &'a mut W, outer: Option<&'a O>) -> Self {
        SimpleNestedPruner { width, inner, outer }
    }
}

impl<W, O> NestedPruner for SimpleNestedPruner<'_, W, O>
where
    W: WidthGroupStorage,
    O: WidthGroupStorage,
{
    fn is_nested(&mut self, w: Width, r: RowId) -> Result<bool> {
        debug_assert_eq!(
            w, self.width,
            "pruner instance is scoped to a single width"
        );

        let (c_r, g_r, flag) = {
            let (c, g, f) = self.inner.get(r)?;
            (c.clone(), g.clone(), f)
        };
        if flag.is_decided() {
            return Ok(flag.is_nested());
        }

        let outer = match self.outer {
            None => {
                self.inner.set_nested(r, NestedFlag::NonNested)?;
                return Ok(false);
            }
            Some(o) => o,
        };

        for i in 0..outer.depth(true) {
            let (c_o, g_o, _) = outer.get(RowId(i))?;
            if g_r.is_subset_of(g_o)? && c_r.is_ordered_subset(c_o)? {
                self.inner.set_nested(r, NestedFlag::Nested)?;
                return Ok(true);
            }
        }

        self.inner.set_nested(r, NestedFlag::NonNested)?;
        Ok(false)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
