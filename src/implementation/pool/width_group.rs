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

//! The live, in-process pool backing one width group: three parallel
//! `Vec`s indexed by `RowId`. This is the structure the chaining engine and
//! pruner operate on directly during a run; `crate::implementation::store`
//! is the separate persistence layer used to save and reload a pool.

use crate::abstraction::WidthGroupStorage;
use crate::bitset::BitSet;
use crate::common::{NestedFlag, RowId};
use crate::error::{Error, Result};
use crate::ordered_bitset::OrderedBitSet;

/// `Vec`-backed `WidthGroupStorage`. Rows are appended in order and never
/// removed; `nested[r]` is the only element ever mutated after append.
#[derive(Default)]
pub struct VecWidthGroupStorage {
    conditions: Vec<OrderedBitSet>,
    genes: Vec<BitSet>,
    nested: Vec<NestedFlag>,
}

impl VecWidthGroupStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WidthGroupStorage for VecWidthGroupStorage {
    fn append(&mut self, conditions: OrderedBitSet, genes: BitSet) -> Result<RowId> {
        let row = RowId(self.conditions.len());
        self.conditions.push(conditions);
        self.genes.push(genes);
        self.nested.push(NestedFlag::Unknown);
        Ok(row)
    }

    fn get(&self, row: RowId) -> Result<(&OrderedBitSet, &BitSet, NestedFlag)> {
        let i = row.index();
        if i >= self.conditions.len() {
            return Err(Error::NotFound(i));
        }
        Ok((&self.conditions[i], &self.genes[i], self.nested[i]))
    }

    fn depth(&self, include_nested: bool) -> usize {
        if include_nested {
            self.nested.len()
        } else {
            self.nested.iter().filter(|f| !f.is_nested()).count()
        }
    }

    fn set_nested(&mut self, row: RowId, flag: NestedFlag) -> Result<()> {
        let i = row.index();
        if i >= self.nested.len() {
            return Err(Error::NotFound(i));
        }
        self.nested[i] = flag;
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
