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

//! Builds `heads[c]` / `tails[c]` for one width group in a single sequential
//! pass over its rows.

use crate::abstraction::{LinkIndex, WidthGroupStorage};
use crate::common::{ConditionId, RowId};
use crate::error::Result;

/// A `Vec`-of-`Vec` link index over a fixed condition universe.
pub struct VecLinkIndex {
    heads: Vec<Vec<RowId>>,
    tails: Vec<Vec<RowId>>,
    indexed_rows: usize,
}

impl VecLinkIndex {
    pub fn new(num_conditions: usize) -> Self {
        VecLinkIndex {
            heads: vec![Vec::new(); num_conditions],
            tails: vec![Vec::new(); num_conditions],
            indexed_rows: 0,
        }
    }

    /// Rebuilds the index from scratch against the current contents of
    /// `pool`. Must be called again after any new row is appended to `pool`
    /// and before the next chaining pass that consumes it.
    pub fn rebuild<S: WidthGroupStorage + ?Sized>(&mut self, pool: &S) -> Result<()> {
        for bucket in self.heads.iter_mut() {
            bucket.clear();
        }
        for bucket in self.tails.iter_mut() {
            bucket.clear();
        }

        let depth = pool.depth(true);
        for i in 0..depth {
            let row = RowId(i);
            let (conditions, _, _) = pool.get(row)?;
            self.heads[conditions.head_condition().index()].push(row);
            self.tails[conditions.tail_condition().index()].push(row);
        }
        self.indexed_rows = depth;
        Ok(())
    }
}

impl LinkIndex for VecLinkIndex {
    fn heads(&self, c: ConditionId) -> &[RowId] {
        &self.heads[c.index()]
    }

    fn tails(&self, c: ConditionId) -> &[RowId] {
        &self.tails[c.index()]
    }

    fn indexed_rows(&self) -> usize {
        self.indexed_rows
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_link_index {
    use super::*;
    use crate::bitset::BitSet;
    use crate::implementation::pool::VecWidthGroupStorage;
    use crate::ordered_bitset::OrderedBitSet;

    fn ob(order: &[usize]) -> OrderedBitSet {
        OrderedBitSet::new(4, order.iter().map(|&c| ConditionId(c)).collect()).unwrap()
    }

    #[test]
    fn rebuild_buckets_rows_by_head_and_tail_condition() {
        let mut pool = VecWidthGroupStorage::new();
        let g = BitSet::from_members(4, [0]).unwrap();
        let r0 = pool.append(ob(&[0, 1]), g.clone()).unwrap();
        let r1 = pool.append(ob(&[2, 1]), g).unwrap();

        let mut index = VecLinkIndex::new(4);
        index.rebuild(&pool).unwrap();

        assert_eq!(&[r0, r1], index.heads(ConditionId(1)));
        assert_eq!(&[r0][..], index.tails(ConditionId(0)));
        assert_eq!(&[r1][..], index.tails(ConditionId(2)));
        assert!(index.heads(ConditionId(0)).is_empty());
        assert_eq!(2, index.indexed_rows());
    }

    #[test]
    fn rebuild_clears_stale_entries_from_a_prior_build() {
        let mut pool = VecWidthGroupStorage::new();
        let g = BitSet::from_members(4, [0]).unwrap();
        pool.append(ob(&[0, 1]), g.clone()).unwrap();

        let mut index = VecLinkIndex::new(4);
        index.rebuild(&pool).unwrap();
        assert_eq!(1, index.heads(ConditionId(1)).len());

        pool.append(ob(&[2, 3]), g).unwrap();
        index.rebuild(&pool).unwrap();
        assert_eq!(1, index.heads(ConditionId(1)).len());
        assert_eq!(1, index.heads(ConditionId(3)).len());
    }
}
