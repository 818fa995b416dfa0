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

//! A `BitSet` paired with the ordered sequence of its members: the
//! condition pattern of a bicluster. The order carries direction, so
//! `[3,1,4]` and `[4,1,3]` are different `OrderedBitSet`s even though they
//! contain the same set of conditions.

use crate::bitset::BitSet;
use crate::common::ConditionId;
use crate::error::{Error, Result};

/// An ordered, duplicate-free sequence of conditions together with the
/// `BitSet` of the same elements. Invariant: `set.len() == order.len()` and
/// every element of `order` has its bit set in `set`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderedBitSet {
    order: Vec<ConditionId>,
    set: BitSet,
}

impl OrderedBitSet {
    /// Builds an `OrderedBitSet` from an explicit order over the given
    /// universe. Fails with `InvalidArgument` if `order` repeats an
    /// element.
    pub fn new(universe: usize, order: Vec<ConditionId>) -> Result<Self> {
        let mut set = BitSet::empty(universe);
        for &c in &order {
            if set.contains(c.index()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate condition {} in ordered set",
                    c.index()
                )));
            }
            set.insert(c.index())?;
        }
        Ok(OrderedBitSet { order, set })
    }

    /// Builds an `OrderedBitSet` from an order and an already-computed set
    /// of the same elements, skipping the duplicate check. Used internally
    /// by `chain`, which constructs both consistently.
    fn new_unchecked(order: Vec<ConditionId>, set: BitSet) -> Self {
        OrderedBitSet { order, set }
    }

    /// The ordered sequence of conditions.
    #[inline]
    pub fn order(&self) -> &[ConditionId] {
        &self.order
    }

    /// The (unordered) `BitSet` of the same conditions.
    #[inline]
    pub fn set(&self) -> &BitSet {
        &self.set
    }

    /// `|C|`, the width of this ordered set.
    #[inline]
    pub fn width(&self) -> usize {
        self.order.len()
    }

    /// The head of the order: `order[0]`, the condition a chain tail starts
    /// from.
    #[inline]
    pub fn tail_condition(&self) -> ConditionId {
        self.order[0]
    }

    /// The last condition of the order: `order[len-1]`, the condition a
    /// chain head ends at.
    #[inline]
    pub fn head_condition(&self) -> ConditionId {
        self.order[self.order.len() - 1]
    }

    /// Reverses the order, reusing the underlying set (membership is
    /// direction-independent).
    pub fn reverse(&self) -> Self {
        let mut order = self.order.clone();
        order.reverse();
        OrderedBitSet::new_unchecked(order, self.set.clone())
    }

    /// Chains `self` with `tail`, producing the `OrderedBitSet` for
    /// `self.order ++ tail.order[1..]`.
    ///
    /// Requires `self.head_condition() == tail.tail_condition()` (the two
    /// share a single link condition, `self`'s head and `tail`'s tail) and
    /// that this is their *only* shared condition. Fails with
    /// `PreconditionViolation` otherwise.
    pub fn chain(&self, tail: &OrderedBitSet) -> Result<OrderedBitSet> {
        let link = self.head_condition();
        if tail.tail_condition() != link {
            return Err(Error::PreconditionViolation(format!(
                "chain: head's last condition {:?} does not match tail's first condition {:?}",
                link,
                tail.tail_condition()
            )));
        }
        if !self.set.is_singleton_intersection(&tail.set, link.index())? {
            return Err(Error::PreconditionViolation(format!(
                "chain: shared conditions between head and tail are not exactly the link {:?}",
                link
            )));
        }

        let mut order = self.order.clone();
        order.extend_from_slice(&tail.order[1..]);
        let set = self.set.union(&tail.set)?;
        Ok(OrderedBitSet::new_unchecked(order, set))
    }

    /// `self.set ⊆ superset.set` AND `self.order` appears as a (not
    /// necessarily contiguous) subsequence of `superset.order`.
    ///
    /// Runs in `O(|superset.order|)` using a single forward cursor: for each
    /// element of `self.order`, the cursor advances past the first
    /// occurrence of that element in `superset.order` at or after its
    /// current position. If no such occurrence exists, the scan fails.
    pub fn is_ordered_subset(&self, superset: &OrderedBitSet) -> Result<bool> {
        if !self.set.is_subset_of(&superset.set)? {
            return Ok(false);
        }

        let mut cursor = 0usize;
        for &condition in &self.order {
            match superset.order[cursor..].iter().position(|&c| c == condition) {
                Some(offset) => cursor += offset + 1,
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
