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

//! This module defines the most basic data types that are used throughout all
//! the code of this crate (both at the abstraction and implementation levels).

// ----------------------------------------------------------------------------
// --- CONDITION ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// Identifies one column of the gene expression matrix. Conditions are
/// numbered `0 .. maxConditions` and that numbering is fixed at GEM creation
/// time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ConditionId(pub usize);
impl ConditionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- GENE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// Identifies one row of the gene expression matrix. Genes are numbered
/// `0 .. maxGenes`, fixed at GEM creation time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeneId(pub usize);
impl GeneId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- WIDTH / ROW ----------------------------------------------------------
// ----------------------------------------------------------------------------
/// The width of a bicluster: the number of conditions in its ordered
/// condition sequence. Width groups are indexed by this value.
pub type Width = usize;

/// The position of a bicluster inside the append-only arrays of its width
/// group. Row indices are stable for the lifetime of a width group: once
/// appended, a row is never moved or deleted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RowId(pub usize);
impl RowId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- NESTED FLAG ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The nested/non-nested status of a bicluster. Written by the chaining
/// engine (opportunistic pruning) or by the nested pruner; never reset once
/// it leaves `Unknown`.
///
/// # Monotonicity
/// The only legal transitions are `Unknown -> Nested` and
/// `Unknown -> NonNested`. Both `Nested` and `NonNested` are terminal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum NestedFlag {
    /// Not yet classified by the pruner.
    #[default]
    Unknown,
    /// Strictly contained in some wider bicluster.
    Nested,
    /// Not contained in any wider bicluster.
    NonNested,
}
impl NestedFlag {
    /// True once the flag has left `Unknown`, irrespective of which way.
    #[inline]
    pub fn is_decided(self) -> bool {
        !matches!(self, NestedFlag::Unknown)
    }

    #[inline]
    pub fn is_nested(self) -> bool {
        matches!(self, NestedFlag::Nested)
    }
}

// ----------------------------------------------------------------------------
// --- CHAIN MODE ---------------------------------------------------------
// ----------------------------------------------------------------------------
/// Selects the redundancy test used by the chaining engine for an entire
/// `chain(h, k, c)` call. Chosen once per pass, never branched on per-row
/// (see `DESIGN.md`, "Dynamic dispatch on redundant-conditions predicate").
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChainMode {
    /// `k = 2`: grows any chain by exactly one condition. Used for the main
    /// width-increasing loop.
    Step,
    /// `k = h`: grows a chain by roughly doubling its width. Never used for
    /// `h = 2` (the driver disables it there).
    Doubling,
}

// ----------------------------------------------------------------------------
// --- TESTS --------------------------------------------------------------
// ----------------------------------------------------------------------------
#[cfg(test)]
mod test_common {
    use super::*;

    #[test]
    fn nested_flag_defaults_to_unknown() {
        assert_eq!(NestedFlag::default(), NestedFlag::Unknown);
        assert!(!NestedFlag::Unknown.is_decided());
        assert!(!NestedFlag::Unknown.is_nested());
    }

    #[test]
    fn nested_flag_decided_variants() {
        assert!(NestedFlag::Nested.is_decided());
        assert!(NestedFlag::Nested.is_nested());
        assert!(NestedFlag::NonNested.is_decided());
        assert!(!NestedFlag::NonNested.is_nested());
    }

    #[test]
    fn ids_expose_their_index() {
        assert_eq!(3, ConditionId(3).index());
        assert_eq!(7, GeneId(7).index());
        assert_eq!(2, RowId(2).index());
    }
}
