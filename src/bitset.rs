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

//! A fixed-universe bit-vector with the small algebra the engine needs:
//! union, intersection, subset, popcount, membership, and the two
//! specialized predicates (`is_singleton_intersection`, `where_not`) that
//! the chaining engine and the link index lean on to avoid materializing
//! intermediate sets.

use crate::error::{Error, Result};

const WORD_BITS: usize = u64::BITS as usize;

/// A set over a fixed universe `{0 .. universe}`, stored as
/// `ceil(universe / 64)` words. Bits at position `>= universe` are always
/// zero; every constructor and mutator upholds that invariant so that
/// word-wise comparisons (`==`, subset) never need to mask the last word.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BitSet {
    universe: usize,
    words: Vec<u64>,
}

impl BitSet {
    /// Creates an empty set over the given universe size.
    pub fn empty(universe: usize) -> Self {
        BitSet {
            universe,
            words: vec![0u64; Self::word_count(universe)],
        }
    }

    /// Creates a set containing every member of `iter`. Fails with
    /// `InvalidArgument` if any member is `>= universe`.
    pub fn from_members<I: IntoIterator<Item = usize>>(universe: usize, iter: I) -> Result<Self> {
        let mut set = Self::empty(universe);
        for member in iter {
            set.insert(member)?;
        }
        Ok(set)
    }

    /// Creates a set from an already-packed word buffer. `trusted` must be
    /// `true` only when the caller guarantees bits `>= universe` in the last
    /// word are clear; otherwise the tail is masked off explicitly.
    pub fn from_words(universe: usize, mut words: Vec<u64>, trusted: bool) -> Result<Self> {
        let expected = Self::word_count(universe);
        if words.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "expected {expected} words for universe {universe}, got {}",
                words.len()
            )));
        }
        if !trusted {
            if let Some(last) = words.last_mut() {
                let used_bits = universe % WORD_BITS;
                if used_bits != 0 {
                    let mask = (1u64 << used_bits) - 1;
                    *last &= mask;
                }
            }
        }
        Ok(BitSet { universe, words })
    }

    #[inline]
    fn word_count(universe: usize) -> usize {
        universe.div_ceil(WORD_BITS)
    }

    /// The universe size this set was created over.
    #[inline]
    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Read-only access to the packed words, for persistence.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn check_same_universe(&self, other: &BitSet) -> Result<()> {
        if self.universe != other.universe {
            Err(Error::InvalidArgument(format!(
                "universe mismatch: {} vs {}",
                self.universe, other.universe
            )))
        } else {
            Ok(())
        }
    }

    /// Sets `member`'s bit. Fails with `InvalidArgument` if `member >=
    /// universe`.
    pub fn insert(&mut self, member: usize) -> Result<()> {
        if member >= self.universe {
            return Err(Error::InvalidArgument(format!(
                "member {member} out of universe {}",
                self.universe
            )));
        }
        self.words[member / WORD_BITS] |= 1u64 << (member % WORD_BITS);
        Ok(())
    }

    /// Returns true iff `member` is a member of this set.
    #[inline]
    pub fn contains(&self, member: usize) -> bool {
        if member >= self.universe {
            return false;
        }
        (self.words[member / WORD_BITS] >> (member % WORD_BITS)) & 1 == 1
    }

    /// `|S|`, the number of members, by popcount across words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// `self ∪ other`.
    pub fn union(&self, other: &BitSet) -> Result<BitSet> {
        self.check_same_universe(other)?;
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a | b)
            .collect();
        Ok(BitSet {
            universe: self.universe,
            words,
        })
    }

    /// `self ∩ other`.
    pub fn intersection(&self, other: &BitSet) -> Result<BitSet> {
        self.check_same_universe(other)?;
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Ok(BitSet {
            universe: self.universe,
            words,
        })
    }

    /// `self ⊆ other`, computed word-wise as `(a & ~b) == 0` for every word.
    pub fn is_subset_of(&self, other: &BitSet) -> Result<bool> {
        self.check_same_universe(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| (a & !b) == 0))
    }

    /// True iff `self ∩ other == { x }` exactly: `x` must be set in both
    /// operands, and the intersection as a whole must have no other member.
    /// Implemented without materializing the intersection: only the word
    /// containing `x` is allowed to be non-zero, and it must equal the
    /// single bit for `x`.
    pub fn is_singleton_intersection(&self, other: &BitSet, x: usize) -> Result<bool> {
        self.check_same_universe(other)?;
        if x >= self.universe || !self.contains(x) || !other.contains(x) {
            return Ok(false);
        }
        let x_word = x / WORD_BITS;
        let x_bit = 1u64 << (x % WORD_BITS);
        for (i, (a, b)) in self.words.iter().zip(other.words.iter()).enumerate() {
            let w = a & b;
            if i == x_word {
                if w != x_bit {
                    return Ok(false);
                }
            } else if w != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Filters a slice of sets (all sharing this universe), returning the
    /// indices of those whose bit `x` is clear. Used to cheaply filter many
    /// rows at once without building an intersection for each.
    pub fn where_not(sets: &[BitSet], x: usize) -> Vec<usize> {
        sets.iter()
            .enumerate()
            .filter(|(_, s)| !s.contains(x))
            .map(|(i, _)| i)
            .collect()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_bitset {
    use super::*;

    #[test]
    fn empty_has_no_members() {
        let s = BitSet::empty(10);
        assert_eq!(0, s.len());
        assert!(s.is_empty());
        for i in 0..10 {
            assert!(!s.contains(i));
        }
    }

    #[test]
    fn from_members_sets_the_right_bits() {
        let s = BitSet::from_members(10, [1, 3, 7]).unwrap();
        assert_eq!(3, s.len());
        assert!(s.contains(1));
        assert!(s.contains(3));
        assert!(s.contains(7));
        assert!(!s.contains(0));
        assert!(!s.contains(9));
    }

    #[test]
    fn insert_rejects_out_of_universe_members() {
        let mut s = BitSet::empty(4);
        assert!(s.insert(3).is_ok());
        assert!(matches!(s.insert(4), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn union_and_intersection() {
        let a = BitSet::from_members(8, [0, 1, 2]).unwrap();
        let b = BitSet::from_members(8, [2, 3, 4]).unwrap();
        let u = a.union(&b).unwrap();
        let i = a.intersection(&b).unwrap();
        assert_eq!(5, u.len());
        assert_eq!(1, i.len());
        assert!(i.contains(2));
    }

    #[test]
    fn operations_reject_universe_mismatch() {
        let a = BitSet::empty(8);
        let b = BitSet::empty(9);
        assert!(matches!(a.union(&b), Err(Error::InvalidArgument(_))));
        assert!(matches!(a.intersection(&b), Err(Error::InvalidArgument(_))));
        assert!(matches!(a.is_subset_of(&b), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn subset() {
        let a = BitSet::from_members(8, [1, 2]).unwrap();
        let b = BitSet::from_members(8, [1, 2, 3]).unwrap();
        assert!(a.is_subset_of(&b).unwrap());
        assert!(!b.is_subset_of(&a).unwrap());
        assert!(a.is_subset_of(&a).unwrap());
    }

    #[test]
    fn singleton_intersection_true_case() {
        let a = BitSet::from_members(16, [1, 5, 9]).unwrap();
        let b = BitSet::from_members(16, [5, 10]).unwrap();
        assert!(a.is_singleton_intersection(&b, 5).unwrap());
    }

    #[test]
    fn singleton_intersection_false_when_more_than_one_shared() {
        let a = BitSet::from_members(16, [1, 5, 9]).unwrap();
        let b = BitSet::from_members(16, [5, 9, 10]).unwrap();
        assert!(!a.is_singleton_intersection(&b, 5).unwrap());
    }

    #[test]
    fn singleton_intersection_false_when_candidate_not_shared() {
        let a = BitSet::from_members(16, [1, 5]).unwrap();
        let b = BitSet::from_members(16, [2, 5]).unwrap();
        assert!(!a.is_singleton_intersection(&b, 1).unwrap());
    }

    #[test]
    fn singleton_intersection_spans_a_word_boundary() {
        // universe > 64 forces the candidate and a spoiler bit into
        // different words; the spoiler must still be detected.
        let a = BitSet::from_members(128, [63, 70]).unwrap();
        let b = BitSet::from_members(128, [63, 70]).unwrap();
        assert!(!a.is_singleton_intersection(&b, 63).unwrap());
        assert!(a.is_singleton_intersection(&BitSet::from_members(128, [63]).unwrap(), 63).unwrap());
    }

    #[test]
    fn where_not_filters_by_cleared_bit() {
        let sets = vec![
            BitSet::from_members(8, [1, 2]).unwrap(),
            BitSet::from_members(8, [2, 3]).unwrap(),
            BitSet::from_members(8, [1]).unwrap(),
        ];
        assert_eq!(vec![1, 2], BitSet::where_not(&sets, 1));
    }

    #[test]
    fn from_words_masks_untrusted_tail() {
        // universe 4 means only the low 4 bits of the single word are valid;
        // an untrusted buffer with garbage above that must be masked off.
        let s = BitSet::from_words(4, vec![0b1111_0110], false).unwrap();
        assert_eq!(3, s.len());
        assert!(s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(3));
    }

    #[test]
    fn from_words_rejects_wrong_length() {
        let err = BitSet::from_words(128, vec![0u64], false);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn equality_is_bitwise() {
        let a = BitSet::from_members(8, [1, 2, 3]).unwrap();
        let b = BitSet::from_members(8, [3, 2, 1]).unwrap();
        assert_eq!(a, b);
    }
}
