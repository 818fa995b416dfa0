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

//! The central algorithm: grows width-(h+k-1) biclusters from width-h x
//! width-k pairs sharing exactly one link condition. `chain` only reads
//! `head` and `tail`; it returns which rows turned out to be subsumed by
//! their merged child so the caller can apply `set_nested` once the
//! borrowing this function did is over. That split matters because `head`
//! and `tail` may be the very same width group (the first chaining pass
//! chains width 2 against width 2), which would otherwise need two live
//! mutable borrows of one store at once.

use crate::abstraction::{Cancellation, LinkIndex, WidthGroupStorage};
use crate::common::{ChainMode, ConditionId, RowId};
use crate::error::Result;

/// Monotonic, advisory diagnostic counters. Never consulted by control flow;
/// tests may assert on them but production behavior must not depend on
/// them. Mirrors the seven counters named in the specification; the
/// "superset" reading is taken where the original source's two variants
/// disagreed on which counters to keep.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainCounters {
    pub width_too_big: u64,
    pub no_head_width: u64,
    pub no_head_link: u64,
    pub no_tail_width: u64,
    pub no_tail_link: u64,
    pub redundant_condition: u64,
    pub insufficient_genes: u64,
}

/// What one `chain` call produced: how many rows were appended to the
/// output width group, and which head/tail rows were opportunistically
/// subsumed by a merged child (total gene-set overlap on both sides).
#[derive(Debug, Default, Clone)]
pub struct ChainOutcome {
    pub appended: usize,
    pub head_nested: Vec<RowId>,
    pub tail_nested: Vec<RowId>,
}

/// Runs `chain(head, tail, link)` per SPEC_FULL.md §4.6, appending every
/// qualifying merge to `out`.
///
/// Preconditions: `head_index`/`tail_index` were built since the last
/// append to their respective width groups. Checked up front via
/// `LinkIndex::indexed_rows` against the live row count, failing with
/// `PreconditionViolation` rather than silently treating a stale or
/// never-built index as empty.
#[allow(clippy::too_many_arguments)]
pub fn chain<HS, TS, OS>(
    head: &HS,
    head_index: &dyn LinkIndex,
    tail: &TS,
    tail_index: &dyn LinkIndex,
    link: ConditionId,
    out: &mut OS,
    mode: ChainMode,
    min_genes: usize,
    cancellation: &dyn Cancellation,
    counters: &mut ChainCounters,
) -> Result<ChainOutcome>
where
    HS: WidthGroupStorage,
    TS: WidthGroupStorage,
    OS: WidthGroupStorage,
{
    let mut outcome = ChainOutcome::default();

    if head_index.indexed_rows() != head.len() {
        return Err(crate::error::Error::PreconditionViolation(format!(
            "head link index is stale: indexed {} rows but the head width group has {}",
            head_index.indexed_rows(),
            head.len()
        )));
    }
    if tail_index.indexed_rows() != tail.len() {
        return Err(crate::error::Error::PreconditionViolation(format!(
            "tail link index is stale: indexed {} rows but the tail width group has {}",
            tail_index.indexed_rows(),
            tail.len()
        )));
    }

    let heads = head_index.heads(link);
    if heads.is_empty() {
        counters.no_head_link += 1;
        return Ok(outcome);
    }
    let tails = tail_index.tails(link);
    if tails.is_empty() {
        counters.no_tail_link += 1;
        return Ok(outcome);
    }

    for &r_h in heads {
        if cancellation.is_cancelled() {
            return Err(crate::error::Error::Cancelled);
        }
        let (c_h, g_h, _) = head.get(r_h)?;

        for &r_t in tails {
            let (c_t, g_t, _) = tail.get(r_t)?;

            let redundant = match mode {
                // Only the non-link tail element could collide with the
                // head, since C_t.order[0] == link == C_h.head_condition().
                ChainMode::Step => c_h.set().contains(c_t.head_condition().index()),
                ChainMode::Doubling => {
                    !c_h.set().is_singleton_intersection(c_t.set(), link.index())?
                }
            };
            if redundant {
                counters.redundant_condition += 1;
                continue;
            }

            let g = g_h.intersection(g_t)?;
            if g.len() < min_genes {
                counters.insufficient_genes += 1;
                continue;
            }

            let total_h = g_h.len();
            let total_t = g_t.len();
            let g_len = g.len();
            let c = c_h.chain(c_t)?;
            out.append(c, g)?;
            outcome.appended += 1;

            if g_len == total_h && g_len == total_t {
                outcome.head_nested.push(r_h);
                outcome.tail_nested.push(r_t);
            }
        }
    }

    Ok(outcome)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_engine {
    use super::*;
    use crate::abstraction::NoCancellation;
    use crate::bitset::BitSet;
    use crate::implementation::index::VecLinkIndex;
    use crate::implementation::pool::VecWidthGroupStorage;
    use crate::ordered_bitset::OrderedBitSet;

    fn ob(order: &[usize]) -> OrderedBitSet {
        OrderedBitSet::new(8, order.iter().map(|&c| ConditionId(c)).collect()).unwrap()
    }

    #[test]
    fn step_mode_chains_non_redundant_pairs_and_flags_total_overlap() {
        // head: width-2 (0,1) with genes {0,1}; tail: width-2 (1,2) with
        // genes {0,1} too, so the merge is total on both sides.
        let mut head = VecWidthGroupStorage::new();
        let r_h = head
            .append(ob(&[0, 1]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();
        let mut tail = VecWidthGroupStorage::new();
        let r_t = tail
            .append(ob(&[1, 2]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();

        let mut head_index = VecLinkIndex::new(4);
        head_index.rebuild(&head).unwrap();
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let outcome = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(1),
            &mut out,
            ChainMode::Step,
            1,
            &NoCancellation,
            &mut counters,
        )
        .unwrap();

        assert_eq!(1, outcome.appended);
        assert_eq!(1, out.len());
        assert_eq!(vec![r_h], outcome.head_nested);
        assert_eq!(vec![r_t], outcome.tail_nested);
    }

    #[test]
    fn step_mode_skips_redundant_tail_condition() {
        let mut head = VecWidthGroupStorage::new();
        head.append(ob(&[0, 1]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();
        let mut tail = VecWidthGroupStorage::new();
        // tail's non-link element (0) already appears in head -> redundant.
        tail.append(ob(&[1, 0]), BitSet::from_members(4, [0]).unwrap())
            .unwrap();

        let mut head_index = VecLinkIndex::new(4);
        head_index.rebuild(&head).unwrap();
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let outcome = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(1),
            &mut out,
            ChainMode::Step,
            1,
            &NoCancellation,
            &mut counters,
        )
        .unwrap();

        assert_eq!(0, outcome.appended);
        assert_eq!(1, counters.redundant_condition);
    }

    #[test]
    fn insufficient_gene_overlap_is_skipped_and_counted() {
        let mut head = VecWidthGroupStorage::new();
        head.append(ob(&[0, 1]), BitSet::from_members(4, [0]).unwrap())
            .unwrap();
        let mut tail = VecWidthGroupStorage::new();
        tail.append(ob(&[1, 2]), BitSet::from_members(4, [1]).unwrap())
            .unwrap();

        let mut head_index = VecLinkIndex::new(4);
        head_index.rebuild(&head).unwrap();
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let outcome = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(1),
            &mut out,
            ChainMode::Step,
            1,
            &NoCancellation,
            &mut counters,
        )
        .unwrap();

        assert_eq!(0, outcome.appended);
        assert_eq!(1, counters.insufficient_genes);
    }

    #[test]
    fn missing_link_on_either_side_short_circuits() {
        let head = VecWidthGroupStorage::new();
        let tail = VecWidthGroupStorage::new();
        let mut head_index = VecLinkIndex::new(4);
        head_index.rebuild(&head).unwrap();
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let outcome = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(0),
            &mut out,
            ChainMode::Step,
            1,
            &NoCancellation,
            &mut counters,
        )
        .unwrap();

        assert_eq!(0, outcome.appended);
        assert_eq!(1, counters.no_head_link);
    }

    #[test]
    fn stale_head_index_is_a_precondition_violation() {
        let mut head = VecWidthGroupStorage::new();
        head.append(ob(&[0, 1]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();
        let mut tail = VecWidthGroupStorage::new();
        tail.append(ob(&[1, 2]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();

        // head_index is never rebuilt: it reports 0 indexed rows although
        // head now holds 1.
        let head_index = VecLinkIndex::new(4);
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let result = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(1),
            &mut out,
            ChainMode::Step,
            1,
            &NoCancellation,
            &mut counters,
        );

        assert!(matches!(result, Err(crate::error::Error::PreconditionViolation(_))));
    }

    #[test]
    fn doubling_mode_rejects_any_extra_shared_condition() {
        let mut head = VecWidthGroupStorage::new();
        head.append(ob(&[0, 2, 1]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();
        let mut tail = VecWidthGroupStorage::new();
        // shares both condition 1 (link) and condition 0 with head.
        tail.append(ob(&[1, 3, 0]), BitSet::from_members(4, [0, 1]).unwrap())
            .unwrap();

        let mut head_index = VecLinkIndex::new(4);
        head_index.rebuild(&head).unwrap();
        let mut tail_index = VecLinkIndex::new(4);
        tail_index.rebuild(&tail).unwrap();

        let mut out = VecWidthGroupStorage::new();
        let mut counters = ChainCounters::default();
        let outcome = chain(
            &head,
            &head_index,
            &tail,
            &tail_index,
            ConditionId(1),
            &mut out,
            ChainMode::Doubling,
            1,
            &NoCancellation,
            &mut counters,
        )
        .unwrap();

        assert_eq!(0, outcome.appended);
        assert_eq!(1, counters.redundant_condition);
    }
}
