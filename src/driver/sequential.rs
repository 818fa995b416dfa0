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

//! The sequential (single-threaded) driver. A parallel variant could sit
//! alongside this one later, mirroring the split between a sequential and a
//! parallel solver elsewhere in this family of crates; nothing here assumes
//! single-threaded execution beyond the absence of a `Send`/`Sync` bound.

use std::collections::HashMap;

use crate::abstraction::{
    Cancellation, NestedPruner, NoCancellation, NoProgress, NodeStore, ProgressSink,
    WidthGroupCache, WidthGroupStorage,
};
use crate::bitset::BitSet;
use crate::combinatorics::ConditionPairs;
use crate::common::{ChainMode, ConditionId, NestedFlag, RowId, Width};
use crate::error::{Error, Result};
use crate::implementation::cache::LruWidthCache;
use crate::implementation::chaining::{chain, ChainCounters, ChainOutcome};
use crate::implementation::index::VecLinkIndex;
use crate::implementation::nested::SimpleNestedPruner;
use crate::implementation::pool::VecWidthGroupStorage;
use crate::ordered_bitset::OrderedBitSet;

use super::{Driver, StatsReport};

type Pools = HashMap<Width, VecWidthGroupStorage, fxhash::FxBuildHasher>;
type Indices = HashMap<Width, VecLinkIndex, fxhash::FxBuildHasher>;

/// Runs the full seed/chain/prune pipeline over a rank-coded matrix,
/// keeping every width group resident in memory while mirroring each
/// append and nested-flag transition into a `NodeStore` for the on-disk
/// layout contract.
pub struct SequentialDriver<St, C = NoCancellation, P = NoProgress>
where
    St: NodeStore,
    C: Cancellation,
    P: ProgressSink,
{
    matrix: Vec<Vec<usize>>,
    max_genes: usize,
    max_conditions: usize,
    config: super::DriverConfig,
    store: St,
    cancellation: C,
    progress: P,
    pools: Pools,
    indices: Indices,
    cache: LruWidthCache<()>,
    counters: ChainCounters,
}

impl<St, C, P> SequentialDriver<St, C, P>
where
    St: NodeStore,
    C: Cancellation,
    P: ProgressSink,
{
    /// `matrix[g][c]` is the rank of condition `c` within gene `g`'s row, as
    /// produced by `crate::rank::rank_code`. Every row must have the same
    /// length.
    pub fn new(
        matrix: Vec<Vec<usize>>,
        config: super::DriverConfig,
        mut store: St,
        cancellation: C,
        progress: P,
    ) -> Result<Self> {
        let max_genes = matrix.len();
        let max_conditions = matrix.first().map_or(0, Vec::len);
        if matrix.iter().any(|row| row.len() != max_conditions) {
            return Err(Error::InvalidArgument(
                "matrix rows must all have the same length".into(),
            ));
        }

        store.create_group("", "biclusters")?;
        store.set_attribute("biclusters", "minGenes", vec![config.min_genes as i64])?;

        Ok(SequentialDriver {
            matrix,
            max_genes,
            max_conditions,
            config,
            store,
            cancellation,
            progress,
            pools: Pools::default(),
            indices: Indices::default(),
            cache: LruWidthCache::default(),
            counters: ChainCounters::default(),
        })
    }

    /// Advisory diagnostic counters accumulated by every chaining pass.
    pub fn counters(&self) -> &ChainCounters {
        &self.counters
    }

    fn group_path(width: Width) -> String {
        format!("biclusters/width{width}")
    }

    fn row_path(width: Width, row: RowId) -> String {
        format!("{}/row{}", Self::group_path(width), row.index())
    }

    fn ensure_group(&mut self, width: Width) -> Result<()> {
        if self.pools.contains_key(&width) {
            return Ok(());
        }
        self.store
            .create_group("biclusters", &format!("width{width}"))?;
        let path = Self::group_path(width);
        self.store
            .create_varlen_array(&format!("{path}/conditions/orders"))?;
        self.store
            .create_varlen_array(&format!("{path}/conditions/sets"))?;
        self.store.create_varlen_array(&format!("{path}/genes"))?;
        self.pools.insert(width, VecWidthGroupStorage::new());
        if let Some((evicted_width, ())) = self.cache.insert(width, ()) {
            tracing::trace!(evicted_width, "width-group cache evicted an entry");
        }
        Ok(())
    }

    fn persist_row(&mut self, width: Width, conditions: &OrderedBitSet, genes: &BitSet) -> Result<()> {
        let path = Self::group_path(width);
        let order_words: Vec<u64> = conditions.order().iter().map(|c| c.index() as u64).collect();
        self.store
            .append_varlen(&format!("{path}/conditions/orders"), order_words)?;
        self.store
            .append_varlen(&format!("{path}/conditions/sets"), conditions.set().words().to_vec())?;
        self.store
            .append_varlen(&format!("{path}/genes"), genes.words().to_vec())?;
        Ok(())
    }

    fn append_seed_row(&mut self, width: Width, conditions: OrderedBitSet, genes: BitSet) -> Result<()> {
        self.ensure_group(width)?;
        self.persist_row(width, &conditions, &genes)?;
        let row = self
            .pools
            .get_mut(&width)
            .expect("ensure_group just created this entry")
            .append(conditions, genes)?;
        self.store
            .set_attribute(&Self::row_path(width, row), "nested", vec![NestedFlag::Unknown as i64])?;
        Ok(())
    }

    fn persist_nested(&mut self, width: Width, row: RowId, flag: NestedFlag) -> Result<()> {
        self.store
            .set_attribute(&Self::row_path(width, row), "nested", vec![flag as i64])
    }

    #[tracing::instrument(skip(self))]
    fn seed(&mut self) -> Result<usize> {
        let total_pairs = crate::combinatorics::n_choose_k(self.max_conditions as u64, 2) as usize;
        self.progress.begin("seed", total_pairs);
        let mut appended = 0usize;

        for (a, b) in ConditionPairs::new(self.max_conditions) {
            if self.cancellation.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mut increasing = BitSet::empty(self.max_genes);
            for g in 0..self.max_genes {
                if self.matrix[g][a.index()] < self.matrix[g][b.index()] {
                    increasing.insert(g)?;
                }
            }

            if increasing.len() >= self.config.min_genes {
                let order = OrderedBitSet::new(self.max_conditions, vec![a, b])?;
                self.append_seed_row(2, order, increasing.clone())?;
                appended += 1;
            }

            if self.max_genes - increasing.len() >= self.config.min_genes {
                let mut decreasing = BitSet::empty(self.max_genes);
                for g in 0..self.max_genes {
                    if !increasing.contains(g) {
                        decreasing.insert(g)?;
                    }
                }
                let order = OrderedBitSet::new(self.max_conditions, vec![b, a])?;
                self.append_seed_row(2, order, decreasing)?;
                appended += 1;
            }

            self.progress.update("seed", appended);
        }

        self.progress.end("seed");
        self.store.flush()?;
        tracing::debug!(appended, "seed pass complete");
        Ok(appended)
    }

    /// Runs `chain(head_w, tail_w, c)` for every condition `c`, appending
    /// survivors to width `out_w` and applying opportunistic nesting.
    /// `head_w == tail_w` is the doubling case; `chain`'s immutable-borrow
    /// signature is what makes that safe even before this function's own
    /// remove-then-reinsert juggling of `self.pools`.
    #[tracing::instrument(skip(self))]
    fn chain_pass(&mut self, head_w: Width, tail_w: Width, out_w: Width, mode: ChainMode) -> Result<usize> {
        if out_w > self.max_conditions {
            self.counters.width_too_big += 1;
            return Ok(0);
        }
        if !self.pools.contains_key(&head_w) {
            self.counters.no_head_width += 1;
            return Ok(0);
        }
        if !self.pools.contains_key(&tail_w) {
            self.counters.no_tail_width += 1;
            return Ok(0);
        }

        {
            let pool = self.pools.get(&head_w).expect("checked above");
            let index = self
                .indices
                .entry(head_w)
                .or_insert_with(|| VecLinkIndex::new(self.max_conditions));
            index.rebuild(pool)?;
        }
        if tail_w != head_w {
            let pool = self.pools.get(&tail_w).expect("checked above");
            let index = self
                .indices
                .entry(tail_w)
                .or_insert_with(|| VecLinkIndex::new(self.max_conditions));
            index.rebuild(pool)?;
        }
        self.ensure_group(out_w)?;

        let mut head_pool = self.pools.remove(&head_w).expect("checked above");
        let tail_pool_owned: Option<VecWidthGroupStorage> = if head_w == tail_w {
            None
        } else {
            Some(self.pools.remove(&tail_w).expect("checked above"))
        };
        let mut out_pool = self.pools.remove(&out_w).expect("ensure_group just created it");

        let phase = format!("chain({head_w},{tail_w})");
        self.progress.begin(&phase, self.max_conditions);
        let mut outcome = ChainOutcome::default();

        for c in 0..self.max_conditions {
            if self.cancellation.is_cancelled() {
                self.pools.insert(head_w, head_pool);
                if let Some(tp) = tail_pool_owned {
                    self.pools.insert(tail_w, tp);
                }
                self.pools.insert(out_w, out_pool);
                return Err(Error::Cancelled);
            }

            let head_index = self.indices.get(&head_w).expect("rebuilt above");
            let tail_index = self.indices.get(&tail_w).expect("rebuilt above");
            let tail_ref: &VecWidthGroupStorage = tail_pool_owned.as_ref().unwrap_or(&head_pool);

            let link_outcome = chain(
                &head_pool,
                head_index,
                tail_ref,
                tail_index,
                ConditionId(c),
                &mut out_pool,
                mode,
                self.config.min_genes,
                &self.cancellation,
                &mut self.counters,
            )?;
            outcome.appended += link_outcome.appended;
            outcome.head_nested.extend(link_outcome.head_nested);
            outcome.tail_nested.extend(link_outcome.tail_nested);
            self.progress.update(&phase, c + 1);
        }
        self.progress.end(&phase);

        for &r in &outcome.head_nested {
            head_pool.set_nested(r, NestedFlag::Nested)?;
        }
        match tail_pool_owned {
            Some(mut tail_pool) => {
                for &r in &outcome.tail_nested {
                    tail_pool.set_nested(r, NestedFlag::Nested)?;
                }
                self.pools.insert(tail_w, tail_pool);
            }
            None => {
                for &r in &outcome.tail_nested {
                    head_pool.set_nested(r, NestedFlag::Nested)?;
                }
            }
        }
        self.pools.insert(head_w, head_pool);

        for row in 0..out_pool.len() {
            let row = RowId(row);
            let (conditions, genes, _) = out_pool.get(row)?;
            self.persist_row(out_w, conditions, genes)?;
            self.store
                .set_attribute(&Self::row_path(out_w, row), "nested", vec![NestedFlag::Unknown as i64])?;
        }
        for &r in &outcome.head_nested {
            self.persist_nested(head_w, r, NestedFlag::Nested)?;
        }
        for &r in &outcome.tail_nested {
            self.persist_nested(tail_w, r, NestedFlag::Nested)?;
        }
        self.pools.insert(out_w, out_pool);

        self.store.flush()?;
        tracing::debug!(head_w, tail_w, out_w, appended = outcome.appended, "chain pass complete");
        Ok(outcome.appended)
    }

    fn run_stepping(&mut self) -> Result<()> {
        let mut w = 2;
        while w + 1 <= self.max_conditions {
            let appended = self.chain_pass(w, 2, w + 1, ChainMode::Step)?;
            if appended == 0 {
                tracing::warn!(width = w, "chain produced no rows; halting width growth");
                break;
            }
            w += 1;
        }
        Ok(())
    }

    /// Builds every width from 3 up to `max_conditions` in order, same as
    /// `run_stepping`, but uses a doubling pass (`k = h`) wherever the next
    /// target width is exactly `2*half - 1` for some already-built `half`,
    /// falling back to a step pass otherwise. Building every width, rather
    /// than only the ones reachable by repeated doubling from {2,3}, is what
    /// makes the final non-nested counts match `run_stepping`'s: `prune`
    /// checks width `w` against width `w+1`, and a width that was never
    /// built is indistinguishable from one with nothing to nest against.
    fn run_doubling(&mut self) -> Result<()> {
        // h = 2 always uses step mode: doubling is disabled for the first pass.
        let appended = self.chain_pass(2, 2, 3, ChainMode::Step)?;
        if appended == 0 {
            tracing::warn!("chain produced no rows; halting width growth");
            return Ok(());
        }
        let mut w = 4;
        while w <= self.max_conditions {
            let appended = if w % 2 == 1 {
                let half = (w + 1) / 2;
                self.chain_pass(half, half, w, ChainMode::Doubling)?
            } else {
                self.chain_pass(w - 1, 2, w, ChainMode::Step)?
            };
            if appended == 0 {
                tracing::warn!(width = w, "chain produced no rows; halting width growth");
                break;
            }
            w += 1;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn prune(&mut self) -> Result<()> {
        let observed_max = self.pools.keys().copied().max().unwrap_or(1);
        for w in 2..observed_max {
            if !self.pools.contains_key(&w) {
                continue;
            }
            let mut inner = self.pools.remove(&w).expect("checked above");
            let outer = self.pools.remove(&(w + 1));

            let phase = format!("prune({w})");
            let depth = inner.depth(true);
            self.progress.begin(&phase, depth);

            let mut decided: Vec<(RowId, NestedFlag)> = Vec::new();
            {
                let mut pruner = SimpleNestedPruner::new(w, &mut inner, outer.as_ref());
                for i in 0..depth {
                    if self.cancellation.is_cancelled() {
                        self.pools.insert(w, inner);
                        if let Some(o) = outer {
                            self.pools.insert(w + 1, o);
                        }
                        return Err(Error::Cancelled);
                    }
                    let row = RowId(i);
                    let was_decided = inner.get(row)?.2.is_decided();
                    let nested = pruner.is_nested(w, row)?;
                    if !was_decided {
                        let flag = if nested {
                            NestedFlag::Nested
                        } else {
                            NestedFlag::NonNested
                        };
                        decided.push((row, flag));
                    }
                    self.progress.update(&phase, i + 1);
                }
            }
            self.progress.end(&phase);

            self.pools.insert(w, inner);
            if let Some(o) = outer {
                self.pools.insert(w + 1, o);
            }
            for (row, flag) in decided {
                self.persist_nested(w, row, flag)?;
            }
        }
        Ok(())
    }
}

impl<St, C, P> Driver for SequentialDriver<St, C, P>
where
    St: NodeStore,
    C: Cancellation,
    P: ProgressSink,
{
    #[tracing::instrument(skip(self))]
    fn run(&mut self) -> Result<()> {
        self.seed()?;
        if self.config.enable_doubling {
            self.run_doubling()?;
        } else {
            self.run_stepping()?;
        }
        self.prune()?;
        self.store.flush()?;
        Ok(())
    }

    fn depth(&self, width: Width, include_nested: bool) -> Result<usize> {
        self.pools
            .get(&width)
            .map(|pool| pool.depth(include_nested))
            .ok_or(Error::NotFound(width))
    }

    fn bicluster(&self, width: Width, row: RowId) -> Result<(OrderedBitSet, BitSet, NestedFlag)> {
        let pool = self.pools.get(&width).ok_or(Error::NotFound(width))?;
        let (conditions, genes, flag) = pool.get(row)?;
        Ok((conditions.clone(), genes.clone(), flag))
    }

    fn stats_report(&self) -> StatsReport {
        let mut rows: Vec<(Width, usize, usize)> = self
            .pools
            .iter()
            .map(|(&w, pool)| (w, pool.depth(true), pool.depth(false)))
            .collect();
        rows.sort_by_key(|&(w, _, _)| w);
        StatsReport { rows }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
