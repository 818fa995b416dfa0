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

//! The programmatic driver surface: seed, grow, and prune a full run over a
//! rank-coded matrix, then query the resulting biclusters. No CLI or
//! argument parsing lives here; a binary wiring this up to a command line is
//! left to downstream consumers.

mod sequential;

pub use sequential::SequentialDriver;

use std::fmt;

use crate::common::{RowId, Width};
use crate::error::Result;
use crate::ordered_bitset::OrderedBitSet;
use crate::{bitset::BitSet, common::NestedFlag};

/// Numeric knobs for one run. Construction-time, immutable for the life of
/// the driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Minimum gene-set size for a bicluster to be retained at any stage.
    pub min_genes: usize,
    /// Use doubling mode (`k = h`) instead of step mode (`k = 2`) for every
    /// chaining pass after the first. The first pass always chains width 2
    /// against width 2 in step mode regardless of this flag.
    pub enable_doubling: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        }
    }
}

/// Create/open a GEM, run the full seed/chain/prune pipeline, and query the
/// resulting biclusters. Implementations own both the width-group pools and
/// the persistent node store backing them.
pub trait Driver {
    /// Runs seeding, the full chain-width sweep, and the final prune sweep.
    /// Idempotent-unsafe: intended to be called exactly once per instance.
    fn run(&mut self) -> Result<()>;

    /// Row count for `width`, optionally excluding rows flagged nested.
    /// Fails with `NotFound` if no group was ever created at that width.
    fn depth(&self, width: Width, include_nested: bool) -> Result<usize>;

    /// Reads back one bicluster by `(width, row)`.
    fn bicluster(&self, width: Width, row: RowId) -> Result<(OrderedBitSet, BitSet, NestedFlag)>;

    /// A per-width total/non-nested count table.
    fn stats_report(&self) -> StatsReport;
}

/// Per-width total and non-nested row counts, in ascending width order.
#[derive(Debug, Clone, Default)]
pub struct StatsReport {
    pub rows: Vec<(Width, usize, usize)>,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6}  {:>10}  {:>12}", "width", "total", "non-nested")?;
        for &(w, total, non_nested) in &self.rows {
            writeln!(f, "{w:>6}  {total:>10}  {non_nested:>12}")?;
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
