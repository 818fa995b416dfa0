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

//! # biclustering
//!
//! Enumerates every maximal order-preserving bicluster in a gene expression
//! matrix: given a matrix of genes (rows) by conditions (columns), a
//! bicluster is a pair `(C, G)` of an ordered sequence of conditions and a
//! set of genes such that every gene in `G`, projected onto the conditions
//! of `C` in that order, is strictly increasing.
//!
//! The crate is organized leaf-first:
//! - [`bitset`] / [`ordered_bitset`] — the set algebra biclusters are built
//!   from.
//! - [`abstraction`] — the traits the engine is written against (storage,
//!   indexing, caching, pruning, cancellation, progress, the persistent
//!   container).
//! - [`implementation`] — the in-memory, single-process realizations of
//!   those traits.
//! - [`driver`] — the seed/chain/prune pipeline tying everything together
//!   into a runnable, queryable pipeline.
//!
//! `rank` and `combinatorics` are small standalone pieces of the ambient
//! stack: turning a raw real-valued matrix into the rank-coded matrix the
//! core consumes, and enumerating the unordered condition pairs used to
//! seed width-2 biclusters.
//!
//! ## Example
//! ```
//! use biclustering::driver::{Driver, DriverConfig, SequentialDriver};
//! use biclustering::implementation::store::InMemoryStore;
//! use biclustering::abstraction::{NoCancellation, NoProgress};
//!
//! // Every gene's expression strictly increases across all four conditions.
//! let matrix = vec![vec![0, 1, 2, 3]; 4];
//! let config = DriverConfig { min_genes: 1, enable_doubling: false };
//! let mut driver = SequentialDriver::new(
//!     matrix, config, InMemoryStore::new(), NoCancellation, NoProgress,
//! ).unwrap();
//! driver.run().unwrap();
//! assert_eq!(1, driver.depth(4, false).unwrap());
//! ```

pub mod abstraction;
pub mod bitset;
pub mod combinatorics;
pub mod common;
pub mod driver;
pub mod error;
pub mod implementation;
pub mod ordered_bitset;
pub mod rank;
pub mod sizing;

pub use common::{ChainMode, ConditionId, GeneId, NestedFlag, RowId, Width};
pub use error::{Error, Result};
