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

//! End-to-end coverage of the boundary scenarios the driver is expected to
//! get right, plus the determinism and idempotence properties that hold
//! across an entire run rather than one call.

use biclustering::abstraction::{LinkIndex, NoCancellation, NoProgress, WidthGroupStorage};
use biclustering::bitset::BitSet;
use biclustering::common::ChainMode;
use biclustering::driver::{Driver, DriverConfig, SequentialDriver};
use biclustering::implementation::chaining::{chain, ChainCounters};
use biclustering::implementation::index::VecLinkIndex;
use biclustering::implementation::pool::VecWidthGroupStorage;
use biclustering::implementation::store::InMemoryStore;
use biclustering::ordered_bitset::OrderedBitSet;
use biclustering::{ConditionId, Error};

fn driver_over(
    matrix: Vec<Vec<usize>>,
    config: DriverConfig,
) -> SequentialDriver<InMemoryStore, NoCancellation, NoProgress> {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    SequentialDriver::new(matrix, config, InMemoryStore::new(), NoCancellation, NoProgress).unwrap()
}

/// Every row a permutation of {0,1,2}: six distinct width-3 orderings, each
/// maximal, none nested in anything wider (there is nothing wider to nest
/// in).
fn tiny_exhaustive_matrix() -> Vec<Vec<usize>> {
    vec![
        vec![0, 1, 2],
        vec![0, 2, 1],
        vec![1, 0, 2],
        vec![1, 2, 0],
        vec![2, 0, 1],
        vec![2, 1, 0],
    ]
}

#[test]
fn tiny_exhaustive_matrix_yields_six_non_nested_width_three_biclusters() {
    let mut driver = driver_over(
        tiny_exhaustive_matrix(),
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        },
    );
    driver.run().unwrap();

    assert_eq!(6, driver.depth(3, false).unwrap());
    assert_eq!(0, driver.depth(2, false).unwrap());
    assert_eq!(6, driver.depth(2, true).unwrap());
}

/// Every gene strictly increasing across all four conditions: the chain
/// loop collapses the whole matrix down to a single width-4 bicluster, and
/// every narrower chain along the way turns out nested inside it.
#[test]
fn monotone_column_collapses_to_one_width_four_bicluster() {
    let mut driver = driver_over(
        vec![vec![0, 1, 2, 3]; 4],
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        },
    );
    driver.run().unwrap();

    assert_eq!(1, driver.depth(4, false).unwrap());
    assert_eq!(0, driver.depth(3, false).unwrap());
    assert_eq!(0, driver.depth(2, false).unwrap());
}

/// Two gene groups follow opposite orders across the same pair of
/// conditions. Expect exactly two width-2 seeds with complementary gene
/// sets summing to max_genes, and with only two conditions in the matrix
/// there is no third condition to chain against, so both stay non-nested
/// by default: `prune`'s sweep never runs above width 2 since no width-3
/// group is ever created.
#[test]
fn disjoint_gene_sets_yield_two_complementary_width_two_seeds() {
    let matrix = vec![
        vec![0, 1], // gene 0: increasing
        vec![0, 1], // gene 1: increasing
        vec![1, 0], // gene 2: decreasing
        vec![1, 0], // gene 3: decreasing
    ];
    let mut driver = driver_over(
        matrix,
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        },
    );
    driver.run().unwrap();

    assert_eq!(2, driver.depth(2, true).unwrap());
    assert_eq!(2, driver.depth(2, false).unwrap());
    assert!(driver.depth(3, true).is_err());

    let mut gene_set_sizes = Vec::new();
    for row in 0..2 {
        let (_, genes, flag) = driver.bicluster(2, biclustering::RowId(row)).unwrap();
        assert!(!flag.is_nested());
        gene_set_sizes.push(genes.len());
    }
    gene_set_sizes.sort_unstable();
    assert_eq!(vec![2, 2], gene_set_sizes);
}

/// 3 genes, `min_genes = 3`: every column pair splits 2/1 or 1/2, so
/// neither direction of any pair ever reaches the threshold and no width-2
/// group is ever created at all.
#[test]
fn min_genes_threshold_excludes_every_seed() {
    let mut driver = driver_over(
        vec![vec![0, 1], vec![0, 1], vec![1, 0]],
        DriverConfig {
            min_genes: 3,
            enable_doubling: false,
        },
    );
    driver.run().unwrap();

    assert!(driver.depth(2, true).is_err());
}

/// Calling `chain` against a width group whose link index was never built
/// (or has gone stale since the last append) must fail with
/// `PreconditionViolation` rather than silently behaving as if that side
/// had no rows.
#[test]
fn chain_without_a_rebuilt_index_fails_with_precondition_violation() {
    let mut head = VecWidthGroupStorage::new();
    let order = OrderedBitSet::new(4, vec![ConditionId(0), ConditionId(1)]).unwrap();
    let mut genes = BitSet::empty(2);
    genes.insert(0).unwrap();
    head.append(order, genes).unwrap();

    // Never rebuilt: zero indexed rows, one live row.
    let head_index = VecLinkIndex::new(4);
    let mut tail_index = VecLinkIndex::new(4);
    tail_index.rebuild(&head).unwrap();

    let mut out = VecWidthGroupStorage::new();
    let mut counters = ChainCounters::default();
    let cancellation = NoCancellation;

    let result = chain(
        &head,
        &head_index,
        &head,
        &tail_index,
        ConditionId(1),
        &mut out,
        ChainMode::Step,
        1,
        &cancellation,
        &mut counters,
    );

    assert!(matches!(result, Err(Error::PreconditionViolation(_))));
}

/// A link index rebuilt twice in a row with no intervening append produces
/// identical bucket contents both times.
#[test]
fn rebuilding_a_link_index_with_no_new_rows_is_idempotent() {
    let mut pool = VecWidthGroupStorage::new();
    for (a, b) in [(0, 1), (1, 2), (0, 2)] {
        let order = OrderedBitSet::new(3, vec![ConditionId(a), ConditionId(b)]).unwrap();
        let mut genes = BitSet::empty(2);
        genes.insert(0).unwrap();
        pool.append(order, genes).unwrap();
    }

    let mut index = VecLinkIndex::new(3);
    index.rebuild(&pool).unwrap();
    let heads_before: Vec<Vec<_>> = (0..3).map(|c| index.heads(ConditionId(c)).to_vec()).collect();
    let tails_before: Vec<Vec<_>> = (0..3).map(|c| index.tails(ConditionId(c)).to_vec()).collect();

    index.rebuild(&pool).unwrap();
    let heads_after: Vec<Vec<_>> = (0..3).map(|c| index.heads(ConditionId(c)).to_vec()).collect();
    let tails_after: Vec<Vec<_>> = (0..3).map(|c| index.tails(ConditionId(c)).to_vec()).collect();

    assert_eq!(heads_before, heads_after);
    assert_eq!(tails_before, tails_after);
    assert_eq!(3, index.indexed_rows());
}

/// Two independent runs over the same rank-coded matrix produce identical
/// row counts per width and identical nested flags row for row.
#[test]
fn two_runs_over_the_same_matrix_are_deterministic() {
    let config = DriverConfig {
        min_genes: 1,
        enable_doubling: false,
    };
    let mut first = driver_over(tiny_exhaustive_matrix(), config.clone());
    first.run().unwrap();
    let mut second = driver_over(tiny_exhaustive_matrix(), config);
    second.run().unwrap();

    let first_report = first.stats_report();
    let second_report = second.stats_report();
    assert_eq!(first_report.rows, second_report.rows);

    for width in [2, 3] {
        let first_depth = first.depth(width, true).unwrap();
        let second_depth = second.depth(width, true).unwrap();
        assert_eq!(first_depth, second_depth);
        for row in 0..first_depth {
            let row = biclustering::RowId(row);
            let (first_conditions, first_genes, first_flag) = first.bicluster(width, row).unwrap();
            let (second_conditions, second_genes, second_flag) = second.bicluster(width, row).unwrap();
            assert_eq!(first_conditions.order(), second_conditions.order());
            assert_eq!(first_genes, second_genes);
            assert_eq!(first_flag, second_flag);
        }
    }
}

/// Step mode (`k = 2`) and doubling mode (`k = h`) must agree on the final
/// set of non-nested width-3 biclusters even though they take different
/// paths to get there.
#[test]
fn doubling_mode_agrees_with_step_mode_on_the_tiny_exhaustive_matrix() {
    let mut stepping = driver_over(
        tiny_exhaustive_matrix(),
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        },
    );
    stepping.run().unwrap();

    let mut doubling = driver_over(
        tiny_exhaustive_matrix(),
        DriverConfig {
            min_genes: 1,
            enable_doubling: true,
        },
    );
    doubling.run().unwrap();

    assert_eq!(stepping.depth(3, false).unwrap(), doubling.depth(3, false).unwrap());
    assert_eq!(stepping.depth(3, true).unwrap(), doubling.depth(3, true).unwrap());
}

/// A wider matrix whose `max_conditions` (7) is not itself reachable by
/// repeated doubling from {2,3} (that sequence is 2, 3, 5, 9, ...): widths
/// 4, 6, and 7 only ever get built by falling back to a step pass. Every
/// width from 2 up to `max_conditions` must exist under both modes, and
/// their non-nested counts must agree widthwise.
#[test]
fn doubling_and_stepping_agree_across_every_width_for_a_seven_condition_monotone_matrix() {
    let matrix = vec![vec![0, 1, 2, 3, 4, 5, 6]; 5];

    let mut stepping = driver_over(
        matrix.clone(),
        DriverConfig {
            min_genes: 1,
            enable_doubling: false,
        },
    );
    stepping.run().unwrap();

    let mut doubling = driver_over(
        matrix,
        DriverConfig {
            min_genes: 1,
            enable_doubling: true,
        },
    );
    doubling.run().unwrap();

    for w in 2..=7 {
        assert_eq!(
            stepping.depth(w, true).unwrap(),
            doubling.depth(w, true).unwrap(),
            "width {w} total row count mismatch"
        );
        assert_eq!(
            stepping.depth(w, false).unwrap(),
            doubling.depth(w, false).unwrap(),
            "width {w} non-nested row count mismatch"
        );
    }
    assert_eq!(1, doubling.depth(7, false).unwrap());
}
