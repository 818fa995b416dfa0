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

//! Turns a raw real-valued gene expression matrix into the rank-coded matrix
//! the rest of the engine operates on. Each row (gene) is rank-coded
//! independently: the smallest value in the row becomes rank `0`, the next
//! smallest rank `1`, and so on, with ties broken by column index. This is
//! the "argsort twice" transform, computed directly here as a single stable
//! sort of column indices per row rather than two literal argsort passes.

use crate::error::{Error, Result};

/// Rank-codes `matrix` row by row. Every row must have the same length.
/// Fails with `InvalidArgument` if the matrix is ragged, empty, or contains
/// a non-finite value (`NaN`/`inf`), since those cannot be given a total
/// order.
pub fn rank_code(matrix: &[Vec<f64>]) -> Result<Vec<Vec<usize>>> {
    if matrix.is_empty() {
        return Err(Error::InvalidArgument("matrix has no rows".to_string()));
    }
    let width = matrix[0].len();
    if width == 0 {
        return Err(Error::InvalidArgument("matrix has no columns".to_string()));
    }

    matrix.iter().map(|row| rank_code_row(row, width)).collect()
}

fn rank_code_row(row: &[f64], expected_width: usize) -> Result<Vec<usize>> {
    if row.len() != expected_width {
        return Err(Error::InvalidArgument(format!(
            "ragged matrix: expected {expected_width} columns, row has {}",
            row.len()
        )));
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidArgument(
            "matrix contains a non-finite value".to_string(),
        ));
    }

    // Order column indices by ascending value; a stable sort keeps equal
    // values in their original column order, which is exactly "ties broken
    // by column index".
    let mut order: Vec<usize> = (0..row.len()).collect();
    order.sort_by(|&a, &b| row[a].partial_cmp(&row[b]).expect("checked finite above"));

    // Invert the permutation: rank[column] = position of that column in the
    // ascending order.
    let mut rank = vec![0usize; row.len()];
    for (position, &column) in order.iter().enumerate() {
        rank[column] = position;
    }
    Ok(rank)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_rank {
    use super::*;

    #[test]
    fn ranks_a_simple_row_ascending() {
        let coded = rank_code(&[vec![30.0, 10.0, 20.0]]).unwrap();
        assert_eq!(vec![vec![2, 0, 1]], coded);
    }

    #[test]
    fn ties_are_broken_by_column_index() {
        let coded = rank_code(&[vec![5.0, 5.0, 1.0]]).unwrap();
        // column 2 is smallest (rank 0); columns 0 and 1 tie, lower column
        // index gets the lower rank.
        assert_eq!(vec![vec![1, 2, 0]], coded);
    }

    #[test]
    fn ranks_each_row_independently() {
        let coded = rank_code(&[vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]]).unwrap();
        assert_eq!(vec![vec![0, 1, 2], vec![2, 1, 0]], coded);
    }

    #[test]
    fn rejects_empty_matrix() {
        assert!(rank_code(&[]).is_err());
    }

    #[test]
    fn rejects_ragged_rows() {
        assert!(rank_code(&[vec![1.0, 2.0], vec![1.0]]).is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(rank_code(&[vec![1.0, f64::NAN]]).is_err());
        assert!(rank_code(&[vec![1.0, f64::INFINITY]]).is_err());
    }
}
