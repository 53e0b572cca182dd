// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dense linear solver — Gaussian elimination with partial pivoting.
//
// Small fixed-size systems only (the affine estimator solves 6x6). A
// singular or near-singular matrix never aborts the solve: columns without a
// usable pivot are skipped and their unknowns come back as zero.

/// Pivots smaller than this are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Whether `value` is too small (or too broken) to divide by. NaN counts.
pub fn is_negligible(value: f64) -> bool {
    value.is_nan() || value.abs() < EPSILON
}

/// Result of [`eliminate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<const N: usize> {
    /// Best-effort solution vector. Never contains values produced by
    /// dividing by a sub-epsilon pivot.
    pub values: [f64; N],
    /// Number of columns for which no pivot above [`EPSILON`] existed.
    pub skipped_columns: usize,
}

impl<const N: usize> Solution<N> {
    /// True when every column had a usable pivot.
    pub fn is_complete(&self) -> bool {
        self.skipped_columns == 0
    }
}

/// Solve `matrix * x = vector`, returning `x`.
///
/// Degenerate systems produce a partially zeroed answer rather than an error.
pub fn solve<const N: usize>(matrix: [[f64; N]; N], vector: [f64; N]) -> [f64; N] {
    eliminate(matrix, vector).values
}

/// Like [`solve`] but also reports how many pivot columns were skipped.
pub fn eliminate<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Solution<N> {
    let mut skipped_columns = 0;

    // Forward elimination.
    for col in 0..N {
        let mut pivot_row = col;
        let mut pivot_abs = a[col][col].abs();
        for (row, coeffs) in a.iter().enumerate().skip(col + 1) {
            let candidate = coeffs[col].abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = row;
            }
        }

        if pivot_row != col {
            a.swap(pivot_row, col);
            b.swap(pivot_row, col);
        }

        if is_negligible(pivot_abs) {
            skipped_columns += 1;
            continue;
        }

        let pivot = a[col];
        for row in (col + 1)..N {
            let factor = a[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for k in col..N {
                a[row][k] -= factor * pivot[k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut values = [0.0; N];
    for row in (0..N).rev() {
        let diag = a[row][row];
        if is_negligible(diag) {
            values[row] = 0.0;
            continue;
        }
        let mut sum = b[row];
        for k in (row + 1)..N {
            sum -= a[row][k] * values[k];
        }
        values[row] = sum / diag;
    }

    Solution {
        values,
        skipped_columns,
    }
}
