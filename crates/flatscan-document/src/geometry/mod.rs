// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry — small dense linear solves and affine estimation.

pub mod affine;
pub mod solver;

pub use affine::{AffineCoefficients, AffineEstimate, estimate_affine};
pub use solver::{EPSILON, Solution, eliminate, is_negligible, solve};
