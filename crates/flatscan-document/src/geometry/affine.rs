// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Affine estimation from three point correspondences.

use flatscan_core::Point;

use super::solver::{self, is_negligible};

/// A 2D affine map `(x, y) -> (a*x + b*y + c, d*x + e*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineCoefficients {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineCoefficients {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 0.0,
        }
    }

    /// Build from `[a, b, c, d, e, f]`.
    pub const fn from_array(v: [f64; 6]) -> Self {
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }

    /// Determinant of the linear 2x2 part. Zero means the map collapses
    /// the plane onto a line (or a point).
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Inverse map, if the linear part is invertible.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if is_negligible(det) {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.e * inv;
        let b = -self.b * inv;
        let d = -self.d * inv;
        let e = self.a * inv;
        Some(Self {
            a,
            b,
            c: -(a * self.c + b * self.f),
            d,
            e,
            f: -(d * self.c + e * self.f),
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// Outcome of [`estimate_affine`].
///
/// Both variants carry the solver's best-effort coefficients; `Degenerate`
/// tells the caller they should not be trusted as a drawing transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineEstimate {
    Solved(AffineCoefficients),
    Degenerate(AffineCoefficients),
}

impl AffineEstimate {
    pub fn coefficients(&self) -> AffineCoefficients {
        match self {
            Self::Solved(c) | Self::Degenerate(c) => *c,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }
}

/// Fit the affine map taking each `src[i]` to `dst[i]`.
///
/// Collinear source (or destination) triangles make the 6x6 system singular;
/// the result is then tagged [`AffineEstimate::Degenerate`].
pub fn estimate_affine(src: [Point; 3], dst: [Point; 3]) -> AffineEstimate {
    let mut matrix = [[0.0; 6]; 6];
    let mut vector = [0.0; 6];
    for (i, (s, t)) in src.iter().zip(dst.iter()).enumerate() {
        matrix[2 * i] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0];
        matrix[2 * i + 1] = [0.0, 0.0, 0.0, s.x, s.y, 1.0];
        vector[2 * i] = t.x;
        vector[2 * i + 1] = t.y;
    }

    let solution = solver::eliminate(matrix, vector);
    let coefficients = AffineCoefficients::from_array(solution.values);

    if !solution.is_complete() || is_negligible(coefficients.determinant()) {
        AffineEstimate::Degenerate(coefficients)
    } else {
        AffineEstimate::Solved(coefficients)
    }
}
