// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! E8-style Root Subset
//!
//! A small, ordered subset of the E8 root system used as the source of the
//! cut-and-project construction. For dimension N:
//!
//!   Type 1: for every axis pair i < j, +(eᵢ + eⱼ) immediately followed by
//!           -(eᵢ + eⱼ)                                   → N·(N−1) vectors
//!   Type 2: the half-integer patterns (+½)ᴺ and
//!           (+½,…,+½, −½,…,−½) (first ⌊N/2⌋ positive), each followed by
//!           its negation                                 → 4 vectors
//!
//! Every vector is then scaled by φ. For N = 8 this yields 56 + 4 = 60
//! vectors, all of norm φ·√2.
//!
//! Generation order is part of the contract: callers take prefixes of it.

use anyhow::{ensure, Result};

use super::{LatticePoint, LatticePointSet};
use crate::PHI;

#[derive(Debug, Clone)]
pub struct E8Subset {
    dimension: usize,
    scale: f64,
}

impl E8Subset {
    /// Subset generator for an N-dimensional lattice. N must be at least 2.
    pub fn new(dimension: usize) -> Result<Self> {
        ensure!(
            dimension >= 2,
            "lattice dimension must be at least 2, got {dimension}"
        );
        Ok(Self {
            dimension,
            scale: PHI,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors produced without a limit: N·(N−1) + 4.
    pub fn full_len(&self) -> usize {
        self.dimension * (self.dimension - 1) + 4
    }

    /// Generate the subset in canonical order, truncated to `limit` if given.
    pub fn generate(&self, limit: Option<usize>) -> LatticePointSet {
        let n = self.dimension;
        let cap = limit.map_or(self.full_len(), |l| l.min(self.full_len()));
        let mut points = Vec::with_capacity(cap);

        for i in 0..n {
            for j in (i + 1)..n {
                let mut v = vec![0.0; n];
                v[i] = 1.0;
                v[j] = 1.0;
                self.push_antipodal(&mut points, v);
            }
        }

        for pattern in self.half_integer_patterns() {
            self.push_antipodal(&mut points, pattern);
        }

        debug_assert_eq!(points.len(), self.full_len());
        points.truncate(cap);
        points
    }

    fn half_integer_patterns(&self) -> [Vec<f64>; 2] {
        let n = self.dimension;
        let all_positive = vec![0.5; n];
        let split = (0..n)
            .map(|k| if k < n / 2 { 0.5 } else { -0.5 })
            .collect();
        [all_positive, split]
    }

    fn push_antipodal(&self, out: &mut LatticePointSet, v: Vec<f64>) {
        let scaled: Vec<f64> = v.iter().map(|&x| x * self.scale).collect();
        let negated = scaled.iter().map(|&x| -x).collect();
        out.push(LatticePoint::new(scaled));
        out.push(LatticePoint::new(negated));
    }
}

impl Default for E8Subset {
    fn default() -> Self {
        Self {
            dimension: 8,
            scale: PHI,
        }
    }
}
