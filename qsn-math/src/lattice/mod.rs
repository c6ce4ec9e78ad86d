// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Lattice module for the QSN pipeline
//!
//! The "lattice" here is a fixed, finite subset of an E8-style root system,
//! not an infinite repeating grid. Points are stored in physical (already
//! golden-ratio scaled) coordinates, in generation order.

pub mod e8;

pub use e8::E8Subset;

use serde::{Deserialize, Serialize};

/// A point of the high-dimensional lattice. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticePoint {
    pub coords: Vec<f64>,
}

impl LatticePoint {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn norm_sq(&self) -> f64 {
        crate::norm_sq(&self.coords)
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl AsRef<[f64]> for LatticePoint {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

/// Ordered lattice points. Duplicates are kept as generated.
pub type LatticePointSet = Vec<LatticePoint>;

/// Generate the 8D E8-style subset (60 points), keeping only the first
/// `limit` points in generation order when a limit is given.
pub fn generate_lattice_points(limit: Option<usize>) -> LatticePointSet {
    E8Subset::default().generate(limit)
}
