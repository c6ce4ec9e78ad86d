// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Geometric kernel of the quasicrystalline spin network (QSN) pipeline.
//!
//! Leaf-first: the E8-style lattice generator, the point containers shared by
//! every later stage, the random projection basis, and the acceptance window
//! that completes the cut-and-project step.

pub mod lattice;
pub mod point;
pub mod projection;
pub mod window;
pub mod tetrahedron;

pub use lattice::{generate_lattice_points, LatticePoint, LatticePointSet};
pub use point::{PointCloud, ProjectedPoint};
pub use projection::{build_orthonormal_basis, project, project_chain, BasisKind, ProjectionBasis};
pub use tetrahedron::random_tetrahedron;
pub use window::filter_window;

/// Golden ratio φ = (1 + √5) / 2, the uniform scale of lattice and ring geometry.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Squared Euclidean norm of a coordinate slice.
pub fn norm_sq(coords: &[f64]) -> f64 {
    coords.iter().map(|x| x * x).sum()
}
