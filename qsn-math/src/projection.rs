// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Random linear projection from the lattice dimension down to 2D/3D/4D.
//!
//! A basis is an M×N matrix drawn from independent standard normals and then
//! either fully orthogonalized (QR of the transpose, keep the thin Q factor,
//! transpose back) or merely row-normalized. The two variants give different
//! projected distributions, so the choice is explicit ([`BasisKind`]).
//!
//! Projection of a point p is `B · p`. Chained projection (8→4→3) draws an
//! independent basis per stage.

use anyhow::{ensure, Result};
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::point::{PointCloud, ProjectedPoint};

/// How the rows of a random basis are conditioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BasisKind {
    /// Rows are mutually orthonormal (`B·Bᵀ = I`).
    #[default]
    Orthogonal,
    /// Rows are unit length but not orthogonal to each other.
    RowNormalized,
}

/// An M×N projection matrix, one row per target axis.
#[derive(Debug, Clone)]
pub struct ProjectionBasis {
    matrix: DMatrix<f64>,
    kind: BasisKind,
}

impl ProjectionBasis {
    /// Wrap an explicit matrix. Rows are target axes.
    pub fn from_matrix(matrix: DMatrix<f64>, kind: BasisKind) -> Result<Self> {
        ensure!(
            matrix.nrows() > 0 && matrix.nrows() <= matrix.ncols(),
            "projection matrix must be M×N with 0 < M ≤ N, got {}×{}",
            matrix.nrows(),
            matrix.ncols()
        );
        Ok(Self { matrix, kind })
    }

    /// Source dimension N.
    pub fn from_dim(&self) -> usize {
        self.matrix.ncols()
    }

    /// Target dimension M.
    pub fn to_dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn kind(&self) -> BasisKind {
        self.kind
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Gram matrix `B·Bᵀ` (identity for an orthogonal basis).
    pub fn gram(&self) -> DMatrix<f64> {
        &self.matrix * self.matrix.transpose()
    }

    /// Project a single N-vector.
    pub fn apply(&self, coords: &[f64]) -> Result<Vec<f64>> {
        ensure!(
            coords.len() == self.from_dim(),
            "cannot project a {}-dimensional point with a {}→{} basis",
            coords.len(),
            self.from_dim(),
            self.to_dim()
        );
        let v = DVector::from_column_slice(coords);
        Ok((&self.matrix * v).iter().copied().collect())
    }
}

fn check_dims(from_dim: usize, to_dim: usize) -> Result<()> {
    ensure!(from_dim > 0, "source dimension must be positive");
    ensure!(to_dim > 0, "target dimension must be positive");
    ensure!(
        to_dim <= from_dim,
        "target dimension {to_dim} exceeds source dimension {from_dim}"
    );
    Ok(())
}

/// Draw a random `to_dim × from_dim` basis of the requested kind.
///
/// Dimensions are checked before any random number is drawn.
pub fn build_orthonormal_basis<R: Rng + ?Sized>(
    from_dim: usize,
    to_dim: usize,
    kind: BasisKind,
    rng: &mut R,
) -> Result<ProjectionBasis> {
    check_dims(from_dim, to_dim)?;

    let raw = DMatrix::<f64>::from_fn(to_dim, from_dim, |_, _| StandardNormal.sample(rng));

    let matrix = match kind {
        BasisKind::Orthogonal => {
            // Thin Q of the N×M transpose has M orthonormal columns.
            let q = raw.transpose().qr().q();
            q.transpose()
        }
        BasisKind::RowNormalized => {
            let mut m = raw;
            for mut row in m.row_iter_mut() {
                let norm = row.norm();
                ensure!(norm > 0.0, "drew an all-zero projection row");
                row /= norm;
            }
            m
        }
    };

    tracing::debug!(from_dim, to_dim, ?kind, "drew projection basis");
    Ok(ProjectionBasis { matrix, kind })
}

/// Project every point with `basis`, preserving order.
pub fn project<P: AsRef<[f64]>>(points: &[P], basis: &ProjectionBasis) -> Result<PointCloud> {
    let projected = points
        .iter()
        .map(|p| basis.apply(p.as_ref()).map(ProjectedPoint::new))
        .collect::<Result<Vec<_>>>()?;
    PointCloud::from_points(basis.to_dim(), projected)
}

/// Result of a multi-stage projection.
#[derive(Debug, Clone)]
pub struct ChainProjection {
    pub cloud: PointCloud,
    /// One basis per stage, in application order.
    pub bases: Vec<ProjectionBasis>,
}

/// Project through successive target dimensions, e.g. `[4, 3]` for 8→4→3.
///
/// Each stage draws its own basis. The full chain is validated up front.
pub fn project_chain<P: AsRef<[f64]>, R: Rng + ?Sized>(
    points: &[P],
    from_dim: usize,
    stages: &[usize],
    kind: BasisKind,
    rng: &mut R,
) -> Result<ChainProjection> {
    ensure!(!stages.is_empty(), "projection chain needs at least one stage");
    let mut prev = from_dim;
    for &dim in stages {
        check_dims(prev, dim)?;
        prev = dim;
    }

    let mut bases = Vec::with_capacity(stages.len());
    let mut current_dim = from_dim;
    let first = build_orthonormal_basis(current_dim, stages[0], kind, rng)?;
    let mut cloud = project(points, &first)?;
    current_dim = first.to_dim();
    bases.push(first);

    for &dim in &stages[1..] {
        let basis = build_orthonormal_basis(current_dim, dim, kind, rng)?;
        cloud = project(cloud.points(), &basis)?;
        current_dim = dim;
        bases.push(basis);
    }

    Ok(ChainProjection { cloud, bases })
}
