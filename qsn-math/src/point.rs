// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Projected points and the ordered point arena shared by later stages.
//!
//! The triangulator and the interaction graph refer to points by their index
//! in a [`PointCloud`], so the order of a cloud is never changed after it is
//! built. Simplices and edges hold indices only, never coordinates.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// An M-dimensional point obtained by projecting a lattice point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub coords: Vec<f64>,
}

impl ProjectedPoint {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn norm_sq(&self) -> f64 {
        crate::norm_sq(&self.coords)
    }
}

impl AsRef<[f64]> for ProjectedPoint {
    fn as_ref(&self) -> &[f64] {
        &self.coords
    }
}

/// Ordered sequence of same-dimension points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    dim: usize,
    points: Vec<ProjectedPoint>,
}

impl PointCloud {
    /// An empty cloud of the given dimension.
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            points: Vec::new(),
        }
    }

    /// Build a cloud, checking every point has dimension `dim`.
    pub fn from_points(dim: usize, points: Vec<ProjectedPoint>) -> Result<Self> {
        if let Some((idx, bad)) = points.iter().enumerate().find(|(_, p)| p.dimension() != dim) {
            anyhow::bail!(
                "point {idx} has dimension {}, expected {dim}",
                bad.dimension()
            );
        }
        Ok(Self { dim, points })
    }

    /// Convenience constructor from raw coordinate rows.
    pub fn from_coords(dim: usize, rows: Vec<Vec<f64>>) -> Result<Self> {
        ensure!(dim > 0, "point cloud dimension must be positive");
        Self::from_points(dim, rows.into_iter().map(ProjectedPoint::new).collect())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ProjectedPoint] {
        &self.points
    }

    pub fn get(&self, idx: usize) -> Option<&ProjectedPoint> {
        self.points.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectedPoint> {
        self.points.iter()
    }

    /// Points as fixed 3-vectors, zero-padding 2D clouds and dropping extra axes.
    pub fn to_xyz(&self) -> Vec<[f64; 3]> {
        self.points
            .iter()
            .map(|p| {
                let mut xyz = [0.0; 3];
                for (dst, &src) in xyz.iter_mut().zip(p.coords.iter()) {
                    *dst = src;
                }
                xyz
            })
            .collect()
    }
}

impl std::ops::Index<usize> for PointCloud {
    type Output = ProjectedPoint;

    fn index(&self, idx: usize) -> &ProjectedPoint {
        &self.points[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords_checks_dimension() {
        let ok = PointCloud::from_coords(2, vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.dim(), 2);
        assert_eq!(ok[1].coords, vec![2.0, 3.0]);

        let bad = PointCloud::from_coords(2, vec![vec![0.0, 1.0], vec![2.0]]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = PointCloud::empty(3);
        assert!(cloud.is_empty());
        assert_eq!(cloud.dim(), 3);
        assert!(cloud.get(0).is_none());
    }

    #[test]
    fn test_to_xyz_pads_2d() {
        let cloud = PointCloud::from_coords(2, vec![vec![1.0, 2.0]]).unwrap();
        assert_eq!(cloud.to_xyz(), vec![[1.0, 2.0, 0.0]]);
    }
}
