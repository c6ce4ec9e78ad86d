// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Simplicial complexes over a [`PointCloud`] arena.
//!
//! A simplex stores M+1 indices into the cloud it was built from and never
//! copies coordinates. Simplices are only produced by the triangulator.

use std::collections::BTreeSet;
use std::fmt;

use qsn_math::PointCloud;
use serde::{Deserialize, Serialize};

/// M+1 affinely independent point indices (a triangle in 2D, a tetrahedron in 3D).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Vertices are stored in ascending order.
    pub(crate) fn new(mut vertices: Vec<usize>) -> Self {
        vertices.sort_unstable();
        Self { vertices }
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Topological dimension (2 for a triangle, 3 for a tetrahedron).
    pub fn dimension(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// The codimension-1 faces, each with one vertex dropped.
    pub fn facets(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.vertices.len()).map(move |skip| {
            self.vertices
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != skip)
                .map(|(_, &v)| v)
                .collect()
        })
    }

    /// Every unordered vertex pair `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices.iter().enumerate().flat_map(move |(i, &a)| {
            self.vertices[i + 1..].iter().map(move |&b| (a, b))
        })
    }
}

/// A point cloud together with the simplices covering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplicialComplex {
    cloud: PointCloud,
    simplices: Vec<Simplex>,
}

impl SimplicialComplex {
    pub(crate) fn new(cloud: PointCloud, simplices: Vec<Simplex>) -> Self {
        Self { cloud, simplices }
    }

    /// A complex with no simplices (the degraded form).
    pub fn bare(cloud: PointCloud) -> Self {
        Self {
            cloud,
            simplices: Vec::new(),
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.cloud.len()
    }

    /// Number of distinct edges over all simplices.
    pub fn edge_count(&self) -> usize {
        self.simplices
            .iter()
            .flat_map(|s| s.edges())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn into_parts(self) -> (PointCloud, Vec<Simplex>) {
        (self.cloud, self.simplices)
    }
}

/// Why a cloud could not be triangulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneracyReason {
    /// Fewer distinct points than `dim + 1`.
    TooFewPoints { have: usize, need: usize },
    /// The distinct points span an affine subspace of dimension `rank < dim`.
    AffinelyDependent { rank: usize, dim: usize },
    /// Only 2D, 3D and 4D clouds are triangulated.
    UnsupportedDimension(usize),
    /// Non-finite coordinates, or no simplex survived construction.
    NumericalFailure,
}

impl fmt::Display for DegeneracyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegeneracyReason::TooFewPoints { have, need } => {
                write!(f, "too few distinct points ({have} < {need})")
            }
            DegeneracyReason::AffinelyDependent { rank, dim } => {
                write!(f, "points span only {rank} of {dim} dimensions")
            }
            DegeneracyReason::UnsupportedDimension(dim) => {
                write!(f, "cannot triangulate a {dim}-dimensional cloud")
            }
            DegeneracyReason::NumericalFailure => write!(f, "numerical failure"),
        }
    }
}

/// Outcome of triangulating a cloud.
///
/// A degenerate outcome hands back the untouched cloud so callers can still
/// render bare points or build a ring interaction graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Triangulation {
    Complete(SimplicialComplex),
    Degenerate {
        cloud: PointCloud,
        reason: DegeneracyReason,
    },
}

impl Triangulation {
    pub fn is_complete(&self) -> bool {
        matches!(self, Triangulation::Complete(_))
    }

    pub fn cloud(&self) -> &PointCloud {
        match self {
            Triangulation::Complete(complex) => complex.cloud(),
            Triangulation::Degenerate { cloud, .. } => cloud,
        }
    }

    /// Simplices, empty when degenerate.
    pub fn simplices(&self) -> &[Simplex] {
        match self {
            Triangulation::Complete(complex) => complex.simplices(),
            Triangulation::Degenerate { .. } => &[],
        }
    }

    pub fn reason(&self) -> Option<DegeneracyReason> {
        match self {
            Triangulation::Complete(_) => None,
            Triangulation::Degenerate { reason, .. } => Some(*reason),
        }
    }

    /// Collapse into a complex; a degenerate outcome becomes a bare complex.
    pub fn into_complex(self) -> SimplicialComplex {
        match self {
            Triangulation::Complete(complex) => complex,
            Triangulation::Degenerate { cloud, .. } => SimplicialComplex::bare(cloud),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_sorted_and_faces() {
        let s = Simplex::new(vec![7, 2, 5, 0]);
        assert_eq!(s.vertices(), &[0, 2, 5, 7]);
        assert_eq!(s.dimension(), 3);

        let facets: Vec<_> = s.facets().collect();
        assert_eq!(facets.len(), 4);
        assert!(facets.contains(&vec![2, 5, 7]));
        assert!(facets.contains(&vec![0, 2, 5]));

        let edges: Vec<_> = s.edges().collect();
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn test_degenerate_collapses_to_bare() {
        let cloud = PointCloud::from_coords(3, vec![vec![0.0, 0.0, 0.0]]).unwrap();
        let tri = Triangulation::Degenerate {
            cloud: cloud.clone(),
            reason: DegeneracyReason::TooFewPoints { have: 1, need: 4 },
        };
        assert!(!tri.is_complete());
        assert!(tri.simplices().is_empty());
        assert_eq!(tri.cloud(), &cloud);

        let complex = tri.into_complex();
        assert!(complex.is_empty());
        assert_eq!(complex.num_points(), 1);
    }

    #[test]
    fn test_edge_count_dedupes_shared_edges() {
        let cloud = PointCloud::from_coords(
            2,
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        )
        .unwrap();
        let complex = SimplicialComplex::new(
            cloud,
            vec![Simplex::new(vec![0, 1, 2]), Simplex::new(vec![1, 2, 3])],
        );
        assert_eq!(complex.edge_count(), 5);
    }

    #[test]
    fn test_reason_display() {
        let r = DegeneracyReason::AffinelyDependent { rank: 2, dim: 3 };
        assert_eq!(r.to_string(), "points span only 2 of 3 dimensions");
    }
}
