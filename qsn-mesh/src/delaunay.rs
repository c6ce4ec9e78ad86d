// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Delaunay triangulation of a whole point cloud (Bowyer-Watson).
//!
//! Works in any dimension d ∈ {2, 3, 4}. All points are wrapped in a large
//! super-simplex, inserted one by one in cloud order, and every cell that
//! still touches a super-simplex vertex is discarded at the end.
//!
//! For each insertion the "bad" cells (circumsphere strictly contains the new
//! point) are removed; the facets of the cavity that are not shared by two
//! bad cells are re-coned to the new point.
//!
//! Failure never escapes: too few distinct points, affinely dependent input,
//! unsupported dimension or a numerical breakdown all produce
//! [`Triangulation::Degenerate`] carrying the original cloud.
//!
//! Exact duplicates are skipped during insertion. They keep their cloud index
//! but appear in no simplex.
//!
//! Cells whose circumsphere system is nearly singular (`FLATNESS_EPS`) are
//! dropped. Clouds up to about 100:1 between their longest and shortest
//! extent are covered exactly; much thinner slabs (1000:1 and beyond) can
//! lose slivers of hull volume to dropped cells.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};
use qsn_math::PointCloud;

use crate::complex::{DegeneracyReason, Simplex, SimplicialComplex, Triangulation};

/// Highest cloud dimension the triangulator accepts.
pub const MAX_DIM: usize = 4;

/// Squared distance under which two points count as duplicates.
const DUPLICATE_EPS_SQ: f64 = 1e-20;

/// Relative tolerance for rank and flatness checks.
const FLATNESS_EPS: f64 = 1e-10;

/// Super-simplex margin as a multiple of the cloud's half extent.
const SUPER_MARGIN: f64 = 1.0e4;

/// Triangulate `cloud`. Simplex indices always refer to positions in `cloud`.
pub fn triangulate(cloud: PointCloud) -> Triangulation {
    let dim = cloud.dim();
    if !(2..=MAX_DIM).contains(&dim) {
        return degenerate(cloud, DegeneracyReason::UnsupportedDimension(dim));
    }
    if cloud.iter().any(|p| p.coords.iter().any(|c| !c.is_finite())) {
        return degenerate(cloud, DegeneracyReason::NumericalFailure);
    }

    let unique = distinct_indices(&cloud);
    if unique.len() < dim + 1 {
        return degenerate(
            cloud,
            DegeneracyReason::TooFewPoints {
                have: unique.len(),
                need: dim + 1,
            },
        );
    }

    let rank = affine_rank(&cloud, &unique);
    if rank < dim {
        return degenerate(cloud, DegeneracyReason::AffinelyDependent { rank, dim });
    }

    let simplices = BowyerWatson::new(&cloud, &unique).run();
    if simplices.is_empty() {
        return degenerate(cloud, DegeneracyReason::NumericalFailure);
    }

    tracing::debug!(
        points = cloud.len(),
        distinct = unique.len(),
        simplices = simplices.len(),
        dim,
        "triangulated point cloud"
    );
    Triangulation::Complete(SimplicialComplex::new(cloud, simplices))
}

fn degenerate(cloud: PointCloud, reason: DegeneracyReason) -> Triangulation {
    tracing::warn!(
        points = cloud.len(),
        %reason,
        "triangulation degenerate, returning bare points"
    );
    Triangulation::Degenerate { cloud, reason }
}

/// Indices of the first occurrence of every distinct point, in cloud order.
fn distinct_indices(cloud: &PointCloud) -> Vec<usize> {
    let mut unique: Vec<usize> = Vec::with_capacity(cloud.len());
    for (idx, p) in cloud.iter().enumerate() {
        let seen = unique.iter().any(|&u| {
            let q = &cloud[u];
            let d: f64 = p
                .coords
                .iter()
                .zip(q.coords.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            d < DUPLICATE_EPS_SQ
        });
        if !seen {
            unique.push(idx);
        }
    }
    unique
}

/// Dimension of the affine hull of the selected points.
fn affine_rank(cloud: &PointCloud, indices: &[usize]) -> usize {
    let dim = cloud.dim();
    let origin = &cloud[indices[0]].coords;
    let rows = indices.len() - 1;
    if rows == 0 {
        return 0;
    }
    let diffs = DMatrix::from_fn(rows, dim, |r, c| cloud[indices[r + 1]].coords[c] - origin[c]);
    let scale = diffs.amax().max(1.0);
    diffs.rank(FLATNESS_EPS * scale)
}

#[derive(Debug, Clone)]
struct Cell {
    vertices: Vec<usize>,
    center: DVector<f64>,
    radius_sq: f64,
}

impl Cell {
    /// Build a cell, or `None` when its vertices are (numerically) flat.
    fn new(points: &[DVector<f64>], vertices: Vec<usize>) -> Option<Self> {
        let (center, radius_sq) = circumsphere(points, &vertices)?;
        Some(Self {
            vertices,
            center,
            radius_sq,
        })
    }

    /// Signed distance-squared excess of `p` over the circumsphere.
    fn excess(&self, p: &DVector<f64>) -> f64 {
        (p - &self.center).norm_squared() - self.radius_sq
    }
}

/// Circumcenter and squared circumradius of a d-simplex.
///
/// With u = c − p₀ and dᵢ = pᵢ − p₀, the center solves 2·dᵢ·u = |dᵢ|².
fn circumsphere(points: &[DVector<f64>], vertices: &[usize]) -> Option<(DVector<f64>, f64)> {
    let p0 = &points[vertices[0]];
    let d = p0.len();
    let mut a = DMatrix::<f64>::zeros(d, d);
    let mut b = DVector::<f64>::zeros(d);
    for (row, &vi) in vertices[1..].iter().enumerate() {
        let diff = &points[vi] - p0;
        b[row] = diff.norm_squared();
        a.row_mut(row).copy_from(&(diff.transpose() * 2.0));
    }

    // Hadamard bound: |det| ≤ Π‖rowᵢ‖, so the ratio measures flatness.
    let hadamard: f64 = a.row_iter().map(|r| r.norm()).product();
    let det = a.determinant();
    if hadamard == 0.0 || !det.is_finite() || det.abs() <= FLATNESS_EPS * hadamard {
        return None;
    }

    let u = a.lu().solve(&b)?;
    let radius_sq = u.norm_squared();
    if !radius_sq.is_finite() {
        return None;
    }
    Some((p0 + u, radius_sq))
}

struct BowyerWatson {
    /// Distinct cloud points followed by the d+1 super-simplex vertices.
    points: Vec<DVector<f64>>,
    /// Local index → cloud index for the real points.
    cloud_index: Vec<usize>,
    cells: Vec<Cell>,
    skipped_cells: usize,
}

impl BowyerWatson {
    fn new(cloud: &PointCloud, unique: &[usize]) -> Self {
        let points: Vec<DVector<f64>> = unique
            .iter()
            .map(|&i| DVector::from_column_slice(&cloud[i].coords))
            .collect();
        Self {
            points,
            cloud_index: unique.to_vec(),
            cells: Vec::new(),
            skipped_cells: 0,
        }
    }

    fn run(mut self) -> Vec<Simplex> {
        let n_real = self.points.len();
        let dim = self.points[0].len();

        if !self.push_super_simplex() {
            return Vec::new();
        }
        for idx in 0..n_real {
            self.insert(idx);
        }

        if self.skipped_cells > 0 {
            tracing::debug!(skipped = self.skipped_cells, "dropped flat cavity cells");
        }

        let mut simplices: Vec<Simplex> = self
            .cells
            .iter()
            .filter(|c| c.vertices.iter().all(|&v| v < n_real))
            .map(|c| Simplex::new(c.vertices.iter().map(|&v| self.cloud_index[v]).collect()))
            .collect();
        simplices.sort();
        debug_assert!(simplices.iter().all(|s| s.vertices().len() == dim + 1));
        simplices
    }

    /// Corner simplex {a, a + L·e₁, …, a + L·e_d} enclosing the bounding box.
    fn push_super_simplex(&mut self) -> bool {
        let dim = self.points[0].len();
        let mut lo = self.points[0].clone();
        let mut hi = self.points[0].clone();
        for p in &self.points {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        let center = (&lo + &hi) * 0.5;
        let half = ((&hi - &lo) * 0.5).amax();
        let half = if half > 0.0 { half } else { 1.0 };

        let margin = SUPER_MARGIN * half;
        let leg = 2.0 * dim as f64 * margin;
        let corner = center.add_scalar(-margin);

        let base = self.points.len();
        self.points.push(corner.clone());
        for axis in 0..dim {
            let mut v = corner.clone();
            v[axis] += leg;
            self.points.push(v);
        }

        match Cell::new(&self.points, (base..base + dim + 1).collect()) {
            Some(cell) => {
                self.cells.push(cell);
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, idx: usize) {
        let p = self.points[idx].clone();

        let mut bad: Vec<bool> = self.cells.iter().map(|c| c.excess(&p) < 0.0).collect();
        if !bad.iter().any(|&b| b) {
            // Point sits on circumspheres only; open the closest cell.
            let closest = self
                .cells
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.excess(&p).total_cmp(&b.excess(&p)))
                .map(|(i, _)| i);
            match closest {
                Some(i) => bad[i] = true,
                None => return,
            }
        }

        let (bad_cells, good_cells): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cells)
            .into_iter()
            .zip(bad)
            .partition(|(_, is_bad)| *is_bad);
        self.cells = good_cells.into_iter().map(|(c, _)| c).collect();

        // Cavity boundary = facets owned by exactly one bad cell.
        let mut facet_count: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut facets: Vec<Vec<usize>> = Vec::new();
        for (cell, _) in &bad_cells {
            for skip in 0..cell.vertices.len() {
                let mut facet: Vec<usize> = cell
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != skip)
                    .map(|(_, &v)| v)
                    .collect();
                facet.sort_unstable();
                let count = facet_count.entry(facet.clone()).or_insert(0);
                if *count == 0 {
                    facets.push(facet);
                }
                *count += 1;
            }
        }

        for facet in facets {
            if facet_count.get(&facet).copied() != Some(1) {
                continue;
            }
            let mut vertices = facet;
            vertices.push(idx);
            match Cell::new(&self.points, vertices) {
                Some(cell) => self.cells.push(cell),
                None => self.skipped_cells += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cloud(dim: usize, rows: Vec<Vec<f64>>) -> PointCloud {
        PointCloud::from_coords(dim, rows).unwrap()
    }

    #[test]
    fn test_single_tetrahedron() {
        let c = cloud(
            3,
            vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        );
        let tri = triangulate(c);
        assert!(tri.is_complete());
        assert_eq!(tri.simplices().len(), 1);
        assert_eq!(tri.simplices()[0].vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_single_triangle() {
        let tri = triangulate(cloud(2, vec![vec![0.0, 0.0], vec![2.0, 0.0], vec![0.5, 1.5]]));
        assert_eq!(tri.simplices().len(), 1);
        assert_eq!(tri.simplices()[0].vertices(), &[0, 1, 2]);
    }

    #[test]
    fn test_interior_point_splits_triangle() {
        let tri = triangulate(cloud(
            2,
            vec![vec![0.0, 0.0], vec![6.0, 0.0], vec![3.0, 5.0], vec![3.0, 1.7]],
        ));
        assert!(tri.is_complete());
        // 2n − 2 − h = 8 − 2 − 3
        assert_eq!(tri.simplices().len(), 3);
        assert!(tri.simplices().iter().all(|s| s.vertices().contains(&3)));
    }

    #[test]
    fn test_too_few_points() {
        let tri = triangulate(cloud(
            3,
            vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
        ));
        assert_eq!(
            tri.reason(),
            Some(DegeneracyReason::TooFewPoints { have: 3, need: 4 })
        );
        assert_eq!(tri.cloud().len(), 3);
        assert!(tri.simplices().is_empty());
    }

    #[test]
    fn test_empty_cloud() {
        let tri = triangulate(PointCloud::empty(3));
        assert_eq!(
            tri.reason(),
            Some(DegeneracyReason::TooFewPoints { have: 0, need: 4 })
        );
    }

    #[test]
    fn test_coplanar_points_are_degenerate() {
        let tri = triangulate(cloud(
            3,
            vec![
                vec![0.0, 0.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 1.0, 1.0],
                vec![1.0, 1.0, 1.0],
                vec![0.3, 0.6, 1.0],
            ],
        ));
        assert_eq!(
            tri.reason(),
            Some(DegeneracyReason::AffinelyDependent { rank: 2, dim: 3 })
        );
    }

    #[test]
    fn test_collinear_points_in_2d() {
        let tri = triangulate(cloud(
            2,
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0], vec![-3.0, -3.0]],
        ));
        assert_eq!(
            tri.reason(),
            Some(DegeneracyReason::AffinelyDependent { rank: 1, dim: 2 })
        );
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let c = cloud(
            3,
            vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        );
        let tri = triangulate(c);
        assert!(tri.is_complete());
        assert_eq!(tri.cloud().len(), 5);
        assert_eq!(tri.simplices().len(), 1);
        assert_eq!(tri.simplices()[0].vertices(), &[0, 1, 3, 4]);
    }

    #[test]
    fn test_duplicates_only_count_once() {
        let tri = triangulate(cloud(
            2,
            vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]],
        ));
        assert_eq!(
            tri.reason(),
            Some(DegeneracyReason::TooFewPoints { have: 2, need: 3 })
        );
    }

    #[test]
    fn test_unsupported_dimension() {
        let tri = triangulate(cloud(1, vec![vec![0.0], vec![1.0]]));
        assert_eq!(tri.reason(), Some(DegeneracyReason::UnsupportedDimension(1)));
    }

    #[test]
    fn test_non_finite_input() {
        let tri = triangulate(cloud(
            2,
            vec![vec![0.0, 0.0], vec![f64::NAN, 0.0], vec![0.0, 1.0]],
        ));
        assert_eq!(tri.reason(), Some(DegeneracyReason::NumericalFailure));
    }

    #[test]
    fn test_circumsphere_of_right_triangle() {
        let pts = vec![
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![2.0, 0.0]),
            DVector::from_vec(vec![0.0, 2.0]),
        ];
        let (center, r2) = circumsphere(&pts, &[0, 1, 2]).unwrap();
        assert_abs_diff_eq!(center[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(center[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r2, 2.0, epsilon = 1e-12);

        let flat = vec![
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![2.0, 0.0]),
        ];
        assert!(circumsphere(&flat, &[0, 1, 2]).is_none());
    }
}
