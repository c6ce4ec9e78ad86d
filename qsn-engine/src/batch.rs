// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Batches of independent random golden-ratio tetrahedra.
//!
//! Sample `i` draws from its own generator seeded by `(seed, i)`, so the batch
//! is identical whether it runs sequentially or on the rayon pool.

use anyhow::{ensure, Result};
use qsn_math::{random_tetrahedron, PointCloud};
use qsn_mesh::{triangulate, Triangulation};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One generated tetrahedron and its triangulation.
#[derive(Debug, Clone)]
pub struct TetrahedronSample {
    pub index: usize,
    pub vertices: [[f64; 3]; 4],
    /// A degenerate outcome keeps the raw vertices and has no faces.
    pub triangulation: Triangulation,
}

impl TetrahedronSample {
    /// Triangular faces to draw (4 per tetrahedron).
    pub fn face_count(&self) -> usize {
        self.triangulation.simplices().len() * 4
    }
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub samples: usize,
    pub complete: usize,
    pub degenerate: usize,
    pub faces: usize,
}

impl BatchSummary {
    pub fn from_samples(samples: &[TetrahedronSample]) -> Self {
        let complete = samples
            .iter()
            .filter(|s| s.triangulation.is_complete())
            .count();
        Self {
            samples: samples.len(),
            complete,
            degenerate: samples.len() - complete,
            faces: samples.iter().map(TetrahedronSample::face_count).sum(),
        }
    }
}

fn sample_seed(seed: u64, index: usize) -> u64 {
    // splitmix64 increment keeps neighbouring indices far apart
    seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn generate_sample(index: usize, size: f64, seed: u64) -> Result<TetrahedronSample> {
    let mut rng = StdRng::seed_from_u64(sample_seed(seed, index));
    let vertices = random_tetrahedron(size, &mut rng)?;
    let cloud = PointCloud::from_coords(3, vertices.iter().map(|v| v.to_vec()).collect())?;
    Ok(TetrahedronSample {
        index,
        vertices,
        triangulation: triangulate(cloud),
    })
}

/// Generate and triangulate `count` tetrahedra scaled by `size`.
pub fn generate_tetrahedron_batch(
    count: usize,
    size: f64,
    seed: u64,
) -> Result<Vec<TetrahedronSample>> {
    ensure!(
        size.is_finite() && size > 0.0,
        "tetrahedron size must be finite and positive, got {size}"
    );

    #[cfg(feature = "parallel")]
    let samples = (0..count)
        .into_par_iter()
        .map(|i| generate_sample(i, size, seed))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let samples = (0..count)
        .map(|i| generate_sample(i, size, seed))
        .collect::<Result<Vec<_>>>()?;

    let summary = BatchSummary::from_samples(&samples);
    tracing::debug!(
        count,
        complete = summary.complete,
        degenerate = summary.degenerate,
        "generated tetrahedron batch"
    );
    Ok(samples)
}
