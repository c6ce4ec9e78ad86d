// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Renderer payload for a triangulated point cloud.
//!
//! `RenderScene` accumulates points, triangular faces and planar circles and
//! serializes them to JSON. The renderer owns all drawing; this module only
//! guarantees that every face index is valid for `points`.

use anyhow::{ensure, Result};
use qsn_mesh::SimplicialComplex;
use serde::{Deserialize, Serialize};

use crate::color::{radial_color, rgb_to_hex};
use crate::rings::RingCenter;

/// Fill color and opacity for a class of scene objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: String,
    pub opacity: f64,
}

impl Style {
    pub fn new(rgb: (f32, f32, f32), opacity: f64) -> Self {
        Self {
            color: rgb_to_hex(rgb.0, rgb.1, rgb.2),
            opacity,
        }
    }

    pub fn faces() -> Self {
        Self::new((0.0, 0.0, 1.0), 0.3)
    }

    pub fn circles() -> Self {
        Self::new((1.0, 0.0, 0.0), 0.2)
    }
}

/// A point, padded or truncated to three coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub position: [f64; 3],
    pub color: String,
}

/// A filled triangle given by three indices into `RenderScene::points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneFace {
    pub vertices: [usize; 3],
}

/// A planar circle of the ring pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneCircle {
    pub center: [f64; 2],
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    pub points: Vec<ScenePoint>,
    pub faces: Vec<SceneFace>,
    pub circles: Vec<SceneCircle>,
    pub face_style: Style,
    pub circle_style: Style,
}

impl Default for RenderScene {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            faces: Vec::new(),
            circles: Vec::new(),
            face_style: Style::faces(),
            circle_style: Style::circles(),
        }
    }
}

impl RenderScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points of the complex colored by distance from the origin, plus every
    /// triangular face of every simplex. A bare complex yields points only.
    pub fn from_complex(complex: &SimplicialComplex) -> Self {
        let mut scene = Self::new();
        let positions = complex.cloud().to_xyz();
        let max_norm = positions
            .iter()
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .fold(0.0_f64, f64::max);

        for position in positions {
            let norm = (position[0] * position[0]
                + position[1] * position[1]
                + position[2] * position[2])
                .sqrt();
            let t = if max_norm > 0.0 { norm / max_norm } else { 0.0 };
            let (r, g, b) = radial_color(t as f32);
            scene.points.push(ScenePoint {
                position,
                color: rgb_to_hex(r, g, b),
            });
        }

        for simplex in complex.simplices() {
            scene.add_simplex_faces(simplex.vertices());
        }

        tracing::debug!(
            points = scene.points.len(),
            faces = scene.faces.len(),
            "scene built from complex"
        );
        scene
    }

    /// Every 3-subset of the simplex's vertices: 1 for a triangle, 4 for a
    /// tetrahedron, 10 for a 4-simplex.
    fn add_simplex_faces(&mut self, vertices: &[usize]) {
        let n = vertices.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    self.faces.push(SceneFace {
                        vertices: [vertices[i], vertices[j], vertices[k]],
                    });
                }
            }
        }
    }

    /// Add one circle of `radius` per ring center.
    pub fn add_rings(&mut self, centers: &[RingCenter], radius: f64) -> Result<()> {
        ensure!(
            radius.is_finite() && radius >= 0.0,
            "circle radius must be finite and non-negative, got {radius}"
        );
        self.circles.extend(centers.iter().map(|c| SceneCircle {
            center: c.position(),
            radius,
        }));
        Ok(())
    }

    pub fn with_rings(mut self, centers: &[RingCenter], radius: f64) -> Result<Self> {
        self.add_rings(centers, radius)?;
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
