// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! End-to-end cut-and-project pipeline.
//!
//! lattice → projection chain → window → triangulation → interaction graph,
//! plus the independent ring pattern. Every stage reads the previous stage's
//! output by index into a single `PointCloud`.

use anyhow::Result;
use qsn_math::lattice::E8Subset;
use qsn_math::{filter_window, project_chain, PointCloud, ProjectionBasis};
use qsn_mesh::{triangulate, InteractionGraph, Triangulation};
use qsn_viz::{generate_rings, RenderScene, RingCenter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PipelineConfig;
use crate::correlation::CorrelationRequest;

/// Everything one run produces, in stage order.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub lattice_points: usize,
    /// Projected points before the window.
    pub projected: PointCloud,
    pub bases: Vec<ProjectionBasis>,
    /// Triangulation of the windowed cloud.
    pub triangulation: Triangulation,
    pub interactions: InteractionGraph,
    pub request: CorrelationRequest,
    pub rings: Vec<RingCenter>,
    pub scene: RenderScene,
}

impl PipelineOutput {
    /// The windowed cloud every index refers to.
    pub fn cloud(&self) -> &PointCloud {
        self.triangulation.cloud()
    }
}

/// A validated pipeline configuration ready to run.
#[derive(Debug, Clone)]
pub struct QuasicrystalPipeline {
    config: PipelineConfig,
}

impl QuasicrystalPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run with a generator seeded from `seed`.
    pub fn run_seeded(&self, seed: u64) -> Result<PipelineOutput> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng)
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PipelineOutput> {
        let cfg = &self.config;
        tracing::info!(
            dimension = cfg.lattice.dimension,
            stages = ?cfg.projection.stages,
            radius = cfg.window.radius,
            "pipeline start"
        );

        // Ring layout is pure; build it first so a bad ring config fails
        // before any random number is drawn.
        let (rings, ring_radius) = match &cfg.rings {
            Some(r) => (generate_rings(r.radius, r.num_rings)?, r.radius),
            None => (Vec::new(), 0.0),
        };

        let lattice = E8Subset::new(cfg.lattice.dimension)?.generate(cfg.lattice.vertex_limit);
        tracing::debug!(points = lattice.len(), "generated lattice");

        let chain = project_chain(
            &lattice,
            cfg.lattice.dimension,
            &cfg.projection.stages,
            cfg.projection.basis,
            rng,
        )?;

        let windowed = filter_window(&chain.cloud, cfg.window.radius)?;
        let triangulation = triangulate(windowed);
        let complex = triangulation.clone().into_complex();

        let interactions =
            InteractionGraph::build(&complex, cfg.interaction.cap, cfg.interaction.policy);
        let request = CorrelationRequest::from_graph(&interactions, cfg.interaction.shots)?;

        let scene = RenderScene::from_complex(&complex).with_rings(&rings, ring_radius)?;

        tracing::info!(
            kept = triangulation.cloud().len(),
            simplices = triangulation.simplices().len(),
            complete = triangulation.is_complete(),
            entities = interactions.size(),
            edges = interactions.num_edges(),
            "pipeline finished"
        );

        Ok(PipelineOutput {
            lattice_points: lattice.len(),
            projected: chain.cloud,
            bases: chain.bases,
            triangulation,
            interactions,
            request,
            rings,
            scene,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let mut cfg = PipelineConfig::default();
        cfg.window.radius = f64::NAN;
        assert!(QuasicrystalPipeline::new(cfg).is_err());
    }

    #[test]
    fn test_correlation_preset_shapes() {
        let pipeline = QuasicrystalPipeline::new(PipelineConfig::correlation_model()).unwrap();
        let out = pipeline.run_seeded(42).unwrap();
        assert_eq!(out.lattice_points, 20);
        assert_eq!(out.projected.len(), 20);
        assert_eq!(out.projected.dim(), 3);
        assert_eq!(out.bases.len(), 1);
        assert_eq!(out.rings.len(), 13);
        assert_eq!(out.scene.circles.len(), 13);
        assert_eq!(out.scene.points.len(), out.cloud().len());
        assert_eq!(out.interactions.size(), out.cloud().len().min(10));
        assert_eq!(out.request.num_qubits, out.interactions.size());
        assert_eq!(out.request.shots, 1000);
    }

    #[test]
    fn test_chained_preset_uses_two_bases() {
        let pipeline = QuasicrystalPipeline::new(PipelineConfig::chained_projection()).unwrap();
        let out = pipeline.run_seeded(3).unwrap();
        assert_eq!(out.lattice_points, 60);
        assert_eq!(out.bases.len(), 2);
        assert_eq!(out.bases[0].to_dim(), 4);
        assert_eq!(out.bases[1].to_dim(), 3);
        assert!(out.rings.is_empty());
    }

    #[test]
    fn test_same_seed_same_output() {
        let pipeline = QuasicrystalPipeline::new(PipelineConfig::ising_model()).unwrap();
        let a = pipeline.run_seeded(11).unwrap();
        let b = pipeline.run_seeded(11).unwrap();
        assert_eq!(a.projected, b.projected);
        assert_eq!(a.triangulation, b.triangulation);
        assert_eq!(a.interactions, b.interactions);
    }
}
