//! Runtime configuration for the QSN pipeline
//!
//! One struct per stage, wrapped in `PipelineConfig`. Presets reproduce the
//! three observed variants of the pipeline.

use anyhow::{ensure, Context, Result};
use qsn_math::BasisKind;
use qsn_mesh::InteractionPolicy;
use serde::{Deserialize, Serialize};

/// Lattice generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Ambient dimension N (8 for the E8-style subset)
    pub dimension: usize,
    /// Keep only the first `vertex_limit` points in generation order (None = all)
    #[serde(default)]
    pub vertex_limit: Option<usize>,
}

/// Projection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Target dimension of each stage, e.g. `[4, 3]` for 8→4→3
    pub stages: Vec<usize>,
    #[serde(default)]
    pub basis: BasisKind,
}

impl ProjectionConfig {
    /// Dimension of the projected cloud.
    pub fn output_dim(&self) -> Option<usize> {
        self.stages.last().copied()
    }
}

/// Acceptance window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Points with squared norm strictly below radius² are kept
    pub radius: f64,
}

/// Interaction graph settings and the trial count forwarded to the
/// correlation-model consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Maximum number of entities the consumer accepts
    pub cap: usize,
    #[serde(default)]
    pub policy: InteractionPolicy,
    /// Repeated trials requested from the consumer (must be > 0)
    pub shots: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cap: 10,
            policy: InteractionPolicy::CyclicRing,
            shots: 1000,
        }
    }
}

/// Planar ring pattern settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f64,
    pub num_rings: usize,
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub lattice: LatticeConfig,
    pub projection: ProjectionConfig,
    pub window: WindowConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Ring pattern drawn next to the complex (None = no rings)
    #[serde(default)]
    pub rings: Option<RingConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::correlation_model()
    }
}

impl PipelineConfig {
    /// 20 capped points, one orthogonal 8→3 stage, ring graph over 10
    /// entities and a two-ring planar pattern.
    pub fn correlation_model() -> Self {
        Self {
            lattice: LatticeConfig {
                dimension: 8,
                vertex_limit: Some(20),
            },
            projection: ProjectionConfig {
                stages: vec![3],
                basis: BasisKind::Orthogonal,
            },
            window: WindowConfig { radius: 2.0 },
            interaction: InteractionConfig::default(),
            rings: Some(RingConfig {
                radius: 0.3,
                num_rings: 2,
            }),
        }
    }

    /// Like `correlation_model` but with row-normalized bases and no rings.
    pub fn ising_model() -> Self {
        Self {
            projection: ProjectionConfig {
                stages: vec![3],
                basis: BasisKind::RowNormalized,
            },
            rings: None,
            ..Self::correlation_model()
        }
    }

    /// All 60 points through the 8→4→3 chain with row-normalized bases.
    pub fn chained_projection() -> Self {
        Self {
            lattice: LatticeConfig {
                dimension: 8,
                vertex_limit: None,
            },
            projection: ProjectionConfig {
                stages: vec![4, 3],
                basis: BasisKind::RowNormalized,
            },
            window: WindowConfig { radius: 2.0 },
            interaction: InteractionConfig::default(),
            rings: None,
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "correlation" => Some(Self::correlation_model()),
            "ising" => Some(Self::ising_model()),
            "chained" => Some(Self::chained_projection()),
            _ => None,
        }
    }

    /// Reject malformed values. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.lattice.dimension >= 2,
            "lattice dimension must be >= 2, got {}",
            self.lattice.dimension
        );

        let stages = &self.projection.stages;
        ensure!(!stages.is_empty(), "projection needs at least one stage");
        let mut prev = self.lattice.dimension;
        for &dim in stages {
            ensure!(
                dim >= 1 && dim <= prev,
                "projection stage {dim} must lie in [1, {prev}] (stages {stages:?})"
            );
            prev = dim;
        }
        ensure!(
            (2..=4).contains(&prev),
            "final projection dimension must be 2, 3 or 4, got {prev}"
        );

        let radius = self.window.radius;
        ensure!(
            radius.is_finite() && radius >= 0.0,
            "window radius must be finite and non-negative, got {radius}"
        );

        ensure!(self.interaction.shots > 0, "shots must be > 0");

        if let Some(rings) = &self.rings {
            ensure!(
                rings.radius.is_finite() && rings.radius >= 0.0,
                "ring radius must be finite and non-negative, got {}",
                rings.radius
            );
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing pipeline config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
