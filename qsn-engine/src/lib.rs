// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod config;
pub mod pipeline;
pub mod correlation;
pub mod transmission;
pub mod batch;

pub use config::{
    InteractionConfig, LatticeConfig, PipelineConfig, ProjectionConfig, RingConfig, WindowConfig,
};
pub use pipeline::{PipelineOutput, QuasicrystalPipeline};
pub use correlation::{CorrelationModel, CorrelationRequest, OutcomeCounts};
pub use transmission::estimate_transmission;
pub use batch::{generate_tetrahedron_batch, BatchSummary, TetrahedronSample};
