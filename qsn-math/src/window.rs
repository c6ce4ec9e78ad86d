// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Acceptance window: the "cut" of cut-and-project.

use anyhow::{ensure, Result};

use crate::point::PointCloud;

/// Keep exactly the points with `Σ pₖ² < radius²`, in their original order.
///
/// Boundary points are excluded. An empty result is valid. A negative or
/// non-finite radius is a configuration error.
pub fn filter_window(cloud: &PointCloud, radius: f64) -> Result<PointCloud> {
    ensure!(
        radius.is_finite() && radius >= 0.0,
        "window radius must be finite and non-negative, got {radius}"
    );
    let threshold = radius * radius;
    let kept: Vec<_> = cloud
        .iter()
        .filter(|p| p.norm_sq() < threshold)
        .cloned()
        .collect();

    tracing::debug!(
        input = cloud.len(),
        kept = kept.len(),
        radius,
        "applied acceptance window"
    );
    PointCloud::from_points(cloud.dim(), kept)
}
