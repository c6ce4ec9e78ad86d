// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Hexagonal "Flower of Life" ring layout.
//!
//! The origin comes first; ring r ∈ [1, num_rings] then contributes six
//! centers at angles k·60° (k ∈ [0, 6)) and distance r·radius·φ. Output size
//! is 1 + 6·num_rings. Pure and deterministic.

use std::f64::consts::FRAC_PI_3;

use anyhow::{ensure, Result};
use qsn_math::PHI;
use serde::{Deserialize, Serialize};

/// Centers per ring.
pub const RING_SLOTS: usize = 6;

/// A circle center of the planar pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingCenter {
    pub x: f64,
    pub y: f64,
    /// 0 for the origin, otherwise 1..=num_rings.
    pub ring: usize,
    /// Angular slot k within the ring (0 for the origin).
    pub slot: usize,
}

impl RingCenter {
    pub fn distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Generate the ring layout. `radius` must be finite and non-negative.
pub fn generate_rings(radius: f64, num_rings: usize) -> Result<Vec<RingCenter>> {
    ensure!(
        radius.is_finite() && radius >= 0.0,
        "ring radius must be finite and non-negative, got {radius}"
    );

    let mut centers = Vec::with_capacity(1 + RING_SLOTS * num_rings);
    centers.push(RingCenter {
        x: 0.0,
        y: 0.0,
        ring: 0,
        slot: 0,
    });

    for ring in 1..=num_rings {
        let distance = ring as f64 * radius * PHI;
        for slot in 0..RING_SLOTS {
            let angle = slot as f64 * FRAC_PI_3;
            centers.push(RingCenter {
                x: distance * angle.cos(),
                y: distance * angle.sin(),
                ring,
                slot,
            });
        }
    }
    Ok(centers)
}
