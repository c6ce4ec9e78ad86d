// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod complex;
pub mod delaunay;
pub mod interaction;

pub use complex::{DegeneracyReason, Simplex, SimplicialComplex, Triangulation};
pub use delaunay::triangulate;
pub use interaction::{
    build_adjacency_interactions, build_interactions, InteractionEdge, InteractionGraph,
    InteractionPolicy,
};
