// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Pairwise interaction graphs over the first K points of a cloud.
//!
//! K = min(|cloud|, cap), where `cap` is the number of entities the external
//! correlation model can accept. Edges are unordered index pairs in [0, K).

use std::collections::BTreeSet;

use qsn_math::PointCloud;
use serde::{Deserialize, Serialize};

use crate::complex::SimplicialComplex;

/// Which pairs of entities interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionPolicy {
    /// `(i, (i + 1) mod K)` for every i: a closed ring, ignoring geometry.
    #[default]
    CyclicRing,
    /// Every pair of indices sharing a simplex.
    SimplexAdjacency,
}

/// Unordered pair of distinct indices, in the order it was emitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InteractionEdge {
    a: usize,
    b: usize,
}

impl InteractionEdge {
    fn new(a: usize, b: usize) -> Option<Self> {
        (a != b).then_some(Self { a, b })
    }

    /// Endpoints as emitted, e.g. `(4, 0)` for the ring's closing edge.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Endpoints with the smaller index first.
    pub fn key(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    pub fn touches(&self, idx: usize) -> bool {
        self.a == idx || self.b == idx
    }
}

impl PartialEq for InteractionEdge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for InteractionEdge {}

impl std::hash::Hash for InteractionEdge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A set of interaction edges over the index range [0, K).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionGraph {
    size: usize,
    policy: InteractionPolicy,
    edges: Vec<InteractionEdge>,
}

impl InteractionGraph {
    fn from_pairs(
        size: usize,
        policy: InteractionPolicy,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let edges = pairs
            .into_iter()
            .filter_map(|(a, b)| InteractionEdge::new(a, b))
            .filter(|e| seen.insert(e.key()))
            .collect();
        Self {
            size,
            policy,
            edges,
        }
    }

    /// Number of entities K.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn policy(&self) -> InteractionPolicy {
        self.policy
    }

    pub fn edges(&self) -> &[InteractionEdge] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        let key = (a.min(b), a.max(b));
        self.edges.iter().any(|e| e.key() == key)
    }

    pub fn degree(&self, idx: usize) -> usize {
        self.edges.iter().filter(|e| e.touches(idx)).count()
    }

    /// Edges as emitted `(i, j)` pairs, for handing to an external consumer.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(InteractionEdge::endpoints).collect()
    }
}

fn entity_count(points: usize, cap: usize) -> usize {
    points.min(cap)
}

/// Ring graph over the first `min(|cloud|, cap)` points.
///
/// K = 2 collapses to the single edge (0, 1); K ≤ 1 has no edges.
pub fn build_interactions(cloud: &PointCloud, cap: usize) -> InteractionGraph {
    let k = entity_count(cloud.len(), cap);
    let graph = InteractionGraph::from_pairs(
        k,
        InteractionPolicy::CyclicRing,
        (0..k).map(|i| (i, (i + 1) % k)),
    );
    tracing::debug!(k, edges = graph.num_edges(), "built ring interactions");
    graph
}

/// Adjacency graph from shared simplices, restricted to indices below K.
pub fn build_adjacency_interactions(complex: &SimplicialComplex, cap: usize) -> InteractionGraph {
    let k = entity_count(complex.num_points(), cap);
    let pairs: BTreeSet<(usize, usize)> = complex
        .simplices()
        .iter()
        .flat_map(|s| s.edges())
        .filter(|&(a, b)| a < k && b < k)
        .collect();
    let graph = InteractionGraph::from_pairs(k, InteractionPolicy::SimplexAdjacency, pairs);
    tracing::debug!(k, edges = graph.num_edges(), "built adjacency interactions");
    graph
}

impl InteractionGraph {
    /// Build with an explicit policy.
    pub fn build(complex: &SimplicialComplex, cap: usize, policy: InteractionPolicy) -> Self {
        match policy {
            InteractionPolicy::CyclicRing => build_interactions(complex.cloud(), cap),
            InteractionPolicy::SimplexAdjacency => build_adjacency_interactions(complex, cap),
        }
    }
}
