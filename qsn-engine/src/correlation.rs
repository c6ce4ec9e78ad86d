// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Hand-off to an external correlation model.
//!
//! The core supplies K and the interaction edges; the consumer builds and runs
//! its own model and returns an outcome histogram over K-bit strings. Nothing
//! here simulates the model.

use std::collections::BTreeMap;

use anyhow::{bail, ensure, Result};
use qsn_mesh::{InteractionGraph, InteractionPolicy};
use serde::{Deserialize, Serialize};

/// What a correlation-model consumer receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationRequest {
    /// K: entities are indexed `[0, K)`
    pub num_qubits: usize,
    /// Unordered interaction pairs, each with both ends `< K`
    pub edges: Vec<(usize, usize)>,
    pub policy: InteractionPolicy,
    /// Number of repeated trials
    pub shots: u64,
}

impl CorrelationRequest {
    pub fn from_graph(graph: &InteractionGraph, shots: u64) -> Result<Self> {
        ensure!(shots > 0, "shots must be > 0");
        Ok(Self {
            num_qubits: graph.size(),
            edges: graph.pairs(),
            policy: graph.policy(),
            shots,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An external engine that turns a request into outcome counts.
pub trait CorrelationModel {
    fn run(&self, request: &CorrelationRequest) -> Result<OutcomeCounts>;
}

/// Bitstring → number of trials that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeCounts(pub BTreeMap<String, u64>);

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn record(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relative frequency of `bitstring` (0.0 for an empty histogram).
    pub fn frequency(&self, bitstring: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / total as f64
        }
    }

    /// Most frequent outcome; ties go to the lexicographically smallest key.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .fold(None, |best: Option<(&str, u64)>, (k, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k.as_str(), v)),
            })
    }

    /// Check the consumer's answer against the request: every key is a K-bit
    /// string of `0`/`1` and the counts sum to `shots`.
    pub fn validate(&self, request: &CorrelationRequest) -> Result<()> {
        for key in self.0.keys() {
            ensure!(
                key.len() == request.num_qubits,
                "outcome {key:?} has {} bits, expected {}",
                key.len(),
                request.num_qubits
            );
            if let Some(bad) = key.chars().find(|c| *c != '0' && *c != '1') {
                bail!("outcome {key:?} contains non-binary character {bad:?}");
            }
        }
        let total = self.total();
        ensure!(
            total == request.shots,
            "outcome counts sum to {total}, expected {} shots",
            request.shots
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsn_math::PointCloud;
    use qsn_mesh::build_interactions;

    /// Every trial reports all-zeros.
    struct Frozen;

    impl CorrelationModel for Frozen {
        fn run(&self, request: &CorrelationRequest) -> Result<OutcomeCounts> {
            let mut counts = OutcomeCounts::new();
            counts.record("0".repeat(request.num_qubits), request.shots);
            Ok(counts)
        }
    }

    fn request(k: usize, shots: u64) -> CorrelationRequest {
        let cloud = PointCloud::from_coords(3, (0..k).map(|i| vec![i as f64, 0.0, 0.0]).collect())
            .unwrap();
        CorrelationRequest::from_graph(&build_interactions(&cloud, 10), shots).unwrap()
    }

    #[test]
    fn test_request_from_ring() {
        let req = request(4, 100);
        assert_eq!(req.num_qubits, 4);
        assert_eq!(req.edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(req.policy, InteractionPolicy::CyclicRing);
        assert!(req.to_json().unwrap().contains("\"num_qubits\": 4"));
    }

    #[test]
    fn test_request_rejects_zero_shots() {
        let cloud = PointCloud::empty(3);
        assert!(CorrelationRequest::from_graph(&build_interactions(&cloud, 10), 0).is_err());
    }

    #[test]
    fn test_model_output_validates() {
        let req = request(5, 1000);
        let counts = Frozen.run(&req).unwrap();
        counts.validate(&req).unwrap();
        assert_eq!(counts.most_frequent(), Some(("00000", 1000)));
        assert_eq!(counts.frequency("00000"), 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        let req = request(3, 10);

        let mut short = OutcomeCounts::new();
        short.record("01", 10);
        assert!(short.validate(&req).is_err());

        let mut non_binary = OutcomeCounts::new();
        non_binary.record("0a1", 10);
        assert!(non_binary.validate(&req).is_err());

        let mut wrong_total = OutcomeCounts::new();
        wrong_total.record("010", 4);
        wrong_total.record("111", 5);
        assert!(wrong_total.validate(&req).is_err());

        wrong_total.record("010", 1);
        assert_eq!(wrong_total.get("010"), 5);
        wrong_total.validate(&req).unwrap();
    }

    #[test]
    fn test_most_frequent_tie_breaks_low() {
        let mut counts = OutcomeCounts::new();
        counts.record("11", 3);
        counts.record("00", 3);
        assert_eq!(counts.most_frequent(), Some(("00", 3)));
        assert!(OutcomeCounts::new().most_frequent().is_none());
    }

    #[test]
    fn test_counts_serialize_as_map() {
        let mut counts = OutcomeCounts::new();
        counts.record("10", 2);
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"10":2}"#);
    }
}
