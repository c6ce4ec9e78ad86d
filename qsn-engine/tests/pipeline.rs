use anyhow::Result;
use qsn_engine::{
    generate_tetrahedron_batch, BatchSummary, CorrelationModel, CorrelationRequest, OutcomeCounts,
    PipelineConfig, QuasicrystalPipeline,
};
use qsn_mesh::{DegeneracyReason, InteractionPolicy};

/// Reports the parity pattern of the edge list for every shot.
struct EdgeParity;

impl CorrelationModel for EdgeParity {
    fn run(&self, request: &CorrelationRequest) -> Result<OutcomeCounts> {
        let mut bits = vec!['0'; request.num_qubits];
        for &(a, _) in &request.edges {
            bits[a] = if bits[a] == '0' { '1' } else { '0' };
        }
        let mut counts = OutcomeCounts::new();
        counts.record(bits.into_iter().collect::<String>(), request.shots);
        Ok(counts)
    }
}

#[test]
fn capped_lattice_end_to_end() {
    let pipeline = QuasicrystalPipeline::new(PipelineConfig::correlation_model()).unwrap();
    for seed in 0..10 {
        let out = pipeline.run_seeded(seed).unwrap();
        let n = out.cloud().len();
        assert!(n <= 20);

        for p in out.cloud().iter() {
            assert!(p.norm_sq() < 4.0);
        }

        match out.triangulation.reason() {
            None => {
                assert!(!out.triangulation.simplices().is_empty());
                for s in out.triangulation.simplices() {
                    assert_eq!(s.vertices().len(), 4);
                    assert!(s.vertices().iter().all(|&v| v < n));
                }
            }
            Some(DegeneracyReason::TooFewPoints { .. }) => assert!(n < 4),
            // The window keeps or drops antipodal pairs together, so small
            // clouds can be planar.
            Some(DegeneracyReason::AffinelyDependent { .. }) => assert!(n < 6),
            Some(other) => panic!("seed {seed}: unexpected degeneracy {other}"),
        }

        for face in &out.scene.faces {
            assert!(face.vertices.iter().all(|&v| v < out.scene.points.len()));
        }
        if !out.triangulation.is_complete() {
            assert!(out.scene.faces.is_empty());
        }

        let k = n.min(10);
        assert_eq!(out.request.num_qubits, k);
        if k >= 3 {
            assert_eq!(out.request.edges.len(), k);
            assert_eq!(out.request.edges.last(), Some(&(k - 1, 0)));
        }

        let counts = EdgeParity.run(&out.request).unwrap();
        counts.validate(&out.request).unwrap();
    }
}

#[test]
fn adjacency_policy_follows_simplices() {
    let mut cfg = PipelineConfig::chained_projection();
    cfg.interaction.policy = InteractionPolicy::SimplexAdjacency;
    let pipeline = QuasicrystalPipeline::new(cfg).unwrap();
    let out = pipeline.run_seeded(5).unwrap();

    let k = out.interactions.size();
    for &(a, b) in &out.request.edges {
        assert!(a < k && b < k && a != b);
        assert!(out
            .triangulation
            .simplices()
            .iter()
            .any(|s| s.vertices().contains(&a) && s.vertices().contains(&b)));
    }
    if !out.triangulation.is_complete() {
        assert!(out.request.edges.is_empty());
    }
}

#[test]
fn scene_serializes_with_rings() {
    let pipeline = QuasicrystalPipeline::new(PipelineConfig::correlation_model()).unwrap();
    let out = pipeline.run_seeded(42).unwrap();
    let json = out.scene.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["circles"].as_array().map(Vec::len), Some(13));
    assert_eq!(value["face_style"]["opacity"], 0.3);
}

#[test]
fn five_hundred_tetrahedra() {
    let batch = generate_tetrahedron_batch(500, 1.0, 123).unwrap();
    let summary = BatchSummary::from_samples(&batch);
    assert_eq!(summary.samples, 500);
    assert_eq!(summary.complete, 500);
    assert_eq!(summary.faces, 2000);
}
