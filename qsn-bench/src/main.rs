//! QSN pipeline driver
//!
//! Runs one pipeline preset (or a JSON config), a batch of random golden-ratio
//! tetrahedra and the qubit-transmission estimate, printing one line per
//! stage. With `--json` stdout carries only the render scene and the
//! correlation request; logs go to stderr.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use qsn_engine::batch::BatchSummary;
use qsn_engine::{
    estimate_transmission, generate_tetrahedron_batch, PipelineConfig, PipelineOutput,
    QuasicrystalPipeline,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 20 points, orthogonal 8→3, rings
    Correlation,
    /// 20 points, row-normalized 8→3
    Ising,
    /// 60 points, row-normalized 8→4→3
    Chained,
}

impl Preset {
    fn config(self) -> PipelineConfig {
        match self {
            Preset::Correlation => PipelineConfig::correlation_model(),
            Preset::Ising => PipelineConfig::ising_model(),
            Preset::Chained => PipelineConfig::chained_projection(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for every random stage
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Built-in pipeline configuration
    #[arg(long, value_enum, default_value_t = Preset::Correlation)]
    preset: Preset,

    /// JSON pipeline configuration (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the render scene and correlation request as JSON
    #[arg(long)]
    json: bool,

    /// Number of random tetrahedra to generate
    #[arg(long, default_value_t = 500)]
    tetrahedra: usize,

    /// Monte Carlo samples for the transmission estimate
    #[arg(long, default_value_t = 1000)]
    transmission_samples: usize,
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PipelineConfig::from_json(&text)
                .with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(args.preset.config()),
    }
}

fn print_pipeline(out: &PipelineOutput, elapsed_ms: f64) {
    println!(
        "[pipeline] {} lattice points -> {} projected ({}D) -> {} in window ({elapsed_ms:.2}ms)",
        out.lattice_points,
        out.projected.len(),
        out.projected.dim(),
        out.cloud().len(),
    );
    match out.triangulation.reason() {
        None => println!(
            "[mesh] {} simplices, {} faces",
            out.triangulation.simplices().len(),
            out.scene.faces.len(),
        ),
        Some(reason) => println!("[mesh] degenerate ({reason}), rendering bare points"),
    }
    println!(
        "[graph] K = {}, {} edges ({:?}), {} shots",
        out.request.num_qubits,
        out.request.edges.len(),
        out.request.policy,
        out.request.shots,
    );
    if !out.rings.is_empty() {
        println!("[rings] {} circle centers", out.rings.len());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = load_config(&args)?;
    let pipeline = QuasicrystalPipeline::new(config)?;

    let start = Instant::now();
    let out = pipeline.run_seeded(args.seed)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if args.json {
        let payload = json!({
            "seed": args.seed,
            "config": pipeline.config(),
            "scene": out.scene,
            "correlation_request": out.request,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("=== QSN pipeline (seed {}) ===\n", args.seed);
    print_pipeline(&out, elapsed_ms);

    if args.tetrahedra > 0 {
        let start = Instant::now();
        let batch = generate_tetrahedron_batch(args.tetrahedra, 1.0, args.seed)?;
        let summary = BatchSummary::from_samples(&batch);
        println!(
            "[tetrahedra] {} generated, {} triangulated, {} degenerate, {} faces in {:.2}ms",
            summary.samples,
            summary.complete,
            summary.degenerate,
            summary.faces,
            start.elapsed().as_secs_f64() * 1000.0,
        );
    }

    if args.transmission_samples > 0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let p = estimate_transmission(
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            args.transmission_samples,
            &mut rng,
        )?;
        println!(
            "[transmission] P(1) = {p:.4} over {} samples",
            args.transmission_samples
        );
    }

    tracing::info!("done");
    Ok(())
}
