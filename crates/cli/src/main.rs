use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use homology::api::{
    BettiCfg, BettiNumbers, ComplexCfg, PointCloud, RankMethod, RipsComplex, ThresholdCfg,
};
use provenance::Provenance;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Betti-number sweeps over Vietoris–Rips complexes")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sweep thresholds and append `B0, B1, B2, epsilon` lines to a log
    Sweep {
        #[command(flatten)]
        pipeline: PipelineArgs,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        #[arg(long, default_value_t = 400.0)]
        stop: f64,
        #[arg(long, default_value_t = 1.0)]
        step: f64,
        /// Compute B0, B1, B2 on three threads per step
        #[arg(long)]
        parallel: bool,
        /// Also write an `epsilon, B_0, B_1, B_2` table (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Evaluate one threshold and print the Betti numbers as JSON
    Betti {
        #[command(flatten)]
        pipeline: PipelineArgs,
        #[arg(long)]
        threshold: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct PipelineArgs {
    /// CSV with a header row; 2 or 3 coordinate columns
    #[arg(long)]
    input: PathBuf,
    /// epsilon = threshold * scale
    #[arg(long, default_value_t = 0.1)]
    scale: f64,
    /// disk radius = epsilon * radius_ratio
    #[arg(long, default_value_t = 0.5)]
    radius_ratio: f64,
    /// Highest face dimension to materialise (B2 needs 3)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(3..))]
    max_dim: u64,
    #[arg(long, value_enum, default_value_t = Rank::Svd)]
    rank: Rank,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Rank {
    Svd,
    Exact,
}

/// Pipeline settings as recorded in provenance and `betti` output.
#[derive(Debug, Serialize)]
struct Settings<'a> {
    input: &'a Path,
    points: usize,
    dim: usize,
    scale: f64,
    radius_ratio: f64,
    max_face_dim: u64,
    rank: Rank,
}

#[derive(Debug, Serialize)]
struct SweepParams<'a> {
    #[serde(flatten)]
    settings: Settings<'a>,
    start: f64,
    stop: f64,
    step: f64,
    steps: usize,
    parallel: bool,
}

impl PipelineArgs {
    fn build(&self) -> Result<RipsComplex> {
        let rows = io::read_points(&self.input)?;
        let points = PointCloud::new(&rows)
            .with_context(|| format!("validating points in {}", self.input.display()))?;
        let rank = match self.rank {
            Rank::Svd => RankMethod::Svd,
            Rank::Exact => RankMethod::Exact,
        };
        let vr = RipsComplex::with_cfg(
            points,
            ThresholdCfg {
                scale: self.scale,
                radius_ratio: self.radius_ratio,
            },
            ComplexCfg {
                max_face_dim: Some(usize::try_from(self.max_dim)?),
            },
            BettiCfg { rank },
        )?;
        Ok(vr)
    }

    fn settings(&self, vr: &RipsComplex) -> Settings<'_> {
        Settings {
            input: &self.input,
            points: vr.graph().n_nodes(),
            dim: vr.graph().points().dim(),
            scale: self.scale,
            radius_ratio: self.radius_ratio,
            max_face_dim: self.max_dim,
            rank: self.rank,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Sweep {
            pipeline,
            out,
            start,
            stop,
            step,
            parallel,
            table,
        } => {
            let range = SweepRange { start, stop, step };
            sweep(&pipeline, &out, range, parallel, table.as_deref(), cmd.tag)
        }
        Action::Betti {
            pipeline,
            threshold,
        } => betti(&pipeline, threshold),
        Action::Report => report(cmd.tag),
    }
}

struct SweepRange {
    start: f64,
    stop: f64,
    step: f64,
}

fn sweep(
    pipeline: &PipelineArgs,
    out: &Path,
    range: SweepRange,
    parallel: bool,
    table: Option<&Path>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %pipeline.input.display(), out = %out.display(), tag = ?tag, "sweep");
    let thresholds = io::thresholds(range.start, range.stop, range.step)?;
    let mut vr = pipeline.build()?;
    tracing::info!(points = vr.graph().n_nodes(), steps = thresholds.len(), "sweep_plan");

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(out)
        .with_context(|| format!("opening log {}", out.display()))?;

    let mut results: Vec<BettiNumbers> = Vec::with_capacity(thresholds.len());
    for &t in &thresholds {
        vr.update(t)?;
        let b = if parallel {
            vr.betti_numbers_parallel()?
        } else {
            vr.betti_numbers()?
        };
        writeln!(log, "{}", io::log_line(&b))?;
        log.flush()?;
        tracing::debug!(threshold = t, b0 = b.b0, b1 = b.b1, b2 = b.b2, "step");
        results.push(b);
    }

    let mut prov = Provenance::new(
        tag.as_deref(),
        SweepParams {
            settings: pipeline.settings(&vr),
            start: range.start,
            stop: range.stop,
            step: range.step,
            steps: thresholds.len(),
            parallel,
        },
    )
    .output(out);
    if let Some(table) = table {
        io::write_table(table, &results)?;
        tracing::info!(table = %table.display(), rows = results.len(), "table_written");
        prov = prov.output(table);
    }
    let written = prov.write_next_to(out)?;
    tracing::info!(provenance = %written.display(), "sidecar_written");
    Ok(())
}

#[derive(Serialize)]
struct Evaluation<'a> {
    threshold: f64,
    betti: BettiNumbers,
    edges: usize,
    faces: usize,
    settings: Settings<'a>,
}

fn betti(pipeline: &PipelineArgs, threshold: f64) -> Result<()> {
    let mut vr = pipeline.build()?;
    let betti = vr.evaluate(threshold)?;
    let eval = Evaluation {
        threshold,
        betti,
        edges: vr.graph().n_edges(),
        faces: vr.complex().n_faces_total(),
        settings: pipeline.settings(&vr),
    };
    println!("{}", serde_json::to_string_pretty(&eval)?);
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let prov = Provenance::new(tag.as_deref(), ());
    println!("{}", serde_json::to_string_pretty(&prov)?);
    Ok(())
}
