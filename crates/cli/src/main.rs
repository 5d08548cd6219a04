use anyhow::Result;
use billiards::api::{
    canonical_rotation, canonicalize_edge_path, counts_for_edge_path, fans_for_edge_path,
    EdgePath, PathStudy, StudyCfg,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod probability;
mod provenance;
mod stats;
mod summary;
mod winding;

use summary::ApexArg;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Billiard path studies and path-data statistics")]
struct Cmd {
    /// Optional run tag; recorded in provenance sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Boundary graph, spine and count forms of one path
    Study {
        #[arg(long)]
        path: EdgePath,
        /// Apex `X,Y`; fractions stay exact
        #[arg(long)]
        apex: Option<ApexArg>,
        /// Rotate the path to its canonical form first
        #[arg(long)]
        canonicalize: bool,
    },
    /// One constraint function: polynomial in x, y, or its value at an apex
    Constraint {
        #[arg(long)]
        path: EdgePath,
        #[arg(long)]
        left: usize,
        #[arg(long)]
        right: usize,
        #[arg(long)]
        apex: Option<ApexArg>,
    },
    /// Canonical rotation of a closed path
    Canonical {
        #[arg(long)]
        path: EdgePath,
    },
    /// Fans, count form and minimal ancestor of a path
    Counts {
        #[arg(long)]
        path: EdgePath,
    },
    /// Tally count forms over a CSV (`x,y,path`) or text file
    Stats {
        #[arg(long)]
        input: PathBuf,
        /// Per-coordinate table; `.parquet` or CSV
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Winding numbers of the paths in a text file
    Winding {
        #[arg(long)]
        input: PathBuf,
    },
    /// Binomial tail `P(X >= successes)` for `X ~ Bin(trials, p)`
    Probability {
        #[arg(long)]
        trials: u64,
        #[arg(long)]
        successes: u64,
        #[arg(long)]
        p: f64,
    },
}

fn main() -> Result<()> {
    // stdout carries the JSON results.
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Study {
            path,
            apex,
            canonicalize,
        } => {
            let s = summary::study_summary(&path, StudyCfg { canonicalize }, apex.as_ref());
            print_json(&s)
        }
        Action::Constraint {
            path,
            left,
            right,
            apex,
        } => constraint(path, left, right, apex),
        Action::Canonical { path } => canonical(path),
        Action::Counts { path } => counts(path),
        Action::Stats { input, out } => run_stats(input, out, cmd.tag),
        Action::Winding { input } => {
            let paths = winding::read_paths(&input)?;
            tracing::info!(input = %input.display(), paths = paths.len(), "winding");
            print_json(&winding::WindingReport::from_paths(&paths))
        }
        Action::Probability {
            trials,
            successes,
            p,
        } => print_json(&probability::binomial_tail(trials, successes, p)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn constraint(path: EdgePath, left: usize, right: usize, apex: Option<ApexArg>) -> Result<()> {
    let study = PathStudy::new(path);
    if !study.is_well_formed() {
        tracing::warn!(path = %study.path(), "path is not canonical; constraint may be meaningless");
    }
    let value = summary::constraint_value(&study, left, right, apex.as_ref())?;
    print_json(&json!({
        "path": study.path().to_string(),
        "left": left,
        "right": right,
        "value": value,
    }))
}

fn canonical(path: EdgePath) -> Result<()> {
    let rotation = canonical_rotation(&path)?;
    print_json(&json!({
        "path": path.to_string(),
        "rotation": rotation,
        "canonical": canonicalize_edge_path(&path).to_string(),
    }))
}

fn counts(path: EdgePath) -> Result<()> {
    let fans: Vec<_> = fans_for_edge_path(&path)
        .iter()
        .map(|fan| {
            json!({
                "path_index": fan.path_index,
                "angle_index": fan.angle_index,
                "orientation": fan.orientation,
                "starts_on_base_edge": fan.starts_on_base_edge,
                "length": fan.length,
            })
        })
        .collect();
    let form = counts_for_edge_path(&path);
    print_json(&json!({
        "path": path.to_string(),
        "fans": fans,
        "count_form": form.to_string(),
        "minimal_ancestor": form.minimal_ancestor().to_string(),
        "is_minimal": form.is_minimal(),
    }))
}

fn run_stats(input: PathBuf, out: Option<PathBuf>, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), tag = ?tag, "stats");
    let mut table = stats::PathStatsTable::new();
    let (used, skipped) = stats::load(&mut table, &input)?;
    if let Some(out) = &out {
        stats::write_frame(&table, out)?;
        let payload = provenance::Payload::new(
            "stats",
            json!({ "data_points": used, "skipped_rows": skipped }),
        )
        .with_input(&input)
        .with_tag(tag);
        provenance::write_sidecar(out, &payload)?;
    }
    print_json(&stats::report(&table, used, skipped))
}
