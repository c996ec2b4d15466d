// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cw: run certwatch reconciliation passes from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use cw_adapters::{JsonDirSource, WorklistSource};
use cw_core::SystemClock;
use cw_engine::{NameNormalizer, ReconcilePipeline, ReconcileSettings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cw", about = "Certification worklist reconciler", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a reconciliation pass over a snapshot directory
    Run {
        /// Directory holding the snapshot files (roster.json, ...)
        #[arg(long)]
        data: PathBuf,
        /// Organizational unit to reconcile; omit to cover all units
        #[arg(long)]
        unit: Option<String>,
        /// TOML settings file overriding the default policy
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Compute and report without writing the worklist back
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the canonical matching key for credential names
    Normalize {
        /// Snapshot directory whose translation dictionary to apply
        #[arg(long)]
        data: Option<PathBuf>,
        /// Raw credential names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Run { data, unit, settings, dry_run } => run(data, unit, settings, dry_run),
        Command::Normalize { data, names } => normalize(data, names),
    }
}

fn run(
    data: PathBuf,
    unit: Option<String>,
    settings_path: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let settings = match settings_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            ReconcileSettings::from_toml_str(&text)
                .with_context(|| format!("parsing settings from {}", path.display()))?
        }
        None => ReconcileSettings::default(),
    };

    let pipeline = ReconcilePipeline::new(JsonDirSource::new(data), settings, SystemClock);
    let outcome = if dry_run {
        pipeline.preview(unit.as_deref())
    } else {
        pipeline.run(unit.as_deref())
    };

    println!(
        "tasks: {} ({} created, {} updated, {} closed)",
        outcome.tasks.len(),
        outcome.created,
        outcome.updated,
        outcome.closed
    );
    if dry_run {
        println!("dry run: worklist not persisted");
    } else if !outcome.persisted {
        println!("worklist NOT persisted, see warnings");
    }
    if !outcome.warnings.is_empty() {
        println!("warnings:");
        for warning in &outcome.warnings {
            println!("  - {warning}");
        }
    }

    if !dry_run && !outcome.persisted {
        std::process::exit(1);
    }
    Ok(())
}

fn normalize(data: Option<PathBuf>, names: Vec<String>) -> anyhow::Result<()> {
    let normalizer = match data {
        Some(dir) => {
            let translations = JsonDirSource::new(dir)
                .load_translations()
                .context("loading translation dictionary")?;
            NameNormalizer::new(translations)
        }
        None => NameNormalizer::empty(),
    };

    for name in names {
        println!("{}\t{}", name, normalizer.normalize(&name));
    }
    Ok(())
}
