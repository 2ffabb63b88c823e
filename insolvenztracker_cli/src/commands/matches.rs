//! The `match` subcommand: check announcements against the client registry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use insolvenztracker_lib::{run_matching, JsonFile, MatchConfig, MatchRecord};

use crate::output::{print_flat_matches, print_json, print_matches, OutputFormat};

/// Arguments for the `match` subcommand.
#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with the client registry snapshot
    #[arg(long)]
    pub clients: PathBuf,

    /// JSON file with scraped insolvency announcements
    #[arg(long)]
    pub announcements: PathBuf,

    /// TOML file with matching settings
    #[arg(long, env = "INSOLVENZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum soft-match score (0-100), overrides the config file
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Keep at most this many soft matches per announcement
    #[arg(long)]
    pub limit: Option<usize>,

    /// Order results by confidence instead of input order
    #[arg(long)]
    pub sorted: bool,

    /// Inline the announcement fields into each JSON match row
    #[arg(long)]
    pub flat: bool,
}

/// Resolve the effective configuration: file first, then flag overrides.
pub fn resolve_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if let Some(cutoff) = args.cutoff {
        config.score_cutoff = cutoff;
    }
    if let Some(limit) = args.limit {
        config.soft_match_limit = Some(limit);
    }

    config.validate()?;
    Ok(config)
}

pub fn run(args: &MatchArgs, format: &OutputFormat) -> Result<()> {
    let config = resolve_config(args)?;

    let report = run_matching(
        &JsonFile::new(&args.clients),
        &JsonFile::new(&args.announcements),
        config,
    )?;

    if report.is_empty() {
        if *format == OutputFormat::Json {
            print_json(&report.matches);
        }
        eprintln!("No matches found.");
        return Ok(());
    }

    let print = |matches: &[MatchRecord]| {
        if args.flat {
            print_flat_matches(matches, format);
        } else {
            print_matches(matches, format);
        }
    };
    if args.sorted {
        print(&report.sorted_by_confidence());
    } else {
        print(&report.matches);
    }

    eprintln!(
        "{} matches ({} exact, {} soft) across {} announcements.",
        report.matches.len(),
        report.stats.exact_records,
        report.stats.soft_records,
        report.stats.announcements_scanned
    );

    Ok(())
}
