//! The `score` subcommand: compare two company names.

use clap::Args;
use insolvenztracker_lib::{hybrid_score, normalize, token_set_ratio, token_sort_ratio};

use crate::output::{print_rows, OutputFormat, ScoreRow};

#[derive(Args)]
pub struct ScoreArgs {
    /// First company name
    pub a: String,

    /// Second company name
    pub b: String,
}

/// Normalize both names and score them.
pub fn score_names(a: &str, b: &str) -> ScoreRow {
    let a = normalize(a);
    let b = normalize(b);
    ScoreRow {
        token_set: token_set_ratio(&a, &b),
        token_sort: token_sort_ratio(&a, &b),
        hybrid: hybrid_score(&a, &b),
        a,
        b,
    }
}

pub fn run(args: &ScoreArgs, format: &OutputFormat) {
    print_rows(vec![score_names(&args.a, &args.b)], format);
}
