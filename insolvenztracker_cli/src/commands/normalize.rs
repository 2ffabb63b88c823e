//! The `normalize` subcommand: show how company names are canonicalized.

use clap::Args;
use insolvenztracker_lib::normalize;

use crate::output::{print_rows, NormalizedRow, OutputFormat};

#[derive(Args)]
pub struct NormalizeArgs {
    /// Company names to normalize
    #[arg(required = true)]
    pub names: Vec<String>,
}

pub fn run(args: &NormalizeArgs, format: &OutputFormat) {
    let rows: Vec<NormalizedRow> = args
        .names
        .iter()
        .map(|name| NormalizedRow {
            input: name.clone(),
            normalized: normalize(name),
        })
        .collect();
    print_rows(rows, format);
}
