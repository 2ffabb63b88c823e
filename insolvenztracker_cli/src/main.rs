mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "insolvenztracker")]
#[command(about = "Check insolvency announcements against a client registry")]
struct Cli {
    /// Output format: table, markdown or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match announcements against clients
    Match(commands::matches::MatchArgs),
    /// Show the normalized form of company names
    Normalize(commands::normalize::NormalizeArgs),
    /// Score two company names against each other
    Score(commands::score::ScoreArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("insolvenztracker=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Match(args) => commands::matches::run(args, &format)?,
        Commands::Normalize(args) => commands::normalize::run(args, &format),
        Commands::Score(args) => commands::score::run(args, &format),
    }

    Ok(())
}
