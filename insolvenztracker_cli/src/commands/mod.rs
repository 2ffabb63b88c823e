//! CLI subcommand implementations.

pub mod matches;
pub mod normalize;
pub mod score;
