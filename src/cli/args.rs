//! Top-level CLI definition

use clap::{Parser, Subcommand};

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::diff::DiffArgs;
use crate::cli::commands::extract::ExtractArgs;
use crate::cli::commands::produce::ProduceArgs;

#[derive(Parser, Debug)]
#[command(
    name = "bomwerk",
    version,
    about = "Extract, enrich, and verify bills of materials from CAD echo output"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub struct GlobalOpts {
    /// Print extra diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress status output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract technical BOM records from CAD echo output
    Extract(ExtractArgs),

    /// Enrich technical records into a production BOM using a parts catalog
    Produce(ProduceArgs),

    /// Compare a BOM snapshot against a golden reference
    Diff(DiffArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
