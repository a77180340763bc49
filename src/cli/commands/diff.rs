//! `bomwerk diff` - gate regressions by comparing BOM snapshots

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::diff::{compare, DEFAULT_EPSILON};
use crate::core::record;

#[derive(clap::Args, Debug)]
pub struct DiffArgs {
    /// Golden reference JSONL file
    pub golden: PathBuf,

    /// Candidate JSONL file (defaults to stdin)
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Absolute tolerance for numeric comparisons
    #[arg(long)]
    pub epsilon: Option<f64>,
}

pub fn run(args: DiffArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let epsilon = args.epsilon.or(config.epsilon).unwrap_or(DEFAULT_EPSILON);

    let golden = record::read_jsonl_path(&args.golden).map_err(|e| miette::miette!("{}", e))?;
    let candidate = match &args.current {
        Some(path) => record::read_jsonl_path(path).map_err(|e| miette::miette!("{}", e))?,
        None => record::read_jsonl(std::io::stdin().lock()).map_err(|e| miette::miette!("{}", e))?,
    };

    let report = compare(&golden, &candidate, epsilon);
    report
        .write_to(std::io::stderr())
        .map_err(|e| miette::miette!("failed to write report: {}", e))?;

    if report.is_match() {
        if !global.quiet {
            println!(
                "{} {} record(s) match the golden reference",
                style("✓").green(),
                report.golden_len
            );
        }
        Ok(())
    } else {
        Err(miette::miette!("BOM snapshot does not match golden reference"))
    }
}
