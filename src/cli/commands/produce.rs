//! `bomwerk produce` - transform a technical BOM into a production BOM

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::commands::extract::ensure_parent;
use crate::cli::{table, GlobalOpts};
use crate::core::catalog::PartsCatalog;
use crate::core::config::Config;
use crate::core::produce::{produce_record, ProductionBom};
use crate::core::record::{self, BomRecord};
use crate::export;

#[derive(clap::Args, Debug)]
pub struct ProduceArgs {
    /// Technical BOM JSONL file (from `bomwerk extract`)
    #[arg(long)]
    pub jsonl: PathBuf,

    /// Parts catalog CSV
    #[arg(long)]
    pub parts: Option<PathBuf>,

    /// Output CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output XLSX file (requires the xlsx feature)
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Print a summary table of the production BOM
    #[arg(long)]
    pub table: bool,
}

pub fn run(args: ProduceArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let parts = args
        .parts
        .or(config.parts)
        .ok_or_else(|| miette::miette!("no parts catalog given (use --parts or {})", Config::FILE_NAME))?;

    let catalog = PartsCatalog::load(&parts).map_err(|e| miette::miette!("{}", e))?;
    if global.debug {
        eprintln!("Loaded {} categories", catalog.category_count());
    }

    let records = load_technical_records(&args.jsonl)?;
    if global.debug {
        eprintln!("Loaded {} BOM records", records.len());
    }

    let production: Vec<ProductionBom> = records
        .iter()
        .map(|record| produce_record(record, &catalog))
        .collect();
    if global.debug {
        eprintln!("Produced {} production records", production.len());
    }

    if let Some(path) = &args.csv {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)
            .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
        export::csv::write_production(file, &production)
            .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
        println!("{} CSV exported to {}", style("✓").green(), path.display());
    }

    if let Some(path) = &args.xlsx {
        write_xlsx(path, &production)?;
    }

    if args.table {
        println!("{}", table::production_preview(&production));
    }

    if !global.quiet {
        println!("{} BOM production complete", style("✓").green());
    }
    Ok(())
}

/// Load the technical BOM and insist on object-shaped records.
fn load_technical_records(path: &std::path::Path) -> Result<Vec<BomRecord>> {
    let values = record::read_jsonl_path(path).map_err(|e| miette::miette!("{}", e))?;
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(miette::miette!(
                "record {} in {} is not a JSON object",
                idx + 1,
                path.display()
            )),
        })
        .collect()
}

#[cfg(feature = "xlsx")]
fn write_xlsx(path: &std::path::Path, production: &[ProductionBom]) -> Result<()> {
    ensure_parent(path)?;
    export::xlsx::write_workbook(path, production)
        .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
    println!("{} XLSX exported to {}", style("✓").green(), path.display());
    Ok(())
}

#[cfg(not(feature = "xlsx"))]
fn write_xlsx(_path: &std::path::Path, _production: &[ProductionBom]) -> Result<()> {
    // CSV export has already run at this point; only the spreadsheet
    // capability is missing.
    Err(miette::miette!(
        "XLSX export requested but this build lacks the 'xlsx' feature; rebuild with --features xlsx"
    ))
}
