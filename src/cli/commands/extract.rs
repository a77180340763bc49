//! `bomwerk extract` - recover technical BOM records from echo output

use std::io::Read;
use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::extract::{extract_records, RecordStamp};
use crate::core::record;
use crate::export;

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Product name stamped onto every record
    #[arg(long, short = 'p')]
    pub product: Option<String>,

    /// Product version stamped onto every record
    #[arg(long)]
    pub version: Option<String>,

    /// Read a CAD .echo file instead of stdin
    #[arg(long)]
    pub echo: Option<PathBuf>,

    /// Also write the records to a JSONL file
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Also write the records to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Exit successfully even when no records are found
    #[arg(long)]
    pub allow_empty: bool,
}

pub fn run(args: ExtractArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let product = args
        .product
        .or(config.product)
        .ok_or_else(|| miette::miette!("no product name given (use --product or {})", Config::FILE_NAME))?;
    let version = args
        .version
        .or(config.version)
        .ok_or_else(|| miette::miette!("no product version given (use --version or {})", Config::FILE_NAME))?;

    let text = read_input(args.echo.as_deref())?;
    if global.debug {
        let head: String = text.chars().take(400).collect();
        eprintln!("DEBUG first 400 chars:\n{head}");
    }

    let stamp = RecordStamp { product, version };
    let records = extract_records(&text, &stamp);

    // JSONL always goes to stdout, even when empty - handy for pipes.
    let jsonl_text = record::to_jsonl(&records);
    print!("{jsonl_text}");

    if records.is_empty() && !args.allow_empty {
        return Err(miette::miette!("no BOM_ITEM records found in input"));
    }

    if let Some(path) = &args.jsonl {
        ensure_parent(path)?;
        std::fs::write(path, &jsonl_text)
            .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
        if !global.quiet {
            eprintln!("{} JSONL exported to {}", style("✓").green(), path.display());
        }
    }

    if let Some(path) = &args.csv {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)
            .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
        export::csv::write_technical(file, &records)
            .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
        if !global.quiet {
            eprintln!("{} CSV exported to {}", style("✓").green(), path.display());
        }
    }

    Ok(())
}

/// Read the echo text from a file (lossy on invalid UTF-8) or stdin.
fn read_input(echo: Option<&std::path::Path>) -> Result<String> {
    match echo {
        Some(path) => {
            let bytes = std::fs::read(path)
                .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| miette::miette!("failed to read stdin: {}", e))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

pub(crate) fn ensure_parent(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| miette::miette!("failed to create {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}
