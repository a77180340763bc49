//! CSV export
//!
//! Technical records have an open-ended field set, so their header is the
//! union of all keys: a fixed preferred ordering first, any remaining keys
//! appended in sorted order. Production records carry a fixed schema and
//! serialize straight from the struct.

use std::collections::BTreeSet;
use std::io::Write;

use serde_json::Value;

use crate::core::produce::ProductionBom;
use crate::core::record::BomRecord;
use crate::export::ExportError;

/// Preferred column ordering for technical BOM exports. Keys not listed
/// here land after these, sorted.
pub const PREFERRED_COLUMNS: &[&str] = &[
    "product",
    "version",
    "bom_tag",
    "L",
    "D",
    "t",
    "medium",
    "top",
    "open_top",
    "bottom",
    "bottom_opt",
    "rings",
    "ring_w",
    "ring_t",
    "reinforce",
    "rein_side",
    "rein_spans",
    "productzijde",
];

/// Compute the header for a set of technical records.
pub fn technical_header(records: &[BomRecord]) -> Vec<String> {
    let keys: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys())
        .map(String::as_str)
        .collect();

    let mut header: Vec<String> = PREFERRED_COLUMNS
        .iter()
        .copied()
        .filter(|key| keys.contains(key))
        .map(|key| key.to_string())
        .collect();
    header.extend(
        keys.iter()
            .copied()
            .filter(|key| !PREFERRED_COLUMNS.contains(key))
            .map(|key| key.to_string()),
    );
    header
}

/// Write technical records as CSV with the union header.
pub fn write_technical<W: Write>(writer: W, records: &[BomRecord]) -> Result<(), ExportError> {
    let header = technical_header(records);
    if header.is_empty() {
        return Ok(());
    }
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&header)?;
    for record in records {
        csv_writer.write_record(header.iter().map(|key| cell_text(record.get(key))))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write production records as CSV in the fixed column order.
pub fn write_production<W: Write>(
    writer: W,
    records: &[ProductionBom],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render one cell: absent keys and nulls are empty, strings are raw, and
/// anything nested is its compact JSON text.
pub(crate) fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
