//! Styled XLSX export for production BOMs
//!
//! Optional capability behind the `xlsx` cargo feature: CSV export never
//! depends on it, and a build without the feature reports spreadsheet
//! requests as unavailable instead of silently skipping them.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use serde_json::Value;

use crate::core::produce::ProductionBom;
use crate::export::ExportError;

/// Column subset shown on the spreadsheet, in order.
pub const SHEET_COLUMNS: &[&str] = &[
    "product",
    "version",
    "bom_tag",
    "material",
    "material_code",
    "material_part_no",
    "length_mm",
    "diameter_mm",
    "thickness_mm",
    "top_type",
    "top_part_no",
    "bottom_type",
    "bottom_option",
    "ring_count",
    "ring_width_mm",
    "ring_thickness_mm",
    "reinforce_enabled",
    "reinforcement_type",
    "reinforcement_length_mm",
    "productzijde",
    "surface_area_m2",
    "cut_length_estimate_m",
];

const HEADER_FILL: Color = Color::RGB(0x4472C4);
const MAX_COLUMN_WIDTH: f64 = 30.0;

/// Millimetre and area columns get a two-decimal number format.
fn is_numeric_column(name: &str) -> bool {
    name.contains("mm") || name.contains("m2")
}

/// Write the production BOM as a styled workbook with a single "BOM" sheet.
pub fn write_workbook(path: &Path, records: &[ProductionBom]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("BOM")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    let number_format = Format::new()
        .set_num_format("0.00")
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let cell_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);

    // Header length sets the width floor for every column.
    let mut widths: Vec<f64> = SHEET_COLUMNS
        .iter()
        .map(|name| (name.len() + 2) as f64)
        .collect();

    for (col, name) in SHEET_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (row, record) in records.iter().enumerate() {
        let fields = row_fields(record)?;
        let row = row as u32 + 1;
        for (col, name) in SHEET_COLUMNS.iter().enumerate() {
            let format = if is_numeric_column(name) {
                &number_format
            } else {
                &cell_format
            };
            let value = fields.get(*name).unwrap_or(&Value::Null);
            let rendered = write_cell(worksheet, row, col as u16, value, format)?;
            if rendered.len() as f64 > widths[col] {
                widths[col] = rendered.len() as f64;
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, width.min(MAX_COLUMN_WIDTH))?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Flatten one record to a name → value map for column-driven writing.
fn row_fields(record: &ProductionBom) -> Result<serde_json::Map<String, Value>, ExportError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

/// Write one cell and return its display text (used for column sizing).
fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    format: &Format,
) -> Result<String, ExportError> {
    match value {
        Value::Number(n) => {
            let number = n.as_f64().unwrap_or(0.0);
            worksheet.write_number_with_format(row, col, number, format)?;
            Ok(n.to_string())
        }
        Value::String(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
            Ok(s.clone())
        }
        Value::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
            Ok(b.to_string())
        }
        Value::Null => {
            worksheet.write_string_with_format(row, col, "", format)?;
            Ok(String::new())
        }
        other => {
            // Nested values should not appear in a fixed-schema record, but
            // render them as JSON text rather than dropping the cell.
            let text = other.to_string();
            worksheet.write_string_with_format(row, col, &text, format)?;
            Ok(text)
        }
    }
}
