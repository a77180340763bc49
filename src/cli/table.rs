//! Terminal table rendering for production BOM previews

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::core::produce::ProductionBom;
use crate::export::csv::cell_text;

/// Render a compact summary table of the production BOM.
///
/// Shows the columns a planner reaches for first; the full column set lives
/// in the CSV/XLSX exports.
pub fn production_preview(records: &[ProductionBom]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "TAG",
        "MATERIAL",
        "PART NO",
        "L (MM)",
        "D (MM)",
        "RINGS",
        "AREA (M2)",
        "CUT (M)",
    ]);

    for record in records {
        builder.push_record([
            record.bom_tag.clone(),
            record.material.clone(),
            record.material_part_no.clone(),
            cell_text(Some(&record.length_mm)),
            cell_text(Some(&record.diameter_mm)),
            record.ring_count.to_string(),
            record.surface_area_m2.to_string(),
            record.cut_length_estimate_m.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}
