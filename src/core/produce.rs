//! Production BOM derivation - catalog resolution and geometry rollups
//!
//! Turns one technical record into one production record: part numbers
//! resolved against the catalog, optional sub-assemblies normalized, and the
//! two derived geometric quantities computed. The transform is a pure
//! function of (record, catalog); no state carries across records.

use std::f64::consts::PI;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::core::catalog::PartsCatalog;
use crate::core::record::BomRecord;

/// Bottom-option value meaning "no option fitted".
const BOTTOM_OPT_NONE: &str = "zonder";

/// One enriched, procurement-facing BOM row.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionBom {
    pub product: String,
    pub version: String,
    pub bom_tag: String,
    pub material: String,
    pub material_code: String,
    pub material_part_no: String,
    pub material_supplier: String,
    pub length_mm: Value,
    pub diameter_mm: Value,
    pub thickness_mm: Value,
    pub top_type: String,
    pub top_part_no: String,
    pub top_supplier: String,
    pub bottom_type: String,
    pub bottom_option: String,
    pub bottom_part_no: String,
    pub bottom_option_part_no: String,
    pub ring_count: usize,
    pub ring_width_mm: Value,
    pub ring_thickness_mm: Value,
    pub reinforce_enabled: String,
    pub reinforcement_type: String,
    pub reinforcement_part_no: String,
    pub reinforcement_length_mm: Value,
    pub productzijde: String,
    pub surface_area_m2: f64,
    pub cut_length_estimate_m: f64,
}

/// Curved outer surface of a cylindrical product, mm² → m², rounded to
/// 4 decimal places.
pub fn surface_area_m2(diameter_mm: f64, length_mm: f64) -> f64 {
    round_to(PI * diameter_mm * length_mm / 1_000_000.0, 4)
}

/// Total material consumption in metres: one full-length perimeter cut plus
/// one extra perimeter cut per ring, rounded to 2 decimal places.
pub fn cut_length_estimate_m(diameter_mm: f64, length_mm: f64, ring_count: usize) -> f64 {
    let perimeter = PI * diameter_mm;
    round_to((perimeter * length_mm + ring_count as f64 * perimeter) / 1_000.0, 2)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Derive one production record from a technical record and the catalog.
pub fn produce_record(record: &BomRecord, catalog: &PartsCatalog) -> ProductionBom {
    let length_mm = number_field(record, "L");
    let diameter_mm = number_field(record, "D");
    let length = length_mm.as_f64().unwrap_or(0.0);
    let diameter = diameter_mm.as_f64().unwrap_or(0.0);

    // Material
    let medium = text_field(record, "medium");
    let material = catalog.resolve("material", &medium);

    // Top closure: resolved only for closed tops.
    let top = text_field(record, "top");
    let open_top = truthy(record.get("open_top"));
    let (top_type, top_part_no, top_supplier) = if !open_top && !top.is_empty() {
        let part = catalog.resolve("top", &top);
        (top, part.part_no, part.supplier)
    } else {
        let top_type = if open_top { "open".to_string() } else { String::new() };
        (top_type, String::new(), String::new())
    };

    // Bottom closure is always resolved; the option only when fitted.
    let bottom = text_field(record, "bottom");
    let bottom_part = catalog.resolve("bottom", &bottom);
    let bottom_opt = text_field(record, "bottom_opt");
    let (bottom_option, bottom_option_part_no) =
        if !bottom_opt.is_empty() && bottom_opt != BOTTOM_OPT_NONE {
            let part = catalog.resolve("bottom_opt", &bottom_opt);
            (bottom_opt, part.part_no)
        } else {
            (String::new(), String::new())
        };

    // Rings
    let ring_count = record
        .get("rings")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    // Reinforcement
    let reinforce = truthy(record.get("reinforce"));
    let rein_side = text_field(record, "rein_side");
    let (reinforcement_type, reinforcement_part_no, reinforcement_length_mm) =
        if reinforce && !rein_side.is_empty() {
            let part = catalog.resolve("reinforcement", &rein_side);
            let total = span_total(record.get("rein_spans"));
            (rein_side, part.part_no, total)
        } else {
            (String::new(), String::new(), Value::Number(Number::from(0)))
        };

    ProductionBom {
        product: text_field(record, "product"),
        version: text_field(record, "version"),
        bom_tag: text_field(record, "bom_tag"),
        material: medium,
        material_code: material.material_code,
        material_part_no: material.part_no,
        material_supplier: material.supplier,
        length_mm,
        diameter_mm,
        thickness_mm: number_field(record, "t"),
        top_type,
        top_part_no,
        top_supplier,
        bottom_type: bottom,
        bottom_option,
        bottom_part_no: bottom_part.part_no,
        bottom_option_part_no,
        ring_count,
        ring_width_mm: number_field(record, "ring_w"),
        ring_thickness_mm: number_field(record, "ring_t"),
        reinforce_enabled: if reinforce { "Yes" } else { "No" }.to_string(),
        reinforcement_type,
        reinforcement_part_no,
        reinforcement_length_mm,
        productzijde: text_field(record, "productzijde"),
        surface_area_m2: surface_area_m2(diameter, length),
        cut_length_estimate_m: cut_length_estimate_m(diameter, length, ring_count),
    }
}

/// Sum of (end - start) over all 2-element spans; spans of any other arity
/// are skipped. Integer spans produce an integer total.
fn span_total(spans: Option<&Value>) -> Value {
    let Some(spans) = spans.and_then(Value::as_array) else {
        return Value::Number(Number::from(0));
    };

    let mut total = 0.0f64;
    let mut all_integer = true;
    for span in spans {
        let Some(span) = span.as_array() else { continue };
        if span.len() != 2 {
            continue;
        }
        let (start, end) = (&span[0], &span[1]);
        if let (Some(start), Some(end)) = (start.as_f64(), end.as_f64()) {
            total += end - start;
            all_integer &= start.fract() == 0.0
                && end.fract() == 0.0
                && span[0].is_i64()
                && span[1].is_i64();
        }
    }

    if all_integer {
        Value::Number(Number::from(total as i64))
    } else {
        Number::from_f64(total).map_or(Value::Number(Number::from(0)), Value::Number)
    }
}

/// String field, defaulting to empty; non-string scalars render as their
/// compact JSON text.
fn text_field(record: &BomRecord, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric passthrough field; absent or null becomes integer zero so the
/// original number representation survives into the report.
fn number_field(record: &BomRecord, key: &str) -> Value {
    match record.get(key) {
        None | Some(Value::Null) => Value::Number(Number::from(0)),
        Some(value) => value.clone(),
    }
}

/// Loose truthiness for tool-emitted flags: false, 0, null, empty string,
/// and empty array all count as unset.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
