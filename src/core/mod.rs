//! Core module - records, extraction, catalog, production transform, diff

pub mod catalog;
pub mod config;
pub mod diff;
pub mod extract;
pub mod produce;
pub mod record;

pub use catalog::{CatalogError, PartRef, PartsCatalog};
pub use config::Config;
pub use diff::{compare, records_match, DiffReport, Mismatch, DEFAULT_EPSILON};
pub use extract::{extract_records, RecordStamp, MARKER};
pub use produce::{cut_length_estimate_m, produce_record, surface_area_m2, ProductionBom};
pub use record::{read_jsonl, read_jsonl_path, to_jsonl, BomRecord, RecordError};
