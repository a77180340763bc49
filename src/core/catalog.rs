//! Parts catalog - resolving (category, enum value) to purchasing references
//!
//! The catalog is loaded once per run from a CSV file and read-only from
//! then on. Lookups never fail: a pair with no catalog row resolves to a
//! flagged placeholder so unmapped references stay visible in the output
//! instead of aborting the run.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read parts catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parts catalog: {0}")]
    Csv(#[from] csv::Error),
}

/// One resolved catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartRef {
    pub material_code: String,
    pub part_no: String,
    pub description: String,
    pub unit: String,
    pub supplier: String,
}

impl PartRef {
    /// Placeholder for a lookup with no catalog row. The sentinel part
    /// number keeps unmapped references visible in downstream reports.
    pub fn unmapped(enum_value: &str) -> Self {
        Self {
            material_code: enum_value.to_string(),
            part_no: format!("UNMAPPED-{enum_value}"),
            description: "UNMAPPED".to_string(),
            unit: "?".to_string(),
            supplier: "?".to_string(),
        }
    }

    /// Whether this entry is the unmapped placeholder.
    pub fn is_unmapped(&self) -> bool {
        self.part_no.starts_with("UNMAPPED-")
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    category: String,
    enum_value: String,
    #[serde(default)]
    material_code: String,
    #[serde(default)]
    part_no: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    supplier: String,
}

/// Lookup table keyed by (category, enum value).
#[derive(Debug, Default)]
pub struct PartsCatalog {
    categories: HashMap<String, HashMap<String, PartRef>>,
}

impl PartsCatalog {
    /// Load the catalog from a CSV file with columns
    /// `category, enum_value, material_code, part_no, description, unit, supplier`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load the catalog from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut categories: HashMap<String, HashMap<String, PartRef>> = HashMap::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize() {
            let row: CatalogRow = row?;
            categories.entry(row.category).or_default().insert(
                row.enum_value,
                PartRef {
                    material_code: row.material_code,
                    part_no: row.part_no,
                    description: row.description,
                    unit: row.unit,
                    supplier: row.supplier,
                },
            );
        }
        Ok(Self { categories })
    }

    /// Resolve a (category, enum value) pair.
    ///
    /// Missing pairs are a valid outcome and yield the unmapped placeholder.
    pub fn resolve(&self, category: &str, enum_value: &str) -> PartRef {
        self.categories
            .get(category)
            .and_then(|entries| entries.get(enum_value))
            .cloned()
            .unwrap_or_else(|| PartRef::unmapped(enum_value))
    }

    /// Number of distinct categories loaded.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}
