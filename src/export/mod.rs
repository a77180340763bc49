//! Tabular exporters for technical and production BOMs

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization failed: {0}")]
    Row(#[from] serde_json::Error),

    #[cfg(feature = "xlsx")]
    #[error("XLSX write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
