//! Time-series table loading

mod datetime;
mod errors;
mod loader;
mod primitive_array_ref;
mod table;
#[cfg(feature = "excel")]
mod workbook;

#[cfg(test)]
mod tests;

pub use errors::Error;
pub use loader::load;
pub use table::{ColumnData, Table};

/// Logical name the detected time column is renamed to.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Input file formats the loader understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Workbook,
}

impl InputFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(InputFormat::Csv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(InputFormat::Workbook),
            _ => None,
        }
    }
}
