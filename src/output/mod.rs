//! Flattening, preview and CSV persistence of aggregated results.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use arrow_array::StringArray;
use chrono::DateTime;

use crate::query::AggregatedResult;
use crate::storage::TIMESTAMP_COLUMN;


/// Bucket start layout in the output; the fraction is only printed when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Rows shown before the output is written.
pub const PREVIEW_ROWS: usize = 5;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One row per bucket: `[timestamp, <col1>_<stat1>, <col1>_<stat2>, ...]`.
pub fn format(result: &AggregatedResult) -> Result<RecordBatch, Error> {
    let timestamps: Vec<String> = result
        .bucket_starts
        .iter()
        .map(|&ns| format_timestamp(ns))
        .collect();

    let mut fields = vec![Field::new(TIMESTAMP_COLUMN, DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(result.columns.len() + 1);
    arrays.push(Arc::new(StringArray::from(timestamps)));

    for column in &result.columns {
        fields.push(Field::new(column.name(), DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(column.values.clone())));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

pub fn format_timestamp(ns: i64) -> String {
    DateTime::from_timestamp_nanos(ns)
        .naive_utc()
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Pretty-printed table of the first `rows` rows.
pub fn preview(batch: &RecordBatch, rows: usize) -> Result<String, Error> {
    let head = batch.slice(0, rows.min(batch.num_rows()));
    Ok(pretty_format_batches(&[head])?.to_string())
}

/// Writes `batch` as CSV with a header row, replacing any existing file.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    writer.into_inner().flush()?;
    log::info!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}
