pub mod basic;
pub mod datetime;

use super::*;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::{
    array::{Array, Float64Array, TimestampNanosecondArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use arrow_array::StringArray;
use tempfile::{tempdir, TempDir};

pub fn test_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(TIMESTAMP_COLUMN, DataType::Timestamp(TimeUnit::Nanosecond, None), true),
        Field::new("value", DataType::Float64, true),
        Field::new("tag", DataType::Utf8, true),
    ]))
}

pub fn create_test_batch(
    timestamps: Vec<Option<i64>>,
    values: Vec<Option<f64>>,
    tags: Vec<&str>,
) -> RecordBatch {
    RecordBatch::try_new(
        test_schema(),
        vec![
            Arc::new(TimestampNanosecondArray::from(timestamps)),
            Arc::new(Float64Array::from(values)),
            Arc::new(StringArray::from(tags)),
        ],
    )
    .unwrap()
}

/// Writes `contents` to `name` inside a fresh temp dir; keep the dir alive.
pub fn write_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

pub fn ts(s: &str) -> i64 {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap()
        .and_utc()
        .timestamp_nanos_opt()
        .unwrap()
}
