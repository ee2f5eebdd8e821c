use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use arrow_array::StringArray;

pub mod interval;

use crate::storage::{Table, TIMESTAMP_COLUMN};

pub const MINUTE: i64 = 60 * 1_000_000_000;
pub const HOUR: i64 = 60 * MINUTE;

/// 2024-01-01T00:00:00Z in nanoseconds.
pub const BASE: i64 = 1_704_067_200 * 1_000_000_000;

fn test_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(TIMESTAMP_COLUMN, DataType::Timestamp(TimeUnit::Nanosecond, None), true),
        Field::new("cpu", DataType::Float64, true),
        Field::new("host", DataType::Utf8, true),
        Field::new("requests", DataType::Int64, true),
    ]))
}

pub fn create_test_table(
    timestamps: Vec<Option<i64>>,
    cpu: Vec<Option<f64>>,
    requests: Vec<Option<i64>>,
) -> Table {
    let hosts: Vec<String> = (0..timestamps.len()).map(|i| format!("host-{}", i % 2)).collect();
    let batch = RecordBatch::try_new(
        test_schema(),
        vec![
            Arc::new(TimestampNanosecondArray::from(timestamps)),
            Arc::new(Float64Array::from(cpu)),
            Arc::new(StringArray::from(hosts)),
            Arc::new(Int64Array::from(requests)),
        ],
    )
    .unwrap();

    Table::try_new(batch).unwrap()
}

/// `00:00, 00:20, 00:50, 01:10` with cpu `[10, 20, 30, 40]`.
pub fn hourly_table() -> Table {
    create_test_table(
        vec![Some(BASE), Some(BASE + 20 * MINUTE), Some(BASE + 50 * MINUTE), Some(BASE + 70 * MINUTE)],
        vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)],
        vec![Some(1), Some(2), Some(3), Some(4)],
    )
}
