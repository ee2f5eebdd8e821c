//! Resampling into fixed-width buckets and per-bucket statistics.
//!
//! Buckets are half-open `[start, start + width)` intervals aligned to the
//! midnight of the day holding the earliest timestamp, so any width that
//! divides a day lines up with the wall clock. Every bucket between the first
//! and the last observation is emitted, empty ones included.

use crate::storage::{ColumnData, Table};

use super::interval::{BucketWidth, NANOS_PER_DAY};
use super::statistic::{dedup_statistics, Statistic};
use super::QueryError;

/// Upper bound on emitted buckets for a single resample.
pub const MAX_BUCKETS: usize = 10_000_000;

/// One output column: a statistic of a source column, aligned with the buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedColumn {
    pub source: String,
    pub statistic: Statistic,
    pub values: Vec<Option<f64>>,
}

impl AggregatedColumn {
    /// Composite name, `<column>_<statistic>`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.source, self.statistic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    pub width: BucketWidth,
    /// Bucket starts in nanoseconds since the epoch, ascending.
    pub bucket_starts: Vec<i64>,
    pub columns: Vec<AggregatedColumn>,
}

impl AggregatedResult {
    pub fn num_buckets(&self) -> usize {
        self.bucket_starts.len()
    }

    pub fn column(&self, name: &str) -> Option<&AggregatedColumn> {
        self.columns.iter().find(|c| c.name() == name)
    }
}

/// Row indices of one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub start: i64,
    pub rows: Vec<usize>,
}

pub fn aggregate(
    table: &Table,
    width: &BucketWidth,
    statistics: &[Statistic],
) -> Result<AggregatedResult, QueryError> {
    let statistics = dedup_statistics(statistics);
    let buckets = group_by_time(table, width)?;
    log::info!(
        "Resampled {} rows into {} buckets of {}",
        table.num_rows(),
        buckets.len(),
        width
    );

    let mut columns = Vec::new();
    for (name, data) in table.data_columns() {
        let values = match data {
            ColumnData::Numeric(values) => values,
            ColumnData::Other(data_type) => {
                log::debug!("Skipping non-numeric column `{}` ({})", name, data_type);
                continue;
            }
        };

        let mut results: Vec<Vec<Option<f64>>> =
            vec![Vec::with_capacity(buckets.len()); statistics.len()];
        let mut bucket_values = Vec::new();
        for bucket in &buckets {
            bucket_values.clear();
            bucket_values.extend(bucket.rows.iter().map(|&row| values[row]));
            for (slot, stat) in results.iter_mut().zip(&statistics) {
                slot.push(stat.reduce(&bucket_values));
            }
        }

        columns.extend(statistics.iter().zip(results).map(|(stat, values)| AggregatedColumn {
            source: name.clone(),
            statistic: *stat,
            values,
        }));
    }

    Ok(AggregatedResult {
        width: *width,
        bucket_starts: buckets.iter().map(|b| b.start).collect(),
        columns,
    })
}

/// Assigns every timestamped row to its bucket. The returned buckets are
/// contiguous and ascending; rows inside a bucket keep table order.
pub fn group_by_time(table: &Table, width: &BucketWidth) -> Result<Vec<Bucket>, QueryError> {
    let timestamps = table.timestamps();
    let (Some(first), Some(last)) = (
        timestamps.iter().flatten().min(),
        timestamps.iter().flatten().max(),
    ) else {
        return Ok(Vec::new());
    };

    let interval_ns = width.as_nanos();
    // the midnight before the earliest representable instant is below i64::MIN
    let origin = (first as i128).div_euclid(NANOS_PER_DAY as i128) * NANOS_PER_DAY as i128;
    let first_bucket = align(first, origin, interval_ns)?;
    let last_bucket = align(last, origin, interval_ns)?;

    let count = ((last_bucket as i128 - first_bucket as i128) / interval_ns as i128) + 1;
    if count > MAX_BUCKETS as i128 {
        return Err(QueryError::TooManyBuckets {
            buckets: count,
            limit: MAX_BUCKETS,
        });
    }

    let mut buckets: Vec<Bucket> = (0..count as i64)
        .map(|i| Bucket {
            start: first_bucket + i * interval_ns,
            rows: Vec::new(),
        })
        .collect();

    for (row, ts) in timestamps.iter().enumerate() {
        if let Some(ts) = ts {
            let index = ((ts as i128 - first_bucket as i128) / interval_ns as i128) as usize;
            buckets[index].rows.push(row);
        }
    }

    Ok(buckets)
}

/// Start of the bucket containing `ts`.
fn align(ts: i64, origin: i128, interval_ns: i64) -> Result<i64, QueryError> {
    let offset = (ts as i128 - origin).div_euclid(interval_ns as i128);
    i64::try_from(origin + offset * interval_ns as i128)
        .map_err(|_| QueryError::BucketOutOfRange { timestamp: ts })
}
