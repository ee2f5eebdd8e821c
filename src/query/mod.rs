//! Range filtering and resampling aggregation over a loaded [`Table`].
//!
//! [`Table`]: crate::storage::Table

mod aggregate;
mod filter;
mod interval;
mod statistic;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, group_by_time, AggregatedColumn, AggregatedResult, Bucket, MAX_BUCKETS};
pub use filter::{filter, FilterOutcome, MissingColumns};
pub use interval::BucketWidth;
pub use statistic::Statistic;

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Invalid interval {input:?}: {reason}")]
    InvalidInterval { input: String, reason: String },
    #[error("Unknown statistic {0:?}; expected one of min, max, mean, median, mode")]
    UnknownStatistic(String),
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Resampling would produce {buckets} buckets (limit {limit}); use a wider interval or a narrower time range")]
    TooManyBuckets { buckets: i128, limit: usize },
    #[error("Bucket holding timestamp {timestamp}ns starts outside the representable range")]
    BucketOutOfRange { timestamp: i64 },
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
}
