use std::path::PathBuf;

use clap::Parser;

use crate::query::{BucketWidth, Statistic};

#[derive(Parser, Debug)]
#[command(name = "tsagg", version, about = "Time-Series Data Aggregator")]
pub struct Cli {
    /// Path to input CSV/Excel file
    #[arg(long)]
    pub input: PathBuf,
    /// Grouping interval (e.g., 1h, 1d, 30T, 10s, 1h30min)
    #[arg(long = "group-by")]
    pub group_by: BucketWidth,
    /// Stats to compute: min max mean median mode
    #[arg(long, num_args = 1.., default_value = "mean")]
    pub stats: Vec<Statistic>,
    /// Columns to include (default: all numeric)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
    /// Start timestamp (ms since epoch, inclusive)
    #[arg(long = "timefrom", allow_negative_numbers = true)]
    pub time_from: Option<i64>,
    /// End timestamp (ms since epoch, inclusive)
    #[arg(long = "timeto", allow_negative_numbers = true)]
    pub time_to: Option<i64>,
    /// Optional datetime format string for parsing (strftime syntax)
    #[arg(long = "datetime-format")]
    pub datetime_format: Option<String>,
    /// Output CSV file path
    #[arg(long, default_value = "aggregated_output.csv")]
    pub output: PathBuf,
}

/// Resolved parameters for one run.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub bucket_width: BucketWidth,
    pub statistics: Vec<Statistic>,
    pub columns: Option<Vec<String>>,
    pub time_from_ms: Option<i64>,
    pub time_to_ms: Option<i64>,
    pub datetime_format: Option<String>,
    pub output: PathBuf,
    pub preview_rows: usize,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            bucket_width: cli.group_by,
            statistics: cli.stats,
            columns: cli.columns.filter(|c| !c.is_empty()),
            time_from_ms: cli.time_from,
            time_to_ms: cli.time_to,
            datetime_format: cli.datetime_format,
            output: cli.output,
            preview_rows: crate::output::PREVIEW_ROWS,
        }
    }
}
