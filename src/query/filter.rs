use arrow::array::{Scalar, TimestampNanosecondArray};
use arrow::compute::kernels::cmp::{gt_eq, lt_eq};
use arrow::compute::{and, filter_record_batch, is_not_null};

use crate::storage::{Table, TIMESTAMP_COLUMN};

use super::QueryError;

/// Requested columns that the table does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub missing: Vec<String>,
    pub available: Vec<String>,
}

/// Result of the filter stage. `MissingColumns` is a fatal usage error that
/// the caller reports before stopping the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Filtered(Table),
    MissingColumns(MissingColumns),
}

/// Keeps rows whose timestamp lies in `[time_from_ms, time_to_ms]` (either
/// bound optional) and, when `columns` is given, only those data columns in
/// the requested order. Rows without a timestamp are always dropped.
pub fn filter(
    table: &Table,
    time_from_ms: Option<i64>,
    time_to_ms: Option<i64>,
    columns: Option<&[String]>,
) -> Result<FilterOutcome, QueryError> {
    let projection = match columns {
        Some(requested) => match resolve_columns(table, requested) {
            Ok(indices) => Some(indices),
            Err(missing) => return Ok(FilterOutcome::MissingColumns(missing)),
        },
        None => None,
    };

    let timestamps = table.timestamps();
    let mut mask = is_not_null(timestamps)?;
    if let Some(from) = time_from_ms {
        let bound = Scalar::new(TimestampNanosecondArray::from(vec![ms_to_nanos(from)]));
        mask = and(&mask, &gt_eq(timestamps, &bound)?)?;
    }
    if let Some(to) = time_to_ms {
        let bound = Scalar::new(TimestampNanosecondArray::from(vec![ms_to_nanos(to)]));
        mask = and(&mask, &lt_eq(timestamps, &bound)?)?;
    }

    let mut batch = filter_record_batch(table.batch(), &mask)?;
    if let Some(indices) = projection {
        batch = batch.project(&indices)?;
    }

    log::info!(
        "Filter kept {} of {} rows and {} data columns",
        batch.num_rows(),
        table.num_rows(),
        batch.num_columns() - 1
    );

    let filtered = Table::try_new(batch)
        .map_err(|e| QueryError::TypeError(e.to_string()))?;
    Ok(FilterOutcome::Filtered(filtered))
}

/// Batch column indices for the projection, timestamp first.
fn resolve_columns(table: &Table, requested: &[String]) -> Result<Vec<usize>, MissingColumns> {
    let mut indices = vec![0];
    let mut missing = Vec::new();

    for name in requested.iter().filter(|name| name.as_str() != TIMESTAMP_COLUMN) {
        match table.data_column_index(name) {
            Some(index) if !indices.contains(&index) => indices.push(index),
            Some(_) => {}
            None => missing.push(name.clone()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(MissingColumns {
            missing,
            available: table.data_column_names(),
        })
    }
}

fn ms_to_nanos(ms: i64) -> i64 {
    ms.saturating_mul(1_000_000)
}
