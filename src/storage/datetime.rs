//! Timestamp column parsing.
//!
//! Everything is normalized to nanoseconds since the Unix epoch in a
//! `Timestamp(Nanosecond, None)` array. Cells that cannot be parsed become
//! nulls; only a column where nothing parses at all is rejected.

use arrow::array::{Array, ArrayRef, TimestampNanosecondArray};
use arrow::datatypes::{DataType, TimeUnit};
use arrow_array::StringArray;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Error;
use super::primitive_array_ref::downcast_arr;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%Y%m%dT%H%M%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Parses the detected time column into nanosecond timestamps.
pub(crate) fn parse_timestamp_column(
    column: &str,
    array: &ArrayRef,
    format: Option<&str>,
) -> Result<TimestampNanosecondArray, Error> {
    if let Some(fmt) = format {
        validate_format(column, fmt)?;
    }

    let parsed = match array.data_type() {
        DataType::Utf8 => {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| parse_error(column, "expected a string column"))?;
            parse_strings(column, strings, format)?
        }
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => {
            let target = DataType::Timestamp(TimeUnit::Nanosecond, None);
            let cast = arrow::compute::cast(array, &target)?;
            cast.as_any()
                .downcast_ref::<TimestampNanosecondArray>()
                .ok_or_else(|| parse_error(column, "cast to nanosecond timestamps failed"))?
                .clone()
        }
        _ => match downcast_arr(array) {
            Some(prim) => {
                let values = (0..prim.len())
                    .map(|i| prim.value(i).and_then(|v| epoch_to_nanos(v.round() as i64)))
                    .collect::<Vec<_>>();
                TimestampNanosecondArray::from(values)
            }
            None => {
                return Err(parse_error(
                    column,
                    &format!("unsupported column type {}", array.data_type()),
                ));
            }
        },
    };

    Ok(parsed)
}

fn parse_strings(
    column: &str,
    strings: &StringArray,
    format: Option<&str>,
) -> Result<TimestampNanosecondArray, Error> {
    let mut non_empty = 0usize;
    let mut failed = 0usize;
    let mut first_failure: Option<String> = None;

    let values: Vec<Option<i64>> = strings
        .iter()
        .map(|cell| {
            let raw = cell.map(str::trim).filter(|s| !s.is_empty())?;
            non_empty += 1;
            let nanos = match format {
                Some(fmt) => parse_with_format(raw, fmt),
                None => parse_generic(raw),
            };
            if nanos.is_none() {
                failed += 1;
                first_failure.get_or_insert_with(|| raw.to_string());
            }
            nanos
        })
        .collect();

    if non_empty > 0 && failed == non_empty {
        return Err(parse_error(
            column,
            &format!(
                "none of the {} values could be parsed (first value {:?})",
                non_empty,
                first_failure.unwrap_or_default()
            ),
        ));
    }
    if failed > 0 {
        log::warn!(
            "{} of {} values in `{}` could not be parsed and will be ignored (first: {:?})",
            failed,
            non_empty,
            column,
            first_failure.unwrap_or_default()
        );
    }

    Ok(TimestampNanosecondArray::from(values))
}

fn validate_format(column: &str, fmt: &str) -> Result<(), Error> {
    if fmt.trim().is_empty() || StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(parse_error(column, &format!("invalid datetime format {:?}", fmt)));
    }
    Ok(())
}

pub(crate) fn parse_with_format(value: &str, fmt: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
        return dt.timestamp_nanos_opt();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
        return naive_to_nanos(dt);
    }
    NaiveDate::parse_from_str(value, fmt)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(naive_to_nanos)
}

pub(crate) fn parse_generic(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        // 20240131 reads as a calendar date rather than epoch seconds
        if value.len() == 8 {
            if let Ok(d) = NaiveDate::parse_from_str(value, "%Y%m%d") {
                return d.and_hms_opt(0, 0, 0).and_then(naive_to_nanos);
            }
        }
        return value.parse::<i64>().ok().and_then(epoch_to_nanos);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp_nanos_opt();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.timestamp_nanos_opt();
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return naive_to_nanos(dt);
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return d.and_hms_opt(0, 0, 0).and_then(naive_to_nanos);
        }
    }
    None
}

/// Integer epoch with the unit guessed from its magnitude.
pub(crate) fn epoch_to_nanos(value: i64) -> Option<i64> {
    let magnitude = value.unsigned_abs();
    if magnitude < 100_000_000_000 {
        value.checked_mul(1_000_000_000)
    } else if magnitude < 100_000_000_000_000 {
        value.checked_mul(1_000_000)
    } else if magnitude < 100_000_000_000_000_000 {
        value.checked_mul(1_000)
    } else {
        Some(value)
    }
}

pub(crate) fn naive_to_nanos(dt: NaiveDateTime) -> Option<i64> {
    dt.and_utc().timestamp_nanos_opt()
}

fn parse_error(column: &str, reason: &str) -> Error {
    Error::DatetimeParse {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}
