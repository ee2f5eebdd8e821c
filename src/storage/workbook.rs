//! Spreadsheet input (first worksheet, header in the first row).

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, TimestampNanosecondArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_array::StringArray;
use calamine::{open_workbook_auto, Data, Reader};

use super::datetime::naive_to_nanos;
use super::Error;

pub(super) fn read_first_sheet(path: &Path) -> Result<RecordBatch, Error> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::SchemaMismatch(format!("{} contains no worksheets", path.display())))?;
    let range = workbook.worksheet_range(&sheet)?;
    log::debug!("Reading worksheet `{}` from {}", sheet, path.display());

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().enumerate().map(|(i, c)| header_name(i, c)).collect(),
        None => Vec::new(),
    };
    if header.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    }
    let body: Vec<&[Data]> = rows.collect();
    let empty = Data::Empty;

    let mut fields = Vec::with_capacity(header.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(header.len());
    for (idx, name) in header.iter().enumerate() {
        let cells: Vec<&Data> = body
            .iter()
            .map(|row| row.get(idx).unwrap_or(&empty))
            .collect();
        let array = cells_to_array(&cells);
        fields.push(Field::new(name, array.data_type().clone(), true));
        columns.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

pub(super) fn header_name(index: usize, cell: &Data) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", index),
        Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", index),
        other => other.to_string(),
    }
}

fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Picks the narrowest Arrow type that holds every non-missing cell.
pub(super) fn cells_to_array(cells: &[&Data]) -> ArrayRef {
    let present = || cells.iter().filter(|c| !is_missing(c));

    if present().all(|c| matches!(c, Data::Int(_) | Data::Float(_))) {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|c| match c {
                Data::Int(i) => Some(*i as f64),
                Data::Float(f) => Some(*f),
                _ => None,
            })
            .collect();
        return Arc::new(Float64Array::from(values));
    }

    if present().all(|c| matches!(c, Data::DateTime(_))) {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|c| match c {
                Data::DateTime(dt) => dt.as_datetime().and_then(naive_to_nanos),
                _ => None,
            })
            .collect();
        return Arc::new(TimestampNanosecondArray::from(values));
    }

    let values: Vec<Option<String>> = cells
        .iter()
        .map(|c| (!is_missing(c)).then(|| c.to_string()))
        .collect();
    Arc::new(StringArray::from(values))
}
