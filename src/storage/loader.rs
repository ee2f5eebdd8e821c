use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use regex::Regex;

use super::datetime::parse_timestamp_column;
use super::{Error, InputFormat, Table, TIMESTAMP_COLUMN};

/// Cells read as missing in CSV input: empty plus the usual NA spellings.
const NULL_PATTERN: &str = r"^(|#N/A|#N/A N/A|#NA|-1\.#IND|-1\.#QNAN|-NaN|-nan|1\.#IND|1\.#QNAN|<NA>|N/A|NA|NULL|NaN|None|n/a|nan|null)$";

/// Reads a CSV or workbook file, detects its time column and returns a
/// [`Table`] with that column parsed and renamed to `timestamp`.
pub fn load(path: &Path, datetime_format: Option<&str>) -> Result<Table, Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = InputFormat::from_extension(ext)
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

    let raw = match format {
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Workbook => read_workbook(path)?,
    };
    log::info!(
        "Loaded {} rows x {} columns from {}",
        raw.num_rows(),
        raw.num_columns(),
        path.display()
    );

    into_table(raw, datetime_format)
}

/// First column whose name mentions `time` or `date`, case-insensitively.
pub(crate) fn detect_timestamp_column(schema: &Schema) -> Option<usize> {
    schema.fields().iter().position(|f| {
        let name = f.name().to_lowercase();
        name.contains("time") || name.contains("date")
    })
}

/// Parses the detected time column and moves it to the front as `timestamp`.
pub(crate) fn into_table(raw: RecordBatch, datetime_format: Option<&str>) -> Result<Table, Error> {
    let schema = raw.schema();
    let ts_index = detect_timestamp_column(&schema).ok_or_else(|| Error::NoTimestampColumn {
        available: schema.fields().iter().map(|f| f.name().clone()).collect(),
    })?;
    let ts_name = schema.field(ts_index).name();
    log::debug!("Using datetime column: {}", ts_name);

    let timestamps = parse_timestamp_column(ts_name, raw.column(ts_index), datetime_format)?;

    let mut fields = vec![Field::new(
        TIMESTAMP_COLUMN,
        DataType::Timestamp(TimeUnit::Nanosecond, None),
        true,
    )];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(timestamps)];
    for (i, (field, column)) in schema.fields().iter().zip(raw.columns()).enumerate() {
        if i == ts_index {
            continue;
        }
        fields.push(field.as_ref().clone());
        columns.push(column.clone());
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
    Table::try_new(batch)
}

fn read_csv(path: &Path) -> Result<RecordBatch, Error> {
    let mut file = File::open(path)?;
    let format = Format::default()
        .with_header(true)
        .with_null_regex(Regex::new(NULL_PATTERN)?);
    let (inferred, _) = format.infer_schema(&mut file, None)?;
    file.rewind()?;

    // The time column is always read as text so our own parser sees the raw cells
    let ts_index = detect_timestamp_column(&inferred);
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let data_type = match f.data_type() {
                _ if Some(i) == ts_index => DataType::Utf8,
                // a column holding nothing but missing markers
                DataType::Null => DataType::Float64,
                other => other.clone(),
            };
            Field::new(f.name(), data_type, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;

    Ok(arrow::compute::concat_batches(&schema, &batches)?)
}

#[cfg(feature = "excel")]
fn read_workbook(path: &Path) -> Result<RecordBatch, Error> {
    super::workbook::read_first_sheet(path)
}

#[cfg(not(feature = "excel"))]
fn read_workbook(path: &Path) -> Result<RecordBatch, Error> {
    Err(Error::UnsupportedFormat(format!(
        "{} (built without the `excel` feature)",
        path.display()
    )))
}
