use arrow::array::{Array, ArrayRef, TimestampNanosecondArray};
use arrow::datatypes::{DataType, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;

use super::primitive_array_ref::downcast_arr;
use super::{Error, TIMESTAMP_COLUMN};

/// Classification of a data column, decided once from its Arrow type.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Other(DataType),
}

/// An immutable in-memory time series.
///
/// Column 0 is always the nullable `timestamp` column holding nanoseconds
/// since the Unix epoch; every other column is a data column.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    batch: RecordBatch,
    timestamps: TimestampNanosecondArray,
}

impl Table {
    pub fn try_new(batch: RecordBatch) -> Result<Self, Error> {
        let schema = batch.schema();
        let first = schema.fields().first().ok_or_else(|| {
            Error::SchemaMismatch("Table needs at least a timestamp column".to_string())
        })?;

        if first.name() != TIMESTAMP_COLUMN {
            return Err(Error::SchemaMismatch(format!(
                "First column must be `{}`, found `{}`",
                TIMESTAMP_COLUMN,
                first.name()
            )));
        }
        let timestamps = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .filter(|arr| arr.data_type() == &DataType::Timestamp(TimeUnit::Nanosecond, None))
            .ok_or_else(|| Error::SchemaMismatch(format!(
                "Timestamp column must be Timestamp(Nanosecond, None), found {}",
                first.data_type()
            )))?
            .clone();

        Ok(Self { batch, timestamps })
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn timestamps(&self) -> &TimestampNanosecondArray {
        &self.timestamps
    }

    /// Data column names in table order (timestamp excluded).
    pub fn data_column_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .iter()
            .skip(1)
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn data_column_index(&self, name: &str) -> Option<usize> {
        self.schema()
            .fields()
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, f)| f.name() == name)
            .map(|(i, _)| i)
    }

    /// Name and classified values of every data column, in table order.
    pub fn data_columns(&self) -> Vec<(String, ColumnData)> {
        let schema = self.schema();
        schema
            .fields()
            .iter()
            .zip(self.batch.columns())
            .skip(1)
            .map(|(field, array)| (field.name().clone(), classify(array)))
            .collect()
    }
}

fn classify(array: &ArrayRef) -> ColumnData {
    match downcast_arr(array) {
        Some(prim) => ColumnData::Numeric(prim.to_values()),
        None => ColumnData::Other(array.data_type().clone()),
    }
}
