use super::*;

#[test]
fn test_table_creation() {
    let batch = create_test_batch(
        vec![Some(1_000_000_000), None],
        vec![Some(1.0), Some(2.0)],
        vec!["a", "b"],
    );
    let table = Table::try_new(batch).unwrap();

    assert_eq!(table.schema(), test_schema());
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.data_column_names(), vec!["value", "tag"]);
    assert_eq!(table.timestamps().null_count(), 1);
}

#[test]
fn test_data_columns_are_classified() {
    let batch = create_test_batch(
        vec![Some(0), Some(1), Some(2)],
        vec![Some(1.5), None, Some(f64::NAN)],
        vec!["a", "b", "c"],
    );
    let table = Table::try_new(batch).unwrap();
    let columns = table.data_columns();

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].0, "value");
    // NaN reads as missing just like a null
    assert_eq!(columns[0].1, ColumnData::Numeric(vec![Some(1.5), None, None]));
    assert_eq!(columns[1].1, ColumnData::Other(DataType::Utf8));
}

#[test]
fn test_integer_columns_are_numeric() {
    let schema = Arc::new(Schema::new(vec![
        Field::new(TIMESTAMP_COLUMN, DataType::Timestamp(TimeUnit::Nanosecond, None), true),
        Field::new("count", DataType::Int64, true),
        Field::new("flag", DataType::Boolean, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(TimestampNanosecondArray::from(vec![0, 1])),
            Arc::new(arrow::array::Int64Array::from(vec![Some(3), None])),
            Arc::new(arrow::array::BooleanArray::from(vec![true, false])),
        ],
    )
    .unwrap();
    let table = Table::try_new(batch).unwrap();
    let columns = table.data_columns();

    assert_eq!(columns[0].1, ColumnData::Numeric(vec![Some(3.0), None]));
    assert_eq!(columns[1].1, ColumnData::Other(DataType::Boolean));
}

#[test]
fn test_data_column_index_skips_timestamp() {
    let table = Table::try_new(create_test_batch(vec![Some(0)], vec![Some(1.0)], vec!["a"])).unwrap();

    assert_eq!(table.data_column_index("value"), Some(1));
    assert_eq!(table.data_column_index("tag"), Some(2));
    assert_eq!(table.data_column_index(TIMESTAMP_COLUMN), None);
    assert_eq!(table.data_column_index("missing"), None);
}
