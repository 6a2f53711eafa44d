use crate::{
    AttrType, Value,
    common::error::{Result, ValueError},
    db::table::{Table, column_def::ColumnDef},
};

/// Checks a row of values against the table's schema before it is stored.
///
/// Values are coerced in place: a non-null value whose type differs from its
/// column is replaced by its cast to the column type, and a null in a
/// nullable column is re-tagged with the column type. A vector column with a
/// declared dimension only accepts vectors of exactly that dimension.
///
/// # Errors
///
/// - [`ValueError::SchemaFieldMissing`] if the number of values differs from
///   the number of columns.
/// - [`ValueError::SchemaFieldTypeMismatch`] if a value cannot be cast to its
///   column type, or a null is given for a non-nullable column.
/// - [`ValueError::InvalidArgument`] if a vector has the wrong dimension.
pub fn validate_insert<T: Table + ?Sized>(table: &T, values: &mut [Value]) -> Result<()> {
    let columns = &table.schema().columns;
    if values.len() != columns.len() {
        tracing::warn!(
            table = table.name(),
            expected = columns.len(),
            actual = values.len(),
            "insert value count does not match schema"
        );
        return Err(ValueError::SchemaFieldMissing {
            expected: columns.len(),
            actual: values.len(),
        });
    }

    for (column, value) in columns.iter().zip(values.iter_mut()) {
        coerce(table.name(), column, value)?;
    }
    Ok(())
}

fn coerce(table: &str, column: &ColumnDef, value: &mut Value) -> Result<()> {
    if value.is_null() {
        if !column.nullable {
            tracing::warn!(table, column = %column.name, "null value for non-nullable column");
            return Err(ValueError::SchemaFieldTypeMismatch {
                column: column.name.clone(),
                reason: "column does not accept null values".to_owned(),
            });
        }
        value.set_type(column.attr_type);
        return Ok(());
    }

    if value.attr_type() != column.attr_type {
        let cast = Value::cast_to(value, column.attr_type).map_err(|e| {
            tracing::warn!(table, column = %column.name, error = %e, "insert value cast failed");
            ValueError::SchemaFieldTypeMismatch {
                column: column.name.clone(),
                reason: format!(
                    "cannot store {} value in {} column: {e}",
                    value.attr_type(),
                    column.attr_type
                ),
            }
        })?;
        *value = cast;
    }

    if column.attr_type == AttrType::Vector
        && column.vector_dim != 0
        && value.length() != column.vector_dim
    {
        return Err(ValueError::invalid(format!(
            "column {} expects a vector of dimension {}, got {}",
            column.name,
            column.vector_dim,
            value.length()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{ErrorKind, Schema};

    struct Users {
        schema: Schema,
    }

    impl Table for Users {
        fn name(&self) -> &str {
            "users"
        }

        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn text_vector_data_file(&self) -> PathBuf {
            PathBuf::from("users.blob")
        }
    }

    fn users() -> Users {
        Users {
            schema: Schema::new(vec![
                ColumnDef::new("id", AttrType::Integer, false),
                ColumnDef::new("score", AttrType::Float, true),
                ColumnDef::new("joined", AttrType::Date, true),
                ColumnDef::vector("embedding", 3, true),
            ]),
        }
    }

    #[test]
    fn test_matching_row_is_unchanged() {
        let mut values = vec![
            Value::from(1),
            Value::from(2.5),
            Value::from_date("2024-02-29").unwrap(),
            Value::from(vec![1.0, 2.0, 3.0]),
        ];
        let expected = values.clone();
        validate_insert(&users(), &mut values).unwrap();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_values_are_cast_to_column_types() {
        let mut values = vec![
            Value::from("42"),
            Value::from(3),
            Value::from("2024-01-15"),
            Value::from("[1, 2, 3]"),
        ];
        validate_insert(&users(), &mut values).unwrap();

        assert_eq!(values[0], Value::from(42));
        assert_eq!(values[1], Value::from(3.0));
        assert_eq!(values[2], Value::from_date("2024-01-15").unwrap());
        assert_eq!(values[3], Value::from(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_wrong_value_count() {
        let mut values = vec![Value::from(1)];
        let err = validate_insert(&users(), &mut values).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaFieldMissing);
        assert_eq!(err.to_string(), "schema mismatch: expected 4 value(s), got 1");
    }

    #[test]
    fn test_uncastable_value() {
        let mut values = vec![
            Value::from("not a number"),
            Value::null(),
            Value::null(),
            Value::null(),
        ];
        let err = validate_insert(&users(), &mut values).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaFieldTypeMismatch);
        assert!(err.to_string().starts_with("column id:"));
    }

    #[test]
    fn test_null_handling() {
        let mut values = vec![Value::from(1), Value::null(), Value::null(), Value::null()];
        validate_insert(&users(), &mut values).unwrap();
        assert!(values[1].is_null());
        assert_eq!(values[1].attr_type(), AttrType::Float);
        assert_eq!(values[3].attr_type(), AttrType::Vector);

        let mut values = vec![Value::null(), Value::null(), Value::null(), Value::null()];
        let err = validate_insert(&users(), &mut values).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaFieldTypeMismatch);
    }

    #[test]
    fn test_vector_dimension_is_enforced() {
        let mut values = vec![
            Value::from(1),
            Value::null(),
            Value::null(),
            Value::from(vec![1.0, 2.0]),
        ];
        let err = validate_insert(&users(), &mut values).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
