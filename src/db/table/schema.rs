use super::column_def::ColumnDef;

/// A table schema defining the structure of rows.
///
/// A schema is an ordered list of column definitions. All rows in a table
/// must conform to the table's schema.
///
/// # Example
///
/// ```
/// use scuttle_value::{AttrType, ColumnDef, Schema};
///
/// let schema = Schema::new(vec![
///     ColumnDef::new("id", AttrType::Integer, false),
///     ColumnDef::new("name", AttrType::Chars, false),
///     ColumnDef::vector("embedding", 3, true),
/// ]);
///
/// assert_eq!(schema.get_column_index("name"), Some(1));
/// assert_eq!(schema.get_column_index("age"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// The ordered list of column definitions.
    pub columns: Vec<ColumnDef>,
}

impl Schema {
    /// Creates a new schema from a vector of column definitions.
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    /// Finds the index of a column by name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
