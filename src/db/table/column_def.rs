use crate::core::attr_type::AttrType;

/// Definition of a single column in a table schema.
///
/// Specifies the column name, its type, whether NULL values are allowed and,
/// for vector columns, the exact dimension every value must have.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// The column name.
    pub name: String,

    /// The type of values in this column.
    pub attr_type: AttrType,

    /// Whether this column can contain NULL values.
    pub nullable: bool,

    /// Declared dimension of a vector column, `0` for other types.
    pub vector_dim: usize,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(name: &str, attr_type: AttrType, nullable: bool) -> Self {
        Self {
            name: name.to_owned(),
            attr_type,
            nullable,
            vector_dim: 0,
        }
    }

    /// Creates a vector column of dimension `dim`.
    pub fn vector(name: &str, dim: usize, nullable: bool) -> Self {
        Self {
            vector_dim: dim,
            ..Self::new(name, AttrType::Vector, nullable)
        }
    }
}
