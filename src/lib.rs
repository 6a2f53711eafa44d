//! Typed SQL values for a small relational engine.
//!
//! [`Value`] is a tagged, nullable scalar (or float vector) with arithmetic,
//! comparison and casting that follow a fixed type promotion lattice. Each
//! [`AttrType`] has one stateless [`DataType`] behavior that does the
//! type-specific work. Large chars and vectors can be moved out of a row into
//! a per-table append-only blob file through [`TextUtils`] and
//! [`VectorUtils`].

pub(crate) mod common;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod storage;

pub use common::{
    config::StorageConfig,
    error::{ErrorKind, Result, ValueError},
};
pub use crate::core::{
    attr_type::AttrType,
    data_type::{
        BooleanType, CharType, DataType, DateType, FloatType, IntegerType, UndefinedType,
        VectorType, type_instance,
    },
    value::{BinaryOp, Value, resolve_binary_result_type},
};
pub use db::{
    insert::validate_insert,
    table::{Relation, Table, column_def::ColumnDef, row::*, schema::Schema},
};
pub use storage::blob::{TextData, TextUtils, VectorData, VectorUtils};
