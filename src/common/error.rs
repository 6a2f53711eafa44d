use std::path::PathBuf;

use miette::Diagnostic;
use strum::{Display, IntoStaticStr};

use crate::core::attr_type::AttrType;

/// Result alias used throughout the value engine.
pub type Result<T, E = ValueError> = std::result::Result<T, E>;

/// Flat status kind of a [`ValueError`].
///
/// Higher layers that only care about the category of a failure (for example
/// to turn it into a rejected statement) match on this instead of the full
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValueTypeMismatch,
    InvalidArgument,
    IoerrOpen,
    IoerrRead,
    IoerrWrite,
    SchemaFieldMissing,
    SchemaFieldTypeMismatch,
}

/// Errors produced by value operations, the blob store and insert validation.
///
/// NULL is never an error: null operands are data and are handled by each
/// operation's null rule.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ValueError {
    #[error("type mismatch: cannot {op} {left} and {right}")]
    #[diagnostic(code(value::type_mismatch))]
    TypeMismatch {
        op: &'static str,
        left: AttrType,
        right: AttrType,
    },

    #[error("type mismatch: no conversion from {from} to {to}")]
    #[diagnostic(code(value::unsupported_cast))]
    UnsupportedCast { from: AttrType, to: AttrType },

    #[error("invalid argument: {0}")]
    #[diagnostic(code(value::invalid_argument))]
    InvalidArgument(String),

    #[error("failed to open blob file {}", path.display())]
    #[diagnostic(code(storage::io_open))]
    IoOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read blob file {}", path.display())]
    #[diagnostic(code(storage::io_read))]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write blob file {}", path.display())]
    #[diagnostic(code(storage::io_write))]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema mismatch: expected {expected} value(s), got {actual}")]
    #[diagnostic(code(schema::field_missing))]
    SchemaFieldMissing { expected: usize, actual: usize },

    #[error("column {column}: {reason}")]
    #[diagnostic(code(schema::field_type_mismatch))]
    SchemaFieldTypeMismatch { column: String, reason: String },
}

impl ValueError {
    pub(crate) fn mismatch(op: &'static str, left: AttrType, right: AttrType) -> Self {
        Self::TypeMismatch { op, left, right }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns the status kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::TypeMismatch { .. } | ValueError::UnsupportedCast { .. } => {
                ErrorKind::ValueTypeMismatch
            }
            ValueError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ValueError::IoOpen { .. } => ErrorKind::IoerrOpen,
            ValueError::IoRead { .. } => ErrorKind::IoerrRead,
            ValueError::IoWrite { .. } => ErrorKind::IoerrWrite,
            ValueError::SchemaFieldMissing { .. } => ErrorKind::SchemaFieldMissing,
            ValueError::SchemaFieldTypeMismatch { .. } => ErrorKind::SchemaFieldTypeMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::ValueTypeMismatch.to_string(), "VALUE_TYPE_MISMATCH");
        assert_eq!(ErrorKind::IoerrRead.to_string(), "IOERR_READ");
        let name: &'static str = ErrorKind::SchemaFieldTypeMismatch.into();
        assert_eq!(name, "SCHEMA_FIELD_TYPE_MISMATCH");
    }

    #[test]
    fn test_cast_failure_is_type_mismatch() {
        let err = ValueError::UnsupportedCast {
            from: AttrType::Vector,
            to: AttrType::Chars,
        };
        assert_eq!(err.kind(), ErrorKind::ValueTypeMismatch);
        assert_eq!(
            err.to_string(),
            "type mismatch: no conversion from vectors to chars"
        );
    }
}
