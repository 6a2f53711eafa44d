use std::path::{Path, PathBuf};

use crate::common::error::{Result, ValueError};

/// Storage settings for tables and their blob files.
///
/// Each table keeps its off-row chars and vectors in
/// `<data_directory>/<table>.blob`. Chars longer than `inline_char_limit`
/// bytes and vectors with more than `inline_vector_limit` components are
/// stored there instead of inline in the row.
///
/// # Example
///
/// ```
/// use scuttle_value::StorageConfig;
///
/// let config = StorageConfig::new("./db").with_inline_char_limit(16);
/// assert_eq!(config.inline_char_limit, 16);
/// assert!(config.blob_file("users").ends_with("users.blob"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Directory where table blob files are stored.
    pub data_directory: PathBuf,

    /// Largest chars payload, in bytes, kept inline.
    pub inline_char_limit: usize,

    /// Largest vector dimension kept inline.
    pub inline_vector_limit: usize,
}

pub const DEFAULT_DATA_DIRECTORY: &str = "./db";
pub const DEFAULT_INLINE_CHAR_LIMIT: usize = 64;
pub const DEFAULT_INLINE_VECTOR_LIMIT: usize = 16;

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIRECTORY)
    }
}

impl StorageConfig {
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Self {
        Self {
            data_directory: data_directory.as_ref().to_path_buf(),
            inline_char_limit: DEFAULT_INLINE_CHAR_LIMIT,
            inline_vector_limit: DEFAULT_INLINE_VECTOR_LIMIT,
        }
    }

    /// Defaults overridden by `SCUTTLE_DATA_DIR`, `SCUTTLE_INLINE_CHAR_LIMIT`
    /// and `SCUTTLE_INLINE_VECTOR_LIMIT` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("SCUTTLE_DATA_DIR") {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        };

        let limit = |key: &str| -> Result<Option<usize>> {
            lookup(key)
                .map(|raw| {
                    raw.trim().parse::<usize>().map_err(|e| {
                        ValueError::invalid(format!("{key}={raw} is not a valid limit: {e}"))
                    })
                })
                .transpose()
        };

        if let Some(chars) = limit("SCUTTLE_INLINE_CHAR_LIMIT")? {
            config.inline_char_limit = chars;
        }
        if let Some(dims) = limit("SCUTTLE_INLINE_VECTOR_LIMIT")? {
            config.inline_vector_limit = dims;
        }

        tracing::debug!(?config, "loaded storage config");
        Ok(config)
    }

    pub fn with_inline_char_limit(mut self, limit: usize) -> Self {
        self.inline_char_limit = limit;
        self
    }

    pub fn with_inline_vector_limit(mut self, limit: usize) -> Self {
        self.inline_vector_limit = limit;
        self
    }

    /// Path of the blob file backing `table`.
    pub fn blob_file(&self, table: &str) -> PathBuf {
        self.data_directory.join(format!("{table}.blob"))
    }
}
