use std::{
    fs::OpenOptions,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Value,
    common::{
        config::StorageConfig,
        error::{Result, ValueError},
    },
    core::value::Payload,
    storage::blob::{TextData, TextUtils, VectorData, VectorUtils},
};

pub mod column_def;
pub mod row;
pub mod schema;

use row::{ColumnSlot, Row};
use schema::Schema;

/// Trait for table-like structures.
///
/// This is what the value engine needs from the storage layer: the table's
/// schema for validation and the file its off-row payloads live in.
pub trait Table {
    /// Returns the table name.
    fn name(&self) -> &str;

    /// Returns the table's schema.
    fn schema(&self) -> &Schema;

    /// Path of the append-only file holding this table's off-row chars and
    /// vectors.
    fn text_vector_data_file(&self) -> PathBuf;
}

/// A table (relation) with a name, schema and blob file.
///
/// The relation owns the lock that serializes appends to its blob file, so
/// rows stored through [`Relation::store`] never race on the file's end
/// offset.
///
/// # Example
///
/// ```no_run
/// use scuttle_value::{AttrType, ColumnDef, Relation, Schema, StorageConfig, Value};
///
/// let schema = Schema::new(vec![ColumnDef::new("bio", AttrType::Chars, true)]);
/// let config = StorageConfig::new("./db").with_inline_char_limit(8);
/// let users = Relation::create("users", schema, config).unwrap();
///
/// let slot = users.store(&Value::from("a biography longer than eight bytes")).unwrap();
/// assert!(slot.is_off_row());
/// assert_eq!(
///     users.materialize(&slot).unwrap(),
///     Value::from("a biography longer than eight bytes")
/// );
/// ```
#[derive(Debug)]
pub struct Relation {
    /// The table name.
    pub name: String,

    /// The table's schema defining its columns.
    pub schema: Schema,

    config: StorageConfig,

    append_lock: Mutex<()>,
}

impl Relation {
    /// Creates a relation, making sure its data directory and (empty) blob
    /// file exist. An existing blob file is kept as is.
    pub fn create(name: &str, schema: Schema, config: StorageConfig) -> Result<Self> {
        let path = config.blob_file(name);
        let io_open = |source: std::io::Error| {
            tracing::warn!(path = %path.display(), error = %source, "failed to create blob file");
            ValueError::IoOpen {
                path: path.clone(),
                source,
            }
        };

        std::fs::create_dir_all(&config.data_directory).map_err(io_open)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_open)?;

        tracing::debug!(table = name, path = %path.display(), "created relation");
        Ok(Self {
            name: name.to_owned(),
            schema,
            config,
            append_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn lock_appends(&self) -> MutexGuard<'_, ()> {
        match self.append_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(table = %self.name, "blob append lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Places a value into a row slot, moving chars and vectors over the
    /// inline limits into the blob file.
    pub fn store(&self, value: &Value) -> Result<ColumnSlot> {
        if value.is_null() {
            return Ok(ColumnSlot::Inline(value.clone()));
        }

        match value.payload() {
            Payload::Chars(s) if s.len() > self.config.inline_char_limit => {
                let mut data = TextData::new(s.as_bytes());
                let _guard = self.lock_appends();
                TextUtils::dump_text(self, &mut data)?;
                data.text = None;
                Ok(ColumnSlot::Text(data))
            }
            Payload::Vector(v) if v.len() > self.config.inline_vector_limit => {
                let mut data = VectorData::new(v.clone());
                let _guard = self.lock_appends();
                VectorUtils::dump_vector(self, &mut data)?;
                data.vector = None;
                Ok(ColumnSlot::Vector(data))
            }
            _ => Ok(ColumnSlot::Inline(value.clone())),
        }
    }

    /// Stores every value of an already validated row.
    pub fn store_row(&self, values: &[Value]) -> Result<Row> {
        let slots = values
            .iter()
            .map(|value| self.store(value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row::new(slots))
    }

    /// Turns a slot back into a value, reading the blob file for off-row
    /// payloads.
    pub fn materialize(&self, slot: &ColumnSlot) -> Result<Value> {
        match slot {
            ColumnSlot::Inline(value) => Ok(value.clone()),
            ColumnSlot::Text(descriptor) => {
                let mut data = TextData::at(descriptor.offset, descriptor.len);
                TextUtils::load_text(self, &mut data)?;
                let bytes = data.take_text().unwrap_or_default();
                let text = String::from_utf8(bytes).map_err(|e| {
                    ValueError::invalid(format!("off-row text is not UTF-8: {e}"))
                })?;
                Ok(Value::from(text))
            }
            ColumnSlot::Vector(descriptor) => {
                let mut data = VectorData::at(descriptor.offset, descriptor.dim);
                VectorUtils::load_vector(self, &mut data)?;
                Ok(Value::from(data.take_vector().unwrap_or_default()))
            }
        }
    }

    /// Materializes every slot of a row.
    pub fn materialize_row(&self, row: &Row) -> Result<Vec<Value>> {
        row.slots.iter().map(|slot| self.materialize(slot)).collect()
    }
}

impl Table for Relation {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn text_vector_data_file(&self) -> PathBuf {
        self.config.blob_file(&self.name)
    }
}
