use crate::{
    Value,
    storage::blob::{TextData, VectorData},
};

/// How one column of a row is held.
///
/// Small values live inline. Chars and vectors over the configured inline
/// limits are replaced by a descriptor into the table's blob file.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSlot {
    Inline(Value),
    Text(TextData),
    Vector(VectorData),
}

impl ColumnSlot {
    /// Whether the payload lives in the blob file.
    pub fn is_off_row(&self) -> bool {
        !matches!(self, ColumnSlot::Inline(_))
    }
}

/// A row of column slots, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The ordered slots in this row.
    pub slots: Vec<ColumnSlot>,
}

impl Row {
    /// Creates a new row from a vector of slots.
    pub fn new(slots: Vec<ColumnSlot>) -> Self {
        Self { slots }
    }

    /// Gets a reference to the slot at the given column index.
    pub fn get_slot(&self, index: usize) -> Option<&ColumnSlot> {
        self.slots.get(index)
    }
}
