pub(crate) mod insert;
pub(crate) mod table;
