pub(crate) mod attr_type;
pub(crate) mod data_type;
pub(crate) mod value;
