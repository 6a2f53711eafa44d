use strum::{Display, EnumIter, EnumString};

/// Runtime type tag of a [`Value`](crate::Value).
///
/// The spellings accepted by [`str::parse`] are the catalog names
/// (`ints`, `floats`, ...) plus their common SQL aliases, matched
/// case-insensitively.
///
/// # Example
///
/// ```
/// use scuttle_value::AttrType;
///
/// assert_eq!("INT".parse::<AttrType>().unwrap(), AttrType::Integer);
/// assert_eq!(AttrType::Vector.to_string(), "vectors");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum AttrType {
    /// Type not yet known, e.g. a bare `NULL` literal.
    #[default]
    #[strum(to_string = "undefined")]
    Undefined,

    /// 32-bit signed integer.
    #[strum(to_string = "ints", serialize = "int", serialize = "integer")]
    Integer,

    /// 32-bit floating point number.
    #[strum(to_string = "floats", serialize = "float")]
    Float,

    #[strum(to_string = "booleans", serialize = "bool", serialize = "boolean")]
    Boolean,

    /// Character string, NUL terminated in fixed-width row storage.
    #[strum(to_string = "chars", serialize = "char", serialize = "text")]
    Chars,

    /// Calendar date stored as `YYYYMMDD`.
    #[strum(to_string = "dates", serialize = "date")]
    Date,

    /// Sequence of 32-bit floats. A value's length is its dimension.
    #[strum(to_string = "vectors", serialize = "vector")]
    Vector,
}

impl AttrType {
    /// Whether values of this type take part in numeric promotion.
    pub fn is_numeric(self) -> bool {
        matches!(self, AttrType::Integer | AttrType::Float | AttrType::Boolean)
    }

    /// Whether values of this type own a heap buffer and may live off-row.
    pub fn is_variable_length(self) -> bool {
        matches!(self, AttrType::Chars | AttrType::Vector)
    }

    /// Inline byte width of a scalar of this type, `None` for variable length
    /// and undefined types.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            AttrType::Integer | AttrType::Float | AttrType::Date => Some(4),
            AttrType::Boolean => Some(1),
            AttrType::Chars | AttrType::Vector | AttrType::Undefined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_names() {
        assert_eq!("ints".parse::<AttrType>().unwrap(), AttrType::Integer);
        assert_eq!("Floats".parse::<AttrType>().unwrap(), AttrType::Float);
        assert_eq!("BOOLEAN".parse::<AttrType>().unwrap(), AttrType::Boolean);
        assert_eq!("text".parse::<AttrType>().unwrap(), AttrType::Chars);
        assert_eq!("date".parse::<AttrType>().unwrap(), AttrType::Date);
        assert_eq!("vectors".parse::<AttrType>().unwrap(), AttrType::Vector);
        assert!("blob".parse::<AttrType>().is_err());
    }

    #[test]
    fn test_display_uses_catalog_names() {
        assert_eq!(AttrType::Undefined.to_string(), "undefined");
        assert_eq!(AttrType::Integer.to_string(), "ints");
        assert_eq!(AttrType::Chars.to_string(), "chars");
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(AttrType::Integer.fixed_width(), Some(4));
        assert_eq!(AttrType::Boolean.fixed_width(), Some(1));
        assert_eq!(AttrType::Vector.fixed_width(), None);
    }
}
