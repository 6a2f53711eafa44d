//! Per-type behavior for arithmetic, comparison, casting and display.
//!
//! Every [`AttrType`] maps to one stateless behavior object. [`Value`]
//! resolves the result type of an operation first and then asks the behavior
//! of that type to do the work, so a behavior may receive operands of a
//! narrower type than itself (an `Integer` left operand handed to
//! [`FloatType::add`], for instance) but never of an incompatible one.

use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::attr_type::AttrType,
};

mod boolean;
mod chars;
mod date;
mod float;
mod integer;
mod vector;

pub use boolean::BooleanType;
pub use chars::CharType;
pub use date::DateType;
pub use float::FloatType;
pub use integer::IntegerType;
pub use vector::VectorType;

pub(crate) use date::{is_valid_date, parse_date};
pub(crate) use float::format_float;
pub(crate) use vector::parse_vector;

/// The operation contract shared by every SQL type.
///
/// Operands are never null when these methods are called; null handling
/// happens in [`Value`]. Operations a type does not support fall through to
/// the default implementations, which fail with a type mismatch.
pub trait DataType: Send + Sync {
    /// The type this behavior produces.
    fn attr_type(&self) -> AttrType;

    /// Total order between two operands of this type.
    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Err(ValueError::mismatch("compare", left.attr_type(), right.attr_type()))
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        Err(ValueError::mismatch("add", left.attr_type(), right.attr_type()))
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        Err(ValueError::mismatch("subtract", left.attr_type(), right.attr_type()))
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        Err(ValueError::mismatch("multiply", left.attr_type(), right.attr_type()))
    }

    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        Err(ValueError::mismatch("divide", left.attr_type(), right.attr_type()))
    }

    fn negative(&self, value: &Value) -> Result<Value> {
        Err(ValueError::mismatch("negate", value.attr_type(), value.attr_type()))
    }

    /// The greater operand, converted to this type. Ties keep `left`.
    fn max(&self, left: &Value, right: &Value) -> Result<Value> {
        let winner = match self.compare(left, right)? {
            Ordering::Less => right,
            Ordering::Equal | Ordering::Greater => left,
        };
        Value::cast_to(winner, self.attr_type())
    }

    /// The smaller operand, converted to this type. Ties keep `left`.
    fn min(&self, left: &Value, right: &Value) -> Result<Value> {
        let winner = match self.compare(left, right)? {
            Ordering::Greater => right,
            Ordering::Equal | Ordering::Less => left,
        };
        Value::cast_to(winner, self.attr_type())
    }

    /// Converts a non-null value of this type to `to`.
    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        if to == self.attr_type() {
            return Ok(value.clone());
        }
        Err(ValueError::UnsupportedCast {
            from: self.attr_type(),
            to,
        })
    }

    /// Display form of a non-null value of this type.
    fn to_string(&self, value: &Value) -> String;
}

/// Behavior for values whose type has not been resolved yet.
///
/// Every operation fails; only null values normally carry this type.
pub struct UndefinedType;

impl DataType for UndefinedType {
    fn attr_type(&self) -> AttrType {
        AttrType::Undefined
    }

    fn to_string(&self, _value: &Value) -> String {
        String::new()
    }
}

static UNDEFINED: UndefinedType = UndefinedType;
static INTEGER: IntegerType = IntegerType;
static FLOAT: FloatType = FloatType;
static BOOLEAN: BooleanType = BooleanType;
static CHARS: CharType = CharType;
static DATE: DateType = DateType;
static VECTOR: VectorType = VectorType;

/// Returns the behavior singleton for `attr_type`.
pub fn type_instance(attr_type: AttrType) -> &'static dyn DataType {
    match attr_type {
        AttrType::Undefined => &UNDEFINED,
        AttrType::Integer => &INTEGER,
        AttrType::Float => &FLOAT,
        AttrType::Boolean => &BOOLEAN,
        AttrType::Chars => &CHARS,
        AttrType::Date => &DATE,
        AttrType::Vector => &VECTOR,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_registry_returns_matching_behavior() {
        for attr_type in AttrType::iter() {
            assert_eq!(type_instance(attr_type).attr_type(), attr_type);
        }
    }

    #[test]
    fn test_undefined_rejects_everything() {
        let behavior = type_instance(AttrType::Undefined);
        let value = Value::null();
        assert!(behavior.add(&value, &value).is_err());
        assert!(behavior.compare(&value, &value).is_err());
        assert!(behavior.cast_to(&value, AttrType::Integer).is_err());
    }
}
