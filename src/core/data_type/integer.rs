use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{attr_type::AttrType, data_type::DataType},
};

/// Behavior of 32-bit integers.
///
/// Operands may be integers or booleans; overflow wraps.
pub struct IntegerType;

impl DataType for IntegerType {
    fn attr_type(&self) -> AttrType {
        AttrType::Integer
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Ok(left.get_int().cmp(&right.get_int()))
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_int().wrapping_add(right.get_int())))
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_int().wrapping_sub(right.get_int())))
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_int().wrapping_mul(right.get_int())))
    }

    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        match left.get_int().checked_div(right.get_int()) {
            Some(quotient) => Ok(Value::from(quotient)),
            None => Ok(Value::null_of(AttrType::Integer)),
        }
    }

    fn negative(&self, value: &Value) -> Result<Value> {
        Ok(Value::from(value.get_int().wrapping_neg()))
    }

    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        match to {
            AttrType::Integer => Ok(value.clone()),
            AttrType::Float => Ok(Value::from(value.get_int() as f32)),
            AttrType::Boolean => Ok(Value::from(value.get_int() != 0)),
            AttrType::Chars => Ok(Value::from(value.get_int().to_string())),
            _ => Err(ValueError::UnsupportedCast {
                from: AttrType::Integer,
                to,
            }),
        }
    }

    fn to_string(&self, value: &Value) -> String {
        value.get_int().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_accepts_booleans() {
        let result = IntegerType.add(&Value::from(true), &Value::from(2)).unwrap();
        assert_eq!(result, Value::from(3));
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let result = IntegerType.add(&Value::from(i32::MAX), &Value::from(1)).unwrap();
        assert_eq!(result, Value::from(i32::MIN));
    }

    #[test]
    fn test_integer_divide() {
        let result = IntegerType.divide(&Value::from(7), &Value::from(2)).unwrap();
        assert_eq!(result, Value::from(3));

        let result = IntegerType.divide(&Value::from(7), &Value::from(0)).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_integer_casts() {
        let value = Value::from(42);
        assert_eq!(IntegerType.cast_to(&value, AttrType::Float).unwrap(), Value::from(42.0f32));
        assert_eq!(IntegerType.cast_to(&value, AttrType::Boolean).unwrap(), Value::from(true));
        assert_eq!(IntegerType.cast_to(&value, AttrType::Chars).unwrap(), Value::from("42"));
        assert!(IntegerType.cast_to(&value, AttrType::Date).is_err());
        assert!(IntegerType.cast_to(&value, AttrType::Vector).is_err());
    }

    #[test]
    fn test_integer_to_string() {
        assert_eq!(IntegerType.to_string(&Value::from(-17)), "-17");
    }
}
