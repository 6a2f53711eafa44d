use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{attr_type::AttrType, data_type::DataType, value::round_to_int},
};

/// Behavior of 32-bit floats. Operands may be any numeric type.
pub struct FloatType;

impl DataType for FloatType {
    fn attr_type(&self) -> AttrType {
        AttrType::Float
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Ok(compare_floats(left.get_float(), right.get_float()))
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_float() + right.get_float()))
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_float() - right.get_float()))
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::from(left.get_float() * right.get_float()))
    }

    /// Division by zero yields a float null.
    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        let divisor = right.get_float();
        if divisor.abs() < f32::EPSILON {
            return Ok(Value::null_of(AttrType::Float));
        }
        Ok(Value::from(left.get_float() / divisor))
    }

    fn negative(&self, value: &Value) -> Result<Value> {
        Ok(Value::from(-value.get_float()))
    }

    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        match to {
            AttrType::Float => Ok(value.clone()),
            AttrType::Integer => round_to_int(f64::from(value.get_float()))
                .map(Value::from)
                .ok_or_else(|| {
                    ValueError::invalid(format!("{} is out of int range", value.get_float()))
                }),
            AttrType::Boolean => Ok(Value::from(value.get_float().abs() >= f32::EPSILON)),
            AttrType::Chars => Ok(Value::from(format_float(value.get_float()))),
            _ => Err(ValueError::UnsupportedCast {
                from: AttrType::Float,
                to,
            }),
        }
    }

    fn to_string(&self, value: &Value) -> String {
        format_float(value.get_float())
    }
}

/// Total order on floats; NaN compares equal to everything.
pub(crate) fn compare_floats(left: f32, right: f32) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

/// Formats a float with at most two decimals, trimming trailing zeros.
pub(crate) fn format_float(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
