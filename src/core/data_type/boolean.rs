use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{attr_type::AttrType, data_type::DataType},
};

/// Behavior of booleans. They order (`false < true`) and cast, but have no
/// arithmetic of their own; mixed with numbers they promote instead.
pub struct BooleanType;

impl DataType for BooleanType {
    fn attr_type(&self) -> AttrType {
        AttrType::Boolean
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Ok(left.get_boolean().cmp(&right.get_boolean()))
    }

    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        let val = value.get_boolean();
        match to {
            AttrType::Boolean => Ok(value.clone()),
            AttrType::Integer => Ok(Value::from(i32::from(val))),
            AttrType::Float => Ok(Value::from(f32::from(u8::from(val)))),
            AttrType::Chars => Ok(Value::from(val.to_string())),
            _ => Err(ValueError::UnsupportedCast {
                from: AttrType::Boolean,
                to,
            }),
        }
    }

    fn to_string(&self, value: &Value) -> String {
        value.get_boolean().to_string()
    }
}
