use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{
        attr_type::AttrType,
        data_type::{DataType, parse_date, parse_vector},
        value::{Payload, parse_number, round_to_int},
    },
};

/// Behavior of character strings.
///
/// `add` concatenates, ordering is byte-wise, and casts out of chars parse
/// the text so malformed content is an invalid argument rather than a
/// silent zero.
pub struct CharType;

fn text(value: &Value) -> &str {
    match value.payload() {
        Payload::Chars(s) => s.as_str(),
        _ => "",
    }
}

impl DataType for CharType {
    fn attr_type(&self) -> AttrType {
        AttrType::Chars
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Ok(text(left).as_bytes().cmp(text(right).as_bytes()))
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        let mut joined = String::with_capacity(left.length() + right.length());
        joined.push_str(text(left));
        joined.push_str(text(right));
        Ok(Value::from(joined))
    }

    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        let s = text(value);
        match to {
            AttrType::Chars => Ok(value.clone()),
            AttrType::Integer => {
                let n = parse_number(s)
                    .ok_or_else(|| ValueError::invalid(format!("'{s}' is not an integer")))?;
                round_to_int(n)
                    .map(Value::from)
                    .ok_or_else(|| ValueError::invalid(format!("'{s}' is out of int range")))
            }
            AttrType::Float => parse_number(s)
                .map(|n| Value::from(n as f32))
                .ok_or_else(|| ValueError::invalid(format!("'{s}' is not a float"))),
            AttrType::Boolean => Ok(Value::from(value.get_boolean())),
            AttrType::Date => parse_date(s).map(Value::date),
            AttrType::Vector => parse_vector(s).map(Value::from),
            AttrType::Undefined => Err(ValueError::UnsupportedCast {
                from: AttrType::Chars,
                to,
            }),
        }
    }

    fn to_string(&self, value: &Value) -> String {
        text(value).to_owned()
    }
}
