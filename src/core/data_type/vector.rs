use std::cmp::Ordering;

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{
        attr_type::AttrType,
        data_type::{DataType, float::compare_floats, format_float},
        value::Payload,
    },
};

/// Behavior of float vectors.
///
/// Arithmetic is element-wise and needs operands of equal dimension.
/// Ordering is lexicographic over the components, then by dimension.
pub struct VectorType;

fn components(value: &Value) -> &[f32] {
    match value.payload() {
        Payload::Vector(v) => v.as_slice(),
        _ => &[],
    }
}

fn zip_with(left: &Value, right: &Value, f: impl Fn(f32, f32) -> f32) -> Result<Value> {
    let (l, r) = (components(left), components(right));
    if l.len() != r.len() {
        return Err(ValueError::invalid(format!(
            "vector dimensions differ: {} and {}",
            l.len(),
            r.len()
        )));
    }
    Ok(Value::from(
        l.iter().zip(r).map(|(a, b)| f(*a, *b)).collect::<Vec<_>>(),
    ))
}

impl DataType for VectorType {
    fn attr_type(&self) -> AttrType {
        AttrType::Vector
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        let (l, r) = (components(left), components(right));
        let ordering = l
            .iter()
            .zip(r)
            .map(|(a, b)| compare_floats(*a, *b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| l.len().cmp(&r.len()));
        Ok(ordering)
    }

    fn add(&self, left: &Value, right: &Value) -> Result<Value> {
        zip_with(left, right, |a, b| a + b)
    }

    fn subtract(&self, left: &Value, right: &Value) -> Result<Value> {
        zip_with(left, right, |a, b| a - b)
    }

    fn multiply(&self, left: &Value, right: &Value) -> Result<Value> {
        zip_with(left, right, |a, b| a * b)
    }

    /// Component-wise; a zero divisor follows IEEE rules.
    fn divide(&self, left: &Value, right: &Value) -> Result<Value> {
        zip_with(left, right, |a, b| a / b)
    }

    fn negative(&self, value: &Value) -> Result<Value> {
        Ok(Value::from(
            components(value).iter().map(|v| -v).collect::<Vec<_>>(),
        ))
    }

    fn to_string(&self, value: &Value) -> String {
        format_vector(components(value))
    }
}

/// Parses a vector literal: comma separated floats, optionally bracketed.
pub(crate) fn parse_vector(s: &str) -> Result<Vec<f32>> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    if inner.trim().is_empty() {
        return Err(ValueError::invalid(format!("'{s}' is an empty vector")));
    }

    inner
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValueError::invalid(format!("'{s}' is not a valid vector")))
        })
        .collect()
}

pub(crate) fn format_vector(values: &[f32]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format_float(*v)).collect();
    format!("[{}]", parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("[1, 2.5, -3]").unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(parse_vector("4,5").unwrap(), vec![4.0, 5.0]);
        assert_eq!(parse_vector("  [ 7 ]  ").unwrap(), vec![7.0]);
    }

    #[test]
    fn test_parse_vector_rejects_malformed() {
        for s in ["", "[]", "[1,]", "[a]", "[1 2]", "[1,2", "[nan]"] {
            assert!(parse_vector(s).is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn test_vector_display() {
        let value = Value::from(vec![1.0, 2.5, 0.25]);
        assert_eq!(value.to_string(), "[1,2.5,0.25]");
    }

    #[test]
    fn test_vector_elementwise_arithmetic() {
        let a = Value::from(vec![1.0, 2.0]);
        let b = Value::from(vec![3.0, 4.0]);
        assert_eq!(Value::add(&a, &b).unwrap(), Value::from(vec![4.0, 6.0]));
        assert_eq!(Value::subtract(&a, &b).unwrap(), Value::from(vec![-2.0, -2.0]));
        assert_eq!(Value::multiply(&a, &b).unwrap(), Value::from(vec![3.0, 8.0]));
        assert_eq!(Value::divide(&b, &a).unwrap(), Value::from(vec![3.0, 2.0]));
        assert_eq!(Value::negative(&a).unwrap(), Value::from(vec![-1.0, -2.0]));
    }

    #[test]
    fn test_vector_dimension_mismatch() {
        let result = Value::add(&Value::from(vec![1.0]), &Value::from(vec![1.0, 2.0]));
        assert_eq!(result.unwrap_err().kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_vector_ordering() {
        let short = Value::from(vec![1.0, 2.0]);
        let long = Value::from(vec![1.0, 2.0, 0.0]);
        let big = Value::from(vec![1.5]);
        assert_eq!(VectorType.compare(&short, &long).unwrap(), Ordering::Less);
        assert_eq!(VectorType.compare(&big, &long).unwrap(), Ordering::Greater);
        assert_eq!(Value::max(&short, &big).unwrap(), big);
    }

    #[test]
    fn test_vector_only_casts_to_itself() {
        let value = Value::from(vec![1.0]);
        assert_eq!(Value::cast_to(&value, AttrType::Vector).unwrap(), value);
        assert!(Value::cast_to(&value, AttrType::Chars).is_err());
        assert!(Value::cast_to(&value, AttrType::Float).is_err());
    }
}
