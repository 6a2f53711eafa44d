use strum::{Display, IntoStaticStr};

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{attr_type::AttrType, data_type::type_instance},
};

/// Binary operations whose result type comes from the promotion lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Max,
    Min,
}

/// Resolves the result type of `left op right`.
///
/// Integers and floats promote to float, booleans promote to the numeric
/// type on the other side, and chars, dates and vectors only combine with
/// themselves. Division never yields an integer.
///
/// # Example
///
/// ```
/// use scuttle_value::{AttrType, BinaryOp, resolve_binary_result_type};
///
/// let ty = resolve_binary_result_type(AttrType::Integer, AttrType::Boolean, BinaryOp::Add);
/// assert_eq!(ty.unwrap(), AttrType::Integer);
///
/// let ty = resolve_binary_result_type(AttrType::Integer, AttrType::Integer, BinaryOp::Divide);
/// assert_eq!(ty.unwrap(), AttrType::Float);
/// ```
pub fn resolve_binary_result_type(left: AttrType, right: AttrType, op: BinaryOp) -> Result<AttrType> {
    use AttrType::*;

    let resolved = match (left, right) {
        (Integer, Integer) | (Integer, Boolean) | (Boolean, Integer) => Integer,
        (Float, Integer | Float | Boolean) | (Integer | Boolean, Float) => Float,
        (Chars, Chars) => Chars,
        (Date, Date) => Date,
        (Vector, Vector) => Vector,
        _ => return Err(ValueError::mismatch(op.into(), left, right)),
    };

    if op == BinaryOp::Divide && resolved == Integer {
        return Ok(Float);
    }
    Ok(resolved)
}

impl Value {
    /// `left + right`. A null operand gives a null of undefined type.
    pub fn add(left: &Value, right: &Value) -> Result<Value> {
        Self::binary(BinaryOp::Add, left, right)
    }

    /// `left - right`. A null operand gives a null of undefined type.
    pub fn subtract(left: &Value, right: &Value) -> Result<Value> {
        Self::binary(BinaryOp::Subtract, left, right)
    }

    /// `left * right`. A null operand gives a null of undefined type.
    pub fn multiply(left: &Value, right: &Value) -> Result<Value> {
        Self::binary(BinaryOp::Multiply, left, right)
    }

    /// `left / right`, always computed as a float for numeric operands.
    pub fn divide(left: &Value, right: &Value) -> Result<Value> {
        Self::binary(BinaryOp::Divide, left, right)
    }

    /// Unary minus, computed in the operand's own type.
    pub fn negative(value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::null_of(value.attr_type()));
        }
        type_instance(value.attr_type()).negative(value)
    }

    /// The greater of two values. If one side is null the other side is
    /// returned unchanged.
    pub fn max(left: &Value, right: &Value) -> Result<Value> {
        Self::extremum(BinaryOp::Max, left, right)
    }

    /// The smaller of two values. If one side is null the other side is
    /// returned unchanged.
    pub fn min(left: &Value, right: &Value) -> Result<Value> {
        Self::extremum(BinaryOp::Min, left, right)
    }

    /// Converts `value` to `to`.
    ///
    /// A null of any type becomes a null of type `to`, which is how untyped
    /// `NULL` literals pick up their column type.
    pub fn cast_to(value: &Value, to: AttrType) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::null_of(to));
        }
        type_instance(value.attr_type()).cast_to(value, to)
    }

    fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
        if left.is_null() || right.is_null() {
            return Ok(Value::null());
        }

        let result_type = resolve_binary_result_type(left.attr_type(), right.attr_type(), op)?;
        let behavior = type_instance(result_type);
        match op {
            BinaryOp::Add => behavior.add(left, right),
            BinaryOp::Subtract => behavior.subtract(left, right),
            BinaryOp::Multiply => behavior.multiply(left, right),
            BinaryOp::Divide => behavior.divide(left, right),
            BinaryOp::Max => behavior.max(left, right),
            BinaryOp::Min => behavior.min(left, right),
        }
    }

    fn extremum(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
        if left.is_null() {
            return Ok(right.clone());
        }
        if right.is_null() {
            return Ok(left.clone());
        }
        Self::binary(op, left, right)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn expected_lattice(left: AttrType, right: AttrType) -> Option<AttrType> {
        use AttrType::*;

        let row = |l: AttrType| -> [Option<AttrType>; 6] {
            match l {
                Integer => [Some(Integer), Some(Float), Some(Integer), None, None, None],
                Float => [Some(Float), Some(Float), Some(Float), None, None, None],
                Boolean => [Some(Integer), Some(Float), None, None, None, None],
                Chars => [None, None, None, Some(Chars), None, None],
                Date => [None, None, None, None, Some(Date), None],
                Vector => [None, None, None, None, None, Some(Vector)],
                Undefined => [None; 6],
            }
        };
        let column = match right {
            Integer => 0,
            Float => 1,
            Boolean => 2,
            Chars => 3,
            Date => 4,
            Vector => 5,
            Undefined => return None,
        };
        row(left)[column]
    }

    #[test]
    fn test_lattice_matches_table() {
        for left in AttrType::iter() {
            for right in AttrType::iter() {
                let resolved = resolve_binary_result_type(left, right, BinaryOp::Add).ok();
                assert_eq!(resolved, expected_lattice(left, right), "{left} + {right}");
            }
        }
    }

    #[test]
    fn test_lattice_divide_upgrades_integer() {
        for left in AttrType::iter() {
            for right in AttrType::iter() {
                let resolved = resolve_binary_result_type(left, right, BinaryOp::Divide).ok();
                let expected = expected_lattice(left, right).map(|ty| match ty {
                    AttrType::Integer => AttrType::Float,
                    other => other,
                });
                assert_eq!(resolved, expected, "{left} / {right}");
            }
        }
    }

    #[test]
    fn test_add_integers() {
        let result = Value::add(&Value::from(2), &Value::from(3));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Value::from(5));
    }

    #[test]
    fn test_add_mixed_types() {
        let result = Value::add(&Value::from(2), &Value::from(3.5f32));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Value::from(5.5f32));
    }

    #[test]
    fn test_add_boolean_promotes_to_integer() {
        let result = Value::add(&Value::from(true), &Value::from(4)).unwrap();
        assert_eq!(result, Value::from(5));
    }

    #[test]
    fn test_add_booleans_is_mismatch() {
        let result = Value::add(&Value::from(true), &Value::from(false));
        assert!(result.is_err());
    }

    #[test]
    fn test_divide_integers_yields_float() {
        let result = Value::divide(&Value::from(7), &Value::from(2)).unwrap();
        assert_eq!(result.attr_type(), AttrType::Float);
        assert_eq!(result, Value::from(3.5f32));
    }

    #[test]
    fn test_divide_by_zero_is_null() {
        let result = Value::divide(&Value::from(7), &Value::from(0)).unwrap();
        assert!(result.is_null());
        assert_eq!(result.attr_type(), AttrType::Float);
    }

    #[test]
    fn test_subtract_and_multiply() {
        let result = Value::subtract(&Value::from(10), &Value::from(3)).unwrap();
        assert_eq!(result, Value::from(7));

        let result = Value::multiply(&Value::from(4), &Value::from(2.5f32)).unwrap();
        assert_eq!(result, Value::from(10.0f32));
    }

    #[test]
    fn test_type_mismatch_reports_operands() {
        let err = Value::add(&Value::from("a"), &Value::from(1)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ValueTypeMismatch);
        assert_eq!(err.to_string(), "type mismatch: cannot add chars and ints");
    }

    #[test]
    fn test_arithmetic_null_propagation() {
        let ops: [fn(&Value, &Value) -> Result<Value>; 4] =
            [Value::add, Value::subtract, Value::multiply, Value::divide];
        let operands = [
            Value::from(1),
            Value::from(1.5f32),
            Value::from(true),
            Value::from("x"),
            Value::from_date("2020-01-01").unwrap(),
            Value::from(vec![1.0]),
        ];

        for op in ops {
            for operand in &operands {
                let null = Value::null_of(operand.attr_type());
                assert!(op(&null, operand).unwrap().is_null());
                assert!(op(operand, &null).unwrap().is_null());
                assert!(op(&Value::null(), operand).unwrap().is_null());
            }
        }
    }

    #[test]
    fn test_null_short_circuits_before_type_check() {
        let result = Value::add(&Value::null_of(AttrType::Chars), &Value::from(1)).unwrap();
        assert!(result.is_null());
        assert_eq!(result.attr_type(), AttrType::Undefined);
    }

    #[test]
    fn test_max_min_skip_null() {
        let operands = [
            Value::from(3),
            Value::from(2.5f32),
            Value::from("abc"),
            Value::from_date("2021-06-01").unwrap(),
        ];
        for x in &operands {
            let null = Value::null();
            assert_eq!(&Value::max(&null, x).unwrap(), x);
            assert_eq!(&Value::max(x, &null).unwrap(), x);
            assert_eq!(&Value::min(&null, x).unwrap(), x);
            assert_eq!(&Value::min(x, &null).unwrap(), x);
        }
    }

    #[test]
    fn test_max_min_both_null() {
        let result = Value::max(&Value::null(), &Value::null_of(AttrType::Integer)).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn test_max_min_promote() {
        let result = Value::max(&Value::from(2), &Value::from(1.5f32)).unwrap();
        assert_eq!(result, Value::from(2.0f32));

        let result = Value::min(&Value::from(2), &Value::from(1.5f32)).unwrap();
        assert_eq!(result, Value::from(1.5f32));

        let result = Value::max(&Value::from(0), &Value::from(true)).unwrap();
        assert_eq!(result, Value::from(1));
    }

    #[test]
    fn test_max_min_same_type() {
        let result = Value::max(&Value::from("pear"), &Value::from("apple")).unwrap();
        assert_eq!(result, Value::from("pear"));

        let early = Value::from_date("2020-01-01").unwrap();
        let late = Value::from_date("2020-12-31").unwrap();
        assert_eq!(Value::min(&late, &early).unwrap(), early);
        assert_eq!(Value::max(&early, &late).unwrap(), late);
    }

    #[test]
    fn test_max_mismatch() {
        let result = Value::max(&Value::from("a"), &Value::from(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_uses_input_type() {
        let result = Value::negative(&Value::from(5)).unwrap();
        assert_eq!(result, Value::from(-5));

        let result = Value::negative(&Value::from(1.25f32)).unwrap();
        assert_eq!(result, Value::from(-1.25f32));

        let result = Value::negative(&Value::null_of(AttrType::Float)).unwrap();
        assert!(result.is_null());
        assert_eq!(result.attr_type(), AttrType::Float);

        assert!(Value::negative(&Value::from("a")).is_err());
        assert!(Value::negative(&Value::from(true)).is_err());
    }

    #[test]
    fn test_cast_null_takes_target_type() {
        let result = Value::cast_to(&Value::null(), AttrType::Float).unwrap();
        assert!(result.is_null());
        assert_eq!(result.attr_type(), AttrType::Float);

        let result = Value::cast_to(&Value::null_of(AttrType::Vector), AttrType::Chars).unwrap();
        assert!(result.is_null());
        assert_eq!(result.attr_type(), AttrType::Chars);
    }

    #[test]
    fn test_cast_chars_to_chars_is_copy() {
        let value = Value::from("round trip");
        let result = Value::cast_to(&value, AttrType::Chars).unwrap();
        assert_eq!(result, value);
        assert_eq!(result.data_length(), value.length() + 1);
    }

    #[test]
    fn test_cast_vector_to_chars_fails() {
        let err = Value::cast_to(&Value::from(vec![1.0]), AttrType::Chars).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ValueTypeMismatch);
    }
}
