use std::{cmp::Ordering, fmt::Display};

use crate::{
    common::error::{Result, ValueError},
    core::{
        attr_type::AttrType,
        data_type::{is_valid_date, parse_date, parse_vector, type_instance},
    },
};

mod ops;

pub use ops::{BinaryOp, resolve_binary_result_type};

/// Payload of a [`Value`].
///
/// Only `Chars` and `Vector` own heap memory. Cloning a value deep-copies
/// them and moving a value moves the buffer with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Payload {
    #[default]
    Empty,
    Int(i32),
    Float(f32),
    Bool(bool),
    Chars(String),
    Vector(Vec<f32>),
}

/// One SQL-typed datum, possibly null.
///
/// A value records its type separately from its nullness: a null value still
/// carries a type tag (possibly [`AttrType::Undefined`]) so that a later cast
/// can give it a concrete column type.
///
/// # Example
///
/// ```
/// use scuttle_value::{AttrType, Value};
///
/// let sum = Value::add(&Value::from(2), &Value::from(3.5f32)).unwrap();
/// assert_eq!(sum.attr_type(), AttrType::Float);
/// assert_eq!(sum.to_string(), "5.5");
///
/// let null = Value::cast_to(&Value::null(), AttrType::Float).unwrap();
/// assert!(null.is_null());
/// assert_eq!(null.attr_type(), AttrType::Float);
/// ```
#[derive(Debug, Clone)]
pub struct Value {
    attr_type: AttrType,

    /// Byte length for scalars and chars, dimension for vectors.
    length: usize,

    is_null: bool,

    payload: Payload,
}

impl Default for Value {
    fn default() -> Self {
        Self::null()
    }
}

impl Value {
    /// A null value of undefined type.
    pub fn null() -> Self {
        Self::null_of(AttrType::Undefined)
    }

    /// A null value already tagged with `attr_type`.
    pub fn null_of(attr_type: AttrType) -> Self {
        Self {
            attr_type,
            length: 0,
            is_null: true,
            payload: Payload::Empty,
        }
    }

    /// Builds a date value from a `YYYY-MM-DD` literal.
    ///
    /// # Example
    ///
    /// ```
    /// use scuttle_value::{AttrType, Value};
    ///
    /// let date = Value::from_date("2024-2-29").unwrap();
    /// assert_eq!(date.attr_type(), AttrType::Date);
    /// assert_eq!(date.to_string(), "2024-02-29");
    /// assert!(Value::from_date("2023-02-29").is_err());
    /// ```
    pub fn from_date(s: &str) -> Result<Self> {
        let mut value = Self::null();
        value.set_date(s)?;
        Ok(value)
    }

    /// Builds a vector value from a literal such as `[1, 2.5, 3]`.
    ///
    /// # Example
    ///
    /// ```
    /// use scuttle_value::Value;
    ///
    /// let v = Value::from_vector("[1, 2.5, 3]").unwrap();
    /// assert_eq!(v.length(), 3);
    /// assert_eq!(v.get_vector(), vec![1.0, 2.5, 3.0]);
    /// ```
    pub fn from_vector(s: &str) -> Result<Self> {
        let mut value = Self::null();
        value.set_vector_str(s)?;
        Ok(value)
    }

    /// Decodes a value from its fixed-width row storage bytes.
    ///
    /// `Chars` stop at the first NUL byte, so padded row slots decode to the
    /// stored string. `Vector` byte counts must be a multiple of four.
    pub fn from_raw(attr_type: AttrType, bytes: &[u8]) -> Result<Self> {
        fn fixed<const N: usize>(attr_type: AttrType, bytes: &[u8]) -> Result<[u8; N]> {
            bytes.get(..N).and_then(|b| b.try_into().ok()).ok_or_else(|| {
                ValueError::invalid(format!(
                    "{attr_type} needs {N} byte(s), got {}",
                    bytes.len()
                ))
            })
        }

        let value = match attr_type {
            AttrType::Integer => Self::from(i32::from_le_bytes(fixed(attr_type, bytes)?)),
            AttrType::Float => Self::from(f32::from_le_bytes(fixed(attr_type, bytes)?)),
            AttrType::Boolean => Self::from(fixed::<1>(attr_type, bytes)?[0] != 0),
            AttrType::Date => Self::date(i32::from_le_bytes(fixed(attr_type, bytes)?)),
            AttrType::Chars => {
                let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
                let text = std::str::from_utf8(&bytes[..end])
                    .map_err(|e| ValueError::invalid(format!("chars are not UTF-8: {e}")))?;
                Self::from(text)
            }
            AttrType::Vector => {
                if bytes.len() % 4 != 0 {
                    return Err(ValueError::invalid(format!(
                        "vector byte length {} is not a multiple of 4",
                        bytes.len()
                    )));
                }
                Self::from(decode_floats(bytes))
            }
            AttrType::Undefined => {
                return Err(ValueError::invalid("cannot decode a value of undefined type"));
            }
        };
        Ok(value)
    }

    pub(crate) fn date(yyyymmdd: i32) -> Self {
        let mut value = Self::null();
        value.set_date_int(yyyymmdd);
        value
    }

    pub(crate) fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    /// Byte length of the payload, or the dimension for vectors.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bytes needed to copy this value into row storage.
    ///
    /// Chars get one extra byte for the terminating NUL.
    pub fn data_length(&self) -> usize {
        if self.attr_type == AttrType::Chars {
            self.length + 1
        } else {
            self.length
        }
    }

    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// Whether this is a non-null date naming a real calendar day.
    pub fn is_date_valid(&self) -> bool {
        match (self.attr_type, &self.payload) {
            (AttrType::Date, Payload::Int(v)) if !self.is_null => is_valid_date(*v),
            _ => false,
        }
    }

    /// Row storage encoding of the payload.
    ///
    /// Scalars and chars are `data_length()` bytes, vectors four bytes per
    /// component. Null values encode to no bytes; nullness is tracked by the
    /// row layer.
    pub fn data(&self) -> Vec<u8> {
        if self.is_null {
            return Vec::new();
        }
        match &self.payload {
            Payload::Empty => Vec::new(),
            Payload::Int(v) => v.to_le_bytes().to_vec(),
            Payload::Float(v) => v.to_le_bytes().to_vec(),
            Payload::Bool(v) => vec![u8::from(*v)],
            Payload::Chars(s) => {
                let mut bytes = Vec::with_capacity(s.len() + 1);
                bytes.extend_from_slice(s.as_bytes());
                bytes.push(0);
                bytes
            }
            Payload::Vector(v) => encode_floats(v),
        }
    }

    pub fn set_type(&mut self, attr_type: AttrType) {
        self.attr_type = attr_type;
    }

    /// Marks the value null or non-null.
    ///
    /// Nulling drops any owned payload; the type tag is kept.
    pub fn set_is_null(&mut self, is_null: bool) {
        self.is_null = is_null;
        if is_null {
            self.payload = Payload::Empty;
            self.length = 0;
        }
    }

    pub fn set_int(&mut self, val: i32) {
        self.set_payload(AttrType::Integer, 4, Payload::Int(val));
    }

    pub fn set_float(&mut self, val: f32) {
        self.set_payload(AttrType::Float, 4, Payload::Float(val));
    }

    pub fn set_boolean(&mut self, val: bool) {
        self.set_payload(AttrType::Boolean, 1, Payload::Bool(val));
    }

    pub fn set_string(&mut self, s: &str) {
        self.set_payload(AttrType::Chars, s.len(), Payload::Chars(s.to_owned()));
    }

    /// Sets a date from a `YYYY-MM-DD` literal, leaving `self` untouched if
    /// the literal is not a valid date.
    pub fn set_date(&mut self, s: &str) -> Result<()> {
        let yyyymmdd = parse_date(s)?;
        self.set_date_int(yyyymmdd);
        Ok(())
    }

    /// Sets a date from its `YYYYMMDD` integer form without validating it.
    pub fn set_date_int(&mut self, yyyymmdd: i32) {
        self.set_payload(AttrType::Date, 4, Payload::Int(yyyymmdd));
    }

    pub fn set_vector(&mut self, vector: Vec<f32>) {
        self.set_payload(AttrType::Vector, vector.len(), Payload::Vector(vector));
    }

    /// Sets a vector from its literal form.
    pub fn set_vector_str(&mut self, s: &str) -> Result<()> {
        let vector = parse_vector(s)?;
        self.set_vector(vector);
        Ok(())
    }

    /// Copies type, nullness and payload from `other`.
    pub fn set_value(&mut self, other: &Value) {
        self.clone_from(other);
    }

    /// Stores the display form of `other` as a chars value.
    pub fn set_string_from_other(&mut self, other: &Value) {
        if other.is_null {
            *self = Self::null_of(AttrType::Chars);
        } else {
            self.set_string(&other.get_string());
        }
    }

    fn set_payload(&mut self, attr_type: AttrType, length: usize, payload: Payload) {
        self.attr_type = attr_type;
        self.length = length;
        self.is_null = false;
        self.payload = payload;
    }

    /// Integer view of this value, converting from the stored type.
    ///
    /// Fractions round half away from zero. Conversions that cannot produce
    /// an in-range number yield `0`.
    pub fn get_int(&self) -> i32 {
        match &self.payload {
            Payload::Int(v) => *v,
            Payload::Float(v) => round_to_int(f64::from(*v)).unwrap_or_else(|| {
                tracing::warn!(value = %v, "float is out of int range");
                0
            }),
            Payload::Bool(v) => i32::from(*v),
            Payload::Chars(s) => parse_number(s).and_then(round_to_int).unwrap_or_else(|| {
                tracing::warn!(value = %s, "failed to convert chars to int");
                0
            }),
            Payload::Vector(_) | Payload::Empty => 0,
        }
    }

    /// Float view of this value, converting from the stored type.
    pub fn get_float(&self) -> f32 {
        match &self.payload {
            Payload::Int(v) => *v as f32,
            Payload::Float(v) => *v,
            Payload::Bool(v) => f32::from(u8::from(*v)),
            Payload::Chars(s) => parse_number(s).map(|n| n as f32).unwrap_or_else(|| {
                tracing::warn!(value = %s, "failed to convert chars to float");
                0.0
            }),
            Payload::Vector(_) | Payload::Empty => 0.0,
        }
    }

    /// Display form of this value; `NULL` for nulls.
    pub fn get_string(&self) -> String {
        self.to_string()
    }

    /// Truthiness of this value.
    ///
    /// Numbers are true when non-zero. Chars holding a number follow the same
    /// rule, `true`/`false` spell themselves, anything else is true when
    /// non-empty.
    pub fn get_boolean(&self) -> bool {
        match &self.payload {
            Payload::Int(v) => *v != 0,
            Payload::Float(v) => v.abs() >= f32::EPSILON,
            Payload::Bool(v) => *v,
            Payload::Chars(s) => {
                let trimmed = s.trim();
                if let Some(n) = parse_number(trimmed) {
                    n.abs() >= f64::from(f32::EPSILON)
                } else if trimmed.eq_ignore_ascii_case("true") {
                    true
                } else if trimmed.eq_ignore_ascii_case("false") {
                    false
                } else {
                    !s.is_empty()
                }
            }
            Payload::Vector(v) => !v.is_empty(),
            Payload::Empty => false,
        }
    }

    /// Vector view of this value; chars are parsed as a vector literal.
    pub fn get_vector(&self) -> Vec<f32> {
        match &self.payload {
            Payload::Vector(v) => v.clone(),
            Payload::Chars(s) => parse_vector(s).unwrap_or_else(|e| {
                tracing::warn!(value = %s, error = %e, "failed to convert chars to vector");
                Vec::new()
            }),
            _ => Vec::new(),
        }
    }

    /// Orders two values.
    ///
    /// Values of the same type use that type's order; integers, floats and
    /// booleans compare numerically with each other. Nulls sort before every
    /// non-null value. Any other pairing is a type mismatch.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self.is_null, other.is_null) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            (false, false) => {}
        }

        if self.attr_type == other.attr_type {
            return type_instance(self.attr_type).compare(self, other);
        }
        if self.attr_type.is_numeric() && other.attr_type.is_numeric() {
            return type_instance(AttrType::Float).compare(self, other);
        }
        Err(ValueError::mismatch("compare", self.attr_type, other.attr_type))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.attr_type == other.attr_type
            && self.is_null == other.is_null
            && (self.is_null || self.payload == other.payload)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null {
            return write!(f, "NULL");
        }
        write!(f, "{}", type_instance(self.attr_type).to_string(self))
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        let mut value = Self::null();
        value.set_int(val);
        value
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        let mut value = Self::null();
        value.set_float(val);
        value
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        let mut value = Self::null();
        value.set_boolean(val);
        value
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        let mut value = Self::null();
        value.set_string(val);
        value
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        let length = val.len();
        Self {
            attr_type: AttrType::Chars,
            length,
            is_null: false,
            payload: Payload::Chars(val),
        }
    }
}

impl From<Vec<f32>> for Value {
    fn from(val: Vec<f32>) -> Self {
        let mut value = Self::null();
        value.set_vector(val);
        value
    }
}

/// Parses a number the way the chars accessors do: an integer first, then a
/// float, after trimming whitespace.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    trimmed
        .parse::<i64>()
        .map(|n| n as f64)
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().filter(|n| n.is_finite()))
}

/// Rounds half away from zero, or `None` when the result does not fit an
/// `i32`.
pub(crate) fn round_to_int(n: f64) -> Option<i32> {
    let rounded = n.round();
    (rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX)).then_some(rounded as i32)
}

pub(crate) fn encode_floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub(crate) fn decode_floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
