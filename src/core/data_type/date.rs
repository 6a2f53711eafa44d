use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use crate::{
    Value,
    common::error::{Result, ValueError},
    core::{attr_type::AttrType, data_type::DataType},
};

/// Behavior of calendar dates, stored as `YYYYMMDD` so that integer order is
/// chronological order. Dates compare and cast to chars; they have no
/// arithmetic.
pub struct DateType;

impl DataType for DateType {
    fn attr_type(&self) -> AttrType {
        AttrType::Date
    }

    fn compare(&self, left: &Value, right: &Value) -> Result<Ordering> {
        Ok(left.get_int().cmp(&right.get_int()))
    }

    fn cast_to(&self, value: &Value, to: AttrType) -> Result<Value> {
        match to {
            AttrType::Date => Ok(value.clone()),
            AttrType::Chars => Ok(Value::from(format_date(value.get_int()))),
            _ => Err(ValueError::UnsupportedCast {
                from: AttrType::Date,
                to,
            }),
        }
    }

    fn to_string(&self, value: &Value) -> String {
        format_date(value.get_int())
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn to_naive(yyyymmdd: i32) -> Option<NaiveDate> {
    let (year, month, day) = (yyyymmdd / 10000, yyyymmdd / 100 % 100, yyyymmdd % 100);
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

fn to_yyyymmdd(date: NaiveDate) -> i32 {
    date.year() * 10000 + date.month() as i32 * 100 + date.day() as i32
}

/// Whether `yyyymmdd` names a real day of the Gregorian calendar.
pub(crate) fn is_valid_date(yyyymmdd: i32) -> bool {
    to_naive(yyyymmdd).is_some()
}

/// Parses `YYYY-MM-DD` (month and day may be one digit) into `YYYYMMDD`.
///
/// Years are limited to `1..=9999`.
pub(crate) fn parse_date(s: &str) -> Result<i32> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .ok()
        .filter(|date| (1..=9999).contains(&date.year()))
        .map(to_yyyymmdd)
        .ok_or_else(|| ValueError::invalid(format!("'{s}' is not a valid date")))
}

pub(crate) fn format_date(yyyymmdd: i32) -> String {
    match to_naive(yyyymmdd) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => format!(
            "{:04}-{:02}-{:02}",
            yyyymmdd / 10000,
            yyyymmdd / 100 % 100,
            yyyymmdd % 100
        ),
    }
}
