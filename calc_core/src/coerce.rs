//! # Input Coercion
//!
//! Calculators take whatever a form hands them. Rather than rejecting a
//! half-typed value, numbers are read leniently: the longest numeric prefix
//! wins (`"12abc"` is 12), and anything unreadable falls back to a default
//! (usually 0). Non-finite values never leak into a calculation.
//!
//! The serde helpers let input structs accept numbers, numeric strings,
//! booleans and `null` for the same field:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Form {
//!     #[serde(deserialize_with = "calc_core::coerce::lenient")]
//!     amount: f64,
//! }
//!
//! let form: Form = serde_json::from_str(r#"{ "amount": "42.5 USD" }"#).unwrap();
//! assert_eq!(form.amount, 42.5);
//!
//! let form: Form = serde_json::from_str(r#"{ "amount": null }"#).unwrap();
//! assert_eq!(form.amount, 0.0);
//! ```

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;

/// Parse the longest numeric prefix of `text`, returning 0 when there is none.
///
/// ```rust
/// use calc_core::coerce::parse_number;
///
/// assert_eq!(parse_number("  3.5kg"), 3.5);
/// assert_eq!(parse_number("-.25"), -0.25);
/// assert_eq!(parse_number("1e3x"), 1000.0);
/// assert_eq!(parse_number("abc"), 0.0);
/// ```
pub fn parse_number(text: &str) -> f64 {
    parse_prefix(text).unwrap_or(0.0)
}

fn parse_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Replace NaN and infinities with 0.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Convert a coerced float into a whole count, never below `min`.
///
/// Fractions are truncated; negative and non-finite values become `min`.
pub fn whole_count(value: f64, min: usize) -> usize {
    if !value.is_finite() || value < min as f64 {
        return min;
    }
    // Saturates on absurdly large input
    value.trunc() as usize
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string, a boolean or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(finite_or_zero(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<f64, E> {
        Ok(if v { 1.0 } else { 0.0 })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_number(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientNumber)
    }
}

/// Serde `deserialize_with` helper for lenient numeric fields.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a number or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(LenientText)
    }
}

/// Serde `deserialize_with` helper for text fields that may arrive as numbers
/// (e.g. odds typed as `-110` or `"-110"`).
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientText)
}

/// Split free text into numbers, skipping tokens that are not numeric.
///
/// Commas, semicolons and whitespace all separate values.
///
/// ```rust
/// use calc_core::coerce::parse_list;
///
/// assert_eq!(parse_list("1, 2.5; x 4"), vec![1.0, 2.5, 4.0]);
/// ```
pub fn parse_list(text: &str) -> Vec<f64> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(parse_prefix)
        .collect()
}

struct LenientElement(f64);

impl<'de> Deserialize<'de> for LenientElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientNumber).map(LenientElement)
    }
}

struct LenientList;

impl<'de> Visitor<'de> for LenientList {
    type Value = Vec<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an array of numbers or a delimited string of numbers")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<f64>, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LenientElement(v)) = seq.next_element()? {
            values.push(v);
        }
        Ok(values)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Vec<f64>, E> {
        Ok(parse_list(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Vec<f64>, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Vec<f64>, E> {
        Ok(Vec::new())
    }
}

/// Serde `deserialize_with` helper for number lists given as an array
/// (elements coerced like [`lenient`]) or as delimited text.
pub fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientList)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient")]
        value: f64,
        #[serde(default, deserialize_with = "lenient_text")]
        label: String,
    }

    #[test]
    fn test_parse_prefix_forms() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("  -7.5 "), -7.5);
        assert_eq!(parse_number("+3"), 3.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number("1,000"), 1.0);
        assert_eq!(parse_number("2.5e2"), 250.0);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("2e+"), 2.0);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("Infinity"), 0.0);
        assert_eq!(parse_number("1e999"), 0.0);
    }

    #[test]
    fn test_whole_count() {
        assert_eq!(whole_count(3.9, 1), 3);
        assert_eq!(whole_count(0.0, 1), 1);
        assert_eq!(whole_count(-4.0, 0), 0);
        assert_eq!(whole_count(f64::NAN, 2), 2);
    }

    #[test]
    fn test_lenient_deserialize() {
        let s: Sample = serde_json::from_str(r#"{ "value": "12abc", "label": 5 }"#).unwrap();
        assert_eq!(s.value, 12.0);
        assert_eq!(s.label, "5");

        let s: Sample = serde_json::from_str(r#"{ "value": true }"#).unwrap();
        assert_eq!(s.value, 1.0);

        let s: Sample = serde_json::from_str(r#"{ "value": null, "label": null }"#).unwrap();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.label, "");

        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.value, 0.0);
    }

    #[test]
    fn test_lenient_list() {
        #[derive(Deserialize)]
        struct Data {
            #[serde(deserialize_with = "lenient_list")]
            values: Vec<f64>,
        }

        let d: Data = serde_json::from_str(r#"{ "values": [1, "2", null, "3kg"] }"#).unwrap();
        assert_eq!(d.values, vec![1.0, 2.0, 0.0, 3.0]);

        let d: Data = serde_json::from_str(r#"{ "values": "4 5,6" }"#).unwrap();
        assert_eq!(d.values, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_lenient_rejects_structures() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{ "value": [1, 2] }"#);
        assert!(result.is_err());
    }
}
