//! String and conversion helpers for the VM.
//!
//! Strings are indexed by code point, never by byte.

use ippcode_foundation::{Error, Result, Value};

use super::arithmetic::float_to_int;

fn string(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::type_mismatch("string", value.data_type()))
}

fn int(value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| Error::type_mismatch("int", value.data_type()))
}

/// Checks `index` against a string of `len` code points.
fn char_index(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| {
            Error::invalid_string(format!("index {index} is outside a string of length {len}"))
        })
}

/// Joins two strings.
pub(crate) fn concat(a: &Value, b: &Value) -> Result<Value> {
    let (a, b) = (string(a)?, string(b)?);
    let mut joined = String::with_capacity(a.len() + b.len());
    joined.push_str(a);
    joined.push_str(b);
    Ok(Value::from(joined))
}

/// Number of code points in a string.
pub(crate) fn strlen(a: &Value) -> Result<Value> {
    let count = string(a)?.chars().count();
    i64::try_from(count)
        .map(Value::Int)
        .map_err(|_| Error::invalid_operand("string is too long"))
}

/// The character at `index`, as a one-character string.
pub(crate) fn get_char(s: &Value, index: &Value) -> Result<Value> {
    let c = char_at(string(s)?, int(index)?)?;
    Ok(Value::from(c))
}

/// The code point at `index`.
pub(crate) fn stri2int(s: &Value, index: &Value) -> Result<Value> {
    let c = char_at(string(s)?, int(index)?)?;
    Ok(Value::Int(i64::from(u32::from(c))))
}

fn char_at(s: &str, index: i64) -> Result<char> {
    let i = char_index(index, s.chars().count())?;
    s.chars()
        .nth(i)
        .ok_or_else(|| Error::internal("character index drifted"))
}

/// Replaces the character at `index` of `target` with the first
/// character of `replacement`.
pub(crate) fn set_char(target: &Value, index: &Value, replacement: &Value) -> Result<Value> {
    let target = string(target)?;
    let index = int(index)?;
    let replacement = string(replacement)?;

    let first = replacement
        .chars()
        .next()
        .ok_or_else(|| Error::invalid_string("replacement string is empty"))?;
    let i = char_index(index, target.chars().count())?;

    let updated: String = target
        .chars()
        .enumerate()
        .map(|(k, c)| if k == i { first } else { c })
        .collect();
    Ok(Value::from(updated))
}

/// The one-character string for a code point.
pub(crate) fn int2char(a: &Value) -> Result<Value> {
    let code = int(a)?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(Value::from)
        .ok_or_else(|| Error::invalid_string(format!("{code} is not a valid code point")))
}

/// Widens an int to a float.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn int2float(a: &Value) -> Result<Value> {
    Ok(Value::Float(int(a)? as f64))
}

/// Truncates a float toward zero.
pub(crate) fn float2int(a: &Value) -> Result<Value> {
    let x = a
        .as_float()
        .ok_or_else(|| Error::type_mismatch("float", a.data_type()))?;
    float_to_int(x).map(Value::Int)
}
