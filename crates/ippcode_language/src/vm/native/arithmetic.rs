//! Arithmetic, comparison, and logic helpers for the VM.

use std::cmp::Ordering;

use ippcode_foundation::{DataType, Error, Result, Value};

const NUMERIC: &str = "int or float";
const ORDERED: &str = "int, bool, float or string";
const EQUATABLE: &str = "int, bool, string or nil";

/// The five arithmetic operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    IDiv,
}

/// Applies an arithmetic operation to two operands of one numeric kind.
pub(crate) fn arithmetic(op: Arith, a: &Value, b: &Value) -> Result<Value> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => int_arithmetic(op, *x, *y),
        (Value::Float(x), Value::Float(y)) => float_arithmetic(op, *x, *y),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Err(Error::operand_mismatch(a.data_type(), b.data_type()))
        }
        (Value::Int(_) | Value::Float(_), _) => Err(Error::type_mismatch(NUMERIC, b.data_type())),
        _ => Err(Error::type_mismatch(NUMERIC, a.data_type())),
    }
}

fn zero_division() -> Error {
    Error::invalid_operand("division by zero")
}

fn overflow() -> Error {
    Error::invalid_operand("integer overflow")
}

#[allow(clippy::cast_precision_loss)]
fn int_arithmetic(op: Arith, x: i64, y: i64) -> Result<Value> {
    match op {
        Arith::Add => x.checked_add(y).map(Value::Int).ok_or_else(overflow),
        Arith::Sub => x.checked_sub(y).map(Value::Int).ok_or_else(overflow),
        Arith::Mul => x.checked_mul(y).map(Value::Int).ok_or_else(overflow),
        Arith::Div => {
            if y == 0 {
                return Err(zero_division());
            }
            Ok(Value::Float(x as f64 / y as f64))
        }
        Arith::IDiv => {
            if y == 0 {
                return Err(zero_division());
            }
            floor_div(x, y).map(Value::Int).ok_or_else(overflow)
        }
    }
}

fn float_arithmetic(op: Arith, x: f64, y: f64) -> Result<Value> {
    match op {
        Arith::Add => Ok(Value::Float(x + y)),
        Arith::Sub => Ok(Value::Float(x - y)),
        Arith::Mul => Ok(Value::Float(x * y)),
        Arith::Div => {
            if y == 0.0 {
                return Err(zero_division());
            }
            Ok(Value::Float(x / y))
        }
        Arith::IDiv => {
            if y == 0.0 {
                return Err(zero_division());
            }
            float_to_int((x / y).floor()).map(Value::Int)
        }
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(x: i64, y: i64) -> Option<i64> {
    let quotient = x.checked_div(y)?;
    let remainder = x.checked_rem(y)?;
    if remainder != 0 && ((remainder < 0) != (y < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Truncates a float toward zero into the Int range.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn float_to_int(x: f64) -> Result<i64> {
    let truncated = x.trunc();
    // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
    if truncated.is_nan() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(Error::invalid_operand(format!("{x} does not fit in an int")));
    }
    Ok(truncated as i64)
}

fn ordering(a: &Value, b: &Value) -> Result<Option<Ordering>> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Some(x.cmp(y))),
        (Value::Bool(x), Value::Bool(y)) => Ok(Some(x.cmp(y))),
        (Value::Float(x), Value::Float(y)) => Ok(x.partial_cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(Some(x.cmp(y))),
        (Value::Nil, _) | (_, Value::Nil) => Err(Error::type_mismatch(ORDERED, DataType::Nil)),
        _ => Err(Error::operand_mismatch(a.data_type(), b.data_type())),
    }
}

/// `a < b` for two operands of one ordered kind.
pub(crate) fn less_than(a: &Value, b: &Value) -> Result<bool> {
    Ok(ordering(a, b)? == Some(Ordering::Less))
}

/// `a > b` for two operands of one ordered kind.
pub(crate) fn greater_than(a: &Value, b: &Value) -> Result<bool> {
    Ok(ordering(a, b)? == Some(Ordering::Greater))
}

/// Equality as EQ and the conditional jumps define it.
///
/// Nil compares with anything and equals only nil. Otherwise both
/// operands must share one of the int, bool, or string kinds.
pub(crate) fn equals(a: &Value, b: &Value) -> Result<bool> {
    match (a, b) {
        (Value::Nil, other) | (other, Value::Nil) => Ok(other.is_nil()),
        (Value::Int(x), Value::Int(y)) => Ok(x == y),
        (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
        (Value::String(x), Value::String(y)) => Ok(x == y),
        (Value::Float(_), Value::Float(_)) => {
            Err(Error::type_mismatch(EQUATABLE, a.data_type()))
        }
        _ => Err(Error::operand_mismatch(a.data_type(), b.data_type())),
    }
}

fn boolean(value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::type_mismatch("bool", value.data_type()))
}

/// Logical AND of two bools.
pub(crate) fn and(a: &Value, b: &Value) -> Result<Value> {
    Ok(Value::Bool(boolean(a)? & boolean(b)?))
}

/// Logical OR of two bools.
pub(crate) fn or(a: &Value, b: &Value) -> Result<Value> {
    Ok(Value::Bool(boolean(a)? | boolean(b)?))
}

/// Logical NOT of a bool.
pub(crate) fn not(a: &Value) -> Result<Value> {
    Ok(Value::Bool(!boolean(a)?))
}

/// Validates an EXIT operand.
pub(crate) fn exit_code(value: &Value) -> Result<u8> {
    match value {
        Value::Int(code @ 0..=49) => u8::try_from(*code)
            .map_err(|_| Error::invalid_operand(format!("exit code {code} is out of range"))),
        Value::Int(code) => Err(Error::invalid_operand(format!(
            "exit code {code} is outside 0..=49"
        ))),
        other => Err(Error::type_mismatch("int", other.data_type())),
    }
}
