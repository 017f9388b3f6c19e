//! READ conversion and TYPE names.

use ippcode_foundation::{DataType, Value, float};

/// Converts one input line (or end of input) to a value of `ty`.
///
/// Anything that does not convert becomes nil.
pub(crate) fn read_value(line: Option<&str>, ty: DataType) -> Value {
    let Some(line) = line.map(str::trim_end) else {
        return Value::Nil;
    };
    match ty {
        DataType::Bool => Value::Bool(line.eq_ignore_ascii_case("true")),
        DataType::Int => match line.parse::<i64>() {
            Ok(n) if n.to_string() == line => Value::Int(n),
            _ => Value::Nil,
        },
        DataType::Float => float::parse(line).map_or(Value::Nil, Value::Float),
        DataType::String => Value::from(line),
        DataType::Nil => Value::Nil,
    }
}

/// The TYPE result for an optional value: its kind name, or the empty
/// string for an unbound variable.
pub(crate) fn type_name(value: Option<&Value>) -> Value {
    Value::from(value.map_or("", |v| v.data_type().name()))
}
