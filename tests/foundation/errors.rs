//! Integration tests for Error types
//!
//! Tests exit codes and error context.

use ippcode_foundation::{DataType, Error, ErrorContext, ErrorKind};

#[test]
fn every_kind_has_its_exit_code() {
    let cases = [
        (ErrorKind::InvalidArguments(String::new()), 10),
        (ErrorKind::CannotOpenInput(String::new()), 11),
        (ErrorKind::CannotOpenOutput(String::new()), 12),
        (
            ErrorKind::MalformedProgram {
                message: String::new(),
                line: 1,
            },
            31,
        ),
        (ErrorKind::InvalidStructure(String::new()), 32),
        (ErrorKind::Semantic(String::new()), 52),
        (
            ErrorKind::InvalidDataType {
                expected: String::new(),
                actual: String::new(),
            },
            53,
        ),
        (ErrorKind::UndefinedVariable(String::new()), 54),
        (ErrorKind::InvalidFrame(String::new()), 55),
        (ErrorKind::UndefinedValue(String::new()), 56),
        (ErrorKind::InvalidOperandValue(String::new()), 57),
        (ErrorKind::InvalidStringOperation(String::new()), 58),
        (ErrorKind::Internal(String::new()), 99),
    ];
    for (kind, code) in cases {
        assert_eq!(kind.exit_code(), code, "{kind}");
    }
}

#[test]
fn constructors_pick_the_right_kind() {
    assert_eq!(Error::type_mismatch("int", DataType::Bool).exit_code(), 53);
    assert_eq!(Error::undefined_variable("GF@x").exit_code(), 54);
    assert_eq!(Error::invalid_frame("no LF").exit_code(), 55);
    assert_eq!(Error::undefined_value("GF@x").exit_code(), 56);
    assert_eq!(Error::invalid_operand("zero").exit_code(), 57);
    assert_eq!(Error::invalid_string("index").exit_code(), 58);
}

#[test]
fn innermost_context_wins() {
    let inner = ErrorContext::new().with_instruction(3, "IDIV");
    let outer = ErrorContext::new().with_instruction(9, "CALL");
    let err = Error::invalid_operand("division by zero")
        .with_context(inner.clone())
        .with_context(outer);
    assert_eq!(err.context, Some(inner));
}

#[test]
fn context_display() {
    let context = ErrorContext::new().with_instruction(4, "WRITE").with_line(7);
    assert_eq!(context.to_string(), "in WRITE (instruction 4) on line 7");
}
