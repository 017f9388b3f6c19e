//! Integration tests for Value types
//!
//! Tests Value variants, equality, and the WRITE and literal text forms.

use ippcode_foundation::{DataType, Value};
use std::sync::Arc;

// =============================================================================
// Data Types
// =============================================================================

#[test]
fn every_variant_reports_its_type() {
    assert_eq!(Value::Nil.data_type(), DataType::Nil);
    assert_eq!(Value::Int(1).data_type(), DataType::Int);
    assert_eq!(Value::Bool(true).data_type(), DataType::Bool);
    assert_eq!(Value::Float(0.5).data_type(), DataType::Float);
    assert_eq!(Value::String(Arc::from("x")).data_type(), DataType::String);
}

#[test]
fn type_names_parse_back() {
    for ty in [DataType::Int, DataType::Bool, DataType::Float, DataType::String] {
        assert_eq!(ty.name().parse::<DataType>(), Ok(ty));
        assert!(ty.is_readable());
    }
    assert!(!DataType::Nil.is_readable());
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn nil_equals_only_nil() {
    assert_eq!(Value::Nil, Value::Nil);
    assert_ne!(Value::Nil, Value::Int(0));
    assert_ne!(Value::Nil, Value::from(""));
}

#[test]
fn different_kinds_are_never_equal() {
    assert_ne!(Value::Int(1), Value::Bool(true));
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

// =============================================================================
// Text Forms
// =============================================================================

#[test]
fn write_form() {
    assert_eq!(Value::Int(-12).to_string(), "-12");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Nil.to_string(), "");
    assert_eq!(Value::from("a b").to_string(), "a b");
    assert_eq!(Value::Float(1.0).to_string(), "0x1.0000000000000p+0");
}

#[test]
fn literal_form_keeps_the_kind() {
    assert_eq!(Value::Nil.to_literal(), "nil@nil");
    assert_eq!(Value::Int(5).to_literal(), "int@5");
    assert_eq!(Value::Bool(true).to_literal(), "bool@true");
    assert_eq!(Value::from("hi").to_literal(), "string@hi");
}

#[test]
fn accessors_match_variant() {
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Int(3).as_bool(), None);
    assert_eq!(Value::from('z').as_str(), Some("z"));
    assert!(Value::Nil.is_nil());
}
