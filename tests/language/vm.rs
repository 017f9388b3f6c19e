//! Integration tests for the VM
//!
//! Runs whole IPPcode20 programs with in-memory output.

use ippcode_language::{ScriptedInput, run, run_with_input};

fn stdout_of(body: &str) -> String {
    let outcome = run(&format!(".IPPcode20\n{body}\n"));
    assert_eq!(outcome.status.unwrap(), 0, "stderr: {}", outcome.stderr);
    outcome.stdout
}

fn error_code_of(body: &str) -> u8 {
    run(&format!(".IPPcode20\n{body}\n"))
        .status
        .unwrap_err()
        .exit_code()
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn integer_arithmetic() {
    let out = stdout_of(
        "DEFVAR GF@r
ADD GF@r int@2 int@3
WRITE GF@r
SUB GF@r int@2 int@3
WRITE GF@r
MUL GF@r int@-4 int@3
WRITE GF@r
IDIV GF@r int@-7 int@2
WRITE GF@r",
    );
    assert_eq!(out, "5-1-12-4");
}

#[test]
fn float_arithmetic_writes_hex() {
    let out = stdout_of(
        "DEFVAR GF@r
DIV GF@r float@0x1p+0 float@0x1p+1
WRITE GF@r",
    );
    assert_eq!(out, "0x1.0000000000000p-1");
}

#[test]
fn division_by_zero_is_57() {
    assert_eq!(error_code_of("DEFVAR GF@r\nIDIV GF@r int@1 int@0"), 57);
    assert_eq!(error_code_of("DEFVAR GF@r\nDIV GF@r float@1.0 float@0.0"), 57);
}

#[test]
fn mixed_operands_are_53() {
    assert_eq!(error_code_of("DEFVAR GF@r\nADD GF@r int@1 float@1.0"), 53);
    assert_eq!(error_code_of("DEFVAR GF@r\nLT GF@r nil@nil nil@nil"), 53);
}

// =============================================================================
// Relations and Strings
// =============================================================================

#[test]
fn nil_equality() {
    let out = stdout_of(
        "DEFVAR GF@r
EQ GF@r nil@nil nil@nil
WRITE GF@r
EQ GF@r nil@nil int@0
WRITE GF@r",
    );
    assert_eq!(out, "truefalse");
}

#[test]
fn string_operations() {
    let out = stdout_of(
        "DEFVAR GF@s
DEFVAR GF@n
CONCAT GF@s string@ab string@cd
STRLEN GF@n GF@s
WRITE GF@n
SETCHAR GF@s int@0 string@X
WRITE GF@s
GETCHAR GF@s GF@s int@3
WRITE GF@s
STRI2INT GF@n string@A int@0
WRITE GF@n
INT2CHAR GF@s int@97
WRITE GF@s",
    );
    assert_eq!(out, "4Xbcdd65a");
}

#[test]
fn string_index_out_of_range_is_58() {
    assert_eq!(error_code_of("DEFVAR GF@s\nGETCHAR GF@s string@ab int@2"), 58);
    assert_eq!(error_code_of("DEFVAR GF@s\nINT2CHAR GF@s int@-1"), 58);
}

#[test]
fn type_of_unbound_variable_is_empty() {
    let out = stdout_of(
        "DEFVAR GF@x
DEFVAR GF@t
TYPE GF@t GF@x
WRITE GF@t
WRITE string@|
TYPE GF@t float@0x1p+0
WRITE GF@t",
    );
    assert_eq!(out, "|float");
}

// =============================================================================
// Input
// =============================================================================

#[test]
fn read_converts_and_falls_back_to_nil() {
    let outcome = run_with_input(
        ".IPPcode20
DEFVAR GF@v
DEFVAR GF@t
READ GF@v int
WRITE GF@v
READ GF@v int
TYPE GF@t GF@v
WRITE GF@t
READ GF@v bool
WRITE GF@v
READ GF@v string
TYPE GF@t GF@v
WRITE GF@t
",
        ScriptedInput::new(["42", "4x2", "TRUE"]),
    );
    assert_eq!(outcome.status.unwrap(), 0);
    assert_eq!(outcome.stdout, "42niltruenil");
}

// =============================================================================
// Debugging Output
// =============================================================================

#[test]
fn dprint_goes_to_stderr() {
    let outcome = run(".IPPcode20\nDPRINT string@dbg\nWRITE int@1\n");
    assert_eq!(outcome.stdout, "1");
    assert_eq!(outcome.stderr, "dbg\n");
}

#[test]
fn break_dumps_state_to_stderr() {
    let outcome = run(".IPPcode20\nDEFVAR GF@x\nMOVE GF@x int@5\nBREAK\n");
    assert!(outcome.stdout.is_empty());
    assert!(outcome.stderr.contains("GF: {x = int@5}"));
}
