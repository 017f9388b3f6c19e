//! Integration tests for the IPPcode20 front end
//!
//! Tests whole source files through the lexer and parser.

use ippcode_foundation::{DataType, FrameKind, Value};
use ippcode_language::{Label, Opcode, Symbol, Var, parse};

#[test]
fn parses_a_commented_program() {
    let source = "# leading comment
.IPPcode20   # header comment

DEFVAR GF@counter
move GF@counter int@-12 # trailing
READ LF@line string
JUMPIFEQ end GF@counter nil@nil
label end
";
    let records = parse(source).unwrap();
    let opcodes: Vec<_> = records.iter().map(|r| r.opcode.clone()).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::DefVar(Var::global("counter")),
            Opcode::Move(Var::global("counter"), Symbol::Const(Value::Int(-12))),
            Opcode::Read(Var::new(FrameKind::Local, "line"), DataType::String),
            Opcode::JumpIfEq(
                Label::new("end"),
                Symbol::Var(Var::global("counter")),
                Symbol::Const(Value::Nil),
            ),
            Opcode::Label(Label::new("end")),
        ]
    );
}

#[test]
fn records_are_numbered_and_located() {
    let records = parse(".IPPcode20\n\nCREATEFRAME\n# gap\nPUSHFRAME\n").unwrap();
    let positions: Vec<_> = records.iter().map(|r| (r.order, r.line)).collect();
    assert_eq!(positions, vec![(1, 3), (2, 5)]);
}

#[test]
fn string_escapes_are_decoded() {
    let records = parse(".IPPcode20\nWRITE string@a\\032b\\010\\092\n").unwrap();
    assert_eq!(
        records[0].opcode,
        Opcode::Write(Symbol::Const(Value::from("a b\n\\")))
    );
}

#[test]
fn float_literals_accept_hex_and_decimal() {
    let records = parse(".IPPcode20\nPUSHS float@0x1.8p+1\nPUSHS float@2.5\n").unwrap();
    assert_eq!(records[0].opcode, Opcode::PushS(Symbol::Const(Value::Float(3.0))));
    assert_eq!(records[1].opcode, Opcode::PushS(Symbol::Const(Value::Float(2.5))));
}

// =============================================================================
// Errors
// =============================================================================

fn code_of(source: &str) -> u8 {
    parse(source).unwrap_err().exit_code()
}

#[test]
fn header_problems_are_malformed() {
    assert_eq!(code_of(""), 31);
    assert_eq!(code_of("DEFVAR GF@x\n"), 31);
    assert_eq!(code_of(".IPPcode19\n"), 31);
}

#[test]
fn header_is_case_insensitive() {
    assert!(parse(".ippCODE20\n").unwrap().is_empty());
}

#[test]
fn structure_problems_are_32() {
    assert_eq!(code_of(".IPPcode20\nFROB GF@x\n"), 32);
    assert_eq!(code_of(".IPPcode20\nDEFVAR\n"), 32);
    assert_eq!(code_of(".IPPcode20\nCREATEFRAME GF@x\n"), 32);
    assert_eq!(code_of(".IPPcode20\nDEFVAR int@1\n"), 32);
}

#[test]
fn bad_operand_text_is_malformed() {
    assert_eq!(code_of(".IPPcode20\nWRITE int@twelve\n"), 31);
    assert_eq!(code_of(".IPPcode20\nWRITE bool@yes\n"), 31);
    assert_eq!(code_of(".IPPcode20\nWRITE string@bad\\1\n"), 31);
    assert_eq!(code_of(".IPPcode20\nDEFVAR XF@x\n"), 31);
    assert_eq!(code_of(".IPPcode20\nDEFVAR GF@9lives\n"), 31);
}

#[test]
fn structure_errors_carry_the_line() {
    let err = parse(".IPPcode20\nCREATEFRAME\n\nFROB\n").unwrap_err();
    assert_eq!(err.context.and_then(|c| c.line), Some(4));
}
