//! Integration tests for Program construction

use ippcode_foundation::Value;
use ippcode_language::{Instruction, Label, Opcode, Program, Symbol, compile};

fn write(order: u32, n: i64) -> Instruction {
    Instruction::new(order, Opcode::Write(Symbol::Const(Value::Int(n))))
}

#[test]
fn records_are_sorted_by_order() {
    let program = Program::new(vec![write(30, 3), write(10, 1), write(20, 2)]).unwrap();
    let orders: Vec<_> = program.instructions().iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![10, 20, 30]);
}

#[test]
fn gaps_in_order_are_allowed() {
    let program = Program::new(vec![write(1, 1), write(100, 2)]).unwrap();
    assert_eq!(program.len(), 2);
}

#[test]
fn zero_and_duplicate_orders_are_rejected() {
    assert_eq!(Program::new(vec![write(0, 1)]).unwrap_err().exit_code(), 32);
    assert_eq!(
        Program::new(vec![write(2, 1), write(2, 2)]).unwrap_err().exit_code(),
        32
    );
}

#[test]
fn labels_point_at_the_next_executable_instruction() {
    let program = Program::new(vec![
        write(1, 1),
        Instruction::new(2, Opcode::Label(Label::new("a"))),
        Instruction::new(3, Opcode::Label(Label::new("b"))),
        write(4, 2),
        Instruction::new(5, Opcode::Label(Label::new("end"))),
    ])
    .unwrap();

    assert_eq!(program.len(), 2);
    assert_eq!(program.labels().resolve(&Label::new("a")).unwrap(), 1);
    assert_eq!(program.labels().resolve(&Label::new("b")).unwrap(), 1);
    assert_eq!(program.labels().resolve(&Label::new("end")).unwrap(), 2);
    assert_eq!(program.labels().resolve(&Label::new("x")).unwrap_err().exit_code(), 52);
}

#[test]
fn duplicate_labels_are_semantic_errors() {
    let err = compile(".IPPcode20\nLABEL a\nLABEL a\n").unwrap_err();
    assert_eq!(err.exit_code(), 52);
}

#[test]
fn empty_program_is_valid() {
    let program = compile(".IPPcode20\n").unwrap();
    assert!(program.is_empty());
    assert!(program.labels().is_empty());
}
