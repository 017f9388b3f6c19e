//! The reference scenarios, run from source text.

use ippcode_foundation::Value;
use ippcode_language::{ScriptedInput, Vm, compile, run};

#[test]
fn scenario_a_write_a_moved_int() {
    let outcome = run(".IPPcode20\nDEFVAR GF@x\nMOVE GF@x int@5\nWRITE GF@x\n");
    assert_eq!(outcome.status.unwrap(), 0);
    assert_eq!(outcome.stdout, "5");
}

#[test]
fn scenario_b_unbound_read_fails() {
    let outcome = run(".IPPcode20\nDEFVAR GF@x\nWRITE GF@x\n");
    assert_eq!(outcome.status.unwrap_err().exit_code(), 56);
}

#[test]
fn scenario_c_zero_division_fails() {
    let outcome = run(".IPPcode20
DEFVAR GF@x
MOVE GF@x int@10
DEFVAR GF@y
MOVE GF@y int@0
IDIV GF@x GF@x GF@y
");
    let err = outcome.status.unwrap_err();
    assert_eq!(err.exit_code(), 57);
    let context = err.context.unwrap();
    assert_eq!(context.order, Some(5));
    assert_eq!(context.opcode, Some("IDIV"));
}

#[test]
fn scenario_d_stack_addition() {
    let program = compile(".IPPcode20
DEFVAR GF@r
PUSHS int@3
PUSHS int@4
ADDS
POPS GF@r
")
    .unwrap();
    let mut vm = Vm::with_output(Box::new(ScriptedInput::empty()), Vec::new(), Vec::new());
    assert_eq!(vm.execute(&program).unwrap(), 0);
    assert_eq!(
        vm.machine()
            .frames()
            .get(ippcode_foundation::FrameKind::Global, "r")
            .unwrap(),
        Some(&Value::Int(7))
    );
    assert!(vm.machine().data_stack().is_empty());
}

#[test]
fn scenario_e_exit_codes() {
    assert_eq!(run(".IPPcode20\nEXIT int@50\n").status.unwrap_err().exit_code(), 57);
    assert_eq!(run(".IPPcode20\nEXIT int@0\nWRITE int@1\n").status.unwrap(), 0);

    let outcome = run(".IPPcode20\nWRITE int@1\nEXIT int@49\nWRITE int@2\n");
    assert_eq!(outcome.status.unwrap(), 49);
    assert_eq!(outcome.stdout, "1");
}

#[test]
fn partial_output_survives_a_failure() {
    let outcome = run(".IPPcode20\nWRITE string@before\nPOPFRAME\nWRITE string@after\n");
    assert_eq!(outcome.status.unwrap_err().exit_code(), 55);
    assert_eq!(outcome.stdout, "before");
}

#[test]
fn frame_rotation_round_trip() {
    let outcome = run(".IPPcode20
CREATEFRAME
PUSHFRAME
DEFVAR LF@v
MOVE LF@v string@kept
POPFRAME
WRITE TF@v
");
    assert_eq!(outcome.status.unwrap(), 0);
    assert_eq!(outcome.stdout, "kept");
}

#[test]
fn redeclaration_is_semantic() {
    let outcome = run(".IPPcode20\nDEFVAR GF@x\nWRITE int@0\nDEFVAR GF@x\n");
    assert_eq!(outcome.status.unwrap_err().exit_code(), 52);
}

#[test]
fn undefined_label_is_semantic() {
    let outcome = run(".IPPcode20\nJUMP nowhere\n");
    assert_eq!(outcome.status.unwrap_err().exit_code(), 52);
}
