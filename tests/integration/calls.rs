//! CALL and RETURN across nested activations.

use ippcode_language::run;

#[test]
fn return_resumes_after_the_call() {
    let outcome = run(".IPPcode20
CALL sub
WRITE string@back
EXIT int@0
LABEL sub
WRITE string@in-
RETURN
");
    assert_eq!(outcome.status.unwrap(), 0);
    assert_eq!(outcome.stdout, "in-back");
}

#[test]
fn nested_calls_resume_in_lifo_order() {
    let outcome = run(".IPPcode20
CALL a
WRITE string@0
EXIT int@0
LABEL a
WRITE string@a
CALL b
WRITE string@A
RETURN
LABEL b
WRITE string@b
CALL c
WRITE string@B
RETURN
LABEL c
WRITE string@c
RETURN
");
    assert_eq!(outcome.status.unwrap(), 0);
    assert_eq!(outcome.stdout, "abcBA0");
}

#[test]
fn recursive_factorial_with_frames() {
    let outcome = run(".IPPcode20
DEFVAR GF@n
MOVE GF@n int@5
PUSHS GF@n
CALL fact
POPS GF@n
WRITE GF@n
EXIT int@0

# stack: [n] -> [n!]
LABEL fact
CREATEFRAME
PUSHFRAME
DEFVAR LF@n
POPS LF@n
JUMPIFNEQ recurse LF@n int@0
PUSHS int@1
POPFRAME
RETURN
LABEL recurse
PUSHS LF@n
SUB LF@n LF@n int@1
PUSHS LF@n
CALL fact
MULS
POPFRAME
RETURN
");
    assert_eq!(outcome.status.unwrap(), 0, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "120");
}

#[test]
fn return_with_empty_call_stack_is_56() {
    assert_eq!(run(".IPPcode20\nRETURN\n").status.unwrap_err().exit_code(), 56);
}
