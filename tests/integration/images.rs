//! Program images produce the same runs as their source.

use ippcode_language::{Program, ScriptedInput, Vm, parse};
use ippcode_runtime::serialize::{from_bytes, to_bytes};

const SOURCE: &str = ".IPPcode20
DEFVAR GF@s
DEFVAR GF@n
READ GF@s string
LABEL again
CONCAT GF@s GF@s string@!
STRLEN GF@n GF@s
JUMPIFNEQ again GF@n int@6
WRITE GF@s
";

fn output_of(program: &Program) -> String {
    let mut vm = Vm::with_output(Box::new(ScriptedInput::new(["hey"])), Vec::new(), Vec::new());
    vm.execute(program).unwrap();
    let (out, _) = vm.into_output();
    String::from_utf8(out).unwrap()
}

#[test]
fn image_runs_like_source() {
    let records = parse(SOURCE).unwrap();
    let from_source = Program::new(records.clone()).unwrap();
    let from_image = Program::new(from_bytes(&to_bytes(&records).unwrap()).unwrap()).unwrap();

    assert_eq!(from_image.instructions(), from_source.instructions());
    assert_eq!(output_of(&from_image), "hey!!!");
    assert_eq!(output_of(&from_source), "hey!!!");
}

#[test]
fn truncated_image_is_malformed() {
    let bytes = to_bytes(&parse(SOURCE).unwrap()).unwrap();
    let err = from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert_eq!(err.exit_code(), 31);
}
