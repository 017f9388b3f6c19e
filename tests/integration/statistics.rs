//! Statistics collected while running whole programs.

use ippcode_debug::{Statistics, StatsConfig, StatsItem};
use ippcode_language::{ScriptedInput, Vm, compile};

fn report(source: &str, config: StatsConfig) -> String {
    let program = compile(source).unwrap();
    let mut vm = Vm::with_output(Box::new(ScriptedInput::empty()), Vec::new(), Vec::new());
    let mut stats = Statistics::new(config);
    vm.execute_observed(&program, &mut stats).unwrap();

    let mut out = Vec::new();
    stats.write_report(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn counts_across_calls_and_frames() {
    let source = ".IPPcode20
DEFVAR GF@g
MOVE GF@g int@1
CALL f
EXIT int@0
LABEL f
CREATEFRAME
DEFVAR TF@a
MOVE TF@a int@2
PUSHFRAME
DEFVAR LF@b
MOVE LF@b int@3
DPRINT LF@b
BREAK
POPFRAME
RETURN
";
    let config = StatsConfig::new()
        .with_item(StatsItem::Insts)
        .with_item(StatsItem::Vars);
    // 4 in main, 8 in f; DPRINT and BREAK are not counted.
    assert_eq!(report(source, config), "12\n3\n");
}

#[test]
fn vars_only_report() {
    let source = ".IPPcode20\nDEFVAR GF@a\nMOVE GF@a nil@nil\n";
    let config = StatsConfig::new().with_item(StatsItem::Vars);
    assert_eq!(report(source, config), "1\n");
}
