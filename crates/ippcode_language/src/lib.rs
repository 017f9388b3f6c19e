//! Instruction model, IPPcode20 front end, and virtual machine.
//!
//! This crate provides:
//! - `Opcode` - the typed instruction set
//! - `Lexer` and `Parser` - IPPcode20 source to instruction records
//! - `Program` - order-sorted instructions with a resolved label table
//! - `Vm` - the execution engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod opcode;
pub mod parser;
pub mod program;
pub mod vm;


pub use lexer::{Lexer, Span, Token, TokenKind};
pub use opcode::{Arg, ArgKind, Instruction, Label, Opcode, Symbol, Var};
pub use parser::{Parser, compile, parse};
pub use program::{LabelTable, Program};
pub use vm::{
    ExecutionObserver, InputSource, LineInput, Machine, NoObserver, Outcome, ScriptedInput, Vm,
    run, run_with_input,
};
