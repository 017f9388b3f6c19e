//! The IPPcode20 virtual machine.
//!
//! All mutable run state lives in one [`Machine`]: the frames, the data
//! stack, the call stack, and the instruction pointer. Every handler is
//! a method on it and receives the I/O streams and the label table
//! explicitly, so a machine can be built and inspected in isolation.
//!
//! # Termination
//!
//! A run ends when the pointer moves past the last instruction (exit
//! code 0), when EXIT names a code, or with the first error. Errors are
//! returned, never printed; the driver decides how to report them.
//! Output written before a failure stays written.

mod context;
mod native;

pub use context::{ExecutionObserver, InputSource, LineInput, NoObserver, ScriptedInput};

use std::io::{self, Write};

use ippcode_foundation::{Error, ErrorContext, Result, Value};
use ippcode_storage::FrameStore;
use tracing::{debug, trace};

use crate::opcode::{Instruction, Label, Opcode, Symbol, Var};
use crate::program::{LabelTable, Program};
use native::{
    Arith, and, arithmetic, concat, equals, exit_code, float2int, get_char, greater_than,
    int2char, int2float, less_than, not, or, read_value, set_char, stri2int, strlen, type_name,
};

/// What the pointer does after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Next,
    JumpTo(usize),
    Halt(u8),
}

/// The streams a running program reads and writes.
struct Streams<O, E> {
    input: Box<dyn InputSource>,
    out: O,
    err: E,
}

/// Complete mutable state of a running program.
#[derive(Clone, Debug, Default)]
pub struct Machine {
    frames: FrameStore,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
    ip: usize,
    executed: u64,
}

impl Machine {
    /// Creates a machine with empty frames and stacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The variable frames.
    #[must_use]
    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    /// The data stack, bottom first.
    #[must_use]
    pub fn data_stack(&self) -> &[Value] {
        &self.data_stack
    }

    /// Pending return addresses, oldest first.
    #[must_use]
    pub fn call_stack(&self) -> &[usize] {
        &self.call_stack
    }

    /// Index of the next instruction to execute.
    #[must_use]
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Number of instructions executed so far.
    #[must_use]
    pub fn executed(&self) -> u64 {
        self.executed
    }

    // Operand access

    fn resolve(&self, symbol: &Symbol) -> Result<Value> {
        match symbol {
            Symbol::Const(value) => Ok(value.clone()),
            Symbol::Var(var) => self
                .frames
                .get(var.frame, &var.name)?
                .cloned()
                .ok_or_else(|| Error::undefined_value(format!("{var} has no value"))),
        }
    }

    /// Like `resolve`, but an unbound variable is `None`.
    fn resolve_optional(&self, symbol: &Symbol) -> Result<Option<Value>> {
        match symbol {
            Symbol::Const(value) => Ok(Some(value.clone())),
            Symbol::Var(var) => Ok(self.frames.get(var.frame, &var.name)?.cloned()),
        }
    }

    fn store(&mut self, var: &Var, value: Value) -> Result<()> {
        self.frames.set(var.frame, &var.name, value)
    }

    fn pop(&mut self) -> Result<Value> {
        self.data_stack
            .pop()
            .ok_or_else(|| Error::undefined_value("data stack is empty"))
    }

    /// Pops `(left, right)`; the right operand is on top.
    fn pop_pair(&mut self) -> Result<(Value, Value)> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    fn unary<F>(&mut self, dst: &Var, a: &Symbol, op: F) -> Result<()>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let a = self.resolve(a)?;
        let result = op(&a)?;
        self.store(dst, result)
    }

    fn binary<F>(&mut self, dst: &Var, a: &Symbol, b: &Symbol, op: F) -> Result<()>
    where
        F: FnOnce(&Value, &Value) -> Result<Value>,
    {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        let result = op(&a, &b)?;
        self.store(dst, result)
    }

    fn stack_unary<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let a = self.pop()?;
        let result = op(&a)?;
        self.data_stack.push(result);
        Ok(())
    }

    fn stack_binary<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&Value, &Value) -> Result<Value>,
    {
        let (a, b) = self.pop_pair()?;
        let result = op(&a, &b)?;
        self.data_stack.push(result);
        Ok(())
    }

    fn jump_if(labels: &LabelTable, label: &Label, condition: bool) -> Result<Flow> {
        let target = labels.resolve(label)?;
        Ok(if condition {
            Flow::JumpTo(target)
        } else {
            Flow::Next
        })
    }

    // Dispatch

    #[allow(clippy::too_many_lines)]
    fn step<O: Write, E: Write>(
        &mut self,
        io: &mut Streams<O, E>,
        labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<Flow> {
        match &instruction.opcode {
            // Frames and calls
            Opcode::Move(dst, src) => self.unary(dst, src, |v| Ok(v.clone()))?,
            Opcode::CreateFrame => {
                self.frames.create_temporary();
                debug!("temporary frame created");
            }
            Opcode::PushFrame => {
                self.frames.push_temporary()?;
                debug!(depth = self.frames.locals().len(), "frame pushed");
            }
            Opcode::PopFrame => {
                self.frames.pop_local()?;
                debug!(depth = self.frames.locals().len(), "frame popped");
            }
            Opcode::DefVar(var) => self.frames.declare(var.frame, &var.name)?,
            Opcode::Call(label) => {
                let target = labels.resolve(label)?;
                self.call_stack.push(self.ip + 1);
                debug!(%label, target, depth = self.call_stack.len(), "call");
                return Ok(Flow::JumpTo(target));
            }
            Opcode::Return => {
                let target = self
                    .call_stack
                    .pop()
                    .ok_or_else(|| Error::undefined_value("call stack is empty"))?;
                debug!(target, depth = self.call_stack.len(), "return");
                return Ok(Flow::JumpTo(target));
            }

            // Data stack
            Opcode::PushS(src) => {
                let value = self.resolve(src)?;
                self.data_stack.push(value);
            }
            Opcode::PopS(dst) => {
                let value = self.pop()?;
                self.store(dst, value)?;
            }
            Opcode::ClearS => self.data_stack.clear(),

            // Arithmetic
            Opcode::Add(d, a, b) => self.binary(d, a, b, |a, b| arithmetic(Arith::Add, a, b))?,
            Opcode::Sub(d, a, b) => self.binary(d, a, b, |a, b| arithmetic(Arith::Sub, a, b))?,
            Opcode::Mul(d, a, b) => self.binary(d, a, b, |a, b| arithmetic(Arith::Mul, a, b))?,
            Opcode::Div(d, a, b) => self.binary(d, a, b, |a, b| arithmetic(Arith::Div, a, b))?,
            Opcode::IDiv(d, a, b) => self.binary(d, a, b, |a, b| arithmetic(Arith::IDiv, a, b))?,

            // Relational and boolean
            Opcode::Lt(d, a, b) => self.binary(d, a, b, |a, b| less_than(a, b).map(Value::Bool))?,
            Opcode::Gt(d, a, b) => {
                self.binary(d, a, b, |a, b| greater_than(a, b).map(Value::Bool))?;
            }
            Opcode::Eq(d, a, b) => self.binary(d, a, b, |a, b| equals(a, b).map(Value::Bool))?,
            Opcode::And(d, a, b) => self.binary(d, a, b, and)?,
            Opcode::Or(d, a, b) => self.binary(d, a, b, or)?,
            Opcode::Not(d, a) => self.unary(d, a, not)?,

            // Conversion
            Opcode::Int2Char(d, a) => self.unary(d, a, int2char)?,
            Opcode::Stri2Int(d, a, b) => self.binary(d, a, b, stri2int)?,
            Opcode::Int2Float(d, a) => self.unary(d, a, int2float)?,
            Opcode::Float2Int(d, a) => self.unary(d, a, float2int)?,

            // Input and output
            Opcode::Read(dst, ty) => {
                io.out.flush()?;
                let line = io.input.read_line()?;
                self.store(dst, read_value(line.as_deref(), *ty))?;
            }
            Opcode::Write(src) => {
                let value = self.resolve(src)?;
                write!(io.out, "{value}")?;
            }

            // Strings
            Opcode::Concat(d, a, b) => self.binary(d, a, b, concat)?,
            Opcode::Strlen(d, a) => self.unary(d, a, strlen)?,
            Opcode::GetChar(d, a, b) => self.binary(d, a, b, get_char)?,
            Opcode::SetChar(dst, index, replacement) => {
                let target = self
                    .frames
                    .get(dst.frame, &dst.name)?
                    .cloned()
                    .ok_or_else(|| Error::undefined_value(format!("{dst} has no value")))?;
                let index = self.resolve(index)?;
                let replacement = self.resolve(replacement)?;
                let updated = set_char(&target, &index, &replacement)?;
                self.store(dst, updated)?;
            }

            // Types
            Opcode::Type(dst, src) => {
                let value = self.resolve_optional(src)?;
                self.store(dst, type_name(value.as_ref()))?;
            }

            // Control flow
            Opcode::Label(_) => {}
            Opcode::Jump(label) => return Ok(Flow::JumpTo(labels.resolve(label)?)),
            Opcode::JumpIfEq(label, a, b) => {
                let equal = equals(&self.resolve(a)?, &self.resolve(b)?)?;
                return Self::jump_if(labels, label, equal);
            }
            Opcode::JumpIfNeq(label, a, b) => {
                let equal = equals(&self.resolve(a)?, &self.resolve(b)?)?;
                return Self::jump_if(labels, label, !equal);
            }
            Opcode::Exit(src) => {
                let code = exit_code(&self.resolve(src)?)?;
                return Ok(Flow::Halt(code));
            }

            // Debugging
            Opcode::DPrint(src) => {
                let value = self.resolve(src)?;
                writeln!(io.err, "{value}")?;
            }
            Opcode::Break => {
                self.write_snapshot(&mut io.err, io.input.describe(), instruction, labels)?;
            }

            // Stack variants
            Opcode::AddS => self.stack_binary(|a, b| arithmetic(Arith::Add, a, b))?,
            Opcode::SubS => self.stack_binary(|a, b| arithmetic(Arith::Sub, a, b))?,
            Opcode::MulS => self.stack_binary(|a, b| arithmetic(Arith::Mul, a, b))?,
            Opcode::DivS => self.stack_binary(|a, b| arithmetic(Arith::Div, a, b))?,
            Opcode::IDivS => self.stack_binary(|a, b| arithmetic(Arith::IDiv, a, b))?,
            Opcode::LtS => self.stack_binary(|a, b| less_than(a, b).map(Value::Bool))?,
            Opcode::GtS => self.stack_binary(|a, b| greater_than(a, b).map(Value::Bool))?,
            Opcode::EqS => self.stack_binary(|a, b| equals(a, b).map(Value::Bool))?,
            Opcode::AndS => self.stack_binary(and)?,
            Opcode::OrS => self.stack_binary(or)?,
            Opcode::NotS => self.stack_unary(not)?,
            Opcode::Int2CharS => self.stack_unary(int2char)?,
            Opcode::Stri2IntS => self.stack_binary(stri2int)?,
            Opcode::Int2FloatS => self.stack_unary(int2float)?,
            Opcode::Float2IntS => self.stack_unary(float2int)?,
            Opcode::JumpIfEqS(label) => {
                let (a, b) = self.pop_pair()?;
                return Self::jump_if(labels, label, equals(&a, &b)?);
            }
            Opcode::JumpIfNeqS(label) => {
                let (a, b) = self.pop_pair()?;
                return Self::jump_if(labels, label, !equals(&a, &b)?);
            }
        }
        Ok(Flow::Next)
    }

    /// Writes the multi-line state dump of BREAK.
    fn write_snapshot(
        &self,
        w: &mut impl Write,
        input: &str,
        current: &Instruction,
        labels: &LabelTable,
    ) -> io::Result<()> {
        writeln!(w, "-- BREAK at instruction {} --", current.order)?;
        writeln!(w, "input: {input}")?;
        writeln!(w, "instruction pointer: {}", self.ip)?;
        writeln!(w, "executed: {}", self.executed)?;
        writeln!(w, "GF: {}", self.frames.global())?;
        if self.frames.locals().is_empty() {
            writeln!(w, "LF: <none>")?;
        }
        for (depth, frame) in self.frames.locals().iter().enumerate().rev() {
            writeln!(w, "LF[{depth}]: {frame}")?;
        }
        match self.frames.temporary() {
            Some(frame) => writeln!(w, "TF: {frame}")?,
            None => writeln!(w, "TF: <none>")?,
        }
        let stack: Vec<String> = self.data_stack.iter().map(Value::to_literal).collect();
        writeln!(w, "data stack: [{}]", stack.join(", "))?;
        let calls: Vec<String> = self.call_stack.iter().map(ToString::to_string).collect();
        writeln!(w, "call stack: [{}]", calls.join(", "))?;
        writeln!(w, "labels: {labels}")
    }
}

/// Executes programs against a set of streams.
///
/// Output goes to `O` (WRITE) and `E` (DPRINT, BREAK). Tests use
/// `Vec<u8>` for both.
pub struct Vm<O = io::Stdout, E = io::Stderr> {
    machine: Machine,
    io: Streams<O, E>,
}

impl Vm {
    /// Creates a VM writing to the process's standard streams.
    #[must_use]
    pub fn new(input: Box<dyn InputSource>) -> Self {
        Self::with_output(input, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Vm<O, E> {
    /// Creates a VM with explicit output streams.
    pub fn with_output(input: Box<dyn InputSource>, out: O, err: E) -> Self {
        Self {
            machine: Machine::new(),
            io: Streams { input, out, err },
        }
    }

    /// The machine state, as the last run left it.
    #[must_use]
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// The standard output stream.
    #[must_use]
    pub fn output(&self) -> &O {
        &self.io.out
    }

    /// The standard error stream.
    #[must_use]
    pub fn error_output(&self) -> &E {
        &self.io.err
    }

    /// Consumes the VM, returning both output streams.
    pub fn into_output(self) -> (O, E) {
        (self.io.out, self.io.err)
    }

    /// Runs a program to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns the first runtime error, with the failing instruction
    /// attached as context, or an `Internal` error if output fails.
    pub fn execute(&mut self, program: &Program) -> Result<u8> {
        self.execute_observed(program, &mut NoObserver)
    }

    /// Runs a program, reporting each executed instruction to `observer`.
    ///
    /// Both output streams are flushed whatever the outcome.
    ///
    /// # Errors
    ///
    /// Same as [`Vm::execute`].
    pub fn execute_observed(
        &mut self,
        program: &Program,
        observer: &mut dyn ExecutionObserver,
    ) -> Result<u8> {
        self.machine = Machine::new();
        let result = self.run(program, observer);
        let flushed = self.io.out.flush().and_then(|()| self.io.err.flush());
        let code = result?;
        flushed?;
        Ok(code)
    }

    fn run(&mut self, program: &Program, observer: &mut dyn ExecutionObserver) -> Result<u8> {
        while let Some(instruction) = program.get(self.machine.ip) {
            trace!(
                ip = self.machine.ip,
                order = instruction.order,
                opcode = instruction.opcode.mnemonic(),
                "dispatch"
            );

            let flow = self
                .machine
                .step(&mut self.io, program.labels(), instruction)
                .map_err(|err| err.with_context(context_of(instruction)))?;
            self.machine.executed += 1;
            observer.after_instruction(&instruction.opcode, &self.machine.frames);

            match flow {
                Flow::Next => self.machine.ip += 1,
                Flow::JumpTo(target) => self.machine.ip = target,
                Flow::Halt(code) => {
                    debug!(code, order = instruction.order, "program exited");
                    return Ok(code);
                }
            }
        }
        debug!(executed = self.machine.executed, "program finished");
        Ok(0)
    }
}

fn context_of(instruction: &Instruction) -> ErrorContext {
    let context =
        ErrorContext::new().with_instruction(instruction.order, instruction.opcode.mnemonic());
    if instruction.line > 0 {
        context.with_line(instruction.line)
    } else {
        context
    }
}

/// Result of running source text with in-memory streams.
#[derive(Debug)]
pub struct Outcome {
    /// Exit code, or the error that stopped the run.
    pub status: Result<u8>,
    /// Everything written to standard output.
    pub stdout: String,
    /// Everything written to standard error.
    pub stderr: String,
}

/// Parses and runs source text with no input.
#[must_use]
pub fn run(source: &str) -> Outcome {
    run_with_input(source, ScriptedInput::empty())
}

/// Parses and runs source text, feeding READ from `input`.
pub fn run_with_input(source: &str, input: impl InputSource + 'static) -> Outcome {
    let program = match crate::parser::compile(source) {
        Ok(program) => program,
        Err(err) => {
            return Outcome {
                status: Err(err),
                stdout: String::new(),
                stderr: String::new(),
            };
        }
    };

    let mut vm = Vm::with_output(Box::new(input), Vec::new(), Vec::new());
    let status = vm.execute(&program);
    let (out, err) = vm.into_output();
    Outcome {
        status,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}
