//! Instruction set of the IPPcode20 machine.
//!
//! Every opcode carries its operands with their static kinds, so a
//! handler never has to check arity or operand kind at run time; only
//! the value-level rules remain.

#![allow(clippy::doc_markdown)]

use std::fmt;

use ippcode_foundation::{DataType, FrameKind, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A variable reference such as `LF@counter`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Var {
    /// The frame the name is looked up in.
    pub frame: FrameKind,
    /// The variable name.
    pub name: String,
}

impl Var {
    /// Creates a variable reference.
    #[must_use]
    pub fn new(frame: FrameKind, name: impl Into<String>) -> Self {
        Self {
            frame,
            name: name.into(),
        }
    }

    /// Shorthand for a `GF@` variable.
    #[must_use]
    pub fn global(name: impl Into<String>) -> Self {
        Self::new(FrameKind::Global, name)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.frame, self.name)
    }
}

/// An operand that is either a constant or a variable read at run time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// An inline constant.
    Const(Value),
    /// A variable to resolve against the frames.
    Var(Var),
}

impl From<Value> for Symbol {
    fn from(value: Value) -> Self {
        Self::Const(value)
    }
}

impl From<Var> for Symbol {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(value) => f.write_str(&value.to_literal()),
            Self::Var(var) => write!(f, "{var}"),
        }
    }
}

/// A jump target name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(pub String);

impl Label {
    /// Creates a label reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static kind of an operand slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// `<var>`: a variable reference.
    Var,
    /// `<symb>`: a constant or a variable.
    Symb,
    /// `<label>`: a label name.
    Label,
    /// `<type>`: a type name.
    Type,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Var => "var",
            Self::Symb => "symb",
            Self::Label => "label",
            Self::Type => "type",
        })
    }
}

/// A typed operand as produced by a front end.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// A variable reference.
    Var(Var),
    /// A constant or variable.
    Symb(Symbol),
    /// A label name.
    Label(Label),
    /// A type name.
    Type(DataType),
}

/// A single instruction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Opcode {
    // === Frames and Calls ===
    /// `MOVE ⟨var⟩ ⟨symb⟩`
    Move(Var, Symbol),
    /// `CREATEFRAME`: fresh empty temporary frame.
    CreateFrame,
    /// `PUSHFRAME`: temporary frame becomes the top local frame.
    PushFrame,
    /// `POPFRAME`: top local frame becomes the temporary frame.
    PopFrame,
    /// `DEFVAR ⟨var⟩`
    DefVar(Var),
    /// `CALL ⟨label⟩`: push the return address, then jump.
    Call(Label),
    /// `RETURN`: jump to the popped return address.
    Return,

    // === Data Stack ===
    /// `PUSHS ⟨symb⟩`
    PushS(Symbol),
    /// `POPS ⟨var⟩`
    PopS(Var),
    /// `CLEARS`: empty the data stack.
    ClearS,

    // === Arithmetic ===
    /// `ADD ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Add(Var, Symbol, Symbol),
    /// `SUB ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Sub(Var, Symbol, Symbol),
    /// `MUL ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Mul(Var, Symbol, Symbol),
    /// `DIV ⟨var⟩ ⟨symb⟩ ⟨symb⟩`: float quotient.
    Div(Var, Symbol, Symbol),
    /// `IDIV ⟨var⟩ ⟨symb⟩ ⟨symb⟩`: integer quotient.
    IDiv(Var, Symbol, Symbol),

    // === Relational and Boolean ===
    /// `LT ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Lt(Var, Symbol, Symbol),
    /// `GT ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Gt(Var, Symbol, Symbol),
    /// `EQ ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Eq(Var, Symbol, Symbol),
    /// `AND ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    And(Var, Symbol, Symbol),
    /// `OR ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Or(Var, Symbol, Symbol),
    /// `NOT ⟨var⟩ ⟨symb⟩`
    Not(Var, Symbol),

    // === Conversion ===
    /// `INT2CHAR ⟨var⟩ ⟨symb⟩`
    Int2Char(Var, Symbol),
    /// `STRI2INT ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Stri2Int(Var, Symbol, Symbol),
    /// `INT2FLOAT ⟨var⟩ ⟨symb⟩`
    Int2Float(Var, Symbol),
    /// `FLOAT2INT ⟨var⟩ ⟨symb⟩`
    Float2Int(Var, Symbol),

    // === Input and Output ===
    /// `READ ⟨var⟩ ⟨type⟩`
    Read(Var, DataType),
    /// `WRITE ⟨symb⟩`
    Write(Symbol),

    // === Strings ===
    /// `CONCAT ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    Concat(Var, Symbol, Symbol),
    /// `STRLEN ⟨var⟩ ⟨symb⟩`
    Strlen(Var, Symbol),
    /// `GETCHAR ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    GetChar(Var, Symbol, Symbol),
    /// `SETCHAR ⟨var⟩ ⟨symb⟩ ⟨symb⟩`
    SetChar(Var, Symbol, Symbol),

    // === Types ===
    /// `TYPE ⟨var⟩ ⟨symb⟩`
    Type(Var, Symbol),

    // === Control Flow ===
    /// `LABEL ⟨label⟩`: pseudo-instruction, never executed.
    Label(Label),
    /// `JUMP ⟨label⟩`
    Jump(Label),
    /// `JUMPIFEQ ⟨label⟩ ⟨symb⟩ ⟨symb⟩`
    JumpIfEq(Label, Symbol, Symbol),
    /// `JUMPIFNEQ ⟨label⟩ ⟨symb⟩ ⟨symb⟩`
    JumpIfNeq(Label, Symbol, Symbol),
    /// `EXIT ⟨symb⟩`
    Exit(Symbol),

    // === Debugging ===
    /// `DPRINT ⟨symb⟩`
    DPrint(Symbol),
    /// `BREAK`
    Break,

    // === Stack Variants ===
    /// `ADDS`: `[a, b] -> [a + b]`
    AddS,
    /// `SUBS`: `[a, b] -> [a - b]`
    SubS,
    /// `MULS`: `[a, b] -> [a * b]`
    MulS,
    /// `DIVS`: `[a, b] -> [a / b]`
    DivS,
    /// `IDIVS`: `[a, b] -> [a div b]`
    IDivS,
    /// `LTS`: `[a, b] -> [a < b]`
    LtS,
    /// `GTS`: `[a, b] -> [a > b]`
    GtS,
    /// `EQS`: `[a, b] -> [a == b]`
    EqS,
    /// `ANDS`: `[a, b] -> [a && b]`
    AndS,
    /// `ORS`: `[a, b] -> [a || b]`
    OrS,
    /// `NOTS`: `[a] -> [!a]`
    NotS,
    /// `INT2CHARS`: `[n] -> [chr(n)]`
    Int2CharS,
    /// `STRI2INTS`: `[s, i] -> [ord(s[i])]`
    Stri2IntS,
    /// `INT2FLOATS`: `[n] -> [float(n)]`
    Int2FloatS,
    /// `FLOAT2INTS`: `[x] -> [int(x)]`
    Float2IntS,
    /// `JUMPIFEQS ⟨label⟩`: `[a, b] -> []`, jump if `a == b`
    JumpIfEqS(Label),
    /// `JUMPIFNEQS ⟨label⟩`: `[a, b] -> []`, jump if `a != b`
    JumpIfNeqS(Label),
}

use ArgKind::{Label as L, Symb as S, Type as T, Var as V};

/// Operand signature of every mnemonic.
const SIGNATURES: &[(&str, &[ArgKind])] = &[
    ("MOVE", &[V, S]),
    ("CREATEFRAME", &[]),
    ("PUSHFRAME", &[]),
    ("POPFRAME", &[]),
    ("DEFVAR", &[V]),
    ("CALL", &[L]),
    ("RETURN", &[]),
    ("PUSHS", &[S]),
    ("POPS", &[V]),
    ("CLEARS", &[]),
    ("ADD", &[V, S, S]),
    ("SUB", &[V, S, S]),
    ("MUL", &[V, S, S]),
    ("DIV", &[V, S, S]),
    ("IDIV", &[V, S, S]),
    ("LT", &[V, S, S]),
    ("GT", &[V, S, S]),
    ("EQ", &[V, S, S]),
    ("AND", &[V, S, S]),
    ("OR", &[V, S, S]),
    ("NOT", &[V, S]),
    ("INT2CHAR", &[V, S]),
    ("STRI2INT", &[V, S, S]),
    ("INT2FLOAT", &[V, S]),
    ("FLOAT2INT", &[V, S]),
    ("READ", &[V, T]),
    ("WRITE", &[S]),
    ("CONCAT", &[V, S, S]),
    ("STRLEN", &[V, S]),
    ("GETCHAR", &[V, S, S]),
    ("SETCHAR", &[V, S, S]),
    ("TYPE", &[V, S]),
    ("LABEL", &[L]),
    ("JUMP", &[L]),
    ("JUMPIFEQ", &[L, S, S]),
    ("JUMPIFNEQ", &[L, S, S]),
    ("EXIT", &[S]),
    ("DPRINT", &[S]),
    ("BREAK", &[]),
    ("ADDS", &[]),
    ("SUBS", &[]),
    ("MULS", &[]),
    ("DIVS", &[]),
    ("IDIVS", &[]),
    ("LTS", &[]),
    ("GTS", &[]),
    ("EQS", &[]),
    ("ANDS", &[]),
    ("ORS", &[]),
    ("NOTS", &[]),
    ("INT2CHARS", &[]),
    ("STRI2INTS", &[]),
    ("INT2FLOATS", &[]),
    ("FLOAT2INTS", &[]),
    ("JUMPIFEQS", &[L]),
    ("JUMPIFNEQS", &[L]),
];

impl Opcode {
    /// Operand kinds expected by an (upper-case) mnemonic, or `None`
    /// for an unknown mnemonic.
    #[must_use]
    pub fn signature(mnemonic: &str) -> Option<&'static [ArgKind]> {
        SIGNATURES
            .iter()
            .find(|(name, _)| *name == mnemonic)
            .map(|(_, sig)| *sig)
    }

    /// Builds an opcode from a mnemonic and operands that already match
    /// its [`signature`](Self::signature).
    ///
    /// Returns `None` if the mnemonic is unknown or the operands do not fit.
    #[must_use]
    pub fn from_args(mnemonic: &str, args: Vec<Arg>) -> Option<Self> {
        let mut it = args.into_iter();
        let op = match mnemonic {
            "MOVE" => Self::Move(var(&mut it)?, symb(&mut it)?),
            "CREATEFRAME" => Self::CreateFrame,
            "PUSHFRAME" => Self::PushFrame,
            "POPFRAME" => Self::PopFrame,
            "DEFVAR" => Self::DefVar(var(&mut it)?),
            "CALL" => Self::Call(label(&mut it)?),
            "RETURN" => Self::Return,
            "PUSHS" => Self::PushS(symb(&mut it)?),
            "POPS" => Self::PopS(var(&mut it)?),
            "CLEARS" => Self::ClearS,
            "ADD" => Self::Add(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "SUB" => Self::Sub(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "MUL" => Self::Mul(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "DIV" => Self::Div(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "IDIV" => Self::IDiv(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "LT" => Self::Lt(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "GT" => Self::Gt(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "EQ" => Self::Eq(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "AND" => Self::And(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "OR" => Self::Or(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "NOT" => Self::Not(var(&mut it)?, symb(&mut it)?),
            "INT2CHAR" => Self::Int2Char(var(&mut it)?, symb(&mut it)?),
            "STRI2INT" => Self::Stri2Int(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "INT2FLOAT" => Self::Int2Float(var(&mut it)?, symb(&mut it)?),
            "FLOAT2INT" => Self::Float2Int(var(&mut it)?, symb(&mut it)?),
            "READ" => Self::Read(var(&mut it)?, data_type(&mut it)?),
            "WRITE" => Self::Write(symb(&mut it)?),
            "CONCAT" => Self::Concat(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "STRLEN" => Self::Strlen(var(&mut it)?, symb(&mut it)?),
            "GETCHAR" => Self::GetChar(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "SETCHAR" => Self::SetChar(var(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "TYPE" => Self::Type(var(&mut it)?, symb(&mut it)?),
            "LABEL" => Self::Label(label(&mut it)?),
            "JUMP" => Self::Jump(label(&mut it)?),
            "JUMPIFEQ" => Self::JumpIfEq(label(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "JUMPIFNEQ" => Self::JumpIfNeq(label(&mut it)?, symb(&mut it)?, symb(&mut it)?),
            "EXIT" => Self::Exit(symb(&mut it)?),
            "DPRINT" => Self::DPrint(symb(&mut it)?),
            "BREAK" => Self::Break,
            "ADDS" => Self::AddS,
            "SUBS" => Self::SubS,
            "MULS" => Self::MulS,
            "DIVS" => Self::DivS,
            "IDIVS" => Self::IDivS,
            "LTS" => Self::LtS,
            "GTS" => Self::GtS,
            "EQS" => Self::EqS,
            "ANDS" => Self::AndS,
            "ORS" => Self::OrS,
            "NOTS" => Self::NotS,
            "INT2CHARS" => Self::Int2CharS,
            "STRI2INTS" => Self::Stri2IntS,
            "INT2FLOATS" => Self::Int2FloatS,
            "FLOAT2INTS" => Self::Float2IntS,
            "JUMPIFEQS" => Self::JumpIfEqS(label(&mut it)?),
            "JUMPIFNEQS" => Self::JumpIfNeqS(label(&mut it)?),
            _ => return None,
        };
        if it.next().is_some() {
            return None;
        }
        Some(op)
    }

    /// The upper-case mnemonic.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Move(..) => "MOVE",
            Self::CreateFrame => "CREATEFRAME",
            Self::PushFrame => "PUSHFRAME",
            Self::PopFrame => "POPFRAME",
            Self::DefVar(_) => "DEFVAR",
            Self::Call(_) => "CALL",
            Self::Return => "RETURN",
            Self::PushS(_) => "PUSHS",
            Self::PopS(_) => "POPS",
            Self::ClearS => "CLEARS",
            Self::Add(..) => "ADD",
            Self::Sub(..) => "SUB",
            Self::Mul(..) => "MUL",
            Self::Div(..) => "DIV",
            Self::IDiv(..) => "IDIV",
            Self::Lt(..) => "LT",
            Self::Gt(..) => "GT",
            Self::Eq(..) => "EQ",
            Self::And(..) => "AND",
            Self::Or(..) => "OR",
            Self::Not(..) => "NOT",
            Self::Int2Char(..) => "INT2CHAR",
            Self::Stri2Int(..) => "STRI2INT",
            Self::Int2Float(..) => "INT2FLOAT",
            Self::Float2Int(..) => "FLOAT2INT",
            Self::Read(..) => "READ",
            Self::Write(_) => "WRITE",
            Self::Concat(..) => "CONCAT",
            Self::Strlen(..) => "STRLEN",
            Self::GetChar(..) => "GETCHAR",
            Self::SetChar(..) => "SETCHAR",
            Self::Type(..) => "TYPE",
            Self::Label(_) => "LABEL",
            Self::Jump(_) => "JUMP",
            Self::JumpIfEq(..) => "JUMPIFEQ",
            Self::JumpIfNeq(..) => "JUMPIFNEQ",
            Self::Exit(_) => "EXIT",
            Self::DPrint(_) => "DPRINT",
            Self::Break => "BREAK",
            Self::AddS => "ADDS",
            Self::SubS => "SUBS",
            Self::MulS => "MULS",
            Self::DivS => "DIVS",
            Self::IDivS => "IDIVS",
            Self::LtS => "LTS",
            Self::GtS => "GTS",
            Self::EqS => "EQS",
            Self::AndS => "ANDS",
            Self::OrS => "ORS",
            Self::NotS => "NOTS",
            Self::Int2CharS => "INT2CHARS",
            Self::Stri2IntS => "STRI2INTS",
            Self::Int2FloatS => "INT2FLOATS",
            Self::Float2IntS => "FLOAT2INTS",
            Self::JumpIfEqS(_) => "JUMPIFEQS",
            Self::JumpIfNeqS(_) => "JUMPIFNEQS",
        }
    }

    /// Debugging and label pseudo-instructions, which statistics skip.
    #[must_use]
    pub const fn is_administrative(&self) -> bool {
        matches!(self, Self::Label(_) | Self::DPrint(_) | Self::Break)
    }
}

fn var(it: &mut impl Iterator<Item = Arg>) -> Option<Var> {
    match it.next()? {
        Arg::Var(v) => Some(v),
        _ => None,
    }
}

fn symb(it: &mut impl Iterator<Item = Arg>) -> Option<Symbol> {
    match it.next()? {
        Arg::Symb(s) => Some(s),
        Arg::Var(v) => Some(Symbol::Var(v)),
        _ => None,
    }
}

fn label(it: &mut impl Iterator<Item = Arg>) -> Option<Label> {
    match it.next()? {
        Arg::Label(l) => Some(l),
        _ => None,
    }
}

fn data_type(it: &mut impl Iterator<Item = Arg>) -> Option<DataType> {
    match it.next()? {
        Arg::Type(t) => Some(t),
        _ => None,
    }
}

/// An opcode with its position in the program.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instruction {
    /// Unique, positive execution order.
    pub order: u32,
    /// Source line, 0 when unknown.
    pub line: u32,
    /// The operation.
    pub opcode: Opcode,
}

impl Instruction {
    /// Creates an instruction with no source line.
    #[must_use]
    pub fn new(order: u32, opcode: Opcode) -> Self {
        Self {
            order,
            line: 0,
            opcode,
        }
    }

    /// Sets the source line.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }
}
