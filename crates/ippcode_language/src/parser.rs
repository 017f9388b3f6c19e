//! Parser for IPPcode20 source text.
//!
//! Turns source into instruction records whose operands already match
//! the opcode signatures, so the engine only ever checks values.

use ippcode_foundation::{DataType, Error, ErrorContext, FrameKind, Result, Value, float};

use crate::lexer::{Lexer, Token, TokenKind};
use crate::opcode::{Arg, ArgKind, Instruction, Label, Opcode, Symbol, Var};
use crate::program::Program;

const HEADER: &str = ".IPPcode20";

/// Parses source into instruction records, numbered from 1 in
/// source order.
///
/// # Errors
///
/// - `MalformedProgram` for a missing header or malformed operand text
/// - `InvalidStructure` for an unknown opcode, wrong arity, or an
///   operand of the wrong kind
pub fn parse(source: &str) -> Result<Vec<Instruction>> {
    Parser::new(source).parse()
}

/// Parses source and builds an executable [`Program`].
pub fn compile(source: &str) -> Result<Program> {
    Program::new(parse(source)?)
}

/// Line-oriented parser.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser over the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Lexer::tokenize_all(source),
            position: 0,
        }
    }

    /// Parses the whole source.
    pub fn parse(&mut self) -> Result<Vec<Instruction>> {
        self.header()?;

        let mut records = Vec::new();
        let mut order = 1u32;
        while let Some((line, words)) = self.next_line() {
            records.push(self.instruction(order, line, &words)?);
            order += 1;
        }
        Ok(records)
    }

    fn header(&mut self) -> Result<()> {
        match self.next_line() {
            Some((_, words)) if words.len() == 1 && words[0].eq_ignore_ascii_case(HEADER) => Ok(()),
            Some((line, _)) => Err(Error::malformed(format!("expected {HEADER} header"), line)),
            None => Err(Error::malformed(format!("missing {HEADER} header"), 0)),
        }
    }

    /// Collects the words of the next non-empty line.
    fn next_line(&mut self) -> Option<(u32, Vec<&'src str>)> {
        let mut words = Vec::new();
        let mut line = 0;
        while let Some(token) = self.tokens.get(self.position).copied() {
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => {
                    self.position += 1;
                    if !words.is_empty() {
                        break;
                    }
                }
                TokenKind::Word => {
                    self.position += 1;
                    if words.is_empty() {
                        line = token.span.line;
                    }
                    words.push(token.text(self.source));
                }
            }
        }
        (!words.is_empty()).then_some((line, words))
    }

    fn instruction(&self, order: u32, line: u32, words: &[&str]) -> Result<Instruction> {
        let at_line = |err: Error| err.with_context(ErrorContext::new().with_line(line));

        let mnemonic = words[0].to_ascii_uppercase();
        let signature = Opcode::signature(&mnemonic)
            .ok_or_else(|| at_line(Error::structure(format!("unknown opcode {}", words[0]))))?;

        let operands = &words[1..];
        if operands.len() != signature.len() {
            return Err(at_line(Error::structure(format!(
                "{mnemonic} takes {} operands, found {}",
                signature.len(),
                operands.len()
            ))));
        }

        let args = signature
            .iter()
            .zip(operands)
            .map(|(kind, text)| parse_arg(*kind, text, line))
            .collect::<Result<Vec<_>>>()
            .map_err(at_line)?;

        let opcode = Opcode::from_args(&mnemonic, args)
            .ok_or_else(|| at_line(Error::structure(format!("bad operands for {mnemonic}"))))?;
        Ok(Instruction::new(order, opcode).at_line(line))
    }
}

fn parse_arg(kind: ArgKind, text: &str, line: u32) -> Result<Arg> {
    let wrong_kind = || Error::structure(format!("expected {kind} operand, found {text}"));

    match (kind, text.split_once('@')) {
        (ArgKind::Var, Some((prefix, name))) => match prefix.parse::<FrameKind>() {
            Ok(frame) => variable(frame, name, line).map(Arg::Var),
            Err(()) if prefix.parse::<DataType>().is_ok() => Err(wrong_kind()),
            Err(()) => Err(Error::malformed(format!("unknown operand prefix in {text}"), line)),
        },
        (ArgKind::Symb, Some((prefix, rest))) => {
            if let Ok(frame) = prefix.parse::<FrameKind>() {
                return variable(frame, rest, line).map(Arg::Var);
            }
            let ty = prefix
                .parse::<DataType>()
                .map_err(|()| Error::malformed(format!("unknown operand prefix in {text}"), line))?;
            constant(ty, rest)
                .map(|value| Arg::Symb(Symbol::Const(value)))
                .ok_or_else(|| Error::malformed(format!("invalid {ty} literal {text}"), line))
        }
        (ArgKind::Label, None) => {
            if is_identifier(text) {
                Ok(Arg::Label(Label::new(text)))
            } else {
                Err(Error::malformed(format!("invalid label {text}"), line))
            }
        }
        (ArgKind::Type, None) => match text.parse::<DataType>() {
            Ok(ty) if ty.is_readable() => Ok(Arg::Type(ty)),
            _ => Err(Error::malformed(format!("invalid type {text}"), line)),
        },
        _ => Err(wrong_kind()),
    }
}

fn variable(frame: FrameKind, name: &str, line: u32) -> Result<Var> {
    if is_identifier(name) {
        Ok(Var::new(frame, name))
    } else {
        Err(Error::malformed(format!("invalid variable name {name}"), line))
    }
}

fn constant(ty: DataType, text: &str) -> Option<Value> {
    match ty {
        DataType::Nil => (text == "nil").then_some(Value::Nil),
        DataType::Bool => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        DataType::Int => {
            let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            text.parse::<i64>().ok().map(Value::Int)
        }
        DataType::Float => float::parse(text).map(Value::Float),
        DataType::String => decode_string(text).map(Value::from),
    }
}

/// Decodes `\ddd` escapes into the code points they name.
#[must_use]
pub fn decode_string(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut code = 0u32;
        for _ in 0..3 {
            code = code * 10 + chars.next()?.to_digit(10)?;
        }
        out.push(char::from_u32(code)?);
    }
    Some(out)
}

/// Returns true if `text` is a valid variable or label name.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    const SPECIAL: &str = "_-$&%*!?";
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || SPECIAL.contains(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || SPECIAL.contains(c))
}
