//! Data type tags and frame kinds.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a [`Value`](crate::Value).
///
/// Also used as the type operand of READ, where only the four
/// readable kinds (everything except `nil`) are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    /// The nil type (only value: nil).
    Nil,
    /// 64-bit signed integer.
    Int,
    /// Boolean type.
    Bool,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
}

impl DataType {
    /// The name TYPE writes and source operands use.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    /// Returns true for the kinds READ can produce.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::Nil)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nil" => Ok(Self::Nil),
            "int" => Ok(Self::Int),
            "bool" => Ok(Self::Bool),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            _ => Err(()),
        }
    }
}

/// Which of the three variable scopes a name lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameKind {
    /// The single global frame (`GF`).
    Global,
    /// The top of the local frame stack (`LF`).
    Local,
    /// The pending temporary frame (`TF`).
    Temporary,
}

impl FrameKind {
    /// The two-letter prefix used in source (`GF`, `LF`, `TF`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Global => "GF",
            Self::Local => "LF",
            Self::Temporary => "TF",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for FrameKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GF" => Ok(Self::Global),
            "LF" => Ok(Self::Local),
            "TF" => Ok(Self::Temporary),
            _ => Err(()),
        }
    }
}
