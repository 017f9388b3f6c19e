//! Executable programs and their label tables.

use std::collections::BTreeMap;
use std::fmt;

use ippcode_foundation::{Error, Result};
use tracing::info;

use crate::opcode::{Instruction, Label, Opcode};

/// Maps label names to the index of the next executable instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    targets: BTreeMap<String, usize>,
}

impl LabelTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a label. Redefinition is a semantic error.
    pub fn define(&mut self, name: &str, target: usize) -> Result<()> {
        if self.targets.contains_key(name) {
            return Err(Error::semantic(format!("label {name} is defined twice")));
        }
        self.targets.insert(name.to_string(), target);
        Ok(())
    }

    /// Looks up the instruction index a label designates.
    pub fn resolve(&self, label: &Label) -> Result<usize> {
        self.targets
            .get(label.name())
            .copied()
            .ok_or_else(|| Error::semantic(format!("undefined label {label}")))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if no labels are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterates `(name, target)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.targets.iter().map(|(name, &target)| (name.as_str(), target))
    }
}

impl fmt::Display for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, target)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} -> {target}")?;
        }
        write!(f, "}}")
    }
}

/// A validated, order-sorted instruction list with LABELs resolved away.
#[derive(Clone, Debug, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: LabelTable,
}

impl Program {
    /// Builds a program from instruction records in any order.
    ///
    /// # Errors
    ///
    /// - `InvalidStructure` for a zero or repeated `order`
    /// - `Semantic` for a label defined twice
    pub fn new(mut records: Vec<Instruction>) -> Result<Self> {
        records.sort_by_key(|record| record.order);

        let mut previous = 0;
        for record in &records {
            if record.order == 0 {
                return Err(Error::structure("instruction order must be positive"));
            }
            if record.order == previous {
                return Err(Error::structure(format!(
                    "instruction order {} is used twice",
                    record.order
                )));
            }
            previous = record.order;
        }

        let mut labels = LabelTable::new();
        let mut instructions = Vec::with_capacity(records.len());
        for record in records {
            if let Opcode::Label(label) = &record.opcode {
                labels.define(label.name(), instructions.len())?;
            } else {
                instructions.push(record);
            }
        }

        info!(
            instructions = instructions.len(),
            labels = labels.len(),
            "program loaded"
        );
        Ok(Self {
            instructions,
            labels,
        })
    }

    /// The executable instruction at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// All executable instructions, in order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The label table.
    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Number of executable instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if nothing would execute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
