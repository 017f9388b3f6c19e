//! Execution statistics collected through the VM observer hook.

use std::io::{self, Write};

use ippcode_language::{ExecutionObserver, Opcode};
use ippcode_storage::FrameStore;

use crate::config::{StatsConfig, StatsItem};

/// Counts executed instructions and the variable watermark.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    config: StatsConfig,
    instructions: u64,
    max_vars: usize,
}

impl Statistics {
    /// Creates a collector reporting the configured items.
    #[must_use]
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            instructions: 0,
            max_vars: 0,
        }
    }

    /// Executed instructions, excluding DPRINT and BREAK.
    #[must_use]
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Most variables declared at once in the global frame, the top local
    /// frame, and the temporary frame.
    #[must_use]
    pub fn max_vars(&self) -> usize {
        self.max_vars
    }

    /// Writes one number per configured item.
    pub fn write_report<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for item in &self.config.items {
            match item {
                StatsItem::Insts => writeln!(writer, "{}", self.instructions)?,
                StatsItem::Vars => writeln!(writer, "{}", self.max_vars)?,
            }
        }
        writer.flush()
    }
}

impl ExecutionObserver for Statistics {
    fn after_instruction(&mut self, opcode: &Opcode, frames: &FrameStore) {
        if !opcode.is_administrative() {
            self.instructions += 1;
        }
        self.max_vars = self.max_vars.max(frames.visible_declared_count());
    }
}
