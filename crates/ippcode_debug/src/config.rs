//! Configuration for execution statistics.

use std::fmt;

/// One line of the statistics report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsItem {
    /// Executed instructions, excluding DPRINT and BREAK.
    Insts,
    /// Most variables declared at once across the visible frames.
    Vars,
}

impl fmt::Display for StatsItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insts => "insts",
            Self::Vars => "vars",
        })
    }
}

/// Which statistics to report, in report order.
///
/// Items may repeat; each occurrence produces a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsConfig {
    /// Report items, in the order they were requested.
    pub items: Vec<StatsItem>,
}

impl StatsConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method appending an item.
    #[must_use]
    pub fn with_item(mut self, item: StatsItem) -> Self {
        self.items.push(item);
        self
    }

    /// Returns true if nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
