use std::fmt;

use super::types::Cell;

/// Snapshot of the numbers a debug overlay shows next to the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateSummary {
    pub length: usize,
    pub head: Cell,
    pub apple: Cell,
    pub ticks: u64,
    pub resets: u64,
    pub apples_eaten: u64,
}

impl fmt::Display for StateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Len: {} Head: {} Apple: {}", self.length, self.head, self.apple)
    }
}
