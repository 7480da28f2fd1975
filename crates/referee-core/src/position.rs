//! Source locations and spans carried by every AST node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single point in source text: 1-based row, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: u32,
    pub col: u32,
}

impl Location {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A span of source text: a begin/end pair of [`Location`]s.
///
/// Every AST node carries the `Position` of the syntactic span that
/// produced it. Synthesized nodes (manufactured by the rewrite or
/// canonicalization passes) carry [`Position::SYNTHETIC`] so the
/// expression store can collapse them fully during hash-consing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub begin: Location,
    pub end: Location,
}

impl Position {
    pub const fn new(begin: Location, end: Location) -> Self {
        Self { begin, end }
    }

    /// Sentinel position for synthesized nodes. Row 0 never occurs in a
    /// real parse (rows are 1-based), so it is safe as a marker.
    pub const SYNTHETIC: Position = Position::new(Location::new(0, 0), Location::new(0, 0));

    pub const fn is_synthetic(&self) -> bool {
        self.begin.row == 0 && self.end.row == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "<synthetic>")
        } else {
            write!(f, "[{} .. {}]", self.begin, self.end)
        }
    }
}
