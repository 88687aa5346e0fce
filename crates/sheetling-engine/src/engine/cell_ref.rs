//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between textual cell references
//! (e.g., "A0", "B3") and zero-indexed row/column coordinates. The
//! reference grammar is one column letter followed by the row digits, so
//! only columns 0-25 are addressable by reference; wider grids remain
//! reachable through direct coordinate writes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a reference of the form `<letter><digits>` ("B3" -> column 1,
    /// row 3). Returns None if the input is invalid.
    pub fn parse(name: &str) -> Option<CellRef> {
        let re = Regex::new(r"^(?<letter>[A-Za-z])(?<digits>[0-9]+)$").unwrap();
        let caps = re.captures(name)?;

        let letter = caps["letter"].bytes().next()?;
        let col = (letter.to_ascii_uppercase() - b'A') as usize;
        let row = caps["digits"].parse::<usize>().ok()?;

        Some(CellRef::new(row, col))
    }

    /// Column index to display letters (0 -> A, 25 -> Z, 26 -> AA).
    /// Multi-letter labels exist for display only; the reference grammar
    /// stops at Z.
    pub fn col_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_letters(self.col), self.row)
    }
}
