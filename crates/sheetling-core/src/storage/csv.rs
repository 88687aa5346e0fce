//! CSV reading and writing.
//!
//! Files carry each cell's input (construct) string, so re-classifying the
//! fields on load reconstructs equivalent cells. Text cells arrive with
//! their surrounding quotes intact, which is also what keeps fields
//! containing commas in one piece.

use crate::error::Result;
use sheetling_engine::engine::Grid;
use std::io::Write;
use std::path::Path;

/// Read a CSV file into rows of raw fields. Blank lines are skipped.
pub fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(split_fields)
        .collect())
}

/// Split one line on commas, keeping commas inside double-quoted stretches.
/// Quotes stay part of the field.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push('"');
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Write every cell's input string, comma-joined, one grid row per line.
pub fn write_grid(path: &Path, grid: &Grid) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    for row in 0..grid.rows() {
        let fields: Vec<String> = (0..grid.columns())
            .map(|col| grid.input_at(row, col))
            .collect();
        writeln!(file, "{}", fields.join(","))?;
    }
    Ok(())
}
