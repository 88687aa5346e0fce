//! The cell grid: a growable 2-D store of optional values.

use serde::{Deserialize, Serialize};

use super::error::FormatError;
use super::eval;
use super::value::Value;

/// A rectangular, growable grid of optional cell values addressed by
/// zero-based (row, column).
///
/// Extents are high-water marks: they grow when a write lands outside the
/// current bounds and only shrink through [`Grid::reset`]. Growing never
/// moves existing cells. Cloning deep-copies every occupied cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Option<Value>>>,
}

impl Grid {
    /// 1x1 empty grid.
    pub fn new() -> Grid {
        Grid::with_size(1, 1)
    }

    /// Empty grid with explicit extents, each clamped to at least 1.
    pub fn with_size(rows: usize, cols: usize) -> Grid {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Grid {
            rows,
            cols,
            cells: vec![vec![None; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Read-only cell access. Out-of-bounds and unoccupied addresses are
    /// both `None`.
    pub fn read(&self, row: usize, col: usize) -> Option<&Value> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Classify `input` against the value variants (integer, real, formula,
    /// text - first match wins), grow to fit the address, install the new
    /// value, then re-run every formula in the grid.
    ///
    /// A classification failure rejects the write and leaves the previous
    /// cell contents in place (any growth performed for the address stays).
    pub fn write(&mut self, row: usize, col: usize, input: &str) -> Result<(), FormatError> {
        self.grow_to_fit(row + 1, col + 1);
        let value = Value::from_input(input, self)?;
        self.cells[row][col] = Some(value);
        self.recompute_all();
        Ok(())
    }

    /// Drop the occupancy at the address; no-op when out of bounds.
    pub fn clear(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            self.cells[row][col] = None;
        }
    }

    /// Clear everything and shrink back to 1x1.
    pub fn reset(&mut self) {
        *self = Grid::new();
    }

    /// Display string of the cell; empty for unoccupied or out-of-bounds
    /// addresses.
    pub fn display_at(&self, row: usize, col: usize) -> String {
        self.read(row, col)
            .map(|value| value.display_string())
            .unwrap_or_default()
    }

    /// Input (construct) string of the cell; empty when unoccupied.
    pub fn input_at(&self, row: usize, col: usize) -> String {
        self.read(row, col)
            .map(|value| value.to_input_string())
            .unwrap_or_default()
    }

    /// Re-evaluate every formula cell in row-major order.
    ///
    /// Refreshes are applied in place as the sweep proceeds, so a formula
    /// referencing an earlier cell observes that cell's refreshed result
    /// within the same pass. A failing cell does not block the rest of the
    /// sweep.
    pub fn recompute_all(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let source = match &self.cells[row][col] {
                    Some(Value::Formula(f)) => f.source().to_string(),
                    _ => continue,
                };
                let outcome = eval::evaluate(&source, self);
                if let Some(Value::Formula(f)) = self.cells[row][col].as_mut() {
                    f.store(outcome);
                }
            }
        }
    }

    fn grow_to_fit(&mut self, rows: usize, cols: usize) {
        let new_rows = rows.max(self.rows);
        let new_cols = cols.max(self.cols);
        if new_rows == self.rows && new_cols == self.cols {
            return;
        }
        for row in &mut self.cells {
            row.resize(new_cols, None);
        }
        self.cells.resize_with(new_rows, || vec![None; new_cols]);
        self.rows = new_rows;
        self.cols = new_cols;
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::value::ERROR_SENTINEL;

    #[test]
    fn test_new_grid_is_one_by_one() {
        let grid = Grid::new();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.columns(), 1);
        assert!(grid.read(0, 0).is_none());
    }

    #[test]
    fn test_with_size_clamps_to_one() {
        let grid = Grid::with_size(0, 0);
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.columns(), 1);
    }

    #[test]
    fn test_write_grows_to_fit_and_preserves_contents() {
        let mut grid = Grid::new();
        grid.write(0, 0, "1").unwrap();
        grid.write(4, 2, "2").unwrap();

        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.display_at(0, 0), "1");
        assert_eq!(grid.display_at(4, 2), "2");

        // Growing again never moves what is already there.
        grid.write(9, 9, "3").unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.display_at(0, 0), "1");
        assert_eq!(grid.display_at(4, 2), "2");
    }

    #[test]
    fn test_extents_never_shrink_except_on_reset() {
        let mut grid = Grid::new();
        grid.write(3, 3, "1").unwrap();
        grid.clear(3, 3);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.columns(), 4);

        grid.reset();
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.columns(), 1);
        assert!(grid.read(0, 0).is_none());
    }

    #[test]
    fn test_rejected_write_leaves_cell_untouched() {
        let mut grid = Grid::new();
        grid.write(0, 0, "5").unwrap();
        assert!(grid.write(0, 0, "not a value").is_err());
        assert_eq!(grid.display_at(0, 0), "5");
    }

    #[test]
    fn test_clear_out_of_bounds_is_noop() {
        let mut grid = Grid::new();
        grid.clear(10, 10);
        assert_eq!(grid.rows(), 1);
    }

    #[test]
    fn test_write_triggers_recompute_of_dependents() {
        let mut grid = Grid::new();
        grid.write(0, 1, "=A0*2").unwrap(); // B0
        assert_eq!(grid.display_at(0, 1), "0");

        grid.write(0, 0, "21").unwrap(); // A0
        assert_eq!(grid.display_at(0, 1), "42");

        grid.write(0, 0, "3.5").unwrap();
        assert_eq!(grid.display_at(0, 1), "7");
    }

    #[test]
    fn test_error_state_recovers_after_fixing_referenced_cell() {
        let mut grid = Grid::new();
        grid.write(0, 0, "=5/0").unwrap(); // A0 errors
        grid.write(0, 1, "=A0+1").unwrap(); // B0 inherits the error
        assert_eq!(grid.display_at(0, 0), ERROR_SENTINEL);
        assert_eq!(grid.display_at(0, 1), ERROR_SENTINEL);

        grid.write(0, 0, "5").unwrap();
        assert_eq!(grid.display_at(0, 1), "6");
    }

    #[test]
    fn test_text_reference_counts_as_zero() {
        let mut grid = Grid::new();
        grid.write(0, 0, "\"12\"").unwrap();
        grid.write(0, 1, "=A0+8").unwrap();
        assert_eq!(grid.display_at(0, 1), "8");
    }

    #[test]
    fn test_failing_formula_does_not_block_the_sweep() {
        let mut grid = Grid::new();
        grid.write(0, 0, "=1/0").unwrap();
        grid.write(1, 0, "=2+2").unwrap();
        assert_eq!(grid.display_at(0, 0), ERROR_SENTINEL);
        assert_eq!(grid.display_at(1, 0), "4");
    }

    #[test]
    fn test_clone_is_a_deep_copy() {
        let mut grid = Grid::new();
        grid.write(0, 0, "5").unwrap();
        let copy = grid.clone();

        grid.write(0, 0, "6").unwrap();
        assert_eq!(copy.display_at(0, 0), "5");
        assert_eq!(grid.display_at(0, 0), "6");
    }
}
