use super::Document;
use crate::error::Result;

impl Document {
    /// Set a cell from raw input. The grid classifies the input, installs
    /// the value, and runs its full recompute pass; a classification
    /// failure escapes here and leaves the cell untouched.
    pub fn set_cell(&mut self, row: usize, col: usize, input: &str) -> Result<()> {
        self.grid.write(row, col, input)?;
        self.modified = true;
        Ok(())
    }

    /// Clear a single cell. Marks the document modified only when the cell
    /// was occupied.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if self.grid.read(row, col).is_some() {
            self.grid.clear(row, col);
            self.modified = true;
        }
    }

    /// Drop all contents and the file binding.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.file_path = None;
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cell_marks_modified() {
        let mut doc = Document::new();
        assert!(!doc.modified);
        doc.set_cell(0, 0, "5").unwrap();
        assert!(doc.modified);
        assert_eq!(doc.grid.display_at(0, 0), "5");
    }

    #[test]
    fn test_failed_set_cell_does_not_mark_modified() {
        let mut doc = Document::new();
        assert!(doc.set_cell(0, 0, "not a value").is_err());
        assert!(!doc.modified);
    }

    #[test]
    fn test_clear_cell_only_marks_modified_when_occupied() {
        let mut doc = Document::new();
        doc.clear_cell(0, 0);
        assert!(!doc.modified);

        doc.set_cell(0, 0, "5").unwrap();
        doc.modified = false;
        doc.clear_cell(0, 0);
        assert!(doc.modified);
        assert!(doc.grid.read(0, 0).is_none());
    }

    #[test]
    fn test_reset_drops_file_binding() {
        let mut doc = Document::new();
        doc.set_cell(2, 2, "5").unwrap();
        doc.file_path = Some("sheet.csv".into());
        doc.reset();

        assert!(doc.file_path.is_none());
        assert!(!doc.modified);
        assert_eq!(doc.grid.rows(), 1);
        assert_eq!(doc.grid.columns(), 1);
    }
}
