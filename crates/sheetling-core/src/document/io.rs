use super::Document;
use crate::error::{Result, SheetError};
use crate::storage::csv;
use sheetling_engine::engine::Grid;
use std::path::{Path, PathBuf};

/// Outcome of a CSV load: how many fields classified successfully, plus a
/// description of each rejected field. A rejected field never aborts the
/// load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub total: usize,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug)]
pub struct LoadFailure {
    pub row: usize,
    pub col: usize,
    pub input: String,
    pub reason: String,
}

fn check_csv_extension(path: &Path) -> Result<()> {
    let ok = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if ok {
        Ok(())
    } else {
        Err(SheetError::UnsupportedFormat(path.display().to_string()))
    }
}

impl Document {
    /// Load a .csv file, replacing the current contents. The grid is sized
    /// to the file up front; each non-empty field then goes through the
    /// normal classify-and-write path.
    pub fn open(&mut self, path: &Path) -> Result<LoadReport> {
        check_csv_extension(path)?;
        if !path.exists() {
            return Err(SheetError::FileNotFound(path.display().to_string()));
        }

        let records = csv::read_records(path)?;
        let rows = records.len().max(1);
        let cols = records
            .iter()
            .map(|record| record.len())
            .max()
            .unwrap_or(1)
            .max(1);

        let mut grid = Grid::with_size(rows, cols);
        let mut report = LoadReport::default();
        for (row, record) in records.iter().enumerate() {
            for (col, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                report.total += 1;
                match grid.write(row, col, field) {
                    Ok(()) => report.loaded += 1,
                    Err(e) => report.failures.push(LoadFailure {
                        row,
                        col,
                        input: field.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
        }

        self.grid = grid;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(report)
    }

    /// Save to the current file path.
    pub fn save(&mut self) -> Result<PathBuf> {
        let Some(path) = self.file_path.clone() else {
            return Err(SheetError::NoFilePath);
        };
        self.save_as(&path)?;
        Ok(path)
    }

    /// Write every cell's input (construct) string to `path` as CSV. The
    /// document is considered up to date only when saving to its own path.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        check_csv_extension(path)?;
        csv::write_grid(path, &self.grid)?;
        if self.file_path.as_deref() == Some(path) {
            self.modified = false;
        }
        Ok(())
    }

    /// Create (or truncate) an empty .csv file.
    pub fn create_empty(path: &Path) -> Result<()> {
        check_csv_extension(path)?;
        std::fs::File::create(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "sheetling_{}_{}_{:?}.csv",
            tag,
            std::process::id(),
            std::thread::current().id(),
        ))
    }

    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_rejects_non_csv_extension() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.open(Path::new("sheet.txt")),
            Err(SheetError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            doc.save_as(Path::new("sheet.grd")),
            Err(SheetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let mut doc = Document::new();
        let path = temp_csv("missing");
        assert!(matches!(
            doc.open(&path),
            Err(SheetError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_save_without_path() {
        let mut doc = Document::new();
        assert!(matches!(doc.save(), Err(SheetError::NoFilePath)));
    }

    #[test]
    fn test_save_and_open_round_trip() {
        let path = temp_csv("round_trip");
        let _cleanup = Cleanup(path.clone());

        let mut doc = Document::new();
        doc.set_cell(0, 0, "5").unwrap();
        doc.set_cell(0, 1, "=A0*2").unwrap();
        doc.set_cell(1, 0, "\"a, b\"").unwrap();
        doc.save_as(&path).unwrap();

        let mut reloaded = Document::new();
        let report = reloaded.open(&path).unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(report.total, 3);
        assert!(report.failures.is_empty());

        assert_eq!(reloaded.grid.display_at(0, 0), "5");
        assert_eq!(reloaded.grid.display_at(0, 1), "10");
        assert_eq!(reloaded.grid.display_at(1, 0), "a, b");
        assert_eq!(reloaded.grid.input_at(0, 1), "=A0*2");
        assert!(!reloaded.modified);
        assert_eq!(reloaded.file_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_open_reports_bad_fields_without_aborting() {
        let path = temp_csv("bad_fields");
        let _cleanup = Cleanup(path.clone());
        std::fs::write(&path, "1,not a value,3\n").unwrap();

        let mut doc = Document::new();
        let report = doc.open(&path).unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].col, 1);
        assert_eq!(report.failures[0].input, "not a value");

        assert_eq!(doc.grid.display_at(0, 0), "1");
        assert_eq!(doc.grid.display_at(0, 1), "");
        assert_eq!(doc.grid.display_at(0, 2), "3");
    }

    #[test]
    fn test_save_to_own_path_clears_modified() {
        let path = temp_csv("own_path");
        let _cleanup = Cleanup(path.clone());

        let mut doc = Document::new();
        doc.set_cell(0, 0, "1").unwrap();
        doc.file_path = Some(path.clone());
        assert!(doc.modified);

        doc.save().unwrap();
        assert!(!doc.modified);

        // Saving a copy elsewhere keeps the document marked modified.
        doc.set_cell(0, 0, "2").unwrap();
        let other = temp_csv("other_path");
        let _cleanup2 = Cleanup(other.clone());
        doc.save_as(&other).unwrap();
        assert!(doc.modified);
    }

    #[test]
    fn test_create_empty_truncates() {
        let path = temp_csv("create_empty");
        let _cleanup = Cleanup(path.clone());
        std::fs::write(&path, "old contents").unwrap();

        Document::create_empty(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
