use sheetling_engine::engine::Grid;
use std::path::PathBuf;

/// UI-agnostic document state: one grid plus its file binding.
pub struct Document {
    /// The spreadsheet grid.
    pub grid: Grid,
    /// Path of the currently opened file, if any.
    pub file_path: Option<PathBuf>,
    /// Whether the grid has unsaved modifications.
    pub modified: bool,
}

impl Document {
    /// Create an empty document.
    ///
    /// This constructor is side-effect free: it does not touch the
    /// filesystem.
    pub fn new() -> Self {
        Document {
            grid: Grid::new(),
            file_path: None,
            modified: false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
