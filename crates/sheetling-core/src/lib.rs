//! sheetling-core - UI-agnostic document model + CSV storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{Document, LoadFailure, LoadReport};
pub use error::{Result, SheetError};

pub use sheetling_engine::engine::{CellRef, Grid, Value};
