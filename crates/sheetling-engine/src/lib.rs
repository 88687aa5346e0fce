//! sheetling_engine - typed cells, grid storage, formula evaluation.

pub mod engine;
