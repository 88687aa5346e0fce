//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Value`], [`Formula`] - Typed cell contents with validation and
//!   display/input string forms
//! - [`Grid`] - Growable 2-D cell storage with classification on write and
//!   an unconditional full recompute pass
//! - [`CellRef`] - Cell reference parsing (letter+digits ↔ row/col indices)
//! - [`evaluate`] - Recursive algebraic formula evaluation

mod cell_ref;
mod error;
mod eval;
mod grid;
mod value;

pub use cell_ref::CellRef;
pub use error::{EvalError, FormatError};
pub use eval::evaluate;
pub use grid::Grid;
pub use value::{ERROR_SENTINEL, Formula, Value, fmt_number};
