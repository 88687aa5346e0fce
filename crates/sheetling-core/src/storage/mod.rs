//! File storage backends.

pub mod csv;
