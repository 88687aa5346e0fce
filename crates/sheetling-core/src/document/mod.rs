mod io;
mod ops;
mod state;

pub use io::{LoadFailure, LoadReport};
pub use state::Document;
