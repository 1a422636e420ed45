//! Property records - typed input for the analysis engine

pub mod enrich;
pub mod parse;
pub mod types;
pub mod utils;

pub use types::*;
