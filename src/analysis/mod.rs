//! Portfolio analysis engine - pure functions over an in-memory snapshot
//!
//! No stage performs I/O or holds state between calls. Callers pass an
//! immutable snapshot of one user's properties to each operation.

pub mod aggregate;
pub mod analyze;
pub mod compare;
pub mod market;
pub mod optimize;
pub mod recommend;
pub mod risk;
pub mod score;
pub mod types;
pub mod utils;

pub use analyze::analyze_portfolio;
pub use compare::compare_portfolio_items;
pub use market::{market_analysis, portfolio_statistics};
pub use optimize::optimize_portfolio;
pub use types::*;
