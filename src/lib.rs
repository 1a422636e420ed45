// Library module for testable functions

pub mod analysis;
pub mod error;
pub mod records;

pub use error::{AnalysisError, EngineResult};

use rust_decimal::Decimal;

/// Flat valuation rate per square foot
pub const PRICE_PER_SQFT: i64 = 250;

/// Estimate property value from floor area
/// Formula: size_sqft × PRICE_PER_SQFT
pub fn estimate_value(size_sqft: u32) -> Option<Decimal> {
    if size_sqft == 0 {
        return None;
    }
    Some(Decimal::from(size_sqft) * Decimal::from(PRICE_PER_SQFT))
}
