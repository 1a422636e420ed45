//! Scorer - normalized 0-100 scores from categorical feature weights
//!
//! The investment score is a linear points rule kept simple enough to audit
//! by hand. It is not a calibrated financial model.

use crate::analysis::aggregate::Aggregates;
use crate::analysis::utils::ratio;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// Points per property with an A-C EPC
pub const EFFICIENT_EPC_POINTS: u64 = 20;
pub const SOLAR_PANEL_POINTS: u64 = 15;
pub const GARDEN_POINTS: u64 = 10;
pub const PARKING_POINTS: u64 = 10;
pub const NEW_BUILD_POINTS: u64 = 15;

pub const MAX_SCORE: u32 = 100;

/// Both scores, absent for an empty portfolio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub energy_efficiency: Option<f64>,
    pub investment: Option<u32>,
}

pub fn score_portfolio(agg: &Aggregates) -> Scores {
    let scores = Scores {
        energy_efficiency: energy_efficiency_score(agg),
        investment: investment_score(agg),
    };

    debug!(
        "Scored portfolio: energy efficiency {:?}, investment {:?}",
        scores.energy_efficiency, scores.investment
    );

    scores
}

/// Percentage of all properties rated A-C, to two decimal places.
/// Unrated properties count in the denominator only.
pub fn energy_efficiency_score(agg: &Aggregates) -> Option<f64> {
    let efficient = agg.efficient_epc_count as u64 * 100;
    ratio(efficient, agg.total_properties, 2)?.to_f64()
}

/// Average feature points per property, rounded and capped at 100
pub fn investment_score(agg: &Aggregates) -> Option<u32> {
    let features = &agg.feature_counts;
    let points = agg.efficient_epc_count as u64 * EFFICIENT_EPC_POINTS
        + features.solar_panels as u64 * SOLAR_PANEL_POINTS
        + features.garden as u64 * GARDEN_POINTS
        + features.parking as u64 * PARKING_POINTS
        + features.new_build as u64 * NEW_BUILD_POINTS;

    let average = ratio(points, agg.total_properties, 0)?.to_u32()?;
    Some(average.min(MAX_SCORE))
}
