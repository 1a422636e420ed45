//! RecommendationEngine - fixed-order rule lists over aggregated statistics
//!
//! Each rule appends at most one entry, always in the order listed, so
//! identical input yields identical output.

use crate::analysis::aggregate::Aggregates;
use crate::analysis::risk::has_concentration_risk;
use crate::analysis::types::{PortfolioGap, Recommendation};
use tracing::debug;

/// Portfolios smaller than this are nudged to grow
pub const TARGET_PORTFOLIO_SIZE: usize = 5;
/// Fewer distinct postcodes than this are nudged to spread out
pub const TARGET_LOCATIONS: usize = 3;
pub const TARGET_VALUE_BRACKETS: usize = 3;
pub const TARGET_BEDROOM_VARIETY: usize = 3;
/// Share of properties without solar above which panels are suggested
pub const SOLAR_ABSENT_THRESHOLD: f64 = 0.7;

/// Rules behind the headline analysis
pub fn base_recommendations(agg: &Aggregates) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if agg.poor_epc_count > 0 {
        recommendations.push(Recommendation::ImproveEpcRatings {
            count: agg.poor_epc_count,
        });
    }

    if has_concentration_risk(agg) {
        recommendations.push(Recommendation::ReduceTypeConcentration);
    }

    if agg.valuations.is_empty() {
        recommendations.push(Recommendation::AddPropertySizes);
    }

    debug!("Base recommendations: {:?}", recommendations);

    recommendations
}

/// Gaps in composition against the fixed type list and bedroom variety
pub fn identify_gaps(agg: &Aggregates) -> Vec<PortfolioGap> {
    let mut gaps = Vec::new();

    let missing = agg.missing_types();
    if !missing.is_empty() {
        gaps.push(PortfolioGap::MissingPropertyTypes(missing));
    }

    if !agg.bedrooms.is_empty() && agg.distinct_bedroom_counts() < TARGET_BEDROOM_VARIETY {
        gaps.push(PortfolioGap::LimitedBedroomDiversity);
    }

    gaps
}

/// Growth and spread suggestions used by portfolio optimization
pub fn optimization_suggestions(agg: &Aggregates) -> Vec<Recommendation> {
    let mut suggestions = Vec::new();

    if agg.total_properties < TARGET_PORTFOLIO_SIZE {
        suggestions.push(Recommendation::ExpandPortfolio);
    }

    if agg.stats.locations < TARGET_LOCATIONS {
        suggestions.push(Recommendation::AddLocations);
    }

    if !agg.estimated_values.is_empty()
        && agg.distinct_estimated_values() < TARGET_VALUE_BRACKETS
    {
        suggestions.push(Recommendation::DiversifyValueBrackets);
    }

    suggestions
}

/// Rules behind market analysis
pub fn market_recommendations(agg: &Aggregates) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if agg.stats.type_distribution.len() == 1 {
        recommendations.push(Recommendation::DiversifyPropertyTypes);
    }

    if agg.poor_epc_count > 0 {
        recommendations.push(Recommendation::ImproveEpcRatings {
            count: agg.poor_epc_count,
        });
    }

    if agg.stats.locations == 1 {
        recommendations.push(Recommendation::DiversifyLocations);
    }

    if agg.solar_absent_count as f64 > agg.total_properties as f64 * SOLAR_ABSENT_THRESHOLD {
        recommendations.push(Recommendation::ConsiderSolarPanels);
    }

    recommendations
}
