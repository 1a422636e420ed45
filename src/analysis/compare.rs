//! ComparisonEngine - side-by-side view of a caller-selected set of properties
//!
//! Values come only from the caller-supplied `estimated_value`; nothing is
//! derived from size here.

use crate::analysis::types::{
    ComparisonInsight, ComparisonMetrics, ComparisonResult, FeatureSnapshot, PricePerSqft,
    PropertySnapshot,
};
use crate::analysis::utils::{mean, round_currency, value_range};
use crate::error::{AnalysisError, EngineResult};
use crate::records::types::PropertyRecord;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub const MIN_COMPARISON_SIZE: usize = 2;
/// Value gaps above this are called out
pub const SIGNIFICANT_VALUE_GAP: i64 = 100_000;

/// Compare two or more properties of one owner.
/// Ownership is validated by the caller before the set reaches the engine.
pub fn compare_portfolio_items(records: &[PropertyRecord]) -> EngineResult<ComparisonResult> {
    if records.len() < MIN_COMPARISON_SIZE {
        return Err(AnalysisError::insufficient_input(
            "comparison",
            MIN_COMPARISON_SIZE,
            records.len(),
        ));
    }

    info!("Comparing {} properties", records.len());

    let properties: Vec<PropertySnapshot> = records.iter().map(snapshot).collect();
    let metrics = comparison_metrics(records);
    let insights = comparison_insights(records);

    debug!("Comparison insights: {:?}", insights);

    Ok(ComparisonResult {
        properties,
        metrics,
        insights,
    })
}

fn snapshot(record: &PropertyRecord) -> PropertySnapshot {
    PropertySnapshot {
        id: record.id,
        address: record.address(),
        postcode: record.postcode.clone(),
        property_type: record.property_type,
        bedrooms: record.bedrooms,
        bathrooms: record.bathrooms,
        size_sqft: record.size_sqft,
        estimated_value: record.estimated_value,
        epc_rating: record.epc_rating,
        features: FeatureSnapshot {
            parking: record.parking,
            garden: record.garden,
            solar_panels: record.solar_panels,
            new_build: record.new_build,
        },
    }
}

fn known_value(record: &PropertyRecord) -> Option<Decimal> {
    record.estimated_value.filter(|v| !v.is_zero())
}

fn known_size(record: &PropertyRecord) -> Option<u32> {
    record.size_sqft.filter(|s| *s > 0)
}

fn comparison_metrics(records: &[PropertyRecord]) -> ComparisonMetrics {
    let values: Vec<Decimal> = records.iter().filter_map(known_value).collect();
    let sizes: Vec<u32> = records.iter().filter_map(known_size).collect();
    let size_decimals: Vec<Decimal> = sizes.iter().map(|s| Decimal::from(*s)).collect();

    // Paired per property, never across properties
    let price_per_sqft = records
        .iter()
        .filter_map(|record| {
            let value = known_value(record)?;
            let size = known_size(record)?;
            Some(PricePerSqft {
                property_id: record.id,
                price_per_sqft: round_currency(value / Decimal::from(size)),
            })
        })
        .collect();

    ComparisonMetrics {
        value_range: value_range(&values),
        size_range: value_range(&sizes),
        price_per_sqft,
        average_value: mean(&values).map(round_currency),
        average_size: mean(&size_decimals).map(round_currency),
    }
}

fn comparison_insights(records: &[PropertyRecord]) -> Vec<ComparisonInsight> {
    let mut insights = Vec::new();

    let values: Vec<Decimal> = records.iter().filter_map(known_value).collect();
    if let Some(range) = value_range(&values) {
        // An unrepresentable gap is certainly significant
        let gap = range.max.checked_sub(range.min).unwrap_or(Decimal::MAX);
        if gap > Decimal::from(SIGNIFICANT_VALUE_GAP) {
            insights.push(ComparisonInsight::SignificantValueDifference { gap });
        }
    }

    let ratings: BTreeSet<_> = records.iter().filter_map(|r| r.epc_rating).collect();
    if ratings.len() > 1 {
        insights.push(ComparisonInsight::DifferingEpcRatings);
    }

    insights
}
