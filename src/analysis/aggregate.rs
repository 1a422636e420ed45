//! Aggregator - one pass over the records, collecting everything later stages need
//!
//! Downstream stages (scoring, risk, recommendations) read only from
//! [`Aggregates`]; none of them re-scan the records.

use crate::analysis::types::{FeatureCounts, PortfolioStats};
use crate::analysis::utils::{mean, ratio, share};
use crate::estimate_value;
use crate::records::types::{EpcRating, PropertyRecord, PropertyType};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use tracing::debug;

/// Base statistics and raw samples for one portfolio snapshot
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub total_properties: usize,
    pub stats: PortfolioStats,

    /// EPC ordinals (A=7 .. G=1) of rated properties only
    pub epc_values: Vec<u8>,
    pub efficient_epc_count: usize,
    pub poor_epc_count: usize,

    /// Size-derived valuations, one per property with a usable size
    pub valuations: Vec<Decimal>,
    pub sizes: Vec<u32>,
    pub bedrooms: Vec<u32>,

    /// Caller-supplied values, never derived here
    pub estimated_values: Vec<Decimal>,
    pub purchase_prices: Vec<Decimal>,

    pub feature_counts: FeatureCounts,
    pub solar_absent_count: usize,
}

/// Collect statistics over a portfolio snapshot
/// Pure function - records are only read
pub fn aggregate(records: &[PropertyRecord]) -> Aggregates {
    let mut agg = Aggregates {
        total_properties: records.len(),
        ..Aggregates::default()
    };
    let mut postcodes = HashSet::new();

    for record in records {
        *agg
            .stats
            .type_distribution
            .entry(record.property_type)
            .or_insert(0) += 1;

        if let Some(rating) = record.epc_rating {
            *agg.stats.epc_distribution.entry(rating).or_insert(0) += 1;
            agg.epc_values.push(rating.ordinal());
            if rating.is_efficient() {
                agg.efficient_epc_count += 1;
            }
            if rating.is_poor() {
                agg.poor_epc_count += 1;
            }
        }

        if !record.postcode.is_empty() {
            postcodes.insert(record.postcode.as_str());
        }

        // A zero reading is no measurement at all
        if let Some(size) = record.size_sqft.filter(|s| *s > 0) {
            agg.sizes.push(size);
            if let Some(value) = estimate_value(size) {
                agg.valuations.push(value);
            }
        }

        if let Some(beds) = record.bedrooms.filter(|b| *b > 0) {
            agg.bedrooms.push(beds);
            *agg.stats.bedroom_distribution.entry(beds).or_insert(0) += 1;
        }

        if let Some(value) = record.estimated_value.filter(|v| !v.is_zero()) {
            agg.estimated_values.push(value);
        }
        if let Some(price) = record.purchase_price.filter(|p| !p.is_zero()) {
            agg.purchase_prices.push(price);
        }

        if record.parking.is_yes() {
            agg.feature_counts.parking += 1;
        }
        if record.garden.is_yes() {
            agg.feature_counts.garden += 1;
        }
        if record.solar_panels.is_yes() {
            agg.feature_counts.solar_panels += 1;
        }
        if record.solar_panels.is_no() {
            agg.solar_absent_count += 1;
        }
        if record.new_build.is_yes() {
            agg.feature_counts.new_build += 1;
        }
    }

    agg.stats.locations = postcodes.len();

    debug!(
        "Aggregated {} properties: {} rated, {} sized, {} locations",
        agg.total_properties,
        agg.epc_values.len(),
        agg.sizes.len(),
        agg.stats.locations
    );

    agg
}

impl Aggregates {
    /// Share of the portfolio held by the most common property type
    pub fn max_type_share(&self) -> f64 {
        let max = self
            .stats
            .type_distribution
            .values()
            .copied()
            .max()
            .unwrap_or(0);
        share(max, self.total_properties)
    }

    pub fn poor_epc_share(&self) -> f64 {
        share(self.poor_epc_count, self.total_properties)
    }

    /// Mean EPC ordinal rounded half-to-even back to a letter
    pub fn avg_epc_rating(&self) -> Option<EpcRating> {
        let total: u64 = self.epc_values.iter().map(|v| u64::from(*v)).sum();
        let rounded = ratio(total, self.epc_values.len(), 0)?;
        EpcRating::from_ordinal(rounded.to_u8()?)
    }

    /// Absent, not zero, when no property has a usable size
    pub fn total_value_estimate(&self) -> Option<Decimal> {
        if self.valuations.is_empty() {
            return None;
        }
        Some(self.valuations.iter().sum())
    }

    pub fn average_bedrooms(&self) -> Option<f64> {
        let values: Vec<Decimal> = self.bedrooms.iter().map(|b| Decimal::from(*b)).collect();
        mean(&values)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
            .to_f64()
    }

    /// Types from the fixed enumeration with no property in the portfolio
    pub fn missing_types(&self) -> Vec<PropertyType> {
        PropertyType::ALL
            .iter()
            .filter(|t| !self.stats.type_distribution.contains_key(*t))
            .copied()
            .collect()
    }

    pub fn distinct_bedroom_counts(&self) -> usize {
        self.stats.bedroom_distribution.len()
    }

    pub fn distinct_estimated_values(&self) -> usize {
        let mut values = self.estimated_values.clone();
        values.sort();
        values.dedup();
        values.len()
    }
}
