//! Market analysis and descriptive property statistics

use crate::analysis::aggregate::aggregate;
use crate::analysis::recommend::market_recommendations;
use crate::analysis::types::{
    GrowthPotential, InvestmentMetrics, MarketAnalysis, PriceAnalysis, PropertyStatistics,
    SummaryStatistics, TypeTrend,
};
use crate::analysis::utils::{
    checked_sum, describe, mean, median, round_currency, summarize, value_range,
};
use crate::records::types::{PropertyRecord, PropertyType};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Gross yield assumed when no rent data exists, in percent
pub const ASSUMED_GROSS_YIELD_PCT: i64 = 5;

/// Descriptive statistics; absent for an empty portfolio
pub fn portfolio_statistics(records: &[PropertyRecord]) -> Option<PropertyStatistics> {
    if records.is_empty() {
        return None;
    }

    let agg = aggregate(records);
    let sizes: Vec<Decimal> = agg.sizes.iter().map(|s| Decimal::from(*s)).collect();

    Some(PropertyStatistics {
        value_statistics: summarize(&agg.valuations),
        size_statistics: summarize(&sizes),
        feature_counts: agg.feature_counts,
        total_properties: agg.total_properties,
    })
}

/// Keep records whose postcode contains `filter`, ignoring case
pub fn filter_by_location<'a>(
    records: &'a [PropertyRecord],
    filter: Option<&str>,
) -> Vec<&'a PropertyRecord> {
    match filter.map(|f| f.trim().to_uppercase()) {
        Some(needle) if !needle.is_empty() => records
            .iter()
            .filter(|r| r.postcode.to_uppercase().contains(&needle))
            .collect(),
        _ => records.iter().collect(),
    }
}

/// Trends, price patterns and investment metrics over supplied values
pub fn market_analysis(
    records: &[PropertyRecord],
    location_filter: Option<&str>,
) -> MarketAnalysis {
    let selected: Vec<PropertyRecord> = filter_by_location(records, location_filter)
        .into_iter()
        .cloned()
        .collect();

    info!(
        "Market analysis over {} of {} properties (filter: {:?})",
        selected.len(),
        records.len(),
        location_filter
    );

    if selected.is_empty() {
        return MarketAnalysis::default();
    }

    let agg = aggregate(&selected);

    let analysis = MarketAnalysis {
        market_trends: market_trends(&selected),
        price_analysis: price_analysis(&selected),
        investment_metrics: investment_metrics(&agg.estimated_values, &agg.purchase_prices),
        recommendations: market_recommendations(&agg),
    };

    debug!(
        "Market analysis: {} type trends, price analysis {}, investment metrics {}",
        analysis.market_trends.len(),
        analysis.price_analysis.is_some(),
        analysis.investment_metrics.is_some()
    );

    analysis
}

fn supplied_value(record: &PropertyRecord) -> Option<Decimal> {
    record.estimated_value.filter(|v| !v.is_zero())
}

fn market_trends(records: &[PropertyRecord]) -> BTreeMap<PropertyType, TypeTrend> {
    let mut by_type: BTreeMap<PropertyType, Vec<Decimal>> = BTreeMap::new();
    for record in records {
        if let Some(value) = supplied_value(record) {
            by_type.entry(record.property_type).or_default().push(value);
        }
    }

    by_type
        .into_iter()
        .filter_map(|(property_type, values)| {
            let trend = TypeTrend {
                average_value: round_currency(mean(&values)?),
                median_value: round_currency(median(&values)?),
                value_range: value_range(&values)?,
                growth_potential: GrowthPotential::for_type(property_type),
            };
            Some((property_type, trend))
        })
        .collect()
}

fn price_analysis(records: &[PropertyRecord]) -> Option<PriceAnalysis> {
    let values: Vec<Decimal> = records.iter().filter_map(supplied_value).collect();
    let value_statistics = describe(&values)?;

    let price_per_sqft: Vec<Decimal> = records
        .iter()
        .filter_map(|record| {
            let value = supplied_value(record)?;
            let size = record.size_sqft.filter(|s| *s > 0)?;
            Some(value / Decimal::from(size))
        })
        .collect();

    Some(PriceAnalysis {
        value_statistics,
        price_per_sqft: summarize(&price_per_sqft).map(|stats| {
            // Per-sqft extremes are reported to the penny as well
            SummaryStatistics {
                min: round_currency(stats.min),
                max: round_currency(stats.max),
                ..stats
            }
        }),
    })
}

/// Requires purchase prices; absent when none were supplied or the totals overflow
pub fn investment_metrics(
    values: &[Decimal],
    purchase_prices: &[Decimal],
) -> Option<InvestmentMetrics> {
    let total_investment = checked_sum(purchase_prices)?;
    if total_investment.is_zero() {
        return None;
    }

    let hundred = Decimal::from(100);
    let current_value = checked_sum(values)?;
    let total_return = current_value.checked_sub(total_investment)?;
    let roi_percentage = total_return
        .checked_div(total_investment)?
        .checked_mul(hundred)?;

    let estimated_rental_yield = if current_value > Decimal::ZERO {
        let annual_rent = current_value
            .checked_mul(Decimal::from(ASSUMED_GROSS_YIELD_PCT))?
            .checked_div(hundred)?;
        annual_rent.checked_div(current_value)?.checked_mul(hundred)?
    } else {
        Decimal::ZERO
    };

    Some(InvestmentMetrics {
        total_investment,
        current_value,
        total_return,
        roi_percentage: round_currency(roi_percentage),
        estimated_rental_yield: round_currency(estimated_rental_yield),
        portfolio_growth: roi_percentage > Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::types::{EpcRating, Feature};

    fn record(id: i64, property_type: PropertyType, postcode: &str) -> PropertyRecord {
        PropertyRecord::new(id, 1, property_type, postcode)
    }

    #[test]
    fn test_statistics_empty() {
        assert!(portfolio_statistics(&[]).is_none());
    }

    #[test]
    fn test_statistics() {
        let mut a = record(1, PropertyType::House, "A1");
        a.size_sqft = Some(1_000);
        a.parking = Feature::Yes;
        let mut b = record(2, PropertyType::Flat, "A1");
        b.size_sqft = Some(600);
        b.garden = Feature::Yes;
        let c = record(3, PropertyType::Flat, "A1");

        let stats = portfolio_statistics(&[a, b, c]).unwrap();

        assert_eq!(stats.total_properties, 3);
        let values = stats.value_statistics.unwrap();
        assert_eq!(values.min, Decimal::from(150_000));
        assert_eq!(values.max, Decimal::from(250_000));
        assert_eq!(values.median, Decimal::from(200_000));
        assert_eq!(values.mean, Decimal::from(200_000));

        let sizes = stats.size_statistics.unwrap();
        assert_eq!(sizes.median, Decimal::from(800));
        assert_eq!(stats.feature_counts.parking, 1);
        assert_eq!(stats.feature_counts.garden, 1);
    }

    #[test]
    fn test_statistics_without_sizes() {
        let stats = portfolio_statistics(&[record(1, PropertyType::House, "A1")]).unwrap();

        assert!(stats.value_statistics.is_none());
        assert!(stats.size_statistics.is_none());
    }

    #[test]
    fn test_location_filter_ignores_case() {
        let records = vec![
            record(1, PropertyType::House, "EH1 1YZ"),
            record(2, PropertyType::Flat, "G2 4XX"),
        ];

        let selected = filter_by_location(&records, Some("eh1"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 1);

        assert_eq!(filter_by_location(&records, None).len(), 2);
        assert_eq!(filter_by_location(&records, Some("  ")).len(), 2);
    }

    #[test]
    fn test_market_analysis_empty_after_filter() {
        let records = vec![record(1, PropertyType::House, "EH1 1YZ")];

        let analysis = market_analysis(&records, Some("ZZ"));

        assert_eq!(analysis, MarketAnalysis::default());
    }

    #[test]
    fn test_market_trends_and_prices() {
        let mut a = record(1, PropertyType::House, "EH1 1YZ");
        a.estimated_value = Some(Decimal::from(300_000));
        a.size_sqft = Some(1_200);
        let mut b = record(2, PropertyType::House, "EH2 2AB");
        b.estimated_value = Some(Decimal::from(400_000));
        let mut c = record(3, PropertyType::Flat, "G2 4XX");
        c.estimated_value = Some(Decimal::from(200_000));
        c.size_sqft = Some(800);

        let analysis = market_analysis(&[a, b, c], None);

        let house = &analysis.market_trends[&PropertyType::House];
        assert_eq!(house.average_value, Decimal::from(350_000));
        assert_eq!(house.growth_potential, GrowthPotential::High);
        assert_eq!(
            analysis.market_trends[&PropertyType::Flat].growth_potential,
            GrowthPotential::Medium
        );

        let prices = analysis.price_analysis.unwrap();
        assert_eq!(prices.value_statistics.mean, Decimal::from(300_000));
        assert_eq!(prices.value_statistics.std_dev, Decimal::from(100_000));

        let per_sqft = prices.price_per_sqft.unwrap();
        assert_eq!(per_sqft.min, Decimal::from(250));
        assert_eq!(per_sqft.max, Decimal::from(250));

        assert!(analysis.investment_metrics.is_none());
    }

    #[test]
    fn test_investment_metrics() {
        let values = vec![Decimal::from(330_000)];
        let prices = vec![Decimal::from(300_000)];

        let metrics = investment_metrics(&values, &prices).unwrap();

        assert_eq!(metrics.total_return, Decimal::from(30_000));
        assert_eq!(metrics.roi_percentage, Decimal::from(10));
        assert_eq!(metrics.estimated_rental_yield, Decimal::from(5));
        assert!(metrics.portfolio_growth);
    }

    #[test]
    fn test_wide_value_spread_does_not_panic() {
        let mut a = record(1, PropertyType::House, "EH1 1YZ");
        a.estimated_value = Some(Decimal::from(1_000_000_000_000_000_i64));
        let mut b = record(2, PropertyType::House, "EH2 2AB");
        b.estimated_value = Some(Decimal::ONE);

        let analysis = market_analysis(&[a, b], None);

        // Spread too wide for a standard deviation
        assert!(analysis.price_analysis.is_none());
        assert_eq!(
            analysis.market_trends[&PropertyType::House].value_range.max,
            Decimal::from(1_000_000_000_000_000_i64)
        );
    }

    #[test]
    fn test_investment_metrics_overflow_is_absent() {
        let values = vec![Decimal::MAX, Decimal::MAX];
        let prices = vec![Decimal::from(100_000)];

        assert!(investment_metrics(&values, &prices).is_none());
        assert!(investment_metrics(&prices, &values).is_none());
    }

    #[test]
    fn test_investment_metrics_need_purchase_prices() {
        assert!(investment_metrics(&[Decimal::from(100_000)], &[]).is_none());
    }

    #[test]
    fn test_market_recommendations_included() {
        let mut a = record(1, PropertyType::Flat, "A1");
        a.epc_rating = Some(EpcRating::G);

        let analysis = market_analysis(&[a], None);

        // Single type, poor EPC, single postcode
        assert_eq!(analysis.recommendations.len(), 3);
    }
}
