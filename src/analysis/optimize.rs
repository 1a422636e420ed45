//! OptimizationEngine - composition gaps, growth suggestions and extended risk

use crate::analysis::aggregate::{aggregate, Aggregates};
use crate::analysis::recommend::{identify_gaps, optimization_suggestions};
use crate::analysis::risk::assess_extended_risk;
use crate::analysis::types::{OptimizationReport, OptimizationResult, PortfolioSummary};
use crate::records::types::PropertyRecord;
use tracing::info;

pub const NO_DATA_MESSAGE: &str = "No properties found for optimization";

/// Empty input is a defined no-data result, not an error
pub fn optimize_portfolio(records: &[PropertyRecord]) -> OptimizationResult {
    if records.is_empty() {
        info!("Optimization requested for an empty portfolio");
        return OptimizationResult::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    }

    let agg = aggregate(records);

    let report = OptimizationReport {
        current_portfolio: summarize_portfolio(&agg),
        identified_gaps: identify_gaps(&agg),
        optimization_suggestions: optimization_suggestions(&agg),
        risk_analysis: assess_extended_risk(&agg),
    };

    info!(
        "Optimization complete: {} gaps, {} suggestions, risk {}",
        report.identified_gaps.len(),
        report.optimization_suggestions.len(),
        report.risk_analysis.risk_level
    );

    OptimizationResult::Report(report)
}

fn summarize_portfolio(agg: &Aggregates) -> PortfolioSummary {
    PortfolioSummary {
        total_properties: agg.total_properties,
        property_types: agg.stats.type_distribution.clone(),
        average_bedrooms: agg.average_bedrooms(),
        locations: agg.stats.locations,
        epc_distribution: agg.stats.epc_distribution.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{PortfolioGap, Recommendation, RiskFactor, RiskLevel};
    use crate::records::types::{EpcRating, PropertyType};

    #[test]
    fn test_empty_portfolio_is_no_data() {
        assert_eq!(
            optimize_portfolio(&[]),
            OptimizationResult::NoData {
                message: NO_DATA_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_small_concentrated_portfolio() {
        let mut records: Vec<PropertyRecord> = (1..=3)
            .map(|id| PropertyRecord::new(id, 1, PropertyType::Flat, "EH1 1YZ"))
            .collect();
        records[0].bedrooms = Some(1);
        records[1].bedrooms = Some(2);
        records[2].bedrooms = Some(2);
        records[2].epc_rating = Some(EpcRating::D);

        let report = match optimize_portfolio(&records) {
            OptimizationResult::Report(report) => report,
            other => panic!("Expected a report, got {:?}", other),
        };

        assert_eq!(report.current_portfolio.total_properties, 3);
        assert_eq!(report.current_portfolio.locations, 1);
        assert_eq!(report.current_portfolio.average_bedrooms, Some(1.67));
        assert_eq!(report.current_portfolio.epc_distribution[&EpcRating::D], 1);

        assert_eq!(report.identified_gaps.len(), 2);
        assert!(matches!(
            &report.identified_gaps[0],
            PortfolioGap::MissingPropertyTypes(types) if types.len() == 4
        ));
        assert_eq!(report.identified_gaps[1], PortfolioGap::LimitedBedroomDiversity);

        assert_eq!(
            report.optimization_suggestions,
            vec![Recommendation::ExpandPortfolio, Recommendation::AddLocations]
        );

        assert_eq!(
            report.risk_analysis.risk_factors,
            vec![RiskFactor::TypeConcentration, RiskFactor::LimitedGeography]
        );
        assert_eq!(report.risk_analysis.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_balanced_portfolio() {
        let records: Vec<PropertyRecord> = PropertyType::ALL
            .iter()
            .enumerate()
            .map(|(idx, t)| {
                let mut record = PropertyRecord::new(idx as i64, 1, *t, format!("P{}", idx));
                record.bedrooms = Some(idx as u32 + 1);
                record.epc_rating = Some(EpcRating::B);
                record
            })
            .collect();

        let report = match optimize_portfolio(&records) {
            OptimizationResult::Report(report) => report,
            other => panic!("Expected a report, got {:?}", other),
        };

        assert!(report.identified_gaps.is_empty());
        assert!(report.optimization_suggestions.is_empty());
        assert_eq!(report.risk_analysis.risk_score, 0);
        assert_eq!(report.risk_analysis.risk_level, RiskLevel::Low);
    }
}
