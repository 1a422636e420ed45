//! Headline portfolio analysis - composes the stages leaf-first
//!
//! Aggregator -> Scorer and RiskAssessor -> RecommendationEngine

use crate::analysis::aggregate::aggregate;
use crate::analysis::recommend::base_recommendations;
use crate::analysis::risk::assess_base_risk;
use crate::analysis::score::score_portfolio;
use crate::analysis::types::{AnalysisResult, RiskLevel};
use crate::records::types::PropertyRecord;
use tracing::info;

/// Analyze one user's portfolio snapshot.
/// Never fails; an empty snapshot yields an all-absent, Low-risk result.
pub fn analyze_portfolio(records: &[PropertyRecord]) -> AnalysisResult {
    if records.is_empty() {
        info!("Analysis requested for an empty portfolio");
        return AnalysisResult {
            total_properties: 0,
            avg_epc_rating: None,
            total_value_estimate: None,
            energy_efficiency_score: None,
            investment_score: None,
            risk_assessment: RiskLevel::Low,
            recommendations: Vec::new(),
        };
    }

    // Step 1: Base statistics
    let agg = aggregate(records);

    // Step 2: Scores and risk, both from the aggregates only
    let scores = score_portfolio(&agg);
    let risk = assess_base_risk(&agg);

    // Step 3: Recommendations
    let recommendations = base_recommendations(&agg);

    let result = AnalysisResult {
        total_properties: agg.total_properties,
        avg_epc_rating: agg.avg_epc_rating(),
        total_value_estimate: agg.total_value_estimate(),
        energy_efficiency_score: scores.energy_efficiency,
        investment_score: scores.investment,
        risk_assessment: risk.level,
        recommendations,
    };

    info!(
        "Analyzed {} properties: risk {}, {} recommendations",
        result.total_properties,
        result.risk_assessment,
        result.recommendations.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::Recommendation;
    use crate::records::types::{EpcRating, Feature, PropertyType};
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_portfolio() {
        let result = analyze_portfolio(&[]);

        assert_eq!(result.total_properties, 0);
        assert_eq!(result.avg_epc_rating, None);
        assert_eq!(result.total_value_estimate, None);
        assert_eq!(result.energy_efficiency_score, None);
        assert_eq!(result.investment_score, None);
        assert_eq!(result.risk_assessment, RiskLevel::Low);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_mixed_portfolio() {
        let mut a = PropertyRecord::new(1, 1, PropertyType::Detached, "EH1 1YZ");
        a.epc_rating = Some(EpcRating::B);
        a.size_sqft = Some(1_000);
        a.solar_panels = Feature::Yes;
        a.garden = Feature::Yes;
        let mut b = PropertyRecord::new(2, 1, PropertyType::Flat, "G2 4XX");
        b.epc_rating = Some(EpcRating::E);
        b.parking = Feature::Yes;
        let c = PropertyRecord::new(3, 1, PropertyType::Bungalow, "G2 4XX");

        let result = analyze_portfolio(&[a, b, c]);

        assert_eq!(result.total_properties, 3);
        // (6 + 3) / 2 = 4.5 -> 4
        assert_eq!(result.avg_epc_rating, Some(EpcRating::D));
        assert_eq!(result.total_value_estimate, Some(Decimal::from(250_000)));
        assert_eq!(result.energy_efficiency_score, Some(33.33));
        // (20 + 15 + 10 + 10) / 3 = 18.33 -> 18
        assert_eq!(result.investment_score, Some(18));
        // 1 of 3 poor ratings is above 30%
        assert_eq!(result.risk_assessment, RiskLevel::Medium);
        assert_eq!(
            result.recommendations,
            vec![Recommendation::ImproveEpcRatings { count: 1 }]
        );
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let records: Vec<PropertyRecord> = (1..=6)
            .map(|id| {
                let mut record = PropertyRecord::new(id, 1, PropertyType::Flat, "A1");
                record.epc_rating = Some(EpcRating::F);
                record
            })
            .collect();

        let first = analyze_portfolio(&records);
        let second = analyze_portfolio(&records);

        assert_eq!(first, second);
        assert_eq!(first.risk_assessment, RiskLevel::High);
    }
}
