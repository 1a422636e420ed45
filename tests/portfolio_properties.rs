//! Portfolio-level behavior of the public analysis operations.

use property_portfolio::analysis::{
    analyze_portfolio, compare_portfolio_items, optimize_portfolio, ComparisonInsight,
    OptimizationResult, Recommendation, RiskLevel,
};
use property_portfolio::analysis::aggregate::aggregate;
use property_portfolio::analysis::risk::{has_concentration_risk, has_poor_epc_risk};
use property_portfolio::records::{EpcRating, Feature, PropertyRecord, PropertyType};
use property_portfolio::AnalysisError;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn property(id: i64, property_type: PropertyType, epc: Option<EpcRating>) -> PropertyRecord {
    let mut record = PropertyRecord::new(id, 42, property_type, format!("EH{} 1YZ", id % 4));
    record.epc_rating = epc;
    record
}

#[test]
fn empty_portfolio_is_all_absent() {
    let result = analyze_portfolio(&[]);

    assert_eq!(result.total_properties, 0);
    assert!(result.avg_epc_rating.is_none());
    assert!(result.total_value_estimate.is_none());
    assert!(result.energy_efficiency_score.is_none());
    assert!(result.investment_score.is_none());
    assert_eq!(result.risk_assessment, RiskLevel::Low);
    assert!(result.recommendations.is_empty());
}

#[test]
fn all_a_rated_is_fully_efficient() {
    let records: Vec<PropertyRecord> = (0..10)
        .map(|id| property(id, PropertyType::ALL[id as usize % 5], Some(EpcRating::A)))
        .collect();

    let result = analyze_portfolio(&records);

    assert_eq!(result.energy_efficiency_score, Some(100.0));
    assert_eq!(result.avg_epc_rating, Some(EpcRating::A));
}

#[test]
fn all_g_rated_scores_zero_and_adds_quality_risk() {
    let records: Vec<PropertyRecord> = (0..10)
        .map(|id| property(id, PropertyType::ALL[id as usize % 5], Some(EpcRating::G)))
        .collect();

    let result = analyze_portfolio(&records);

    assert_eq!(result.energy_efficiency_score, Some(0.0));
    assert!(has_poor_epc_risk(&aggregate(&records)));
    assert_eq!(result.risk_assessment, RiskLevel::Medium);
    assert_eq!(
        result.recommendations[0],
        Recommendation::ImproveEpcRatings { count: 10 }
    );
}

#[test]
fn eighty_percent_flats_is_concentrated() {
    let mut records: Vec<PropertyRecord> = (0..8)
        .map(|id| property(id, PropertyType::Flat, Some(EpcRating::C)))
        .collect();
    records.extend((8..10).map(|id| property(id, PropertyType::House, Some(EpcRating::C))));

    let result = analyze_portfolio(&records);

    assert!(has_concentration_risk(&aggregate(&records)));
    assert!(result
        .recommendations
        .contains(&Recommendation::ReduceTypeConcentration));
}

#[test]
fn unsized_property_contributes_nothing_to_valuation() {
    let mut sized = property(1, PropertyType::House, None);
    sized.size_sqft = Some(1000);
    let unsized_record = property(2, PropertyType::Flat, None);

    let records = vec![sized, unsized_record];
    let agg = aggregate(&records);
    let result = analyze_portfolio(&records);

    assert_eq!(result.total_properties, 2);
    assert_eq!(result.total_value_estimate, Some(Decimal::from(250_000)));
    assert_eq!(agg.valuations, vec![Decimal::from(250_000)]);
    assert!(!result
        .recommendations
        .contains(&Recommendation::AddPropertySizes));
}

#[test]
fn no_sizes_means_absent_value_not_zero() {
    let records = vec![property(1, PropertyType::House, None)];

    let result = analyze_portfolio(&records);

    assert_eq!(result.total_value_estimate, None);
    assert_eq!(
        result.recommendations,
        vec![Recommendation::AddPropertySizes]
    );
}

#[test]
fn comparison_requires_two_properties() {
    let mut only = property(1, PropertyType::House, None);
    only.estimated_value = Some(Decimal::from(100_000));

    let err = compare_portfolio_items(&[only]).unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::InsufficientInput { required: 2, found: 1, .. }
    ));
}

#[test]
fn comparison_flags_large_value_gap() {
    let mut cheap = property(1, PropertyType::Flat, None);
    cheap.estimated_value = Some(Decimal::from(100_000));
    let mut dear = property(2, PropertyType::Detached, None);
    dear.estimated_value = Some(Decimal::from(250_000));

    let result = compare_portfolio_items(&[cheap, dear]).unwrap();

    assert!(result
        .insights
        .iter()
        .any(|i| matches!(i, ComparisonInsight::SignificantValueDifference { .. })));
    assert!(result
        .insights
        .iter()
        .any(|i| i.to_string().starts_with("Significant value difference")));
}

#[test]
fn optimization_of_empty_portfolio_is_no_data() {
    assert!(matches!(
        optimize_portfolio(&[]),
        OptimizationResult::NoData { .. }
    ));
}

#[test]
fn analysis_serializes_as_api_shape() {
    let mut record = property(1, PropertyType::Flat, Some(EpcRating::F));
    record.size_sqft = Some(500);

    let json = serde_json::to_value(analyze_portfolio(&[record])).unwrap();

    assert_eq!(json["total_properties"], 1);
    assert_eq!(json["avg_epc_rating"], "F");
    assert_eq!(json["risk_assessment"], "High");
    assert_eq!(
        json["recommendations"][0],
        "Consider improving EPC ratings for 1 properties"
    );
    assert_eq!(
        json["recommendations"][1],
        "Diversify property types to reduce concentration risk"
    );
}

fn arb_feature() -> impl Strategy<Value = Feature> {
    prop_oneof![Just(Feature::Yes), Just(Feature::No), Just(Feature::Unknown)]
}

fn arb_epc() -> impl Strategy<Value = Option<EpcRating>> {
    prop_oneof![
        Just(None),
        Just(Some(EpcRating::A)),
        Just(Some(EpcRating::B)),
        Just(Some(EpcRating::C)),
        Just(Some(EpcRating::D)),
        Just(Some(EpcRating::E)),
        Just(Some(EpcRating::F)),
        Just(Some(EpcRating::G)),
    ]
}

fn arb_record() -> impl Strategy<Value = PropertyRecord> {
    (
        0usize..5,
        arb_epc(),
        proptest::option::of(0u32..5_000),
        (arb_feature(), arb_feature(), arb_feature(), arb_feature()),
        0u8..6,
    )
        .prop_map(|(type_idx, epc, size, features, postcode)| {
            let mut record =
                PropertyRecord::new(0, 1, PropertyType::ALL[type_idx], format!("P{}", postcode));
            record.epc_rating = epc;
            record.size_sqft = size;
            record.solar_panels = features.0;
            record.garden = features.1;
            record.parking = features.2;
            record.new_build = features.3;
            record
        })
}

proptest! {
    #[test]
    fn scores_stay_within_bounds(records in proptest::collection::vec(arb_record(), 1..40)) {
        let result = analyze_portfolio(&records);

        let energy = result.energy_efficiency_score.unwrap();
        prop_assert!((0.0..=100.0).contains(&energy));

        let investment = result.investment_score.unwrap();
        prop_assert!(investment <= 100);

        prop_assert_eq!(result.total_properties, records.len());
    }

    #[test]
    fn analysis_is_deterministic(records in proptest::collection::vec(arb_record(), 0..20)) {
        prop_assert_eq!(analyze_portfolio(&records), analyze_portfolio(&records));
    }
}
