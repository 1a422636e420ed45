//! Result types produced by the analysis engine
//! Constructed once per call and never mutated afterwards

use crate::analysis::utils::format_currency;
use crate::records::types::{EpcRating, Feature, PropertyType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Discrete portfolio risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Individual risk heuristics that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RiskFactor {
    TypeConcentration,
    PoorEpcQuality,
    LimitedGeography,
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskFactor::TypeConcentration => {
                write!(f, "High concentration in single property type")
            }
            RiskFactor::PoorEpcQuality => write!(f, "High proportion of poor EPC ratings"),
            RiskFactor::LimitedGeography => write!(f, "Limited geographical diversification"),
        }
    }
}

impl From<RiskFactor> for String {
    fn from(factor: RiskFactor) -> Self {
        factor.to_string()
    }
}

/// Suggestion codes; rendered as text on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Recommendation {
    /// Some properties are rated E, F or G
    ImproveEpcRatings { count: usize },
    /// One property type exceeds the concentration threshold
    ReduceTypeConcentration,
    /// No property has a usable size, so nothing could be valued
    AddPropertySizes,
    /// Every property has the same type
    DiversifyPropertyTypes,
    /// Every property shares one postcode
    DiversifyLocations,
    ConsiderSolarPanels,
    ExpandPortfolio,
    AddLocations,
    DiversifyValueBrackets,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::ImproveEpcRatings { count } => {
                write!(f, "Consider improving EPC ratings for {} properties", count)
            }
            Recommendation::ReduceTypeConcentration => {
                write!(f, "Diversify property types to reduce concentration risk")
            }
            Recommendation::AddPropertySizes => {
                write!(f, "Add property sizes to improve value estimates")
            }
            Recommendation::DiversifyPropertyTypes => write!(
                f,
                "Consider diversifying your portfolio with different property types"
            ),
            Recommendation::DiversifyLocations => write!(
                f,
                "Consider geographical diversification across different areas"
            ),
            Recommendation::ConsiderSolarPanels => write!(
                f,
                "Consider solar panel installations to improve sustainability and reduce costs"
            ),
            Recommendation::ExpandPortfolio => write!(
                f,
                "Consider expanding portfolio to 5+ properties for better diversification"
            ),
            Recommendation::AddLocations => write!(
                f,
                "Consider investing in 2-3 additional locations for geographical diversification"
            ),
            Recommendation::DiversifyValueBrackets => write!(
                f,
                "Consider properties in different value brackets for balanced risk"
            ),
        }
    }
}

impl From<Recommendation> for String {
    fn from(recommendation: Recommendation) -> Self {
        recommendation.to_string()
    }
}

/// Gaps in portfolio composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum PortfolioGap {
    MissingPropertyTypes(Vec<PropertyType>),
    LimitedBedroomDiversity,
}

impl std::fmt::Display for PortfolioGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioGap::MissingPropertyTypes(types) => {
                let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
                write!(f, "Missing property types: {}", names.join(", "))
            }
            PortfolioGap::LimitedBedroomDiversity => write!(
                f,
                "Limited bedroom diversity - consider varied property sizes"
            ),
        }
    }
}

impl From<PortfolioGap> for String {
    fn from(gap: PortfolioGap) -> Self {
        gap.to_string()
    }
}

/// Observations from a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ComparisonInsight {
    SignificantValueDifference { gap: Decimal },
    DifferingEpcRatings,
}

impl std::fmt::Display for ComparisonInsight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonInsight::SignificantValueDifference { gap } => {
                write!(f, "Significant value difference: {}", format_currency(*gap))
            }
            ComparisonInsight::DifferingEpcRatings => write!(
                f,
                "Properties have different EPC ratings - consider improvements for lower-rated properties"
            ),
        }
    }
}

impl From<ComparisonInsight> for String {
    fn from(insight: ComparisonInsight) -> Self {
        insight.to_string()
    }
}

/// Scalar distributions over one portfolio snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioStats {
    pub type_distribution: BTreeMap<PropertyType, usize>,
    pub epc_distribution: BTreeMap<EpcRating, usize>,
    /// Distinct non-empty postcodes
    pub locations: usize,
    pub bedroom_distribution: BTreeMap<u32, usize>,
}

/// Headline analysis of a portfolio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_properties: usize,
    pub avg_epc_rating: Option<EpcRating>,
    pub total_value_estimate: Option<Decimal>,
    pub energy_efficiency_score: Option<f64>,
    pub investment_score: Option<u32>,
    pub risk_assessment: RiskLevel,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStatistics {
    pub min: Decimal,
    pub max: Decimal,
    pub median: Decimal,
    pub mean: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueStatistics {
    pub mean: Decimal,
    pub median: Decimal,
    pub std_dev: Decimal,
    pub range: ValueRange<Decimal>,
}

/// Number of properties answering Yes for each feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCounts {
    pub parking: usize,
    pub garden: usize,
    pub solar_panels: usize,
    pub new_build: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyStatistics {
    pub value_statistics: Option<SummaryStatistics>,
    pub size_statistics: Option<SummaryStatistics>,
    pub feature_counts: FeatureCounts,
    pub total_properties: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSnapshot {
    pub parking: Feature,
    pub garden: Feature,
    pub solar_panels: Feature,
    pub new_build: Feature,
}

/// One row of a comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySnapshot {
    pub id: i64,
    pub address: String,
    pub postcode: String,
    pub property_type: PropertyType,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub size_sqft: Option<u32>,
    pub estimated_value: Option<Decimal>,
    pub epc_rating: Option<EpcRating>,
    pub features: FeatureSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePerSqft {
    pub property_id: i64,
    pub price_per_sqft: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub value_range: Option<ValueRange<Decimal>>,
    pub size_range: Option<ValueRange<u32>>,
    pub price_per_sqft: Vec<PricePerSqft>,
    pub average_value: Option<Decimal>,
    pub average_size: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub properties: Vec<PropertySnapshot>,
    pub metrics: ComparisonMetrics,
    pub insights: Vec<ComparisonInsight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_properties: usize,
    pub property_types: BTreeMap<PropertyType, usize>,
    pub average_bedrooms: Option<f64>,
    pub locations: usize,
    pub epc_distribution: BTreeMap<EpcRating, usize>,
}

/// Three-factor risk used by portfolio optimization.
/// Scored on a different scale from [`AnalysisResult::risk_assessment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedRiskAnalysis {
    pub risk_factors: Vec<RiskFactor>,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub current_portfolio: PortfolioSummary,
    pub identified_gaps: Vec<PortfolioGap>,
    pub optimization_suggestions: Vec<Recommendation>,
    pub risk_analysis: ExtendedRiskAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OptimizationResult {
    /// The portfolio is empty
    NoData { message: String },
    Report(OptimizationReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrowthPotential {
    High,
    Medium,
}

impl GrowthPotential {
    pub fn for_type(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::House | PropertyType::Detached => GrowthPotential::High,
            PropertyType::SemiDetached | PropertyType::Flat | PropertyType::Bungalow => {
                GrowthPotential::Medium
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeTrend {
    pub average_value: Decimal,
    pub median_value: Decimal,
    pub value_range: ValueRange<Decimal>,
    pub growth_potential: GrowthPotential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceAnalysis {
    pub value_statistics: ValueStatistics,
    pub price_per_sqft: Option<SummaryStatistics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestmentMetrics {
    pub total_investment: Decimal,
    pub current_value: Decimal,
    pub total_return: Decimal,
    pub roi_percentage: Decimal,
    pub estimated_rental_yield: Decimal,
    pub portfolio_growth: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketAnalysis {
    pub market_trends: BTreeMap<PropertyType, TypeTrend>,
    pub price_analysis: Option<PriceAnalysis>,
    pub investment_metrics: Option<InvestmentMetrics>,
    pub recommendations: Vec<Recommendation>,
}
