//! RiskAssessor - discrete risk levels from concentration and quality heuristics
//!
//! Two scales exist and are kept apart on purpose:
//!
//! * the base scale used by [`crate::analysis::analyze_portfolio`] scores two
//!   factors (type concentration, poor EPC share): 0 Low, 1 Medium, 2 High;
//! * the extended scale used by portfolio optimization adds a geographic
//!   factor, clamps the score to 0..=5 and labels 0-1 Low, 2 Medium, 3+ High.
//!
//! The same portfolio can therefore be Medium on one scale and Low on the
//! other (concentration alone).

use crate::analysis::aggregate::Aggregates;
use crate::analysis::types::{ExtendedRiskAnalysis, RiskFactor, RiskLevel};
use tracing::debug;

/// Most common type above this share of the portfolio
pub const CONCENTRATION_THRESHOLD: f64 = 0.7;
/// E-G ratings above this share of the portfolio
pub const POOR_EPC_THRESHOLD: f64 = 0.3;
/// At most this many distinct postcodes
pub const GEOGRAPHIC_MAX_LOCATIONS: usize = 2;

pub const EXTENDED_MAX_SCORE: u8 = 5;

pub fn has_concentration_risk(agg: &Aggregates) -> bool {
    agg.max_type_share() > CONCENTRATION_THRESHOLD
}

pub fn has_poor_epc_risk(agg: &Aggregates) -> bool {
    agg.poor_epc_share() > POOR_EPC_THRESHOLD
}

pub fn has_geographic_risk(agg: &Aggregates) -> bool {
    agg.stats.locations <= GEOGRAPHIC_MAX_LOCATIONS
}

/// Two-factor assessment behind the headline analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRiskAssessment {
    pub factors: Vec<RiskFactor>,
    pub score: u8,
    pub level: RiskLevel,
}

pub fn assess_base_risk(agg: &Aggregates) -> BaseRiskAssessment {
    let mut factors = Vec::new();

    if has_concentration_risk(agg) {
        factors.push(RiskFactor::TypeConcentration);
    }
    if has_poor_epc_risk(agg) {
        factors.push(RiskFactor::PoorEpcQuality);
    }

    let score = factors.len() as u8;
    let level = base_level(score);

    debug!("Base risk score {} ({}): {:?}", score, level, factors);

    BaseRiskAssessment {
        factors,
        score,
        level,
    }
}

fn base_level(score: u8) -> RiskLevel {
    match score {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

/// Three-factor assessment used by portfolio optimization
pub fn assess_extended_risk(agg: &Aggregates) -> ExtendedRiskAnalysis {
    let mut risk_factors = Vec::new();

    if has_concentration_risk(agg) {
        risk_factors.push(RiskFactor::TypeConcentration);
    }
    if has_geographic_risk(agg) {
        risk_factors.push(RiskFactor::LimitedGeography);
    }
    if has_poor_epc_risk(agg) {
        risk_factors.push(RiskFactor::PoorEpcQuality);
    }

    let risk_score = (risk_factors.len() as u8).min(EXTENDED_MAX_SCORE);
    let risk_level = extended_level(risk_score);

    debug!(
        "Extended risk score {} ({}): {:?}",
        risk_score, risk_level, risk_factors
    );

    ExtendedRiskAnalysis {
        risk_factors,
        risk_score,
        risk_level,
    }
}

fn extended_level(score: u8) -> RiskLevel {
    match score {
        0 | 1 => RiskLevel::Low,
        2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}
