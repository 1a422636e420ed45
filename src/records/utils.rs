//! Utility functions for normalizing free-text record fields

use crate::records::types::{EpcRating, Feature, PropertyType};

/// Parse property type from the free-text form value
pub fn parse_property_type(text: &str) -> Option<PropertyType> {
    let lower = text.trim().to_lowercase();

    match lower.as_str() {
        "house" => Some(PropertyType::House),
        "detached" => Some(PropertyType::Detached),
        "semi-detached" | "semi detached" | "semi_detached" | "semidetached" => {
            Some(PropertyType::SemiDetached)
        }
        "flat" => Some(PropertyType::Flat),
        "bungalow" => Some(PropertyType::Bungalow),
        _ => None,
    }
}

/// Parse a bare EPC letter; anything else, annotated grades included, is unknown
pub fn parse_epc_rating(text: &str) -> Option<EpcRating> {
    let trimmed = text.trim();
    if trimmed.chars().count() != 1 {
        return None;
    }

    match trimmed.to_ascii_uppercase().as_str() {
        "A" => Some(EpcRating::A),
        "B" => Some(EpcRating::B),
        "C" => Some(EpcRating::C),
        "D" => Some(EpcRating::D),
        "E" => Some(EpcRating::E),
        "F" => Some(EpcRating::F),
        "G" => Some(EpcRating::G),
        _ => None,
    }
}

/// Parse a Yes/No answer
pub fn parse_feature(text: Option<&str>) -> Feature {
    match text.map(|t| t.trim().to_lowercase()) {
        Some(t) if t == "yes" => Feature::Yes,
        Some(t) if t == "no" => Feature::No,
        _ => Feature::Unknown,
    }
}

/// Normalize a postcode for lookups: uppercase with all whitespace removed
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Format address from components
pub fn format_address(house_number: &str, street_name: &str) -> String {
    let mut parts = Vec::new();

    if !house_number.trim().is_empty() {
        parts.push(house_number.trim());
    }

    if !street_name.trim().is_empty() {
        parts.push(street_name.trim());
    }

    parts.join(" ")
}
