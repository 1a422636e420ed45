//! Core data types for property records
//! Pure data structures with no behavior beyond formatting

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Property types accepted by the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    House,
    Detached,
    SemiDetached,
    Flat,
    Bungalow,
}

impl PropertyType {
    /// Every property type, in display order
    pub const ALL: [PropertyType; 5] = [
        PropertyType::House,
        PropertyType::Detached,
        PropertyType::SemiDetached,
        PropertyType::Flat,
        PropertyType::Bungalow,
    ];
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::House => write!(f, "house"),
            PropertyType::Detached => write!(f, "detached"),
            PropertyType::SemiDetached => write!(f, "semi-detached"),
            PropertyType::Flat => write!(f, "flat"),
            PropertyType::Bungalow => write!(f, "bungalow"),
        }
    }
}

/// Energy performance grade, A (best) to G (worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EpcRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Ordinal scale used for averaging: A=7 down to G=1
const EPC_SCALE: [(EpcRating, u8); 7] = [
    (EpcRating::A, 7),
    (EpcRating::B, 6),
    (EpcRating::C, 5),
    (EpcRating::D, 4),
    (EpcRating::E, 3),
    (EpcRating::F, 2),
    (EpcRating::G, 1),
];

impl EpcRating {
    pub fn ordinal(&self) -> u8 {
        EPC_SCALE
            .iter()
            .find(|(rating, _)| rating == self)
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }

    pub fn from_ordinal(value: u8) -> Option<EpcRating> {
        EPC_SCALE
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(rating, _)| *rating)
    }

    /// A, B or C
    pub fn is_efficient(&self) -> bool {
        matches!(self, EpcRating::A | EpcRating::B | EpcRating::C)
    }

    /// E, F or G
    pub fn is_poor(&self) -> bool {
        matches!(self, EpcRating::E | EpcRating::F | EpcRating::G)
    }
}

impl std::fmt::Display for EpcRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            EpcRating::A => "A",
            EpcRating::B => "B",
            EpcRating::C => "C",
            EpcRating::D => "D",
            EpcRating::E => "E",
            EpcRating::F => "F",
            EpcRating::G => "G",
        };
        write!(f, "{}", letter)
    }
}

/// Yes/No answer to a feature question, or Unknown when never answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feature {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Feature {
    pub fn is_yes(&self) -> bool {
        matches!(self, Feature::Yes)
    }

    pub fn is_no(&self) -> bool {
        matches!(self, Feature::No)
    }
}

/// Property record - read-only input to the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    // Identification
    pub id: i64,
    pub user_id: i64,

    // Address
    pub house_number: String,
    pub street_name: String,
    pub postcode: String,
    pub datazone: Option<String>,

    // Property details
    pub property_type: PropertyType,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub size_sqft: Option<u32>,
    pub floor_number: Option<i32>,
    pub epc_rating: Option<EpcRating>,
    pub council_tax_band: Option<String>,

    // Features
    pub solar_panels: Feature,
    pub garden: Feature,
    pub parking: Feature,
    pub new_build: Feature,

    // Financial data, only when the caller supplies it
    pub purchase_price: Option<Decimal>,
    pub estimated_value: Option<Decimal>,

    // Timestamps
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyRecord {
    /// Record with identity, postcode and type set; every other field unknown
    pub fn new(
        id: i64,
        user_id: i64,
        property_type: PropertyType,
        postcode: impl Into<String>,
    ) -> Self {
        PropertyRecord {
            id,
            user_id,
            house_number: String::new(),
            street_name: String::new(),
            postcode: postcode.into(),
            datazone: None,
            property_type,
            bedrooms: None,
            bathrooms: None,
            size_sqft: None,
            floor_number: None,
            epc_rating: None,
            council_tax_band: None,
            solar_panels: Feature::Unknown,
            garden: Feature::Unknown,
            parking: Feature::Unknown,
            new_build: Feature::Unknown,
            purchase_price: None,
            estimated_value: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn address(&self) -> String {
        crate::records::utils::format_address(&self.house_number, &self.street_name)
    }
}

/// Property row as exchanged with the surrounding API and file exports.
/// Enumerations and tri-states arrive as free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRow {
    pub id: i64,
    pub user_id: i64,
    pub house_number: String,
    pub street_name: String,
    pub postcode: String,
    #[serde(default)]
    pub datazone: Option<String>,
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub size_sqft: Option<u32>,
    #[serde(default)]
    pub floor_number: Option<i32>,
    #[serde(default)]
    pub epc_rating: Option<String>,
    #[serde(default)]
    pub council_tax_band: Option<String>,
    #[serde(default)]
    pub solar_panels: Option<String>,
    #[serde(default)]
    pub garden: Option<String>,
    #[serde(default)]
    pub parking: Option<String>,
    #[serde(default)]
    pub new_build: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub estimated_value: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epc_ordinal_scale() {
        assert_eq!(EpcRating::A.ordinal(), 7);
        assert_eq!(EpcRating::D.ordinal(), 4);
        assert_eq!(EpcRating::G.ordinal(), 1);

        assert_eq!(EpcRating::from_ordinal(5), Some(EpcRating::C));
        assert_eq!(EpcRating::from_ordinal(0), None);
        assert_eq!(EpcRating::from_ordinal(8), None);
    }

    #[test]
    fn test_epc_bands() {
        assert!(EpcRating::C.is_efficient());
        assert!(!EpcRating::D.is_efficient());
        assert!(!EpcRating::D.is_poor());
        assert!(EpcRating::E.is_poor());
    }

    #[test]
    fn test_property_type_wire_names() {
        let json = serde_json::to_string(&PropertyType::SemiDetached).unwrap();
        assert_eq!(json, "\"semi-detached\"");
        assert_eq!(PropertyType::SemiDetached.to_string(), "semi-detached");
    }
}
