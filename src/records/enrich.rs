//! Enrichment functions - add matched region data to property records

use crate::records::types::PropertyRecord;
use crate::records::utils::normalize_postcode;
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Postcode lookup CSV row
#[derive(Debug, Deserialize)]
struct DatazoneRow {
    #[serde(rename = "Postcode")]
    postcode: String,

    #[serde(rename = "DataZone2011Code")]
    datazone: String,
}

/// Normalized postcode -> datazone code
#[derive(Debug, Clone, Default)]
pub struct DatazoneLookup {
    zones: HashMap<String, String>,
}

impl DatazoneLookup {
    pub fn from_pairs<I, P, Z>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, Z)>,
        P: AsRef<str>,
        Z: Into<String>,
    {
        let mut zones = HashMap::new();
        for (postcode, zone) in pairs {
            // First entry wins, matching a first-row lookup
            zones
                .entry(normalize_postcode(postcode.as_ref()))
                .or_insert_with(|| zone.into());
        }
        DatazoneLookup { zones }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for result in csv_reader.deserialize::<DatazoneRow>() {
            let row = result?;
            if row.datazone.trim().is_empty() {
                continue;
            }
            pairs.push((row.postcode, row.datazone.trim().to_string()));
        }

        Ok(Self::from_pairs(pairs))
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        info!("Loading postcode to datazone lookup from {:?}", path);
        let file = std::fs::File::open(path)?;
        let lookup = Self::from_reader(file)?;
        info!("Loaded {} postcode mappings", lookup.len());
        Ok(lookup)
    }

    pub fn lookup(&self, postcode: &str) -> Option<&str> {
        self.zones
            .get(&normalize_postcode(postcode))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Attach the datazone for the record's postcode
/// Pure function - no side effects
pub fn assign_datazone(record: PropertyRecord, lookup: &DatazoneLookup) -> PropertyRecord {
    if record.datazone.is_some() {
        return record; // Already enriched
    }

    match lookup.lookup(&record.postcode) {
        Some(zone) => {
            debug!(
                "Matched datazone {} for {} (postcode: {})",
                zone,
                record.address(),
                record.postcode
            );
            PropertyRecord {
                datazone: Some(zone.to_string()),
                ..record
            }
        }
        None => {
            debug!(
                "No datazone found for {} (postcode: {})",
                record.address(),
                record.postcode
            );
            record
        }
    }
}

/// Run enrichment over every record
pub fn enrich_all(records: Vec<PropertyRecord>, lookup: &DatazoneLookup) -> Vec<PropertyRecord> {
    info!("Enriching {} records", records.len());

    let enriched: Vec<PropertyRecord> = records
        .into_iter()
        .map(|record| assign_datazone(record, lookup))
        .collect();

    let matched = enriched.iter().filter(|r| r.datazone.is_some()).count();
    info!(
        "Enrichment complete: {} of {} records have a datazone",
        matched,
        enriched.len()
    );

    enriched
}
