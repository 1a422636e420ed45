//! Parse functions - transform exported property rows into PropertyRecord structs

use crate::records::types::{PropertyRecord, PropertyRow};
use crate::records::utils::{parse_epc_rating, parse_feature, parse_property_type};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Only the first few row failures are logged
const MAX_LOGGED_ERRORS: usize = 10;

/// Parse a property CSV export into PropertyRecord structs
pub fn parse_properties_csv(path: &Path) -> Result<Vec<PropertyRecord>> {
    info!("Parsing property CSV from {:?}", path);

    let file =
        File::open(path).with_context(|| format!("Failed to open property CSV {:?}", path))?;
    let (records, skipped_lines) = read_property_rows(property_reader(file))?;

    info!(
        "Parsed {} records from property CSV ({} errors)",
        records.len(),
        skipped_lines.len()
    );

    Ok(records)
}

fn property_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

/// Convert every data row; failed rows are reported by their line in the file
fn read_property_rows<R: Read>(
    mut reader: csv::Reader<R>,
) -> Result<(Vec<PropertyRecord>, Vec<u64>)> {
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped_lines = Vec::new();

    for result in reader.records() {
        let (line, converted) = match result {
            Ok(row) => (
                row.position().map_or(0, |pos| pos.line()),
                row.deserialize::<PropertyRow>(Some(&headers))
                    .map_err(anyhow::Error::from)
                    .and_then(parse_property_row),
            ),
            Err(e) => (
                e.position().map_or(0, |pos| pos.line()),
                Err(anyhow::Error::from(e)),
            ),
        };

        match converted {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped_lines.push(line);
                if skipped_lines.len() <= MAX_LOGGED_ERRORS {
                    warn!("Failed to parse line {}: {}", line, e);
                }
            }
        }
    }

    Ok((records, skipped_lines))
}

/// Parse a JSON array of property rows (the API's response shape)
pub fn parse_properties_json(bytes: &[u8]) -> Result<Vec<PropertyRecord>> {
    let rows: Vec<PropertyRow> = serde_json::from_slice(bytes)?;
    info!("Parsing {} property rows from JSON", rows.len());

    let mut records = Vec::with_capacity(rows.len());
    let mut parse_errors = 0;

    for (idx, row) in rows.into_iter().enumerate() {
        match parse_property_row(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                parse_errors += 1;
                if parse_errors <= MAX_LOGGED_ERRORS {
                    warn!("Failed to parse entry {}: {}", idx + 1, e);
                }
            }
        }
    }

    info!(
        "Parsed {} records from JSON ({} errors)",
        records.len(),
        parse_errors
    );

    Ok(records)
}

/// Convert a wire row into a typed record
pub fn parse_property_row(row: PropertyRow) -> Result<PropertyRecord> {
    let property_type = parse_property_type(&row.property_type).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown property type '{}' for property {}",
            row.property_type,
            row.id
        )
    })?;

    let epc_rating = row.epc_rating.as_deref().and_then(parse_epc_rating);

    let council_tax_band = row
        .council_tax_band
        .map(|band| band.trim().to_string())
        .filter(|band| !band.is_empty());

    let datazone = row
        .datazone
        .map(|dz| dz.trim().to_string())
        .filter(|dz| !dz.is_empty());

    Ok(PropertyRecord {
        id: row.id,
        user_id: row.user_id,
        house_number: row.house_number,
        street_name: row.street_name,
        postcode: row.postcode,
        datazone,
        property_type,
        bedrooms: row.bedrooms,
        bathrooms: row.bathrooms,
        size_sqft: row.size_sqft,
        floor_number: row.floor_number,
        epc_rating,
        council_tax_band,
        solar_panels: parse_feature(row.solar_panels.as_deref()),
        garden: parse_feature(row.garden.as_deref()),
        parking: parse_feature(row.parking.as_deref()),
        new_build: parse_feature(row.new_build.as_deref()),
        purchase_price: row.purchase_price,
        estimated_value: row.estimated_value,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Snapshot of a single user's portfolio
pub fn filter_by_owner(records: &[PropertyRecord], user_id: i64) -> Vec<PropertyRecord> {
    records
        .iter()
        .filter(|record| record.user_id == user_id)
        .cloned()
        .collect()
}
