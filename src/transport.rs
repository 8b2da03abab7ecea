//! Results link
//!
//! Carries a canonical measurement from the calculator form to the results
//! view as percent-encoded JSON in the `data` query parameter. A link can be
//! bookmarked or edited by hand, so decoding re-checks the record before
//! anything computes on it.

use thiserror::Error;

use crate::models::CanonicalMeasurement;

/// Path of the results view
pub const RESULTS_PATH: &str = "/results";
/// Query parameter holding the encoded record
pub const DATA_PARAM: &str = "data";

// Extremes `normalize` can emit: 3ft 0in to 8ft 11in, and 66-660 lbs
// (which covers the 100-250 cm and 30-300 kg metric form ranges)
const MIN_HEIGHT_CM: f64 = 91.0;
const MAX_HEIGHT_CM: f64 = 272.0;
const MIN_WEIGHT_KG: f64 = 30.0;
const MAX_WEIGHT_KG: f64 = 300.0;
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 100;
const MIN_BODY_FAT: f64 = 3.0;
const MAX_BODY_FAT: f64 = 70.0;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Results link has no data parameter")]
    MissingData,

    #[error("Results link data is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Results link data is not a measurement record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Results link record is not usable: {0}")]
    InvalidRecord(String),
}

/// Build the results link for a canonical measurement
pub fn encode_results_link(measurement: &CanonicalMeasurement) -> Result<String, LinkError> {
    let json = serde_json::to_string(measurement)?;
    Ok(format!(
        "{}?{}={}",
        RESULTS_PATH,
        DATA_PARAM,
        urlencoding::encode(&json)
    ))
}

/// Recover the canonical measurement from a results link
///
/// Accepts the full link (`/results?data=...`, with or without scheme and
/// host), the query string alone (`data=...`), or the bare encoded value.
pub fn decode_results_link(link: &str) -> Result<CanonicalMeasurement, LinkError> {
    let encoded = extract_data_param(link.trim()).ok_or(LinkError::MissingData)?;
    let json = urlencoding::decode(encoded).map_err(|e| LinkError::Encoding(e.to_string()))?;
    let measurement: CanonicalMeasurement = serde_json::from_str(&json)?;
    check_record(&measurement)?;

    tracing::debug!(
        unit_system = measurement.unit_system.as_str(),
        "Decoded results link"
    );
    Ok(measurement)
}

fn extract_data_param(link: &str) -> Option<&str> {
    let (has_query, query) = match link.split_once('?') {
        Some((_, query)) => (true, query),
        None => (false, link),
    };
    // Fragments never reach the server side of a link
    let query = query.split('#').next().unwrap_or(query);

    let param = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == DATA_PARAM).then_some(value)
    });

    let value = match param {
        Some(value) => value,
        // Percent-encoding escapes these, so a bare value has none of them
        None if !has_query && !query.contains(['=', '&', '/']) => query,
        None => return None,
    };

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Reject records no form submission could have produced
///
/// Height and weight are held to the span of normalized values, which is
/// wider than the metric form ranges because imperial heights convert to
/// 91-272 cm.
fn check_record(m: &CanonicalMeasurement) -> Result<(), LinkError> {
    let mut problems = Vec::new();

    // NaN fails the range check too
    if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&m.height_cm) {
        problems.push(format!(
            "heightCm must be between {} and {}, got {}",
            MIN_HEIGHT_CM, MAX_HEIGHT_CM, m.height_cm
        ));
    }
    if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&m.weight_kg) {
        problems.push(format!(
            "weightKg must be between {} and {}, got {}",
            MIN_WEIGHT_KG, MAX_WEIGHT_KG, m.weight_kg
        ));
    }
    if !(MIN_AGE..=MAX_AGE).contains(&m.age_years) {
        problems.push(format!(
            "age must be between {} and {}, got {}",
            MIN_AGE, MAX_AGE, m.age_years
        ));
    }
    if let Some(body_fat) = m.body_fat_percentage {
        if !(MIN_BODY_FAT..=MAX_BODY_FAT).contains(&body_fat) {
            problems.push(format!(
                "bodyFatPercentage must be between {} and {}, got {}",
                MIN_BODY_FAT, MAX_BODY_FAT, body_fat
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(LinkError::InvalidRecord(problems.join("; ")))
    }
}
