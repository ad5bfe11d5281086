//! Wire-format records and the validation gate that decides which of
//! them are renderable at all.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// One asteroid entry as returned by the feed endpoint. Untrusted:
/// the numeric sanity fields are optional so that a missing value is
/// representable and can be rejected per-record instead of failing
/// the whole batch.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hazardous: bool,
    pub pair_risk_score: f64,
    pub pair_components: PairComponents,
    #[serde(default)]
    pub miss_distance_km: Option<f64>,
    #[serde(default)]
    pub diameter_m: Option<f64>,
    #[serde(default)]
    pub velocity_kph: Option<f64>,
}

/// Sub-components of the PAIR risk score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct PairComponents {
    pub impact_probability: f64,
    pub impact_severity: f64,
}

/// Record that passed the numeric sanity checks. Invariant:
/// `miss_distance_km` and `diameter_m` are finite and strictly
/// positive. Immutable; rebuilt from scratch on every fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedRecord {
    pub name: String,
    pub date: Option<String>,
    pub hazardous: bool,
    pub pair_risk_score: f64,
    pub components: PairComponents,
    pub miss_distance_km: f64,
    pub diameter_m: f64,
    pub diameter_km: f64,
    pub velocity_kph: Option<f64>,
}

/// Why a record was refused. Rejection is never fatal to a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("miss_distance_km is missing")]
    MissingMissDistance,
    #[error("miss_distance_km must be finite and positive")]
    InvalidMissDistance,
    #[error("diameter_m is missing")]
    MissingDiameter,
    #[error("diameter_m must be finite and positive")]
    InvalidDiameter,
}

/// Check a raw record's numeric fields and attach the derived
/// `diameter_km`. The risk score itself is produced and range-checked
/// by the upstream feed service and is deliberately not re-validated
/// here.
pub fn validate(raw: &RawRecord) -> Result<ValidatedRecord, RejectReason> {
    let miss_distance_km = raw
        .miss_distance_km
        .ok_or(RejectReason::MissingMissDistance)?;
    if !miss_distance_km.is_finite() || miss_distance_km <= 0.0 {
        return Err(RejectReason::InvalidMissDistance);
    }

    let diameter_m = raw.diameter_m.ok_or(RejectReason::MissingDiameter)?;
    if !diameter_m.is_finite() || diameter_m <= 0.0 {
        return Err(RejectReason::InvalidDiameter);
    }

    Ok(ValidatedRecord {
        name: raw.name.clone(),
        date: raw.date.clone(),
        hazardous: raw.hazardous,
        pair_risk_score: raw.pair_risk_score,
        components: raw.pair_components,
        miss_distance_km,
        diameter_m,
        diameter_km: diameter_m / 1000.0,
        velocity_kph: raw.velocity_kph,
    })
}

/// Validate a whole fetch result, dropping rejects while preserving
/// the relative order of the survivors.
pub fn validate_batch(raw: impl IntoIterator<Item = RawRecord>) -> Vec<ValidatedRecord> {
    raw.into_iter()
        .filter_map(|record| match validate(&record) {
            Ok(valid) => Some(valid),
            Err(reason) => {
                debug!(name = %record.name, %reason, "dropping malformed record");
                None
            }
        })
        .collect()
}
