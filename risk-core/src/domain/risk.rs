use chrono::{DateTime, Utc};

use crate::{Mmsi, PositionReport, VesselIdentifier};

pub const DEFAULT_RISK_RADIUS_KM: f64 = 1.0;
pub const DEFAULT_MAX_REPORTS: u32 = 400;
pub const DEFAULT_TOP_OFFENDERS_LIMIT: usize = 5;
pub const DEFAULT_FLAGGED_TIMESTAMPS_CAP: usize = 25;

/// Operator-tunable knobs of the proximity risk engine. Passed in at
/// construction, there is no ambient configuration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    /// Distance threshold below which a same-timestamp pair is flagged.
    pub risk_radius_km: f64,
    /// Upper bound on the number of query-vessel reports evaluated.
    pub max_reports: u32,
    /// Number of companions returned in the offender ranking.
    pub top_offenders_limit: usize,
    /// Upper bound on the flagged timestamps returned in a summary. The
    /// encounter total is never capped.
    pub flagged_timestamps_cap: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            risk_radius_km: DEFAULT_RISK_RADIUS_KM,
            max_reports: DEFAULT_MAX_REPORTS,
            top_offenders_limit: DEFAULT_TOP_OFFENDERS_LIMIT,
            flagged_timestamps_cap: DEFAULT_FLAGGED_TIMESTAMPS_CAP,
        }
    }
}

/// Identity key for offender tallies. Companions without an mmsi are keyed by
/// normalized name, companions with neither end up in a single sentinel
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompanionId {
    Mmsi(Mmsi),
    Name(String),
    Unknown,
}

impl CompanionId {
    pub fn of(report: &PositionReport) -> CompanionId {
        if let Some(mmsi) = report.mmsi {
            CompanionId::Mmsi(mmsi)
        } else {
            match report.vessel_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => CompanionId::Name(name.to_lowercase()),
                _ => CompanionId::Unknown,
            }
        }
    }
}

/// A same-timestamp pair of the query vessel and one companion, with the
/// computed surface distance. Derived during evaluation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub timestamp: DateTime<Utc>,
    pub companion_id: CompanionId,
    pub companion_mmsi: Option<Mmsi>,
    pub companion_name: String,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffendingVessel {
    pub mmsi: Option<Mmsi>,
    pub vessel_name: String,
    pub encounters: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub vessel: VesselIdentifier,
    /// Distinct timestamps with at least one encounter within the radius,
    /// ascending, truncated to the configured cap.
    pub flagged_timestamps: Vec<DateTime<Utc>>,
    pub alert: bool,
    /// Count of all qualifying pairs, not deduplicated by timestamp and not
    /// subject to the flagged-timestamp cap.
    pub total_encounters: u64,
    /// Minimum distance over every evaluated pair, qualifying or not. None
    /// only when no companion shared any timestamp.
    pub closest_approach_km: Option<f64>,
    pub top_offending_vessels: Vec<OffendingVessel>,
    pub sampled_reports: u64,
}

/// Outcome of the multi-instant query. An unknown vessel is a distinct
/// terminal state, not an error and not an empty summary.
#[derive(Debug, Clone, PartialEq)]
pub enum VesselAssessment {
    NotFound,
    Assessed(RiskSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifyingCompanion {
    pub mmsi: Option<Mmsi>,
    pub vessel_name: String,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of the single-instant query.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantAssessment {
    NotFound,
    Evaluated(InstantRisk),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstantRisk {
    pub alert: bool,
    pub qualifying_companions: Vec<QualifyingCompanion>,
}
