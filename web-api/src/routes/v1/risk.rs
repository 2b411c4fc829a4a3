use actix_web::web;
use chrono::{DateTime, NaiveDateTime, Utc};
use risk_core::{InstantAssessment, RiskEngine, VesselAssessment, VesselIdentifier};
use serde::{Deserialize, Serialize};
use tracing::{event, Level};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, response::Response, Database};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RiskByVesselParameters {
    /// Mmsi or vessel name.
    pub vessel: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RiskByDatetimeParameters {
    /// Mmsi or vessel name.
    pub vessel: Option<String>,
    /// RFC 3339 or 'YYYY-MM-DD HH:MM:SS' (assumed UTC).
    pub timestamp: Option<String>,
}

#[utoipa::path(
    get,
    path = "/risk_by_vessel",
    params(RiskByVesselParameters),
    responses(
        (status = 200, description = "proximity risk summary for the given vessel", body = RiskSummary),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
        (status = 400, description = "invalid parameters were provided", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, engine))]
pub async fn risk_by_vessel<T: Database>(
    db: web::Data<T>,
    engine: web::Data<RiskEngine>,
    params: web::Query<RiskByVesselParameters>,
) -> Result<Response<RiskSummary>, ApiError> {
    let vessel = parse_vessel(params.vessel.as_deref())?;

    let assessment = engine
        .assess_vessel(db.get_ref(), &vessel)
        .await
        .map_err(|e| {
            event!(Level::ERROR, "failed to assess vessel: {:?}", e);
            ApiError::InternalServerError
        })?;

    Ok(Response::new(RiskSummary::from_assessment(
        &vessel, assessment,
    )))
}

#[utoipa::path(
    get,
    path = "/risk_by_datetime",
    params(RiskByDatetimeParameters),
    responses(
        (status = 200, description = "proximity risk for the given vessel at a single instant", body = InstantRisk),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
        (status = 400, description = "invalid parameters were provided", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, engine))]
pub async fn risk_by_datetime<T: Database>(
    db: web::Data<T>,
    engine: web::Data<RiskEngine>,
    params: web::Query<RiskByDatetimeParameters>,
) -> Result<Response<InstantRisk>, ApiError> {
    let vessel = parse_vessel(params.vessel.as_deref())?;
    let timestamp = parse_timestamp(params.timestamp.as_deref())?;

    let assessment = engine
        .assess_instant(db.get_ref(), &vessel, timestamp)
        .await
        .map_err(|e| {
            event!(Level::ERROR, "failed to assess vessel at instant: {:?}", e);
            ApiError::InternalServerError
        })?;

    Ok(Response::new(InstantRisk::from_assessment(
        &vessel, timestamp, assessment,
    )))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    NotFound,
    Clean,
    Risk,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskSummary {
    pub vessel_id: String,
    pub status: AssessmentStatus,
    pub alert: bool,
    pub message: String,
    pub flagged_timestamps: Vec<DateTime<Utc>>,
    pub total_encounters: u64,
    pub closest_approach_km: Option<f64>,
    pub top_offending_vessels: Vec<OffendingVessel>,
    pub sampled_reports: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OffendingVessel {
    pub mmsi: Option<i32>,
    pub vessel_name: String,
    pub encounters: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstantRisk {
    pub vessel_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AssessmentStatus,
    pub alert: bool,
    pub message: String,
    pub qualifying_companions: Vec<QualifyingCompanion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QualifyingCompanion {
    pub mmsi: Option<i32>,
    pub vessel_name: String,
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl RiskSummary {
    fn from_assessment(vessel: &VesselIdentifier, assessment: VesselAssessment) -> Self {
        match assessment {
            VesselAssessment::NotFound => RiskSummary {
                vessel_id: vessel.to_string(),
                status: AssessmentStatus::NotFound,
                alert: false,
                message: "Ship not found.".into(),
                flagged_timestamps: Vec::new(),
                total_encounters: 0,
                closest_approach_km: None,
                top_offending_vessels: Vec::new(),
                sampled_reports: 0,
            },
            VesselAssessment::Assessed(summary) => {
                let (status, message) = if summary.alert {
                    (AssessmentStatus::Risk, "Risk detected on these dates.")
                } else {
                    (AssessmentStatus::Clean, "Clean route. No risk detected.")
                };

                RiskSummary {
                    vessel_id: summary.vessel.to_string(),
                    status,
                    alert: summary.alert,
                    message: message.into(),
                    flagged_timestamps: summary.flagged_timestamps,
                    total_encounters: summary.total_encounters,
                    closest_approach_km: summary.closest_approach_km.map(round_km),
                    top_offending_vessels: summary
                        .top_offending_vessels
                        .into_iter()
                        .map(|v| OffendingVessel {
                            mmsi: v.mmsi.map(|m| m.0),
                            vessel_name: v.vessel_name,
                            encounters: v.encounters,
                        })
                        .collect(),
                    sampled_reports: summary.sampled_reports,
                }
            }
        }
    }
}

impl InstantRisk {
    fn from_assessment(
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
        assessment: InstantAssessment,
    ) -> Self {
        match assessment {
            InstantAssessment::NotFound => InstantRisk {
                vessel_id: vessel.to_string(),
                timestamp,
                status: AssessmentStatus::NotFound,
                alert: false,
                message: "Ship or datetime not found.".into(),
                qualifying_companions: Vec::new(),
            },
            InstantAssessment::Evaluated(risk) => {
                let (status, message) = if risk.alert {
                    (AssessmentStatus::Risk, "Risk detected.")
                } else {
                    (AssessmentStatus::Clean, "Clean route. No risk detected.")
                };

                InstantRisk {
                    vessel_id: vessel.to_string(),
                    timestamp,
                    status,
                    alert: risk.alert,
                    message: message.into(),
                    qualifying_companions: risk
                        .qualifying_companions
                        .into_iter()
                        .map(|c| QualifyingCompanion {
                            mmsi: c.mmsi.map(|m| m.0),
                            vessel_name: c.vessel_name,
                            distance_km: round_km(c.distance_km),
                            latitude: c.latitude,
                            longitude: c.longitude,
                        })
                        .collect(),
                }
            }
        }
    }
}

pub(crate) fn parse_vessel(value: Option<&str>) -> Result<VesselIdentifier, ApiError> {
    value
        .ok_or(ApiError::MissingVesselIdentifier)?
        .parse()
        .map_err(|e| {
            event!(Level::WARN, "{:?}", e);
            ApiError::InvalidVesselIdentifier
        })
}

fn parse_timestamp(value: Option<&str>) -> Result<DateTime<Utc>, ApiError> {
    let value = value.ok_or(ApiError::MissingTimestamp)?;

    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|t| t.and_utc())
        })
        .map_err(|e| {
            event!(Level::WARN, "{:?}", e);
            ApiError::InvalidTimestamp
        })
}

fn round_km(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
