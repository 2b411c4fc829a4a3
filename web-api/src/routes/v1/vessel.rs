use actix_web::web;
use chrono::{DateTime, Utc};
use risk_core::RiskEngine;
use serde::{Deserialize, Serialize};
use tracing::{event, Level};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, response::Response, routes::v1::risk::parse_vessel, Database};

#[derive(Debug, Deserialize, IntoParams)]
pub struct VesselPositionsParameters {
    /// Maximum number of positions to return, bounded by the configured
    /// report cap.
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/vessels/{vessel}/positions",
    params(
        ("vessel" = String, Path, description = "mmsi or vessel name"),
        VesselPositionsParameters,
    ),
    responses(
        (status = 200, description = "most recent positions of the given vessel, ascending by timestamp", body = [VesselPosition]),
        (status = 500, description = "an internal error occured", body = ErrorResponse),
        (status = 400, description = "invalid parameters were provided", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(db, engine))]
pub async fn vessel_positions<T: Database>(
    db: web::Data<T>,
    engine: web::Data<RiskEngine>,
    path: web::Path<String>,
    params: web::Query<VesselPositionsParameters>,
) -> Result<Response<Vec<VesselPosition>>, ApiError> {
    let vessel = parse_vessel(Some(path.as_str()))?;

    let cap = engine.config().max_reports;
    let limit = params.limit.unwrap_or(cap).min(cap);

    let mut positions = db
        .fetch_vessel_history(&vessel, limit)
        .await
        .map_err(|e| {
            event!(Level::ERROR, "failed to retrieve vessel positions: {:?}", e);
            ApiError::InternalServerError
        })?;

    // The store returns newest first, tracks are plotted oldest first.
    positions.reverse();

    Ok(Response::new(
        positions.into_iter().map(VesselPosition::from).collect(),
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VesselPosition {
    pub mmsi: Option<i32>,
    pub vessel_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed_over_ground: Option<f64>,
    pub destination: Option<String>,
}

impl From<risk_core::PositionReport> for VesselPosition {
    fn from(value: risk_core::PositionReport) -> Self {
        VesselPosition {
            mmsi: value.mmsi.map(|m| m.0),
            vessel_name: value.vessel_name,
            timestamp: value.timestamp,
            latitude: value.latitude,
            longitude: value.longitude,
            speed_over_ground: value.speed_over_ground,
            destination: value.destination,
        }
    }
}
