#![deny(warnings)]
#![deny(rust_2018_idioms)]

use risk_core::PositionStore;
use routes::v1;
use utoipa::OpenApi;

pub mod error;
pub mod response;
pub mod routes;
pub mod settings;
pub mod startup;

pub trait Database: PositionStore + Clone + Send + Sync + 'static {}

impl<T> Database for T where T: PositionStore + Clone + Send + Sync + 'static {}

#[derive(OpenApi)]
#[openapi(
    paths(
        v1::risk::risk_by_vessel,
        v1::risk::risk_by_datetime,
        v1::vessel::vessel_positions,
    ),
    components(
        schemas(
            error::ErrorResponse,
            error::ApiError,
            v1::risk::RiskSummary,
            v1::risk::AssessmentStatus,
            v1::risk::OffendingVessel,
            v1::risk::InstantRisk,
            v1::risk::QualifyingCompanion,
            v1::vessel::VesselPosition,
        )
    ),
    tags(
        (name = "proximity-risk-api", description = "ais proximity risk api")
    ),
)]
pub struct ApiDoc;
