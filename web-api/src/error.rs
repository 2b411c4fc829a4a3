use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub enum ApiError {
    MissingVesselIdentifier,
    InvalidVesselIdentifier,
    MissingTimestamp,
    InvalidTimestamp,
    InternalServerError,
}

impl std::error::Error for ApiError {}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ApiError,
    pub description: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingVesselIdentifier => {
                f.write_str("a vessel identifier (mmsi or name) must be provided")
            }
            ApiError::InvalidVesselIdentifier => {
                f.write_str("an invalid vessel identifier was received")
            }
            ApiError::MissingTimestamp => f.write_str("a timestamp must be provided"),
            ApiError::InvalidTimestamp => f.write_str("an invalid timestamp was received"),
            ApiError::InternalServerError => f.write_str("an internal server error occured"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingVesselIdentifier
            | ApiError::InvalidVesselIdentifier
            | ApiError::MissingTimestamp
            | ApiError::InvalidTimestamp => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error = ErrorResponse {
            error: *self,
            description: format!("{self}"),
        };
        HttpResponse::build(self.status_code()).json(&error)
    }
}
