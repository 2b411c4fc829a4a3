use chrono::{DateTime, Utc};
use risk_core::Mmsi;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PositionReport {
    pub mmsi: Option<i32>,
    pub ship_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed_over_ground: Option<f64>,
    pub destination: Option<String>,
}

impl From<PositionReport> for risk_core::PositionReport {
    fn from(value: PositionReport) -> Self {
        risk_core::PositionReport {
            mmsi: value.mmsi.map(Mmsi),
            vessel_name: value.ship_name,
            timestamp: value.timestamp,
            latitude: value.latitude,
            longitude: value.longitude,
            speed_over_ground: value.speed_over_ground,
            destination: value.destination,
        }
    }
}
