use chrono::{DateTime, Utc};

use crate::{haversine_km, CompanionId, Coordinates, Encounter, PositionReport};

/// Result of scanning one query-vessel report against its time bucket.
#[derive(Debug)]
pub(crate) struct ReportEvaluation {
    pub timestamp: DateTime<Utc>,
    /// Minimum distance to any companion in the bucket, qualifying or not.
    pub closest_km: Option<f64>,
    /// Companions within the risk radius.
    pub encounters: Vec<Encounter>,
}

pub(crate) fn evaluate_report(
    timestamp: DateTime<Utc>,
    position: &Coordinates,
    bucket: &[PositionReport],
    risk_radius_km: f64,
) -> ReportEvaluation {
    let mut closest_km: Option<f64> = None;
    let mut encounters = Vec::new();

    for companion in bucket {
        // Companions without usable coordinates are skipped per-record, a
        // single bad row must not fail the query.
        let Some(companion_position) = companion.coordinates() else {
            continue;
        };

        let distance_km = haversine_km(position, &companion_position);

        closest_km = Some(match closest_km {
            Some(current) => current.min(distance_km),
            None => distance_km,
        });

        if distance_km <= risk_radius_km {
            encounters.push(Encounter {
                timestamp,
                companion_id: CompanionId::of(companion),
                companion_mmsi: companion.mmsi,
                companion_name: companion.display_name(),
                distance_km,
                latitude: companion_position.latitude,
                longitude: companion_position.longitude,
            });
        }
    }

    ReportEvaluation {
        timestamp,
        closest_km,
        encounters,
    }
}
