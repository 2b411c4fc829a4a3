use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use risk_core::VesselIdentifier;
use snafu::ResultExt;
use tracing::instrument;

use crate::{
    error::{QuerySnafu, Result},
    models,
    PostgresAdapter,
};

impl PostgresAdapter {
    #[instrument(skip(self))]
    pub(crate) async fn fetch_vessel_history_impl(
        &self,
        vessel: &VesselIdentifier,
        max_reports: u32,
    ) -> Result<Vec<risk_core::PositionReport>> {
        let rows = match vessel {
            VesselIdentifier::Mmsi(mmsi) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    mmsi = $1
ORDER BY
    "timestamp" DESC
LIMIT
    $2
                    "#,
                )
                .bind(mmsi.0)
                .bind(i64::from(max_reports))
                .fetch_all(&self.pool)
                .await
            }
            VesselIdentifier::Name(name) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    ship_name IS NOT NULL
    AND LOWER(TRIM(ship_name)) = LOWER(TRIM($1))
ORDER BY
    "timestamp" DESC
LIMIT
    $2
                    "#,
                )
                .bind(name)
                .bind(i64::from(max_reports))
                .fetch_all(&self.pool)
                .await
            }
        }
        .context(QuerySnafu)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, timestamps), fields(num_timestamps = timestamps.len()))]
    pub(crate) async fn fetch_companions_impl(
        &self,
        timestamps: &BTreeSet<DateTime<Utc>>,
        exclude: &VesselIdentifier,
    ) -> Result<Vec<risk_core::PositionReport>> {
        let timestamps: Vec<DateTime<Utc>> = timestamps.iter().copied().collect();

        let rows = match exclude {
            VesselIdentifier::Mmsi(mmsi) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    "timestamp" = ANY ($1)
    AND latitude IS NOT NULL
    AND longitude IS NOT NULL
    AND (
        mmsi IS NOT NULL
        OR (
            ship_name IS NOT NULL
            AND TRIM(ship_name) <> ''
        )
    )
    AND (
        mmsi IS NULL
        OR mmsi <> $2
    )
                    "#,
                )
                .bind(&timestamps)
                .bind(mmsi.0)
                .fetch_all(&self.pool)
                .await
            }
            VesselIdentifier::Name(name) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    "timestamp" = ANY ($1)
    AND latitude IS NOT NULL
    AND longitude IS NOT NULL
    AND (
        mmsi IS NOT NULL
        OR (
            ship_name IS NOT NULL
            AND TRIM(ship_name) <> ''
        )
    )
    AND (
        ship_name IS NULL
        OR LOWER(TRIM(ship_name)) <> LOWER(TRIM($2))
    )
                    "#,
                )
                .bind(&timestamps)
                .bind(name)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context(QuerySnafu)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub(crate) async fn fetch_report_at_impl(
        &self,
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<risk_core::PositionReport>> {
        let row = match vessel {
            VesselIdentifier::Mmsi(mmsi) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    mmsi = $1
    AND "timestamp" = $2
LIMIT
    1
                    "#,
                )
                .bind(mmsi.0)
                .bind(timestamp)
                .fetch_optional(&self.pool)
                .await
            }
            VesselIdentifier::Name(name) => {
                sqlx::query_as::<_, models::PositionReport>(
                    r#"
SELECT
    mmsi,
    ship_name,
    "timestamp",
    latitude,
    longitude,
    speed_over_ground,
    destination
FROM
    ais_positions
WHERE
    ship_name IS NOT NULL
    AND LOWER(TRIM(ship_name)) = LOWER(TRIM($1))
    AND "timestamp" = $2
LIMIT
    1
                    "#,
                )
                .bind(name)
                .bind(timestamp)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .context(QuerySnafu)?;

        Ok(row.map(Into::into))
    }
}
