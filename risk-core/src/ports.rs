use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{CoreResult, PositionReport, VesselIdentifier};

/// Read-only access to the backing table of position reports. Implementations
/// must support concurrent readers, the engine never writes.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// The vessel's most recent `max_reports` reports, ordered by timestamp
    /// descending. An unknown vessel yields an empty sequence, not an error.
    async fn fetch_vessel_history(
        &self,
        vessel: &VesselIdentifier,
        max_reports: u32,
    ) -> CoreResult<Vec<PositionReport>>;

    /// Every other vessel's reports whose timestamp is a member of the given
    /// set. Exact set-membership, not a range query. Rows with missing
    /// coordinates or missing/blank identity are excluded.
    async fn fetch_companions(
        &self,
        timestamps: &BTreeSet<DateTime<Utc>>,
        exclude: &VesselIdentifier,
    ) -> CoreResult<Vec<PositionReport>>;

    /// The vessel's report at exactly the given timestamp, if any.
    async fn fetch_report_at(
        &self,
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Option<PositionReport>>;
}
