//! In-memory position store used by engine and API tests. Mirrors the
//! filtering contract of the real adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::StoreUnavailableSnafu, CoreResult, Mmsi, PositionReport, PositionStore,
    VesselIdentifier,
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    reports: Vec<PositionReport>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore::default()
    }

    pub fn with_reports(reports: Vec<PositionReport>) -> InMemoryStore {
        InMemoryStore {
            reports,
            unavailable: false,
        }
    }

    /// A store whose every call fails, for exercising error propagation.
    pub fn unavailable() -> InMemoryStore {
        InMemoryStore {
            reports: Vec::new(),
            unavailable: true,
        }
    }

    fn check_available(&self) -> CoreResult<()> {
        if self.unavailable {
            StoreUnavailableSnafu {
                message: "the backing store is switched off",
            }
            .fail()
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PositionStore for InMemoryStore {
    async fn fetch_vessel_history(
        &self,
        vessel: &VesselIdentifier,
        max_reports: u32,
    ) -> CoreResult<Vec<PositionReport>> {
        self.check_available()?;
        let mut history: Vec<_> = self
            .reports
            .iter()
            .filter(|r| vessel.matches(r))
            .cloned()
            .collect();
        history.sort_by_key(|r| std::cmp::Reverse(r.timestamp));
        history.truncate(max_reports as usize);
        Ok(history)
    }

    async fn fetch_companions(
        &self,
        timestamps: &BTreeSet<DateTime<Utc>>,
        exclude: &VesselIdentifier,
    ) -> CoreResult<Vec<PositionReport>> {
        self.check_available()?;
        Ok(self
            .reports
            .iter()
            .filter(|r| {
                timestamps.contains(&r.timestamp)
                    && !exclude.matches(r)
                    && r.latitude.is_some()
                    && r.longitude.is_some()
                    && r.has_identity()
            })
            .cloned()
            .collect())
    }

    async fn fetch_report_at(
        &self,
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Option<PositionReport>> {
        self.check_available()?;
        Ok(self
            .reports
            .iter()
            .find(|r| vessel.matches(r) && r.timestamp == timestamp)
            .cloned())
    }
}

pub fn report(
    mmsi: i32,
    vessel_name: &str,
    timestamp: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> PositionReport {
    PositionReport {
        mmsi: Some(Mmsi(mmsi)),
        vessel_name: Some(vessel_name.into()),
        timestamp,
        latitude: Some(latitude),
        longitude: Some(longitude),
        speed_over_ground: None,
        destination: None,
    }
}

pub fn report_without_coordinates(
    mmsi: i32,
    vessel_name: &str,
    timestamp: DateTime<Utc>,
) -> PositionReport {
    PositionReport {
        mmsi: Some(Mmsi(mmsi)),
        vessel_name: Some(vessel_name.into()),
        timestamp,
        latitude: None,
        longitude: None,
        speed_over_ground: None,
        destination: None,
    }
}
