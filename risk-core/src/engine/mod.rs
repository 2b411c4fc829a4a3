use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{event, Level};

mod aggregate;
mod bucket;
mod evaluate;

pub use bucket::TimeBuckets;

use aggregate::RiskAggregator;
use evaluate::evaluate_report;

use crate::{
    CoreResult, InstantAssessment, InstantRisk, PositionStore, QualifyingCompanion, RiskConfig,
    VesselAssessment, VesselIdentifier,
};

/// The proximity risk engine. Pure computation over data materialized per
/// query, no state is shared between invocations.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> RiskEngine {
        RiskEngine { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluates every sampled report of the vessel against all companions
    /// sharing a reported timestamp and folds the results into a summary.
    pub async fn assess_vessel<T: PositionStore>(
        &self,
        store: &T,
        vessel: &VesselIdentifier,
    ) -> CoreResult<VesselAssessment> {
        let history = store
            .fetch_vessel_history(vessel, self.config.max_reports)
            .await?;

        let sampled: Vec<_> = history
            .iter()
            .filter_map(|r| r.coordinates().map(|c| (r.timestamp, c)))
            .collect();

        if sampled.is_empty() {
            return Ok(VesselAssessment::NotFound);
        }

        let timestamps: BTreeSet<DateTime<Utc>> = sampled.iter().map(|(t, _)| *t).collect();

        let companions = store.fetch_companions(&timestamps, vessel).await?;

        event!(
            Level::DEBUG,
            "assessing {} reports of vessel {} against {} companion reports",
            sampled.len(),
            vessel,
            companions.len(),
        );

        let buckets = TimeBuckets::new(companions);

        let mut aggregator = RiskAggregator::new();
        for (timestamp, position) in &sampled {
            aggregator.add(evaluate_report(
                *timestamp,
                position,
                buckets.get(timestamp),
                self.config.risk_radius_km,
            ));
        }

        Ok(VesselAssessment::Assessed(
            aggregator.finish(vessel.clone(), &self.config),
        ))
    }

    /// Degenerate single-instant variant: one report, one bucket, no
    /// aggregation.
    pub async fn assess_instant<T: PositionStore>(
        &self,
        store: &T,
        vessel: &VesselIdentifier,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<InstantAssessment> {
        let Some(report) = store.fetch_report_at(vessel, timestamp).await? else {
            return Ok(InstantAssessment::NotFound);
        };
        let Some(position) = report.coordinates() else {
            return Ok(InstantAssessment::NotFound);
        };

        let timestamps = BTreeSet::from([timestamp]);
        let companions = store.fetch_companions(&timestamps, vessel).await?;
        let buckets = TimeBuckets::new(companions);

        let evaluation = evaluate_report(
            timestamp,
            &position,
            buckets.get(&timestamp),
            self.config.risk_radius_km,
        );

        let qualifying_companions: Vec<_> = evaluation
            .encounters
            .into_iter()
            .map(|e| QualifyingCompanion {
                mmsi: e.companion_mmsi,
                vessel_name: e.companion_name,
                distance_km: e.distance_km,
                latitude: e.latitude,
                longitude: e.longitude,
            })
            .collect();

        Ok(InstantAssessment::Evaluated(InstantRisk {
            alert: !qualifying_companions.is_empty(),
            qualifying_companions,
        }))
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        RiskEngine::new(RiskConfig::default())
    }
}
