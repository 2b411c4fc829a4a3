use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use super::evaluate::ReportEvaluation;
use crate::{CompanionId, Mmsi, OffendingVessel, RiskConfig, RiskSummary, VesselIdentifier};

#[derive(Debug)]
struct OffenderTally {
    mmsi: Option<Mmsi>,
    vessel_name: String,
    encounters: u64,
}

/// Folds per-report evaluations into the final summary. Offenders are kept in
/// first-seen order so that ranking ties resolve deterministically.
#[derive(Debug, Default)]
pub(crate) struct RiskAggregator {
    flagged: BTreeSet<DateTime<Utc>>,
    total_encounters: u64,
    closest_km: Option<f64>,
    sampled_reports: u64,
    offenders: Vec<OffenderTally>,
    offender_index: HashMap<CompanionId, usize>,
}

impl RiskAggregator {
    pub fn new() -> RiskAggregator {
        RiskAggregator::default()
    }

    pub fn add(&mut self, evaluation: ReportEvaluation) {
        self.sampled_reports += 1;

        if let Some(distance) = evaluation.closest_km {
            self.closest_km = Some(match self.closest_km {
                Some(current) => current.min(distance),
                None => distance,
            });
        }

        if !evaluation.encounters.is_empty() {
            self.flagged.insert(evaluation.timestamp);
        }

        for encounter in evaluation.encounters {
            self.total_encounters += 1;

            match self.offender_index.get(&encounter.companion_id).copied() {
                Some(idx) => self.offenders[idx].encounters += 1,
                None => {
                    self.offender_index
                        .insert(encounter.companion_id, self.offenders.len());
                    self.offenders.push(OffenderTally {
                        mmsi: encounter.companion_mmsi,
                        vessel_name: encounter.companion_name,
                        encounters: 1,
                    });
                }
            }
        }
    }

    pub fn finish(self, vessel: VesselIdentifier, config: &RiskConfig) -> RiskSummary {
        // Alert reflects the full flagged set, the response list is truncated
        // afterwards.
        let alert = !self.flagged.is_empty();

        let flagged_timestamps = self
            .flagged
            .into_iter()
            .take(config.flagged_timestamps_cap)
            .collect();

        let mut offenders = self.offenders;
        // Stable sort, ties keep first-seen order.
        offenders.sort_by(|a, b| b.encounters.cmp(&a.encounters));
        offenders.truncate(config.top_offenders_limit);

        RiskSummary {
            vessel,
            flagged_timestamps,
            alert,
            total_encounters: self.total_encounters,
            closest_approach_km: self.closest_km,
            top_offending_vessels: offenders
                .into_iter()
                .map(|o| OffendingVessel {
                    mmsi: o.mmsi,
                    vessel_name: o.vessel_name,
                    encounters: o.encounters,
                })
                .collect(),
            sampled_reports: self.sampled_reports,
        }
    }
}
