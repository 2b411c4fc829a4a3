use std::collections::HashMap;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::PositionReport;

/// Companion reports grouped by their exact timestamp value. Built once per
/// query in O(C), looked up once per query-vessel report in O(1), which keeps
/// the pairwise distance work bounded by bucket size instead of the full
/// companion set.
#[derive(Debug, Default)]
pub struct TimeBuckets {
    buckets: HashMap<DateTime<Utc>, Vec<PositionReport>>,
}

impl TimeBuckets {
    pub fn new(companions: Vec<PositionReport>) -> TimeBuckets {
        TimeBuckets {
            buckets: companions
                .into_iter()
                .map(|c| (c.timestamp, c))
                .into_group_map(),
        }
    }

    pub fn get(&self, timestamp: &DateTime<Utc>) -> &[PositionReport] {
        self.buckets.get(timestamp).map_or(&[], Vec::as_slice)
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn num_reports(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
