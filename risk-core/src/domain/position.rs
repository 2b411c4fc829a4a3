use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::InvalidIdentifierSnafu, Error};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Mmsi(pub i32);

impl Display for Mmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// How a caller refers to a vessel, either by its numeric station number or by
/// its reported name. Numeric identifiers match exactly, names match
/// case/whitespace-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VesselIdentifier {
    Mmsi(Mmsi),
    Name(String),
}

impl VesselIdentifier {
    pub fn matches(&self, report: &PositionReport) -> bool {
        match self {
            VesselIdentifier::Mmsi(mmsi) => report.mmsi == Some(*mmsi),
            VesselIdentifier::Name(name) => report
                .vessel_name
                .as_deref()
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name.trim())),
        }
    }
}

impl FromStr for VesselIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return InvalidIdentifierSnafu { value: s }.fail();
        }

        Ok(match trimmed.parse::<i32>() {
            Ok(mmsi) => VesselIdentifier::Mmsi(Mmsi(mmsi)),
            Err(_) => VesselIdentifier::Name(trimmed.into()),
        })
    }
}

impl Display for VesselIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VesselIdentifier::Mmsi(mmsi) => write!(f, "{mmsi}"),
            VesselIdentifier::Name(name) => f.write_str(name),
        }
    }
}

/// One AIS observation of one vessel at one instant, read from the position
/// store. Reports are never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub mmsi: Option<Mmsi>,
    pub vessel_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed_over_ground: Option<f64>,
    pub destination: Option<String>,
}

impl PositionReport {
    /// Both coordinates, if present and within valid ranges. Reports failing
    /// this check are skipped by the evaluator, they never abort a query.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude)
                    && (-180.0..=180.0).contains(&longitude) =>
            {
                Some(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }

    pub fn has_identity(&self) -> bool {
        self.mmsi.is_some()
            || self
                .vessel_name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty())
    }

    /// Display label for offender tallies and responses. Blank or missing
    /// names fall into the "Unknown" sentinel instead of being dropped.
    pub fn display_name(&self) -> String {
        match self.vessel_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.into(),
            _ => UNKNOWN_VESSEL_NAME.into(),
        }
    }
}

pub static UNKNOWN_VESSEL_NAME: &str = "Unknown";
