/// Core data types for the KDM capability probe.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no probe logic — only types and their label
/// mappings. The wire keys here are the strings the KDM water-data API
/// actually accepts; the Korean labels are what operators read in reports.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Facility types
// ---------------------------------------------------------------------------

/// Category of physical monitoring site known to the KDM API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FacilityType {
    Dam,
    WaterLevel,
    Rainfall,
    Weather,
    WaterQuality,
}

impl FacilityType {
    pub const ALL: [FacilityType; 5] = [
        FacilityType::Dam,
        FacilityType::WaterLevel,
        FacilityType::Rainfall,
        FacilityType::Weather,
        FacilityType::WaterQuality,
    ];

    /// The `facility_type` value sent on the wire.
    pub fn wire_key(&self) -> &'static str {
        match self {
            FacilityType::Dam => "dam",
            FacilityType::WaterLevel => "water_level",
            FacilityType::Rainfall => "rainfall",
            FacilityType::Weather => "weather",
            FacilityType::WaterQuality => "water_quality",
        }
    }

    /// Korean station-category label used in report output.
    pub fn label_ko(&self) -> &'static str {
        match self {
            FacilityType::Dam => "댐",
            FacilityType::WaterLevel => "수위관측소",
            FacilityType::Rainfall => "우량관측소",
            FacilityType::Weather => "기상관측소",
            FacilityType::WaterQuality => "수질관측소",
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_key())
    }
}

// ---------------------------------------------------------------------------
// Granularities
// ---------------------------------------------------------------------------

/// Sampling interval of returned time-series records.
///
/// The KDM API calls this `time_key`. Not every facility supports every
/// granularity — discovering which do is the point of the granularity sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Granularity {
    Min10,
    H1,
    D1,
    Mt1,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Min10,
        Granularity::H1,
        Granularity::D1,
        Granularity::Mt1,
    ];

    /// The `time_key` value sent on the wire.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Granularity::Min10 => "min_10",
            Granularity::H1 => "h_1",
            Granularity::D1 => "d_1",
            Granularity::Mt1 => "mt_1",
        }
    }

    /// Korean interval label used in report output.
    pub fn label_ko(&self) -> &'static str {
        match self {
            Granularity::Min10 => "10분",
            Granularity::H1 => "시간별",
            Granularity::D1 => "일별",
            Granularity::Mt1 => "월별",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_key())
    }
}

// ---------------------------------------------------------------------------
// Candidates and outcomes
// ---------------------------------------------------------------------------

/// One (site, facility, measurement, granularity, lookback) tuple to probe.
/// Immutable once constructed; a sweep is a fixed sequence of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub site_name: String,
    pub facility_type: FacilityType,
    pub measurement_item: String,
    pub granularity: Granularity,
    pub lookback_days: u32,
}

impl Candidate {
    pub fn new(
        site_name: &str,
        facility_type: FacilityType,
        measurement_item: &str,
        granularity: Granularity,
        lookback_days: u32,
    ) -> Self {
        Candidate {
            site_name: site_name.to_string(),
            facility_type,
            measurement_item: measurement_item.to_string(),
            granularity,
            lookback_days,
        }
    }
}

/// Canonical result of a single probe, produced exactly once by the
/// executor and never mutated afterwards.
///
/// `succeeded` mirrors the upstream `success` flag; a flag without data is
/// not support, which is why `data_points` is carried separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub candidate: Candidate,
    pub succeeded: bool,
    pub data_points: usize,
    pub elapsed: Duration,
    pub error_detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// How a probe outcome counts toward capability discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// Upstream reported success AND returned at least one record.
    Working,
    /// Upstream answered but the combination is unsupported (including a
    /// success flag over an empty payload, or a malformed response shape).
    Failed,
    /// The query itself raised a transport-level error.
    Errored,
}

impl Classification {
    /// Literal status marker used in console output.
    pub fn marker(&self) -> &'static str {
        match self {
            Classification::Working => "✅ OK",
            Classification::Failed => "❌ FAIL",
            Classification::Errored => "❌ ERROR",
        }
    }
}

/// A probe outcome together with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedResult {
    pub outcome: ProbeOutcome,
    pub classification: Classification,
}

// ---------------------------------------------------------------------------
// Boundary findings
// ---------------------------------------------------------------------------

/// Maximum lookback depth discovered for one (facility, granularity) pair.
///
/// Derived from boundary-sweep results, never constructed independently:
/// the value is the largest lookback that classified WORKING, or `None`
/// when no ladder step worked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundaryFinding {
    pub facility_type: FacilityType,
    pub granularity: Granularity,
    pub max_supported_lookback_days: Option<u32>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when talking to the KDM API.
///
/// Only `Connection` and `Config` abort a run. A `Transport` error is
/// absorbed into the failing candidate's classification so the sweep keeps
/// going; malformed response shapes and empty successes are classifications,
/// not errors.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The session could not be established. Fatal — no report is produced.
    #[error("connection failed: {0}")]
    Connection(String),
    /// A single query call failed (HTTP error, timeout, unparseable body).
    #[error("query failed: {0}")]
    Transport(String),
    /// Connection settings were unreadable or invalid.
    #[error("invalid settings: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
