/// KDM Water-Data API Client
///
/// The probe core talks to the upstream service through the narrow
/// `ProbeClient` trait; `KdmClient` is the production adapter over the KDM
/// HTTP endpoint. Everything above the trait treats the response as an
/// opaque JSON value — field names inside `data` records are not stable
/// across facility types, so nothing here tries to model them.

use crate::config::KdmSettings;
use crate::model::{Candidate, ProbeError};
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use log::debug;
use serde_json::Value;

// ============================================================================
// Collaborator contract
// ============================================================================

/// Session + single-query contract consumed by the sweep engine.
///
/// `connect` failures are fatal to the run; `query` failures are not — the
/// executor converts them into per-candidate classifications. `disconnect`
/// is called exactly once per run, after the last sweep.
pub trait ProbeClient {
    fn connect(&mut self) -> Result<(), ProbeError>;

    fn disconnect(&mut self);

    /// Executes one probe query. A well-formed response is a JSON object
    /// carrying `success: bool` and `data: [records]`; shape enforcement is
    /// the executor's job, so this returns the raw value.
    fn query(&mut self, candidate: &Candidate) -> Result<Value, ProbeError>;
}

// ============================================================================
// HTTP adapter
// ============================================================================

pub struct KdmClient {
    http: reqwest::blocking::Client,
    settings: KdmSettings,
    connected: bool,
}

impl KdmClient {
    pub fn new(settings: KdmSettings) -> Result<Self, ProbeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ProbeError::Connection(format!("HTTP client init: {}", e)))?;

        Ok(KdmClient {
            http,
            settings,
            connected: false,
        })
    }
}

/// Inclusive query window ending today for a lookback of `lookback_days`.
///
/// Takes `today` as a parameter rather than reading the clock, so window
/// math stays deterministic in tests.
pub fn query_window(lookback_days: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let begin = today - ChronoDuration::days(i64::from(lookback_days));
    (begin, today)
}

impl ProbeClient for KdmClient {
    fn connect(&mut self) -> Result<(), ProbeError> {
        let url = format!("{}/status", self.settings.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ProbeError::Connection(format!("KDM unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProbeError::Connection(format!(
                "KDM status endpoint returned HTTP {}",
                response.status()
            )));
        }

        self.connected = true;
        debug!("KDM session established against {}", self.settings.base_url);
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            debug!("KDM session released");
        }
    }

    fn query(&mut self, candidate: &Candidate) -> Result<Value, ProbeError> {
        let (begin, end) = query_window(candidate.lookback_days, Utc::now().date_naive());

        let url = format!("{}/water-data", self.settings.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("site_name", candidate.site_name.clone()),
            ("facility_type", candidate.facility_type.wire_key().to_string()),
            ("measurement_items", candidate.measurement_item.clone()),
            ("time_key", candidate.granularity.wire_key().to_string()),
            ("start_date", begin.format("%Y%m%d").to_string()),
            ("end_date", end.format("%Y%m%d").to_string()),
        ];
        if let Some(key) = &self.settings.api_key {
            params.push(("service_key", key.clone()));
        }

        let response = self
            .http
            .get(&url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ProbeError::Transport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ProbeError::Transport(format!("HTTP {}", response.status())));
        }

        response
            .json::<Value>()
            .map_err(|e| ProbeError::Transport(format!("response body unreadable: {}", e)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_window_spans_lookback() {
        let (begin, end) = query_window(3, day(2025, 6, 10));
        assert_eq!(begin, day(2025, 6, 7));
        assert_eq!(end, day(2025, 6, 10));
    }

    #[test]
    fn test_query_window_handles_multi_year_lookback() {
        // 10950 days is the deepest d_1 ladder step (30 years).
        let (begin, end) = query_window(10950, day(2025, 1, 1));
        assert_eq!(end, day(2025, 1, 1));
        assert!(begin < day(1996, 1, 1), "30-year window should reach 1995, got {}", begin);
    }

    #[test]
    fn test_query_window_crosses_year_boundary() {
        let (begin, _) = query_window(30, day(2025, 1, 15));
        assert_eq!(begin, day(2024, 12, 16));
    }
}
