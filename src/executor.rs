/// Query Executor
///
/// Issues one probe at a time through the collaborator, normalizes the
/// heterogeneous response into a `ProbeOutcome`, and paces calls so the
/// shared upstream service is never hammered. A single failing query never
/// aborts a sweep — transport errors become outcomes, not panics.

use crate::client::ProbeClient;
use crate::model::{Candidate, ProbeOutcome};
use log::debug;
use serde_json::Value;
use std::thread;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Delay applied after every probe, success or failure.
///
/// This is deliberate backpressure toward the upstream service, not an
/// optimization knob. Tests inject `PacingPolicy::none()` to run offline
/// sweeps without real delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    delay: Duration,
}

impl PacingPolicy {
    pub fn fixed(delay: Duration) -> Self {
        PacingPolicy { delay }
    }

    pub fn none() -> Self {
        PacingPolicy {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn apply(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingPolicy::fixed(Duration::from_millis(500))
    }
}

// ---------------------------------------------------------------------------
// Response shape helpers
// ---------------------------------------------------------------------------

/// Generic structural accessor for the records of a well-formed response.
/// Returns an empty slice for any response that is not an object carrying a
/// `data` array — record field names are never inspected here.
pub fn response_records(response: &Value) -> &[Value] {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn response_succeeded(response: &Value) -> bool {
    response
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

pub struct QueryExecutor<'a, C: ProbeClient> {
    client: &'a mut C,
    pacing: PacingPolicy,
}

impl<'a, C: ProbeClient> QueryExecutor<'a, C> {
    pub fn new(client: &'a mut C, pacing: PacingPolicy) -> Self {
        QueryExecutor { client, pacing }
    }

    /// Probes one candidate and returns its canonical outcome.
    ///
    /// Response-shape contract: only a JSON object counts as a structural
    /// response; null, arrays, and scalars read as `succeeded=false` with
    /// zero data points. The pacing delay runs after every probe, including
    /// the error path.
    pub fn execute(&mut self, candidate: &Candidate) -> ProbeOutcome {
        let started = Instant::now();
        let queried = self.client.query(candidate);
        let elapsed = started.elapsed();

        let outcome = match queried {
            Ok(response) if response.is_object() => ProbeOutcome {
                candidate: candidate.clone(),
                succeeded: response_succeeded(&response),
                data_points: response_records(&response).len(),
                elapsed,
                error_detail: None,
            },
            Ok(malformed) => {
                debug!(
                    "non-structural response for '{}': {}",
                    candidate.site_name,
                    shape_of(&malformed)
                );
                ProbeOutcome {
                    candidate: candidate.clone(),
                    succeeded: false,
                    data_points: 0,
                    elapsed,
                    error_detail: None,
                }
            }
            Err(err) => ProbeOutcome {
                candidate: candidate.clone(),
                succeeded: false,
                data_points: 0,
                elapsed,
                error_detail: Some(err.to_string()),
            },
        };

        self.pacing.apply();
        outcome
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
