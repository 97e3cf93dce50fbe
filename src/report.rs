/// Aggregation & Reporting
///
/// Folds a run's classified results into a read-only `Report`: per-facility
/// WORKING/FAILED/ERRORED groups, derived lookback boundaries, and a
/// numeric summary. Rendering is a pure read of the report — it can be
/// invoked any number of times without touching the underlying data.

use crate::model::{
    BoundaryFinding, Classification, ClassifiedResult, FacilityType, Granularity,
};
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Report structure
// ---------------------------------------------------------------------------

/// One probed combination as it appears in the report. Candidate identity
/// (site, item, granularity, lookback) is preserved so entries from
/// different sweeps never collapse into each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub site_name: String,
    pub measurement_item: String,
    pub granularity: Granularity,
    pub lookback_days: u32,
    pub data_points: usize,
    pub error_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct FacilityGroup {
    pub working: Vec<ReportEntry>,
    pub failed: Vec<ReportEntry>,
    pub errored: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ReportSummary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub facilities: BTreeMap<FacilityType, FacilityGroup>,
    pub boundaries: Vec<BoundaryFinding>,
    pub summary: ReportSummary,
}

// ---------------------------------------------------------------------------
// Boundary derivation
// ---------------------------------------------------------------------------

/// Maximum WORKING lookback among the results for one (facility,
/// granularity) pair, or `None` when no step worked.
///
/// Deliberately a maximum, not "last step before the first failure":
/// upstream support is not monotonic in lookback, and a deep step that
/// works after a shallower failure is still support.
pub fn derive_boundary(
    facility_type: FacilityType,
    granularity: Granularity,
    results: &[ClassifiedResult],
) -> BoundaryFinding {
    let max_supported_lookback_days = results
        .iter()
        .filter(|r| {
            r.classification == Classification::Working
                && r.outcome.candidate.facility_type == facility_type
                && r.outcome.candidate.granularity == granularity
        })
        .map(|r| r.outcome.candidate.lookback_days)
        .max();

    BoundaryFinding {
        facility_type,
        granularity,
        max_supported_lookback_days,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

impl Report {
    /// Groups results by facility type and classification. Deterministic:
    /// the same result sequence always aggregates to a structurally
    /// identical report.
    pub fn aggregate(results: &[ClassifiedResult]) -> Report {
        Report::aggregate_with_boundaries(results, &[])
    }

    /// Like `aggregate`, additionally deriving a boundary finding for each
    /// named (facility, granularity) pair that was boundary-swept.
    pub fn aggregate_with_boundaries(
        results: &[ClassifiedResult],
        boundary_pairs: &[(FacilityType, Granularity)],
    ) -> Report {
        let mut facilities: BTreeMap<FacilityType, FacilityGroup> = BTreeMap::new();
        let mut summary = ReportSummary::default();

        for result in results {
            let candidate = &result.outcome.candidate;
            let entry = ReportEntry {
                site_name: candidate.site_name.clone(),
                measurement_item: candidate.measurement_item.clone(),
                granularity: candidate.granularity,
                lookback_days: candidate.lookback_days,
                data_points: result.outcome.data_points,
                error_detail: result.outcome.error_detail.clone(),
            };

            let group = facilities.entry(candidate.facility_type).or_default();
            summary.total += 1;
            match result.classification {
                Classification::Working => {
                    summary.working += 1;
                    group.working.push(entry);
                }
                Classification::Failed => {
                    summary.failed += 1;
                    group.failed.push(entry);
                }
                Classification::Errored => {
                    summary.errored += 1;
                    group.errored.push(entry);
                }
            }
        }

        let boundaries = boundary_pairs
            .iter()
            .map(|(facility, granularity)| derive_boundary(*facility, *granularity, results))
            .collect();

        Report {
            facilities,
            boundaries,
            summary,
        }
    }

    pub fn group(&self, facility_type: FacilityType) -> Option<&FacilityGroup> {
        self.facilities.get(&facility_type)
    }

    /// Granularities with at least one WORKING entry for the facility.
    pub fn working_granularities(&self, facility_type: FacilityType) -> Vec<Granularity> {
        let mut granularities: Vec<Granularity> = self
            .group(facility_type)
            .map(|group| group.working.iter().map(|e| e.granularity).collect())
            .unwrap_or_default();
        granularities.sort();
        granularities.dedup();
        granularities
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Renders the findings as plain text. Pure read — calling this twice
    /// yields the same string and leaves the report untouched.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(70);

        out.push_str(&rule);
        out.push_str("\n📊 KDM 조회 능력 리포트\n");
        out.push_str(&rule);
        out.push('\n');

        for (facility_type, group) in &self.facilities {
            out.push_str(&format!(
                "\n✅ {} ({}개 작동):\n",
                facility_type.label_ko(),
                group.working.len()
            ));
            for entry in &group.working {
                out.push_str(&format!(
                    "   - {} ({}, {}, {}일) - {} data points\n",
                    entry.site_name,
                    entry.measurement_item,
                    entry.granularity.wire_key(),
                    entry.lookback_days,
                    entry.data_points
                ));
            }
        }

        if self.facilities.values().any(|g| !g.failed.is_empty()) {
            out.push_str("\n❌ 작동하지 않는 조합:\n");
            for (facility_type, group) in &self.facilities {
                if group.failed.is_empty() {
                    continue;
                }
                out.push_str(&format!("   {}:\n", facility_type.label_ko()));
                for entry in &group.failed {
                    out.push_str(&format!(
                        "      - {} ({}, {}, {}일)\n",
                        entry.site_name,
                        entry.measurement_item,
                        entry.granularity.wire_key(),
                        entry.lookback_days
                    ));
                }
            }
        }

        if self.facilities.values().any(|g| !g.errored.is_empty()) {
            out.push_str("\n⚠️ 오류 발생:\n");
            for (facility_type, group) in &self.facilities {
                if group.errored.is_empty() {
                    continue;
                }
                out.push_str(&format!("   {}:\n", facility_type.label_ko()));
                for entry in &group.errored {
                    out.push_str(&format!(
                        "      - {} ({}, {}) - {}\n",
                        entry.site_name,
                        entry.measurement_item,
                        entry.granularity.wire_key(),
                        entry.error_detail.as_deref().unwrap_or("unknown")
                    ));
                }
            }
        }

        if !self.boundaries.is_empty() {
            out.push_str("\n📊 최대 조회 기간:\n");
            for finding in &self.boundaries {
                match finding.max_supported_lookback_days {
                    Some(days) => out.push_str(&format!(
                        "   - {} / {} ({}): {}일 (약 {:.1}년)\n",
                        finding.facility_type.label_ko(),
                        finding.granularity.wire_key(),
                        finding.granularity.label_ko(),
                        days,
                        f64::from(days) / 365.0
                    )),
                    None => out.push_str(&format!(
                        "   - {} / {} ({}): 지원 안함 ❌\n",
                        finding.facility_type.label_ko(),
                        finding.granularity.wire_key(),
                        finding.granularity.label_ko()
                    )),
                }
            }
        }

        out.push('\n');
        out.push_str(&rule);
        out.push_str(&format!(
            "\n✅ Working: {}   ❌ Failed: {}   ⚠️ Errored: {}   (total {})\n",
            self.summary.working, self.summary.failed, self.summary.errored, self.summary.total
        ));
        out.push_str(&rule);
        out.push('\n');

        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
