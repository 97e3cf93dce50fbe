/// Sweep Strategies
///
/// All three sweeps share one loop: walk a fixed candidate sequence, probe,
/// classify, accumulate. A sweep is complete only when every candidate has
/// been classified — failures and errors are recorded and the loop moves
/// on, so results stay comparable across runs. What differs per strategy is
/// only how candidates are generated and how the accumulated results are
/// read afterwards.

use crate::catalog::{
    self, BoundarySubject, GranularitySubject, boundary_candidates, granularity_candidates,
    name_resolution_candidates,
};
use crate::classify::classify;
use crate::client::ProbeClient;
use crate::executor::QueryExecutor;
use crate::model::{BoundaryFinding, Candidate, Classification, ClassifiedResult};
use crate::report;
use std::io::Write;

// ---------------------------------------------------------------------------
// Shared loop
// ---------------------------------------------------------------------------

/// Probes every candidate in order and returns exactly one classified
/// result per candidate. Never exits early: a FAILED or ERRORED candidate
/// is recorded and the sweep proceeds to the next one.
pub fn run_sweep<C: ProbeClient>(
    executor: &mut QueryExecutor<'_, C>,
    candidates: &[Candidate],
) -> Vec<ClassifiedResult> {
    let mut results = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        print!(
            "  {} [{}] {} {}일 ... ",
            candidate.site_name,
            candidate.facility_type.wire_key(),
            candidate.granularity.wire_key(),
            candidate.lookback_days
        );
        std::io::stdout().flush().ok();

        let outcome = executor.execute(candidate);
        let result = classify(outcome);

        match result.classification {
            Classification::Working => println!(
                "{} ({} data points, {:.2}초)",
                result.classification.marker(),
                result.outcome.data_points,
                result.outcome.elapsed.as_secs_f64()
            ),
            Classification::Failed => println!("{}", result.classification.marker()),
            Classification::Errored => println!(
                "{}: {}",
                result.classification.marker(),
                result.outcome.error_detail.as_deref().unwrap_or("unknown")
            ),
        }

        results.push(result);
    }

    results
}

// ---------------------------------------------------------------------------
// Name-resolution sweep
// ---------------------------------------------------------------------------

/// Probes every alias in the catalog to discover which facility names the
/// upstream service actually recognizes.
pub fn run_name_resolution_sweep<C: ProbeClient>(
    executor: &mut QueryExecutor<'_, C>,
) -> Vec<ClassifiedResult> {
    let candidates = name_resolution_candidates();
    println!("\n🔍 시설명 확인 ({} candidates)...", candidates.len());
    run_sweep(executor, &candidates)
}

// ---------------------------------------------------------------------------
// Granularity sweep
// ---------------------------------------------------------------------------

/// Probes all four time keys against one subject to discover which
/// granularities it supports at all.
pub fn run_granularity_sweep<C: ProbeClient>(
    executor: &mut QueryExecutor<'_, C>,
    subject: &GranularitySubject,
) -> Vec<ClassifiedResult> {
    println!(
        "\n🔍 시간 단위 확인: {} ({})...",
        subject.site_name,
        subject.facility_type.label_ko()
    );
    let candidates = granularity_candidates(subject);
    run_sweep(executor, &candidates)
}

// ---------------------------------------------------------------------------
// Boundary sweep
// ---------------------------------------------------------------------------

/// Results of one boundary sweep: the full per-step classifications plus
/// the derived maximum supported lookback.
pub struct BoundarySweepOutcome {
    pub finding: BoundaryFinding,
    pub results: Vec<ClassifiedResult>,
}

/// Walks the subject's ascending lookback ladder to find the deepest
/// WORKING step.
///
/// The whole ladder is always probed: upstream has been observed to fail a
/// step and then answer a deeper one, so stopping at the first failure
/// would both miss real support and make runs incomparable. The finding is
/// the maximum WORKING value, not "the step before the first failure".
pub fn run_boundary_sweep<C: ProbeClient>(
    executor: &mut QueryExecutor<'_, C>,
    subject: &BoundarySubject,
) -> BoundarySweepOutcome {
    println!(
        "\n🔍 최대 조회 기간 확인: {} {} ({})...",
        subject.site_name,
        subject.granularity.wire_key(),
        subject.granularity.label_ko()
    );
    let candidates = boundary_candidates(subject);
    let results = run_sweep(executor, &candidates);
    let finding = report::derive_boundary(subject.facility_type, subject.granularity, &results);

    match finding.max_supported_lookback_days {
        Some(days) => println!(
            "  💡 {} 최대 기간: {}일 (약 {:.1}년)",
            subject.granularity.wire_key(),
            days,
            f64::from(days) / 365.0
        ),
        None => println!("  💡 {} 지원 안함", subject.granularity.wire_key()),
    }

    BoundarySweepOutcome { finding, results }
}

/// Convenience: run every configured boundary subject.
pub fn run_boundary_sweeps<C: ProbeClient>(
    executor: &mut QueryExecutor<'_, C>,
) -> Vec<BoundarySweepOutcome> {
    catalog::BOUNDARY_SUBJECTS
        .iter()
        .map(|subject| run_boundary_sweep(executor, subject))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PacingPolicy;
    use crate::model::{Granularity, ProbeError};
    use serde_json::{Value, json};

    /// Fake collaborator keyed on (site, time_key, lookback). Anything not
    /// scripted answers `success=false`.
    struct ScriptedClient {
        working: Vec<(String, Granularity, u32, usize)>,
        erroring: Vec<(String, Granularity, u32)>,
    }

    impl ScriptedClient {
        fn new() -> Self {
            ScriptedClient {
                working: Vec::new(),
                erroring: Vec::new(),
            }
        }

        fn works(mut self, site: &str, granularity: Granularity, days: u32, points: usize) -> Self {
            self.working.push((site.to_string(), granularity, days, points));
            self
        }

        fn errors(mut self, site: &str, granularity: Granularity, days: u32) -> Self {
            self.erroring.push((site.to_string(), granularity, days));
            self
        }
    }

    impl ProbeClient for ScriptedClient {
        fn connect(&mut self) -> Result<(), ProbeError> {
            Ok(())
        }

        fn disconnect(&mut self) {}

        fn query(&mut self, candidate: &Candidate) -> Result<Value, ProbeError> {
            if self.erroring.iter().any(|(site, g, d)| {
                *site == candidate.site_name
                    && *g == candidate.granularity
                    && *d == candidate.lookback_days
            }) {
                return Err(ProbeError::Transport("scripted failure".to_string()));
            }

            let hit = self.working.iter().find(|(site, g, d, _)| {
                *site == candidate.site_name
                    && *g == candidate.granularity
                    && *d == candidate.lookback_days
            });

            match hit {
                Some((_, _, _, points)) => {
                    let records: Vec<Value> = (0..*points).map(|i| json!({"v": i})).collect();
                    Ok(json!({ "success": true, "data": records }))
                }
                None => Ok(json!({ "success": false, "data": [] })),
            }
        }
    }

    #[test]
    fn test_sweep_produces_one_result_per_candidate() {
        // Sequence completeness: N in, N out, however many probes fail.
        let mut client = ScriptedClient::new();
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let candidates = name_resolution_candidates();
        let results = run_sweep(&mut exec, &candidates);
        assert_eq!(results.len(), candidates.len());
        for (result, candidate) in results.iter().zip(&candidates) {
            assert_eq!(&result.outcome.candidate, candidate);
        }
    }

    #[test]
    fn test_sweep_continues_past_errors() {
        let subject = &catalog::GRANULARITY_SUBJECTS[0];
        let mut client = ScriptedClient::new()
            .errors(subject.site_name, Granularity::Min10, subject.lookback_days)
            .works(subject.site_name, Granularity::D1, subject.lookback_days, 4);
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let results = run_granularity_sweep(&mut exec, subject);

        assert_eq!(results.len(), 4, "an errored candidate must not end the sweep");
        assert_eq!(results[0].classification, Classification::Errored);
        assert_eq!(results[2].classification, Classification::Working);
    }

    #[test]
    fn test_granularity_sweep_working_set() {
        // Only d_1 answers with data → the WORKING set is exactly {d_1}.
        let subject = &catalog::GRANULARITY_SUBJECTS[0];
        let mut client =
            ScriptedClient::new().works(subject.site_name, Granularity::D1, subject.lookback_days, 3);
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let results = run_granularity_sweep(&mut exec, subject);

        let working: Vec<Granularity> = results
            .iter()
            .filter(|r| r.classification == Classification::Working)
            .map(|r| r.outcome.candidate.granularity)
            .collect();
        assert_eq!(working, vec![Granularity::D1]);
    }

    #[test]
    fn test_boundary_sweep_probes_whole_ladder_and_takes_max_working() {
        let subject = &catalog::BOUNDARY_SUBJECTS[1]; // 소양강댐 d_1
        let mut client = ScriptedClient::new();
        for days in [30, 90, 180, 365, 730] {
            client = client.works(subject.site_name, Granularity::D1, days, 10);
        }
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let outcome = run_boundary_sweep(&mut exec, subject);

        let ladder = catalog::lookback_ladder(Granularity::D1);
        assert_eq!(
            outcome.results.len(),
            ladder.len(),
            "every ladder step must be probed even after failures"
        );
        assert_eq!(outcome.finding.max_supported_lookback_days, Some(730));
    }

    #[test]
    fn test_boundary_sweep_surfaces_non_monotonic_support() {
        // 730 fails but 1095 works — a known upstream irregularity. The
        // finding must be 1095, not 365.
        let subject = &catalog::BOUNDARY_SUBJECTS[1];
        let mut client = ScriptedClient::new()
            .works(subject.site_name, Granularity::D1, 30, 10)
            .works(subject.site_name, Granularity::D1, 90, 10)
            .works(subject.site_name, Granularity::D1, 365, 10)
            .works(subject.site_name, Granularity::D1, 1095, 10);
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let outcome = run_boundary_sweep(&mut exec, subject);
        assert_eq!(outcome.finding.max_supported_lookback_days, Some(1095));
    }

    #[test]
    fn test_boundary_sweep_with_nothing_working_finds_no_boundary() {
        let subject = &catalog::BOUNDARY_SUBJECTS[0];
        let mut client = ScriptedClient::new();
        let mut exec = QueryExecutor::new(&mut client, PacingPolicy::none());
        let outcome = run_boundary_sweep(&mut exec, subject);
        assert_eq!(outcome.finding.max_supported_lookback_days, None);
        assert_eq!(
            outcome.results.len(),
            catalog::lookback_ladder(subject.granularity).len()
        );
    }
}
