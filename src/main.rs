use anyhow::Context;
use chrono::Utc;
use kdm_probe::catalog;
use kdm_probe::client::{KdmClient, ProbeClient};
use kdm_probe::config;
use kdm_probe::executor::{PacingPolicy, QueryExecutor};
use kdm_probe::model::ClassifiedResult;
use kdm_probe::report::Report;
use kdm_probe::sweep;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = config::load().context("loading KDM connection settings")?;
    let pacing = PacingPolicy::fixed(settings.pacing());

    println!("{}", "=".repeat(70));
    println!("KDM Capability Probe");
    println!("시작: {}", Utc::now().to_rfc3339());
    println!("{}", "=".repeat(70));

    let mut client = KdmClient::new(settings)?;
    // A failed connect aborts the whole run — no sweeps, no report.
    client
        .connect()
        .context("KDM session could not be established")?;

    let report = run_all_sweeps(&mut client, pacing);

    // The session is released exactly once, after the last sweep.
    client.disconnect();

    print!("{}", report.render());
    Ok(())
}

/// Runs the full probe suite and aggregates everything into one report.
/// Sweeps absorb per-candidate failures, so once a session exists a report
/// always comes back — even if every single probe failed.
fn run_all_sweeps<C: ProbeClient>(client: &mut C, pacing: PacingPolicy) -> Report {
    let mut executor = QueryExecutor::new(client, pacing);
    let mut results: Vec<ClassifiedResult> = Vec::new();

    results.extend(sweep::run_name_resolution_sweep(&mut executor));

    for subject in catalog::GRANULARITY_SUBJECTS {
        results.extend(sweep::run_granularity_sweep(&mut executor, subject));
    }

    let mut boundary_pairs = Vec::new();
    for outcome in sweep::run_boundary_sweeps(&mut executor) {
        boundary_pairs.push((outcome.finding.facility_type, outcome.finding.granularity));
        results.extend(outcome.results);
    }

    Report::aggregate_with_boundaries(&results, &boundary_pairs)
}
