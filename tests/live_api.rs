//! Live KDM API probes
//!
//! Manual checks against the real service, for validating the adapter and
//! refreshing the catalog after upstream changes. They are marked #[ignore]
//! so CI builds never depend on external API availability.
//!
//! To run manually:
//!   cargo test -- --ignored live_kdm

use kdm_probe::client::{KdmClient, ProbeClient};
use kdm_probe::config;
use kdm_probe::executor::{PacingPolicy, QueryExecutor};
use kdm_probe::model::{Candidate, Classification, FacilityType, Granularity};
use kdm_probe::classify::classify;

fn live_client() -> KdmClient {
    let settings = config::load().expect("settings should load");
    KdmClient::new(settings).expect("HTTP client should build")
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn live_kdm_session_can_be_established() {
    let mut client = live_client();
    client
        .connect()
        .expect("KDM status endpoint should be reachable");
    client.disconnect();
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn live_kdm_known_dam_returns_daily_data() {
    let mut client = live_client();
    client.connect().expect("session");

    let candidate = Candidate::new("소양강댐", FacilityType::Dam, "저수율", Granularity::D1, 3);
    let result = {
        let mut executor = QueryExecutor::new(&mut client, PacingPolicy::default());
        classify(executor.execute(&candidate))
    };
    client.disconnect();

    println!(
        "소양강댐 d_1: {} ({} data points, {:.2}s)",
        result.classification.marker(),
        result.outcome.data_points,
        result.outcome.elapsed.as_secs_f64()
    );
    assert_eq!(
        result.classification,
        Classification::Working,
        "the canonical multipurpose dam should always resolve: {:?}",
        result.outcome.error_detail
    );
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn live_kdm_unknown_site_fails_cleanly() {
    let mut client = live_client();
    client.connect().expect("session");

    let candidate = Candidate::new(
        "존재하지않는댐",
        FacilityType::Dam,
        "저수율",
        Granularity::D1,
        3,
    );
    let result = {
        let mut executor = QueryExecutor::new(&mut client, PacingPolicy::default());
        classify(executor.execute(&candidate))
    };
    client.disconnect();

    assert_ne!(
        result.classification,
        Classification::Working,
        "a made-up site name must not resolve"
    );
}
