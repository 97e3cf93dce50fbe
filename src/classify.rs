/// Result Classifier
///
/// Maps a canonical probe outcome to WORKING / FAILED / ERRORED. Pure and
/// total: every outcome classifies, nothing throws.

use crate::model::{Classification, ClassifiedResult, ProbeOutcome};

/// WORKING iff the upstream reported success AND returned at least one
/// record — a bare success flag over an empty payload does not count as
/// support. ERRORED iff the query itself failed; everything else FAILED.
pub fn classify(outcome: ProbeOutcome) -> ClassifiedResult {
    let classification = if outcome.succeeded && outcome.data_points > 0 {
        Classification::Working
    } else if outcome.error_detail.is_some() {
        Classification::Errored
    } else {
        Classification::Failed
    };

    ClassifiedResult {
        outcome,
        classification,
    }
}
