//! Run summary and failure log for a radius recomputation.
//!
//! The summary is always produced. The failure log is a `Results` object
//! holding the summary and, when any point failed, a `Failures` group:
//!
//! ```text
//! Object = Results
//!   Group = Summary
//!     Successes = 41
//!     Failures  = 2
//!   End_Group
//!   # A point fails if we are unable to set universal ground or if the radius calculated is a special pixel value.
//!   Group = Failures
//!     PointIDs = "P07, P19"
//!   End_Group
//! End_Object
//! End
//! ```

use std::path::{Path, PathBuf};

use shared::{Pvl, PvlGroup, PvlKeyword};

use crate::radii::RadiusOutcome;

/// Log written when points failed and no log path was given.
pub const DEFAULT_FAILURE_LOG: &str = "failures.log";

const FAILURE_EXPLANATION: &str = "A point fails if we are unable to set universal ground \
     or if the radius calculated is a special pixel value.";

/// `Summary` group with the success and failure counts.
pub fn summary_group(outcome: &RadiusOutcome) -> PvlGroup {
    let mut summary = PvlGroup::new("Summary");
    summary.add_keyword(PvlKeyword::new("Successes", outcome.successes));
    summary.add_keyword(PvlKeyword::new("Failures", outcome.failures));
    summary
}

/// Summary for the application log, pointing at the failure log when one exists.
pub fn logged_summary(outcome: &RadiusOutcome, log_path: Option<&Path>) -> PvlGroup {
    let mut summary = summary_group(outcome);
    if let Some(path) = log_path.filter(|_| outcome.failures > 0) {
        summary.add_comment(format!(
            "Unable to calculate radius for all points. Point IDs for failures contained in [{}].",
            path.display()
        ));
    }
    summary
}

/// Where the failure log goes, if anywhere.
///
/// An explicit path always gets a log. Otherwise a log is only written when
/// some point failed, to [`DEFAULT_FAILURE_LOG`].
pub fn failure_log_path(explicit: Option<&Path>, outcome: &RadiusOutcome) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if outcome.failures > 0 => Some(PathBuf::from(DEFAULT_FAILURE_LOG)),
        None => None,
    }
}

/// The `Results` object written to the failure log.
pub fn results_log(outcome: &RadiusOutcome) -> Pvl {
    let mut results = Pvl::named("Results");
    results.add_group(summary_group(outcome));
    if outcome.failures > 0 {
        let mut failures = PvlGroup::new("Failures");
        failures.add_comment(FAILURE_EXPLANATION);
        failures.add_keyword(PvlKeyword::new("PointIDs", outcome.failed_id_list()));
        results.add_group(failures);
    }
    results
}

/// Write the failure log to `path`.
pub fn write_results_log(outcome: &RadiusOutcome, path: &Path) -> std::io::Result<()> {
    results_log(outcome).write_to_file(path)?;
    log::info!("Wrote results log {}", path.display());
    Ok(())
}
