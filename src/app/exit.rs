//! Exit-code policy.

use crate::config::FailOn;
use crate::InspectionReport;

/// Exit code for a run that completed but violated the `--fail-on` policy.
pub const POLICY_FAILURE_EXIT_CODE: i32 = 2;

/// Maps a completed run to a process exit code under `fail_on`.
///
/// Returns 0 when the policy is satisfied and
/// [`POLICY_FAILURE_EXIT_CODE`] when it is violated.
pub fn evaluate_exit_code(fail_on: FailOn, report: &InspectionReport) -> i32 {
    let violated = match fail_on {
        FailOn::Never => false,
        FailOn::AnyInvalid => report.invalid > 0,
        FailOn::CrossDomain => report.cross_domain > 0,
    };
    if violated {
        POLICY_FAILURE_EXIT_CODE
    } else {
        0
    }
}
