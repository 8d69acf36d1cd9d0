//! Tests for exit code policies (--fail-on flag)

use redirect_inspector::app::POLICY_FAILURE_EXIT_CODE;
use redirect_inspector::{evaluate_exit_code, AggregatedReport, FailOn, InspectionReport};

fn report(cross_domain: usize, same_domain: usize, invalid: usize) -> InspectionReport {
    InspectionReport {
        total_urls: cross_domain + same_domain + invalid,
        cross_domain,
        same_domain,
        invalid,
        skipped: 0,
        cancelled: false,
        elapsed_seconds: 1.0,
        results: AggregatedReport::default(),
        written: Vec::new(),
    }
}

#[test]
fn test_fail_on_never_always_returns_zero() {
    assert_eq!(evaluate_exit_code(FailOn::Never, &report(3, 2, 5)), 0);
    assert_eq!(evaluate_exit_code(FailOn::Never, &report(0, 0, 0)), 0);
}

#[test]
fn test_fail_on_any_invalid() {
    assert_eq!(
        evaluate_exit_code(FailOn::AnyInvalid, &report(0, 4, 1)),
        POLICY_FAILURE_EXIT_CODE
    );
    assert_eq!(evaluate_exit_code(FailOn::AnyInvalid, &report(2, 4, 0)), 0);
}

#[test]
fn test_fail_on_cross_domain() {
    assert_eq!(
        evaluate_exit_code(FailOn::CrossDomain, &report(1, 0, 0)),
        POLICY_FAILURE_EXIT_CODE
    );
    assert_eq!(evaluate_exit_code(FailOn::CrossDomain, &report(0, 3, 7)), 0);
}

#[test]
fn test_policy_failure_code_is_distinct_from_fatal_error() {
    assert_eq!(POLICY_FAILURE_EXIT_CODE, 2);
}
