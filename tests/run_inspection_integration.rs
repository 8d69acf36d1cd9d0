//! Integration tests for `run_inspection`: input file in, report files out.

use std::path::Path;

use httptest::{matchers::*, responders::*, Expectation, ServerBuilder};
use redirect_inspector::export::ReportKind;
use redirect_inspector::{run_inspection, Config, OutputPaths};
use tempfile::TempDir;

fn outputs_in(dir: &Path, jsonl: bool) -> OutputPaths {
    OutputPaths {
        cross_domain: dir.join("redirected_domains.txt"),
        same_domain: dir.join("same_domain_redirects.txt"),
        invalid: dir.join("invalid_or_failed.txt"),
        valid: dir.join("valid_redirects.txt"),
        jsonl: jsonl.then(|| dir.join("results.jsonl")),
    }
}

fn test_config(input: &Path, outputs: OutputPaths) -> Config {
    Config {
        file: input.to_path_buf(),
        worker_count: 4,
        max_redirects: 5,
        timeout_seconds: 5,
        user_agent: "redirect_inspector-test/1.0".to_string(),
        outputs,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_run_inspection_writes_category_files() {
    let server = ServerBuilder::new()
        .bind_addr("127.0.0.1:0".parse().unwrap())
        .run()
        .unwrap();
    let addr = server.addr();
    server.expect(
        Expectation::matching(request::method_path("GET", "/same"))
            .respond_with(status_code(302).append_header("Location", "/landing")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/landing"))
            .respond_with(status_code(200)),
    );

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("urls.txt");
    std::fs::write(
        &input,
        format!("http://{}/same\n\nnot a url\n", addr),
    )
    .expect("Failed to write input");
    let outputs = outputs_in(temp_dir.path(), true);

    let report = run_inspection(test_config(&input, outputs.clone()))
        .await
        .expect("run should succeed");

    assert_eq!(report.total_urls, 2);
    assert_eq!(report.same_domain, 1);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.cross_domain, 0);
    assert!(!report.cancelled);
    assert_eq!(report.results.processed, 2);

    let same = std::fs::read_to_string(&outputs.same_domain).unwrap();
    assert_eq!(
        same,
        format!(
            "FROM: http://{addr}/same\n  TO: http://{addr}/landing (1 redirects)\n  Domain: 127.0.0.1\n\n"
        )
    );

    let invalid = std::fs::read_to_string(&outputs.invalid).unwrap();
    assert!(invalid.starts_with("URL: not a url\n  STATUS: INVALID_URL\n  REASON: "));

    // No cross-domain results, so neither cross-domain file exists
    assert!(!outputs.cross_domain.exists());
    assert!(!outputs.valid.exists());

    let jsonl_path = outputs.jsonl.as_ref().unwrap();
    let lines: Vec<serde_json::Value> = std::fs::read_to_string(jsonl_path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 0);
    assert_eq!(lines[0]["category"], "same_domain");
    assert_eq!(lines[1]["category"], "invalid");

    let kinds: Vec<ReportKind> = report.written.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![ReportKind::SameDomain, ReportKind::Invalid, ReportKind::Jsonl]
    );
}

#[tokio::test]
async fn test_run_inspection_cross_domain_goes_to_both_redirect_files() {
    let server = ServerBuilder::new()
        .bind_addr("127.0.0.1:0".parse().unwrap())
        .run()
        .unwrap();
    let port = server.addr().port();
    // 127.0.0.1 and localhost are different registrable domains
    server.expect(
        Expectation::matching(request::method_path("GET", "/out")).respond_with(
            status_code(301).append_header("Location", format!("http://localhost:{}/in", port)),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/in"))
            .respond_with(status_code(200)),
    );

    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("urls.txt");
    std::fs::write(&input, format!("http://127.0.0.1:{}/out\n", port)).unwrap();
    let outputs = outputs_in(temp_dir.path(), false);

    let report = run_inspection(test_config(&input, outputs.clone()))
        .await
        .expect("run should succeed");

    assert_eq!(report.cross_domain, 1);
    let cross = std::fs::read_to_string(&outputs.cross_domain).unwrap();
    assert!(cross.contains("  Initial Domain: 127.0.0.1\n"));
    assert!(cross.contains("  Final Domain:   localhost\n"));
    assert_eq!(cross, std::fs::read_to_string(&outputs.valid).unwrap());
    assert!(!outputs.same_domain.exists());
}

#[tokio::test]
async fn test_run_inspection_missing_input_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let outputs = outputs_in(temp_dir.path(), false);
    let config = test_config(&temp_dir.path().join("missing.txt"), outputs);

    let err = run_inspection(config).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to open input file"));
}

#[tokio::test]
async fn test_run_inspection_rejects_zero_workers() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("urls.txt");
    std::fs::write(&input, "https://example.com\n").unwrap();
    let mut config = test_config(&input, outputs_in(temp_dir.path(), false));
    config.worker_count = 0;

    let err = run_inspection(config).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid configuration"));
}

#[tokio::test]
async fn test_run_inspection_empty_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("urls.txt");
    std::fs::write(&input, "\n   \n\n").unwrap();
    let outputs = outputs_in(temp_dir.path(), false);

    let report = run_inspection(test_config(&input, outputs.clone()))
        .await
        .expect("run should succeed");

    assert_eq!(report.total_urls, 0);
    assert!(report.written.is_empty());
    assert!(!outputs.invalid.exists());
}
