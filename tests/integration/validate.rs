use modgraph_cli::test_utils::{GASP_MANIFEST, ManifestFixture};
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_validate_valid_manifest() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("is valid (5 modules)"));
}

#[test]
fn test_validate_reports_every_unknown_dependency() {
    let project = TestProject::with_manifest(&ManifestFixture::server_only_unknown().content).unwrap();

    let output = project.run_modgraph(&["validate"]).unwrap();
    output
        .assert_failure()
        .assert_stdout_contains("✗ Module 'Net' depends on 'Replication'")
        .assert_stdout_contains("✗ Module 'Net' depends on 'Sockets'")
        .assert_stdout_contains("(target: server)")
        .assert_stderr_contains("Validation failed with 2 problem(s)");
}

#[test]
fn test_validate_checks_all_targets_regardless_of_environment() {
    let project = TestProject::with_manifest(&ManifestFixture::server_only_unknown().content).unwrap();

    project
        .command()
        .arg("validate")
        .env("MODGRAPH_TARGET", "game")
        .assert()
        .failure()
        .stdout(predicate::str::contains("(target: server)"));

    project
        .command()
        .args(["validate", "--target", "game"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--target"));
}

#[test]
fn test_validate_reports_cycle() {
    let project = TestProject::with_manifest(&ManifestFixture::cyclic().content).unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Dependency cycle detected: Render → Physics → Render"));
}

#[test]
fn test_validate_strict_fails_on_unreachable_rule() {
    let project = TestProject::with_manifest(&ManifestFixture::unreachable_rule().content).unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠ Module 'Tools' has a rule that can never match"));

    project.command().args(["validate", "--strict"]).assert().failure();
}

#[test]
fn test_validate_json() {
    let project = TestProject::with_manifest(&ManifestFixture::cyclic().content).unwrap();

    let output = project.run_modgraph(&["validate", "--format", "json"]).unwrap();
    output.assert_failure();
    let json = output.json();
    assert_eq!(json["valid"], false);
    assert_eq!(json["modules"], 3);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_validate_json_with_broken_manifest() {
    let project = TestProject::with_manifest(&ManifestFixture::invalid_syntax().content).unwrap();

    let output = project.run_modgraph(&["validate", "--format", "json"]).unwrap();
    output.assert_failure();
    let json = output.json();
    assert_eq!(json["valid"], false);
    assert!(json["errors"][0].as_str().unwrap().contains("Invalid manifest file syntax"));
}
