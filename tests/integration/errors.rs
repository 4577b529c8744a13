use modgraph_cli::test_utils::ManifestFixture;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_missing_manifest() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("modgraph.toml not found"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_parse_error_names_file() {
    let project = TestProject::with_manifest(&ManifestFixture::invalid_syntax().content).unwrap();

    let output = project.run_modgraph(&["resolve"]).unwrap();
    output.assert_failure().assert_stderr_contains("Invalid manifest file syntax");
    assert!(output.stderr.contains("modgraph.toml"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cycle_fails_resolution_without_output() {
    let project = TestProject::with_manifest(&ManifestFixture::cyclic().content).unwrap();

    let output = project.run_modgraph(&["resolve", "--format", "json"]).unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Dependency cycle detected: Render → Physics → Render");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_dependency_names_both_modules() {
    let project = TestProject::with_manifest(&ManifestFixture::server_only_unknown().content).unwrap();

    project.command().arg("resolve").assert().success();
    project
        .command()
        .args(["resolve", "--target", "server"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Module 'Net' depends on 'Replication'"));
}

#[test]
fn test_duplicate_module_in_manifest() {
    let project = TestProject::with_manifest("[[module]]\nname = \"Core\"\n\n[[module]]\nname = \"Core\"\n").unwrap();

    project
        .command()
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Module 'Core' is registered more than once"));
}

#[test]
fn test_patch_for_unknown_module() {
    let project = TestProject::with_manifest(
        "[[module]]\nname = \"Core\"\n\n[[patch]]\nmodule = \"Engine\"\npublic = [\"Core\"]\n",
    )
    .unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Module 'Engine' is not declared"));
}
