use modgraph_cli::test_utils::GASP_MANIFEST;
use predicates::prelude::*;

use crate::common::TestProject;

fn manifest_with_build(target: &str) -> String {
    format!("[build]\ntarget = \"{target}\"\nplatform = \"win64\"\n{GASP_MANIFEST}")
}

#[test]
fn test_build_table_sets_default_context() {
    let project = TestProject::with_manifest(&manifest_with_build("editor")).unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Context: editor win64 development"));
}

#[test]
fn test_environment_overrides_build_table() {
    let project = TestProject::with_manifest(&manifest_with_build("editor")).unwrap();

    project
        .command()
        .arg("resolve")
        .env("MODGRAPH_TARGET", "server")
        .env("MODGRAPH_CONFIGURATION", "shipping")
        .assert()
        .success()
        .stdout(predicate::str::contains("Context: server win64 shipping"));
}

#[test]
fn test_flag_overrides_environment() {
    let project = TestProject::with_manifest(&manifest_with_build("editor")).unwrap();

    project
        .command()
        .args(["resolve", "--target", "client"])
        .env("MODGRAPH_TARGET", "server")
        .assert()
        .success()
        .stdout(predicate::str::contains("Context: client win64 development"));
}

#[test]
fn test_invalid_environment_value_rejected() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();

    project
        .command()
        .arg("resolve")
        .env("MODGRAPH_PLATFORM", "amiga")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform 'amiga'"));
}

#[test]
fn test_manifest_found_from_subdirectory() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();
    let nested = project.project_path().join("Source").join("GASP");
    std::fs::create_dir_all(&nested).unwrap();

    project
        .command_in(&nested)
        .args(["surface", "GASP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public surface: Core, Engine"));
}

#[test]
fn test_explicit_manifest_path() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();

    project
        .command_in(elsewhere.path())
        .arg("--manifest-path")
        .arg(project.manifest_path())
        .args(["tree", "Engine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Engine\n└── Core\n"));
}
