use modgraph_cli::test_utils::GASP_MANIFEST;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_surface_text() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();

    project
        .command()
        .args(["surface", "PoseSearch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("public surface: Engine, Core"))
        .stdout(predicate::str::contains("accessible:     Engine, Core"));
}

#[test]
fn test_surface_json_excludes_private_dependencies() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();

    let output = project.run_modgraph(&["surface", "GASP", "--target", "editor", "--format", "json"]).unwrap();
    output.assert_success();
    let json = output.json();

    assert_eq!(json["module"], "GASP");
    assert_eq!(json["public_surface"], serde_json::json!(["Core", "Engine"]));
    assert_eq!(
        json["accessible"],
        serde_json::json!(["Core", "Engine", "PoseSearch", "GameplayDebugger"])
    );
}

#[test]
fn test_surface_of_module_with_private_only_dependency() {
    let project = TestProject::with_manifest(GASP_MANIFEST).unwrap();

    let output = project.run_modgraph(&["surface", "GameplayDebugger", "--format", "json"]).unwrap();
    output.assert_success();
    assert_eq!(output.json()["public_surface"], serde_json::json!([]));
}
