//! Loading descriptors from modgraph.toml files.

use modgraph_cli::context::{BuildContext, TargetKind};
use modgraph_cli::manifest::{Manifest, find_manifest_from};
use modgraph_cli::test_utils::ManifestFixture;
use tempfile::TempDir;

#[tokio::test]
async fn load_and_resolve_fixture() {
    let temp = TempDir::new().unwrap();
    let path = ManifestFixture::gasp().write_to(temp.path()).unwrap();

    let manifest = Manifest::load(&path).await.unwrap();
    let builder = manifest.into_builder().unwrap();
    assert_eq!(builder.len(), 5);

    let editor = builder.resolve(&BuildContext::new(TargetKind::Editor)).unwrap();
    assert!(editor.resolved("GASP").unwrap().contains("GameplayDebugger"));
}

#[tokio::test]
async fn registration_order_follows_file_order() {
    let temp = TempDir::new().unwrap();
    let path = ManifestFixture::cyclic().write_to(temp.path()).unwrap();

    let manifest = Manifest::load(&path).await.unwrap();
    let names: Vec<_> = manifest.into_builder().unwrap().descriptors().iter().map(|d| d.name().to_string()).collect();
    assert_eq!(names, vec!["Core", "Render", "Physics"]);
}

#[test]
fn discovery_from_nested_directory() {
    let temp = TempDir::new().unwrap();
    let path = ManifestFixture::gasp().write_to(temp.path()).unwrap();
    let nested = temp.path().join("Plugins").join("GASP").join("Source");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_manifest_from(nested).unwrap(), path);
}

#[test]
fn rule_conditions_round_trip_through_toml() {
    let manifest: Manifest = r#"
        [[module]]
        name = "Core"

        [[module]]
        name = "Tools"

        [[module.rule]]
        when = { all = [{ not = { configuration = "shipping" } }, { any = [{ platform = "win64" }, { platform = "mac" }] }] }
        private = ["Core"]
    "#
    .parse()
    .unwrap();

    let rendered = toml::to_string(&manifest).unwrap();
    let reparsed: Manifest = rendered.parse().unwrap();
    assert_eq!(reparsed, manifest);
}
