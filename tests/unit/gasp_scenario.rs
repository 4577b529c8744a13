//! The gameplay animation sample resolved for game and editor builds.

use modgraph_cli::context::{BuildContext, TargetKind};
use modgraph_cli::core::Visibility;
use modgraph_cli::resolver::ResolvedDependencies;
use modgraph_cli::test_utils::{gasp_builder, init_test_logging};

fn entries(resolved: &ResolvedDependencies) -> Vec<(String, Visibility)> {
    resolved.iter().map(|d| (d.name.clone(), d.visibility)).collect()
}

#[test]
fn gasp_game_build() {
    init_test_logging(None);
    let resolution = gasp_builder().resolve(&BuildContext::new(TargetKind::Game)).unwrap();

    assert_eq!(
        entries(resolution.resolved("GASP").unwrap()),
        vec![
            ("Core".to_string(), Visibility::Public),
            ("Engine".to_string(), Visibility::Public),
            ("PoseSearch".to_string(), Visibility::Private),
        ]
    );
    assert_eq!(resolution.public_surface("GASP").unwrap(), ["Core", "Engine"]);
}

#[test]
fn gasp_editor_build() {
    init_test_logging(None);
    let resolution = gasp_builder().resolve(&BuildContext::new(TargetKind::Editor)).unwrap();

    assert_eq!(
        entries(resolution.resolved("GASP").unwrap()),
        vec![
            ("Core".to_string(), Visibility::Public),
            ("Engine".to_string(), Visibility::Public),
            ("PoseSearch".to_string(), Visibility::Private),
            ("GameplayDebugger".to_string(), Visibility::Private),
        ]
    );
    assert_eq!(resolution.public_surface("GASP").unwrap(), ["Core", "Engine"]);
}

#[test]
fn gasp_descriptor_is_shared_between_contexts() {
    let builder = gasp_builder();
    let game = builder.resolve(&BuildContext::new(TargetKind::Game)).unwrap();
    let editor = builder.resolve(&BuildContext::new(TargetKind::Editor)).unwrap();

    assert_eq!(game.graph().edge_count() + 1, editor.graph().edge_count());
    // Resolving never touches the registered descriptor
    assert_eq!(builder.descriptor("GASP").unwrap().rules().len(), 1);
    assert!(builder.descriptor("GASP").unwrap().is_sealed());
}

#[test]
fn gasp_dependents_of_engine() {
    let resolution = gasp_builder().resolve(&BuildContext::new(TargetKind::Editor)).unwrap();
    assert_eq!(resolution.dependents("Engine"), vec!["PoseSearch", "GameplayDebugger", "GASP"]);
    assert!(resolution.to_tree_string("GASP", Some(1)).contains("└── GameplayDebugger [private]\n"));
}
