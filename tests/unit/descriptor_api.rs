//! Descriptor construction and registration through the public API.

use modgraph_cli::context::{Condition, TargetKind};
use modgraph_cli::core::ModgraphError;
use modgraph_cli::descriptor::{ConditionalRule, DependencyPatch, ModuleDescriptor};
use modgraph_cli::resolver::GraphBuilder;

#[test]
fn duplicate_within_a_list_is_rejected() {
    let err = ModuleDescriptor::builder("A").public(["B", "C", "B"]).build().unwrap_err();
    assert!(matches!(
        err,
        ModgraphError::DuplicateDependency { ref module, ref dependency, .. }
            if module == "A" && dependency == "B"
    ));
}

#[test]
fn duplicate_within_a_rule_is_rejected() {
    let err = ModuleDescriptor::builder("A")
        .rule(ConditionalRule::private(Condition::target(TargetKind::Editor), ["X", "X"]))
        .build()
        .unwrap_err();
    assert!(matches!(err, ModgraphError::DuplicateDependency { .. }));
}

#[test]
fn empty_names_are_rejected() {
    assert!(matches!(
        ModuleDescriptor::builder("").build().unwrap_err(),
        ModgraphError::InvalidDependency { .. }
    ));
    assert!(matches!(
        ModuleDescriptor::builder("A").private([" "]).build().unwrap_err(),
        ModgraphError::InvalidDependency { .. }
    ));
}

#[test]
fn extend_before_registration_then_sealed() {
    let mut descriptor = ModuleDescriptor::builder("Game").public(["Core"]).build().unwrap();
    descriptor
        .extend(DependencyPatch {
            private: vec!["Niagara".to_string()],
            ..Default::default()
        })
        .unwrap();
    assert_eq!(descriptor.private_dependencies(), ["Niagara"]);

    let mut builder = GraphBuilder::new();
    builder.register(descriptor).unwrap();

    let mut registered = builder.descriptor("Game").cloned().unwrap();
    let err = registered.extend(DependencyPatch::default()).unwrap_err();
    assert!(matches!(err, ModgraphError::MutationAfterRegistration { ref module } if module == "Game"));
}

#[test]
fn failed_extend_leaves_descriptor_unchanged() {
    let mut descriptor = ModuleDescriptor::builder("A").public(["B"]).build().unwrap();
    let err = descriptor
        .extend(DependencyPatch {
            public: vec!["C".to_string(), "B".to_string()],
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ModgraphError::DuplicateDependency { .. }));
    assert_eq!(descriptor.public_dependencies(), ["B"]);
}

#[test]
fn registration_rejects_duplicate_names() {
    let mut builder = GraphBuilder::new();
    builder.register(ModuleDescriptor::builder("Core").build().unwrap()).unwrap();
    let err = builder.register(ModuleDescriptor::builder("Core").public(["X"]).build().unwrap()).unwrap_err();
    assert!(matches!(err, ModgraphError::DuplicateModule { .. }));
    assert!(builder.descriptor("Core").unwrap().public_dependencies().is_empty());
}
