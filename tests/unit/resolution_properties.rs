//! Properties that hold for every resolution: determinism, public-wins merging,
//! surface propagation and all-or-nothing failure.

use modgraph_cli::context::{BuildContext, Condition, Platform, TargetKind};
use modgraph_cli::core::{ModgraphError, Visibility};
use modgraph_cli::descriptor::{ConditionalRule, ModuleDescriptor};
use modgraph_cli::resolver::{GraphBuilder, resolve_targets};
use std::sync::Arc;

fn module(name: &str, public: &[&str], private: &[&str]) -> ModuleDescriptor {
    ModuleDescriptor::builder(name)
        .public(public.iter().copied())
        .private(private.iter().copied())
        .build()
        .unwrap()
}

fn builder(modules: Vec<ModuleDescriptor>) -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    builder.register_all(modules).unwrap();
    builder
}

#[test]
fn identical_inputs_give_identical_graphs() {
    let make = || {
        builder(vec![
            module("Core", &[], &[]),
            module("Render", &["Core"], &[]),
            module("Audio", &["Core"], &[]),
            module("Game", &["Render"], &["Audio"]),
        ])
    };

    for ctx in BuildContext::all_combinations().take(10) {
        let a = make().resolve(&ctx).unwrap();
        let b = make().resolve(&ctx).unwrap();
        assert_eq!(a.graph().edges(), b.graph().edges());
        assert_eq!(a.surfaces(), b.surfaces());
        assert_eq!(a.build_order(), b.build_order());
    }
}

#[test]
fn public_wins_over_private_from_a_rule() {
    let b = builder(vec![
        module("X", &[], &[]),
        ModuleDescriptor::builder("A")
            .private(["X"])
            .rule(ConditionalRule::public(Condition::platform(Platform::Android), ["X"]))
            .build()
            .unwrap(),
        module("User", &["A"], &[]),
    ]);

    let android = BuildContext::builder().platform(Platform::Android).build();
    let resolution = b.resolve(&android).unwrap();
    assert_eq!(resolution.resolved("A").unwrap().get("X"), Some(Visibility::Public));
    assert_eq!(resolution.public_surface("User").unwrap(), ["A", "X"]);

    let linux = b.resolve(&BuildContext::default()).unwrap();
    assert_eq!(linux.public_surface("User").unwrap(), ["A"]);
}

#[test]
fn surface_never_contains_private_dependencies() {
    let b = builder(vec![
        module("D", &[], &[]),
        module("C", &["D"], &[]),
        module("B", &["C"], &["D"]),
        module("A", &[], &["B"]),
    ]);
    let resolution = b.resolve(&BuildContext::default()).unwrap();

    assert!(resolution.public_surface("A").unwrap().is_empty());
    assert_eq!(resolution.public_surface("B").unwrap(), ["C", "D"]);
    assert_eq!(resolution.transitive_dependencies("A"), vec!["B", "C", "D"]);
}

#[test]
fn unknown_dependency_names_referrer_and_target() {
    let b = builder(vec![module("A", &["Ghost"], &[])]);
    match b.resolve(&BuildContext::default()).unwrap_err() {
        ModgraphError::UnknownDependency {
            module,
            dependency,
        } => assert_eq!((module.as_str(), dependency.as_str()), ("A", "Ghost")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn three_module_cycle_reports_concrete_path() {
    let b = builder(vec![module("A", &["B"], &[]), module("B", &[], &["C"]), module("C", &["A"], &[])]);
    let err = b.build(&BuildContext::default()).unwrap_err();
    assert_eq!(err.to_string(), "Dependency cycle detected: A → B → C → A");
}

#[test]
fn cycle_only_in_one_context() {
    let b = builder(vec![
        module("A", &["B"], &[]),
        ModuleDescriptor::builder("B")
            .rule(ConditionalRule::private(Condition::target(TargetKind::Editor).negate(), ["A"]))
            .build()
            .unwrap(),
    ]);

    assert!(b.build(&BuildContext::new(TargetKind::Editor)).is_ok());
    assert!(matches!(
        b.build(&BuildContext::new(TargetKind::Game)).unwrap_err(),
        ModgraphError::DependencyCycle { .. }
    ));
}

#[tokio::test]
async fn concurrent_resolution_matches_sequential() {
    let b = Arc::new(builder(vec![
        module("Core", &[], &[]),
        ModuleDescriptor::builder("Net")
            .public(["Core"])
            .rule(ConditionalRule::public(
                Condition::Any(vec![
                    Condition::target(TargetKind::Server),
                    Condition::target(TargetKind::Client),
                ]),
                ["Core"],
            ))
            .build()
            .unwrap(),
    ]));

    let contexts: Vec<_> = BuildContext::all_combinations().collect();
    let concurrent = resolve_targets(Arc::clone(&b), contexts.clone()).await;

    for (ctx, result) in contexts.iter().zip(concurrent) {
        let sequential = b.resolve(ctx).unwrap();
        let concurrent = result.unwrap();
        assert_eq!(concurrent.graph().edges(), sequential.graph().edges());
        assert_eq!(concurrent.context(), ctx);
    }
}
