//! Integration tests for graph manifests
//!
//! Loads TOML graph declarations and resolves against the resulting graph.

mod common;

use bem_graph::core::entity::EntityName;
use bem_graph::core::manifest::GraphManifest;
use bem_graph::error::{BemGraphError, ManifestError};
use common::{init_tracing, SAMPLE_MANIFEST};

fn resolve_ids(manifest: &GraphManifest, entities: &[EntityName]) -> Result<Vec<String>, BemGraphError> {
    let graph = manifest.build_graph()?;
    let deps = graph.dependencies_of(entities, manifest.tech())?;
    Ok(deps
        .iter()
        .map(|d| format!("{}@{}", d.entity.id(), d.tech.as_deref().unwrap_or("-")))
        .collect())
}

#[test]
fn test_sample_manifest_resolves() {
    init_tracing();
    let manifest = GraphManifest::from_toml(SAMPLE_MANIFEST).unwrap();

    let ids = resolve_ids(&manifest, &[EntityName::block_mod("button", "size", "l")]).unwrap();

    assert_eq!(
        ids,
        vec![
            "button@css",
            "sprite@css",
            "button_size@css",
            "button_size_l@css",
            "icon@css",
        ]
    );
}

#[test]
fn test_manifest_without_naturalize_keeps_declared_edges_only() {
    init_tracing();
    let mut manifest = GraphManifest::from_toml(SAMPLE_MANIFEST).unwrap();
    manifest.settings.naturalize = false;
    manifest.settings.tech = None;

    let ids = resolve_ids(&manifest, &[EntityName::element("button", "text")]).unwrap();

    assert_eq!(ids, vec!["button__text@-"]);
}

#[test]
fn test_manifest_cycle_surfaces_as_resolver_error() {
    init_tracing();
    let manifest = GraphManifest::from_toml(
        r#"
[[entity]]
block = "a"
depends_on = [{ block = "b" }]

[[entity]]
block = "b"
depends_on = [{ block = "a" }]
"#,
    )
    .unwrap();

    let err = resolve_ids(&manifest, &[EntityName::block("a")]).unwrap_err();

    assert!(matches!(err, BemGraphError::Resolver(_)));
    assert!(err.to_string().contains("a -> b -> a"));
}

#[test]
fn test_invalid_manifest_lists_every_problem() {
    let manifest = GraphManifest::from_toml(
        r#"
[[entity]]
block = "ok"
links = [{ block = "bad name" }, { block = "x", mod_name = "m", mod_val = false }]
"#,
    )
    .unwrap();

    let err = manifest.build_graph().unwrap_err();
    let ManifestError::Invalid { errors } = &err else {
        panic!("expected validation failure, got {err}");
    };

    assert_eq!(errors.len(), 2, "errors: {errors:?}");
    assert!(errors[0].starts_with("entity[0].links[0].block"));
    assert!(errors[1].starts_with("entity[0].links[1]:"));
}
