//! End-to-end pipeline tests: real adapters behind the routing service.

use std::fs;
use std::path::Path;

use edgeroute_adapters::{
    DeclaredArtifacts, InMemoryManifest, JsonManifestFile, LocalDocumentSink, MemoryDocumentSink,
    OutputDirCatalog, emitter_for,
};
use edgeroute_core::{
    application::RoutingService,
    domain::{DomainError, Platform, ResolverPolicy, TieBreak},
    error::EdgeRouteError,
};
use tempfile::TempDir;

const SITE: &str = r#"{
    "routes": [
        { "pattern": "/", "kind": "dynamic-function", "target": "render" },
        { "pattern": "/about", "kind": "static-file", "target": "/about.html" },
        { "pattern": "/blog/[slug]", "kind": "prerendered", "target": "/blog/post.html" },
        { "pattern": "/blog/404", "kind": "error-page", "target": "/blog/404.html" },
        { "pattern": "/404", "kind": "error-page", "target": "/404.html" }
    ],
    "artifacts": {
        "files": ["/about.html", "/blog/post.html", "/blog/404.html", "/404.html"],
        "functions": ["render"]
    }
}"#;

fn service(manifest: &str, platform: Platform) -> RoutingService {
    RoutingService::new(
        Box::new(InMemoryManifest::from_json(manifest).unwrap()),
        Box::new(DeclaredArtifacts::new()),
        emitter_for(platform),
    )
}

fn sources(contents: &str) -> Vec<String> {
    let json: serde_json::Value = serde_json::from_str(contents).unwrap();
    json["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["src"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn vercel_document_orders_scoped_fallbacks_before_catch_all() {
    let document = service(SITE, Platform::Vercel).render().unwrap();
    assert_eq!(
        sources(&document.contents),
        vec!["/about", "/", "/blog/[^/]+", "/blog(?:/.*)?", "/.*"]
    );
}

#[test]
fn rendering_is_byte_identical() {
    for platform in Platform::ALL {
        let first = service(SITE, platform).render().unwrap();
        let second = service(SITE, platform).render().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn ambiguous_manifest_writes_nothing() {
    let manifest = r#"{
        "routes": [
            { "pattern": "/shop", "kind": "static-file", "target": "/shop.html" },
            { "pattern": "/shop", "kind": "dynamic-function", "target": "shop" }
        ],
        "artifacts": { "files": ["/shop.html"], "functions": ["shop"] }
    }"#;
    let sink = MemoryDocumentSink::new();

    let err = service(manifest, Platform::Vercel).deploy(&sink).unwrap_err();
    assert!(matches!(
        err,
        EdgeRouteError::Domain(DomainError::AmbiguousRoute(_))
    ));
    assert!(err.to_string().contains("/shop.html"));
    assert!(sink.is_empty());
}

#[test]
fn lexicographic_policy_orders_equal_dynamic_routes() {
    let manifest = r#"{
        "routes": [
            { "pattern": "/web/[page]", "kind": "function", "target": "web" },
            { "pattern": "/api/[call]", "kind": "function", "target": "api" }
        ],
        "artifacts": { "functions": ["web", "api"] }
    }"#;
    let policy = ResolverPolicy {
        tie_break: TieBreak::Lexicographic,
        ..ResolverPolicy::default()
    };
    let document = service(manifest, Platform::Vercel)
        .with_policy(policy)
        .render()
        .unwrap();
    assert_eq!(
        sources(&document.contents),
        vec!["/api/[^/]+", "/web/[^/]+", "/.*"]
    );
}

fn write_build_output(root: &Path) {
    fs::create_dir_all(root.join("static")).unwrap();
    fs::write(root.join("static/about.html"), "about").unwrap();
    fs::write(root.join("static/404.html"), "missing").unwrap();
    fs::create_dir_all(root.join("functions/render.func")).unwrap();
    fs::write(
        root.join("routes.json"),
        r#"{ "routes": [
            { "pattern": "/about", "kind": "static-file", "target": "about.html" },
            { "pattern": "/", "kind": "ssr", "target": "render" },
            { "pattern": "/404", "kind": "error-page", "target": "404.html" }
        ] }"#,
    )
    .unwrap();
}

#[test]
fn deploys_from_scanned_output_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_build_output(root);

    let service = RoutingService::new(
        Box::new(JsonManifestFile::new(root.join("routes.json"))),
        Box::new(OutputDirCatalog::new(root)),
        emitter_for(Platform::Vercel),
    );
    let path = service.deploy(&LocalDocumentSink::new(root)).unwrap();

    assert_eq!(path, root.join("config.json"));
    let written = fs::read_to_string(path).unwrap();
    assert_eq!(sources(&written), vec!["/about", "/", "/.*"]);
    assert!(written.ends_with("}\n"));
}

#[test]
fn dangling_target_is_reported_with_its_pattern() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_build_output(root);
    fs::remove_file(root.join("static/about.html")).unwrap();

    let service = RoutingService::new(
        Box::new(JsonManifestFile::new(root.join("routes.json"))),
        Box::new(OutputDirCatalog::new(root)),
        emitter_for(Platform::Netlify),
    );
    let err = service.render().unwrap_err();
    assert!(matches!(err, EdgeRouteError::Domain(DomainError::Manifest(_))));
    assert!(err.to_string().contains("/about"));
}
