//! Routing Service - main application orchestrator.
//!
//! This service coordinates the whole pipeline:
//! 1. Load the manifest and inventory the build output
//! 2. Collect and resolve the route table
//! 3. Emit the platform document
//! 4. Hand it to a sink
//!
//! Every stage must succeed before anything is written.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{ArtifactCatalog, ConfigEmitter, DocumentSink, ManifestSource},
    domain::{
        ConfigDocument, DomainValidator as validator, Platform, ResolvedRoutes, ResolverPolicy,
        plan_routes,
    },
    error::EdgeRouteResult,
};

/// One resolved rule, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub position: usize,
    pub pattern: String,
    pub kind: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub specificity: u32,
}

impl RouteInfo {
    pub fn from_resolved(routes: &ResolvedRoutes) -> Vec<Self> {
        routes
            .iter()
            .enumerate()
            .map(|(position, rule)| Self {
                position,
                pattern: rule.pattern().to_string(),
                kind: rule.kind().to_string(),
                target: rule.target().to_string(),
                status: rule.status(),
                specificity: rule.specificity().value(),
            })
            .collect()
    }
}

/// Main routing service.
///
/// Owns the adapters for one invocation; holds no state between calls.
pub struct RoutingService {
    source: Box<dyn ManifestSource>,
    catalog: Box<dyn ArtifactCatalog>,
    emitter: Box<dyn ConfigEmitter>,
    policy: ResolverPolicy,
}

impl RoutingService {
    /// Create a new routing service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use edgeroute_core::application::RoutingService;
    /// # use edgeroute_core::application::{ArtifactCatalog, ConfigEmitter, ManifestSource};
    /// # let source: Box<dyn ManifestSource> = unimplemented!();
    /// # let catalog: Box<dyn ArtifactCatalog> = unimplemented!();
    /// # let emitter: Box<dyn ConfigEmitter> = unimplemented!();
    ///
    /// let service = RoutingService::new(
    ///     source,  // impl ManifestSource
    ///     catalog, // impl ArtifactCatalog
    ///     emitter, // impl ConfigEmitter
    /// );
    /// ```
    pub fn new(
        source: Box<dyn ManifestSource>,
        catalog: Box<dyn ArtifactCatalog>,
        emitter: Box<dyn ConfigEmitter>,
    ) -> Self {
        Self {
            source,
            catalog,
            emitter,
            policy: ResolverPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResolverPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn platform(&self) -> Platform {
        self.emitter.platform()
    }

    /// Load, collect and resolve. No document is produced.
    #[instrument(skip_all, fields(manifest = %self.source.describe()))]
    pub fn plan(&self) -> EdgeRouteResult<ResolvedRoutes> {
        let manifest = self.source.load()?;
        let outputs = self.catalog.inventory(&manifest)?;
        debug!(
            routes = manifest.routes.len(),
            files = outputs.files().count(),
            functions = outputs.functions().count(),
            "Manifest loaded"
        );

        let resolved = plan_routes(&manifest, &outputs, self.policy.clone())?;
        info!(rules = resolved.len(), "Route table resolved");
        Ok(resolved)
    }

    /// Plan and emit the platform document.
    #[instrument(skip_all, fields(platform = %self.platform()))]
    pub fn render(&self) -> EdgeRouteResult<ConfigDocument> {
        let routes = self.plan()?;
        self.emit(&routes)
    }

    /// Emit a document for an already resolved table.
    pub fn emit(&self, routes: &ResolvedRoutes) -> EdgeRouteResult<ConfigDocument> {
        validator::validate_resolved(routes)?;
        let document = self.emitter.emit(routes)?;
        debug!(
            file = %document.file_name,
            bytes = document.size(),
            "Config document emitted"
        );
        Ok(document)
    }

    /// Plan, emit, and write through the sink.
    #[instrument(skip_all, fields(platform = %self.platform()))]
    pub fn deploy(&self, sink: &dyn DocumentSink) -> EdgeRouteResult<PathBuf> {
        let document = self.render()?;
        let path = sink.write(&document)?;
        info!(path = %path.display(), "Routing config written");
        Ok(path)
    }

    /// The resolved table flattened for display.
    pub fn describe_routes(&self) -> EdgeRouteResult<Vec<RouteInfo>> {
        Ok(RouteInfo::from_resolved(&self.plan()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::output::{
        MockArtifactCatalog, MockConfigEmitter, MockDocumentSink, MockManifestSource,
    };
    use crate::domain::{BuildManifest, BuildOutputs, ManifestEntry, RouteKind};
    use crate::error::EdgeRouteError;

    fn source(manifest: BuildManifest) -> Box<MockManifestSource> {
        let mut source = MockManifestSource::new();
        source.expect_describe().return_const("memory".to_string());
        source
            .expect_load()
            .returning(move || Ok(manifest.clone()));
        Box::new(source)
    }

    fn catalog(outputs: BuildOutputs) -> Box<MockArtifactCatalog> {
        let mut catalog = MockArtifactCatalog::new();
        catalog
            .expect_inventory()
            .returning(move |_| Ok(outputs.clone()));
        Box::new(catalog)
    }

    fn emitter() -> Box<MockConfigEmitter> {
        let mut emitter = MockConfigEmitter::new();
        emitter.expect_platform().return_const(Platform::Vercel);
        emitter.expect_file_name().return_const("config.json");
        emitter.expect_emit().returning(|routes| {
            let lines: Vec<String> = routes.iter().map(|r| r.to_string()).collect();
            Ok(ConfigDocument::new(
                Platform::Vercel,
                "config.json",
                lines.join("\n"),
            ))
        });
        Box::new(emitter)
    }

    fn manifest() -> BuildManifest {
        BuildManifest::new()
            .with_route(ManifestEntry::new("/about", RouteKind::StaticFile, "/about.html"))
            .with_route(ManifestEntry::new("/", RouteKind::DynamicFunction, "render"))
    }

    fn outputs() -> BuildOutputs {
        BuildOutputs::new()
            .with_file("/about.html")
            .with_function("render")
    }

    #[test]
    fn plan_resolves_manifest() {
        let service = RoutingService::new(source(manifest()), catalog(outputs()), emitter());
        let routes = service.plan().unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes.terminal().unwrap().status(), Some(404));
    }

    #[test]
    fn describe_routes_lists_positions() {
        let service = RoutingService::new(source(manifest()), catalog(outputs()), emitter());
        let info = service.describe_routes().unwrap();
        assert_eq!(info[0].pattern, "/about");
        assert_eq!(info[1].kind, "dynamic-function");
        assert_eq!(info[2].position, 2);
        assert_eq!(info[2].status, Some(404));
    }

    #[test]
    fn deploy_writes_rendered_document() {
        let service = RoutingService::new(source(manifest()), catalog(outputs()), emitter());
        let mut sink = MockDocumentSink::new();
        sink.expect_write()
            .times(1)
            .withf(|doc| doc.file_name == "config.json" && doc.contents.contains("/about.html"))
            .returning(|doc| Ok(PathBuf::from("/out").join(&doc.file_name)));

        let path = service.deploy(&sink).unwrap();
        assert_eq!(path, PathBuf::from("/out/config.json"));
    }

    #[test]
    fn nothing_is_written_when_resolution_fails() {
        let conflicting = manifest().with_route(ManifestEntry::new(
            "/about",
            RouteKind::DynamicFunction,
            "render",
        ));
        let service = RoutingService::new(source(conflicting), catalog(outputs()), emitter());
        let mut sink = MockDocumentSink::new();
        sink.expect_write().times(0);

        let err = service.deploy(&sink).unwrap_err();
        assert!(matches!(err, EdgeRouteError::Domain(_)));
    }

    #[test]
    fn load_failures_propagate() {
        let mut failing = MockManifestSource::new();
        failing.expect_describe().return_const("broken.json".to_string());
        failing.expect_load().returning(|| {
            Err(ApplicationError::ManifestLoad {
                origin: "broken.json".into(),
                reason: "unexpected end of input".into(),
            }
            .into())
        });

        let service = RoutingService::new(Box::new(failing), catalog(outputs()), emitter());
        assert!(matches!(
            service.plan(),
            Err(EdgeRouteError::Application(ApplicationError::ManifestLoad { .. }))
        ));
    }
}
