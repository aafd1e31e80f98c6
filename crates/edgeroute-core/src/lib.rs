//! Edgeroute Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the edgeroute
//! deployment-routing builder, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          edgeroute-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (RoutingService)             │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Manifest, Catalog, Emitter, Sink)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   edgeroute-adapters (Infrastructure)   │
//! │ (JsonManifestFile, VercelEmitter, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (RoutePattern, Collector, Resolver)     │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use edgeroute_core::domain::{
//!     BuildManifest, BuildOutputs, ManifestEntry, ResolverPolicy, RouteKind, plan_routes,
//! };
//!
//! let manifest = BuildManifest::new()
//!     .with_route(ManifestEntry::new("/about", RouteKind::StaticFile, "/about.html"))
//!     .with_route(ManifestEntry::new("/blog/[slug]", RouteKind::DynamicFunction, "render"));
//! let outputs = BuildOutputs::new()
//!     .with_file("/about.html")
//!     .with_function("render");
//!
//! let routes = plan_routes(&manifest, &outputs, ResolverPolicy::default()).unwrap();
//! assert_eq!(routes.len(), 3);
//! assert!(routes.terminal().unwrap().pattern().is_catch_all());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RouteInfo, RoutingService,
        ports::{ArtifactCatalog, ConfigEmitter, DocumentSink, ManifestSource},
    };
    pub use crate::domain::{
        BuildManifest, BuildOutputs, ConfigDocument, ManifestEntry, Platform, ResolvedRoutes,
        ResolverPolicy, RouteDescriptor, RouteKind, RoutePattern, TieBreak,
    };
    pub use crate::error::{EdgeRouteError, EdgeRouteResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
