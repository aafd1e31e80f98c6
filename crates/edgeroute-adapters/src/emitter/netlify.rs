//! Netlify `netlify.toml` emitter.

use serde::Serialize;
use tracing::{debug, instrument};

use edgeroute_core::{
    application::{ApplicationError, ports::ConfigEmitter},
    domain::{ConfigDocument, Platform, ResolvedRoutes, RouteDescriptor, RoutePattern, Segment},
    error::EdgeRouteResult,
};

const FILE_NAME: &str = "netlify.toml";
const FUNCTIONS_PREFIX: &str = "/.netlify/functions";
const REWRITE_STATUS: u16 = 200;

#[derive(Debug, Serialize)]
struct NetlifyConfig {
    redirects: Vec<Redirect>,
}

#[derive(Debug, Serialize)]
struct Redirect {
    from: String,
    to: String,
    status: u16,
    force: bool,
}

/// Writes `[[redirects]]` tables in resolved order.
///
/// Serving rules are forced so they win over files at the same path.
/// Fallbacks are not, so real files still shadow them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetlifyEmitter;

impl NetlifyEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Netlify path syntax for a pattern.
    pub fn source(pattern: &RoutePattern) -> String {
        if pattern.is_catch_all() {
            return "/*".to_string();
        }

        let mut from = String::new();
        for segment in pattern.segments() {
            from.push('/');
            match segment {
                Segment::Literal(text) => from.push_str(text),
                Segment::Param(name) => {
                    from.push(':');
                    from.push_str(name);
                }
            }
        }
        if pattern.has_rest() {
            from.push_str("/*");
        }
        if from.is_empty() {
            from.push('/');
        }
        from
    }

    fn redirect(rule: &RouteDescriptor) -> Redirect {
        let to = if rule.kind().is_dynamic() {
            format!("{FUNCTIONS_PREFIX}/{}", rule.target())
        } else {
            rule.target().to_string()
        };
        Redirect {
            from: Self::source(rule.pattern()),
            to,
            status: rule.status().unwrap_or(REWRITE_STATUS),
            force: !rule.kind().is_fallback(),
        }
    }
}

impl ConfigEmitter for NetlifyEmitter {
    fn platform(&self) -> Platform {
        Platform::Netlify
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    #[instrument(skip_all, fields(rules = routes.len()))]
    fn emit(&self, routes: &ResolvedRoutes) -> EdgeRouteResult<ConfigDocument> {
        let config = NetlifyConfig {
            redirects: routes.iter().map(Self::redirect).collect(),
        };
        let contents = toml::to_string(&config).map_err(|e| ApplicationError::EmissionFailed {
            platform: Platform::Netlify,
            reason: e.to_string(),
        })?;

        debug!(bytes = contents.len(), "Netlify config serialised");
        Ok(ConfigDocument::new(Platform::Netlify, FILE_NAME, contents))
    }
}
