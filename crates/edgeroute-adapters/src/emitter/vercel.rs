//! Vercel Build Output API (v3) emitter.

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument};

use edgeroute_core::{
    application::{ApplicationError, ports::ConfigEmitter},
    domain::{ConfigDocument, Platform, ResolvedRoutes, RoutePattern, Segment},
    error::EdgeRouteResult,
};

const FILE_NAME: &str = "config.json";
const OUTPUT_VERSION: u8 = 3;

#[derive(Debug, Serialize)]
struct VercelConfig<'a> {
    version: u8,
    routes: Vec<VercelRoute<'a>>,
}

#[derive(Debug, Serialize)]
struct VercelRoute<'a> {
    src: String,
    dest: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

/// Writes `config.json` with one regex route per rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct VercelEmitter;

impl VercelEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Regex source for a pattern. Vercel anchors `src` itself.
    pub fn source(pattern: &RoutePattern) -> String {
        if pattern.is_catch_all() {
            return "/.*".to_string();
        }

        let mut src = String::new();
        for segment in pattern.segments() {
            src.push('/');
            match segment {
                Segment::Literal(text) => escape_into(&mut src, text),
                Segment::Param(_) => src.push_str("[^/]+"),
            }
        }
        if pattern.has_rest() {
            src.push_str("(?:/.*)?");
        }
        if src.is_empty() {
            src.push('/');
        }
        src
    }
}

impl ConfigEmitter for VercelEmitter {
    fn platform(&self) -> Platform {
        Platform::Vercel
    }

    fn file_name(&self) -> &'static str {
        FILE_NAME
    }

    #[instrument(skip_all, fields(rules = routes.len()))]
    fn emit(&self, routes: &ResolvedRoutes) -> EdgeRouteResult<ConfigDocument> {
        let routes = routes
            .iter()
            .map(|rule| {
                let src = Self::source(rule.pattern());
                check_source(&src)?;
                Ok(VercelRoute {
                    src,
                    dest: rule.target(),
                    status: rule.status(),
                })
            })
            .collect::<EdgeRouteResult<Vec<_>>>()?;

        let config = VercelConfig {
            version: OUTPUT_VERSION,
            routes,
        };
        let mut contents = serde_json::to_string_pretty(&config).map_err(|e| failed(e.to_string()))?;
        contents.push('\n');

        debug!(bytes = contents.len(), "Vercel config serialised");
        Ok(ConfigDocument::new(Platform::Vercel, FILE_NAME, contents))
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
}

fn check_source(src: &str) -> EdgeRouteResult<()> {
    Regex::new(&format!("^{src}$"))
        .map(|_| ())
        .map_err(|e| failed(format!("route source {src} is not a valid regex: {e}")))
}

fn failed(reason: String) -> edgeroute_core::error::EdgeRouteError {
    ApplicationError::EmissionFailed {
        platform: Platform::Vercel,
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeroute_core::domain::{
        BuildManifest, BuildOutputs, ManifestEntry, ResolverPolicy, RouteKind, plan_routes,
    };

    fn pattern(raw: &str) -> RoutePattern {
        RoutePattern::parse(raw).unwrap()
    }

    fn regex(raw: &str) -> Regex {
        Regex::new(&format!("^{}$", VercelEmitter::source(&pattern(raw)))).unwrap()
    }

    #[test]
    fn sources_per_shape() {
        assert_eq!(VercelEmitter::source(&pattern("/about")), "/about");
        assert_eq!(VercelEmitter::source(&pattern("/")), "/");
        assert_eq!(VercelEmitter::source(&pattern("/feed.xml")), "/feed\\.xml");
        assert_eq!(VercelEmitter::source(&pattern("/posts/[id]")), "/posts/[^/]+");
        assert_eq!(VercelEmitter::source(&pattern("/blog/*")), "/blog(?:/.*)?");
        assert_eq!(VercelEmitter::source(&pattern("/**")), "/.*");
    }

    #[test]
    fn sources_match_like_patterns() {
        let prefix = regex("/blog/*");
        assert!(prefix.is_match("/blog"));
        assert!(prefix.is_match("/blog/a/b"));
        assert!(!prefix.is_match("/blogger"));

        let param = regex("/posts/[id]");
        assert!(param.is_match("/posts/42"));
        assert!(!param.is_match("/posts/42/comments"));

        assert!(!regex("/feed.xml").is_match("/feedXxml"));
    }

    #[test]
    fn emits_home_about_scenario() {
        let manifest = BuildManifest::new()
            .with_route(ManifestEntry::new("/about", RouteKind::StaticFile, "/about.html"))
            .with_route(ManifestEntry::new("/", RouteKind::DynamicFunction, "render"));
        let outputs = BuildOutputs::new()
            .with_file("/about.html")
            .with_function("render");
        let routes = plan_routes(&manifest, &outputs, ResolverPolicy::default()).unwrap();

        let document = VercelEmitter::new().emit(&routes).unwrap();
        let expected = r#"{
  "version": 3,
  "routes": [
    {
      "src": "/about",
      "dest": "/about.html"
    },
    {
      "src": "/",
      "dest": "render"
    },
    {
      "src": "/.*",
      "dest": "/404.html",
      "status": 404
    }
  ]
}
"#;
        assert_eq!(document.contents, expected);
        assert_eq!(document.file_name, "config.json");
        assert_eq!(document.platform, Platform::Vercel);
    }

    #[test]
    fn custom_404_becomes_the_catch_all() {
        let manifest = BuildManifest::new().with_route(
            ManifestEntry::new("/404", RouteKind::ErrorFallback, "/404.html").with_status(404),
        );
        let outputs = BuildOutputs::new().with_file("/404.html");
        let routes = plan_routes(&manifest, &outputs, ResolverPolicy::default()).unwrap();

        let document = VercelEmitter::new().emit(&routes).unwrap();
        let json: serde_json::Value = serde_json::from_str(&document.contents).unwrap();
        let rules = json["routes"].as_array().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0],
            serde_json::json!({ "src": "/.*", "dest": "/404.html", "status": 404 })
        );
    }
}
