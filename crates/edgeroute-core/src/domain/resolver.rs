//! Priority resolver: descriptors → ordered, total rule list.
//!
//! ## Ordering
//!
//! 1. Serving routes (functions, static files, prerendered pages), most
//!    specific first. Equal specificity puts functions before files, then
//!    keeps manifest order (or pattern order, see [`TieBreak`]).
//! 2. Error fallbacks, most specific first. A 404 page covers its directory:
//!    `/blog/404` becomes a `/blog/*` fallback and `/404` becomes the
//!    catch-all.
//! 3. Exactly one catch-all, always last. Without a custom root 404 page a
//!    generic one is synthesized.
//!
//! A serving catch-all (a server-rendered function handling every path)
//! takes the terminal slot instead; it answers unknown paths itself, so 404
//! fallbacks are superseded and dropped.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::domain::{
    entities::{ResolvedRoutes, RouteDescriptor, RoutePattern, manifest::rooted},
    error::{AmbiguousRouteError, DomainError, ManifestError},
    value_objects::{RouteKind, TieBreak},
};

/// Default file served by the synthesized catch-all.
pub const DEFAULT_FALLBACK_TARGET: &str = "/404.html";

/// Knobs the resolver cannot infer from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Target of the synthesized catch-all when no custom 404 page exists.
    pub fallback_target: String,
    /// Ordering of equally specific dynamic routes.
    pub tie_break: TieBreak,
}

impl ResolverPolicy {
    /// Replace the synthesized catch-all target. The target is rooted like
    /// any other file target and must not be blank.
    pub fn with_fallback_target(mut self, target: &str) -> Result<Self, ManifestError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ManifestError::EmptyTarget {
                pattern: RoutePattern::catch_all().to_string(),
            });
        }
        self.fallback_target = rooted(target);
        Ok(self)
    }
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            fallback_target: DEFAULT_FALLBACK_TARGET.to_string(),
            tie_break: TieBreak::default(),
        }
    }
}

/// Orders route descriptors so that the first match always wins correctly.
#[derive(Debug, Clone, Default)]
pub struct PriorityResolver {
    policy: ResolverPolicy,
}

impl PriorityResolver {
    pub fn new(policy: ResolverPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Resolve descriptors into the final rule order.
    ///
    /// Feeding the output back in (via [`ResolvedRoutes::into_descriptors`])
    /// yields the same order.
    #[instrument(skip_all, fields(input = descriptors.len(), tie_break = %self.policy.tie_break))]
    pub fn resolve(&self, descriptors: Vec<RouteDescriptor>) -> Result<ResolvedRoutes, DomainError> {
        let (fallbacks, routes): (Vec<_>, Vec<_>) = descriptors
            .into_iter()
            .partition(|d| d.kind().is_fallback());

        let mut routes = dedupe(routes)?;
        routes.sort_by(|a, b| self.compare(a, b));

        let mut fallbacks = dedupe(fallbacks.into_iter().map(widen).collect())?;
        fallbacks.sort_by(|a, b| b.specificity().cmp(&a.specificity()));

        let serving_catch_all = routes.iter().position(|r| r.pattern().is_catch_all());

        let rules = match serving_catch_all {
            Some(split) => {
                let terminal = routes.split_off(split);
                let kept = drop_shadowed_fallbacks(fallbacks, &terminal)?;
                routes.into_iter().chain(kept).chain(terminal).collect::<Vec<_>>()
            }
            None => {
                let root = match fallbacks.iter().position(|f| f.pattern().is_catch_all()) {
                    Some(idx) => fallbacks.remove(idx),
                    None => {
                        debug!(fallback = %self.policy.fallback_target, "Synthesizing generic 404 catch-all");
                        self.synthesized_catch_all()
                    }
                };
                routes
                    .into_iter()
                    .chain(fallbacks)
                    .chain(std::iter::once(root))
                    .collect::<Vec<_>>()
            }
        };

        debug!(rules = rules.len(), "Routes resolved");
        Ok(ResolvedRoutes::new(rules))
    }

    fn synthesized_catch_all(&self) -> RouteDescriptor {
        RouteDescriptor::new(
            RoutePattern::catch_all(),
            RouteKind::ErrorFallback,
            self.policy.fallback_target.clone(),
            Some(404),
        )
    }

    fn compare(&self, a: &RouteDescriptor, b: &RouteDescriptor) -> Ordering {
        b.specificity()
            .cmp(&a.specificity())
            .then_with(|| kind_rank(a.kind()).cmp(&kind_rank(b.kind())))
            .then_with(|| match self.policy.tie_break {
                TieBreak::Lexicographic if a.kind().is_dynamic() && b.kind().is_dynamic() => {
                    a.pattern().to_string().cmp(&b.pattern().to_string())
                }
                _ => Ordering::Equal,
            })
    }
}

fn kind_rank(kind: RouteKind) -> u8 {
    if kind.is_dynamic() { 0 } else { 1 }
}

/// Widen a 404 page to the area it covers.
fn widen(fallback: RouteDescriptor) -> RouteDescriptor {
    if !fallback.is_not_found_fallback() {
        return fallback;
    }
    let scope = fallback.pattern().fallback_scope();
    if &scope == fallback.pattern() && fallback.status().is_some() {
        return fallback;
    }
    RouteDescriptor::new(scope, RouteKind::ErrorFallback, fallback.target(), Some(404))
}

/// Collapse exact duplicates and reject same-pattern conflicts.
///
/// Keeps the first occurrence, so manifest order survives.
fn dedupe(descriptors: Vec<RouteDescriptor>) -> Result<Vec<RouteDescriptor>, AmbiguousRouteError> {
    let mut seen: HashMap<RoutePattern, usize> = HashMap::with_capacity(descriptors.len());
    let mut kept: Vec<RouteDescriptor> = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if let Some(&idx) = seen.get(descriptor.pattern()) {
            let first = &kept[idx];
            if first.kind() == descriptor.kind()
                && first.target() == descriptor.target()
                && first.status() == descriptor.status()
            {
                debug!(route = %descriptor, "Dropping duplicate route");
                continue;
            }
            return Err(conflict(first, &descriptor));
        }
        seen.insert(descriptor.pattern().clone(), kept.len());
        kept.push(descriptor);
    }

    Ok(kept)
}

/// A serving catch-all in the terminal slot answers unknown paths itself,
/// so 404 fallbacks (scoped or not) are superseded and dropped. Other error
/// pages stay reachable at their own paths, placed just before it.
fn drop_shadowed_fallbacks(
    fallbacks: Vec<RouteDescriptor>,
    terminal: &[RouteDescriptor],
) -> Result<Vec<RouteDescriptor>, AmbiguousRouteError> {
    let mut kept = Vec::with_capacity(fallbacks.len());
    for fallback in fallbacks {
        if fallback.is_not_found_fallback() {
            warn!(
                route = %fallback,
                "Dropping 404 fallback superseded by the server-rendered catch-all"
            );
            continue;
        }
        if fallback.pattern().is_catch_all() {
            if let Some(catch_all) = terminal.first() {
                return Err(conflict(catch_all, &fallback));
            }
        }
        kept.push(fallback);
    }
    Ok(kept)
}

fn conflict(first: &RouteDescriptor, second: &RouteDescriptor) -> AmbiguousRouteError {
    AmbiguousRouteError {
        pattern: first.pattern().to_string(),
        first_target: first.target().to_string(),
        first_kind: first.kind(),
        second_target: second.target().to_string(),
        second_kind: second.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(pattern: &str, kind: RouteKind, target: &str) -> RouteDescriptor {
        RouteDescriptor::new(RoutePattern::parse(pattern).unwrap(), kind, target, None)
    }

    fn fallback(pattern: &str, target: &str, status: u16) -> RouteDescriptor {
        RouteDescriptor::new(
            RoutePattern::parse(pattern).unwrap(),
            RouteKind::ErrorFallback,
            target,
            Some(status),
        )
    }

    fn patterns(resolved: &ResolvedRoutes) -> Vec<String> {
        resolved.iter().map(|r| r.pattern().to_string()).collect()
    }

    #[test]
    fn synthesizes_catch_all_without_error_pages() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/about", RouteKind::StaticFile, "/about.html"),
                route("/", RouteKind::DynamicFunction, "render"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/about", "/", "/*"]);
        let terminal = resolved.terminal().unwrap();
        assert_eq!(terminal.target(), DEFAULT_FALLBACK_TARGET);
        assert_eq!(terminal.status(), Some(404));
    }

    #[test]
    fn root_404_page_is_promoted_into_catch_all() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                fallback("/404", "/404.html", 404),
                route("/", RouteKind::DynamicFunction, "render"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/", "/*"]);
        assert_eq!(resolved.terminal().unwrap().target(), "/404.html");
    }

    #[test]
    fn custom_fallback_target_is_used_for_synthesis() {
        let resolver = PriorityResolver::new(ResolverPolicy {
            fallback_target: "/not-found.html".into(),
            ..ResolverPolicy::default()
        });
        let resolved = resolver.resolve(Vec::new()).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.terminal().unwrap().target(), "/not-found.html");
    }

    #[test]
    fn scoped_404_precedes_generic_catch_all() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                fallback("/blog/404", "/blog/404.html", 404),
                route("/blog/[slug]", RouteKind::DynamicFunction, "blog"),
                route("/blog/hello", RouteKind::PrerenderedPage, "/blog/hello.html"),
            ])
            .unwrap();

        assert_eq!(
            patterns(&resolved),
            ["/blog/hello", "/blog/[slug]", "/blog/*", "/*"]
        );
        assert_eq!(resolved.as_slice()[2].kind(), RouteKind::ErrorFallback);
        assert_eq!(resolved.first_match("/blog/a/b").unwrap().0, 2);
        assert_eq!(resolved.terminal().unwrap().target(), DEFAULT_FALLBACK_TARGET);
    }

    #[test]
    fn server_error_pages_stay_addressable() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                fallback("/404", "/404.html", 404),
                fallback("/500", "/500.html", 500),
                route("/docs/*", RouteKind::StaticFile, "/docs/index.html"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/docs/*", "/500", "/*"]);
        assert_eq!(resolved.as_slice()[1].status(), Some(500));
    }

    #[test]
    fn narrower_pattern_wins_regardless_of_kind() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/shop/*", RouteKind::DynamicFunction, "shop"),
                route("/shop/cart", RouteKind::StaticFile, "/shop/cart.html"),
                route("/shop/[id]", RouteKind::DynamicFunction, "product"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/shop/cart", "/shop/[id]", "/shop/*", "/*"]);
    }

    #[test]
    fn longest_prefix_first() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/docs/*", RouteKind::StaticFile, "/docs.html"),
                route("/docs/api/*", RouteKind::DynamicFunction, "api-docs"),
            ])
            .unwrap();
        assert_eq!(patterns(&resolved), ["/docs/api/*", "/docs/*", "/*"]);
    }

    #[test]
    fn dynamic_precedes_static_at_equal_specificity() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/ab", RouteKind::StaticFile, "/ab.html"),
                route("/cd", RouteKind::DynamicFunction, "cd"),
            ])
            .unwrap();
        assert_eq!(patterns(&resolved), ["/cd", "/ab", "/*"]);
    }

    #[test]
    fn identical_pattern_with_different_targets_is_ambiguous() {
        let err = PriorityResolver::default()
            .resolve(vec![
                route("/shop", RouteKind::StaticFile, "/shop.html"),
                route("/shop", RouteKind::DynamicFunction, "shop"),
            ])
            .unwrap_err();

        match err {
            DomainError::AmbiguousRoute(err) => {
                assert_eq!(err.pattern, "/shop");
                assert_eq!(err.first_target, "/shop.html");
                assert_eq!(err.second_target, "shop");
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn same_target_with_different_kind_is_ambiguous() {
        let err = PriorityResolver::default()
            .resolve(vec![
                route("/shop", RouteKind::StaticFile, "/shop.html"),
                route("/shop", RouteKind::PrerenderedPage, "/shop.html"),
            ])
            .unwrap_err();

        match err {
            DomainError::AmbiguousRoute(err) => {
                assert_eq!(err.first_kind, RouteKind::StaticFile);
                assert_eq!(err.second_kind, RouteKind::PrerenderedPage);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn literal_prefix_beats_parameterized_prefix() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/[lang]/[...slug]", RouteKind::DynamicFunction, "i18n"),
                route("/docs/[...slug]", RouteKind::StaticFile, "/docs/index.html"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/docs/*", "/[lang]/*", "/*"]);
        let (_, rule) = resolved.first_match("/docs/intro").unwrap();
        assert_eq!(rule.target(), "/docs/index.html");
        let (_, rule) = resolved.first_match("/fr/intro").unwrap();
        assert_eq!(rule.target(), "i18n");
    }

    #[test]
    fn prefix_route_serves_its_own_root_before_single_param() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/[slug]", RouteKind::DynamicFunction, "page"),
                route("/blog/*", RouteKind::DynamicFunction, "blog"),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/blog/*", "/[slug]", "/*"]);
        assert_eq!(resolved.first_match("/blog").unwrap().1.target(), "blog");
        assert_eq!(resolved.first_match("/about").unwrap().1.target(), "page");
    }

    #[test]
    fn scoped_404_is_superseded_by_serving_catch_all() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/*", RouteKind::DynamicFunction, "render"),
                fallback("/blog/404", "/blog/404.html", 404),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/*"]);
        assert_eq!(resolved.first_match("/blog/missing").unwrap().1.target(), "render");
    }

    #[test]
    fn fallback_target_is_rooted() {
        let policy = ResolverPolicy::default()
            .with_fallback_target(" errors/404.html ")
            .unwrap();
        assert_eq!(policy.fallback_target, "/errors/404.html");
    }

    #[test]
    fn blank_fallback_target_is_rejected() {
        assert!(matches!(
            ResolverPolicy::default().with_fallback_target("  "),
            Err(ManifestError::EmptyTarget { .. })
        ));
    }

    #[test]
    fn identical_duplicates_collapse() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/shop", RouteKind::StaticFile, "/shop.html"),
                route("/shop", RouteKind::StaticFile, "/shop.html"),
            ])
            .unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn two_root_404_pages_conflict() {
        let err = PriorityResolver::default()
            .resolve(vec![
                fallback("/404", "/404.html", 404),
                fallback("/*", "/not-found.html", 404),
            ])
            .unwrap_err();
        assert!(matches!(err, DomainError::AmbiguousRoute(_)));
    }

    #[test]
    fn serving_catch_all_is_terminal() {
        let resolved = PriorityResolver::default()
            .resolve(vec![
                route("/.*", RouteKind::DynamicFunction, "render"),
                route("/about", RouteKind::StaticFile, "/about.html"),
                fallback("/404", "/404.html", 404),
                fallback("/500", "/500.html", 500),
            ])
            .unwrap();

        assert_eq!(patterns(&resolved), ["/about", "/500", "/*"]);
        let terminal = resolved.terminal().unwrap();
        assert_eq!(terminal.kind(), RouteKind::DynamicFunction);
        assert_eq!(terminal.target(), "render");
    }

    #[test]
    fn lexicographic_tie_break_orders_dynamic_routes() {
        let descriptors = vec![
            route("/zz", RouteKind::DynamicFunction, "z"),
            route("/aa", RouteKind::DynamicFunction, "a"),
        ];

        let stable = PriorityResolver::default().resolve(descriptors.clone()).unwrap();
        assert_eq!(patterns(&stable), ["/zz", "/aa", "/*"]);

        let sorted = PriorityResolver::new(ResolverPolicy {
            tie_break: TieBreak::Lexicographic,
            ..ResolverPolicy::default()
        })
        .resolve(descriptors)
        .unwrap();
        assert_eq!(patterns(&sorted), ["/aa", "/zz", "/*"]);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let resolver = PriorityResolver::default();
        let once = resolver
            .resolve(vec![
                fallback("/blog/404", "/blog/404.html", 404),
                fallback("/404", "/404.html", 404),
                fallback("/500", "/500.html", 500),
                route("/", RouteKind::DynamicFunction, "render"),
                route("/blog/*", RouteKind::DynamicFunction, "blog"),
                route("/about", RouteKind::StaticFile, "/about.html"),
            ])
            .unwrap();
        let twice = resolver.resolve(once.clone().into_descriptors()).unwrap();
        assert_eq!(once, twice);
    }
}
