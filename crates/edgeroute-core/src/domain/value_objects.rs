//! Domain value objects: RouteKind, Platform, TieBreak.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each carries its canonical string form and a `FromStr` parser that also
//! accepts the common aliases found in build manifests and CLI input.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RouteKind ────────────────────────────────────────────────────────────────

/// What kind of artifact serves a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    /// A plain file copied to the output (pages, assets).
    #[serde(alias = "asset", alias = "page")]
    StaticFile,
    /// A page rendered to HTML at build time.
    #[serde(alias = "prerendered")]
    PrerenderedPage,
    /// A serverless/edge function rendering on request.
    #[serde(alias = "function", alias = "ssr")]
    DynamicFunction,
    /// An error page served with a non-2xx status when nothing else matches.
    #[serde(alias = "error-page")]
    ErrorFallback,
}

impl RouteKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StaticFile => "static-file",
            Self::PrerenderedPage => "prerendered-page",
            Self::DynamicFunction => "dynamic-function",
            Self::ErrorFallback => "error-fallback",
        }
    }

    /// Whether the target of this kind is a file in the build output.
    pub const fn serves_file(self) -> bool {
        !matches!(self, Self::DynamicFunction)
    }

    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::ErrorFallback)
    }

    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::DynamicFunction)
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static-file" | "static" | "asset" | "page" => Ok(Self::StaticFile),
            "prerendered-page" | "prerendered" => Ok(Self::PrerenderedPage),
            "dynamic-function" | "dynamic" | "function" | "ssr" => Ok(Self::DynamicFunction),
            "error-fallback" | "error-page" | "fallback" => Ok(Self::ErrorFallback),
            other => Err(DomainError::UnknownValue {
                what: "route kind",
                value: other.to_string(),
            }),
        }
    }
}

// ── Platform ─────────────────────────────────────────────────────────────────

/// A deployment platform with its own routing-config dialect.
///
/// To add a platform: add a variant here, then register an emitter for it in
/// `edgeroute_adapters::emitter`. Nothing in the resolver changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Vercel,
    Netlify,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Vercel, Platform::Netlify];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vercel => "vercel",
            Self::Netlify => "netlify",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vercel" => Ok(Self::Vercel),
            "netlify" => Ok(Self::Netlify),
            other => Err(DomainError::UnknownValue {
                what: "platform",
                value: other.to_string(),
            }),
        }
    }
}

// ── TieBreak ─────────────────────────────────────────────────────────────────

/// How dynamic routes of identical specificity are ordered.
///
/// The build manifest does not say which of two equally specific dynamic
/// routes should win, so the choice is explicit configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the order in which the manifest listed them.
    #[default]
    ManifestOrder,
    /// Order by the pattern's canonical string.
    Lexicographic,
}

impl TieBreak {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManifestOrder => "manifest-order",
            Self::Lexicographic => "lexicographic",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manifest-order" | "manifest" | "stable" => Ok(Self::ManifestOrder),
            "lexicographic" | "alpha" => Ok(Self::Lexicographic),
            other => Err(DomainError::UnknownValue {
                what: "tie-break policy",
                value: other.to_string(),
            }),
        }
    }
}
