//! Route patterns and their specificity.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ManifestError;

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// `[name]`: matches any single non-empty segment.
    Param(String),
}

impl Segment {
    fn matches(&self, part: &str) -> bool {
        match self {
            Self::Literal(text) => text == part,
            Self::Param(_) => !part.is_empty(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, "[{name}]"),
        }
    }
}

/// The coarse shape of a pattern, in increasing order of narrowness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternShape {
    CatchAll,
    Prefix,
    Parameterized,
    Exact,
}

/// Integer rank of a pattern's narrowness. Higher ranks are tried first.
///
/// Exact paths outrank everything and the catch-all ranks last. Between
/// them, the pattern with the longer literal prefix wins, so `/docs/*`
/// comes before `/[lang]/*` and `/blog/*` before `/[slug]`. With equal
/// prefixes a bounded pattern beats one with a rest segment, then more
/// literal text wins, then fewer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(u32);

impl Specificity {
    fn derive(pattern: &RoutePattern) -> Self {
        let shape = pattern.shape();
        let tier: u32 = match shape {
            PatternShape::CatchAll => 0,
            PatternShape::Prefix | PatternShape::Parameterized => 1,
            PatternShape::Exact => 2,
        };
        let prefix = clamp(pattern.literal_prefix().len(), 0x3FF);
        let bounded = u32::from(!pattern.rest);
        let literal = clamp(pattern.literal_len(), 0x7FF);
        let params = 0xFF - clamp(pattern.param_count(), 0xFF);

        Self((tier << 30) | (prefix << 20) | (bounded << 19) | (literal << 8) | params)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

fn clamp(n: usize, max: u32) -> u32 {
    u32::try_from(n).unwrap_or(max).min(max)
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed request-path pattern.
///
/// Accepted forms:
///
/// | Form            | Example            | Shape         |
/// |-----------------|--------------------|---------------|
/// | exact           | `/about`           | Exact         |
/// | parameters      | `/posts/[id]`      | Parameterized |
/// | rest segment    | `/blog/*`, `/[lang]/[...slug]` | Prefix |
/// | everything      | `/*`, `/.*`, `*`   | CatchAll      |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    segments: Vec<Segment>,
    rest: bool,
}

impl RoutePattern {
    /// The pattern that matches every request path.
    pub fn catch_all() -> Self {
        Self {
            segments: Vec::new(),
            rest: true,
        }
    }

    /// Parse a manifest pattern string.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let invalid = |reason: &str| ManifestError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if matches!(raw, "*" | "/.*" | "/*" | "/**") {
            return Ok(Self::catch_all());
        }
        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }
        if raw.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(invalid("pattern must not contain whitespace, '?' or '#'"));
        }

        let body = &raw[1..];
        let body = body.strip_suffix('/').unwrap_or(body);
        if body.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
                rest: false,
            });
        }

        let parts: Vec<&str> = body.split('/').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());
        let mut rest = false;

        for (idx, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(invalid("pattern contains an empty segment"));
            }
            if is_rest_segment(part) {
                if idx != last {
                    return Err(invalid("rest segment must be the last segment"));
                }
                rest = true;
                continue;
            }
            if let Some(name) = part.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
                if name.is_empty()
                    || !name
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                {
                    return Err(invalid("parameter names must be alphanumeric"));
                }
                segments.push(Segment::Param(name.to_string()));
                continue;
            }
            if part.contains(['*', '[', ']']) {
                return Err(invalid("wildcards must occupy a whole segment"));
            }
            segments.push(Segment::Literal((*part).to_string()));
        }

        Ok(Self { segments, rest })
    }

    pub fn shape(&self) -> PatternShape {
        let has_param = self.segments.iter().any(|s| matches!(s, Segment::Param(_)));
        match (self.segments.is_empty(), self.rest, has_param) {
            (true, true, _) => PatternShape::CatchAll,
            (false, true, _) => PatternShape::Prefix,
            (_, false, true) => PatternShape::Parameterized,
            (_, false, false) => PatternShape::Exact,
        }
    }

    pub fn specificity(&self) -> Specificity {
        Specificity::derive(self)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern ends in a rest segment (matches any remainder).
    pub fn has_rest(&self) -> bool {
        self.rest
    }

    pub fn is_catch_all(&self) -> bool {
        self.shape() == PatternShape::CatchAll
    }

    pub fn is_exact(&self) -> bool {
        self.shape() == PatternShape::Exact
    }

    /// The literal path before the first parameter or rest segment,
    /// without a trailing slash (`""` for the site root).
    pub fn literal_prefix(&self) -> String {
        self.segments
            .iter()
            .map_while(|s| match s {
                Segment::Literal(text) => Some(format!("/{text}")),
                Segment::Param(_) => None,
            })
            .collect()
    }

    /// The area of the site an error page placed at this pattern covers.
    ///
    /// `/blog/404` covers `/blog/*`; `/404` covers everything. Patterns that
    /// already end in a rest segment cover themselves.
    pub fn fallback_scope(&self) -> Self {
        if self.rest {
            return self.clone();
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Self {
            segments,
            rest: true,
        }
    }

    /// Whether a request path is matched by this pattern.
    ///
    /// A rest segment matches zero or more trailing segments, so `/blog/*`
    /// matches `/blog` itself.
    pub fn matches(&self, path: &str) -> bool {
        let trimmed = path.trim_start_matches('/');
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        if parts.len() < self.segments.len() || (!self.rest && parts.len() != self.segments.len())
        {
            return false;
        }
        self.segments
            .iter()
            .zip(&parts)
            .all(|(segment, part)| segment.matches(part))
    }

    fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.len() + 1,
                Segment::Param(_) => 0,
            })
            .sum()
    }

    fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }
}

fn is_rest_segment(part: &str) -> bool {
    matches!(part, "*" | "**")
        || part
            .strip_prefix("[...")
            .and_then(|p| p.strip_suffix(']'))
            .is_some_and(|name| !name.is_empty())
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(if self.rest { "/*" } else { "/" });
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        if self.rest {
            f.write_str("/*")?;
        }
        Ok(())
    }
}

impl FromStr for RoutePattern {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
