//! Route collector: manifest entries → route descriptors.
//!
//! Every entry is checked against the build inventory. A manifest that
//! points at something the build did not produce is rejected outright.

use tracing::{debug, instrument};

use crate::domain::{
    entities::{
        BuildOutputs, ManifestEntry, RouteDescriptor, RoutePattern, manifest::rooted,
    },
    error::ManifestError,
    value_objects::RouteKind,
};

const DEFAULT_FALLBACK_STATUS: u16 = 404;

/// Normalises manifest entries against an inventory of build outputs.
pub struct RouteCollector<'a> {
    outputs: &'a BuildOutputs,
}

impl<'a> RouteCollector<'a> {
    pub fn new(outputs: &'a BuildOutputs) -> Self {
        Self { outputs }
    }

    /// Collect descriptors in manifest order.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn collect(&self, entries: &[ManifestEntry]) -> Result<Vec<RouteDescriptor>, ManifestError> {
        let descriptors = entries
            .iter()
            .map(|entry| self.collect_entry(entry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(collected = descriptors.len(), "Manifest collected");
        Ok(descriptors)
    }

    fn collect_entry(&self, entry: &ManifestEntry) -> Result<RouteDescriptor, ManifestError> {
        let pattern = RoutePattern::parse(&entry.pattern)?;

        let target = entry.target.trim();
        if target.is_empty() {
            return Err(ManifestError::EmptyTarget {
                pattern: entry.pattern.clone(),
            });
        }

        if let Some(status) = entry.status.filter(|s| !(100..=599).contains(s)) {
            return Err(ManifestError::InvalidStatus {
                pattern: entry.pattern.clone(),
                status,
            });
        }

        let descriptor = match entry.kind {
            RouteKind::DynamicFunction => {
                if !self.outputs.has_function(target) {
                    return Err(dangling(entry, target));
                }
                RouteDescriptor::new(pattern, entry.kind, target, entry.status)
            }
            RouteKind::StaticFile | RouteKind::PrerenderedPage => {
                let target = self.existing_file(entry, target)?;
                match error_status_of(&target) {
                    Some(code) => RouteDescriptor::new(
                        pattern,
                        RouteKind::ErrorFallback,
                        target,
                        Some(entry.status.unwrap_or(code)),
                    ),
                    None => RouteDescriptor::new(pattern, entry.kind, target, entry.status),
                }
            }
            RouteKind::ErrorFallback => {
                let target = self.existing_file(entry, target)?;
                let status = entry
                    .status
                    .or_else(|| error_status_of(&target))
                    .unwrap_or(DEFAULT_FALLBACK_STATUS);
                RouteDescriptor::new(pattern, entry.kind, target, Some(status))
            }
        };

        debug!(route = %descriptor, "Collected route");
        Ok(descriptor)
    }

    fn existing_file(&self, entry: &ManifestEntry, target: &str) -> Result<String, ManifestError> {
        let target = rooted(target);
        if self.outputs.has_file(&target) {
            Ok(target)
        } else {
            Err(dangling(entry, &target))
        }
    }
}

fn dangling(entry: &ManifestEntry, target: &str) -> ManifestError {
    ManifestError::DanglingTarget {
        pattern: entry.pattern.clone(),
        kind: entry.kind,
        target: target.to_string(),
    }
}

/// Recognise error pages by file name: `404.html` or `404/index.html`,
/// for any code in 400..=599.
pub fn error_status_of(target: &str) -> Option<u16> {
    let mut parts = target.rsplit('/');
    let file = parts.next()?;
    let stem = match file.strip_suffix(".html")? {
        "index" => parts.next()?,
        stem => stem,
    };
    if stem.len() != 3 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse::<u16>()
        .ok()
        .filter(|code| (400..=599).contains(code))
}
