use crate::domain::entities::descriptor::RouteDescriptor;

/// The resolver's output: an ordered, total rule list.
///
/// Only the resolver builds one, so every instance ends with a catch-all.
/// Scanning top to bottom, the first matching rule is the one that serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoutes {
    rules: Vec<RouteDescriptor>,
}

impl ResolvedRoutes {
    pub(crate) fn new(rules: Vec<RouteDescriptor>) -> Self {
        debug_assert!(
            rules.last().is_some_and(|r| r.pattern().is_catch_all()),
            "resolved routes must end with a catch-all"
        );
        Self { rules }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDescriptor> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[RouteDescriptor] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`: a resolved table contains at least the catch-all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The final catch-all rule.
    pub fn terminal(&self) -> Option<&RouteDescriptor> {
        self.rules.last()
    }

    /// The rule that would serve `path`, if any.
    pub fn first_match(&self, path: &str) -> Option<(usize, &RouteDescriptor)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.pattern().matches(path))
    }

    /// Hand the rules back as plain descriptors, e.g. to resolve them again.
    pub fn into_descriptors(self) -> Vec<RouteDescriptor> {
        self.rules
    }
}

impl<'a> IntoIterator for &'a ResolvedRoutes {
    type Item = &'a RouteDescriptor;
    type IntoIter = std::slice::Iter<'a, RouteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
