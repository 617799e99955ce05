use std::collections::BTreeMap;

use serde::Serialize;

/// Ordered `(name, value)` pairs describing one plot, e.g.
/// `[("project", "njet"), ("yscale", "log")]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PlotProperties(Vec<(String, String)>);

impl PlotProperties {
    /// Empty property tuple.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Figures keyed by their properties; keys are unique within one call.
pub type PlotCollection<F> = BTreeMap<PlotProperties, F>;
