use serde::{Deserialize, Serialize};

/// What to expand and what to leave out of a dump.
///
/// Deserializable from request parameters; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Relation paths to expand even when `expand_all` is off.
    pub relations: Vec<String>,
    /// Paths to leave out. A listed relation that also has deeper entries
    /// stays present but unexpanded.
    pub exclude: Vec<String>,
    /// Expand every relation that is not excluded.
    #[serde(alias = "all")]
    pub expand_all: bool,
    /// Prefer a file's cloud copy URL over its local media URL.
    pub prefer_cloud_urls: bool,
}

impl DumpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relations<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn exclude<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn expand_all(mut self, expand_all: bool) -> Self {
        self.expand_all = expand_all;
        self
    }

    pub fn prefer_cloud_urls(mut self, prefer: bool) -> Self {
        self.prefer_cloud_urls = prefer;
        self
    }
}
