//! Relation paths and the prefix tree built from them.
//!
//! A relation path names a chain of relation fields starting at the root
//! entity, e.g. `"user.member_groups"`. Both `.` and the ORM-style `__`
//! separator are accepted, so `"user__member_groups"` is the same path.
//!
//! A set of paths is folded into a [`PathTree`]. Each node remembers whether
//! its own path was listed explicitly, which is what separates
//! "exclude this relation" from "exclude something below this relation".

use std::collections::BTreeMap;
use std::fmt;

/// A parsed relation path: a non-empty list of field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationPath(Vec<String>);

impl RelationPath {
    /// Parses a path, splitting on `__` and `.`. Empty segments are dropped.
    ///
    /// Returns `None` when nothing but separators remain.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<String> = raw
            .split("__")
            .flat_map(|part| part.split('.'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The first field name of the path.
    #[must_use]
    pub fn head(&self) -> &str {
        &self.0[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RelationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl std::str::FromStr for RelationPath {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s).ok_or_else(|| crate::Error::InvalidPath(s.to_string()))
    }
}

/// Prefix tree of relation paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTree {
    listed: bool,
    children: BTreeMap<String, PathTree>,
}

impl PathTree {
    /// An empty tree, usable in `static` position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listed: false,
            children: BTreeMap::new(),
        }
    }

    /// Builds a tree from raw path strings. Unparseable entries are skipped.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::default();
        for raw in paths {
            if let Some(path) = RelationPath::parse(raw.as_ref()) {
                tree.insert(&path);
            }
        }
        tree
    }

    /// Adds one path, marking its last node as listed.
    pub fn insert(&mut self, path: &RelationPath) {
        let mut node = self;
        for segment in path.segments() {
            node = node.children.entry(segment.clone()).or_default();
        }
        node.listed = true;
    }

    /// Whether this node's own path was given explicitly.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.listed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&PathTree> {
        self.children.get(name)
    }

    /// True when `name` is listed and nothing deeper is named below it.
    #[must_use]
    pub fn is_leaf_listed(&self, name: &str) -> bool {
        self.children
            .get(name)
            .is_some_and(|node| node.listed && node.children.is_empty())
    }

    /// Iterates the direct children in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Listed paths below this node, relative to it, with `.` separators.
    ///
    /// Only listed nodes are emitted: an unlisted intermediate node is implied
    /// by its descendants, so rebuilding a tree from the result yields the
    /// same structure and the same listed flags.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.children {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            if node.listed {
                out.push(path.clone());
            }
            node.flatten_into(&path, out);
        }
    }
}
