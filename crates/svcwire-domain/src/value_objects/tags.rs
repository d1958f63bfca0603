//! Definition tags

use indexmap::IndexMap;
use serde::Serialize;

/// Attributes of one tag occurrence
pub type TagAttributes = IndexMap<String, String>;

/// Ordered multimap of tag name to attribute maps
///
/// A tag may occur several times on one definition; each occurrence keeps its
/// own attribute map and insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags {
    entries: IndexMap<String, Vec<TagAttributes>>,
}

impl Tags {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `name`
    pub fn add<S: Into<String>>(&mut self, name: S, attributes: TagAttributes) {
        self.entries.entry(name.into()).or_default().push(attributes);
    }

    /// All occurrences of `name`, in insertion order
    pub fn get(&self, name: &str) -> &[TagAttributes] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `name` occurs at least once
    pub fn has(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|occurrences| !occurrences.is_empty())
    }

    /// Remove every occurrence of `name`
    pub fn remove(&mut self, name: &str) -> Option<Vec<TagAttributes>> {
        self.entries.shift_remove(name)
    }

    /// Whether the set holds no tags
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate names with their occurrences
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TagAttributes])> {
        self.entries
            .iter()
            .map(|(name, occurrences)| (name.as_str(), occurrences.as_slice()))
    }

    /// Append every occurrence of `other` after this set's own
    pub fn extend(&mut self, other: &Tags) {
        for (name, occurrences) in &other.entries {
            self.entries
                .entry(name.clone())
                .or_default()
                .extend(occurrences.iter().cloned());
        }
    }

    /// Place every occurrence of `other` before this set's own
    ///
    /// Tag names first seen in `other` come first; within a name, the
    /// occurrences from `other` precede the existing ones.
    pub fn prepend(&mut self, other: &Tags) {
        let mut merged = other.clone();
        merged.extend(self);
        *self = merged;
    }
}

impl<S: Into<String>> FromIterator<(S, TagAttributes)> for Tags {
    fn from_iter<T: IntoIterator<Item = (S, TagAttributes)>>(iter: T) -> Self {
        let mut tags = Self::new();
        for (name, attributes) in iter {
            tags.add(name, attributes);
        }
        tags
    }
}
