//! Call arguments
//!
//! Arguments are keyed either by position or, before named-argument
//! resolution, by parameter name. Each entry is either an explicit value or an
//! `Inferred` placeholder asking the autowiring resolver to decide.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

use super::definition::Definition;
use super::reference::{Reference, TypedReference};
use super::value::Value;

/// Key of an argument in a call's argument list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKey {
    /// Zero-based parameter position
    Index(usize),
    /// Parameter name (written `$name` in configuration)
    Named(String),
    /// Unmarked string key, accepted as a deprecated positional override
    Legacy(String),
}

impl ArgumentKey {
    /// Parse a configuration key: digits are positions, `$name` is a name
    pub fn parse(key: &str) -> Self {
        if let Ok(index) = key.parse::<usize>() {
            return Self::Index(index);
        }
        match key.strip_prefix('$') {
            Some(name) if !name.is_empty() => Self::Named(name.to_string()),
            _ => Self::Legacy(key.to_string()),
        }
    }

    /// The position, for positional keys
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Named(name) => write!(f, "${name}"),
            Self::Legacy(key) => f.write_str(key),
        }
    }
}

/// A configured argument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    /// A value the caller supplied; never overwritten by autowiring
    Explicit(Value),
    /// Placeholder: let autowiring decide
    Inferred,
}

impl Argument {
    /// The explicit value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Explicit(value) => Some(value),
            Self::Inferred => None,
        }
    }

    /// Mutable access to the explicit value
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::Explicit(value) => Some(value),
            Self::Inferred => None,
        }
    }
}

macro_rules! explicit_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Argument {
                fn from(value: $source) -> Self {
                    Self::Explicit(value.into())
                }
            }
        )*
    };
}

explicit_from!(
    Value,
    &str,
    String,
    bool,
    i64,
    Reference,
    TypedReference,
    Definition,
    Vec<Value>,
);

/// Ordered argument list of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: IndexMap<ArgumentKey, Argument>,
}

impl Arguments {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a positional list from explicit values
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (ArgumentKey::Index(index), Argument::Explicit(value.into())))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position following the highest positional key
    pub fn next_index(&self) -> usize {
        self.entries
            .keys()
            .filter_map(ArgumentKey::index)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Append an argument after the highest position
    pub fn push<A: Into<Argument>>(&mut self, argument: A) -> &mut Self {
        let index = self.next_index();
        self.entries.insert(ArgumentKey::Index(index), argument.into());
        self
    }

    /// Set the argument under `key`, keeping its position when it exists
    pub fn set<A: Into<Argument>>(&mut self, key: ArgumentKey, argument: A) -> &mut Self {
        self.entries.insert(key, argument.into());
        self
    }

    /// Argument under `key`
    pub fn get(&self, key: &ArgumentKey) -> Option<&Argument> {
        self.entries.get(key)
    }

    /// Argument at position `index`
    pub fn get_index(&self, index: usize) -> Option<&Argument> {
        self.entries.get(&ArgumentKey::Index(index))
    }

    /// Explicit value at position `index`
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.get_index(index).and_then(Argument::value)
    }

    /// Remove the argument under `key`, preserving the order of the others
    pub fn remove(&mut self, key: &ArgumentKey) -> Option<Argument> {
        self.entries.shift_remove(key)
    }

    /// Whether any key is a name rather than a position
    pub fn has_non_positional(&self) -> bool {
        self.entries.keys().any(|key| key.index().is_none())
    }

    /// Iterate entries in order
    pub fn iter(&self) -> indexmap::map::Iter<'_, ArgumentKey, Argument> {
        self.entries.iter()
    }

    /// Iterate entries mutably in order
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, ArgumentKey, Argument> {
        self.entries.iter_mut()
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &ArgumentKey> {
        self.entries.keys()
    }

    /// Explicit values in order, skipping `Inferred` placeholders
    pub fn values(&self) -> Vec<Value> {
        self.entries.values().filter_map(Argument::value).cloned().collect()
    }

    /// Sort entries by key: positions ascending, then names
    pub fn sort(&mut self) {
        self.entries.sort_keys();
    }
}

impl FromIterator<(ArgumentKey, Argument)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (ArgumentKey, Argument)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Arguments {
    type Item = (ArgumentKey, Argument);
    type IntoIter = indexmap::map::IntoIter<ArgumentKey, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a ArgumentKey, &'a Argument);
    type IntoIter = indexmap::map::Iter<'a, ArgumentKey, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Serialized as an ordered sequence of pairs: keys are not strings.
impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
