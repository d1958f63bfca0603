//! Container graph

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

use crate::error::Result;
use crate::value_objects::Definition;

use super::parameters::ParameterBag;

/// An alternative id for a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Target id (a definition or another alias)
    pub target: String,
    /// Whether the alias can be fetched from the container directly
    pub public: bool,
}

impl Alias {
    /// Create a public alias to `target`
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            public: true,
        }
    }

    /// Set the public flag
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }
}

/// Mutable graph of service definitions
///
/// Definitions keep their insertion order; resolvers rely on it for
/// deterministic candidate enumeration and for the positional worklist that
/// visits definitions inserted mid-walk.
#[derive(Debug, Clone, Default)]
pub struct ContainerGraph {
    definitions: IndexMap<String, Definition>,
    aliases: IndexMap<String, Alias>,
    parameters: ParameterBag,
    resources: IndexSet<String>,
}

impl ContainerGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------------

    /// Register a definition of `class` under `id` and return it for configuration
    pub fn register<I: Into<String>, C: Into<String>>(
        &mut self,
        id: I,
        class: C,
    ) -> &mut Definition {
        self.set_definition(id, Definition::new(class))
    }

    /// Store `definition` under `id`, replacing any definition or alias with that id
    ///
    /// A replaced definition keeps its position in the graph.
    pub fn set_definition<I: Into<String>>(
        &mut self,
        id: I,
        definition: Definition,
    ) -> &mut Definition {
        let id = id.into();
        self.aliases.shift_remove(&id);
        match self.definitions.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(definition);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(definition),
        }
    }

    /// Definition stored under `id` (aliases are not followed)
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(id)
    }

    /// Mutable definition stored under `id`
    pub fn definition_mut(&mut self, id: &str) -> Option<&mut Definition> {
        self.definitions.get_mut(id)
    }

    /// Whether a definition is stored under `id`
    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Remove the definition stored under `id`
    pub fn remove_definition(&mut self, id: &str) -> Option<Definition> {
        self.definitions.shift_remove(id)
    }

    /// Number of definitions
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Id of the definition at `position`
    pub fn id_at(&self, position: usize) -> Option<&str> {
        self.definitions.get_index(position).map(|(id, _)| id.as_str())
    }

    /// Definition ids in insertion order
    pub fn definition_ids(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    /// Iterate definitions in insertion order
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().map(|(id, definition)| (id.as_str(), definition))
    }

    // ------------------------------------------------------------------------
    // Aliases
    // ------------------------------------------------------------------------

    /// Alias `id` to `target`, replacing any definition stored under `id`
    pub fn set_alias<I: Into<String>, T: Into<String>>(&mut self, id: I, target: T) {
        self.add_alias(id, Alias::new(target));
    }

    /// Store `alias` under `id`
    pub fn add_alias<I: Into<String>>(&mut self, id: I, alias: Alias) {
        let id = id.into();
        self.definitions.shift_remove(&id);
        self.aliases.insert(id, alias);
    }

    /// Alias stored under `id`
    pub fn alias(&self, id: &str) -> Option<&Alias> {
        self.aliases.get(id)
    }

    /// Whether an alias is stored under `id`
    pub fn has_alias(&self, id: &str) -> bool {
        self.aliases.contains_key(id)
    }

    /// Iterate aliases in insertion order
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Alias)> {
        self.aliases.iter().map(|(id, alias)| (id.as_str(), alias))
    }

    /// Whether `id` names a definition or an alias
    pub fn has(&self, id: &str) -> bool {
        self.has_definition(id) || self.has_alias(id)
    }

    /// Follow aliases from `id` to the id they finally designate
    ///
    /// Alias cycles stop at the first repeated id.
    pub fn resolve_id(&self, id: &str) -> String {
        let mut current = id.to_string();
        let mut seen = HashSet::new();
        while let Some(alias) = self.aliases.get(&current) {
            if !seen.insert(current.clone()) {
                break;
            }
            current = alias.target.clone();
        }
        current
    }

    /// Definition designated by `id`, following aliases
    pub fn find_definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(&self.resolve_id(id))
    }

    // ------------------------------------------------------------------------
    // Parameters and resources
    // ------------------------------------------------------------------------

    /// Parameter bag
    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    /// Mutable parameter bag
    pub fn parameters_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }

    /// Class of `definition` with parameter placeholders resolved
    pub fn resolve_class(&self, definition: &Definition) -> Result<Option<String>> {
        definition
            .class()
            .map(|class| self.parameters.resolve_string(class))
            .transpose()
    }

    /// Track a class whose declaration influenced resolution
    pub fn add_resource<S: Into<String>>(&mut self, class: S) {
        self.resources.insert(class.into());
    }

    /// Tracked class resources in insertion order
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(String::as_str)
    }
}
