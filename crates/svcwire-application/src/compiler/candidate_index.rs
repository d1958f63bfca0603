//! Type candidate index
//!
//! Maps a type to the ids of every definition able to satisfy it: those
//! whose class equals the type or is a subtype of it. Abstract, synthetic,
//! class-less definitions and definitions whose class is unknown to the
//! introspector never appear.
//!
//! The index snapshots the graph once and answers per type lazily. It lives
//! for one autowiring walk and is updated in place when the walk
//! auto-registers a definition or rolls one back.

use std::collections::HashMap;

use svcwire_domain::ports::TypeIntrospector;
use svcwire_domain::ContainerGraph;

/// Lazily computed type → candidate ids index
#[derive(Debug, Default)]
pub struct CandidateIndex {
    /// `(id, class)` of every eligible definition, in registration order
    entries: Vec<(String, String)>,
    /// Candidates per type already asked for
    cache: HashMap<String, Vec<String>>,
}

impl CandidateIndex {
    /// Snapshot the eligible definitions of `graph`
    pub fn build(graph: &ContainerGraph, introspector: &dyn TypeIntrospector) -> Self {
        let entries = graph
            .definitions()
            .filter(|(_, definition)| !definition.is_abstract() && !definition.is_synthetic())
            .filter_map(|(id, definition)| {
                let class = graph.resolve_class(definition).ok().flatten()?;
                introspector
                    .has_class(&class)
                    .then(|| (id.to_string(), class))
            })
            .collect();

        Self {
            entries,
            cache: HashMap::new(),
        }
    }

    /// Ids of definitions satisfying `type_name`, in registration order
    pub fn candidates(
        &mut self,
        type_name: &str,
        introspector: &dyn TypeIntrospector,
    ) -> &[String] {
        let entries = &self.entries;
        self.cache.entry(type_name.to_string()).or_insert_with(|| {
            entries
                .iter()
                .filter(|(_, class)| satisfies(introspector, class, type_name))
                .map(|(id, _)| id.clone())
                .collect()
        })
    }

    /// Add a definition registered during the walk
    pub fn register(&mut self, id: &str, class: &str, introspector: &dyn TypeIntrospector) {
        for (type_name, ids) in &mut self.cache {
            if satisfies(introspector, class, type_name) {
                ids.push(id.to_string());
            }
        }
        self.entries.push((id.to_string(), class.to_string()));
    }

    /// Remove a definition whose registration was rolled back
    pub fn unregister(&mut self, id: &str) {
        self.entries.retain(|(entry_id, _)| entry_id != id);
        for ids in self.cache.values_mut() {
            ids.retain(|candidate| candidate != id);
        }
    }

    /// Number of eligible definitions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no definition is eligible
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn satisfies(introspector: &dyn TypeIntrospector, class: &str, type_name: &str) -> bool {
    class == type_name || introspector.is_subtype_of(class, type_name)
}
