//! Service references
//!
//! References name a target definition id. They are never followed by the
//! graph walker; only the final container dereferences them.

use serde::Serialize;
use std::fmt;

/// Behavior of a reference whose target does not exist at container build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidBehavior {
    /// Fail the container build
    #[default]
    Fail,
    /// Inject null
    Null,
    /// Skip the argument or method call
    Ignore,
    /// Inject null only when the target is missing at runtime
    SoftNull,
}

/// A reference to another service definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    /// Target definition or alias id
    pub id: String,
    /// What happens when the target is missing
    pub invalid_behavior: InvalidBehavior,
}

impl Reference {
    /// Create a reference failing on a missing target
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            invalid_behavior: InvalidBehavior::Fail,
        }
    }

    /// Set the invalid-target behavior
    pub fn with_behavior(mut self, behavior: InvalidBehavior) -> Self {
        self.invalid_behavior = behavior;
        self
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A reference annotated with the type expected at the use site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypedReference {
    /// Target definition or alias id
    pub id: String,
    /// Type the target must satisfy
    pub type_name: String,
    /// What happens when the target is missing
    pub invalid_behavior: InvalidBehavior,
}

impl TypedReference {
    /// Create a typed reference failing on a missing target
    pub fn new<I: Into<String>, T: Into<String>>(id: I, type_name: T) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            invalid_behavior: InvalidBehavior::Fail,
        }
    }

    /// Set the invalid-target behavior
    pub fn with_behavior(mut self, behavior: InvalidBehavior) -> Self {
        self.invalid_behavior = behavior;
        self
    }

    /// The untyped reference to the same target
    pub fn to_reference(&self) -> Reference {
        Reference::new(self.id.clone()).with_behavior(self.invalid_behavior)
    }
}

impl fmt::Display for TypedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
