//! Argument values

use indexmap::IndexMap;
use serde::Serialize;

use super::definition::Definition;
use super::reference::{Reference, TypedReference};

/// A value configured on a definition
///
/// Lists, maps, service closures and inline definitions are recursed into by
/// the graph walker; everything else is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Null literal
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// String literal
    String(String),
    /// Ordered list
    List(Vec<Value>),
    /// Ordered string-keyed map
    Map(IndexMap<String, Value>),
    /// Reference to another service
    Reference(Reference),
    /// Reference annotated with its expected type
    TypedReference(TypedReference),
    /// Deferred value, resolved lazily by the container
    ServiceClosure(Box<Value>),
    /// Inline (anonymous) service definition
    Definition(Box<Definition>),
}

impl Value {
    /// Shorthand for a failing reference to `id`
    pub fn reference<S: Into<String>>(id: S) -> Self {
        Self::Reference(Reference::new(id))
    }

    /// Shorthand for a string literal
    pub fn string<S: Into<String>>(value: S) -> Self {
        Self::String(value.into())
    }

    /// The referenced id for reference-like values
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) => Some(&reference.id),
            Self::TypedReference(reference) => Some(&reference.id),
            _ => None,
        }
    }

    /// Whether the value is a scalar leaf
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Render a scalar as the string a placeholder substitutes
    pub fn as_placeholder_string(&self) -> Option<String> {
        match self {
            Self::Null => Some(String::new()),
            Self::Bool(value) => Some(if *value { "1" } else { "" }.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<TypedReference> for Value {
    fn from(value: TypedReference) -> Self {
        Self::TypedReference(value)
    }
}

impl From<Definition> for Value {
    fn from(value: Definition) -> Self {
        Self::Definition(Box::new(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}
