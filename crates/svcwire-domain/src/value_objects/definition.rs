//! Service definitions
//!
//! A [`Definition`] describes how a service is built: its class, constructor
//! arguments, method calls, properties, tags and flags. Definitions with a
//! parent id are child definitions; they inherit every field they do not set
//! themselves.
//!
//! Setters record which fields were explicitly configured. That change set
//! drives merge precedence for conditional configuration and for child
//! definitions: only changed fields override.

use indexmap::IndexMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use crate::constants::CONTENT_HASH_LENGTH;

use super::arguments::{Argument, ArgumentKey, Arguments};
use super::reference::Reference;
use super::tags::{TagAttributes, Tags};
use super::value::Value;

/// Autowiring mode of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Autowire {
    /// Arguments are never inferred
    #[default]
    Off,
    /// Arguments are inferred from declared types through the candidate index
    ByType,
    /// Arguments are inferred only from ids or aliases equal to the type name
    ById,
}

/// How the container obtains the service instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factory {
    /// A free function
    Function(String),
    /// A static method on a class
    Static {
        /// Declaring class
        class: String,
        /// Method name
        method: String,
    },
    /// A method on another service
    Service {
        /// The factory service
        service: Reference,
        /// Method name
        method: String,
    },
}

/// A method call applied after construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCall {
    /// Method name
    pub method: String,
    /// Configured arguments
    pub arguments: Arguments,
}

impl MethodCall {
    /// Create a call with the given arguments
    pub fn new<S: Into<String>>(method: S, arguments: Arguments) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Fields whose explicit configuration is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefinitionChange {
    /// `class`
    Class,
    /// `file`
    File,
    /// `factory`
    Factory,
    /// `shared`
    Shared,
    /// `public`
    Public,
    /// `abstract`
    Abstract,
    /// `lazy`
    Lazy,
    /// `autowire`
    Autowire,
}

/// A service definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    class: Option<String>,
    file: Option<String>,
    factory: Option<Factory>,
    arguments: Arguments,
    method_calls: Vec<MethodCall>,
    properties: IndexMap<String, Value>,
    tags: Tags,
    shared: bool,
    public: bool,
    #[serde(rename = "abstract")]
    is_abstract: bool,
    synthetic: bool,
    lazy: bool,
    autowire: Autowire,
    instanceof: IndexMap<String, Definition>,
    parent: Option<String>,
    inherit_tags: bool,
    #[serde(skip)]
    changes: BTreeSet<DefinitionChange>,
}

impl Default for Definition {
    fn default() -> Self {
        Self {
            class: None,
            file: None,
            factory: None,
            arguments: Arguments::new(),
            method_calls: Vec::new(),
            properties: IndexMap::new(),
            tags: Tags::new(),
            shared: true,
            public: true,
            is_abstract: false,
            synthetic: false,
            lazy: false,
            autowire: Autowire::Off,
            instanceof: IndexMap::new(),
            parent: None,
            inherit_tags: false,
            changes: BTreeSet::new(),
        }
    }
}

impl Definition {
    /// Create a definition of `class`
    pub fn new<S: Into<String>>(class: S) -> Self {
        let mut definition = Self::default();
        definition.set_class(class);
        definition
    }

    /// Create a child definition inheriting from `parent`
    pub fn child<S: Into<String>>(parent: S) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------------
    // Class, file and factory
    // ------------------------------------------------------------------------

    /// Configured class, possibly containing `%param%` placeholders
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Set the class
    pub fn set_class<S: Into<String>>(&mut self, class: S) -> &mut Self {
        self.class = Some(class.into());
        self.changes.insert(DefinitionChange::Class);
        self
    }

    /// File loaded before the service is built
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Set the file
    pub fn set_file<S: Into<String>>(&mut self, file: S) -> &mut Self {
        self.file = Some(file.into());
        self.changes.insert(DefinitionChange::File);
        self
    }

    /// Factory building the service
    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    /// Set the factory
    pub fn set_factory(&mut self, factory: Factory) -> &mut Self {
        self.factory = Some(factory);
        self.changes.insert(DefinitionChange::Factory);
        self
    }

    // ------------------------------------------------------------------------
    // Arguments, calls and properties
    // ------------------------------------------------------------------------

    /// Constructor arguments
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Mutable constructor arguments
    pub fn arguments_mut(&mut self) -> &mut Arguments {
        &mut self.arguments
    }

    /// Replace the constructor arguments
    pub fn set_arguments(&mut self, arguments: Arguments) -> &mut Self {
        self.arguments = arguments;
        self
    }

    /// Append a positional constructor argument
    pub fn add_argument<A: Into<Argument>>(&mut self, argument: A) -> &mut Self {
        self.arguments.push(argument);
        self
    }

    /// Set a constructor argument under `key`
    pub fn set_argument<A: Into<Argument>>(&mut self, key: ArgumentKey, argument: A) -> &mut Self {
        self.arguments.set(key, argument);
        self
    }

    /// Configured method calls, in order
    pub fn method_calls(&self) -> &[MethodCall] {
        &self.method_calls
    }

    /// Mutable method calls
    pub fn method_calls_mut(&mut self) -> &mut Vec<MethodCall> {
        &mut self.method_calls
    }

    /// Replace the method calls
    pub fn set_method_calls(&mut self, calls: Vec<MethodCall>) -> &mut Self {
        self.method_calls = calls;
        self
    }

    /// Append a method call
    pub fn add_method_call<S: Into<String>>(
        &mut self,
        method: S,
        arguments: Arguments,
    ) -> &mut Self {
        self.method_calls.push(MethodCall::new(method, arguments));
        self
    }

    /// Whether a call to `method` is configured (case-insensitive)
    pub fn has_method_call(&self, method: &str) -> bool {
        self.method_calls
            .iter()
            .any(|call| call.method.eq_ignore_ascii_case(method))
    }

    /// Properties set after construction
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    /// Mutable properties
    pub fn properties_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.properties
    }

    /// Set a property
    pub fn set_property<S: Into<String>, V: Into<Value>>(
        &mut self,
        name: S,
        value: V,
    ) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    // ------------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------------

    /// Tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Mutable tags
    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    /// Replace the tags
    pub fn set_tags(&mut self, tags: Tags) -> &mut Self {
        self.tags = tags;
        self
    }

    /// Add one occurrence of a tag
    pub fn add_tag<S: Into<String>>(&mut self, name: S, attributes: TagAttributes) -> &mut Self {
        self.tags.add(name, attributes);
        self
    }

    /// Whether the definition carries `name`
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.has(name)
    }

    // ------------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------------

    /// Whether one instance is shared by every consumer
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Set the shared flag
    pub fn set_shared(&mut self, shared: bool) -> &mut Self {
        self.shared = shared;
        self.changes.insert(DefinitionChange::Shared);
        self
    }

    /// Whether the service can be fetched from the container directly
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Set the public flag
    pub fn set_public(&mut self, public: bool) -> &mut Self {
        self.public = public;
        self.changes.insert(DefinitionChange::Public);
        self
    }

    /// Whether the definition is a template that is never built
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Set the abstract flag
    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.is_abstract = is_abstract;
        self.changes.insert(DefinitionChange::Abstract);
        self
    }

    /// Whether the service is injected at runtime rather than built
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Set the synthetic flag
    pub fn set_synthetic(&mut self, synthetic: bool) -> &mut Self {
        self.synthetic = synthetic;
        self
    }

    /// Whether the service is built on first use
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Set the lazy flag
    pub fn set_lazy(&mut self, lazy: bool) -> &mut Self {
        self.lazy = lazy;
        self.changes.insert(DefinitionChange::Lazy);
        self
    }

    /// Autowiring mode
    pub fn autowire(&self) -> Autowire {
        self.autowire
    }

    /// Whether any autowiring mode is enabled
    pub fn is_autowired(&self) -> bool {
        self.autowire != Autowire::Off
    }

    /// Set the autowiring mode
    pub fn set_autowire(&mut self, autowire: Autowire) -> &mut Self {
        self.autowire = autowire;
        self.changes.insert(DefinitionChange::Autowire);
        self
    }

    // ------------------------------------------------------------------------
    // Inheritance
    // ------------------------------------------------------------------------

    /// Conditional configuration keyed by capability type
    pub fn instanceof(&self) -> &IndexMap<String, Definition> {
        &self.instanceof
    }

    /// Add conditional configuration applied when the class satisfies `type_name`
    pub fn set_instanceof<S: Into<String>>(
        &mut self,
        type_name: S,
        partial: Definition,
    ) -> &mut Self {
        self.instanceof.insert(type_name.into(), partial);
        self
    }

    /// Remove and return every conditional
    pub fn take_instanceof(&mut self) -> IndexMap<String, Definition> {
        std::mem::take(&mut self.instanceof)
    }

    /// Parent id of a child definition
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Whether the definition is a child definition
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Detach the definition from its parent
    pub fn clear_parent(&mut self) -> &mut Self {
        self.parent = None;
        self.inherit_tags = false;
        self
    }

    /// Whether the parent's tags are appended to this child's
    pub fn inherits_tags(&self) -> bool {
        self.inherit_tags
    }

    /// Set tag inheritance for a child definition
    pub fn set_inherit_tags(&mut self, inherit: bool) -> &mut Self {
        self.inherit_tags = inherit;
        self
    }

    // ------------------------------------------------------------------------
    // Change tracking
    // ------------------------------------------------------------------------

    /// Whether `field` was explicitly configured
    pub fn is_changed(&self, field: DefinitionChange) -> bool {
        self.changes.contains(&field)
    }

    /// Explicitly configured fields
    pub fn changes(&self) -> &BTreeSet<DefinitionChange> {
        &self.changes
    }

    /// Replace the change set
    pub fn set_changes(&mut self, changes: BTreeSet<DefinitionChange>) -> &mut Self {
        self.changes = changes;
        self
    }

    /// Hex SHA-256 of the serialized definition, truncated
    pub fn content_hash(&self) -> serde_json::Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        Ok(digest[..CONTENT_HASH_LENGTH].to_string())
    }
}

// Builder-style methods
impl Definition {
    /// Append a positional argument
    pub fn with_argument<A: Into<Argument>>(mut self, argument: A) -> Self {
        self.add_argument(argument);
        self
    }

    /// Set an argument under `key`
    pub fn with_keyed_argument<A: Into<Argument>>(mut self, key: ArgumentKey, argument: A) -> Self {
        self.set_argument(key, argument);
        self
    }

    /// Append a method call
    pub fn with_method_call<S: Into<String>>(mut self, method: S, arguments: Arguments) -> Self {
        self.add_method_call(method, arguments);
        self
    }

    /// Set a property
    pub fn with_property<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.set_property(name, value);
        self
    }

    /// Add a tag occurrence
    pub fn with_tag<S: Into<String>>(mut self, name: S, attributes: TagAttributes) -> Self {
        self.add_tag(name, attributes);
        self
    }

    /// Set the autowiring mode
    pub fn with_autowire(mut self, autowire: Autowire) -> Self {
        self.set_autowire(autowire);
        self
    }

    /// Enable autowiring by type
    pub fn autowired(self) -> Self {
        self.with_autowire(Autowire::ByType)
    }

    /// Set the public flag
    pub fn with_public(mut self, public: bool) -> Self {
        self.set_public(public);
        self
    }

    /// Set the shared flag
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.set_shared(shared);
        self
    }

    /// Set the abstract flag
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.set_abstract(is_abstract);
        self
    }

    /// Set the synthetic flag
    pub fn with_synthetic(mut self, synthetic: bool) -> Self {
        self.set_synthetic(synthetic);
        self
    }

    /// Set the lazy flag
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.set_lazy(lazy);
        self
    }

    /// Add conditional configuration
    pub fn with_instanceof<S: Into<String>>(mut self, type_name: S, partial: Definition) -> Self {
        self.set_instanceof(type_name, partial);
        self
    }

    /// Enable parent tag inheritance
    pub fn with_inherit_tags(mut self, inherit: bool) -> Self {
        self.set_inherit_tags(inherit);
        self
    }
}
