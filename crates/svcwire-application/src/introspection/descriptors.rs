//! Type descriptors
//!
//! Serializable description of classes, interfaces and their methods, as
//! registered in a [`super::TypeRegistry`] or read from a registry file.

use serde::{Deserialize, Serialize};
use svcwire_domain::constants::CONSTRUCTOR_METHOD;
use svcwire_domain::ports::TypeKind;

/// A registry document: every described type in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Described classes and interfaces
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
}

/// A class or interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully qualified type name
    pub name: String,
    /// Concrete, abstract or interface
    #[serde(default)]
    pub kind: TypeKind,
    /// Extended class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Implemented (or, for interfaces, extended) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Declared methods, the constructor included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDescriptor>,
    /// Subscriptions of a service subscriber class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_services: Option<Vec<SubscriptionDescriptor>>,
}

impl ClassDescriptor {
    fn with_kind<S: Into<String>>(name: S, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            subscribed_services: None,
        }
    }

    /// A concrete class
    pub fn class<S: Into<String>>(name: S) -> Self {
        Self::with_kind(name, TypeKind::Concrete)
    }

    /// An abstract class
    pub fn abstract_class<S: Into<String>>(name: S) -> Self {
        Self::with_kind(name, TypeKind::Abstract)
    }

    /// An interface
    pub fn interface<S: Into<String>>(name: S) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    /// Set the extended class
    pub fn extends<S: Into<String>>(mut self, parent: S) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add an implemented interface
    pub fn implements<S: Into<String>>(mut self, interface: S) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Declare a public constructor
    pub fn with_constructor(self, parameters: Vec<ParameterDescriptor>) -> Self {
        self.with_method(MethodDescriptor::new(CONSTRUCTOR_METHOD, parameters))
    }

    /// Declare a method
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a subscription, making the class a subscriber
    pub fn subscribes(mut self, subscription: SubscriptionDescriptor) -> Self {
        self.subscribed_services
            .get_or_insert_with(Vec::new)
            .push(subscription);
        self
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDescriptor>,
    /// Visibility
    #[serde(default = "default_public")]
    pub public: bool,
    /// Marked as required for injection
    #[serde(default)]
    pub required: bool,
    /// Takes the required marker of the method it overrides
    #[serde(default)]
    pub inherit_doc: bool,
}

fn default_public() -> bool {
    true
}

impl MethodDescriptor {
    /// A public method
    pub fn new<S: Into<String>>(name: S, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
            public: true,
            required: false,
            inherit_doc: false,
        }
    }

    /// Make the method non-public
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Mark the method as required for injection
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Inherit the required marker from the overridden method
    pub fn inherit_doc(mut self) -> Self {
        self.inherit_doc = true;
        self
    }
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name without the `$` marker
    pub name: String,
    /// Declared type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Optional with a null default, for formats without a null literal
    #[serde(default)]
    pub optional: bool,
    /// Accepts null
    #[serde(default)]
    pub nullable: bool,
    /// Collects every remaining argument
    #[serde(default)]
    pub variadic: bool,
}

impl ParameterDescriptor {
    /// An untyped required parameter
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            default: None,
            optional: false,
            nullable: false,
            variadic: false,
        }
    }

    /// A required parameter of type `type_name`
    pub fn typed<S: Into<String>, T: Into<String>>(name: S, type_name: T) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::new(name)
        }
    }

    /// Set the default value
    pub fn with_default<V: Into<serde_json::Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Make the parameter optional with a null default
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.nullable = true;
        self
    }

    /// Accept null
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Collect every remaining argument
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Whether a default is declared
    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.optional
    }
}

/// A subscription of a service subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDescriptor {
    /// Lookup key; the type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Subscribed type, `?`-prefixed when optional
    #[serde(rename = "type")]
    pub type_name: String,
}

impl SubscriptionDescriptor {
    /// Subscription keyed by its type
    pub fn new<T: Into<String>>(type_name: T) -> Self {
        Self {
            key: None,
            type_name: type_name.into(),
        }
    }

    /// Subscription under an explicit key
    pub fn keyed<K: Into<String>, T: Into<String>>(key: K, type_name: T) -> Self {
        Self {
            key: Some(key.into()),
            type_name: type_name.into(),
        }
    }
}
