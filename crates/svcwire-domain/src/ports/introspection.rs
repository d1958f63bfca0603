//! Type Introspection Port
//!
//! Read-only view of the nominal type system the definitions refer to:
//! classes, interfaces, their methods and parameters, and subtype relations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CONSTRUCTOR_METHOD;
use crate::value_objects::Value;

/// Kind of a named type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Instantiable class
    #[default]
    Concrete,
    /// Abstract class
    Abstract,
    /// Interface (capability)
    Interface,
}

impl TypeKind {
    /// Whether instances of the type can be built directly
    pub fn is_instantiable(self) -> bool {
        self == Self::Concrete
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface => f.write_str("interface"),
            Self::Concrete | Self::Abstract => f.write_str("class"),
        }
    }
}

/// A declared method parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterInfo {
    /// Parameter name without the `$` marker
    pub name: String,
    /// Declared type; `None` when untyped or typed with a builtin
    pub type_name: Option<String>,
    /// Default value, when the parameter is optional
    pub default: Option<Value>,
    /// Whether null is accepted
    pub nullable: bool,
    /// Whether the parameter collects every remaining argument
    pub variadic: bool,
}

impl ParameterInfo {
    /// Create a required, untyped parameter
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            default: None,
            nullable: false,
            variadic: false,
        }
    }

    /// Create a required parameter of type `type_name`
    pub fn typed<S: Into<String>, T: Into<String>>(name: S, type_name: T) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::new(name)
        }
    }

    /// Set the default value
    pub fn with_default<V: Into<Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the parameter nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the parameter variadic
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Whether a call may omit the parameter
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.variadic
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Class or interface declaring the method
    pub declaring_class: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Whether the method is callable from outside the class
    pub public: bool,
    /// Whether the method must be called during construction
    pub required: bool,
}

impl MethodInfo {
    /// Number of parameters a call must supply
    pub fn required_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.is_optional()).count()
    }

    /// Position of the parameter named `name`
    pub fn parameter_position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// `Class::method` rendering used in messages
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.declaring_class, self.name)
    }
}

/// One dependency declared by a service subscriber
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscribedService {
    /// Lookup key; the type itself when absent
    pub key: Option<String>,
    /// Declared type, `?`-prefixed when optional
    pub type_name: String,
}

impl SubscribedService {
    /// Subscription keyed by its own type
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

/// Type introspection facade
///
/// Implementations answer from whatever source describes the type system:
/// the in-memory registry, a registry file or a host language's reflection.
/// Method lookup is case-insensitive.
pub trait TypeIntrospector: Send + Sync {
    /// Whether `name` is a known class or interface
    fn has_class(&self, name: &str) -> bool;

    /// Kind of a known type
    fn kind(&self, name: &str) -> Option<TypeKind>;

    /// A method of `class`, own or inherited
    fn get_method(&self, class: &str, method: &str) -> Option<MethodInfo>;

    /// The constructor of `class`, when it declares or inherits one
    fn constructor(&self, class: &str) -> Option<MethodInfo> {
        self.get_method(class, CONSTRUCTOR_METHOD)
    }

    /// Every method of `class` other than the constructor: own declarations
    /// first, then inherited ones, the nearest override winning by name
    fn methods(&self, class: &str) -> Vec<MethodInfo>;

    /// Whether `class` is a strict subtype of `parent` (extends or implements)
    fn is_subtype_of(&self, class: &str, parent: &str) -> bool;

    /// Subscriptions declared by a service subscriber class
    fn subscribed_services(&self, class: &str) -> Option<Vec<SubscribedService>>;
}
