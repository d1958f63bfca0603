//! Error handling types

use thiserror::Error;

use crate::ports::TypeKind;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the resolution pipeline
///
/// Every resolution error names the offending service so a failure can be
/// located without re-running the pipeline with verbose tracing.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument has no declared type, no default and no explicit value
    #[error(
        "Cannot autowire service \"{service_id}\": argument ${parameter} of method {method}() must have a type-hint or be given a value explicitly."
    )]
    MissingTypeHint {
        /// Service under resolution
        service_id: String,
        /// Qualified method (`Class::method`)
        method: String,
        /// Parameter name
        parameter: String,
    },

    /// The declared parameter type does not exist
    #[error(
        "Cannot autowire service \"{service_id}\": argument ${parameter} of method {method}() has type \"{type_name}\" but this class does not exist."
    )]
    UnresolvableType {
        /// Service under resolution
        service_id: String,
        /// Qualified method (`Class::method`)
        method: String,
        /// Parameter name
        parameter: String,
        /// The missing type
        type_name: String,
    },

    /// No candidate matched and auto-registration was impossible
    #[error("Cannot autowire service \"{service_id}\": {detail}")]
    NoCandidateFound {
        /// Service under resolution
        service_id: String,
        /// Requested type
        type_name: String,
        /// Full description of the failing site and suggestions
        detail: String,
    },

    /// Several candidates matched and no alias disambiguates them
    #[error(
        "Cannot autowire service \"{service_id}\": argument ${parameter} of method {method}() references {kind} \"{type_name}\" but multiple candidate services exist. This type-hint could be aliased to one of these existing services: \"{}\"{}.",
        .candidates.join("\", \""),
        alternative_suffix(.alternative)
    )]
    AmbiguousCandidate {
        /// Service under resolution
        service_id: String,
        /// Qualified method (`Class::method`)
        method: String,
        /// Parameter name
        parameter: String,
        /// Requested type
        type_name: String,
        /// Kind of the requested type
        kind: TypeKind,
        /// Colliding ids in registration order
        candidates: Vec<String>,
        /// A registered supertype the caller could depend on instead
        alternative: Option<String>,
    },

    /// A tag declares attributes outside its accepted set
    #[error(
        "The \"{tag}\" tag accepts only the \"key\" and \"id\" attributes, \"{}\" given for service \"{service_id}\".",
        .attributes.join("\", \"")
    )]
    InvalidTagAttributes {
        /// Service carrying the tag
        service_id: String,
        /// Tag name
        tag: String,
        /// Attribute names found on the tag
        attributes: Vec<String>,
    },

    /// A required tag attribute is absent
    #[error(
        "Missing \"{attribute}\" attribute on \"{tag}\" tag with key=\"{}\" for service \"{service_id}\".",
        .key.as_deref().unwrap_or_default()
    )]
    MissingRequiredTagAttribute {
        /// Service carrying the tag
        service_id: String,
        /// Tag name
        tag: String,
        /// Missing attribute
        attribute: String,
        /// The `key` attribute of the offending tag, when given
        key: Option<String>,
    },

    /// A configured class cannot be found or lacks a required capability
    #[error("{message}")]
    UnresolvableClass {
        /// Service under resolution
        service_id: String,
        /// The configured class
        class: String,
        /// Description of the failure
        message: String,
    },

    /// A name-keyed argument matches no parameter
    #[error(
        "Unable to resolve service \"{service_id}\": method \"{class}::{method}\" has no argument named \"${name}\". Check your service definition."
    )]
    NamedArgumentNotFound {
        /// Service under resolution
        service_id: String,
        /// Class declaring the method
        class: String,
        /// Method name
        method: String,
        /// Argument name without the `$` marker
        name: String,
    },

    /// A configured or discovered method call cannot be wired
    #[error("Cannot autowire service \"{service_id}\": method {class}::{method}() {reason}.")]
    InvalidMethodCall {
        /// Service under resolution
        service_id: String,
        /// Class declaring the method
        class: String,
        /// Method name
        method: String,
        /// Why the call is invalid
        reason: String,
    },

    /// A subscriber declares a malformed subscription type
    #[error(
        "{class}::subscribed_services() must return valid types for service \"{service_id}\" key \"{key}\", \"{type_name}\" returned."
    )]
    InvalidSubscribedType {
        /// Subscriber service
        service_id: String,
        /// Subscriber class
        class: String,
        /// Subscription key
        key: String,
        /// The rejected type string
        type_name: String,
    },

    /// A definition is structurally invalid
    #[error("Invalid service \"{service_id}\": {message}")]
    InvalidDefinition {
        /// Offending service
        service_id: String,
        /// Description of the problem
        message: String,
    },

    /// A `%parameter%` placeholder names an unknown parameter
    #[error("You have requested a non-existent parameter \"{name}\".")]
    ParameterNotFound {
        /// Parameter name
        name: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

fn alternative_suffix(alternative: &Option<String>) -> String {
    alternative
        .as_ref()
        .map(|alt| format!("; or be updated to \"{alt}\""))
        .unwrap_or_default()
}

// Resolution error creation methods
impl Error {
    /// Create an invalid definition error
    pub fn invalid_definition<S: Into<String>, M: Into<String>>(service_id: S, message: M) -> Self {
        Self::InvalidDefinition {
            service_id: service_id.into(),
            message: message.into(),
        }
    }

    /// Create an invalid method call error
    pub fn invalid_method_call<S, C, M, R>(service_id: S, class: C, method: M, reason: R) -> Self
    where
        S: Into<String>,
        C: Into<String>,
        M: Into<String>,
        R: Into<String>,
    {
        Self::InvalidMethodCall {
            service_id: service_id.into(),
            class: class.into(),
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create an unresolvable class error
    pub fn unresolvable_class<S, C, M>(service_id: S, class: C, message: M) -> Self
    where
        S: Into<String>,
        C: Into<String>,
        M: Into<String>,
    {
        Self::UnresolvableClass {
            service_id: service_id.into(),
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create a parameter not found error
    pub fn parameter_not_found<S: Into<String>>(name: S) -> Self {
        Self::ParameterNotFound { name: name.into() }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether the error describes a failure to resolve the graph
    ///
    /// Nested auto-registration swallows these and reports the dependency
    /// as not auto-registrable; configuration and I/O errors always abort.
    pub fn is_resolution_failure(&self) -> bool {
        !matches!(self, Self::Configuration { .. } | Self::Io { .. })
    }

    /// The service the error refers to, when it names one
    pub fn service_id(&self) -> Option<&str> {
        match self {
            Self::MissingTypeHint { service_id, .. }
            | Self::UnresolvableType { service_id, .. }
            | Self::NoCandidateFound { service_id, .. }
            | Self::AmbiguousCandidate { service_id, .. }
            | Self::InvalidTagAttributes { service_id, .. }
            | Self::MissingRequiredTagAttribute { service_id, .. }
            | Self::UnresolvableClass { service_id, .. }
            | Self::NamedArgumentNotFound { service_id, .. }
            | Self::InvalidMethodCall { service_id, .. }
            | Self::InvalidSubscribedType { service_id, .. }
            | Self::InvalidDefinition { service_id, .. } => Some(service_id),
            Self::ParameterNotFound { .. } | Self::Configuration { .. } | Self::Io { .. } => None,
        }
    }
}
