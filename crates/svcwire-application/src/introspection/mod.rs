//! Type introspection
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`descriptors`] | Serializable class, method and parameter descriptors |
//! | [`registry`] | [`TypeRegistry`], the in-memory `TypeIntrospector` |

pub mod descriptors;
pub mod registry;

pub use descriptors::{
    ClassDescriptor, MethodDescriptor, ParameterDescriptor, RegistryDocument,
    SubscriptionDescriptor,
};
pub use registry::{TypeRegistry, json_to_value};
