//! # svcwire Domain Layer
//!
//! Core types of the service definition resolution pipeline.
//!
//! The domain layer owns the definition graph that every resolver walks and
//! mutates, the value model flowing through definition arguments, the error
//! type shared by all resolvers, and the ports through which the pipeline
//! reaches its external collaborators.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Definitions, arguments, values, references and tags |
//! | [`graph`] | The mutable container graph and its parameter bag |
//! | [`ports`] | Type introspection and diagnostics boundaries |
//! | [`error`] | Resolution error kinds |
//! | [`constants`] | Reserved ids, tags and prefixes |

pub mod constants;
pub mod error;
pub mod graph;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use graph::{Alias, ContainerGraph, ParameterBag};
pub use ports::{
    DiagnosticsSink, MethodInfo, ParameterInfo, SubscribedService, TypeIntrospector, TypeKind,
};
pub use value_objects::{
    Argument, ArgumentKey, Arguments, Autowire, Definition, DefinitionChange, Factory,
    InvalidBehavior, MethodCall, Reference, TagAttributes, Tags, TypedReference, Value,
};
