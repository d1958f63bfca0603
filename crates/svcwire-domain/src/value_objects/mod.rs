//! Domain Value Objects
//!
//! The value model flowing through the definition graph.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Definition`] | How one service is built, plus its inheritance data |
//! | [`Arguments`] | Position- or name-keyed call arguments |
//! | [`Value`] | Literal, collection, reference or inline definition |
//! | [`Reference`] | Pointer to another service by id |
//! | [`Tags`] | Ordered tag multimap |

/// Call arguments and their keys
pub mod arguments;
/// Service definitions
pub mod definition;
/// Service references
pub mod reference;
/// Definition tags
pub mod tags;
/// Argument values
pub mod value;

pub use arguments::{Argument, ArgumentKey, Arguments};
pub use definition::{Autowire, Definition, DefinitionChange, Factory, MethodCall};
pub use reference::{InvalidBehavior, Reference, TypedReference};
pub use tags::{TagAttributes, Tags};
pub use value::Value;
