//! Definition graph
//!
//! The mutable graph every resolver walks: definitions by id, aliases,
//! parameters and the class resources that influenced resolution.

/// Container graph
pub mod container;
/// Parameter bag
pub mod parameters;

pub use container::{Alias, ContainerGraph};
pub use parameters::ParameterBag;
