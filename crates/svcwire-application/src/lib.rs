//! Application Layer - svcwire
//!
//! Resolvers that turn a graph of declarative service definitions into a
//! fully wired graph, and the pipeline that runs them in order.
//!
//! ## Architecture
//!
//! The application layer:
//! - Walks the definition graph through the [`compiler::RecursivePass`] trait
//! - Implements the inheritance, autowiring and argument resolvers
//! - Orchestrates them in a fixed order through [`ResolutionPipeline`]
//! - Provides an in-memory [`introspection::TypeRegistry`]
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `svcwire-domain`: definition graph, values, errors and port traits
//! - Pure Rust libraries for ordering, serialization and logging

pub mod compiler;
pub mod diagnostics;
pub mod introspection;
pub mod pipeline;

pub use compiler::{ArgumentResolver, AutowireResolver, CandidateIndex, InheritanceResolver};
pub use diagnostics::{CollectedDiagnostics, Diagnostic};
pub use introspection::TypeRegistry;
pub use pipeline::{PipelineOptions, PipelineReport, ResolutionPipeline};
