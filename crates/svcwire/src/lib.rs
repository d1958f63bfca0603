//! # svcwire
//!
//! Resolution pipeline for service container definition graphs.
//!
//! A loader builds a [`ContainerGraph`] of declarative service definitions;
//! svcwire resolves it in place before a container is built from it:
//!
//! - **Definition inheritance**: child definitions are flattened onto their
//!   parents and conditional per-type configuration is merged in
//! - **Autowiring**: constructor and setter arguments are inferred from
//!   declared types, registering missing dependencies when possible
//! - **Named arguments and service locators**: `$name` arguments become
//!   positions and every service subscriber gets its own locator
//!
//! ## Example
//!
//! ```ignore
//! use svcwire::{AppConfig, ContainerGraph, Definition};
//! use svcwire::introspection::{ClassDescriptor, ParameterDescriptor, TypeRegistry};
//!
//! let registry = TypeRegistry::new()
//!     .with(ClassDescriptor::class("Logger"))
//!     .with(ClassDescriptor::class("Mailer")
//!         .with_constructor(vec![ParameterDescriptor::typed("logger", "Logger")]));
//!
//! let mut graph = ContainerGraph::new();
//! graph.register("logger", "Logger");
//! graph.set_definition("mailer", Definition::new("Mailer").autowired());
//!
//! let report = svcwire::compile(&mut graph, &registry, &AppConfig::default())?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Definition graph, values, error type and ports
//! - `application` - Graph walker, resolvers, type registry and pipeline
//! - `infrastructure` - Configuration, logging and type registry files

pub use svcwire_domain::error::Result;
pub use svcwire_domain::ports::TypeIntrospector;
use tracing::info;

/// Domain layer - definition graph, values and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use svcwire_domain::*;
}

/// Application layer - resolvers and pipeline
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use svcwire_application::*;
}

/// Infrastructure layer - configuration, logging and registry files
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use svcwire_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use svcwire_application::introspection;
pub use svcwire_application::{
    CollectedDiagnostics, PipelineOptions, PipelineReport, ResolutionPipeline,
};
pub use svcwire_infrastructure::{AppConfig, ConfigLoader, TracingDiagnostics};

/// Resolve `graph` in place with the configured pipeline
///
/// Diagnostics are emitted as `tracing` warnings.
pub fn compile(
    graph: &mut ContainerGraph,
    introspector: &dyn TypeIntrospector,
    config: &AppConfig,
) -> Result<PipelineReport> {
    let pipeline = ResolutionPipeline::new(config.pipeline.to_options());
    pipeline.run(graph, introspector, &TracingDiagnostics::new())
}

/// Resolve `graph` against the type registry files named by `config`
pub fn compile_with_registry(
    graph: &mut ContainerGraph,
    config: &AppConfig,
) -> Result<PipelineReport> {
    let registry = svcwire_infrastructure::load_registry(&config.registry)?;
    info!(types = registry.len(), "compiling with type registry");
    compile(graph, &registry, config)
}
