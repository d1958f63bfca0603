//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the resolution pipeline.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration from defaults, TOML and environment |
//! | [`constants`] | Centralized configuration constants |
//! | [`registry`] | Type registry files |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`diagnostics`] | Resolver diagnostics as tracing warnings |
//!
//! ### Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error_ext;
pub mod logging;
pub mod registry;

// Re-export commonly used types
pub use config::{AppConfig, ConfigBuilder, ConfigLoader};
pub use diagnostics::TracingDiagnostics;
pub use error_ext::ErrorContext;
pub use registry::load_registry;
