//! Configuration
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`loader`] | Figment-based loading, validation and saving |
//! | [`types`] | Serializable configuration sections |

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LoggingConfig, PipelineConfig, RegistryConfig};
