//! Application configuration root

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, PipelineConfig, RegistryConfig};

/// Complete svcwire configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Resolution pipeline settings
    pub pipeline: PipelineConfig,
    /// Type registry sources
    pub registry: RegistryConfig,
}
