//! Resolution pipeline configuration types

use serde::{Deserialize, Serialize};
use svcwire_application::PipelineOptions;
use svcwire_domain::constants::{
    AUTOWIRED_ID_PREFIX, CONTAINER_PLACEHOLDER_ID, SERVICE_LOCATOR_ID_PREFIX,
    SERVICE_SUBSCRIBER_CAPABILITY, SERVICE_SUBSCRIBER_TAG,
};

/// Pipeline configuration
///
/// Stage toggles never reorder the stages; a disabled stage is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Merge parent and conditional definitions
    pub resolve_inheritance: bool,

    /// Infer arguments from declared types
    pub autowire: bool,

    /// Map named arguments and compile service subscribers
    pub resolve_arguments: bool,

    /// Prefix of auto-registered definition ids
    pub autowired_id_prefix: String,

    /// Prefix of service locator ids
    pub locator_id_prefix: String,

    /// Reference id subscribers use to reach their locator
    pub container_placeholder_id: String,

    /// Tag marking service subscribers
    pub subscriber_tag: String,

    /// Capability a subscriber class must implement
    pub subscriber_capability: String,

    /// Fail on unmarked string argument keys instead of logging a deprecation
    pub strict_legacy_arguments: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resolve_inheritance: true,
            autowire: true,
            resolve_arguments: true,
            autowired_id_prefix: AUTOWIRED_ID_PREFIX.to_string(),
            locator_id_prefix: SERVICE_LOCATOR_ID_PREFIX.to_string(),
            container_placeholder_id: CONTAINER_PLACEHOLDER_ID.to_string(),
            subscriber_tag: SERVICE_SUBSCRIBER_TAG.to_string(),
            subscriber_capability: SERVICE_SUBSCRIBER_CAPABILITY.to_string(),
            strict_legacy_arguments: false,
        }
    }
}

impl PipelineConfig {
    /// Options for the application-level pipeline
    pub fn to_options(&self) -> PipelineOptions {
        PipelineOptions {
            resolve_inheritance: self.resolve_inheritance,
            autowire: self.autowire,
            resolve_arguments: self.resolve_arguments,
            autowired_id_prefix: self.autowired_id_prefix.clone(),
            locator_id_prefix: self.locator_id_prefix.clone(),
            container_placeholder_id: self.container_placeholder_id.clone(),
            subscriber_tag: self.subscriber_tag.clone(),
            subscriber_capability: self.subscriber_capability.clone(),
            strict_legacy_arguments: self.strict_legacy_arguments,
        }
    }
}

impl From<&PipelineConfig> for PipelineOptions {
    fn from(config: &PipelineConfig) -> Self {
        config.to_options()
    }
}
