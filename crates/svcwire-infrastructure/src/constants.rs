//! Infrastructure constants
//!
//! Defaults for configuration lookup, logging and registry files.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "svcwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "svcwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SVCWIRE";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "SVCWIRE_LOG";

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "svcwire";

// ============================================================================
// TYPE REGISTRY CONSTANTS
// ============================================================================

/// Extension of type registry files
pub const REGISTRY_FILE_EXTENSION: &str = "toml";
