//! Domain layer constants
//!
//! Reserved identifiers shared by the resolvers. Infrastructure-specific
//! constants (file names, environment prefixes) live in
//! `svcwire_infrastructure::constants`.

// ============================================================================
// TYPE INTROSPECTION
// ============================================================================

/// Method name under which type introspection exposes constructors
pub const CONSTRUCTOR_METHOD: &str = "new";

// ============================================================================
// AUTOWIRING
// ============================================================================

/// Prefix of ids given to definitions registered by the autowiring resolver
pub const AUTOWIRED_ID_PREFIX: &str = "autowired.";

// ============================================================================
// SERVICE LOCATORS
// ============================================================================

/// Tag marking a definition as a service subscriber
pub const SERVICE_SUBSCRIBER_TAG: &str = "container.service_subscriber";

/// Capability a subscriber class must implement
pub const SERVICE_SUBSCRIBER_CAPABILITY: &str = "ServiceSubscriber";

/// Tag added to every synthesized locator definition
pub const SERVICE_LOCATOR_TAG: &str = "container.service_locator";

/// Class of synthesized locator definitions
pub const SERVICE_LOCATOR_CLASS: &str = "ServiceLocator";

/// Prefix of synthesized locator ids
pub const SERVICE_LOCATOR_ID_PREFIX: &str = "service_locator.";

/// Placeholder reference id that subscribers use to reach their locator
pub const CONTAINER_PLACEHOLDER_ID: &str = "container";

/// Tag attribute naming the target service of a subscription
pub const SUBSCRIBER_ATTRIBUTE_ID: &str = "id";

/// Tag attribute naming the subscription key
pub const SUBSCRIBER_ATTRIBUTE_KEY: &str = "key";

/// Number of hex characters kept from a definition content hash
pub const CONTENT_HASH_LENGTH: usize = 16;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Pass name reported by the inheritance resolver
pub const PASS_INHERITANCE: &str = "resolve_definition_inheritance";

/// Pass name reported by the autowiring resolver
pub const PASS_AUTOWIRE: &str = "autowire";

/// Pass name reported by the named-argument and locator resolver
pub const PASS_ARGUMENTS: &str = "resolve_arguments";
