//! Service locator synthesis
//!
//! A service subscriber declares the dependencies it may fetch lazily. For
//! each subscriber definition a private locator definition is registered
//! holding one service closure per subscription key; the subscriber reaches
//! it through the container placeholder reference.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use svcwire_domain::constants::{SUBSCRIBER_ATTRIBUTE_ID, SUBSCRIBER_ATTRIBUTE_KEY};
use svcwire_domain::error::{Error, Result};
use svcwire_domain::ports::SubscribedService;
use svcwire_domain::value_objects::{InvalidBehavior, TagAttributes, TypedReference, Value};

/// Well-formed subscription type: a namespaced name, optionally `?`-prefixed
static SUBSCRIPTION_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\??[a-zA-Z_\x{7f}-\x{10ffff}][a-zA-Z0-9_\x{7f}-\x{10ffff}]*(?:(?:\\|::)[a-zA-Z_\x{7f}-\x{10ffff}][a-zA-Z0-9_\x{7f}-\x{10ffff}]*)*$",
    )
    .expect("Invalid regex")
});

/// Subscription key → target id, from the subscriber tag occurrences
///
/// Empty occurrences are ignored; the first occurrence of a key wins.
pub fn tag_service_map(
    service_id: &str,
    tag: &str,
    occurrences: &[TagAttributes],
) -> Result<IndexMap<String, String>> {
    let mut services = IndexMap::new();
    for attributes in occurrences {
        if attributes.is_empty() {
            continue;
        }

        let mut names: Vec<&str> = attributes.keys().map(String::as_str).collect();
        names.sort_unstable();
        if names
            .iter()
            .any(|name| *name != SUBSCRIBER_ATTRIBUTE_ID && *name != SUBSCRIBER_ATTRIBUTE_KEY)
        {
            return Err(Error::InvalidTagAttributes {
                service_id: service_id.to_string(),
                tag: tag.to_string(),
                attributes: names.into_iter().map(str::to_string).collect(),
            });
        }

        let Some(id) = attributes.get(SUBSCRIBER_ATTRIBUTE_ID) else {
            return Err(Error::MissingRequiredTagAttribute {
                service_id: service_id.to_string(),
                tag: tag.to_string(),
                attribute: SUBSCRIBER_ATTRIBUTE_ID.to_string(),
                key: attributes.get(SUBSCRIBER_ATTRIBUTE_KEY).cloned(),
            });
        };
        let key = attributes.get(SUBSCRIBER_ATTRIBUTE_KEY).unwrap_or(id);
        services.entry(key.clone()).or_insert_with(|| id.clone());
    }
    Ok(services)
}

/// Locator map built from a subscriber's declared subscriptions
#[derive(Debug, Default)]
pub struct LocatorMap {
    /// Key → `ServiceClosure(TypedReference)`
    pub entries: IndexMap<String, Value>,
    /// Tag keys that match no declared subscription
    pub unused_keys: Vec<String>,
}

/// Build the locator map of a subscriber
///
/// Each subscription resolves to the id the tag maps its key to, or to its
/// own type when the tag does not mention the key.
pub fn build_locator_map(
    service_id: &str,
    class: &str,
    subscriptions: &[SubscribedService],
    mut tag_services: IndexMap<String, String>,
) -> Result<LocatorMap> {
    let mut entries = IndexMap::new();
    for subscription in subscriptions {
        let declared = subscription.type_name.as_str();
        let key_for_errors = subscription.key.as_deref().unwrap_or(declared);
        if !SUBSCRIPTION_TYPE.is_match(declared) {
            return Err(Error::InvalidSubscribedType {
                service_id: service_id.to_string(),
                class: class.to_string(),
                key: key_for_errors.to_string(),
                type_name: declared.to_string(),
            });
        }

        let (type_name, behavior) = match declared.strip_prefix('?') {
            Some(stripped) => (stripped, InvalidBehavior::Ignore),
            None => (declared, InvalidBehavior::Fail),
        };
        let key = subscription.key.clone().unwrap_or_else(|| type_name.to_string());
        let target = tag_services
            .shift_remove(&key)
            .unwrap_or_else(|| type_name.to_string());

        let reference = TypedReference::new(target, type_name).with_behavior(behavior);
        entries.insert(key, Value::ServiceClosure(Box::new(Value::TypedReference(reference))));
    }

    Ok(LocatorMap {
        entries,
        unused_keys: tag_services.into_keys().collect(),
    })
}

