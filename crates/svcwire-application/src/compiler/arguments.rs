//! Named-argument and service-locator resolver
//!
//! Rewrites `$name` argument keys to parameter positions for the constructor
//! and every method call, and compiles service subscribers: each one gets a
//! private locator definition and its container placeholder references are
//! redirected to that locator.

use svcwire_domain::constants::{
    CONSTRUCTOR_METHOD, CONTAINER_PLACEHOLDER_ID, PASS_ARGUMENTS, SERVICE_LOCATOR_CLASS,
    SERVICE_LOCATOR_ID_PREFIX, SERVICE_LOCATOR_TAG, SERVICE_SUBSCRIBER_CAPABILITY,
    SERVICE_SUBSCRIBER_TAG,
};
use svcwire_domain::error::{Error, Result};
use svcwire_domain::ports::MethodInfo;
use svcwire_domain::value_objects::{ArgumentKey, Arguments, Definition, TagAttributes, Value};
use tracing::debug;

use super::service_locator::{build_locator_map, tag_service_map};
use super::walker::{PassContext, RecursivePass, walk_definition, walk_value};

/// Settings of the [`ArgumentResolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentResolverOptions {
    /// Tag marking service subscribers
    pub subscriber_tag: String,
    /// Capability a subscriber class must implement
    pub subscriber_capability: String,
    /// Prefix of synthesized locator ids
    pub locator_id_prefix: String,
    /// Reference id redirected to the enclosing subscriber's locator
    pub container_placeholder_id: String,
    /// Reject unmarked string argument keys instead of appending them
    pub strict_legacy_arguments: bool,
}

impl Default for ArgumentResolverOptions {
    fn default() -> Self {
        Self {
            subscriber_tag: SERVICE_SUBSCRIBER_TAG.to_string(),
            subscriber_capability: SERVICE_SUBSCRIBER_CAPABILITY.to_string(),
            locator_id_prefix: SERVICE_LOCATOR_ID_PREFIX.to_string(),
            container_placeholder_id: CONTAINER_PLACEHOLDER_ID.to_string(),
            strict_legacy_arguments: false,
        }
    }
}

/// Resolver for named arguments and service subscribers
#[derive(Debug, Default)]
pub struct ArgumentResolver {
    options: ArgumentResolverOptions,
    /// Locators of the subscribers being walked, innermost last
    locator_stack: Vec<String>,
    /// Every locator id registered by the walk
    locators: Vec<String>,
}

impl ArgumentResolver {
    /// Create a resolver
    pub fn new(options: ArgumentResolverOptions) -> Self {
        Self {
            options,
            locator_stack: Vec::new(),
            locators: Vec::new(),
        }
    }

    /// Locator ids registered by the walk, in registration order
    pub fn locators(&self) -> &[String] {
        &self.locators
    }

    /// Consume the resolver, returning the registered locator ids
    pub fn into_locators(self) -> Vec<String> {
        self.locators
    }

    fn resolve_named_arguments(
        &self,
        cx: &PassContext<'_>,
        definition: &mut Definition,
    ) -> Result<()> {
        let service_id = cx.current_id();
        let class = cx.graph.resolve_class(definition)?;

        let constructor_arguments = definition.arguments();
        if let Some(arguments) = self.resolve_call(
            cx,
            service_id,
            class.as_deref(),
            CONSTRUCTOR_METHOD,
            constructor_arguments,
        )? {
            definition.set_arguments(arguments);
        }

        for call in definition.method_calls_mut() {
            if let Some(arguments) =
                self.resolve_call(cx, service_id, class.as_deref(), &call.method, &call.arguments)?
            {
                call.arguments = arguments;
            }
        }
        Ok(())
    }

    /// Map the keys of one call to positions; `None` when already positional
    fn resolve_call(
        &self,
        cx: &PassContext<'_>,
        service_id: &str,
        class: Option<&str>,
        method_name: &str,
        arguments: &Arguments,
    ) -> Result<Option<Arguments>> {
        if !arguments.has_non_positional() {
            return Ok(None);
        }

        let method = if arguments.keys().any(|key| matches!(key, ArgumentKey::Named(_))) {
            Some(lookup_method(cx, service_id, class, method_name)?)
        } else {
            None
        };
        let mut resolved = Arguments::new();
        for (key, argument) in arguments {
            match key {
                ArgumentKey::Index(position) => {
                    resolved.set(ArgumentKey::Index(*position), argument.clone());
                }
                ArgumentKey::Legacy(raw) => {
                    if self.options.strict_legacy_arguments {
                        return Err(Error::invalid_definition(
                            service_id,
                            format!(
                                "key \"{raw}\" of the arguments of method \"{method_name}\" is neither a position nor a $name"
                            ),
                        ));
                    }
                    cx.log(
                        PASS_ARGUMENTS,
                        &format!(
                            "Using key \"{raw}\" for defining arguments of method \"{method_name}\" for service \"{service_id}\" is deprecated. Use no keys or $named arguments instead."
                        ),
                    );
                    resolved.push(argument.clone());
                }
                ArgumentKey::Named(name) => {
                    let position = method.as_ref().and_then(|info| info.parameter_position(name));
                    let Some(position) = position else {
                        return Err(Error::NamedArgumentNotFound {
                            service_id: service_id.to_string(),
                            class: class.unwrap_or_default().to_string(),
                            method: method_name.to_string(),
                            name: name.clone(),
                        });
                    };
                    if resolved.get_index(position).is_some()
                        || arguments.get_index(position).is_some()
                    {
                        return Err(Error::invalid_definition(
                            service_id,
                            format!(
                                "argument \"${name}\" of method \"{}::{method_name}\" is also configured at position {position}",
                                class.unwrap_or_default()
                            ),
                        ));
                    }
                    resolved.set(ArgumentKey::Index(position), argument.clone());
                }
            }
        }

        resolved.sort();
        Ok(Some(resolved))
    }

    /// Register the locator of a subscriber and return its id
    fn register_locator(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &Definition,
    ) -> Result<String> {
        let service_id = cx.current_id().to_string();
        let tag_services = tag_service_map(
            &service_id,
            &self.options.subscriber_tag,
            definition.tags().get(&self.options.subscriber_tag),
        )?;

        let class = cx.graph.resolve_class(definition)?.unwrap_or_default();
        let introspector = cx.introspector;
        if !introspector.is_subtype_of(&class, &self.options.subscriber_capability) {
            let message = if introspector.has_class(&class) {
                format!(
                    "Service \"{service_id}\" must implement interface \"{}\".",
                    self.options.subscriber_capability
                )
            } else {
                format!("Class \"{class}\" used for service \"{service_id}\" cannot be found.")
            };
            return Err(Error::unresolvable_class(service_id, class, message));
        }
        cx.graph.add_resource(class.clone());

        let subscriptions = introspector.subscribed_services(&class).unwrap_or_default();
        let map = build_locator_map(&service_id, &class, &subscriptions, tag_services)?;
        if !map.unused_keys.is_empty() {
            cx.log(
                PASS_ARGUMENTS,
                &format!(
                    "Service keys \"{}\" do not exist in the map returned by {class}::subscribed_services() for service \"{service_id}\".",
                    map.unused_keys.join("\", \"")
                ),
            );
        }

        let hash = definition
            .content_hash()
            .map_err(|e| Error::invalid_definition(&service_id, format!("cannot be hashed: {e}")))?;
        let locator_id = format!("{}{service_id}.{hash}", self.options.locator_id_prefix);

        let mut locator = Definition::new(SERVICE_LOCATOR_CLASS);
        locator
            .add_argument(Value::Map(map.entries))
            .set_public(false)
            .set_autowire(definition.autowire())
            .add_tag(SERVICE_LOCATOR_TAG, TagAttributes::new());
        cx.graph.set_definition(locator_id.clone(), locator);

        debug!(service = %service_id, locator = %locator_id, "registered service locator");
        self.locators.push(locator_id.clone());
        Ok(locator_id)
    }

    fn is_subscriber(&self, definition: &Definition) -> bool {
        !definition.is_abstract()
            && !definition.is_synthetic()
            && definition.has_tag(&self.options.subscriber_tag)
    }
}

/// Method a name-keyed argument list targets
fn lookup_method(
    cx: &PassContext<'_>,
    service_id: &str,
    class: Option<&str>,
    method_name: &str,
) -> Result<MethodInfo> {
    let Some(class) = class else {
        return Err(Error::invalid_definition(
            service_id,
            format!(
                "the class is not set, named arguments of method \"{method_name}\" cannot be resolved"
            ),
        ));
    };
    if !cx.introspector.has_class(class) {
        return Err(Error::unresolvable_class(
            service_id,
            class,
            format!(
                "Unable to resolve service \"{service_id}\": class \"{class}\" does not exist."
            ),
        ));
    }

    let Some(method) = cx.introspector.get_method(class, method_name) else {
        return Err(Error::invalid_method_call(service_id, class, method_name, "does not exist"));
    };
    if !method.public {
        return Err(Error::invalid_method_call(service_id, class, method_name, "must be public"));
    }
    Ok(method)
}

impl RecursivePass for ArgumentResolver {
    fn name(&self) -> &'static str {
        PASS_ARGUMENTS
    }

    fn process_value(
        &mut self,
        cx: &mut PassContext<'_>,
        value: &mut Value,
        _is_root: bool,
    ) -> Result<()> {
        if let Value::Reference(reference) = value {
            if reference.id == self.options.container_placeholder_id {
                if let Some(locator) = self.locator_stack.last() {
                    reference.id.clone_from(locator);
                }
            }
            return Ok(());
        }
        walk_value(self, cx, value)
    }

    fn process_definition(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
        _is_root: bool,
    ) -> Result<()> {
        self.resolve_named_arguments(cx, definition)?;

        if !self.is_subscriber(definition) {
            return walk_definition(self, cx, definition);
        }

        let locator_id = self.register_locator(cx, definition)?;
        self.locator_stack.push(locator_id);
        let walked = walk_definition(self, cx, definition);
        self.locator_stack.pop();
        walked
    }
}
