//! In-memory type registry
//!
//! Answers type introspection from registered [`ClassDescriptor`]s. A type
//! counts as known only when its whole ancestry is registered too, so a class
//! extending an unregistered parent is reported as missing.

use std::collections::HashSet;

use indexmap::IndexMap;
use svcwire_domain::constants::CONSTRUCTOR_METHOD;
use svcwire_domain::ports::{
    MethodInfo, ParameterInfo, SubscribedService, TypeIntrospector, TypeKind,
};
use svcwire_domain::value_objects::Value;

use super::descriptors::{ClassDescriptor, MethodDescriptor, ParameterDescriptor, RegistryDocument};

/// Type names that never denote a class
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "float", "int", "iterable", "mixed", "object", "string", "void",
];

/// Registry of class and interface descriptors
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes: IndexMap<String, ClassDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one of the same name
    pub fn register(&mut self, descriptor: ClassDescriptor) -> &mut Self {
        self.classes.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Builder form of [`Self::register`]
    pub fn with(mut self, descriptor: ClassDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Register every class of a document
    pub fn load(&mut self, document: RegistryDocument) -> &mut Self {
        for descriptor in document.classes {
            self.register(descriptor);
        }
        self
    }

    /// Descriptor registered under `name`
    pub fn get(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Export the registry as a document
    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            classes: self.classes.values().cloned().collect(),
        }
    }

    fn is_complete<'a>(&'a self, name: &'a str, seen: &mut HashSet<&'a str>) -> bool {
        if !seen.insert(name) {
            return true;
        }
        let Some(descriptor) = self.classes.get(name) else {
            return false;
        };
        descriptor
            .parent
            .iter()
            .chain(&descriptor.interfaces)
            .all(|ancestor| self.is_complete(ancestor, seen))
    }

    /// `name`, then its parent chain, then every interface reachable from
    /// them, each registered type once
    fn lineage<'a>(&'a self, name: &str) -> Vec<&'a ClassDescriptor> {
        let mut lineage: Vec<&ClassDescriptor> = Vec::new();
        let mut current = self.classes.get(name);
        while let Some(descriptor) = current {
            if lineage.iter().any(|seen| seen.name == descriptor.name) {
                break;
            }
            lineage.push(descriptor);
            current = descriptor
                .parent
                .as_deref()
                .and_then(|parent| self.classes.get(parent));
        }

        let mut position = 0;
        while position < lineage.len() {
            let current: &'a ClassDescriptor = lineage[position];
            for interface in &current.interfaces {
                if let Some(descriptor) = self.classes.get(interface) {
                    if !lineage.iter().any(|seen| seen.name == descriptor.name) {
                        lineage.push(descriptor);
                    }
                }
            }
            position += 1;
        }
        lineage
    }

    /// Nearest declaration of `method` in the lineage of `class`, skipping
    /// the first `skip` lineage entries
    fn find_method<'a>(
        &'a self,
        class: &str,
        method: &str,
        skip: usize,
    ) -> Option<(&'a ClassDescriptor, &'a MethodDescriptor)> {
        self.lineage(class).into_iter().skip(skip).find_map(|owner| {
            owner
                .methods
                .iter()
                .find(|candidate| candidate.name.eq_ignore_ascii_case(method))
                .map(|found| (owner, found))
        })
    }

    fn is_required(&self, owner: &ClassDescriptor, method: &MethodDescriptor) -> bool {
        if method.required {
            return true;
        }
        if !method.inherit_doc {
            return false;
        }
        self.find_method(&owner.name, &method.name, 1)
            .is_some_and(|(ancestor, overridden)| self.is_required(ancestor, overridden))
    }

    fn method_info(&self, owner: &ClassDescriptor, method: &MethodDescriptor) -> MethodInfo {
        MethodInfo {
            name: method.name.clone(),
            declaring_class: owner.name.clone(),
            parameters: parameter_infos(&method.parameters),
            public: method.public,
            required: self.is_required(owner, method),
        }
    }
}

impl FromIterator<ClassDescriptor> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = ClassDescriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.register(descriptor);
        }
        registry
    }
}

impl TypeIntrospector for TypeRegistry {
    fn has_class(&self, name: &str) -> bool {
        self.is_complete(name, &mut HashSet::new())
    }

    fn kind(&self, name: &str) -> Option<TypeKind> {
        if !self.has_class(name) {
            return None;
        }
        self.classes.get(name).map(|descriptor| descriptor.kind)
    }

    fn get_method(&self, class: &str, method: &str) -> Option<MethodInfo> {
        self.find_method(class, method, 0)
            .map(|(owner, found)| self.method_info(owner, found))
    }

    fn methods(&self, class: &str) -> Vec<MethodInfo> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut methods = Vec::new();
        for owner in self.lineage(class) {
            for method in &owner.methods {
                if method.name.eq_ignore_ascii_case(CONSTRUCTOR_METHOD) {
                    continue;
                }
                if seen.insert(method.name.to_ascii_lowercase()) {
                    methods.push(self.method_info(owner, method));
                }
            }
        }
        methods
    }

    fn is_subtype_of(&self, class: &str, parent: &str) -> bool {
        class != parent
            && self
                .lineage(class)
                .iter()
                .skip(1)
                .any(|ancestor| ancestor.name == parent)
    }

    fn subscribed_services(&self, class: &str) -> Option<Vec<SubscribedService>> {
        let subscriptions = self
            .lineage(class)
            .into_iter()
            .find_map(|descriptor| descriptor.subscribed_services.as_ref())?;
        Some(
            subscriptions
                .iter()
                .map(|subscription| SubscribedService {
                    key: subscription.key.clone(),
                    type_name: subscription.type_name.clone(),
                })
                .collect(),
        )
    }
}

/// Parameters as a call site sees them
///
/// A default declared before a required parameter can never be used: it is
/// dropped, leaving the parameter nullable when the default was null.
fn parameter_infos(parameters: &[ParameterDescriptor]) -> Vec<ParameterInfo> {
    let last_required = parameters
        .iter()
        .rposition(|parameter| !parameter.has_default() && !parameter.variadic);

    parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            let mut info = ParameterInfo {
                name: parameter.name.clone(),
                type_name: parameter
                    .type_name
                    .as_deref()
                    .map(|name| name.trim_start_matches('?'))
                    .filter(|name| !BUILTIN_TYPES.contains(&name.to_ascii_lowercase().as_str()))
                    .map(str::to_string),
                default: match (&parameter.default, parameter.optional) {
                    (Some(default), _) => Some(json_to_value(default)),
                    (None, true) => Some(Value::Null),
                    (None, false) => None,
                },
                nullable: parameter.nullable
                    || parameter.type_name.as_deref().is_some_and(|name| name.starts_with('?')),
                variadic: parameter.variadic,
            };
            if last_required.is_some_and(|last| position < last) {
                if let Some(default) = info.default.take() {
                    info.nullable |= default == Value::Null;
                }
            }
            info
        })
        .collect()
}

/// Convert a descriptor default into a definition value
pub fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(flag) => Value::Bool(*flag),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(integer) => Value::Int(integer),
            None => Value::Float(number.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(text) => Value::String(text.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), json_to_value(item)))
                .collect(),
        ),
    }
}
