//! Unit tests for the in-memory type registry

use serde_json::json;
use svcwire_application::introspection::{
    ClassDescriptor, MethodDescriptor, ParameterDescriptor, RegistryDocument, TypeRegistry,
    json_to_value,
};
use svcwire_domain::{TypeIntrospector, TypeKind, Value};

use crate::test_utils::fixtures::type_registry;

#[test]
fn test_class_requires_known_ancestry() {
    let registry = TypeRegistry::new()
        .with(ClassDescriptor::class("Orphan").extends("Missing"))
        .with(ClassDescriptor::class("Implementer").implements("MissingInterface"))
        .with(ClassDescriptor::class("Known").extends("Base"))
        .with(ClassDescriptor::abstract_class("Base"));

    assert!(!registry.has_class("Orphan"));
    assert!(!registry.has_class("Implementer"));
    assert!(registry.has_class("Known"));
    assert_eq!(registry.kind("Orphan"), None);
    assert_eq!(registry.kind("Base"), Some(TypeKind::Abstract));
    assert_eq!(registry.kind("Known"), Some(TypeKind::Concrete));
}

#[test]
fn test_fixture_hierarchy_subtypes() {
    let registry = type_registry();

    assert!(registry.is_subtype_of("F", "I"));
    assert!(registry.is_subtype_of("F", "IInterface"));
    assert!(registry.is_subtype_of("F", "DInterface"));
    assert!(registry.is_subtype_of("B", "A"));
    assert!(!registry.is_subtype_of("A", "A"));
    assert!(!registry.is_subtype_of("A", "B"));
    assert_eq!(registry.kind("EInterface"), Some(TypeKind::Interface));
    assert!(!registry.has_class("OptionalServiceClass"));
}

#[test]
fn test_cyclic_ancestry_does_not_loop() {
    let registry = TypeRegistry::new()
        .with(ClassDescriptor::class("Left").extends("Right"))
        .with(ClassDescriptor::class("Right").extends("Left"));

    assert!(registry.has_class("Left"));
    assert!(registry.is_subtype_of("Left", "Right"));
    assert!(registry.methods("Left").is_empty());
}

#[test]
fn test_methods_list_own_declarations_first() {
    let registry = type_registry();

    let names: Vec<String> = registry
        .methods("SetterInjection")
        .into_iter()
        .map(|method| method.name)
        .collect();

    assert_eq!(
        names,
        vec![
            "setFoo",
            "setDependencies",
            "setWithCallsConfigured",
            "notASetter",
            "setChildMethodWithoutDocBlock",
        ]
    );
}

#[test]
fn test_required_marker_follows_inherit_doc() {
    let registry = type_registry();

    let required = |method: &str| {
        registry
            .get_method("SetterInjection", method)
            .unwrap_or_else(|| panic!("{method} should exist"))
            .required
    };

    assert!(required("setFoo"));
    assert!(required("setDependencies"));
    assert!(required("setWithCallsConfigured"));
    assert!(!required("notASetter"));
}

#[test]
fn test_method_lookup_ignores_case_and_finds_inherited() {
    let registry = TypeRegistry::new()
        .with(
            ClassDescriptor::class("Base")
                .with_method(MethodDescriptor::new("setLogger", Vec::new())),
        )
        .with(ClassDescriptor::class("Child").extends("Base"));

    let method = registry
        .get_method("Child", "SETLOGGER")
        .expect("inherited method should be found");

    assert_eq!(method.name, "setLogger");
    assert_eq!(method.declaring_class, "Base");
    assert!(registry.constructor("Child").is_none());
}

#[test]
fn test_constructor_is_not_listed_as_method() {
    let registry = type_registry();

    assert!(registry.constructor("Bar").is_some());
    assert!(registry.methods("Bar").is_empty());
}

#[test]
fn test_builtin_and_nullable_types() {
    let registry = TypeRegistry::new().with(ClassDescriptor::class("Typed").with_constructor(vec![
        ParameterDescriptor::typed("count", "int"),
        ParameterDescriptor::typed("logger", "?Logger"),
        ParameterDescriptor::typed("name", "String"),
    ]));

    let parameters = registry.constructor("Typed").expect("constructor should exist").parameters;

    assert_eq!(parameters[0].type_name, None);
    assert_eq!(parameters[1].type_name.as_deref(), Some("Logger"));
    assert!(parameters[1].nullable);
    assert_eq!(parameters[2].type_name, None);
}

#[test]
fn test_default_before_required_parameter_is_dropped() {
    let registry = TypeRegistry::new().with(ClassDescriptor::class("Odd").with_constructor(vec![
        ParameterDescriptor::typed("first", "Foo").optional(),
        ParameterDescriptor::new("second").with_default(3),
        ParameterDescriptor::typed("third", "Bar"),
        ParameterDescriptor::new("fourth").with_default("tail"),
    ]));

    let parameters = registry.constructor("Odd").expect("constructor should exist").parameters;

    assert_eq!(parameters[0].default, None);
    assert!(parameters[0].nullable);
    assert_eq!(parameters[1].default, None);
    assert!(!parameters[1].nullable);
    assert_eq!(parameters[3].default, Some(Value::string("tail")));
}

#[test]
fn test_subscriptions_are_inherited() {
    let registry = type_registry()
        .with(ClassDescriptor::class("ChildSubscriber").extends("TestServiceSubscriber"));

    let subscriptions = registry
        .subscribed_services("ChildSubscriber")
        .expect("subscriptions should be inherited");

    assert_eq!(subscriptions.len(), 4);
    assert_eq!(subscriptions[2].key.as_deref(), Some("bar"));
    assert!(registry.subscribed_services("Foo").is_none());
}

#[test]
fn test_json_defaults_convert_to_values() {
    assert_eq!(json_to_value(&json!(null)), Value::Null);
    assert_eq!(json_to_value(&json!(7)), Value::Int(7));
    assert_eq!(json_to_value(&json!(1.5)), Value::Float(1.5));
    assert_eq!(
        json_to_value(&json!(["a", true])),
        Value::List(vec![Value::string("a"), Value::Bool(true)])
    );
    let Value::Map(entries) = json_to_value(&json!({"level": "debug"})) else {
        panic!("object should convert to a map");
    };
    assert_eq!(entries.get("level"), Some(&Value::string("debug")));
}

#[test]
fn test_document_deserializes_with_defaults() {
    let document: RegistryDocument = serde_json::from_value(json!({
        "classes": [
            { "name": "LoggerInterface", "kind": "interface" },
            {
                "name": "Mailer",
                "interfaces": ["MailerInterface"],
                "methods": [
                    {
                        "name": "new",
                        "parameters": [
                            { "name": "logger", "type": "LoggerInterface" },
                            { "name": "retries", "default": 3 }
                        ]
                    },
                    { "name": "setTransport", "public": false }
                ]
            }
        ]
    }))
    .expect("document should deserialize");

    let mut registry = TypeRegistry::new();
    registry.load(document);

    assert_eq!(registry.len(), 2);
    let mailer = registry.get("Mailer").expect("Mailer should be registered");
    assert_eq!(mailer.kind, TypeKind::Concrete);
    assert!(mailer.methods[0].public);
    assert!(!mailer.methods[1].public);
    assert!(!registry.has_class("Mailer"));

    let round_trip = registry.to_document();
    assert_eq!(round_trip.classes.len(), 2);
    assert_eq!(round_trip.classes[1].methods[0].parameters[1].default, Some(json!(3)));
}
