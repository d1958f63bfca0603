//! Unit tests for the autowiring resolver

use svcwire_domain::error::Error;
use svcwire_domain::{
    Argument, ArgumentKey, Arguments, Autowire, ContainerGraph, Definition, InvalidBehavior,
    TypedReference, Value,
};

use crate::test_utils::fixtures::autowire;

fn arguments_of(graph: &ContainerGraph, id: &str) -> Vec<Value> {
    graph
        .definition(id)
        .unwrap_or_else(|| panic!("{id} should exist"))
        .arguments()
        .values()
}

fn references(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| Value::reference(*id)).collect()
}

fn autowire_error(graph: &mut ContainerGraph) -> String {
    autowire(graph).expect_err("autowiring should fail").to_string()
}

fn call_names(graph: &ContainerGraph, id: &str) -> Vec<String> {
    graph
        .definition(id)
        .unwrap_or_else(|| panic!("{id} should exist"))
        .method_calls()
        .iter()
        .map(|call| call.method.clone())
        .collect()
}

#[test]
fn test_autowires_constructor_argument() {
    let mut graph = ContainerGraph::new();
    graph.register("foo", "Foo");
    graph.set_definition("bar", Definition::new("Bar").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "bar"), references(&["foo"]));
}

#[test]
fn test_untyped_variadic_is_left_unbound() {
    let mut graph = ContainerGraph::new();
    graph.register("foo", "Foo");
    graph.set_definition("foo_variadic", Definition::new("FooVariadic").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "foo_variadic"), references(&["foo"]));
}

#[test]
fn test_typed_variadic_collects_every_candidate() {
    let mut graph = ContainerGraph::new();
    graph.register("c1", "CollisionA");
    graph.register("c2", "CollisionB");
    graph.set_definition("collection", Definition::new("FooCollection").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        arguments_of(&graph, "collection"),
        vec![Value::List(references(&["c1", "c2"]))]
    );
}

#[test]
fn test_autowires_subclass_candidate() {
    let mut graph = ContainerGraph::new();
    graph.register("b", "B");
    graph.set_definition("c", Definition::new("C").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "c"), references(&["b"]));
}

#[test]
fn test_autowires_interface_candidates() {
    let mut graph = ContainerGraph::new();
    graph.register("f", "F");
    graph.set_definition("g", Definition::new("G").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "g"), references(&["f", "f", "f"]));
}

#[test]
fn test_completes_partially_configured_definition() {
    let mut graph = ContainerGraph::new();
    graph.register("b", "B");
    graph.register("f", "F");
    graph.set_definition(
        "h",
        Definition::new("H").autowired().with_argument(Value::reference("b")),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "h"), references(&["b", "f"]));
}

#[test]
fn test_inferred_placeholders_are_replaced() {
    let mut graph = ContainerGraph::new();
    graph.register("b", "B");
    graph.register("f", "F");
    graph.set_definition(
        "h",
        Definition::new("H")
            .autowired()
            .with_argument(Argument::Inferred)
            .with_argument(Argument::Inferred),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    let h = graph.definition("h").expect("h should exist");
    assert!(h.arguments().iter().all(|(_, argument)| matches!(argument, Argument::Explicit(_))));
    assert_eq!(arguments_of(&graph, "h"), references(&["b", "f"]));
}

#[test]
fn test_type_collision_lists_candidates() {
    let mut graph = ContainerGraph::new();
    graph.register("c1", "CollisionA");
    graph.register("c2", "CollisionB");
    graph.register("c3", "CollisionB");
    graph.set_definition("a", Definition::new("CannotBeAutowired").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"a\": argument $collision of method CannotBeAutowired::new() references interface \"CollisionInterface\" but multiple candidate services exist. This type-hint could be aliased to one of these existing services: \"c1\", \"c2\", \"c3\"."
    );
}

#[test]
fn test_type_not_guessable_for_class() {
    let mut graph = ContainerGraph::new();
    graph.register("a1", "Foo");
    graph.register("a2", "Foo");
    graph.set_definition("a", Definition::new("NotGuessableArgument").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"a\": argument $k of method NotGuessableArgument::new() references class \"Foo\" but multiple candidate services exist. This type-hint could be aliased to one of these existing services: \"a1\", \"a2\"."
    );
}

#[test]
fn test_type_not_guessable_with_subclass() {
    let mut graph = ContainerGraph::new();
    graph.register("a1", "B");
    graph.register("a2", "B");
    graph.set_definition("a", Definition::new("NotGuessableArgumentForSubclass").autowired());

    let error = autowire(&mut graph).expect_err("autowiring should fail");

    match error {
        Error::AmbiguousCandidate { type_name, candidates, .. } => {
            assert_eq!(type_name, "A");
            assert_eq!(candidates, vec!["a1", "a2"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_no_candidate_for_interface() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("a", Definition::new("CannotBeAutowired").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"a\": no services were found matching the \"CollisionInterface\" interface and it cannot be auto-registered for argument $collision of method CannotBeAutowired::new()."
    );
}

#[test]
fn test_id_matching_type_wins_over_candidates() {
    let mut graph = ContainerGraph::new();
    graph.register("a1", "Foo");
    graph.register("a2", "Foo");
    graph.register("Foo", "Foo");
    graph.set_definition("a", Definition::new("NotGuessableArgument").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "a"), references(&["Foo"]));
}

#[test]
fn test_alias_disambiguates_collision() {
    let mut graph = ContainerGraph::new();
    graph.register("c1", "CollisionA");
    graph.register("c2", "CollisionB");
    graph.set_alias("CollisionInterface", "c2");
    graph.set_definition("a", Definition::new("CannotBeAutowired").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "a"), references(&["CollisionInterface"]));
}

#[test]
fn test_auto_registers_missing_dependencies() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("coop_tilleuls", Definition::new("LesTilleuls").autowired());

    let (diagnostics, registered) = autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "coop_tilleuls"), references(&["autowired.Dunglas"]));

    let dunglas = graph.definition("autowired.Dunglas").expect("Dunglas should be registered");
    assert_eq!(dunglas.class(), Some("Dunglas"));
    assert!(!dunglas.is_public());
    assert_eq!(dunglas.autowire(), Autowire::ByType);
    assert_eq!(arguments_of(&graph, "autowired.Dunglas"), references(&["autowired.Lille"]));
    assert_eq!(
        graph.definition("autowired.Lille").and_then(Definition::class),
        Some("Lille")
    );

    assert_eq!(registered, vec!["autowired.Lille", "autowired.Dunglas"]);
    assert!(diagnostics.contains(
        "Type \"Dunglas\" has been auto-registered for service \"coop_tilleuls\"."
    ));
    assert!(diagnostics.contains(
        "Type \"Lille\" has been auto-registered for service \"autowired.Dunglas\"."
    ));
    let resources: Vec<&str> = graph.resources().collect();
    assert!(resources.contains(&"Dunglas"));
    assert!(resources.contains(&"Lille"));
}

#[test]
fn test_class_resolved_through_parameters() {
    let mut graph = ContainerGraph::new();
    graph.parameters_mut().set("class_name", "Foo");
    graph.register("foo", "%class_name%");
    graph.set_definition("bar", Definition::new("Bar").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "bar"), references(&["foo"]));
}

#[test]
fn test_optional_parameters() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("foo", "Foo");
    graph.set_definition("opt", Definition::new("OptionalParameter").autowired());

    let (diagnostics, _) = autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        arguments_of(&graph, "opt"),
        vec![Value::Null, Value::reference("a"), Value::reference("foo")]
    );
    assert!(diagnostics.contains("no service matches type \"CollisionInterface\""));
}

#[test]
fn test_definitions_without_autowiring_are_untouched() {
    let mut graph = ContainerGraph::new();
    graph.register("foo", "Foo");
    graph.register("bar", "Bar");

    autowire(&mut graph).expect("autowiring should succeed");

    assert!(arguments_of(&graph, "bar").is_empty());
}

#[test]
fn test_unknown_parameter_type_fails() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("a", Definition::new("BadTypeHintedArgument").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"a\": argument $r of method BadTypeHintedArgument::new() has type \"NotARealClass\" but this class does not exist."
    );
}

#[test]
fn test_parameter_type_with_unknown_parent_fails() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("a", Definition::new("BadParentTypeHintedArgument").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"a\": argument $r of method BadParentTypeHintedArgument::new() has type \"OptionalServiceClass\" but this class does not exist."
    );
}

#[test]
fn test_abstract_candidates_are_ignored() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("abstract_foo", Definition::new("Foo").with_abstract(true));
    graph.register("foo", "Foo");
    graph.set_definition("bar", Definition::new("Bar").autowired());

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "bar"), references(&["foo"]));
}

#[test]
fn test_specific_arguments_are_kept() {
    let mut graph = ContainerGraph::new();
    graph.register("foo", "Foo");
    graph.register("a", "A");
    graph.register("dunglas", "Dunglas");
    graph.set_definition(
        "multiple",
        Definition::new("MultipleArguments")
            .autowired()
            .with_keyed_argument(ArgumentKey::Index(1), Value::reference("foo")),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(arguments_of(&graph, "multiple"), references(&["a", "foo", "dunglas"]));
}

#[test]
fn test_untyped_argument_needs_explicit_value() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("dunglas", "Dunglas");
    graph.set_definition("arg_no_type_hint", Definition::new("MultipleArguments").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"arg_no_type_hint\": argument $foo of method MultipleArguments::new() must have a type-hint or be given a value explicitly."
    );
}

#[test]
fn test_default_before_required_parameter_is_ignored() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("lille", "Lille");
    graph.set_definition(
        "not_really_optional_scalar",
        Definition::new("MultipleArgumentsOptionalScalarNotReallyOptional").autowired(),
    );

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"not_really_optional_scalar\": argument $foo of method MultipleArgumentsOptionalScalarNotReallyOptional::new() must have a type-hint or be given a value explicitly."
    );
}

#[test]
fn test_optional_scalar_keeps_argument_order() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("lille", "Lille");
    graph.set_definition(
        "with_optional_scalar",
        Definition::new("MultipleArgumentsOptionalScalar").autowired(),
    );
    graph.set_definition(
        "with_optional_scalar_last",
        Definition::new("MultipleArgumentsOptionalScalarLast").autowired(),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        arguments_of(&graph, "with_optional_scalar"),
        vec![Value::reference("a"), Value::string("default_val"), Value::reference("lille")]
    );
    assert_eq!(
        arguments_of(&graph, "with_optional_scalar_last"),
        vec![Value::reference("a"), Value::reference("lille"), Value::string("some_val")]
    );
}

#[test]
fn test_placeholder_on_service_not_autowired_fails() {
    let mut graph = ContainerGraph::new();
    graph.register("foo", "Foo");
    graph.set_definition("bar", Definition::new("Bar").with_argument(Argument::Inferred));

    assert_eq!(
        autowire_error(&mut graph),
        "Invalid service \"bar\": argument 0 of the constructor is left to autowiring but the service is not autowired."
    );
}

#[test]
fn test_placeholder_in_call_of_service_not_autowired_fails() {
    let mut graph = ContainerGraph::new();
    graph.set_definition(
        "bar",
        Definition::new("Bar").with_method_call(
            "setFoo",
            [(ArgumentKey::Index(0), Argument::Inferred)].into_iter().collect(),
        ),
    );

    let error = autowire(&mut graph).expect_err("autowiring should fail");

    assert!(matches!(&error, Error::InvalidDefinition { service_id, .. } if service_id == "bar"));
    assert!(error.to_string().contains("argument 0 of method setFoo()"));
}

#[test]
fn test_placeholder_on_abstract_service_is_kept() {
    let mut graph = ContainerGraph::new();
    graph.set_definition(
        "parent",
        Definition::new("Bar").with_abstract(true).with_argument(Argument::Inferred),
    );

    autowire(&mut graph).expect("abstract definitions are never instantiated");

    let parent = graph.definition("parent").expect("parent should exist");
    assert_eq!(parent.arguments().get_index(0), Some(&Argument::Inferred));
}

#[test]
fn test_explicit_empty_string_is_kept() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("lille", "Lille");
    graph.set_definition(
        "foo",
        Definition::new("MultipleArgumentsOptionalScalar")
            .autowired()
            .with_argument(Argument::Inferred)
            .with_argument(""),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        arguments_of(&graph, "foo"),
        vec![Value::reference("a"), Value::string(""), Value::reference("lille")]
    );
}

#[test]
fn test_setter_injection_discovers_required_methods() {
    let mut graph = ContainerGraph::new();
    graph.register("app_foo", "Foo");
    graph.register("app_a", "A");
    graph.register("app_collision_a", "CollisionA");
    graph.register("app_collision_b", "CollisionB");
    graph.set_definition(
        "setter_injection",
        Definition::new("SetterInjection").autowired().with_method_call(
            "setWithCallsConfigured",
            Arguments::from_values(vec!["manual_arg1", "manual_arg2"]),
        ),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        call_names(&graph, "setter_injection"),
        vec!["setWithCallsConfigured", "setFoo", "setDependencies", "setChildMethodWithoutDocBlock"]
    );
    let calls = graph.definition("setter_injection").expect("exists").method_calls();
    assert_eq!(
        calls[0].arguments.values(),
        vec![Value::string("manual_arg1"), Value::string("manual_arg2")]
    );
    assert_eq!(calls[1].arguments.values(), references(&["app_foo"]));
    assert_eq!(calls[2].arguments.values(), references(&["app_foo", "app_a"]));
}

#[test]
fn test_explicit_method_call_is_autowired() {
    let mut graph = ContainerGraph::new();
    graph.register("app_foo", "Foo");
    graph.register("app_a", "A");
    graph.set_definition(
        "setter_injection",
        Definition::new("SetterInjection")
            .autowired()
            .with_method_call("notASetter", Arguments::new()),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(
        call_names(&graph, "setter_injection"),
        vec![
            "notASetter",
            "setFoo",
            "setDependencies",
            "setWithCallsConfigured",
            "setChildMethodWithoutDocBlock"
        ]
    );
    let calls = graph.definition("setter_injection").expect("exists").method_calls();
    assert_eq!(calls[0].arguments.values(), references(&["app_a"]));
}

#[test]
fn test_typed_reference_triggers_auto_registration() {
    let mut graph = ContainerGraph::new();
    graph.set_definition(
        "bar",
        Definition::new("Bar").autowired().with_property(
            "a",
            Value::List(vec![Value::TypedReference(
                TypedReference::new("A", "A").with_behavior(InvalidBehavior::Ignore),
            )]),
        ),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert_eq!(graph.definition("autowired.A").and_then(Definition::class), Some("A"));
    let bar = graph.definition("bar").expect("bar should exist");
    assert_eq!(
        bar.properties().get("a"),
        Some(&Value::List(vec![Value::TypedReference(
            TypedReference::new("autowired.A", "A").with_behavior(InvalidBehavior::Ignore)
        )]))
    );
}

#[test]
fn test_unresolved_typed_reference_is_reported() {
    let mut graph = ContainerGraph::new();
    graph.register("c1", "CollisionA");
    graph.register("c2", "CollisionB");
    graph.set_definition(
        "holder",
        Definition::new("Foo")
            .autowired()
            .with_argument(TypedReference::new("missing", "CollisionInterface")),
    );

    let (diagnostics, _) = autowire(&mut graph).expect("typed references are not fatal");

    assert!(diagnostics.contains(
        "it references \"CollisionInterface\" but no single service matches this type"
    ));
}

#[test]
fn test_typed_reference_outside_autowired_definition_is_ignored() {
    let mut graph = ContainerGraph::new();
    graph.set_definition(
        "holder",
        Definition::new("Foo").with_argument(TypedReference::new("A", "A")),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    assert!(!graph.has_definition("autowired.A"));
}

#[test]
fn test_unknown_class_is_skipped() {
    let mut graph = ContainerGraph::new();
    graph.register("class_not_exist", "OptionalServiceClass");
    graph.set_definition("bar", Definition::new("Bar").autowired());
    graph.set_definition("ghost", Definition::new("NotARealClass").autowired());

    let (diagnostics, _) = autowire(&mut graph).expect("autowiring should succeed");

    assert!(graph.has_definition("bar"));
    assert_eq!(arguments_of(&graph, "bar"), references(&["autowired.Foo"]));
    assert!(diagnostics.contains(
        "Cannot autowire service \"ghost\": class \"NotARealClass\" does not exist."
    ));
}

#[test]
fn test_setter_collision_fails() {
    let mut graph = ContainerGraph::new();
    graph.register("c1", "CollisionA");
    graph.register("c2", "CollisionB");
    graph.set_definition(
        "setter_injection_collision",
        Definition::new("SetterInjectionCollision").autowired(),
    );

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"setter_injection_collision\": argument $collision of method SetterInjectionCollision::setMultipleInstancesForOneArg() references interface \"CollisionInterface\" but multiple candidate services exist. This type-hint could be aliased to one of these existing services: \"c1\", \"c2\"."
    );
}

#[test]
fn test_ambiguity_does_not_depend_on_parameter_order() {
    for class in ["CannotBeAutowiredForwardOrder", "CannotBeAutowiredReverseOrder"] {
        let mut graph = ContainerGraph::new();
        graph.set_definition("a", Definition::new(class).autowired());

        let error = autowire(&mut graph).expect_err("autowiring should fail");

        match error {
            Error::AmbiguousCandidate {
                service_id,
                method,
                parameter,
                type_name,
                candidates,
                ..
            } => {
                assert_eq!(service_id, "a", "{class}");
                assert_eq!(method, format!("{class}::new"), "{class}");
                assert_eq!(parameter, "b", "{class}");
                assert_eq!(type_name, "CollisionInterface", "{class}");
                assert_eq!(candidates.len(), 2, "{class}");
            }
            other => panic!("{class}: unexpected error: {other}"),
        }
        let ids: Vec<&str> = graph.definitions().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a"], "{class}: helpers must be rolled back");
    }
}

#[test]
fn test_not_wireable_configured_calls() {
    let cases = [
        (
            "setNotAutowireable",
            "Cannot autowire service \"foo\": argument $n of method NotWireable::setNotAutowireable() has type \"NotARealClass\" but this class does not exist.",
        ),
        (
            "setBar",
            "Cannot autowire service \"foo\": method NotWireable::setBar() has only optional arguments, thus must be wired explicitly.",
        ),
        (
            "setOptionalNotAutowireable",
            "Cannot autowire service \"foo\": method NotWireable::setOptionalNotAutowireable() has only optional arguments, thus must be wired explicitly.",
        ),
        (
            "setOptionalNoTypeHint",
            "Cannot autowire service \"foo\": method NotWireable::setOptionalNoTypeHint() has only optional arguments, thus must be wired explicitly.",
        ),
        (
            "setOptionalArgNoAutowireable",
            "Cannot autowire service \"foo\": method NotWireable::setOptionalArgNoAutowireable() has only optional arguments, thus must be wired explicitly.",
        ),
        (
            "setMissing",
            "Cannot autowire service \"foo\": method NotWireable::setMissing() does not exist.",
        ),
    ];

    for (method, expected) in cases {
        let mut graph = ContainerGraph::new();
        graph.set_definition(
            "foo",
            Definition::new("NotWireable")
                .autowired()
                .with_method_call(method, Arguments::new()),
        );

        assert_eq!(autowire_error(&mut graph), expected, "{method}");
    }
}

#[test]
fn test_non_public_required_method_fails() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("foo", Definition::new("NotWireable").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"foo\": method NotWireable::setProtectedMethod() must be public."
    );
}

#[test]
fn test_non_public_constructor_fails() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("foo", Definition::new("PrivateConstructor").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"foo\": method PrivateConstructor::new() must be public."
    );
}

#[test]
fn test_failed_auto_registration_is_rolled_back() {
    let mut graph = ContainerGraph::new();
    graph.set_definition("e", Definition::new("E").autowired());

    let (diagnostics, registered) = autowire(&mut graph).expect("autowiring should succeed");

    let ids: Vec<&str> = graph.definitions().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["e"]);
    assert!(registered.is_empty());
    assert_eq!(arguments_of(&graph, "e"), vec![Value::Null]);
    assert!(diagnostics.contains("no services were found matching the \"DInterface\" interface"));
}

#[test]
fn test_alternatives_suggested_for_collision() {
    let mut graph = ContainerGraph::new();
    graph.set_alias("IInterface", "i");
    graph.register("f", "F");
    graph.register("i", "I");
    graph.set_definition("j", Definition::new("J").autowired());

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"j\": argument $i of method J::new() references class \"I\" but multiple candidate services exist. This type-hint could be aliased to one of these existing services: \"f\", \"i\"; or be updated to \"IInterface\"."
    );
}

#[test]
fn test_by_id_uses_ids_only() {
    let mut graph = ContainerGraph::new();
    graph.register("A", "A");
    graph.register("DInterface", "F");
    graph.set_definition("d", Definition::new("D").with_autowire(Autowire::ById));

    autowire(&mut graph).expect("autowiring should succeed");

    let ids: Vec<&str> = graph.definitions().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["A", "DInterface", "d"]);
    assert_eq!(arguments_of(&graph, "d"), references(&["A", "DInterface"]));
}

#[test]
fn test_by_id_does_not_auto_register() {
    let mut graph = ContainerGraph::new();
    graph.register("f", "F");
    graph.set_definition("e", Definition::new("E").with_autowire(Autowire::ById));

    let (_, registered) = autowire(&mut graph).expect("autowiring should succeed");

    let ids: Vec<&str> = graph.definitions().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["f", "e"]);
    assert!(registered.is_empty());
}

#[test]
fn test_by_id_suggests_alternatives() {
    let mut graph = ContainerGraph::new();
    graph.set_alias("IInterface", "i");
    graph.register("i", "I");
    graph.set_definition("j", Definition::new("J").with_autowire(Autowire::ById));

    assert_eq!(
        autowire_error(&mut graph),
        "Cannot autowire service \"j\": argument $i of method J::new() references class \"I\" but no such service exists. This type-hint could be aliased to the existing \"i\" service; or be updated to \"IInterface\"."
    );
}

#[test]
fn test_named_explicit_argument_binds_parameter() {
    let mut graph = ContainerGraph::new();
    graph.register("a", "A");
    graph.register("dunglas", "Dunglas");
    graph.set_definition(
        "multiple",
        Definition::new("MultipleArguments")
            .autowired()
            .with_keyed_argument(ArgumentKey::Named("foo".to_string()), "explicit"),
    );

    autowire(&mut graph).expect("autowiring should succeed");

    let multiple = graph.definition("multiple").expect("multiple should exist");
    assert_eq!(multiple.arguments().value_at(0), Some(&Value::reference("a")));
    assert_eq!(multiple.arguments().value_at(2), Some(&Value::reference("dunglas")));
    assert_eq!(
        multiple
            .arguments()
            .get(&ArgumentKey::Named("foo".to_string()))
            .and_then(Argument::value),
        Some(&Value::string("explicit"))
    );
}
