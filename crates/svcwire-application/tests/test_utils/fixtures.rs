//! Test fixtures for svcwire-application tests
//!
//! The type hierarchy mirrors a small application: plain classes, class and
//! interface inheritance, colliding implementations, setter injection and
//! service subscribers.

#![allow(dead_code)]

use svcwire_application::CollectedDiagnostics;
use svcwire_application::compiler::{
    AutowireResolver, CandidateIndex, PassContext, RecursivePass, run_pass,
};
use svcwire_application::introspection::{
    ClassDescriptor, MethodDescriptor, ParameterDescriptor, SubscriptionDescriptor, TypeRegistry,
};
use svcwire_domain::constants::AUTOWIRED_ID_PREFIX;
use svcwire_domain::error::Result;
use svcwire_domain::{ContainerGraph, TagAttributes};

fn typed(name: &str, type_name: &str) -> ParameterDescriptor {
    ParameterDescriptor::typed(name, type_name)
}

/// A method marked as required for injection
fn setter(name: &str, parameters: Vec<ParameterDescriptor>) -> MethodDescriptor {
    MethodDescriptor::new(name, parameters).required()
}

fn untyped(name: &str) -> ParameterDescriptor {
    ParameterDescriptor::new(name)
}

/// Registry describing every fixture type
pub fn type_registry() -> TypeRegistry {
    TypeRegistry::new()
        .with(ClassDescriptor::class("Foo"))
        .with(ClassDescriptor::class("Bar").with_constructor(vec![typed("foo", "Foo")]))
        .with(ClassDescriptor::class("A"))
        .with(ClassDescriptor::class("B").extends("A"))
        .with(ClassDescriptor::class("C").with_constructor(vec![typed("a", "A")]))
        .with(ClassDescriptor::interface("DInterface"))
        .with(ClassDescriptor::interface("EInterface").implements("DInterface"))
        .with(ClassDescriptor::interface("IInterface"))
        .with(ClassDescriptor::class("I").implements("IInterface"))
        .with(ClassDescriptor::class("F").extends("I").implements("EInterface"))
        .with(ClassDescriptor::class("G").with_constructor(vec![
            typed("d", "DInterface"),
            typed("e", "EInterface"),
            typed("i", "IInterface"),
        ]))
        .with(
            ClassDescriptor::class("H")
                .with_constructor(vec![typed("b", "B"), typed("d", "DInterface")]),
        )
        .with(
            ClassDescriptor::class("D")
                .with_constructor(vec![typed("a", "A"), typed("d", "DInterface")]),
        )
        .with(ClassDescriptor::class("E").with_constructor(vec![typed("d", "D").optional()]))
        .with(ClassDescriptor::class("J").with_constructor(vec![typed("i", "I")]))
        .with(ClassDescriptor::interface("CollisionInterface"))
        .with(ClassDescriptor::class("CollisionA").implements("CollisionInterface"))
        .with(ClassDescriptor::class("CollisionB").implements("CollisionInterface"))
        .with(
            ClassDescriptor::class("CannotBeAutowired")
                .with_constructor(vec![typed("collision", "CollisionInterface")]),
        )
        .with(ClassDescriptor::class("CannotBeAutowiredForwardOrder").with_constructor(vec![
            typed("a", "CollisionA"),
            typed("b", "CollisionInterface"),
            typed("c", "CollisionB"),
        ]))
        .with(ClassDescriptor::class("CannotBeAutowiredReverseOrder").with_constructor(vec![
            typed("a", "CollisionA"),
            typed("c", "CollisionB"),
            typed("b", "CollisionInterface"),
        ]))
        .with(ClassDescriptor::class("Lille"))
        .with(ClassDescriptor::class("Dunglas").with_constructor(vec![typed("l", "Lille")]))
        .with(ClassDescriptor::class("LesTilleuls").with_constructor(vec![typed("k", "Dunglas")]))
        .with(ClassDescriptor::class("OptionalParameter").with_constructor(vec![
            typed("c", "CollisionInterface").optional(),
            typed("a", "A"),
            typed("f", "Foo").optional(),
        ]))
        .with(
            ClassDescriptor::class("BadTypeHintedArgument")
                .with_constructor(vec![typed("k", "Dunglas"), typed("r", "NotARealClass")]),
        )
        .with(ClassDescriptor::class("OptionalServiceClass").extends("NotARealParent"))
        .with(
            ClassDescriptor::class("BadParentTypeHintedArgument")
                .with_constructor(vec![typed("k", "Dunglas"), typed("r", "OptionalServiceClass")]),
        )
        .with(
            ClassDescriptor::class("NotGuessableArgument")
                .with_constructor(vec![typed("k", "Foo")]),
        )
        .with(
            ClassDescriptor::class("NotGuessableArgumentForSubclass")
                .with_constructor(vec![typed("k", "A")]),
        )
        .with(ClassDescriptor::class("MultipleArguments").with_constructor(vec![
            typed("k", "A"),
            untyped("foo"),
            typed("dunglas", "Dunglas"),
        ]))
        .with(ClassDescriptor::class("MultipleArgumentsOptionalScalar").with_constructor(vec![
            typed("a", "A"),
            untyped("foo").with_default("default_val"),
            typed("lille", "Lille").optional(),
        ]))
        .with(ClassDescriptor::class("MultipleArgumentsOptionalScalarLast").with_constructor(vec![
            typed("a", "A"),
            typed("lille", "Lille"),
            untyped("foo").with_default("some_val"),
        ]))
        .with(
            ClassDescriptor::class("MultipleArgumentsOptionalScalarNotReallyOptional")
                .with_constructor(vec![
                    typed("a", "A"),
                    untyped("foo").with_default("default_val"),
                    typed("lille", "Lille"),
                ]),
        )
        .with(
            ClassDescriptor::class("FooVariadic")
                .with_constructor(vec![typed("foo", "Foo"), untyped("rest").variadic()]),
        )
        .with(
            ClassDescriptor::class("FooCollection")
                .with_constructor(vec![typed("items", "CollisionInterface").variadic()]),
        )
        .with(
            ClassDescriptor::class("SetterInjectionParent")
                .with_method(setter("setDependencies", vec![typed("foo", "Foo"), typed("a", "A")]))
                .with_method(setter("notASetter", vec![typed("a", "A")]))
                .with_method(setter("setWithCallsConfigured", vec![typed("a", "A")]))
                .with_method(setter("setChildMethodWithoutDocBlock", vec![typed("a", "A")])),
        )
        .with(
            ClassDescriptor::class("SetterInjection")
                .extends("SetterInjectionParent")
                .with_method(setter("setFoo", vec![typed("foo", "Foo")]))
                .with_method(
                    MethodDescriptor::new(
                        "setDependencies",
                        vec![typed("foo", "Foo"), typed("a", "A")],
                    )
                    .inherit_doc(),
                )
                .with_method(
                    MethodDescriptor::new("setWithCallsConfigured", vec![typed("a", "A")])
                        .inherit_doc(),
                )
                .with_method(MethodDescriptor::new("notASetter", vec![typed("a", "A")]))
                .with_method(setter("setChildMethodWithoutDocBlock", vec![typed("a", "A")])),
        )
        .with(ClassDescriptor::class("SetterInjectionCollision").with_method(setter(
            "setMultipleInstancesForOneArg",
            vec![typed("collision", "CollisionInterface")],
        )))
        .with(
            ClassDescriptor::class("NotWireable")
                .with_method(MethodDescriptor::new(
                    "setNotAutowireable",
                    vec![typed("n", "NotARealClass")],
                ))
                .with_method(MethodDescriptor::new("setBar", Vec::new()))
                .with_method(MethodDescriptor::new(
                    "setOptionalNotAutowireable",
                    vec![typed("n", "NotARealClass").optional()],
                ))
                .with_method(MethodDescriptor::new(
                    "setOptionalNoTypeHint",
                    vec![untyped("foo").optional()],
                ))
                .with_method(MethodDescriptor::new(
                    "setOptionalArgNoAutowireable",
                    vec![untyped("other").with_default("default_val")],
                ))
                .with_method(setter("setProtectedMethod", vec![typed("a", "A")]).private()),
        )
        .with(ClassDescriptor::class("PrivateConstructor").with_method(
            MethodDescriptor::new("new", vec![typed("a", "A")]).private(),
        ))
        .with(ClassDescriptor::class("CustomDefinition"))
        .with(
            ClassDescriptor::class("NamedArgumentsDummy")
                .with_constructor(vec![
                    typed("foo", "CustomDefinition"),
                    untyped("bar"),
                    untyped("apiKey"),
                ])
                .with_method(MethodDescriptor::new("setApiKey", vec![untyped("apiKey")]))
                .with_method(MethodDescriptor::new("setSecret", vec![untyped("secret")]).private()),
        )
        .with(ClassDescriptor::interface("ServiceSubscriber"))
        .with(
            ClassDescriptor::class("TestServiceSubscriber")
                .implements("ServiceSubscriber")
                .with_constructor(vec![typed("container", "ContainerInterface")])
                .subscribes(SubscriptionDescriptor::new("TestServiceSubscriber"))
                .subscribes(SubscriptionDescriptor::new("?CustomDefinition"))
                .subscribes(SubscriptionDescriptor::keyed("bar", "CustomDefinition"))
                .subscribes(SubscriptionDescriptor::keyed("baz", "?CustomDefinition")),
        )
        .with(
            ClassDescriptor::class("BadSubscriber")
                .implements("ServiceSubscriber")
                .subscribes(SubscriptionDescriptor::keyed("broken", "Not A Type")),
        )
        .with(ClassDescriptor::interface("ContainerInterface"))
}

/// Tag attributes from `(name, value)` pairs
pub fn attributes(pairs: &[(&str, &str)]) -> TagAttributes {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Run `pass` over `graph` against the fixture registry
pub fn run(
    pass: &mut dyn RecursivePass,
    graph: &mut ContainerGraph,
) -> Result<CollectedDiagnostics> {
    let registry = type_registry();
    let diagnostics = CollectedDiagnostics::new();
    let mut cx = PassContext::new(graph, &registry, &diagnostics);
    run_pass(pass, &mut cx)?;
    Ok(diagnostics)
}

/// Autowire `graph` against the fixture registry, returning the diagnostics
/// and the auto-registered ids
pub fn autowire(graph: &mut ContainerGraph) -> Result<(CollectedDiagnostics, Vec<String>)> {
    let registry = type_registry();
    let diagnostics = CollectedDiagnostics::new();
    let index = CandidateIndex::build(graph, &registry);
    let mut resolver = AutowireResolver::new(index, AUTOWIRED_ID_PREFIX);
    let mut cx = PassContext::new(graph, &registry, &diagnostics);
    run_pass(&mut resolver, &mut cx)?;
    Ok((diagnostics, resolver.into_registered()))
}
