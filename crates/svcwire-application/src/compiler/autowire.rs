//! Autowiring resolver
//!
//! Infers the arguments of autowired definitions from declared parameter
//! types. For every constructor, configured method call and injection-required
//! method, each parameter without an explicit value is bound to:
//!
//! 1. the definition or alias whose id equals the type name;
//! 2. the single candidate of the type in the [`CandidateIndex`];
//! 3. a definition auto-registered for the type when it is a concrete class
//!    with no candidate;
//! 4. the parameter default, or null when the parameter is nullable.
//!
//! Several candidates are an error. Definitions auto-registered while a root
//! definition is resolved are rolled back when that resolution fails.

use svcwire_domain::constants::PASS_AUTOWIRE;
use svcwire_domain::error::{Error, Result};
use svcwire_domain::ports::{MethodInfo, ParameterInfo};
use svcwire_domain::value_objects::{
    Argument, ArgumentKey, Arguments, Autowire, Definition, MethodCall, Reference, TypedReference,
    Value,
};
use tracing::debug;

use super::candidate_index::CandidateIndex;
use super::walker::{PassContext, RecursivePass, walk_definition, walk_value};

/// Outcome of looking a type up
enum Resolution {
    Found(String),
    NotFound,
    Ambiguous(Vec<String>),
}

/// Where a call to autowire comes from
#[derive(Clone, Copy, PartialEq, Eq)]
enum CallSite {
    /// Constructor or configured call: failures are fatal
    Explicit,
    /// Injection-required method found by introspection: failures skip the call
    Discovered,
}

/// A parameter bound to the single candidate of its type
struct Binding {
    service_id: String,
    method: String,
    parameter: String,
    type_name: String,
}

/// The parameter a type is looked up for
struct Site<'a> {
    method: &'a str,
    parameter: &'a str,
}

/// Resolver inferring arguments from declared types
pub struct AutowireResolver {
    index: CandidateIndex,
    id_prefix: String,
    /// Autowiring mode of every definition being walked, innermost last
    modes: Vec<Autowire>,
    /// Ids auto-registered during the current root attempt
    created: Vec<String>,
    /// Single-candidate bindings of the current root attempt
    bindings: Vec<Binding>,
    /// Auto-registered ids kept after their root resolved
    registered: Vec<String>,
}

impl AutowireResolver {
    /// Create a resolver over a candidate index, naming auto-registered
    /// definitions `<id_prefix><type>`
    pub fn new<S: Into<String>>(index: CandidateIndex, id_prefix: S) -> Self {
        Self {
            index,
            id_prefix: id_prefix.into(),
            modes: Vec::new(),
            created: Vec::new(),
            bindings: Vec::new(),
            registered: Vec::new(),
        }
    }

    /// Ids auto-registered by the walk, in registration order
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Consume the resolver, returning the auto-registered ids
    pub fn into_registered(self) -> Vec<String> {
        self.registered
    }

    fn autowire_definition(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
    ) -> Result<()> {
        self.modes.push(definition.autowire());
        let walked = walk_definition(self, cx, definition);
        self.modes.pop();
        walked?;

        if !definition.is_autowired() && !definition.is_abstract() {
            return reject_inferred(cx.current_id(), definition);
        }
        if !definition.is_autowired() || definition.is_abstract() || definition.is_synthetic() {
            return Ok(());
        }
        let Some(class) = cx.graph.resolve_class(definition)? else {
            return Ok(());
        };
        if !cx.introspector.has_class(&class) {
            cx.log(
                PASS_AUTOWIRE,
                &format!(
                    "Cannot autowire service \"{}\": class \"{class}\" does not exist.",
                    cx.current_id()
                ),
            );
            return Ok(());
        }

        let mode = definition.autowire();
        let service_id = cx.current_id().to_string();

        if let Some(constructor) = cx.introspector.constructor(&class) {
            if !constructor.public {
                return Err(Error::invalid_method_call(
                    service_id,
                    constructor.declaring_class,
                    constructor.name,
                    "must be public",
                ));
            }
            let arguments = definition.arguments().clone();
            if let Some(arguments) =
                self.autowire_call(cx, mode, &constructor, arguments, CallSite::Explicit)?
            {
                definition.set_arguments(arguments);
            }
        }

        let mut calls = Vec::with_capacity(definition.method_calls().len());
        for call in definition.method_calls() {
            let method = self.configured_method(cx, &service_id, &class, call)?;
            let arguments = self
                .autowire_call(cx, mode, &method, call.arguments.clone(), CallSite::Explicit)?
                .unwrap_or_else(|| call.arguments.clone());
            calls.push(MethodCall::new(call.method.clone(), arguments));
        }

        for method in cx.introspector.methods(&class) {
            if !method.required || method.parameters.is_empty() {
                continue;
            }
            if definition.has_method_call(&method.name) {
                continue;
            }
            if !method.public {
                return Err(Error::invalid_method_call(
                    service_id,
                    method.declaring_class,
                    method.name,
                    "must be public",
                ));
            }
            if let Some(arguments) =
                self.autowire_call(cx, mode, &method, Arguments::new(), CallSite::Discovered)?
            {
                debug!(
                    service = %service_id,
                    method = %method.name,
                    "autowiring discovered method"
                );
                calls.push(MethodCall::new(method.name, arguments));
            }
        }

        definition.set_method_calls(calls);
        Ok(())
    }

    /// Validate a configured method call against the class
    fn configured_method(
        &self,
        cx: &PassContext<'_>,
        service_id: &str,
        class: &str,
        call: &MethodCall,
    ) -> Result<MethodInfo> {
        let Some(method) = cx.introspector.get_method(class, &call.method) else {
            return Err(Error::invalid_method_call(
                service_id,
                class,
                &call.method,
                "does not exist",
            ));
        };
        if !method.public {
            return Err(Error::invalid_method_call(
                service_id,
                method.declaring_class,
                method.name,
                "must be public",
            ));
        }
        if call.arguments.is_empty() && method.required_parameter_count() == 0 {
            return Err(Error::invalid_method_call(
                service_id,
                method.declaring_class,
                method.name,
                "has only optional arguments, thus must be wired explicitly",
            ));
        }
        Ok(method)
    }

    /// Complete the arguments of one call
    ///
    /// Returns `None` when a discovered call must be skipped: a parameter
    /// could not be resolved, or nothing was autowired at all.
    fn autowire_call(
        &mut self,
        cx: &mut PassContext<'_>,
        mode: Autowire,
        method: &MethodInfo,
        mut arguments: Arguments,
        site: CallSite,
    ) -> Result<Option<Arguments>> {
        let service_id = cx.current_id().to_string();
        let qualified = method.qualified_name();
        let mut autowired = 0usize;

        for (position, parameter) in method.parameters.iter().enumerate() {
            if is_bound(&arguments, position, parameter) {
                continue;
            }
            let key = ArgumentKey::Index(position);

            if parameter.variadic {
                let known_type = parameter
                    .type_name
                    .as_deref()
                    .filter(|t| cx.introspector.has_class(t));
                if let Some(type_name) = known_type {
                    let references = self
                        .index
                        .candidates(type_name, cx.introspector)
                        .iter()
                        .map(|id| Value::Reference(Reference::new(id.clone())))
                        .collect::<Vec<_>>();
                    arguments.set(key, Value::List(references));
                    autowired += 1;
                } else {
                    arguments.remove(&key);
                }
                continue;
            }

            let Some(type_name) = parameter.type_name.as_deref() else {
                if let Some(default) = &parameter.default {
                    arguments.set(key, default.clone());
                    continue;
                }
                if site == CallSite::Discovered {
                    return Ok(None);
                }
                return Err(Error::MissingTypeHint {
                    service_id,
                    method: qualified,
                    parameter: parameter.name.clone(),
                });
            };

            if !cx.introspector.has_class(type_name) {
                if let Some(value) = fallback_value(parameter) {
                    arguments.set(key, value);
                    continue;
                }
                if site == CallSite::Discovered {
                    return Ok(None);
                }
                return Err(Error::UnresolvableType {
                    service_id,
                    method: qualified,
                    parameter: parameter.name.clone(),
                    type_name: type_name.to_string(),
                });
            }

            let lookup = Site {
                method: &qualified,
                parameter: &parameter.name,
            };
            match self.resolve_type(cx, type_name, mode, Some(&lookup))? {
                Resolution::Found(id) => {
                    arguments.set(key, Value::Reference(Reference::new(id)));
                    autowired += 1;
                }
                Resolution::Ambiguous(candidates) => {
                    let binding = Binding {
                        service_id: service_id.clone(),
                        method: qualified.clone(),
                        parameter: parameter.name.clone(),
                        type_name: type_name.to_string(),
                    };
                    return Err(self.ambiguity_error(cx, binding, candidates));
                }
                Resolution::NotFound => {
                    if let Some(value) = fallback_value(parameter) {
                        cx.log(
                            PASS_AUTOWIRE,
                            &format!(
                                "Using the default value of argument ${} of method {qualified}() for service \"{service_id}\": no service matches type \"{type_name}\".",
                                parameter.name
                            ),
                        );
                        arguments.set(key, value);
                        continue;
                    }
                    if site == CallSite::Discovered {
                        return Ok(None);
                    }
                    let detail =
                        self.not_found_detail(cx, mode, type_name, &parameter.name, &qualified);
                    return Err(Error::NoCandidateFound {
                        service_id,
                        type_name: type_name.to_string(),
                        detail,
                    });
                }
            }
        }

        if site == CallSite::Discovered && autowired == 0 {
            return Ok(None);
        }
        Ok(Some(finalize_arguments(arguments)))
    }

    /// Look `type_name` up, auto-registering it when allowed
    ///
    /// Single-candidate bindings made for a parameter `site` are recorded
    /// for the post-check.
    fn resolve_type(
        &mut self,
        cx: &mut PassContext<'_>,
        type_name: &str,
        mode: Autowire,
        site: Option<&Site<'_>>,
    ) -> Result<Resolution> {
        if cx
            .graph
            .find_definition(type_name)
            .is_some_and(|definition| !definition.is_abstract())
        {
            return Ok(Resolution::Found(type_name.to_string()));
        }
        if mode == Autowire::ById {
            return Ok(Resolution::NotFound);
        }

        let candidates = self.index.candidates(type_name, cx.introspector).to_vec();
        match candidates.len() {
            0 => Ok(match self.auto_register(cx, type_name)? {
                Some(id) => Resolution::Found(id),
                None => Resolution::NotFound,
            }),
            1 => {
                if let Some(site) = site {
                    self.bindings.push(Binding {
                        service_id: cx.current_id().to_string(),
                        method: site.method.to_string(),
                        parameter: site.parameter.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
                Ok(Resolution::Found(candidates.into_iter().next().unwrap_or_default()))
            }
            _ => Ok(Resolution::Ambiguous(candidates)),
        }
    }

    /// Register and autowire a private definition for a concrete type
    ///
    /// The definition enters the index before it is autowired so that
    /// dependency cycles find it instead of registering it again.
    fn auto_register(
        &mut self,
        cx: &mut PassContext<'_>,
        type_name: &str,
    ) -> Result<Option<String>> {
        if !cx
            .introspector
            .kind(type_name)
            .is_some_and(|kind| kind.is_instantiable())
        {
            return Ok(None);
        }

        let id = format!("{}{type_name}", self.id_prefix);
        let mut definition = Definition::new(type_name);
        definition.set_public(false).set_autowire(Autowire::ByType);

        let created_mark = self.created.len();
        let bindings_mark = self.bindings.len();
        self.index.register(&id, type_name, cx.introspector);

        let previous = cx.replace_current_id(Some(id.clone()));
        let result = self.autowire_definition(cx, &mut definition);
        cx.replace_current_id(previous);

        match result {
            Ok(()) => {
                cx.graph.set_definition(id.clone(), definition);
                cx.graph.add_resource(type_name);
                self.created.push(id.clone());
                let message = format!(
                    "Type \"{type_name}\" has been auto-registered for service \"{}\".",
                    cx.current_id()
                );
                debug!(id = %id, "{message}");
                cx.log(PASS_AUTOWIRE, &message);
                Ok(Some(id))
            }
            Err(error) if error.is_resolution_failure() => {
                self.index.unregister(&id);
                self.rollback_to(cx, created_mark);
                self.bindings.truncate(bindings_mark);
                cx.log(PASS_AUTOWIRE, &error.to_string());
                Ok(None)
            }
            Err(error) => {
                self.index.unregister(&id);
                Err(error)
            }
        }
    }

    fn rollback_to(&mut self, cx: &mut PassContext<'_>, mark: usize) {
        for id in self.created.drain(mark..).rev() {
            cx.graph.remove_definition(&id);
            self.index.unregister(&id);
            debug!(id = %id, "rolled back auto-registration");
        }
    }

    /// Re-check the single-candidate bindings of the finished root attempt
    ///
    /// A later auto-registration may have given an already bound type a second
    /// candidate; the result must not depend on parameter order.
    fn check_bindings(&mut self, cx: &PassContext<'_>) -> Result<()> {
        let bindings = std::mem::take(&mut self.bindings);
        for binding in bindings {
            let candidates = self.index.candidates(&binding.type_name, cx.introspector).to_vec();
            if candidates.len() > 1 {
                return Err(self.ambiguity_error(cx, binding, candidates));
            }
        }
        Ok(())
    }

    fn ambiguity_error(
        &self,
        cx: &PassContext<'_>,
        binding: Binding,
        candidates: Vec<String>,
    ) -> Error {
        Error::AmbiguousCandidate {
            kind: cx.introspector.kind(&binding.type_name).unwrap_or_default(),
            alternative: find_alternative(cx, &binding.type_name),
            service_id: binding.service_id,
            method: binding.method,
            parameter: binding.parameter,
            type_name: binding.type_name,
            candidates,
        }
    }

    fn not_found_detail(
        &mut self,
        cx: &PassContext<'_>,
        mode: Autowire,
        type_name: &str,
        parameter: &str,
        qualified: &str,
    ) -> String {
        let kind = cx.introspector.kind(type_name).unwrap_or_default();
        if mode != Autowire::ById {
            return format!(
                "no services were found matching the \"{type_name}\" {kind} and it cannot be auto-registered for argument ${parameter} of method {qualified}()."
            );
        }

        let candidates = self.index.candidates(type_name, cx.introspector).to_vec();
        let mut suggestion = match candidates.as_slice() {
            [] => String::new(),
            [single] => {
                format!(" This type-hint could be aliased to the existing \"{single}\" service")
            }
            many => format!(
                " This type-hint could be aliased to one of these existing services: \"{}\"",
                many.join("\", \"")
            ),
        };
        if let Some(alternative) = find_alternative(cx, type_name) {
            if suggestion.is_empty() {
                suggestion = format!(" This type-hint could be updated to \"{alternative}\"");
            } else {
                suggestion.push_str(&format!("; or be updated to \"{alternative}\""));
            }
        }
        if !suggestion.is_empty() {
            suggestion.push('.');
        }
        format!(
            "argument ${parameter} of method {qualified}() references {kind} \"{type_name}\" but no such service exists.{suggestion}"
        )
    }
}

impl RecursivePass for AutowireResolver {
    fn name(&self) -> &'static str {
        PASS_AUTOWIRE
    }

    fn process_value(
        &mut self,
        cx: &mut PassContext<'_>,
        value: &mut Value,
        _is_root: bool,
    ) -> Result<()> {
        let Value::TypedReference(reference) = value else {
            return walk_value(self, cx, value);
        };
        let mode = self.modes.last().copied().unwrap_or_default();
        if mode == Autowire::Off || cx.graph.has(&reference.id) {
            return Ok(());
        }

        let type_name = reference.type_name.clone();
        let behavior = reference.invalid_behavior;
        match self.resolve_type(cx, &type_name, mode, None)? {
            Resolution::Found(id) => {
                *value = Value::TypedReference(
                    TypedReference::new(id, type_name).with_behavior(behavior),
                );
            }
            Resolution::NotFound | Resolution::Ambiguous(_) => {
                cx.log(
                    PASS_AUTOWIRE,
                    &format!(
                        "Cannot autowire service \"{}\": it references \"{type_name}\" but no single service matches this type.",
                        cx.current_id()
                    ),
                );
            }
        }
        Ok(())
    }

    fn process_definition(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
        is_root: bool,
    ) -> Result<()> {
        if !is_root {
            return self.autowire_definition(cx, definition);
        }

        self.created.clear();
        self.bindings.clear();
        let result = self
            .autowire_definition(cx, definition)
            .and_then(|()| self.check_bindings(cx));

        match result {
            Ok(()) => {
                self.registered.append(&mut self.created);
                Ok(())
            }
            Err(error) => {
                self.rollback_to(cx, 0);
                self.bindings.clear();
                Err(error)
            }
        }
    }
}

/// Whether the parameter at `position` already has an explicit value
fn is_bound(arguments: &Arguments, position: usize, parameter: &ParameterInfo) -> bool {
    let by_position = arguments.get_index(position);
    let by_name = arguments.get(&ArgumentKey::Named(parameter.name.clone()));
    matches!(by_position, Some(Argument::Explicit(_)))
        || matches!(by_name, Some(Argument::Explicit(_)))
}

/// Fail on placeholders of a definition that autowiring never completes
fn reject_inferred(service_id: &str, definition: &Definition) -> Result<()> {
    let constructor = std::iter::once(("the constructor".to_string(), definition.arguments()));
    let calls = definition
        .method_calls()
        .iter()
        .map(|call| (format!("method {}()", call.method), &call.arguments));

    for (target, arguments) in constructor.chain(calls) {
        let inferred = arguments
            .iter()
            .find(|(_, argument)| matches!(argument, Argument::Inferred));
        if let Some((key, _)) = inferred {
            return Err(Error::invalid_definition(
                service_id,
                format!(
                    "argument {key} of {target} is left to autowiring but the service is not autowired."
                ),
            ));
        }
    }
    Ok(())
}

/// Default of an optional parameter, or null for a nullable one
fn fallback_value(parameter: &ParameterInfo) -> Option<Value> {
    parameter
        .default
        .clone()
        .or_else(|| parameter.nullable.then_some(Value::Null))
}

/// A registered supertype of `type_name` a consumer could depend on instead
fn find_alternative(cx: &PassContext<'_>, type_name: &str) -> Option<String> {
    let definition_ids = cx.graph.definitions().map(|(id, _)| id);
    let alias_ids = cx.graph.aliases().map(|(id, _)| id);
    definition_ids
        .chain(alias_ids)
        .find(|id| {
            *id != type_name
                && cx.introspector.has_class(id)
                && cx.introspector.is_subtype_of(type_name, id)
                && cx
                    .graph
                    .find_definition(id)
                    .is_some_and(|definition| !definition.is_abstract())
        })
        .map(str::to_string)
}

/// Drop leftover placeholders, order positions and close gaps when possible
fn finalize_arguments(arguments: Arguments) -> Arguments {
    let mut arguments: Arguments = arguments
        .into_iter()
        .filter(|(_, argument)| matches!(argument, Argument::Explicit(_)))
        .collect();
    arguments.sort();
    if arguments.has_non_positional() {
        return arguments;
    }
    arguments
        .into_iter()
        .enumerate()
        .map(|(position, (_, argument))| (ArgumentKey::Index(position), argument))
        .collect()
}
