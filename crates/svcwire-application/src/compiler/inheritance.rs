//! Definition inheritance resolver
//!
//! Applies the two inheritance mechanisms of the definition model:
//!
//! - conditional configuration (`instanceof`): a partial definition merged
//!   into every definition whose class equals or subtypes a capability;
//! - child definitions: a definition naming a parent inherits every field it
//!   does not configure itself, and optionally the parent's tags.
//!
//! Conditionals are consumed when applied, so running the resolver twice
//! yields the same graph.

use svcwire_domain::constants::PASS_INHERITANCE;
use svcwire_domain::error::Result;
use svcwire_domain::value_objects::{Definition, DefinitionChange};
use tracing::debug;

use super::walker::{PassContext, RecursivePass, walk_definition};

/// Resolver for parent chains, tag inheritance and conditional configuration
#[derive(Debug, Default)]
pub struct InheritanceResolver {
    /// Ids whose resolution is in progress, outermost first
    resolving: Vec<String>,
}

impl InheritanceResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&mut self, cx: &mut PassContext<'_>, definition: &mut Definition) -> Result<()> {
        let class = if definition.is_child() {
            self.resolve_parent_chain(cx, definition)
        } else {
            definition.class().map(str::to_string)
        };

        if let Some(class) = class {
            self.apply_conditionals(cx, definition, &class);
        }

        walk_definition(self, cx, definition)?;

        if definition.is_child() {
            self.flatten(cx, definition)?;
        }
        Ok(())
    }

    /// Effective class of a child definition
    ///
    /// Parents that are children themselves are resolved first and written
    /// back, so consumed tag inheritance is visible to every later reader.
    fn resolve_parent_chain(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
    ) -> Option<String> {
        let parent_id = definition.parent()?.to_string();
        if !cx.graph.has(&parent_id) {
            return None;
        }

        let resolved_id = cx.graph.resolve_id(&parent_id);
        if self.resolving.contains(&resolved_id) {
            cx.log(
                PASS_INHERITANCE,
                &format!(
                    "Circular parent reference to \"{resolved_id}\" while resolving service \"{}\".",
                    cx.current_id()
                ),
            );
            return None;
        }

        let mut parent = cx.graph.definition(&resolved_id)?.clone();
        let parent_class = if parent.is_child() {
            self.resolving.push(resolved_id.clone());
            let class = self.resolve_parent_chain(cx, &mut parent);
            self.resolving.pop();
            cx.graph.set_definition(resolved_id, parent.clone());
            class
        } else {
            parent.class().map(str::to_string)
        };

        if definition.inherits_tags() {
            definition.set_inherit_tags(false);
            definition.tags_mut().extend(parent.tags());
        }

        definition.class().map(str::to_string).or(parent_class)
    }

    fn apply_conditionals(&self, cx: &PassContext<'_>, definition: &mut Definition, class: &str) {
        if definition.instanceof().is_empty() {
            return;
        }
        let Ok(class) = cx.graph.parameters().resolve_string(class) else {
            return;
        };
        if class.is_empty() {
            return;
        }

        let introspector = cx.introspector;
        for (capability, partial) in definition.take_instanceof() {
            let unknown =
                !introspector.has_class(&capability) || !introspector.has_class(&class);
            if capability != class && unknown {
                continue;
            }
            if capability == class || introspector.is_subtype_of(&class, &capability) {
                debug!(
                    service = cx.current_id(),
                    capability = %capability,
                    "merging conditional configuration"
                );
                merge_conditional(definition, &partial);
            }
        }
    }

    /// Replace a child definition with the concrete definition it denotes
    fn flatten(&mut self, cx: &mut PassContext<'_>, definition: &mut Definition) -> Result<()> {
        let Some(parent_id) = definition.parent().map(str::to_string) else {
            return Ok(());
        };
        let resolved_id = cx.graph.resolve_id(&parent_id);
        if self.resolving.contains(&resolved_id) {
            return Ok(());
        }
        let Some(mut parent) = cx.graph.definition(&resolved_id).cloned() else {
            cx.log(
                PASS_INHERITANCE,
                &format!(
                    "Parent definition \"{parent_id}\" of service \"{}\" does not exist; the definition is left unresolved.",
                    cx.current_id()
                ),
            );
            return Ok(());
        };

        if parent.is_child() || !parent.instanceof().is_empty() {
            self.resolving.push(resolved_id);
            let resolved = self.resolve(cx, &mut parent);
            self.resolving.pop();
            resolved?;
        }
        if parent.is_child() {
            return Ok(());
        }

        *definition = inherit_from(&parent, definition);
        Ok(())
    }
}

impl RecursivePass for InheritanceResolver {
    fn name(&self) -> &'static str {
        PASS_INHERITANCE
    }

    fn process_definition(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
        is_root: bool,
    ) -> Result<()> {
        if !is_root {
            return self.resolve(cx, definition);
        }
        self.resolving.push(cx.current_id().to_string());
        let result = self.resolve(cx, definition);
        self.resolving.pop();
        result
    }
}

/// Copy the fields `source` explicitly configures onto `target`
fn apply_changed_fields(target: &mut Definition, source: &Definition) {
    if source.is_changed(DefinitionChange::Class) {
        if let Some(class) = source.class() {
            target.set_class(class);
        }
    }
    if source.is_changed(DefinitionChange::File) {
        if let Some(file) = source.file() {
            target.set_file(file);
        }
    }
    if source.is_changed(DefinitionChange::Factory) {
        if let Some(factory) = source.factory() {
            target.set_factory(factory.clone());
        }
    }
    if source.is_changed(DefinitionChange::Public) {
        target.set_public(source.is_public());
    }
    if source.is_changed(DefinitionChange::Lazy) {
        target.set_lazy(source.is_lazy());
    }
    if source.is_changed(DefinitionChange::Autowire) {
        target.set_autowire(source.autowire());
    }
}

/// Merge a matching conditional partial into `definition`
fn merge_conditional(definition: &mut Definition, partial: &Definition) {
    if partial.is_changed(DefinitionChange::Shared) {
        definition.set_shared(partial.is_shared());
    }
    if partial.is_changed(DefinitionChange::Abstract) {
        definition.set_abstract(partial.is_abstract());
    }
    apply_changed_fields(definition, partial);

    for (key, argument) in partial.arguments() {
        definition.set_argument(key.clone(), argument.clone());
    }
    for (name, value) in partial.properties() {
        definition.set_property(name.clone(), value.clone());
    }
    definition
        .method_calls_mut()
        .extend(partial.method_calls().iter().cloned());
    definition.tags_mut().prepend(partial.tags());
}

/// Build the concrete definition a child denotes on top of its resolved parent
///
/// Abstract, shared and tags always come from the child; other fields
/// fall through to the parent unless the child configures them.
fn inherit_from(parent: &Definition, child: &Definition) -> Definition {
    let mut concrete = Definition::default();
    if let Some(class) = parent.class() {
        concrete.set_class(class);
    }
    if let Some(file) = parent.file() {
        concrete.set_file(file);
    }
    if let Some(factory) = parent.factory() {
        concrete.set_factory(factory.clone());
    }
    concrete
        .set_arguments(parent.arguments().clone())
        .set_method_calls(parent.method_calls().to_vec())
        .set_public(parent.is_public())
        .set_lazy(parent.is_lazy())
        .set_autowire(parent.autowire());
    for (name, value) in parent.properties() {
        concrete.set_property(name.clone(), value.clone());
    }
    concrete.set_changes(parent.changes().clone());

    apply_changed_fields(&mut concrete, child);
    for (key, argument) in child.arguments() {
        concrete.set_argument(key.clone(), argument.clone());
    }
    for (name, value) in child.properties() {
        concrete.set_property(name.clone(), value.clone());
    }
    concrete
        .method_calls_mut()
        .extend(child.method_calls().iter().cloned());
    for (capability, partial) in child.instanceof() {
        concrete.set_instanceof(capability.clone(), partial.clone());
    }

    concrete
        .set_abstract(child.is_abstract())
        .set_shared(child.is_shared())
        .set_synthetic(child.is_synthetic())
        .set_tags(child.tags().clone());
    concrete
}
