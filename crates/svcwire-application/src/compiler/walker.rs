//! Recursive graph walker
//!
//! A resolver implements [`RecursivePass`] and overrides the hooks it cares
//! about; the default hooks recurse into nested structures. References are
//! leaves: the walker never follows them into their target.
//!
//! [`run_pass`] visits root definitions by position rather than by a
//! snapshot of ids, so definitions a resolver appends while walking are
//! visited later in the same walk.

use svcwire_domain::error::Result;
use svcwire_domain::ports::{DiagnosticsSink, TypeIntrospector};
use svcwire_domain::value_objects::{Argument, Definition, Value};
use svcwire_domain::ContainerGraph;
use tracing::debug;

/// Shared state of one resolver walk
pub struct PassContext<'a> {
    /// The graph under resolution
    pub graph: &'a mut ContainerGraph,
    /// Type introspection facade
    pub introspector: &'a dyn TypeIntrospector,
    /// Receiver of non-fatal messages
    pub diagnostics: &'a dyn DiagnosticsSink,
    current_id: Option<String>,
}

impl<'a> PassContext<'a> {
    /// Create a context over `graph`
    pub fn new(
        graph: &'a mut ContainerGraph,
        introspector: &'a dyn TypeIntrospector,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            graph,
            introspector,
            diagnostics,
            current_id: None,
        }
    }

    /// Id of the root definition being walked
    pub fn current_id(&self) -> &str {
        self.current_id.as_deref().unwrap_or_default()
    }

    /// Switch the current id, returning the previous one
    pub fn replace_current_id(&mut self, id: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.current_id, id)
    }

    /// Forward a message to the diagnostics sink
    pub fn log(&self, pass: &str, message: &str) {
        debug!(pass, message, "diagnostic");
        self.diagnostics.log(pass, message);
    }
}

/// A resolver walking the whole definition graph
pub trait RecursivePass {
    /// Name reported with diagnostics
    fn name(&self) -> &'static str;

    /// Visit a value nested in a definition
    fn process_value(
        &mut self,
        cx: &mut PassContext<'_>,
        value: &mut Value,
        _is_root: bool,
    ) -> Result<()> {
        walk_value(self, cx, value)
    }

    /// Visit a root or inline definition
    fn process_definition(
        &mut self,
        cx: &mut PassContext<'_>,
        definition: &mut Definition,
        _is_root: bool,
    ) -> Result<()> {
        walk_definition(self, cx, definition)
    }
}

/// Recurse into the children of `value`
pub fn walk_value<P: RecursivePass + ?Sized>(
    pass: &mut P,
    cx: &mut PassContext<'_>,
    value: &mut Value,
) -> Result<()> {
    match value {
        Value::List(items) => {
            for item in items {
                pass.process_value(cx, item, false)?;
            }
        }
        Value::Map(entries) => {
            for item in entries.values_mut() {
                pass.process_value(cx, item, false)?;
            }
        }
        Value::ServiceClosure(inner) => pass.process_value(cx, inner, false)?,
        Value::Definition(definition) => pass.process_definition(cx, definition, false)?,
        _ => {}
    }
    Ok(())
}

/// Recurse into the arguments, method-call arguments and properties of `definition`
pub fn walk_definition<P: RecursivePass + ?Sized>(
    pass: &mut P,
    cx: &mut PassContext<'_>,
    definition: &mut Definition,
) -> Result<()> {
    for (_, argument) in definition.arguments_mut().iter_mut() {
        if let Argument::Explicit(value) = argument {
            pass.process_value(cx, value, false)?;
        }
    }
    for value in definition.properties_mut().values_mut() {
        pass.process_value(cx, value, false)?;
    }
    for call in definition.method_calls_mut() {
        for (_, argument) in call.arguments.iter_mut() {
            if let Argument::Explicit(value) = argument {
                pass.process_value(cx, value, false)?;
            }
        }
    }
    Ok(())
}

/// Walk every root definition of the graph with `pass`
///
/// Each definition is taken out by value, processed, then stored back under
/// its id, so a resolver may freely insert other definitions meanwhile.
pub fn run_pass<P: RecursivePass + ?Sized>(pass: &mut P, cx: &mut PassContext<'_>) -> Result<()> {
    debug!(
        pass = pass.name(),
        definitions = cx.graph.definition_count(),
        "walking definition graph"
    );

    let mut position = 0;
    while let Some(id) = cx.graph.id_at(position).map(str::to_string) {
        position += 1;
        let Some(mut definition) = cx.graph.definition(&id).cloned() else {
            continue;
        };

        let previous = cx.replace_current_id(Some(id.clone()));
        let result = pass.process_definition(cx, &mut definition, true);
        cx.replace_current_id(previous);
        result?;

        cx.graph.set_definition(id, definition);
    }
    Ok(())
}
