//! Resolution Pipeline Use Case
//!
//! Runs the resolvers over a definition graph in their fixed order:
//! inheritance, then autowiring, then named arguments and service locators.
//! Each enabled stage walks the whole graph once, including the definitions
//! earlier stages inserted.

use svcwire_domain::ContainerGraph;
use svcwire_domain::constants::{
    AUTOWIRED_ID_PREFIX, CONTAINER_PLACEHOLDER_ID, PASS_ARGUMENTS, PASS_AUTOWIRE, PASS_INHERITANCE,
    SERVICE_LOCATOR_ID_PREFIX, SERVICE_SUBSCRIBER_CAPABILITY, SERVICE_SUBSCRIBER_TAG,
};
use svcwire_domain::error::Result;
use svcwire_domain::ports::{DiagnosticsSink, TypeIntrospector};
use tracing::{debug, info};

use crate::compiler::{
    ArgumentResolver, ArgumentResolverOptions, AutowireResolver, CandidateIndex,
    InheritanceResolver, PassContext, run_pass,
};

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Run the inheritance resolver
    pub resolve_inheritance: bool,
    /// Run the autowiring resolver
    pub autowire: bool,
    /// Run the named-argument and locator resolver
    pub resolve_arguments: bool,
    /// Prefix of auto-registered definition ids
    pub autowired_id_prefix: String,
    /// Prefix of service locator ids
    pub locator_id_prefix: String,
    /// Reference id subscribers use to reach their locator
    pub container_placeholder_id: String,
    /// Tag marking service subscribers
    pub subscriber_tag: String,
    /// Capability a subscriber class must implement
    pub subscriber_capability: String,
    /// Reject unmarked string argument keys
    pub strict_legacy_arguments: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            resolve_inheritance: true,
            autowire: true,
            resolve_arguments: true,
            autowired_id_prefix: AUTOWIRED_ID_PREFIX.to_string(),
            locator_id_prefix: SERVICE_LOCATOR_ID_PREFIX.to_string(),
            container_placeholder_id: CONTAINER_PLACEHOLDER_ID.to_string(),
            subscriber_tag: SERVICE_SUBSCRIBER_TAG.to_string(),
            subscriber_capability: SERVICE_SUBSCRIBER_CAPABILITY.to_string(),
            strict_legacy_arguments: false,
        }
    }
}

impl PipelineOptions {
    fn argument_options(&self) -> ArgumentResolverOptions {
        ArgumentResolverOptions {
            subscriber_tag: self.subscriber_tag.clone(),
            subscriber_capability: self.subscriber_capability.clone(),
            locator_id_prefix: self.locator_id_prefix.clone(),
            container_placeholder_id: self.container_placeholder_id.clone(),
            strict_legacy_arguments: self.strict_legacy_arguments,
        }
    }
}

/// Outcome of a successful pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Stages that ran, in order
    pub stages: Vec<&'static str>,
    /// Ids of definitions registered by autowiring
    pub auto_registered: Vec<String>,
    /// Ids of synthesized service locators
    pub service_locators: Vec<String>,
    /// Definitions in the graph after the run
    pub definitions: usize,
}

/// Ordered resolver pipeline
#[derive(Debug, Clone, Default)]
pub struct ResolutionPipeline {
    options: PipelineOptions,
}

impl ResolutionPipeline {
    /// Create a pipeline
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Pipeline settings
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Resolve `graph` in place
    ///
    /// The first fatal error aborts the run; the graph then holds whatever
    /// the completed stages produced.
    pub fn run(
        &self,
        graph: &mut ContainerGraph,
        introspector: &dyn TypeIntrospector,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mut cx = PassContext::new(graph, introspector, diagnostics);

        if self.options.resolve_inheritance {
            run_pass(&mut InheritanceResolver::new(), &mut cx)?;
            report.stages.push(PASS_INHERITANCE);
        }

        if self.options.autowire {
            let index = CandidateIndex::build(cx.graph, introspector);
            debug!(candidates = index.len(), "built candidate index");
            let mut resolver =
                AutowireResolver::new(index, self.options.autowired_id_prefix.clone());
            run_pass(&mut resolver, &mut cx)?;
            report.auto_registered = resolver.into_registered();
            report.stages.push(PASS_AUTOWIRE);
        }

        if self.options.resolve_arguments {
            let mut resolver = ArgumentResolver::new(self.options.argument_options());
            run_pass(&mut resolver, &mut cx)?;
            report.service_locators = resolver.into_locators();
            report.stages.push(PASS_ARGUMENTS);
        }

        report.definitions = cx.graph.definition_count();
        info!(
            stages = report.stages.len(),
            definitions = report.definitions,
            auto_registered = report.auto_registered.len(),
            service_locators = report.service_locators.len(),
            "definition graph resolved"
        );
        Ok(report)
    }
}
