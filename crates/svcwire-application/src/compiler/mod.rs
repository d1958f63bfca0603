//! Definition graph resolvers
//!
//! Every resolver is a [`RecursivePass`]: one walk over the whole graph that
//! visits each definition and every value nested inside it.
//!
//! | Resolver | Description |
//! |----------|-------------|
//! | [`InheritanceResolver`] | Parent chains, tag inheritance and conditional configuration |
//! | [`AutowireResolver`] | Type-driven argument inference and auto-registration |
//! | [`ArgumentResolver`] | Named arguments and service locators for subscribers |

/// Named-argument and service-locator resolver
pub mod arguments;
/// Autowiring resolver
pub mod autowire;
/// Type candidate index
pub mod candidate_index;
/// Inheritance resolver
pub mod inheritance;
/// Service locator synthesis
pub mod service_locator;
/// Recursive graph walker
pub mod walker;

pub use arguments::{ArgumentResolver, ArgumentResolverOptions};
pub use autowire::AutowireResolver;
pub use candidate_index::CandidateIndex;
pub use inheritance::InheritanceResolver;
pub use walker::{PassContext, RecursivePass, run_pass, walk_definition, walk_value};
