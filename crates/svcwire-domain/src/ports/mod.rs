//! Domain Port Interfaces
//!
//! Boundaries between the resolvers and their external collaborators. The
//! pipeline never inspects runtime types itself; it asks a
//! [`TypeIntrospector`] and reports non-fatal findings to a
//! [`DiagnosticsSink`].

/// Diagnostics reporting port
pub mod diagnostics;
/// Type introspection port
pub mod introspection;

pub use diagnostics::DiagnosticsSink;
pub use introspection::{MethodInfo, ParameterInfo, SubscribedService, TypeIntrospector, TypeKind};
