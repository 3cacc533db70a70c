//! funcgen - binding extraction and descriptor generation for serverless hosts
//!
//! This library is the code-generation core of an annotation-driven serverless
//! toolchain. A front end hands over annotated service and function
//! declarations; funcgen normalizes every trigger, input, and output binding
//! into a uniform model and emits the host's deployment descriptors.
//!
//! # Core Concepts
//!
//! - **Binding**: the uniform representation of any trigger/input/output
//!   binding - a host type tag, a direction, a name, and kind-specific
//!   properties with a deterministic serialization contract
//! - **Resolvers**: one pure factory per binding kind, dispatched by
//!   annotation name through a registry
//! - **Extraction**: walking services and their exposed functions to assemble
//!   one ordered binding list per function
//! - **Artifact**: the per-function `function.json` descriptors plus the
//!   `host.json` entry-point reference
//!
//! # Example Usage
//!
//! ```
//! use funcgen::extract::ServiceExtractor;
//! use funcgen::syntax::{CompilationUnit, FunctionDecl, ServiceDecl};
//!
//! let unit = CompilationUnit {
//!     services: vec![
//!         ServiceDecl::new("/api").with_function(FunctionDecl::new("get").with_name("hello")),
//!     ],
//! };
//!
//! let contexts = ServiceExtractor::new().extract(&unit).unwrap();
//! assert_eq!(contexts[0].function_name(), "hello");
//! ```
//!
//! # Project Structure
//!
//! - [`syntax`]: the front-end contract types
//! - [`bindings`]: the binding model and per-kind resolvers
//! - [`extract`]: service/function extraction
//! - [`artifact`]: descriptor generation

pub mod artifact;
pub mod bindings;
pub mod cli;
pub mod extract;
pub mod syntax;
pub mod util;

// Re-export key types for convenient access
pub use artifact::{ArtifactError, ConsoleReporter, FunctionsArtifact, Reporter, ARTIFACT_ROOT};
pub use bindings::{Binding, BindingError, BindingName, BindingRegistry, Direction};
pub use extract::{ExtractError, FunctionContext, ServiceExtractor};
pub use syntax::{AnnotationDescriptor, CompilationUnit, PathSegment, ServiceDecl};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_funcgen() {
        assert_eq!(NAME, "funcgen");
    }
}
