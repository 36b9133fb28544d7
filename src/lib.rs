//! graphbound
//!
//! Identity, named-graph binding and initialization for domain objects that
//! are persisted as RDF triples.
//!
//! # Model
//!
//! - A **resource** is identified by an absolute URI and belongs to exactly
//!   one registered class.
//! - Each class may carry a **default graph** and an **rdf:type**, both
//!   inherited by subclasses unless overridden.
//! - Classes are registered on a [`RegistryBuilder`] at startup and frozen
//!   into a [`Registry`]; resources are constructed from the frozen registry.
//! - Construction runs an **around-initialize** hook chain that subclasses
//!   extend without touching the constructor.
//! - Equality and hashing use (class, URI); ordering uses the URI alone.
//!
//! Storage, querying and serialization of triples are left to persistence
//! collaborators, which interact through [`Resource::key`],
//! [`PersistenceStatus`] and the resource's [`TripleBuffer`].
//!
//! ## Example Usage
//!
//! ```rust
//! use graphbound::{ConstructOptions, RegistryConfig};
//!
//! let config = RegistryConfig::from_yaml_str(r#"
//! classes:
//!   - name: Person
//!     default_graph: "http://swirrl.com/graph/people"
//!     rdf_type: "foaf:Person"
//! "#).unwrap();
//! let registry = config.into_registry().unwrap();
//!
//! let mut ric = registry
//!     .construct_named("Person", Some("http://swirrl.com/ric.rdf#me"), ConstructOptions::default())
//!     .unwrap();
//! assert_eq!(ric.graph_uri().unwrap().as_str(), "http://swirrl.com/graph/people");
//! assert_eq!(ric.key(), None);
//!
//! ric.mark_persisted();
//! assert_eq!(ric.key(), Some(vec!["http://swirrl.com/ric.rdf#me".to_string()]));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod rdf;
pub mod resource;

// Re-export main types for convenience
pub use config::{ClassConfig, ConfigError, ConfigResult, RegistryConfig};

pub use rdf::{
    Literal, NamedNode, NamespaceManager, RdfError, RdfObject, RdfResult, Triple, TripleBuffer,
    TriplePattern,
};

pub use resource::{
    hook_fn, Candidate, ClassDefinition, ClassId, ClassMatcher, ConstructOptions, FnHook,
    InitHook, IriValidator, Next, PersistenceStatus, RecordState, Registry, RegistryBuilder,
    RegistryError, RegistryResult, Resource, ResourceClass, ResourceError, ResourceIdentity,
    ResourceResult, ResourceValidator, TrackedState, UrlValidator, ValidationError,
    ValidationErrors,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
