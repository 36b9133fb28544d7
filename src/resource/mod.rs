//! Resources: URI-identified objects bound to a named graph
//!
//! This module implements:
//! - Class registration with inherited default graphs and rdf:types
//! - Identity (class + URI) driving equality, hashing and URI ordering
//! - The around-initialize hook chain run once per construction
//! - Record state and the storage key used by persistence collaborators
//! - Hierarchy-aware class matching
//! - Presence/format validation of the URI and graph
//!
//! # Example
//!
//! ```rust
//! use graphbound::{ConstructOptions, RegistryBuilder, ResourceError};
//!
//! let mut builder = RegistryBuilder::new();
//! let person = builder.define("Person", None).unwrap();
//! builder.set_default_graph(person, "http://swirrl.com/graph/people").unwrap();
//! let registry = builder.build().unwrap();
//!
//! let ric = registry
//!     .construct(person, Some("http://swirrl.com/ric.rdf#me"), ConstructOptions::default())
//!     .unwrap();
//! assert_eq!(ric.uri().as_str(), "http://swirrl.com/ric.rdf#me");
//! assert_eq!(ric.graph_uri().unwrap().as_str(), "http://swirrl.com/graph/people");
//! assert!(ric.is_new_record());
//! assert_eq!(ric.key(), None);
//!
//! let other = registry
//!     .construct(person, Some("http://swirrl.com/ric.rdf#me"), "http://other/graph")
//!     .unwrap();
//! assert_eq!(other.graph_uri().unwrap().as_str(), "http://other/graph");
//! assert_eq!(ric, other);
//!
//! assert_eq!(
//!     registry.construct(person, None, ConstructOptions::default()).unwrap_err(),
//!     ResourceError::UriMissing
//! );
//! ```

mod error;
mod identity;
mod instance;
mod matcher;
mod options;
mod persistence;
mod pipeline;
mod registry;
mod types;
mod validation;

pub use error::{ResourceError, ResourceResult};
pub use instance::Resource;
pub use matcher::{Candidate, ClassMatcher};
pub use options::ConstructOptions;
pub use persistence::{PersistenceStatus, RecordState, TrackedState};
pub use pipeline::{hook_fn, FnHook, InitHook, Next};
pub use registry::{
    ClassDefinition, Registry, RegistryBuilder, RegistryError, RegistryResult, ResourceClass,
};
pub use types::{ClassId, ResourceIdentity};
pub use validation::{
    IriValidator, ResourceValidator, UrlValidator, ValidationError, ValidationErrors,
    ValidationResult,
};
