//! RDF primitives used by resources
//!
//! This module provides:
//! - Named nodes, literals and triples (wrapping oxrdf)
//! - The per-resource triple buffer
//! - Namespace prefixes for compact IRIs
//!
//! # Example
//!
//! ```rust
//! use graphbound::rdf::{NamedNode, TripleBuffer};
//!
//! let me = NamedNode::new("http://swirrl.com/ric.rdf#me").unwrap();
//! let mut buffer = TripleBuffer::new();
//! buffer.assign_type(&me, "http://xmlns.com/foaf/0.1/Person").unwrap();
//!
//! assert_eq!(buffer.types_of(&me).len(), 1);
//! ```

mod buffer;
mod namespace;
mod types;

pub use types::{Literal, NamedNode, RdfError, RdfObject, RdfResult, Triple, TriplePattern};

pub use buffer::TripleBuffer;

pub use namespace::{NamespaceManager, PrefixError, PrefixResult, RDF_TYPE};
