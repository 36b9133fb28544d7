//! Construction errors

use crate::rdf::RdfError;
use thiserror::Error;

/// Errors raised while constructing a resource.
///
/// All of them are fatal to the construction call that raised them; no
/// resource is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No URI was supplied
    #[error("Resource URI is missing")]
    UriMissing,

    /// The URI is not an absolute IRI
    #[error("Invalid resource URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The resolved graph is not an absolute IRI
    #[error("Invalid graph URI {uri:?}: {reason}")]
    InvalidGraphUri { uri: String, reason: String },

    /// The class-level rdf:type is not an absolute IRI
    #[error("Invalid rdf:type {rdf_type:?} for class {class}: {reason}")]
    InvalidRdfType {
        class: String,
        rdf_type: String,
        reason: String,
    },

    /// The class is not registered
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// A hook returned without running the rest of the chain
    #[error("Initialization hook {hook} returned without calling next")]
    InitializationHalted { hook: String },

    /// Failure reported by an initialization hook
    #[error("Initialization hook {hook} failed: {message}")]
    Hook { hook: String, message: String },
}

impl ResourceError {
    /// Convenience constructor for hook implementations
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        ResourceError::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_uri(err: RdfError) -> Self {
        let (uri, reason) = split_iri_error(err);
        ResourceError::InvalidUri { uri, reason }
    }

    pub(crate) fn invalid_graph_uri(err: RdfError) -> Self {
        let (uri, reason) = split_iri_error(err);
        ResourceError::InvalidGraphUri { uri, reason }
    }
}

fn split_iri_error(err: RdfError) -> (String, String) {
    match err {
        RdfError::InvalidIri { iri, reason } => (iri, reason),
        other => (String::new(), other.to_string()),
    }
}

pub type ResourceResult<T> = Result<T, ResourceError>;
