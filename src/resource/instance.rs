//! The resource value produced by construction

use super::persistence::RecordState;
use super::types::ClassId;
use crate::rdf::{Literal, NamedNode, RdfObject, Triple, TripleBuffer};

/// A domain object persisted as the triples about its URI in one graph.
///
/// Resources only come out of [`Registry::construct`](super::Registry::construct).
/// The URI and graph are fixed from then on; the triple buffer is owned by
/// this instance alone.
#[derive(Debug, Clone)]
pub struct Resource {
    pub(crate) class: ClassId,
    pub(crate) uri: NamedNode,
    pub(crate) graph_uri: Option<NamedNode>,
    pub(crate) repository: TripleBuffer,
    pub(crate) state: RecordState,
}

impl Resource {
    pub(crate) fn allocate(class: ClassId, uri: NamedNode) -> Self {
        Self {
            class,
            uri,
            graph_uri: None,
            repository: TripleBuffer::new(),
            state: RecordState::New,
        }
    }

    /// Concrete class of this resource
    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn uri(&self) -> &NamedNode {
        &self.uri
    }

    /// Graph this resource is stored in; `None` until resolved, or when
    /// construction was asked to ignore the graph
    pub fn graph_uri(&self) -> Option<&NamedNode> {
        self.graph_uri.as_ref()
    }

    /// The triples held for this resource
    pub fn repository(&self) -> &TripleBuffer {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut TripleBuffer {
        &mut self.repository
    }

    /// rdf:type values currently recorded about this resource
    pub fn rdf_types(&self) -> Vec<&NamedNode> {
        self.repository.types_of(&self.uri)
    }

    /// Add `<uri> <predicate> <object>`
    pub fn write_triple(&mut self, predicate: NamedNode, object: impl Into<RdfObject>) -> bool {
        self.repository
            .insert(Triple::new(self.uri.clone(), predicate, object))
    }

    /// Replace all values of `predicate` with one literal
    pub fn set_literal(&mut self, predicate: &NamedNode, literal: Literal) {
        self.repository.set_literal(&self.uri, predicate, literal);
    }

    /// Values recorded for `predicate`
    pub fn read_predicate(&self, predicate: &NamedNode) -> Vec<&RdfObject> {
        self.repository.objects(&self.uri, predicate)
    }
}
