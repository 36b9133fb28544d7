//! Per-resource triple buffer
//!
//! Every resource owns exactly one `TripleBuffer`, allocated empty when the
//! resource is constructed. Persistence collaborators read it on save and
//! fill it on load; nothing else shares it.

use super::namespace::RDF_TYPE;
use super::types::{Literal, NamedNode, RdfObject, RdfResult, Triple, TriplePattern};
use std::collections::HashSet;

/// In-memory set of triples owned by a single resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleBuffer {
    triples: HashSet<Triple>,
}

impl TripleBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            triples: HashSet::new(),
        }
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Remove a triple. Returns false if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn clear(&mut self) {
        self.triples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triples matching a pattern
    pub fn query(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        self.triples.iter().filter(|t| pattern.matches(t)).collect()
    }

    /// Objects of every `<subject> <predicate> ?o` triple
    pub fn objects(&self, subject: &NamedNode, predicate: &NamedNode) -> Vec<&RdfObject> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
            .collect()
    }

    /// Record `<subject> rdf:type <rdf_type>`
    pub fn assign_type(&mut self, subject: &NamedNode, rdf_type: &str) -> RdfResult<()> {
        let class = NamedNode::new(rdf_type)?;
        self.insert(Triple::new(subject.clone(), rdf_type_predicate(), class));
        Ok(())
    }

    /// rdf:type values recorded for a subject
    pub fn types_of(&self, subject: &NamedNode) -> Vec<&NamedNode> {
        let rdf_type = rdf_type_predicate();
        self.objects(subject, &rdf_type)
            .into_iter()
            .filter_map(RdfObject::as_named_node)
            .collect()
    }

    /// Replace every value of `predicate` on `subject` with a single literal
    pub fn set_literal(&mut self, subject: &NamedNode, predicate: &NamedNode, literal: Literal) {
        self.triples
            .retain(|t| !(&t.subject == subject && &t.predicate == predicate));
        self.insert(Triple::new(subject.clone(), predicate.clone(), literal));
    }
}

fn rdf_type_predicate() -> NamedNode {
    oxrdf::NamedNode::new_unchecked(RDF_TYPE).into()
}
