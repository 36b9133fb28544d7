//! Class-hierarchy-aware matching
//!
//! Answers "does a handler for class `T` apply to this class or instance?"
//! using the descendant sets the registry precomputes at build time, so a
//! match is one set lookup.

use super::instance::Resource;
use super::registry::Registry;
use super::types::ClassId;

/// What is being matched against a target class
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A class: matches if the target is that class or one of its subclasses
    Class(ClassId),
    /// An instance: matches if its concrete class is the target or a subclass
    Instance(&'a Resource),
}

impl From<ClassId> for Candidate<'_> {
    fn from(class: ClassId) -> Self {
        Candidate::Class(class)
    }
}

impl<'a> From<&'a Resource> for Candidate<'a> {
    fn from(resource: &'a Resource) -> Self {
        Candidate::Instance(resource)
    }
}

impl Registry {
    /// `class <= ancestor`: true when `class` is `ancestor` or descends from it
    pub fn is_subtype_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.entry(ancestor)
            .map_or(false, |e| e.descendants.contains(&class))
    }

    /// Instances match when they are of `target` or a subclass of it.
    /// Classes match the other way round: `target <= class`.
    pub fn type_matches<'a>(&self, target: ClassId, candidate: impl Into<Candidate<'a>>) -> bool {
        match candidate.into() {
            Candidate::Class(class) => self.is_subtype_of(target, class),
            Candidate::Instance(resource) => self.is_subtype_of(resource.class(), target),
        }
    }

    /// A reusable matcher for one target class
    pub fn matcher(&self, target: ClassId) -> ClassMatcher<'_> {
        ClassMatcher {
            registry: self,
            target,
        }
    }
}

/// Matches candidates against a fixed target class
#[derive(Debug, Clone, Copy)]
pub struct ClassMatcher<'r> {
    registry: &'r Registry,
    target: ClassId,
}

impl ClassMatcher<'_> {
    pub fn target(&self) -> ClassId {
        self.target
    }

    pub fn matches<'a>(&self, candidate: impl Into<Candidate<'a>>) -> bool {
        self.registry.type_matches(self.target, candidate)
    }
}
