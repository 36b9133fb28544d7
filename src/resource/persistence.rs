//! Record state and the storage key handed to persistence collaborators
//!
//! This crate does not save or load anything. Whatever does owns the
//! new → persisted/destroyed transitions, either by calling
//! [`Resource::mark_persisted`]/[`Resource::mark_destroyed`] or by answering
//! [`PersistenceStatus`] from its own bookkeeping.

use super::instance::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a resource is in its persistence lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Not yet confirmed persisted or destroyed
    #[default]
    New,
    Persisted,
    Destroyed,
}

/// Persisted/destroyed predicates supplied by a persistence collaborator
pub trait PersistenceStatus {
    fn persisted(&self, resource: &Resource) -> bool;
    fn destroyed(&self, resource: &Resource) -> bool;
}

impl<T: PersistenceStatus + ?Sized> PersistenceStatus for &T {
    fn persisted(&self, resource: &Resource) -> bool {
        (**self).persisted(resource)
    }

    fn destroyed(&self, resource: &Resource) -> bool {
        (**self).destroyed(resource)
    }
}

/// Answers from the record state carried on the resource itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackedState;

impl PersistenceStatus for TrackedState {
    fn persisted(&self, resource: &Resource) -> bool {
        resource.state == RecordState::Persisted
    }

    fn destroyed(&self, resource: &Resource) -> bool {
        resource.state == RecordState::Destroyed
    }
}

impl Resource {
    pub fn record_state(&self) -> RecordState {
        self.state
    }

    pub fn is_new_record(&self) -> bool {
        self.state == RecordState::New
    }

    pub fn persisted(&self) -> bool {
        TrackedState.persisted(self)
    }

    pub fn destroyed(&self) -> bool {
        TrackedState.destroyed(self)
    }

    /// Called by a persistence collaborator once a save is confirmed
    pub fn mark_persisted(&mut self) {
        debug!("Resource {} marked persisted", self.uri);
        self.state = RecordState::Persisted;
    }

    /// Called by a persistence collaborator once a destroy is confirmed
    pub fn mark_destroyed(&mut self) {
        debug!("Resource {} marked destroyed", self.uri);
        self.state = RecordState::Destroyed;
    }

    /// Storage key: `Some([uri])` once persisted or destroyed, else `None`
    pub fn key(&self) -> Option<Vec<String>> {
        self.key_with(&TrackedState)
    }

    /// Storage key evaluated against an external persistence status.
    /// Re-evaluated on every call.
    pub fn key_with(&self, status: &impl PersistenceStatus) -> Option<Vec<String>> {
        if status.persisted(self) || status.destroyed(self) {
            Some(vec![self.uri.as_str().to_string()])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::NamedNode;
    use crate::resource::types::ClassId;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn resource(uri: &str) -> Resource {
        Resource::allocate(ClassId::from_index(0), NamedNode::new(uri).unwrap())
    }

    /// Collaborator that tracks saved URIs on its own
    #[derive(Default)]
    struct SavedUris(RefCell<HashSet<String>>);

    impl PersistenceStatus for SavedUris {
        fn persisted(&self, resource: &Resource) -> bool {
            self.0.borrow().contains(resource.uri().as_str())
        }

        fn destroyed(&self, _resource: &Resource) -> bool {
            false
        }
    }

    #[test]
    fn test_new_record_has_no_key() {
        let r = resource("http://swirrl.com/ric.rdf#me");
        assert!(r.is_new_record());
        assert!(!r.persisted());
        assert!(!r.destroyed());
        assert_eq!(r.key(), None);
    }

    #[test]
    fn test_key_after_persist_and_destroy() {
        let mut r = resource("http://swirrl.com/ric.rdf#me");

        r.mark_persisted();
        assert!(!r.is_new_record());
        assert_eq!(r.key(), Some(vec!["http://swirrl.com/ric.rdf#me".to_string()]));

        r.mark_destroyed();
        assert!(r.destroyed());
        assert_eq!(r.key(), Some(vec!["http://swirrl.com/ric.rdf#me".to_string()]));
    }

    #[test]
    fn test_key_reflects_external_status_on_every_call() {
        let r = resource("http://example.org/id/1");
        let saved = SavedUris::default();

        assert_eq!(r.key_with(&saved), None);
        saved.0.borrow_mut().insert("http://example.org/id/1".to_string());
        assert_eq!(r.key_with(&saved), Some(vec!["http://example.org/id/1".to_string()]));
        saved.0.borrow_mut().clear();
        assert_eq!(r.key_with(&saved), None);

        // the resource's own flag is untouched by the collaborator
        assert!(r.is_new_record());
    }

    #[test]
    fn test_record_state_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&RecordState::Persisted).unwrap(), "\"persisted\"");
        assert_eq!(RecordState::default(), RecordState::New);
    }
}
