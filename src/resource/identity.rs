//! Equality, hashing and ordering of resources
//!
//! Two resources are equal when they share a concrete class and a URI. The
//! graph, the record state and the buffered triples are not part of identity.
//!
//! Ordering compares URI strings only. It is a total order among resources of
//! one class; across classes the comparison still runs but means nothing, and
//! two unequal resources of different classes can compare as `Equal`. For
//! that reason `Resource` implements `Eq` and `Hash` but not `Ord`; sort with
//! `resources.sort_by(Resource::cmp_uri)`.

use super::instance::Resource;
use super::types::ResourceIdentity;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

impl Resource {
    /// The (class, URI string) pair identity is defined by
    pub fn identity(&self) -> ResourceIdentity {
        ResourceIdentity {
            class: self.class,
            uri: self.uri.as_str().to_string(),
        }
    }

    /// Lexicographic comparison of the URI strings
    pub fn cmp_uri(&self, other: &Resource) -> Ordering {
        self.uri.as_str().cmp(other.uri.as_str())
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.uri.as_str() == other.uri.as_str()
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        self.uri.as_str().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, NamedNode};
    use crate::resource::types::ClassId;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn resource(class: usize, uri: &str) -> Resource {
        Resource::allocate(ClassId::from_index(class), NamedNode::new(uri).unwrap())
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_same_class_same_uri_is_equal() {
        let a = resource(0, "http://swirrl.com/ric.rdf#me");
        let mut b = resource(0, "http://swirrl.com/ric.rdf#me");
        b.set_literal(
            &NamedNode::new("http://xmlns.com/foaf/0.1/name").unwrap(),
            Literal::new_simple_literal("Ric"),
        );
        b.mark_persisted();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.cmp_uri(&b), Ordering::Equal);
    }

    #[test]
    fn test_different_class_is_never_equal() {
        let a = resource(0, "http://swirrl.com/ric.rdf#me");
        let b = resource(1, "http://swirrl.com/ric.rdf#me");

        assert_ne!(a, b);
        assert_ne!(a.identity(), b.identity());
        // the URI-only ordering cannot tell them apart
        assert_eq!(a.cmp_uri(&b), Ordering::Equal);
    }

    #[test]
    fn test_hash_matches_identity_hash() {
        let r = resource(2, "http://example.org/id/7");
        assert_eq!(hash_of(&r), hash_of(&r.identity()));
    }

    #[test]
    fn test_hash_set_dedups_by_identity() {
        let mut set = HashSet::new();
        set.insert(resource(0, "http://example.org/a"));
        set.insert(resource(0, "http://example.org/a"));
        set.insert(resource(1, "http://example.org/a"));
        set.insert(resource(0, "http://example.org/b"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_sort_by_uri() {
        let mut resources = vec![
            resource(0, "http://example.org/c"),
            resource(0, "http://example.org/a"),
            resource(0, "http://example.org/b"),
        ];
        resources.sort_by(Resource::cmp_uri);

        let uris: Vec<&str> = resources.iter().map(|r| r.uri().as_str()).collect();
        assert_eq!(
            uris,
            vec!["http://example.org/a", "http://example.org/b", "http://example.org/c"]
        );
    }
}
