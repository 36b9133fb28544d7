//! Around-initialize hook chain and resource construction
//!
//! Construction validates the URI, allocates an empty triple buffer and then
//! runs the class's hook chain. Every hook wraps everything after it: it may
//! do work before calling [`Next::run`], after it, or both. The innermost
//! step resolves the graph and writes the class rdf:type.
//!
//! Construction is all-or-nothing. The first error from a hook or from the
//! core step is returned unchanged and the half-built resource is dropped.

use super::error::{ResourceError, ResourceResult};
use super::instance::Resource;
use super::options::ConstructOptions;
use super::registry::{Registry, ResourceClass};
use super::types::ClassId;
use crate::rdf::NamedNode;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A step wrapped around resource initialization
pub trait InitHook: Send + Sync {
    /// Human-readable name for this hook
    fn name(&self) -> &str;

    /// Run this hook. Call `next.run(resource)` exactly once to continue the
    /// chain; returning an error aborts construction.
    fn around(&self, resource: &mut Resource, next: Next<'_>) -> ResourceResult<()>;
}

/// Hook built from a closure, see [`hook_fn`]
pub struct FnHook<F> {
    name: String,
    f: F,
}

impl<F> InitHook for FnHook<F>
where
    F: Fn(&mut Resource, Next<'_>) -> ResourceResult<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn around(&self, resource: &mut Resource, next: Next<'_>) -> ResourceResult<()> {
        (self.f)(resource, next)
    }
}

/// Build a hook from a closure
///
/// ```rust
/// use graphbound::{hook_fn, ConstructOptions, Literal, NamedNode, RegistryBuilder};
///
/// let name = NamedNode::new("http://xmlns.com/foaf/0.1/name").unwrap();
///
/// let mut builder = RegistryBuilder::new();
/// let person = builder.define("Person", None).unwrap();
/// builder
///     .around_initialize(
///         person,
///         hook_fn("default-name", move |resource, next| {
///             resource.set_literal(&name, Literal::new_simple_literal("Anonymous"));
///             next.run(resource)
///         }),
///     )
///     .unwrap();
///
/// let registry = builder.build().unwrap();
/// let r = registry
///     .construct(person, Some("http://example.org/id/1"), ConstructOptions::default())
///     .unwrap();
/// assert_eq!(r.repository().len(), 1);
/// ```
pub fn hook_fn<F>(name: impl Into<String>, f: F) -> FnHook<F>
where
    F: Fn(&mut Resource, Next<'_>) -> ResourceResult<()> + Send + Sync,
{
    FnHook {
        name: name.into(),
        f,
    }
}

/// Tracks how far a chain got
struct Progress {
    entered: Cell<usize>,
    core_ran: Cell<bool>,
    /// Innermost failure, kept in case an outer hook discards it
    first_error: RefCell<Option<ResourceError>>,
}

impl Progress {
    fn new() -> Self {
        Self {
            entered: Cell::new(0),
            core_ran: Cell::new(false),
            first_error: RefCell::new(None),
        }
    }

    fn record(&self, result: ResourceResult<()>) -> ResourceResult<()> {
        if let Err(e) = &result {
            let mut first = self.first_error.borrow_mut();
            if first.is_none() {
                *first = Some(e.clone());
            }
        }
        result
    }
}

/// The rest of the hook chain, handed to each hook
pub struct Next<'a> {
    chain: &'a [Arc<dyn InitHook>],
    position: usize,
    core: &'a CoreStep<'a>,
    progress: &'a Progress,
}

impl<'a> Next<'a> {
    /// Run the remaining hooks and the core step
    pub fn run(self, resource: &mut Resource) -> ResourceResult<()> {
        let chain = self.chain;
        match chain.get(self.position) {
            Some(hook) => {
                self.progress.entered.set(self.position + 1);
                trace!(hook = hook.name(), depth = self.position, "Entering initialization hook");
                let progress = self.progress;
                let next = Next {
                    position: self.position + 1,
                    ..self
                };
                progress.record(hook.around(resource, next))
            }
            None => {
                self.progress.record(self.core.run(resource))?;
                self.progress.core_ran.set(true);
                Ok(())
            }
        }
    }

    /// Number of hooks still to run before the core step
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.position)
    }
}

/// Graph resolution and rdf:type assignment
struct CoreStep<'a> {
    registry: &'a Registry,
    class: ClassId,
    class_name: &'a str,
    options: &'a ConstructOptions,
}

impl CoreStep<'_> {
    fn run(&self, resource: &mut Resource) -> ResourceResult<()> {
        resource.graph_uri = match self.resolve_graph() {
            Some(graph) => Some(NamedNode::new(graph).map_err(ResourceError::invalid_graph_uri)?),
            None => None,
        };

        if let Some(rdf_type) = self.registry.rdf_type(self.class) {
            resource
                .repository
                .assign_type(&resource.uri, rdf_type)
                .map_err(|e| ResourceError::InvalidRdfType {
                    class: self.class_name.to_string(),
                    rdf_type: rdf_type.to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    fn resolve_graph(&self) -> Option<&str> {
        if self.options.ignore_graph {
            return None;
        }
        self.options
            .graph_uri
            .as_deref()
            .or_else(|| self.registry.default_graph(self.class))
    }
}

impl Registry {
    /// Construct a resource of `class` identified by `uri`.
    ///
    /// Fails with [`ResourceError::UriMissing`] when `uri` is `None` and
    /// [`ResourceError::InvalidUri`] when it is not an absolute IRI. A
    /// resource with no resolvable graph is still constructed; the missing
    /// graph is reported by validation.
    pub fn construct(
        &self,
        class: ClassId,
        uri: Option<&str>,
        options: impl Into<ConstructOptions>,
    ) -> ResourceResult<Resource> {
        let options = options.into();
        let entry = self
            .entry(class)
            .ok_or_else(|| ResourceError::UnknownClass(class.to_string()))?;

        let result = self.initialize(class, &entry.name, uri, &options);
        match &result {
            Ok(resource) => debug!(
                class = %entry.name,
                uri = resource.uri().as_str(),
                graph = resource.graph_uri().map(|g| g.as_str()),
                "Constructed resource"
            ),
            Err(e) => warn!(class = %entry.name, uri, "Resource construction failed: {}", e),
        }
        result
    }

    /// [`construct`](Self::construct) with the class looked up by name
    pub fn construct_named(
        &self,
        class: &str,
        uri: Option<&str>,
        options: impl Into<ConstructOptions>,
    ) -> ResourceResult<Resource> {
        let id = self
            .class_id(class)
            .ok_or_else(|| ResourceError::UnknownClass(class.to_string()))?;
        self.construct(id, uri, options)
    }

    /// [`construct`](Self::construct) for a statically declared class
    pub fn construct_as<T: ResourceClass>(
        &self,
        uri: Option<&str>,
        options: impl Into<ConstructOptions>,
    ) -> ResourceResult<Resource> {
        self.construct_named(T::NAME, uri, options)
    }

    fn initialize(
        &self,
        class: ClassId,
        class_name: &str,
        uri: Option<&str>,
        options: &ConstructOptions,
    ) -> ResourceResult<Resource> {
        let uri = uri.ok_or(ResourceError::UriMissing)?;
        let uri = NamedNode::new(uri).map_err(ResourceError::invalid_uri)?;
        let mut resource = Resource::allocate(class, uri);

        let chain = self.entry(class).map_or(&[][..], |e| e.chain.as_slice());
        let core = CoreStep {
            registry: self,
            class,
            class_name,
            options,
        };
        let progress = Progress::new();

        Next {
            chain,
            position: 0,
            core: &core,
            progress: &progress,
        }
        .run(&mut resource)?;

        if let Some(e) = progress.first_error.take() {
            return Err(e);
        }
        if !progress.core_ran.get() {
            let halted = progress.entered.get().saturating_sub(1);
            return Err(ResourceError::InitializationHalted {
                hook: chain
                    .get(halted)
                    .map(|h| h.name().to_string())
                    .unwrap_or_default(),
            });
        }

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;
    use crate::resource::registry::RegistryBuilder;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn logging_hook(name: &'static str, log: &Log) -> impl InitHook {
        let log = Arc::clone(log);
        hook_fn(name, move |resource, next| {
            log.lock().unwrap().push(format!("{} before", name));
            next.run(resource)?;
            log.lock().unwrap().push(format!("{} after", name));
            Ok(())
        })
    }

    fn person_builder() -> (RegistryBuilder, ClassId) {
        let mut builder = RegistryBuilder::new();
        let person = builder.define("Person", None).unwrap();
        builder
            .set_default_graph(person, "http://swirrl.com/graph/people")
            .unwrap();
        builder.set_rdf_type(person, "foaf:Person").unwrap();
        (builder, person)
    }

    const RIC: &str = "http://swirrl.com/ric.rdf#me";

    #[test]
    fn test_construct_with_class_defaults() {
        let (builder, person) = person_builder();
        let registry = builder.build().unwrap();

        let r = registry.construct(person, Some(RIC), ConstructOptions::default()).unwrap();
        assert_eq!(r.uri().as_str(), RIC);
        assert_eq!(r.graph_uri().map(|g| g.as_str()), Some("http://swirrl.com/graph/people"));
        assert!(r.is_new_record());
        assert_eq!(r.key(), None);

        let types = r.rdf_types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].as_str(), "http://xmlns.com/foaf/0.1/Person");
    }

    #[test]
    fn test_explicit_graph_overrides_default() {
        let (builder, person) = person_builder();
        let registry = builder.build().unwrap();

        let r = registry.construct(person, Some(RIC), "http://other/graph").unwrap();
        assert_eq!(r.graph_uri().map(|g| g.as_str()), Some("http://other/graph"));
    }

    #[test]
    fn test_ignore_graph_leaves_graph_unset() {
        let (builder, person) = person_builder();
        let registry = builder.build().unwrap();

        let options = ConstructOptions {
            graph_uri: Some("http://other/graph".to_string()),
            ignore_graph: true,
        };
        let r = registry.construct(person, Some(RIC), options).unwrap();
        assert!(r.graph_uri().is_none());
        // rdf:type still assigned
        assert_eq!(r.rdf_types().len(), 1);
    }

    #[test]
    fn test_no_graph_anywhere_is_allowed() {
        let mut builder = RegistryBuilder::new();
        let thing = builder.define("Thing", None).unwrap();
        let registry = builder.build().unwrap();

        let r = registry.construct(thing, Some(RIC), ConstructOptions::new()).unwrap();
        assert!(r.graph_uri().is_none());
        assert!(r.repository().is_empty());
    }

    #[test]
    fn test_missing_and_invalid_uri() {
        let (builder, person) = person_builder();
        let registry = builder.build().unwrap();

        assert_eq!(
            registry.construct(person, None, ConstructOptions::new()).unwrap_err(),
            ResourceError::UriMissing
        );
        match registry.construct(person, Some("ric.rdf#me"), ConstructOptions::new()) {
            Err(ResourceError::InvalidUri { uri, .. }) => assert_eq!(uri, "ric.rdf#me"),
            other => panic!("expected InvalidUri, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_default_graph_fails_at_resolution() {
        let mut builder = RegistryBuilder::new();
        let thing = builder.define("Thing", None).unwrap();
        builder.set_default_graph(thing, "not a graph").unwrap();
        let registry = builder.build().unwrap();

        match registry.construct(thing, Some(RIC), ConstructOptions::new()) {
            Err(ResourceError::InvalidGraphUri { uri, .. }) => assert_eq!(uri, "not a graph"),
            other => panic!("expected InvalidGraphUri, got {:?}", other),
        }
        // an explicit valid graph never touches the bad default
        assert!(registry.construct(thing, Some(RIC), "http://example.org/g").is_ok());
    }

    #[test]
    fn test_invalid_rdf_type() {
        let mut builder = RegistryBuilder::new();
        let thing = builder.define("Thing", None).unwrap();
        builder.set_rdf_type(thing, "Thing").unwrap();
        let registry = builder.build().unwrap();

        match registry.construct(thing, Some(RIC), ConstructOptions::new()) {
            Err(ResourceError::InvalidRdfType { class, rdf_type, .. }) => {
                assert_eq!(class, "Thing");
                assert_eq!(rdf_type, "Thing");
            }
            other => panic!("expected InvalidRdfType, got {:?}", other),
        }
    }

    #[test]
    fn test_hooks_nest_outermost_first() {
        let log: Log = Arc::default();
        let (mut builder, person) = person_builder();
        let employee = builder.define("Employee", Some("Person")).unwrap();
        builder.around_initialize(person, logging_hook("outer", &log)).unwrap();
        builder.around_initialize(employee, logging_hook("inner", &log)).unwrap();
        let registry = builder.build().unwrap();

        registry.construct(employee, Some(RIC), ConstructOptions::new()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
    }

    #[test]
    fn test_hook_sees_graph_only_after_next() {
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
        let (mut builder, person) = person_builder();
        let record = Arc::clone(&seen);
        builder
            .around_initialize(
                person,
                hook_fn("observer", move |resource, next| {
                    let graph = |r: &Resource| r.graph_uri().map(|g| g.as_str().to_string());
                    record.lock().unwrap().push(graph(&*resource));
                    next.run(resource)?;
                    record.lock().unwrap().push(graph(&*resource));
                    Ok(())
                }),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("http://swirrl.com/graph/people".to_string())]
        );
    }

    #[test]
    fn test_hook_can_seed_default_attributes() {
        let name = NamedNode::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let (mut builder, person) = person_builder();
        let predicate = name.clone();
        builder
            .around_initialize(
                person,
                hook_fn("default-name", move |resource, next| {
                    resource.set_literal(&predicate, Literal::new_simple_literal("Anonymous"));
                    next.run(resource)
                }),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        let r = registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap();
        assert_eq!(r.read_predicate(&name).len(), 1);
        assert_eq!(r.repository().len(), 2);
    }

    #[test]
    fn test_failing_hook_aborts_and_skips_inner_steps() {
        let log: Log = Arc::default();
        let (mut builder, person) = person_builder();
        builder.around_initialize(person, logging_hook("outer", &log)).unwrap();
        builder
            .around_initialize(
                person,
                hook_fn("reject", |_resource, _next| {
                    Err(ResourceError::hook("reject", "not today"))
                }),
            )
            .unwrap();
        builder.around_initialize(person, logging_hook("inner", &log)).unwrap();
        let registry = builder.build().unwrap();

        let err = registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap_err();
        assert_eq!(err, ResourceError::hook("reject", "not today"));
        // outer never reaches its after-half, inner never starts
        assert_eq!(*log.lock().unwrap(), vec!["outer before"]);
    }

    #[test]
    fn test_failure_after_next_still_aborts() {
        let (mut builder, person) = person_builder();
        builder
            .around_initialize(
                person,
                hook_fn("post-check", |resource, next| {
                    next.run(resource)?;
                    Err(ResourceError::hook("post-check", "rejected after core"))
                }),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        assert!(matches!(
            registry.construct(person, Some(RIC), ConstructOptions::new()),
            Err(ResourceError::Hook { .. })
        ));
    }

    #[test]
    fn test_core_errors_pass_through_hooks_unchanged() {
        let mut builder = RegistryBuilder::new();
        let thing = builder.define("Thing", None).unwrap();
        builder.set_default_graph(thing, "bad graph").unwrap();
        builder
            .around_initialize(thing, hook_fn("passthrough", |r, next| next.run(r)))
            .unwrap();
        let registry = builder.build().unwrap();

        assert!(matches!(
            registry.construct(thing, Some(RIC), ConstructOptions::new()),
            Err(ResourceError::InvalidGraphUri { .. })
        ));
    }

    #[test]
    fn test_hook_that_skips_next_halts_construction() {
        let (mut builder, person) = person_builder();
        builder
            .around_initialize(person, hook_fn("outer", |r, next| next.run(r)))
            .unwrap();
        builder
            .around_initialize(person, hook_fn("lazy", |_r, _next| Ok(())))
            .unwrap();
        let registry = builder.build().unwrap();

        assert_eq!(
            registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap_err(),
            ResourceError::InitializationHalted {
                hook: "lazy".to_string()
            }
        );
    }

    #[test]
    fn test_discarded_inner_error_still_fails_construction() {
        let (mut builder, person) = person_builder();
        builder
            .around_initialize(
                person,
                hook_fn("careless", |r, next| {
                    let _ = next.run(r);
                    Ok(())
                }),
            )
            .unwrap();
        builder
            .around_initialize(
                person,
                hook_fn("inner", |_r, _next| Err(ResourceError::hook("inner", "boom"))),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        assert_eq!(
            registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap_err(),
            ResourceError::hook("inner", "boom")
        );
    }

    #[test]
    fn test_discarded_core_error_still_fails_construction() {
        let (mut builder, person) = person_builder();
        builder
            .around_initialize(
                person,
                hook_fn("careless", |r, next| {
                    let _ = next.run(r);
                    Ok(())
                }),
            )
            .unwrap();
        let registry = builder.build().unwrap();

        assert!(matches!(
            registry.construct(person, Some(RIC), "not a graph"),
            Err(ResourceError::InvalidGraphUri { .. })
        ));
    }

    #[test]
    fn test_next_remaining() {
        let counts: Arc<Mutex<Vec<usize>>> = Arc::default();
        let (mut builder, person) = person_builder();
        for name in ["a", "b"] {
            let counts = Arc::clone(&counts);
            builder
                .around_initialize(
                    person,
                    hook_fn(name, move |r, next| {
                        counts.lock().unwrap().push(next.remaining());
                        next.run(r)
                    }),
                )
                .unwrap();
        }
        let registry = builder.build().unwrap();

        registry.construct(person, Some(RIC), ConstructOptions::new()).unwrap();
        assert_eq!(*counts.lock().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_construct_named_unknown_class() {
        let (builder, _) = person_builder();
        let registry = builder.build().unwrap();

        assert_eq!(
            registry.construct_named("Robot", Some(RIC), ConstructOptions::new()).unwrap_err(),
            ResourceError::UnknownClass("Robot".to_string())
        );
        assert!(registry.construct_named("Person", Some(RIC), ConstructOptions::new()).is_ok());
    }

    #[test]
    fn test_concurrent_construction() {
        let (builder, person) = person_builder();
        let registry = builder.build().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let uri = format!("http://example.org/id/{}", i);
                    registry
                        .construct(person, Some(uri.as_str()), ConstructOptions::new())
                        .map(|r| r.graph_uri().map(|g| g.as_str().to_string()))
                })
            })
            .collect();

        for handle in handles {
            let graph = handle.join().unwrap().unwrap();
            assert_eq!(graph.as_deref(), Some("http://swirrl.com/graph/people"));
        }
    }
}
