//! Class registry: default graphs, rdf:types, hierarchy and hook chains
//!
//! Classes are declared on a [`RegistryBuilder`] during startup and frozen
//! into an immutable [`Registry`]. The frozen registry is what resources are
//! constructed from, so class-level configuration cannot change while
//! instances are being built.

use super::pipeline::InitHook;
use super::types::ClassId;
use crate::rdf::{NamespaceManager, PrefixError};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A class with this name is already defined
    #[error("Class already defined: {0}")]
    DuplicateClass(String),

    /// The parent class has not been defined (yet)
    #[error("Unknown parent class {parent} for {class}")]
    UnknownParent { class: String, parent: String },

    /// The class id or name is not known to this registry
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Every class id is taken
    #[error("Too many classes defined")]
    TooManyClasses,

    /// A compact rdf:type uses a prefix nobody bound
    #[error("Unknown prefix {prefix} in rdf:type of {class}")]
    UnknownPrefix { class: String, prefix: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A statically declared resource class.
///
/// ```rust
/// use graphbound::{ClassDefinition, ConstructOptions, RegistryBuilder, ResourceClass};
///
/// struct Person;
///
/// impl ResourceClass for Person {
///     const NAME: &'static str = "Person";
///
///     fn define(class: &mut ClassDefinition) {
///         class.set_default_graph("http://swirrl.com/graph/people");
///         class.set_rdf_type("foaf:Person");
///     }
/// }
///
/// let mut builder = RegistryBuilder::new();
/// builder.register::<Person>().unwrap();
/// let registry = builder.build().unwrap();
///
/// let ric = registry
///     .construct_as::<Person>(Some("http://swirrl.com/ric.rdf#me"), ConstructOptions::default())
///     .unwrap();
/// assert_eq!(ric.graph_uri().unwrap().as_str(), "http://swirrl.com/graph/people");
/// ```
pub trait ResourceClass {
    const NAME: &'static str;
    const PARENT: Option<&'static str> = None;

    /// Class-level configuration applied at registration
    fn define(_class: &mut ClassDefinition) {}
}

/// Mutable class configuration, only reachable through a builder
pub struct ClassDefinition {
    name: String,
    parent: Option<ClassId>,
    default_graph: Option<String>,
    rdf_type: Option<String>,
    hooks: Vec<Arc<dyn InitHook>>,
}

impl ClassDefinition {
    fn new(name: String, parent: Option<ClassId>) -> Self {
        Self {
            name,
            parent,
            default_graph: None,
            rdf_type: None,
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Record the default graph. Not validated here; a bad value surfaces when
    /// an instance resolves its graph.
    pub fn set_default_graph(&mut self, graph_uri: impl Into<String>) -> &mut Self {
        self.default_graph = Some(graph_uri.into());
        self
    }

    /// Record the class rdf:type, absolute or `prefix:local`
    pub fn set_rdf_type(&mut self, rdf_type: impl Into<String>) -> &mut Self {
        self.rdf_type = Some(rdf_type.into());
        self
    }

    /// Append an around-initialize hook
    pub fn around_initialize(&mut self, hook: impl InitHook + 'static) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("default_graph", &self.default_graph)
            .field("rdf_type", &self.rdf_type)
            .field("hooks", &hook_names(&self.hooks))
            .finish()
    }
}

/// Registration phase for resource classes
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    classes: IndexMap<String, ClassDefinition>,
    namespaces: NamespaceManager,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
            namespaces: NamespaceManager::new(),
        }
    }

    /// Define a class. The parent, if any, must already be defined.
    pub fn define(&mut self, name: &str, parent: Option<&str>) -> RegistryResult<ClassId> {
        if self.classes.contains_key(name) {
            return Err(RegistryError::DuplicateClass(name.to_string()));
        }
        let id = ClassId::try_from_index(self.classes.len())
            .ok_or(RegistryError::TooManyClasses)?;

        let parent = match parent {
            Some(parent) => Some(
                self.classes
                    .get_index_of(parent)
                    .map(ClassId::from_index)
                    .ok_or_else(|| RegistryError::UnknownParent {
                        class: name.to_string(),
                        parent: parent.to_string(),
                    })?,
            ),
            None => None,
        };

        self.classes
            .insert(name.to_string(), ClassDefinition::new(name.to_string(), parent));
        debug!("Defined class {} (parent: {:?})", name, parent);

        Ok(id)
    }

    /// Define and configure a statically declared class
    pub fn register<T: ResourceClass>(&mut self) -> RegistryResult<ClassId> {
        let id = self.define(T::NAME, T::PARENT)?;
        T::define(self.class_mut(id)?);
        Ok(id)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.get_index_of(name).map(ClassId::from_index)
    }

    pub fn class_mut(&mut self, class: ClassId) -> RegistryResult<&mut ClassDefinition> {
        self.classes
            .get_index_mut(class.index())
            .map(|(_, def)| def)
            .ok_or_else(|| RegistryError::UnknownClass(class.to_string()))
    }

    /// Record the default graph for a class. Last write wins.
    pub fn set_default_graph(
        &mut self,
        class: ClassId,
        graph_uri: impl Into<String>,
    ) -> RegistryResult<()> {
        self.class_mut(class)?.set_default_graph(graph_uri);
        Ok(())
    }

    pub fn set_rdf_type(&mut self, class: ClassId, rdf_type: impl Into<String>) -> RegistryResult<()> {
        self.class_mut(class)?.set_rdf_type(rdf_type);
        Ok(())
    }

    pub fn around_initialize(
        &mut self,
        class: ClassId,
        hook: impl InitHook + 'static,
    ) -> RegistryResult<()> {
        self.class_mut(class)?.around_initialize(hook);
        Ok(())
    }

    /// Prefixes used to expand compact rdf:types at build time
    pub fn namespaces_mut(&mut self) -> &mut NamespaceManager {
        &mut self.namespaces
    }

    /// Freeze the registration phase.
    ///
    /// Compact rdf:types are expanded here; one with an unbound prefix fails
    /// the build with [`RegistryError::UnknownPrefix`].
    pub fn build(self) -> RegistryResult<Registry> {
        let mut entries: Vec<ClassEntry> = Vec::with_capacity(self.classes.len());
        let mut by_name = FxHashMap::default();

        for (index, (name, def)) in self.classes.into_iter().enumerate() {
            let id = ClassId::from_index(index);

            // parents always precede their children
            let (mut ancestors, mut chain) = match def.parent {
                Some(parent) => {
                    let parent = &entries[parent.index()];
                    (parent.ancestors.clone(), parent.chain.clone())
                }
                None => (Vec::new(), Vec::new()),
            };
            ancestors.insert(0, id);
            chain.extend(def.hooks);

            for ancestor in &ancestors {
                if let Some(entry) = entries.get_mut(ancestor.index()) {
                    entry.descendants.insert(id);
                }
            }
            let mut descendants = FxHashSet::default();
            descendants.insert(id);

            let rdf_type = match def.rdf_type {
                Some(rdf_type) => Some(self.namespaces.resolve(&rdf_type).map_err(|e| {
                    let (PrefixError::UnknownPrefix(prefix) | PrefixError::NotCompact(prefix)) = e;
                    RegistryError::UnknownPrefix {
                        class: name.clone(),
                        prefix,
                    }
                })?),
                None => None,
            };

            by_name.insert(name, id);
            entries.push(ClassEntry {
                name: def.name,
                parent: def.parent,
                ancestors,
                default_graph: def.default_graph,
                rdf_type,
                chain,
                descendants,
            });
        }

        info!("Built resource registry with {} classes", entries.len());

        Ok(Registry {
            inner: Arc::new(RegistryInner {
                classes: entries,
                by_name,
            }),
        })
    }
}

/// Frozen class configuration
pub(crate) struct ClassEntry {
    pub(crate) name: String,
    pub(crate) parent: Option<ClassId>,
    /// Self first, root last
    pub(crate) ancestors: Vec<ClassId>,
    pub(crate) default_graph: Option<String>,
    pub(crate) rdf_type: Option<String>,
    /// Effective hook chain, outermost first
    pub(crate) chain: Vec<Arc<dyn InitHook>>,
    /// Self plus every transitive subclass
    pub(crate) descendants: FxHashSet<ClassId>,
}

struct RegistryInner {
    classes: Vec<ClassEntry>,
    by_name: FxHashMap<String, ClassId>,
}

/// Immutable, shareable class registry
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    pub(crate) fn entry(&self, class: ClassId) -> Option<&ClassEntry> {
        self.inner.classes.get(class.index())
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.inner.by_name.get(name).copied()
    }

    pub fn class_name(&self, class: ClassId) -> Option<&str> {
        self.entry(class).map(|e| e.name.as_str())
    }

    pub fn parent(&self, class: ClassId) -> Option<ClassId> {
        self.entry(class).and_then(|e| e.parent)
    }

    /// The class followed by its ancestors, nearest first
    pub fn ancestors(&self, class: ClassId) -> &[ClassId] {
        match self.entry(class) {
            Some(entry) => &entry.ancestors,
            None => &[],
        }
    }

    /// Most specific default graph along the ancestor chain
    pub fn default_graph(&self, class: ClassId) -> Option<&str> {
        self.inherited(class, |e| e.default_graph.as_deref())
    }

    /// Most specific rdf:type along the ancestor chain, prefixes expanded
    pub fn rdf_type(&self, class: ClassId) -> Option<&str> {
        self.inherited(class, |e| e.rdf_type.as_deref())
    }

    /// Names of the hooks that wrap construction of this class, outermost first
    pub fn hook_names(&self, class: ClassId) -> Vec<&str> {
        self.entry(class).map_or_else(Vec::new, |e| hook_names(&e.chain))
    }

    pub fn len(&self) -> usize {
        self.inner.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.classes.is_empty()
    }

    fn inherited<'a>(
        &'a self,
        class: ClassId,
        field: impl Fn(&'a ClassEntry) -> Option<&'a str>,
    ) -> Option<&'a str> {
        self.ancestors(class)
            .iter()
            .filter_map(|id| self.entry(*id))
            .find_map(field)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inner.classes.iter().map(|e| e.name.as_str()).collect();
        f.debug_struct("Registry").field("classes", &names).finish()
    }
}

fn hook_names(hooks: &[Arc<dyn InitHook>]) -> Vec<&str> {
    hooks.iter().map(|h| h.name()).collect()
}
