//! Per-construction options

use serde::{Deserialize, Serialize};

/// Options accepted by [`Registry::construct`](super::Registry::construct)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructOptions {
    /// Explicit graph, overriding the class default
    pub graph_uri: Option<String>,

    /// Leave the graph unresolved, ignoring both the option and the class default
    pub ignore_graph: bool,
}

impl ConstructOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(graph_uri: impl Into<String>) -> Self {
        Self {
            graph_uri: Some(graph_uri.into()),
            ignore_graph: false,
        }
    }

    pub fn ignoring_graph() -> Self {
        Self {
            graph_uri: None,
            ignore_graph: true,
        }
    }
}

/// A bare string is taken as the graph URI
impl From<&str> for ConstructOptions {
    fn from(graph_uri: &str) -> Self {
        Self::with_graph(graph_uri)
    }
}

impl From<String> for ConstructOptions {
    fn from(graph_uri: String) -> Self {
        Self::with_graph(graph_uri)
    }
}

impl From<Option<&str>> for ConstructOptions {
    fn from(graph_uri: Option<&str>) -> Self {
        Self {
            graph_uri: graph_uri.map(str::to_string),
            ignore_graph: false,
        }
    }
}
