//! Declarative class registration
//!
//! Classes, their parents, default graphs and rdf:types can be listed in a
//! YAML or JSON document and applied to a [`RegistryBuilder`]:
//!
//! ```yaml
//! prefixes:
//!   ex: "http://example.org/def/"
//! classes:
//!   - name: Person
//!     default_graph: "http://swirrl.com/graph/people"
//!     rdf_type: "foaf:Person"
//!   - name: Employee
//!     parent: Person
//! ```
//!
//! Classes are applied in document order, so a parent has to be listed
//! before its children. Hooks are code and are attached to the builder
//! after the configuration has been applied.

use crate::resource::{Registry, RegistryBuilder, RegistryError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is not one of yaml, yml or json
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One class entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_graph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdf_type: Option<String>,
}

/// A full registration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Extra namespace prefixes for compact rdf:types
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,
    #[serde(default)]
    pub classes: Vec<ClassConfig>,
}

impl RegistryConfig {
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a config file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let input = match extension.as_str() {
            "yaml" | "yml" | "json" => std::fs::read_to_string(path)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        let config = if extension == "json" {
            Self::from_json_str(&input)?
        } else {
            Self::from_yaml_str(&input)?
        };
        info!(
            "Loaded registry config from {:?} ({} classes)",
            path,
            config.classes.len()
        );
        Ok(config)
    }

    /// Define every class on the builder
    pub fn apply(&self, builder: &mut RegistryBuilder) -> ConfigResult<()> {
        for (prefix, iri) in &self.prefixes {
            builder.namespaces_mut().add_prefix(prefix.clone(), iri.clone());
        }

        for class in &self.classes {
            let id = builder.define(&class.name, class.parent.as_deref())?;
            let definition = builder.class_mut(id)?;
            if let Some(graph) = &class.default_graph {
                definition.set_default_graph(graph.clone());
            }
            if let Some(rdf_type) = &class.rdf_type {
                definition.set_rdf_type(rdf_type.clone());
            }
        }

        Ok(())
    }

    /// Apply to a fresh builder and freeze it
    pub fn into_registry(self) -> ConfigResult<Registry> {
        let mut builder = RegistryBuilder::new();
        self.apply(&mut builder)?;
        Ok(builder.build()?)
    }
}
