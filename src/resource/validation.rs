//! Presence and URL-format checks run before a resource is persisted
//!
//! Construction allows a resource without a graph; persisting one is what
//! fails, and it fails here with [`ValidationError::GraphMissing`].

use super::instance::Resource;
use oxiri::Iri;
use std::fmt;
use thiserror::Error;

/// Single validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The resource has no graph to be written into
    #[error("graph_uri can't be blank")]
    GraphMissing,

    /// A field is not URL-shaped
    #[error("{field} is not a valid URL ({value:?}): {reason}")]
    InvalidFormat {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Every failure found on one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: ")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub type ValidationResult = Result<(), ValidationErrors>;

/// URL-shape check
pub trait UrlValidator {
    fn validate_url(&self, value: &str) -> Result<(), String>;
}

/// Accepts absolute IRIs, optionally only with certain schemes
#[derive(Debug, Clone, Default)]
pub struct IriValidator {
    schemes: Option<Vec<String>>,
}

impl IriValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schemes<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: Some(schemes.into_iter().map(Into::into).collect()),
        }
    }
}

impl UrlValidator for IriValidator {
    fn validate_url(&self, value: &str) -> Result<(), String> {
        let iri = Iri::parse(value).map_err(|e| e.to_string())?;
        if let Some(schemes) = &self.schemes {
            let scheme = iri.scheme();
            if !schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                return Err(format!("scheme {:?} is not allowed", scheme));
            }
        }
        Ok(())
    }
}

/// Runs the presence and format checks against a resource
#[derive(Debug, Clone, Default)]
pub struct ResourceValidator<V = IriValidator> {
    url: V,
}

impl ResourceValidator<IriValidator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: UrlValidator> ResourceValidator<V> {
    pub fn with_url_validator(url: V) -> Self {
        Self { url }
    }

    /// Collect every failure, not just the first
    pub fn validate(&self, resource: &Resource) -> ValidationResult {
        let mut errors = Vec::new();

        self.check_format("uri", resource.uri().as_str(), &mut errors);
        match resource.graph_uri() {
            Some(graph) => self.check_format("graph_uri", graph.as_str(), &mut errors),
            None => errors.push(ValidationError::GraphMissing),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    fn check_format(&self, field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
        if let Err(reason) = self.url.validate_url(value) {
            errors.push(ValidationError::InvalidFormat {
                field,
                value: value.to_string(),
                reason,
            });
        }
    }
}
