//! Error definitions and query types shared by the registry and its surfaces.

use thiserror::Error;

/// Outcomes of registry operations that callers must handle as failures.
///
/// A lookup that matches nothing is not represented here; it is an `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A record with the same make and model is already registered.
    #[error("a car with this make and model is already registered")]
    Conflict,
    /// A lookup supplied neither a make nor a model.
    #[error("at least one of make or model must be provided")]
    InvalidQuery,
    /// A registration payload could not be parsed into a record.
    #[error("malformed car payload: {0}")]
    MalformedInput(String),
}

/// Normalized lookup filters.
///
/// Terms are trimmed on construction and blank terms are dropped, so at least one of
/// `make`/`model` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    make: Option<String>,
    model: Option<String>,
}

impl LookupQuery {
    /// Normalize raw query terms, rejecting queries with no usable filter.
    pub fn new(make: Option<&str>, model: Option<&str>) -> Result<Self, RegistryError> {
        let make = normalize_term(make);
        let model = normalize_term(model);
        if make.is_none() && model.is_none() {
            return Err(RegistryError::InvalidQuery);
        }
        Ok(Self { make, model })
    }

    /// Trimmed make filter, if one was supplied.
    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    /// Trimmed model filter, if one was supplied.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Whether `make`/`model` as stored satisfy every supplied filter.
    pub fn matches(&self, make: Option<&str>, model: Option<&str>) -> bool {
        term_matches(self.make.as_deref(), make) && term_matches(self.model.as_deref(), model)
    }
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn term_matches(filter: Option<&str>, stored: Option<&str>) -> bool {
    match filter {
        Some(expected) => stored == Some(expected),
        None => true,
    }
}
