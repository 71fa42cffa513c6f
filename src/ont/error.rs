//! Errors of the ontology object model

use crate::rdf::{PrefixError, RdfError, RdfObject, ReasoningError, TriplePattern};
use thiserror::Error;

/// Errors that can occur in view, statement, list and hierarchy operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OntError {
    /// A caller-supplied value does not fit the operation
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The graph violates an invariant the operation relies on
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Not valid for this kind or under the active profile
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// A required lookup came back empty
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type OntResult<T> = Result<T, OntError>;

impl OntError {
    /// `IllegalState` naming the node and the pattern that failed to match
    pub fn malformed(node: &RdfObject, pattern: &TriplePattern) -> Self {
        OntError::IllegalState(format!("{} has no triple matching {}", node, pattern))
    }

    /// `NotFound` naming the node and the pattern that failed to match
    pub fn missing(node: &RdfObject, pattern: &TriplePattern) -> Self {
        OntError::NotFound(format!("no triple {} for {}", pattern, node))
    }
}

impl From<RdfError> for OntError {
    fn from(e: RdfError) -> Self {
        OntError::IllegalArgument(e.to_string())
    }
}

impl From<PrefixError> for OntError {
    fn from(e: PrefixError) -> Self {
        OntError::IllegalArgument(e.to_string())
    }
}

impl From<ReasoningError> for OntError {
    fn from(e: ReasoningError) -> Self {
        OntError::IllegalState(e.to_string())
    }
}
