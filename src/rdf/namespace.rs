//! Prefix tables
//!
//! A [`NamespaceManager`] is a plain value owned by the model that uses it.
//! Prefixes keep their registration order; compaction picks the longest
//! matching namespace so `ex:` and `ex-sub:` never shadow each other.

use super::types::{NamedNode, RdfObject};
use super::vocab::{OWL, RDF, RDFS, XSD};
use indexmap::IndexMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not of the form `prefix:local`
    #[error("Not a compact IRI: {0}")]
    NotCompact(String),

    /// Prefix name with characters outside the Turtle PN_PREFIX subset we accept
    #[error("Invalid prefix name: {0:?}")]
    InvalidPrefix(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// A single `prefix -> namespace IRI` binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: String,
    pub iri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Ordered prefix table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table preloaded with `rdf`, `rdfs`, `owl` and `xsd`
    pub fn standard() -> Self {
        let mut mgr = Self::new();
        for (prefix, iri) in [("rdf", RDF), ("rdfs", RDFS), ("owl", OWL), ("xsd", XSD)] {
            mgr.prefixes.insert(prefix.to_string(), iri.to_string());
        }
        mgr
    }

    /// Bind a prefix, replacing any previous binding of the same name
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> PrefixResult<()> {
        let prefix = prefix.into();
        let valid = prefix
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid || prefix.starts_with(['-', '.']) {
            return Err(PrefixError::InvalidPrefix(prefix));
        }
        self.prefixes.insert(prefix, iri.into());
        Ok(())
    }

    /// Drop a binding; returns the namespace it pointed to
    pub fn remove_prefix(&mut self, prefix: &str) -> Option<String> {
        self.prefixes.shift_remove(prefix)
    }

    /// Namespace IRI bound to `prefix`
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(String::as_str)
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// `prefix:local` to a full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        let (prefix, local) = compact_iri
            .split_once(':')
            .ok_or_else(|| PrefixError::NotCompact(compact_iri.to_string()))?;
        Ok(format!("{}{}", self.get_iri(prefix)?, local))
    }

    /// Accepts either a compact IRI with a known prefix or an absolute IRI.
    pub fn resolve(&self, text: &str) -> PrefixResult<String> {
        match self.expand(text) {
            Ok(iri) => Ok(iri),
            Err(PrefixError::UnknownPrefix(_)) if text.contains("://") || text.starts_with("urn:") => {
                Ok(text.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Full IRI to `prefix:local`, using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }

    /// Human-readable form of a node: compacted IRI, `_:id` or the literal
    pub fn shorten(&self, node: &RdfObject) -> String {
        match node {
            RdfObject::NamedNode(n) => self.shorten_iri(n),
            RdfObject::BlankNode(b) => b.to_string(),
            RdfObject::Literal(l) => l.to_string(),
        }
    }

    pub fn shorten_iri(&self, node: &NamedNode) -> String {
        self.compact(node.as_str()).unwrap_or_else(|| node.to_string())
    }

    /// Registered bindings in registration order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{BlankNode, Literal};

    #[test]
    fn test_standard_prefixes() {
        let mgr = NamespaceManager::standard();
        assert_eq!(mgr.get_iri("rdf").unwrap(), RDF);
        assert_eq!(mgr.get_iri("owl").unwrap(), OWL);
        assert_eq!(mgr.len(), 4);
        assert!(NamespaceManager::new().is_empty());
    }

    #[test]
    fn test_expand() {
        let mgr = NamespaceManager::standard();
        assert_eq!(
            mgr.expand("rdfs:subClassOf").unwrap(),
            "http://www.w3.org/2000/01/rdf-schema#subClassOf"
        );
        assert!(matches!(mgr.expand("foo:bar"), Err(PrefixError::UnknownPrefix(_))));
        assert!(matches!(mgr.expand("plain"), Err(PrefixError::NotCompact(_))));
    }

    #[test]
    fn test_resolve_accepts_absolute_iris() {
        let mgr = NamespaceManager::standard();
        assert_eq!(mgr.resolve("http://example.org/A").unwrap(), "http://example.org/A");
        assert_eq!(mgr.resolve("owl:Thing").unwrap(), format!("{}Thing", OWL));
        assert!(mgr.resolve("ex:A").is_err());
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("ex", "http://example.org/").unwrap();
        mgr.add_prefix("zoo", "http://example.org/zoo#").unwrap();
        assert_eq!(mgr.compact("http://example.org/zoo#Dog"), Some("zoo:Dog".to_string()));
        assert_eq!(mgr.compact("http://example.org/Cat"), Some("ex:Cat".to_string()));
        assert_eq!(mgr.compact("http://other.org/x"), None);
    }

    #[test]
    fn test_shorten() {
        let mgr = NamespaceManager::standard();
        let thing = NamedNode::new(&format!("{}Thing", OWL)).unwrap();
        assert_eq!(mgr.shorten(&thing.into()), "owl:Thing");
        let other = NamedNode::new("http://other.org/x").unwrap();
        assert_eq!(mgr.shorten(&other.into()), "<http://other.org/x>");
        let b = BlankNode::from_str("b0").unwrap();
        assert_eq!(mgr.shorten(&b.into()), "_:b0");
        let lit = Literal::new_simple_literal("x");
        assert!(mgr.shorten(&lit.into()).starts_with("\"x\""));
    }

    #[test]
    fn test_invalid_and_removed_prefix() {
        let mut mgr = NamespaceManager::standard();
        assert!(mgr.add_prefix("bad prefix", "http://x/").is_err());
        assert!(mgr.add_prefix("-x", "http://x/").is_err());
        assert_eq!(mgr.remove_prefix("xsd"), Some(XSD.to_string()));
        assert!(mgr.get_iri("xsd").is_err());
    }
}
