//! RDF type definitions
//!
//! This module provides wrapper types around the oxrdf library for RDF primitives.
//! `RdfObject` doubles as the generic "node" of the object-model layer: any URI,
//! blank node or literal that may appear in object position.

use oxrdf::{
    BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode,
    Subject as OxSubject, Term as OxTerm,
};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an IRI string
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(e.to_string()))
    }

    /// Create a named node without validating the IRI.
    ///
    /// Only for vocabulary constants and IRIs already validated elsewhere.
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self(OxNamedNode::new_unchecked(iri))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialOrd for NamedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NamedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl From<OxNamedNode> for NamedNode {
    fn from(node: OxNamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNode> for OxNamedNode {
    fn from(node: NamedNode) -> Self {
        node.0
    }
}

/// Blank node (anonymous node)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a new blank node with a unique identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node from a string identifier
    pub fn from_str(s: &str) -> RdfResult<Self> {
        OxBlankNode::new(s)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(e.to_string()))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl From<OxBlankNode> for BlankNode {
    fn from(node: OxBlankNode) -> Self {
        Self(node)
    }
}

impl From<BlankNode> for OxBlankNode {
    fn from(node: BlankNode) -> Self {
        node.0
    }
}

/// RDF literal value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Create an `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Self(OxLiteral::from(value))
    }

    /// Create an `xsd:nonNegativeInteger` literal (cardinalities)
    pub fn non_negative_integer(value: u32) -> Self {
        Self::new_typed_literal(
            value.to_string(),
            NamedNode::new_unchecked("http://www.w3.org/2001/XMLSchema#nonNegativeInteger"),
        )
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Get the datatype
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lang) = self.language() {
            write!(f, "\"{}\"@{}", self.value(), lang)
        } else {
            write!(f, "\"{}\"^^{}", self.value(), self.datatype())
        }
    }
}

impl From<OxLiteral> for Literal {
    fn from(lit: OxLiteral) -> Self {
        Self(lit)
    }
}

impl From<Literal> for OxLiteral {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

/// RDF subject (NamedNode or BlankNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl RdfSubject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfSubject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfSubject::BlankNode(_))
    }

    /// The IRI, if this is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfSubject::NamedNode(n) => Some(n),
            RdfSubject::BlankNode(_) => None,
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => write!(f, "{}", n),
            RdfSubject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

impl From<RdfPredicate> for RdfSubject {
    fn from(pred: RdfPredicate) -> Self {
        RdfSubject::NamedNode(pred.0)
    }
}

impl TryFrom<OxSubject> for RdfSubject {
    type Error = RdfError;

    fn try_from(subject: OxSubject) -> RdfResult<Self> {
        match subject {
            OxSubject::NamedNode(n) => Ok(RdfSubject::NamedNode(n.into())),
            OxSubject::BlankNode(b) => Ok(RdfSubject::BlankNode(b.into())),
            #[allow(unreachable_patterns)]
            other => Err(RdfError::InvalidIri(format!(
                "RDF-star subject not supported: {}",
                other
            ))),
        }
    }
}

impl From<RdfSubject> for OxSubject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => OxSubject::NamedNode(n.0),
            RdfSubject::BlankNode(b) => OxSubject::BlankNode(b.0),
        }
    }
}

/// RDF predicate (always a NamedNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    /// Create a new predicate from an IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Get the underlying named node
    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<RdfPredicate> for NamedNode {
    fn from(pred: RdfPredicate) -> Self {
        pred.0
    }
}

/// RDF object (NamedNode, BlankNode, or Literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl RdfObject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfObject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfObject::Literal(_))
    }

    /// The IRI, if this is a named node
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            RdfObject::NamedNode(n) => Some(n),
            _ => None,
        }
    }

    /// The literal, if this is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfObject::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// This node in subject position; `None` for literals
    pub fn as_subject(&self) -> Option<RdfSubject> {
        match self {
            RdfObject::NamedNode(n) => Some(RdfSubject::NamedNode(n.clone())),
            RdfObject::BlankNode(b) => Some(RdfSubject::BlankNode(b.clone())),
            RdfObject::Literal(_) => None,
        }
    }

    /// This node as a predicate; only named nodes qualify
    pub fn as_predicate(&self) -> Option<RdfPredicate> {
        self.as_named_node().cloned().map(RdfPredicate::from)
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => write!(f, "{}", n),
            RdfObject::BlankNode(b) => write!(f, "{}", b),
            RdfObject::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

impl From<RdfSubject> for RdfObject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => RdfObject::NamedNode(n),
            RdfSubject::BlankNode(b) => RdfObject::BlankNode(b),
        }
    }
}

impl From<RdfPredicate> for RdfObject {
    fn from(pred: RdfPredicate) -> Self {
        RdfObject::NamedNode(pred.0)
    }
}

impl TryFrom<OxTerm> for RdfObject {
    type Error = RdfError;

    fn try_from(term: OxTerm) -> RdfResult<Self> {
        match term {
            OxTerm::NamedNode(n) => Ok(RdfObject::NamedNode(n.into())),
            OxTerm::BlankNode(b) => Ok(RdfObject::BlankNode(b.into())),
            OxTerm::Literal(l) => Ok(RdfObject::Literal(l.into())),
            #[allow(unreachable_patterns)]
            other => Err(RdfError::InvalidLiteral(format!(
                "RDF-star object not supported: {}",
                other
            ))),
        }
    }
}

impl From<RdfObject> for OxTerm {
    fn from(object: RdfObject) -> Self {
        match object {
            RdfObject::NamedNode(n) => OxTerm::NamedNode(n.0),
            RdfObject::BlankNode(b) => OxTerm::BlankNode(b.0),
            RdfObject::Literal(l) => OxTerm::Literal(l.0),
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: RdfSubject,
    /// Predicate
    pub predicate: RdfPredicate,
    /// Object
    pub object: RdfObject,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Triple pattern for queries (with optional variables)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriplePattern {
    /// Subject (None = variable)
    pub subject: Option<RdfSubject>,
    /// Predicate (None = variable)
    pub predicate: Option<RdfPredicate>,
    /// Object (None = variable)
    pub object: Option<RdfObject>,
}

impl TriplePattern {
    /// Create a new triple pattern
    pub fn new(
        subject: Option<RdfSubject>,
        predicate: Option<RdfPredicate>,
        object: Option<RdfObject>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Pattern from borrowed parts; the parts are cloned
    pub fn of(
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> Self {
        Self::new(subject.cloned(), predicate.cloned(), object.cloned())
    }

    /// Check if a triple matches this pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        if let Some(ref s) = self.subject {
            if s != &triple.subject {
                return false;
            }
        }
        if let Some(ref p) = self.predicate {
            if p != &triple.predicate {
                return false;
            }
        }
        if let Some(ref o) = self.object {
            if o != &triple.object {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part<T: fmt::Display>(p: &Option<T>) -> String {
            p.as_ref().map_or_else(|| "ANY".to_string(), |t| t.to_string())
        }
        write!(
            f,
            "({} {} {})",
            part(&self.subject),
            part(&self.predicate),
            part(&self.object)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/alice").unwrap();
        assert_eq!(node.as_str(), "http://example.org/alice");
        assert_eq!(node.to_string(), "<http://example.org/alice>");
        assert!(NamedNode::new("not an iri").is_err());
    }

    #[test]
    fn test_named_node_ordering() {
        let a = NamedNode::new("http://example.org/a").unwrap();
        let b = NamedNode::new("http://example.org/b").unwrap();
        assert!(a < b);
        let mut v = vec![b.clone(), a.clone()];
        v.sort();
        assert_eq!(v, vec![a, b]);
    }

    #[test]
    fn test_blank_node() {
        let node1 = BlankNode::new();
        let node2 = BlankNode::new();
        assert_ne!(node1, node2); // Should have unique identifiers
    }

    #[test]
    fn test_literal() {
        // Simple literal
        let lit = Literal::new_simple_literal("Alice");
        assert_eq!(lit.value(), "Alice");

        // Language-tagged literal
        let lit = Literal::new_language_tagged_literal("Alice", "en").unwrap();
        assert_eq!(lit.value(), "Alice");
        assert_eq!(lit.language(), Some("en"));

        let lit = Literal::integer(3);
        assert_eq!(lit.value(), "3");
        assert_eq!(lit.datatype().as_str(), "http://www.w3.org/2001/XMLSchema#integer");
    }

    #[test]
    fn test_node_conversions() {
        let alice = NamedNode::new("http://example.org/alice").unwrap();
        let object: RdfObject = alice.clone().into();
        assert_eq!(object.as_subject(), Some(RdfSubject::NamedNode(alice.clone())));
        assert_eq!(object.as_predicate().unwrap().as_str(), alice.as_str());

        let literal: RdfObject = Literal::new_simple_literal("x").into();
        assert!(literal.as_subject().is_none());
        assert!(literal.as_predicate().is_none());

        let blank: RdfObject = BlankNode::new().into();
        assert!(blank.as_subject().unwrap().is_blank_node());
        assert!(blank.as_predicate().is_none());
    }

    #[test]
    fn test_triple() {
        let subject = NamedNode::new("http://example.org/alice").unwrap();
        let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let object = Literal::new_simple_literal("Alice");

        let triple = Triple::new(subject.into(), predicate, object.into());

        assert!(triple.subject.is_named_node());
        assert!(triple.object.is_literal());
    }

    #[test]
    fn test_triple_pattern_matching() {
        let subject = NamedNode::new("http://example.org/alice").unwrap();
        let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let object = Literal::new_simple_literal("Alice");

        let triple = Triple::new(subject.clone().into(), predicate.clone(), object.into());

        // Pattern with subject
        let pattern = TriplePattern::new(Some(subject.into()), None, None);
        assert!(pattern.matches(&triple));

        // Pattern with wrong subject
        let wrong_subject = NamedNode::new("http://example.org/bob").unwrap();
        let pattern = TriplePattern::new(Some(wrong_subject.into()), None, None);
        assert!(!pattern.matches(&triple));

        // Pattern with all variables
        let pattern = TriplePattern::default();
        assert!(pattern.matches(&triple));
        assert_eq!(pattern.to_string(), "(ANY ANY ANY)");

        let pattern = TriplePattern::of(None, Some(&predicate), None);
        assert!(pattern.matches(&triple));
    }
}
