//! RDF foundation for the ontology layer
//!
//! This module provides the triple-level collaborators the object model is
//! written against:
//! - RDF terms and triples (wrappers over `oxrdf`)
//! - the [`Graph`] storage contract and the in-memory [`RdfStore`]
//! - the substitutable [`OntVocabulary`] and prefix tables
//! - Turtle / N-Triples loading
//! - RDFS entailment with direct-relation support ([`InfGraph`])
//!
//! # Example
//!
//! ```rust
//! use ontgraph::rdf::{Graph, RdfStore, Triple, NamedNode, Literal, RdfPredicate, TriplePattern};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! assert!(store.add(Triple::new(subject.clone().into(), predicate, object.into())));
//!
//! let subject = subject.into();
//! let results: Vec<_> = store.find(&TriplePattern::of(Some(&subject), None, None)).collect();
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod schema;
mod serialization;
mod store;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple, TriplePattern,
};

pub use store::{Graph, RdfStore, RdfStoreError, RdfStoreResult, TripleIterator};

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    load_ntriples, load_turtle, Document, ParseError, ParseResult, RdfFormat, RdfParser,
};

pub use schema::{
    Derivation, InfGraph, InferenceRule, RdfsReasoner, ReasoningError, ReasoningResult,
};

pub use vocab::OntVocabulary;
