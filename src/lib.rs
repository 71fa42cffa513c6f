//! ontgraph
//!
//! A typed ontology object model over an RDF triple store. Nodes of a plain
//! RDF graph are viewed as OWL2 / RDFS classes, properties, individuals,
//! annotations and lists, with every view reading and writing the
//! underlying triples directly.
//!
//! # Layers
//!
//! - [`rdf`]: terms, triples, the [`rdf::Graph`] contract, an in-memory
//!   store, Turtle loading and an RDFS reasoner with direct relations
//! - [`ont`]: the object model, view dispatch, statements and annotations,
//!   typed lists, hierarchy traversal and class expressions
//!
//! # Profiles
//!
//! [`ont::OntConfig`] selects a profile (`OWL2-FULL`, `OWL2-DL`, `OWL2-QL`,
//! `OWL2-RL`, `OWL1`, `RDFS`) and per-feature controls; the profile decides
//! which views exist and which constructs are allowed where.
//!
//! ## Example Usage
//!
//! ```rust
//! use ontgraph::ont::{OntConfig, OntModel};
//! use ontgraph::rdf::load_turtle;
//!
//! let ttl = r#"
//!     @prefix ex: <http://example.org/> .
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     ex:Animal a owl:Class .
//!     ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal .
//! "#;
//! let model = OntModel::from_document(load_turtle(ttl.as_bytes()).unwrap(), OntConfig::default());
//!
//! let dog = model.get_class("ex:Dog").unwrap();
//! let supers = dog.super_classes(false);
//! assert_eq!(supers.len(), 1);
//! assert_eq!(model.hierarchy_roots()[0].iri().unwrap().as_str(), "http://example.org/Animal");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod ont;
pub mod rdf;

// Re-export main types for convenience
pub use ont::{
    OntClass, OntConfig, OntError, OntId, OntIndividual, OntList, OntModel, OntObject, OntProfile,
    OntProperty, OntResult, OntStatement, View, ViewKind,
};

pub use rdf::{
    Graph, InfGraph, Literal, NamedNode, BlankNode, RdfObject, RdfPredicate, RdfStore,
    RdfSubject, RdfsReasoner, Triple, TriplePattern,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
