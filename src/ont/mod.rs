//! Ontology object model
//!
//! Typed views over an RDF graph:
//! - [`OntModel`] owns the graph and the [`OntPersonality`] that decides what
//!   every node can be viewed as
//! - [`OntClass`], [`OntProperty`], [`OntIndividual`] and the generic
//!   [`OntObject`] project nodes into classifier views
//! - [`OntStatement`] and [`OntAnnotation`] cover annotations, including bulk
//!   `owl:Axiom` / `owl:Annotation` nodes
//! - [`OntList`] is a typed, mutable `rdf:List`
//! - [`OntId`] is the `owl:Ontology` header with its imports
//!
//! Views are cheap: a model reference plus a node. Nothing is cached, so a
//! view always reflects the graph as it is now.
//!
//! # Example
//!
//! ```rust
//! use ontgraph::ont::OntModel;
//!
//! let model = OntModel::in_memory();
//! let animal = model.create_class("http://example.org/Animal").unwrap();
//! let dog = model.create_class("http://example.org/Dog").unwrap();
//! dog.add_super_class(&animal).unwrap();
//!
//! assert!(dog.has_super_class(&animal, true));
//! assert_eq!(model.hierarchy_roots().len(), 1);
//! ```

mod annotation;
mod class;
mod config;
mod dispatch;
mod error;
pub mod expression;
pub mod hierarchy;
mod individual;
mod list;
mod model;
mod object;
mod ontology;
mod personality;
mod property;
mod statement;

pub use annotation::OntAnnotation;
pub use class::OntClass;
pub use config::{ConfigError, ConfigResult, OntConfig, OntControl, OntProfile};
pub use dispatch::{View, ViewFactory, ViewKind, ViewMaker, ViewRegistry, ViewTest};
pub use error::{OntError, OntResult};
pub use expression::{CardinalityKind, ClassExpressionKind, ClassExpressionShape};
pub use individual::{NegativeAssertion, OntIndividual};
pub use list::{ElementPolicy, ListCell, ListCells, OntList, SafeListCells};
pub use model::OntModel;
pub use object::OntObject;
pub use ontology::OntId;
pub use personality::{Builtins, OntPersonality};
pub use property::{OntProperty, PropertyCharacteristic, PropertyKind};
pub use statement::OntStatement;
