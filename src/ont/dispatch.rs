//! View dispatch
//!
//! A [`ViewRegistry`] maps every [`ViewKind`] to an ordered list of
//! [`ViewFactory`] candidates. Casting a node walks the list in declared order
//! and returns the first candidate whose structural test passes, so two
//! candidates matching the same node never race on store iteration order.

use super::annotation::OntAnnotation;
use super::class::OntClass;
use super::individual::OntIndividual;
use super::list::OntList;
use super::model::OntModel;
use super::object::OntObject;
use super::property::OntProperty;
use crate::rdf::RdfObject;
use indexmap::IndexMap;
use std::fmt;

/// The typed projections a node can be cast to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewKind {
    /// Any non-literal node
    Object,
    /// Named class or class expression
    Class,
    NamedClass,
    /// Anonymous class expression (restriction or boolean/enumeration)
    ClassExpression,
    /// Any of the property kinds
    Property,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    /// Named or anonymous individual
    Individual,
    NamedIndividual,
    AnonymousIndividual,
    Datatype,
    /// Bulk annotation object (`owl:Axiom` / `owl:Annotation`)
    Annotation,
    /// RDF list hanging off a root triple
    List,
}

impl ViewKind {
    pub fn all() -> [ViewKind; 14] {
        use ViewKind::*;
        [
            Object,
            Class,
            NamedClass,
            ClassExpression,
            Property,
            ObjectProperty,
            DataProperty,
            AnnotationProperty,
            Individual,
            NamedIndividual,
            AnonymousIndividual,
            Datatype,
            Annotation,
            List,
        ]
    }

    /// The kinds whose factories this kind is the union of
    pub fn parts(&self) -> &'static [ViewKind] {
        use ViewKind::*;
        match self {
            Class => &[NamedClass, ClassExpression],
            Property => &[ObjectProperty, DataProperty, AnnotationProperty],
            Individual => &[NamedIndividual, AnonymousIndividual],
            _ => &[],
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A node cast to a typed view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'m> {
    Object(OntObject<'m>),
    Class(OntClass<'m>),
    Property(OntProperty<'m>),
    Individual(OntIndividual<'m>),
    Datatype(OntObject<'m>),
    Annotation(OntAnnotation<'m>),
    List(OntList<'m>),
}

impl<'m> View<'m> {
    /// The node this view projects
    pub fn node(&self) -> &RdfObject {
        match self {
            View::Object(o) | View::Datatype(o) => o.node(),
            View::Class(c) => c.node(),
            View::Property(p) => p.node(),
            View::Individual(i) => i.node(),
            View::Annotation(a) => a.node(),
            View::List(l) => l.head(),
        }
    }

    pub fn into_object(self) -> Option<OntObject<'m>> {
        match self {
            View::Object(o) | View::Datatype(o) => Some(o),
            View::Class(c) => Some(c.into_object()),
            View::Property(p) => Some(p.into_object()),
            View::Individual(i) => Some(i.into_object()),
            View::Annotation(a) => Some(a.into_object()),
            View::List(_) => None,
        }
    }

    pub fn into_class(self) -> Option<OntClass<'m>> {
        match self {
            View::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_property(self) -> Option<OntProperty<'m>> {
        match self {
            View::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_individual(self) -> Option<OntIndividual<'m>> {
        match self {
            View::Individual(i) => Some(i),
            _ => None,
        }
    }

    pub fn into_annotation(self) -> Option<OntAnnotation<'m>> {
        match self {
            View::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<OntList<'m>> {
        match self {
            View::List(l) => Some(l),
            _ => None,
        }
    }
}

/// Structural test: does the node's neighbourhood satisfy the contract
pub type ViewTest = fn(&OntModel, &RdfObject) -> bool;

/// Constructor run after the test passed
pub type ViewMaker = for<'m> fn(&'m OntModel, RdfObject) -> Option<View<'m>>;

/// One `(test, constructor)` candidate
#[derive(Clone, Copy)]
pub struct ViewFactory {
    pub name: &'static str,
    pub test: ViewTest,
    pub make: ViewMaker,
}

impl ViewFactory {
    pub const fn new(name: &'static str, test: ViewTest, make: ViewMaker) -> Self {
        Self { name, test, make }
    }
}

impl fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewFactory").field("name", &self.name).finish()
    }
}

/// `ViewKind -> [ViewFactory]`, evaluated in registration order
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    factories: IndexMap<ViewKind, Vec<ViewFactory>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate for a kind; earlier registrations win
    pub fn register(&mut self, kind: ViewKind, factory: ViewFactory) -> &mut Self {
        self.factories.entry(kind).or_default().push(factory);
        self
    }

    /// Candidates of a kind, composite kinds expanded in part order
    pub fn factories(&self, kind: ViewKind) -> Vec<ViewFactory> {
        let own = self.factories.get(&kind).into_iter().flatten().copied();
        own.chain(kind.parts().iter().flat_map(|part| self.factories(*part)))
            .collect()
    }

    pub fn supports(&self, kind: ViewKind) -> bool {
        !self.factories(kind).is_empty()
    }

    /// Name of the first candidate accepting the node
    pub fn matching(&self, model: &OntModel, node: &RdfObject, kind: ViewKind) -> Option<&'static str> {
        self.factories(kind)
            .into_iter()
            .find(|f| (f.test)(model, node))
            .map(|f| f.name)
    }

    pub fn can_as(&self, model: &OntModel, node: &RdfObject, kind: ViewKind) -> bool {
        self.factories(kind).iter().any(|f| (f.test)(model, node))
    }

    pub fn try_as<'m>(&self, model: &'m OntModel, node: &RdfObject, kind: ViewKind) -> Option<View<'m>> {
        self.factories(kind)
            .into_iter()
            .filter(|f| (f.test)(model, node))
            .find_map(|f| (f.make)(model, node.clone()))
    }
}
