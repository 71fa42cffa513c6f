//! The ontology model: a graph plus a personality
//!
//! [`OntModel`] owns the triple store behind a `RefCell` so views can hold a
//! shared `&OntModel` and still write through it. Every read helper returns
//! an owned [`TripleIterator`], which means no borrow of the graph outlives
//! the call that made it.

use super::class::OntClass;
use super::config::{OntConfig, OntControl, OntProfile};
use super::dispatch::{View, ViewKind};
use super::error::{OntError, OntResult};
use super::individual::OntIndividual;
use super::personality::OntPersonality;
use super::property::OntProperty;
use super::statement::OntStatement;
use crate::rdf::{
    Document, Graph, NamedNode, NamespaceManager, OntVocabulary, RdfObject, RdfPredicate, RdfStore,
    RdfSubject, Triple, TripleIterator, TriplePattern,
};
use indexmap::IndexSet;
use std::cell::RefCell;
use std::fmt;
use tracing::{debug, info, trace};

/// Graph-backed ontology model
pub struct OntModel {
    graph: RefCell<Box<dyn Graph>>,
    personality: OntPersonality,
    prefixes: NamespaceManager,
}

impl OntModel {
    pub fn new(graph: impl Graph + 'static, personality: OntPersonality) -> Self {
        info!(
            profile = personality.name(),
            triples = graph.len(),
            "Creating ontology model"
        );
        Self {
            graph: RefCell::new(Box::new(graph)),
            personality,
            prefixes: NamespaceManager::standard(),
        }
    }

    pub fn with_config(graph: impl Graph + 'static, config: OntConfig) -> Self {
        Self::new(graph, OntPersonality::new(config))
    }

    /// Empty in-memory model with the default (OWL 2 full) personality
    pub fn in_memory() -> Self {
        Self::new(RdfStore::new(), OntPersonality::default())
    }

    /// Model over a parsed document; its prefixes become the model's
    pub fn from_document(document: Document, config: OntConfig) -> Self {
        let mut model = Self::with_config(RdfStore::from_triples(document.triples), config);
        model.prefixes = document.prefixes;
        model
    }

    pub fn personality(&self) -> &OntPersonality {
        &self.personality
    }

    pub fn vocab(&self) -> &OntVocabulary {
        self.personality.vocab()
    }

    pub fn config(&self) -> &OntConfig {
        self.personality.config()
    }

    pub fn profile(&self) -> OntProfile {
        self.config().profile
    }

    pub fn prefixes(&self) -> &NamespaceManager {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut NamespaceManager {
        &mut self.prefixes
    }

    /// Resolve a compact (`ex:Dog`) or absolute IRI
    pub fn iri(&self, text: &str) -> OntResult<NamedNode> {
        Ok(NamedNode::new(&self.prefixes.resolve(text)?)?)
    }

    // ---- raw graph access ----

    pub fn find(
        &self,
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> TripleIterator {
        self.graph.borrow().find(&TriplePattern::of(subject, predicate, object))
    }

    pub fn find_pattern(&self, pattern: &TriplePattern) -> TripleIterator {
        self.graph.borrow().find(pattern)
    }

    pub fn has(
        &self,
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> bool {
        self.graph
            .borrow()
            .contains_pattern(&TriplePattern::of(subject, predicate, object))
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.borrow().contains(triple)
    }

    /// Add a triple; `false` if it was already there
    pub fn add(&self, triple: Triple) -> bool {
        trace!(%triple, "add");
        self.graph.borrow_mut().add(triple)
    }

    /// Remove a triple; `false` if it was absent
    pub fn remove(&self, triple: &Triple) -> bool {
        trace!(%triple, "remove");
        self.graph.borrow_mut().remove(triple)
    }

    pub fn size(&self) -> usize {
        self.graph.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn triples(&self) -> Vec<Triple> {
        self.find(None, None, None).collect()
    }

    pub fn objects_of(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<RdfObject> {
        self.find(Some(subject), Some(predicate), None)
            .map(|t| t.object)
            .collect()
    }

    pub fn subjects_of(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<RdfSubject> {
        self.find(None, Some(predicate), Some(object))
            .map(|t| t.subject)
            .collect()
    }

    /// `node rdf:type ty` is in the graph
    pub fn has_type(&self, node: &RdfObject, ty: &NamedNode) -> bool {
        let Some(subject) = node.as_subject() else {
            return false;
        };
        self.contains(&Triple::new(subject, self.vocab().rdf_type.clone(), ty.clone().into()))
    }

    pub fn types_of(&self, node: &RdfObject) -> Vec<RdfObject> {
        node.as_subject()
            .map(|s| self.objects_of(&s, &self.vocab().rdf_type))
            .unwrap_or_default()
    }

    /// Direct form of `predicate`, when the graph provides one and the fast
    /// path is enabled
    pub fn direct_predicate(&self, predicate: &RdfPredicate) -> Option<RdfPredicate> {
        if !self.config().is_enabled(OntControl::UseDirectPredicateFastPath) {
            return None;
        }
        self.graph.borrow().direct_predicate(predicate)
    }

    // ---- dispatch ----

    pub fn can_as(&self, node: &RdfObject, kind: ViewKind) -> bool {
        self.personality.registry().can_as(self, node, kind)
    }

    pub fn try_as(&self, node: &RdfObject, kind: ViewKind) -> Option<View<'_>> {
        self.personality.registry().try_as(self, node, kind)
    }

    /// Every node of the graph (and every built-in) that casts to `kind`,
    /// in graph order
    pub fn objects(&self, kind: ViewKind) -> Vec<View<'_>> {
        let mut candidates: IndexSet<RdfObject> = IndexSet::new();
        for triple in self.find(None, None, None) {
            candidates.insert(triple.subject.into());
            if !triple.object.is_literal() {
                candidates.insert(triple.object);
            }
        }
        candidates.extend(
            self.personality
                .builtins()
                .of(kind)
                .into_iter()
                .map(|n| RdfObject::from(n.clone())),
        );
        candidates
            .into_iter()
            .filter_map(|node| self.try_as(&node, kind))
            .collect()
    }

    pub fn classes(&self) -> Vec<OntClass<'_>> {
        self.objects(ViewKind::Class)
            .into_iter()
            .filter_map(View::into_class)
            .collect()
    }

    pub fn properties(&self) -> Vec<OntProperty<'_>> {
        self.objects(ViewKind::Property)
            .into_iter()
            .filter_map(View::into_property)
            .collect()
    }

    pub fn individuals(&self) -> Vec<OntIndividual<'_>> {
        self.objects(ViewKind::Individual)
            .into_iter()
            .filter_map(View::into_individual)
            .collect()
    }

    pub fn as_class(&self, node: &RdfObject) -> Option<OntClass<'_>> {
        self.try_as(node, ViewKind::Class).and_then(View::into_class)
    }

    pub fn as_property(&self, node: &RdfObject) -> Option<OntProperty<'_>> {
        self.try_as(node, ViewKind::Property).and_then(View::into_property)
    }

    pub fn as_individual(&self, node: &RdfObject) -> Option<OntIndividual<'_>> {
        self.try_as(node, ViewKind::Individual).and_then(View::into_individual)
    }

    /// Named class by (compact or absolute) IRI
    pub fn get_class(&self, iri: &str) -> Option<OntClass<'_>> {
        let node = self.iri(iri).ok()?;
        self.as_class(&node.into())
    }

    pub fn get_property(&self, iri: &str) -> Option<OntProperty<'_>> {
        let node = self.iri(iri).ok()?;
        self.as_property(&node.into())
    }

    pub fn get_individual(&self, iri: &str) -> Option<OntIndividual<'_>> {
        let node = self.iri(iri).ok()?;
        self.as_individual(&node.into())
    }

    // ---- statements ----

    /// Wrap a triple; it is a root statement if it declares its subject
    pub fn statement(&self, triple: Triple) -> OntStatement<'_> {
        let root = self.personality.is_declaration(&triple) || self.is_fallback_root(&triple);
        OntStatement::new(self, triple, root)
    }

    pub fn statements(
        &self,
        subject: Option<&RdfSubject>,
        predicate: Option<&RdfPredicate>,
        object: Option<&RdfObject>,
    ) -> Vec<OntStatement<'_>> {
        self.find(subject, predicate, object)
            .map(|t| self.statement(t))
            .collect()
    }

    /// The declaration of `node` as `kind`: `node rdf:type T` for the
    /// smallest declaring type `T` present. Plain objects fall back to the
    /// smallest `rdf:type` of any kind.
    pub fn find_main_statement(&self, node: &RdfObject, kind: ViewKind) -> Option<OntStatement<'_>> {
        let triple = match kind {
            ViewKind::Object => self.object_root(node),
            _ => {
                let mut types = self.personality.declaring_types(kind);
                types.sort();
                let subject = node.as_subject()?;
                types.into_iter().find_map(|ty| {
                    let t = Triple::new(subject.clone(), self.vocab().rdf_type.clone(), ty.into());
                    self.contains(&t).then_some(t)
                })
            }
        }?;
        Some(OntStatement::new(self, triple, true))
    }

    /// Like [`find_main_statement`](Self::find_main_statement), but fails
    /// with `NotFound` when the node has no declaration
    pub fn main_statement(&self, node: &RdfObject, kind: ViewKind) -> OntResult<OntStatement<'_>> {
        self.find_main_statement(node, kind)
            .ok_or_else(|| OntError::NotFound(format!("Can't find {} declaration for {}", kind, node)))
    }

    fn object_root(&self, node: &RdfObject) -> Option<Triple> {
        let subject = node.as_subject()?;
        let mut types: Vec<Triple> = self
            .find(Some(&subject), Some(&self.vocab().rdf_type), None)
            .filter(|t| t.object.is_named_node())
            .collect();
        let declared = types.iter().any(|t| self.personality.is_declaration(t));
        if declared {
            types.retain(|t| self.personality.is_declaration(t));
        }
        types.sort_by(|a, b| a.object.as_named_node().cmp(&b.object.as_named_node()));
        types.into_iter().next()
    }

    fn is_fallback_root(&self, triple: &Triple) -> bool {
        triple.predicate == self.vocab().rdf_type
            && self.object_root(&triple.subject.clone().into()).as_ref() == Some(triple)
    }

    /// Remove a statement together with its annotations
    pub fn remove_statement(&self, statement: &OntStatement<'_>) -> OntResult<()> {
        statement.clear_annotations()?;
        self.remove(statement.triple());
        Ok(())
    }

    /// Remove every triple about `node`, the lists and annotations hanging
    /// off them, and every reference to it. Returns the number of triples
    /// removed.
    pub fn remove_object(&self, node: &RdfObject) -> OntResult<usize> {
        let Some(subject) = node.as_subject() else {
            return Err(OntError::IllegalArgument(format!("{} is a literal", node)));
        };
        let before = self.size();
        for statement in self.statements(Some(&subject), None, None) {
            statement.clear_annotations()?;
            if let Some(list) = self.list_at(statement.triple()) {
                list.delete_cells();
            }
            self.remove(statement.triple());
        }
        for statement in self.statements(None, None, Some(node)) {
            statement.clear_annotations()?;
            self.remove(statement.triple());
        }
        let removed = before - self.size();
        debug!(%node, removed, "Removed object");
        Ok(removed)
    }

    // ---- entity builders ----

    fn declare(&self, iri: &str, ty: &NamedNode) -> OntResult<RdfObject> {
        let node = self.iri(iri)?;
        self.add(Triple::new(
            node.clone().into(),
            self.vocab().rdf_type.clone(),
            ty.clone().into(),
        ));
        debug!(iri = node.as_str(), ty = ty.as_str(), "Declared entity");
        Ok(node.into())
    }

    fn declared_view(&self, node: RdfObject, kind: ViewKind) -> OntResult<View<'_>> {
        self.try_as(&node, kind)
            .ok_or_else(|| OntError::Unsupported(format!("{} is not a {} under {}", node, kind, self.profile())))
    }

    /// Declare a named class (`owl:Class`, or `rdfs:Class` under RDFS)
    pub fn create_class(&self, iri: &str) -> OntResult<OntClass<'_>> {
        let ty = if self.profile().is_owl() {
            self.vocab().owl_class.clone()
        } else {
            self.vocab().rdfs_class.clone()
        };
        let node = self.declare(iri, &ty)?;
        self.declared_view(node, ViewKind::NamedClass)?
            .into_class()
            .ok_or_else(|| OntError::IllegalState(format!("{} did not cast to a class", iri)))
    }

    fn create_property(&self, iri: &str, ty: &NamedNode, kind: ViewKind) -> OntResult<OntProperty<'_>> {
        if !self.personality.registry().supports(kind) {
            return Err(OntError::Unsupported(format!("{} under {}", kind, self.profile())));
        }
        let node = self.declare(iri, ty)?;
        self.declared_view(node, kind)?
            .into_property()
            .ok_or_else(|| OntError::IllegalState(format!("{} did not cast to a property", iri)))
    }

    pub fn create_object_property(&self, iri: &str) -> OntResult<OntProperty<'_>> {
        let ty = self.vocab().owl_object_property.clone();
        self.create_property(iri, &ty, ViewKind::ObjectProperty)
    }

    pub fn create_data_property(&self, iri: &str) -> OntResult<OntProperty<'_>> {
        let ty = self.vocab().owl_datatype_property.clone();
        self.create_property(iri, &ty, ViewKind::DataProperty)
    }

    pub fn create_annotation_property(&self, iri: &str) -> OntResult<OntProperty<'_>> {
        if !self.profile().is_owl() {
            return Err(OntError::Unsupported(format!(
                "owl:AnnotationProperty under {}",
                self.profile()
            )));
        }
        let ty = self.vocab().owl_annotation_property.clone();
        self.create_property(iri, &ty, ViewKind::AnnotationProperty)
    }

    /// Declare an `rdf:Property` (RDFS profile)
    pub fn create_rdf_property(&self, iri: &str) -> OntResult<OntProperty<'_>> {
        let ty = self.vocab().rdf_property.clone();
        self.create_property(iri, &ty, ViewKind::Property)
    }

    pub fn create_datatype(&self, iri: &str) -> OntResult<View<'_>> {
        let ty = self.vocab().rdfs_datatype.clone();
        let node = self.declare(iri, &ty)?;
        self.declared_view(node, ViewKind::Datatype)
    }
}

impl fmt::Debug for OntModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntModel")
            .field("profile", &self.personality.name())
            .field("triples", &self.size())
            .finish()
    }
}

impl Default for OntModel {
    fn default() -> Self {
        Self::in_memory()
    }
}
