//! Statements and their annotations
//!
//! An [`OntStatement`] is a triple seen through a model. A *root* statement is
//! the declaration of its subject; annotations on a root statement are plain
//! triples on the subject. Any other statement is annotated through bulk
//! annotation nodes (`owl:Axiom`, or `owl:Annotation` when the statement is
//! itself an annotation of another bulk node).

use super::annotation::{bulk_nodes, create_bulk, gc_bulk, OntAnnotation};
use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::model::OntModel;
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A triple bound to a model
#[derive(Clone)]
pub struct OntStatement<'m> {
    model: &'m OntModel,
    triple: Triple,
    root: bool,
}

impl<'m> OntStatement<'m> {
    pub(crate) fn new(model: &'m OntModel, triple: Triple, root: bool) -> Self {
        Self { model, triple, root }
    }

    pub fn model(&self) -> &'m OntModel {
        self.model
    }

    pub fn triple(&self) -> &Triple {
        &self.triple
    }

    pub fn into_triple(self) -> Triple {
        self.triple
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.triple.subject
    }

    pub fn predicate(&self) -> &RdfPredicate {
        &self.triple.predicate
    }

    pub fn object(&self) -> &RdfObject {
        &self.triple.object
    }

    /// Is this the declaration of its subject
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// `rdf:type` with a declaring type as object
    pub fn is_declaration(&self) -> bool {
        self.model.personality().is_declaration(&self.triple)
    }

    /// Predicate is an annotation property
    pub fn is_annotation_assertion(&self) -> bool {
        self.model
            .can_as(&self.triple.predicate.clone().into(), ViewKind::AnnotationProperty)
    }

    /// Subject is a bulk annotation node
    pub fn is_bulk_annotation(&self) -> bool {
        self.model
            .can_as(&self.triple.subject.clone().into(), ViewKind::Annotation)
    }

    pub fn exists(&self) -> bool {
        self.model.contains(&self.triple)
    }

    /// Annotation assertions made directly on the subject
    fn subject_assertions(&self) -> Vec<OntStatement<'m>> {
        self.model
            .statements(Some(&self.triple.subject), None, None)
            .into_iter()
            .filter(|s| s.is_annotation_assertion())
            .collect()
    }

    /// Bulk annotation nodes attached to this statement
    pub fn annotation_objects(&self) -> Vec<OntAnnotation<'m>> {
        bulk_nodes(self.model, &self.triple)
            .into_iter()
            .filter_map(|node| OntAnnotation::new(self.model, node))
            .collect()
    }

    /// Annotations of this statement: for a root statement the subject's own
    /// annotation assertions, then the assertions of every bulk node
    pub fn annotations(&self) -> Vec<OntStatement<'m>> {
        let mut out = if self.root {
            self.subject_assertions()
        } else {
            Vec::new()
        };
        for bulk in self.annotation_objects() {
            out.extend(bulk.assertions());
        }
        out
    }

    pub fn has_annotations(&self) -> bool {
        !self.annotations().is_empty()
    }

    /// Annotations of this statement and, recursively, of those annotations
    pub fn all_annotations(&self) -> Vec<OntStatement<'m>> {
        let mut seen: IndexSet<Triple> = IndexSet::new();
        let mut out = Vec::new();
        let mut queue: VecDeque<OntStatement<'m>> = self.annotations().into();
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.triple.clone()) {
                continue;
            }
            queue.extend(next.annotations());
            out.push(next);
        }
        out
    }

    /// Annotate this statement. Adding the same annotation twice leaves the
    /// graph unchanged.
    pub fn add_annotation(
        &self,
        property: &RdfPredicate,
        value: impl Into<RdfObject>,
    ) -> OntResult<OntStatement<'m>> {
        let value = value.into();
        if !self
            .model
            .can_as(&property.clone().into(), ViewKind::AnnotationProperty)
        {
            return Err(OntError::IllegalArgument(format!(
                "{} is not an annotation property",
                property
            )));
        }
        let subject = if self.root {
            self.triple.subject.clone()
        } else {
            if !self.model.personality().registry().supports(ViewKind::Annotation) {
                return Err(OntError::Unsupported(format!(
                    "bulk annotations under {}",
                    self.model.profile()
                )));
            }
            match bulk_nodes(self.model, &self.triple).into_iter().next() {
                Some(existing) => existing.as_subject().ok_or_else(|| {
                    OntError::IllegalState(format!("bulk node {} is a literal", existing))
                })?,
                None => create_bulk(self.model, &self.triple),
            }
        };
        let triple = Triple::new(subject, property.clone(), value);
        if self.model.add(triple.clone()) {
            debug!(statement = %self.triple, annotation = %triple, "Added annotation");
        }
        Ok(self.model.statement(triple))
    }

    /// Remove annotations with this property and value. Fails, without
    /// touching the graph, if any of them is itself annotated.
    pub fn delete_annotation(&self, property: &RdfPredicate, value: &RdfObject) -> OntResult<()> {
        let targets: Vec<OntStatement<'m>> = self
            .annotations()
            .into_iter()
            .filter(|a| a.predicate() == property && a.object() == value)
            .collect();
        if let Some(annotated) = targets.iter().find(|a| a.has_annotations()) {
            return Err(OntError::IllegalState(format!(
                "annotation {} has its own annotations",
                annotated.triple
            )));
        }
        for target in &targets {
            self.model.remove(target.triple());
        }
        self.collect_bulk();
        Ok(())
    }

    /// Remove every annotation of this statement, nested ones first
    pub fn clear_annotations(&self) -> OntResult<()> {
        for annotation in self.annotations() {
            annotation.clear_annotations()?;
            self.model.remove(annotation.triple());
        }
        self.collect_bulk();
        Ok(())
    }

    fn collect_bulk(&self) {
        for node in bulk_nodes(self.model, &self.triple) {
            gc_bulk(self.model, &node);
        }
    }
}

impl PartialEq for OntStatement<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.triple == other.triple
    }
}

impl Eq for OntStatement<'_> {}

impl Hash for OntStatement<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple.hash(state);
    }
}

impl fmt::Debug for OntStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntStatement")
            .field("triple", &self.triple.to_string())
            .field("root", &self.root)
            .finish()
    }
}

impl fmt::Display for OntStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, NamedNode};

    fn label(model: &OntModel) -> RdfPredicate {
        model.vocab().rdfs_label.clone()
    }

    fn sorted(model: &OntModel) -> Vec<String> {
        let mut triples: Vec<String> = model.triples().iter().map(|t| t.to_string()).collect();
        triples.sort();
        triples
    }

    #[test]
    fn test_root_annotation_is_plain_triple() {
        let model = OntModel::in_memory();
        let dog = model.create_class("http://example.org/Dog").unwrap();
        let root = dog.main_statement().unwrap();
        assert!(root.is_root());

        let added = root.add_annotation(&label(&model), Literal::new_simple_literal("Dog")).unwrap();
        assert_eq!(added.subject(), dog.subject());
        assert_eq!(model.size(), 2);
        assert_eq!(root.annotations(), vec![added]);
    }

    #[test]
    fn test_non_root_annotation_uses_one_axiom() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        assert!(!sub.is_root());
        let before = model.size();

        sub.add_annotation(&label(&model), Literal::new_simple_literal("x")).unwrap();
        // type, source, property, target plus the assertion
        assert_eq!(model.size(), before + 5);
        sub.add_annotation(&label(&model), Literal::new_simple_literal("x")).unwrap();
        assert_eq!(model.size(), before + 5);
        sub.add_annotation(&label(&model), Literal::new_simple_literal("y")).unwrap();
        assert_eq!(model.size(), before + 6);
        assert_eq!(sub.annotation_objects().len(), 1);
        assert_eq!(sub.annotations().len(), 2);

        let axiom = &sub.annotation_objects()[0];
        assert!(model.has_type(axiom.node(), &model.vocab().owl_axiom));
    }

    #[test]
    fn test_nested_annotation_uses_owl_annotation() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        let note = sub.add_annotation(&label(&model), Literal::new_simple_literal("x")).unwrap();
        assert!(note.is_bulk_annotation());
        let nested = note
            .add_annotation(&model.vocab().rdfs_comment, Literal::new_simple_literal("why"))
            .unwrap();
        let bulk = note.annotation_objects();
        assert_eq!(bulk.len(), 1);
        assert!(model.has_type(bulk[0].node(), &model.vocab().owl_annotation));
        assert_eq!(sub.all_annotations(), vec![note.clone(), nested]);

        // annotated annotations block deletion and leave the graph as is
        let size = model.size();
        let err = sub
            .delete_annotation(&label(&model), &Literal::new_simple_literal("x").into())
            .unwrap_err();
        assert!(matches!(err, OntError::IllegalState(_)));
        assert_eq!(model.size(), size);
    }

    #[test]
    fn test_clear_annotations_restores_graph() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        let before = sorted(&model);

        let note = sub.add_annotation(&label(&model), Literal::new_simple_literal("x")).unwrap();
        note.add_annotation(&label(&model), Literal::new_simple_literal("nested")).unwrap();
        sub.clear_annotations().unwrap();
        assert_eq!(sorted(&model), before);
        assert!(!sub.has_annotations());
    }

    #[test]
    fn test_delete_annotation_collects_empty_axiom() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        let before = sorted(&model);
        let value: RdfObject = Literal::new_simple_literal("x").into();
        sub.add_annotation(&label(&model), value.clone()).unwrap();
        sub.add_annotation(&label(&model), Literal::new_simple_literal("y")).unwrap();
        sub.delete_annotation(&label(&model), &value).unwrap();
        assert_eq!(sub.annotation_objects().len(), 1);
        sub.delete_annotation(&label(&model), &Literal::new_simple_literal("y").into()).unwrap();
        assert_eq!(sorted(&model), before);
        assert!(sub.annotation_objects().is_empty());
        // missing value is a no-op
        sub.delete_annotation(&label(&model), &value).unwrap();
        assert_eq!(sorted(&model), before);
    }

    #[test]
    fn test_non_annotation_property_rejected() {
        let model = OntModel::in_memory();
        let dog = model.create_class("http://example.org/Dog").unwrap();
        let p = RdfPredicate::new("http://example.org/notAnnotation").unwrap();
        let err = dog
            .main_statement()
            .unwrap()
            .add_annotation(&p, NamedNode::new("http://example.org/v").unwrap())
            .unwrap_err();
        assert!(matches!(err, OntError::IllegalArgument(_)));
    }
}
