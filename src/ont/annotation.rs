//! Bulk annotation nodes
//!
//! A bulk node is a blank node typed `owl:Axiom` (or `owl:Annotation` when it
//! annotates another bulk node's assertion) that points back at the annotated
//! triple through `owl:annotatedSource`, `owl:annotatedProperty` and
//! `owl:annotatedTarget`.

use super::dispatch::ViewKind;
use super::model::OntModel;
use super::object::OntObject;
use super::statement::OntStatement;
use crate::rdf::{BlankNode, RdfObject, RdfSubject, Triple};
use std::ops::Deref;
use tracing::debug;

/// A bulk annotation node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntAnnotation<'m> {
    object: OntObject<'m>,
}

impl<'m> OntAnnotation<'m> {
    pub(crate) fn new(model: &'m OntModel, node: RdfObject) -> Option<Self> {
        OntObject::new(model, node, ViewKind::Annotation).map(|object| Self { object })
    }

    pub fn into_object(self) -> OntObject<'m> {
        self.object
    }

    /// The annotated triple
    pub fn base(&self) -> Option<OntStatement<'m>> {
        let v = self.model().vocab();
        let subject = self.subject();
        let one = |p| self.model().objects_of(subject, p).into_iter().next();
        let source = one(&v.owl_annotated_source)?.as_subject()?;
        let property = one(&v.owl_annotated_property)?.as_predicate()?;
        let target = one(&v.owl_annotated_target)?;
        Some(self.model().statement(Triple::new(source, property, target)))
    }

    /// The bulk node this one annotates, for `owl:Annotation` nodes
    pub fn parent(&self) -> Option<OntAnnotation<'m>> {
        let source: RdfObject = self.base()?.subject().clone().into();
        if !self.model().can_as(&source, ViewKind::Annotation) {
            return None;
        }
        OntAnnotation::new(self.model(), source)
    }

    /// Annotation assertions carried by this node
    pub fn assertions(&self) -> Vec<OntStatement<'m>> {
        self.model()
            .statements(Some(self.subject()), None, None)
            .into_iter()
            .filter(|s| s.is_annotation_assertion())
            .collect()
    }
}

impl<'m> Deref for OntAnnotation<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

/// Bulk nodes whose back-pointers name `triple`, in graph order
pub(crate) fn bulk_nodes(model: &OntModel, triple: &Triple) -> Vec<RdfObject> {
    let v = model.vocab();
    let property: RdfObject = triple.predicate.clone().into();
    model
        .subjects_of(&v.owl_annotated_source, &triple.subject.clone().into())
        .into_iter()
        .filter(|bulk| {
            bulk.is_blank_node()
                && model.contains(&Triple::new(bulk.clone(), v.owl_annotated_property.clone(), property.clone()))
                && model.contains(&Triple::new(
                    bulk.clone(),
                    v.owl_annotated_target.clone(),
                    triple.object.clone(),
                ))
        })
        .map(RdfObject::from)
        .filter(|bulk| model.has_type(bulk, &v.owl_axiom) || model.has_type(bulk, &v.owl_annotation))
        .collect()
}

/// New bulk node for `triple`; `owl:Annotation` if the triple's subject is
/// itself a bulk node, else `owl:Axiom`
pub(crate) fn create_bulk(model: &OntModel, triple: &Triple) -> RdfSubject {
    let v = model.vocab();
    let nested = model.can_as(&triple.subject.clone().into(), ViewKind::Annotation);
    let ty = if nested { &v.owl_annotation } else { &v.owl_axiom };
    let bulk: RdfSubject = BlankNode::new().into();
    for t in [
        Triple::new(bulk.clone(), v.rdf_type.clone(), ty.clone().into()),
        Triple::new(bulk.clone(), v.owl_annotated_source.clone(), triple.subject.clone().into()),
        Triple::new(bulk.clone(), v.owl_annotated_property.clone(), triple.predicate.clone().into()),
        Triple::new(bulk.clone(), v.owl_annotated_target.clone(), triple.object.clone()),
    ] {
        model.add(t);
    }
    debug!(%bulk, annotated = %triple, "Created bulk annotation");
    bulk
}

/// Drop a bulk node left with nothing but its type and back-pointers
pub(crate) fn gc_bulk(model: &OntModel, node: &RdfObject) {
    let Some(subject) = node.as_subject() else { return };
    let v = model.vocab();
    let structural = [
        &v.rdf_type,
        &v.owl_annotated_source,
        &v.owl_annotated_property,
        &v.owl_annotated_target,
    ];
    let own: Vec<Triple> = model.find(Some(&subject), None, None).collect();
    if own.iter().any(|t| !structural.contains(&&t.predicate)) {
        return;
    }
    if model.has(None, Some(&v.owl_annotated_source), Some(node)) {
        return;
    }
    for t in &own {
        model.remove(t);
    }
    debug!(%node, "Removed empty bulk annotation");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    #[test]
    fn test_base_and_parent() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        let label = model.vocab().rdfs_label.clone();
        let note = sub.add_annotation(&label, Literal::new_simple_literal("x")).unwrap();
        note.add_annotation(&label, Literal::new_simple_literal("y")).unwrap();

        let axiom = sub.annotation_objects().remove(0);
        assert_eq!(axiom.base().unwrap(), sub);
        assert!(axiom.parent().is_none());
        assert_eq!(axiom.assertions(), vec![note.clone()]);

        let nested = note.annotation_objects().remove(0);
        assert_eq!(nested.base().unwrap(), note);
        assert_eq!(nested.parent().unwrap(), axiom);
        assert!(model.can_as(nested.node(), ViewKind::Annotation));
    }

    #[test]
    fn test_gc_keeps_referenced_nodes() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let sub = a.add_super_class(&b).unwrap();
        let bulk: RdfObject = create_bulk(&model, sub.triple()).into();
        let size = model.size();

        let label = model.vocab().rdfs_label.clone();
        let assertion = Triple::new(bulk.as_subject().unwrap(), label, Literal::new_simple_literal("x").into());
        model.add(assertion.clone());
        gc_bulk(&model, &bulk);
        assert_eq!(model.size(), size + 1);

        model.remove(&assertion);
        gc_bulk(&model, &bulk);
        assert_eq!(model.size(), size - 4);
        assert!(bulk_nodes(&model, sub.triple()).is_empty());
    }
}
