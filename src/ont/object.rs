//! The generic object view
//!
//! [`OntObject`] is the common base every typed view dereferences to: a
//! non-literal node bound to a model, remembering which [`ViewKind`] it was
//! cast as so the right declaration is used as its main statement.

use super::dispatch::{View, ViewKind};
use super::error::{OntError, OntResult};
use super::expression;
use super::model::OntModel;
use super::statement::OntStatement;
use crate::rdf::{Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

#[derive(Clone)]
pub struct OntObject<'m> {
    model: &'m OntModel,
    node: RdfObject,
    subject: RdfSubject,
    kind: ViewKind,
}

impl<'m> OntObject<'m> {
    /// `None` for literals
    pub fn new(model: &'m OntModel, node: RdfObject, kind: ViewKind) -> Option<Self> {
        let subject = node.as_subject()?;
        Some(Self {
            model,
            node,
            subject,
            kind,
        })
    }

    pub fn model(&self) -> &'m OntModel {
        self.model
    }

    pub fn node(&self) -> &RdfObject {
        &self.node
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    /// The kind this view was cast as
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        self.node.as_named_node()
    }

    pub fn is_named(&self) -> bool {
        self.node.is_named_node()
    }

    /// Is this a built-in of the model's vocabulary for its kind
    pub fn is_builtin(&self) -> bool {
        self.model.personality().is_builtin(self.kind, &self.node)
    }

    pub fn can_as(&self, kind: ViewKind) -> bool {
        self.model.can_as(&self.node, kind)
    }

    pub fn try_as(&self, kind: ViewKind) -> Option<View<'m>> {
        self.model.try_as(&self.node, kind)
    }

    pub fn find_main_statement(&self) -> Option<OntStatement<'m>> {
        self.model.find_main_statement(&self.node, self.kind)
    }

    /// Declaration of this object; `IllegalState` if it has none
    pub fn main_statement(&self) -> OntResult<OntStatement<'m>> {
        self.find_main_statement().ok_or_else(|| {
            OntError::IllegalState(format!("Can't find {} declaration for {}", self.kind, self.node))
        })
    }

    /// Statements with this object as subject, optionally for one predicate
    pub fn statements(&self, predicate: Option<&RdfPredicate>) -> Vec<OntStatement<'m>> {
        self.model.statements(Some(&self.subject), predicate, None)
    }

    pub fn objects_of(&self, predicate: &RdfPredicate) -> Vec<RdfObject> {
        self.model.objects_of(&self.subject, predicate)
    }

    /// First value for a predicate in graph order
    pub fn object(&self, predicate: &RdfPredicate) -> Option<RdfObject> {
        self.objects_of(predicate).into_iter().next()
    }

    pub fn types(&self) -> Vec<RdfObject> {
        self.model.types_of(&self.node)
    }

    pub fn has_type(&self, ty: &NamedNode) -> bool {
        self.model.has_type(&self.node, ty)
    }

    pub fn add_statement(&self, predicate: &RdfPredicate, value: impl Into<RdfObject>) -> OntStatement<'m> {
        let triple = Triple::new(self.subject.clone(), predicate.clone(), value.into());
        if self.model.add(triple.clone()) {
            debug!(%triple, "Added statement");
        }
        self.model.statement(triple)
    }

    /// Remove `(this, predicate, value)`, or every value of `predicate`
    /// when `value` is `None`, annotations included
    pub fn remove_statements(&self, predicate: &RdfPredicate, value: Option<&RdfObject>) -> OntResult<usize> {
        let mut removed = 0;
        for statement in self.model.statements(Some(&self.subject), Some(predicate), value) {
            self.model.remove_statement(&statement)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Nodes on the other side of a symmetric axiom, in either direction
    pub(crate) fn symmetric_nodes(&self, predicate: &RdfPredicate) -> IndexSet<RdfObject> {
        let mut seen: IndexSet<RdfObject> = self.objects_of(predicate).into_iter().collect();
        seen.extend(
            self.model
                .subjects_of(predicate, &self.node)
                .into_iter()
                .map(RdfObject::from),
        );
        seen.shift_remove(&self.node);
        seen
    }

    /// Remove a symmetric axiom with `other` (or with anything) in both
    /// directions, annotations included
    pub(crate) fn remove_symmetric(&self, predicate: &RdfPredicate, other: Option<&RdfObject>) -> OntResult<usize> {
        let mut removed = self.remove_statements(predicate, other)?;
        let incoming = match other {
            Some(other) => match other.as_subject() {
                Some(subject) => self.model.statements(Some(&subject), Some(predicate), Some(&self.node)),
                None => Vec::new(),
            },
            None => self.model.statements(None, Some(predicate), Some(&self.node)),
        };
        for statement in incoming {
            self.model.remove_statement(&statement)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Statements that make up this object beyond its declaration
    pub fn spec(&self) -> Vec<OntStatement<'m>> {
        let triples = match self.kind {
            ViewKind::Class | ViewKind::ClassExpression => expression::spec(self.model, &self.node),
            ViewKind::Annotation => {
                let v = self.model.vocab();
                [&v.owl_annotated_source, &v.owl_annotated_property, &v.owl_annotated_target]
                    .into_iter()
                    .flat_map(|p| self.model.find(Some(&self.subject), Some(p), None))
                    .collect()
            }
            _ => Vec::new(),
        };
        triples.into_iter().map(|t| self.model.statement(t)).collect()
    }

    /// Main statement followed by [`spec`](Self::spec)
    pub fn content(&self) -> Vec<OntStatement<'m>> {
        self.find_main_statement().into_iter().chain(self.spec()).collect()
    }

    /// Plain annotation assertions on this object
    pub fn assertions(&self) -> Vec<OntStatement<'m>> {
        self.statements(None)
            .into_iter()
            .filter(|s| s.is_annotation_assertion())
            .collect()
    }

    /// Assertions plus the bulk annotations of the main statement
    pub fn annotations(&self) -> Vec<OntStatement<'m>> {
        match self.find_main_statement() {
            Some(main) => main.annotations(),
            None => self.assertions(),
        }
    }

    /// Annotate the main statement, or the object itself when it has none
    pub fn add_annotation(
        &self,
        property: &RdfPredicate,
        value: impl Into<RdfObject>,
    ) -> OntResult<OntStatement<'m>> {
        let value = value.into();
        match self.find_main_statement() {
            Some(main) => main.add_annotation(property, value),
            None => {
                if !self.model.can_as(&property.clone().into(), ViewKind::AnnotationProperty) {
                    return Err(OntError::IllegalArgument(format!(
                        "{} is not an annotation property",
                        property
                    )));
                }
                Ok(self.add_statement(property, value))
            }
        }
    }

    pub fn clear_annotations(&self) -> OntResult<()> {
        for assertion in self.assertions() {
            assertion.clear_annotations()?;
            self.model.remove(assertion.triple());
        }
        if let Some(main) = self.find_main_statement() {
            main.clear_annotations()?;
        }
        Ok(())
    }

    /// Literal values of `property` among this object's annotations.
    ///
    /// With `Some(lang)` the values are ordered by language tag and filtered:
    /// an empty `lang` keeps untagged literals only, otherwise tags are
    /// matched case-insensitively on `lang`'s length, so `en` matches `en-GB`.
    pub fn annotation_values(&self, property: &RdfPredicate, lang: Option<&str>) -> Vec<String> {
        let mut literals: Vec<Literal> = self
            .annotations()
            .into_iter()
            .filter(|s| s.predicate() == property)
            .filter_map(|s| s.object().as_literal().cloned())
            .collect();
        let Some(lang) = lang else {
            return literals.iter().map(|l| l.value().to_string()).collect();
        };
        literals.sort_by(|a, b| a.language().unwrap_or("").cmp(b.language().unwrap_or("")));
        literals
            .iter()
            .filter(|l| language_matches(l.language().unwrap_or(""), lang))
            .map(|l| l.value().to_string())
            .collect()
    }

    pub fn label(&self, lang: Option<&str>) -> Option<String> {
        let p = self.model.vocab().rdfs_label.clone();
        self.annotation_values(&p, lang).into_iter().next()
    }

    pub fn comment(&self, lang: Option<&str>) -> Option<String> {
        let p = self.model.vocab().rdfs_comment.clone();
        self.annotation_values(&p, lang).into_iter().next()
    }

    pub fn add_label(&self, text: &str, lang: Option<&str>) -> OntResult<OntStatement<'m>> {
        let p = self.model.vocab().rdfs_label.clone();
        self.add_annotation(&p, text_literal(text, lang)?)
    }

    pub fn add_comment(&self, text: &str, lang: Option<&str>) -> OntResult<OntStatement<'m>> {
        let p = self.model.vocab().rdfs_comment.clone();
        self.add_annotation(&p, text_literal(text, lang)?)
    }
}

fn language_matches(tag: &str, lang: &str) -> bool {
    if lang.is_empty() {
        return tag.is_empty();
    }
    let prefix = tag.get(..lang.len().min(tag.len())).unwrap_or(tag);
    prefix.eq_ignore_ascii_case(lang)
}

fn text_literal(text: &str, lang: Option<&str>) -> OntResult<Literal> {
    match lang {
        Some(lang) if !lang.is_empty() => Ok(Literal::new_language_tagged_literal(text, lang)?),
        _ => Ok(Literal::new_simple_literal(text)),
    }
}

impl PartialEq for OntObject<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.node == other.node
    }
}

impl Eq for OntObject<'_> {}

impl Hash for OntObject<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for OntObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.node)
    }
}

impl fmt::Display for OntObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}
