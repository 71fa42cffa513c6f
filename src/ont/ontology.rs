//! Ontology header
//!
//! The header is the single subject of `rdf:type owl:Ontology`. It carries the
//! ontology IRI, an optional `owl:versionIRI` and the `owl:imports` list.
//! Imports are recorded as IRIs; nothing is fetched or merged.

use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::model::OntModel;
use super::object::OntObject;
use super::statement::OntStatement;
use crate::rdf::{BlankNode, NamedNode, RdfObject, RdfSubject, Triple};
use std::ops::Deref;
use tracing::{debug, info};

/// The ontology header node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntId<'m> {
    object: OntObject<'m>,
}

impl<'m> OntId<'m> {
    fn new(model: &'m OntModel, node: RdfObject) -> Option<Self> {
        OntObject::new(model, node, ViewKind::Object).map(|object| Self { object })
    }

    pub fn into_object(self) -> OntObject<'m> {
        self.object
    }

    pub fn version_iri(&self) -> Option<NamedNode> {
        self.object(&self.model().vocab().owl_version_iri)
            .and_then(|o| o.as_named_node().cloned())
    }

    /// Replace the version IRI, or drop it with `None`
    pub fn set_version_iri(&self, iri: Option<&str>) -> OntResult<()> {
        let model = self.model();
        let version = iri.map(|i| model.iri(i)).transpose()?;
        let predicate = model.vocab().owl_version_iri.clone();
        self.remove_statements(&predicate, None)?;
        if let Some(version) = version {
            self.add_statement(&predicate, version);
        }
        Ok(())
    }

    pub fn imports(&self) -> Vec<NamedNode> {
        self.objects_of(&self.model().vocab().owl_imports)
            .into_iter()
            .filter_map(|o| o.as_named_node().cloned())
            .collect()
    }

    pub fn has_import(&self, iri: &str) -> bool {
        self.model()
            .iri(iri)
            .map_or(false, |target| self.imports().contains(&target))
    }

    pub fn add_import(&self, iri: &str) -> OntResult<OntStatement<'m>> {
        let target = self.model().iri(iri)?;
        if self.iri() == Some(&target) {
            return Err(OntError::IllegalArgument(format!(
                "Attempt to import ontology with the same name: {}",
                target
            )));
        }
        if self.imports().contains(&target) {
            return Err(OntError::IllegalArgument(format!("Ontology {} is already in imports", target)));
        }
        debug!(ontology = %self.node(), import = %target, "Added import");
        let predicate = self.model().vocab().owl_imports.clone();
        Ok(self.add_statement(&predicate, target))
    }

    pub fn remove_import(&self, iri: &str) -> OntResult<usize> {
        let target: RdfObject = self.model().iri(iri)?.into();
        let predicate = self.model().vocab().owl_imports.clone();
        self.remove_statements(&predicate, Some(&target))
    }
}

impl<'m> Deref for OntId<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl OntModel {
    fn ontology_headers(&self) -> Vec<RdfSubject> {
        let v = self.vocab();
        self.subjects_of(&v.rdf_type, &v.owl_ontology.clone().into())
    }

    /// The ontology header; `None` when there is none or more than one
    pub fn id(&self) -> Option<OntId<'_>> {
        let mut headers = self.ontology_headers().into_iter();
        match (headers.next(), headers.next()) {
            (Some(header), None) => OntId::new(self, header.into()),
            _ => None,
        }
    }

    /// Make `iri` (a fresh blank node for `None`) the only header. The
    /// statements of every previous header move onto it.
    pub fn set_id(&self, iri: Option<&str>) -> OntResult<OntId<'_>> {
        let previous = self.ontology_headers();
        let header: RdfSubject = match iri {
            Some(iri) => self.iri(iri)?.into(),
            None => match previous.as_slice() {
                [only] if only.is_blank_node() => only.clone(),
                _ => BlankNode::new().into(),
            },
        };
        let v = self.vocab();
        self.add(Triple::new(header.clone(), v.rdf_type.clone(), v.owl_ontology.clone().into()));
        for old in previous.iter().filter(|h| **h != header) {
            let moved: Vec<Triple> = self.find(Some(old), None, None).collect();
            for triple in moved {
                self.remove(&triple);
                self.add(Triple::new(header.clone(), triple.predicate, triple.object));
            }
        }
        info!(ontology = %header, replaced = previous.len(), "Set ontology id");
        let node: RdfObject = header.into();
        OntId::new(self, node.clone())
            .ok_or_else(|| OntError::IllegalState(format!("{} cannot be an ontology header", node)))
    }

    /// Imports of the header, empty without one
    pub fn imports(&self) -> Vec<NamedNode> {
        self.id().map(|id| id.imports()).unwrap_or_default()
    }
}
