//! Property views

use super::config::{OntControl, OntProfile};
use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::hierarchy;
use super::list::OntList;
use super::model::OntModel;
use super::object::OntObject;
use super::statement::OntStatement;
use crate::rdf::{NamedNode, OntVocabulary, RdfObject, RdfPredicate, Triple};
use std::fmt;
use std::ops::Deref;

/// Which declaration a property conforms to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Object,
    Data,
    Annotation,
    /// Plain `rdf:Property` (RDFS profile)
    Rdf,
}

impl PropertyKind {
    pub fn view_kind(self) -> ViewKind {
        match self {
            PropertyKind::Object => ViewKind::ObjectProperty,
            PropertyKind::Data => ViewKind::DataProperty,
            PropertyKind::Annotation => ViewKind::AnnotationProperty,
            PropertyKind::Rdf => ViewKind::Property,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view_kind())
    }
}

/// Property characteristics, each declared as `P rdf:type owl:XProperty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCharacteristic {
    Functional,
    InverseFunctional,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
}

impl PropertyCharacteristic {
    pub fn all() -> [PropertyCharacteristic; 7] {
        use PropertyCharacteristic::*;
        [Functional, InverseFunctional, Transitive, Symmetric, Asymmetric, Reflexive, Irreflexive]
    }

    pub fn type_node(self, vocab: &OntVocabulary) -> &NamedNode {
        use PropertyCharacteristic::*;
        match self {
            Functional => &vocab.owl_functional_property,
            InverseFunctional => &vocab.owl_inverse_functional_property,
            Transitive => &vocab.owl_transitive_property,
            Symmetric => &vocab.owl_symmetric_property,
            Asymmetric => &vocab.owl_asymmetric_property,
            Reflexive => &vocab.owl_reflexive_property,
            Irreflexive => &vocab.owl_irreflexive_property,
        }
    }

    /// Only `Functional` is allowed on data properties
    pub fn applies_to(self, kind: PropertyKind) -> bool {
        match self {
            PropertyCharacteristic::Functional => matches!(kind, PropertyKind::Object | PropertyKind::Data),
            _ => kind == PropertyKind::Object,
        }
    }

    pub fn is_allowed_in(self, profile: OntProfile) -> bool {
        use PropertyCharacteristic::*;
        match (profile, self) {
            (OntProfile::Rdfs, _) => false,
            (OntProfile::Owl2Ql, Functional | InverseFunctional | Transitive) => false,
            (OntProfile::Owl2Rl, Reflexive) => false,
            _ => true,
        }
    }

    fn control(self) -> Option<OntControl> {
        use PropertyCharacteristic::*;
        matches!(self, Asymmetric | Reflexive | Irreflexive).then_some(OntControl::Owl2PropertyAxioms)
    }
}

impl fmt::Display for PropertyCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owl:{:?}Property", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntProperty<'m> {
    object: OntObject<'m>,
    kind: PropertyKind,
}

/// Explicit `rdfs:subPropertyOf` parents of the same kind
fn explicit_supers(model: &OntModel, node: &RdfObject, kind: ViewKind) -> Vec<RdfObject> {
    let Some(subject) = node.as_subject() else {
        return Vec::new();
    };
    model
        .objects_of(&subject, &model.vocab().rdfs_sub_property_of)
        .into_iter()
        .filter(|o| model.can_as(o, kind))
        .collect()
}

fn explicit_subs(model: &OntModel, node: &RdfObject, kind: ViewKind) -> Vec<RdfObject> {
    model
        .subjects_of(&model.vocab().rdfs_sub_property_of, node)
        .into_iter()
        .map(RdfObject::from)
        .filter(|s| model.can_as(s, kind))
        .collect()
}

impl<'m> OntProperty<'m> {
    pub(crate) fn new(model: &'m OntModel, node: RdfObject, kind: PropertyKind) -> Option<Self> {
        if !node.is_named_node() {
            return None;
        }
        OntObject::new(model, node, kind.view_kind()).map(|object| Self { object, kind })
    }

    pub fn into_object(self) -> OntObject<'m> {
        self.object
    }

    pub fn property_kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn as_predicate(&self) -> Option<RdfPredicate> {
        self.node().as_predicate()
    }

    fn peers(&self, nodes: impl IntoIterator<Item = RdfObject>) -> Vec<OntProperty<'m>> {
        let model = self.model();
        let kind = self.kind.view_kind();
        nodes
            .into_iter()
            .filter_map(|n| model.try_as(&n, kind))
            .filter_map(|v| v.into_property())
            .collect()
    }

    pub fn super_properties(&self, direct: bool) -> Vec<OntProperty<'m>> {
        let model = self.model();
        let kind = self.kind.view_kind();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_property_of) {
                let parents = model.objects_of(self.subject(), &dp);
                return self.peers(parents.into_iter().filter(|n| n != self.node()));
            }
        }
        self.peers(hierarchy::tree_nodes(self.node(), |n| explicit_supers(model, n, kind), direct))
    }

    pub fn sub_properties(&self, direct: bool) -> Vec<OntProperty<'m>> {
        let model = self.model();
        let kind = self.kind.view_kind();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_property_of) {
                let children = model.subjects_of(&dp, self.node());
                return self.peers(children.into_iter().map(RdfObject::from).filter(|n| n != self.node()));
            }
        }
        self.peers(hierarchy::tree_nodes(self.node(), |n| explicit_subs(model, n, kind), direct))
    }

    /// Reflexive
    pub fn has_super_property(&self, other: &OntProperty<'_>, direct: bool) -> bool {
        if self.node() == other.node() {
            return true;
        }
        let model = self.model();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_property_of) {
                return model.contains(&Triple::new(self.subject().clone(), dp, other.node().clone()));
            }
        }
        let kind = self.kind.view_kind();
        hierarchy::contains(self.node(), other.node(), |n| explicit_supers(model, n, kind), direct)
    }

    pub fn is_hierarchy_root(&self) -> bool {
        let model = self.model();
        if model.personality().is_builtin(self.kind.view_kind(), self.node()) {
            return false;
        }
        let tops: Vec<RdfObject> = model
            .vocab()
            .property_tops()
            .into_iter()
            .map(|t| RdfObject::from(t.clone()))
            .collect();
        let parents = self.super_properties(true).into_iter().map(|p| p.node().clone());
        hierarchy::is_hierarchy_root(self.node(), parents, &tops)
    }

    pub fn domains(&self) -> Vec<RdfObject> {
        self.objects_of(&self.model().vocab().rdfs_domain)
    }

    pub fn ranges(&self) -> Vec<RdfObject> {
        self.objects_of(&self.model().vocab().rdfs_range)
    }

    fn add_schema(&self, predicate: &RdfPredicate, value: &RdfObject) -> OntResult<OntStatement<'m>> {
        if value.is_literal() {
            return Err(OntError::IllegalArgument(format!(
                "{} {} cannot be the literal {}",
                self.node(),
                predicate,
                value
            )));
        }
        Ok(self.add_statement(predicate, value.clone()))
    }

    pub fn add_domain(&self, domain: &RdfObject) -> OntResult<OntStatement<'m>> {
        let predicate = self.model().vocab().rdfs_domain.clone();
        self.add_schema(&predicate, domain)
    }

    pub fn add_range(&self, range: &RdfObject) -> OntResult<OntStatement<'m>> {
        let predicate = self.model().vocab().rdfs_range.clone();
        self.add_schema(&predicate, range)
    }

    /// `rdfs:subPropertyOf` between properties of the same kind
    pub fn add_super_property(&self, other: &OntProperty<'_>) -> OntResult<OntStatement<'m>> {
        if other.kind != self.kind {
            return Err(OntError::IllegalArgument(format!(
                "{} is a {}, expected a {}",
                other.node(),
                other.kind,
                self.kind
            )));
        }
        let predicate = self.model().vocab().rdfs_sub_property_of.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_super_property(&self, other: Option<&OntProperty<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().rdfs_sub_property_of.clone();
        self.remove_statements(&predicate, other.map(|p| p.node()))
    }

    /// Attach an `owl:propertyChainAxiom` list (object properties only)
    pub fn create_property_chain(&self, chain: &[OntProperty<'_>]) -> OntResult<OntList<'m>> {
        let model = self.model();
        model
            .config()
            .check_feature(OntControl::Owl2PropertyChain, "owl:propertyChainAxiom")?;
        if self.kind != PropertyKind::Object {
            return Err(OntError::Unsupported(format!(
                "owl:propertyChainAxiom on {} {}",
                self.kind,
                self.node()
            )));
        }
        model.create_list(
            self.subject(),
            &model.vocab().owl_property_chain_axiom,
            None,
            Some(ViewKind::ObjectProperty),
            chain.iter().map(|p| p.node().clone()),
        )
    }

    pub fn property_chains(&self) -> Vec<OntList<'m>> {
        let model = self.model();
        if self.kind != PropertyKind::Object || !model.config().is_enabled(OntControl::Owl2PropertyChain) {
            return Vec::new();
        }
        model
            .lists(self.subject(), &model.vocab().owl_property_chain_axiom)
            .into_iter()
            .map(|l| l.with_element_kind(ViewKind::ObjectProperty))
            .collect()
    }
}

impl<'m> OntProperty<'m> {
    pub fn characteristics(&self) -> Vec<PropertyCharacteristic> {
        PropertyCharacteristic::all()
            .into_iter()
            .filter(|c| self.has_characteristic(*c))
            .collect()
    }

    pub fn has_characteristic(&self, characteristic: PropertyCharacteristic) -> bool {
        characteristic.applies_to(self.kind) && self.has_type(characteristic.type_node(self.model().vocab()))
    }

    /// Add or remove `P rdf:type owl:XProperty`. Removal takes the
    /// statement's annotations along and is never refused.
    pub fn set_characteristic(&self, characteristic: PropertyCharacteristic, enabled: bool) -> OntResult<()> {
        let model = self.model();
        let rdf_type = model.vocab().rdf_type.clone();
        let ty: RdfObject = characteristic.type_node(model.vocab()).clone().into();
        if !enabled {
            self.remove_statements(&rdf_type, Some(&ty))?;
            return Ok(());
        }
        if let Some(control) = characteristic.control() {
            model.config().check_feature(control, &characteristic.to_string())?;
        }
        if !characteristic.applies_to(self.kind) || !characteristic.is_allowed_in(model.profile()) {
            return Err(OntError::Unsupported(format!(
                "{} on {} {} under {}",
                characteristic,
                self.kind,
                self.node(),
                model.profile()
            )));
        }
        self.add_statement(&rdf_type, ty);
        Ok(())
    }

    fn is_relational(&self) -> bool {
        matches!(self.kind, PropertyKind::Object | PropertyKind::Data)
    }

    /// `other` must be a property of the same kind, and both object or data
    /// properties
    fn check_pair(&self, other: &OntProperty<'_>, axiom: &str) -> OntResult<()> {
        if !self.is_relational() {
            return Err(OntError::Unsupported(format!("{} on {} {}", axiom, self.kind, self.node())));
        }
        if other.kind != self.kind {
            return Err(OntError::IllegalArgument(format!(
                "{} between {} {} and {} {}",
                axiom,
                self.kind,
                self.node(),
                other.kind,
                other.node()
            )));
        }
        Ok(())
    }

    /// Object properties related through `owl:inverseOf`, in either direction
    pub fn inverse_properties(&self) -> Vec<OntProperty<'m>> {
        if self.kind != PropertyKind::Object {
            return Vec::new();
        }
        self.peers(self.symmetric_nodes(&self.model().vocab().owl_inverse_of))
    }

    pub fn add_inverse_property(&self, other: &OntProperty<'_>) -> OntResult<OntStatement<'m>> {
        if self.kind != PropertyKind::Object {
            return Err(OntError::Unsupported(format!("owl:inverseOf on {} {}", self.kind, self.node())));
        }
        self.check_pair(other, "owl:inverseOf")?;
        let predicate = self.model().vocab().owl_inverse_of.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_inverse_property(&self, other: Option<&OntProperty<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_inverse_of.clone();
        self.remove_symmetric(&predicate, other.map(|p| p.node()))
    }

    pub fn equivalent_properties(&self) -> Vec<OntProperty<'m>> {
        if !self.is_relational() {
            return Vec::new();
        }
        self.peers(self.symmetric_nodes(&self.model().vocab().owl_equivalent_property))
    }

    pub fn add_equivalent_property(&self, other: &OntProperty<'_>) -> OntResult<OntStatement<'m>> {
        self.check_pair(other, "owl:equivalentProperty")?;
        let predicate = self.model().vocab().owl_equivalent_property.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_equivalent_property(&self, other: Option<&OntProperty<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_equivalent_property.clone();
        self.remove_symmetric(&predicate, other.map(|p| p.node()))
    }

    pub fn disjoint_properties(&self) -> Vec<OntProperty<'m>> {
        let model = self.model();
        if !self.is_relational() || !model.config().is_enabled(OntControl::Owl2PropertyAxioms) {
            return Vec::new();
        }
        self.peers(self.symmetric_nodes(&model.vocab().owl_property_disjoint_with))
    }

    pub fn add_disjoint_property(&self, other: &OntProperty<'_>) -> OntResult<OntStatement<'m>> {
        self.model()
            .config()
            .check_feature(OntControl::Owl2PropertyAxioms, "owl:propertyDisjointWith")?;
        self.check_pair(other, "owl:propertyDisjointWith")?;
        let predicate = self.model().vocab().owl_property_disjoint_with.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_disjoint_property(&self, other: Option<&OntProperty<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_property_disjoint_with.clone();
        self.remove_symmetric(&predicate, other.map(|p| p.node()))
    }
}

impl<'m> Deref for OntProperty<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}
