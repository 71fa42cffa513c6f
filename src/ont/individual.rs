//! Individual view

use super::class::{explicit_super_classes, OntClass};
use super::config::OntControl;
use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::hierarchy;
use super::model::OntModel;
use super::object::OntObject;
use super::property::{OntProperty, PropertyKind};
use super::statement::OntStatement;
use crate::rdf::{BlankNode, RdfObject, RdfSubject, Triple};
use std::ops::Deref;
use tracing::debug;

/// A named or anonymous individual
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntIndividual<'m> {
    object: OntObject<'m>,
}

impl<'m> OntIndividual<'m> {
    pub(crate) fn new(model: &'m OntModel, node: RdfObject) -> Option<Self> {
        OntObject::new(model, node, ViewKind::Individual).map(|object| Self { object })
    }

    pub fn into_object(self) -> OntObject<'m> {
        self.object
    }

    fn asserted_classes(&self) -> Vec<OntClass<'m>> {
        let model = self.model();
        self.types()
            .into_iter()
            .filter_map(|t| model.as_class(&t))
            .collect()
    }

    /// Classes of this individual. Direct mode drops asserted classes that
    /// another asserted class is a strict sub class of; otherwise the super
    /// classes of every asserted class are added.
    pub fn classes(&self, direct: bool) -> Vec<OntClass<'m>> {
        let model = self.model();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdf_type) {
                return model
                    .objects_of(self.subject(), &dp)
                    .into_iter()
                    .filter_map(|t| model.as_class(&t))
                    .collect();
            }
            let asserted = self.asserted_classes();
            return asserted
                .iter()
                .filter(|c| {
                    !asserted.iter().any(|other| {
                        other.node() != c.node()
                            && other.has_super_class(c, false)
                            && !c.has_super_class(other, false)
                    })
                })
                .cloned()
                .collect();
        }
        let seeds = self.asserted_classes().into_iter().map(|c| c.node().clone());
        hierarchy::all_nodes_inclusive(seeds, |n| explicit_super_classes(model, n))
            .into_iter()
            .filter_map(|n| model.as_class(&n))
            .collect()
    }

    pub fn has_ont_class(&self, class: &OntClass<'_>, direct: bool) -> bool {
        self.classes(direct).iter().any(|c| c.node() == class.node())
    }

    pub fn add_class_assertion(&self, class: &OntClass<'_>) -> OntResult<OntStatement<'m>> {
        let predicate = self.model().vocab().rdf_type.clone();
        Ok(self.add_statement(&predicate, class.node().clone()))
    }

    /// Remove `rdf:type class`, or every class assertion
    pub fn remove_class_assertion(&self, class: Option<&OntClass<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().rdf_type.clone();
        match class {
            Some(class) => self.remove_statements(&predicate, Some(class.node())),
            None => {
                let mut removed = 0;
                for class in self.asserted_classes() {
                    removed += self.remove_statements(&predicate, Some(class.node()))?;
                }
                Ok(removed)
            }
        }
    }
}

impl<'m> OntIndividual<'m> {
    fn peers(&self, nodes: impl IntoIterator<Item = RdfObject>) -> Vec<OntIndividual<'m>> {
        let model = self.model();
        nodes.into_iter().filter_map(|n| model.as_individual(&n)).collect()
    }

    fn check_owl(&self, axiom: &str) -> OntResult<()> {
        let profile = self.model().profile();
        if profile.is_owl() {
            return Ok(());
        }
        Err(OntError::Unsupported(format!("{} under {}", axiom, profile)))
    }

    /// Individuals related through `owl:sameAs`, in either direction
    pub fn same_individuals(&self) -> Vec<OntIndividual<'m>> {
        let model = self.model();
        if !model.config().is_enabled(OntControl::OwlIndividualSameAs) {
            return Vec::new();
        }
        self.peers(self.symmetric_nodes(&model.vocab().owl_same_as))
    }

    pub fn add_same_individual(&self, other: &OntIndividual<'_>) -> OntResult<OntStatement<'m>> {
        self.model()
            .config()
            .check_feature(OntControl::OwlIndividualSameAs, "owl:sameAs")?;
        let predicate = self.model().vocab().owl_same_as.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_same_individual(&self, other: Option<&OntIndividual<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_same_as.clone();
        self.remove_symmetric(&predicate, other.map(|i| i.node()))
    }

    /// Individuals related through `owl:differentFrom`, in either direction
    pub fn different_individuals(&self) -> Vec<OntIndividual<'m>> {
        if !self.model().profile().is_owl() {
            return Vec::new();
        }
        self.peers(self.symmetric_nodes(&self.model().vocab().owl_different_from))
    }

    pub fn add_different_individual(&self, other: &OntIndividual<'_>) -> OntResult<OntStatement<'m>> {
        self.check_owl("owl:differentFrom")?;
        let predicate = self.model().vocab().owl_different_from.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_different_individual(&self, other: Option<&OntIndividual<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_different_from.clone();
        self.remove_symmetric(&predicate, other.map(|i| i.node()))
    }

    /// Does `value` fit as the target of an assertion on `property`
    fn check_value(&self, property: &OntProperty<'_>, value: &RdfObject) -> OntResult<()> {
        let fits = match property.property_kind() {
            PropertyKind::Object => self.model().can_as(value, ViewKind::Individual),
            PropertyKind::Data => value.is_literal(),
            PropertyKind::Annotation | PropertyKind::Rdf => true,
        };
        if fits {
            return Ok(());
        }
        Err(OntError::IllegalArgument(format!(
            "{} is not a valid value of {} {}",
            value,
            property.property_kind(),
            property.node()
        )))
    }

    /// Statements `(this, P, v)` whose predicate is a property, optionally
    /// for a single property
    pub fn positive_assertions(&self, property: Option<&OntProperty<'_>>) -> Vec<OntStatement<'m>> {
        let model = self.model();
        let predicate = property.and_then(|p| p.as_predicate());
        self.statements(predicate.as_ref())
            .into_iter()
            .filter(|s| model.can_as(&s.predicate().clone().into(), ViewKind::Property))
            .collect()
    }

    /// Object properties take individuals, data properties literals
    pub fn add_assertion(
        &self,
        property: &OntProperty<'_>,
        value: impl Into<RdfObject>,
    ) -> OntResult<OntStatement<'m>> {
        let value = value.into();
        self.check_value(property, &value)?;
        let predicate = property
            .as_predicate()
            .ok_or_else(|| OntError::IllegalArgument(format!("{} is not a predicate", property.node())))?;
        Ok(self.add_statement(&predicate, value))
    }

    /// Remove positive assertions, narrowed by property and by value
    pub fn remove_assertion(&self, property: Option<&OntProperty<'_>>, value: Option<&RdfObject>) -> OntResult<usize> {
        let model = self.model();
        let mut removed = 0;
        for statement in self.positive_assertions(property) {
            if value.map_or(true, |v| statement.object() == v) {
                model.remove_statement(&statement)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Negative property assertions with this individual as source,
    /// optionally for one property
    pub fn negative_assertions(&self, property: Option<&OntProperty<'_>>) -> Vec<NegativeAssertion<'m>> {
        let model = self.model();
        if !model.config().is_enabled(OntControl::Owl2PropertyAxioms) {
            return Vec::new();
        }
        model
            .subjects_of(&model.vocab().owl_source_individual, self.node())
            .into_iter()
            .filter_map(|s| NegativeAssertion::read(model, s.into()))
            .filter(|a| property.map_or(true, |p| a.property() == p.node()))
            .collect()
    }

    /// Assert that `(this, property, value)` does not hold
    pub fn add_negative_assertion(
        &self,
        property: &OntProperty<'_>,
        value: impl Into<RdfObject>,
    ) -> OntResult<NegativeAssertion<'m>> {
        let model = self.model();
        model
            .config()
            .check_feature(OntControl::Owl2PropertyAxioms, "owl:NegativePropertyAssertion")?;
        let v = model.vocab();
        let target = match property.property_kind() {
            PropertyKind::Object => &v.owl_target_individual,
            PropertyKind::Data => &v.owl_target_value,
            kind => {
                return Err(OntError::Unsupported(format!(
                    "owl:NegativePropertyAssertion on {} {}",
                    kind,
                    property.node()
                )))
            }
        };
        let value = value.into();
        self.check_value(property, &value)?;

        let node: RdfSubject = BlankNode::new().into();
        model.add(Triple::new(
            node.clone(),
            v.rdf_type.clone(),
            v.owl_negative_property_assertion.clone().into(),
        ));
        model.add(Triple::new(node.clone(), v.owl_source_individual.clone(), self.node().clone()));
        model.add(Triple::new(node.clone(), v.owl_assertion_property.clone(), property.node().clone()));
        model.add(Triple::new(node.clone(), target.clone(), value));
        debug!(source = %self.node(), property = %property.node(), "Added negative property assertion");
        NegativeAssertion::read(model, node.clone().into())
            .ok_or_else(|| OntError::IllegalState(format!("{} is not a negative property assertion", node)))
    }

    /// Remove negative assertions, narrowed by property and by value
    pub fn remove_negative_assertion(
        &self,
        property: Option<&OntProperty<'_>>,
        value: Option<&RdfObject>,
    ) -> OntResult<usize> {
        let model = self.model();
        let mut removed = 0;
        for assertion in self.negative_assertions(property) {
            if value.map_or(true, |v| assertion.target() == v) {
                model.remove_object(assertion.node())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// An `owl:NegativePropertyAssertion` node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NegativeAssertion<'m> {
    object: OntObject<'m>,
    source: RdfObject,
    property: RdfObject,
    target: RdfObject,
}

impl<'m> NegativeAssertion<'m> {
    /// `None` unless the node is typed and has a source, a property and a target
    fn read(model: &'m OntModel, node: RdfObject) -> Option<Self> {
        let v = model.vocab();
        if !model.has_type(&node, &v.owl_negative_property_assertion) {
            return None;
        }
        let object = OntObject::new(model, node, ViewKind::Object)?;
        let source = object.object(&v.owl_source_individual)?;
        let property = object.object(&v.owl_assertion_property)?;
        let target = object
            .object(&v.owl_target_individual)
            .or_else(|| object.object(&v.owl_target_value))?;
        Some(Self {
            object,
            source,
            property,
            target,
        })
    }

    pub fn source(&self) -> &RdfObject {
        &self.source
    }

    pub fn property(&self) -> &RdfObject {
        &self.property
    }

    /// Individual or literal
    pub fn target(&self) -> &RdfObject {
        &self.target
    }
}

impl<'m> Deref for NegativeAssertion<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl<'m> Deref for OntIndividual<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}
