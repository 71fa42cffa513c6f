//! Class view
//!
//! [`OntClass`] covers named classes and anonymous class expressions. The
//! hierarchy follows `rdfs:subClassOf`; direct queries read the graph's
//! direct predicate when the graph provides one.

use super::config::OntControl;
use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::expression::{can_be_sub_class, can_be_super_class, ClassExpressionKind};
use super::hierarchy;
use super::individual::OntIndividual;
use super::list::OntList;
use super::model::OntModel;
use super::object::OntObject;
use super::property::OntProperty;
use super::statement::OntStatement;
use crate::rdf::{BlankNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use std::ops::Deref;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntClass<'m> {
    object: OntObject<'m>,
    kind: ClassExpressionKind,
}

/// Explicit `rdfs:subClassOf` parents usable in super position
pub(crate) fn explicit_super_classes(model: &OntModel, node: &RdfObject) -> Vec<RdfObject> {
    let Some(subject) = node.as_subject() else {
        return Vec::new();
    };
    model
        .objects_of(&subject, &model.vocab().rdfs_sub_class_of)
        .into_iter()
        .filter(|o| model.as_class(o).map_or(false, |c| c.can_as_super_class()))
        .collect()
}

fn explicit_sub_classes(model: &OntModel, node: &RdfObject) -> Vec<RdfObject> {
    model
        .subjects_of(&model.vocab().rdfs_sub_class_of, node)
        .into_iter()
        .map(RdfObject::from)
        .filter(|s| model.as_class(s).map_or(false, |c| c.can_as_sub_class()))
        .collect()
}

impl<'m> OntClass<'m> {
    pub(crate) fn new(model: &'m OntModel, node: RdfObject, kind: ClassExpressionKind) -> Option<Self> {
        OntObject::new(model, node, ViewKind::Class).map(|object| Self { object, kind })
    }

    pub fn into_object(self) -> OntObject<'m> {
        self.object
    }

    pub fn expression(&self) -> &ClassExpressionKind {
        &self.kind
    }

    pub fn is_named_class(&self) -> bool {
        self.kind == ClassExpressionKind::Named
    }

    pub fn can_as_sub_class(&self) -> bool {
        can_be_sub_class(&self.kind, self.model().profile())
    }

    pub fn can_as_super_class(&self) -> bool {
        can_be_super_class(&self.kind, self.model().profile())
    }

    fn classes(&self, nodes: impl IntoIterator<Item = RdfObject>) -> Vec<OntClass<'m>> {
        let model = self.model();
        nodes.into_iter().filter_map(|n| model.as_class(&n)).collect()
    }

    /// Super classes. Direct mode reads the graph's direct predicate when
    /// there is one, else reduces the explicit parents to the same answer.
    pub fn super_classes(&self, direct: bool) -> Vec<OntClass<'m>> {
        let model = self.model();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_class_of) {
                let parents = model.objects_of(self.subject(), &dp);
                return self
                    .classes(parents.into_iter().filter(|n| n != self.node()))
                    .into_iter()
                    .filter(|c| c.can_as_super_class())
                    .collect();
            }
        }
        self.classes(hierarchy::tree_nodes(
            self.node(),
            |n| explicit_super_classes(model, n),
            direct,
        ))
    }

    pub fn sub_classes(&self, direct: bool) -> Vec<OntClass<'m>> {
        let model = self.model();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_class_of) {
                let children = model.subjects_of(&dp, self.node());
                return self
                    .classes(children.into_iter().map(RdfObject::from).filter(|n| n != self.node()))
                    .into_iter()
                    .filter(|c| c.can_as_sub_class())
                    .collect();
            }
        }
        self.classes(hierarchy::tree_nodes(
            self.node(),
            |n| explicit_sub_classes(model, n),
            direct,
        ))
    }

    /// Is `other` a super class. Reflexive.
    pub fn has_super_class(&self, other: &OntClass<'_>, direct: bool) -> bool {
        if self.node() == other.node() {
            return true;
        }
        if !self.can_as_sub_class() || !other.can_as_super_class() {
            return false;
        }
        let model = self.model();
        if direct {
            if let Some(dp) = model.direct_predicate(&model.vocab().rdfs_sub_class_of) {
                return model.contains(&Triple::new(self.subject().clone(), dp, other.node().clone()));
            }
        }
        hierarchy::contains(
            self.node(),
            other.node(),
            |n| explicit_super_classes(model, n),
            direct,
        )
    }

    /// No direct parent besides itself and the top classes
    pub fn is_hierarchy_root(&self) -> bool {
        let model = self.model();
        if model.personality().builtins().classes.iter().any(|b| Some(b) == self.iri()) {
            return false;
        }
        let tops: Vec<RdfObject> = model
            .vocab()
            .class_tops()
            .into_iter()
            .map(|t| RdfObject::from(t.clone()))
            .collect();
        let parents = self.super_classes(true).into_iter().map(|c| c.node().clone());
        hierarchy::is_hierarchy_root(self.node(), parents, &tops)
    }

    /// Individuals of this class. Direct mode keeps those for which this is
    /// one of their direct classes; otherwise sub classes count too.
    pub fn individuals(&self, direct: bool) -> Vec<OntIndividual<'m>> {
        let model = self.model();
        let rdf_type = &model.vocab().rdf_type;
        let mut seen: IndexSet<RdfObject> = IndexSet::new();
        if direct {
            seen.extend(model.subjects_of(rdf_type, self.node()).into_iter().map(RdfObject::from));
        } else {
            let mut classes = vec![self.node().clone()];
            classes.extend(self.sub_classes(false).into_iter().map(|c| c.node().clone()));
            for class in &classes {
                seen.extend(model.subjects_of(rdf_type, class).into_iter().map(RdfObject::from));
            }
        }
        seen.into_iter()
            .filter_map(|n| model.as_individual(&n))
            .filter(|i| !direct || i.classes(true).iter().any(|c| c.node() == self.node()))
            .collect()
    }

    /// Properties whose `rdfs:domain` is this class, or with `direct` off
    /// any of its super classes
    pub fn declared_properties(&self, direct: bool) -> Vec<OntProperty<'m>> {
        let model = self.model();
        let mut classes = vec![self.node().clone()];
        if !direct {
            classes.extend(self.super_classes(false).into_iter().map(|c| c.node().clone()));
        }
        let mut seen: IndexSet<RdfObject> = IndexSet::new();
        for class in &classes {
            seen.extend(
                model
                    .subjects_of(&model.vocab().rdfs_domain, class)
                    .into_iter()
                    .map(RdfObject::from),
            );
        }
        seen.into_iter().filter_map(|n| model.as_property(&n)).collect()
    }

    pub fn has_declared_property(&self, property: &OntProperty<'_>, direct: bool) -> bool {
        self.declared_properties(direct)
            .iter()
            .any(|p| p.node() == property.node())
    }

    pub fn add_super_class(&self, other: &OntClass<'_>) -> OntResult<OntStatement<'m>> {
        if !self.can_as_sub_class() || !other.can_as_super_class() {
            return Err(OntError::Unsupported(format!(
                "{} rdfs:subClassOf {} under {}",
                self.kind,
                other.kind,
                self.model().profile()
            )));
        }
        let predicate = self.model().vocab().rdfs_sub_class_of.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    /// Remove `rdfs:subClassOf` to `other`, or every super class link
    pub fn remove_super_class(&self, other: Option<&OntClass<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().rdfs_sub_class_of.clone();
        self.remove_statements(&predicate, other.map(|c| c.node()))
    }

    /// Objects and subjects of a symmetric class axiom
    fn symmetric(&self, predicate: &RdfPredicate) -> Vec<OntClass<'m>> {
        self.classes(self.symmetric_nodes(predicate))
    }

    pub fn disjoint_classes(&self) -> Vec<OntClass<'m>> {
        if !self.model().config().is_enabled(OntControl::OwlClassDisjointWith) {
            return Vec::new();
        }
        self.symmetric(&self.model().vocab().owl_disjoint_with)
    }

    pub fn add_disjoint_class(&self, other: &OntClass<'_>) -> OntResult<OntStatement<'m>> {
        self.model()
            .config()
            .check_feature(OntControl::OwlClassDisjointWith, "owl:disjointWith")?;
        let predicate = self.model().vocab().owl_disjoint_with.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    /// Remove `owl:disjointWith` with `other` (or every disjoint class), in
    /// both directions
    pub fn remove_disjoint_class(&self, other: Option<&OntClass<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_disjoint_with.clone();
        self.remove_symmetric(&predicate, other.map(|c| c.node()))
    }

    pub fn equivalent_classes(&self) -> Vec<OntClass<'m>> {
        if !self.model().config().is_enabled(OntControl::OwlClassEquivalent) {
            return Vec::new();
        }
        self.symmetric(&self.model().vocab().owl_equivalent_class)
    }

    pub fn add_equivalent_class(&self, other: &OntClass<'_>) -> OntResult<OntStatement<'m>> {
        self.model()
            .config()
            .check_feature(OntControl::OwlClassEquivalent, "owl:equivalentClass")?;
        let predicate = self.model().vocab().owl_equivalent_class.clone();
        Ok(self.add_statement(&predicate, other.node().clone()))
    }

    pub fn remove_equivalent_class(&self, other: Option<&OntClass<'_>>) -> OntResult<usize> {
        let predicate = self.model().vocab().owl_equivalent_class.clone();
        self.remove_symmetric(&predicate, other.map(|c| c.node()))
    }

    /// Attach an `owl:hasKey` list of properties
    pub fn create_has_key(&self, properties: &[OntProperty<'_>]) -> OntResult<OntList<'m>> {
        let model = self.model();
        model
            .config()
            .check_feature(OntControl::Owl2ClassHasKey, "owl:hasKey")?;
        if !self.can_as_sub_class() {
            return Err(OntError::Unsupported(format!(
                "owl:hasKey on {} under {}",
                self.kind,
                model.profile()
            )));
        }
        model.create_list(
            self.subject(),
            &model.vocab().owl_has_key,
            None,
            Some(ViewKind::Property),
            properties.iter().map(|p| p.node().clone()),
        )
    }

    pub fn has_keys(&self) -> Vec<OntList<'m>> {
        let model = self.model();
        if !model.config().is_enabled(OntControl::Owl2ClassHasKey) {
            return Vec::new();
        }
        model
            .lists(self.subject(), &model.vocab().owl_has_key)
            .into_iter()
            .map(|l| l.with_element_kind(ViewKind::Property))
            .collect()
    }

    /// New individual of this class, named when `iri` is given. Named
    /// individuals are also declared `owl:NamedIndividual` when that
    /// control is on.
    pub fn create_individual(&self, iri: Option<&str>) -> OntResult<OntIndividual<'m>> {
        let model = self.model();
        let v = model.vocab();
        let subject: RdfSubject = match iri {
            Some(iri) => model.iri(iri)?.into(),
            None => BlankNode::new().into(),
        };
        model.add(Triple::new(subject.clone(), v.rdf_type.clone(), self.node().clone()));
        if subject.is_named_node()
            && model.profile().is_owl()
            && model.config().is_enabled(OntControl::Owl2NamedIndividualDeclaration)
        {
            model.add(Triple::new(
                subject.clone(),
                v.rdf_type.clone(),
                v.owl_named_individual.clone().into(),
            ));
        }
        let node: RdfObject = subject.into();
        debug!(individual = %node, class = %self.node(), "Created individual");
        model
            .as_individual(&node)
            .ok_or_else(|| OntError::IllegalState(format!("{} did not cast to an individual", node)))
    }
}

impl<'m> Deref for OntClass<'m> {
    type Target = OntObject<'m>;

    fn deref(&self) -> &Self::Target {
        &self.object
    }
}

impl OntModel {
    /// Named classes with no parent other than a top class
    pub fn hierarchy_roots(&self) -> Vec<OntClass<'_>> {
        self.classes()
            .into_iter()
            .filter(|c| c.is_named_class() && c.is_hierarchy_root())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ont::config::{OntConfig, OntProfile};
    use crate::rdf::{load_turtle, InfGraph, RdfStore, RdfsReasoner};

    const ZOO: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        ex:Animal a owl:Class ; rdfs:subClassOf owl:Thing .
        ex:Mammal a owl:Class ; rdfs:subClassOf ex:Animal .
        ex:Dog a owl:Class ; rdfs:subClassOf ex:Mammal , ex:Animal .
        ex:Plant a owl:Class .
        ex:rex a ex:Dog .
        ex:tom a ex:Mammal .
        ex:legs a owl:DatatypeProperty ; rdfs:domain ex:Animal .
        ex:barks a owl:DatatypeProperty ; rdfs:domain ex:Dog .
    "#;

    fn zoo() -> OntModel {
        OntModel::from_document(load_turtle(ZOO.as_bytes()).unwrap(), OntConfig::default())
    }

    fn names(classes: &[OntClass<'_>]) -> Vec<String> {
        classes
            .iter()
            .map(|c| c.iri().map(|i| i.as_str().trim_start_matches("http://example.org/").to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_super_and_sub_classes() {
        let model = zoo();
        let dog = model.get_class("ex:Dog").unwrap();
        // Dog -> Animal is a shortcut through Mammal
        assert_eq!(names(&dog.super_classes(true)), vec!["Mammal"]);
        assert_eq!(
            names(&dog.super_classes(false)),
            vec!["Mammal", "Animal", "http://www.w3.org/2002/07/owl#Thing"]
        );
        let animal = model.get_class("ex:Animal").unwrap();
        assert_eq!(names(&animal.sub_classes(false)), vec!["Mammal", "Dog"]);
        assert!(dog.has_super_class(&animal, false));
        assert!(!dog.has_super_class(&animal, true));
        assert!(dog.has_super_class(&dog, true));
        let mammal = model.get_class("ex:Mammal").unwrap();
        assert_eq!(names(&animal.sub_classes(true)), vec!["Mammal"]);
        assert!(!mammal.is_hierarchy_root());
        assert!(!animal.has_super_class(&dog, false));
    }

    #[test]
    fn test_reasoner_direct_predicate() {
        let doc = load_turtle(ZOO.as_bytes()).unwrap();
        let graph = InfGraph::new(RdfStore::from_triples(doc.triples), RdfsReasoner::new());
        let mut model = OntModel::with_config(graph, OntConfig::default());
        *model.prefixes_mut() = doc.prefixes;
        let dog = model.get_class("ex:Dog").unwrap();
        // the reduction drops Dog -> Animal
        assert_eq!(names(&dog.super_classes(true)), vec!["Mammal"]);
        let animal = model.get_class("ex:Animal").unwrap();
        assert!(!dog.has_super_class(&animal, true));
        assert!(dog.has_super_class(&animal, false));
    }

    #[test]
    fn test_roots_and_individuals() {
        let model = zoo();
        assert_eq!(names(&model.hierarchy_roots()), vec!["Animal", "Plant"]);
        let mammal = model.get_class("ex:Mammal").unwrap();
        let direct: Vec<_> = mammal.individuals(true).iter().map(|i| i.node().to_string()).collect();
        assert_eq!(direct, vec!["<http://example.org/tom>"]);
        assert_eq!(mammal.individuals(false).len(), 2);
    }

    #[test]
    fn test_declared_properties() {
        let model = zoo();
        let dog = model.get_class("ex:Dog").unwrap();
        let legs = model.get_property("ex:legs").unwrap();
        assert_eq!(dog.declared_properties(true).len(), 1);
        assert!(!dog.has_declared_property(&legs, true));
        assert!(dog.has_declared_property(&legs, false));
    }

    #[test]
    fn test_add_and_remove_super_class() {
        let model = zoo();
        let plant = model.get_class("ex:Plant").unwrap();
        let animal = model.get_class("ex:Animal").unwrap();
        let s = plant.add_super_class(&animal).unwrap();
        assert!(s.exists());
        assert!(plant.has_super_class(&animal, true));
        assert_eq!(plant.remove_super_class(Some(&animal)).unwrap(), 1);
        assert!(!plant.has_super_class(&animal, false));
    }

    #[test]
    fn test_profile_blocks_sub_class_position() {
        let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Owl2Ql));
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let union = model.create_union_of(&[a.clone(), b.clone()]).unwrap();
        let size = model.size();
        assert!(matches!(union.add_super_class(&a), Err(OntError::Unsupported(_))));
        assert_eq!(model.size(), size);
        assert!(!union.has_super_class(&a, false));
        // reflexive even where the profile rejects the expression as a sub class
        assert!(union.has_super_class(&union, false));
        assert!(union.has_super_class(&union, true));
    }

    #[test]
    fn test_restriction_is_its_own_super_class_under_ql() {
        let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Owl2Ql));
        let c = model.create_class("http://example.org/C").unwrap();
        let p = model.create_object_property("http://example.org/p").unwrap();
        let only = model.create_all_values_from(&p, c.node()).unwrap();
        assert!(!only.can_as_sub_class());
        assert!(only.has_super_class(&only, false));
        assert!(only.has_super_class(&only, true));
        assert!(!only.has_super_class(&c, false));
    }

    #[test]
    fn test_symmetric_axioms_and_features() {
        let model = zoo();
        let dog = model.get_class("ex:Dog").unwrap();
        let plant = model.get_class("ex:Plant").unwrap();
        plant.add_disjoint_class(&dog).unwrap();
        assert_eq!(names(&dog.disjoint_classes()), vec!["Plant"]);

        let config = OntConfig::default().with(OntControl::OwlClassDisjointWith, false);
        let off = OntModel::with_config(RdfStore::new(), config);
        let a = off.create_class("http://example.org/A").unwrap();
        let b = off.create_class("http://example.org/B").unwrap();
        let err = a.add_disjoint_class(&b).unwrap_err();
        assert!(err.to_string().contains("owl:disjointWith"));
        assert!(a.disjoint_classes().is_empty());
        a.add_equivalent_class(&b).unwrap();
        assert_eq!(b.equivalent_classes().len(), 1);
    }

    #[test]
    fn test_remove_symmetric_axioms_from_either_side() {
        let model = zoo();
        let dog = model.get_class("ex:Dog").unwrap();
        let plant = model.get_class("ex:Plant").unwrap();
        let before = model.size();
        plant.add_disjoint_class(&dog).unwrap();
        dog.add_disjoint_class(&plant).unwrap();
        assert_eq!(dog.remove_disjoint_class(Some(&plant)).unwrap(), 2);
        assert!(plant.disjoint_classes().is_empty());
        assert_eq!(model.size(), before);

        let mammal = model.get_class("ex:Mammal").unwrap();
        mammal.add_equivalent_class(&dog).unwrap();
        assert_eq!(dog.remove_equivalent_class(None).unwrap(), 1);
        assert!(mammal.equivalent_classes().is_empty());
    }

    #[test]
    fn test_has_key() {
        let model = zoo();
        let dog = model.get_class("ex:Dog").unwrap();
        let legs = model.get_property("ex:legs").unwrap();
        let list = dog.create_has_key(&[legs]).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(dog.has_keys(), vec![list]);

        let ql = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Owl2Ql));
        let a = ql.create_class("http://example.org/A").unwrap();
        assert_eq!(
            a.create_has_key(&[]).unwrap_err(),
            OntError::Unsupported("Feature owl:hasKey is disabled. Profile OWL2-QL".into())
        );
        assert!(a.has_keys().is_empty());
    }

    #[test]
    fn test_create_individual() {
        let model = OntModel::in_memory();
        let dog = model.create_class("http://example.org/Dog").unwrap();
        let rex = dog.create_individual(Some("http://example.org/rex")).unwrap();
        assert!(model.has_type(rex.node(), &model.vocab().owl_named_individual));
        assert_eq!(model.size(), 3);
        let anon = dog.create_individual(None).unwrap();
        assert!(anon.node().is_blank_node());
        assert_eq!(dog.individuals(true).len(), 2);

        let config = OntConfig::default().with(OntControl::Owl2NamedIndividualDeclaration, false);
        let plain = OntModel::with_config(RdfStore::new(), config);
        let cat = plain.create_class("http://example.org/Cat").unwrap();
        cat.create_individual(Some("http://example.org/tom")).unwrap();
        assert_eq!(plain.size(), 2);
    }
}
