//! Personalities: vocabulary, configuration, built-ins and the view table
//!
//! An [`OntPersonality`] is the per-model bundle that decides what a node
//! "is". It is built from an [`OntConfig`]; the profile selects which
//! structural shapes are registered for each [`ViewKind`].

use super::annotation::OntAnnotation;
use super::class::OntClass;
use super::config::{OntConfig, OntProfile};
use super::dispatch::{View, ViewFactory, ViewKind, ViewRegistry};
use super::expression::{decode, CardinalityKind, ClassExpressionShape};
use super::individual::OntIndividual;
use super::list::OntList;
use super::model::OntModel;
use super::object::OntObject;
use super::property::{OntProperty, PropertyKind};
use crate::rdf::{NamedNode, OntVocabulary, RdfObject, Triple};
use indexmap::{IndexMap, IndexSet};

/// Nodes that conform to a kind without any declaration triple
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Builtins {
    pub classes: IndexSet<NamedNode>,
    pub object_properties: IndexSet<NamedNode>,
    pub data_properties: IndexSet<NamedNode>,
    pub annotation_properties: IndexSet<NamedNode>,
    pub datatypes: IndexSet<NamedNode>,
}

impl Builtins {
    fn owl(v: &OntVocabulary) -> Self {
        Self {
            classes: [v.owl_thing.clone(), v.owl_nothing.clone()].into_iter().collect(),
            object_properties: [v.owl_top_object_property.clone(), v.owl_bottom_object_property.clone()]
                .into_iter()
                .collect(),
            data_properties: [v.owl_top_data_property.clone(), v.owl_bottom_data_property.clone()]
                .into_iter()
                .collect(),
            annotation_properties: v.builtin_annotation_properties.iter().cloned().collect(),
            datatypes: v.builtin_datatypes.iter().cloned().collect(),
        }
    }

    fn rdfs(v: &OntVocabulary) -> Self {
        Self {
            classes: [v.rdfs_resource.clone()].into_iter().collect(),
            object_properties: IndexSet::new(),
            data_properties: IndexSet::new(),
            annotation_properties: [
                &v.rdfs_label,
                &v.rdfs_comment,
                &v.rdfs_see_also,
                &v.rdfs_is_defined_by,
            ]
            .into_iter()
            .map(|p| p.as_named_node().clone())
            .collect(),
            datatypes: v.builtin_datatypes.iter().cloned().collect(),
        }
    }

    /// Built-ins of one kind, composite kinds included
    pub fn of(&self, kind: ViewKind) -> Vec<&NamedNode> {
        match kind {
            ViewKind::Class | ViewKind::NamedClass => self.classes.iter().collect(),
            ViewKind::ObjectProperty => self.object_properties.iter().collect(),
            ViewKind::DataProperty => self.data_properties.iter().collect(),
            ViewKind::AnnotationProperty => self.annotation_properties.iter().collect(),
            ViewKind::Property => self
                .object_properties
                .iter()
                .chain(&self.data_properties)
                .chain(&self.annotation_properties)
                .collect(),
            ViewKind::Datatype => self.datatypes.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, node: &NamedNode) -> bool {
        self.classes.contains(node)
            || self.object_properties.contains(node)
            || self.data_properties.contains(node)
            || self.annotation_properties.contains(node)
            || self.datatypes.contains(node)
    }
}

/// Vocabulary, configuration, built-ins and view table of a model
#[derive(Debug, Clone)]
pub struct OntPersonality {
    name: String,
    vocab: OntVocabulary,
    config: OntConfig,
    builtins: Builtins,
    registry: ViewRegistry,
    declarations: IndexMap<ViewKind, Vec<NamedNode>>,
}

impl OntPersonality {
    /// Personality over the W3C vocabulary
    pub fn new(config: OntConfig) -> Self {
        Self::with_vocabulary(config, OntVocabulary::w3c())
    }

    pub fn with_vocabulary(config: OntConfig, vocab: OntVocabulary) -> Self {
        let profile = config.profile;
        let (builtins, registry) = if profile.is_owl() {
            (Builtins::owl(&vocab), owl_registry())
        } else {
            (Builtins::rdfs(&vocab), rdfs_registry())
        };
        let declarations = declarations(&vocab, profile);
        Self {
            name: profile.name().to_string(),
            vocab,
            config,
            builtins,
            registry,
            declarations,
        }
    }

    pub fn from_profile(profile: OntProfile) -> Self {
        Self::new(OntConfig::new(profile))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vocab(&self) -> &OntVocabulary {
        &self.vocab
    }

    pub fn config(&self) -> &OntConfig {
        &self.config
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Register an extra candidate for a kind, after the built-in ones
    pub fn register(&mut self, kind: ViewKind, factory: ViewFactory) {
        self.registry.register(kind, factory);
    }

    /// `rdf:type` objects that declare a node of this kind.
    /// Empty for kinds without a declaring triple.
    pub fn declaring_types(&self, kind: ViewKind) -> Vec<NamedNode> {
        let mut out: IndexSet<NamedNode> = self.declarations.get(&kind).into_iter().flatten().cloned().collect();
        for part in kind.parts() {
            out.extend(self.declaring_types(*part));
        }
        out.into_iter().collect()
    }

    /// Is this triple the declaration (root statement) of its subject for some kind
    pub fn is_declaration(&self, triple: &Triple) -> bool {
        triple.predicate == self.vocab.rdf_type
            && triple
                .object
                .as_named_node()
                .map_or(false, |ty| self.declarations.values().flatten().any(|d| d == ty))
    }

    pub fn is_builtin(&self, kind: ViewKind, node: &RdfObject) -> bool {
        node.as_named_node()
            .map_or(false, |n| self.builtins.of(kind).contains(&n))
    }
}

impl Default for OntPersonality {
    fn default() -> Self {
        Self::new(OntConfig::default())
    }
}

fn declarations(v: &OntVocabulary, profile: OntProfile) -> IndexMap<ViewKind, Vec<NamedNode>> {
    let mut d = IndexMap::new();
    if profile.is_owl() {
        d.insert(ViewKind::NamedClass, vec![v.owl_class.clone()]);
        d.insert(ViewKind::ClassExpression, vec![v.owl_class.clone(), v.owl_restriction.clone()]);
        d.insert(ViewKind::ObjectProperty, vec![v.owl_object_property.clone()]);
        d.insert(ViewKind::DataProperty, vec![v.owl_datatype_property.clone()]);
        d.insert(ViewKind::AnnotationProperty, vec![v.owl_annotation_property.clone()]);
        d.insert(ViewKind::NamedIndividual, vec![v.owl_named_individual.clone()]);
        d.insert(ViewKind::Annotation, vec![v.owl_axiom.clone(), v.owl_annotation.clone()]);
    } else {
        d.insert(ViewKind::NamedClass, vec![v.rdfs_class.clone()]);
        d.insert(ViewKind::Property, vec![v.rdf_property.clone()]);
    }
    d.insert(ViewKind::Datatype, vec![v.rdfs_datatype.clone()]);
    d
}

// Structural tests and constructors. Each pair reads only the node's
// immediate neighbourhood.

fn is_object(_: &OntModel, n: &RdfObject) -> bool {
    !n.is_literal()
}

fn make_object<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntObject::new(m, n, ViewKind::Object).map(View::Object)
}

fn is_owl_named_class(m: &OntModel, n: &RdfObject) -> bool {
    n.is_named_node()
        && (m.personality().is_builtin(ViewKind::NamedClass, n) || m.has_type(n, &m.vocab().owl_class))
}

fn is_rdfs_named_class(m: &OntModel, n: &RdfObject) -> bool {
    n.is_named_node()
        && (m.personality().is_builtin(ViewKind::NamedClass, n) || m.has_type(n, &m.vocab().rdfs_class))
}

fn make_named_class<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntClass::new(m, n, super::expression::ClassExpressionKind::Named).map(View::Class)
}

macro_rules! expression_factory {
    ($name:literal, $shape:expr) => {{
        fn test(m: &OntModel, n: &RdfObject) -> bool {
            decode(m, n, $shape).is_some()
        }
        fn make<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
            let kind = decode(m, &n, $shape)?;
            OntClass::new(m, n, kind).map(View::Class)
        }
        ViewFactory::new($name, test, make)
    }};
}

fn property_test(m: &OntModel, n: &RdfObject, kind: ViewKind, declared: &NamedNode) -> bool {
    n.is_named_node() && (m.personality().is_builtin(kind, n) || m.has_type(n, declared))
}

fn is_object_property(m: &OntModel, n: &RdfObject) -> bool {
    property_test(m, n, ViewKind::ObjectProperty, &m.vocab().owl_object_property)
}

fn make_object_property<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntProperty::new(m, n, PropertyKind::Object).map(View::Property)
}

fn is_data_property(m: &OntModel, n: &RdfObject) -> bool {
    property_test(m, n, ViewKind::DataProperty, &m.vocab().owl_datatype_property)
}

fn make_data_property<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntProperty::new(m, n, PropertyKind::Data).map(View::Property)
}

fn is_annotation_property(m: &OntModel, n: &RdfObject) -> bool {
    property_test(m, n, ViewKind::AnnotationProperty, &m.vocab().owl_annotation_property)
}

fn is_builtin_annotation_property(m: &OntModel, n: &RdfObject) -> bool {
    m.personality().is_builtin(ViewKind::AnnotationProperty, n)
}

fn make_annotation_property<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntProperty::new(m, n, PropertyKind::Annotation).map(View::Property)
}

fn is_rdf_property(m: &OntModel, n: &RdfObject) -> bool {
    n.is_named_node() && m.has_type(n, &m.vocab().rdf_property)
}

fn make_rdf_property<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntProperty::new(m, n, PropertyKind::Rdf).map(View::Property)
}

/// Has a `rdf:type` whose object is a class
fn has_class_assertion(m: &OntModel, n: &RdfObject) -> bool {
    m.types_of(n).iter().any(|t| m.can_as(t, ViewKind::Class))
}

fn is_named_individual(m: &OntModel, n: &RdfObject) -> bool {
    n.is_named_node()
        && (m.has_type(n, &m.vocab().owl_named_individual) || has_class_assertion(m, n))
}

fn make_named_individual<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntIndividual::new(m, n).map(View::Individual)
}

fn is_anonymous_individual(m: &OntModel, n: &RdfObject) -> bool {
    if !n.is_blank_node()
        || m.can_as(n, ViewKind::ClassExpression)
        || m.can_as(n, ViewKind::Annotation)
        || is_list_cell(m, n)
    {
        return false;
    }
    if has_class_assertion(m, n) {
        return true;
    }
    m.find(None, None, Some(n))
        .map(|t| RdfObject::from(t.predicate))
        .any(|p| m.can_as(&p, ViewKind::ObjectProperty))
}

fn is_datatype(m: &OntModel, n: &RdfObject) -> bool {
    n.is_named_node()
        && (m.personality().is_builtin(ViewKind::Datatype, n) || m.has_type(n, &m.vocab().rdfs_datatype))
}

fn make_datatype<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntObject::new(m, n, ViewKind::Datatype).map(View::Datatype)
}

fn is_bulk_annotation(m: &OntModel, n: &RdfObject) -> bool {
    let v = m.vocab();
    let Some(s) = n.as_subject() else { return false };
    n.is_blank_node()
        && (m.has_type(n, &v.owl_axiom) || m.has_type(n, &v.owl_annotation))
        && m.has(Some(&s), Some(&v.owl_annotated_source), None)
        && m.find(Some(&s), Some(&v.owl_annotated_property), None)
            .any(|t| t.object.is_named_node())
        && m.has(Some(&s), Some(&v.owl_annotated_target), None)
}

fn make_bulk_annotation<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    OntAnnotation::new(m, n).map(View::Annotation)
}

/// nil, or a node with both `rdf:first` and `rdf:rest`
pub(crate) fn is_list_cell(m: &OntModel, n: &RdfObject) -> bool {
    let v = m.vocab();
    if n.as_named_node() == Some(&v.rdf_nil) {
        return true;
    }
    let Some(s) = n.as_subject() else { return false };
    m.has(Some(&s), Some(&v.rdf_first), None) && m.has(Some(&s), Some(&v.rdf_rest), None)
}

fn is_list(m: &OntModel, n: &RdfObject) -> bool {
    is_list_cell(m, n) && OntList::find_root(m, n).is_some()
}

fn make_list<'m>(m: &'m OntModel, n: RdfObject) -> Option<View<'m>> {
    let root = OntList::find_root(m, &n)?;
    let list_type = n
        .as_subject()
        .and_then(|s| m.objects_of(&s, &m.vocab().rdf_type).into_iter().next())
        .and_then(|t| t.as_named_node().cloned());
    Some(View::List(OntList::new(m, root.subject, root.predicate, n, list_type, None)))
}

fn owl_registry() -> ViewRegistry {
    let mut r = ViewRegistry::new();
    r.register(ViewKind::Object, ViewFactory::new("Object", is_object, make_object))
        .register(ViewKind::NamedClass, ViewFactory::new("NamedClass", is_owl_named_class, make_named_class));

    for factory in [
        expression_factory!("ObjectSomeValuesFrom", ClassExpressionShape::SomeValuesFrom),
        expression_factory!("ObjectAllValuesFrom", ClassExpressionShape::AllValuesFrom),
        expression_factory!("ObjectHasValue", ClassExpressionShape::HasValue),
        expression_factory!("ExactCardinality", ClassExpressionShape::Cardinality(CardinalityKind::Exact)),
        expression_factory!("MinCardinality", ClassExpressionShape::Cardinality(CardinalityKind::Min)),
        expression_factory!("MaxCardinality", ClassExpressionShape::Cardinality(CardinalityKind::Max)),
        expression_factory!("IntersectionOf", ClassExpressionShape::IntersectionOf),
        expression_factory!("UnionOf", ClassExpressionShape::UnionOf),
        expression_factory!("ComplementOf", ClassExpressionShape::ComplementOf),
        expression_factory!("OneOf", ClassExpressionShape::OneOf),
    ] {
        r.register(ViewKind::ClassExpression, factory);
    }

    r.register(
        ViewKind::ObjectProperty,
        ViewFactory::new("ObjectProperty", is_object_property, make_object_property),
    )
    .register(
        ViewKind::DataProperty,
        ViewFactory::new("DataProperty", is_data_property, make_data_property),
    )
    .register(
        ViewKind::AnnotationProperty,
        ViewFactory::new("AnnotationProperty", is_annotation_property, make_annotation_property),
    )
    .register(
        ViewKind::NamedIndividual,
        ViewFactory::new("NamedIndividual", is_named_individual, make_named_individual),
    )
    .register(
        ViewKind::AnonymousIndividual,
        ViewFactory::new("AnonymousIndividual", is_anonymous_individual, make_named_individual),
    )
    .register(ViewKind::Datatype, ViewFactory::new("Datatype", is_datatype, make_datatype))
    .register(
        ViewKind::Annotation,
        ViewFactory::new("BulkAnnotation", is_bulk_annotation, make_bulk_annotation),
    )
    .register(ViewKind::List, ViewFactory::new("List", is_list, make_list));
    r
}

fn rdfs_registry() -> ViewRegistry {
    let mut r = ViewRegistry::new();
    r.register(ViewKind::Object, ViewFactory::new("Object", is_object, make_object))
        .register(ViewKind::NamedClass, ViewFactory::new("RdfsClass", is_rdfs_named_class, make_named_class))
        .register(ViewKind::Property, ViewFactory::new("RdfProperty", is_rdf_property, make_rdf_property))
        .register(
            ViewKind::AnnotationProperty,
            ViewFactory::new("AnnotationProperty", is_builtin_annotation_property, make_annotation_property),
        )
        .register(
            ViewKind::NamedIndividual,
            ViewFactory::new("NamedIndividual", is_named_individual, make_named_individual),
        )
        .register(
            ViewKind::AnonymousIndividual,
            ViewFactory::new("AnonymousIndividual", is_anonymous_individual, make_named_individual),
        )
        .register(ViewKind::Datatype, ViewFactory::new("Datatype", is_datatype, make_datatype))
        .register(ViewKind::List, ViewFactory::new("List", is_list, make_list));
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owl_personality() {
        let p = OntPersonality::default();
        assert_eq!(p.name(), "OWL2-FULL");
        assert!(p.registry().supports(ViewKind::Annotation));
        let names: Vec<_> = p.registry().factories(ViewKind::Class).iter().map(|f| f.name).collect();
        assert_eq!(names[0], "NamedClass");
        assert_eq!(names.len(), 11);

        let v = p.vocab();
        let class_types = p.declaring_types(ViewKind::Class);
        assert_eq!(class_types, vec![v.owl_class.clone(), v.owl_restriction.clone()]);
        assert!(p.declaring_types(ViewKind::Object).is_empty());
        assert!(p.is_builtin(ViewKind::Class, &v.owl_thing.clone().into()));
        assert!(p.is_builtin(ViewKind::Property, &v.rdfs_label.clone().into()));
        assert!(!p.is_builtin(ViewKind::Datatype, &v.owl_thing.clone().into()));
    }

    #[test]
    fn test_rdfs_personality() {
        let p = OntPersonality::from_profile(OntProfile::Rdfs);
        assert!(!p.registry().supports(ViewKind::Annotation));
        assert!(!p.registry().supports(ViewKind::ObjectProperty));
        assert!(p.registry().supports(ViewKind::Property));
        let v = p.vocab();
        assert_eq!(p.declaring_types(ViewKind::Class), vec![v.rdfs_class.clone()]);
        assert!(p.builtins().classes.contains(&v.rdfs_resource));
    }

    #[test]
    fn test_is_declaration() {
        let p = OntPersonality::default();
        let v = p.vocab().clone();
        let dog = NamedNode::new("http://example.org/Dog").unwrap();
        let declared = Triple::new(dog.clone().into(), v.rdf_type.clone(), v.owl_class.clone().into());
        assert!(p.is_declaration(&declared));
        let assertion = Triple::new(dog.clone().into(), v.rdf_type.clone(), dog.clone().into());
        assert!(!p.is_declaration(&assertion));
        let other = Triple::new(dog.clone().into(), v.rdfs_sub_class_of.clone(), v.owl_class.into());
        assert!(!p.is_declaration(&other));
    }
}
