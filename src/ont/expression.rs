//! Class expressions
//!
//! An anonymous class is one of a fixed set of shapes: a restriction
//! (`owl:Restriction` + `owl:onProperty` + one constraint) or a boolean /
//! enumeration class (`owl:Class` + a list-valued operator). [`decode`] reads
//! one shape from a blank node's immediate neighbourhood; the result is a
//! [`ClassExpressionKind`] carried by [`OntClass`].

use super::class::OntClass;
use super::config::{OntControl, OntProfile};
use super::dispatch::ViewKind;
use super::error::{OntError, OntResult};
use super::individual::OntIndividual;
use super::list::{read_members, OntList};
use super::model::OntModel;
use super::property::OntProperty;
use crate::rdf::{BlankNode, Literal, NamedNode, OntVocabulary, RdfObject, RdfPredicate, RdfSubject, Triple};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalityKind {
    Exact,
    Min,
    Max,
}

impl CardinalityKind {
    /// (unqualified, qualified) predicates
    fn predicates(self, v: &OntVocabulary) -> (&RdfPredicate, &RdfPredicate) {
        match self {
            CardinalityKind::Exact => (&v.owl_cardinality, &v.owl_qualified_cardinality),
            CardinalityKind::Min => (&v.owl_min_cardinality, &v.owl_min_qualified_cardinality),
            CardinalityKind::Max => (&v.owl_max_cardinality, &v.owl_max_qualified_cardinality),
        }
    }
}

/// What [`decode`] looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassExpressionShape {
    SomeValuesFrom,
    AllValuesFrom,
    HasValue,
    Cardinality(CardinalityKind),
    IntersectionOf,
    UnionOf,
    ComplementOf,
    OneOf,
}

/// Decoded form of a class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpressionKind {
    Named,
    SomeValuesFrom {
        property: RdfObject,
        filler: RdfObject,
    },
    AllValuesFrom {
        property: RdfObject,
        filler: RdfObject,
    },
    HasValue {
        property: RdfObject,
        value: RdfObject,
    },
    Cardinality {
        kind: CardinalityKind,
        property: RdfObject,
        cardinality: u32,
        on_class: Option<RdfObject>,
    },
    IntersectionOf {
        members: Vec<RdfObject>,
    },
    UnionOf {
        members: Vec<RdfObject>,
    },
    ComplementOf {
        class: RdfObject,
    },
    OneOf {
        members: Vec<RdfObject>,
    },
}

impl ClassExpressionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ClassExpressionKind::Named => "Named",
            ClassExpressionKind::SomeValuesFrom { .. } => "SomeValuesFrom",
            ClassExpressionKind::AllValuesFrom { .. } => "AllValuesFrom",
            ClassExpressionKind::HasValue { .. } => "HasValue",
            ClassExpressionKind::Cardinality { kind: CardinalityKind::Exact, .. } => "ExactCardinality",
            ClassExpressionKind::Cardinality { kind: CardinalityKind::Min, .. } => "MinCardinality",
            ClassExpressionKind::Cardinality { kind: CardinalityKind::Max, .. } => "MaxCardinality",
            ClassExpressionKind::IntersectionOf { .. } => "IntersectionOf",
            ClassExpressionKind::UnionOf { .. } => "UnionOf",
            ClassExpressionKind::ComplementOf { .. } => "ComplementOf",
            ClassExpressionKind::OneOf { .. } => "OneOf",
        }
    }

    pub fn is_restriction(&self) -> bool {
        matches!(
            self,
            ClassExpressionKind::SomeValuesFrom { .. }
                | ClassExpressionKind::AllValuesFrom { .. }
                | ClassExpressionKind::HasValue { .. }
                | ClassExpressionKind::Cardinality { .. }
        )
    }
}

impl fmt::Display for ClassExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `rdf:type` asserted by a fresh expression of this kind
pub fn declaring_type(kind: &ClassExpressionKind, vocab: &OntVocabulary) -> NamedNode {
    if kind.is_restriction() {
        vocab.owl_restriction.clone()
    } else {
        vocab.owl_class.clone()
    }
}

/// May an expression of this kind appear as the subject of `rdfs:subClassOf`
pub fn can_be_sub_class(kind: &ClassExpressionKind, profile: OntProfile) -> bool {
    use ClassExpressionKind::*;
    match profile {
        OntProfile::Owl2Ql => matches!(kind, Named | SomeValuesFrom { .. }),
        OntProfile::Owl2Rl => matches!(
            kind,
            Named | IntersectionOf { .. } | UnionOf { .. } | OneOf { .. } | SomeValuesFrom { .. } | HasValue { .. }
        ),
        _ => true,
    }
}

/// May an expression of this kind appear as the object of `rdfs:subClassOf`
pub fn can_be_super_class(kind: &ClassExpressionKind, profile: OntProfile) -> bool {
    use ClassExpressionKind::*;
    match profile {
        OntProfile::Owl2Ql => matches!(
            kind,
            Named | SomeValuesFrom { .. } | IntersectionOf { .. } | ComplementOf { .. }
        ),
        OntProfile::Owl2Rl => matches!(
            kind,
            Named
                | IntersectionOf { .. }
                | ComplementOf { .. }
                | AllValuesFrom { .. }
                | HasValue { .. }
                | Cardinality { kind: CardinalityKind::Max, .. }
        ),
        _ => true,
    }
}

fn single(model: &OntModel, subject: &RdfSubject, predicate: &RdfPredicate) -> Option<RdfObject> {
    let mut values = model.objects_of(subject, predicate).into_iter();
    let first = values.next()?;
    values.next().is_none().then_some(first)
}

fn is_restriction_property(model: &OntModel, node: &RdfObject) -> bool {
    model.can_as(node, ViewKind::ObjectProperty) || model.can_as(node, ViewKind::DataProperty)
}

fn non_negative(value: &RdfObject) -> Option<u32> {
    value.as_literal()?.value().trim().parse().ok()
}

/// Read `node` as the given shape. Only blank nodes decode; the qualified
/// cardinality forms only when that control is enabled.
pub fn decode(model: &OntModel, node: &RdfObject, shape: ClassExpressionShape) -> Option<ClassExpressionKind> {
    if !node.is_blank_node() {
        return None;
    }
    let subject = node.as_subject()?;
    let v = model.vocab();
    let restriction = || -> Option<RdfObject> {
        if !model.has_type(node, &v.owl_restriction) {
            return None;
        }
        single(model, &subject, &v.owl_on_property).filter(|p| is_restriction_property(model, p))
    };
    let class_list = |predicate: &RdfPredicate| -> Option<Vec<RdfObject>> {
        if !model.has_type(node, &v.owl_class) {
            return None;
        }
        let head = single(model, &subject, predicate)?;
        read_members(model, &head)
    };
    match shape {
        ClassExpressionShape::SomeValuesFrom => {
            let property = restriction()?;
            let filler = single(model, &subject, &v.owl_some_values_from).filter(|f| !f.is_literal())?;
            Some(ClassExpressionKind::SomeValuesFrom { property, filler })
        }
        ClassExpressionShape::AllValuesFrom => {
            let property = restriction()?;
            let filler = single(model, &subject, &v.owl_all_values_from).filter(|f| !f.is_literal())?;
            Some(ClassExpressionKind::AllValuesFrom { property, filler })
        }
        ClassExpressionShape::HasValue => {
            let property = restriction()?;
            let value = single(model, &subject, &v.owl_has_value)?;
            Some(ClassExpressionKind::HasValue { property, value })
        }
        ClassExpressionShape::Cardinality(kind) => {
            let property = restriction()?;
            let (plain, qualified) = kind.predicates(v);
            if let Some(value) = single(model, &subject, plain) {
                return Some(ClassExpressionKind::Cardinality {
                    kind,
                    property,
                    cardinality: non_negative(&value)?,
                    on_class: None,
                });
            }
            if !model.config().is_enabled(OntControl::Owl2QualifiedCardinality) {
                return None;
            }
            let value = single(model, &subject, qualified)?;
            let on_class = single(model, &subject, &v.owl_on_class).filter(|c| !c.is_literal())?;
            Some(ClassExpressionKind::Cardinality {
                kind,
                property,
                cardinality: non_negative(&value)?,
                on_class: Some(on_class),
            })
        }
        ClassExpressionShape::IntersectionOf => {
            let members = class_list(&v.owl_intersection_of)?;
            Some(ClassExpressionKind::IntersectionOf { members })
        }
        ClassExpressionShape::UnionOf => {
            let members = class_list(&v.owl_union_of)?;
            Some(ClassExpressionKind::UnionOf { members })
        }
        ClassExpressionShape::OneOf => {
            let members = class_list(&v.owl_one_of)?;
            Some(ClassExpressionKind::OneOf { members })
        }
        ClassExpressionShape::ComplementOf => {
            if !model.has_type(node, &v.owl_class) {
                return None;
            }
            let class = single(model, &subject, &v.owl_complement_of).filter(|c| !c.is_literal())?;
            Some(ClassExpressionKind::ComplementOf { class })
        }
    }
}

/// Triples describing a class beyond its declaration: the restriction
/// pointers and operator triples, plus the cells of any operand list
pub fn spec(model: &OntModel, node: &RdfObject) -> Vec<Triple> {
    let Some(subject) = node.as_subject() else {
        return Vec::new();
    };
    let v = model.vocab();
    let pointers = [
        &v.owl_on_property,
        &v.owl_on_class,
        &v.owl_some_values_from,
        &v.owl_all_values_from,
        &v.owl_has_value,
        &v.owl_cardinality,
        &v.owl_min_cardinality,
        &v.owl_max_cardinality,
        &v.owl_qualified_cardinality,
        &v.owl_min_qualified_cardinality,
        &v.owl_max_qualified_cardinality,
        &v.owl_complement_of,
    ];
    let lists = [&v.owl_intersection_of, &v.owl_union_of, &v.owl_one_of];
    let mut out = Vec::new();
    for triple in model.find(Some(&subject), None, None) {
        if pointers.contains(&&triple.predicate) {
            out.push(triple);
        } else if lists.contains(&&triple.predicate) {
            let list = model.list_at(&triple);
            out.push(triple);
            if let Some(list) = list {
                out.extend(list.spec().into_iter().map(|s| s.into_triple()));
            }
        }
    }
    out
}

impl OntModel {
    fn anonymous_class(&self, ty: &NamedNode, pairs: Vec<(RdfPredicate, RdfObject)>) -> OntResult<OntClass<'_>> {
        let node: RdfSubject = BlankNode::new().into();
        self.add(Triple::new(node.clone(), self.vocab().rdf_type.clone(), ty.clone().into()));
        for (predicate, object) in pairs {
            self.add(Triple::new(node.clone(), predicate, object));
        }
        self.cast_expression(node)
    }

    fn cast_expression(&self, node: RdfSubject) -> OntResult<OntClass<'_>> {
        let node: RdfObject = node.into();
        let class = self
            .as_class(&node)
            .ok_or_else(|| OntError::IllegalState(format!("{} did not cast to a class expression", node)))?;
        debug!(%node, kind = %class.expression(), "Created class expression");
        Ok(class)
    }

    fn restriction_property(&self, property: &OntProperty<'_>) -> OntResult<RdfObject> {
        if !is_restriction_property(self, property.node()) {
            return Err(OntError::IllegalArgument(format!(
                "{} is neither an object nor a data property",
                property.node()
            )));
        }
        Ok(property.node().clone())
    }

    fn restriction(
        &self,
        property: &OntProperty<'_>,
        constraint: &RdfPredicate,
        value: RdfObject,
    ) -> OntResult<OntClass<'_>> {
        let v = self.vocab();
        let property = self.restriction_property(property)?;
        self.anonymous_class(
            &v.owl_restriction,
            vec![(v.owl_on_property.clone(), property), (constraint.clone(), value)],
        )
    }

    pub fn create_some_values_from(&self, property: &OntProperty<'_>, filler: &RdfObject) -> OntResult<OntClass<'_>> {
        if filler.is_literal() {
            return Err(OntError::IllegalArgument(format!("filler {} is a literal", filler)));
        }
        self.restriction(property, &self.vocab().owl_some_values_from, filler.clone())
    }

    pub fn create_all_values_from(&self, property: &OntProperty<'_>, filler: &RdfObject) -> OntResult<OntClass<'_>> {
        if filler.is_literal() {
            return Err(OntError::IllegalArgument(format!("filler {} is a literal", filler)));
        }
        self.restriction(property, &self.vocab().owl_all_values_from, filler.clone())
    }

    pub fn create_has_value(&self, property: &OntProperty<'_>, value: impl Into<RdfObject>) -> OntResult<OntClass<'_>> {
        self.restriction(property, &self.vocab().owl_has_value, value.into())
    }

    /// Cardinality restriction; passing `on_class` builds the qualified form
    pub fn create_cardinality(
        &self,
        kind: CardinalityKind,
        property: &OntProperty<'_>,
        cardinality: u32,
        on_class: Option<&OntClass<'_>>,
    ) -> OntResult<OntClass<'_>> {
        let v = self.vocab();
        let (plain, qualified) = kind.predicates(v);
        let property = self.restriction_property(property)?;
        let value: RdfObject = Literal::non_negative_integer(cardinality).into();
        let mut pairs = vec![(v.owl_on_property.clone(), property)];
        match on_class {
            None => pairs.push((plain.clone(), value)),
            Some(class) => {
                self.config()
                    .check_feature(OntControl::Owl2QualifiedCardinality, "owl:qualifiedCardinality")?;
                pairs.push((qualified.clone(), value));
                pairs.push((v.owl_on_class.clone(), class.node().clone()));
            }
        }
        self.anonymous_class(&v.owl_restriction, pairs)
    }

    fn list_class(
        &self,
        operator: &RdfPredicate,
        element_kind: ViewKind,
        members: Vec<RdfObject>,
    ) -> OntResult<OntClass<'_>> {
        let v = self.vocab();
        let node: RdfSubject = BlankNode::new().into();
        let list: OntList<'_> = self.create_list(&node, operator, None, Some(element_kind), members)?;
        self.add(Triple::new(node.clone(), v.rdf_type.clone(), v.owl_class.clone().into()));
        debug!(list = %list, "Attached operand list");
        self.cast_expression(node)
    }

    pub fn create_intersection_of(&self, members: &[OntClass<'_>]) -> OntResult<OntClass<'_>> {
        let members = members.iter().map(|c| c.node().clone()).collect();
        self.list_class(&self.vocab().owl_intersection_of, ViewKind::Class, members)
    }

    pub fn create_union_of(&self, members: &[OntClass<'_>]) -> OntResult<OntClass<'_>> {
        let members = members.iter().map(|c| c.node().clone()).collect();
        self.list_class(&self.vocab().owl_union_of, ViewKind::Class, members)
    }

    pub fn create_one_of(&self, members: &[OntIndividual<'_>]) -> OntResult<OntClass<'_>> {
        let members = members.iter().map(|i| i.node().clone()).collect();
        self.list_class(&self.vocab().owl_one_of, ViewKind::Individual, members)
    }

    pub fn create_complement_of(&self, class: &OntClass<'_>) -> OntResult<OntClass<'_>> {
        let v = self.vocab();
        self.anonymous_class(&v.owl_class, vec![(v.owl_complement_of.clone(), class.node().clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ont::config::OntConfig;
    use crate::rdf::RdfStore;

    fn setup(model: &OntModel) -> (OntClass<'_>, OntClass<'_>, OntProperty<'_>) {
        let a = model.create_class("http://example.org/A").unwrap();
        let b = model.create_class("http://example.org/B").unwrap();
        let p = model.create_object_property("http://example.org/p").unwrap();
        (a, b, p)
    }

    #[test]
    fn test_restrictions_decode() {
        let model = OntModel::in_memory();
        let (a, _, p) = setup(&model);
        let some = model.create_some_values_from(&p, a.node()).unwrap();
        assert_eq!(
            some.expression(),
            &ClassExpressionKind::SomeValuesFrom {
                property: p.node().clone(),
                filler: a.node().clone()
            }
        );
        assert!(model.can_as(some.node(), ViewKind::ClassExpression));
        assert_eq!(
            model.personality().registry().matching(&model, some.node(), ViewKind::Class),
            Some("ObjectSomeValuesFrom")
        );
        assert_eq!(some.spec().len(), 2);

        let all = model.create_all_values_from(&p, a.node()).unwrap();
        assert_eq!(all.expression().name(), "AllValuesFrom");
        let has = model.create_has_value(&p, NamedNode::new("http://example.org/i").unwrap()).unwrap();
        assert_eq!(has.expression().name(), "HasValue");
    }

    #[test]
    fn test_cardinality_forms() {
        let model = OntModel::in_memory();
        let (a, _, p) = setup(&model);
        let max = model.create_cardinality(CardinalityKind::Max, &p, 2, None).unwrap();
        assert_eq!(
            max.expression(),
            &ClassExpressionKind::Cardinality {
                kind: CardinalityKind::Max,
                property: p.node().clone(),
                cardinality: 2,
                on_class: None
            }
        );
        let q = model.create_cardinality(CardinalityKind::Exact, &p, 1, Some(&a)).unwrap();
        assert!(matches!(q.expression(), ClassExpressionKind::Cardinality { on_class: Some(_), .. }));
        assert_eq!(q.spec().len(), 3);
    }

    #[test]
    fn test_qualified_cardinality_gated() {
        let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Owl2Ql));
        let (a, _, p) = setup(&model);
        let size = model.size();
        let err = model
            .create_cardinality(CardinalityKind::Min, &p, 1, Some(&a))
            .unwrap_err();
        assert_eq!(
            err,
            OntError::Unsupported("Feature owl:qualifiedCardinality is disabled. Profile OWL2-QL".into())
        );
        assert_eq!(model.size(), size);
    }

    #[test]
    fn test_boolean_expressions() {
        let model = OntModel::in_memory();
        let (a, b, _) = setup(&model);
        let and = model.create_intersection_of(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(
            and.expression(),
            &ClassExpressionKind::IntersectionOf {
                members: vec![a.node().clone(), b.node().clone()]
            }
        );
        // operator triple plus two cells
        assert_eq!(and.spec().len(), 5);
        let or = model.create_union_of(&[a.clone()]).unwrap();
        assert_eq!(or.expression().name(), "UnionOf");
        let not = model.create_complement_of(&a).unwrap();
        assert_eq!(not.expression(), &ClassExpressionKind::ComplementOf { class: a.node().clone() });

        let i = a.create_individual(Some("http://example.org/i")).unwrap();
        let one = model.create_one_of(&[i]).unwrap();
        assert_eq!(one.expression().name(), "OneOf");
    }

    #[test]
    fn test_literal_rejected_as_member() {
        let model = OntModel::in_memory();
        let (_, _, p) = setup(&model);
        let literal: RdfObject = Literal::new_simple_literal("x").into();
        assert!(matches!(
            model.create_some_values_from(&p, &literal),
            Err(OntError::IllegalArgument(_))
        ));
        let name = model.create_annotation_property("http://example.org/name").unwrap();
        assert!(matches!(
            model.create_has_value(&name, literal),
            Err(OntError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_malformed_operand_list_does_not_decode() {
        let model = OntModel::in_memory();
        let v = model.vocab().clone();
        let node: RdfSubject = BlankNode::new().into();
        let cell: RdfSubject = BlankNode::new().into();
        model.add(Triple::new(node.clone(), v.rdf_type.clone(), v.owl_class.clone().into()));
        model.add(Triple::new(node.clone(), v.owl_union_of.clone(), cell.clone().into()));
        model.add(Triple::new(cell.clone(), v.rdf_first.clone(), v.owl_thing.clone().into()));
        assert!(!model.can_as(&node.into(), ViewKind::Class));
    }

    #[test]
    fn test_profile_position_tables() {
        let some = ClassExpressionKind::SomeValuesFrom {
            property: NamedNode::new("http://example.org/p").unwrap().into(),
            filler: NamedNode::new("http://example.org/A").unwrap().into(),
        };
        let union = ClassExpressionKind::UnionOf { members: vec![] };
        assert!(can_be_sub_class(&some, OntProfile::Owl2Ql));
        assert!(!can_be_sub_class(&union, OntProfile::Owl2Ql));
        assert!(can_be_sub_class(&union, OntProfile::Owl2Rl));
        assert!(!can_be_super_class(&union, OntProfile::Owl2Rl));
        assert!(!can_be_super_class(&some, OntProfile::Owl2Rl));
        assert!(can_be_super_class(&union, OntProfile::Owl2Full));
        let v = OntVocabulary::w3c();
        assert_eq!(declaring_type(&some, &v), v.owl_restriction);
        assert_eq!(declaring_type(&union, &v), v.owl_class);
    }
}
