//! RDF, RDFS, OWL and XSD vocabulary
//!
//! The object-model layer never hard-codes IRIs: every algorithm reads the
//! predicates and markers it needs from an [`OntVocabulary`] value owned by the
//! model, so a caller can substitute terms (for example a legacy namespace).

use super::types::{NamedNode, RdfPredicate};

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Prefix of the predicates a reasoner uses to expose direct relations.
pub const DIRECT_PREDICATE_PREFIX: &str = "urn:x-hp-direct-predicate:";

fn node(ns: &str, local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{}{}", ns, local))
}

fn pred(ns: &str, local: &str) -> RdfPredicate {
    node(ns, local).into()
}

/// The terms the ontology layer is built on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntVocabulary {
    // rdf
    pub rdf_type: RdfPredicate,
    pub rdf_first: RdfPredicate,
    pub rdf_rest: RdfPredicate,
    pub rdf_nil: NamedNode,
    pub rdf_list: NamedNode,
    pub rdf_property: NamedNode,

    // rdfs
    pub rdfs_sub_class_of: RdfPredicate,
    pub rdfs_sub_property_of: RdfPredicate,
    pub rdfs_domain: RdfPredicate,
    pub rdfs_range: RdfPredicate,
    pub rdfs_label: RdfPredicate,
    pub rdfs_comment: RdfPredicate,
    pub rdfs_see_also: RdfPredicate,
    pub rdfs_is_defined_by: RdfPredicate,
    pub rdfs_class: NamedNode,
    pub rdfs_resource: NamedNode,
    pub rdfs_datatype: NamedNode,
    pub rdfs_literal: NamedNode,

    // owl: declarations
    pub owl_ontology: NamedNode,
    pub owl_class: NamedNode,
    pub owl_restriction: NamedNode,
    pub owl_object_property: NamedNode,
    pub owl_datatype_property: NamedNode,
    pub owl_annotation_property: NamedNode,
    pub owl_named_individual: NamedNode,
    pub owl_thing: NamedNode,
    pub owl_nothing: NamedNode,
    pub owl_top_object_property: NamedNode,
    pub owl_bottom_object_property: NamedNode,
    pub owl_top_data_property: NamedNode,
    pub owl_bottom_data_property: NamedNode,

    // owl: bulk annotations
    pub owl_axiom: NamedNode,
    pub owl_annotation: NamedNode,
    pub owl_annotated_source: RdfPredicate,
    pub owl_annotated_property: RdfPredicate,
    pub owl_annotated_target: RdfPredicate,

    // owl: class expressions and axioms
    pub owl_on_property: RdfPredicate,
    pub owl_on_class: RdfPredicate,
    pub owl_some_values_from: RdfPredicate,
    pub owl_all_values_from: RdfPredicate,
    pub owl_has_value: RdfPredicate,
    pub owl_cardinality: RdfPredicate,
    pub owl_min_cardinality: RdfPredicate,
    pub owl_max_cardinality: RdfPredicate,
    pub owl_qualified_cardinality: RdfPredicate,
    pub owl_min_qualified_cardinality: RdfPredicate,
    pub owl_max_qualified_cardinality: RdfPredicate,
    pub owl_intersection_of: RdfPredicate,
    pub owl_union_of: RdfPredicate,
    pub owl_complement_of: RdfPredicate,
    pub owl_one_of: RdfPredicate,
    pub owl_equivalent_class: RdfPredicate,
    pub owl_disjoint_with: RdfPredicate,
    pub owl_has_key: RdfPredicate,
    pub owl_property_chain_axiom: RdfPredicate,
    pub owl_version_info: RdfPredicate,
    pub owl_deprecated: RdfPredicate,

    // owl: ontology header
    pub owl_imports: RdfPredicate,
    pub owl_version_iri: RdfPredicate,

    // owl: property axioms
    pub owl_inverse_of: RdfPredicate,
    pub owl_equivalent_property: RdfPredicate,
    pub owl_property_disjoint_with: RdfPredicate,
    pub owl_functional_property: NamedNode,
    pub owl_inverse_functional_property: NamedNode,
    pub owl_transitive_property: NamedNode,
    pub owl_symmetric_property: NamedNode,
    pub owl_asymmetric_property: NamedNode,
    pub owl_reflexive_property: NamedNode,
    pub owl_irreflexive_property: NamedNode,

    // owl: individual axioms
    pub owl_same_as: RdfPredicate,
    pub owl_different_from: RdfPredicate,
    pub owl_negative_property_assertion: NamedNode,
    pub owl_source_individual: RdfPredicate,
    pub owl_assertion_property: RdfPredicate,
    pub owl_target_individual: RdfPredicate,
    pub owl_target_value: RdfPredicate,

    /// Annotation properties usable without a declaration
    pub builtin_annotation_properties: Vec<NamedNode>,
    /// Datatypes usable without a declaration
    pub builtin_datatypes: Vec<NamedNode>,
}

impl OntVocabulary {
    /// The W3C RDF/RDFS/OWL2 vocabulary
    pub fn w3c() -> Self {
        let builtin_annotation_properties = vec![
            node(RDFS, "label"),
            node(RDFS, "comment"),
            node(RDFS, "seeAlso"),
            node(RDFS, "isDefinedBy"),
            node(OWL, "versionInfo"),
            node(OWL, "deprecated"),
            node(OWL, "priorVersion"),
            node(OWL, "backwardCompatibleWith"),
            node(OWL, "incompatibleWith"),
        ];
        let builtin_datatypes = [
            "string", "boolean", "decimal", "integer", "nonNegativeInteger", "positiveInteger",
            "int", "long", "double", "float", "dateTime", "anyURI",
        ]
        .iter()
        .map(|local| node(XSD, local))
        .chain([node(RDFS, "Literal"), node(RDF, "PlainLiteral"), node(RDF, "langString")])
        .collect();

        Self {
            rdf_type: pred(RDF, "type"),
            rdf_first: pred(RDF, "first"),
            rdf_rest: pred(RDF, "rest"),
            rdf_nil: node(RDF, "nil"),
            rdf_list: node(RDF, "List"),
            rdf_property: node(RDF, "Property"),

            rdfs_sub_class_of: pred(RDFS, "subClassOf"),
            rdfs_sub_property_of: pred(RDFS, "subPropertyOf"),
            rdfs_domain: pred(RDFS, "domain"),
            rdfs_range: pred(RDFS, "range"),
            rdfs_label: pred(RDFS, "label"),
            rdfs_comment: pred(RDFS, "comment"),
            rdfs_see_also: pred(RDFS, "seeAlso"),
            rdfs_is_defined_by: pred(RDFS, "isDefinedBy"),
            rdfs_class: node(RDFS, "Class"),
            rdfs_resource: node(RDFS, "Resource"),
            rdfs_datatype: node(RDFS, "Datatype"),
            rdfs_literal: node(RDFS, "Literal"),

            owl_ontology: node(OWL, "Ontology"),
            owl_class: node(OWL, "Class"),
            owl_restriction: node(OWL, "Restriction"),
            owl_object_property: node(OWL, "ObjectProperty"),
            owl_datatype_property: node(OWL, "DatatypeProperty"),
            owl_annotation_property: node(OWL, "AnnotationProperty"),
            owl_named_individual: node(OWL, "NamedIndividual"),
            owl_thing: node(OWL, "Thing"),
            owl_nothing: node(OWL, "Nothing"),
            owl_top_object_property: node(OWL, "topObjectProperty"),
            owl_bottom_object_property: node(OWL, "bottomObjectProperty"),
            owl_top_data_property: node(OWL, "topDataProperty"),
            owl_bottom_data_property: node(OWL, "bottomDataProperty"),

            owl_axiom: node(OWL, "Axiom"),
            owl_annotation: node(OWL, "Annotation"),
            owl_annotated_source: pred(OWL, "annotatedSource"),
            owl_annotated_property: pred(OWL, "annotatedProperty"),
            owl_annotated_target: pred(OWL, "annotatedTarget"),

            owl_on_property: pred(OWL, "onProperty"),
            owl_on_class: pred(OWL, "onClass"),
            owl_some_values_from: pred(OWL, "someValuesFrom"),
            owl_all_values_from: pred(OWL, "allValuesFrom"),
            owl_has_value: pred(OWL, "hasValue"),
            owl_cardinality: pred(OWL, "cardinality"),
            owl_min_cardinality: pred(OWL, "minCardinality"),
            owl_max_cardinality: pred(OWL, "maxCardinality"),
            owl_qualified_cardinality: pred(OWL, "qualifiedCardinality"),
            owl_min_qualified_cardinality: pred(OWL, "minQualifiedCardinality"),
            owl_max_qualified_cardinality: pred(OWL, "maxQualifiedCardinality"),
            owl_intersection_of: pred(OWL, "intersectionOf"),
            owl_union_of: pred(OWL, "unionOf"),
            owl_complement_of: pred(OWL, "complementOf"),
            owl_one_of: pred(OWL, "oneOf"),
            owl_equivalent_class: pred(OWL, "equivalentClass"),
            owl_disjoint_with: pred(OWL, "disjointWith"),
            owl_has_key: pred(OWL, "hasKey"),
            owl_property_chain_axiom: pred(OWL, "propertyChainAxiom"),
            owl_version_info: pred(OWL, "versionInfo"),
            owl_deprecated: pred(OWL, "deprecated"),

            owl_imports: pred(OWL, "imports"),
            owl_version_iri: pred(OWL, "versionIRI"),

            owl_inverse_of: pred(OWL, "inverseOf"),
            owl_equivalent_property: pred(OWL, "equivalentProperty"),
            owl_property_disjoint_with: pred(OWL, "propertyDisjointWith"),
            owl_functional_property: node(OWL, "FunctionalProperty"),
            owl_inverse_functional_property: node(OWL, "InverseFunctionalProperty"),
            owl_transitive_property: node(OWL, "TransitiveProperty"),
            owl_symmetric_property: node(OWL, "SymmetricProperty"),
            owl_asymmetric_property: node(OWL, "AsymmetricProperty"),
            owl_reflexive_property: node(OWL, "ReflexiveProperty"),
            owl_irreflexive_property: node(OWL, "IrreflexiveProperty"),

            owl_same_as: pred(OWL, "sameAs"),
            owl_different_from: pred(OWL, "differentFrom"),
            owl_negative_property_assertion: node(OWL, "NegativePropertyAssertion"),
            owl_source_individual: pred(OWL, "sourceIndividual"),
            owl_assertion_property: pred(OWL, "assertionProperty"),
            owl_target_individual: pred(OWL, "targetIndividual"),
            owl_target_value: pred(OWL, "targetValue"),

            builtin_annotation_properties,
            builtin_datatypes,
        }
    }

    /// Top markers of the class hierarchy, current and legacy
    pub fn class_tops(&self) -> [&NamedNode; 2] {
        [&self.owl_thing, &self.rdfs_resource]
    }

    /// Top markers of the object and data property hierarchies
    pub fn property_tops(&self) -> [&NamedNode; 2] {
        [&self.owl_top_object_property, &self.owl_top_data_property]
    }

    /// The reasoner-facing direct form of a predicate.
    ///
    /// `rdfs:subClassOf` becomes
    /// `urn:x-hp-direct-predicate:http___www.w3.org_2000_01_rdf-schema_subClassOf`.
    pub fn direct_predicate(predicate: &RdfPredicate) -> RdfPredicate {
        let mangled: String = predicate
            .as_str()
            .chars()
            .map(|c| if matches!(c, ':' | '/' | '#') { '_' } else { c })
            .collect();
        NamedNode::new_unchecked(format!("{}{}", DIRECT_PREDICATE_PREFIX, mangled)).into()
    }
}

impl Default for OntVocabulary {
    fn default() -> Self {
        Self::w3c()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_w3c_terms() {
        let v = OntVocabulary::w3c();
        assert_eq!(v.rdf_type.as_str(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
        assert_eq!(v.rdf_nil.as_str(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
        assert_eq!(v.rdfs_sub_class_of.as_str(), "http://www.w3.org/2000/01/rdf-schema#subClassOf");
        assert_eq!(v.owl_axiom.as_str(), "http://www.w3.org/2002/07/owl#Axiom");
        assert!(v.builtin_annotation_properties.contains(v.rdfs_label.as_named_node()));
        assert!(v.builtin_datatypes.iter().any(|d| d.as_str().ends_with("#string")));
    }

    #[test]
    fn test_tops() {
        let v = OntVocabulary::w3c();
        assert!(v.class_tops().contains(&&v.owl_thing));
        assert!(v.class_tops().contains(&&v.rdfs_resource));
        assert!(v.property_tops().contains(&&v.owl_top_data_property));
    }

    #[test]
    fn test_direct_predicate() {
        let v = OntVocabulary::w3c();
        let direct = OntVocabulary::direct_predicate(&v.rdfs_sub_class_of);
        assert_eq!(
            direct.as_str(),
            "urn:x-hp-direct-predicate:http___www.w3.org_2000_01_rdf-schema_subClassOf"
        );
        assert_ne!(direct, OntVocabulary::direct_predicate(&v.rdfs_sub_property_of));
    }
}
