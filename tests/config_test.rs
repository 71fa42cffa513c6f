use ontgraph::ont::{CardinalityKind, OntConfig, OntControl, OntError, OntModel, OntProfile, ViewKind};
use ontgraph::rdf::{NamedNode, RdfObject, RdfStore, Triple};
use std::io::Write;
use tempfile::Builder;

fn ex(name: &str) -> NamedNode {
    NamedNode::new(&format!("http://example.org/{}", name)).unwrap()
}

fn unsupported<T: std::fmt::Debug>(result: Result<T, OntError>) -> bool {
    matches!(result, Err(OntError::Unsupported(_)))
}

#[test]
fn test_config_from_yaml_file() {
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "profile: OWL2-QL").unwrap();
    writeln!(file, "controls:").unwrap();
    writeln!(file, "  owl2-class-has-key: true").unwrap();

    let config = OntConfig::from_file(file.path()).unwrap();
    assert_eq!(config.profile, OntProfile::Owl2Ql);
    assert!(config.is_enabled(OntControl::Owl2ClassHasKey));
    assert!(!config.is_enabled(OntControl::Owl2PropertyChain));
}

#[test]
fn test_config_from_json_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"profile": "OWL1"}}"#).unwrap();
    let config = OntConfig::from_file(file.path()).unwrap();
    assert_eq!(config.profile, OntProfile::Owl1);

    let other = Builder::new().suffix(".toml").tempfile().unwrap();
    assert!(OntConfig::from_file(other.path()).is_err());
}

#[test]
fn test_ql_profile_restrictions() {
    let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Owl2Ql));
    let person = model.create_class("http://example.org/Person").unwrap();
    let knows = model.create_object_property("http://example.org/knows").unwrap();
    let friend = model.create_object_property("http://example.org/friend").unwrap();

    let err = person.create_has_key(&[knows.clone()]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported: Feature owl:hasKey is disabled. Profile OWL2-QL"
    );
    assert!(unsupported(knows.create_property_chain(&[friend.clone()])));
    assert!(unsupported(model.create_cardinality(
        CardinalityKind::Max,
        &knows,
        1,
        Some(&person)
    )));

    // a failed call leaves the graph as it was
    let size = model.size();
    assert!(unsupported(person.create_has_key(&[knows])));
    assert_eq!(model.size(), size);
}

#[test]
fn test_override_enables_feature() {
    let config = OntConfig::new(OntProfile::Owl2Ql).with(OntControl::Owl2ClassHasKey, true);
    let model = OntModel::with_config(RdfStore::new(), config);
    let person = model.create_class("http://example.org/Person").unwrap();
    let ssn = model.create_data_property("http://example.org/ssn").unwrap();
    let key = person.create_has_key(&[ssn]).unwrap();
    assert_eq!(key.len(), 1);
    assert_eq!(person.has_keys().len(), 1);
}

#[test]
fn test_rdfs_profile_views() {
    let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Rdfs));
    assert!(unsupported(model.create_object_property("http://example.org/p")));
    assert!(unsupported(model.create_annotation_property("http://example.org/note")));

    let p = model.create_rdf_property("http://example.org/p").unwrap();
    let node: RdfObject = p.node().clone();
    assert!(model.can_as(&node, ViewKind::Property));
    assert!(!model.can_as(&node, ViewKind::ObjectProperty));

    let a = model.create_class("http://example.org/A").unwrap();
    let b = model.create_class("http://example.org/B").unwrap();
    assert!(unsupported(a.add_disjoint_class(&b)));
}

#[test]
fn test_plain_object_main_statement_tie_break() {
    let model = OntModel::in_memory();
    let v = model.vocab().clone();
    let x: RdfObject = ex("x").into();
    model.add(Triple::new(ex("x").into(), v.rdf_type.clone(), ex("Zebra").into()));
    model.add(Triple::new(ex("x").into(), v.rdf_type.clone(), ex("Ant").into()));

    let main = model.find_main_statement(&x, ViewKind::Object).unwrap();
    assert_eq!(main.object(), &RdfObject::from(ex("Ant")));
    assert!(main.is_root());

    // a declaring type wins over a smaller plain type
    model.add(Triple::new(ex("x").into(), v.rdf_type.clone(), v.owl_named_individual.clone().into()));
    let main = model.find_main_statement(&x, ViewKind::Object).unwrap();
    assert_eq!(main.object(), &RdfObject::from(v.owl_named_individual.clone()));
    let plain = model.statement(Triple::new(ex("x").into(), v.rdf_type.clone(), ex("Ant").into()));
    assert!(!plain.is_root());
}
