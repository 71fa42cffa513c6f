use ontgraph::ont::{OntConfig, OntError, OntModel, OntProfile, ViewKind};
use ontgraph::rdf::{load_turtle, Literal, RdfPredicate, RdfStore};

const SCHEMA: &str = r#"
    @prefix ex: <http://example.org/> .
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    ex:Animal a owl:Class ; rdfs:label "Animal"@en , "Tier"@de , "animal" .
    ex:Dog a owl:Class ; rdfs:subClassOf ex:Animal .
    ex:source a owl:AnnotationProperty .
"#;

fn schema() -> OntModel {
    OntModel::from_document(load_turtle(SCHEMA.as_bytes()).unwrap(), OntConfig::default())
}

#[test]
fn test_annotation_is_idempotent() {
    let model = schema();
    let dog = model.get_class("ex:Dog").unwrap();
    let animal = model.get_class("ex:Animal").unwrap();
    let sub = dog
        .statements(Some(&model.vocab().rdfs_sub_class_of))
        .into_iter()
        .find(|s| s.object() == animal.node())
        .unwrap();
    let source: RdfPredicate = model.iri("ex:source").unwrap().into();

    let first = sub.add_annotation(&source, Literal::new_simple_literal("wikipedia")).unwrap();
    let size = model.size();
    let second = sub.add_annotation(&source, Literal::new_simple_literal("wikipedia")).unwrap();
    assert_eq!(first, second);
    assert_eq!(model.size(), size);
    assert_eq!(sub.annotations().len(), 1);
}

#[test]
fn test_label_language_selection() {
    let model = schema();
    let animal = model.get_class("ex:Animal").unwrap();
    assert_eq!(animal.label(Some("de")).as_deref(), Some("Tier"));
    assert_eq!(animal.label(Some("")).as_deref(), Some("animal"));
    assert_eq!(animal.label(Some("EN")).as_deref(), Some("Animal"));
    assert!(animal.label(Some("fr")).is_none());
    assert_eq!(animal.annotation_values(&model.vocab().rdfs_label, None).len(), 3);
}

#[test]
fn test_object_annotations_follow_main_statement() {
    let model = schema();
    let dog = model.get_class("ex:Dog").unwrap();
    dog.add_label("Dog", Some("en")).unwrap();
    dog.add_comment("a domestic animal", None).unwrap();
    assert_eq!(dog.annotations().len(), 2);
    assert_eq!(dog.label(Some("en")).as_deref(), Some("Dog"));

    let main = dog.main_statement().unwrap();
    assert!(main.is_root());
    let nested = main.annotations().remove(0);
    nested
        .add_annotation(&model.vocab().rdfs_comment, Literal::new_simple_literal("checked"))
        .unwrap();
    assert_eq!(main.all_annotations().len(), 3);

    dog.clear_annotations().unwrap();
    assert!(dog.annotations().is_empty());
    assert!(!model
        .objects(ViewKind::Annotation)
        .iter()
        .any(|a| a.node().is_blank_node()));
}

#[test]
fn test_bulk_annotations_unsupported_under_rdfs() {
    let model = OntModel::with_config(RdfStore::new(), OntConfig::new(OntProfile::Rdfs));
    let a = model.create_class("http://example.org/A").unwrap();
    let b = model.create_class("http://example.org/B").unwrap();
    let sub = a.add_super_class(&b).unwrap();
    let label = model.vocab().rdfs_label.clone();
    assert!(matches!(
        sub.add_annotation(&label, Literal::new_simple_literal("x")),
        Err(OntError::Unsupported(_))
    ));
    // the declaration still takes plain annotations
    a.add_label("A", None).unwrap();
    assert_eq!(a.label(None).as_deref(), Some("A"));
}

#[test]
fn test_remove_statement_drops_its_axiom() {
    let model = schema();
    let dog = model.get_class("ex:Dog").unwrap();
    let animal = model.get_class("ex:Animal").unwrap();
    let before = model.size();
    let extra = dog.add_statement(&model.vocab().owl_disjoint_with, animal.node().clone());
    extra
        .add_annotation(&model.vocab().rdfs_comment, Literal::new_simple_literal("wrong"))
        .unwrap();
    model.remove_statement(&extra).unwrap();
    assert_eq!(model.size(), before);
}
