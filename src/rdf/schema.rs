//! RDFS (RDF Schema) reasoning
//!
//! [`RdfsReasoner`] forward-chains the RDFS entailment rules over any [`Graph`]
//! and, besides the entailed triples, computes the *direct* (transitively
//! reduced) forms of `rdfs:subClassOf`, `rdfs:subPropertyOf` and `rdf:type`.
//! [`InfGraph`] wraps a base graph with that derivation and advertises the
//! direct predicates through [`Graph::direct_predicate`].

use super::store::{Graph, RdfStore, TripleIterator};
use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use super::vocab::OntVocabulary;
use indexmap::{IndexMap, IndexSet};
use std::cell::OnceCell;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasoning errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReasoningError {
    /// A schema triple whose object cannot be a class or property
    #[error("Malformed schema triple: {0}")]
    MalformedSchema(String),

    /// No rule enabled
    #[error("Invalid rule set: {0}")]
    InvalidRule(String),
}

pub type ReasoningResult<T> = Result<T, ReasoningError>;

/// RDFS inference rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceRule {
    /// rdfs:subClassOf transitivity (rdfs11)
    SubClassOfTransitive,

    /// rdfs:subPropertyOf transitivity (rdfs5)
    SubPropertyOfTransitive,

    /// (x P y), (P subPropertyOf Q) → (x Q y) (rdfs7)
    PropertyInheritance,

    /// rdfs:domain inference (rdfs2)
    DomainInference,

    /// rdfs:range inference (rdfs3)
    RangeInference,

    /// rdf:type inheritance via rdfs:subClassOf (rdfs9)
    TypeInheritance,
}

impl InferenceRule {
    pub fn all() -> Vec<InferenceRule> {
        vec![
            InferenceRule::SubClassOfTransitive,
            InferenceRule::SubPropertyOfTransitive,
            InferenceRule::PropertyInheritance,
            InferenceRule::DomainInference,
            InferenceRule::RangeInference,
            InferenceRule::TypeInheritance,
        ]
    }
}

/// Output of one reasoner run
#[derive(Debug, Clone, Default)]
pub struct Derivation {
    /// Entailed triples not asserted in the input graph
    pub inferred: Vec<Triple>,
    /// Triples over the direct predicates
    pub direct: Vec<Triple>,
}

/// Strict ancestors per node, insertion ordered
type Closure = IndexMap<RdfObject, IndexSet<RdfObject>>;

/// RDFS reasoner with forward chaining
#[derive(Debug, Clone)]
pub struct RdfsReasoner {
    enabled_rules: Vec<InferenceRule>,
    vocab: OntVocabulary,
}

impl RdfsReasoner {
    /// Create a new reasoner with all rules enabled
    pub fn new() -> Self {
        Self::with_rules(InferenceRule::all())
    }

    /// Create a reasoner with specific rules
    pub fn with_rules(rules: Vec<InferenceRule>) -> Self {
        Self {
            enabled_rules: rules,
            vocab: OntVocabulary::w3c(),
        }
    }

    /// Use a substitute vocabulary for the schema predicates
    pub fn with_vocabulary(mut self, vocab: OntVocabulary) -> Self {
        self.vocab = vocab;
        self
    }

    pub fn rules(&self) -> &[InferenceRule] {
        &self.enabled_rules
    }

    fn enabled(&self, rule: InferenceRule) -> bool {
        self.enabled_rules.contains(&rule)
    }

    /// The predicates for which a run of this reasoner produces a direct form
    pub fn direct_predicates(&self) -> Vec<RdfPredicate> {
        let mut out = Vec::new();
        if self.enabled(InferenceRule::SubClassOfTransitive) {
            out.push(self.vocab.rdfs_sub_class_of.clone());
        }
        if self.enabled(InferenceRule::SubPropertyOfTransitive) {
            out.push(self.vocab.rdfs_sub_property_of.clone());
        }
        if self.enabled(InferenceRule::TypeInheritance) {
            out.push(self.vocab.rdf_type.clone());
        }
        out
    }

    /// All entailed triples not already in the graph.
    ///
    /// Fails on a schema triple whose object is a literal.
    pub fn materialize(&self, graph: &dyn Graph) -> ReasoningResult<Vec<Triple>> {
        Ok(self.derive(graph, true)?.inferred)
    }

    /// Add the entailments to the graph; returns how many were new
    pub fn reason(&self, graph: &mut dyn Graph) -> ReasoningResult<usize> {
        let inferred = self.materialize(&*graph)?;
        let added = inferred.into_iter().filter(|t| graph.add(t.clone())).count();
        info!("RDFS reasoning added {} triples", added);
        Ok(added)
    }

    /// Entailments plus direct relations. With `strict = false` malformed
    /// schema triples are skipped with a warning instead of failing the run.
    pub fn derive(&self, graph: &dyn Graph, strict: bool) -> ReasoningResult<Derivation> {
        if self.enabled_rules.is_empty() {
            return Err(ReasoningError::InvalidRule("no inference rule enabled".to_string()));
        }
        let v = &self.vocab;

        let class_edges = self.schema_edges(graph, &v.rdfs_sub_class_of, strict)?;
        let property_edges = self.schema_edges(graph, &v.rdfs_sub_property_of, strict)?;
        let class_closure = closure(&class_edges);
        let property_closure = closure(&property_edges);

        let mut inferred: IndexSet<Triple> = IndexSet::new();
        let push = |t: Triple, inferred: &mut IndexSet<Triple>| {
            if !graph.contains(&t) {
                inferred.insert(t);
            }
        };

        if self.enabled(InferenceRule::SubClassOfTransitive) {
            for t in closure_triples(&class_closure, &v.rdfs_sub_class_of) {
                push(t, &mut inferred);
            }
        }
        if self.enabled(InferenceRule::SubPropertyOfTransitive) {
            for t in closure_triples(&property_closure, &v.rdfs_sub_property_of) {
                push(t, &mut inferred);
            }
        }

        // rdfs7: every assertion also holds for each super-property
        let mut assertions: Vec<Triple> = Vec::new();
        for (sub, supers) in &property_closure {
            let Some(sub_pred) = sub.as_predicate() else { continue };
            if !self.enabled(InferenceRule::PropertyInheritance) {
                break;
            }
            for t in graph.find(&TriplePattern::of(None, Some(&sub_pred), None)) {
                for sup in supers {
                    if let Some(sup_pred) = sup.as_predicate() {
                        let entailed = Triple::new(t.subject.clone(), sup_pred, t.object.clone());
                        assertions.push(entailed.clone());
                        push(entailed, &mut inferred);
                    }
                }
            }
        }

        let mut typed: Vec<(RdfSubject, RdfObject)> = Vec::new();
        for (rule, schema_pred) in [
            (InferenceRule::DomainInference, &v.rdfs_domain),
            (InferenceRule::RangeInference, &v.rdfs_range),
        ] {
            if !self.enabled(rule) {
                continue;
            }
            for schema in graph.find(&TriplePattern::of(None, Some(schema_pred), None)) {
                if schema.object.is_literal() {
                    self.malformed(&schema, strict)?;
                    continue;
                }
                let Some(prop) = RdfObject::from(schema.subject.clone()).as_predicate() else {
                    continue;
                };
                let matching = graph
                    .find(&TriplePattern::of(None, Some(&prop), None))
                    .chain(assertions.iter().filter(|a| a.predicate == prop).cloned());
                for t in matching {
                    let node = match rule {
                        InferenceRule::DomainInference => Some(t.subject.clone()),
                        _ => t.object.as_subject(),
                    };
                    if let Some(node) = node {
                        typed.push((node, schema.object.clone()));
                    }
                }
            }
        }
        for (node, class) in &typed {
            push(Triple::new(node.clone(), v.rdf_type.clone(), class.clone()), &mut inferred);
        }

        if self.enabled(InferenceRule::TypeInheritance) {
            let explicit = graph.find(&TriplePattern::of(None, Some(&v.rdf_type), None));
            let all_types: Vec<(RdfSubject, RdfObject)> = explicit
                .map(|t| (t.subject, t.object))
                .chain(typed.iter().cloned())
                .collect();
            for (node, class) in &all_types {
                for sup in class_closure.get(class).into_iter().flatten() {
                    push(Triple::new(node.clone(), v.rdf_type.clone(), sup.clone()), &mut inferred);
                }
            }
        }

        let direct = self.direct_relations(graph, &class_closure, &property_closure, &inferred);
        debug!(
            "RDFS derivation: {} inferred, {} direct",
            inferred.len(),
            direct.len()
        );
        Ok(Derivation {
            inferred: inferred.into_iter().collect(),
            direct,
        })
    }

    fn malformed(&self, triple: &Triple, strict: bool) -> ReasoningResult<()> {
        if strict {
            return Err(ReasoningError::MalformedSchema(triple.to_string()));
        }
        warn!("Skipping malformed schema triple {}", triple);
        Ok(())
    }

    /// `(child, parent)` pairs of a schema predicate, self-loops dropped
    fn schema_edges(
        &self,
        graph: &dyn Graph,
        predicate: &RdfPredicate,
        strict: bool,
    ) -> ReasoningResult<Vec<(RdfObject, RdfObject)>> {
        let mut edges = Vec::new();
        for t in graph.find(&TriplePattern::of(None, Some(predicate), None)) {
            if t.object.is_literal() {
                self.malformed(&t, strict)?;
                continue;
            }
            let child = RdfObject::from(t.subject.clone());
            if child != t.object {
                edges.push((child, t.object));
            }
        }
        Ok(edges)
    }

    fn direct_relations(
        &self,
        graph: &dyn Graph,
        class_closure: &Closure,
        property_closure: &Closure,
        inferred: &IndexSet<Triple>,
    ) -> Vec<Triple> {
        let v = &self.vocab;
        let mut direct = Vec::new();

        if self.enabled(InferenceRule::SubClassOfTransitive) {
            let p = OntVocabulary::direct_predicate(&v.rdfs_sub_class_of);
            direct.extend(reduction_triples(class_closure, &p));
        }
        if self.enabled(InferenceRule::SubPropertyOfTransitive) {
            let p = OntVocabulary::direct_predicate(&v.rdfs_sub_property_of);
            direct.extend(reduction_triples(property_closure, &p));
        }
        if self.enabled(InferenceRule::TypeInheritance) {
            let p = OntVocabulary::direct_predicate(&v.rdf_type);
            let mut types: IndexMap<RdfSubject, IndexSet<RdfObject>> = IndexMap::new();
            let asserted = graph.find(&TriplePattern::of(None, Some(&v.rdf_type), None));
            for t in asserted.chain(inferred.iter().filter(|t| t.predicate == v.rdf_type).cloned()) {
                types.entry(t.subject).or_default().insert(t.object);
            }
            for (node, classes) in &types {
                for class in classes {
                    if is_direct(None, class, classes, class_closure) {
                        direct.push(Triple::new(node.clone(), p.clone(), class.clone()));
                    }
                }
            }
        }
        direct
    }
}

impl Default for RdfsReasoner {
    fn default() -> Self {
        Self::new()
    }
}

fn closure(edges: &[(RdfObject, RdfObject)]) -> Closure {
    let mut parents: IndexMap<RdfObject, Vec<RdfObject>> = IndexMap::new();
    for (child, parent) in edges {
        parents.entry(child.clone()).or_default().push(parent.clone());
    }
    let mut out = Closure::new();
    for start in parents.keys() {
        let mut seen: IndexSet<RdfObject> = IndexSet::new();
        let mut queue: Vec<&RdfObject> = vec![start];
        while let Some(node) = queue.pop() {
            for parent in parents.get(node).into_iter().flatten() {
                if parent != start && seen.insert(parent.clone()) {
                    queue.push(parent);
                }
            }
        }
        out.insert(start.clone(), seen);
    }
    out
}

fn closure_triples<'a>(
    closure: &'a Closure,
    predicate: &'a RdfPredicate,
) -> impl Iterator<Item = Triple> + 'a {
    closure.iter().flat_map(move |(child, parents)| {
        let subject = child.as_subject();
        parents.iter().filter_map(move |parent| {
            subject
                .clone()
                .map(|s| Triple::new(s, predicate.clone(), parent.clone()))
        })
    })
}

fn equivalent(closure: &Closure, a: &RdfObject, b: &RdfObject) -> bool {
    let above = |x: &RdfObject, y: &RdfObject| closure.get(x).map_or(false, |s| s.contains(y));
    above(a, b) && above(b, a)
}

/// `parent` is direct among `ancestors` unless some other ancestor, not
/// equivalent to it or to `child`, sits between them.
fn is_direct(child: Option<&RdfObject>, parent: &RdfObject, ancestors: &IndexSet<RdfObject>, closure: &Closure) -> bool {
    !ancestors.iter().any(|other| {
        other != parent
            && !equivalent(closure, other, parent)
            && child.map_or(true, |c| !equivalent(closure, other, c))
            && closure.get(other).map_or(false, |s| s.contains(parent))
    })
}

fn reduction_triples(closure: &Closure, predicate: &RdfPredicate) -> Vec<Triple> {
    let mut out = Vec::new();
    for (child, ancestors) in closure {
        let Some(subject) = child.as_subject() else { continue };
        for parent in ancestors {
            if is_direct(Some(child), parent, ancestors, closure) {
                out.push(Triple::new(subject.clone(), predicate.clone(), parent.clone()));
            }
        }
    }
    out
}

/// A graph with RDFS entailments layered over a base graph.
///
/// The derivation is computed on first read and dropped by every mutation.
pub struct InfGraph<G: Graph> {
    base: G,
    reasoner: RdfsReasoner,
    derived: OnceCell<RdfStore>,
}

impl<G: Graph> InfGraph<G> {
    pub fn new(base: G, reasoner: RdfsReasoner) -> Self {
        Self {
            base,
            reasoner,
            derived: OnceCell::new(),
        }
    }

    pub fn base(&self) -> &G {
        &self.base
    }

    pub fn into_base(self) -> G {
        self.base
    }

    pub fn reasoner(&self) -> &RdfsReasoner {
        &self.reasoner
    }

    /// Only the entailed and direct triples
    pub fn derived(&self) -> &RdfStore {
        self.derived.get_or_init(|| {
            let derivation = match self.reasoner.derive(&self.base, false) {
                Ok(d) => d,
                Err(e) => {
                    warn!("RDFS derivation failed: {}", e);
                    Derivation::default()
                }
            };
            info!(
                "Rebuilt inference layer: {} entailments, {} direct triples",
                derivation.inferred.len(),
                derivation.direct.len()
            );
            RdfStore::from_triples(derivation.inferred.into_iter().chain(derivation.direct))
        })
    }

    fn invalidate(&mut self) {
        self.derived = OnceCell::new();
    }
}

impl<G: Graph> Graph for InfGraph<G> {
    fn find(&self, pattern: &TriplePattern) -> TripleIterator {
        let mut found: Vec<Triple> = self.base.find(pattern).collect();
        found.extend(self.derived().find(pattern));
        TripleIterator::new(found)
    }

    fn add(&mut self, triple: Triple) -> bool {
        let added = self.base.add(triple);
        if added {
            self.invalidate();
        }
        added
    }

    /// Entailed triples cannot be retracted on their own
    fn remove(&mut self, triple: &Triple) -> bool {
        let removed = self.base.remove(triple);
        if removed {
            self.invalidate();
        }
        removed
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.base.contains(triple) || self.derived().contains(triple)
    }

    fn len(&self) -> usize {
        self.base.len() + self.derived().len()
    }

    fn direct_predicate(&self, predicate: &RdfPredicate) -> Option<RdfPredicate> {
        self.reasoner
            .direct_predicates()
            .contains(predicate)
            .then(|| OntVocabulary::direct_predicate(predicate))
    }
}
