//! RDF triple store implementation
//!
//! This module provides the [`Graph`] contract consumed by the object-model layer
//! and an in-memory [`RdfStore`] implementing it with efficient indexing.

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::IndexSet;
use std::collections::HashMap;
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RdfStoreError {
    /// Triple not found
    #[error("Triple not found: {0}")]
    TripleNotFound(String),

    /// Duplicate triple
    #[error("Duplicate triple: {0}")]
    DuplicateTriple(String),
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// Owned snapshot of the triples matching a pattern.
///
/// The iterator never borrows the store, so no cursor outlives the call that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct TripleIterator {
    triples: std::vec::IntoIter<Triple>,
}

impl TripleIterator {
    pub fn new(triples: Vec<Triple>) -> Self {
        Self {
            triples: triples.into_iter(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Iterator for TripleIterator {
    type Item = Triple;

    fn next(&mut self) -> Option<Self::Item> {
        self.triples.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.triples.size_hint()
    }
}

/// The pattern-matching triple storage contract.
///
/// `add` and `remove` have set semantics: they report whether the graph changed.
pub trait Graph {
    /// All triples matching the pattern, in a deterministic order
    fn find(&self, pattern: &TriplePattern) -> TripleIterator;

    /// Add a triple; `false` if it was already present
    fn add(&mut self, triple: Triple) -> bool;

    /// Remove a triple; `false` if it was absent
    fn remove(&mut self, triple: &Triple) -> bool;

    /// Check if a triple exists
    fn contains(&self, triple: &Triple) -> bool;

    /// Number of triples
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The predicate under which this graph exposes the direct (transitively
    /// reduced) form of `predicate`, if a reasoner backs it.
    fn direct_predicate(&self, _predicate: &RdfPredicate) -> Option<RdfPredicate> {
        None
    }

    /// Does any triple match the pattern
    fn contains_pattern(&self, pattern: &TriplePattern) -> bool {
        self.find(pattern).next().is_some()
    }
}

/// RDF triple store with multiple indices for efficient queries
///
/// Implements:
/// - S index (Subject -> triples)
/// - P index (Predicate -> triples)
/// - O index (Object -> triples)
///
/// Every set preserves insertion order, so `find` results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct RdfStore {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// Subject index
    s_index: HashMap<RdfSubject, IndexSet<Triple>>,

    /// Predicate index
    p_index: HashMap<RdfPredicate, IndexSet<Triple>>,

    /// Object index
    o_index: HashMap<RdfObject, IndexSet<Triple>>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from triples; duplicates are collapsed
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        for triple in triples {
            Graph::add(&mut store, triple);
        }
        store
    }

    /// Insert a triple into the store
    pub fn insert(&mut self, triple: Triple) -> RdfStoreResult<()> {
        if self.triples.contains(&triple) {
            return Err(RdfStoreError::DuplicateTriple(triple.to_string()));
        }
        self.update_indices_insert(&triple);
        self.triples.insert(triple);
        Ok(())
    }

    /// Remove a triple from the store
    pub fn delete(&mut self, triple: &Triple) -> RdfStoreResult<()> {
        if !self.triples.shift_remove(triple) {
            return Err(RdfStoreError::TripleNotFound(triple.to_string()));
        }
        self.update_indices_remove(triple);
        Ok(())
    }

    /// Clear all triples
    pub fn clear(&mut self) {
        self.triples.clear();
        self.s_index.clear();
        self.p_index.clear();
        self.o_index.clear();
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get triples with a specific subject
    pub fn get_triples_with_subject(&self, subject: &RdfSubject) -> Vec<Triple> {
        self.find(&TriplePattern::of(Some(subject), None, None)).collect()
    }

    /// Get triples with a specific predicate
    pub fn get_triples_with_predicate(&self, predicate: &RdfPredicate) -> Vec<Triple> {
        self.find(&TriplePattern::of(None, Some(predicate), None)).collect()
    }

    /// Get triples with a specific object
    pub fn get_triples_with_object(&self, object: &RdfObject) -> Vec<Triple> {
        self.find(&TriplePattern::of(None, None, Some(object))).collect()
    }

    /// Get all distinct subjects in the store, in first-seen order
    pub fn subjects(&self) -> Vec<RdfSubject> {
        self.triples
            .iter()
            .map(|t| t.subject.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    // Private helper methods

    /// The narrowest index bucket for the bound parts of a pattern; `None`
    /// means the pattern is unbound and the whole store is the candidate set.
    fn candidates<'a>(&'a self, pattern: &TriplePattern) -> Option<Option<&'a IndexSet<Triple>>> {
        let mut best: Option<Option<&'a IndexSet<Triple>>> = None;
        let mut consider = |bucket: Option<&'a IndexSet<Triple>>| {
            let size = bucket.map_or(0, |b| b.len());
            let current = best.map(|b| b.map_or(0, |s| s.len()));
            if current.map_or(true, |c| size < c) {
                best = Some(bucket);
            }
        };
        if let Some(s) = &pattern.subject {
            consider(self.s_index.get(s));
        }
        if let Some(p) = &pattern.predicate {
            consider(self.p_index.get(p));
        }
        if let Some(o) = &pattern.object {
            consider(self.o_index.get(o));
        }
        best
    }

    fn update_indices_insert(&mut self, triple: &Triple) {
        self.s_index
            .entry(triple.subject.clone())
            .or_default()
            .insert(triple.clone());
        self.p_index
            .entry(triple.predicate.clone())
            .or_default()
            .insert(triple.clone());
        self.o_index
            .entry(triple.object.clone())
            .or_default()
            .insert(triple.clone());
    }

    fn update_indices_remove(&mut self, triple: &Triple) {
        if let Some(set) = self.s_index.get_mut(&triple.subject) {
            set.shift_remove(triple);
            if set.is_empty() {
                self.s_index.remove(&triple.subject);
            }
        }
        if let Some(set) = self.p_index.get_mut(&triple.predicate) {
            set.shift_remove(triple);
            if set.is_empty() {
                self.p_index.remove(&triple.predicate);
            }
        }
        if let Some(set) = self.o_index.get_mut(&triple.object) {
            set.shift_remove(triple);
            if set.is_empty() {
                self.o_index.remove(&triple.object);
            }
        }
    }
}

impl Graph for RdfStore {
    fn find(&self, pattern: &TriplePattern) -> TripleIterator {
        let found: Vec<Triple> = match self.candidates(pattern) {
            None => self.triples.iter().filter(|t| pattern.matches(t)).cloned().collect(),
            Some(None) => Vec::new(),
            Some(Some(bucket)) => bucket.iter().filter(|t| pattern.matches(t)).cloned().collect(),
        };
        TripleIterator::new(found)
    }

    fn add(&mut self, triple: Triple) -> bool {
        self.insert(triple).is_ok()
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        self.delete(triple).is_ok()
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode};

    fn create_test_triple() -> Triple {
        let subject = NamedNode::new("http://example.org/alice").unwrap();
        let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let object = Literal::new_simple_literal("Alice");

        Triple::new(subject.into(), predicate, object.into())
    }

    #[test]
    fn test_insert_and_query() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        assert!(store.insert(triple.clone()).is_ok());
        assert_eq!(store.len(), 1);
        assert!(Graph::contains(&store, &triple));
    }

    #[test]
    fn test_duplicate_insert() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        assert!(store.insert(triple.clone()).is_ok());
        assert!(matches!(
            store.insert(triple.clone()),
            Err(RdfStoreError::DuplicateTriple(_))
        ));
        assert!(!store.add(triple));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();

        store.insert(triple.clone()).unwrap();
        assert_eq!(store.len(), 1);

        assert!(store.remove(&triple));
        assert_eq!(store.len(), 0);
        assert!(!Graph::contains(&store, &triple));
        assert!(!store.remove(&triple));
        assert!(store.find(&TriplePattern::default()).next().is_none());
    }

    #[test]
    fn test_query_by_subject() {
        let mut store = RdfStore::new();
        let subject = NamedNode::new("http://example.org/alice").unwrap();

        // Insert multiple triples with same subject
        let pred1 = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let pred2 = RdfPredicate::new("http://xmlns.com/foaf/0.1/age").unwrap();

        store
            .insert(Triple::new(
                subject.clone().into(),
                pred1,
                Literal::new_simple_literal("Alice").into(),
            ))
            .unwrap();
        store
            .insert(Triple::new(
                subject.clone().into(),
                pred2,
                Literal::integer(30).into(),
            ))
            .unwrap();

        let results = store.get_triples_with_subject(&subject.into());
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_find_preserves_insertion_order() {
        let mut store = RdfStore::new();
        let s: RdfSubject = NamedNode::new("http://example.org/s").unwrap().into();
        let p = RdfPredicate::new("http://example.org/p").unwrap();
        for i in [5, 1, 3, 2, 4] {
            store.add(Triple::new(s.clone(), p.clone(), Literal::integer(i).into()));
        }
        store.remove(&Triple::new(s.clone(), p.clone(), Literal::integer(3).into()));

        let values: Vec<String> = store
            .find(&TriplePattern::of(Some(&s), Some(&p), None))
            .map(|t| t.object.as_literal().unwrap().value().to_string())
            .collect();
        assert_eq!(values, vec!["5", "1", "2", "4"]);
    }

    #[test]
    fn test_triple_pattern_query() {
        let mut store = RdfStore::new();
        let triple = create_test_triple();
        store.insert(triple.clone()).unwrap();

        // Query with pattern (all variables)
        assert_eq!(store.find(&TriplePattern::default()).count(), 1);

        // Query with specific subject
        let pattern = TriplePattern::new(Some(triple.subject.clone()), None, None);
        assert_eq!(store.find(&pattern).count(), 1);

        // Query with wrong subject
        let wrong_subject = NamedNode::new("http://example.org/bob").unwrap();
        let pattern = TriplePattern::new(Some(wrong_subject.into()), None, None);
        assert_eq!(store.find(&pattern).count(), 0);
        assert!(!store.contains_pattern(&pattern));
    }

    #[test]
    fn test_clear() {
        let mut store = RdfStore::new();
        store.insert(create_test_triple()).unwrap();
        assert_eq!(store.len(), 1);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(Graph::is_empty(&store));
    }

    #[test]
    fn test_subjects() {
        let alice = NamedNode::new("http://example.org/alice").unwrap();
        let bob = NamedNode::new("http://example.org/bob").unwrap();
        let name_pred = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();

        let store = RdfStore::from_triples([
            Triple::new(
                alice.clone().into(),
                name_pred.clone(),
                Literal::new_simple_literal("Alice").into(),
            ),
            Triple::new(
                bob.into(),
                name_pred.clone(),
                Literal::new_simple_literal("Bob").into(),
            ),
            Triple::new(
                alice.into(),
                name_pred.clone(),
                Literal::new_simple_literal("Al").into(),
            ),
        ]);

        assert_eq!(store.subjects().len(), 2);
        assert_eq!(store.get_triples_with_predicate(&name_pred).len(), 3);
        assert_eq!(
            store
                .get_triples_with_object(&Literal::new_simple_literal("Bob").into())
                .len(),
            1
        );
    }
}
