//! Typed RDF lists
//!
//! An [`OntList`] is the `rdf:first`/`rdf:rest` chain hanging off a root
//! triple `(subject, predicate, head)`. Mutations splice cells in place and
//! rewrite the root triple when the head changes; bulk annotations on the
//! root triple follow the new head.
//!
//! Cells are read one `find(cell, ANY, ANY)` at a time. [`ListCells`] fails
//! with `IllegalState` on a missing or repeated `rdf:first`/`rdf:rest`, on a
//! typed cell without its `rdf:type`, or on a cell seen twice;
//! [`SafeListCells`] stops there and reports the list as malformed.

use super::annotation::bulk_nodes;
use super::dispatch::{View, ViewKind};
use super::error::{OntError, OntResult};
use super::model::OntModel;
use super::personality::is_list_cell;
use super::statement::OntStatement;
use crate::rdf::{BlankNode, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// What member iteration does with an element that does not cast to the
/// list's element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementPolicy {
    #[default]
    Skip,
    Fail,
}

/// One list cell with every triple whose subject it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCell {
    pub node: RdfObject,
    pub first_triple: Triple,
    pub rest_triple: Triple,
    pub batch: Vec<Triple>,
}

impl ListCell {
    pub fn first(&self) -> &RdfObject {
        &self.first_triple.object
    }

    pub fn rest(&self) -> &RdfObject {
        &self.rest_triple.object
    }

    /// `cell rdf:type list_type`, when present
    pub fn type_triple(&self, model: &OntModel, list_type: &NamedNode) -> Option<Triple> {
        let ty: RdfObject = list_type.clone().into();
        self.batch
            .iter()
            .find(|t| t.predicate == model.vocab().rdf_type && t.object == ty)
            .cloned()
    }
}

/// Read one cell: exactly one `rdf:first` and one `rdf:rest`, plus
/// `rdf:type list_type` when the list is typed
fn read_cell(model: &OntModel, node: &RdfObject, list_type: Option<&NamedNode>) -> OntResult<ListCell> {
    let Some(subject) = node.as_subject() else {
        return Err(OntError::IllegalState(format!("list cell {} is a literal", node)));
    };
    let v = model.vocab();
    let batch: Vec<Triple> = model.find(Some(&subject), None, None).collect();
    let single = |p: &RdfPredicate| {
        let mut found = batch.iter().filter(|t| &t.predicate == p);
        match (found.next(), found.next()) {
            (Some(t), None) => Ok(t.clone()),
            (None, _) => Err(OntError::malformed(node, &TriplePattern::of(Some(&subject), Some(p), None))),
            (Some(_), Some(_)) => Err(OntError::IllegalState(format!(
                "list cell {} has more than one {}",
                node, p
            ))),
        }
    };
    let first_triple = single(&v.rdf_first)?;
    let rest_triple = single(&v.rdf_rest)?;
    if let Some(ty) = list_type {
        let ty_object: RdfObject = ty.clone().into();
        if !batch.iter().any(|t| t.predicate == v.rdf_type && t.object == ty_object) {
            let pattern = TriplePattern::of(Some(&subject), Some(&v.rdf_type), Some(&ty_object));
            return Err(OntError::malformed(node, &pattern));
        }
    }
    Ok(ListCell {
        node: node.clone(),
        first_triple,
        rest_triple,
        batch,
    })
}

/// Strict cell iterator
pub struct ListCells<'m> {
    model: &'m OntModel,
    list_type: Option<NamedNode>,
    next: Option<RdfObject>,
    visited: FxHashSet<RdfObject>,
}

impl<'m> ListCells<'m> {
    pub fn new(model: &'m OntModel, head: RdfObject) -> Self {
        Self::typed(model, head, None)
    }

    /// Cells that must also carry `rdf:type list_type`
    pub fn typed(model: &'m OntModel, head: RdfObject, list_type: Option<NamedNode>) -> Self {
        Self {
            model,
            list_type,
            next: Some(head),
            visited: FxHashSet::default(),
        }
    }
}

impl Iterator for ListCells<'_> {
    type Item = OntResult<ListCell>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        if node.as_named_node() == Some(&self.model.vocab().rdf_nil) {
            return None;
        }
        if !self.visited.insert(node.clone()) {
            return Some(Err(OntError::IllegalState(format!(
                "list cell {} is reached twice through rdf:rest",
                node
            ))));
        }
        let cell = read_cell(self.model, &node, self.list_type.as_ref());
        if let Ok(cell) = &cell {
            self.next = Some(cell.rest().clone());
        }
        Some(cell)
    }
}

/// Cell iterator that stops at the first defect instead of failing
pub struct SafeListCells<'m> {
    inner: ListCells<'m>,
    malformed: bool,
}

impl<'m> SafeListCells<'m> {
    pub fn new(model: &'m OntModel, head: RdfObject) -> Self {
        Self::from_cells(ListCells::new(model, head))
    }

    pub fn from_cells(inner: ListCells<'m>) -> Self {
        Self {
            inner,
            malformed: false,
        }
    }

    /// Did iteration stop on a defect
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }
}

impl Iterator for SafeListCells<'_> {
    type Item = ListCell;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(cell) => Some(cell),
            Err(e) => {
                warn!(error = %e, "Stopped on malformed list");
                self.malformed = true;
                None
            }
        }
    }
}

/// `rdf:first` values of a well-formed list, `None` if it is malformed
pub(crate) fn read_members(model: &OntModel, head: &RdfObject) -> Option<Vec<RdfObject>> {
    let mut cells = SafeListCells::new(model, head.clone());
    let members: Vec<RdfObject> = cells.by_ref().map(|c| c.first().clone()).collect();
    (!cells.is_malformed()).then_some(members)
}

/// A list seen from its root triple
#[derive(Clone)]
pub struct OntList<'m> {
    model: &'m OntModel,
    subject: RdfSubject,
    predicate: RdfPredicate,
    head: RdfObject,
    list_type: Option<NamedNode>,
    element_kind: Option<ViewKind>,
    policy: ElementPolicy,
}

impl<'m> OntList<'m> {
    pub(crate) fn new(
        model: &'m OntModel,
        subject: RdfSubject,
        predicate: RdfPredicate,
        head: RdfObject,
        list_type: Option<NamedNode>,
        element_kind: Option<ViewKind>,
    ) -> Self {
        Self {
            model,
            subject,
            predicate,
            head,
            list_type,
            element_kind,
            policy: ElementPolicy::default(),
        }
    }

    /// First triple `(s, p, node)` that can anchor a list at `node`
    pub(crate) fn find_root(model: &OntModel, node: &RdfObject) -> Option<Triple> {
        let v = model.vocab();
        model
            .find(None, None, Some(node))
            .find(|t| t.predicate != v.rdf_rest && t.predicate != v.rdf_first)
    }

    pub fn with_element_kind(mut self, kind: ViewKind) -> Self {
        self.element_kind = Some(kind);
        self
    }

    pub fn with_policy(mut self, policy: ElementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &'m OntModel {
        self.model
    }

    /// Current object of the root triple
    pub fn head(&self) -> &RdfObject {
        &self.head
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    pub fn predicate(&self) -> &RdfPredicate {
        &self.predicate
    }

    pub fn list_type(&self) -> Option<&NamedNode> {
        self.list_type.as_ref()
    }

    pub fn element_kind(&self) -> Option<ViewKind> {
        self.element_kind
    }

    pub fn policy(&self) -> ElementPolicy {
        self.policy
    }

    pub fn root_triple(&self) -> Triple {
        Triple::new(self.subject.clone(), self.predicate.clone(), self.head.clone())
    }

    pub fn main_statement(&self) -> OntStatement<'m> {
        self.model.statement(self.root_triple())
    }

    pub fn is_nil(&self) -> bool {
        self.head.as_named_node() == Some(&self.model.vocab().rdf_nil)
    }

    pub fn cells(&self) -> ListCells<'m> {
        ListCells::typed(self.model, self.head.clone(), self.list_type.clone())
    }

    pub fn safe_cells(&self) -> SafeListCells<'m> {
        SafeListCells::from_cells(self.cells())
    }

    /// Number of cells reachable before nil or the first defect
    pub fn len(&self) -> usize {
        self.safe_cells().count()
    }

    /// Nil, or no member casts to the element kind
    pub fn is_empty(&self) -> bool {
        self.is_nil() || !self.safe_cells().any(|c| self.accepts(c.first()))
    }

    fn accepts(&self, element: &RdfObject) -> bool {
        self.element_kind
            .map_or(true, |kind| self.model.can_as(element, kind))
    }

    fn check_element(&self, element: &RdfObject) -> OntResult<()> {
        match self.element_kind {
            Some(kind) if !self.model.can_as(element, kind) => Err(OntError::IllegalArgument(format!(
                "{} is not a {} and cannot be a member of {}",
                element, kind, self
            ))),
            _ => Ok(()),
        }
    }

    /// Members in order, filtered through the element policy
    pub fn iter_members(&self) -> impl Iterator<Item = OntResult<RdfObject>> + 'm {
        let model = self.model;
        let kind = self.element_kind;
        let policy = self.policy;
        self.cells().filter_map(move |cell| {
            let cell = match cell {
                Ok(cell) => cell,
                Err(e) => return Some(Err(e)),
            };
            let member = cell.first().clone();
            match kind {
                Some(kind) if !model.can_as(&member, kind) => match policy {
                    ElementPolicy::Skip => None,
                    ElementPolicy::Fail => Some(Err(OntError::IllegalArgument(format!(
                        "list member {} is not a {}",
                        member, kind
                    )))),
                },
                _ => Some(Ok(member)),
            }
        })
    }

    pub fn members(&self) -> OntResult<Vec<RdfObject>> {
        self.iter_members().collect()
    }

    /// Members cast to the element kind (`Object` for untyped lists)
    pub fn member_views(&self) -> OntResult<Vec<View<'m>>> {
        let kind = self.element_kind.unwrap_or(ViewKind::Object);
        Ok(self
            .members()?
            .into_iter()
            .filter_map(|m| self.model.try_as(&m, kind))
            .collect())
    }

    pub fn contains(&self, element: &RdfObject) -> bool {
        self.safe_cells().any(|c| c.first() == element)
    }

    /// Per-cell `rdf:type` (typed lists), `rdf:first` and `rdf:rest`
    /// statements
    pub fn spec(&self) -> Vec<OntStatement<'m>> {
        let mut out = Vec::new();
        for cell in self.safe_cells() {
            if let Some(ty) = &self.list_type {
                if let Some(t) = cell.type_triple(self.model, ty) {
                    out.push(self.model.statement(t));
                }
            }
            out.push(self.model.statement(cell.first_triple));
            out.push(self.model.statement(cell.rest_triple));
        }
        out
    }

    /// Root statement followed by [`spec`](Self::spec)
    pub fn content(&self) -> Vec<OntStatement<'m>> {
        std::iter::once(self.main_statement()).chain(self.spec()).collect()
    }

    /// Sub-list starting at `index`, rooted at the `rdf:rest` triple that
    /// points to it. `index == len()` yields the empty tail.
    pub fn get(&self, index: usize) -> OntResult<OntList<'m>> {
        if index == 0 {
            return Ok(self.clone());
        }
        let v = self.model.vocab();
        let mut current = self.head.clone();
        let mut i = 0;
        while current.as_named_node() != Some(&v.rdf_nil) {
            let cell = read_cell(self.model, &current, self.list_type.as_ref())?;
            let rest = cell.rest_triple;
            i += 1;
            if i == index {
                return Ok(OntList {
                    model: self.model,
                    subject: rest.subject,
                    predicate: rest.predicate,
                    head: rest.object,
                    list_type: self.list_type.clone(),
                    element_kind: self.element_kind,
                    policy: self.policy,
                });
            }
            current = rest.object;
        }
        Err(OntError::IllegalArgument(format!("Index out of bounds: {}", index)))
    }

    fn require_root(&self) -> OntResult<Triple> {
        let root = self.root_triple();
        if !self.model.contains(&root) {
            return Err(OntError::IllegalState(format!("{} does not exist", root)));
        }
        Ok(root)
    }

    fn new_cell(&self, element: RdfObject, rest: RdfObject) -> RdfObject {
        let v = self.model.vocab();
        let cell: RdfSubject = BlankNode::new().into();
        if let Some(ty) = &self.list_type {
            self.model
                .add(Triple::new(cell.clone(), v.rdf_type.clone(), ty.clone().into()));
        }
        self.model
            .add(Triple::new(cell.clone(), v.rdf_first.clone(), element));
        self.model
            .add(Triple::new(cell.clone(), v.rdf_rest.clone(), rest));
        cell.into()
    }

    /// Point the root triple's bulk annotations at the new head
    fn set_head(&mut self, head: RdfObject) {
        if head == self.head {
            return;
        }
        let model = self.model;
        let target = &model.vocab().owl_annotated_target;
        for bulk in bulk_nodes(model, &self.root_triple()) {
            if let Some(bulk) = bulk.as_subject() {
                model.remove(&Triple::new(bulk.clone(), target.clone(), self.head.clone()));
                model.add(Triple::new(bulk, target.clone(), head.clone()));
            }
        }
        debug!(subject = %self.subject, predicate = %self.predicate, from = %self.head, to = %head, "Moved list head");
        self.head = head;
    }

    fn cell_batches(&self) -> OntResult<Vec<ListCell>> {
        self.cells().collect()
    }

    fn nil(&self) -> RdfObject {
        self.model.vocab().rdf_nil.clone().into()
    }

    pub fn add_last(&mut self, element: impl Into<RdfObject>) -> OntResult<&mut Self> {
        let element = element.into();
        self.check_element(&element)?;
        let root = self.require_root()?;
        let cells = self.cell_batches()?;
        let anchor = cells.last().map(|c| c.rest_triple.clone()).unwrap_or(root);
        let cell = self.new_cell(element, self.nil());
        self.model
            .add(Triple::new(anchor.subject.clone(), anchor.predicate.clone(), cell.clone()));
        self.model.remove(&anchor);
        if cells.is_empty() {
            self.set_head(cell);
        }
        debug!(list = %self, "Appended list member");
        Ok(self)
    }

    pub fn add_first(&mut self, element: impl Into<RdfObject>) -> OntResult<&mut Self> {
        let element = element.into();
        self.check_element(&element)?;
        let root = self.require_root()?;
        let cell = self.new_cell(element, self.head.clone());
        self.model
            .add(Triple::new(self.subject.clone(), self.predicate.clone(), cell.clone()));
        self.model.remove(&root);
        self.set_head(cell);
        debug!(list = %self, "Prepended list member");
        Ok(self)
    }

    /// `NotFound` for a mutation that needs at least one cell
    fn no_members(&self) -> OntError {
        let pattern = TriplePattern::of(self.head.as_subject().as_ref(), Some(&self.model.vocab().rdf_first), None);
        OntError::missing(&self.head, &pattern)
    }

    fn remove_cell(&self, cell: &ListCell) {
        for t in &cell.batch {
            self.model.remove(t);
        }
    }

    pub fn remove_last(&mut self) -> OntResult<&mut Self> {
        if self.is_nil() {
            return Err(self.no_members());
        }
        let root = self.require_root()?;
        let mut cells = self.cell_batches()?;
        let Some(last) = cells.pop() else {
            return Err(OntError::IllegalState(format!("{} has no cells", self)));
        };
        let prev = cells.last().map(|c| c.rest_triple.clone()).unwrap_or(root);
        self.model
            .add(Triple::new(prev.subject.clone(), prev.predicate.clone(), self.nil()));
        self.remove_cell(&last);
        self.model.remove(&prev);
        if cells.is_empty() {
            self.set_head(self.nil());
        }
        debug!(list = %self, "Removed last list member");
        Ok(self)
    }

    pub fn remove_first(&mut self) -> OntResult<&mut Self> {
        if self.is_nil() {
            return Err(self.no_members());
        }
        let root = self.require_root()?;
        let first = read_cell(self.model, &self.head, self.list_type.as_ref())?;
        let next = first.rest().clone();
        self.model
            .add(Triple::new(self.subject.clone(), self.predicate.clone(), next.clone()));
        self.remove_cell(&first);
        self.model.remove(&root);
        self.set_head(next);
        debug!(list = %self, "Removed first list member");
        Ok(self)
    }

    /// Remove every cell and leave the root pointing at nil
    pub fn clear(&mut self) -> OntResult<&mut Self> {
        if self.is_nil() {
            return Err(OntError::IllegalState(format!("{} does not contain any items", self)));
        }
        let root = self.require_root()?;
        let cells = self.cell_batches()?;
        for cell in &cells {
            self.remove_cell(cell);
        }
        self.model.remove(&root);
        self.model
            .add(Triple::new(self.subject.clone(), self.predicate.clone(), self.nil()));
        self.set_head(self.nil());
        debug!(list = %self, cells = cells.len(), "Cleared list");
        Ok(self)
    }

    /// Drop the cells reachable from the head, leaving the root triple
    pub(crate) fn delete_cells(&self) {
        for cell in self.safe_cells() {
            self.remove_cell(&cell);
        }
    }
}

impl PartialEq for OntList<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model)
            && self.subject == other.subject
            && self.predicate == other.predicate
            && self.head == other.head
    }
}

impl Eq for OntList<'_> {}

impl Hash for OntList<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.predicate.hash(state);
        self.head.hash(state);
    }
}

impl fmt::Debug for OntList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntList")
            .field("root", &self.root_triple().to_string())
            .field("list_type", &self.list_type)
            .field("element_kind", &self.element_kind)
            .finish()
    }
}

impl fmt::Display for OntList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {} {}]", self.subject, self.predicate, self.head)
    }
}

impl OntModel {
    /// Build a list of `elements` and attach it with `(subject, predicate, head)`
    pub fn create_list(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
        list_type: Option<NamedNode>,
        element_kind: Option<ViewKind>,
        elements: impl IntoIterator<Item = RdfObject>,
    ) -> OntResult<OntList<'_>> {
        let elements: Vec<RdfObject> = elements.into_iter().collect();
        let nil: RdfObject = self.vocab().rdf_nil.clone().into();
        let mut list = OntList::new(self, subject.clone(), predicate.clone(), nil.clone(), list_type, element_kind);
        for element in &elements {
            list.check_element(element)?;
        }
        let mut head = nil;
        for element in elements.into_iter().rev() {
            head = list.new_cell(element, head);
        }
        self.add(Triple::new(subject.clone(), predicate.clone(), head.clone()));
        list.head = head;
        debug!(list = %list, "Created list");
        Ok(list)
    }

    /// Every list attached to `subject` through `predicate`
    pub fn lists(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<OntList<'_>> {
        self.find(Some(subject), Some(predicate), None)
            .filter_map(|t| self.list_at(&t))
            .collect()
    }

    pub fn as_list(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Option<OntList<'_>> {
        self.lists(subject, predicate).into_iter().next()
    }

    /// The list anchored by `triple`, if its object is a list cell
    pub fn list_at(&self, triple: &Triple) -> Option<OntList<'_>> {
        let v = self.vocab();
        if triple.predicate == v.rdf_rest || triple.predicate == v.rdf_first {
            return None;
        }
        if !is_list_cell(self, &triple.object) {
            return None;
        }
        let list_type = triple
            .object
            .as_subject()
            .and_then(|s| self.objects_of(&s, &v.rdf_type).into_iter().next())
            .and_then(|t| t.as_named_node().cloned());
        Some(OntList::new(
            self,
            triple.subject.clone(),
            triple.predicate.clone(),
            triple.object.clone(),
            list_type,
            None,
        ))
    }

    /// Remove a list: its cells, its root triple and the root's annotations
    pub fn delete_list(&self, list: OntList<'_>) -> OntResult<()> {
        list.main_statement().clear_annotations()?;
        list.delete_cells();
        self.remove(&list.root_triple());
        debug!(list = %list, "Deleted list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, NamedNode};

    fn ex(name: &str) -> NamedNode {
        NamedNode::new(format!("http://example.org/{}", name).as_str()).unwrap()
    }

    fn int(i: i64) -> RdfObject {
        Literal::integer(i).into()
    }

    fn numbers<'m>(model: &'m OntModel, values: &[i64]) -> OntList<'m> {
        let p = RdfPredicate::from(ex("values"));
        model
            .create_list(&ex("x").into(), &p, None, None, values.iter().map(|i| int(*i)))
            .unwrap()
    }

    #[test]
    fn test_create_and_iterate() {
        let model = OntModel::in_memory();
        let list = numbers(&model, &[1, 2, 3]);
        assert_eq!(model.size(), 7);
        assert_eq!(list.members().unwrap(), vec![int(1), int(2), int(3)]);
        assert_eq!(list.len(), 3);
        assert!(list.contains(&int(2)));
        assert!(!list.contains(&int(4)));
        assert_eq!(list.spec().len(), 6);
        assert_eq!(list.content().len(), 7);
        assert!(model.can_as(list.head(), ViewKind::List));
        assert_eq!(model.as_list(list.subject(), list.predicate()).unwrap(), list);
    }

    #[test]
    fn test_get_and_remove_first() {
        let model = OntModel::in_memory();
        let mut list = numbers(&model, &[1, 2, 3]);
        let tail = list.get(1).unwrap();
        assert_eq!(tail.members().unwrap(), vec![int(2), int(3)]);
        assert_eq!(tail.predicate(), &model.vocab().rdf_rest);
        assert!(list.get(3).unwrap().is_nil());
        assert!(matches!(list.get(4), Err(OntError::IllegalArgument(_))));
        assert_eq!(list.get(0).unwrap(), list);

        list.remove_first().unwrap().remove_first().unwrap();
        assert_eq!(list.members().unwrap(), vec![int(3)]);
        assert_eq!(model.size(), 3);
    }

    #[test]
    fn test_add_last_remove_last_restores_triples() {
        let model = OntModel::in_memory();
        let mut list = numbers(&model, &[1, 2]);
        let before = model.triples();
        list.add_last(int(9)).unwrap();
        assert_eq!(list.members().unwrap(), vec![int(1), int(2), int(9)]);
        list.remove_last().unwrap();
        let mut after = model.triples();
        let mut expected = before.clone();
        after.sort_by_key(|t| t.to_string());
        expected.sort_by_key(|t| t.to_string());
        assert_eq!(after, expected);
    }

    #[test]
    fn test_mutations_on_nil() {
        let model = OntModel::in_memory();
        let mut list = numbers(&model, &[]);
        assert!(list.is_nil());
        assert!(list.is_empty());
        assert_eq!(model.size(), 1);
        assert!(matches!(list.remove_first(), Err(OntError::NotFound(m)) if m.contains("rdf-syntax-ns#first")));
        assert!(matches!(list.remove_last(), Err(OntError::NotFound(m)) if m.contains("rdf-syntax-ns#nil")));
        assert!(matches!(list.clear(), Err(OntError::IllegalState(_))));

        list.add_first(int(2)).unwrap().add_first(int(1)).unwrap();
        list.add_last(int(3)).unwrap();
        assert_eq!(list.members().unwrap(), vec![int(1), int(2), int(3)]);
        list.clear().unwrap();
        assert!(list.is_nil());
        assert_eq!(model.size(), 1);
        assert!(model.contains(&list.root_triple()));
    }

    #[test]
    fn test_typed_list_cells() {
        let model = OntModel::in_memory();
        let ty = ex("ListType");
        let p = RdfPredicate::from(ex("items"));
        let mut list = model
            .create_list(&ex("x").into(), &p, Some(ty.clone()), None, [int(1)])
            .unwrap();
        list.add_last(int(2)).unwrap();
        // root, two cells of three triples
        assert_eq!(model.size(), 7);
        assert_eq!(list.spec().len(), 6);
        let nil: RdfObject = model.vocab().rdf_nil.clone().into();
        assert!(!model.has_type(&nil, &ty));
        assert_eq!(model.list_at(&list.root_triple()).unwrap().list_type(), Some(&ty));
    }

    #[test]
    fn test_element_kind_checks() {
        let model = OntModel::in_memory();
        let a = model.create_class("http://example.org/A").unwrap();
        let p = RdfPredicate::from(ex("classes"));
        let subject: RdfSubject = ex("x").into();
        assert!(matches!(
            model.create_list(&subject, &p, None, Some(ViewKind::Class), [int(1)]),
            Err(OntError::IllegalArgument(_))
        ));
        assert_eq!(model.size(), 1);

        let mut list = model
            .create_list(&subject, &p, None, Some(ViewKind::Class), [a.node().clone()])
            .unwrap();
        assert!(matches!(list.add_last(int(1)), Err(OntError::IllegalArgument(_))));

        // a foreign member written behind the list's back
        let untyped = model
            .create_list(&subject, &RdfPredicate::from(ex("mixed")), None, None, [a.node().clone(), int(1)])
            .unwrap();
        let skip = untyped.clone().with_element_kind(ViewKind::Class);
        assert_eq!(skip.members().unwrap(), vec![a.node().clone()]);
        let fail = skip.with_policy(ElementPolicy::Fail);
        assert!(matches!(fail.members(), Err(OntError::IllegalArgument(_))));
        assert_eq!(list.member_views().unwrap().len(), 1);
        list.remove_last().unwrap();
        assert!(list.is_nil());
    }

    #[test]
    fn test_cycle_detection() {
        let model = OntModel::in_memory();
        let v = model.vocab().clone();
        let c1: RdfSubject = BlankNode::new().into();
        let c2: RdfSubject = BlankNode::new().into();
        model.add(Triple::new(ex("x").into(), ex("p").into(), c1.clone().into()));
        model.add(Triple::new(c1.clone(), v.rdf_first.clone(), int(1)));
        model.add(Triple::new(c1.clone(), v.rdf_rest.clone(), c2.clone().into()));
        model.add(Triple::new(c2.clone(), v.rdf_first.clone(), int(2)));
        model.add(Triple::new(c2.clone(), v.rdf_rest.clone(), c1.clone().into()));

        let list = model.as_list(&ex("x").into(), &ex("p").into()).unwrap();
        let mut safe = list.safe_cells();
        assert_eq!(safe.by_ref().count(), 2);
        assert!(safe.is_malformed());

        let results: Vec<_> = list.cells().take(10).collect();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[2], Err(OntError::IllegalState(_))));
        assert!(list.members().is_err());
    }

    #[test]
    fn test_missing_rest_is_malformed() {
        let model = OntModel::in_memory();
        let v = model.vocab().clone();
        let cell: RdfSubject = BlankNode::new().into();
        model.add(Triple::new(ex("x").into(), ex("p").into(), cell.clone().into()));
        model.add(Triple::new(cell.clone(), v.rdf_first.clone(), int(1)));
        let list = OntList::new(&model, ex("x").into(), ex("p").into(), cell.into(), None, None);
        let err = list.members().unwrap_err();
        assert!(err.to_string().contains("rdf-syntax-ns#rest"));
        assert_eq!(list.len(), 0);
        assert!(read_members(&model, list.head()).is_none());
    }

    #[test]
    fn test_branching_rest_is_malformed() {
        let model = OntModel::in_memory();
        let v = model.vocab().clone();
        let cell: RdfSubject = BlankNode::new().into();
        let other: RdfSubject = BlankNode::new().into();
        model.add(Triple::new(ex("x").into(), ex("p").into(), cell.clone().into()));
        model.add(Triple::new(cell.clone(), v.rdf_first.clone(), int(1)));
        model.add(Triple::new(cell.clone(), v.rdf_rest.clone(), v.rdf_nil.clone().into()));
        model.add(Triple::new(cell.clone(), v.rdf_rest.clone(), other.clone().into()));
        model.add(Triple::new(other.clone(), v.rdf_first.clone(), int(2)));
        model.add(Triple::new(other, v.rdf_rest.clone(), v.rdf_nil.clone().into()));

        let list = OntList::new(&model, ex("x").into(), ex("p").into(), cell.into(), None, None);
        let results: Vec<_> = list.cells().collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], Err(OntError::IllegalState(m)) if m.contains("more than one")));
        assert!(list.members().is_err());

        let mut safe = list.safe_cells();
        assert_eq!(safe.by_ref().count(), 0);
        assert!(safe.is_malformed());
        assert!(read_members(&model, list.head()).is_none());
    }

    #[test]
    fn test_typed_cell_without_type_is_malformed() {
        let model = OntModel::in_memory();
        let ty = ex("ListType");
        let p = RdfPredicate::from(ex("items"));
        let list = model
            .create_list(&ex("x").into(), &p, Some(ty.clone()), None, [int(1), int(2)])
            .unwrap();
        let second = list.get(1).unwrap().head().clone();
        let second_subject = second.as_subject().unwrap();
        model.remove(&Triple::new(second_subject, model.vocab().rdf_type.clone(), ty.into()));

        let results: Vec<_> = list.cells().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(OntError::IllegalState(m)) if m.contains("ListType")));

        let mut safe = list.safe_cells();
        assert_eq!(safe.by_ref().count(), 1);
        assert!(safe.is_malformed());
        assert_eq!(list.len(), 1);

        // the same cells read as an untyped list are fine
        let untyped = OntList::new(&model, ex("x").into(), p, list.head().clone(), None, None);
        assert_eq!(untyped.members().unwrap(), vec![int(1), int(2)]);
    }

    #[test]
    fn test_head_change_moves_annotations() {
        let model = OntModel::in_memory();
        let mut list = numbers(&model, &[1, 2]);
        let label = model.vocab().rdfs_label.clone();
        list.main_statement()
            .add_annotation(&label, Literal::new_simple_literal("numbers"))
            .unwrap();
        list.remove_first().unwrap();
        let annotations = list.main_statement().annotations();
        assert_eq!(annotations.len(), 1);
        list.add_first(int(0)).unwrap();
        assert_eq!(list.main_statement().annotations().len(), 1);
    }

    #[test]
    fn test_delete_list() {
        let model = OntModel::in_memory();
        let list = numbers(&model, &[1, 2, 3]);
        let label = model.vocab().rdfs_label.clone();
        list.main_statement()
            .add_annotation(&label, Literal::new_simple_literal("numbers"))
            .unwrap();
        model.delete_list(list).unwrap();
        assert!(model.is_empty());
    }
}
