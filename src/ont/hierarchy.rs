//! Generic hierarchy traversal
//!
//! Every query takes an `explicit` function returning the asserted relatives
//! of a node, so the same code walks `rdfs:subClassOf`, `rdfs:subPropertyOf`
//! and `rdf:type` in either direction. Results keep discovery order.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;

/// Relatives of `start`: the [`direct_nodes`] when `direct`, otherwise the
/// transitive closure. `start` is never part of the result,
/// even on a cycle back to it.
pub fn tree_nodes<T, F, I>(start: &T, mut explicit: F, direct: bool) -> IndexSet<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    if direct {
        return direct_nodes(start, explicit);
    }
    closure(start, &mut explicit)
}

fn closure<T, F, I>(start: &T, explicit: &mut F) -> IndexSet<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut visited: FxHashSet<T> = FxHashSet::default();
    visited.insert(start.clone());
    let mut out = IndexSet::new();
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(node) = queue.pop_front() {
        for next in explicit(&node) {
            if visited.insert(next.clone()) {
                out.insert(next.clone());
                queue.push_back(next);
            }
        }
    }
    out
}

/// Explicit relatives of `start` minus the shortcuts: a relative that
/// another relative already reaches is dropped, unless the two reach each
/// other or that other relative reaches back to `start`.
pub fn direct_nodes<T, F, I>(start: &T, mut explicit: F) -> IndexSet<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let candidates: IndexSet<T> = explicit(start).into_iter().filter(|n| n != start).collect();
    if candidates.len() < 2 {
        return candidates;
    }
    let reach: Vec<IndexSet<T>> = candidates
        .iter()
        .map(|c| closure(c, &mut explicit))
        .collect();
    candidates
        .iter()
        .enumerate()
        .filter(|(i, parent)| {
            !candidates.iter().enumerate().any(|(j, other)| {
                j != *i
                    && reach[j].contains(*parent)
                    && !reach[*i].contains(other)
                    && !reach[j].contains(start)
            })
        })
        .map(|(_, parent)| parent.clone())
        .collect()
}

/// Is `candidate` reachable from `start`. Reflexive: a node always
/// contains itself.
pub fn contains<T, F, I>(start: &T, candidate: &T, mut explicit: F, direct: bool) -> bool
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    if start == candidate {
        return true;
    }
    if direct {
        return direct_nodes(start, explicit).contains(candidate);
    }
    let mut visited: FxHashSet<T> = FxHashSet::default();
    visited.insert(start.clone());
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(node) = queue.pop_front() {
        for next in explicit(&node) {
            if &next == candidate {
                return true;
            }
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    false
}

/// Seeds plus everything reachable from them
pub fn all_nodes_inclusive<T, F, I, S>(seeds: S, mut explicit: F) -> IndexSet<T>
where
    T: Clone + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
    S: IntoIterator<Item = T>,
{
    let mut out: IndexSet<T> = IndexSet::new();
    let mut queue = VecDeque::new();
    for seed in seeds {
        if out.insert(seed.clone()) {
            queue.push_back(seed);
        }
    }
    while let Some(node) = queue.pop_front() {
        for next in explicit(&node) {
            if out.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    out
}

/// A node is a root when each of its direct parents is itself or a top
pub fn is_hierarchy_root<T, P>(node: &T, direct_parents: P, tops: &[T]) -> bool
where
    T: Eq,
    P: IntoIterator<Item = T>,
{
    direct_parents
        .into_iter()
        .all(|parent| &parent == node || tops.contains(&parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn relation(edges: &[(&'static str, &'static str)]) -> FxHashMap<&'static str, Vec<&'static str>> {
        let mut map: FxHashMap<_, Vec<_>> = FxHashMap::default();
        for (from, to) in edges {
            map.entry(*from).or_default().push(*to);
        }
        map
    }

    #[test]
    fn test_cycle_terminates() {
        let rel = relation(&[("A", "B"), ("B", "A")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        let all = tree_nodes(&"A", parents, false);
        assert_eq!(all.into_iter().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_direct_excludes_self_loop() {
        let rel = relation(&[("A", "A"), ("A", "B"), ("B", "C")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        let direct: Vec<_> = tree_nodes(&"A", parents, true).into_iter().collect();
        assert_eq!(direct, vec!["B"]);
        let all: Vec<_> = tree_nodes(&"A", parents, false).into_iter().collect();
        assert_eq!(all, vec!["B", "C"]);
    }

    #[test]
    fn test_direct_drops_shortcuts() {
        let rel = relation(&[("A", "B"), ("B", "C"), ("A", "C"), ("A", "D")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        let direct: Vec<_> = tree_nodes(&"A", parents, true).into_iter().collect();
        assert_eq!(direct, vec!["B", "D"]);
        assert!(!contains(&"A", &"C", parents, true));
        assert!(contains(&"A", &"C", parents, false));
    }

    #[test]
    fn test_direct_keeps_equivalent_relatives() {
        // B and C reach each other, so neither is a shortcut through the other
        let rel = relation(&[("A", "B"), ("A", "C"), ("B", "C"), ("C", "B")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        let direct: Vec<_> = direct_nodes(&"A", parents).into_iter().collect();
        assert_eq!(direct, vec!["B", "C"]);
    }

    #[test]
    fn test_contains_is_reflexive() {
        let empty = |_: &u32| Vec::<u32>::new();
        for x in 0..5 {
            assert!(contains(&x, &x, empty, false));
            assert!(contains(&x, &x, empty, true));
        }
        assert!(!contains(&1, &2, empty, false));
    }

    #[test]
    fn test_contains_direct_and_transitive() {
        let rel = relation(&[("A", "B"), ("B", "C"), ("C", "B")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        assert!(contains(&"A", &"C", parents, false));
        assert!(!contains(&"A", &"C", parents, true));
        assert!(contains(&"A", &"B", parents, true));
        assert!(!contains(&"C", &"A", parents, false));
    }

    #[test]
    fn test_all_nodes_inclusive() {
        let rel = relation(&[("A", "B"), ("B", "C"), ("D", "C")]);
        let parents = |n: &&str| rel.get(n).cloned().unwrap_or_default();
        let all: Vec<_> = all_nodes_inclusive(["A", "D"], parents).into_iter().collect();
        assert_eq!(all, vec!["A", "D", "B", "C"]);
        assert!(all_nodes_inclusive(Vec::<&str>::new(), parents).is_empty());
    }

    #[test]
    fn test_root_with_several_tops() {
        let tops = ["Thing", "Resource"];
        assert!(is_hierarchy_root(&"Dog", Vec::new(), &tops));
        assert!(is_hierarchy_root(&"Dog", vec!["Thing", "Resource", "Dog"], &tops));
        assert!(!is_hierarchy_root(&"Dog", vec!["Animal"], &tops));
    }
}
