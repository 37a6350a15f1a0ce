/// Pure algorithms over [`DiGraph`].
///
/// Both algorithms consume only the minimal graph contract (node
/// enumeration in insertion order, predecessor/successor lookup, node
/// removal) and are synchronous, bounded traversals.
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::digraph::DiGraph;
use crate::error::{Error, Result};

/// Produces a linearization of the graph: every node appears after all of
/// its direct and transitive predecessors.
///
/// Ties between unordered nodes are broken deterministically by always
/// picking the earliest-inserted ready node, so a diamond graph sorts the
/// same way on every run. Fails with [`Error::Cycle`] naming a node on a
/// cycle when not every node can be placed.
pub fn topological_sort<K, N, E>(graph: &DiGraph<K, N, E>) -> Result<Vec<K>>
where
    K: Eq + Hash + Clone + Debug,
{
    let order: Vec<&K> = graph.nodes().collect();
    let index: HashMap<&K, usize> = order.iter().enumerate().map(|(i, &key)| (key, i)).collect();

    let mut in_degree = Vec::with_capacity(order.len());
    for &key in &order {
        in_degree.push(graph.predecessors(key)?.count());
    }

    // Ready nodes keyed by insertion index, so the earliest-inserted one
    // is always picked first.
    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(i, _)| i)
        .collect();

    let mut sorted = Vec::with_capacity(order.len());
    while let Some(i) = ready.pop_first() {
        let key = order[i];
        sorted.push(key.clone());
        for succ in graph.successors(key)? {
            let j = index[succ];
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    if sorted.len() == order.len() {
        return Ok(sorted);
    }

    // Anything left unplaced still has an unplaced predecessor. Walking
    // backwards through those predecessors must eventually revisit a node,
    // and that node lies on a cycle.
    let remaining: HashSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree > 0)
        .map(|(i, _)| i)
        .collect();
    let mut current = match remaining.iter().min() {
        Some(&i) => i,
        None => return Ok(sorted),
    };
    let mut seen = HashSet::new();
    while seen.insert(current) {
        current = graph
            .predecessors(order[current])?
            .filter_map(|pred| index.get(pred).copied())
            .find(|j| remaining.contains(j))
            .unwrap_or(current);
    }
    Err(Error::cycle(order[current]))
}

/// Removes each named node and, transitively, every predecessor that is
/// left with no remaining successors.
///
/// This models "remove a node and everything that only existed to feed
/// into it". Only nodes that *become* dangling through the cascade are
/// removed; a node that already had zero successors is never a predecessor
/// of anything and is therefore left alone.
///
/// A named node absent from the graph fails with [`Error::NotFound`];
/// removals performed before the failure are not rolled back. Cascade
/// candidates that were already removed by the time they are processed are
/// skipped silently.
pub fn remove_with_predecessors<K, N, E>(graph: &mut DiGraph<K, N, E>, keys: &[K]) -> Result<()>
where
    K: Eq + Hash + Clone + Debug,
{
    let mut queue: VecDeque<(K, bool)> = keys.iter().map(|key| (key.clone(), true)).collect();
    while let Some((key, named)) = queue.pop_front() {
        if !graph.contains_node(&key) {
            if named {
                return Err(Error::not_found(&key));
            }
            continue;
        }
        let preds: Vec<K> = graph.predecessors(&key)?.cloned().collect();
        graph.remove_node(&key)?;
        for pred in preds {
            // A predecessor of the removed node necessarily had at least
            // one successor, so an empty successor list here means it
            // became dangling through this removal.
            let dangling =
                graph.contains_node(&pred) && graph.successors(&pred)?.next().is_none();
            if dangling {
                debug!("cascading removal of dangling node {pred:?}");
                queue.push_back((pred, false));
            }
        }
    }
    Ok(())
}
