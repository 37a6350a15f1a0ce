/// A minimal mutable directed graph.
///
/// Nodes are arbitrary hashable identifiers with opaque payloads, and
/// directed edges between node pairs carry their own payloads. Node
/// enumeration follows insertion order, which the algorithms in
/// [`algorithm`] rely on for deterministic results.
///
/// The graph is single-owner: no internal locking is provided, and no
/// operation is transactional.
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};

pub mod algorithm;

#[derive(Debug, Clone)]
struct NodeEntry<K, N> {
    payload: N,
    preds: Vec<K>,
    succs: Vec<K>,
}

/// A directed graph with node ids `K`, node payloads `N` and edge
/// payloads `E`.
///
/// Self-loops are allowed. Re-adding an existing node or edge overwrites
/// its payload without disturbing insertion order.
#[derive(Debug, Clone)]
pub struct DiGraph<K, N, E> {
    order: Vec<K>,
    entries: HashMap<K, NodeEntry<K, N>>,
    edges: HashMap<(K, K), E>,
}

impl<K, N, E> DiGraph<K, N, E>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        DiGraph {
            order: Vec::new(),
            entries: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Inserts a node. If the node already exists its payload is replaced
    /// and its position in the insertion order is kept.
    pub fn add_node(&mut self, key: K, payload: N) {
        match self.entries.get_mut(&key) {
            Some(entry) => entry.payload = payload,
            None => {
                self.order.push(key.clone());
                self.entries.insert(
                    key,
                    NodeEntry {
                        payload,
                        preds: Vec::new(),
                        succs: Vec::new(),
                    },
                );
            }
        }
    }

    /// Removes a node along with all of its incident edges, returning its
    /// payload. Fails if the node does not exist.
    pub fn remove_node(&mut self, key: &K) -> Result<N> {
        let entry = self
            .entries
            .remove(key)
            .ok_or_else(|| Error::not_found(key))?;
        self.order.retain(|k| k != key);
        for pred in &entry.preds {
            self.edges.remove(&(pred.clone(), key.clone()));
            if let Some(pred_entry) = self.entries.get_mut(pred) {
                pred_entry.succs.retain(|k| k != key);
            }
        }
        for succ in &entry.succs {
            self.edges.remove(&(key.clone(), succ.clone()));
            if let Some(succ_entry) = self.entries.get_mut(succ) {
                succ_entry.preds.retain(|k| k != key);
            }
        }
        Ok(entry.payload)
    }

    /// Inserts a directed edge from `from` to `to`. Fails if either
    /// endpoint is missing; re-adding an edge replaces its payload.
    pub fn add_edge(&mut self, from: K, to: K, payload: E) -> Result<()> {
        if !self.entries.contains_key(&from) {
            return Err(Error::not_found(&from));
        }
        if !self.entries.contains_key(&to) {
            return Err(Error::not_found(&to));
        }
        let fresh = self
            .edges
            .insert((from.clone(), to.clone()), payload)
            .is_none();
        if fresh {
            if let Some(entry) = self.entries.get_mut(&from) {
                entry.succs.push(to.clone());
            }
            if let Some(entry) = self.entries.get_mut(&to) {
                entry.preds.push(from);
            }
        }
        Ok(())
    }

    /// Removes the edge from `from` to `to`, returning its payload.
    pub fn remove_edge(&mut self, from: &K, to: &K) -> Result<E> {
        let payload = self
            .edges
            .remove(&(from.clone(), to.clone()))
            .ok_or_else(|| Error::not_found(&(from, to)))?;
        if let Some(entry) = self.entries.get_mut(from) {
            entry.succs.retain(|k| k != to);
        }
        if let Some(entry) = self.entries.get_mut(to) {
            entry.preds.retain(|k| k != from);
        }
        Ok(payload)
    }

    /// Returns the payload of a node.
    pub fn node(&self, key: &K) -> Result<&N> {
        self.entries
            .get(key)
            .map(|entry| &entry.payload)
            .ok_or_else(|| Error::not_found(key))
    }

    /// Returns the payload of a node, mutably.
    pub fn node_mut(&mut self, key: &K) -> Result<&mut N> {
        self.entries
            .get_mut(key)
            .map(|entry| &mut entry.payload)
            .ok_or_else(|| Error::not_found(key))
    }

    /// Returns the payload of an edge.
    pub fn edge(&self, from: &K, to: &K) -> Result<&E> {
        self.edges
            .get(&(from.clone(), to.clone()))
            .ok_or_else(|| Error::not_found(&(from, to)))
    }

    /// Checks whether a node exists.
    pub fn contains_node(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Direct predecessors of a node, in edge insertion order.
    pub fn predecessors(&self, key: &K) -> Result<impl Iterator<Item = &K>> {
        self.entries
            .get(key)
            .map(|entry| entry.preds.iter())
            .ok_or_else(|| Error::not_found(key))
    }

    /// Direct successors of a node, in edge insertion order.
    pub fn successors(&self, key: &K) -> Result<impl Iterator<Item = &K>> {
        self.entries
            .get(key)
            .map(|entry| entry.succs.iter())
            .ok_or_else(|| Error::not_found(key))
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K, N, E> Default for DiGraph<K, N, E>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
