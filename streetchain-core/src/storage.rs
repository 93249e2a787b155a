//! Graph fact storage interface and an in-memory implementation

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use hashbrown::HashMap;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::{
    Error,
    model::{RelationKind, Triple},
};

/// Store that owns concept nodes and persists route facts.
///
/// Implementations are shared between concurrent encoding runs, so both
/// operations take `&self` and must be safe to call from several threads.
pub trait StorageBackend {
    type NodeRef: Clone + Eq + Hash + Debug;

    /// Returns the node for `identifier`, creating it if absent.
    ///
    /// Resolving the same identifier twice must return the same node, also
    /// when two runs race on it.
    fn resolve_or_create(&self, identifier: &str) -> Result<Self::NodeRef, Error>;

    /// Persists a batch of facts; either all of them or none.
    fn submit_triples(&self, batch: &[Triple<Self::NodeRef>]) -> Result<(), Error>;
}

#[derive(Debug, Default)]
struct StoreState {
    graph: StableDiGraph<String, RelationKind>,
    identifiers: HashMap<String, NodeIndex>,
    resolve_calls: usize,
}

/// Mutex-guarded in-memory fact graph
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, Error> {
        self.state
            .lock()
            .map_err(|_| Error::BackendResolve("memory store lock poisoned".to_string()))
    }

    pub fn node_count(&self) -> Result<usize, Error> {
        Ok(self.lock()?.graph.node_count())
    }

    pub fn fact_count(&self) -> Result<usize, Error> {
        Ok(self.lock()?.graph.edge_count())
    }

    /// Number of resolve-or-create calls served so far
    pub fn resolve_calls(&self) -> Result<usize, Error> {
        Ok(self.lock()?.resolve_calls)
    }

    /// Identifier of a concept node, `None` for a node this store never created
    pub fn identifier(&self, node: NodeIndex) -> Result<Option<String>, Error> {
        Ok(self.lock()?.graph.node_weight(node).cloned())
    }

    /// Stored facts as identifier triples, in insertion order
    pub fn facts(&self) -> Result<Vec<Triple<String>>, Error> {
        let state = self.lock()?;
        Ok(state
            .graph
            .edge_indices()
            .filter_map(|edge| {
                let (source, target) = state.graph.edge_endpoints(edge)?;
                Some(Triple::new(
                    state.graph[source].clone(),
                    state.graph[edge],
                    state.graph[target].clone(),
                ))
            })
            .collect())
    }
}

impl StorageBackend for MemoryStore {
    type NodeRef = NodeIndex;

    fn resolve_or_create(&self, identifier: &str) -> Result<NodeIndex, Error> {
        let mut state = self.lock()?;
        state.resolve_calls += 1;

        if let Some(&node) = state.identifiers.get(identifier) {
            return Ok(node);
        }
        let node = state.graph.add_node(identifier.to_string());
        state.identifiers.insert(identifier.to_string(), node);
        log::trace!("Created concept node `{identifier}`");
        Ok(node)
    }

    fn submit_triples(&self, batch: &[Triple<NodeIndex>]) -> Result<(), Error> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::BackendWrite("memory store lock poisoned".to_string()))?;

        // Validate the whole batch before writing anything
        if let Some(unknown) = batch
            .iter()
            .flat_map(|triple| [triple.subject, triple.object])
            .find(|&node| !state.graph.contains_node(node))
        {
            return Err(Error::BackendWrite(format!(
                "batch references unknown node {unknown:?}"
            )));
        }

        let mut inserted = 0;
        for triple in batch {
            let exists = state.graph.edges(triple.subject).any(|edge| {
                edge.target() == triple.object && *edge.weight() == triple.predicate
            });
            if !exists {
                state
                    .graph
                    .add_edge(triple.subject, triple.object, triple.predicate);
                inserted += 1;
            }
        }
        log::debug!(
            "Stored {inserted} new facts out of a batch of {}",
            batch.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn resolving_twice_returns_same_node() {
        let store = MemoryStore::new();
        let first = store.resolve_or_create("main-st").unwrap();
        let second = store.resolve_or_create("main-st").unwrap();
        let other = store.resolve_or_create("elm-st").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(store.node_count().unwrap(), 2);
        assert_eq!(store.resolve_calls().unwrap(), 3);
        assert_eq!(store.identifier(first).unwrap().as_deref(), Some("main-st"));
    }

    #[test]
    fn concurrent_resolution_creates_one_node() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.resolve_or_create("shared").unwrap())
            })
            .collect();
        let nodes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(nodes.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(store.node_count().unwrap(), 1);
    }

    #[test]
    fn resubmitting_batch_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.resolve_or_create("a").unwrap();
        let b = store.resolve_or_create("b").unwrap();
        let batch = vec![
            Triple::new(a, RelationKind::AdjacentOnRoute, b),
            Triple::new(b, RelationKind::HasLength, a),
        ];

        store.submit_triples(&batch).unwrap();
        store.submit_triples(&batch).unwrap();

        assert_eq!(store.fact_count().unwrap(), 2);
        assert_eq!(
            store.facts().unwrap(),
            vec![
                Triple::new("a".to_string(), RelationKind::AdjacentOnRoute, "b".to_string()),
                Triple::new("b".to_string(), RelationKind::HasLength, "a".to_string()),
            ]
        );
    }

    #[test]
    fn batch_with_unknown_node_writes_nothing() {
        let store = MemoryStore::new();
        let a = store.resolve_or_create("a").unwrap();
        let b = store.resolve_or_create("b").unwrap();
        let batch = vec![
            Triple::new(a, RelationKind::AdjacentOnRoute, b),
            Triple::new(b, RelationKind::AdjacentOnRoute, NodeIndex::new(42)),
        ];

        assert!(matches!(
            store.submit_triples(&batch),
            Err(Error::BackendWrite(_))
        ));
        assert_eq!(store.fact_count().unwrap(), 0);
    }

    #[test]
    fn poisoned_store_reports_errors() {
        let store = Arc::new(MemoryStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the store");
        })
        .join();

        assert!(store.node_count().is_err());
        assert!(store.fact_count().is_err());
        assert!(store.resolve_calls().is_err());
        assert!(store.facts().is_err());
        assert!(store.resolve_or_create("a").is_err());
    }
}
