//! Encoding aggregated streets into a batch of graph facts.
//!
//! The distinct streets form a chain in route order. Each street gets a
//! length fact, and the chain is anchored by the start and end addresses.
//! All nodes are resolved first, then the whole batch is submitted once.

use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info, trace, warn};

use crate::{
    EncoderConfig, Error,
    aggregation::StreetAggregate,
    model::{RelationKind, Triple, TripleBatch},
    normalize::{identifier, length_label},
    storage::StorageBackend,
};

/// Encodes one route into facts against a storage backend.
///
/// Node resolutions are memoized within a run, so each identifier is
/// resolved at most once per [`SemanticEncoder::build`]. Nothing is carried
/// from one run into the next.
pub struct SemanticEncoder<'a, B: StorageBackend + ?Sized> {
    backend: &'a B,
    config: &'a EncoderConfig,
    resolved: HashMap<String, B::NodeRef>,
}

impl<'a, B: StorageBackend + ?Sized> SemanticEncoder<'a, B> {
    pub fn new(backend: &'a B, config: &'a EncoderConfig) -> Self {
        Self {
            backend,
            config,
            resolved: HashMap::new(),
        }
    }

    fn resolve(&mut self, display: &str) -> Result<B::NodeRef, Error> {
        self.resolve_identifier(identifier(display))
    }

    fn resolve_identifier(&mut self, identifier: String) -> Result<B::NodeRef, Error> {
        if let Some(node) = self.resolved.get(&identifier) {
            return Ok(node.clone());
        }
        trace!("Resolving concept node `{identifier}`");
        let node = self.backend.resolve_or_create(&identifier)?;
        self.resolved.insert(identifier, node.clone());
        Ok(node)
    }

    /// Resolves every node of the route and builds its fact batch without
    /// submitting it.
    ///
    /// The batch holds the adjacency facts in route order, then the length
    /// facts in route order, then the start and end facts. Missing addresses
    /// are replaced by the placeholder labels from the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRoute`] before touching the backend if there
    /// are no streets, or the backend error of a failed resolution.
    pub fn build(
        &mut self,
        streets: &StreetAggregate,
        start_address: Option<&str>,
        end_address: Option<&str>,
    ) -> Result<TripleBatch<B::NodeRef>, Error> {
        if streets.is_empty() {
            return Err(Error::EmptyRoute);
        }
        self.resolved.clear();

        let street_nodes = streets
            .spine()
            .iter()
            .map(|street| self.resolve_identifier(street.identifier.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let length_nodes = streets
            .spine()
            .iter()
            .map(|street| self.resolve(&length_label(street.total_length)))
            .collect::<Result<Vec<_>, _>>()?;

        let start_label = endpoint_label(start_address, &self.config.unknown_start_label, "start");
        let end_label = endpoint_label(end_address, &self.config.unknown_end_label, "end");
        let start_node = self.resolve(&start_label)?;
        let end_node = self.resolve(&end_label)?;

        let mut batch = Vec::with_capacity(street_nodes.len() * 2 + 1);
        batch.extend(street_nodes.iter().tuple_windows().map(|(from, to)| {
            Triple::new(from.clone(), RelationKind::AdjacentOnRoute, to.clone())
        }));
        batch.extend(
            length_nodes
                .into_iter()
                .zip(&street_nodes)
                .map(|(length, street)| {
                    Triple::new(length, RelationKind::HasLength, street.clone())
                }),
        );
        // street_nodes is non-empty: the spine was checked above
        let (first, last) = (&street_nodes[0], &street_nodes[street_nodes.len() - 1]);
        batch.push(Triple::new(start_node, RelationKind::StartsAt, first.clone()));
        batch.push(Triple::new(last.clone(), RelationKind::EndsAt, end_node));

        debug!(
            "Built {} facts for {} streets ({} concept nodes)",
            batch.len(),
            streets.len(),
            self.resolved.len()
        );
        Ok(batch)
    }

    /// Builds the route's fact batch and submits it in one call.
    ///
    /// # Errors
    ///
    /// Everything [`SemanticEncoder::build`] returns, plus
    /// [`Error::BackendWrite`] if the submission fails. A failed batch can be
    /// resubmitted as a whole.
    pub fn encode(
        &mut self,
        streets: &StreetAggregate,
        start_address: Option<&str>,
        end_address: Option<&str>,
    ) -> Result<TripleBatch<B::NodeRef>, Error> {
        let batch = self.build(streets, start_address, end_address)?;
        self.backend.submit_triples(&batch).map_err(|err| match err {
            Error::BackendWrite(_) => err,
            other => Error::BackendWrite(other.to_string()),
        })?;
        info!("Submitted {} route facts", batch.len());
        Ok(batch)
    }
}

fn endpoint_label(address: Option<&str>, placeholder: &str, which: &str) -> String {
    match address.map(str::trim).filter(|address| !address.is_empty()) {
        Some(address) => address.to_string(),
        None => {
            warn!("No {which} address available, encoding placeholder {placeholder:?}");
            placeholder.to_string()
        }
    }
}
