//! Route pipeline: extraction -> metrics -> aggregation -> encoding.
//!
//! Each stage runs to completion before the next one starts; aggregation is
//! global over the route, so it needs every segment first.

use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    EncoderConfig, Error, RoadNodeId,
    aggregation::{StreetAggregate, aggregate_streets},
    encoder::SemanticEncoder,
    model::{RawEdge, RoadNetwork, RouteTotals, StreetSegment, TripleBatch},
    storage::StorageBackend,
};

/// Reads the traversed edge of every consecutive node pair of the path.
///
/// A path of `k + 1` nodes yields `k` edges in path order; a path with
/// fewer than two nodes yields none.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] for the first pair of nodes that is not
/// connected in the network.
pub fn extract_segments<N: RoadNetwork + ?Sized>(
    path: &[RoadNodeId],
    network: &N,
) -> Result<Vec<RawEdge>, Error> {
    path.iter()
        .tuple_windows()
        .map(|(&from, &to)| network.edge_attributes(from, to))
        .collect()
}

/// Segments, totals and distinct streets of one route
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// One segment per path hop, in path order
    pub segments: Vec<StreetSegment>,
    pub totals: RouteTotals,
    pub streets: StreetAggregate,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Runs extraction, metric calculation and aggregation for a path
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] if the path is not connected in the
/// network.
pub fn plan_route<N: RoadNetwork + ?Sized>(
    path: &[RoadNodeId],
    network: &N,
    config: &EncoderConfig,
) -> Result<RoutePlan, Error> {
    let raw_edges = extract_segments(path, network)?;

    let default_speed = config.default_speed();
    let segments: Vec<StreetSegment> = raw_edges
        .into_iter()
        .map(|raw| StreetSegment::from_raw(raw, default_speed))
        .collect();

    let totals: RouteTotals = segments.iter().collect();
    let streets = aggregate_streets(&segments);

    debug!(
        "Planned route of {} segments: {} m, {:.1} s",
        segments.len(),
        totals.total_distance,
        totals.total_duration
    );

    Ok(RoutePlan {
        segments,
        totals,
        streets,
    })
}

/// Encodes an already planned route and submits its facts
///
/// # Errors
///
/// Returns [`Error::EmptyRoute`] for a route without streets, or the
/// backend error of a failed resolution or submission.
pub fn encode_plan<B: StorageBackend + ?Sized>(
    plan: &RoutePlan,
    start_address: Option<&str>,
    end_address: Option<&str>,
    backend: &B,
    config: &EncoderConfig,
) -> Result<TripleBatch<B::NodeRef>, Error> {
    SemanticEncoder::new(backend, config).encode(&plan.streets, start_address, end_address)
}

/// Turns a path into route facts and submits them to the backend.
///
/// Nothing reaches the backend unless the whole path is valid and has at
/// least one street.
///
/// # Errors
///
/// - [`Error::MalformedPath`] if consecutive path nodes are not connected
/// - [`Error::EmptyRoute`] if the path has no edges
/// - backend errors from resolving nodes or submitting the batch
pub fn encode_route<N, B>(
    path: &[RoadNodeId],
    network: &N,
    start_address: Option<&str>,
    end_address: Option<&str>,
    backend: &B,
    config: &EncoderConfig,
) -> Result<TripleBatch<B::NodeRef>, Error>
where
    N: RoadNetwork + ?Sized,
    B: StorageBackend + ?Sized,
{
    let plan = plan_route(path, network, config)?;
    info!(
        "Encoding route with {} distinct streets over {} m",
        plan.streets.len(),
        plan.totals.total_distance
    );
    encode_plan(&plan, start_address, end_address, backend, config)
}

/// Path and endpoint addresses of one route to encode
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub path: Vec<RoadNodeId>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
}

/// Encodes several routes in parallel against a shared backend.
///
/// Every route runs with its own aggregation and resolution state; results
/// are returned in request order.
pub fn encode_routes<N, B>(
    requests: &[RouteRequest],
    network: &N,
    backend: &B,
    config: &EncoderConfig,
) -> Vec<Result<TripleBatch<B::NodeRef>, Error>>
where
    N: RoadNetwork + Sync + ?Sized,
    B: StorageBackend + Sync + ?Sized,
    B::NodeRef: Send,
{
    info!("Encoding {} routes", requests.len());
    requests
        .par_iter()
        .map(|request| {
            encode_route(
                &request.path,
                network,
                request.start_address.as_deref(),
                request.end_address.as_deref(),
                backend,
                config,
            )
        })
        .collect()
}
