//! Route segmentation and semantic encoding.
//!
//! Turns a computed path through a road network into a summary of the
//! traversed streets and into a batch of graph facts describing the route
//! as a chain of named streets with lengths and endpoint addresses.

pub mod aggregation;
pub mod config;
pub mod encoder;
pub mod error;
pub mod geocoding;
pub mod loading;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod storage;
pub mod summary;

pub use aggregation::{Street, StreetAggregate, aggregate_streets};
pub use config::EncoderConfig;
pub use encoder::SemanticEncoder;
pub use error::Error;
pub use geocoding::{AddressBook, AddressEntry, Geocoder, resolve_address};
pub use loading::{load_path, load_road_graph};
pub use model::{
    RawEdge, RelationKind, RoadEdge, RoadGraph, RoadNetwork, RoadNode, RouteTotals, StreetLabel,
    StreetName, StreetSegment, Triple, TripleBatch,
};
pub use normalize::normalize;
pub use pipeline::{
    RoutePlan, RouteRequest, encode_plan, encode_route, encode_routes, extract_segments,
    plan_route,
};
pub use storage::{MemoryStore, StorageBackend};
pub use summary::{Endpoint, RouteSummary};

/// Speed assumed for edges without a usable speed limit, km/h
pub const DEFAULT_SPEED_KMH: u32 = 60;

/// External road node identifier (OSM node id)
pub type RoadNodeId = u64;
/// Length in whole meters
pub type Meters = u32;
/// Travel time in seconds
pub type Seconds = f64;

/// Builds a point from the (lat, lon) order used by geocoders and users.
pub fn geo_point(lat: f64, lon: f64) -> geo::Point<f64> {
    geo::Point::new(lon, lat)
}
