pub use crate::DEFAULT_SPEED_KMH;

// Re-export key components
pub use crate::config::EncoderConfig;
pub use crate::encoder::SemanticEncoder;
pub use crate::geocoding::{AddressBook, Geocoder, resolve_address};
pub use crate::loading::{load_path, load_road_graph};
pub use crate::model::{
    RelationKind, RoadGraph, RoadNetwork, StreetLabel, StreetSegment, Triple, TripleBatch,
};
pub use crate::pipeline::{RoutePlan, RouteRequest, encode_route, encode_routes, plan_route};
pub use crate::storage::{MemoryStore, StorageBackend};
pub use crate::summary::{Endpoint, RouteSummary};

// Core scalar types
pub use crate::Error;
pub use crate::Meters;
pub use crate::RoadNodeId;
pub use crate::Seconds; // seconds
pub use crate::geo_point;
