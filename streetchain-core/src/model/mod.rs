//! Data model for route segmentation
//!
//! Contains the road network the path runs over, per-hop segments and the
//! graph facts a route is encoded into.

pub mod fact;
pub mod segment;
pub mod streets;

pub use fact::{RelationKind, Triple, TripleBatch};
pub use segment::{RawEdge, RouteTotals, StreetSegment, estimated_time};
pub use streets::{RoadEdge, RoadGraph, RoadNetwork, RoadNode, StreetLabel, StreetName};
