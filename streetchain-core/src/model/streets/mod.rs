//! Road network model

pub mod components;
pub mod network;

pub use components::{RoadEdge, RoadNode, StreetLabel, StreetName};
pub use network::{RoadGraph, RoadNetwork};
