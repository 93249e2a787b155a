//! This module is responsible for loading road networks and paths from
//! JSON documents exported by upstream routing tools.

mod builder;
mod de;
mod raw_types;

pub use builder::{load_path, load_road_graph, path_from_json_str};
pub use raw_types::{RawGraph, RawGraphEdge, RawGraphNode};
