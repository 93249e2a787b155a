use serde::Deserialize;

use super::de::deserialize_speed_limit;
use crate::{RoadNodeId, model::StreetName};

/// Node-link road graph document, as exported by osmnx / networkx
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawGraph {
    pub nodes: Vec<RawGraphNode>,
    #[serde(alias = "links")]
    pub edges: Vec<RawGraphEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RawGraphNode {
    pub id: RoadNodeId,
    /// Longitude
    #[serde(default)]
    pub x: Option<f64>,
    /// Latitude
    #[serde(default)]
    pub y: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawGraphEdge {
    #[serde(alias = "source")]
    pub u: RoadNodeId,
    #[serde(alias = "target")]
    pub v: RoadNodeId,
    #[serde(default)]
    pub key: u32,
    #[serde(default)]
    pub name: Option<StreetName>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_speed_limit")]
    pub maxspeed: Option<u32>,
}
