use std::fs;
use std::path::Path;

use geo::Point;
use log::{info, warn};

use super::raw_types::RawGraph;
use crate::{
    Error, RoadNodeId,
    model::{RoadEdge, RoadGraph},
};

fn read_file(path: &Path, what: &str) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open {what} '{}': {}", path.display(), e),
        ))
    })
}

/// Loads a road graph from a node-link JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or has
/// edges referencing unknown nodes.
pub fn load_road_graph(path: &Path) -> Result<RoadGraph, Error> {
    info!("Loading road graph: {}", path.display());
    let graph = RoadGraph::from_json_str(&read_file(path, "road graph")?)?;
    info!(
        "Road graph loaded with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Loads a path as a JSON array of node ids
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// node ids.
pub fn load_path(path: &Path) -> Result<Vec<RoadNodeId>, Error> {
    let nodes = path_from_json_str(&read_file(path, "path")?)?;
    info!("Loaded path of {} nodes", nodes.len());
    Ok(nodes)
}

pub fn path_from_json_str(json: &str) -> Result<Vec<RoadNodeId>, Error> {
    Ok(serde_json::from_str(json)?)
}

impl RoadGraph {
    /// Builds a road graph from a node-link JSON document
    ///
    /// # Errors
    ///
    /// Returns an error on invalid JSON or edges referencing unknown nodes.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let raw: RawGraph = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Builds a road graph from deserialized node-link data
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if an edge references an unknown node.
    pub fn from_raw(raw: RawGraph) -> Result<Self, Error> {
        let mut graph = RoadGraph::new();

        let mut without_geometry = 0;
        for node in raw.nodes {
            let geometry = match (node.x, node.y) {
                (Some(x), Some(y)) => Some(Point::new(x, y)),
                _ => {
                    without_geometry += 1;
                    None
                }
            };
            graph.add_node(node.id, geometry);
        }
        if without_geometry > 0 {
            warn!("{without_geometry} road nodes have no coordinates");
        }

        for edge in raw.edges {
            graph.add_edge(
                edge.u,
                edge.v,
                RoadEdge {
                    key: edge.key,
                    name: edge.name,
                    length: edge.length,
                    speed_limit: edge.maxspeed,
                },
            )?;
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoadNetwork, StreetLabel};

    const GRAPH: &str = r#"{
        "directed": true,
        "multigraph": true,
        "nodes": [
            {"id": 1, "x": 27.5957, "y": 53.9116},
            {"id": 2, "x": 27.5901, "y": 53.9102},
            {"id": 3}
        ],
        "links": [
            {"source": 1, "target": 2, "key": 0, "name": ["Platonova Street", "vulica Platonava"], "length": 412.7, "maxspeed": "40"},
            {"source": 2, "target": 3, "key": 0, "length": 80.0}
        ]
    }"#;

    #[test]
    fn parses_node_link_document() {
        let graph = RoadGraph::from_json_str(GRAPH).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let first = graph.edge_attributes(1, 2).unwrap();
        assert_eq!(first.name, StreetLabel::from("Platonova Street"));
        assert_eq!(first.length, 412);
        assert_eq!(first.speed_limit, Some(40));
        assert!(first.geometry.is_some());

        let second = graph.edge_attributes(2, 3).unwrap();
        assert_eq!(second.name, StreetLabel::Unnamed);
        assert_eq!(second.speed_limit, None);
        assert!(second.geometry.is_none());
    }

    #[test]
    fn edge_to_unknown_node_is_invalid() {
        let json = r#"{"nodes": [{"id": 1}], "edges": [{"u": 1, "v": 9, "length": 5}]}"#;
        assert!(matches!(
            RoadGraph::from_json_str(json),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let graph_path = dir.path().join("graph.json");
        let path_path = dir.path().join("path.json");
        fs::write(&graph_path, GRAPH).unwrap();
        fs::write(&path_path, "[1, 2, 3]").unwrap();

        assert_eq!(load_road_graph(&graph_path).unwrap().edge_count(), 2);
        assert_eq!(load_path(&path_path).unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            load_path(&dir.path().join("missing.json")),
            Err(Error::IoError(_))
        ));
    }
}
