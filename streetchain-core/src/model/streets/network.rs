//! Road graph and the edge lookups the pipeline needs from it

use geo::{Line, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::{RoadEdge, RoadNode, StreetLabel};
use crate::{Error, RoadNodeId, model::RawEdge};

/// Attribute lookups over a road network.
///
/// Path computation happens elsewhere; the pipeline only asks for the
/// attributes of the edge between two consecutive path nodes.
pub trait RoadNetwork {
    /// Attributes of the edge `from -> to`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPath`] if the nodes are unknown or not
    /// connected by an edge.
    fn edge_attributes(&self, from: RoadNodeId, to: RoadNodeId) -> Result<RawEdge, Error>;
}

/// Directed road multigraph with edge lengths in meters
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    node_index: HashMap<RoadNodeId, NodeIndex>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or returns the existing one with the same id
    pub fn add_node(&mut self, id: RoadNodeId, geometry: Option<Point<f64>>) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(RoadNode { id, geometry });
        self.node_index.insert(id, idx);
        idx
    }

    /// Adds a directed edge between two known nodes
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if either endpoint has not been added.
    pub fn add_edge(
        &mut self,
        from: RoadNodeId,
        to: RoadNodeId,
        edge: RoadEdge,
    ) -> Result<EdgeIndex, Error> {
        let source = self
            .node_index(from)
            .ok_or_else(|| Error::InvalidData(format!("Edge references unknown node {from}")))?;
        let target = self
            .node_index(to)
            .ok_or_else(|| Error::InvalidData(format!("Edge references unknown node {to}")))?;
        Ok(self.graph.add_edge(source, target, edge))
    }

    pub fn node_index(&self, id: RoadNodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    pub fn node(&self, id: RoadNodeId) -> Option<&RoadNode> {
        self.node_index(id)
            .and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The edge a path takes between two nodes.
    ///
    /// Among parallel edges the one with the lowest key wins, ties going to
    /// the edge added first.
    pub fn edge_between(&self, from: RoadNodeId, to: RoadNodeId) -> Option<&RoadEdge> {
        let source = self.node_index(from)?;
        let target = self.node_index(to)?;
        self.graph
            .edges_connecting(source, target)
            .min_by_key(|edge| (edge.weight().key, edge.id()))
            .map(|edge| edge.weight())
    }

    fn segment_line(&self, from: RoadNodeId, to: RoadNodeId) -> Option<Line<f64>> {
        let start = self.node(from)?.geometry?;
        let end = self.node(to)?.geometry?;
        Some(Line::new(start, end))
    }
}

impl RoadNetwork for RoadGraph {
    fn edge_attributes(&self, from: RoadNodeId, to: RoadNodeId) -> Result<RawEdge, Error> {
        let edge = self
            .edge_between(from, to)
            .ok_or(Error::MalformedPath { from, to })?;

        Ok(RawEdge {
            name: StreetLabel::from_name(edge.name.as_ref()),
            length: edge.length_meters(),
            speed_limit: edge.speed_limit.filter(|&speed| speed > 0),
            geometry: self.segment_line(from, to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_point;
    use crate::model::StreetName;

    fn edge(key: u32, name: &str, length: f64) -> RoadEdge {
        RoadEdge {
            key,
            name: Some(StreetName::from(name)),
            length: Some(length),
            speed_limit: None,
        }
    }

    #[test]
    fn parallel_edges_resolve_to_lowest_key() {
        let mut graph = RoadGraph::new();
        graph.add_node(1, None);
        graph.add_node(2, None);
        graph.add_edge(1, 2, edge(1, "Service Road", 40.0)).unwrap();
        graph.add_edge(1, 2, edge(0, "Main St", 90.0)).unwrap();
        graph.add_edge(1, 2, edge(0, "Shadow St", 10.0)).unwrap();

        let raw = graph.edge_attributes(1, 2).unwrap();
        assert_eq!(raw.name, StreetLabel::from("Main St"));
        assert_eq!(raw.length, 90);
    }

    #[test]
    fn missing_edge_is_malformed_path() {
        let mut graph = RoadGraph::new();
        graph.add_node(1, None);
        graph.add_node(2, None);
        graph.add_edge(1, 2, edge(0, "Main St", 90.0)).unwrap();

        assert!(matches!(
            graph.edge_attributes(2, 1),
            Err(Error::MalformedPath { from: 2, to: 1 })
        ));
        assert!(matches!(
            graph.edge_attributes(1, 7),
            Err(Error::MalformedPath { from: 1, to: 7 })
        ));
    }

    #[test]
    fn zero_speed_limit_is_reported_absent() {
        let mut graph = RoadGraph::new();
        graph.add_node(1, Some(geo_point(53.9, 27.5)));
        graph.add_node(2, Some(geo_point(53.91, 27.51)));
        let mut road = edge(0, "Main St", 100.0);
        road.speed_limit = Some(0);
        graph.add_edge(1, 2, road).unwrap();

        let raw = graph.edge_attributes(1, 2).unwrap();
        assert_eq!(raw.speed_limit, None);
        let line = raw.geometry.unwrap();
        assert_eq!(line.start.y, 53.9);
        assert_eq!(line.end.x, 27.51);
    }

    #[test]
    fn adding_node_twice_keeps_first() {
        let mut graph = RoadGraph::new();
        let first = graph.add_node(5, None);
        let second = graph.add_node(5, Some(geo_point(1.0, 2.0)));
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.add_edge(5, 6, RoadEdge::default()).is_err());
    }
}
