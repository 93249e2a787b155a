//! Road network components - nodes, edges and street names

use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    Meters, RoadNodeId,
    normalize::{UNNAMED_STREET_IDENTIFIER, identifier},
};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// External (OSM) ID of the node
    pub id: RoadNodeId,
    /// Node coordinates, when the source data has them
    pub geometry: Option<Point<f64>>,
}

/// Road graph edge (directed street segment)
#[derive(Debug, Clone, Default)]
pub struct RoadEdge {
    /// Multigraph key, parallel edges are ordered by it
    pub key: u32,
    pub name: Option<StreetName>,
    /// Physical length in meters
    pub length: Option<f64>,
    /// Posted speed limit in km/h
    pub speed_limit: Option<u32>,
}

impl RoadEdge {
    /// Length truncated to whole meters. Missing, negative and non-finite
    /// lengths count as zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn length_meters(&self) -> Meters {
        match self.length {
            Some(length) if length.is_finite() && length > 0.0 => length as Meters,
            _ => 0,
        }
    }
}

/// Street name as it appears in source road data: either a plain name or a
/// list of alias names when a road is known under several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreetName {
    Single(String),
    Aliases(Vec<String>),
}

impl StreetName {
    /// The name used for the street; the first alias of an alias list.
    pub fn canonical(&self) -> Option<&str> {
        match self {
            StreetName::Single(name) => Some(name.as_str()),
            StreetName::Aliases(aliases) => aliases.first().map(String::as_str),
        }
    }
}

impl From<&str> for StreetName {
    fn from(name: &str) -> Self {
        StreetName::Single(name.to_string())
    }
}

/// Canonical street key used for deduplication and aggregation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StreetLabel {
    Named(String),
    Unnamed,
}

impl StreetLabel {
    pub const UNNAMED: &'static str = "unnamed";

    /// Resolves a source name once; blank names become [`StreetLabel::Unnamed`].
    pub fn from_name(name: Option<&StreetName>) -> Self {
        match name.and_then(StreetName::canonical).map(str::trim) {
            Some(name) if !name.is_empty() => StreetLabel::Named(name.to_string()),
            _ => StreetLabel::Unnamed,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            StreetLabel::Named(name) => Some(name.as_str()),
            StreetLabel::Unnamed => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.name().unwrap_or(Self::UNNAMED)
    }

    /// Concept node identifier of the street
    pub fn identifier(&self) -> String {
        match self {
            StreetLabel::Named(name) => identifier(name),
            StreetLabel::Unnamed => UNNAMED_STREET_IDENTIFIER.to_string(),
        }
    }
}

impl From<&str> for StreetLabel {
    fn from(name: &str) -> Self {
        StreetLabel::from_name(Some(&StreetName::from(name)))
    }
}

impl fmt::Display for StreetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StreetLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_list_resolves_to_first_alias() {
        let name: StreetName = serde_json::from_str(r#"["Main St", "Route 5"]"#).unwrap();
        assert_eq!(name.canonical(), Some("Main St"));
        assert_eq!(StreetLabel::from_name(Some(&name)), StreetLabel::from("Main St"));
    }

    #[test]
    fn plain_name_deserializes_as_single() {
        let name: StreetName = serde_json::from_str(r#""Main St""#).unwrap();
        assert_eq!(name, StreetName::Single("Main St".to_string()));
    }

    #[test]
    fn unnamed_marker_and_a_street_called_unnamed_stay_apart() {
        let called_unnamed = StreetLabel::from("Unnamed");
        assert_eq!(called_unnamed.as_str(), StreetLabel::Unnamed.as_str());
        assert_ne!(called_unnamed.identifier(), StreetLabel::Unnamed.identifier());
    }

    #[test]
    fn missing_empty_and_blank_names_are_unnamed() {
        assert_eq!(StreetLabel::from_name(None), StreetLabel::Unnamed);
        assert_eq!(
            StreetLabel::from_name(Some(&StreetName::Aliases(vec![]))),
            StreetLabel::Unnamed
        );
        assert_eq!(StreetLabel::from("  "), StreetLabel::Unnamed);
        assert_eq!(StreetLabel::Unnamed.to_string(), "unnamed");
    }

    #[test]
    fn length_is_truncated_and_clamped() {
        let mut edge = RoadEdge {
            length: Some(120.9),
            ..RoadEdge::default()
        };
        assert_eq!(edge.length_meters(), 120);
        edge.length = Some(-3.0);
        assert_eq!(edge.length_meters(), 0);
        edge.length = Some(f64::NAN);
        assert_eq!(edge.length_meters(), 0);
        edge.length = None;
        assert_eq!(edge.length_meters(), 0);
    }
}
