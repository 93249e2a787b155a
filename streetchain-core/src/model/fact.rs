//! Graph facts a route is encoded into

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of directed relation between two concept nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Street is followed by the next distinct street on the route
    AdjacentOnRoute,
    /// Length fact node attached to a street
    HasLength,
    /// Start address leads onto the first street
    StartsAt,
    /// Last street leads to the end address
    EndsAt,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::AdjacentOnRoute => "adjacent_on_route",
            RelationKind::HasLength => "has_length",
            RelationKind::StartsAt => "starts_at",
            RelationKind::EndsAt => "ends_at",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject - predicate - object fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triple<N> {
    pub subject: N,
    pub predicate: RelationKind,
    pub object: N,
}

impl<N> Triple<N> {
    pub fn new(subject: N, predicate: RelationKind, object: N) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Ordered facts of one route, submitted together
pub type TripleBatch<N> = Vec<Triple<N>>;
