use thiserror::Error;

use crate::RoadNodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Path nodes {from} and {to} are not connected by any edge")]
    MalformedPath { from: RoadNodeId, to: RoadNodeId },
    #[error("Route has no streets to encode")]
    EmptyRoute,
    #[error("Geocoding unavailable: {0}")]
    GeocodingUnavailable(String),
    #[error("Failed to resolve concept node: {0}")]
    BackendResolve(String),
    #[error("Failed to submit triples: {0}")]
    BackendWrite(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
