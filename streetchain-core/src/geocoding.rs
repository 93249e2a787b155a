//! Reverse geocoding of route endpoints.
//!
//! Geocoding is a boundary concern: a lookup that fails or finds nothing
//! does not stop the route from being encoded, the encoder falls back to a
//! placeholder address instead.

use std::fs;
use std::path::Path;

use geo::{Distance, Haversine, Point};
use log::{info, warn};
use rstar::{RTree, primitives::GeomWithData};
use serde::Deserialize;

use crate::Error;

/// Maps coordinates to a human-readable address
pub trait Geocoder {
    /// Address at `point`, `Ok(None)` if the service knows none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeocodingUnavailable`] if the lookup itself failed.
    fn reverse_geocode(&self, point: Point<f64>) -> Result<Option<String>, Error>;
}

/// Looks up the address of a route endpoint, logging and swallowing
/// failures into `None` so the caller can encode a placeholder.
pub fn resolve_address<G: Geocoder + ?Sized>(geocoder: &G, point: Point<f64>) -> Option<String> {
    match geocoder.reverse_geocode(point) {
        Ok(Some(address)) => Some(address),
        Ok(None) => {
            warn!(
                "No address known near ({:.6}, {:.6})",
                point.y(),
                point.x()
            );
            None
        }
        Err(err) => {
            warn!("{err}; continuing without an address");
            None
        }
    }
}

/// Known address at a location
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressEntry {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
}

impl AddressEntry {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Offline geocoder answering with the nearest known address
#[derive(Debug, Clone)]
pub struct AddressBook {
    tree: RTree<GeomWithData<[f64; 2], usize>>,
    entries: Vec<AddressEntry>,
    /// Maximum distance to the nearest entry, meters
    max_distance: f64,
}

impl AddressBook {
    pub fn new(entries: Vec<AddressEntry>, max_distance: f64) -> Self {
        let points = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| GeomWithData::new([entry.lon, entry.lat], idx))
            .collect();

        Self {
            tree: RTree::bulk_load(points),
            entries,
            max_distance,
        }
    }

    /// Parses a JSON array of `{ "lat", "lon", "address" }` objects
    pub fn from_json_str(json: &str, max_distance: f64) -> Result<Self, Error> {
        let entries: Vec<AddressEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries, max_distance))
    }

    /// Loads an address book from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path, max_distance: f64) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open address book '{}': {}", path.display(), e),
            )
        })?;
        let book = Self::from_json_str(&json, max_distance)?;
        info!("Loaded {} addresses from {}", book.len(), path.display());
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for AddressBook {
    fn reverse_geocode(&self, point: Point<f64>) -> Result<Option<String>, Error> {
        let nearest = self
            .tree
            .nearest_neighbor(&[point.x(), point.y()])
            .ok_or_else(|| Error::GeocodingUnavailable("address book is empty".to_string()))?;

        let entry = &self.entries[nearest.data];
        let distance = Haversine.distance(point, entry.point());
        if distance <= self.max_distance {
            Ok(Some(entry.address.clone()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_point;

    fn book() -> AddressBook {
        AddressBook::from_json_str(
            r#"[
                {"lat": 53.911613, "lon": 27.595701, "address": "6 Platonova Street, Minsk"},
                {"lat": 53.890696, "lon": 27.551166, "address": "Railway Station Square, Minsk"}
            ]"#,
            150.0,
        )
        .unwrap()
    }

    #[test]
    fn nearest_address_within_range() {
        let book = book();
        assert_eq!(book.len(), 2);
        assert_eq!(
            book.reverse_geocode(geo_point(53.9116, 27.5958)).unwrap().as_deref(),
            Some("6 Platonova Street, Minsk")
        );
        assert_eq!(
            book.reverse_geocode(geo_point(53.8907, 27.5511)).unwrap().as_deref(),
            Some("Railway Station Square, Minsk")
        );
    }

    #[test]
    fn far_points_have_no_address() {
        let book = book();
        assert_eq!(book.reverse_geocode(geo_point(53.95, 27.70)).unwrap(), None);
        assert_eq!(resolve_address(&book, geo_point(53.95, 27.70)), None);
    }

    #[test]
    fn empty_book_is_unavailable_and_degrades() {
        let book = AddressBook::new(Vec::new(), 100.0);
        assert!(book.is_empty());
        assert!(matches!(
            book.reverse_geocode(geo_point(0.0, 0.0)),
            Err(Error::GeocodingUnavailable(_))
        ));
        assert_eq!(resolve_address(&book, geo_point(0.0, 0.0)), None);
    }
}
