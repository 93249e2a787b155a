//! Per-hop route segments and their travel metrics

use geo::Line;
use serde::Serialize;

use crate::{DEFAULT_SPEED_KMH, Meters, Seconds, model::StreetLabel};

/// One traversed edge of the path, as read from the road network
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub name: StreetLabel,
    pub length: Meters,
    /// Posted speed limit in km/h, `None` when absent or zero
    pub speed_limit: Option<u32>,
    /// Straight line between the two path nodes, when both have coordinates
    pub geometry: Option<Line<f64>>,
}

/// Raw edge annotated with the estimated time to traverse it
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    pub name: StreetLabel,
    pub length: Meters,
    /// Speed the estimate was computed with, km/h
    pub speed_limit: u32,
    pub geometry: Option<Line<f64>>,
    pub estimated_time: Seconds,
}

impl StreetSegment {
    pub fn from_raw(raw: RawEdge, default_speed_kmh: u32) -> Self {
        let speed_limit = effective_speed(raw.speed_limit, default_speed_kmh);
        Self {
            estimated_time: travel_time(raw.length, speed_limit),
            name: raw.name,
            length: raw.length,
            speed_limit,
            geometry: raw.geometry,
        }
    }
}

/// Seconds needed to cover `length` meters at the given speed limit.
///
/// An absent or zero speed limit falls back to `default_speed_kmh`, and a
/// zero default falls back to [`DEFAULT_SPEED_KMH`].
pub fn estimated_time(length: Meters, speed_limit: Option<u32>, default_speed_kmh: u32) -> Seconds {
    travel_time(length, effective_speed(speed_limit, default_speed_kmh))
}

fn effective_speed(speed_limit: Option<u32>, default_speed_kmh: u32) -> u32 {
    match speed_limit {
        Some(speed) if speed > 0 => speed,
        _ if default_speed_kmh > 0 => default_speed_kmh,
        _ => DEFAULT_SPEED_KMH,
    }
}

fn travel_time(length: Meters, speed_kmh: u32) -> Seconds {
    // km/h -> m/s
    let meters_per_second = f64::from(speed_kmh) * 1000.0 / 3600.0;
    f64::from(length) / meters_per_second
}

/// Running route totals, accumulated in path order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RouteTotals {
    pub total_distance: u64,
    pub total_duration: Seconds,
}

impl RouteTotals {
    pub fn accumulate(&mut self, segment: &StreetSegment) {
        self.total_distance += u64::from(segment.length);
        self.total_duration += segment.estimated_time;
    }
}

impl<'a> FromIterator<&'a StreetSegment> for RouteTotals {
    fn from_iter<I: IntoIterator<Item = &'a StreetSegment>>(iter: I) -> Self {
        let mut totals = RouteTotals::default();
        for segment in iter {
            totals.accumulate(segment);
        }
        totals
    }
}
