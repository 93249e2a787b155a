//! Human-readable route summary.
//!
//! Serializes to the route document the upstream tooling produced:
//! totals, endpoints with addresses and the per-hop street list.

use std::fmt;

use geo::{Line, Point};
use serde::Serialize;

use crate::{Error, Meters, Seconds, model::StreetSegment, pipeline::RoutePlan};

/// Route endpoint with its geocoded address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

impl Endpoint {
    pub fn new(point: Point<f64>, address: Option<String>) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
            address,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One path hop in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub name: Option<String>,
    pub length: Meters,
    pub maxspeed: u32,
    pub coords: Option<[LatLng; 2]>,
    pub estimated_time: Seconds,
}

impl From<&StreetSegment> for SegmentSummary {
    fn from(segment: &StreetSegment) -> Self {
        Self {
            name: segment.name.name().map(str::to_string),
            length: segment.length,
            maxspeed: segment.speed_limit,
            coords: segment.geometry.map(|line: Line<f64>| {
                [
                    LatLng {
                        lat: line.start.y,
                        lng: line.start.x,
                    },
                    LatLng {
                        lat: line.end.y,
                        lng: line.end.x,
                    },
                ]
            }),
            estimated_time: segment.estimated_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub start_point: Option<Endpoint>,
    pub end_point: Option<Endpoint>,
    pub streets: Vec<SegmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteBody {
    pub total_distance: u64,
    pub total_duration: Seconds,
    pub legs: Vec<Leg>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub status: &'static str,
    pub route: RouteBody,
    /// Distinct streets with their total lengths, for the text rendering
    #[serde(skip)]
    streets: Vec<(String, u64)>,
}

impl RouteSummary {
    pub fn new(plan: &RoutePlan, start: Option<Endpoint>, end: Option<Endpoint>) -> Self {
        Self {
            status: "success",
            route: RouteBody {
                total_distance: plan.totals.total_distance,
                total_duration: plan.totals.total_duration,
                legs: vec![Leg {
                    start_point: start,
                    end_point: end,
                    streets: plan.segments.iter().map(SegmentSummary::from).collect(),
                }],
            },
            streets: plan
                .streets
                .spine()
                .iter()
                .map(|street| (street.name.to_string(), street.total_length))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn endpoint_address(endpoint: Option<&Endpoint>) -> &str {
    endpoint
        .and_then(|endpoint| endpoint.address.as_deref())
        .unwrap_or("unknown")
}

impl fmt::Display for RouteSummary {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leg = self.route.legs.first();
        writeln!(f, "From: {}", endpoint_address(leg.and_then(|l| l.start_point.as_ref())))?;
        writeln!(f, "To:   {}", endpoint_address(leg.and_then(|l| l.end_point.as_ref())))?;
        for (idx, (name, length)) in self.streets.iter().enumerate() {
            writeln!(f, "{:>3}. {name} ({length} m)", idx + 1)?;
        }
        write!(
            f,
            "Total: {:.2} km, {:.0} min",
            self.route.total_distance as f64 / 1000.0,
            self.route.total_duration / 60.0
        )
    }
}
