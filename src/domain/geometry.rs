//! Geographic types for mission areas and capture overlays
//!
//! Positions follow GeoJSON ordering: `[lng, lat]`.

use serde::{Deserialize, Serialize};

/// A single `[lng, lat]` position
pub type Position = [f64; 2];

/// Metres per degree of latitude (and of longitude at the equator)
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Square metres to acres
const ACRES_PER_SQUARE_METRE: f64 = 0.000_247_105;

/// A latitude/longitude pair as map libraries report it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Convert to a GeoJSON position
    pub fn position(self) -> Position {
        [self.lng, self.lat]
    }
}

/// Axis-aligned geographic bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Build bounds from any two opposite corners
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south: a.lat.min(b.lat),
            west: a.lng.min(b.lng),
            north: a.lat.max(b.lat),
            east: a.lng.max(b.lng),
        }
    }

    /// Smallest bounds enclosing every position, `None` when there are none
    pub fn enclosing<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        let mut positions = positions.into_iter();
        let first = positions.next()?;
        let seed = Self {
            south: first[1],
            west: first[0],
            north: first[1],
            east: first[0],
        };
        Some(positions.fold(seed, |acc, [lng, lat]| Self {
            south: acc.south.min(*lat),
            west: acc.west.min(*lng),
            north: acc.north.max(*lat),
            east: acc.east.max(*lng),
        }))
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// Closed ring SW, SE, NE, NW, SW
    pub fn ring(&self) -> Vec<Position> {
        vec![
            [self.west, self.south],
            [self.east, self.south],
            [self.east, self.north],
            [self.west, self.north],
            [self.west, self.south],
        ]
    }

    /// Approximate surveyed acreage using an equirectangular projection
    pub fn approximate_acres(&self) -> f64 {
        let mean_lat = ((self.south + self.north) / 2.0).to_radians();
        let lat_distance_m = (self.north - self.south).abs() * METRES_PER_DEGREE;
        let lng_distance_m = (self.east - self.west).abs() * METRES_PER_DEGREE * mean_lat.cos();
        lat_distance_m * lng_distance_m * ACRES_PER_SQUARE_METRE
    }
}

/// GeoJSON geometry accepted and produced by the dashboard
///
/// Only polygons are drawn or overlaid, so this is the only variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
}

impl Geometry {
    /// Wrap a single outer ring as a polygon
    pub fn polygon(ring: Vec<Position>) -> Self {
        Geometry::Polygon {
            coordinates: vec![ring],
        }
    }

    /// The outer ring (empty if the polygon has no rings)
    pub fn outer_ring(&self) -> &[Position] {
        match self {
            Geometry::Polygon { coordinates } => {
                coordinates.first().map(Vec::as_slice).unwrap_or_default()
            }
        }
    }

    /// Bounding box over every ring
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Geometry::Polygon { coordinates } => Bounds::enclosing(coordinates.iter().flatten()),
        }
    }

    /// Read a polygon from a GeoJSON value that is either a Feature or a bare geometry
    pub fn from_geojson(value: &serde_json::Value) -> Option<Self> {
        let geometry = match value.get("type").and_then(serde_json::Value::as_str) {
            Some("Feature") => value.get("geometry")?,
            _ => value,
        };
        serde_json::from_value(geometry.clone()).ok()
    }
}

/// Turn a provider path into a closed ring
///
/// An already-closed path is returned as-is; an open one gets its first
/// point repeated at the end.
pub fn close_ring(path: &[LatLng]) -> Vec<Position> {
    let mut ring: Vec<Position> = path.iter().map(|point| point.position()).collect();
    if let Some(&first) = ring.first() {
        if ring.len() == 1 || ring.last() != Some(&first) {
            ring.push(first);
        }
    }
    ring
}
