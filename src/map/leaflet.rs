//! Leaflet / OpenStreetMap drawing adapter
//!
//! Leaflet.draw reports created layers one at a time, edited layers as a
//! collection, and deletions without the removed geometry.

use super::{AdapterState, Canonicalizer, DrawnShape, MapAdapter, MapSurface, ProviderId, ShapeCommand};
use crate::core::activity::LogSink;
use crate::domain::{Bounds, Geometry, LatLng};

/// A drawn Leaflet layer
#[derive(Clone, Debug, PartialEq)]
pub enum LeafletLayer {
    Polygon { latlngs: Vec<LatLng> },
    /// Rectangle as two opposite corners
    Rectangle { corner_a: LatLng, corner_b: LatLng },
}

impl LeafletLayer {
    fn into_shape(self) -> DrawnShape {
        match self {
            LeafletLayer::Polygon { latlngs } => DrawnShape::Polygon(latlngs),
            LeafletLayer::Rectangle { corner_a, corner_b } => DrawnShape::rectangle(corner_a, corner_b),
        }
    }
}

/// `draw:created` / `draw:edited` / `draw:deleted`
#[derive(Clone, Debug, PartialEq)]
pub enum LeafletEvent {
    Created(LeafletLayer),
    Edited(Vec<LeafletLayer>),
    Deleted,
}

impl LeafletEvent {
    pub fn into_command(self) -> Option<ShapeCommand> {
        match self {
            LeafletEvent::Created(layer) => Some(ShapeCommand::Create(layer.into_shape())),
            // Only one layer is ever drawn; the last edited one wins
            LeafletEvent::Edited(layers) => layers
                .into_iter()
                .last()
                .map(|layer| ShapeCommand::Edit(layer.into_shape())),
            LeafletEvent::Deleted => Some(ShapeCommand::Delete),
        }
    }
}

pub struct LeafletAdapter {
    state: AdapterState,
}

impl LeafletAdapter {
    pub fn new(surface: Option<Box<dyn MapSurface>>, padding_px: u32, log: &LogSink) -> Self {
        let surface = surface.ok_or("map script failed to load");
        Self {
            state: AdapterState::new(ProviderId::OpenStreetMap, surface, padding_px, log),
        }
    }

    /// Translate a native event and apply it
    pub fn handle_event(&mut self, event: LeafletEvent, canonical: &Canonicalizer) {
        match event.into_command() {
            Some(command) => self.apply(command, canonical),
            None => log::debug!("Ignoring empty Leaflet edit"),
        }
    }
}

impl MapAdapter for LeafletAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenStreetMap
    }

    fn is_available(&self) -> bool {
        self.state.is_available()
    }

    fn apply(&mut self, command: ShapeCommand, canonical: &Canonicalizer) {
        self.state.apply(command, canonical);
    }

    fn drawn_shape(&self) -> Option<&DrawnShape> {
        self.state.drawn.as_ref()
    }

    fn show_overlay(&mut self, geometry: &Geometry) {
        // L.geoJSON takes the closed ring as-is
        self.state.show_overlay(geometry.outer_ring());
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.state.fit_bounds(bounds);
    }

    fn relayout(&mut self) {
        self.state.relayout();
    }

    fn release_drawn(&mut self) {
        self.state.release_drawn();
    }
}
