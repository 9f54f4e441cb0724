//! Google Maps drawing adapter
//!
//! The DrawingManager emits `overlaycomplete` for a new shape; edits arrive
//! as path or bounds change notifications on that shape. Google polygons
//! use open paths, so overlays are drawn without the closing point.

use super::{AdapterState, Canonicalizer, DrawnShape, MapAdapter, MapSurface, ProviderId, ShapeCommand};
use crate::core::activity::LogSink;
use crate::domain::{Bounds, Geometry, LatLng};

/// Shape handed over by the DrawingManager
#[derive(Clone, Debug, PartialEq)]
pub enum GoogleOverlay {
    Polygon { path: Vec<LatLng> },
    Rectangle { corner_a: LatLng, corner_b: LatLng },
}

#[derive(Clone, Debug, PartialEq)]
pub enum GoogleEvent {
    OverlayComplete(GoogleOverlay),
    /// `set_at` / `insert_at` / `remove_at` on the polygon path
    PathChanged(Vec<LatLng>),
    /// `bounds_changed` on the rectangle
    BoundsChanged { corner_a: LatLng, corner_b: LatLng },
    /// The operator removed the drawn shape
    OverlayRemoved,
}

impl GoogleEvent {
    /// Edits only apply to a tracked shape of the matching kind
    pub fn into_command(self, drawn: Option<&DrawnShape>) -> Option<ShapeCommand> {
        match (self, drawn) {
            (GoogleEvent::OverlayComplete(GoogleOverlay::Polygon { path }), _) => {
                Some(ShapeCommand::Create(DrawnShape::Polygon(path)))
            }
            (GoogleEvent::OverlayComplete(GoogleOverlay::Rectangle { corner_a, corner_b }), _) => {
                Some(ShapeCommand::Create(DrawnShape::rectangle(corner_a, corner_b)))
            }
            (GoogleEvent::PathChanged(path), Some(DrawnShape::Polygon(_))) => {
                Some(ShapeCommand::Edit(DrawnShape::Polygon(path)))
            }
            (GoogleEvent::BoundsChanged { corner_a, corner_b }, Some(DrawnShape::Rectangle(_))) => {
                Some(ShapeCommand::Edit(DrawnShape::rectangle(corner_a, corner_b)))
            }
            (GoogleEvent::OverlayRemoved, Some(_)) => Some(ShapeCommand::Delete),
            _ => None,
        }
    }
}

pub struct GoogleAdapter {
    state: AdapterState,
}

impl GoogleAdapter {
    /// Usable only with an API key and a loaded map script
    pub fn new(
        api_key: Option<&str>,
        surface: Option<Box<dyn MapSurface>>,
        padding_px: u32,
        log: &LogSink,
    ) -> Self {
        let surface = match (api_key.map(str::trim), surface) {
            (None, _) | (Some(""), _) => Err("no API key configured"),
            (Some(_), None) => Err("map script failed to load"),
            (Some(_), Some(surface)) => Ok(surface),
        };
        Self {
            state: AdapterState::new(ProviderId::GoogleMaps, surface, padding_px, log),
        }
    }

    pub fn handle_event(&mut self, event: GoogleEvent, canonical: &Canonicalizer) {
        match event.into_command(self.state.drawn.as_ref()) {
            Some(command) => self.apply(command, canonical),
            None => log::debug!("Ignoring Google Maps event without a matching shape"),
        }
    }
}

impl MapAdapter for GoogleAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::GoogleMaps
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
        let ring = geometry.outer_ring();
        let path = match ring {
            [first, .., last] if first == last => &ring[..ring.len() - 1],
            _ => ring,
        };
        self.state.show_overlay(path);
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
