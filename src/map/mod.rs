//! Map providers and mission-area capture
//!
//! This module contains:
//! - The canonical geometry slot every provider writes through
//! - `MapAdapter`, the capability set shared by both drawing providers
//! - The Leaflet/OpenStreetMap and Google Maps adapters
//! - `MapSurface`, the binding to a concrete map library instance

pub mod canonical;
pub mod google;
pub mod leaflet;
pub mod shape;
pub mod surface;

use serde::{Deserialize, Serialize};

use crate::core::activity::LogSink;
use crate::domain::{Bounds, Geometry, Position};

pub use canonical::Canonicalizer;
pub use google::{GoogleAdapter, GoogleEvent, GoogleOverlay};
pub use leaflet::{LeafletAdapter, LeafletEvent, LeafletLayer};
pub use shape::{DrawnShape, ShapeCommand};
pub use surface::{HeadlessSurface, MapSurface, SurfaceProbe, SurfaceRecord};

/// Default margin kept around an overlay when fitting the viewport
pub const DEFAULT_OVERLAY_PADDING_PX: u32 = 24;

/// The two interchangeable drawing providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    #[default]
    OpenStreetMap,
    GoogleMaps,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::OpenStreetMap, ProviderId::GoogleMaps];

    pub fn label(self) -> &'static str {
        match self {
            ProviderId::OpenStreetMap => "OpenStreetMap",
            ProviderId::GoogleMaps => "Google Maps",
        }
    }
}

/// Capabilities every drawing provider offers
///
/// An unavailable adapter accepts every call and does nothing.
pub trait MapAdapter {
    fn provider(&self) -> ProviderId;

    fn is_available(&self) -> bool;

    /// Apply a draw, edit or delete to the provider and the canonical slot
    fn apply(&mut self, command: ShapeCommand, canonical: &Canonicalizer);

    /// Shape currently drawn on this provider
    fn drawn_shape(&self) -> Option<&DrawnShape>;

    /// Replace this provider's overlay; the viewport is left alone
    fn show_overlay(&mut self, geometry: &Geometry);

    fn fit_bounds(&mut self, bounds: Bounds);

    /// Re-layout after the container was unhidden
    fn relayout(&mut self);

    /// Remove the drawn shape without touching the canonical slot, once
    /// another provider has replaced the mission area
    fn release_drawn(&mut self);
}

/// State shared by both adapters: the surface and the one drawn shape
struct AdapterState {
    provider: ProviderId,
    surface: Option<Box<dyn MapSurface>>,
    drawn: Option<DrawnShape>,
    padding_px: u32,
}

impl AdapterState {
    /// `surface` carries the reason when the provider cannot be used
    fn new(
        provider: ProviderId,
        surface: Result<Box<dyn MapSurface>, &str>,
        padding_px: u32,
        log: &LogSink,
    ) -> Self {
        let surface = match surface {
            Ok(mut surface) => {
                surface.show_base_layer();
                Some(surface)
            }
            Err(reason) => {
                log.warn(format!("{} unavailable: {reason}", provider.label()));
                None
            }
        };
        Self {
            provider,
            surface,
            drawn: None,
            padding_px,
        }
    }

    fn is_available(&self) -> bool {
        self.surface.is_some()
    }

    fn apply(&mut self, command: ShapeCommand, canonical: &Canonicalizer) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match command {
            ShapeCommand::Create(shape) => {
                // One shape at a time
                if self.drawn.is_some() {
                    surface.remove_drawn_shape();
                }
                canonical.set_geometry(Some(shape.to_geometry()));
                self.drawn = Some(shape);
            }
            ShapeCommand::Edit(shape) => {
                canonical.set_geometry(Some(shape.to_geometry()));
                self.drawn = Some(shape);
            }
            ShapeCommand::Delete if self.drawn.is_none() => {
                log::debug!("{} has no drawn shape to delete", self.provider.label());
            }
            ShapeCommand::Delete => {
                self.drawn = None;
                canonical.set_geometry(None);
            }
        }
    }

    fn show_overlay(&mut self, path: &[Position]) {
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("{} overlay skipped: provider inert", self.provider.label());
            return;
        };
        surface.clear_overlay();
        surface.draw_overlay(path);
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        if let Some(surface) = self.surface.as_mut() {
            surface.fit_bounds(bounds, self.padding_px);
        }
    }

    fn relayout(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.invalidate_size();
        }
    }

    fn release_drawn(&mut self) {
        if self.drawn.take().is_none() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.remove_drawn_shape();
        }
    }
}

/// Surfaces handed to the dashboard at startup; `None` means the map
/// library for that provider failed to load
#[derive(Default)]
pub struct MapSurfaces {
    pub open_street_map: Option<Box<dyn MapSurface>>,
    pub google_maps: Option<Box<dyn MapSurface>>,
}

/// Probes onto the surfaces created by `MapSurfaces::headless`
#[derive(Clone, Debug)]
pub struct SurfaceProbes {
    pub open_street_map: SurfaceProbe,
    pub google_maps: SurfaceProbe,
}

impl MapSurfaces {
    /// Two recording surfaces with no rendering backend
    pub fn headless() -> (Self, SurfaceProbes) {
        let (osm, osm_probe) = HeadlessSurface::new();
        let (google, google_probe) = HeadlessSurface::new();
        (
            Self {
                open_street_map: Some(Box::new(osm)),
                google_maps: Some(Box::new(google)),
            },
            SurfaceProbes {
                open_street_map: osm_probe,
                google_maps: google_probe,
            },
        )
    }
}

/// Both adapters; hidden providers stay alive so switching back keeps state
pub struct MapProviders {
    pub leaflet: LeafletAdapter,
    pub google: GoogleAdapter,
}

impl MapProviders {
    pub fn new(
        surfaces: MapSurfaces,
        google_api_key: Option<&str>,
        padding_px: u32,
        log: &LogSink,
    ) -> Self {
        Self {
            leaflet: LeafletAdapter::new(surfaces.open_street_map, padding_px, log),
            google: GoogleAdapter::new(google_api_key, surfaces.google_maps, padding_px, log),
        }
    }

    pub fn get_mut(&mut self, provider: ProviderId) -> &mut dyn MapAdapter {
        match provider {
            ProviderId::OpenStreetMap => &mut self.leaflet,
            ProviderId::GoogleMaps => &mut self.google,
        }
    }

    pub fn all_mut(&mut self) -> [&mut dyn MapAdapter; 2] {
        [&mut self.leaflet, &mut self.google]
    }

    /// The adapter that is not `provider`
    pub fn other_mut(&mut self, provider: ProviderId) -> &mut dyn MapAdapter {
        match provider {
            ProviderId::OpenStreetMap => &mut self.google,
            ProviderId::GoogleMaps => &mut self.leaflet,
        }
    }
}
