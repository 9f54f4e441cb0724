//! Binding to a concrete map library instance
//!
//! A `MapSurface` is the thin layer that talks to the mapping library's
//! own objects (layers, drawing managers, viewports). Adapters drive it;
//! nothing above the adapters sees it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{Bounds, Position};

pub trait MapSurface {
    /// Add the base tile layer
    fn show_base_layer(&mut self);
    /// Remove the interactively drawn shape
    fn remove_drawn_shape(&mut self);
    /// Remove the read-only overlay, if any
    fn clear_overlay(&mut self);
    /// Draw a read-only overlay polygon
    fn draw_overlay(&mut self, path: &[Position]);
    /// Fit the viewport to `bounds` leaving `padding_px` on every side
    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32);
    /// Recompute viewport size after the container became visible
    fn invalidate_size(&mut self);
}

/// What a `HeadlessSurface` has been asked to do so far
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceRecord {
    pub base_layer: bool,
    /// Overlay currently on the surface
    pub overlay: Option<Vec<Position>>,
    pub overlays_drawn: usize,
    pub drawn_shape_removals: usize,
    pub fitted: Option<(Bounds, u32)>,
    pub relayouts: usize,
}

/// Surface without a rendering backend; it only records calls
///
/// Used by the command-line front-end and by tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    record: Rc<RefCell<SurfaceRecord>>,
}

/// Read handle onto a `HeadlessSurface`'s record
#[derive(Clone, Debug)]
pub struct SurfaceProbe {
    record: Rc<RefCell<SurfaceRecord>>,
}

impl SurfaceProbe {
    pub fn snapshot(&self) -> SurfaceRecord {
        self.record.borrow().clone()
    }
}

impl HeadlessSurface {
    pub fn new() -> (Self, SurfaceProbe) {
        let surface = Self::default();
        let probe = SurfaceProbe {
            record: Rc::clone(&surface.record),
        };
        (surface, probe)
    }
}

impl MapSurface for HeadlessSurface {
    fn show_base_layer(&mut self) {
        self.record.borrow_mut().base_layer = true;
    }

    fn remove_drawn_shape(&mut self) {
        self.record.borrow_mut().drawn_shape_removals += 1;
    }

    fn clear_overlay(&mut self) {
        self.record.borrow_mut().overlay = None;
    }

    fn draw_overlay(&mut self, path: &[Position]) {
        let mut record = self.record.borrow_mut();
        record.overlay = Some(path.to_vec());
        record.overlays_drawn += 1;
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        self.record.borrow_mut().fitted = Some((bounds, padding_px));
    }

    fn invalidate_size(&mut self) {
        self.record.borrow_mut().relayouts += 1;
    }
}
