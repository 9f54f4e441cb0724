//! Provider-neutral drawn shapes
//!
//! Both providers reduce their native shapes to a `DrawnShape`, and every
//! `DrawnShape` becomes canonical geometry through one conversion.

use crate::domain::{Bounds, Geometry, LatLng, close_ring};

/// One interactively drawn shape
#[derive(Clone, Debug, PartialEq)]
pub enum DrawnShape {
    /// Vertex path as the provider reports it (open or closed)
    Polygon(Vec<LatLng>),
    Rectangle(Bounds),
}

impl DrawnShape {
    /// Rectangle from any two opposite corners
    pub fn rectangle(a: LatLng, b: LatLng) -> Self {
        DrawnShape::Rectangle(Bounds::from_corners(a, b))
    }

    /// Canonical closed polygon for this shape
    pub fn to_geometry(&self) -> Geometry {
        let ring = match self {
            DrawnShape::Polygon(path) => close_ring(path),
            DrawnShape::Rectangle(bounds) => bounds.ring(),
        };
        Geometry::polygon(ring)
    }
}

/// What a native drawing event asks the adapter to do
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeCommand {
    /// A newly drawn shape, replacing any previous one
    Create(DrawnShape),
    /// The current shape changed in place
    Edit(DrawnShape),
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_and_equivalent_polygon_agree() {
        let rectangle = DrawnShape::rectangle(LatLng::new(1.0, 3.0), LatLng::new(0.0, 2.0));
        let polygon = DrawnShape::Polygon(vec![
            LatLng::new(0.0, 2.0),
            LatLng::new(0.0, 3.0),
            LatLng::new(1.0, 3.0),
            LatLng::new(1.0, 2.0),
        ]);
        assert_eq!(rectangle.to_geometry(), polygon.to_geometry());
    }
}
