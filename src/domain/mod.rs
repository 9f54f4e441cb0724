//! Pure domain types with minimal dependencies
//!
//! This module contains the data model shared by the map, review and form
//! layers. Types here hold no dashboard state and perform no I/O.

pub mod finance;
pub mod geometry;
pub mod survey;

pub use finance::*;
pub use geometry::*;
pub use survey::*;
