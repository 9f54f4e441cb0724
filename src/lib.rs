//! Mission planning and survey review engine for drone field operators
//!
//! The crate is headless: map libraries sit behind `map::MapSurface`, the
//! backend behind `core::network::Transport`, and everything a front-end
//! draws is a plain view value read from the `core::app::Dashboard`.

pub mod config;
pub mod core;
pub mod domain;
pub mod forms;
pub mod map;
pub mod review;
pub mod session;
