//! Dashboard session module
//!
//! This module contains:
//! - Tab, sub-tab and provider selection state
//! - Message types for dashboard interactions
//! - The `(Panel, Action)` event registration table

pub mod events;
pub mod messages;
pub mod state;
