//! Core application module
//!
//! This module contains:
//! - The `Dashboard` state object and message dispatch
//! - The operator activity log
//! - Backend transport, client and endpoint builders
//! - Per-panel request sequencing

pub mod activity;
pub mod api;
pub mod app;
pub mod network;
pub mod sequence;

#[cfg(test)]
pub(crate) mod testing;
