//! Message types for dashboard interactions
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Convenience constructors used by front-ends and the event table

use crate::map::{GoogleEvent, LeafletEvent, ProviderId};
use crate::review::ComparisonSide;
use crate::session::state::SubtabContainer;

// ============================================================================
// Map Types
// ============================================================================

/// Native drawing events and provider selection
#[derive(Debug, Clone)]
pub enum MapMsg {
    /// Leaflet.draw event on the OpenStreetMap provider
    Leaflet(LeafletEvent),
    /// DrawingManager / shape event on the Google Maps provider
    Google(GoogleEvent),
    /// Provider toggle
    SelectProvider(ProviderId),
}

// ============================================================================
// Navigation Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum NavMsg {
    /// Top-level tab button clicked (by tab id)
    Tab(String),
    /// Sub-tab button clicked inside a compound panel
    Subtab(SubtabContainer, String),
}

// ============================================================================
// Review Types
// ============================================================================

/// Capture and finance review messages
#[derive(Debug, Clone)]
pub enum ReviewMsg {
    /// Refresh the capture collection
    LoadCaptures,
    /// Show a capture's summary, assets and overlay
    SelectCapture(String),
    /// Operator picked a capture in a comparison selector
    ChooseComparison(ComparisonSide, String),
    /// Refresh the finance snapshot
    LoadFinance,
    /// Choose a transaction as duplication source
    PickTransaction(String),
    /// Drop the current duplication source
    ClearSelection,
}

// ============================================================================
// Form Types
// ============================================================================

/// Form submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMsg {
    PlanRoute,
    UploadFootage,
    RunClassification,
    CompareCaptures,
    AnnotateAsset,
    DuplicateTransaction,
}

// ============================================================================
// Main Message Enum
// ============================================================================

#[derive(Debug, Clone)]
pub enum Msg {
    Map(MapMsg),
    Nav(NavMsg),
    Review(ReviewMsg),
    Form(FormMsg),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl Msg {
    pub fn leaflet(event: LeafletEvent) -> Self {
        Self::Map(MapMsg::Leaflet(event))
    }
    pub fn google(event: GoogleEvent) -> Self {
        Self::Map(MapMsg::Google(event))
    }
    pub fn select_provider(provider: ProviderId) -> Self {
        Self::Map(MapMsg::SelectProvider(provider))
    }

    pub fn tab(id: &str) -> Self {
        Self::Nav(NavMsg::Tab(id.to_string()))
    }
    pub fn subtab(container: SubtabContainer, id: &str) -> Self {
        Self::Nav(NavMsg::Subtab(container, id.to_string()))
    }

    pub fn load_captures() -> Self {
        Self::Review(ReviewMsg::LoadCaptures)
    }
    pub fn select_capture(id: &str) -> Self {
        Self::Review(ReviewMsg::SelectCapture(id.to_string()))
    }
    pub fn choose_comparison(side: ComparisonSide, id: &str) -> Self {
        Self::Review(ReviewMsg::ChooseComparison(side, id.to_string()))
    }
    pub fn load_finance() -> Self {
        Self::Review(ReviewMsg::LoadFinance)
    }
    pub fn pick_transaction(id: &str) -> Self {
        Self::Review(ReviewMsg::PickTransaction(id.to_string()))
    }
    pub fn clear_selection() -> Self {
        Self::Review(ReviewMsg::ClearSelection)
    }

    pub fn plan_route() -> Self {
        Self::Form(FormMsg::PlanRoute)
    }
    pub fn upload_footage() -> Self {
        Self::Form(FormMsg::UploadFootage)
    }
    pub fn run_classification() -> Self {
        Self::Form(FormMsg::RunClassification)
    }
    pub fn compare_captures() -> Self {
        Self::Form(FormMsg::CompareCaptures)
    }
    pub fn annotate_asset() -> Self {
        Self::Form(FormMsg::AnnotateAsset)
    }
    pub fn duplicate_transaction() -> Self {
        Self::Form(FormMsg::DuplicateTransaction)
    }
}
