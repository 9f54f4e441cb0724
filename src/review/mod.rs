//! Review State Store and its operations
//!
//! This module contains:
//! - `ReviewStore`, the last-fetched captures and finance snapshot
//! - View models rendered from the store (tables, selectors, summaries)
//! - Survey metrics derived from the capture collection
//! - Fetch and selection handlers run against the dashboard

pub mod metrics;
pub mod store;
pub mod views;

pub use metrics::SurveyMetrics;
pub use store::{CaptureDetail, ComparisonSide, ReviewStore};
pub use views::{DataRow, RowAction, SelectOption, Selector, TableRow, TableView};

use crate::core::api;
use crate::core::app::Dashboard;
use crate::core::network::Transport;
use crate::domain::{CaptureList, FinanceSnapshot, Geometry};
use crate::map::MapAdapter;
use crate::session::events::Panel;
use crate::session::messages::ReviewMsg;

/// Handle a ReviewMsg
pub async fn handle_review_msg<T: Transport>(app: &Dashboard<T>, msg: ReviewMsg) {
    match msg {
        ReviewMsg::LoadCaptures => {
            load_survey_captures(app).await;
        }
        ReviewMsg::SelectCapture(id) => {
            select_capture(app, &id);
        }
        ReviewMsg::ChooseComparison(side, id) => {
            if !app.store.borrow_mut().choose_comparison(side, &id) {
                log::debug!("Ignoring unknown comparison capture {id}");
            }
        }
        ReviewMsg::LoadFinance => {
            load_finance_snapshot(app).await;
        }
        ReviewMsg::PickTransaction(id) => {
            pick_transaction(app, &id);
        }
        ReviewMsg::ClearSelection => clear_selection(app),
    }
}

// ============================================================================
// Captures
// ============================================================================

/// Fetch captures and replace the stored collection
///
/// On failure the stored collection and its views are left as they were.
/// Returns true when the new collection was applied.
pub async fn load_survey_captures<T: Transport>(app: &Dashboard<T>) -> bool {
    let ticket = app.sequencer.issue(Panel::Surveys);
    let result = app.client.request::<CaptureList>(api::survey_days()).await;
    if !app.sequencer.is_current(ticket) {
        return false;
    }

    match result {
        Ok(list) => {
            let count = list.captures.len();
            let overlay = {
                let mut store = app.store.borrow_mut();
                store.replace_captures(list.captures);
                store.selected_overlay()
            };
            // The still-selected capture may come back with a new outline
            if let Some(geometry) = overlay {
                show_overlay(app, &geometry);
            }
            app.log.info(format!("Loaded {count} survey captures"));
            true
        }
        Err(error) => {
            app.log.warn(format!("Failed to load survey captures: {error}"));
            false
        }
    }
}

/// Render a capture from the current collection and overlay it on every map
///
/// Unknown ids are ignored. Providers that are inert skip the overlay.
pub fn select_capture<T: Transport>(app: &Dashboard<T>, capture_id: &str) -> bool {
    let overlay = {
        let mut store = app.store.borrow_mut();
        match store.select_capture(capture_id) {
            Some(capture) => capture.overlay_geometry(),
            None => {
                log::debug!("Capture {capture_id} is not in the current collection");
                return false;
            }
        }
    };

    match overlay {
        Some(geometry) => show_overlay(app, &geometry),
        None => log::debug!("Capture {capture_id} has no overlay geometry"),
    }
    true
}

/// Draw on every provider; only the visible one is fitted, the hidden one
/// is fitted when it is switched to
fn show_overlay<T: Transport>(app: &Dashboard<T>, geometry: &Geometry) {
    let visible = app.ui.borrow().active_provider();
    let mut maps = app.maps.borrow_mut();
    for adapter in maps.all_mut() {
        adapter.show_overlay(geometry);
    }
    if let Some(bounds) = geometry.bounds() {
        maps.get_mut(visible).fit_bounds(bounds);
    }
}

// ============================================================================
// Finance
// ============================================================================

/// Fetch the ledger and replace the stored snapshot; the selection is kept
pub async fn load_finance_snapshot<T: Transport>(app: &Dashboard<T>) -> bool {
    let ticket = app.sequencer.issue(Panel::Finance);
    let result = app
        .client
        .request::<FinanceSnapshot>(api::finance_transactions())
        .await;
    if !app.sequencer.is_current(ticket) {
        return false;
    }

    match result {
        Ok(snapshot) => {
            let total = snapshot.income.len() + snapshot.expenses.len();
            app.store.borrow_mut().replace_finance(snapshot);
            app.log.info(format!("Loaded {total} finance transactions"));
            true
        }
        Err(error) => {
            app.log.warn(format!("Failed to load finance transactions: {error}"));
            false
        }
    }
}

/// Choose the duplication source and copy its fields into the form
pub fn pick_transaction<T: Transport>(app: &Dashboard<T>, transaction_id: &str) -> bool {
    let Some(transaction) = app.store.borrow_mut().select_transaction(transaction_id) else {
        log::debug!("Transaction {transaction_id} is not in the current snapshot");
        return false;
    };
    app.forms.borrow_mut().duplicate.populate(&transaction);
    app.log.info(format!(
        "Selected {} as duplication template",
        transaction.description
    ));
    true
}

pub fn clear_selection<T: Transport>(app: &Dashboard<T>) {
    if app.store.borrow_mut().clear_transaction_selection() {
        app.forms.borrow_mut().duplicate.clear();
        app.log.info("Cleared duplication template");
    }
}
