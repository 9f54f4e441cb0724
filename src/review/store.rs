//! Review State Store
//!
//! Holds the last-fetched capture collection and finance snapshot together
//! with the operator's selections. Every view is re-rendered from the store
//! after a change, never from a raw response, and collections are replaced
//! wholesale.

use crate::domain::{FinanceSnapshot, Geometry, SurveyCapture, Transaction};

use super::metrics::SurveyMetrics;
use super::views::{self, Selector, TableView};

/// Which comparison selector an operator choice applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonSide {
    Base,
    Target,
}

/// Summary and asset table of the selected capture
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureDetail {
    pub capture_id: String,
    pub summary: Vec<String>,
    pub assets: TableView,
}

impl CaptureDetail {
    fn render(capture: &SurveyCapture) -> Self {
        Self {
            capture_id: capture.capture_id.clone(),
            summary: views::capture_summary(capture),
            assets: views::asset_rows(&capture.assets),
        }
    }
}

const NO_INCOME: &str = "No income transactions recorded.";
const NO_EXPENSES: &str = "No expense transactions recorded.";

#[derive(Clone, Debug)]
pub struct ReviewStore {
    captures: Vec<SurveyCapture>,
    finance: FinanceSnapshot,
    selected_capture: Option<String>,
    /// Duplication source; survives refetches until cleared or replaced
    selected_transaction: Option<String>,

    capture_list: TableView,
    base_selector: Selector,
    target_selector: Selector,
    capture_detail: Option<CaptureDetail>,
    metrics: SurveyMetrics,
    income_table: TableView,
    expense_table: TableView,
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            captures: Vec::new(),
            finance: FinanceSnapshot::default(),
            selected_capture: None,
            selected_transaction: None,
            capture_list: views::capture_rows(&[], None),
            base_selector: Selector::default(),
            target_selector: Selector::default(),
            capture_detail: None,
            metrics: SurveyMetrics::default(),
            income_table: views::transaction_rows(&[], None, NO_INCOME),
            expense_table: views::transaction_rows(&[], None, NO_EXPENSES),
        }
    }

    // ========================================================================
    // Captures
    // ========================================================================

    pub fn captures(&self) -> &[SurveyCapture] {
        &self.captures
    }

    pub fn capture(&self, capture_id: &str) -> Option<&SurveyCapture> {
        self.captures
            .iter()
            .find(|capture| capture.capture_id == capture_id)
    }

    /// Replace the collection and re-render everything derived from it
    pub fn replace_captures(&mut self, captures: Vec<SurveyCapture>) {
        self.captures = captures;

        let options = views::capture_options(&self.captures);
        self.target_selector.rebuild(options.clone(), Some(0));
        self.base_selector.rebuild(options, Some(1));
        self.metrics = SurveyMetrics::from_captures(&self.captures);

        // The old detail pane may describe a capture that changed or vanished
        self.capture_detail = self
            .selected_capture
            .as_deref()
            .and_then(|id| self.capture(id))
            .map(CaptureDetail::render);
        if self.capture_detail.is_none() {
            self.selected_capture = None;
        }
        self.render_capture_list();
    }

    /// Render a capture from the current collection; unknown ids change nothing
    pub fn select_capture(&mut self, capture_id: &str) -> Option<&SurveyCapture> {
        let index = self
            .captures
            .iter()
            .position(|capture| capture.capture_id == capture_id)?;
        self.selected_capture = Some(capture_id.to_string());
        self.capture_detail = Some(CaptureDetail::render(&self.captures[index]));
        self.render_capture_list();
        self.captures.get(index)
    }

    /// Overlay of the capture shown in the detail pane
    pub fn selected_overlay(&self) -> Option<Geometry> {
        self.selected_capture
            .as_deref()
            .and_then(|id| self.capture(id))
            .and_then(SurveyCapture::overlay_geometry)
    }

    pub fn selected_capture(&self) -> Option<&str> {
        self.selected_capture.as_deref()
    }

    pub fn capture_detail(&self) -> Option<&CaptureDetail> {
        self.capture_detail.as_ref()
    }

    pub fn capture_list(&self) -> &TableView {
        &self.capture_list
    }

    pub fn metrics(&self) -> &SurveyMetrics {
        &self.metrics
    }

    pub fn selector(&self, side: ComparisonSide) -> &Selector {
        match side {
            ComparisonSide::Base => &self.base_selector,
            ComparisonSide::Target => &self.target_selector,
        }
    }

    /// Operator choice in a comparison selector
    pub fn choose_comparison(&mut self, side: ComparisonSide, capture_id: &str) -> bool {
        match side {
            ComparisonSide::Base => self.base_selector.choose(capture_id),
            ComparisonSide::Target => self.target_selector.choose(capture_id),
        }
    }

    fn render_capture_list(&mut self) {
        self.capture_list = views::capture_rows(&self.captures, self.selected_capture.as_deref());
    }

    // ========================================================================
    // Finance
    // ========================================================================

    pub fn finance(&self) -> &FinanceSnapshot {
        &self.finance
    }

    /// Replace the snapshot; the selection id is carried over and re-highlighted
    pub fn replace_finance(&mut self, snapshot: FinanceSnapshot) {
        self.finance = snapshot;
        self.render_finance();
    }

    /// Make a transaction the duplication source
    pub fn select_transaction(&mut self, transaction_id: &str) -> Option<Transaction> {
        let transaction = self.finance.find(transaction_id)?.clone();
        self.selected_transaction = Some(transaction.transaction_id.clone());
        self.render_finance();
        Some(transaction)
    }

    /// Returns false when nothing was selected
    pub fn clear_transaction_selection(&mut self) -> bool {
        if self.selected_transaction.take().is_none() {
            return false;
        }
        self.render_finance();
        true
    }

    pub fn selected_transaction(&self) -> Option<&str> {
        self.selected_transaction.as_deref()
    }

    pub fn income_table(&self) -> &TableView {
        &self.income_table
    }

    pub fn expense_table(&self) -> &TableView {
        &self.expense_table
    }

    fn render_finance(&mut self) {
        let selected = self.selected_transaction.as_deref();
        self.income_table = views::transaction_rows(&self.finance.income, selected, NO_INCOME);
        self.expense_table = views::transaction_rows(&self.finance.expenses, selected, NO_EXPENSES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::views::{RowAction, TableRow};
    use serde_json::json;

    fn captures(ids: &[&str]) -> Vec<SurveyCapture> {
        ids.iter()
            .map(|id| {
                serde_json::from_value(json!({
                    "capture_id": id,
                    "name": id.to_uppercase(),
                    "captured_on": "2024-05-22",
                    "asset_count": 1,
                    "assets": [{
                        "asset_id": format!("{id}_asset"),
                        "classification": "bridge",
                        "volume_cubic_m": 12.0,
                        "annotations": []
                    }]
                }))
                .unwrap()
            })
            .collect()
    }

    fn snapshot(income: &[&str], expenses: &[&str]) -> FinanceSnapshot {
        let entry = |id: &&str, kind: &str| {
            json!({
                "transaction_id": id,
                "transaction_type": kind,
                "description": format!("{id} description"),
                "category": "Ops",
                "amount": 10.0,
                "occurred_on": "2024-06-01"
            })
        };
        serde_json::from_value(json!({
            "income": income.iter().map(|id| entry(id, "income")).collect::<Vec<_>>(),
            "expenses": expenses.iter().map(|id| entry(id, "expense")).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn fresh_store_renders_placeholders() {
        let store = ReviewStore::new();
        assert!(matches!(store.capture_list().rows.as_slice(), [TableRow::Placeholder(_)]));
        assert!(matches!(store.income_table().rows.as_slice(), [TableRow::Placeholder(_)]));
        assert!(matches!(store.expense_table().rows.as_slice(), [TableRow::Placeholder(_)]));
    }

    #[test]
    fn replace_captures_defaults_selectors() {
        let mut store = ReviewStore::new();
        store.replace_captures(captures(&["newest", "older", "oldest"]));
        assert_eq!(store.selector(ComparisonSide::Target).selected.as_deref(), Some("newest"));
        assert_eq!(store.selector(ComparisonSide::Base).selected.as_deref(), Some("older"));
        assert_eq!(store.selector(ComparisonSide::Base).options.len(), 3);
        assert_eq!(store.metrics().total_surveys, 3);
    }

    #[test]
    fn comparison_choice_survives_refresh() {
        let mut store = ReviewStore::new();
        store.replace_captures(captures(&["a", "b", "c"]));
        assert!(store.choose_comparison(ComparisonSide::Base, "c"));
        store.replace_captures(captures(&["new", "a", "b", "c"]));
        assert_eq!(store.selector(ComparisonSide::Base).selected.as_deref(), Some("c"));
        assert_eq!(store.selector(ComparisonSide::Target).selected.as_deref(), Some("a"));
    }

    #[test]
    fn select_unknown_capture_changes_nothing() {
        let mut store = ReviewStore::new();
        store.replace_captures(captures(&["a"]));
        let before = store.capture_list().clone();
        assert!(store.select_capture("missing").is_none());
        assert!(store.capture_detail().is_none());
        assert_eq!(store.capture_list(), &before);
    }

    #[test]
    fn detail_rerenders_from_new_collection() {
        let mut store = ReviewStore::new();
        store.replace_captures(captures(&["a", "b"]));
        store.select_capture("b").unwrap();
        assert_eq!(store.capture_list().highlighted().unwrap().cells[0], "B");

        store.replace_captures(captures(&["b"]));
        assert_eq!(store.capture_detail().unwrap().capture_id, "b");

        store.replace_captures(captures(&["c"]));
        assert!(store.capture_detail().is_none());
        assert_eq!(store.selected_capture(), None);
    }

    #[test]
    fn transaction_selection_persists_across_refetch() {
        let mut store = ReviewStore::new();
        store.replace_finance(snapshot(&["t1"], &["t2"]));
        store.select_transaction("t2").unwrap();
        store.replace_finance(snapshot(&["t1", "t3"], &["t2"]));

        assert_eq!(store.selected_transaction(), Some("t2"));
        let row = store.expense_table().highlighted().unwrap();
        assert_eq!(row.action, Some(RowAction::Duplicate("t2".into())));
        assert!(store.income_table().highlighted().is_none());
    }

    #[test]
    fn clear_selection_drops_highlight() {
        let mut store = ReviewStore::new();
        store.replace_finance(snapshot(&["t1"], &[]));
        assert!(!store.clear_transaction_selection());
        store.select_transaction("t1").unwrap();
        assert!(store.clear_transaction_selection());
        assert!(store.income_table().highlighted().is_none());
        assert!(store.select_transaction("nope").is_none());
    }

    #[test]
    fn empty_expense_list_has_no_duplicate_control() {
        let mut store = ReviewStore::new();
        store.replace_finance(snapshot(&["t1"], &[]));
        assert_eq!(
            store.expense_table().rows,
            vec![TableRow::Placeholder(NO_EXPENSES.into())]
        );
    }
}
