//! Rendered review views
//!
//! Views are plain values rebuilt from the store after every change; a
//! front-end draws them without consulting raw responses.

use crate::domain::{Asset, SurveyCapture, Transaction};

/// Shown in place of an empty list
pub const EMPTY_GLYPH: &str = "—";

/// Control attached to a row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowAction {
    ViewCapture(String),
    Duplicate(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataRow {
    pub cells: Vec<String>,
    pub action: Option<RowAction>,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableRow {
    /// Explanatory single row for an empty collection
    Placeholder(String),
    Data(DataRow),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Data rows, or one placeholder row when there are none
    pub fn build(headers: &[&'static str], rows: Vec<DataRow>, placeholder: &str) -> Self {
        let rows = if rows.is_empty() {
            vec![TableRow::Placeholder(placeholder.to_string())]
        } else {
            rows.into_iter().map(TableRow::Data).collect()
        };
        Self {
            headers: headers.to_vec(),
            rows,
        }
    }

    pub fn placeholder(headers: &[&'static str], placeholder: &str) -> Self {
        Self::build(headers, Vec::new(), placeholder)
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Data(row) => Some(row),
            TableRow::Placeholder(_) => None,
        })
    }

    pub fn highlighted(&self) -> Option<&DataRow> {
        self.data_rows().find(|row| row.highlighted)
    }

    /// Plain-text rendering, one line per row; highlighted rows start with `*`
    pub fn to_text(&self) -> String {
        let mut out = self.headers.join(" | ");
        for row in &self.rows {
            out.push('\n');
            match row {
                TableRow::Placeholder(text) => out.push_str(text),
                TableRow::Data(row) => {
                    let marker = if row.highlighted { "* " } else { "  " };
                    out.push_str(marker);
                    out.push_str(&row.cells.join(" | "));
                }
            }
        }
        out
    }
}

/// One `<option>` of a selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
}

impl Selector {
    /// Rebuild options, keeping the choice if it still exists, else `fallback`
    pub fn rebuild(&mut self, options: Vec<SelectOption>, fallback: Option<usize>) {
        let keep = self
            .selected
            .as_ref()
            .is_some_and(|selected| options.iter().any(|option| &option.value == selected));
        if !keep {
            self.selected = fallback
                .and_then(|index| options.get(index).or(options.first()))
                .map(|option| option.value.clone());
        }
        self.options = options;
    }

    /// Choose an option by value; unknown values are rejected
    pub fn choose(&mut self, value: &str) -> bool {
        if self.options.iter().any(|option| option.value == value) {
            self.selected = Some(value.to_string());
            true
        } else {
            false
        }
    }
}

pub const CAPTURE_HEADERS: [&str; 3] = ["Capture", "Date", "Assets"];
pub const ASSET_HEADERS: [&str; 4] = ["Asset", "Classification", "Volume (m³)", "Annotations"];
pub const TRANSACTION_HEADERS: [&str; 5] = ["Date", "Description", "Category", "Amount", "Metadata"];

pub fn capture_rows(captures: &[SurveyCapture], selected: Option<&str>) -> TableView {
    let rows = captures
        .iter()
        .map(|capture| DataRow {
            cells: vec![
                capture.name.clone(),
                capture.captured_on.to_string(),
                capture.asset_count.to_string(),
            ],
            action: Some(RowAction::ViewCapture(capture.capture_id.clone())),
            highlighted: selected == Some(capture.capture_id.as_str()),
        })
        .collect();
    TableView::build(&CAPTURE_HEADERS, rows, "No survey captures available yet.")
}

pub fn capture_options(captures: &[SurveyCapture]) -> Vec<SelectOption> {
    captures
        .iter()
        .map(|capture| SelectOption {
            value: capture.capture_id.clone(),
            label: capture.display_label(),
        })
        .collect()
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_GLYPH.to_string()
    } else {
        items.join("; ")
    }
}

pub fn asset_rows(assets: &[Asset]) -> TableView {
    let rows = assets
        .iter()
        .map(|asset| DataRow {
            cells: vec![
                asset.asset_id.clone(),
                asset.classification.clone(),
                format!("{:.2}", asset.volume_cubic_m),
                join_or_dash(&asset.annotations),
            ],
            action: None,
            highlighted: false,
        })
        .collect();
    TableView::build(&ASSET_HEADERS, rows, "No assets recorded for this capture.")
}

pub fn capture_summary(capture: &SurveyCapture) -> Vec<String> {
    vec![
        capture.name.clone(),
        format!("Captured on {}", capture.captured_on),
        format!("Assets: {}", capture.asset_count),
        format!("Point cloud: {}", capture.point_cloud_path),
        format!("Notes: {}", join_or_dash(&capture.notes)),
    ]
}

fn metadata_text(transaction: &Transaction) -> String {
    if transaction.metadata.is_empty() {
        return EMPTY_GLYPH.to_string();
    }
    transaction
        .metadata
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn transaction_rows(
    transactions: &[Transaction],
    selected: Option<&str>,
    placeholder: &str,
) -> TableView {
    let rows = transactions
        .iter()
        .map(|transaction| DataRow {
            cells: vec![
                transaction.occurred_on.to_string(),
                transaction.description.clone(),
                transaction.category.clone(),
                format!("{:.2}", transaction.amount),
                metadata_text(transaction),
            ],
            action: Some(RowAction::Duplicate(transaction.transaction_id.clone())),
            highlighted: selected == Some(transaction.transaction_id.as_str()),
        })
        .collect();
    TableView::build(&TRANSACTION_HEADERS, rows, placeholder)
}
