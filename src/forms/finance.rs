//! Transaction duplication form
//!
//! Picking a transaction copies its editable fields here. Submission sends
//! the selected transaction id as the source and every edited field as an
//! override; the backend answers with the new transaction and a fresh
//! snapshot, which replaces the stored one.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::core::api;
use crate::core::app::Dashboard;
use crate::core::network::{ApiRequest, NetworkError, Transport};
use crate::domain::{DuplicateOutcome, Transaction, TransactionType};
use crate::session::events::Panel;
use crate::session::messages::FormMsg;

use super::FormError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuplicateForm {
    pub description: String,
    pub category: String,
    pub amount: String,
    /// ISO date
    pub occurred_on: String,
    pub transaction_type: String,
    /// One `key=value` pair per line
    pub metadata: String,
}

impl DuplicateForm {
    /// Overwrite every field from the chosen source transaction
    pub fn populate(&mut self, transaction: &Transaction) {
        *self = Self {
            description: transaction.description.clone(),
            category: transaction.category.clone(),
            amount: transaction.amount.to_string(),
            occurred_on: transaction.occurred_on.to_string(),
            transaction_type: transaction.transaction_type.to_string(),
            metadata: transaction
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("\n"),
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validated overrides; blank fields are left to the source transaction
    pub fn overrides(&self) -> Result<Map<String, Value>, FormError> {
        let mut overrides = Map::new();

        for (key, value) in [("description", &self.description), ("category", &self.category)] {
            if !value.trim().is_empty() {
                overrides.insert(key.to_string(), Value::from(value.trim()));
            }
        }

        let amount = self.amount.trim();
        if !amount.is_empty() {
            let amount: f64 = amount
                .parse()
                .map_err(|_| FormError::guard(format!("Amount must be a number, got '{amount}'.")))?;
            overrides.insert("amount".to_string(), Value::from(amount));
        }

        let occurred_on = self.occurred_on.trim();
        if !occurred_on.is_empty() {
            let date = NaiveDate::parse_from_str(occurred_on, "%Y-%m-%d").map_err(|_| {
                FormError::guard(format!("Date must look like YYYY-MM-DD, got '{occurred_on}'."))
            })?;
            overrides.insert("occurred_on".to_string(), Value::from(date.to_string()));
        }

        if !self.transaction_type.trim().is_empty() {
            let kind: TransactionType = self.transaction_type.parse().map_err(FormError::Guard)?;
            overrides.insert("transaction_type".to_string(), Value::from(kind.as_str()));
        }

        let metadata = parse_metadata(&self.metadata)?;
        if !metadata.is_empty() {
            overrides.insert("metadata".to_string(), Value::Object(metadata));
        }

        Ok(overrides)
    }
}

fn parse_metadata(text: &str) -> Result<Map<String, Value>, FormError> {
    let mut metadata = Map::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some((key, value)) = line.split_once('=') else {
            return Err(FormError::guard(format!(
                "Metadata lines must look like key=value, got '{line}'."
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(FormError::guard(format!("Metadata key missing in '{line}'.")));
        }
        metadata.insert(key.to_string(), Value::from(value.trim()));
    }
    Ok(metadata)
}

fn build_duplicate(source: Option<String>, form: &DuplicateForm) -> Result<ApiRequest, FormError> {
    let source = source.ok_or_else(|| FormError::guard("Select a transaction to duplicate first."))?;
    Ok(api::duplicate_transaction(&source, form.overrides()?))
}

pub async fn submit_duplicate<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Finance);
    let request = {
        let source = app.store.borrow().selected_transaction().map(str::to_string);
        build_duplicate(source, &app.forms.borrow().duplicate)
    };

    let Some(outcome) = super::execute(app, ticket, request).await else {
        return;
    };
    let outcome = outcome.and_then(|value| {
        let parsed: DuplicateOutcome = serde_json::from_value(value.clone())
            .map_err(|error| NetworkError::Parse(format!("duplicate response: {error}")))?;
        Ok((value, parsed))
    });

    match outcome {
        Ok((value, parsed)) => {
            app.store.borrow_mut().replace_finance(parsed.snapshot);
            app.log.info(format!(
                "Created transaction {} from template",
                parsed.transaction.transaction_id
            ));
            super::finish(app, ticket, FormMsg::DuplicateTransaction, Ok(value));
        }
        Err(error) => {
            super::finish(app, ticket, FormMsg::DuplicateTransaction, Err(error));
        }
    }
}
