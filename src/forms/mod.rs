//! Form controllers
//!
//! This module contains:
//! - `FormInputs`, the field state of every dashboard form
//! - `FormError`, covering local guard failures and failed requests
//! - The shared submit path: ticket, request, output area, log line
//!
//! Every controller recovers its own failures. Nothing here returns an
//! error to the caller; the outcome lands in the panel's output area.

pub mod finance;
pub mod footage;
pub mod route;
pub mod survey;

use serde_json::Value;
use thiserror::Error;

use crate::core::app::Dashboard;
use crate::core::network::{ApiRequest, NetworkError, Transport};
use crate::core::sequence::Ticket;
use crate::session::messages::FormMsg;

pub use finance::DuplicateForm;
pub use footage::{IngestionSource, UploadForm};
pub use route::RouteForm;
pub use survey::{AnnotateForm, CompareForm};

#[derive(Debug, Error)]
pub enum FormError {
    /// Local precondition not met; no request was sent
    #[error("{0}")]
    Guard(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FormError {
    pub fn guard(message: impl Into<String>) -> Self {
        FormError::Guard(message.into())
    }
}

/// Field state of every form, edited by the front-end between submissions
#[derive(Clone, Debug, Default)]
pub struct FormInputs {
    pub route: RouteForm,
    pub upload: UploadForm,
    pub compare: CompareForm,
    pub annotate: AnnotateForm,
    pub duplicate: DuplicateForm,
}

/// Action name used to prefix failure messages
pub fn action_name(msg: FormMsg) -> &'static str {
    match msg {
        FormMsg::PlanRoute => "Route planning",
        FormMsg::UploadFootage => "Footage upload",
        FormMsg::RunClassification => "Classification",
        FormMsg::CompareCaptures => "Comparison",
        FormMsg::AnnotateAsset => "Annotation",
        FormMsg::DuplicateTransaction => "Duplicate",
    }
}

/// Handle a form submission
pub async fn handle_form_msg<T: Transport>(app: &Dashboard<T>, msg: FormMsg) {
    match msg {
        FormMsg::PlanRoute => route::submit_route(app).await,
        FormMsg::UploadFootage => footage::submit_upload(app).await,
        FormMsg::RunClassification => footage::run_classification(app).await,
        FormMsg::CompareCaptures => survey::submit_comparison(app).await,
        FormMsg::AnnotateAsset => survey::submit_annotation(app).await,
        FormMsg::DuplicateTransaction => finance::submit_duplicate(app).await,
    }
}

// ============================================================================
// Shared submit path
// ============================================================================

/// Send a built request; `None` means a newer submission overtook this one
pub(crate) async fn execute<T: Transport>(
    app: &Dashboard<T>,
    ticket: Ticket,
    request: Result<ApiRequest, FormError>,
) -> Option<Result<Value, FormError>> {
    let outcome = match request {
        Ok(request) => app.client.request_json(request).await.map_err(FormError::from),
        Err(error) => Err(error),
    };
    app.sequencer.is_current(ticket).then_some(outcome)
}

/// Write the outcome into the panel's output area and the operator log
pub(crate) fn finish<T: Transport>(
    app: &Dashboard<T>,
    ticket: Ticket,
    msg: FormMsg,
    outcome: Result<Value, FormError>,
) -> Option<Value> {
    let action = action_name(msg);
    match outcome {
        Ok(value) => {
            app.set_output(ticket.panel, pretty(&value));
            app.log.info(format!("{action} complete"));
            Some(value)
        }
        Err(error) => {
            let message = failure_message(action, &error);
            app.set_output(ticket.panel, message.clone());
            app.log.warn(message);
            None
        }
    }
}

/// Ticket, send, and report in one step
pub(crate) async fn submit<T: Transport>(
    app: &Dashboard<T>,
    ticket: Ticket,
    msg: FormMsg,
    request: Result<ApiRequest, FormError>,
) -> Option<Value> {
    let outcome = execute(app, ticket, request).await?;
    finish(app, ticket, msg, outcome)
}

/// Guard failures read as guidance; everything else names the action
pub fn failure_message(action: &str, error: &FormError) -> String {
    match error {
        FormError::Guard(message) => message.clone(),
        other => format!("{action} failed: {other}"),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
