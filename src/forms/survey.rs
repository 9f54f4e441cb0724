//! Capture comparison and asset annotation forms

use crate::core::api;
use crate::core::app::Dashboard;
use crate::core::network::{ApiRequest, Transport};
use crate::review::{self, ComparisonSide, ReviewStore};
use crate::session::events::Panel;
use crate::session::messages::FormMsg;

use super::FormError;

/// Base and target come from the comparison selectors in the store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareForm {
    /// Optional asset to narrate; blank means every asset
    pub focus_asset: String,
}

impl CompareForm {
    pub fn build_request(&self, store: &ReviewStore) -> Result<ApiRequest, FormError> {
        let base = store.selector(ComparisonSide::Base).selected.as_deref();
        let target = store.selector(ComparisonSide::Target).selected.as_deref();
        match (base, target) {
            (Some(base), Some(target)) => {
                Ok(api::compare_captures(base, target, &self.focus_asset))
            }
            _ => Err(FormError::guard("Load survey captures before comparing.")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotateForm {
    /// Blank falls back to the capture shown in the detail pane
    pub capture_id: String,
    pub asset_id: String,
    pub note: String,
}

impl AnnotateForm {
    pub fn build_request(&self, store: &ReviewStore) -> Result<ApiRequest, FormError> {
        let capture_id = match self.capture_id.trim() {
            "" => store.selected_capture().unwrap_or_default(),
            typed => typed,
        };
        let asset_id = self.asset_id.trim();
        let note = self.note.trim();
        if capture_id.is_empty() || asset_id.is_empty() || note.is_empty() {
            return Err(FormError::guard(
                "Fill in the capture, asset and note before annotating.",
            ));
        }
        Ok(api::annotate_asset(capture_id, asset_id, note))
    }
}

pub async fn submit_comparison<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Comparison);
    let request = {
        let store = app.store.borrow();
        app.forms.borrow().compare.build_request(&store)
    };
    super::submit(app, ticket, FormMsg::CompareCaptures, request).await;
}

/// On success the capture list is refetched so the new note shows up
pub async fn submit_annotation<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Annotation);
    let request = {
        let store = app.store.borrow();
        app.forms.borrow().annotate.build_request(&store)
    };
    if super::submit(app, ticket, FormMsg::AnnotateAsset, request)
        .await
        .is_some()
    {
        review::load_survey_captures(app).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{self, Reply};
    use crate::review::views::TableRow;
    use crate::session::messages::Msg;
    use serde_json::json;

    fn captures(annotations: &[&str]) -> serde_json::Value {
        json!({"captures": [
            {
                "capture_id": "river_06",
                "name": "River",
                "captured_on": "2024-06-01",
                "asset_count": 1,
                "assets": [{
                    "asset_id": "bridge_east",
                    "classification": "bridge",
                    "volume_cubic_m": 2300.0,
                    "annotations": annotations
                }]
            },
            {
                "capture_id": "river_05",
                "name": "River",
                "captured_on": "2024-05-01",
                "asset_count": 0
            }
        ]})
    }

    #[tokio::test]
    async fn comparison_uses_selectors_and_omits_blank_focus() {
        let (app, _probes) = testing::dashboard();
        app.client.transport().reply(Reply::json(captures(&[])));
        app.update(Msg::load_captures()).await;

        app.client.transport().reply(Reply::json(json!({"narrative": "No change"})));
        app.update(Msg::compare_captures()).await;

        let requests = app.client.transport().requests();
        let compare = &requests[1];
        assert_eq!(compare.path, api::COMPARE_CAPTURES);
        assert_eq!(compare.field("base_capture"), Some("river_05"));
        assert_eq!(compare.field("target_capture"), Some("river_06"));
        assert_eq!(compare.field("focus_asset"), None);
        assert!(app.output(Panel::Comparison).unwrap().contains("No change"));
    }

    #[tokio::test]
    async fn comparison_without_captures_is_guarded() {
        let (app, _probes) = testing::dashboard();
        app.update(Msg::compare_captures()).await;
        assert!(app.client.transport().requests().is_empty());
        assert_eq!(
            app.output(Panel::Comparison).as_deref(),
            Some("Load survey captures before comparing.")
        );
    }

    #[tokio::test]
    async fn annotation_refreshes_captures() {
        let (app, _probes) = testing::dashboard();
        app.client.transport().reply(Reply::json(captures(&[])));
        app.update(Msg::load_captures()).await;
        app.update(Msg::select_capture("river_06")).await;
        app.with_forms(|forms| {
            forms.annotate.asset_id = "bridge_east".into();
            forms.annotate.note = "Joints intact".into();
        });

        app.client.transport().reply(Reply::json(json!({
            "capture_id": "river_06",
            "asset_id": "bridge_east",
            "annotations": ["Joints intact"],
            "note": "Joints intact"
        })));
        app.client.transport().reply(Reply::json(captures(&["Joints intact"])));
        app.update(Msg::annotate_asset()).await;

        let requests = app.client.transport().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].field("capture_id"), Some("river_06"));
        assert_eq!(requests[2].path, api::SURVEY_DAYS);

        let store = app.store();
        let detail = store.capture_detail().unwrap();
        let TableRow::Data(row) = &detail.assets.rows[0] else {
            panic!("expected asset row");
        };
        assert_eq!(row.cells[3], "Joints intact");
    }

    #[tokio::test]
    async fn failed_annotation_does_not_refresh() {
        let (app, _probes) = testing::dashboard();
        app.with_forms(|forms| {
            forms.annotate = AnnotateForm {
                capture_id: "nope".into(),
                asset_id: "a".into(),
                note: "n".into(),
            };
        });
        app.client
            .transport()
            .reply(Reply::status(404, r#"{"detail": "Capture nope is not registered"}"#));
        app.update(Msg::annotate_asset()).await;

        assert_eq!(app.client.transport().requests().len(), 1);
        assert_eq!(
            app.output(Panel::Annotation).as_deref(),
            Some("Annotation failed: Capture nope is not registered")
        );
    }
}
