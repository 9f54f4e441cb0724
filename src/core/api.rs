//! Backend endpoints consumed by the dashboard

use serde_json::{Map, Value};

use super::network::{ApiRequest, Body, FilePart};

pub const PLAN_ROUTE: &str = "/plan-route";
pub const INGEST_FOOTAGE: &str = "/ingest-footage";
pub const CLASSIFY_DEMO: &str = "/classify-demo";
pub const SURVEY_DAYS: &str = "/survey-days";
pub const COMPARE_CAPTURES: &str = "/compare-captures";
pub const ANNOTATE_ASSET: &str = "/annotate-asset";
pub const FINANCE_TRANSACTIONS: &str = "/finance/transactions";
pub const DUPLICATE_TRANSACTION: &str = "/finance/transactions/duplicate";

fn form(fields: &[(&str, &str)]) -> Body {
    Body::Form(
        fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

/// Route planning for a bounding box and optional drawn area
pub fn plan_route(bounds: [&str; 4], area_geojson: &str) -> ApiRequest {
    let [lat_min, lon_min, lat_max, lon_max] = bounds;
    let mut fields = vec![
        ("lat_min", lat_min),
        ("lon_min", lon_min),
        ("lat_max", lat_max),
        ("lon_max", lon_max),
    ];
    if !area_geojson.is_empty() {
        fields.push(("area_geojson", area_geojson));
    }
    ApiRequest::post(PLAN_ROUTE, form(&fields))
}

/// Footage upload; every file goes in a `video` part
pub fn ingest_footage(source: &str, files: Vec<FilePart>) -> ApiRequest {
    ApiRequest::post(
        INGEST_FOOTAGE,
        Body::Multipart {
            fields: vec![("source".to_string(), source.to_string())],
            files,
        },
    )
}

pub fn classify_demo() -> ApiRequest {
    ApiRequest::get(CLASSIFY_DEMO)
}

pub fn survey_days() -> ApiRequest {
    ApiRequest::get(SURVEY_DAYS)
}

/// Capture comparison; a blank focus asset is left out entirely
pub fn compare_captures(base: &str, target: &str, focus_asset: &str) -> ApiRequest {
    let mut fields = vec![("base_capture", base), ("target_capture", target)];
    if !focus_asset.trim().is_empty() {
        fields.push(("focus_asset", focus_asset.trim()));
    }
    ApiRequest::post(COMPARE_CAPTURES, form(&fields))
}

pub fn annotate_asset(capture_id: &str, asset_id: &str, note: &str) -> ApiRequest {
    ApiRequest::post(
        ANNOTATE_ASSET,
        form(&[("capture_id", capture_id), ("asset_id", asset_id), ("note", note)]),
    )
}

pub fn finance_transactions() -> ApiRequest {
    ApiRequest::get(FINANCE_TRANSACTIONS)
}

pub fn duplicate_transaction(source_id: &str, overrides: Map<String, Value>) -> ApiRequest {
    let mut body = Map::new();
    body.insert("transaction_id".into(), Value::String(source_id.to_string()));
    body.insert("overrides".into(), Value::Object(overrides));
    ApiRequest::post(DUPLICATE_TRANSACTION, Body::Json(Value::Object(body)))
}
