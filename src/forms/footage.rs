//! Footage upload and demo classification

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::api;
use crate::core::app::Dashboard;
use crate::core::network::{ApiRequest, FilePart, Transport};
use crate::session::events::Panel;
use crate::session::messages::FormMsg;

use super::FormError;

/// Where the footage came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionSource {
    MobileUpload,
    #[default]
    FileUpload,
    LiveStream,
}

impl IngestionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            IngestionSource::MobileUpload => "mobile_upload",
            IngestionSource::FileUpload => "file_upload",
            IngestionSource::LiveStream => "live_stream",
        }
    }
}

impl fmt::Display for IngestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub source: IngestionSource,
    pub files: Vec<PathBuf>,
}

/// Read every selected file into a `video` part
async fn read_parts(files: &[PathBuf]) -> Result<Vec<FilePart>, FormError> {
    let mut parts = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path).await.map_err(|source| FormError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        parts.push(FilePart {
            field: "video".to_string(),
            file_name,
            bytes,
        });
    }
    Ok(parts)
}

async fn build_upload(form: UploadForm) -> Result<ApiRequest, FormError> {
    if form.files.is_empty() {
        return Err(FormError::guard("Choose at least one footage file to upload."));
    }
    let parts = read_parts(&form.files).await?;
    Ok(api::ingest_footage(form.source.as_str(), parts))
}

pub async fn submit_upload<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Footage);
    let form = app.forms.borrow().upload.clone();
    let request = build_upload(form).await;
    super::submit(app, ticket, FormMsg::UploadFootage, request).await;
}

pub async fn run_classification<T: Transport>(app: &Dashboard<T>) {
    let ticket = app.sequencer.issue_submit(Panel::Classification);
    super::submit(app, ticket, FormMsg::RunClassification, Ok(api::classify_demo())).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::network::Body;
    use crate::core::testing::{self, Reply};
    use crate::session::messages::Msg;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn upload_sends_file_bytes_and_source() {
        let (app, _probes) = testing::dashboard();
        let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        file.write_all(b"frames").unwrap();
        app.with_forms(|forms| {
            forms.upload = UploadForm {
                source: IngestionSource::MobileUpload,
                files: vec![file.path().to_path_buf()],
            };
        });
        app.client.transport().reply(Reply::json(json!({
            "path": "/data/raw/clip.mp4",
            "frame_rate": 30.0,
            "frame_count": 900,
            "source": "mobile_upload"
        })));

        app.update(Msg::upload_footage()).await;

        let requests = app.client.transport().requests();
        assert_eq!(requests[0].path, api::INGEST_FOOTAGE);
        assert_eq!(requests[0].field("source"), Some("mobile_upload"));
        let Body::Multipart { files, .. } = &requests[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(files[0].field, "video");
        assert_eq!(files[0].bytes, b"frames");
        assert!(app.output(Panel::Footage).unwrap().contains("frame_count"));
    }

    #[tokio::test]
    async fn upload_without_files_is_guarded() {
        let (app, _probes) = testing::dashboard();
        app.update(Msg::upload_footage()).await;
        assert!(app.client.transport().requests().is_empty());
        assert_eq!(
            app.output(Panel::Footage).as_deref(),
            Some("Choose at least one footage file to upload.")
        );
    }

    #[tokio::test]
    async fn unreadable_file_is_reported() {
        let (app, _probes) = testing::dashboard();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp4");
        app.with_forms(|forms| forms.upload.files = vec![missing]);

        app.update(Msg::upload_footage()).await;

        assert!(app.client.transport().requests().is_empty());
        let output = app.output(Panel::Footage).unwrap();
        assert!(output.starts_with("Footage upload failed: could not read"));
    }

    #[tokio::test]
    async fn classification_failure_is_recovered() {
        let (app, _probes) = testing::dashboard();
        app.client.transport().reply(Reply::unreachable());
        app.update(Msg::run_classification()).await;

        assert_eq!(
            app.output(Panel::Classification).as_deref(),
            Some("Classification failed: backend unreachable: connection refused")
        );
        assert_eq!(app.log.len(), 1);
    }

    #[test]
    fn source_serializes_as_wire_value() {
        assert_eq!(
            serde_json::to_value(IngestionSource::LiveStream).unwrap(),
            json!("live_stream")
        );
        assert_eq!(IngestionSource::default().to_string(), "file_upload");
    }
}
