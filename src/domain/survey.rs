//! Survey captures and the assets detected in them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::geometry::Geometry;

/// Classified object detected within a capture
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: String,
    pub classification: String,
    /// Measured volume in cubic metres
    pub volume_cubic_m: f64,
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// One recorded survey event, as the backend reports it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurveyCapture {
    pub capture_id: String,
    pub name: String,
    pub captured_on: NaiveDate,
    #[serde(default)]
    pub asset_count: usize,
    /// GeoJSON Feature (or bare polygon) outlining the surveyed area
    #[serde(default)]
    pub overlay: serde_json::Value,
    /// Reference to the exported point cloud
    #[serde(default)]
    pub point_cloud_path: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl SurveyCapture {
    /// Overlay polygon, if the capture carries a readable one
    pub fn overlay_geometry(&self) -> Option<Geometry> {
        Geometry::from_geojson(&self.overlay)
    }

    /// Label used by list rows and comparison selectors
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.captured_on)
    }
}

/// Body of the capture listing endpoint
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CaptureList {
    #[serde(default)]
    pub captures: Vec<SurveyCapture>,
}
