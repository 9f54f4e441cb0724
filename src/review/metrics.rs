//! Headline survey metrics for the overview panel

use crate::domain::SurveyCapture;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurveyMetrics {
    pub total_surveys: usize,
    /// Sum of overlay bounding-box areas
    pub total_acres: f64,
    pub average_assets: f64,
    pub latest_capture: String,
    pub latest_date: String,
}

impl SurveyMetrics {
    /// Captures are listed newest first, so the first one is the latest
    pub fn from_captures(captures: &[SurveyCapture]) -> Self {
        let Some(latest) = captures.first() else {
            return Self::default();
        };

        let total_acres = captures
            .iter()
            .filter_map(|capture| capture.overlay_geometry()?.bounds())
            .map(|bounds| bounds.approximate_acres())
            .sum();
        let total_assets: usize = captures.iter().map(|capture| capture.asset_count).sum();

        Self {
            total_surveys: captures.len(),
            total_acres,
            average_assets: total_assets as f64 / captures.len() as f64,
            latest_capture: latest.name.clone(),
            latest_date: latest.captured_on.to_string(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Surveys: {}", self.total_surveys),
            format!("Area surveyed: {:.2} acres", self.total_acres),
            format!("Average assets per survey: {:.1}", self.average_assets),
            format!("Latest capture: {} {}", self.latest_capture, self.latest_date)
                .trim_end()
                .to_string(),
        ]
    }
}
