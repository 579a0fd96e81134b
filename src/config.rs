//! JSON configuration for the demo tooling.
use crate::advisor::AdvisorOptions;
use crate::analyzer::AnalyzerOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LaneToolConfig {
    /// Image file analyzed as a single captured frame.
    pub input: PathBuf,
    #[serde(default)]
    pub analyzer: AnalyzerOptions,
    #[serde(default)]
    pub advisor: AdvisorOptions,
    pub output: LaneOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct LaneOutputConfig {
    #[serde(rename = "annotated_image")]
    pub annotated_image: PathBuf,
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// Optional dump of the masked edge map, for inspection.
    #[serde(default)]
    pub edge_map: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<LaneToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
