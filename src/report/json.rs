//! JSON persistence

use crate::error::Result;
use crate::pipeline::LocationVariant;
use rock_ai_common::AnalysisResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pretty JSON with the persisted field names
pub fn to_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write `result` to `dir/file_name`, replacing any existing file
pub fn save_result(result: &AnalysisResult, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let json = to_json(result)?;
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let path = dir.join(file_name);
    std::fs::write(&path, json)?;
    debug!("saved {}", path.display());
    Ok(path)
}

/// Output file name for an image
///
/// `geological_analysis_[with_location_|without_location_]<stem>[_<timestamp>].json`
pub fn output_file_name(image_path: &Path, variant: LocationVariant, timestamp: Option<&str>) -> String {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let prefix = match variant {
        LocationVariant::Single => "geological_analysis_",
        LocationVariant::WithLocation => "geological_analysis_with_location_",
        LocationVariant::WithoutLocation => "geological_analysis_without_location_",
    };

    match timestamp {
        Some(ts) => format!("{}{}_{}.json", prefix, stem, ts),
        None => format!("{}{}.json", prefix, stem),
    }
}
