//! Analysis result types
//!
//! - RockSpecimen: one identified rock in the image
//! - AnalysisSummary: scene-level interpretation
//! - AnalysisResult: the complete, validated model output
//!
//! Field names are the persisted JSON names; do not rename.

use crate::schema::{
    AlterationType, ColorPattern, ConfidenceLevel, FractureType, GeologicalContext, GrainSize,
    HardnessClass, ImagePosition, PrimaryStructure, RockClass, SizeClass, WeatheringGrade,
    WeatheringType,
};
use serde::{Deserialize, Serialize};

/// Analysis depth. Selects the prompt variant and the remote model settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    Detailed,
    Quick,
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisMode::Detailed => write!(f, "detailed"),
            AnalysisMode::Quick => write!(f, "quick"),
        }
    }
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" | "full" | "d" => Ok(AnalysisMode::Detailed),
            "quick" | "fast" | "q" => Ok(AnalysisMode::Quick),
            _ => Err(format!("Unknown mode: {}. Use detailed or quick", s)),
        }
    }
}

/// One identified rock instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RockSpecimen {
    pub rock_class: RockClass,
    pub size_class: SizeClass,
    pub grain_size: GrainSize,
    pub weathering_grade: WeatheringGrade,
    pub weathering_type: WeatheringType,
    pub hardness_class: HardnessClass,
    pub primary_structure: PrimaryStructure,
    pub fracture_type: FractureType,
    pub alteration_type: AlterationType,
    pub color_pattern: ColorPattern,
    pub geological_context: GeologicalContext,
    pub confidence_level: ConfidenceLevel,
    pub image_position: ImagePosition,

    /// Model-reported confidence. Passed through as received, not calibrated.
    #[serde(default)]
    pub confidence_value: f64,

    #[serde(default)]
    pub estimated_diameter_cm: f64,

    #[serde(default)]
    pub visible_minerals_count: u32,

    #[serde(default)]
    pub specific_rock_name: String,
    #[serde(default)]
    pub color_details: String,
    #[serde(default)]
    pub texture_description: String,
    #[serde(default)]
    pub mineral_assemblage: String,
    #[serde(default)]
    pub surface_features: String,
    #[serde(default)]
    pub structural_features: String,
    #[serde(default)]
    pub shape_description: String,
    #[serde(default)]
    pub luster_description: String,
    #[serde(default)]
    pub special_features: String,
    #[serde(default)]
    pub field_notes: String,
    #[serde(default)]
    pub likely_formation: String,
    #[serde(default)]
    pub age_estimate: String,
}

/// Scene-level summary. Everything but the counts is free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSummary {
    pub total_rocks: u32,
    pub dominant_rock_class: String,
    pub secondary_rock_class: String,
    pub average_grain_size: String,
    pub weathering_assessment: String,
    pub structural_geology: String,
    pub geological_setting: String,
    pub tectonic_interpretation: String,
    pub depositional_environment: String,
    pub metamorphic_grade: String,
    pub economic_geology_notes: String,
    pub regional_geology_context: String,
    pub recommended_analyses: Vec<String>,
    pub location_used: String,
}

/// Complete analysis of one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: AnalysisSummary,

    /// Specimens in the order the model reported them
    #[serde(default)]
    pub rocks: Vec<RockSpecimen>,

    #[serde(default)]
    pub geological_interpretation: String,

    #[serde(default)]
    pub confidence_assessment: String,
}

/// Value written to `location_used` when the location was withheld
pub const NO_LOCATION_CONTEXT: &str = "No location context";

impl AnalysisResult {
    /// Record which location (if any) was sent with the request
    pub fn set_location_used(&mut self, location: Option<&str>) {
        self.summary.location_used = match location {
            Some(loc) if !loc.trim().is_empty() => loc.to_string(),
            _ => NO_LOCATION_CONTEXT.to_string(),
        };
    }

    /// Mean of the model-reported specimen confidences, `None` without specimens
    pub fn average_confidence(&self) -> Option<f64> {
        if self.rocks.is_empty() {
            return None;
        }
        let total: f64 = self.rocks.iter().map(|r| r.confidence_value).sum();
        Some(total / self.rocks.len() as f64)
    }
}
