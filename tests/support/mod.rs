//! Shared helpers for the integration tests
//!
//! `ScriptedModel` records every prompt it receives and answers from a
//! queue, so tests can count remote calls without a network.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use rock_ai::analyzer::VisionModel;
use rock_ai::error::{Result, RockAiError};
use rock_ai::loader::ImagePayload;
use rock_ai_common::AnalysisMode;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

pub struct ScriptedModel {
    responses: RefCell<VecDeque<Result<String>>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl VisionModel for ScriptedModel {
    fn generate(&self, _image: &ImagePayload, prompt: &str, _mode: AnalysisMode) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RockAiError::Transport("no scripted response left".into())))
    }
}

pub fn valid_response(rock_class: &str) -> String {
    serde_json::json!({
        "summary": {
            "total_rocks": 1,
            "dominant_rock_class": rock_class,
            "secondary_rock_class": "none",
            "average_grain_size": "coarse",
            "weathering_assessment": "slight surface oxidation",
            "structural_geology": "widely spaced jointing",
            "geological_setting": "plutonic",
            "tectonic_interpretation": "post-orogenic",
            "depositional_environment": "N/A",
            "metamorphic_grade": "none",
            "economic_geology_notes": "",
            "regional_geology_context": "",
            "recommended_analyses": ["thin section petrography"]
        },
        "rocks": [{
            "rock_class": rock_class,
            "size_class": "boulder",
            "grain_size": "coarse",
            "weathering_grade": "slight",
            "weathering_type": "chemical",
            "hardness_class": "hard",
            "primary_structure": "crystalline",
            "fracture_type": "blocky",
            "alteration_type": "unaltered",
            "color_pattern": "spotted",
            "geological_context": "in_situ_outcrop",
            "confidence_level": "high",
            "image_position": "foreground",
            "confidence_value": 0.82,
            "estimated_diameter_cm": 150.0,
            "visible_minerals_count": 3,
            "specific_rock_name": "biotite granite",
            "field_notes": "coarse pink feldspar"
        }],
        "geological_interpretation": "Exposed granitic pluton.",
        "confidence_assessment": "High for lithology."
    })
    .to_string()
}

pub fn write_photo(dir: &Path) -> PathBuf {
    let path = dir.join("outcrop.png");
    RgbImage::from_pixel(64, 48, Rgb([150, 120, 110])).save(&path).unwrap();
    path
}
