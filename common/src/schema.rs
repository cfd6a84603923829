//! Categorical field definitions
//!
//! Every categorical field of a specimen is a closed enumeration. The value
//! lists here drive three things at once:
//! - the typed enums used by [`crate::types::RockSpecimen`]
//! - the allowed-value lists printed into the prompts
//! - the Gemini `responseSchema` sent with every request
//!
//! Values are persisted verbatim in saved JSON, so they must stay stable.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// JSON field name carrying this enumeration
            pub const FIELD: &'static str = $field;

            /// Every permitted value, in declaration order
            pub const ALL: &'static [&'static str] = &[$($value),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "'{}' is not a valid {} (expected one of: {})",
                        s,
                        $field,
                        Self::ALL.join(", ")
                    )),
                }
            }
        }
    };
}

categorical! {
    /// Top-level lithology with subtype
    RockClass, "rock_class" {
        IgneousVolcanic => "igneous_volcanic",
        IgneousPlutonic => "igneous_plutonic",
        IgneousHypabyssal => "igneous_hypabyssal",
        SedimentaryClastic => "sedimentary_clastic",
        SedimentaryChemical => "sedimentary_chemical",
        SedimentaryOrganic => "sedimentary_organic",
        MetamorphicFoliated => "metamorphic_foliated",
        MetamorphicNonfoliated => "metamorphic_nonfoliated",
        Unconsolidated => "unconsolidated",
        Unknown => "unknown",
    }
}

categorical! {
    /// Wentworth-aligned size of the specimen (or bedrock exposure)
    SizeClass, "size_class" {
        ClaySilt => "clay_silt",
        Sand => "sand",
        Granule => "granule",
        Pebble => "pebble",
        Cobble => "cobble",
        Boulder => "boulder",
        Block => "block",
        Outcrop => "outcrop",
    }
}

categorical! {
    GrainSize, "grain_size" {
        Cryptocrystalline => "cryptocrystalline",
        VeryFine => "very_fine",
        Fine => "fine",
        Medium => "medium",
        Coarse => "coarse",
        VeryCoarse => "very_coarse",
        Pegmatitic => "pegmatitic",
        Mixed => "mixed",
        NotApplicable => "not_applicable",
    }
}

categorical! {
    /// W0 (fresh) through W5 (residual soil)
    WeatheringGrade, "weathering_grade" {
        Fresh => "fresh",
        Slight => "slight",
        Moderate => "moderate",
        High => "high",
        Complete => "complete",
        ResidualSoil => "residual_soil",
    }
}

categorical! {
    WeatheringType, "weathering_type" {
        None => "none",
        Mechanical => "mechanical",
        Chemical => "chemical",
        Biological => "biological",
        Mixed => "mixed",
        Spheroidal => "spheroidal",
        Exfoliation => "exfoliation",
    }
}

categorical! {
    /// Bucketed Mohs hardness: 1-2, 2-3, 3-5, 5-7, 7-10
    HardnessClass, "hardness_class" {
        VerySoft => "very_soft",
        Soft => "soft",
        Medium => "medium",
        Hard => "hard",
        VeryHard => "very_hard",
    }
}

categorical! {
    PrimaryStructure, "primary_structure" {
        Massive => "massive",
        Layered => "layered",
        Foliated => "foliated",
        Vesicular => "vesicular",
        Amygdaloidal => "amygdaloidal",
        Porphyritic => "porphyritic",
        Brecciated => "brecciated",
        Conglomeratic => "conglomeratic",
        Crystalline => "crystalline",
        Concretionary => "concretionary",
    }
}

categorical! {
    FractureType, "fracture_type" {
        Conchoidal => "conchoidal",
        Irregular => "irregular",
        Splintery => "splintery",
        Blocky => "blocky",
        Platy => "platy",
        Columnar => "columnar",
        JointControlled => "joint_controlled",
        NoneVisible => "none_visible",
    }
}

categorical! {
    AlterationType, "alteration_type" {
        Unaltered => "unaltered",
        Oxidized => "oxidized",
        Silicified => "silicified",
        Carbonatized => "carbonatized",
        Chloritized => "chloritized",
        Sericitized => "sericitized",
        Kaolinized => "kaolinized",
        Mineralized => "mineralized",
        Metamorphosed => "metamorphosed",
        Hydrothermal => "hydrothermal",
    }
}

categorical! {
    ColorPattern, "color_pattern" {
        Uniform => "uniform",
        Mottled => "mottled",
        Banded => "banded",
        Spotted => "spotted",
        Veined => "veined",
        Gradational => "gradational",
    }
}

categorical! {
    /// How the specimen came to rest where it was photographed
    GeologicalContext, "geological_context" {
        InSituOutcrop => "in_situ_outcrop",
        DisplacedBlock => "displaced_block",
        Float => "float",
        Talus => "talus",
        GlacialErratic => "glacial_erratic",
        StreamCobble => "stream_cobble",
        Artificial => "artificial",
        UnknownContext => "unknown_context",
    }
}

categorical! {
    ConfidenceLevel, "confidence_level" {
        VeryLow => "very_low",
        Low => "low",
        Medium => "medium",
        High => "high",
        VeryHigh => "very_high",
    }
}

categorical! {
    ImagePosition, "image_position" {
        Foreground => "foreground",
        Midground => "midground",
        Background => "background",
        Left => "left",
        Right => "right",
        Center => "center",
        Multiple => "multiple",
    }
}

/// (field name, permitted values) for every categorical specimen field,
/// in the order they appear in prompts and reports.
pub const CATEGORICAL_FIELDS: &[(&str, &[&str])] = &[
    (RockClass::FIELD, RockClass::ALL),
    (SizeClass::FIELD, SizeClass::ALL),
    (GrainSize::FIELD, GrainSize::ALL),
    (WeatheringGrade::FIELD, WeatheringGrade::ALL),
    (WeatheringType::FIELD, WeatheringType::ALL),
    (HardnessClass::FIELD, HardnessClass::ALL),
    (PrimaryStructure::FIELD, PrimaryStructure::ALL),
    (FractureType::FIELD, FractureType::ALL),
    (AlterationType::FIELD, AlterationType::ALL),
    (ColorPattern::FIELD, ColorPattern::ALL),
    (GeologicalContext::FIELD, GeologicalContext::ALL),
    (ConfidenceLevel::FIELD, ConfidenceLevel::ALL),
    (ImagePosition::FIELD, ImagePosition::ALL),
];

/// Free-text specimen fields
pub const SPECIMEN_TEXT_FIELDS: &[&str] = &[
    "specific_rock_name",
    "color_details",
    "texture_description",
    "mineral_assemblage",
    "surface_features",
    "structural_features",
    "shape_description",
    "luster_description",
    "special_features",
    "field_notes",
    "likely_formation",
    "age_estimate",
];

/// Free-text summary fields (everything except the count and the list)
pub const SUMMARY_TEXT_FIELDS: &[&str] = &[
    "dominant_rock_class",
    "secondary_rock_class",
    "average_grain_size",
    "weathering_assessment",
    "structural_geology",
    "geological_setting",
    "tectonic_interpretation",
    "depositional_environment",
    "metamorphic_grade",
    "economic_geology_notes",
    "regional_geology_context",
    "location_used",
];

/// Permitted values for a categorical field, `None` for any other field
pub fn allowed_values(field: &str) -> Option<&'static [&'static str]> {
    CATEGORICAL_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, values)| *values)
}

/// Gemini `responseSchema` describing an analysis result
///
/// Uses the OpenAPI subset accepted by `generateContent`. Enumerations are
/// emitted from [`CATEGORICAL_FIELDS`], so the remote constraint and the
/// local validation always agree.
pub fn response_schema() -> Value {
    let mut rock_props = Map::new();
    for (field, values) in CATEGORICAL_FIELDS {
        rock_props.insert(
            field.to_string(),
            json!({ "type": "STRING", "enum": values }),
        );
    }
    rock_props.insert("confidence_value".into(), json!({ "type": "NUMBER" }));
    rock_props.insert("estimated_diameter_cm".into(), json!({ "type": "NUMBER" }));
    rock_props.insert("visible_minerals_count".into(), json!({ "type": "INTEGER" }));
    for field in SPECIMEN_TEXT_FIELDS {
        rock_props.insert(field.to_string(), json!({ "type": "STRING" }));
    }
    let rock_required: Vec<String> = rock_props.keys().cloned().collect();
    let rock_schema = json!({
        "type": "OBJECT",
        "properties": rock_props,
        "required": rock_required,
    });

    let mut summary_props = Map::new();
    summary_props.insert("total_rocks".into(), json!({ "type": "INTEGER" }));
    for field in SUMMARY_TEXT_FIELDS {
        summary_props.insert(field.to_string(), json!({ "type": "STRING" }));
    }
    summary_props.insert(
        "recommended_analyses".into(),
        json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
    );
    // location_used is filled in locally after the call
    let summary_required: Vec<String> = summary_props
        .keys()
        .filter(|k| k.as_str() != "location_used")
        .cloned()
        .collect();
    let summary_schema = json!({
        "type": "OBJECT",
        "properties": summary_props,
        "required": summary_required,
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": summary_schema,
            "rocks": { "type": "ARRAY", "items": rock_schema },
            "geological_interpretation": { "type": "STRING" },
            "confidence_assessment": { "type": "STRING" },
        },
        "required": ["summary", "rocks", "geological_interpretation", "confidence_assessment"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_rock_class_round_trip_str() {
        for value in RockClass::ALL {
            let parsed = RockClass::from_str(value).unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = SizeClass::from_str("huge").unwrap_err();
        assert!(err.contains("size_class"));
        assert!(err.contains("boulder"));
    }

    #[test]
    fn test_serde_uses_snake_case_values() {
        let json = serde_json::to_string(&GeologicalContext::InSituOutcrop).unwrap();
        assert_eq!(json, "\"in_situ_outcrop\"");

        let parsed: FractureType = serde_json::from_str("\"joint_controlled\"").unwrap();
        assert_eq!(parsed, FractureType::JointControlled);
    }

    #[test]
    fn test_wentworth_order() {
        assert_eq!(
            SizeClass::ALL,
            &["clay_silt", "sand", "granule", "pebble", "cobble", "boulder", "block", "outcrop"]
        );
    }

    #[test]
    fn test_allowed_values_lookup() {
        assert_eq!(allowed_values("hardness_class"), Some(HardnessClass::ALL));
        assert!(allowed_values("field_notes").is_none());
    }

    #[test]
    fn test_categorical_fields_are_unique() {
        let mut names: Vec<&str> = CATEGORICAL_FIELDS.iter().map(|(n, _)| *n).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CATEGORICAL_FIELDS.len());
    }

    #[test]
    fn test_response_schema_enums_match_tables() {
        let schema = response_schema();
        let rock_props = &schema["properties"]["rocks"]["items"]["properties"];

        for (field, values) in CATEGORICAL_FIELDS {
            let schema_values: Vec<&str> = rock_props[*field]["enum"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap())
                .collect();
            assert_eq!(&schema_values, values, "enum mismatch for {}", field);
        }
    }

    #[test]
    fn test_response_schema_location_used_not_required() {
        let schema = response_schema();
        let required = schema["properties"]["summary"]["required"].as_array().unwrap();
        assert!(!required.iter().any(|v| v == "location_used"));
        assert!(required.iter().any(|v| v == "total_rocks"));
    }
}
