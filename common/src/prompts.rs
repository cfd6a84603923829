//! Prompt generation
//!
//! - build_prompt: full instruction for a given mode and optional location
//! - categories_block: allowed values for every categorical field
//!
//! The location string is inserted verbatim.

use crate::schema::{CATEGORICAL_FIELDS, SPECIMEN_TEXT_FIELDS};
use crate::types::AnalysisMode;

/// Allowed-value listing for every categorical field
///
/// One line per field: `- rock_class: "igneous_volcanic", "igneous_plutonic", ...`
pub fn categories_block() -> String {
    CATEGORICAL_FIELDS
        .iter()
        .map(|(field, values)| {
            let quoted = values
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {}: {}", field, quoted)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn detailed_prompt() -> String {
    let categories = categories_block();
    let text_fields = SPECIMEN_TEXT_FIELDS.join(", ");

    format!(
        r#"Perform a comprehensive geological analysis of all rocks visible in this image.

## Standardized categories
For each rock, you MUST select exactly one value from these lists:
{categories}

Notes on the scales:
- size_class follows the Wentworth scale (clay_silt <0.0625mm, sand 0.0625-2mm, granule 2-4mm, pebble 4-64mm, cobble 64-256mm, boulder 256-4096mm, block >4096mm, outcrop = bedrock exposure)
- hardness_class buckets the Mohs scale (very_soft 1-2, soft 2-3, medium 3-5, hard 5-7, very_hard 7-10)
- weathering_grade runs from W0 (fresh) to W5 (residual_soil)

## Numerical values
- confidence_value: 0.0 to 1.0
- estimated_diameter_cm: largest dimension in centimeters
- visible_minerals_count: number of identifiable minerals

## Descriptive fields (detailed professional descriptions)
{text_fields}
- specific_rock_name: full geological name (e.g. "biotite granite", "oolitic limestone")
- field_notes: professional observations linking features to interpretation
- likely_formation / age_estimate: only if determinable, otherwise an empty string

## Summary
Provide total_rocks, dominant and secondary rock class, average grain size, a weathering assessment,
structural geology, geological setting, tectonic interpretation, depositional environment,
metamorphic grade, economic geology notes, regional geology context and a list of recommended analyses.
Also provide an overall geological_interpretation and a confidence_assessment.

Output JSON only."#
    )
}

fn quick_prompt() -> String {
    let categories = categories_block();

    format!(
        r#"You are a field geologist performing a rapid rock assessment. While this is a quick analysis,
maintain scientific rigor and systematic observation.

## Rapid assessment process
For each rock:
1. Observe: note key visual features (texture, color, structure)
2. Classify: determine the rock class and characteristics
3. Assess: set confidence from how clear the diagnostic features are

Quick identification tips:
- Sedimentary: layers, grains, fossils, rounded clasts
- Igneous: interlocking crystals (slow cooling) or fine/glassy texture (fast cooling)
- Metamorphic: foliation, mineral alignment, recrystallized texture

## Standardized categories
Select exactly one value per field:
{categories}

## Confidence calibration
- very_high (0.8-1.0): diagnostic features clearly visible
- high (0.6-0.8): good features, minor uncertainty
- medium (0.4-0.6): reasonable guess, some ambiguity
- low (0.2-0.4): educated guess, limited clarity
- very_low (0.0-0.2): highly uncertain
Be honest about uncertainty. Consider image quality, angle and coverage.

Keep descriptive fields short (one sentence). Fill the summary with a brief interpretation of
the overall setting and formation processes.

Output JSON only."#
    )
}

fn location_block(location: &str) -> String {
    format!(
        r#"## Location context
Location: {location}

Use regional geological knowledge to:
- consider typical regional rock types
- inform the geological setting interpretation
- guide formation identification

Visual evidence is primary. If features contradict regional expectations, trust what you observe
and note the discrepancy. Consider transported specimens (glacial erratics, building stone, fill)."#
    )
}

const NO_LOCATION_BLOCK: &str = r#"## No location context
Analyze based on visual features alone without location context.
Focus on diagnostic visual characteristics: texture, structure, mineralogy."#;

/// Build the instruction sent alongside the image
///
/// # Arguments
/// * `mode` - detailed or quick analysis
/// * `location` - optional location hint; blank strings count as absent
///
/// # Returns
/// The prompt string
pub fn build_prompt(mode: AnalysisMode, location: Option<&str>) -> String {
    let base = match mode {
        AnalysisMode::Detailed => detailed_prompt(),
        AnalysisMode::Quick => quick_prompt(),
    };

    let context = match location.map(str::trim) {
        Some(loc) if !loc.is_empty() => location_block(loc),
        _ => NO_LOCATION_BLOCK.to_string(),
    };

    format!("{}\n\n{}", base, context)
}
