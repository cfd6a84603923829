//! Report formatting
//!
//! - text report for the terminal (this module)
//! - JSON persistence (`json`)
//! - with/without location digest (`compare`)

pub mod compare;
pub mod json;

pub use compare::{compare_results, ComparisonDigest};
pub use json::{output_file_name, save_result, to_json};

use rock_ai_common::AnalysisResult;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;
const FIELD_NOTES_LIMIT: usize = 200;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Cut `text` to at most `limit` characters, appending "..." when cut
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Render the terminal report
///
/// Section order is fixed. Optional sections are skipped when their text
/// is empty; specimens appear in the order the model reported them.
pub fn render_report(result: &AnalysisResult, title: &str) -> String {
    // Writing to a String cannot fail
    let mut out = String::new();
    let _ = write_report(&mut out, result, title);
    out
}

fn write_report(out: &mut String, result: &AnalysisResult, title: &str) -> std::fmt::Result {
    let s = &result.summary;

    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule())?;

    writeln!(out, "\nEXECUTIVE SUMMARY:")?;
    writeln!(out, "  Total specimens: {}", s.total_rocks)?;
    writeln!(out, "  Dominant lithology: {}", or_default(&s.dominant_rock_class, "Unknown"))?;
    writeln!(out, "  Secondary lithology: {}", or_default(&s.secondary_rock_class, "None"))?;
    writeln!(out, "  Average grain size: {}", or_default(&s.average_grain_size, "Unknown"))?;
    writeln!(out, "  Weathering assessment: {}", or_default(&s.weathering_assessment, "Unknown"))?;
    writeln!(out, "  Location: {}", or_default(&s.location_used, "Unknown"))?;

    writeln!(out, "\nGEOLOGICAL INTERPRETATION:")?;
    writeln!(out, "  Setting: {}", or_default(&s.geological_setting, "Unknown"))?;
    writeln!(out, "  Tectonic context: {}", or_default(&s.tectonic_interpretation, "Unknown"))?;
    writeln!(out, "  Depositional environment: {}", or_default(&s.depositional_environment, "N/A"))?;
    writeln!(out, "  Metamorphic grade: {}", or_default(&s.metamorphic_grade, "N/A"))?;
    if !s.structural_geology.trim().is_empty() {
        writeln!(out, "  Structural geology: {}", s.structural_geology)?;
    }
    if !s.regional_geology_context.trim().is_empty() {
        writeln!(out, "  Regional context: {}", s.regional_geology_context)?;
    }

    if !s.economic_geology_notes.trim().is_empty() {
        writeln!(out, "\nECONOMIC GEOLOGY: {}", s.economic_geology_notes)?;
    }

    if !s.recommended_analyses.is_empty() {
        writeln!(out, "\nRECOMMENDED ANALYSES:")?;
        for analysis in &s.recommended_analyses {
            writeln!(out, "  • {}", analysis)?;
        }
    }

    if !result.rocks.is_empty() {
        writeln!(out, "\n{}", rule())?;
        writeln!(out, "DETAILED SPECIMEN DESCRIPTIONS ({} specimens)", result.rocks.len())?;
        writeln!(out, "{}", rule())?;

        for (i, rock) in result.rocks.iter().enumerate() {
            writeln!(out, "\n--- Specimen {} ---", i + 1)?;
            writeln!(out, "Classification: {}", rock.rock_class)?;
            writeln!(out, "Specific name: {}", or_default(&rock.specific_rock_name, "Unidentified"))?;
            writeln!(out, "Size: {} (~{:.0} cm)", rock.size_class, rock.estimated_diameter_cm)?;
            writeln!(out, "Grain size: {}", rock.grain_size)?;
            writeln!(out, "Hardness: {}", rock.hardness_class)?;
            writeln!(out, "Structure: {}", rock.primary_structure)?;
            writeln!(out, "Weathering: {} ({})", rock.weathering_grade, rock.weathering_type)?;
            writeln!(out, "Alteration: {}", rock.alteration_type)?;
            writeln!(out, "Context: {}", rock.geological_context)?;
            writeln!(out, "Position: {}", rock.image_position)?;
            writeln!(out, "Confidence: {} ({:.2})", rock.confidence_level, rock.confidence_value)?;

            if !rock.mineral_assemblage.trim().is_empty() {
                writeln!(out, "Minerals: {}", rock.mineral_assemblage)?;
            }
            if !rock.field_notes.trim().is_empty() {
                writeln!(out, "Field notes: {}", truncate_chars(&rock.field_notes, FIELD_NOTES_LIMIT))?;
            }
            if !rock.likely_formation.trim().is_empty() {
                writeln!(out, "Formation: {}", rock.likely_formation)?;
            }
        }
    }

    if !result.geological_interpretation.trim().is_empty() {
        writeln!(out, "\n{}", rule())?;
        writeln!(out, "OVERALL GEOLOGICAL INTERPRETATION")?;
        writeln!(out, "{}", rule())?;
        writeln!(out, "{}", result.geological_interpretation)?;
    }

    if !result.confidence_assessment.trim().is_empty() {
        writeln!(out, "\nCONFIDENCE ASSESSMENT:")?;
        writeln!(out, "{}", result.confidence_assessment)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("granite", 200), "granite");
    }

    #[test]
    fn test_truncate_exact_limit_unchanged() {
        let text = "a".repeat(200);
        assert_eq!(truncate_chars(&text, 200), text);
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "b".repeat(250);
        let cut = truncate_chars(&text, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "花崗岩".repeat(100);
        let cut = truncate_chars(&text, 200);
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn test_empty_result_renders_fallbacks() {
        let report = render_report(&AnalysisResult::default(), "GEOLOGICAL ANALYSIS REPORT");
        assert!(report.contains("GEOLOGICAL ANALYSIS REPORT"));
        assert!(report.contains("Total specimens: 0"));
        assert!(report.contains("Dominant lithology: Unknown"));
        assert!(!report.contains("DETAILED SPECIMEN DESCRIPTIONS"));
        assert!(!report.contains("RECOMMENDED ANALYSES"));
        assert!(!report.contains("CONFIDENCE ASSESSMENT"));
    }
}
