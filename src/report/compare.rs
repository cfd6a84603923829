//! Location influence digest
//!
//! Computed from the two results already in hand; no extra model call.

use rock_ai_common::AnalysisResult;
use std::fmt;

/// A specimen whose classification changed between the two runs
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenDifference {
    /// 1-based, as printed in the reports
    pub specimen: usize,
    pub with_location: String,
    pub without_location: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonDigest {
    pub dominant_with: String,
    pub dominant_without: String,
    pub count_with: usize,
    pub count_without: usize,
    pub confidence_with: Option<f64>,
    pub confidence_without: Option<f64>,
    pub differences: Vec<SpecimenDifference>,
}

impl ComparisonDigest {
    /// Average confidence with location minus without
    pub fn confidence_change(&self) -> Option<f64> {
        Some(self.confidence_with? - self.confidence_without?)
    }
}

fn describe(class: &str, name: &str) -> String {
    if name.trim().is_empty() {
        class.to_string()
    } else {
        format!("{} ({})", class, name)
    }
}

/// Compare the with-location result against the without-location result
///
/// Specimens are paired by index. A specimen present in only one run is
/// listed with "-" on the other side.
pub fn compare_results(with: &AnalysisResult, without: &AnalysisResult) -> ComparisonDigest {
    let len = with.rocks.len().max(without.rocks.len());
    let mut differences = Vec::new();

    for i in 0..len {
        let a = with.rocks.get(i);
        let b = without.rocks.get(i);
        let changed = match (a, b) {
            (Some(a), Some(b)) => {
                a.rock_class != b.rock_class
                    || !a.specific_rock_name.trim().eq_ignore_ascii_case(b.specific_rock_name.trim())
            }
            _ => true,
        };
        if changed {
            differences.push(SpecimenDifference {
                specimen: i + 1,
                with_location: a
                    .map(|r| describe(r.rock_class.as_str(), &r.specific_rock_name))
                    .unwrap_or_else(|| "-".to_string()),
                without_location: b
                    .map(|r| describe(r.rock_class.as_str(), &r.specific_rock_name))
                    .unwrap_or_else(|| "-".to_string()),
            });
        }
    }

    ComparisonDigest {
        dominant_with: with.summary.dominant_rock_class.clone(),
        dominant_without: without.summary.dominant_rock_class.clone(),
        count_with: with.rocks.len(),
        count_without: without.rocks.len(),
        confidence_with: with.average_confidence(),
        confidence_without: without.average_confidence(),
        differences,
    }
}

fn fmt_confidence(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string())
}

impl fmt::Display for ComparisonDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f, "{}", rule)?;
        writeln!(f, "LOCATION CONTEXT COMPARISON")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<24}{:<24}{}", "", "With location", "Without location")?;
        writeln!(f, "{:<24}{:<24}{}", "Dominant lithology", self.dominant_with, self.dominant_without)?;
        writeln!(f, "{:<24}{:<24}{}", "Specimens", self.count_with, self.count_without)?;
        writeln!(
            f,
            "{:<24}{:<24}{}",
            "Average confidence",
            fmt_confidence(self.confidence_with),
            fmt_confidence(self.confidence_without)
        )?;
        if let Some(change) = self.confidence_change() {
            writeln!(f, "Confidence change: {:+.2}", change)?;
        }

        if self.differences.is_empty() {
            writeln!(f, "\nNo specimen classification differences.")?;
        } else {
            writeln!(f, "\nClassification differences:")?;
            for d in &self.differences {
                writeln!(
                    f,
                    "  Specimen {}: {} -> {}",
                    d.specimen, d.without_location, d.with_location
                )?;
            }
        }
        Ok(())
    }
}
