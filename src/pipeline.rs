//! Analysis pipeline
//!
//! image loader -> prompt builder -> model client -> parser/validator.
//! A comparison runs the pipeline twice, sequentially, once with and once
//! without the location. Runs share nothing; a failed run does not stop
//! the next one.

use crate::analyzer::VisionModel;
use crate::error::Result;
use crate::loader::load_image;
use rock_ai_common::{build_prompt, parse_analysis_response, AnalysisMode, AnalysisResult};
use std::path::PathBuf;
use tracing::{info, warn};

/// Which location variant a run represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationVariant {
    /// Ordinary single run (location optional)
    Single,
    WithLocation,
    WithoutLocation,
}

impl LocationVariant {
    pub fn title(&self) -> &'static str {
        match self {
            LocationVariant::Single => "GEOLOGICAL ANALYSIS REPORT",
            LocationVariant::WithLocation => "GEOLOGICAL ANALYSIS REPORT - WITH LOCATION CONTEXT",
            LocationVariant::WithoutLocation => "GEOLOGICAL ANALYSIS REPORT - WITHOUT LOCATION CONTEXT",
        }
    }
}

/// One pipeline execution's input
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image_path: PathBuf,
    pub location: Option<String>,
    pub mode: AnalysisMode,
}

impl AnalysisRequest {
    pub fn new(image_path: impl Into<PathBuf>, location: Option<String>, mode: AnalysisMode) -> Self {
        Self {
            image_path: image_path.into(),
            location: normalize_location(location),
            mode,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

fn normalize_location(location: Option<String>) -> Option<String> {
    location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

#[derive(Debug, Clone)]
pub struct PlannedRun {
    pub variant: LocationVariant,
    pub request: AnalysisRequest,
}

/// Options that decide how many runs happen and with which location
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub image_path: PathBuf,
    pub location: Option<String>,
    pub mode: AnalysisMode,
    pub compare: bool,
    pub no_location: bool,
}

/// Turn CLI options into the list of runs to execute
///
/// - `no_location` drops the location everywhere
/// - `compare` with a location gives a with/without pair
/// - anything else is a single run
pub fn plan_runs(options: &RunOptions) -> Vec<PlannedRun> {
    let location = if options.no_location {
        None
    } else {
        normalize_location(options.location.clone())
    };

    match location {
        Some(loc) if options.compare => vec![
            PlannedRun {
                variant: LocationVariant::WithLocation,
                request: AnalysisRequest::new(&options.image_path, Some(loc), options.mode),
            },
            PlannedRun {
                variant: LocationVariant::WithoutLocation,
                request: AnalysisRequest::new(&options.image_path, None, options.mode),
            },
        ],
        location => {
            if options.compare {
                warn!("comparison requested without a usable location; running a single analysis");
            }
            vec![PlannedRun {
                variant: LocationVariant::Single,
                request: AnalysisRequest::new(&options.image_path, location, options.mode),
            }]
        }
    }
}

/// Run the full pipeline once
///
/// The image is loaded before anything is sent, so a bad path never
/// reaches the model.
pub fn analyze<M: VisionModel + ?Sized>(
    model: &M,
    request: &AnalysisRequest,
    max_image_size: u32,
) -> Result<AnalysisResult> {
    let image = load_image(&request.image_path, max_image_size)?;
    let prompt = build_prompt(request.mode, request.location());

    info!(
        "analyzing {} {} location context",
        request.image_path.display(),
        if request.location().is_some() { "with" } else { "without" }
    );

    let text = model.generate(&image, &prompt, request.mode)?;
    let mut result = parse_analysis_response(&text)?;
    result.set_location_used(request.location());

    Ok(result)
}

/// Result of one planned run
#[derive(Debug)]
pub struct RunOutcome {
    pub variant: LocationVariant,
    pub request: AnalysisRequest,
    pub result: Result<AnalysisResult>,
}

/// Execute planned runs one after another
///
/// `on_start(index, total, run)` is called before each run. Every run is
/// attempted regardless of earlier failures.
pub fn execute<M, F>(
    model: &M,
    runs: Vec<PlannedRun>,
    max_image_size: u32,
    mut on_start: F,
) -> Vec<RunOutcome>
where
    M: VisionModel + ?Sized,
    F: FnMut(usize, usize, &PlannedRun),
{
    let total = runs.len();
    runs.into_iter()
        .enumerate()
        .map(|(index, run)| {
            on_start(index, total, &run);
            let result = analyze(model, &run.request, max_image_size);
            if let Err(e) = &result {
                warn!("{:?} run failed: {}", run.variant, e);
            }
            RunOutcome {
                variant: run.variant,
                request: run.request,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(location: Option<&str>, compare: bool, no_location: bool) -> RunOptions {
        RunOptions {
            image_path: PathBuf::from("rock.jpg"),
            location: location.map(String::from),
            mode: AnalysisMode::Detailed,
            compare,
            no_location,
        }
    }

    #[test]
    fn test_plan_single_with_location() {
        let runs = plan_runs(&options(Some("Snowdonia"), false, false));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].variant, LocationVariant::Single);
        assert_eq!(runs[0].request.location(), Some("Snowdonia"));
    }

    #[test]
    fn test_plan_compare() {
        let runs = plan_runs(&options(Some("Snowdonia"), true, false));
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].variant, LocationVariant::WithLocation);
        assert_eq!(runs[0].request.location(), Some("Snowdonia"));
        assert_eq!(runs[1].variant, LocationVariant::WithoutLocation);
        assert_eq!(runs[1].request.location(), None);
    }

    #[test]
    fn test_plan_no_location_overrides_location() {
        let runs = plan_runs(&options(Some("Snowdonia"), false, true));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].request.location(), None);
    }

    #[test]
    fn test_plan_compare_with_no_location_is_single() {
        let runs = plan_runs(&options(Some("Snowdonia"), true, true));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].variant, LocationVariant::Single);
        assert_eq!(runs[0].request.location(), None);
    }

    #[test]
    fn test_plan_compare_without_location_is_single() {
        let runs = plan_runs(&options(None, true, false));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].variant, LocationVariant::Single);
    }

    #[test]
    fn test_blank_location_is_dropped() {
        let request = AnalysisRequest::new("a.jpg", Some("   ".into()), AnalysisMode::Quick);
        assert_eq!(request.location(), None);
    }
}
